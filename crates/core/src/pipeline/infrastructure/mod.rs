pub mod channel_plugin_call;
