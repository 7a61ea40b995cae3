use crossbeam_channel::Sender;
use serde_json::Value;

use crate::pipeline::detect_error::DetectError;
use crate::pipeline::plugin_call::PluginCall;

pub type CallOutcome = Result<Value, DetectError>;

/// A call whose outcome is delivered over a channel.
///
/// Used to drive the asynchronous pipeline from synchronous code. The
/// receiver sees a disconnect if the call is dropped unsettled.
pub struct ChannelPluginCall {
    data: Value,
    tx: Sender<CallOutcome>,
}

impl ChannelPluginCall {
    pub fn new(data: Value, tx: Sender<CallOutcome>) -> Self {
        Self { data, tx }
    }

    fn send(self, outcome: CallOutcome) {
        if self.tx.send(outcome).is_err() {
            log::debug!("Call settled after its receiver went away");
        }
    }
}

impl PluginCall for ChannelPluginCall {
    fn data(&self) -> &Value {
        &self.data
    }

    fn resolve(self: Box<Self>, result: Value) {
        self.send(Ok(result));
    }

    fn reject(self: Box<Self>, error: DetectError) {
        self.send(Err(error));
    }
}
