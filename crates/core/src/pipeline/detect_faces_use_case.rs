use std::sync::Arc;
use std::time::Duration;

use crossbeam_channel::RecvTimeoutError;
use serde_json::Value;

use crate::detection::domain::detector_options::DetectorOptions;
use crate::detection::domain::face_detector::{
    EngineError, FaceDetectionEngine, FaceDetectorSession, NativeFaces,
};
use crate::detection::domain::face_normalizer::normalize_faces;
use crate::detection::domain::options_mapper::map_options;
use crate::detection::infrastructure::image_decoder::decode_base64_image;
use crate::shared::bitmap::Bitmap;

use super::call_status::{CallState, CallStatus};
use super::detect_error::DetectError;
use super::infrastructure::channel_plugin_call::ChannelPluginCall;
use super::plugin_call::{DetectRequest, PluginCall};

pub const ABANDONED_MESSAGE: &str = "detector dropped the request without completing";

/// Handles `detectInImage`: decode, configure, detect, normalize, settle.
///
/// `execute` returns as soon as detection is issued. The call is settled
/// exactly once from whichever thread the engine completes on, and the
/// detector session is closed only after that.
pub struct DetectFacesUseCase {
    engine: Arc<dyn FaceDetectionEngine>,
}

impl DetectFacesUseCase {
    pub fn new(engine: Arc<dyn FaceDetectionEngine>) -> Self {
        Self { engine }
    }

    pub fn execute(&self, call: Box<dyn PluginCall>) -> CallStatus {
        let status = CallStatus::new();
        let prepared = self.prepare(call.data());
        let pending = PendingCall {
            call: Some(call),
            status: status.clone(),
        };

        let (image, options) = match prepared {
            Ok(prepared) => prepared,
            Err(e) => {
                pending.settle(Err(e));
                return status;
            }
        };
        let session = match self.engine.open_session(&options) {
            Ok(session) => session,
            Err(e) => {
                pending.settle(Err(e.into()));
                return status;
            }
        };

        log::debug!(
            "Detecting in {}x{} image with {:?}",
            image.width(),
            image.height(),
            options
        );
        status.begin();
        let completion = Completion {
            pending,
            _release: SessionGuard(Arc::clone(&session)),
        };
        session.detect_in_image(image, Box::new(move |result| completion.finish(result)));
        status
    }

    /// Runs one call and waits for it to settle.
    ///
    /// With a `timeout`, a detection still in flight when it expires is
    /// reported as an internal error; the session is left to finish on its own.
    pub fn execute_blocking(
        &self,
        request: Value,
        timeout: Option<Duration>,
    ) -> Result<Value, DetectError> {
        let (tx, rx) = crossbeam_channel::bounded(1);
        self.execute(Box::new(ChannelPluginCall::new(request, tx)));
        match timeout {
            Some(limit) => rx.recv_timeout(limit).map_err(|e| match e {
                RecvTimeoutError::Timeout => DetectError::internal(format!(
                    "no detection result within {} ms",
                    limit.as_millis()
                )),
                RecvTimeoutError::Disconnected => DetectError::internal(ABANDONED_MESSAGE),
            })?,
            None => rx
                .recv()
                .map_err(|_| DetectError::internal(ABANDONED_MESSAGE))?,
        }
    }

    fn prepare(&self, data: &Value) -> Result<(Bitmap, DetectorOptions), DetectError> {
        let request = DetectRequest::from_value(data)?;
        let image = decode_base64_image(&request.image)?;
        let options = map_options(request.options.as_ref(), &self.engine.default_options())?;
        Ok((image, options))
    }
}

/// A call that has not been settled yet.
///
/// Dropping it unsettled rejects the call, so an engine that loses the
/// completion callback still produces an answer.
struct PendingCall {
    call: Option<Box<dyn PluginCall>>,
    status: CallStatus,
}

impl PendingCall {
    fn complete(self, result: Result<NativeFaces, EngineError>) {
        let outcome = result.map_err(DetectError::from).and_then(|faces| {
            let normalized = normalize_faces(&faces);
            log::info!("Detected {} face(s)", normalized.faces.len());
            normalized
                .to_json()
                .map_err(|e| DetectError::internal(format!("failed to serialize faces: {e}")))
        });
        self.settle(outcome);
    }

    fn settle(mut self, outcome: Result<Value, DetectError>) {
        if let Some(call) = self.call.take() {
            deliver(call, &self.status, outcome);
        }
    }
}

impl Drop for PendingCall {
    fn drop(&mut self) {
        if let Some(call) = self.call.take() {
            deliver(call, &self.status, Err(DetectError::internal(ABANDONED_MESSAGE)));
        }
    }
}

fn deliver(call: Box<dyn PluginCall>, status: &CallStatus, outcome: Result<Value, DetectError>) {
    match outcome {
        Ok(result) => {
            status.settle(CallState::Succeeded);
            call.resolve(result);
        }
        Err(e) => {
            log::warn!("Detection failed ({}): {e}", e.kind());
            status.settle(CallState::Failed);
            call.reject(e);
        }
    }
}

/// Everything the completion callback owns.
///
/// Fields drop in declaration order, so the call is settled before the
/// session is closed whether or not the engine invokes the callback.
struct Completion {
    pending: PendingCall,
    _release: SessionGuard,
}

impl Completion {
    fn finish(self, result: Result<NativeFaces, EngineError>) {
        let Completion { pending, _release } = self;
        pending.complete(result);
    }
}

/// Closes the session when the completion callback is done with it.
struct SessionGuard(Arc<dyn FaceDetectorSession>);

impl Drop for SessionGuard {
    fn drop(&mut self) {
        self.0.close();
        log::debug!("Detector session released");
    }
}
