//! Recording adapter for the `PhotoTransformer` port.

use std::sync::{Arc, Mutex};

use super::record_result;
use crate::cassette::recorder::CassetteRecorder;
use crate::ports::photo_transformer::{PhotoTransformer, TransformFuture, TransformRequest};

/// Records transform interactions while delegating to an inner implementation.
pub struct RecordingPhotoTransformer {
    inner: Box<dyn PhotoTransformer>,
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingPhotoTransformer {
    /// Creates a new recording transformer wrapping the given implementation.
    pub fn new(inner: Box<dyn PhotoTransformer>, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self { inner, recorder }
    }
}

impl PhotoTransformer for RecordingPhotoTransformer {
    fn transform(&self, request: &TransformRequest) -> TransformFuture<'_> {
        let request_clone = request.clone();
        let recorder = Arc::clone(&self.recorder);

        Box::pin(async move {
            let result = self.inner.transform(&request_clone).await;
            record_result(&recorder, "photo_transformer", "transform", &request_clone, &result);
            result
        })
    }
}
