//! Replaying adapter for the `PhotoTransformer` port.

use std::sync::{Arc, Mutex};

use super::{next_output, replay_result};
use crate::cassette::replayer::CassetteReplayer;
use crate::error::ReviveError;
use crate::ports::photo_transformer::{
    PhotoTransformer, RevivedImage, TransformFuture, TransformRequest,
};

/// Serves recorded transform results from a cassette.
pub struct ReplayingPhotoTransformer {
    replayer: Option<Arc<Mutex<CassetteReplayer>>>,
}

impl ReplayingPhotoTransformer {
    /// Create a replaying transformer backed by the given replayer.
    #[must_use]
    pub fn new(replayer: Arc<Mutex<CassetteReplayer>>) -> Self {
        Self { replayer: Some(replayer) }
    }
}

impl PhotoTransformer for ReplayingPhotoTransformer {
    fn transform(&self, _request: &TransformRequest) -> TransformFuture<'_> {
        let output = next_output(self.replayer.as_ref(), "photo_transformer", "transform");
        Box::pin(async move {
            // Replayed errors keep their recorded message so failure flows
            // read the same as live ones.
            replay_result::<Option<RevivedImage>>(output)
                .map_err(|e| ReviveError::Transform(e.to_string()))
        })
    }
}
