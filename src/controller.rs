//! View state controller: the upload → transform → download flow.

use std::path::Path;

use crate::error::ReviveError;
use crate::intake::{self, SourceImage};
use crate::output;
use crate::ports::photo_transformer::RevivedImage;
use crate::ports::{PhotoTransformer, TransformRequest};

/// Message shown when generation is triggered without an uploaded photo.
pub const MSG_EMPTY_SOURCE: &str = "Please upload an image first.";

/// Message shown when the service call succeeded but carried no image.
pub const MSG_EMPTY_RESULT: &str = "The service did not return an image. Please try again.";

/// The single-variant flow state.
///
/// A tagged union rather than independent loading/result/error flags, so
/// impossible combinations (loading with an error set, a result alongside an
/// error) cannot be represented.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewState {
    /// No result yet: either no photo uploaded or no generation triggered.
    Idle,
    /// A transform call is outstanding.
    Loading,
    /// The last transform produced this image.
    Success(RevivedImage),
    /// The last upload or transform failed with this message.
    Failed(String),
}

/// Drives the upload / generate / download flow for one photo at a time.
///
/// One controller means one logical flow: at most one transform call is
/// outstanding, enforced by the `&mut self` receivers plus the [`ViewState::Loading`]
/// guard in [`Controller::generate`]. There is no queue and no cancellation;
/// an in-flight call always runs to completion.
pub struct Controller {
    transformer: Box<dyn PhotoTransformer>,
    model: String,
    source: Option<SourceImage>,
    state: ViewState,
}

impl Controller {
    /// Create a controller with no uploaded photo.
    #[must_use]
    pub fn new(transformer: Box<dyn PhotoTransformer>, model: String) -> Self {
        Self { transformer, model, source: None, state: ViewState::Idle }
    }

    /// Current flow state.
    #[must_use]
    pub fn state(&self) -> &ViewState {
        &self.state
    }

    /// The currently uploaded photo, if any.
    #[must_use]
    pub fn source(&self) -> Option<&SourceImage> {
        self.source.as_ref()
    }

    /// Upload a photo, replacing any previous one.
    ///
    /// A prior `Success` or `Failed` state is cleared back to `Idle` so stale
    /// output is never shown against the new source. A failed read surfaces
    /// through the same error channel as a failed generation, but never
    /// enters `Loading`.
    ///
    /// # Errors
    ///
    /// Returns [`ReviveError::Read`] if the file cannot be read.
    pub fn upload_image(&mut self, path: &Path) -> Result<(), ReviveError> {
        match intake::submit_file(path) {
            Ok(source) => {
                self.source = Some(source);
                self.state = ViewState::Idle;
                Ok(())
            }
            Err(e) => {
                self.state = ViewState::Failed(e.to_string());
                Err(e)
            }
        }
    }

    /// Run one transform call and settle into `Success` or `Failed`.
    ///
    /// With no uploaded photo this fails immediately without contacting the
    /// service. While a call is already outstanding the trigger is ignored,
    /// so a second invocation can never produce a second concurrent request.
    pub async fn generate(&mut self) -> &ViewState {
        if matches!(self.state, ViewState::Loading) {
            return &self.state;
        }

        let Some(source) = self.source.as_ref() else {
            self.state = ViewState::Failed(MSG_EMPTY_SOURCE.to_string());
            return &self.state;
        };

        let request = TransformRequest::from_source(source, &self.model);
        self.state = ViewState::Loading;

        let outcome = self.transformer.transform(&request).await;

        self.state = match outcome {
            Ok(Some(image)) => ViewState::Success(image),
            Ok(None) => ViewState::Failed(MSG_EMPTY_RESULT.to_string()),
            Err(e) => ViewState::Failed(e.to_string()),
        };
        &self.state
    }

    /// Deliver the result image to the given path as a PNG.
    ///
    /// Only meaningful in `Success`; in any other state this is a no-op that
    /// returns `false`. Never transitions the state machine.
    ///
    /// # Errors
    ///
    /// Returns an error if the result cannot be converted or written.
    pub fn download(&self, path: &Path) -> Result<bool, ReviveError> {
        let ViewState::Success(image) = &self.state else {
            return Ok(false);
        };
        output::save_png(&image.data, path)?;
        Ok(true)
    }
}
