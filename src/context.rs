//! Service context that bundles all port trait objects.

use std::path::Path;
use std::sync::{Arc, Mutex};

use crate::adapters::live::gemini::GeminiTransformer;
use crate::adapters::recording::photo_transformer::RecordingPhotoTransformer;
use crate::adapters::replaying::photo_transformer::ReplayingPhotoTransformer;
use crate::cassette::config::load_cassette;
use crate::cassette::recorder::CassetteRecorder;
use crate::config::{Config, ConfigCredentials};
use crate::error::ReviveError;
use crate::ports::PhotoTransformer;

/// Bundles all port trait objects into a single context.
pub struct ServiceContext {
    /// Photo transformer port.
    pub transformer: Box<dyn PhotoTransformer>,
}

/// Handle to a recording session that must be finished after use.
pub struct RecordingSession {
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingSession {
    /// Finish the recording and write cassette files to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette file cannot be written.
    pub fn finish(self) -> Result<std::path::PathBuf, String> {
        let recorder = Arc::try_unwrap(self.recorder)
            .map_err(|_| "Recording adapter still has references".to_string())?
            .into_inner()
            .map_err(|e| format!("Recorder lock poisoned: {e}"))?;
        recorder.finish().map_err(|e| format!("Failed to write cassette: {e}"))
    }
}

impl ServiceContext {
    /// Create a live context.
    ///
    /// Fails fast when no API key is available anywhere; the transformer
    /// still re-resolves the credential before every call, so rotation while
    /// the process runs is honored.
    ///
    /// # Errors
    ///
    /// Returns an error if the API key is not configured.
    pub fn live(config: &Config, config_path: &Path) -> Result<Self, ReviveError> {
        if config.gemini_key().is_none() {
            return Err(ReviveError::MissingApiKey {
                provider: "Gemini".into(),
                env_var: "GEMINI_API_KEY".into(),
            });
        }
        let credentials = Box::new(ConfigCredentials::new(config_path.to_path_buf()));
        Ok(Self { transformer: Box::new(GeminiTransformer::new(credentials)) })
    }

    /// Create a recording context that wraps a live adapter with a recorder.
    ///
    /// # Errors
    ///
    /// Returns an error if the recording session cannot be initialized.
    pub fn recording(
        config: &Config,
        config_path: &Path,
    ) -> Result<(Self, RecordingSession), ReviveError> {
        let live_ctx = Self::live(config, config_path)?;

        let timestamp = chrono::Utc::now().format("%Y-%m-%dT%H-%M-%S").to_string();
        let output_dir = std::path::PathBuf::from(".reviver/cassettes").join(&timestamp);

        let commit = get_commit_hash();
        let path = output_dir.join("photo_transformer.cassette.yaml");
        let recorder = Arc::new(Mutex::new(CassetteRecorder::new(
            path,
            format!("{timestamp}-photo_transformer"),
            &commit,
        )));

        let recording_transformer =
            RecordingPhotoTransformer::new(live_ctx.transformer, Arc::clone(&recorder));

        let ctx = Self { transformer: Box::new(recording_transformer) };
        let session = RecordingSession { recorder };

        Ok((ctx, session))
    }

    /// Create a replaying context from a cassette file.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette file cannot be loaded.
    pub fn replaying(path: &Path) -> Result<Self, ReviveError> {
        let replayer = load_cassette(path)
            .map_err(|e| ReviveError::Config(format!("Failed to load cassette: {e}")))?;
        let replayer = Arc::new(Mutex::new(replayer));
        let transformer = Box::new(ReplayingPhotoTransformer::new(replayer));
        Ok(Self { transformer })
    }
}

/// Get the current git commit hash, or "unknown" if unavailable.
fn get_commit_hash() -> String {
    std::process::Command::new("git")
        .args(["rev-parse", "HEAD"])
        .output()
        .ok()
        .filter(|o| o.status.success())
        .and_then(|o| String::from_utf8(o.stdout).ok())
        .map_or_else(|| "unknown".to_string(), |s| s.trim().to_string())
}
