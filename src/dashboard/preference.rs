use serde::{Deserialize, Serialize};
use std::io;
use std::path::PathBuf;

#[derive(Serialize, Deserialize, Default, Debug, PartialEq, Eq)]
struct StoredPreference {
    sound_enabled: bool,
}

/// The staff member's sound choice, kept on disk across restarts.
#[derive(Clone, Debug)]
pub struct SoundPreference {
    path: PathBuf,
}

impl SoundPreference {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Defaults to disabled when nothing usable has been stored yet.
    pub async fn load(&self) -> bool {
        let raw = match tokio::fs::read(&self.path).await {
            Ok(raw) => raw,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return false,
            Err(err) => {
                tracing::warn!("Failed to read sound preference at {:?}: {}", self.path, err);
                return false;
            }
        };

        match serde_json::from_slice::<StoredPreference>(&raw) {
            Ok(stored) => stored.sound_enabled,
            Err(err) => {
                tracing::warn!("Ignoring invalid sound preference at {:?}: {}", self.path, err);
                false
            }
        }
    }

    pub async fn store(&self, sound_enabled: bool) -> io::Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        let raw = serde_json::to_vec(&StoredPreference { sound_enabled })?;
        tokio::fs::write(&self.path, raw).await
    }
}
