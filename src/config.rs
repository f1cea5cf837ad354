use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::audio_system::manager::{EngineSettings, DEFAULT_VOICE_COUNT};
use crate::catalog::NameCatalog;
use crate::error::ConfigError;
use crate::wav::HeaderPolicy;

fn default_sound_dir() -> PathBuf {
    PathBuf::from("sound")
}

fn default_voice_count() -> usize {
    DEFAULT_VOICE_COUNT
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudioConfig {
    /// Root of the sound tree (`effect.wav`, `alied/`, `russian/`, `speech/`, `music/`)
    #[serde(default = "default_sound_dir")]
    pub sound_dir: PathBuf,

    /// Total voices, including the one reserved for music
    #[serde(default = "default_voice_count")]
    pub voice_count: usize,

    /// Reject WAV files when either outer tag is wrong, not only both
    #[serde(default)]
    pub strict_headers: bool,

    /// Logical id to file name mapping
    #[serde(default)]
    pub catalog: NameCatalog,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            sound_dir: default_sound_dir(),
            voice_count: DEFAULT_VOICE_COUNT,
            strict_headers: false,
            catalog: NameCatalog::default(),
        }
    }
}

impl AudioConfig {
    /// Load configuration from `path`.
    /// Creates a default config file if it doesn't exist.
    pub fn load_or_create(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            let content = fs::read_to_string(path).map_err(|e| ConfigError::LoadFailed {
                path: path.display().to_string(),
                source: Box::new(e),
            })?;
            let config: AudioConfig =
                serde_json::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                    path: path.display().to_string(),
                    source: Box::new(e),
                })?;
            config.validate()?;

            tracing::info!("✓ Loaded config from: {}", path.display());
            Ok(config)
        } else {
            let config = AudioConfig::default();
            config.save(path)?;
            tracing::info!("✓ Created default config at: {}", path.display());
            Ok(config)
        }
    }

    /// Save configuration to disk
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| ConfigError::DirectoryCreationFailed {
                path: parent.display().to_string(),
                source: e,
            })?;
        }

        let json = serde_json::to_string_pretty(self).map_err(|e| ConfigError::SaveFailed {
            path: path.display().to_string(),
            source: Box::new(e),
        })?;
        fs::write(path, json).map_err(|e| ConfigError::SaveFailed {
            path: path.display().to_string(),
            source: Box::new(e),
        })?;

        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.voice_count < 2 {
            return Err(ConfigError::Invalid(format!(
                "voice_count must be at least 2 (one transient voice plus music), got {}",
                self.voice_count
            )));
        }
        Ok(())
    }

    pub fn header_policy(&self) -> HeaderPolicy {
        if self.strict_headers {
            HeaderPolicy::Strict
        } else {
            HeaderPolicy::Permissive
        }
    }

    pub fn engine_settings(&self) -> EngineSettings {
        EngineSettings {
            sound_dir: self.sound_dir.clone(),
            voice_count: self.voice_count,
            header_policy: self.header_policy(),
        }
    }
}
