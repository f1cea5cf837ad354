//! Game audio mixer
//!
//! Decodes the game's WAV assets into device buffers at startup and plays
//! effects, speech and looping music through a fixed pool of voices.

pub mod audio_system;
pub mod catalog;
pub mod config;
pub mod error;
pub mod wav;

pub use audio_system::{AudioEngine, EngineSettings, GameAudio};
pub use catalog::{AssetCatalog, NameCatalog};
pub use config::AudioConfig;
pub use error::{AudioError, ConfigError, WavError};
