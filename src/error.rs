use std::path::PathBuf;

use thiserror::Error;

use crate::audio_system::source::AssetCategory;

/// Chunk of a RIFF/WAVE file whose tag failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Chunk {
    /// Outer `RIFF`/`WAVE` record
    Riff,
    /// `fmt ` sub-record
    Format,
    /// `data` sub-record
    Data,
}

impl std::fmt::Display for Chunk {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Chunk::Riff => write!(f, "RIFF/WAVE"),
            Chunk::Format => write!(f, "fmt"),
            Chunk::Data => write!(f, "data"),
        }
    }
}

/// Decode failures for the WAV container.
#[derive(Error, Debug)]
pub enum WavError {
    #[error("Failed to open audio file: {path}")]
    FileOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid {0} header")]
    MalformedHeader(Chunk),

    #[error("Unexpected end of file")]
    ShortRead,

    #[error("Unsupported sample layout: {channels} channel(s) at {bits} bits")]
    UnsupportedFormat { channels: u16, bits: u16 },

    #[error("Failed to read audio file")]
    Io(#[source] std::io::Error),
}

impl WavError {
    /// Map a read error, folding EOF into `ShortRead`.
    pub(crate) fn from_read(err: std::io::Error) -> Self {
        if err.kind() == std::io::ErrorKind::UnexpectedEof {
            WavError::ShortRead
        } else {
            WavError::Io(err)
        }
    }
}

/// Audio engine errors.
#[derive(Error, Debug)]
pub enum AudioError {
    #[error("Failed to decode audio file: {path}")]
    Decode {
        path: PathBuf,
        #[source]
        source: WavError,
    },

    #[error("Failed to initialize audio output device")]
    DeviceInit(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("Failed to upload audio buffer: {0}")]
    BufferUpload(String),

    #[error("Voice pool needs at least 2 voices, got {0}")]
    InvalidVoiceCount(usize),

    #[error("No {category} cached for id {id}")]
    NotCached { category: AssetCategory, id: usize },
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration from {path}")]
    LoadFailed {
        path: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Failed to save configuration to {path}")]
    SaveFailed {
        path: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to create config directory: {path}")]
    DirectoryCreationFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Type alias for application Results using anyhow for context chaining
pub type AppResult<T> = anyhow::Result<T>;
