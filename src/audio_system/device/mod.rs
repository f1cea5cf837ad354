//! Playback device abstraction
//!
//! The engine talks to the sound hardware through [`AudioDevice`]: upload a
//! decoded buffer once, then bind buffers to voices and start or stop them.
//! Every source plays at the listener origin; there is no positional audio.

pub mod recording;
#[cfg(feature = "playback")]
pub mod output;

use crate::error::AudioError;
use crate::wav::DecodedAudio;

pub use recording::{DeviceCall, RecordingDevice};
#[cfg(feature = "playback")]
pub use output::RodioDevice;

/// Device-resident buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BufferHandle(pub u32);

/// Device playback channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VoiceHandle(pub u32);

pub trait AudioDevice {
    /// Move decoded PCM into device memory.
    ///
    /// The host copy is consumed whether or not the upload succeeds.
    fn create_buffer(&mut self, audio: DecodedAudio) -> Result<BufferHandle, AudioError>;

    /// Allocate `count` voices, all idle at the origin.
    fn create_voices(&mut self, count: usize) -> Result<Vec<VoiceHandle>, AudioError>;

    /// Attach a buffer to a voice, replacing whatever it held.
    fn bind(&mut self, voice: VoiceHandle, buffer: BufferHandle);

    fn set_looping(&mut self, voice: VoiceHandle, looping: bool);

    /// Start the bound buffer from the beginning.
    fn play(&mut self, voice: VoiceHandle);

    fn stop(&mut self, voice: VoiceHandle);
}
