//! Fixed voice pool
//!
//! The last voice is reserved for looping music. All others form a ring that
//! transient sounds (effects and speech) are assigned to in turn, with no check
//! for whether the voice is still playing: the oldest sound is cut off.

use super::device::{AudioDevice, BufferHandle, VoiceHandle};
use crate::error::AudioError;

#[derive(Debug)]
pub struct VoicePool {
    voices: Vec<VoiceHandle>,
    cursor: usize,
    current_music: Option<usize>,
}

impl VoicePool {
    /// Wrap a fixed set of device voices. Needs at least one transient voice
    /// besides the music voice.
    pub fn new(voices: Vec<VoiceHandle>) -> Result<Self, AudioError> {
        if voices.len() < 2 {
            return Err(AudioError::InvalidVoiceCount(voices.len()));
        }
        Ok(Self {
            voices,
            cursor: 0,
            current_music: None,
        })
    }

    pub fn len(&self) -> usize {
        self.voices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.voices.is_empty()
    }

    fn transient_count(&self) -> usize {
        self.voices.len() - 1
    }

    pub fn music_voice(&self) -> VoiceHandle {
        self.voices[self.voices.len() - 1]
    }

    /// Track currently looping on the music voice
    pub fn current_music(&self) -> Option<usize> {
        self.current_music
    }

    /// Next voice in the transient ring.
    pub fn allocate_transient(&mut self) -> VoiceHandle {
        if self.cursor >= self.transient_count() {
            self.cursor = 0;
        }
        let voice = self.voices[self.cursor];
        self.cursor += 1;
        voice
    }

    /// Start a one-shot buffer on the next transient voice.
    pub fn play_transient<D: AudioDevice>(
        &mut self,
        device: &mut D,
        buffer: BufferHandle,
    ) -> VoiceHandle {
        let voice = self.allocate_transient();
        device.bind(voice, buffer);
        device.play(voice);
        voice
    }

    /// Loop a track on the music voice.
    ///
    /// Whatever was playing is stopped first, including the same track; there
    /// is no crossfade.
    pub fn play_music<D: AudioDevice>(
        &mut self,
        device: &mut D,
        track: usize,
        buffer: BufferHandle,
    ) {
        let voice = self.music_voice();
        if let Some(previous) = self.current_music {
            tracing::debug!("Stopping music track {}", previous);
            device.stop(voice);
        }

        device.bind(voice, buffer);
        device.set_looping(voice, true);
        device.play(voice);
        self.current_music = Some(track);
        tracing::info!("Playing music track {}", track);
    }
}
