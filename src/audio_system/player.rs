//! Game-facing playback entry points
//!
//! Routes logical sound triggers to a cached buffer and a voice. When the
//! output device could not be opened the facade is disabled and every trigger
//! is silently ignored.

use super::device::AudioDevice;
use super::manager::AudioEngine;
use super::source::{AssetCategory, Faction};
use crate::error::AudioError;

/// Packed map coordinate of a sound trigger
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Coordinate(pub u32);

pub struct GameAudio<D: AudioDevice> {
    engine: Option<AudioEngine<D>>,
}

impl<D: AudioDevice> GameAudio<D> {
    pub fn new(engine: AudioEngine<D>) -> Self {
        Self {
            engine: Some(engine),
        }
    }

    /// Facade without a device; all triggers are no-ops.
    pub fn disabled() -> Self {
        Self { engine: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.engine.is_some()
    }

    pub fn engine(&self) -> Option<&AudioEngine<D>> {
        self.engine.as_ref()
    }

    pub fn engine_mut(&mut self) -> Option<&mut AudioEngine<D>> {
        self.engine.as_mut()
    }

    /// Play a sound effect.
    ///
    /// `None` means "no sound" and is ignored. Variation, position and house
    /// are accepted but do not affect playback: every effect plays from the
    /// neutral table at the listener origin.
    pub fn on_sound_effect(
        &mut self,
        effect: Option<usize>,
        _variation: i32,
        _coord: Coordinate,
        _house: Option<Faction>,
    ) -> Result<(), AudioError> {
        let Some(id) = effect else {
            return Ok(());
        };
        self.play_transient(AssetCategory::Effect, id)
    }

    /// Play a speech line.
    ///
    /// Only speech without an attributed house is played locally; house
    /// speech is left to the caller.
    pub fn on_speech(&mut self, speech: usize, house: Option<Faction>) -> Result<(), AudioError> {
        if let Some(house) = house {
            tracing::trace!("Speech {} for {} not played locally", speech, house);
            return Ok(());
        }
        self.play_transient(AssetCategory::Speech, speech)
    }

    /// Loop a theme track on the music voice.
    pub fn play_music(&mut self, track: usize) -> Result<(), AudioError> {
        let Some(engine) = self.engine.as_mut() else {
            return Ok(());
        };
        let buffer = *engine.cache().music(track).ok_or(AudioError::NotCached {
            category: AssetCategory::Music,
            id: track,
        })?;
        engine.play_music(track, buffer);
        Ok(())
    }

    /// Track currently looping, if any
    pub fn current_music(&self) -> Option<usize> {
        self.engine.as_ref()?.voices().current_music()
    }

    fn play_transient(&mut self, category: AssetCategory, id: usize) -> Result<(), AudioError> {
        let Some(engine) = self.engine.as_mut() else {
            return Ok(());
        };
        let buffer = *engine
            .cache()
            .get(category, id)
            .ok_or(AudioError::NotCached { category, id })?;
        engine.play_transient(buffer);
        Ok(())
    }
}
