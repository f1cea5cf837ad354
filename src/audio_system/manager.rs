//! Audio engine
//!
//! Owns the playback device, the precached buffers and the voice pool. One
//! engine exists per process; it is built once at startup and torn down by
//! dropping it.

use std::path::PathBuf;

use super::cache::{AssetCache, AssetLayout, CachedBuffer, DeviceLoader, PrecacheReport};
use super::device::AudioDevice;
use super::voices::VoicePool;
use crate::catalog::AssetCatalog;
use crate::error::AudioError;
use crate::wav::HeaderPolicy;

/// Number of device voices, one of which is kept for music
pub const DEFAULT_VOICE_COUNT: usize = 32;

/// Startup parameters for the engine
#[derive(Debug, Clone)]
pub struct EngineSettings {
    /// Root of the sound asset tree
    pub sound_dir: PathBuf,
    pub voice_count: usize,
    pub header_policy: HeaderPolicy,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            sound_dir: PathBuf::from("sound"),
            voice_count: DEFAULT_VOICE_COUNT,
            header_policy: HeaderPolicy::default(),
        }
    }
}

pub struct AudioEngine<D: AudioDevice> {
    device: D,
    cache: AssetCache,
    voices: VoicePool,
    report: PrecacheReport,
}

impl<D: AudioDevice> AudioEngine<D> {
    /// Precache every catalogued asset, then allocate the voice pool.
    pub fn new<C>(
        mut device: D,
        catalog: &C,
        settings: &EngineSettings,
    ) -> Result<Self, AudioError>
    where
        C: AssetCatalog + ?Sized,
    {
        if settings.voice_count < 2 {
            return Err(AudioError::InvalidVoiceCount(settings.voice_count));
        }

        let layout = AssetLayout::new(&settings.sound_dir);
        let (cache, report) = {
            let mut loader = DeviceLoader::new(&mut device, settings.header_policy);
            AssetCache::precache(catalog, &layout, &mut loader)
        };

        let voices = VoicePool::new(device.create_voices(settings.voice_count)?)?;
        tracing::info!(
            "✓ Audio engine ready: {} voices ({} transient + 1 music)",
            voices.len(),
            voices.len() - 1
        );

        Ok(Self {
            device,
            cache,
            voices,
            report,
        })
    }

    pub fn cache(&self) -> &AssetCache {
        &self.cache
    }

    pub fn voices(&self) -> &VoicePool {
        &self.voices
    }

    pub fn device(&self) -> &D {
        &self.device
    }

    pub fn device_mut(&mut self) -> &mut D {
        &mut self.device
    }

    pub fn precache_report(&self) -> PrecacheReport {
        self.report
    }

    /// Play a one-shot buffer on the next transient voice.
    pub fn play_transient(&mut self, buffer: CachedBuffer) {
        let voice = self.voices.play_transient(&mut self.device, buffer.handle);
        tracing::trace!("Buffer {:?} on voice {:?}", buffer.handle, voice);
    }

    /// Loop a buffer on the music voice, replacing the current track.
    pub fn play_music(&mut self, track: usize, buffer: CachedBuffer) {
        self.voices.play_music(&mut self.device, track, buffer.handle);
    }
}
