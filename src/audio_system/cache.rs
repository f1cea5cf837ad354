//! Startup precache tables
//!
//! Every known effect, speech line and theme track is decoded and uploaded once
//! at startup. A missing or corrupt file leaves its slot empty; it never aborts
//! the pass.

use std::path::{Path, PathBuf};

use super::device::{AudioDevice, BufferHandle};
use super::source::{AssetCategory, Faction};
use crate::catalog::AssetCatalog;
use crate::error::AudioError;
use crate::wav::{self, HeaderPolicy, SampleFormat};

/// Uploaded buffer and the format it was created with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CachedBuffer {
    pub handle: BufferHandle,
    pub format: SampleFormat,
    pub sample_rate: u32,
    /// Payload size in bytes
    pub size: usize,
}

/// Directory layout of the sound assets
#[derive(Debug, Clone)]
pub struct AssetLayout {
    root: PathBuf,
}

impl AssetLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn effect_path(&self, faction: Faction, name: &str) -> PathBuf {
        let file = format!("{name}.wav");
        match faction.dir_name() {
            Some(dir) => self.root.join(dir).join(file),
            None => self.root.join(file),
        }
    }

    pub fn speech_path(&self, name: &str) -> PathBuf {
        self.root.join("speech").join(format!("{name}.wav"))
    }

    pub fn music_path(&self, name: &str) -> PathBuf {
        self.root.join("music").join(format!("{name}.wav"))
    }
}

/// Turns an asset path into a device buffer.
pub trait AssetLoader {
    fn load(&mut self, path: &Path) -> Result<CachedBuffer, AudioError>;
}

/// Decodes WAV files and uploads them to a device.
pub struct DeviceLoader<'a, D: AudioDevice> {
    device: &'a mut D,
    policy: HeaderPolicy,
}

impl<'a, D: AudioDevice> DeviceLoader<'a, D> {
    pub fn new(device: &'a mut D, policy: HeaderPolicy) -> Self {
        Self { device, policy }
    }
}

impl<D: AudioDevice> AssetLoader for DeviceLoader<'_, D> {
    fn load(&mut self, path: &Path) -> Result<CachedBuffer, AudioError> {
        let audio = wav::load_wav(path, self.policy).map_err(|source| AudioError::Decode {
            path: path.to_path_buf(),
            source,
        })?;

        let format = audio.format;
        let sample_rate = audio.sample_rate;
        let size = audio.len();
        let handle = self.device.create_buffer(audio)?;

        Ok(CachedBuffer {
            handle,
            format,
            sample_rate,
            size,
        })
    }
}

/// Outcome of a precache pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PrecacheReport {
    pub loaded: usize,
    pub failed: usize,
}

impl PrecacheReport {
    fn record<T>(&mut self, result: &Result<T, AudioError>) {
        match result {
            Ok(_) => self.loaded += 1,
            Err(_) => self.failed += 1,
        }
    }
}

/// Precached buffers indexed by category
#[derive(Debug, Clone, Default)]
pub struct AssetCache {
    /// Indexed by `Faction::index`, then effect id
    effects: [Vec<Option<CachedBuffer>>; 3],
    speech: Vec<Option<CachedBuffer>>,
    music: Vec<Option<CachedBuffer>>,
}

fn try_load<L: AssetLoader>(
    loader: &mut L,
    path: &Path,
    report: &mut PrecacheReport,
) -> Option<CachedBuffer> {
    let result = loader.load(path);
    report.record(&result);
    match result {
        Ok(buffer) => {
            tracing::debug!(
                "Cached {} ({}, {} Hz, {} bytes)",
                path.display(),
                buffer.format,
                buffer.sample_rate,
                buffer.size
            );
            Some(buffer)
        }
        Err(e) => {
            tracing::debug!("Skipped asset: {:#}", anyhow::Error::new(e));
            None
        }
    }
}

impl AssetCache {
    /// Load every asset the catalog knows about.
    ///
    /// For each effect the neutral file is tried first; the Allied and Soviet
    /// variants are only tried when it fails, and each independently.
    pub fn precache<C, L>(
        catalog: &C,
        layout: &AssetLayout,
        loader: &mut L,
    ) -> (Self, PrecacheReport)
    where
        C: AssetCatalog + ?Sized,
        L: AssetLoader,
    {
        let mut report = PrecacheReport::default();
        let mut cache = AssetCache {
            effects: std::array::from_fn(|_| vec![None; catalog.effect_count()]),
            speech: vec![None; catalog.speech_count()],
            music: vec![None; catalog.theme_count()],
        };

        for id in 0..catalog.effect_count() {
            let name = catalog.effect_file_name(id);
            let neutral_path = layout.effect_path(Faction::Neutral, name);
            let neutral = try_load(loader, &neutral_path, &mut report);
            if neutral.is_some() {
                cache.effects[Faction::Neutral.index()][id] = neutral;
                continue;
            }

            for faction in [Faction::Allied, Faction::Soviet] {
                cache.effects[faction.index()][id] =
                    try_load(loader, &layout.effect_path(faction, name), &mut report);
            }
        }

        for id in 0..catalog.speech_count() {
            let path = layout.speech_path(catalog.speech_file_name(id));
            cache.speech[id] = try_load(loader, &path, &mut report);
        }

        for id in 0..catalog.theme_count() {
            let path = layout.music_path(catalog.theme_file_name(id));
            cache.music[id] = try_load(loader, &path, &mut report);
        }

        tracing::info!(
            "✓ Precached {} sounds from {} ({} missing or unreadable)",
            report.loaded,
            layout.root().display(),
            report.failed
        );

        (cache, report)
    }

    pub fn effect(&self, faction: Faction, id: usize) -> Option<&CachedBuffer> {
        self.effects[faction.index()].get(id)?.as_ref()
    }

    pub fn speech(&self, id: usize) -> Option<&CachedBuffer> {
        self.speech.get(id)?.as_ref()
    }

    pub fn music(&self, id: usize) -> Option<&CachedBuffer> {
        self.music.get(id)?.as_ref()
    }

    /// Look up a slot by category; effects resolve to the neutral table.
    pub fn get(&self, category: AssetCategory, id: usize) -> Option<&CachedBuffer> {
        match category {
            AssetCategory::Effect => self.effect(Faction::Neutral, id),
            AssetCategory::Speech => self.speech(id),
            AssetCategory::Music => self.music(id),
        }
    }

    /// Number of filled slots across all tables
    pub fn cached_count(&self) -> usize {
        self.effects
            .iter()
            .chain([&self.speech, &self.music])
            .flatten()
            .filter(|slot| slot.is_some())
            .count()
    }
}
