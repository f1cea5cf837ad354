pub mod cache;
pub mod device;
pub mod manager;
pub mod player;
/// Audio system module
///
/// Precaches every game sound at startup and plays them through a fixed pool
/// of voices:
/// - Sound effects, with Allied/Soviet variants when no shared file exists
/// - Speech lines
/// - Looping theme music on a voice of its own
///
/// ## Architecture
///
/// ```text
/// GameAudio (on_sound_effect / on_speech / play_music)
///   └── AudioEngine
///       ├── AssetCache     effects[faction][id], speech[id], music[id]
///       ├── VoicePool      voices 0..N-1 round-robin, voice N-1 music
///       └── AudioDevice    rodio output, or the recording device
/// ```
///
/// ## Usage
///
/// ```rust,ignore
/// use audmix::audio_system::{AudioEngine, EngineSettings, GameAudio, RodioDevice};
///
/// let device = RodioDevice::open()?;
/// let engine = AudioEngine::new(device, &catalog, &EngineSettings::default())?;
/// let mut audio = GameAudio::new(engine);
///
/// audio.play_music(0)?;
/// audio.on_speech(3, None)?;
/// ```
pub mod source;
pub mod voices;

// Re-export commonly used types
pub use cache::{AssetCache, AssetLayout, AssetLoader, CachedBuffer, DeviceLoader, PrecacheReport};
#[cfg(feature = "playback")]
pub use device::RodioDevice;
pub use device::{AudioDevice, BufferHandle, DeviceCall, RecordingDevice, VoiceHandle};
pub use manager::{AudioEngine, EngineSettings, DEFAULT_VOICE_COUNT};
pub use player::{Coordinate, GameAudio};
pub use source::{AssetCategory, Faction};
pub use voices::VoicePool;
