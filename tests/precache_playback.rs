// Integration tests: sound tree on disk -> precache -> triggers -> device commands

mod common;

use audmix::audio_system::{
    AudioEngine, BufferHandle, Coordinate, DeviceCall, EngineSettings, Faction, GameAudio,
    RecordingDevice, VoiceHandle,
};
use audmix::error::{Chunk, WavError};
use audmix::wav::{self, HeaderPolicy, SampleFormat};
use audmix::{AudioConfig, AudioError};

use common::{catalog, raw_wav, sound_root, write_raw, write_tone};

fn settings(dir: &tempfile::TempDir, voice_count: usize) -> EngineSettings {
    EngineSettings {
        sound_dir: sound_root(dir),
        voice_count,
        ..EngineSettings::default()
    }
}

#[test]
fn test_single_neutral_effect_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    write_raw(&sound_root(&dir).join("bleep.wav"), &raw_wav(8000, &[1, 2, 3, 4]));

    let engine = AudioEngine::new(
        RecordingDevice::new(),
        &catalog(&["bleep"], &[], &[]),
        &settings(&dir, 32),
    )
    .unwrap();

    let slot = engine.cache().effect(Faction::Neutral, 0).copied().unwrap();
    assert_eq!(slot.sample_rate, 8000);
    assert_eq!(slot.size, 4);
    assert_eq!(slot.format, SampleFormat::Mono8);
    assert!(engine.cache().effect(Faction::Allied, 0).is_none());
    assert!(engine.cache().effect(Faction::Soviet, 0).is_none());

    let info = engine.device().buffer_info(slot.handle).unwrap();
    assert_eq!(info.sample_rate, 8000);
    assert_eq!(info.size, 4);
    assert_eq!(engine.device().buffer_count(), 1);
}

#[test]
fn test_hound_files_decode_in_every_layout() {
    let dir = tempfile::tempdir().unwrap();
    let cases = [
        (1, 8, SampleFormat::Mono8),
        (1, 16, SampleFormat::Mono16),
        (2, 8, SampleFormat::Stereo8),
        (2, 16, SampleFormat::Stereo16),
    ];

    for (channels, bits, expected) in cases {
        let path = dir.path().join(format!("tone_{channels}_{bits}.wav"));
        write_tone(&path, channels, bits, 11025, 100);

        let audio = wav::load_wav(&path, HeaderPolicy::Strict).unwrap();
        assert_eq!(audio.format, expected);
        assert_eq!(audio.sample_rate, 11025);
        assert_eq!(audio.len(), 100 * channels as usize * bits as usize / 8);
    }
}

#[test]
fn test_corrupt_data_tag_registers_no_buffer() {
    let dir = tempfile::tempdir().unwrap();
    let mut bytes = raw_wav(8000, &[1, 2, 3, 4]);
    bytes[36..40].copy_from_slice(b"dada");
    let path = sound_root(&dir).join("bleep.wav");
    write_raw(&path, &bytes);

    assert!(matches!(
        wav::load_wav(&path, HeaderPolicy::Permissive),
        Err(WavError::MalformedHeader(Chunk::Data))
    ));

    let engine = AudioEngine::new(
        RecordingDevice::new(),
        &catalog(&["bleep"], &[], &[]),
        &settings(&dir, 4),
    )
    .unwrap();
    assert!(engine.cache().effect(Faction::Neutral, 0).is_none());
    assert_eq!(engine.device().buffer_count(), 0);
    assert!(engine.device().calls().is_empty());
}

#[test]
fn test_truncated_payload_is_short_read() {
    let dir = tempfile::tempdir().unwrap();
    let mut bytes = raw_wav(8000, &[7; 64]);
    bytes.truncate(bytes.len() - 10);
    let path = dir.path().join("cut.wav");
    write_raw(&path, &bytes);

    assert!(matches!(
        wav::load_wav(&path, HeaderPolicy::Permissive),
        Err(WavError::ShortRead)
    ));
}

#[test]
fn test_faction_variants_load_independently() {
    let dir = tempfile::tempdir().unwrap();
    let root = sound_root(&dir);
    write_tone(&root.join("alied").join("tank.wav"), 1, 16, 22050, 32);
    // Russian variant is present but unreadable
    write_raw(&root.join("russian").join("tank.wav"), b"RIFF");

    let engine = AudioEngine::new(
        RecordingDevice::new(),
        &catalog(&["tank"], &[], &[]),
        &settings(&dir, 4),
    )
    .unwrap();

    assert!(engine.cache().effect(Faction::Neutral, 0).is_none());
    let allied = engine.cache().effect(Faction::Allied, 0).unwrap();
    assert_eq!(allied.format, SampleFormat::Mono16);
    assert_eq!(allied.size, 64);
    assert!(engine.cache().effect(Faction::Soviet, 0).is_none());

    let report = engine.precache_report();
    assert_eq!(report.loaded, 1);
    assert_eq!(report.failed, 2);
}

#[test]
fn test_triggers_share_the_transient_ring() {
    let dir = tempfile::tempdir().unwrap();
    let root = sound_root(&dir);
    write_raw(&root.join("gun.wav"), &raw_wav(8000, &[1; 8]));
    write_raw(&root.join("boom.wav"), &raw_wav(8000, &[2; 8]));
    write_raw(&root.join("speech").join("unitredy.wav"), &raw_wav(11025, &[3; 8]));

    let engine = AudioEngine::new(
        RecordingDevice::new(),
        &catalog(&["gun", "boom"], &["unitredy"], &[]),
        &settings(&dir, 3),
    )
    .unwrap();
    let gun = engine.cache().effect(Faction::Neutral, 0).unwrap().handle;
    let boom = engine.cache().effect(Faction::Neutral, 1).unwrap().handle;
    let speech = engine.cache().speech(0).unwrap().handle;

    let mut audio = GameAudio::new(engine);
    audio.engine_mut().unwrap().device_mut().clear_calls();

    let here = Coordinate(0x0040_0040);
    audio.on_sound_effect(Some(0), 2, here, Some(Faction::Soviet)).unwrap();
    audio.on_speech(0, None).unwrap();
    // Two transient voices: the third trigger evicts the first
    audio.on_sound_effect(Some(1), 0, here, None).unwrap();

    let calls = audio.engine().unwrap().device().calls().to_vec();
    assert_eq!(
        calls,
        vec![
            DeviceCall::Bind(VoiceHandle(0), gun),
            DeviceCall::Play(VoiceHandle(0)),
            DeviceCall::Bind(VoiceHandle(1), speech),
            DeviceCall::Play(VoiceHandle(1)),
            DeviceCall::Bind(VoiceHandle(0), boom),
            DeviceCall::Play(VoiceHandle(0)),
        ]
    );
}

#[test]
fn test_music_replacement_is_a_hard_cut() {
    let dir = tempfile::tempdir().unwrap();
    let root = sound_root(&dir);
    write_tone(&root.join("music").join("bigf226m.wav"), 2, 16, 22050, 64);
    write_tone(&root.join("music").join("crus226m.wav"), 2, 16, 22050, 64);

    let engine = AudioEngine::new(
        RecordingDevice::new(),
        &catalog(&[], &[], &["bigf226m", "crus226m"]),
        &settings(&dir, 4),
    )
    .unwrap();
    let first = engine.cache().music(0).unwrap().handle;
    let second = engine.cache().music(1).unwrap().handle;
    let music = VoiceHandle(3);

    let mut audio = GameAudio::new(engine);
    audio.play_music(0).unwrap();
    audio.engine_mut().unwrap().device_mut().clear_calls();

    audio.play_music(1).unwrap();
    assert_eq!(audio.current_music(), Some(1));
    audio.play_music(1).unwrap();
    audio.play_music(0).unwrap();
    assert_eq!(audio.current_music(), Some(0));

    let expected: Vec<DeviceCall> = [second, second, first]
        .into_iter()
        .flat_map(|buffer: BufferHandle| {
            [
                DeviceCall::Stop(music),
                DeviceCall::Bind(music, buffer),
                DeviceCall::SetLooping(music, true),
                DeviceCall::Play(music),
            ]
        })
        .collect();
    assert_eq!(audio.engine().unwrap().device().calls(), expected.as_slice());
}

#[test]
fn test_missing_track_leaves_music_untouched() {
    let dir = tempfile::tempdir().unwrap();
    write_tone(&sound_root(&dir).join("music").join("map1.wav"), 1, 8, 8000, 16);

    let engine = AudioEngine::new(
        RecordingDevice::new(),
        &catalog(&[], &[], &["map1", "gone"]),
        &settings(&dir, 4),
    )
    .unwrap();
    let mut audio = GameAudio::new(engine);

    audio.play_music(0).unwrap();
    audio.engine_mut().unwrap().device_mut().clear_calls();

    assert!(matches!(
        audio.play_music(1),
        Err(AudioError::NotCached { id: 1, .. })
    ));
    assert_eq!(audio.current_music(), Some(0));
    assert!(audio.engine().unwrap().device().calls().is_empty());
}

#[test]
fn test_strict_headers_from_config() {
    let dir = tempfile::tempdir().unwrap();
    let mut bytes = raw_wav(8000, &[1, 2, 3, 4]);
    bytes[8..12].copy_from_slice(b"WAVX");
    write_raw(&sound_root(&dir).join("odd.wav"), &bytes);

    let mut config = AudioConfig {
        sound_dir: sound_root(&dir),
        catalog: catalog(&["odd"], &[], &[]),
        ..AudioConfig::default()
    };

    let permissive =
        AudioEngine::new(RecordingDevice::new(), &config.catalog, &config.engine_settings()).unwrap();
    assert!(permissive.cache().effect(Faction::Neutral, 0).is_some());

    config.strict_headers = true;
    let strict =
        AudioEngine::new(RecordingDevice::new(), &config.catalog, &config.engine_settings()).unwrap();
    assert!(strict.cache().effect(Faction::Neutral, 0).is_none());
}

#[test]
fn test_upload_failures_leave_slots_empty() {
    let dir = tempfile::tempdir().unwrap();
    write_raw(&sound_root(&dir).join("bleep.wav"), &raw_wav(8000, &[1, 2, 3, 4]));

    let engine = AudioEngine::new(
        RecordingDevice::new().fail_buffers(),
        &catalog(&["bleep"], &[], &[]),
        &settings(&dir, 4),
    )
    .unwrap();

    // Neutral file decoded but failed to upload, so both variants were tried
    assert_eq!(engine.precache_report().failed, 3);
    assert_eq!(engine.cache().cached_count(), 0);
}
