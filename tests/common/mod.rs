// Shared fixtures for the integration tests

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use audmix::NameCatalog;

/// Write a PCM WAV file with hound. `frames` is the number of sample frames.
pub fn write_tone(path: &Path, channels: u16, bits: u16, sample_rate: u32, frames: usize) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }

    let spec = hound::WavSpec {
        channels,
        sample_rate,
        bits_per_sample: bits,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::create(path, spec).unwrap();
    for i in 0..frames * channels as usize {
        match bits {
            8 => writer.write_sample((i % 64) as i8).unwrap(),
            _ => writer.write_sample((i as i16).wrapping_mul(97)).unwrap(),
        }
    }
    writer.finalize().unwrap();
}

/// Hand-built mono 8-bit container, for byte-exact fixtures.
pub fn raw_wav(sample_rate: u32, payload: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    out.extend_from_slice(b"RIFF");
    out.extend_from_slice(&(36 + payload.len() as u32).to_le_bytes());
    out.extend_from_slice(b"WAVE");
    out.extend_from_slice(b"fmt ");
    out.extend_from_slice(&16u32.to_le_bytes());
    out.extend_from_slice(&1u16.to_le_bytes());
    out.extend_from_slice(&1u16.to_le_bytes());
    out.extend_from_slice(&sample_rate.to_le_bytes());
    out.extend_from_slice(&sample_rate.to_le_bytes());
    out.extend_from_slice(&1u16.to_le_bytes());
    out.extend_from_slice(&8u16.to_le_bytes());
    out.extend_from_slice(b"data");
    out.extend_from_slice(&(payload.len() as u32).to_le_bytes());
    out.extend_from_slice(payload);
    out
}

pub fn write_raw(path: &Path, bytes: &[u8]) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, bytes).unwrap();
}

/// Sound tree root inside a temporary directory
pub fn sound_root(dir: &tempfile::TempDir) -> PathBuf {
    dir.path().join("sound")
}

fn owned(names: &[&str]) -> Vec<String> {
    names.iter().map(|n| n.to_string()).collect()
}

pub fn catalog(effects: &[&str], speech: &[&str], themes: &[&str]) -> NameCatalog {
    NameCatalog {
        effects: owned(effects),
        speech: owned(speech),
        themes: owned(themes),
    }
}
