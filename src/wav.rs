//! RIFF/WAVE container parser
//!
//! Reads the fixed-position PCM layout used by the game's sound assets:
//!
//! ```text
//! "RIFF" <u32 size> "WAVE"
//! "fmt " <u32 size> <u16 format> <u16 channels> <u32 rate> <u32 byte rate>
//!        <u16 block align> <u16 bits> [<u16 extension> when size > 16]
//! "data" <u32 size N> <N bytes of PCM>
//! ```
//!
//! The whole payload is read into memory; there is no chunk scanning.

use std::fs::File;
use std::io::{BufReader, Read, Seek, SeekFrom};
use std::path::Path;

use crate::error::{Chunk, WavError};

const RIFF_TAG: &[u8; 4] = b"RIFF";
const WAVE_TAG: &[u8; 4] = b"WAVE";
const FMT_TAG: &[u8; 4] = b"fmt ";
const DATA_TAG: &[u8; 4] = b"data";

/// Size of the `fmt ` body without extension.
const FMT_BODY_LEN: u32 = 16;

/// How strictly the outer `RIFF`/`WAVE` tags are checked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HeaderPolicy {
    /// Reject only when both tags are wrong. Matches the shipped asset loader,
    /// which accepted files with a single bad outer tag.
    #[default]
    Permissive,
    /// Reject when either tag is wrong.
    Strict,
}

impl HeaderPolicy {
    fn accepts(self, group: &[u8; 4], subtype: &[u8; 4]) -> bool {
        let group_ok = group == RIFF_TAG;
        let subtype_ok = subtype == WAVE_TAG;
        match self {
            HeaderPolicy::Permissive => group_ok || subtype_ok,
            HeaderPolicy::Strict => group_ok && subtype_ok,
        }
    }
}

/// Device sample layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SampleFormat {
    Mono8,
    Mono16,
    Stereo8,
    Stereo16,
}

impl SampleFormat {
    /// Map a (channels, bits per sample) pair to a supported layout.
    pub fn from_layout(channels: u16, bits: u16) -> Result<Self, WavError> {
        match (channels, bits) {
            (1, 8) => Ok(SampleFormat::Mono8),
            (1, 16) => Ok(SampleFormat::Mono16),
            (2, 8) => Ok(SampleFormat::Stereo8),
            (2, 16) => Ok(SampleFormat::Stereo16),
            _ => Err(WavError::UnsupportedFormat { channels, bits }),
        }
    }

    pub fn channels(&self) -> u16 {
        match self {
            SampleFormat::Mono8 | SampleFormat::Mono16 => 1,
            SampleFormat::Stereo8 | SampleFormat::Stereo16 => 2,
        }
    }

    pub fn bits_per_sample(&self) -> u16 {
        match self {
            SampleFormat::Mono8 | SampleFormat::Stereo8 => 8,
            SampleFormat::Mono16 | SampleFormat::Stereo16 => 16,
        }
    }
}

impl std::fmt::Display for SampleFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SampleFormat::Mono8 => write!(f, "mono 8-bit"),
            SampleFormat::Mono16 => write!(f, "mono 16-bit"),
            SampleFormat::Stereo8 => write!(f, "stereo 8-bit"),
            SampleFormat::Stereo16 => write!(f, "stereo 16-bit"),
        }
    }
}

/// PCM payload decoded from a container, still in host memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedAudio {
    pub data: Vec<u8>,
    pub sample_rate: u32,
    pub format: SampleFormat,
}

impl DecodedAudio {
    /// Payload length in bytes
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Interleaved signed 16-bit samples.
    ///
    /// 8-bit PCM is unsigned and centred on 128; 16-bit PCM is little endian.
    /// A trailing odd byte in 16-bit data is dropped.
    pub fn to_i16_samples(&self) -> Vec<i16> {
        match self.format.bits_per_sample() {
            8 => self
                .data
                .iter()
                .map(|&sample| (sample as i16 - 128) * 256)
                .collect(),
            _ => self
                .data
                .chunks_exact(2)
                .map(|pair| i16::from_le_bytes([pair[0], pair[1]]))
                .collect(),
        }
    }
}

fn read_tag<R: Read>(reader: &mut R) -> Result<[u8; 4], WavError> {
    let mut tag = [0u8; 4];
    reader.read_exact(&mut tag).map_err(WavError::from_read)?;
    Ok(tag)
}

fn read_u16<R: Read>(reader: &mut R) -> Result<u16, WavError> {
    let mut buf = [0u8; 2];
    reader.read_exact(&mut buf).map_err(WavError::from_read)?;
    Ok(u16::from_le_bytes(buf))
}

fn read_u32<R: Read>(reader: &mut R) -> Result<u32, WavError> {
    let mut buf = [0u8; 4];
    reader.read_exact(&mut buf).map_err(WavError::from_read)?;
    Ok(u32::from_le_bytes(buf))
}

/// Parsed `fmt ` sub-record
#[derive(Debug, Clone, Copy)]
struct FormatRecord {
    size: u32,
    channels: u16,
    sample_rate: u32,
    bits_per_sample: u16,
}

fn read_format<R: Read>(reader: &mut R) -> Result<FormatRecord, WavError> {
    if &read_tag(reader)? != FMT_TAG {
        return Err(WavError::MalformedHeader(Chunk::Format));
    }
    let size = read_u32(reader)?;
    let _format_code = read_u16(reader)?;
    let channels = read_u16(reader)?;
    let sample_rate = read_u32(reader)?;
    let _byte_rate = read_u32(reader)?;
    let _block_align = read_u16(reader)?;
    let bits_per_sample = read_u16(reader)?;

    Ok(FormatRecord {
        size,
        channels,
        sample_rate,
        bits_per_sample,
    })
}

/// Decode a WAV container from any seekable reader.
pub fn read_wav<R: Read + Seek>(
    mut reader: R,
    policy: HeaderPolicy,
) -> Result<DecodedAudio, WavError> {
    let group = read_tag(&mut reader)?;
    let _riff_size = read_u32(&mut reader)?;
    let subtype = read_tag(&mut reader)?;
    if !policy.accepts(&group, &subtype) {
        return Err(WavError::MalformedHeader(Chunk::Riff));
    }

    let format = read_format(&mut reader)?;

    // Only a single 16-bit extension word is skipped.
    if format.size > FMT_BODY_LEN {
        reader
            .seek(SeekFrom::Current(2))
            .map_err(WavError::from_read)?;
    }

    if &read_tag(&mut reader)? != DATA_TAG {
        return Err(WavError::MalformedHeader(Chunk::Data));
    }
    let data_size = read_u32(&mut reader)?;
    if data_size == 0 {
        return Err(WavError::ShortRead);
    }

    let mut data = Vec::new();
    let read = (&mut reader)
        .take(u64::from(data_size))
        .read_to_end(&mut data)
        .map_err(WavError::Io)?;
    if read < data_size as usize {
        return Err(WavError::ShortRead);
    }

    let sample_format = SampleFormat::from_layout(format.channels, format.bits_per_sample)?;

    Ok(DecodedAudio {
        data,
        sample_rate: format.sample_rate,
        format: sample_format,
    })
}

/// Open and decode a WAV file.
pub fn load_wav(path: &Path, policy: HeaderPolicy) -> Result<DecodedAudio, WavError> {
    let file = File::open(path).map_err(|source| WavError::FileOpen {
        path: path.to_path_buf(),
        source,
    })?;
    read_wav(BufReader::new(file), policy)
}
