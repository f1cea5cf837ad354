//! Headless device
//!
//! Keeps buffer metadata in memory and records every voice command in order.
//! Used for tests and for running the engine without a sound card.

use std::collections::HashMap;

use super::{AudioDevice, BufferHandle, VoiceHandle};
use crate::error::AudioError;
use crate::wav::{DecodedAudio, SampleFormat};

/// A single command issued to the device
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceCall {
    CreateBuffer(BufferHandle),
    Bind(VoiceHandle, BufferHandle),
    SetLooping(VoiceHandle, bool),
    Play(VoiceHandle),
    Stop(VoiceHandle),
}

/// Metadata of an uploaded buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BufferInfo {
    pub format: SampleFormat,
    pub sample_rate: u32,
    pub size: usize,
}

#[derive(Debug, Default)]
pub struct RecordingDevice {
    buffers: HashMap<BufferHandle, BufferInfo>,
    bound: HashMap<VoiceHandle, BufferHandle>,
    voice_count: usize,
    calls: Vec<DeviceCall>,
    fail_buffers: bool,
}

impl RecordingDevice {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every buffer upload fail.
    pub fn fail_buffers(mut self) -> Self {
        self.fail_buffers = true;
        self
    }

    /// Commands issued so far, oldest first
    pub fn calls(&self) -> &[DeviceCall] {
        &self.calls
    }

    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }

    pub fn buffer_info(&self, buffer: BufferHandle) -> Option<BufferInfo> {
        self.buffers.get(&buffer).copied()
    }

    pub fn buffer_count(&self) -> usize {
        self.buffers.len()
    }

    /// Buffer currently attached to a voice
    pub fn bound_buffer(&self, voice: VoiceHandle) -> Option<BufferHandle> {
        self.bound.get(&voice).copied()
    }

    pub fn voice_count(&self) -> usize {
        self.voice_count
    }
}

impl AudioDevice for RecordingDevice {
    fn create_buffer(&mut self, audio: DecodedAudio) -> Result<BufferHandle, AudioError> {
        if self.fail_buffers {
            return Err(AudioError::BufferUpload("uploads disabled".to_string()));
        }

        let handle = BufferHandle(self.buffers.len() as u32 + 1);
        self.buffers.insert(
            handle,
            BufferInfo {
                format: audio.format,
                sample_rate: audio.sample_rate,
                size: audio.len(),
            },
        );
        self.calls.push(DeviceCall::CreateBuffer(handle));
        Ok(handle)
    }

    fn create_voices(&mut self, count: usize) -> Result<Vec<VoiceHandle>, AudioError> {
        let first = self.voice_count as u32;
        self.voice_count += count;
        Ok((first..first + count as u32).map(VoiceHandle).collect())
    }

    fn bind(&mut self, voice: VoiceHandle, buffer: BufferHandle) {
        self.bound.insert(voice, buffer);
        self.calls.push(DeviceCall::Bind(voice, buffer));
    }

    fn set_looping(&mut self, voice: VoiceHandle, looping: bool) {
        self.calls.push(DeviceCall::SetLooping(voice, looping));
    }

    fn play(&mut self, voice: VoiceHandle) {
        self.calls.push(DeviceCall::Play(voice));
    }

    fn stop(&mut self, voice: VoiceHandle) {
        self.calls.push(DeviceCall::Stop(voice));
    }
}
