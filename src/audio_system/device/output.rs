//! rodio-backed output device
//!
//! Each voice is a rodio `Sink` on the default output stream. Buffers are
//! converted to signed 16-bit PCM once at upload time.

use std::sync::Arc;

use rodio::buffer::SamplesBuffer;
use rodio::{OutputStream, OutputStreamHandle, Sink, Source};

use super::{AudioDevice, BufferHandle, VoiceHandle};
use crate::error::AudioError;
use crate::wav::DecodedAudio;

struct PcmBuffer {
    channels: u16,
    sample_rate: u32,
    samples: Arc<Vec<i16>>,
}

struct Voice {
    sink: Sink,
    buffer: Option<BufferHandle>,
    looping: bool,
}

/// Audio device playing through the system's default output
pub struct RodioDevice {
    _stream: OutputStream,
    stream_handle: OutputStreamHandle,
    buffers: Vec<PcmBuffer>,
    voices: Vec<Voice>,
}

impl RodioDevice {
    /// Open the default output stream.
    pub fn open() -> Result<Self, AudioError> {
        let (stream, stream_handle) = OutputStream::try_default()
            .map_err(|e| AudioError::DeviceInit(e.to_string().into()))?;
        tracing::info!("✓ Audio output stream opened");

        Ok(Self {
            _stream: stream,
            stream_handle,
            buffers: Vec::new(),
            voices: Vec::new(),
        })
    }

    fn voice_mut(&mut self, voice: VoiceHandle) -> Option<&mut Voice> {
        let voice_mut = self.voices.get_mut(voice.0 as usize);
        if voice_mut.is_none() {
            tracing::warn!("Unknown voice {:?}", voice);
        }
        voice_mut
    }
}

/// Stop a sink and swap in a fresh one so nothing queued survives.
fn reset_sink(stream_handle: &OutputStreamHandle, voice: &mut Voice) {
    voice.sink.stop();
    match Sink::try_new(stream_handle) {
        Ok(new_sink) => voice.sink = new_sink,
        Err(e) => tracing::warn!("Failed to recreate audio sink: {}", e),
    }
}

impl AudioDevice for RodioDevice {
    fn create_buffer(&mut self, audio: DecodedAudio) -> Result<BufferHandle, AudioError> {
        let handle = BufferHandle(self.buffers.len() as u32);
        self.buffers.push(PcmBuffer {
            channels: audio.format.channels(),
            sample_rate: audio.sample_rate,
            samples: Arc::new(audio.to_i16_samples()),
        });
        Ok(handle)
    }

    fn create_voices(&mut self, count: usize) -> Result<Vec<VoiceHandle>, AudioError> {
        let mut handles = Vec::with_capacity(count);
        for _ in 0..count {
            let sink = Sink::try_new(&self.stream_handle)
                .map_err(|e| AudioError::DeviceInit(e.to_string().into()))?;
            handles.push(VoiceHandle(self.voices.len() as u32));
            self.voices.push(Voice {
                sink,
                buffer: None,
                looping: false,
            });
        }
        tracing::debug!("Allocated {} voices", count);
        Ok(handles)
    }

    fn bind(&mut self, voice: VoiceHandle, buffer: BufferHandle) {
        if let Some(voice) = self.voice_mut(voice) {
            voice.buffer = Some(buffer);
        }
    }

    fn set_looping(&mut self, voice: VoiceHandle, looping: bool) {
        if let Some(voice) = self.voice_mut(voice) {
            voice.looping = looping;
        }
    }

    fn play(&mut self, voice: VoiceHandle) {
        let Some(state) = self.voices.get_mut(voice.0 as usize) else {
            tracing::warn!("Unknown voice {:?}", voice);
            return;
        };
        let Some(pcm) = state.buffer.and_then(|b| self.buffers.get(b.0 as usize)) else {
            tracing::debug!("Voice {:?} has no buffer bound", voice);
            return;
        };

        // Sources own their samples, so each start takes a copy.
        let source = SamplesBuffer::new(pcm.channels, pcm.sample_rate, (*pcm.samples).clone());
        let source: Box<dyn Source<Item = i16> + Send> = if state.looping {
            Box::new(source.repeat_infinite())
        } else {
            Box::new(source)
        };

        reset_sink(&self.stream_handle, state);
        state.sink.append(source);
        state.sink.play();
    }

    fn stop(&mut self, voice: VoiceHandle) {
        let stream_handle = &self.stream_handle;
        if let Some(state) = self.voices.get_mut(voice.0 as usize) {
            reset_sink(stream_handle, state);
        }
    }
}
