use super::synth::{Synth, Tone};
use crate::error::AudioError;

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use super::{AudioError, Synth, Tone};
    use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
    use cpal::{FromSample, Sample, SampleFormat, SizedSample, Stream, StreamConfig};
    use std::sync::{Arc, Mutex};

    /// Default output device playing whatever the shared [`Synth`] mixes.
    ///
    /// Keeps the stream alive. Drop this to stop audio.
    pub struct ToneOutput {
        _stream: Stream,
        synth: Arc<Mutex<Synth>>,
        sample_rate: u32,
    }

    impl std::fmt::Debug for ToneOutput {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.debug_struct("ToneOutput")
                .field("sample_rate", &self.sample_rate)
                .finish_non_exhaustive()
        }
    }

    impl ToneOutput {
        pub fn open() -> Result<Self, AudioError> {
            let device = cpal::default_host()
                .default_output_device()
                .ok_or(AudioError::NoDevice)?;
            let device_name = device.name().unwrap_or_else(|_| "Unknown".to_string());

            let supported = device
                .default_output_config()
                .map_err(|e| AudioError::ConfigError(e.to_string()))?;
            let sample_rate = supported.sample_rate().0;
            let config: StreamConfig = supported.config();
            let synth = Arc::new(Mutex::new(Synth::new(sample_rate)));

            let stream = match supported.sample_format() {
                SampleFormat::F32 => build_stream::<f32>(&device, &config, synth.clone()),
                SampleFormat::I16 => build_stream::<i16>(&device, &config, synth.clone()),
                SampleFormat::U16 => build_stream::<u16>(&device, &config, synth.clone()),
                other => Err(AudioError::UnsupportedFormat(format!("{other:?}"))),
            }?;
            stream
                .play()
                .map_err(|e| AudioError::StreamPlayError(e.to_string()))?;

            log::info!(
                "Audio output on '{}': {} channels, {}Hz",
                device_name,
                config.channels,
                sample_rate
            );
            Ok(Self {
                _stream: stream,
                synth,
                sample_rate,
            })
        }

        pub fn play(&self, tones: &[Tone]) {
            match self.synth.lock() {
                Ok(mut synth) => synth.play(tones),
                Err(_) => log::warn!("Audio synth lock poisoned, dropping tone"),
            }
        }
    }

    fn build_stream<T>(
        device: &cpal::Device,
        config: &StreamConfig,
        synth: Arc<Mutex<Synth>>,
    ) -> Result<Stream, AudioError>
    where
        T: SizedSample + FromSample<f32>,
    {
        let channels = usize::from(config.channels).max(1);
        device
            .build_output_stream(
                config,
                move |data: &mut [T], _info: &cpal::OutputCallbackInfo| {
                    let Ok(mut synth) = synth.lock() else {
                        data.fill(T::EQUILIBRIUM);
                        return;
                    };
                    for frame in data.chunks_mut(channels) {
                        frame.fill(T::from_sample(synth.next_sample()));
                    }
                },
                move |err| {
                    log::error!("Audio stream error: {}", err);
                },
                None,
            )
            .map_err(|e| AudioError::StreamBuildError(e.to_string()))
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub use native::ToneOutput;

/// Stand-in for targets without an output device.
#[cfg(target_arch = "wasm32")]
#[derive(Debug)]
pub struct ToneOutput;

#[cfg(target_arch = "wasm32")]
impl ToneOutput {
    pub fn open() -> Result<Self, AudioError> {
        Err(AudioError::NoDevice)
    }

    pub fn play(&self, _tones: &[Tone]) {}
}
