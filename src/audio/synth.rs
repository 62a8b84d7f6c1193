use std::f32::consts::TAU;

/// Gain an envelope decays to by the end of its tone
pub const END_GAIN: f32 = 0.01;
/// Oldest voices are dropped beyond this many
pub const MAX_VOICES: usize = 32;

/// A sine tone with an exponential decay envelope.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    pub frequency: f32,
    /// Seconds between scheduling and onset
    pub delay: f32,
    /// Seconds from onset to silence
    pub duration: f32,
    /// Starting amplitude
    pub gain: f32,
}

#[derive(Debug, Clone)]
struct Voice {
    tone: Tone,
    /// Seconds since the voice was scheduled
    elapsed: f32,
}

impl Voice {
    fn sample(&self) -> f32 {
        let t = self.elapsed - self.tone.delay;
        if t < 0.0 || t >= self.tone.duration {
            return 0.0;
        }
        let envelope = self.tone.gain * (END_GAIN / self.tone.gain).powf(t / self.tone.duration);
        envelope * (TAU * self.tone.frequency * t).sin()
    }

    fn is_finished(&self) -> bool {
        self.elapsed >= self.tone.delay + self.tone.duration
    }
}

/// Mixes scheduled tones into mono samples. Runs inside the audio callback.
#[derive(Debug, Clone)]
pub struct Synth {
    sample_rate: f32,
    voices: Vec<Voice>,
}

impl Synth {
    pub fn new(sample_rate: u32) -> Self {
        Self {
            sample_rate: sample_rate.max(1) as f32,
            voices: Vec::with_capacity(MAX_VOICES),
        }
    }

    pub fn play(&mut self, tones: &[Tone]) {
        for tone in tones {
            if tone.duration <= 0.0 || tone.gain <= 0.0 {
                continue;
            }
            if self.voices.len() >= MAX_VOICES {
                self.voices.remove(0);
            }
            self.voices.push(Voice {
                tone: *tone,
                elapsed: 0.0,
            });
        }
    }

    pub fn active_voices(&self) -> usize {
        self.voices.len()
    }

    pub fn is_silent(&self) -> bool {
        self.voices.is_empty()
    }

    pub fn next_sample(&mut self) -> f32 {
        let dt = 1.0 / self.sample_rate;
        let mut mix = 0.0;
        for voice in &mut self.voices {
            mix += voice.sample();
            voice.elapsed += dt;
        }
        self.voices.retain(|voice| !voice.is_finished());
        mix.clamp(-1.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::{TICK_TONE, WIN_CHIME};

    const RATE: u32 = 48_000;

    fn render(synth: &mut Synth, seconds: f32) -> Vec<f32> {
        (0..(seconds * RATE as f32) as usize)
            .map(|_| synth.next_sample())
            .collect()
    }

    fn peak(samples: &[f32]) -> f32 {
        samples.iter().fold(0.0, |max, s| max.max(s.abs()))
    }

    #[test]
    fn test_idle_synth_is_silent() {
        let mut synth = Synth::new(RATE);
        assert!(render(&mut synth, 0.01).iter().all(|s| *s == 0.0));
    }

    #[test]
    fn test_tick_decays_and_finishes() {
        let mut synth = Synth::new(RATE);
        synth.play(&[TICK_TONE]);
        let samples = render(&mut synth, TICK_TONE.duration + 0.01);

        assert!(peak(&samples) > 0.05);
        assert!(peak(&samples) <= TICK_TONE.gain);
        let tail = (TICK_TONE.duration * RATE as f32) as usize - 240;
        assert!(peak(&samples[tail..]) < TICK_TONE.gain / 2.0);
        assert!(synth.is_silent());
    }

    #[test]
    fn test_chime_notes_are_staggered() {
        let mut synth = Synth::new(RATE);
        synth.play(&WIN_CHIME);
        assert_eq!(synth.active_voices(), 3);

        // Only the first note sounds before the second one's delay
        let head = render(&mut synth, WIN_CHIME[1].delay - 0.01);
        assert!(peak(&head) <= WIN_CHIME[0].gain);
        assert_eq!(synth.active_voices(), 3);

        let last = WIN_CHIME[2];
        render(&mut synth, last.delay + last.duration);
        assert!(synth.is_silent());
    }

    #[test]
    fn test_voice_limit_drops_oldest() {
        let mut synth = Synth::new(RATE);
        for _ in 0..MAX_VOICES + 5 {
            synth.play(&[TICK_TONE]);
        }
        assert_eq!(synth.active_voices(), MAX_VOICES);
    }
}
