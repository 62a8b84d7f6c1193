//! Tick and win sounds.
//!
//! Events pick a [`Cue`], the cue's tones are scheduled on a [`Synth`] and
//! the synth is mixed into the default output device by [`ToneOutput`].

mod output;
mod synth;

pub use output::ToneOutput;
pub use synth::{Synth, Tone};

use crate::event::{EventHandler, WheelEvent};

/// Short blip on every segment boundary
pub const TICK_TONE: Tone = Tone {
    frequency: 600.0,
    delay: 0.0,
    duration: 0.05,
    gain: 0.15,
};

/// Rising C major arpeggio for the winner
pub const WIN_CHIME: [Tone; 3] = [
    Tone {
        frequency: 523.25,
        delay: 0.0,
        duration: 0.3,
        gain: 0.2,
    },
    Tone {
        frequency: 659.25,
        delay: 0.15,
        duration: 0.3,
        gain: 0.2,
    },
    Tone {
        frequency: 783.99,
        delay: 0.3,
        duration: 0.3,
        gain: 0.2,
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    Tick,
    Win,
}

impl Cue {
    pub fn tones(self) -> &'static [Tone] {
        match self {
            Cue::Tick => std::slice::from_ref(&TICK_TONE),
            Cue::Win => &WIN_CHIME,
        }
    }
}

/// Plays a cue for each tick and winner while sound is enabled.
#[derive(Debug)]
pub struct SoundFeedback {
    enabled: bool,
    output: Option<ToneOutput>,
    cues_played: u64,
    last_cue: Option<Cue>,
}

impl Default for SoundFeedback {
    fn default() -> Self {
        Self::new(true)
    }
}

impl SoundFeedback {
    /// Feedback without an output device; cues are counted but not heard
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            output: None,
            cues_played: 0,
            last_cue: None,
        }
    }

    /// Feedback on the default output device, silent if none can be opened
    pub fn with_output(enabled: bool) -> Self {
        let output = match ToneOutput::open() {
            Ok(output) => Some(output),
            Err(err) => {
                log::warn!("Sound unavailable: {}", err);
                None
            }
        };
        Self {
            output,
            ..Self::new(enabled)
        }
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn has_output(&self) -> bool {
        self.output.is_some()
    }

    pub fn cues_played(&self) -> u64 {
        self.cues_played
    }

    pub fn last_cue(&self) -> Option<Cue> {
        self.last_cue
    }

    pub fn play(&mut self, cue: Cue) {
        if !self.enabled {
            return;
        }
        self.cues_played += 1;
        self.last_cue = Some(cue);
        if let Some(output) = &self.output {
            output.play(cue.tones());
        }
    }
}

impl EventHandler for SoundFeedback {
    fn handle_event(&mut self, event: &WheelEvent) {
        match event {
            WheelEvent::SegmentTick { .. } => self.play(Cue::Tick),
            WheelEvent::Winner { .. } => self.play(Cue::Win),
            WheelEvent::SpinStarted { .. } => {}
        }
    }
}
