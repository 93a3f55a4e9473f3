//! Input sampling
//!
//! The platform collects key state and pointer motion between frames; the
//! driver polls one `InputSample` per frame and turns it into `TickInput`.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::settings::Settings;
use crate::sim::TickInput;

/// Everything the player did since the last poll
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InputSample {
    pub move_forward: bool,
    pub move_back: bool,
    pub strafe_left: bool,
    pub strafe_right: bool,
    pub sprint: bool,
    pub jump: bool,
    pub dash: bool,
    pub fire: bool,
    /// Accumulated pointer motion, in pointer units
    pub pointer_dx: f32,
    pub pointer_dy: f32,
}

impl InputSample {
    /// Map to a simulation step input, converting pointer motion to look deltas
    pub fn to_tick_input(&self, settings: &Settings) -> TickInput {
        let (look_yaw, look_pitch) = settings.look_delta(self.pointer_dx, self.pointer_dy);
        TickInput {
            forward: self.move_forward,
            back: self.move_back,
            left: self.strafe_left,
            right: self.strafe_right,
            sprint: self.sprint,
            jump: self.jump,
            dash: self.dash,
            fire: self.fire,
            look_yaw,
            look_pitch,
        }
    }
}

/// Polled once per frame
pub trait InputSource {
    fn sample(&mut self) -> InputSample;
}

/// Replays a fixed list of samples, then reports no input
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    frames: VecDeque<InputSample>,
}

impl ScriptedInput {
    pub fn new(frames: impl IntoIterator<Item = InputSample>) -> Self {
        Self {
            frames: frames.into_iter().collect(),
        }
    }

    /// Queue `sample` for the next `count` frames
    pub fn hold(&mut self, sample: InputSample, count: usize) {
        self.frames
            .extend(std::iter::repeat_n(sample, count));
    }

    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

impl InputSource for ScriptedInput {
    fn sample(&mut self) -> InputSample {
        self.frames.pop_front().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_maps_to_tick_input() {
        let sample = InputSample {
            move_forward: true,
            strafe_left: true,
            fire: true,
            pointer_dx: 50.0,
            ..Default::default()
        };
        let input = sample.to_tick_input(&Settings::default());
        assert!(input.forward && input.left && input.fire);
        assert!(!input.back && !input.right);
        assert!((input.look_yaw + 0.1).abs() < 1e-6);
        assert_eq!(input.look_pitch, 0.0);
    }

    #[test]
    fn test_scripted_input_runs_dry() {
        let mut script = ScriptedInput::default();
        let fire = InputSample {
            fire: true,
            ..Default::default()
        };
        script.hold(fire.clone(), 2);
        assert_eq!(script.remaining(), 2);
        assert_eq!(script.sample(), fire);
        assert_eq!(script.sample(), fire);
        assert_eq!(script.sample(), InputSample::default());
    }
}
