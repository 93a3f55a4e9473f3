//! Frame driver
//!
//! Turns wall-clock frames into fixed simulation steps, then fans the step
//! results out to audio, HUD and renderer.

use crate::audio::{AudioCue, SoundEffect};
use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SIM_DT};
use crate::frontend::{Hud, Renderer, Snapshot};
use crate::platform::{Clock, InputSource};
use crate::settings::Settings;
use crate::sim::{GameEvent, GameState, TickInput, tick};

/// What one call to [`Game::frame`] did
#[derive(Debug, Clone, Default)]
pub struct FrameReport {
    pub substeps: u32,
    pub events: Vec<GameEvent>,
}

/// Game instance holding simulation state and its collaborators
pub struct Game<C, I, R, H, A> {
    pub state: GameState,
    pub settings: Settings,
    pub clock: C,
    pub input: I,
    pub renderer: R,
    pub hud: H,
    pub audio: A,
    accumulator: f32,
    last_frame_ms: Option<f64>,
    /// One-shot input (fire, look) not yet consumed by a step
    pending: TickInput,
}

impl<C, I, R, H, A> Game<C, I, R, H, A>
where
    C: Clock,
    I: InputSource,
    R: Renderer,
    H: Hud,
    A: AudioCue,
{
    pub fn new(
        mut state: GameState,
        settings: Settings,
        clock: C,
        input: I,
        renderer: R,
        hud: H,
        audio: A,
    ) -> Self {
        state.set_particle_budget(settings.max_particles());
        Self {
            state,
            settings,
            clock,
            input,
            renderer,
            hud,
            audio,
            accumulator: 0.0,
            last_frame_ms: None,
            pending: TickInput::default(),
        }
    }

    /// Run one display frame: poll input, run simulation steps, notify collaborators
    pub fn frame(&mut self) -> FrameReport {
        let now = self.clock.now_ms();
        let dt = match self.last_frame_ms {
            Some(last) => (((now - last) / 1000.0) as f32).clamp(0.0, MAX_FRAME_DT),
            None => SIM_DT,
        };
        self.last_frame_ms = Some(now);
        self.accumulator += dt;

        let sample = self.input.sample();
        let mut input = sample.to_tick_input(&self.settings);
        input.fire |= self.pending.fire;
        input.look_yaw += self.pending.look_yaw;
        input.look_pitch += self.pending.look_pitch;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            let step_input = if substeps == 0 {
                input.clone()
            } else {
                input.held_only()
            };
            tick(&mut self.state, &step_input, now, SIM_DT);
            self.accumulator -= SIM_DT;
            substeps += 1;
        }

        // Carry one-shots to the next frame if no step consumed them
        self.pending = if substeps == 0 {
            input
        } else {
            TickInput::default()
        };

        let events = self.state.drain_events();
        self.dispatch(&events);
        self.report(now);

        FrameReport { substeps, events }
    }

    fn dispatch(&mut self, events: &[GameEvent]) {
        for event in events {
            match *event {
                GameEvent::Shot { .. } => self.audio.play(SoundEffect::Shoot),
                GameEvent::TargetDestroyed { id, .. } => {
                    self.audio.play(SoundEffect::Explosion);
                    self.hud.forget_target(id);
                }
                GameEvent::PowerUpCollected { .. } => self.audio.play(SoundEffect::PowerUp),
                GameEvent::LevelComplete { level } => self.renderer.on_level_transition_start(level),
                GameEvent::LevelStarted { level, .. } if level > 1 => {
                    self.renderer.on_level_transition_end(level);
                }
                _ => {}
            }
        }
    }

    fn report(&mut self, now: f64) {
        let progression = &self.state.progression;
        self.hud.report_progress(
            progression.level,
            progression.targets_destroyed,
            progression.total_targets,
        );
        for row in self
            .state
            .targets
            .visibility(self.state.player.position, now, &self.state.tuning)
        {
            self.hud.report_target_visibility(&row);
        }
        self.renderer.sync_entities(&Snapshot::from_state(&self.state));
    }
}
