//! Retro Arena headless runner
//!
//! Plays a scripted session against the simulation and prints a JSON summary.
//!
//! Usage: `retro-arena [tuning.json] [seed] [low|medium|high]`

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    native::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Browser builds drive `Game` from their own frame callback
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use anyhow::Context;
    use serde::Serialize;

    use retro_arena::audio::{AudioManager, LogBackend, SoundEffect};
    use retro_arena::frontend::{EntityCounts, HeadlessHud, HeadlessRenderer};
    use retro_arena::platform::{InputSample, ManualClock, ScriptedInput};
    use retro_arena::sim::{GameEvent, GameState};
    use retro_arena::{Game, QualityPreset, Settings, Tuning};

    const FRAME_MS: f64 = 1000.0 / 60.0;
    const SESSION_FRAMES: usize = 60 * 30;

    #[derive(Debug, Serialize)]
    struct Summary {
        seed: u64,
        quality: &'static str,
        frames: usize,
        steps: u64,
        level: u32,
        targets_destroyed: u32,
        total_targets: u32,
        bullet_damage: u32,
        shots: usize,
        hits: usize,
        sounds: Vec<&'static str>,
        last_counts: EntityCounts,
    }

    pub fn run() -> anyhow::Result<()> {
        env_logger::init();
        log::info!("Retro Arena (headless) starting...");

        let mut args = std::env::args().skip(1);
        let tuning = match args.next() {
            Some(path) => {
                let json = std::fs::read_to_string(&path)
                    .with_context(|| format!("reading tuning file {path}"))?;
                Tuning::from_json(&json).with_context(|| format!("loading tuning from {path}"))?
            }
            None => Tuning::default(),
        };
        let seed = match args.next() {
            Some(s) => s.parse::<u64>().with_context(|| format!("invalid seed '{s}'"))?,
            None => 12345,
        };
        let quality = match args.next() {
            Some(name) => QualityPreset::parse(&name)
                .with_context(|| format!("unknown quality preset '{name}' (expected low, medium or high)"))?,
            None => QualityPreset::default(),
        };

        let settings = Settings::from_preset(quality);
        let mut audio = AudioManager::new(LogBackend::default());
        audio.apply_settings(&settings);
        for effect in [SoundEffect::Shoot, SoundEffect::Explosion, SoundEffect::PowerUp] {
            audio.mark_loaded(effect);
        }

        let mut game = Game::new(
            GameState::new(seed, tuning),
            settings,
            ManualClock::new(0.0),
            session_script(),
            HeadlessRenderer::default(),
            HeadlessHud::default(),
            audio,
        );

        let mut shots = 0;
        let mut hits = 0;
        for _ in 0..SESSION_FRAMES {
            let report = game.frame();
            for event in &report.events {
                match event {
                    GameEvent::Shot { .. } => shots += 1,
                    GameEvent::TargetHit { .. } => hits += 1,
                    _ => {}
                }
            }
            game.clock.advance(FRAME_MS);
        }

        let progression = &game.state.progression;
        let summary = Summary {
            seed,
            quality: quality.as_str(),
            frames: SESSION_FRAMES,
            steps: game.state.time_ticks,
            level: progression.level,
            targets_destroyed: progression.targets_destroyed,
            total_targets: progression.total_targets,
            bullet_damage: progression.bullet_damage,
            shots,
            hits,
            sounds: game.audio.backend().played.iter().map(|s| s.as_str()).collect(),
            last_counts: game.renderer.last_counts,
        };
        println!("{}", serde_json::to_string_pretty(&summary)?);
        Ok(())
    }

    /// Sweep the view around the arena, firing every few frames and strafing
    fn session_script() -> ScriptedInput {
        let mut script = ScriptedInput::default();
        for lap in 0..SESSION_FRAMES / 40 {
            let strafe_right = lap % 2 == 0;
            for frame in 0..40 {
                script.hold(
                    InputSample {
                        move_forward: lap % 3 == 0,
                        strafe_left: !strafe_right,
                        strafe_right,
                        sprint: lap % 5 == 0,
                        jump: frame == 0 && lap % 4 == 0,
                        dash: frame == 20,
                        fire: frame % 4 == 0,
                        pointer_dx: 12.0,
                        pointer_dy: 0.0,
                        ..Default::default()
                    },
                    1,
                );
            }
        }
        script
    }
}
