//! Headless fixed-step run

use super::load_config;
use crate::script::InputScript;
use anyhow::{ensure, Context, Result};
use ember_core::CommandRecorder;
use ember_runtime::{GameClock, InputState};
use ember_scene::{FrameStats, Scene, SceneConfig};
use std::path::Path;

/// Aggregate of every frame's [`FrameStats`]
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub frames: u64,
    pub particles_inserted: u64,
    pub particles_invalid: u64,
    /// Frames whose spawn burst was cut short by a full pool
    pub full_frames: u64,
    pub particles_reclaimed: u64,
    pub peak_particles: usize,
    pub backgrounds_reaped: u64,
    pub trails_appended: u64,
    pub trails_reaped: u64,
    pub enemies_reaped: u64,
    pub contacts: u64,
    /// Draw commands in the last rendered frame
    pub draw_commands: usize,
}

impl RunSummary {
    fn record(&mut self, stats: &FrameStats) {
        self.frames += 1;
        self.particles_inserted += u64::from(stats.spawn.inserted);
        self.particles_invalid += u64::from(stats.spawn.invalid);
        if stats.spawn.stopped_full {
            self.full_frames += 1;
        }
        self.particles_reclaimed += stats.particles_reclaimed as u64;
        self.peak_particles = self.peak_particles.max(stats.particles_alive);
        self.backgrounds_reaped += stats.backgrounds_reaped as u64;
        if stats.trail_appended {
            self.trails_appended += 1;
        }
        self.trails_reaped += stats.trails_reaped as u64;
        self.enemies_reaped += stats.enemies_reaped as u64;
        self.contacts += u64::from(stats.contacts);
    }
}

pub fn run(config: Option<&Path>, script: Option<&Path>, frames: u64, hz: f64) -> Result<()> {
    let config = load_config(config)?;
    let script = match script {
        Some(path) => InputScript::load(path)
            .with_context(|| format!("Failed to load input script {}", path.display()))?,
        None => InputScript::default(),
    };

    let summary = simulate(&config, script, frames, hz)?;

    println!("Frames:              {}", summary.frames);
    println!(
        "Particles:           {} inserted, {} invalid, {} reclaimed, peak {}",
        summary.particles_inserted,
        summary.particles_invalid,
        summary.particles_reclaimed,
        summary.peak_particles
    );
    println!("Bursts cut by full:  {}", summary.full_frames);
    println!(
        "Trails:              {} appended, {} reaped",
        summary.trails_appended, summary.trails_reaped
    );
    println!("Backgrounds reaped:  {}", summary.backgrounds_reaped);
    println!("Enemies reaped:      {}", summary.enemies_reaped);
    println!("Player contacts:     {}", summary.contacts);
    println!("Draw commands:       {}", summary.draw_commands);
    Ok(())
}

/// Step the scene `frames` times at `hz`, drawing once per outer frame
pub fn simulate(
    config: &SceneConfig,
    mut script: InputScript,
    frames: u64,
    hz: f64,
) -> Result<RunSummary> {
    ensure!(hz.is_finite() && hz > 0.0, "--hz must be positive, got {hz}");

    let mut scene = Scene::new(config).context("Failed to build scene")?;
    let mut clock = GameClock::with_fixed_timestep(hz);
    let mut input = InputState::new();
    let mut canvas = CommandRecorder::new();
    let mut summary = RunSummary::default();

    tracing::info!(frames, hz, events = script.len(), "headless run started");

    while clock.steps < frames {
        clock.advance(clock.fixed_timestep);
        while clock.should_fixed_update() && clock.steps < frames {
            script.apply(clock.steps, &mut input);
            let stats = scene.tick(&input, clock.fixed_dt());
            summary.record(&stats);
            input.end_frame();
            clock.consume_fixed_step();
        }

        canvas.clear();
        scene.draw(&mut canvas);
        summary.draw_commands = canvas.len();
    }

    tracing::info!(
        frames = summary.frames,
        particles = scene.particles().alive_count(),
        trails = scene.trails().len(),
        "headless run finished"
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn runs_requested_number_of_frames() {
        let summary =
            simulate(&SceneConfig::default(), InputScript::default(), 90, 60.0).unwrap();
        assert_eq!(summary.frames, 90);
        assert_eq!(summary.particles_inserted, 0);
        // 22 layer textures, border, 30 enemies, player, 22 grid lines
        assert!(summary.draw_commands >= 76);
    }

    #[test]
    fn scripted_spawning_fills_small_pool() {
        let mut config = SceneConfig::default();
        config.particles.capacity = 300;
        let script = InputScript::from_toml_str(
            "[[event]]\nfrom = 0\nto = 4\npointer = [350.0, 350.0]\nbuttons = [\"left\"]",
        )
        .unwrap();

        let summary = simulate(&config, script, 10, 60.0).unwrap();
        assert_eq!(summary.particles_inserted, 300);
        assert_eq!(summary.peak_particles, 300);
        assert_eq!(summary.full_frames, 2);
    }

    #[test]
    fn same_script_same_summary() {
        let text = "[[event]]\nfrom = 0\nto = 60\npointer = [100.0, 500.0]\nbuttons = [\"left\"]\nkeys = [\"KeyD\"]";
        let a = simulate(
            &SceneConfig::default(),
            InputScript::from_toml_str(text).unwrap(),
            120,
            60.0,
        )
        .unwrap();
        let b = simulate(
            &SceneConfig::default(),
            InputScript::from_toml_str(text).unwrap(),
            120,
            60.0,
        )
        .unwrap();
        assert_eq!(a, b);
        assert!(a.trails_appended > 0);
    }

    #[test]
    fn rejects_bad_rate() {
        assert!(simulate(&SceneConfig::default(), InputScript::default(), 10, 0.0).is_err());
    }
}
