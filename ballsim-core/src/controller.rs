//! Reversible time control
//!
//! The [`TimeController`] owns the [`World`] and its [`History`]. Every forward
//! step runs the force engine, the integrator and the collision engine in that
//! order and records the result. Backward steps restore recorded snapshots;
//! nothing is integrated in reverse.

use crate::ball::BallSpec;
use crate::collision::{resolve_collisions, CollisionReport};
use crate::config::{ScenarioConfig, SimConfig};
use crate::error::{ConfigurationError, HistoryUnderflow};
use crate::forces::compute_forces;
use crate::history::{History, Snapshot};
use crate::integrator::{integrate, IntegrationReport};
use crate::world::{Bounds, World};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Running,
    Paused,
}

/// Input from the driving layer
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Event {
    /// One rendered frame; advances only while running
    Tick,
    TogglePause,
    StepForward,
    StepBackward,
    SkipForwardSecond,
    SkipBackwardSecond,
    Resize(Bounds),
}

/// Diagnostics of a single forward step
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StepReport {
    pub frame: u64,
    pub integration: IntegrationReport,
    pub collisions: CollisionReport,
}

#[derive(Debug, Clone)]
pub struct TimeController {
    world: World,
    history: History,
    config: SimConfig,
    state: RunState,
}

impl TimeController {
    /// Validate the inputs and build a running controller at frame 0
    pub fn initialize(
        bounds: Bounds,
        specs: &[BallSpec],
        config: SimConfig,
    ) -> Result<Self, ConfigurationError> {
        config.validate()?;
        let world = World::new(bounds, specs)?;

        let mut history = History::new(config.effective_history_depth());
        history.record(Snapshot::capture(&world));

        log::debug!(
            "initialized {} balls, fps {}, end time {}, history depth {}",
            world.balls.len(),
            config.fps,
            config.end_time,
            history.capacity()
        );

        Ok(Self {
            world,
            history,
            config,
            state: RunState::Running,
        })
    }

    pub fn from_scenario(scenario: &ScenarioConfig) -> Result<Self, ConfigurationError> {
        Self::initialize(scenario.bounds, &scenario.balls, scenario.config.clone())
    }

    /// Apply one input event and return the world to draw
    pub fn on_event(&mut self, event: Event) -> &World {
        match event {
            Event::Tick => {
                if self.state == RunState::Running {
                    self.step_forward();
                }
            }
            Event::TogglePause => self.toggle_pause(),
            Event::StepForward => {
                self.step_forward();
            }
            Event::StepBackward => {
                if let Err(err) = self.step_backward() {
                    log::debug!("step backward ignored: {err}");
                }
            }
            Event::SkipForwardSecond => {
                self.skip_forward_second();
            }
            Event::SkipBackwardSecond => {
                self.skip_backward_second();
            }
            Event::Resize(bounds) => {
                if let Err(err) = self.resize(bounds) {
                    log::warn!("resize ignored: {err}");
                }
            }
        }
        &self.world
    }

    /// Advance the world by one time slice and record the result
    ///
    /// Any snapshots after the current frame belong to an abandoned timeline
    /// and are discarded first.
    pub fn step_forward(&mut self) -> StepReport {
        self.history.truncate_after(self.world.frame);

        let dt = self.config.dt();
        let forces = compute_forces(&self.world.balls, &self.config.coulomb);
        let integration = integrate(&mut self.world.balls, &forces, dt);
        let collisions = resolve_collisions(
            &mut self.world.balls,
            self.world.bounds,
            self.config.broadphase,
        );

        self.world.frame += 1;
        self.world.time = self.world.frame as f64 / self.config.fps as f64;
        self.history.record(Snapshot::capture(&self.world));

        log::trace!(
            "frame {}: {} wall hits, {} contacts, {} skipped",
            self.world.frame,
            collisions.wall_hits,
            collisions.contacts.len(),
            integration.skipped.len()
        );

        StepReport {
            frame: self.world.frame,
            integration,
            collisions,
        }
    }

    /// Restore the snapshot one frame back
    pub fn step_backward(&mut self) -> Result<(), HistoryUnderflow> {
        let frame = self.world.frame;
        let target = frame.checked_sub(1).ok_or(HistoryUnderflow { frame })?;
        let snapshot = self
            .history
            .get(target)
            .ok_or(HistoryUnderflow { frame })?;
        snapshot.restore_into(&mut self.world);
        Ok(())
    }

    /// Step forward `fps` times, one simulated second
    pub fn skip_forward_second(&mut self) -> Vec<StepReport> {
        (0..self.config.fps).map(|_| self.step_forward()).collect()
    }

    /// Step backward up to `fps` times, returning how many steps were taken
    pub fn skip_backward_second(&mut self) -> u32 {
        let mut taken = 0;
        while taken < self.config.fps {
            if let Err(err) = self.step_backward() {
                log::debug!("skip backward stopped early: {err}");
                break;
            }
            taken += 1;
        }
        taken
    }

    pub fn toggle_pause(&mut self) {
        self.state = match self.state {
            RunState::Running => RunState::Paused,
            RunState::Paused => RunState::Running,
        };
    }

    /// Replace the world bounds used by subsequent steps
    pub fn resize(&mut self, bounds: Bounds) -> Result<(), ConfigurationError> {
        bounds.validate()?;
        self.world.bounds = bounds;
        Ok(())
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn is_paused(&self) -> bool {
        self.state == RunState::Paused
    }

    pub fn current_time(&self) -> f64 {
        self.world.time
    }

    pub fn current_frame_index(&self) -> u64 {
        self.world.frame
    }

    /// Whether simulated time has reached the configured end time
    pub fn has_reached_end(&self) -> bool {
        let rounded = (self.world.time * 1e5).round() / 1e5;
        rounded >= self.config.end_time
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vector::Vector2;

    fn drifting() -> TimeController {
        let specs = vec![BallSpec::at(Vector2::new(5000.0, 5000.0))
            .with_velocity(Vector2::new(60.0, 0.0))];
        TimeController::initialize(Bounds::default(), &specs, SimConfig::default()).unwrap()
    }

    #[test]
    fn starts_running_at_frame_zero() {
        let ctrl = drifting();
        assert_eq!(ctrl.state(), RunState::Running);
        assert_eq!(ctrl.current_frame_index(), 0);
        assert_eq!(ctrl.current_time(), 0.0);
        assert_eq!(ctrl.history().len(), 1);
    }

    #[test]
    fn tick_is_ignored_while_paused() {
        let mut ctrl = drifting();
        ctrl.on_event(Event::TogglePause);
        assert!(ctrl.is_paused());
        ctrl.on_event(Event::Tick);
        assert_eq!(ctrl.current_frame_index(), 0);

        ctrl.on_event(Event::StepForward);
        assert_eq!(ctrl.current_frame_index(), 1);
        assert!(ctrl.is_paused());
    }

    #[test]
    fn step_backward_at_start_is_noop() {
        let mut ctrl = drifting();
        let before = ctrl.world().clone();
        assert_eq!(ctrl.step_backward(), Err(HistoryUnderflow { frame: 0 }));
        ctrl.on_event(Event::StepBackward);
        assert_eq!(ctrl.world(), &before);
    }

    #[test]
    fn time_tracks_frames() {
        let mut ctrl = drifting();
        ctrl.on_event(Event::SkipForwardSecond);
        assert_eq!(ctrl.current_frame_index(), 60);
        assert_eq!(ctrl.current_time(), 1.0);
        let x = ctrl.world().balls()[0].position().x;
        assert!((x - 5060.0).abs() < 1e-9);
    }

    #[test]
    fn toggle_pause_keeps_world() {
        let mut ctrl = drifting();
        ctrl.on_event(Event::Tick);
        let before = ctrl.world().clone();
        ctrl.on_event(Event::TogglePause);
        ctrl.on_event(Event::TogglePause);
        assert_eq!(ctrl.world(), &before);
        assert_eq!(ctrl.state(), RunState::Running);
    }

    #[test]
    fn invalid_resize_is_ignored() {
        let mut ctrl = drifting();
        ctrl.on_event(Event::Resize(Bounds::from_size(-1.0, 5.0)));
        assert_eq!(ctrl.world().bounds(), Bounds::default());
        ctrl.on_event(Event::Resize(Bounds::from_size(800.0, 600.0)));
        assert_eq!(ctrl.world().bounds(), Bounds::from_size(800.0, 600.0));
    }

    #[test]
    fn reaches_end_time() {
        let config = SimConfig {
            fps: 10,
            end_time: 0.3,
            ..SimConfig::default()
        };
        let mut ctrl = TimeController::initialize(Bounds::default(), &[], config).unwrap();
        let mut ticks = 0;
        while !ctrl.has_reached_end() {
            ctrl.on_event(Event::Tick);
            ticks += 1;
        }
        assert_eq!(ticks, 3);
    }
}
