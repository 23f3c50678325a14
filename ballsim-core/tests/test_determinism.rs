//! Determinism tests - identical inputs must give identical worlds

use ballsim_core::tests::test_helpers::{crowded_controller, crowded_specs};
use ballsim_core::{Bounds, Broadphase, Event, SimConfig, TimeController};

fn run_steps(ctrl: &mut TimeController, steps: usize) {
    for _ in 0..steps {
        ctrl.on_event(Event::Tick);
    }
}

#[test]
fn test_replay_is_bit_identical() {
    let mut first = crowded_controller(60);
    let mut second = crowded_controller(60);

    run_steps(&mut first, 300);
    run_steps(&mut second, 300);

    assert_eq!(first.world(), second.world());
}

#[test]
fn test_multiple_runs_determinism() {
    let worlds: Vec<_> = (0..4)
        .map(|_| {
            let mut ctrl = crowded_controller(30);
            run_steps(&mut ctrl, 150);
            ctrl.world().clone()
        })
        .collect();

    for (i, world) in worlds.iter().enumerate().skip(1) {
        assert_eq!(world, &worlds[0], "run {} should match run 0", i);
    }
}

#[test]
fn test_rewind_and_replay_matches_original() {
    let mut ctrl = crowded_controller(60);
    run_steps(&mut ctrl, 120);
    let original = ctrl.world().clone();

    ctrl.on_event(Event::SkipBackwardSecond);
    assert_eq!(ctrl.current_frame_index(), 60);
    ctrl.on_event(Event::SkipForwardSecond);

    assert_eq!(ctrl.world(), &original);
}

#[test]
fn test_grid_broadphase_matches_brute_force() {
    let build = |broadphase| {
        let mut config = SimConfig {
            fps: 60,
            end_time: 10.0,
            broadphase,
            ..SimConfig::default()
        };
        config.coulomb.k = 1.0e6;
        TimeController::initialize(Bounds::from_size(1000.0, 800.0), &crowded_specs(), config)
            .expect("valid scenario")
    };

    let mut brute = build(Broadphase::BruteForce);
    let mut grid = build(Broadphase::UniformGrid { cell_size: 120.0 });

    for _ in 0..400 {
        let a = brute.step_forward();
        let b = grid.step_forward();
        assert_eq!(a.collisions, b.collisions, "frame {}", a.frame);
    }

    assert_eq!(brute.world(), grid.world());
}
