//! Coulomb force behavior inside full simulation steps

use ballsim_core::forces::{compute_forces, potential_energy, CoulombParams};
use ballsim_core::tests::test_helpers::{approx_eq, crowded_specs, rel_eq, vec_approx_eq};
use ballsim_core::{BallSpec, Bounds, Event, ScenarioConfig, SimConfig, TimeController, Vector2};

#[test]
fn test_lone_charged_ball_stays_at_rest() {
    // One unit above the floor, nothing to interact with
    let specs = vec![BallSpec::at(Vector2::new(5000.0, 101.0))
        .with_radius(100.0)
        .with_charge(1.0)];
    let mut ctrl =
        TimeController::initialize(Bounds::default(), &specs, SimConfig::default()).unwrap();

    for _ in 0..600 {
        ctrl.on_event(Event::Tick);
    }

    let ball = &ctrl.world().balls()[0];
    assert_eq!(ball.position(), Vector2::new(5000.0, 101.0));
    assert_eq!(ball.velocity(), Vector2::ZERO);
}

#[test]
fn test_coulomb_steps_conserve_momentum_not_energy() {
    let specs = vec![
        BallSpec::at(Vector2::new(3000.0, 5000.0))
            .with_radius(50.0)
            .with_mass(1.0)
            .with_charge(2.0),
        BallSpec::at(Vector2::new(6000.0, 5500.0))
            .with_radius(50.0)
            .with_mass(3.0)
            .with_charge(-1.0),
    ];
    let mut ctrl =
        TimeController::initialize(Bounds::default(), &specs, SimConfig::default()).unwrap();
    let p0 = ctrl.world().total_momentum();
    let e0 = ctrl.world().kinetic_energy();

    for _ in 0..60 {
        let report = ctrl.step_forward();
        assert!(report.collisions.contacts.is_empty());
        assert_eq!(report.collisions.wall_hits, 0);
    }

    let p1 = ctrl.world().total_momentum();
    assert!(vec_approx_eq(p1, p0, 1e-6));
    assert!(ctrl.world().kinetic_energy() > e0 + 1.0);
}

#[test]
fn test_molecule_pair_attracts() {
    let scenario = ScenarioConfig::molecule_pair();
    let mut ctrl = TimeController::from_scenario(&scenario).unwrap();
    let start = ctrl.world().balls()[0]
        .position()
        .distance(ctrl.world().balls()[1].position());

    ctrl.on_event(Event::SkipForwardSecond);

    let balls = ctrl.world().balls();
    let end = balls[0].position().distance(balls[1].position());
    assert!(end < start);
    assert!(balls[0].velocity().x > 0.0);
    assert!(balls[1].velocity().x < 0.0);
    assert!(vec_approx_eq(ctrl.world().total_momentum(), Vector2::ZERO, 1e-6));
}

#[test]
fn test_force_matches_coulomb_law() {
    let params = CoulombParams {
        k: 8.0,
        min_distance: 1.0,
    };
    let ctrl = TimeController::initialize(
        Bounds::default(),
        &[
            BallSpec::at(Vector2::new(100.0, 100.0)).with_charge(3.0),
            BallSpec::at(Vector2::new(103.0, 104.0)).with_charge(2.0),
        ],
        SimConfig::default(),
    )
    .unwrap();
    let balls = ctrl.world().balls();

    let forces = compute_forces(balls, &params);
    // |F| = 8 * 3 * 2 / 25, pushing ball 0 away along -(3, 4)/5
    let magnitude = 8.0 * 6.0 / 25.0;
    assert!(vec_approx_eq(forces[0], Vector2::new(-0.6, -0.8) * magnitude, 1e-12));
    assert!(vec_approx_eq(forces[1], Vector2::new(0.6, 0.8) * magnitude, 1e-12));
    assert!(approx_eq(potential_energy(balls, &params), 8.0 * 6.0 / 5.0, 1e-12));
}

#[test]
fn test_energy_conserved_without_charges() {
    let mut specs = crowded_specs();
    for spec in &mut specs {
        spec.charge = 0.0;
    }
    let mut ctrl =
        TimeController::initialize(Bounds::from_size(1000.0, 800.0), &specs, SimConfig::default())
            .unwrap();
    let e0 = ctrl.world().kinetic_energy();

    let mut contacts = 0;
    for _ in 0..600 {
        contacts += ctrl.step_forward().collisions.contacts.len();
    }

    assert!(contacts > 0, "scenario should produce collisions");
    assert!(rel_eq(ctrl.world().kinetic_energy(), e0, 1e-6));
}
