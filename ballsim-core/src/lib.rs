pub mod ball;
pub mod collision;
pub mod config;
pub mod controller;
pub mod error;
pub mod forces;
pub mod history;
pub mod integrator;
pub mod runtime;
pub mod vector;
pub mod world;

pub use ball::{Ball, BallId, BallSpec};
pub use collision::{Broadphase, CollisionReport};
pub use config::{ScenarioConfig, SimConfig};
pub use controller::{Event, RunState, StepReport, TimeController};
pub use error::{ConfigurationError, DegenerateVectorError, HistoryUnderflow, ScenarioError};
pub use forces::{compute_forces, CoulombParams};
pub use history::{History, Snapshot};
pub use integrator::{integrate, IntegrationReport};
pub use runtime::{build_controller, run_scenario, run_until_end, RunSummary};
pub use vector::Vector2;
pub use world::{Bounds, World};
