use crate::config::ScenarioConfig;
use crate::controller::TimeController;
use crate::error::ConfigurationError;

/// Final state of a headless run
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub frames: u64,
    pub time: f64,
    /// Total ball updates skipped because of non-finite values
    pub skipped_updates: usize,
    pub contacts: usize,
}

/// Build a controller for `scenario`
pub fn build_controller(scenario: &ScenarioConfig) -> Result<TimeController, ConfigurationError> {
    TimeController::from_scenario(scenario)
}

/// Tick `controller` until the configured end time
///
/// `on_frame` sees the controller before every tick, the way a render loop
/// draws the current frame before advancing.
pub fn run_until_end<F>(controller: &mut TimeController, mut on_frame: F) -> RunSummary
where
    F: FnMut(&TimeController),
{
    let mut skipped_updates = 0;
    let mut contacts = 0;

    loop {
        on_frame(controller);
        if controller.has_reached_end() {
            break;
        }
        let report = controller.step_forward();
        skipped_updates += report.integration.skipped.len();
        contacts += report.collisions.contacts.len();
    }

    RunSummary {
        frames: controller.current_frame_index(),
        time: controller.current_time(),
        skipped_updates,
        contacts,
    }
}

/// Build and run `scenario` to its end time
pub fn run_scenario(scenario: &ScenarioConfig) -> Result<RunSummary, ConfigurationError> {
    let mut controller = build_controller(scenario)?;
    Ok(run_until_end(&mut controller, |_| {}))
}
