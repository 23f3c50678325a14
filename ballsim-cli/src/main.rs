use anyhow::Context;
use ballsim_core::{run_until_end, ScenarioConfig, TimeController};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "ballsim")]
#[command(about = "Charged balls with elastic collisions and reversible time", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a scenario headless until its end time
    Run {
        /// YAML scenario file; the built-in molecule pair is used if omitted
        #[arg(short, long)]
        scenario: Option<PathBuf>,

        /// Frames (steps) per simulated second
        #[arg(short, long)]
        fps: Option<u32>,

        /// Simulated time at which the run stops
        #[arg(short, long)]
        end_time: Option<f64>,

        /// Maximum number of snapshots kept for stepping backward
        #[arg(long)]
        history_depth: Option<usize>,

        /// Print per-frame debug information
        #[arg(short, long)]
        debug: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            scenario,
            fps,
            end_time,
            history_depth,
            debug,
        } => {
            init_logging(debug);
            let overrides = Overrides {
                fps,
                end_time,
                history_depth,
            };
            if let Err(e) = run(scenario.as_ref(), overrides, debug) {
                eprintln!("Error: {e:#}");
                std::process::exit(1);
            }
        }
    }
}

fn init_logging(debug: bool) {
    let default_level = if debug { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();
}

struct Overrides {
    fps: Option<u32>,
    end_time: Option<f64>,
    history_depth: Option<usize>,
}

fn load_scenario(path: Option<&PathBuf>, overrides: Overrides) -> anyhow::Result<ScenarioConfig> {
    let mut scenario = match path {
        Some(path) => ScenarioConfig::load(path)
            .with_context(|| format!("loading scenario {}", path.display()))?,
        None => ScenarioConfig::molecule_pair(),
    };

    if let Some(fps) = overrides.fps {
        scenario.config.fps = fps;
    }
    if let Some(end_time) = overrides.end_time {
        scenario.config.end_time = end_time;
    }
    if overrides.history_depth.is_some() {
        scenario.config.history_depth = overrides.history_depth;
    }
    Ok(scenario)
}

fn print_debug(ctrl: &TimeController) {
    let bounds = ctrl.world().bounds();
    println!("DEBUG #{}:", ctrl.current_frame_index());
    println!(
        "  time: {:.5} ({})",
        ctrl.current_time(),
        ctrl.config().end_time
    );
    println!("  fps: {}", ctrl.config().fps);
    println!("  world: {} | {}", bounds.width(), bounds.height());
    println!();
}

fn run(path: Option<&PathBuf>, overrides: Overrides, debug: bool) -> anyhow::Result<()> {
    let scenario = load_scenario(path, overrides)?;
    let mut ctrl =
        TimeController::from_scenario(&scenario).context("invalid simulation configuration")?;

    log::info!(
        "running {} balls for {}s at {} fps",
        ctrl.world().balls().len(),
        ctrl.config().end_time,
        ctrl.config().fps
    );

    let summary = run_until_end(&mut ctrl, |ctrl| {
        if debug {
            print_debug(ctrl);
        }
    });

    log::info!(
        "finished after {} frames, {} contacts, {} skipped updates",
        summary.frames,
        summary.contacts,
        summary.skipped_updates
    );

    println!("t = {:.5}", summary.time);
    for ball in ctrl.world().balls() {
        let p = ball.position();
        let v = ball.velocity();
        println!(
            "ball {} pos = ({:.6}, {:.6}) vel = ({:.6}, {:.6})",
            ball.id(),
            p.x,
            p.y,
            v.x,
            v.y
        );
    }

    Ok(())
}
