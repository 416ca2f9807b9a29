#![deny(clippy::all, clippy::pedantic)]

use anyhow::Result;
use clap::Parser;
use setup::SetupConfig;
use std::path::PathBuf;

/// Reaching-simulator driver: runs episodes under an externally chosen
/// constant co-activation command and logs their outcomes.
#[derive(Parser, Debug)]
#[command(name = "runtime_main")]
struct Args {
    /// JSON setup file; the reference configuration is used when omitted.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Start-position table file (`x y` per line); a built-in arc of start
    /// points is used when omitted.
    #[arg(long)]
    table: Option<PathBuf>,
    #[arg(long, default_value_t = 3)]
    episodes: u32,
    /// Driver-side step cap; the configured cost budget may end an episode
    /// earlier.
    #[arg(long, default_value_t = 500)]
    max_steps: u32,
    #[arg(long, default_value_t = 0)]
    seed: u64,
    /// Start-table row used for every episode.
    #[arg(long, default_value_t = 0)]
    start_index: usize,
    /// Constant activation applied to every muscle.
    #[arg(long, default_value_t = 0.5)]
    activation: f32,
}

/// Arc of reachable start points below the reference target.
const BUILTIN_TABLE: [[f32; 2]; 7] = [
    [0.3, 0.35],
    [0.2, 0.4],
    [0.1, 0.45],
    [0.0, 0.45],
    [-0.1, 0.45],
    [-0.2, 0.4],
    [-0.3, 0.35],
];

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => SetupConfig::load(path)?,
        None => SetupConfig::default(),
    };
    let table = match &args.table {
        Some(path) => setup::load_position_table(path)?,
        None => BUILTIN_TABLE.to_vec(),
    };

    tracing::info!(
        arm = %config.arm,
        dt = config.dt,
        delay = config.delay,
        noise = !config.det,
        starts = table.len(),
        "initializing reaching environment"
    );
    let mut env = setup::build_env(&config, table, args.seed)?;

    let (low, high) = env.observation_bounds();
    tracing::debug!(?low, ?high, "observation box");

    let action = vec![args.activation.clamp(0.0, 1.0); 6];
    for episode in 0..args.episodes {
        env.reset(args.start_index)?;
        let mut episode_return = 0.0_f32;
        let mut reached = false;
        for step in 0..args.max_steps {
            let out = env.step(&action)?;
            episode_return += out.reward;
            if (step + 1) % 100 == 0 {
                let (_, hand) = env.elbow_hand();
                tracing::info!(episode, step = step + 1, ?hand, "episode progress");
            }
            if out.done {
                reached = out.reward > 0.0;
                break;
            }
        }
        let counters = env.counters();
        tracing::info!(
            episode,
            steps = counters.steps,
            elapsed = counters.t,
            episode_return,
            reached,
            "episode finished"
        );
    }

    Ok(())
}
