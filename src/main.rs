use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;

use uuv_mission::config::RunConfig;
use uuv_mission::io::{csv, json};
use uuv_mission::mission::{presets, Mission};
use uuv_mission::plant::Submarine;
use uuv_mission::ClosedLoop;

/// Run a UUV depth-tracking mission under PD control.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// TOML run configuration
    #[arg(long)]
    config: Option<PathBuf>,

    /// Mission CSV with reference, cave_height and cave_depth columns
    #[arg(long)]
    mission: Option<PathBuf>,

    /// Proportional gain override
    #[arg(long)]
    kp: Option<f64>,

    /// Derivative gain override
    #[arg(long)]
    kd: Option<f64>,

    /// Write the trajectory as CSV
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Write the run summary as JSON
    #[arg(long)]
    summary: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            let app_name = env!("CARGO_PKG_NAME").replace('-', "_");
            format!("{app_name}=info").into()
        }))
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => RunConfig::load(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => RunConfig::default(),
    };
    if let Some(kp) = args.kp {
        config.controller.kp = kp;
    }
    if let Some(kd) = args.kd {
        config.controller.kd = kd;
    }
    config.validate()?;

    let mut rng = match config.sim.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let mission = match &args.mission {
        Some(path) => {
            let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
            Mission::from_csv(BufReader::new(file))
                .with_context(|| format!("parsing {}", path.display()))?
        }
        None if config.sim.random_mission => {
            Mission::random(config.sim.duration, config.sim.mission_scale, &mut rng)
        }
        None => presets::sine_dive(config.sim.duration),
    };
    tracing::info!(steps = mission.len(), kp = config.controller.kp, kd = config.controller.kd, "mission loaded");

    let mut closed_loop = ClosedLoop::new(Submarine::new(config.submarine), config.controller.build());
    let trajectory = if config.sim.disturbance_std == 0.0 {
        closed_loop.simulate_undisturbed(&mission)?
    } else {
        closed_loop.simulate_with_random_disturbances(&mission, config.sim.disturbance_std, &mut rng)?
    };

    let summary = json::RunSummary::from_run(&closed_loop.controller, &mission, &trajectory);

    println!();
    println!("  UUV depth mission ({} steps)", summary.steps);
    println!("  ──────────────────────────────────────────────");
    println!("  Gains:           KP={:.3}  KD={:.3}", summary.kp, summary.kd);
    println!("  RMS error:       {:>8.3}", summary.rms_error);
    println!("  Max |error|:     {:>8.3}", summary.max_abs_error);
    println!("  Cave violations: {:>8}", summary.cave_violations);
    if let Some(t) = summary.first_violation {
        println!("  First collision: step {t}");
    }
    println!();

    if let Some(path) = &args.csv {
        csv::write_trajectory_file(path, &trajectory, &mission)
            .with_context(|| format!("writing {}", path.display()))?;
        tracing::info!(path = %path.display(), "trajectory written");
    }
    if let Some(path) = &args.summary {
        json::write_summary_file(path, &summary)
            .with_context(|| format!("writing {}", path.display()))?;
        tracing::info!(path = %path.display(), "summary written");
    }

    Ok(())
}
