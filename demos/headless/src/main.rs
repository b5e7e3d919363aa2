//! headless: runs a flock with no renderer attached.
//!
//! Steps the simulation at a fixed `dt` for a number of frames and logs a
//! summary line per snapshot: mean neighborhood size, wraps, flock centroid.
//! Useful for profiling the neighbor index choices against each other.
//!
//! ```text
//! cargo run -p headless --release -- --agents 5000 --index grid --frames 600
//! RUST_LOG=shoal_sim=debug cargo run -p headless -- --frames 10
//! ```

mod logging;

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::info;

use shoal_agent::AgentStore;
use shoal_core::{FlockConfig, Frame, SimRng};
use shoal_sim::{FlockObserver, FrameStats, SimBuilder, UpdateMode};
use shoal_spatial::{GridIndex, LinearIndex, NeighborIndex, RTreeIndex};

// ── CLI ───────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, ValueEnum)]
enum IndexKind {
    Linear,
    Grid,
    Rtree,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ModeArg {
    Sequential,
    Snapshot,
}

impl From<ModeArg> for UpdateMode {
    fn from(m: ModeArg) -> Self {
        match m {
            ModeArg::Sequential => UpdateMode::Sequential,
            ModeArg::Snapshot => UpdateMode::Snapshot,
        }
    }
}

/// Headless boid flock runner
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON file holding a FlockConfig; missing fields take defaults
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the agent count
    #[arg(short, long)]
    agents: Option<usize>,

    /// Override the seed
    #[arg(short, long)]
    seed: Option<u64>,

    /// Frames to run
    #[arg(short, long, default_value_t = 600)]
    frames: u64,

    /// Seconds per frame
    #[arg(long, default_value_t = 1.0 / 60.0)]
    dt: f64,

    /// Neighborhood index
    #[arg(short, long, value_enum, default_value_t = IndexKind::Grid)]
    index: IndexKind,

    /// Per-frame update mode
    #[arg(short, long, value_enum, default_value_t = ModeArg::Sequential)]
    mode: ModeArg,

    /// Log a flock summary every N frames (0 = never)
    #[arg(long, default_value_t = 60)]
    report_every: u64,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

// ── Observer ──────────────────────────────────────────────────────────────────

/// Accumulates per-frame stats and logs a summary on each snapshot.
#[derive(Default)]
struct Reporter {
    frames: u64,
    links:  usize,
    wraps:  usize,
    last:   FrameStats,
}

impl FlockObserver for Reporter {
    fn on_frame_end(&mut self, _frame: Frame, stats: &FrameStats) {
        self.frames += 1;
        self.links += stats.neighbor_links;
        self.wraps += stats.wrapped;
        self.last = *stats;
    }

    fn on_snapshot(&mut self, frame: Frame, agents: &AgentStore) {
        let centroid = agents.centroid().unwrap_or_default();
        info!(
            "{frame}: mean_neighbors={:.2} wrapped={} centroid=({:.1}, {:.1}, {:.1})",
            self.last.mean_neighbors(),
            self.last.wrapped,
            centroid.x,
            centroid.y,
            centroid.z,
        );
    }

    fn on_run_end(&mut self, final_frame: Frame) {
        let per_frame = if self.frames == 0 {
            0.0
        } else {
            self.links as f64 / self.frames as f64
        };
        info!(
            "run finished at {final_frame}: {} frames, {per_frame:.0} neighbor links/frame, {} wraps",
            self.frames, self.wraps,
        );
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let args = Args::parse();
    logging::init(args.verbose);

    let mut config = match &args.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            serde_json::from_str::<FlockConfig>(&text)
                .with_context(|| format!("parsing {}", path.display()))?
        }
        None => FlockConfig::default(),
    };
    if let Some(n) = args.agents {
        config.agent_count = n;
    }
    if let Some(seed) = args.seed {
        config.seed = seed;
    }

    match args.index {
        IndexKind::Linear => {
            let index = LinearIndex::with_capacity(config.agent_count);
            run(&args, config, index)
        }
        IndexKind::Grid => {
            let index = GridIndex::new(config.agent.radius)?;
            run(&args, config, index)
        }
        IndexKind::Rtree => run(&args, config, RTreeIndex::new()),
    }
}

/// Build and run one simulation over neighborhood index `I`.
fn run<I: NeighborIndex + Sync>(args: &Args, config: FlockConfig, index: I) -> Result<()> {
    let rng = SimRng::new(config.seed);
    let mut sim = SimBuilder::new(config, rng)
        .index(index)
        .mode(args.mode.into())
        .snapshot_interval(args.report_every)
        .build()?;

    let mut reporter = Reporter::default();
    let t0 = Instant::now();
    sim.run_frames(args.frames, args.dt, &mut reporter)?;

    let elapsed = t0.elapsed();
    info!(
        "wall time {:.3} s ({:.3} ms/frame)",
        elapsed.as_secs_f64(),
        elapsed.as_secs_f64() * 1e3 / args.frames.max(1) as f64,
    );
    Ok(())
}
