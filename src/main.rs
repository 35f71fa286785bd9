use anyhow::{anyhow, Context, Result};
use std::path::{Path, PathBuf};
use std::time::Instant;

use vsph2d::io::CsvPositionWriter;
use vsph2d::sph::*;

const CLASSICAL_PARTICLES: usize = 500;
const VISCOELASTIC_PARTICLES: usize = 50 * 50;
const DEFAULT_FRAMES: usize = 500;

// Writes reference trajectories of both solvers.
//
// usage: vsph2d [output_dir] [frames]
fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let output_dir = args.next().map(PathBuf::from).unwrap_or_else(|| PathBuf::from("tests/data"));
    let num_frames = match args.next() {
        Some(frames) => frames.parse::<usize>().with_context(|| format!("invalid frame count {:?}", frames))?,
        None => DEFAULT_FRAMES,
    };
    if args.next().is_some() {
        return Err(anyhow!("usage: vsph2d [output_dir] [frames]"));
    }

    std::fs::create_dir_all(&output_dir).with_context(|| format!("create output directory {}", output_dir.display()))?;

    let classical_path = output_dir.join("SphSolver2DData.csv");
    let classical = ClassicalSolver::new(CLASSICAL_PARTICLES).with_position_sink(CsvPositionWriter::create(&classical_path)?);
    record("classical", classical, num_frames, &classical_path)?;

    let viscoelastic_path = output_dir.join("VSphSolver2DData.csv");
    let viscoelastic = ViscoelasticSolver::new(VISCOELASTIC_PARTICLES).with_position_sink(CsvPositionWriter::create(&viscoelastic_path)?);
    record("viscoelastic", viscoelastic, num_frames, &viscoelastic_path)?;

    Ok(())
}

fn record(name: &str, mut solver: impl Solver, num_frames: usize, path: &Path) -> Result<()> {
    log::info!("{}: {} particles, {} frames -> {}", name, solver.num_particles(), num_frames, path.display());
    let start = Instant::now();
    for frame in 0..num_frames {
        solver.update().with_context(|| format!("{} solver, frame {}", name, frame))?;
    }
    log::info!(
        "{}: done in {:.2?}, {:.3}s simulated",
        name,
        start.elapsed(),
        solver.time_manager().passed_time()
    );
    Ok(())
}
