use std::{ f64::consts::FRAC_PI_2, fs::{ self, File }, path::PathBuf };
use clap::Parser;
use log::info;
use ndarray as nd;
use ndarray_npy::NpzWriter;
use pmlspace::{ config::Config, solver::Solver };

/// Sweep the absorbing-layer phase and measure how much of an outgoing pulse
/// survives.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// TOML config for everything but the pulse and the layer phase.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output directory.
    #[arg(short, long, default_value = "output")]
    outdir: PathBuf,

    /// Number of phase values in [0, π/2].
    #[arg(short, long, default_value_t = 16)]
    num: usize,

    /// Iterations per run.
    #[arg(short, long, default_value_t = 120)]
    iters: usize,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();
    fs::create_dir_all(&args.outdir)?;

    let mut config = match &args.config {
        Some(path) => Config::read_toml(path)?,
        None => Config::default(),
    };
    // one right-moving pulse, started close to the right-hand layer
    let span = config.grid.xmax - config.grid.xmin;
    config.pulse.center = config.grid.xmin + 0.85 * span;
    config.pulse.magnitude = 1.0;
    config.pulse.wavenumber = config.pulse.wavenumber.abs();
    config.pulse2.magnitude = 0.0;
    config.potential.magnitude = 0.0;

    let gamma: nd::Array1<f64> = nd::Array1::linspace(0.0, FRAC_PI_2, args.num);
    let mut residual: nd::Array1<f64> = nd::Array1::zeros(args.num);
    for (g, r) in gamma.iter().zip(residual.iter_mut()) {
        config.pml.gamma = *g;
        let mut solver = Solver::new(&config)?;
        let d0 = solver.density();
        for _ in 0..args.iters { solver.iterate(); }
        *r = solver.density() / d0;
        info!("gamma = {:.4}: residual {:.3e}", g, r);
    }

    let mut npz = NpzWriter::new(File::create(args.outdir.join("pml_scan.npz"))?);
    npz.add_array("gamma", &gamma)?;
    npz.add_array("residual", &residual)?;
    npz.finish()?;

    let (best_g, best_r)
        = gamma.iter().zip(residual.iter())
        .min_by(|(_, ra), (_, rb)| ra.total_cmp(rb))
        .map(|(g, r)| (*g, *r))
        .unwrap_or((f64::NAN, f64::NAN));
    println!("best gamma: {:.4} (residual {:.3e})", best_g, best_r);
    Ok(())
}
