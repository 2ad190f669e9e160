use std::{ fs::{ self, File }, path::PathBuf };
use clap::Parser;
use ndarray as nd;
use ndarray_npy::NpzWriter;
use pmlspace::{ config::Config, integrate::Method, solver::Solver };

/// Compare density drift across integration methods for the same initial
/// condition.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// TOML config; defaults are used if omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output directory.
    #[arg(short, long, default_value = "output")]
    outdir: PathBuf,

    /// Iterations per method.
    #[arg(short, long, default_value_t = 20)]
    iters: usize,

    /// Keep the absorbing layer and potential from the config instead of
    /// switching them off.
    #[arg(long)]
    keep_boundaries: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();
    fs::create_dir_all(&args.outdir)?;

    let mut config = match &args.config {
        Some(path) => Config::read_toml(path)?,
        None => Config::default(),
    };
    if !args.keep_boundaries {
        config.pml.width = 0.0;
        config.potential.magnitude = 0.0;
    }

    let mut npz
        = NpzWriter::new(File::create(args.outdir.join("method_drift.npz"))?);
    let mut t: nd::Array1<f64> = nd::Array1::zeros(args.iters + 1);
    for method in Method::ALL {
        config.integration.method = method;
        let mut solver = Solver::new(&config)?;
        let d0 = solver.density();
        let mut drift: nd::Array1<f64> = nd::Array1::zeros(args.iters + 1);
        for k in 1..=args.iters {
            solver.iterate();
            t[k] = solver.time();
            drift[k] = (solver.density() - d0) / d0;
        }
        println!("{:>6}: final relative drift {:+.3e}", method.name(), drift[args.iters]);
        npz.add_array(method.name(), &drift)?;
    }
    npz.add_array("t", &t)?;
    npz.finish()?;
    Ok(())
}
