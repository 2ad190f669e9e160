use std::{ fs::{ self, File }, path::PathBuf };
use anyhow::Context;
use clap::Parser;
use ndarray as nd;
use ndarray_npy::NpzWriter;
use pmlspace::{ config::Config, solver::Solver, utils::fraction_beyond };

/// Send a pulse at a Gaussian barrier and record the evolution.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// TOML config; defaults are used if omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output directory.
    #[arg(short, long, default_value = "output")]
    outdir: PathBuf,

    /// Number of iterations to run, rounded down to a multiple of `every`.
    #[arg(short, long, default_value_t = 300)]
    iters: usize,

    /// Record a snapshot every this many iterations.
    #[arg(short, long, default_value_t = 10)]
    every: usize,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();
    fs::create_dir_all(&args.outdir)
        .with_context(|| format!("couldn't create {}", args.outdir.display()))?;

    let config = match &args.config {
        Some(path) => Config::read_toml(path)?,
        None => Config::default(),
    };
    let mut solver = Solver::new(&config)?;
    let every = args.every.max(1);

    let snap0 = solver.snapshot();
    let n = snap0.x.len();
    let frames = args.iters / every + 1;
    let mut t: nd::Array1<f64> = nd::Array1::zeros(frames);
    let mut re: nd::Array2<f64> = nd::Array2::zeros((frames, n));
    let mut im: nd::Array2<f64> = nd::Array2::zeros((frames, n));
    let mut abs: nd::Array2<f64> = nd::Array2::zeros((frames, n));
    let mut record = |k: usize, solver: &Solver| {
        let snap = solver.snapshot();
        t[k] = snap.t;
        re.row_mut(k).assign(&snap.real);
        im.row_mut(k).assign(&snap.imag);
        abs.row_mut(k).assign(&snap.plus_abs);
    };

    let d0 = solver.density();
    record(0, &solver);
    for k in 1..frames {
        for _ in 0..every { solver.iterate(); }
        record(k, &solver);
    }
    let d1 = solver.density();
    let transmitted
        = fraction_beyond(&snap0.x, solver.state(), config.potential.center);

    let mut npz = NpzWriter::new(File::create(args.outdir.join("barrier.npz"))?);
    npz.add_array("x", &snap0.x)?;
    npz.add_array("v", &snap0.potential)?;
    npz.add_array("sigma", &snap0.pml_profile)?;
    npz.add_array("t", &t)?;
    npz.add_array("re", &re)?;
    npz.add_array("im", &im)?;
    npz.add_array("abs", &abs)?;
    npz.finish()?;
    config.write_toml(args.outdir.join("barrier.toml"))?;

    println!("initial density: {:.6e}", d0);
    println!("final density:   {:.6e} (t = {:.4e})", d1, solver.time());
    println!("transmitted:     {:.6}", transmitted);
    Ok(())
}
