use pmlspace::{ config::Config, solver::Solver, utils::{ centroid, fraction_beyond } };

// collide two counter-propagating packets with the barrier switched off, and
// watch them pass through each other before the absorbing layer eats them

fn main() {
    let mut config = Config::default();
    config.pulse2.magnitude = 1.0; // second packet at x = 1.5, moving left
    config.potential.magnitude = 0.0;
    config.integration.steps_per_iter = 20;

    let mut solver = Solver::new(&config).unwrap();
    let x = solver.grid().x().clone();
    let d0 = solver.density();
    println!("{:>8}  {:>10}  {:>10}  {:>10}", "t", "density", "centroid", "right");
    for k in 0..=40 {
        if k % 4 == 0 {
            println!(
                "{:8.4}  {:10.4}  {:10.4}  {:10.4}",
                solver.time(),
                solver.density() / d0,
                centroid(&x, solver.state()),
                fraction_beyond(&x, solver.state(), 1.0),
            );
        }
        solver.iterate();
    }
}
