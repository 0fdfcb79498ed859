use euler1d_ppm::{Euler, Problem, Scheme};
use lib_hydro_algorithms::grid::Grid;

const GAMMA: f64 = 1.4;

fn setup(problem: Problem, num_zones: usize) -> Euler {
    let grid = Grid::new(num_zones, 4, Problem::DOMAIN, problem.boundary()).unwrap();
    Euler::new(grid, 0.8, GAMMA, Scheme::default(), |x| problem.primitive(x, GAMMA)).unwrap()
}

fn assert_close(a: f64, b: f64, tol: f64, what: &str) {
    assert!((a - b).abs() <= tol * (1.0 + b.abs()), "{} changed from {} to {}", what, b, a);
}

#[test]
fn periodic_runs_conserve_every_total() {
    let mut solver = setup(Problem::Advection, 64);
    let before = solver.totals();
    solver.evolve(0.25).unwrap();
    let after = solver.totals();

    assert!(solver.iteration() > 10);
    assert_close(after.density, before.density, 1e-12, "mass");
    assert_close(after.momentum, before.momentum, 1e-12, "momentum");
    assert_close(after.energy, before.energy, 1e-12, "energy");
}

#[test]
fn reflecting_walls_conserve_mass_and_energy() {
    let mut solver = setup(Problem::Wall, 64);
    let before = solver.totals();
    solver.evolve(0.2).unwrap();
    let after = solver.totals();

    assert_close(after.density, before.density, 1e-9, "mass");
    assert_close(after.energy, before.energy, 1e-8, "energy");

    // the wall has stopped the gas next to it and compressed it
    let q = solver.interior_primitive().unwrap();
    assert!(q[0].velocity.abs() < 0.2, "{:?}", q[0]);
    assert!(q[0].density > 1.5, "{:?}", q[0]);
}

#[test]
fn a_constant_state_is_preserved_exactly() {
    let mut solver = setup(Problem::Uniform, 32);
    let initial = solver.conserved().clone();
    solver.evolve(1.0).unwrap();

    assert_eq!(solver.time(), 1.0);
    for (i, (a, b)) in solver.conserved().iter().zip(initial.iter()).enumerate() {
        assert!((a.density - b.density).abs() < 1e-13, "zone {}: {:?} vs {:?}", i, a, b);
        assert!((a.momentum - b.momentum).abs() < 1e-13, "zone {}: {:?} vs {:?}", i, a, b);
        assert!((a.energy - b.energy).abs() < 1e-13, "zone {}: {:?} vs {:?}", i, a, b);
    }
}

#[test]
fn guard_zones_are_current_after_each_step() {
    let mut solver = setup(Problem::Advection, 16);
    solver.advance_step(1e-3).unwrap();

    let u = solver.conserved();
    let lo = solver.grid().lo();
    let hi = solver.grid().hi();
    assert_eq!(u[lo - 1], u[hi]);
    assert_eq!(u[hi + 1], u[lo]);
    assert_eq!(solver.iteration(), 1);
    assert_eq!(solver.timestep(), Some(1e-3));
}
