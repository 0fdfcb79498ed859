use euler1d_ppm::{Euler, EulerError, Scheme, StepError};
use lib_euler1d::{HlleRiemannSolver, Primitive, PrimitiveEigensystem, PrimitiveError, RiemannError};
use lib_hydro_algorithms::grid::{BoundaryCondition, Grid, GridError};
use lib_hydro_algorithms::reconstruction::ReconstructionKind;
use lib_hydro_algorithms::root_finding::RootFinderError;

const GAMMA: f64 = 1.4;

fn piecewise_constant() -> Scheme {
    Scheme {
        reconstruction: ReconstructionKind::Pcm.build(false),
        ..Scheme::default()
    }
}

fn diverging(x: f64) -> Primitive {
    if x < 0.5 {
        Primitive::new(1.0, -20.0, 1.0)
    } else {
        Primitive::new(1.0, 20.0, 1.0)
    }
}

#[test]
fn too_few_guard_zones_for_the_stencil() {
    let grid = Grid::new(16, 2, (0.0, 1.0), BoundaryCondition::Outflow).unwrap();
    let result = Euler::new(grid, 0.8, GAMMA, Scheme::default(), |_| Primitive::new(1.0, 0.0, 1.0));

    match result {
        Err(EulerError::Grid(GridError::TooFewGuardZones{num_guard, required})) => {
            assert_eq!(num_guard, 2);
            assert_eq!(required, 3);
        }
        Err(other) => panic!("unexpected error {:?}", other),
        Ok(_) => panic!("two guard zones were accepted for PPM"),
    }

    // a single guard zone is enough without reconstruction
    let grid = Grid::new(16, 1, (0.0, 1.0), BoundaryCondition::Outflow).unwrap();
    assert!(Euler::new(grid, 0.8, GAMMA, piecewise_constant(), |_| Primitive::new(1.0, 0.0, 1.0)).is_ok());
}

#[test]
fn non_physical_initial_data_is_located() {
    let grid = Grid::new(16, 4, (0.0, 1.0), BoundaryCondition::Outflow).unwrap();
    let result = Euler::new(grid, 0.8, GAMMA, Scheme::default(), |x| {
        if x < 0.5 { Primitive::new(1.0, 0.0, 1.0) } else { Primitive::new(-1.0, 0.0, 1.0) }
    });

    match result {
        Err(EulerError::InitialCondition{cell, source: PrimitiveError::NonPositiveDensity(d)}) => {
            assert_eq!(cell, 12);
            assert_eq!(d, -1.0);
        }
        Err(other) => panic!("unexpected error {:?}", other),
        Ok(_) => panic!("negative density was accepted"),
    }
}

#[test]
fn vacuum_at_an_interface_fails_the_step() {
    let grid = Grid::new(8, 4, (0.0, 1.0), BoundaryCondition::Outflow).unwrap();
    let mut solver = Euler::new(grid, 0.8, GAMMA, piecewise_constant(), diverging).unwrap();

    match solver.step(1.0) {
        Err(EulerError::Riemann{interface, source: RiemannError::StarRegion{source: RootFinderError::NoBracket{..}, ..}}) => {
            assert_eq!(interface, 8);
        }
        other => panic!("unexpected result {:?}", other.map(|r| r.iteration)),
    }

    // nothing was updated
    assert_eq!(solver.iteration(), 0);
    assert_eq!(solver.time(), 0.0);
}

#[test]
fn evolve_reports_the_failing_step() {
    let grid = Grid::new(8, 4, (0.0, 1.0), BoundaryCondition::Outflow).unwrap();
    let mut solver = Euler::new(grid, 0.8, GAMMA, piecewise_constant(), diverging).unwrap();

    let StepError{iteration, time, source} = solver.evolve(0.1).unwrap_err();
    assert_eq!(iteration, 1);
    assert_eq!(time, 0.0);
    assert!(matches!(source, EulerError::Riemann{interface: 8, ..}));
}

#[test]
fn a_step_that_empties_a_zone_stops_the_next_one() {
    let grid = Grid::new(8, 4, (0.0, 1.0), BoundaryCondition::Outflow).unwrap();
    let scheme = Scheme {
        reconstruction: ReconstructionKind::Pcm.build(false),
        riemann_solver: Box::new(HlleRiemannSolver),
        eigensystem: Box::new(PrimitiveEigensystem),
    };
    let mut solver = Euler::new(grid, 0.8, GAMMA, scheme, |x| {
        if x < 0.5 { Primitive::new(1.0, -1.0, 0.01) } else { Primitive::new(1.0, 1.0, 0.01) }
    }).unwrap();

    // no mass crosses the center, one unit leaves through the outer faces of
    // zones 7 and 8, so an oversized step drives their density to -0.5
    let dt = 1.5 * solver.grid().dx();
    solver.advance_step(dt).unwrap();
    let after_first_step = solver.conserved().clone();
    assert!((after_first_step[7].density + 0.5).abs() < 1e-12, "{:?}", after_first_step[7]);

    let StepError{iteration, time, source} = solver.evolve(1.0).unwrap_err();
    assert_eq!(iteration, 2);
    assert_eq!(time, dt);

    match source {
        EulerError::InvalidState{cell, source: PrimitiveError::NonPositiveDensity(d)} => {
            assert_eq!(cell, 7);
            assert!(d < 0.0);
        }
        other => panic!("unexpected error {:?}", other),
    }

    // the failed step left the state alone
    assert_eq!(solver.iteration(), 1);
    assert_eq!(solver.time(), dt);
    assert_eq!(solver.conserved(), &after_first_step);
}
