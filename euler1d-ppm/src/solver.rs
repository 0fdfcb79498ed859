use ndarray::{s, Array1, Array3, Zip};
use tracing::{debug, info};

use lib_euler1d::{Conserved, Eigen, Eigensystem, ExactRiemannSolver, Primitive, PrimitiveEigensystem, RiemannSolver};
use lib_hydro_algorithms::{component, IntoAndFromF64Array3};
use lib_hydro_algorithms::grid::Grid;
use lib_hydro_algorithms::reconstruction::{Parabola, PiecewiseParabolic, Reconstruction};
use lib_hydro_algorithms::solution_states::SolutionStateArray1;

use crate::error::{EulerError, StepError};




// ============================================================================
pub type SolutionState = SolutionStateArray1<Conserved>;

/// Sign of the sound speed in the characteristic speed of each wave family.
const WAVE_SIGNS: [f64; 3] = [-1.0, 0.0, 1.0];




// ============================================================================
/**
 * The pluggable parts of the Godunov scheme. The default is limited PPM with
 * the exact Riemann solver.
 */
pub struct Scheme {
    pub reconstruction: Box<dyn Reconstruction>,
    pub riemann_solver: Box<dyn RiemannSolver>,
    pub eigensystem: Box<dyn Eigensystem>,
}

impl Default for Scheme {
    fn default() -> Self {
        Scheme {
            reconstruction: Box::new(PiecewiseParabolic::default()),
            riemann_solver: Box::new(ExactRiemannSolver::default()),
            eigensystem: Box::new(PrimitiveEigensystem),
        }
    }
}




// ============================================================================
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct StepReport {
    pub iteration: u64,
    pub time: f64,
    pub dt: f64,
}




// ============================================================================
/**
 * A PPM Godunov solver for the 1D Euler equations of a gamma-law gas. The
 * conserved state lives on every cell of the grid; guard zones are refilled
 * from the boundary condition after every update, so the stored state is
 * always ready for the next step.
 */
pub struct Euler {
    grid: Grid,
    scheme: Scheme,
    cfl: f64,
    gamma_law_index: f64,
    state: SolutionState,
    dt: Option<f64>,
}




// ============================================================================
impl Euler {
    pub fn new<F>(grid: Grid, cfl: f64, gamma_law_index: f64, scheme: Scheme, initial_condition: F) -> Result<Euler, EulerError>
    where
        F: Fn(f64) -> Primitive
    {
        if !(cfl > 0.0) {
            return Err(EulerError::InvalidCfl(cfl));
        }
        if !(gamma_law_index > 1.0) {
            return Err(EulerError::InvalidGamma(gamma_law_index));
        }
        grid.require_guard_zones(scheme.reconstruction.stencil_half_width() + 1)?;

        let x = grid.cell_centers();
        let mut conserved = grid.scratch_array(Conserved::default());

        for i in grid.interior() {
            let primitive = initial_condition(x[i])
                .validate()
                .map_err(|source| EulerError::InitialCondition{cell: i, source})?;
            conserved[i] = primitive.to_conserved(gamma_law_index);
        }
        grid.fill_boundaries(&mut conserved);

        Ok(Euler {
            grid,
            scheme,
            cfl,
            gamma_law_index,
            state: SolutionState::new(conserved),
            dt: None,
        })
    }

    pub fn grid(&self) -> &Grid { &self.grid }
    pub fn cfl(&self) -> f64 { self.cfl }
    pub fn gamma_law_index(&self) -> f64 { self.gamma_law_index }
    pub fn state(&self) -> &SolutionState { &self.state }
    pub fn conserved(&self) -> &Array1<Conserved> { &self.state.conserved }
    pub fn time(&self) -> f64 { self.state.time }
    pub fn iteration(&self) -> u64 { self.state.iteration }

    /// The most recent timestep, or `None` before the first step.
    pub fn timestep(&self) -> Option<f64> { self.dt }

    /**
     * Conserved totals over the interior: mass, momentum, and energy.
     */
    pub fn totals(&self) -> Conserved {
        self.state.integrated(self.grid.interior(), self.grid.dx())
    }

    /**
     * Primitive states on every cell, guard zones included. Fails on the
     * first cell whose density or pressure is not positive.
     */
    pub fn primitive(&self) -> Result<Array1<Primitive>, EulerError> {
        let g = self.gamma_law_index;
        self.state.conserved
            .iter()
            .enumerate()
            .map(|(i, u)| u.try_to_primitive(g).map_err(|source| EulerError::InvalidState{cell: i, source}))
            .collect::<Result<Vec<_>, _>>()
            .map(Array1::from)
    }

    pub fn interior_primitive(&self) -> Result<Array1<Primitive>, EulerError> {
        Ok(self.primitive()?.slice(s![self.grid.interior()]).to_owned())
    }

    /**
     * The CFL-limited timestep: `cfl * dx / max(|u| + c)` over every zone,
     * guard zones included.
     */
    pub fn estimate_timestep(&self, primitive: &Array1<Primitive>) -> f64 {
        let g = self.gamma_law_index;
        let max_speed = primitive
            .iter()
            .map(|q| q.max_signal_speed(g))
            .fold(0.0, f64::max);
        self.cfl * self.grid.dx() / max_speed
    }

    /**
     * Time-centered primitive states on either side of each interface, found
     * by tracing the parabolic profiles of the primitive variables along the
     * characteristics. Interface `f` separates zones `f - 1` and `f`;
     * `q_left[f]` is the state arriving from zone `f - 1` and `q_right[f]` the
     * state arriving from zone `f`. Only interfaces `lo..=hi + 1` are set;
     * elsewhere both arrays hold the zone-centered primitive state.
     */
    pub fn interface_states(&self, primitive: &Array1<Primitive>, dt: f64) -> (Array1<Primitive>, Array1<Primitive>) {
        let g = self.gamma_law_index;
        let dtdx = dt / self.grid.dx();
        let n = primitive.len();
        let cs = primitive.mapv(|q| q.sound_speed(g));

        let parabolas: Vec<Parabola> = (0..3)
            .map(|field| self.scheme.reconstruction.profile(component(primitive, field).view()))
            .collect();

        // Profile averages over the domains of dependence, indexed by
        // (zone, wave, primitive field).
        let mut im = Array3::<f64>::zeros((n, 3, 3));
        let mut ip = Array3::<f64>::zeros((n, 3, 3));

        for (wave, &sign) in WAVE_SIGNS.iter().enumerate() {
            let courant = Zip::from(primitive)
                .and(&cs)
                .map_collect(|&q, &c| (q.velocity + sign * c) * dtdx);

            for (field, parabola) in parabolas.iter().enumerate() {
                let (minus, plus) = parabola.integrate(courant.view());
                im.slice_mut(s![.., wave, field]).assign(&minus);
                ip.slice_mut(s![.., wave, field]).assign(&plus);
            }
        }

        let mut minus_edge = primitive.clone();
        let mut plus_edge = primitive.clone();

        for i in self.grid.lo() - 1..self.grid.hi() + 2 {
            let eigen = self.scheme.eigensystem.decompose(primitive[i], g);
            let (qm, qp) = trace_edges(&eigen, wave_averages(&im, i), wave_averages(&ip, i));
            minus_edge[i] = qm;
            plus_edge[i] = qp;
        }

        let mut q_left = primitive.clone();
        let mut q_right = primitive.clone();

        for f in self.grid.lo()..self.grid.hi() + 2 {
            q_left[f] = plus_edge[f - 1];
            q_right[f] = minus_edge[f];
        }
        (q_left, q_right)
    }

    /**
     * Godunov fluxes through interfaces `lo..=hi + 1`; other entries are
     * zero.
     */
    pub fn compute_fluxes(&self, q_left: &Array1<Primitive>, q_right: &Array1<Primitive>) -> Result<Array1<Conserved>, EulerError> {
        let mut flux = self.grid.scratch_array(Conserved::default());

        for f in self.grid.lo()..self.grid.hi() + 2 {
            flux[f] = self.scheme.riemann_solver
                .flux(q_left[f], q_right[f], self.gamma_law_index)
                .map_err(|source| EulerError::Riemann{interface: f, source})?;
        }
        Ok(flux)
    }

    /**
     * Advance the solution by exactly `dt`, regardless of the CFL condition.
     */
    pub fn advance_step(&mut self, dt: f64) -> Result<(), EulerError> {
        let primitive = self.primitive()?;
        self.update(&primitive, dt)
    }

    fn update(&mut self, primitive: &Array1<Primitive>, dt: f64) -> Result<(), EulerError> {
        let (q_left, q_right) = self.interface_states(primitive, dt);
        let flux = self.compute_fluxes(&q_left, &q_right)?;
        let dtdx = dt / self.grid.dx();

        for i in self.grid.interior() {
            self.state.conserved[i] = self.state.conserved[i] + (flux[i] - flux[i + 1]) * dtdx;
        }
        self.grid.fill_boundaries(&mut self.state.conserved);

        self.state.time += dt;
        self.state.iteration += 1;
        self.dt = Some(dt);
        Ok(())
    }

    /**
     * Take one CFL-limited step, shortened if needed so the time does not
     * pass `tmax`. A shortened step lands on `tmax` exactly.
     */
    pub fn step(&mut self, tmax: f64) -> Result<StepReport, EulerError> {
        self.grid.fill_boundaries(&mut self.state.conserved);

        let primitive = self.primitive()?;
        let dt = self.estimate_timestep(&primitive);
        let clipped = self.time() + dt > tmax;
        let dt = if clipped { tmax - self.time() } else { dt };

        self.update(&primitive, dt)?;

        if clipped {
            self.state.time = tmax;
        }
        debug!(iteration = self.iteration(), time = self.time(), dt, "step");

        Ok(StepReport {
            iteration: self.iteration(),
            time: self.time(),
            dt,
        })
    }

    pub fn evolve(&mut self, tmax: f64) -> Result<(), StepError> {
        self.evolve_with(tmax, |_| {})
    }

    /**
     * Step until the time reaches `tmax`, calling `on_step` after each
     * completed step. The first failing step ends the run.
     */
    pub fn evolve_with<F>(&mut self, tmax: f64, mut on_step: F) -> Result<(), StepError>
    where
        F: FnMut(&StepReport)
    {
        info!(num_zones = self.grid.num_zones(), time = self.time(), tmax, "evolving");

        while self.time() < tmax {
            let report = self.step(tmax).map_err(|source| StepError {
                iteration: self.iteration() + 1,
                time: self.time(),
                source,
            })?;
            on_step(&report);
        }
        info!(iteration = self.iteration(), time = self.time(), "reached the end time");
        Ok(())
    }
}




// ============================================================================
fn wave_averages(buffer: &Array3<f64>, zone: usize) -> [Primitive; 3] {
    std::array::from_fn(|wave| {
        Primitive::from_f64_array3([
            buffer[[zone, wave, 0]],
            buffer[[zone, wave, 1]],
            buffer[[zone, wave, 2]],
        ])
    })
}




// ============================================================================
/**
 * Characteristic tracing in a single zone. `im[k]` and `ip[k]` are the
 * averages of the parabolic profiles over the domain of dependence of wave
 * `k` at the zone's left and right edge. The reference states are those of
 * the fastest wave reaching each edge; every other wave moving toward that
 * edge corrects the reference by its projected amplitude. Waves with zero
 * speed reach neither edge. Returns the minus (left edge) and plus (right
 * edge) states.
 */
pub fn trace_edges(eigen: &Eigen, im: [Primitive; 3], ip: [Primitive; 3]) -> (Primitive, Primitive) {
    let q_ref_minus = im[0];
    let q_ref_plus = ip[2];
    let mut q_minus = q_ref_minus;
    let mut q_plus = q_ref_plus;

    for wave in 0..3 {
        if eigen.speeds[wave] > 0.0 {
            let beta = eigen.project(wave, q_ref_plus - ip[wave]);
            q_plus = q_plus - beta * eigen.right_vector(wave);
        }
        if eigen.speeds[wave] < 0.0 {
            let beta = eigen.project(wave, q_ref_minus - im[wave]);
            q_minus = q_minus - beta * eigen.right_vector(wave);
        }
    }
    (q_minus, q_plus)
}




// ============================================================================
#[cfg(test)]
mod tests {
    use super::*;
    use lib_hydro_algorithms::grid::BoundaryCondition;

    const GAMMA: f64 = 1.4;

    fn hand_built_eigen(entropy_speed: f64) -> Eigen {
        let mut eigen = PrimitiveEigensystem.decompose(Primitive::new(1.0, 0.0, 1.0), GAMMA);
        eigen.speeds[1] = entropy_speed;
        eigen
    }

    #[test]
    fn stationary_wave_does_not_reach_either_edge() {
        let base = Primitive::new(1.0, 0.0, 1.0);
        let bump = Primitive::new(0.1, 0.0, 0.0);
        let im = [base, base - bump, base];
        let ip = [base, base + bump, base];

        let (q_minus, q_plus) = trace_edges(&hand_built_eigen(0.0), im, ip);
        assert_eq!(q_minus, base);
        assert_eq!(q_plus, base);

        let (_, q_plus) = trace_edges(&hand_built_eigen(1e-12), im, ip);
        assert!((q_plus.density - 1.1).abs() < 1e-14, "{:?}", q_plus);
        assert_eq!(q_plus.pressure, base.pressure);

        let (q_minus, _) = trace_edges(&hand_built_eigen(-1e-12), im, ip);
        assert!((q_minus.density - 0.9).abs() < 1e-14, "{:?}", q_minus);
    }

    #[test]
    fn tracing_a_uniform_state_returns_it() {
        let q = Primitive::new(0.7, -0.3, 2.0);
        let eigen = PrimitiveEigensystem.decompose(q, GAMMA);
        assert_eq!(trace_edges(&eigen, [q; 3], [q; 3]), (q, q));
    }

    #[test]
    fn interface_states_flank_each_interface() {
        let grid = Grid::new(16, 4, (0.0, 1.0), BoundaryCondition::Outflow).unwrap();
        let solver = Euler::new(grid, 0.5, GAMMA, Scheme::default(), |x| {
            if x < 0.5 { Primitive::new(1.0, 0.0, 1.0) } else { Primitive::new(0.125, 0.0, 0.1) }
        }).unwrap();
        let primitive = solver.primitive().unwrap();
        let (q_left, q_right) = solver.interface_states(&primitive, 0.0);

        // with dt = 0 the states are the limited edge values of the parabolas
        let lo = solver.grid().lo();
        assert_eq!(q_left[lo], primitive[lo - 1]);
        assert_eq!(q_right[lo], primitive[lo]);

        let mid = lo + 8;
        assert_eq!(q_left[mid], Primitive::new(1.0, 0.0, 1.0));
        assert_eq!(q_right[mid], Primitive::new(0.125, 0.0, 0.1));
    }

    #[test]
    fn invalid_parameters_are_rejected() {
        let grid = Grid::new(16, 4, (0.0, 1.0), BoundaryCondition::Periodic).unwrap();
        let uniform = |_| Primitive::new(1.0, 0.0, 1.0);
        assert!(matches!(Euler::new(grid.clone(), 0.0, GAMMA, Scheme::default(), uniform), Err(EulerError::InvalidCfl(_))));
        assert!(matches!(Euler::new(grid.clone(), 0.5, 1.0, Scheme::default(), uniform), Err(EulerError::InvalidGamma(_))));
        assert!(Euler::new(grid, 0.5, GAMMA, Scheme::default(), uniform).unwrap().timestep().is_none());
    }
}
