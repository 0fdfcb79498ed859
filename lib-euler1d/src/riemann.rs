use lib_hydro_algorithms::root_finding::{Brent, RootFinderError};
use crate::{Conserved, Primitive, PrimitiveError};




// ============================================================================
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum RiemannError {
    #[error("non-physical input state {state:?}")]
    InvalidState {
        state: Primitive,
        #[source]
        source: PrimitiveError,
    },

    #[error("unable to solve for the star region: left state {left:?}, right state {right:?}")]
    StarRegion {
        left: Primitive,
        right: Primitive,
        #[source]
        source: RootFinderError,
    },
}

fn checked(state: Primitive) -> Result<Primitive, RiemannError> {
    state.validate().map_err(|source| RiemannError::InvalidState{state, source})
}




// ============================================================================
/**
 * Computes the Godunov flux through a face separating two constant primitive
 * states.
 */
pub trait RiemannSolver {
    fn flux(&self, left: Primitive, right: Primitive, gamma_law_index: f64) -> Result<Conserved, RiemannError>;
}




// ============================================================================
pub fn riemann_hlle(pl: Primitive, pr: Primitive, gamma_law_index: f64) -> Conserved {
    let ul = pl.to_conserved(gamma_law_index);
    let ur = pr.to_conserved(gamma_law_index);
    let fl = pl.flux_vector(gamma_law_index);
    let fr = pr.flux_vector(gamma_law_index);

    let (alm, alp) = pl.outer_wavespeeds(gamma_law_index);
    let (arm, arp) = pr.outer_wavespeeds(gamma_law_index);
    let ap = alp.max(arp).max(0.0);
    let am = alm.min(arm).min(0.0);

    (ap * fl - am * fr - (ul - ur) * ap * am) / (ap - am)
}

#[derive(Copy, Clone, Debug, Default)]
pub struct HlleRiemannSolver;

impl RiemannSolver for HlleRiemannSolver {
    fn flux(&self, left: Primitive, right: Primitive, gamma_law_index: f64) -> Result<Conserved, RiemannError> {
        Ok(riemann_hlle(checked(left)?, checked(right)?, gamma_law_index))
    }
}




// ============================================================================
/**
 * Exact solver for the Riemann problem of a gamma-law gas (Toro, ch. 4). The
 * star-region pressure is found with Brent's method on the bracket
 * `[p_min, p_max]`; states whose star pressure falls outside it (including
 * those that would generate a vacuum) are reported as errors.
 */
#[derive(Copy, Clone, Debug)]
pub struct ExactRiemannSolver {
    pub p_min: f64,
    pub p_max: f64,
    pub root_finder: Brent,
}

impl Default for ExactRiemannSolver {
    fn default() -> Self {
        ExactRiemannSolver {
            p_min: 1e-3,
            p_max: 1e3,
            root_finder: Brent::default(),
        }
    }
}




// ============================================================================
/**
 * The solution of a Riemann problem: the two initial states together with
 * the pressure and velocity of the star region between the outer waves.
 */
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct StarState {
    pub left: Primitive,
    pub right: Primitive,
    pub gamma_law_index: f64,
    pub pressure: f64,
    pub velocity: f64,
}




// ============================================================================
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Side {
    Left,
    Right,
}

impl Side {
    fn sign(self) -> f64 {
        match self {
            Side::Left  => -1.0,
            Side::Right =>  1.0,
        }
    }
}

/**
 * Velocity behind a wave of the given side that connects `state` to a star
 * region at pressure `p`: a rarefaction if `p` is below the state pressure,
 * and a shock otherwise.
 */
fn wave_curve_velocity(state: Primitive, p: f64, side: Side, gamma: f64) -> f64 {
    let s = -side.sign();
    let c = state.sound_speed(gamma);

    if p < state.pressure {
        state.velocity + s * (2.0 * c / (gamma - 1.0)) * (1.0 - (p / state.pressure).powf((gamma - 1.0) / (2.0 * gamma)))
    } else {
        let beta = (gamma + 1.0) / (gamma - 1.0);
        state.velocity + s * (2.0 * c / (2.0 * gamma * (gamma - 1.0)).sqrt()) * (1.0 - p / state.pressure) / (1.0 + beta * p / state.pressure).sqrt()
    }
}




// ============================================================================
impl ExactRiemannSolver {
    pub fn solve(&self, left: Primitive, right: Primitive, gamma_law_index: f64) -> Result<StarState, RiemannError> {
        let left = checked(left)?;
        let right = checked(right)?;
        let g = gamma_law_index;

        let pressure = self.root_finder
            .solve(|p| wave_curve_velocity(left, p, Side::Left, g) - wave_curve_velocity(right, p, Side::Right, g), self.p_min, self.p_max)
            .map_err(|source| RiemannError::StarRegion{left, right, source})?;

        Ok(StarState {
            left,
            right,
            gamma_law_index,
            pressure,
            velocity: wave_curve_velocity(left, pressure, Side::Left, g),
        })
    }
}

impl RiemannSolver for ExactRiemannSolver {
    fn flux(&self, left: Primitive, right: Primitive, gamma_law_index: f64) -> Result<Conserved, RiemannError> {
        Ok(self.solve(left, right, gamma_law_index)?.sample(0.0).flux_vector(gamma_law_index))
    }
}




// ============================================================================
impl StarState {

    /**
     * The self-similar solution at `xi = x / t`, measured from the initial
     * discontinuity. Godunov fluxes use `xi = 0`.
     */
    pub fn sample(&self, xi: f64) -> Primitive {
        if xi > self.velocity {
            self.sample_outer(xi, self.right, Side::Right)
        } else {
            self.sample_outer(xi, self.left, Side::Left)
        }
    }

    fn sample_outer(&self, xi: f64, state: Primitive, side: Side) -> Primitive {
        if self.pressure > state.pressure {
            self.shock_solution(xi, state, side)
        } else {
            self.rarefaction_solution(xi, state, side)
        }
    }

    fn shock_solution(&self, xi: f64, state: Primitive, side: Side) -> Primitive {
        let g = self.gamma_law_index;
        let sgn = side.sign();
        let p_ratio = self.pressure / state.pressure;
        let c = state.sound_speed(g);
        let shock_speed = state.velocity + sgn * c * (0.5 * (g + 1.0) / g * p_ratio + 0.5 * (g - 1.0) / g).sqrt();

        if sgn * (xi - shock_speed) > 0.0 {
            state
        } else {
            let gam_fac = (g - 1.0) / (g + 1.0);
            let rho_star = state.density * (p_ratio + gam_fac) / (gam_fac * p_ratio + 1.0);
            Primitive::new(rho_star, self.velocity, self.pressure)
        }
    }

    fn rarefaction_solution(&self, xi: f64, state: Primitive, side: Side) -> Primitive {
        let g = self.gamma_law_index;
        let sgn = side.sign();
        let p_ratio = self.pressure / state.pressure;
        let c = state.sound_speed(g);
        let c_star = c * p_ratio.powf((g - 1.0) / (2.0 * g));

        let lambda_head = state.velocity + sgn * c;
        let lambda_tail = self.velocity + sgn * c_star;

        if sgn * (lambda_head - xi) < 0.0 {
            state
        } else if sgn * (lambda_tail - xi) > 0.0 {
            Primitive::new(state.density * p_ratio.powf(1.0 / g), self.velocity, self.pressure)
        } else {
            let gam_fac = (g - 1.0) / (g + 1.0);
            let base = 2.0 / (g + 1.0) - sgn * gam_fac * (state.velocity - xi) / c;
            Primitive::new(
                state.density * base.powf(2.0 / (g - 1.0)),
                2.0 / (g + 1.0) * (-sgn * c + 0.5 * (g - 1.0) * state.velocity + xi),
                state.pressure * base.powf(2.0 * g / (g - 1.0)))
        }
    }
}
