use std::f64::consts::PI;
use std::str::FromStr;

use lib_euler1d::{ExactRiemannSolver, Primitive, RiemannError};
use lib_hydro_algorithms::grid::BoundaryCondition;




// ============================================================================
/**
 * Initial conditions on the unit interval, each with its natural boundary
 * condition.
 */
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Problem {
    /// Sod's shock tube: a diaphragm at x = 1/2 separating gas at rest.
    Sod,
    /// A sinusoidal density wave carried at unit velocity in pressure balance.
    Advection,
    /// A constant state moving at unit velocity.
    Uniform,
    /// A small-amplitude right-going sound wave.
    Acoustic,
    /// Gas streaming into the left wall of a closed box.
    Wall,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[error("unknown problem '{0}' (expected sod, advection, uniform, acoustic, or wall)")]
pub struct UnknownProblem(pub String);

impl FromStr for Problem {
    type Err = UnknownProblem;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sod"       => Ok(Problem::Sod),
            "advection" => Ok(Problem::Advection),
            "uniform"   => Ok(Problem::Uniform),
            "acoustic"  => Ok(Problem::Acoustic),
            "wall"      => Ok(Problem::Wall),
            _ => Err(UnknownProblem(s.into())),
        }
    }
}




// ============================================================================
const ACOUSTIC_AMPLITUDE: f64 = 1e-3;

impl Problem {
    /// Every problem is posed on the unit interval.
    pub const DOMAIN: (f64, f64) = (0.0, 1.0);

    pub fn boundary(self) -> BoundaryCondition {
        match self {
            Problem::Sod => BoundaryCondition::Outflow,
            Problem::Advection | Problem::Uniform | Problem::Acoustic => BoundaryCondition::Periodic,
            Problem::Wall => BoundaryCondition::Reflecting,
        }
    }

    pub fn primitive(self, x: f64, gamma_law_index: f64) -> Primitive {
        match self {
            Problem::Sod => {
                if x < 0.5 {
                    Primitive::new(1.0, 0.0, 1.0)
                } else {
                    Primitive::new(0.125, 0.0, 0.1)
                }
            }
            Problem::Advection => Primitive::new(1.0 + 0.2 * (2.0 * PI * x).sin(), 1.0, 1.0),
            Problem::Uniform => Primitive::new(1.0, 1.0, 1.0),
            Problem::Acoustic => {
                // background sound speed is 1
                let d = ACOUSTIC_AMPLITUDE * (2.0 * PI * x).sin();
                Primitive::new(1.0 + d, d, 1.0 / gamma_law_index + d)
            }
            Problem::Wall => Primitive::new(1.0, -1.0, 1.0),
        }
    }

    /**
     * The analytic solution at position `x` and time `t`, if the problem has
     * one. The acoustic solution is that of the linearized equations.
     */
    pub fn exact_solution(self, x: f64, t: f64, gamma_law_index: f64) -> Result<Option<Primitive>, RiemannError> {
        match self {
            Problem::Sod if t > 0.0 => {
                let star = ExactRiemannSolver::default().solve(
                    self.primitive(0.0, gamma_law_index),
                    self.primitive(1.0, gamma_law_index),
                    gamma_law_index)?;
                Ok(Some(star.sample((x - 0.5) / t)))
            }
            Problem::Sod | Problem::Uniform => Ok(Some(self.primitive(x, gamma_law_index))),
            Problem::Advection | Problem::Acoustic => Ok(Some(self.primitive(x - t, gamma_law_index))),
            Problem::Wall => Ok(None),
        }
    }
}
