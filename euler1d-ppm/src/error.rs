use lib_euler1d::{PrimitiveError, RiemannError};
use lib_hydro_algorithms::grid::GridError;




// ============================================================================
#[derive(thiserror::Error, Debug, Clone)]
pub enum EulerError {
    #[error(transparent)]
    Grid(#[from] GridError),

    #[error("the CFL number must be positive, got {0}")]
    InvalidCfl(f64),

    #[error("the gamma-law index must exceed 1, got {0}")]
    InvalidGamma(f64),

    #[error("non-physical initial condition in zone {cell}")]
    InitialCondition {
        cell: usize,
        #[source]
        source: PrimitiveError,
    },

    #[error("non-physical state in zone {cell}")]
    InvalidState {
        cell: usize,
        #[source]
        source: PrimitiveError,
    },

    #[error("Riemann solver failed at interface {interface}")]
    Riemann {
        interface: usize,
        #[source]
        source: RiemannError,
    },
}




// ============================================================================
/**
 * An error raised while advancing the solution, tagged with the iteration
 * that was being attempted and the time it started from.
 */
#[derive(thiserror::Error, Debug, Clone)]
#[error("step {iteration} failed at t = {time:.6}")]
pub struct StepError {
    pub iteration: u64,
    pub time: f64,
    #[source]
    pub source: EulerError,
}
