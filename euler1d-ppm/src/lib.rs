pub mod error;
pub mod output;
pub mod problems;
pub mod solver;

pub use error::{EulerError, StepError};
pub use problems::{Problem, UnknownProblem};
pub use solver::{trace_edges, Euler, Scheme, SolutionState, StepReport};
