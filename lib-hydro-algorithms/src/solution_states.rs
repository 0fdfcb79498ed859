use core::ops::{Add, Mul, Range};
use ndarray::{s, Array1};




// ============================================================================
/**
 * The part of a simulation that persists between timesteps: the time, the
 * number of completed iterations, and the conserved field on every cell of
 * the grid (guard zones included).
 */
#[derive(Clone, Debug)]
pub struct SolutionStateArray1<T> {
    pub time: f64,
    pub iteration: u64,
    pub conserved: Array1<T>,
}




// ============================================================================
impl<T> SolutionStateArray1<T> {
    pub fn new(conserved: Array1<T>) -> Self {
        SolutionStateArray1{time: 0.0, iteration: 0, conserved}
    }
}

impl<T> SolutionStateArray1<T> where T: Copy + Default + Add<Output=T> + Mul<f64, Output=T> {

    /**
     * Volume integral of the conserved field over the cells in `cells`,
     * each of width `dx`.
     */
    pub fn integrated(&self, cells: Range<usize>, dx: f64) -> T {
        self.conserved
            .slice(s![cells])
            .iter()
            .fold(T::default(), |total, &u| total + u * dx)
    }
}
