use ndarray::Array1;

pub mod grid;
pub mod reconstruction;
pub mod root_finding;
pub mod solution_states;




// ============================================================================
pub trait IntoAndFromF64Array3 {
	fn into_f64_array3(self) -> [f64; 3];
	fn from_f64_array3(a: [f64; 3]) -> Self;
}




// ============================================================================
/**
 * Extract the scalar field at slot `index` from an array of 3-component
 * records, e.g. the pressure out of an array of primitive states.
 */
pub fn component<T>(array: &Array1<T>, index: usize) -> Array1<f64> where T: IntoAndFromF64Array3 + Copy
{
    array.mapv(|a| a.into_f64_array3()[index])
}
