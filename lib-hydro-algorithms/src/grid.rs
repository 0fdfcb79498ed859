use std::ops::Range;
use std::str::FromStr;
use ndarray::{Array, Array1};




// ============================================================================
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum GridError {
    #[error("the grid needs at least one interior zone")]
    NoZones,

    #[error("the domain [{0}, {1}] has no positive extent")]
    EmptyDomain(f64, f64),

    #[error("{num_guard} guard zones were given but the stencil needs {required}")]
    TooFewGuardZones { num_guard: usize, required: usize },

    #[error("reflecting boundaries need at least as many interior zones ({num_zones}) as guard zones ({num_guard})")]
    TooFewZonesToReflect { num_zones: usize, num_guard: usize },

    #[error("unknown boundary condition '{0}' (expected outflow, periodic, or reflecting)")]
    UnknownBoundary(String),
}




// ============================================================================
/**
 * Implemented by records that have a mirror image across a wall, e.g. a
 * fluid state whose normal velocity flips sign.
 */
pub trait Reflect {
    fn reflect(self) -> Self;
}




// ============================================================================
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BoundaryCondition {
    Outflow,
    Periodic,
    Reflecting,
}

impl FromStr for BoundaryCondition {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "outflow"    => Ok(BoundaryCondition::Outflow),
            "periodic"   => Ok(BoundaryCondition::Periodic),
            "reflecting" => Ok(BoundaryCondition::Reflecting),
            _ => Err(GridError::UnknownBoundary(s.into())),
        }
    }
}




// ============================================================================
/**
 * A uniform 1D finite-volume grid with `num_guard` guard zones on either side
 * of `num_zones` interior zones. Arrays on the grid are indexed from the
 * first left guard zone, so the interior runs from `lo()` to `hi()`
 * inclusive.
 */
#[derive(Clone, Debug)]
pub struct Grid {
    num_zones: usize,
    num_guard: usize,
    x_min: f64,
    x_max: f64,
    boundary: BoundaryCondition,
}




// ============================================================================
impl Grid {
    pub fn new(num_zones: usize, num_guard: usize, domain: (f64, f64), boundary: BoundaryCondition) -> Result<Grid, GridError> {
        let (x_min, x_max) = domain;

        if num_zones == 0 {
            return Err(GridError::NoZones)
        }
        if !(x_max > x_min) {
            return Err(GridError::EmptyDomain(x_min, x_max))
        }
        if boundary == BoundaryCondition::Reflecting && num_zones < num_guard {
            return Err(GridError::TooFewZonesToReflect{num_zones, num_guard})
        }
        Ok(Grid{num_zones, num_guard, x_min, x_max, boundary})
    }

    pub fn num_zones(&self) -> usize { self.num_zones }
    pub fn num_guard(&self) -> usize { self.num_guard }
    pub fn num_cells(&self) -> usize { self.num_zones + 2 * self.num_guard }
    pub fn lo       (&self) -> usize { self.num_guard }
    pub fn hi       (&self) -> usize { self.num_guard + self.num_zones - 1 }
    pub fn interior (&self) -> Range<usize> { self.lo()..self.hi() + 1 }
    pub fn boundary (&self) -> BoundaryCondition { self.boundary }
    pub fn domain   (&self) -> (f64, f64) { (self.x_min, self.x_max) }

    pub fn dx(&self) -> f64 {
        (self.x_max - self.x_min) / self.num_zones as f64
    }

    /**
     * Fail unless there are at least `required` guard zones. Solvers call
     * this at construction with the reach of their stencil.
     */
    pub fn require_guard_zones(&self, required: usize) -> Result<(), GridError> {
        if self.num_guard < required {
            Err(GridError::TooFewGuardZones{num_guard: self.num_guard, required})
        } else {
            Ok(())
        }
    }

    /**
     * Cell centers of every zone on the grid, guard zones included.
     */
    pub fn cell_centers(&self) -> Array1<f64> {
        let dx = self.dx();
        let ng = self.num_guard as f64;
        Array::from_shape_fn(self.num_cells(), |i| self.x_min + (i as f64 - ng + 0.5) * dx)
    }

    pub fn interior_cell_centers(&self) -> Array1<f64> {
        let vertices = Array::<f64, _>::linspace(self.x_min, self.x_max, self.num_zones + 1);
        (0..self.num_zones).map(|i| 0.5 * (vertices[i] + vertices[i + 1])).collect()
    }

    pub fn scratch_array<T: Clone>(&self, fill: T) -> Array1<T> {
        Array1::from_elem(self.num_cells(), fill)
    }

    /**
     * Overwrite the guard zones of `array` according to the boundary
     * condition. Interior zones are not touched.
     */
    pub fn fill_boundaries<T: Reflect + Copy>(&self, array: &mut Array1<T>) {
        let lo = self.lo();
        let hi = self.hi();
        let nz = self.num_zones;

        for i in (0..lo).chain(hi + 1..self.num_cells()) {
            array[i] = match self.boundary {
                BoundaryCondition::Outflow => {
                    array[i.clamp(lo, hi)]
                }
                BoundaryCondition::Periodic => {
                    array[lo + (i as i64 - lo as i64).rem_euclid(nz as i64) as usize]
                }
                BoundaryCondition::Reflecting => {
                    let mirror = if i < lo { 2 * lo - 1 - i } else { 2 * hi + 1 - i };
                    array[mirror].reflect()
                }
            };
        }
    }
}
