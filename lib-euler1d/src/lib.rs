use lib_hydro_algorithms::IntoAndFromF64Array3;
use lib_hydro_algorithms::grid::Reflect;

pub mod eigen;
pub mod riemann;

pub use eigen::{Eigen, Eigensystem, PrimitiveEigensystem};
pub use riemann::{riemann_hlle, ExactRiemannSolver, HlleRiemannSolver, RiemannError, RiemannSolver, StarState};




// ============================================================================
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Conserved {
    pub density: f64,
    pub momentum: f64,
    pub energy: f64,
}

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Primitive {
    pub density: f64,
    pub velocity: f64,
    pub pressure: f64,
}




// ============================================================================
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum PrimitiveError {
    #[error("non-positive mass density: {0:.4e}")]
    NonPositiveDensity(f64),

    #[error("non-positive gas pressure: {0:.4e}")]
    NonPositivePressure(f64),

    #[error("non-finite velocity: {0:.4e}")]
    NonFiniteVelocity(f64),
}




// ============================================================================
impl std::ops::Add<Primitive> for Primitive { type Output = Self; fn add(self, u: Primitive) -> Primitive { Primitive::new(self.density + u.density, self.velocity + u.velocity, self.pressure + u.pressure) } }
impl std::ops::Sub<Primitive> for Primitive { type Output = Self; fn sub(self, u: Primitive) -> Primitive { Primitive::new(self.density - u.density, self.velocity - u.velocity, self.pressure - u.pressure) } }
impl std::ops::Mul<Primitive> for f64 { type Output = Primitive; fn mul(self, u: Primitive) -> Primitive { Primitive::new(self * u.density, self * u.velocity, self * u.pressure) } }
impl std::ops::Mul<f64> for Primitive { type Output = Primitive; fn mul(self, a: f64) -> Primitive { Primitive::new(self.density * a, self.velocity * a, self.pressure * a) } }
impl std::ops::Div<f64> for Primitive { type Output = Primitive; fn div(self, a: f64) -> Primitive { Primitive::new(self.density / a, self.velocity / a, self.pressure / a) } }




// ============================================================================
impl std::ops::Add<Conserved> for Conserved { type Output = Self; fn add(self, u: Conserved) -> Conserved { Conserved::new(self.density + u.density, self.momentum + u.momentum, self.energy + u.energy) } }
impl std::ops::Sub<Conserved> for Conserved { type Output = Self; fn sub(self, u: Conserved) -> Conserved { Conserved::new(self.density - u.density, self.momentum - u.momentum, self.energy - u.energy) } }
impl std::ops::Mul<Conserved> for f64 { type Output = Conserved; fn mul(self, u: Conserved) -> Conserved { Conserved::new(self * u.density, self * u.momentum, self * u.energy) } }
impl std::ops::Mul<f64> for Conserved { type Output = Conserved; fn mul(self, a: f64) -> Conserved { Conserved::new(self.density * a, self.momentum * a, self.energy * a) } }
impl std::ops::Div<f64> for Conserved { type Output = Conserved; fn div(self, a: f64) -> Conserved { Conserved::new(self.density / a, self.momentum / a, self.energy / a) } }




// ============================================================================
impl IntoAndFromF64Array3 for Primitive {
    fn into_f64_array3(self) -> [f64; 3] {
        [self.density, self.velocity, self.pressure]
    }
    fn from_f64_array3(a: [f64; 3]) -> Primitive {
        Primitive::new(a[0], a[1], a[2])
    }
}

impl IntoAndFromF64Array3 for Conserved {
    fn into_f64_array3(self) -> [f64; 3] {
        [self.density, self.momentum, self.energy]
    }
    fn from_f64_array3(a: [f64; 3]) -> Conserved {
        Conserved::new(a[0], a[1], a[2])
    }
}

impl Reflect for Primitive {
    fn reflect(self) -> Primitive {
        Primitive::new(self.density, -self.velocity, self.pressure)
    }
}

impl Reflect for Conserved {
    fn reflect(self) -> Conserved {
        Conserved::new(self.density, -self.momentum, self.energy)
    }
}




// ============================================================================
impl Conserved {
    pub fn new(density: f64, momentum: f64, energy: f64) -> Conserved {
        Conserved{density, momentum, energy}
    }

    pub fn kinetic_energy(self) -> f64 { self.momentum.powi(2) / (2.0 * self.density) }
    pub fn thermal_energy(self) -> f64 { self.energy - self.kinetic_energy() }

    /**
     * Recover the primitive state. No check is made that the result is
     * physical: zero density or negative thermal energy propagate as
     * non-finite or negative values. Use `try_to_primitive` to have those
     * reported.
     */
    pub fn to_primitive(self, gamma_law_index: f64) -> Primitive {
        let velocity = self.momentum / self.density;
        let rhoe = self.energy - 0.5 * self.density * velocity.powi(2);
        Primitive::new(
            self.density,
            velocity,
            rhoe * (gamma_law_index - 1.0))
    }

    pub fn try_to_primitive(self, gamma_law_index: f64) -> Result<Primitive, PrimitiveError> {
        self.to_primitive(gamma_law_index).validate()
    }
}




// ============================================================================
impl Primitive {
    pub fn new(density: f64, velocity: f64, pressure: f64) -> Primitive {
        Primitive{density, velocity, pressure}
    }

    pub fn momentum(self) -> f64 {
        self.density * self.velocity
    }

    pub fn total_energy(self, gamma_law_index: f64) -> f64 {
        let kinetic = 0.5 * self.density * self.velocity.powi(2);
        let thermal = self.pressure / (gamma_law_index - 1.0);
        kinetic + thermal
    }

    pub fn sound_speed_squared(self, gamma_law_index: f64) -> f64 {
        gamma_law_index * self.pressure / self.density
    }

    pub fn sound_speed(self, gamma_law_index: f64) -> f64 {
        self.sound_speed_squared(gamma_law_index).sqrt()
    }

    pub fn to_conserved(self, gamma_law_index: f64) -> Conserved {
        Conserved::new(
            self.density,
            self.momentum(),
            self.total_energy(gamma_law_index))
    }

    pub fn outer_wavespeeds(self, gamma_law_index: f64) -> (f64, f64) {
        let cs = self.sound_speed(gamma_law_index);
        let vn = self.velocity;
        (vn - cs, vn + cs)
    }

    pub fn max_signal_speed(self, gamma_law_index: f64) -> f64 {
        self.velocity.abs() + self.sound_speed(gamma_law_index)
    }

    /**
     * The Euler flux through a face on which this state sits:
     * (rho u, rho u^2 + p, (E + p) u).
     */
    pub fn flux_vector(self, gamma_law_index: f64) -> Conserved {
        let pg = self.pressure;
        let vn = self.velocity;
        let advective_term = vn * self.to_conserved(gamma_law_index);
        let pressure_term = Conserved::new(0.0, pg, pg * vn);
        advective_term + pressure_term
    }

    /**
     * Return the state if its density and pressure are positive and its
     * velocity is finite. NaN fails every check.
     */
    pub fn validate(self) -> Result<Primitive, PrimitiveError> {
        if !(self.density > 0.0) {
            Err(PrimitiveError::NonPositiveDensity(self.density))
        } else if !(self.pressure > 0.0) {
            Err(PrimitiveError::NonPositivePressure(self.pressure))
        } else if !self.velocity.is_finite() {
            Err(PrimitiveError::NonFiniteVelocity(self.velocity))
        } else {
            Ok(self)
        }
    }
}




// ============================================================================
#[cfg(test)]
mod tests {
    use super::*;

    const GAMMA: f64 = 1.4;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() <= 1e-13 * (1.0 + a.abs().max(b.abs()))
    }

    #[test]
    fn primitive_round_trips_through_conserved() {
        for &p in &[
            Primitive::new(1.0, 0.0, 1.0),
            Primitive::new(0.125, -3.2, 0.1),
            Primitive::new(1e-3, 40.0, 1e-5),
            Primitive::new(7.0, 1e-8, 250.0),
        ] {
            let q = p.to_conserved(GAMMA).try_to_primitive(GAMMA).unwrap();
            assert!(close(q.density, p.density), "{:?} -> {:?}", p, q);
            assert!(close(q.velocity, p.velocity), "{:?} -> {:?}", p, q);
            assert!((q.pressure - p.pressure).abs() <= 1e-10 * (1.0 + p.momentum().powi(2) / p.density), "{:?} -> {:?}", p, q);
        }
    }

    #[test]
    fn conversion_of_non_physical_states_is_reported() {
        let negative_pressure = Conserved::new(1.0, 2.0, 1.0);
        assert!(matches!(negative_pressure.try_to_primitive(GAMMA), Err(PrimitiveError::NonPositivePressure(_))));

        let zero_density = Conserved::new(0.0, 0.0, 1.0);
        assert!(matches!(zero_density.try_to_primitive(GAMMA), Err(PrimitiveError::NonPositiveDensity(_))));

        let nan = Conserved::new(f64::NAN, 0.0, 1.0);
        assert!(nan.try_to_primitive(GAMMA).is_err());

        // the raw conversion lets the bad value through
        assert!(negative_pressure.to_primitive(GAMMA).pressure < 0.0);
    }

    #[test]
    fn flux_vector_has_the_euler_form() {
        let p = Primitive::new(0.5, 2.0, 3.0);
        let f = p.flux_vector(GAMMA);
        assert!(close(f.density, 1.0));
        assert!(close(f.momentum, 0.5 * 4.0 + 3.0));
        assert!(close(f.energy, (0.5 * 0.5 * 4.0 + 3.0 / 0.4 + 3.0) * 2.0));
    }

    #[test]
    fn reflection_flips_only_the_normal_components() {
        let p = Primitive::new(1.0, 2.0, 3.0).reflect();
        assert_eq!(p, Primitive::new(1.0, -2.0, 3.0));
        let u = Conserved::new(1.0, 2.0, 3.0).reflect();
        assert_eq!(u, Conserved::new(1.0, -2.0, 3.0));
    }

    #[test]
    fn array_slots_follow_the_fixed_order() {
        let p = Primitive::new(1.0, 2.0, 3.0);
        assert_eq!(p.into_f64_array3(), [1.0, 2.0, 3.0]);
        assert_eq!(Primitive::from_f64_array3([1.0, 2.0, 3.0]), p);
        assert_eq!(Conserved::new(4.0, 5.0, 6.0).into_f64_array3(), [4.0, 5.0, 6.0]);
    }
}
