use lib_hydro_algorithms::IntoAndFromF64Array3;
use crate::Primitive;




// ============================================================================
/**
 * Eigen-decomposition of the primitive-variable Jacobian at a single state.
 * Row `k` of `left` and `right` is the left and right eigenvector of the
 * wave with speed `speeds[k]`; waves are ordered slowest to fastest. The
 * two sets are normalized so that `left[j] . right[k] = delta_jk`.
 */
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Eigen {
    pub speeds: [f64; 3],
    pub left: [[f64; 3]; 3],
    pub right: [[f64; 3]; 3],
}

impl Eigen {

    /**
     * Amplitude of wave `k` in the primitive-variable jump `dq`.
     */
    pub fn project(&self, k: usize, dq: Primitive) -> f64 {
        let l = self.left[k];
        let d = dq.into_f64_array3();
        l[0] * d[0] + l[1] * d[1] + l[2] * d[2]
    }

    pub fn right_vector(&self, k: usize) -> Primitive {
        Primitive::from_f64_array3(self.right[k])
    }
}




// ============================================================================
/**
 * Provides the local characteristic structure used for tracing interface
 * states.
 */
pub trait Eigensystem {
    fn decompose(&self, primitive: Primitive, gamma_law_index: f64) -> Eigen;
}




// ============================================================================
/**
 * Eigensystem of the 1D Euler equations in the primitive variables
 * (rho, u, p) for a gamma-law gas. The waves are the left-going acoustic
 * wave, the entropy wave, and the right-going acoustic wave.
 */
#[derive(Copy, Clone, Debug, Default)]
pub struct PrimitiveEigensystem;

impl Eigensystem for PrimitiveEigensystem {
    fn decompose(&self, primitive: Primitive, gamma_law_index: f64) -> Eigen {
        let rho = primitive.density;
        let u = primitive.velocity;
        let cs = primitive.sound_speed(gamma_law_index);
        let cs2 = cs * cs;

        Eigen {
            speeds: [u - cs, u, u + cs],
            left: [
                [0.0, -0.5 * rho / cs, 0.5 / cs2],
                [1.0,  0.0,           -1.0 / cs2],
                [0.0,  0.5 * rho / cs, 0.5 / cs2],
            ],
            right: [
                [1.0, -cs / rho, cs2],
                [1.0,  0.0,      0.0],
                [1.0,  cs / rho, cs2],
            ],
        }
    }
}




// ============================================================================
#[cfg(test)]
mod tests {
    use super::*;

    const GAMMA: f64 = 1.4;

    fn states() -> Vec<Primitive> {
        vec![
            Primitive::new(1.0, 0.0, 1.0),
            Primitive::new(0.125, -2.5, 0.1),
            Primitive::new(13.0, 7.0, 0.02),
        ]
    }

    #[test]
    fn eigenvectors_are_biorthonormal() {
        for q in states() {
            let e = PrimitiveEigensystem.decompose(q, GAMMA);
            for j in 0..3 {
                for k in 0..3 {
                    let dot = e.project(j, e.right_vector(k));
                    let expected = if j == k { 1.0 } else { 0.0 };
                    assert!((dot - expected).abs() < 1e-12, "l{} . r{} = {} for {:?}", j, k, dot, q);
                }
            }
        }
    }

    #[test]
    fn wave_speeds_are_strictly_ordered() {
        for q in states() {
            let e = PrimitiveEigensystem.decompose(q, GAMMA);
            let cs = q.sound_speed(GAMMA);
            assert!(e.speeds[0] < e.speeds[1] && e.speeds[1] < e.speeds[2]);
            assert_eq!(e.speeds, [q.velocity - cs, q.velocity, q.velocity + cs]);
        }
    }

    #[test]
    fn decomposition_reproduces_the_jacobian() {
        for q in states() {
            let e = PrimitiveEigensystem.decompose(q, GAMMA);
            let a = [
                [q.velocity, q.density, 0.0],
                [0.0, q.velocity, 1.0 / q.density],
                [0.0, GAMMA * q.pressure, q.velocity],
            ];
            // A_ij = sum_k r_k[i] lambda_k l_k[j]
            for i in 0..3 {
                for j in 0..3 {
                    let aij: f64 = (0..3).map(|k| e.right[k][i] * e.speeds[k] * e.left[k][j]).sum();
                    assert!((aij - a[i][j]).abs() < 1e-10 * (1.0 + a[i][j].abs()), "A[{}][{}] = {} vs {}", i, j, aij, a[i][j]);
                }
            }
        }
    }
}
