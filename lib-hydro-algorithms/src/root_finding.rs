// ============================================================================
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum RootFinderError {
    #[error("f(a) = {fa:.4e} and f(b) = {fb:.4e} do not bracket a root on [{a:.4e}, {b:.4e}]")]
    NoBracket { a: f64, b: f64, fa: f64, fb: f64 },

    #[error("no convergence after {iterations} iterations (last estimate {estimate:.6e})")]
    MaxIterations { iterations: usize, estimate: f64 },
}




// ============================================================================
/**
 * Brent's method for a root of a scalar function on a bracketing interval.
 * Combines inverse quadratic interpolation and secant steps with bisection
 * as a fallback, so convergence is guaranteed once the root is bracketed.
 * The default tolerances match those of the common `brentq` implementations.
 */
#[derive(Copy, Clone, Debug)]
pub struct Brent {
    pub xtol: f64,
    pub rtol: f64,
    pub max_iterations: usize,
}

impl Default for Brent {
    fn default() -> Self {
        Brent {
            xtol: 2e-12,
            rtol: 4.0 * f64::EPSILON,
            max_iterations: 100,
        }
    }
}




// ============================================================================
impl Brent {
    pub fn solve<F>(&self, mut f: F, a: f64, b: f64) -> Result<f64, RootFinderError> where F: FnMut(f64) -> f64
    {
        let mut xpre = a;
        let mut xcur = b;
        let mut fpre = f(xpre);
        let mut fcur = f(xcur);

        if !fpre.is_finite() || !fcur.is_finite() || fpre * fcur > 0.0 {
            return Err(RootFinderError::NoBracket{a, b, fa: fpre, fb: fcur})
        }
        if fpre == 0.0 {
            return Ok(xpre)
        }
        if fcur == 0.0 {
            return Ok(xcur)
        }

        let mut xblk = 0.0;
        let mut fblk = 0.0;
        let mut spre = 0.0;
        let mut scur = 0.0;

        for _ in 0..self.max_iterations {
            if fpre != 0.0 && fcur != 0.0 && fpre.is_sign_negative() != fcur.is_sign_negative() {
                xblk = xpre;
                fblk = fpre;
                spre = xcur - xpre;
                scur = spre;
            }
            if fblk.abs() < fcur.abs() {
                xpre = xcur;
                xcur = xblk;
                xblk = xpre;
                fpre = fcur;
                fcur = fblk;
                fblk = fpre;
            }

            let delta = 0.5 * (self.xtol + self.rtol * xcur.abs());
            let sbis = 0.5 * (xblk - xcur);

            if fcur == 0.0 || sbis.abs() < delta {
                return Ok(xcur)
            }

            if spre.abs() > delta && fcur.abs() < fpre.abs() {
                let stry = if xpre == xblk {
                    -fcur * (xcur - xpre) / (fcur - fpre)
                } else {
                    let dpre = (fpre - fcur) / (xpre - xcur);
                    let dblk = (fblk - fcur) / (xblk - xcur);
                    -fcur * (fblk * dblk - fpre * dpre) / (dblk * dpre * (fblk - fpre))
                };
                if 2.0 * stry.abs() < spre.abs().min(3.0 * sbis.abs() - delta) {
                    spre = scur;
                    scur = stry;
                } else {
                    spre = sbis;
                    scur = sbis;
                }
            } else {
                spre = sbis;
                scur = sbis;
            }

            xpre = xcur;
            fpre = fcur;

            if scur.abs() > delta {
                xcur += scur;
            } else {
                xcur += if sbis > 0.0 { delta } else { -delta };
            }
            fcur = f(xcur);
        }
        Err(RootFinderError::MaxIterations{iterations: self.max_iterations, estimate: xcur})
    }
}




// ============================================================================
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_square_root_of_two() {
        let root = Brent::default().solve(|x| x * x - 2.0, 0.0, 2.0).unwrap();
        assert!((root - 2.0f64.sqrt()).abs() < 1e-11);
    }

    #[test]
    fn finds_roots_of_steep_functions() {
        let root = Brent::default().solve(|x: f64| (50.0 * (x - 0.3)).tanh(), -1.0, 5.0).unwrap();
        assert!((root - 0.3).abs() < 1e-10);

        let root = Brent::default().solve(|p: f64| 1.0 - p.powf(0.2), 1e-3, 1e3).unwrap();
        assert!((root - 1.0).abs() < 1e-10);
    }

    #[test]
    fn endpoint_roots_are_returned_immediately() {
        assert_eq!(Brent::default().solve(|x| x - 1.0, 1.0, 3.0), Ok(1.0));
        assert_eq!(Brent::default().solve(|x| x - 3.0, 1.0, 3.0), Ok(3.0));
    }

    #[test]
    fn unbracketed_roots_are_reported() {
        let result = Brent::default().solve(|x| x * x + 1.0, -1.0, 1.0);
        assert!(matches!(result, Err(RootFinderError::NoBracket{..})));

        let result = Brent::default().solve(|x: f64| x.sqrt() - 2.0, -1.0, 9.0);
        assert!(matches!(result, Err(RootFinderError::NoBracket{..})));
    }

    #[test]
    fn iteration_limit_is_reported() {
        let brent = Brent{max_iterations: 2, ..Brent::default()};
        let result = brent.solve(|x| x.powi(3) - x - 2.0, -10.0, 10.0);
        assert!(matches!(result, Err(RootFinderError::MaxIterations{iterations: 2, ..})));
    }
}
