use std::str::FromStr;
use ndarray::{Array1, ArrayView1, Zip};




// ============================================================================
/**
 * A piecewise-parabolic profile over an array of cells, stored as the values
 * the parabola takes at the left (`minus`) and right (`plus`) faces of each
 * cell together with its curvature coefficient `a6` (Colella & Woodward 1984,
 * eq. 1.5). Piecewise-linear and piecewise-constant profiles are parabolas
 * with zero curvature.
 */
#[derive(Clone, Debug)]
pub struct Parabola {
    pub minus: Array1<f64>,
    pub plus: Array1<f64>,
    pub curvature: Array1<f64>,
}




// ============================================================================
impl Parabola {
    pub fn constant(values: ArrayView1<f64>) -> Self {
        Parabola {
            minus: values.to_owned(),
            plus: values.to_owned(),
            curvature: Array1::zeros(values.len()),
        }
    }

    pub fn from_edges(values: ArrayView1<f64>, minus: Array1<f64>, plus: Array1<f64>) -> Self {
        let curvature = Zip::from(&values)
            .and(&minus)
            .and(&plus)
            .map_collect(|&a, &am, &ap| 6.0 * a - 3.0 * (am + ap));
        Parabola{minus, plus, curvature}
    }

    /**
     * Average the profile over the part of each cell swept by a
     * characteristic in one timestep. `courant` holds the signed Courant
     * number `lambda dt / dx` of the characteristic in each cell. Returns the
     * averages adjacent to the left face and to the right face. A
     * characteristic moving away from a face does not reach it, and the
     * face value is returned unchanged.
     */
    pub fn integrate(&self, courant: ArrayView1<f64>) -> (Array1<f64>, Array1<f64>) {
        let im = Zip::from(&courant)
            .and(&self.minus)
            .and(&self.plus)
            .and(&self.curvature)
            .map_collect(|&nu, &am, &ap, &a6| {
                if nu >= 0.0 {
                    am
                } else {
                    let sigma = nu.abs();
                    am + 0.5 * sigma * (ap - am + (1.0 - 2.0 / 3.0 * sigma) * a6)
                }
            });
        let ip = Zip::from(&courant)
            .and(&self.minus)
            .and(&self.plus)
            .and(&self.curvature)
            .map_collect(|&nu, &am, &ap, &a6| {
                if nu <= 0.0 {
                    ap
                } else {
                    ap - 0.5 * nu * (ap - am - (1.0 - 2.0 / 3.0 * nu) * a6)
                }
            });
        (im, ip)
    }
}




// ============================================================================
/**
 * A spatial reconstruction of cell-averaged data. Cells closer to either end
 * of the array than the stencil reaches are given constant profiles; callers
 * are expected to only use the profiles of cells at least
 * `stencil_half_width()` zones from the ends.
 */
pub trait Reconstruction {
    fn stencil_half_width(&self) -> usize;
    fn profile(&self, values: ArrayView1<f64>) -> Parabola;
}




// ============================================================================
#[derive(Copy, Clone, Debug, Default)]
pub struct PiecewiseConstant;

#[derive(Copy, Clone, Debug)]
pub struct PiecewiseLinear {
    pub theta: f64,
    pub limit: bool,
}

#[derive(Copy, Clone, Debug)]
pub struct PiecewiseParabolic {
    pub limit: bool,
}

impl Default for PiecewiseLinear {
    fn default() -> Self { PiecewiseLinear{theta: 2.0, limit: true} }
}

impl Default for PiecewiseParabolic {
    fn default() -> Self { PiecewiseParabolic{limit: true} }
}




// ============================================================================
impl Reconstruction for PiecewiseConstant {
    fn stencil_half_width(&self) -> usize {
        0
    }

    fn profile(&self, values: ArrayView1<f64>) -> Parabola {
        Parabola::constant(values)
    }
}




// ============================================================================
pub fn plm_gradient(theta: f64, yl: f64, y0: f64, yr: f64) -> f64 {

    fn sgn(a: f64) -> f64 {
        1.0f64.copysign(a)
    }

    fn minabs(a: f64, b: f64, c: f64) -> f64 {
        a.abs().min(b.abs()).min(c.abs())
    }

    let a = (y0 - yl) * theta;
    let b = (yr - yl) * 0.5;
    let c = (yr - y0) * theta;
    0.25 * (sgn(a) + sgn(b)).abs() * (sgn(a) + sgn(c)) * minabs(a, b, c)
}

impl Reconstruction for PiecewiseLinear {
    fn stencil_half_width(&self) -> usize {
        1
    }

    fn profile(&self, a: ArrayView1<f64>) -> Parabola {
        let n = a.len();
        let mut minus = a.to_owned();
        let mut plus = a.to_owned();

        for i in 1..n.saturating_sub(1) {
            let da = if self.limit {
                plm_gradient(self.theta, a[i - 1], a[i], a[i + 1])
            } else {
                0.5 * (a[i + 1] - a[i - 1])
            };
            minus[i] = a[i] - 0.5 * da;
            plus[i] = a[i] + 0.5 * da;
        }
        Parabola::from_edges(a, minus, plus)
    }
}




// ============================================================================
fn mc_slope(al: f64, a0: f64, ar: f64) -> f64 {
    let dl = a0 - al;
    let dr = ar - a0;
    let dc = 0.5 * (ar - al);

    if dl * dr > 0.0 {
        dc.signum() * dc.abs().min(2.0 * dl.abs()).min(2.0 * dr.abs())
    } else {
        0.0
    }
}

/**
 * Reset the face values so the parabola introduces no new extrema (Colella &
 * Woodward 1984, eq. 1.10).
 */
fn monotonize(a: f64, am: f64, ap: f64) -> (f64, f64) {
    if (ap - a) * (a - am) <= 0.0 {
        return (a, a)
    }
    let da = ap - am;
    let a6 = 6.0 * (a - 0.5 * (am + ap));

    if da * a6 > da * da {
        (3.0 * a - 2.0 * ap, ap)
    } else if -da * da > da * a6 {
        (am, 3.0 * a - 2.0 * am)
    } else {
        (am, ap)
    }
}

impl Reconstruction for PiecewiseParabolic {
    fn stencil_half_width(&self) -> usize {
        2
    }

    fn profile(&self, a: ArrayView1<f64>) -> Parabola {
        let n = a.len();

        if n < 5 {
            return Parabola::constant(a)
        }

        let mut da = Array1::<f64>::zeros(n);

        for i in 1..n - 1 {
            da[i] = if self.limit {
                mc_slope(a[i - 1], a[i], a[i + 1])
            } else {
                0.5 * (a[i + 1] - a[i - 1])
            };
        }

        // face[i] is the fourth-order value at the right face of cell i
        let mut face = Array1::<f64>::zeros(n);

        for i in 1..n - 2 {
            face[i] = 0.5 * (a[i] + a[i + 1]) - (da[i + 1] - da[i]) / 6.0;
        }

        let mut minus = a.to_owned();
        let mut plus = a.to_owned();

        for i in 2..n - 2 {
            let (am, ap) = if self.limit {
                monotonize(a[i], face[i - 1], face[i])
            } else {
                (face[i - 1], face[i])
            };
            minus[i] = am;
            plus[i] = ap;
        }
        Parabola::from_edges(a, minus, plus)
    }
}




// ============================================================================
/**
 * Names the reconstruction schemes that can be selected at runtime.
 */
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ReconstructionKind {
    Pcm,
    Plm,
    Ppm,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[error("unknown reconstruction '{0}' (expected pcm, plm, or ppm)")]
pub struct UnknownReconstruction(pub String);

impl FromStr for ReconstructionKind {
    type Err = UnknownReconstruction;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pcm" => Ok(ReconstructionKind::Pcm),
            "plm" => Ok(ReconstructionKind::Plm),
            "ppm" => Ok(ReconstructionKind::Ppm),
            _ => Err(UnknownReconstruction(s.into())),
        }
    }
}

impl ReconstructionKind {
    pub fn build(self, limit: bool) -> Box<dyn Reconstruction> {
        match self {
            ReconstructionKind::Pcm => Box::new(PiecewiseConstant),
            ReconstructionKind::Plm => Box::new(PiecewiseLinear{theta: 2.0, limit}),
            ReconstructionKind::Ppm => Box::new(PiecewiseParabolic{limit}),
        }
    }
}
