use crate::{
    distro::{MdfKind, MicrofacetDistribution, SlopeSampling, SmithMasking},
    roughness::{projected_roughness, stretched_roughness},
    sampling::{pdf_visible_normals, sample_visible_normals},
};
use base::{
    math::{cos_theta2, sin_theta, sqr, tan_theta2, DVec2, DVec3, SQRT_PI},
    special::{erf, erf_inv},
};
use std::f64::consts::PI;

/// Beckmann microfacet distribution function.
///
/// Beckmann distribution is based on the Gaussian distribution of microfacet
/// slopes. If σ is the RMS slope of the microfacets, then the alpha
/// parameter of the Beckmann distribution is given by: $\alpha = \sqrt{2}
/// \sigma$.
///
/// $$ D(\mathbf{h}) = \frac{\exp\left(-\tan^2\theta_h \left(
/// \frac{\cos^2\phi_h}{\alpha_x^2} + \frac{\sin^2\phi_h}{\alpha_y^2}
/// \right)\right)}{\pi \alpha_x \alpha_y \cos^4\theta_h} $$
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct BeckmannDistribution;

/// Slope sampling switches to the normal incidence closed form above
/// `1 - SLOPE_EPSILON`; the same value bounds the Newton residual.
const SLOPE_EPSILON: f64 = 1.0e-6;

impl MicrofacetDistribution for BeckmannDistribution {
    fn kind(&self) -> MdfKind { MdfKind::Beckmann }

    fn d(&self, h: DVec3, alpha_x: f64, alpha_y: f64, _gamma: f64) -> f64 {
        let cos_theta = h.y;
        if cos_theta == 0.0 {
            return 0.0;
        }

        let cos_theta4 = sqr(cos_theta2(&h));
        let tan_theta2 = tan_theta2(&h);
        let a = stretched_roughness(h, sin_theta(&h), alpha_x, alpha_y);
        (-tan_theta2 * a).exp() / (PI * alpha_x * alpha_y * cos_theta4)
    }

    fn g(
        &self,
        incoming: DVec3,
        outgoing: DVec3,
        _h: DVec3,
        alpha_x: f64,
        alpha_y: f64,
        gamma: f64,
    ) -> f64 {
        self.smith_g(incoming, outgoing, alpha_x, alpha_y, gamma)
    }

    fn g1(&self, v: DVec3, _m: DVec3, alpha_x: f64, alpha_y: f64, gamma: f64) -> f64 {
        self.smith_g1(v, alpha_x, alpha_y, gamma)
    }

    fn sample(&self, v: DVec3, s: DVec3, alpha_x: f64, alpha_y: f64, gamma: f64) -> DVec3 {
        sample_visible_normals(self, v, s, alpha_x, alpha_y, gamma)
    }

    fn pdf(&self, v: DVec3, h: DVec3, alpha_x: f64, alpha_y: f64, gamma: f64) -> f64 {
        pdf_visible_normals(self, v, h, alpha_x, alpha_y, gamma)
    }
}

impl SmithMasking for BeckmannDistribution {
    /// Rational fit of the Beckmann Λ, valid up to `a = 1.6`; beyond that the
    /// masking is negligible. The fit dips slightly below zero right before
    /// its cutoff, so the result is clamped.
    fn lambda(&self, v: DVec3, alpha_x: f64, alpha_y: f64, _gamma: f64) -> f64 {
        let cos_theta = v.y;
        if cos_theta == 0.0 {
            return 0.0;
        }

        let sin_theta = sin_theta(&v);
        // Normal incidence, no masking.
        if sin_theta == 0.0 {
            return 0.0;
        }

        let alpha = projected_roughness(v, sin_theta, alpha_x, alpha_y);
        let tan_theta = (sin_theta / cos_theta).abs();
        let a = 1.0 / (alpha * tan_theta);

        if a < 1.6 {
            let a2 = sqr(a);
            ((1.0 - 1.259 * a + 0.396 * a2) / (3.535 * a + 2.181 * a2)).max(0.0)
        } else {
            0.0
        }
    }
}

impl SlopeSampling for BeckmannDistribution {
    /// Samples the slope marginal of a unit-roughness Beckmann surface.
    ///
    /// Slope y is Gaussian and inverted exactly. Slope x solves an implicit
    /// equation: a coarse root from `exp(-erf⁻¹(x)²) ≈ 1 - x²` is refined by
    /// two Newton steps, skipped when the coarse root is already within
    /// tolerance.
    fn sample11(&self, cos_theta: f64, s: DVec3, _gamma: f64) -> DVec2 {
        let slope_y = erf_inv(2.0 * s.y - 1.0);

        if cos_theta > 1.0 - SLOPE_EPSILON {
            return DVec2::new(erf_inv(2.0 * s.x - 1.0), slope_y);
        }

        let ct = cos_theta.max(SLOPE_EPSILON);
        let tan_theta = (1.0 - sqr(ct)).sqrt() / ct;
        let cot_theta = 1.0 / tan_theta;

        // Solve y = 1 + b + K (1 - b²) for the coarse root.
        let c = erf(cot_theta);
        let k = tan_theta / SQRT_PI;
        let y_approx = s.x * (1.0 + c + k * (1.0 - c * c));
        let y_exact = s.x * (1.0 + c + k * (-sqr(cot_theta)).exp());
        let mut b = (0.5 - (k * (k - y_approx + 1.0) + 0.25).sqrt()) / k;

        let mut inv_erf = erf_inv(b);
        let mut residual = 1.0 + b + k * (-sqr(inv_erf)).exp() - y_exact;

        let slope_x = if residual.abs() > SLOPE_EPSILON {
            b -= residual / (1.0 - inv_erf * tan_theta);
            inv_erf = erf_inv(b);
            residual = 1.0 + b + k * (-sqr(inv_erf)).exp() - y_exact;
            b -= residual / (1.0 - inv_erf * tan_theta);
            erf_inv(b)
        } else {
            inv_erf
        };

        DVec2::new(slope_x, slope_y)
    }
}
