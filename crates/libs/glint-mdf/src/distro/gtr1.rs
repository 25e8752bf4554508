use crate::{
    distro::{MdfKind, MicrofacetDistribution, SmithMasking},
    sampling::sample_phi,
};
use base::math::{cos_theta2, sin_theta, sqr, unit_vector, DVec3};
use std::f64::consts::PI;

/// Generalized Trowbridge-Reitz distribution with γ = 1, also known as the
/// Berry distribution.
///
/// $$ D(\mathbf{h}) = \frac{\alpha^2 - 1}{\pi \ln(\alpha^2)} \frac{1}{1 +
/// (\alpha^2 - 1) \cos^2\theta_h} $$
///
/// Isotropic, driven by `alpha_x` only. The normalization degenerates at
/// α = 1, which callers must avoid. Sampling inverts the polar CDF of
/// `D cos θ` directly, so the density is `D(h) h.y` for any view direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Gtr1Distribution;

impl MicrofacetDistribution for Gtr1Distribution {
    fn kind(&self) -> MdfKind { MdfKind::Gtr1 }

    fn d(&self, h: DVec3, alpha_x: f64, _alpha_y: f64, _gamma: f64) -> f64 {
        let alpha_x2 = sqr(alpha_x);
        let cos_theta2 = cos_theta2(&h);
        let a = (alpha_x2 - 1.0) / (PI * alpha_x2.ln());
        let b = 1.0 / (1.0 + (alpha_x2 - 1.0) * cos_theta2);
        a * b
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

    fn sample(&self, _v: DVec3, s: DVec3, alpha_x: f64, _alpha_y: f64, _gamma: f64) -> DVec3 {
        let alpha_x2 = sqr(alpha_x);
        let a = 1.0 - alpha_x2.powf(1.0 - s.x);
        let cos_theta = (a / (1.0 - alpha_x2)).sqrt();
        let sin_theta = (1.0 - sqr(cos_theta)).max(0.0).sqrt();
        let (cos_phi, sin_phi) = sample_phi(s.y);
        unit_vector(cos_theta, sin_theta, cos_phi, sin_phi)
    }

    fn pdf(&self, _v: DVec3, h: DVec3, alpha_x: f64, alpha_y: f64, gamma: f64) -> f64 {
        self.d(h, alpha_x, alpha_y, gamma) * h.y
    }
}

impl SmithMasking for Gtr1Distribution {
    fn lambda(&self, v: DVec3, alpha_x: f64, _alpha_y: f64, _gamma: f64) -> f64 {
        let cos_theta = v.y;
        if cos_theta == 0.0 {
            return 0.0;
        }

        let cos_theta2 = cos_theta2(&v);
        let sin_theta = sin_theta(&v);
        // Normal incidence, no masking.
        if sin_theta == 0.0 {
            return 0.0;
        }

        let cot_theta2 = cos_theta2 / sqr(sin_theta);
        let cot_theta = cot_theta2.sqrt();
        let alpha2 = sqr(alpha_x);

        let a = (cot_theta2 + alpha2).sqrt();
        let b = (cot_theta2 + 1.0).sqrt();
        let c = (cot_theta + b).ln();
        let d = (cot_theta + a).ln();

        // Cancellation close to the normal leaves tiny negative values.
        ((a - b + cot_theta * (c - d)) / (cot_theta * alpha2.ln())).max(0.0)
    }
}
