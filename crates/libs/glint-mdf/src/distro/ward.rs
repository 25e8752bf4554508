use crate::{
    distro::{blinn::v_cavity_g1, MdfKind, MicrofacetDistribution},
    sampling::sample_phi,
};
use base::math::{cos_theta, sqr, tan_theta2, unit_vector, DVec3};
use std::f64::consts::PI;

/// Ward microfacet distribution function.
///
/// $$ D(\mathbf{h}) = \frac{\exp(-\tan^2\theta_h / \alpha^2)}{\pi \alpha^2
/// \cos^3\theta_h} $$
///
/// Isotropic, driven by `alpha_x` only. Unlike the other models it is
/// normalized without cosine weighting, and its density is `D` itself rather
/// than the distribution of visible normals. Masking follows the V-cavity
/// model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct WardDistribution;

impl MicrofacetDistribution for WardDistribution {
    fn kind(&self) -> MdfKind { MdfKind::Ward }

    fn d(&self, h: DVec3, alpha_x: f64, _alpha_y: f64, _gamma: f64) -> f64 {
        let cos_theta = cos_theta(&h);
        debug_assert!(cos_theta >= 0.0, "microfacet normal must face up, got {h}");

        if cos_theta == 0.0 {
            return 0.0;
        }

        let cos_theta3 = cos_theta * sqr(cos_theta);
        let tan_theta2 = tan_theta2(&h);
        let alpha_x2 = sqr(alpha_x);
        (-tan_theta2 / alpha_x2).exp() / (alpha_x2 * PI * cos_theta3)
    }

    fn g(
        &self,
        incoming: DVec3,
        outgoing: DVec3,
        h: DVec3,
        alpha_x: f64,
        alpha_y: f64,
        gamma: f64,
    ) -> f64 {
        self.g1(incoming, h, alpha_x, alpha_y, gamma)
            .min(self.g1(outgoing, h, alpha_x, alpha_y, gamma))
    }

    fn g1(&self, v: DVec3, m: DVec3, _alpha_x: f64, _alpha_y: f64, _gamma: f64) -> f64 {
        v_cavity_g1(v, m)
    }

    fn sample(&self, _v: DVec3, s: DVec3, alpha_x: f64, _alpha_y: f64, _gamma: f64) -> DVec3 {
        let tan_theta2 = sqr(alpha_x) * -(1.0 - s.x).ln();
        let cos_theta = 1.0 / (1.0 + tan_theta2).sqrt();
        let sin_theta = cos_theta * tan_theta2.sqrt();
        let (cos_phi, sin_phi) = sample_phi(s.y);
        unit_vector(cos_theta, sin_theta, cos_phi, sin_phi)
    }

    fn pdf(&self, _v: DVec3, h: DVec3, alpha_x: f64, alpha_y: f64, gamma: f64) -> f64 {
        self.d(h, alpha_x, alpha_y, gamma)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use base::math::sph_to_cart;

    #[test]
    fn d_at_normal_and_grazing() {
        let mdf = WardDistribution;
        assert_relative_eq!(mdf.d(DVec3::Y, 0.5, 0.5, 0.0), 1.0 / (0.25 * PI), epsilon = 1e-12);
        assert_eq!(mdf.d(DVec3::X, 0.5, 0.5, 0.0), 0.0);
    }

    #[test]
    fn pdf_ignores_view_direction() {
        let mdf = WardDistribution;
        let h = sph_to_cart(0.4, 1.0);
        let d = mdf.d(h, 0.3, 0.3, 0.0);
        assert_eq!(mdf.pdf(DVec3::Y, h, 0.3, 0.3, 0.0), d);
        assert_eq!(mdf.pdf(sph_to_cart(1.3, 2.5), h, 0.3, 0.3, 0.0), d);
    }

    #[test]
    fn sample_inverts_polar_cdf() {
        let mdf = WardDistribution;
        assert_eq!(mdf.sample(DVec3::Y, DVec3::ZERO, 0.4, 0.4, 0.0), DVec3::Y);

        // tan²θ = -α² ln(1 - s0).
        let s = DVec3::new(0.6, 0.25, 0.0);
        let h = mdf.sample(DVec3::Y, s, 0.4, 0.4, 0.0);
        let tan_theta2 = (1.0 - h.y * h.y) / (h.y * h.y);
        assert_relative_eq!(tan_theta2, -0.16 * 0.4f64.ln(), epsilon = 1e-12);
        assert_relative_eq!(h.length(), 1.0, epsilon = 1e-12);
        // φ = π/2 points along +Z.
        assert!(h.x.abs() < 1e-12 && h.z > 0.0);
    }
}
