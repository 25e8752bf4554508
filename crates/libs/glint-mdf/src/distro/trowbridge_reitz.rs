use crate::{
    distro::{MdfKind, MicrofacetDistribution, SlopeSampling, SmithMasking},
    roughness::{projected_roughness, stretched_roughness},
    sampling::{pdf_visible_normals, sample_visible_normals},
};
use base::math::{cos_theta2, sin_theta, sqr, tan_theta2, DVec2, DVec3, INV_PI, TWO_PI};
use std::f64::consts::PI;

/// Smallest cosine handed to the slope inversion; views in the tangent plane
/// are sampled as if they were this close to it.
const MIN_SLOPE_COS_THETA: f64 = 1.0e-6;

/// Trowbridge-Reitz(GGX) microfacet distribution function.
///
/// $$ D(\mathbf{h}) = \frac{1}{\pi \alpha_x \alpha_y \cos^4\theta_h
/// \left(1 + \tan^2\theta_h \left(\frac{\cos^2\phi_h}{\alpha_x^2} +
/// \frac{\sin^2\phi_h}{\alpha_y^2}\right)\right)^2} $$
///
/// where $\alpha_x$ and $\alpha_y$ are the roughness parameters of the
/// microfacet distribution function along the two tangent axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TrowbridgeReitzDistribution;

/// Alias under the name the distribution is commonly known by.
pub type GgxDistribution = TrowbridgeReitzDistribution;

impl MicrofacetDistribution for TrowbridgeReitzDistribution {
    fn kind(&self) -> MdfKind { MdfKind::Ggx }

    fn d(&self, h: DVec3, alpha_x: f64, alpha_y: f64, _gamma: f64) -> f64 {
        let cos_theta = h.y;
        if cos_theta == 0.0 {
            return sqr(alpha_x) * INV_PI;
        }

        let cos_theta4 = sqr(cos_theta2(&h));
        let a = stretched_roughness(h, sin_theta(&h), alpha_x, alpha_y);
        1.0 / (PI * alpha_x * alpha_y * cos_theta4 * sqr(1.0 + tan_theta2(&h) * a))
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

impl SmithMasking for TrowbridgeReitzDistribution {
    fn lambda(&self, v: DVec3, alpha_x: f64, alpha_y: f64, _gamma: f64) -> f64 {
        let cos_theta = v.y;
        if cos_theta == 0.0 {
            return 0.0;
        }

        let alpha = projected_roughness(v, sin_theta(&v), alpha_x, alpha_y);
        ((1.0 + sqr(alpha) * tan_theta2(&v)).sqrt() - 1.0) * 0.5
    }
}

impl SlopeSampling for TrowbridgeReitzDistribution {
    /// Exact inversion of the GGX slope marginal, after Heitz and d'Eon,
    /// "Importance Sampling Microfacet-Based BSDFs using the Distribution of
    /// Visible Normals".
    fn sample11(&self, cos_theta: f64, s: DVec3, _gamma: f64) -> DVec2 {
        let sin_theta = (1.0 - sqr(cos_theta)).max(0.0).sqrt();

        // Normal incidence: the slope distribution is radially symmetric.
        if sin_theta < 1.0e-4 {
            let r = (s.x / (1.0 - s.x)).sqrt();
            let (sin_phi, cos_phi) = (TWO_PI * s.y).sin_cos();
            return DVec2::new(r * cos_phi, r * sin_phi);
        }

        let tan_theta = sin_theta / cos_theta.max(MIN_SLOPE_COS_THETA);
        let tan_theta2 = sqr(tan_theta);
        let cot_theta = 1.0 / tan_theta;
        let g1 = 2.0 / (1.0 + (1.0 + tan_theta2).sqrt());

        // Slope x.
        let a = 2.0 * s.x / g1 - 1.0;
        let a2 = sqr(a);
        let rcp_a2_minus_one = (1.0 / (a2 - 1.0)).min(1.0e10);
        let b = tan_theta;
        let b2 = sqr(b);
        let d = (b2 * sqr(rcp_a2_minus_one) - (a2 - b2) * rcp_a2_minus_one)
            .max(0.0)
            .sqrt();
        let slope_x_1 = b * rcp_a2_minus_one - d;
        let slope_x_2 = b * rcp_a2_minus_one + d;
        let slope_x = if a < 0.0 || slope_x_2 > cot_theta {
            slope_x_1
        } else {
            slope_x_2
        };

        // Slope y.
        let u = s.y;
        let z = (u * (u * (u * 0.27385 - 0.73369) + 0.46341))
            / (u * (u * (u * 0.093073 + 0.309420) - 1.0) + 0.597999);
        let sign = if s.z < 0.5 { 1.0 } else { -1.0 };
        let slope_y = sign * z * (1.0 + sqr(slope_x)).sqrt();

        DVec2::new(slope_x, slope_y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use base::math::sph_to_cart;

    #[test]
    fn d_at_normal() {
        let mdf = GgxDistribution::default();
        assert_relative_eq!(mdf.d(DVec3::Y, 0.1, 0.1, 0.0), 31.830_988_618_379_067, epsilon = 1e-9);
        assert_relative_eq!(mdf.d(DVec3::Y, 0.1, 0.1, 0.0), 1.0 / (PI * 0.01), epsilon = 1e-9);
    }

    #[test]
    fn d_at_grazing_is_finite() {
        let mdf = TrowbridgeReitzDistribution;
        assert_relative_eq!(mdf.d(DVec3::X, 0.5, 0.5, 0.0), 0.25 * INV_PI);
        assert!(mdf.d(sph_to_cart(1.5707, 0.3), 0.5, 0.2, 0.0).is_finite());
    }

    #[test]
    fn lambda_closed_form() {
        let mdf = TrowbridgeReitzDistribution;
        assert_eq!(mdf.lambda(DVec3::Y, 0.3, 0.3, 0.0), 0.0);
        assert_eq!(mdf.lambda(DVec3::Y, 0.3, 0.8, 0.0), 0.0);
        assert_eq!(mdf.lambda(DVec3::X, 0.3, 0.3, 0.0), 0.0);
        // tan θ = 1, α = 1: Λ = (√2 - 1) / 2.
        let v = sph_to_cart(std::f64::consts::FRAC_PI_4, 0.7);
        let expected = (2f64.sqrt() - 1.0) * 0.5;
        assert_relative_eq!(mdf.lambda(v, 1.0, 1.0, 0.0), expected, epsilon = 1e-12);
        assert_relative_eq!(mdf.g1(v, DVec3::Y, 1.0, 1.0, 0.0), 1.0 / (1.0 + expected));
    }

    #[test]
    fn anisotropic_lambda_uses_projected_roughness() {
        let mdf = TrowbridgeReitzDistribution;
        let along_x = sph_to_cart(1.0, 0.0);
        let along_z = sph_to_cart(1.0, std::f64::consts::FRAC_PI_2);
        assert_relative_eq!(
            mdf.lambda(along_x, 0.2, 0.6, 0.0),
            mdf.lambda(along_x, 0.2, 0.2, 0.0),
            epsilon = 1e-12
        );
        assert_relative_eq!(
            mdf.lambda(along_z, 0.2, 0.6, 0.0),
            mdf.lambda(along_z, 0.6, 0.6, 0.0),
            epsilon = 1e-12
        );
    }

    #[test]
    fn slope_at_normal_incidence_samples_a_disk() {
        let mdf = TrowbridgeReitzDistribution;
        // r = √(s0 / (1 - s0)) = 1, φ = 2π s1.
        let slope = mdf.sample11(1.0, DVec3::new(0.5, 0.25, 0.0), 0.0);
        assert_relative_eq!(slope, DVec2::new(0.0, 1.0), epsilon = 1e-12);
        let slope = mdf.sample11(1.0, DVec3::new(0.5, 0.5, 0.0), 0.0);
        assert_relative_eq!(slope, DVec2::new(-1.0, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn slope_y_sign_follows_third_sample() {
        let mdf = TrowbridgeReitzDistribution;
        let up = mdf.sample11(0.6, DVec3::new(0.3, 0.7, 0.2), 0.0);
        let down = mdf.sample11(0.6, DVec3::new(0.3, 0.7, 0.8), 0.0);
        assert_eq!(up.x, down.x);
        assert!(up.y > 0.0);
        assert_eq!(up.y, -down.y);
    }

    #[test]
    fn slopes_are_finite() {
        let mdf = TrowbridgeReitzDistribution;
        for cos_theta in [0.0, 1.0e-4, 0.05, 0.3, 0.7, 0.99, 0.999_999] {
            for i in 0..20 {
                let u = i as f64 / 20.0;
                let slope = mdf.sample11(cos_theta, DVec3::new(u, u, 0.5), 0.0);
                assert!(slope.is_finite(), "cos_theta = {cos_theta}, u = {u}");
            }
        }
    }

    #[test]
    fn sampling_from_the_tangent_plane_is_finite() {
        let mdf = TrowbridgeReitzDistribution;
        for sx in [0.0, 0.3, 0.9] {
            for (ax, ay) in [(0.3, 0.3), (0.3, 0.7)] {
                let h = mdf.sample(DVec3::X, DVec3::new(sx, 0.4, 0.2), ax, ay, 2.0);
                assert!(h.is_finite(), "s0 = {sx}: {h}");
                assert_relative_eq!(h.length(), 1.0, epsilon = 1e-9);
                assert!(h.y > 0.0, "s0 = {sx}: {h}");
                assert_eq!(mdf.pdf(DVec3::X, h, ax, ay, 2.0), 0.0);
            }
        }
    }
}
