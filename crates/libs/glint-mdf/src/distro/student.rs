use crate::{
    distro::{MdfKind, MicrofacetDistribution, SmithMasking},
    roughness::{projected_roughness, stretched_roughness},
};
use base::{
    math::{cos_theta2, sin_theta, sph_to_cart, sqr, tan_theta2, DVec3, SQRT_PI, TWO_PI},
    special::gamma_fraction,
};
use std::f64::consts::PI;

/// Student's t-distribution based microfacet distribution (STD), from
/// Ribardière et al., "STD: Student's t-Distribution of Slopes for
/// Microfacet Based BSDFs".
///
/// $$ D(\mathbf{h}) = \frac{1}{\pi \alpha_x \alpha_y \cos^4\theta_h}
/// \left(1 + \frac{\tan^2\theta_h}{\gamma - 1} \left(
/// \frac{\cos^2\phi_h}{\alpha_x^2} + \frac{\sin^2\phi_h}{\alpha_y^2}
/// \right)\right)^{-\gamma} $$
///
/// The shape parameter γ controls the tails: the distribution approaches
/// Beckmann as γ → ∞ and matches GGX at γ = 2. Masking requires γ > 1.5 and
/// sampling γ > 1.
///
/// Sampling draws normals from `D cos θ` in closed form and ignores the view
/// direction; it is not a visible normal sampler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct StdDistribution;

/// Smallest shape parameter for which the masking function is defined
/// (exclusive).
pub const STD_MIN_MASKING_GAMMA: f64 = 1.5;

impl StdDistribution {
    /// Rational approximation of the hypergeometric term of the STD Λ.
    fn s2(cot_theta: f64, gamma: f64) -> f64 {
        let cot_theta2 = sqr(cot_theta);
        let cot_theta3 = cot_theta2 * cot_theta;
        let gamma2 = sqr(gamma);
        let gamma3 = gamma2 * gamma;

        let f21 = (1.066 * cot_theta + 2.655 * cot_theta2 + 4.892 * cot_theta3)
            / (1.038 + 2.969 * cot_theta + 4.305 * cot_theta2 + 4.418 * cot_theta3);
        let f22 = (14.402 - 27.145 * gamma + 20.574 * gamma2 - 2.745 * gamma3)
            / (-30.612 + 86.567 * gamma - 84.341 * gamma2 + 29.938 * gamma3);
        let f23 = (-129.404 + 324.987 * gamma - 299.305 * gamma2 + 93.268 * gamma3)
            / (-92.609 + 256.006 * gamma - 245.663 * gamma2 + 86.064 * gamma3);
        let f24 = (6.537 + 6.074 * cot_theta - 0.623 * cot_theta2 + 5.223 * cot_theta3)
            / (6.538 + 6.103 * cot_theta - 3.218 * cot_theta2 + 6.347 * cot_theta3);

        f21 * (f22 + f23 * f24)
    }
}

impl MicrofacetDistribution for StdDistribution {
    fn kind(&self) -> MdfKind { MdfKind::Std }

    fn d(&self, h: DVec3, alpha_x: f64, alpha_y: f64, gamma: f64) -> f64 {
        let cos_theta = h.y;
        if cos_theta == 0.0 {
            return 0.0;
        }

        let cos_theta4 = sqr(cos_theta2(&h));
        let tan_theta2 = tan_theta2(&h);
        let a = stretched_roughness(h, sin_theta(&h), alpha_x, alpha_y);

        // The power of the denominator is spread over the four factors so
        // that none of them overflows for large γ.
        let den = 1.0 + tan_theta2 * a / (gamma - 1.0);
        let den4 = den.powf(gamma / 4.0);
        let den0 = PI * den4;
        let den1 = alpha_x * den4;
        let den2 = alpha_y * den4;
        let den3 = cos_theta4 * den4;
        1.0 / (den0 * den1 * den2 * den3)
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
        debug_assert!(gamma > STD_MIN_MASKING_GAMMA, "STD masking requires gamma > 1.5");
        self.smith_g(incoming, outgoing, alpha_x, alpha_y, gamma)
    }

    fn g1(&self, v: DVec3, _m: DVec3, alpha_x: f64, alpha_y: f64, gamma: f64) -> f64 {
        debug_assert!(gamma > STD_MIN_MASKING_GAMMA, "STD masking requires gamma > 1.5");
        self.smith_g1(v, alpha_x, alpha_y, gamma)
    }

    fn sample(&self, _v: DVec3, s: DVec3, alpha_x: f64, alpha_y: f64, gamma: f64) -> DVec3 {
        let b = (1.0 - s.y).powf(1.0 / (1.0 - gamma)) - 1.0;

        let (theta, phi) = if alpha_x == alpha_y {
            let phi = TWO_PI * s.x;
            let theta = (alpha_x * ((gamma - 1.0) * b).sqrt()).atan();
            (theta, phi)
        } else {
            // The floor term moves the arctangent onto the branch of 2πs.
            let phi = (alpha_y / alpha_x * (PI + TWO_PI * s.x).tan()).atan()
                + PI * (2.0 * s.x + 0.5).floor();
            let cos_phi2 = sqr(phi.cos());
            let sin_phi2 = 1.0 - cos_phi2;
            let a = (cos_phi2 / sqr(alpha_x) + sin_phi2 / sqr(alpha_y)) / (gamma - 1.0);
            ((b / a).sqrt().atan(), phi)
        };

        sph_to_cart(theta, phi)
    }

    fn pdf(&self, _v: DVec3, h: DVec3, alpha_x: f64, alpha_y: f64, gamma: f64) -> f64 {
        self.d(h, alpha_x, alpha_y, gamma) * h.y
    }
}

impl SmithMasking for StdDistribution {
    /// Λ of the STD model. The fitted hypergeometric term makes the result
    /// slightly negative close to normal incidence, so it is clamped.
    fn lambda(&self, v: DVec3, alpha_x: f64, alpha_y: f64, gamma: f64) -> f64 {
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
        let cot_theta_a = cos_theta / (sin_theta * alpha);
        let s2 = Self::s2(cot_theta_a, gamma);

        let pg1_cot_theta_a2 = (gamma - 1.0) + sqr(cot_theta_a);
        let a1_s1 = ((gamma - 1.0) / pg1_cot_theta_a2).powf(gamma)
            / ((2.0 * gamma - 3.0) * cot_theta_a)
            * pg1_cot_theta_a2.powf(1.5);
        let a2_s2 = (gamma - 1.0).sqrt() * s2;
        let gfrac = gamma_fraction(gamma - 0.5, gamma) / SQRT_PI;

        ((a1_s1 + a2_s2) * gfrac - 0.5).max(0.0)
    }
}
