//! Conversion of anisotropic roughness parameters into the effective
//! isotropic roughness seen along a given azimuth.
//!
//! Both helpers take the sine of the zenith angle precomputed by the caller
//! and fall back to the isotropic value when the roughness is isotropic or
//! the direction is the surface normal itself (sin θ = 0), where the azimuth
//! is undefined.

use base::math::{sqr, DVec3};

/// Returns the anisotropic stretch factor
///
/// $$ A = \frac{\cos^2\phi}{\alpha_x^2} + \frac{\sin^2\phi}{\alpha_y^2} $$
///
/// of the microfacet normal `h`, used inside the exponential and rational
/// NDF kernels as `tan²θ · A`.
#[inline]
pub fn stretched_roughness(h: DVec3, sin_theta: f64, alpha_x: f64, alpha_y: f64) -> f64 {
    if alpha_x == alpha_y || sin_theta == 0.0 {
        return 1.0 / sqr(alpha_x);
    }

    let cos_phi_2_ax_2 = sqr(h.x / (sin_theta * alpha_x));
    let sin_phi_2_ay_2 = sqr(h.z / (sin_theta * alpha_y));
    cos_phi_2_ax_2 + sin_phi_2_ay_2
}

/// Returns the projected roughness
///
/// $$ \alpha = \sqrt{\cos^2\phi \, \alpha_x^2 + \sin^2\phi \, \alpha_y^2} $$
///
/// along the azimuth of `v`, used by the Smith masking functions.
#[inline]
pub fn projected_roughness(v: DVec3, sin_theta: f64, alpha_x: f64, alpha_y: f64) -> f64 {
    if alpha_x == alpha_y || sin_theta == 0.0 {
        return alpha_x;
    }

    let cos_phi_2_ax_2 = sqr((v.x * alpha_x) / sin_theta);
    let sin_phi_2_ay_2 = sqr((v.z * alpha_y) / sin_theta);
    (cos_phi_2_ax_2 + sin_phi_2_ay_2).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use base::math::{sin_theta, sph_to_cart};

    #[test]
    fn isotropic_shortcut() {
        let h = sph_to_cart(0.7, 1.1);
        assert_eq!(stretched_roughness(h, sin_theta(&h), 0.5, 0.5), 4.0);
        assert_eq!(projected_roughness(h, sin_theta(&h), 0.5, 0.5), 0.5);
    }

    #[test]
    fn normal_incidence_avoids_division_by_zero() {
        let n = DVec3::Y;
        let s = stretched_roughness(n, 0.0, 0.5, 0.25);
        let p = projected_roughness(n, 0.0, 0.5, 0.25);
        assert_eq!(s, 4.0);
        assert_eq!(p, 0.5);
    }

    #[test]
    fn anisotropic_along_axes() {
        let (ax, ay) = (0.2, 0.6);
        // Azimuth along +X sees alpha_x only, along +Z alpha_y only.
        let hx = sph_to_cart(0.8, 0.0);
        let hz = sph_to_cart(0.8, std::f64::consts::FRAC_PI_2);
        let (sx, sz) = (sin_theta(&hx), sin_theta(&hz));
        let eps = 1e-9;
        assert_relative_eq!(stretched_roughness(hx, sx, ax, ay), 1.0 / (ax * ax), max_relative = eps);
        assert_relative_eq!(stretched_roughness(hz, sz, ax, ay), 1.0 / (ay * ay), max_relative = eps);
        assert_relative_eq!(projected_roughness(hx, sx, ax, ay), ax, max_relative = eps);
        assert_relative_eq!(projected_roughness(hz, sz, ax, ay), ay, max_relative = eps);
    }

    #[test]
    fn anisotropic_diagonal() {
        let (ax, ay): (f64, f64) = (0.3, 0.5);
        let h = sph_to_cart(0.4, std::f64::consts::FRAC_PI_4);
        let s = sin_theta(&h);
        let expected_a = 0.5 / (ax * ax) + 0.5 / (ay * ay);
        let expected_alpha = (0.5 * ax * ax + 0.5 * ay * ay).sqrt();
        assert_relative_eq!(stretched_roughness(h, s, ax, ay), expected_a, max_relative = 1e-9);
        assert_relative_eq!(projected_roughness(h, s, ax, ay), expected_alpha, max_relative = 1e-9);
    }
}
