//! Sampling routines shared by the distribution models: azimuth warps, the
//! V-cavity facet selector and stretch-based visible-normal sampling.

use crate::distro::{MicrofacetDistribution, SlopeSampling};
use base::math::{rotate_2d, DVec2, DVec3, TWO_PI};

/// Zenith cosine above which a stretched direction is treated as the pole
/// and its azimuth is taken to be zero.
pub const POLE_COS_THETA: f64 = 0.99999;

/// Samples an azimuth uniformly, returning `(cos φ, sin φ)`.
#[inline]
pub fn sample_phi(s: f64) -> (f64, f64) {
    let (sin_phi, cos_phi) = (TWO_PI * s).sin_cos();
    (cos_phi, sin_phi)
}

/// Samples an azimuth warped by the anisotropy ratio, returning
/// `(cos φ, sin φ)`.
///
/// The uniform angle 2πs is stretched by `(alpha_x, alpha_y)` and projected
/// back onto the unit circle.
#[inline]
pub fn sample_phi_anisotropic(s: f64, alpha_x: f64, alpha_y: f64) -> (f64, f64) {
    let (sin, cos) = (TWO_PI * s).sin_cos();
    let dir = DVec2::new(cos * alpha_x, sin * alpha_y).normalize();
    (dir.x, dir.y)
}

/// Picks between the facet `h` and its mirror image inside a V-shaped
/// cavity, with a probability proportional to their projected area seen
/// from `v`.
///
/// `s` is the uniform value deciding the outcome. `v` must be normalized and
/// lie in the upper hemisphere.
pub fn v_cavity_choose_microfacet_normal(v: DVec3, h: DVec3, s: f64) -> DVec3 {
    debug_assert!(v.is_normalized(), "view direction must be normalized, got {v}");
    debug_assert!(v.y >= 0.0, "view direction must lie in the upper hemisphere, got {v}");

    let hm = DVec3::new(-h.x, h.y, -h.z);
    let dot_vh = v.dot(h).max(0.0);
    let dot_vhm = v.dot(hm).max(0.0);

    if dot_vhm == 0.0 {
        return h;
    }

    let w = dot_vhm / (dot_vh + dot_vhm);
    if s < w {
        hm
    } else {
        h
    }
}

/// Samples the distribution of normals visible from `v`.
///
/// The view direction is stretched into the configuration where the
/// distribution has unit roughness, a slope is drawn from
/// [`SlopeSampling::sample11`], rotated back to the azimuth of the stretched
/// direction and finally un-stretched into a microfacet normal.
pub fn sample_visible_normals<M>(
    mdf: &M,
    v: DVec3,
    s: DVec3,
    alpha_x: f64,
    alpha_y: f64,
    gamma: f64,
) -> DVec3
where
    M: SlopeSampling + ?Sized,
{
    debug_assert!(v.is_normalized(), "view direction must be normalized, got {v}");

    let sign = if v.y < 0.0 { -1.0 } else { 1.0 };
    let stretched = (sign * DVec3::new(v.x * alpha_x, v.y, v.z * alpha_y)).normalize();

    let cos_theta = stretched.y;
    let phi = if stretched.y < POLE_COS_THETA {
        stretched.z.atan2(stretched.x)
    } else {
        0.0
    };

    let slope = mdf.sample11(cos_theta, s, gamma);
    let (sin_phi, cos_phi) = phi.sin_cos();
    let slope = rotate_2d(slope, cos_phi, sin_phi);

    DVec3::new(-slope.x * alpha_x, 1.0, -slope.y * alpha_y).normalize()
}

/// Density of [`sample_visible_normals`] and of the V-cavity sampler:
///
/// $$ p(h) = \frac{G_1(v, h) \, |v \cdot h| \, D(h)}{|v_y|} $$
///
/// Zero for directions in the tangent plane.
pub fn pdf_visible_normals<M>(
    mdf: &M,
    v: DVec3,
    h: DVec3,
    alpha_x: f64,
    alpha_y: f64,
    gamma: f64,
) -> f64
where
    M: MicrofacetDistribution + ?Sized,
{
    let cos_theta_v = v.y;
    if cos_theta_v == 0.0 {
        return 0.0;
    }

    mdf.g1(v, h, alpha_x, alpha_y, gamma) * v.dot(h).abs() * mdf.d(h, alpha_x, alpha_y, gamma)
        / cos_theta_v.abs()
}
