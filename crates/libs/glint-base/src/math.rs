//! Math utilities.
//!
//! Directions live in the local shading frame, which is right-handed and
//! Y-up: the second component of a unit vector is the cosine of the angle
//! between the direction and the macroscopic surface normal.

pub use glam::{DVec2, DVec3};
use num_traits::Float;

/// 2π.
pub const TWO_PI: f64 = std::f64::consts::TAU;

/// 1/π.
pub const INV_PI: f64 = std::f64::consts::FRAC_1_PI;

/// 1/(2π).
pub const INV_TWO_PI: f64 = 0.5 * std::f64::consts::FRAC_1_PI;

/// √π.
pub const SQRT_PI: f64 = 1.772_453_850_905_516;

/// Returns the square of the given value.
#[inline(always)]
pub fn sqr<F: Float>(x: F) -> F { x * x }

/// Returns the cosine of the zenith angle of the given vector.
/// The vector must be normalized.
#[inline(always)]
pub fn cos_theta(v: &DVec3) -> f64 {
    debug_assert!(
        approx::ulps_eq!(v.length(), 1.0, epsilon = 1.0e-6),
        "DVec3 must be normalized, got {}",
        v.length()
    );
    v.y
}

/// Returns the square of the cosine of the zenith angle of the given vector.
/// The vector must be normalized.
#[inline(always)]
pub fn cos_theta2(v: &DVec3) -> f64 { sqr(cos_theta(v)) }

/// Returns the square of the sine of the zenith angle of the given vector.
#[inline(always)]
pub fn sin_theta2(v: &DVec3) -> f64 { (1.0 - cos_theta2(v)).max(0.0) }

/// Returns the sine of the zenith angle of the given vector.
#[inline(always)]
pub fn sin_theta(v: &DVec3) -> f64 { sin_theta2(v).sqrt() }

/// Returns the square of the tangent of the zenith angle of the given vector.
///
/// Infinite for directions lying in the tangent plane.
#[inline(always)]
pub fn tan_theta2(v: &DVec3) -> f64 { sin_theta2(v) / cos_theta2(v) }

/// Builds a unit vector from the trigonometric values of its spherical
/// coordinates (zenith θ measured from +Y, azimuth φ measured from +X
/// towards +Z).
#[inline(always)]
pub fn unit_vector(cos_theta: f64, sin_theta: f64, cos_phi: f64, sin_phi: f64) -> DVec3 {
    DVec3::new(cos_phi * sin_theta, cos_theta, sin_phi * sin_theta)
}

/// Converts a spherical coordinate (zenith, azimuth) in radians to a unit
/// vector.
pub fn sph_to_cart(theta: f64, phi: f64) -> DVec3 {
    let (sin_theta, cos_theta) = theta.sin_cos();
    let (sin_phi, cos_phi) = phi.sin_cos();
    unit_vector(cos_theta, sin_theta, cos_phi, sin_phi)
}

/// Rotates a 2D vector counter-clockwise by the angle whose cosine and sine
/// are given.
#[inline(always)]
pub fn rotate_2d(v: DVec2, cos_phi: f64, sin_phi: f64) -> DVec2 {
    DVec2::new(cos_phi * v.x - sin_phi * v.y, sin_phi * v.x + cos_phi * v.y)
}
