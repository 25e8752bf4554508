//! Special functions used by the microfacet models.

/// Arguments of [`erf_inv`] are clamped to this magnitude; the inverse error
/// function diverges at ±1.
pub const ERF_INV_DOMAIN: f64 = 0.99999;

/// Error function.
#[inline(always)]
pub fn erf(x: f64) -> f64 { libm::erf(x) }

/// Inverse error function.
///
/// Rational approximation from M. Giles, "Approximating the erfinv function",
/// accurate to single precision over the whole domain. The argument is
/// clamped to [-[`ERF_INV_DOMAIN`], [`ERF_INV_DOMAIN`]] so the result stays
/// finite.
pub fn erf_inv(x: f64) -> f64 {
    let x = x.clamp(-ERF_INV_DOMAIN, ERF_INV_DOMAIN);
    let mut w = -((1.0 - x) * (1.0 + x)).ln();
    let mut p;
    if w < 5.0 {
        w -= 2.5;
        p = 2.81022636e-08;
        p = 3.43273939e-07 + p * w;
        p = -3.5233877e-06 + p * w;
        p = -4.39150654e-06 + p * w;
        p = 0.00021858087 + p * w;
        p = -0.00125372503 + p * w;
        p = -0.00417768164 + p * w;
        p = 0.246640727 + p * w;
        p = 1.50140941 + p * w;
    } else {
        w = w.sqrt() - 3.0;
        p = -0.000200214257;
        p = 0.000100950558 + p * w;
        p = 0.00134934322 + p * w;
        p = -0.00367342844 + p * w;
        p = 0.00573950773 + p * w;
        p = -0.0076224613 + p * w;
        p = 0.00943887047 + p * w;
        p = 1.00167406 + p * w;
        p = 2.83297682 + p * w;
    }
    p * x
}

/// Returns Γ(a) / Γ(b) for positive `a` and `b`.
///
/// Evaluated in log space so that large arguments don't overflow.
pub fn gamma_fraction(a: f64, b: f64) -> f64 {
    debug_assert!(a > 0.0 && b > 0.0, "gamma_fraction expects positive arguments");
    (libm::lgamma(a) - libm::lgamma(b)).exp()
}
