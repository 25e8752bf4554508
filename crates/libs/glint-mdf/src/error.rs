//! Errors raised while configuring a microfacet distribution.
//!
//! Evaluation and sampling never fail; only resolving a model name or
//! validating a parameter set does.

/// Error type of the configuration surface.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MdfError {
    /// The model name doesn't match any known distribution.
    #[error("Unknown microfacet distribution model '{0}'")]
    UnknownModel(String),

    /// A roughness (or Blinn exponent) is negative, zero or not finite.
    #[error("Invalid roughness parameter {name} = {value}, expected a finite positive value")]
    InvalidRoughness {
        /// Name of the offending parameter.
        name: &'static str,
        /// Rejected value.
        value: f64,
    },

    /// GTR1 normalizes by ln(α²), which vanishes at α = 1.
    #[error("GTR1 distribution is undefined for a roughness of exactly 1")]
    DegenerateGtr1,

    /// The STD shape parameter is at or below the bound where its moments
    /// stop existing.
    #[error("Shape parameter gamma = {gamma} is out of range, expected gamma > {min}")]
    InvalidShape {
        /// Rejected shape parameter.
        gamma: f64,
        /// Exclusive lower bound.
        min: f64,
    },
}
