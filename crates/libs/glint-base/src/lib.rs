//! # glint-base
//! Base library for glint.
//! Contains the shading frame math and the special functions shared by the
//! microfacet distribution models.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

pub mod math;
pub mod special;

/// Indicates whether something is uniform in all directions or not.
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Symmetry {
    /// Uniformity in all directions.
    #[cfg_attr(feature = "cli", clap(alias = "iso"))]
    Isotropic,
    /// Non-uniformity in some directions.
    #[cfg_attr(feature = "cli", clap(alias = "aniso"))]
    Anisotropic,
}

impl Symmetry {
    /// Classifies a pair of roughness parameters.
    ///
    /// Roughness values are compared exactly: the distribution formulas only
    /// take their isotropic shortcuts when both values are bit-identical.
    pub fn from_roughness(alpha_x: f64, alpha_y: f64) -> Self {
        if alpha_x == alpha_y {
            Symmetry::Isotropic
        } else {
            Symmetry::Anisotropic
        }
    }

    /// Returns whether it's isotropic.
    pub const fn is_isotropic(&self) -> bool { matches!(self, Self::Isotropic) }

    /// Returns whether it's anisotropic.
    pub const fn is_anisotropic(&self) -> bool { matches!(self, Self::Anisotropic) }
}

impl Display for Symmetry {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Symmetry::Isotropic => "Isotropic",
                Symmetry::Anisotropic => "Anisotropic",
            }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::Symmetry;

    #[test]
    fn symmetry_from_roughness() {
        assert_eq!(Symmetry::from_roughness(0.3, 0.3), Symmetry::Isotropic);
        assert_eq!(Symmetry::from_roughness(0.3, 0.31), Symmetry::Anisotropic);
        assert!(Symmetry::Isotropic.is_isotropic());
        assert!(Symmetry::Anisotropic.is_anisotropic());
        assert_eq!(format!("{}", Symmetry::Anisotropic), "Anisotropic");
    }
}
