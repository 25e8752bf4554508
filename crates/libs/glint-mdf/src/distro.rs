//! Microfacet distribution function models.

mod beckmann;
mod blinn;
mod gtr1;
mod student;
mod trowbridge_reitz;
mod ward;

use crate::error::MdfError;
use base::math::{DVec2, DVec3};
use core::{
    fmt::{Debug, Display, Formatter},
    str::FromStr,
};
use serde::{Deserialize, Serialize};

pub use beckmann::*;
pub use blinn::*;
pub use gtr1::*;
pub use student::*;
pub use trowbridge_reitz::*;
pub use ward::*;

/// Different kinds of microfacet distribution functions.
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MdfKind {
    /// Blinn-Phong lobe with V-cavity masking.
    Blinn,
    /// Beckmann microfacet distribution.
    #[cfg_attr(feature = "cli", clap(alias = "bk"))]
    #[serde(alias = "bk")]
    #[default]
    Beckmann,
    /// Trowbridge-Reitz (GGX) microfacet distribution.
    #[cfg_attr(feature = "cli", clap(alias = "tr"))]
    #[serde(alias = "tr", alias = "trowbridge-reitz")]
    Ggx,
    /// Ward distribution with V-cavity masking.
    Ward,
    /// Berry (generalized Trowbridge-Reitz with γ = 1) distribution.
    #[cfg_attr(feature = "cli", clap(alias = "berry"))]
    #[serde(alias = "berry")]
    Gtr1,
    /// Student's t-distribution based model, shaped by γ.
    Std,
}

impl MdfKind {
    /// All distribution kinds, in declaration order.
    pub const ALL: [MdfKind; 6] = [
        MdfKind::Blinn,
        MdfKind::Beckmann,
        MdfKind::Ggx,
        MdfKind::Ward,
        MdfKind::Gtr1,
        MdfKind::Std,
    ];

    /// Returns the model name used to refer to the distribution in
    /// configuration files.
    pub const fn model(&self) -> &'static str {
        match self {
            MdfKind::Blinn => "blinn",
            MdfKind::Beckmann => "beckmann",
            MdfKind::Ggx => "ggx",
            MdfKind::Ward => "ward",
            MdfKind::Gtr1 => "gtr1",
            MdfKind::Std => "std",
        }
    }

    /// Returns the human-readable name of the distribution.
    pub const fn to_str(&self) -> &'static str {
        match self {
            MdfKind::Blinn => "Blinn",
            MdfKind::Beckmann => "Beckmann",
            MdfKind::Ggx => "GGX",
            MdfKind::Ward => "Ward",
            MdfKind::Gtr1 => "GTR1",
            MdfKind::Std => "STD",
        }
    }

    /// Whether the model reads `alpha_y`. Blinn, Ward and GTR1 are driven
    /// by `alpha_x` alone.
    pub const fn supports_anisotropy(&self) -> bool {
        matches!(self, MdfKind::Beckmann | MdfKind::Ggx | MdfKind::Std)
    }

    /// Whether the model samples visible normals, i.e. its `pdf` depends on
    /// the view direction.
    pub const fn samples_visible_normals(&self) -> bool {
        matches!(self, MdfKind::Blinn | MdfKind::Beckmann | MdfKind::Ggx)
    }
}

impl Display for MdfKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result { f.write_str(self.to_str()) }
}

impl FromStr for MdfKind {
    type Err = MdfError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "blinn" => Ok(MdfKind::Blinn),
            "beckmann" | "bk" => Ok(MdfKind::Beckmann),
            "ggx" | "tr" | "trowbridge-reitz" => Ok(MdfKind::Ggx),
            "ward" => Ok(MdfKind::Ward),
            "gtr1" | "berry" => Ok(MdfKind::Gtr1),
            "std" => Ok(MdfKind::Std),
            _ => Err(MdfError::UnknownModel(s.to_owned())),
        }
    }
}

/// Common interface for microfacet distribution functions.
///
/// Implementors hold no state: every operation is a pure function of its
/// arguments, so a single instance can be shared by any number of threads.
/// All vectors are expressed in the Y-up local shading frame and are
/// assumed to be normalized.
///
/// `alpha_x` and `alpha_y` are the roughness along the two tangent axes
/// (the Blinn model reads `alpha_x` as its exponent); `gamma` is the shape
/// parameter, only read by the STD model.
pub trait MicrofacetDistribution: Debug + Send + Sync {
    /// Returns the kind of the distribution.
    fn kind(&self) -> MdfKind;

    /// Evaluates the normal distribution function for the microfacet normal
    /// `h`.
    fn d(&self, h: DVec3, alpha_x: f64, alpha_y: f64, gamma: f64) -> f64;

    /// Evaluates the joint shadowing-masking function for the `incoming` and
    /// `outgoing` directions and the microfacet normal `h`.
    fn g(
        &self,
        incoming: DVec3,
        outgoing: DVec3,
        h: DVec3,
        alpha_x: f64,
        alpha_y: f64,
        gamma: f64,
    ) -> f64;

    /// Evaluates the masking function of the direction `v` for the
    /// microfacet normal `m`.
    fn g1(&self, v: DVec3, m: DVec3, alpha_x: f64, alpha_y: f64, gamma: f64) -> f64;

    /// Samples a microfacet normal seen from `v` using the three uniform
    /// values in `s`.
    fn sample(&self, v: DVec3, s: DVec3, alpha_x: f64, alpha_y: f64, gamma: f64) -> DVec3;

    /// Returns the density, with respect to solid angle, with which
    /// [`MicrofacetDistribution::sample`] produces `h` when seen from `v`.
    fn pdf(&self, v: DVec3, h: DVec3, alpha_x: f64, alpha_y: f64, gamma: f64) -> f64;
}

/// Masking in the Smith framework, `G1 = 1 / (1 + Λ(v))`.
pub trait SmithMasking {
    /// Evaluates the auxiliary function Λ for the direction `v`.
    fn lambda(&self, v: DVec3, alpha_x: f64, alpha_y: f64, gamma: f64) -> f64;

    /// Smith masking of a single direction.
    #[inline]
    fn smith_g1(&self, v: DVec3, alpha_x: f64, alpha_y: f64, gamma: f64) -> f64 {
        1.0 / (1.0 + self.lambda(v, alpha_x, alpha_y, gamma))
    }

    /// Height-correlated Smith shadowing-masking.
    #[inline]
    fn smith_g(
        &self,
        incoming: DVec3,
        outgoing: DVec3,
        alpha_x: f64,
        alpha_y: f64,
        gamma: f64,
    ) -> f64 {
        1.0 / (1.0
            + self.lambda(outgoing, alpha_x, alpha_y, gamma)
            + self.lambda(incoming, alpha_x, alpha_y, gamma))
    }
}

/// Distributions whose slopes are invariant under stretching, so that their
/// visible normals can be sampled in a unit-roughness configuration.
pub trait SlopeSampling {
    /// Samples a slope of the distribution with unit roughness, seen from a
    /// direction with zenith cosine `cos_theta` and zero azimuth.
    fn sample11(&self, cos_theta: f64, s: DVec3, gamma: f64) -> DVec2;
}

/// Closed set of the microfacet distributions, dispatched statically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mdf {
    /// See [`BlinnDistribution`].
    Blinn(BlinnDistribution),
    /// See [`BeckmannDistribution`].
    Beckmann(BeckmannDistribution),
    /// See [`TrowbridgeReitzDistribution`].
    Ggx(TrowbridgeReitzDistribution),
    /// See [`WardDistribution`].
    Ward(WardDistribution),
    /// See [`Gtr1Distribution`].
    Gtr1(Gtr1Distribution),
    /// See [`StdDistribution`].
    Std(StdDistribution),
}

macro_rules! dispatch {
    ($self:ident, $mdf:ident => $body:expr) => {
        match $self {
            Mdf::Blinn($mdf) => $body,
            Mdf::Beckmann($mdf) => $body,
            Mdf::Ggx($mdf) => $body,
            Mdf::Ward($mdf) => $body,
            Mdf::Gtr1($mdf) => $body,
            Mdf::Std($mdf) => $body,
        }
    };
}

impl From<MdfKind> for Mdf {
    fn from(kind: MdfKind) -> Self {
        match kind {
            MdfKind::Blinn => Mdf::Blinn(BlinnDistribution),
            MdfKind::Beckmann => Mdf::Beckmann(BeckmannDistribution),
            MdfKind::Ggx => Mdf::Ggx(TrowbridgeReitzDistribution),
            MdfKind::Ward => Mdf::Ward(WardDistribution),
            MdfKind::Gtr1 => Mdf::Gtr1(Gtr1Distribution),
            MdfKind::Std => Mdf::Std(StdDistribution),
        }
    }
}

impl FromStr for Mdf {
    type Err = MdfError;

    fn from_str(s: &str) -> Result<Self, Self::Err> { MdfKind::from_str(s).map(Mdf::from) }
}

impl MicrofacetDistribution for Mdf {
    fn kind(&self) -> MdfKind { dispatch!(self, mdf => mdf.kind()) }

    fn d(&self, h: DVec3, alpha_x: f64, alpha_y: f64, gamma: f64) -> f64 {
        dispatch!(self, mdf => mdf.d(h, alpha_x, alpha_y, gamma))
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
        dispatch!(self, mdf => mdf.g(incoming, outgoing, h, alpha_x, alpha_y, gamma))
    }

    fn g1(&self, v: DVec3, m: DVec3, alpha_x: f64, alpha_y: f64, gamma: f64) -> f64 {
        dispatch!(self, mdf => mdf.g1(v, m, alpha_x, alpha_y, gamma))
    }

    fn sample(&self, v: DVec3, s: DVec3, alpha_x: f64, alpha_y: f64, gamma: f64) -> DVec3 {
        dispatch!(self, mdf => mdf.sample(v, s, alpha_x, alpha_y, gamma))
    }

    fn pdf(&self, v: DVec3, h: DVec3, alpha_x: f64, alpha_y: f64, gamma: f64) -> f64 {
        dispatch!(self, mdf => mdf.pdf(v, h, alpha_x, alpha_y, gamma))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use base::math::sph_to_cart;

    #[test]
    fn kind_names_round_trip() {
        for kind in MdfKind::ALL {
            assert_eq!(kind.model().parse::<MdfKind>(), Ok(kind));
            assert_eq!(kind.to_str().parse::<MdfKind>(), Ok(kind));
            assert_eq!(Mdf::from(kind).kind(), kind);
        }
    }

    #[test]
    fn kind_aliases() {
        assert_eq!("bk".parse::<MdfKind>(), Ok(MdfKind::Beckmann));
        assert_eq!(" Trowbridge-Reitz ".parse::<MdfKind>(), Ok(MdfKind::Ggx));
        assert_eq!("BERRY".parse::<MdfKind>(), Ok(MdfKind::Gtr1));
        assert_eq!(
            "cook-torrance".parse::<MdfKind>(),
            Err(MdfError::UnknownModel("cook-torrance".to_owned()))
        );
        assert_eq!(format!("{}", MdfKind::Ggx), "GGX");
        assert_eq!(MdfKind::default(), MdfKind::Beckmann);
    }

    #[test]
    fn dispatch_matches_concrete_models() {
        let v = sph_to_cart(0.6, 0.4);
        let h = sph_to_cart(0.3, 1.2);
        let s = DVec3::new(0.3, 0.6, 0.2);
        let (ax, ay, gamma) = (0.35, 0.35, 2.0);

        let ggx = TrowbridgeReitzDistribution;
        let mdf: Mdf = "ggx".parse().unwrap();
        assert_eq!(mdf.d(h, ax, ay, gamma), ggx.d(h, ax, ay, gamma));
        assert_eq!(mdf.g1(v, h, ax, ay, gamma), ggx.g1(v, h, ax, ay, gamma));
        assert_eq!(mdf.sample(v, s, ax, ay, gamma), ggx.sample(v, s, ax, ay, gamma));
        assert_eq!(mdf.pdf(v, h, ax, ay, gamma), ggx.pdf(v, h, ax, ay, gamma));

        let ward = Mdf::from(MdfKind::Ward);
        assert_eq!(ward.pdf(v, h, ax, ay, gamma), WardDistribution.d(h, ax, ay, gamma));
    }

    #[test]
    fn visible_normal_flags() {
        let visible = MdfKind::ALL
            .into_iter()
            .filter(MdfKind::samples_visible_normals)
            .collect::<Vec<_>>();
        assert_eq!(visible, [MdfKind::Blinn, MdfKind::Beckmann, MdfKind::Ggx]);
        assert!(!MdfKind::Ward.supports_anisotropy());
        assert!(MdfKind::Std.supports_anisotropy());
    }
}
