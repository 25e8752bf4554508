//! # glint-mdf
//! Microfacet distribution functions.
//!
//! Each model provides the normal distribution function `D`, the
//! shadowing-masking functions `G` and `G1`, a normal sampling routine and
//! the density of that routine, all as pure functions of their arguments.
//! See [`distro::MicrofacetDistribution`] for the shared interface and
//! [`params::ParameterizedMdf`] for a model bound to validated parameters.

pub mod distro;
pub mod error;
pub mod params;
pub mod roughness;
pub mod sampling;

pub use distro::{Mdf, MdfKind, MicrofacetDistribution, SlopeSampling, SmithMasking};
pub use error::MdfError;
pub use params::{MdfConfig, MdfParams, ParameterizedMdf};

use distro::{
    BeckmannDistribution, BlinnDistribution, Gtr1Distribution, StdDistribution,
    TrowbridgeReitzDistribution, WardDistribution,
};
use static_assertions::{assert_impl_all, const_assert_eq};

assert_impl_all!(Mdf: Copy, Send, Sync);
assert_impl_all!(ParameterizedMdf: Copy, Send, Sync);

const_assert_eq!(core::mem::size_of::<BlinnDistribution>(), 0);
const_assert_eq!(core::mem::size_of::<BeckmannDistribution>(), 0);
const_assert_eq!(core::mem::size_of::<TrowbridgeReitzDistribution>(), 0);
const_assert_eq!(core::mem::size_of::<WardDistribution>(), 0);
const_assert_eq!(core::mem::size_of::<Gtr1Distribution>(), 0);
const_assert_eq!(core::mem::size_of::<StdDistribution>(), 0);
