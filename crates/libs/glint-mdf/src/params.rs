//! Parameter sets and their binding to a distribution model.
//!
//! The distributions themselves take their parameters on every call. This
//! module is the configuration surface in front of them: it validates the
//! parameters once against the domain of the selected model and hands out a
//! [`ParameterizedMdf`] that can be evaluated without repeating them.

use crate::{
    distro::{Mdf, MdfKind, MicrofacetDistribution, STD_MIN_MASKING_GAMMA},
    error::MdfError,
};
use base::{math::DVec3, Symmetry};
use serde::{Deserialize, Serialize};

/// Default shape parameter; the STD model matches GGX at this value.
pub const DEFAULT_GAMMA: f64 = 2.0;

fn default_gamma() -> f64 { DEFAULT_GAMMA }

/// Roughness and shape parameters of a microfacet distribution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MdfParams {
    /// Roughness along the tangent X axis; the exponent for Blinn.
    pub alpha_x: f64,
    /// Roughness along the tangent Z axis.
    pub alpha_y: f64,
    /// Shape parameter, only read by the STD model.
    #[serde(default = "default_gamma")]
    pub gamma: f64,
}

impl MdfParams {
    /// Creates a new parameter set with the default shape parameter.
    pub fn new(alpha_x: f64, alpha_y: f64) -> Self {
        Self {
            alpha_x,
            alpha_y,
            gamma: DEFAULT_GAMMA,
        }
    }

    /// Creates an isotropic parameter set.
    pub fn isotropic(alpha: f64) -> Self { Self::new(alpha, alpha) }

    /// Replaces the shape parameter.
    pub fn with_gamma(self, gamma: f64) -> Self { Self { gamma, ..self } }

    /// Returns the symmetry of the roughness.
    pub fn symmetry(&self) -> Symmetry { Symmetry::from_roughness(self.alpha_x, self.alpha_y) }

    /// Checks the parameters against the domain of the given model.
    ///
    /// Anisotropic roughness handed to a model that only reads `alpha_x` is
    /// accepted, with a warning.
    pub fn validate(&self, kind: MdfKind) -> Result<MdfParams, MdfError> {
        match kind {
            MdfKind::Blinn => {
                if !self.alpha_x.is_finite() || self.alpha_x < 0.0 {
                    return Err(MdfError::InvalidRoughness {
                        name: "alpha_x",
                        value: self.alpha_x,
                    });
                }
            }
            _ => check_roughness("alpha_x", self.alpha_x)?,
        }

        if kind.supports_anisotropy() {
            check_roughness("alpha_y", self.alpha_y)?;
        } else if self.symmetry().is_anisotropic() {
            log::warn!(
                "{} distribution is isotropic, ignoring alpha_y = {} (alpha_x = {})",
                kind,
                self.alpha_y,
                self.alpha_x
            );
        }

        match kind {
            MdfKind::Gtr1 if self.alpha_x == 1.0 => Err(MdfError::DegenerateGtr1),
            MdfKind::Std if !(self.gamma.is_finite() && self.gamma > STD_MIN_MASKING_GAMMA) => {
                Err(MdfError::InvalidShape {
                    gamma: self.gamma,
                    min: STD_MIN_MASKING_GAMMA,
                })
            }
            _ => Ok(*self),
        }
    }
}

fn check_roughness(name: &'static str, value: f64) -> Result<(), MdfError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(MdfError::InvalidRoughness { name, value })
    }
}

/// Model selection together with its parameters, as found in material
/// descriptions.
///
/// ```yaml
/// model: ggx
/// alpha_x: 0.3
/// alpha_y: 0.5
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MdfConfig {
    /// Distribution model.
    pub model: MdfKind,
    /// Parameters of the model.
    #[serde(flatten)]
    pub params: MdfParams,
}

/// A distribution bound to a validated parameter set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParameterizedMdf {
    mdf: Mdf,
    params: MdfParams,
}

impl ParameterizedMdf {
    /// Validates `params` for `kind` and binds them.
    pub fn new(kind: MdfKind, params: MdfParams) -> Result<Self, MdfError> {
        let params = params.validate(kind)?;
        log::debug!("Bound {} distribution with {:?}", kind, params);
        Ok(Self {
            mdf: Mdf::from(kind),
            params,
        })
    }

    /// Returns the kind of the underlying distribution.
    pub fn kind(&self) -> MdfKind { self.mdf.kind() }

    /// Returns the underlying distribution.
    pub fn mdf(&self) -> &Mdf { &self.mdf }

    /// Returns the bound parameters.
    pub fn params(&self) -> &MdfParams { &self.params }

    /// See [`MicrofacetDistribution::d`].
    pub fn d(&self, h: DVec3) -> f64 {
        let p = &self.params;
        self.mdf.d(h, p.alpha_x, p.alpha_y, p.gamma)
    }

    /// See [`MicrofacetDistribution::g`].
    pub fn g(&self, incoming: DVec3, outgoing: DVec3, h: DVec3) -> f64 {
        let p = &self.params;
        self.mdf.g(incoming, outgoing, h, p.alpha_x, p.alpha_y, p.gamma)
    }

    /// See [`MicrofacetDistribution::g1`].
    pub fn g1(&self, v: DVec3, m: DVec3) -> f64 {
        let p = &self.params;
        self.mdf.g1(v, m, p.alpha_x, p.alpha_y, p.gamma)
    }

    /// See [`MicrofacetDistribution::sample`].
    pub fn sample(&self, v: DVec3, s: DVec3) -> DVec3 {
        let p = &self.params;
        self.mdf.sample(v, s, p.alpha_x, p.alpha_y, p.gamma)
    }

    /// See [`MicrofacetDistribution::pdf`].
    pub fn pdf(&self, v: DVec3, h: DVec3) -> f64 {
        let p = &self.params;
        self.mdf.pdf(v, h, p.alpha_x, p.alpha_y, p.gamma)
    }
}

impl TryFrom<MdfConfig> for ParameterizedMdf {
    type Error = MdfError;

    fn try_from(config: MdfConfig) -> Result<Self, Self::Error> {
        ParameterizedMdf::new(config.model, config.params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use base::math::sph_to_cart;

    #[test]
    fn constructors() {
        let p = MdfParams::isotropic(0.3).with_gamma(3.0);
        assert_eq!(
            p,
            MdfParams {
                alpha_x: 0.3,
                alpha_y: 0.3,
                gamma: 3.0
            }
        );
        assert!(p.symmetry().is_isotropic());
        assert!(MdfParams::new(0.3, 0.4).symmetry().is_anisotropic());
        assert_eq!(MdfParams::new(0.3, 0.4).gamma, DEFAULT_GAMMA);
    }

    #[test]
    fn roughness_must_be_positive() {
        for kind in [MdfKind::Beckmann, MdfKind::Ggx, MdfKind::Ward, MdfKind::Gtr1] {
            assert_eq!(
                MdfParams::isotropic(0.0).validate(kind),
                Err(MdfError::InvalidRoughness {
                    name: "alpha_x",
                    value: 0.0
                })
            );
            assert!(MdfParams::isotropic(f64::NAN).validate(kind).is_err());
        }
        assert_eq!(
            MdfParams::new(0.3, -0.1).validate(MdfKind::Ggx),
            Err(MdfError::InvalidRoughness {
                name: "alpha_y",
                value: -0.1
            })
        );
        assert!(MdfParams::new(0.3, f64::INFINITY).validate(MdfKind::Std).is_err());
    }

    #[test]
    fn blinn_accepts_zero_exponent() {
        assert!(MdfParams::isotropic(0.0).validate(MdfKind::Blinn).is_ok());
        assert!(MdfParams::isotropic(-1.0).validate(MdfKind::Blinn).is_err());
    }

    #[test]
    fn isotropic_models_ignore_alpha_y() {
        let p = MdfParams::new(0.3, -5.0);
        for kind in [MdfKind::Blinn, MdfKind::Ward, MdfKind::Gtr1] {
            assert_eq!(p.validate(kind), Ok(p));
        }
    }

    #[test]
    fn model_specific_domains() {
        assert_eq!(
            MdfParams::isotropic(1.0).validate(MdfKind::Gtr1),
            Err(MdfError::DegenerateGtr1)
        );
        assert!(MdfParams::isotropic(1.0).validate(MdfKind::Ggx).is_ok());
        assert_eq!(
            MdfParams::isotropic(0.3).with_gamma(1.5).validate(MdfKind::Std),
            Err(MdfError::InvalidShape {
                gamma: 1.5,
                min: STD_MIN_MASKING_GAMMA
            })
        );
        assert!(MdfParams::isotropic(0.3).with_gamma(f64::NAN).validate(MdfKind::Std).is_err());
        // gamma is only read by STD.
        assert!(MdfParams::isotropic(0.3).with_gamma(0.0).validate(MdfKind::Ggx).is_ok());
    }

    #[test]
    fn config_from_yaml() {
        let config: MdfConfig = serde_yaml::from_str("model: ggx\nalpha_x: 0.3\nalpha_y: 0.5\n")
            .expect("valid configuration");
        assert_eq!(config.model, MdfKind::Ggx);
        assert_eq!(config.params, MdfParams::new(0.3, 0.5));

        let config: MdfConfig =
            serde_yaml::from_str("model: berry\nalpha_x: 0.2\nalpha_y: 0.2\ngamma: 1.0\n")
                .expect("valid configuration");
        assert_eq!(config.model, MdfKind::Gtr1);
        assert_eq!(config.params.gamma, 1.0);

        assert!(serde_yaml::from_str::<MdfConfig>("model: phong\nalpha_x: 1\nalpha_y: 1\n").is_err());
    }

    #[test]
    fn parameterized_evaluation_forwards_parameters() {
        let config = MdfConfig {
            model: MdfKind::Std,
            params: MdfParams::new(0.3, 0.6).with_gamma(2.5),
        };
        let bound = ParameterizedMdf::try_from(config).expect("valid configuration");
        assert_eq!(bound.kind(), MdfKind::Std);
        assert_eq!(bound.params(), &config.params);

        let mdf = bound.mdf();
        let v = sph_to_cart(0.9, 0.2);
        let h = sph_to_cart(0.3, 1.1);
        let s = DVec3::new(0.2, 0.4, 0.6);
        assert_eq!(bound.d(h), mdf.d(h, 0.3, 0.6, 2.5));
        assert_eq!(bound.g(v, DVec3::Y, h), mdf.g(v, DVec3::Y, h, 0.3, 0.6, 2.5));
        assert_eq!(bound.g1(v, h), mdf.g1(v, h, 0.3, 0.6, 2.5));
        assert_eq!(bound.sample(v, s), mdf.sample(v, s, 0.3, 0.6, 2.5));
        assert_eq!(bound.pdf(v, h), mdf.pdf(v, h, 0.3, 0.6, 2.5));

        let invalid = MdfConfig {
            model: MdfKind::Gtr1,
            params: MdfParams::isotropic(1.0),
        };
        assert_eq!(ParameterizedMdf::try_from(invalid), Err(MdfError::DegenerateGtr1));
    }
}
