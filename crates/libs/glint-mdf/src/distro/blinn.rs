use crate::{
    distro::{MdfKind, MicrofacetDistribution},
    sampling::{pdf_visible_normals, sample_phi, v_cavity_choose_microfacet_normal},
};
use base::math::{unit_vector, DVec3, INV_TWO_PI};

/// Blinn-Phong microfacet distribution.
///
/// $$ D(\mathbf{h}) = \frac{e + 2}{2\pi} \cos^e\theta_h $$
///
/// The exponent `e` is read from `alpha_x`; `alpha_y` and `gamma` are
/// ignored. Masking follows the V-cavity model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct BlinnDistribution;

/// Masking of the V-cavity model, shared by the Blinn and Ward
/// distributions.
pub(crate) fn v_cavity_g1(v: DVec3, m: DVec3) -> f64 {
    let cos_vm = v.dot(m);
    if v.y <= 0.0 || cos_vm <= 0.0 {
        return 0.0;
    }
    (2.0 * (m.y * v.y).abs() / cos_vm.abs()).min(1.0)
}

impl MicrofacetDistribution for BlinnDistribution {
    fn kind(&self) -> MdfKind { MdfKind::Blinn }

    fn d(&self, h: DVec3, alpha_x: f64, _alpha_y: f64, _gamma: f64) -> f64 {
        (alpha_x + 2.0) * INV_TWO_PI * h.y.powf(alpha_x)
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
        self.g1(incoming, h, alpha_x, alpha_y, gamma)
            .min(self.g1(outgoing, h, alpha_x, alpha_y, gamma))
    }

    fn g1(&self, v: DVec3, m: DVec3, _alpha_x: f64, _alpha_y: f64, _gamma: f64) -> f64 {
        v_cavity_g1(v, m)
    }

    fn sample(&self, v: DVec3, s: DVec3, alpha_x: f64, _alpha_y: f64, _gamma: f64) -> DVec3 {
        let cos_theta = (1.0 - s.x).powf(1.0 / (alpha_x + 2.0));
        let sin_theta = (1.0 - cos_theta * cos_theta).max(0.0).sqrt();
        let (cos_phi, sin_phi) = sample_phi(s.y);
        let h = unit_vector(cos_theta, sin_theta, cos_phi, sin_phi);
        v_cavity_choose_microfacet_normal(v, h, s.z)
    }

    fn pdf(&self, v: DVec3, h: DVec3, alpha_x: f64, alpha_y: f64, gamma: f64) -> f64 {
        pdf_visible_normals(self, v, h, alpha_x, alpha_y, gamma)
    }
}
