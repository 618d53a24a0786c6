use std::ops::Neg;

use fastrand::Rng;
use nalgebra::Vector3;

use crate::picture::Color;
use crate::ray::{Face, Hit, Ray};
use crate::render::{near_zero, random_unit_vec, random_vec_in_unit_sphere};

/// Glass only splits into a hard refract / total-internal-reflect pair.
/// Flipping this on mixes in Schlick's approximation for angle-dependent
/// partial reflection, which the stock renderer leaves disabled.
const SCHLICK_REFLECTANCE: bool = false;

#[derive(Clone, Debug)]
pub enum Material {
    Lambert { albedo: Color },
    Metal { albedo: Color, fuzz: f64 },
    Dielectric { index_of_refraction: f64 },
}

fn reflect(v: &Vector3<f64>, n: &Vector3<f64>) -> Vector3<f64> {
    v - 2.0 * v.dot(n) * n
}

fn refract(uv: &Vector3<f64>, n: &Vector3<f64>, etai_over_etat: f64) -> Vector3<f64> {
    let cos_theta = f64::min((-uv).dot(n), 1.0);
    let r_out_perp = etai_over_etat * (uv + cos_theta * n);
    let r_out_parallel = (1.0 - r_out_perp.magnitude_squared()).abs().sqrt().neg() * n;
    r_out_perp + r_out_parallel
}

fn reflectance(cosine: f64, ref_idx: f64) -> f64 {
    let r0 = ((1.0 - ref_idx) / (1.0 + ref_idx)).powi(2);
    r0 + (1.0 - r0) * (1.0 - cosine).powi(5)
}

impl Material {
    /// Scatters an incoming ray off the surface described by `hit`, or
    /// returns `None` when the ray is absorbed.
    pub fn scatter(&self, ray: &Ray, hit: &Hit, rng: &mut Rng) -> Option<(Color, Ray)> {
        match self {
            Material::Lambert { albedo } => {
                let mut scatter_direction = hit.normal + random_unit_vec(rng);
                // catch the degenerate case where the random unit vector
                // cancels the normal almost exactly.
                if near_zero(&scatter_direction) {
                    scatter_direction = hit.normal;
                }
                let scattered = Ray::new(hit.point, scatter_direction);
                Some((*albedo, scattered))
            }
            Material::Metal { albedo, fuzz } => {
                let reflected = reflect(&ray.direction.normalize(), &hit.normal)
                    + *fuzz * random_vec_in_unit_sphere(rng);
                if reflected.dot(&hit.normal) > 0.0 {
                    Some((*albedo, Ray::new(hit.point, reflected)))
                } else {
                    // fuzz pushed the ray below the surface
                    None
                }
            }
            Material::Dielectric { index_of_refraction } => {
                let refraction_ratio = match hit.face {
                    Face::Front => 1.0 / index_of_refraction,
                    Face::Back => *index_of_refraction,
                };

                let unit_direction = ray.direction.normalize();

                let cos_theta = unit_direction.neg().dot(&hit.normal).min(1.0);
                let sin_theta = (1.0 - cos_theta * cos_theta).sqrt();

                let cannot_refract = refraction_ratio * sin_theta > 1.0;
                let direction = if cannot_refract
                    || (SCHLICK_REFLECTANCE && reflectance(cos_theta, refraction_ratio) > rng.f64())
                {
                    reflect(&unit_direction, &hit.normal)
                } else {
                    refract(&unit_direction, &hit.normal, refraction_ratio)
                };

                Some((Color::WHITE, Ray::new(hit.point, direction)))
            }
        }
    }

    pub fn lambert(albedo: Color) -> Material {
        Material::Lambert { albedo }
    }

    pub fn metal(albedo: Color, fuzz: f64) -> Material {
        Material::Metal { albedo, fuzz: fuzz.clamp(0.0, 1.0) }
    }

    pub fn dielectric(index_of_refraction: f64) -> Material {
        Material::Dielectric { index_of_refraction }
    }
}
