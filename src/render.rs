use std::iter::repeat_with;

use fastrand::Rng;
use image::RgbImage;
use log::trace;
use nalgebra::{vector, Vector3};

use crate::camera::Camera;
use crate::object::Object;
use crate::picture::Color;
use crate::ray::Ray;

const MAX_BOUNCES: u32 = 8;

/// Lower bound on the hit parameter, suppressing self-intersection of a
/// scattered ray with the surface it just left ("shadow acne").
const ACNE_THRESHOLD: f64 = 0.001;

pub fn random_range(rng: &mut Rng, min: f64, max: f64) -> f64 {
    min + (max - min) * rng.f64()
}

pub fn random_vec(rng: &mut Rng) -> Vector3<f64> {
    vector![
        random_range(rng, -1.0, 1.0),
        random_range(rng, -1.0, 1.0),
        random_range(rng, -1.0, 1.0)
    ]
}

pub fn random_vec_in_unit_sphere(rng: &mut Rng) -> Vector3<f64> {
    repeat_with(|| random_vec(rng))
        .find(|vec| vec.magnitude_squared() < 1.0)
        .expect("infinite iterator")
}

pub fn random_unit_vec(rng: &mut Rng) -> Vector3<f64> {
    random_vec_in_unit_sphere(rng).normalize()
}

pub fn random_vec_in_unit_disk(rng: &mut Rng) -> Vector3<f64> {
    repeat_with(|| vector![random_range(rng, -1.0, 1.0), random_range(rng, -1.0, 1.0), 0.0])
        .find(|vec| vec.magnitude_squared() < 1.0)
        .expect("infinite iterator")
}

pub fn near_zero(vec: &Vector3<f64>) -> bool {
    const S: f64 = 1e-8;
    vec.x.abs() < S && vec.y.abs() < S && vec.z.abs() < S
}

/// Estimates the radiance arriving along `ray` by following scattered
/// bounces until the ray escapes to the background, is absorbed, or the
/// bounce budget runs out.
pub fn render_ray(ray: &Ray, world: &Object, bounces_left: u32, rng: &mut Rng) -> Color {
    if bounces_left == 0 {
        return Color::BLACK;
    }

    if let Some(hit) = world.hit(ray, ACNE_THRESHOLD..) {
        return match hit.material.scatter(ray, &hit, rng) {
            Some((attenuation, scattered)) => {
                attenuation * render_ray(&scattered, world, bounces_left - 1, rng)
            }
            None => Color::BLACK,
        };
    }

    let unit_direction = ray.direction.normalize();
    let t = 0.5 * (unit_direction.y + 1.0);
    (1.0 - t) * Color::WHITE + t * Color::new(0.5, 0.7, 1.0)
}

/// Accumulates `samples` jittered radiance estimates for one pixel. The sum
/// stays in linear space; averaging and gamma correction are the caller's
/// concern.
pub fn render_pixel(
    (x, y): (u32, u32),
    (width, height): (u32, u32),
    camera: &Camera,
    world: &Object,
    samples: u32,
    rng: &mut Rng,
) -> Color {
    (0..samples)
        .map(|_| {
            let u = (x as f64 + rng.f64()) / (width - 1) as f64;
            let v = (y as f64 + rng.f64()) / (height - 1) as f64;
            let ray = camera.get_ray(u, v, rng);
            render_ray(&ray, world, MAX_BOUNCES, rng)
        })
        .sum()
}

/// Renders the whole frame scanline by scanline, bottom to top.
pub fn render_picture(
    camera: &Camera,
    world: &Object,
    (width, height): (u32, u32),
    samples: u32,
    rng: &mut Rng,
) -> RgbImage {
    let mut image = RgbImage::new(width, height);
    for y in (0..height).rev() {
        trace!(target: "app", "Rendering scanline {y}");
        for x in 0..width {
            let acc = render_pixel((x, y), (width, height), camera, world, samples, rng);
            // pixel rows count down from the top of the image buffer
            image.put_pixel(x, height - 1 - y, acc.into_rgb8(samples));
        }
    }
    image
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use nalgebra::{point, Point3};

    use crate::material::Material;
    use crate::object::Sphere;

    use super::*;

    fn assert_color_eq(actual: Color, expected: Color) {
        assert!(
            (actual.r - expected.r).abs() < 1e-12
                && (actual.g - expected.g).abs() < 1e-12
                && (actual.b - expected.b).abs() < 1e-12,
            "expected {expected:?}, got {actual:?}"
        );
    }

    #[test]
    fn unit_sphere_samples_stay_inside_the_sphere() {
        let mut rng = Rng::with_seed(42);
        for _ in 0..1000 {
            assert!(random_vec_in_unit_sphere(&mut rng).magnitude_squared() < 1.0);
        }
    }

    #[test]
    fn unit_vec_samples_have_unit_length() {
        let mut rng = Rng::with_seed(42);
        for _ in 0..1000 {
            let vec = random_unit_vec(&mut rng);
            assert!((vec.magnitude() - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn unit_disk_samples_stay_in_the_plane() {
        let mut rng = Rng::with_seed(42);
        for _ in 0..1000 {
            let vec = random_vec_in_unit_disk(&mut rng);
            assert_eq!(vec.z, 0.0);
            assert!(vec.magnitude_squared() < 1.0);
        }
    }

    #[test]
    fn near_zero_detects_degenerate_directions() {
        assert!(near_zero(&vector![1e-9, -1e-9, 0.0]));
        assert!(!near_zero(&vector![1e-9, 1e-7, 0.0]));
    }

    #[test]
    fn exhausted_bounce_budget_is_black() {
        let mut rng = Rng::with_seed(42);
        let world = Object::List(vec![]);
        let ray = Ray::new(Point3::origin(), vector![0.0, 1.0, 0.0]);
        assert_eq!(render_ray(&ray, &world, 0, &mut rng), Color::BLACK);
    }

    #[test]
    fn background_gradient_endpoints() {
        let mut rng = Rng::with_seed(42);
        let world = Object::List(vec![]);

        let up = Ray::new(Point3::origin(), vector![0.0, 1.0, 0.0]);
        assert_color_eq(render_ray(&up, &world, 8, &mut rng), Color::new(0.5, 0.7, 1.0));

        let down = Ray::new(Point3::origin(), vector![0.0, -1.0, 0.0]);
        assert_color_eq(render_ray(&down, &world, 8, &mut rng), Color::WHITE);
    }

    #[test]
    fn mirror_bounce_attenuates_the_background() {
        let mut rng = Rng::with_seed(42);
        // a fuzz-free mirror below the ray bounces it straight back up into
        // the horizon color, tinted by the mirror's albedo
        let mirror = Arc::new(Material::metal(Color::new(0.8, 0.8, 0.8), 0.0));
        let world = Object::Sphere(Sphere::new(point![0.0, 0.0, -2.0], 1.0, mirror));
        let ray = Ray::new(Point3::origin(), vector![0.0, 0.0, -1.0]);

        let horizon = 0.5 * Color::WHITE + 0.5 * Color::new(0.5, 0.7, 1.0);
        let expected = Color::new(0.8, 0.8, 0.8) * horizon;
        assert_color_eq(render_ray(&ray, &world, 8, &mut rng), expected);
    }

    #[test]
    fn ray_trapped_in_a_mirror_sphere_exhausts_its_bounces() {
        let mut rng = Rng::with_seed(42);
        let mirror = Arc::new(Material::metal(Color::WHITE, 0.0));
        let world = Object::Sphere(Sphere::new(point![0.0, 0.0, -2.0], 1.0, mirror));
        // fired from the center, the ray reflects back and forth across the
        // interior forever; the bounce budget cuts it off at black
        let ray = Ray::new(point![0.0, 0.0, -2.0], vector![0.0, 0.0, 1.0]);

        assert_color_eq(render_ray(&ray, &world, 8, &mut rng), Color::BLACK);
    }
}
