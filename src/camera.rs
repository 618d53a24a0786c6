use fastrand::Rng;
use nalgebra::{Point3, Vector3};

use crate::ray::Ray;
use crate::render::random_vec_in_unit_disk;

/// Thin-lens camera. Construction fixes an orthonormal basis and the focus
/// plane; `get_ray` then only samples the lens aperture.
pub struct Camera {
    origin: Point3<f64>,
    lower_left_corner: Point3<f64>,
    horizontal: Vector3<f64>,
    vertical: Vector3<f64>,
    u: Vector3<f64>,
    v: Vector3<f64>,
    lens_radius: f64,
}

impl Camera {
    /// `vert_fov` is in radians. `focus_dist` places the plane where
    /// everything is sharp; `aperture` is the lens diameter, with zero
    /// giving a pinhole camera.
    pub fn new(
        look_from: Point3<f64>,
        look_at: Point3<f64>,
        v_up: Vector3<f64>,
        vert_fov: f64,
        aspect_ratio: f64,
        aperture: f64,
        focus_dist: f64,
    ) -> Self {
        let viewport_height = 2.0 * (vert_fov / 2.0).tan();
        let viewport_width = aspect_ratio * viewport_height;

        let w = (look_from - look_at).normalize();
        let u = v_up.cross(&w).normalize();
        let v = w.cross(&u);

        let horizontal = focus_dist * viewport_width * u;
        let vertical = focus_dist * viewport_height * v;
        let lower_left_corner = look_from - horizontal / 2.0 - vertical / 2.0 - focus_dist * w;

        Camera {
            origin: look_from,
            lower_left_corner,
            horizontal,
            vertical,
            u,
            v,
            lens_radius: aperture / 2.0,
        }
    }

    /// Emits a ray through the image-plane point `(s, t)`, both normalized
    /// to `[0, 1]` with `(0, 0)` at the lower-left corner. The origin is
    /// jittered across the lens disk, which produces depth-of-field blur
    /// away from the focus plane.
    pub fn get_ray(&self, s: f64, t: f64, rng: &mut Rng) -> Ray {
        let rd = self.lens_radius * random_vec_in_unit_disk(rng);
        let offset = self.u * rd.x + self.v * rd.y;
        Ray::new(
            self.origin + offset,
            (self.lower_left_corner + s * self.horizontal + t * self.vertical) - self.origin
                - offset,
        )
    }
}
