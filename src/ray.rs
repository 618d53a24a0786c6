use nalgebra::{Point3, Vector3};

use crate::material::Material;

pub struct Ray {
    pub origin: Point3<f64>,
    pub direction: Vector3<f64>,
}

impl Ray {
    pub fn new(origin: Point3<f64>, direction: Vector3<f64>) -> Self {
        Self { origin, direction }
    }

    pub fn at(&self, t: f64) -> Point3<f64> {
        self.origin + self.direction * t
    }
}

#[derive(Debug, Eq, PartialEq)]
pub enum Face {
    Front,
    Back,
}

/// Closest intersection found along a ray. `normal` is unit length and
/// always opposes the direction of the ray that produced the hit; `face`
/// records which side of the surface was struck. The material is borrowed
/// from the scene, which outlives every hit record.
pub struct Hit<'a> {
    pub point: Point3<f64>,
    pub normal: Vector3<f64>,
    pub face: Face,
    pub t: f64,
    pub material: &'a Material,
}

#[cfg(test)]
mod tests {
    use nalgebra::{point, vector};

    use super::*;

    #[test]
    fn at_walks_along_direction() {
        let ray = Ray::new(point![2.0, 3.0, 4.0], vector![1.0, 0.0, -2.0]);
        assert_eq!(ray.at(0.0), point![2.0, 3.0, 4.0]);
        assert_eq!(ray.at(1.0), point![3.0, 3.0, 2.0]);
        assert_eq!(ray.at(-0.5), point![1.5, 3.0, 5.0]);
    }
}
