//! Simple path-tracing renderer, following the
//! [Ray Tracing in One Weekend](https://raytracing.github.io/) book series.
//!
//! Traces a fixed demo scene with a thin-lens camera and writes the result
//! to `render.png`.

use std::f64::consts::PI;
use std::sync::Arc;
use std::time::Instant;

use fastrand::Rng;
use log::info;
use nalgebra::{point, vector};

use crate::camera::Camera;
use crate::material::Material;
use crate::object::{Object, Sphere};
use crate::picture::Color;
use crate::render::{random_range, render_picture};

mod camera;
mod material;
mod object;
mod picture;
mod ray;
mod render;

const ASPECT_RATIO: f64 = 3.0 / 2.0;
const IMAGE_WIDTH: u32 = 600;
const IMAGE_HEIGHT: u32 = (IMAGE_WIDTH as f64 / ASPECT_RATIO) as u32;
const SAMPLES_PER_PIXEL: u32 = 20;

/// Ground plane, three feature spheres, and a grid of small random ones.
fn random_scene(rng: &mut Rng) -> Object {
    let mut objects = Vec::new();

    let ground = Arc::new(Material::lambert(Color::new(0.5, 0.5, 0.5)));
    objects.push(Object::Sphere(Sphere::new(point![0.0, -1000.0, 0.0], 1000.0, ground)));

    // one glass material backs every glass sphere in the scene
    let glass = Arc::new(Material::dielectric(1.5));
    objects.push(Object::Sphere(Sphere::new(point![0.0, 1.0, 0.0], 1.0, glass.clone())));

    let brown = Arc::new(Material::lambert(Color::new(0.4, 0.2, 0.1)));
    objects.push(Object::Sphere(Sphere::new(point![-4.0, 1.0, 0.0], 1.0, brown)));

    let steel = Arc::new(Material::metal(Color::new(0.7, 0.6, 0.5), 0.0));
    objects.push(Object::Sphere(Sphere::new(point![4.0, 1.0, 0.0], 1.0, steel)));

    for a in -11..11 {
        for b in -11..11 {
            let choose_mat = rng.f64();
            let center = point![
                a as f64 + random_range(rng, 0.0, 0.9),
                0.2,
                b as f64 + random_range(rng, 0.0, 0.9)
            ];

            if (center - point![4.0, 0.2, 0.0]).magnitude() <= 0.9 {
                continue;
            }

            let material = if choose_mat < 0.8 {
                let albedo = Color::new(
                    rng.f64() * rng.f64(),
                    rng.f64() * rng.f64(),
                    rng.f64() * rng.f64(),
                );
                Arc::new(Material::lambert(albedo))
            } else if choose_mat < 0.95 {
                let albedo = Color::new(
                    random_range(rng, 0.5, 1.0),
                    random_range(rng, 0.5, 1.0),
                    random_range(rng, 0.5, 1.0),
                );
                Arc::new(Material::metal(albedo, random_range(rng, 0.0, 0.5)))
            } else {
                glass.clone()
            };
            objects.push(Object::Sphere(Sphere::new(center, 0.2, material)));
        }
    }

    Object::List(objects)
}

fn main() -> image::ImageResult<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut rng = Rng::new();
    let world = random_scene(&mut rng);

    let camera = Camera::new(
        point![13.0, 2.0, 3.0],
        point![0.0, 0.0, 0.0],
        vector![0.0, 1.0, 0.0],
        PI / 9.0,
        ASPECT_RATIO,
        0.1,
        10.0,
    );

    info!(target: "app", "Rendering {IMAGE_WIDTH}x{IMAGE_HEIGHT} at {SAMPLES_PER_PIXEL} samples per pixel...");
    let start = Instant::now();
    let image = render_picture(
        &camera,
        &world,
        (IMAGE_WIDTH, IMAGE_HEIGHT),
        SAMPLES_PER_PIXEL,
        &mut rng,
    );
    info!(target: "app", "Finished rendering. Took {:?}", start.elapsed());

    image.save("render.png")?;
    info!(target: "app", "Saved render.png");
    Ok(())
}
