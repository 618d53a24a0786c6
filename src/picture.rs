use std::iter::Sum;
use std::ops::{Add, Mul};

use image::Rgb;

/// Linear-space RGB color. Accumulated sample sums stay linear; conversion
/// to display pixels happens once, in [`Color::into_rgb8`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Color {
    pub const BLACK: Color = Color::new(0.0, 0.0, 0.0);
    pub const WHITE: Color = Color::new(1.0, 1.0, 1.0);

    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Averages a sum of `samples` linear samples into an 8-bit pixel,
    /// applying gamma-2 correction before quantization.
    pub fn into_rgb8(self, samples: u32) -> Rgb<u8> {
        let scale = 1.0 / samples as f64;
        Rgb([
            quantize((self.r * scale).sqrt()),
            quantize((self.g * scale).sqrt()),
            quantize((self.b * scale).sqrt()),
        ])
    }
}

fn quantize(value: f64) -> u8 {
    (256.0 * value.clamp(0.0, 0.999)) as u8
}

impl Sum for Color {
    fn sum<I: Iterator<Item=Self>>(iter: I) -> Self {
        let mut acc = Color::BLACK;
        for color in iter {
            acc = acc + color;
        }
        acc
    }
}

impl Add for Color {
    type Output = Color;

    fn add(self, rhs: Self) -> Self::Output {
        Color::new(
            self.r + rhs.r,
            self.g + rhs.g,
            self.b + rhs.b,
        )
    }
}

impl Mul<f64> for Color {
    type Output = Color;

    fn mul(self, rhs: f64) -> Self::Output {
        Color::new(
            self.r * rhs,
            self.g * rhs,
            self.b * rhs,
        )
    }
}

impl Mul<Color> for f64 {
    type Output = Color;

    fn mul(self, rhs: Color) -> Self::Output {
        rhs * self
    }
}

// componentwise, used for attenuation compounding along a path
impl Mul for Color {
    type Output = Color;

    fn mul(self, rhs: Color) -> Self::Output {
        Color::new(
            self.r * rhs.r,
            self.g * rhs.g,
            self.b * rhs.b,
        )
    }
}
