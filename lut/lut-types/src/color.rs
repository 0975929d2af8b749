//! Device and perceptual colour types.

use serde::{Deserialize, Serialize};

/// RGB color with 8-bit components, in device (sRGB) space.
///
/// This is the space materials are specified in and the space the
/// selection distance metric operates in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    /// Red component (0-255).
    pub r: u8,
    /// Green component (0-255).
    pub g: u8,
    /// Blue component (0-255).
    pub b: u8,
}

impl Rgb {
    /// Create a new color from RGB components.
    ///
    /// # Example
    ///
    /// ```
    /// use lut_types::Rgb;
    ///
    /// let red = Rgb::new(255, 0, 0);
    /// assert_eq!(red.r, 255);
    /// ```
    #[inline]
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Create a color from real-valued channels by truncation.
    ///
    /// Each channel is clamped to `[0, 255]` and then truncated toward zero,
    /// never rounded: `254.99` becomes `254`.
    ///
    /// # Example
    ///
    /// ```
    /// use lut_types::Rgb;
    ///
    /// let color = Rgb::truncate([254.99, 0.5, 300.0]);
    /// assert_eq!(color, Rgb::new(254, 0, 255));
    /// ```
    #[inline]
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    // Truncation is the contract here; values are clamped to [0, 255] first
    pub fn truncate(channels: [f64; 3]) -> Self {
        let [r, g, b] = channels.map(|c| c.clamp(0.0, 255.0) as u8);
        Self { r, g, b }
    }

    /// Channels as `f64`, in the same 0-255 scale.
    #[inline]
    #[must_use]
    pub fn to_f64(self) -> [f64; 3] {
        [f64::from(self.r), f64::from(self.g), f64::from(self.b)]
    }

    /// Channels as an array.
    #[inline]
    #[must_use]
    pub const fn to_array(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Squared Euclidean distance between two colors in device RGB.
    #[inline]
    #[must_use]
    pub fn distance_squared(self, other: Self) -> u32 {
        let dr = i32::from(self.r) - i32::from(other.r);
        let dg = i32::from(self.g) - i32::from(other.g);
        let db = i32::from(self.b) - i32::from(other.b);
        (dr * dr + dg * dg + db * db).unsigned_abs()
    }

    /// Euclidean distance between two colors in device RGB.
    ///
    /// # Example
    ///
    /// ```
    /// use lut_types::Rgb;
    ///
    /// let d = Rgb::new(0, 0, 0).distance(Rgb::new(3, 4, 0));
    /// assert!((d - 5.0).abs() < 1e-12);
    /// ```
    #[inline]
    #[must_use]
    pub fn distance(self, other: Self) -> f64 {
        f64::from(self.distance_squared(other)).sqrt()
    }

    /// Black color (0, 0, 0).
    pub const BLACK: Self = Self::new(0, 0, 0);

    /// White color (255, 255, 255).
    pub const WHITE: Self = Self::new(255, 255, 255);
}

impl Default for Rgb {
    fn default() -> Self {
        Self::WHITE
    }
}

impl From<[u8; 3]> for Rgb {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self { r, g, b }
    }
}

impl std::fmt::Display for Rgb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "RGB({}, {}, {})", self.r, self.g, self.b)
    }
}

// sRGB primaries to XYZ, D65 reference white.
const SRGB_TO_XYZ: [[f64; 3]; 3] = [
    [0.412_456_4, 0.357_576_1, 0.180_437_5],
    [0.212_672_9, 0.715_152_2, 0.072_175_0],
    [0.019_333_9, 0.119_192_0, 0.950_304_1],
];

const LAB_EPSILON: f64 = 216.0 / 24389.0;
const LAB_KAPPA: f64 = 24389.0 / 27.0;

/// CIELAB color (D65 reference white).
///
/// Only used for reporting; selection never looks at it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Lab {
    /// Lightness, 0 (black) to 100 (white).
    pub l: f64,
    /// Green (-) to red (+) axis.
    pub a: f64,
    /// Blue (-) to yellow (+) axis.
    pub b: f64,
}

impl Lab {
    /// Convert a device RGB color to CIELAB.
    ///
    /// # Example
    ///
    /// ```
    /// use lut_types::{Lab, Rgb};
    ///
    /// let white = Lab::from_rgb(Rgb::WHITE);
    /// assert!((white.l - 100.0).abs() < 1e-3);
    /// assert!(white.a.abs() < 1e-3 && white.b.abs() < 1e-3);
    /// ```
    #[must_use]
    pub fn from_rgb(color: Rgb) -> Self {
        let linear = color.to_f64().map(|c| srgb_to_linear(c / 255.0));
        let xyz = SRGB_TO_XYZ.map(|row| dot(row, linear));
        // Reference white is whatever the matrix maps (1, 1, 1) to.
        let white = SRGB_TO_XYZ.map(|row| dot(row, [1.0; 3]));

        let [fx, fy, fz] = [0, 1, 2].map(|i| lab_f(xyz[i] / white[i]));
        Self {
            l: 116.0f64.mul_add(fy, -16.0),
            a: 500.0 * (fx - fy),
            b: 200.0 * (fy - fz),
        }
    }

    /// CIE76 colour difference (Euclidean distance in Lab).
    #[must_use]
    pub fn delta_e76(self, other: Self) -> f64 {
        let dl = self.l - other.l;
        let da = self.a - other.a;
        let db = self.b - other.b;
        db.mul_add(db, dl.mul_add(dl, da * da)).sqrt()
    }

    /// Chroma (distance from the neutral axis).
    #[must_use]
    pub fn chroma(self) -> f64 {
        self.a.hypot(self.b)
    }
}

impl From<Rgb> for Lab {
    fn from(color: Rgb) -> Self {
        Self::from_rgb(color)
    }
}

fn srgb_to_linear(c: f64) -> f64 {
    if c <= 0.040_45 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

fn lab_f(t: f64) -> f64 {
    if t > LAB_EPSILON {
        t.cbrt()
    } else {
        LAB_KAPPA.mul_add(t, 16.0) / 116.0
    }
}

fn dot(row: [f64; 3], v: [f64; 3]) -> f64 {
    row[2].mul_add(v[2], row[0].mul_add(v[0], row[1] * v[1]))
}
