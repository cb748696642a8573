use core::str::FromStr;

#[cfg(feature = "pyffi")]
use pyo3::prelude::*;

use crate::core::{
    brightness, format_hex, from_24bit, hsv_to_rgb, lab_to_rgb, parse_hex, perceptual_distance,
    rgb_to_hsv, rgb_to_lab, saturation, to_24bit,
};
use crate::error::ColorFormatError;
use crate::Float;

/// A color vector.
///
/// Every color vector has three sRGB channels, red, green, and blue, and an
/// optional alpha channel. The same type serves as concrete color, e.g., the
/// output of gradient evaluation, and as per-channel coefficient vector of a
/// [`CosineCoefficients`](crate::CosineCoefficients).
///
/// # Channels
///
/// Channels of concrete colors range `0..=1`. Coefficient vectors are not so
/// constrained; frequencies and phases in particular have arbitrary
/// magnitude. [`ColorVector::clamp`] restricts all channels to unit range.
///
/// The alpha channel is carried along but plays no role in color math. In
/// particular, brightness, saturation, HSV, Lab, and perceptual distance
/// consider red, green, and blue only.
///
/// # String Representation
///
/// The [`Display`](core::fmt::Display) implementation and
/// [`ColorVector::to_hex`] format the sRGB channels as lower case `#rrggbb`.
/// The [`FromStr`] implementation parses hexadecimal colors.
///
/// ```
/// # use prettypalette::{ColorVector, error::ColorFormatError};
/// # fn main() -> Result<(), ColorFormatError> {
/// let rose: ColorVector = "#e8a0bf".parse()?;
/// assert_eq!(rose.to_24bit(), [0xe8, 0xa0, 0xbf]);
/// assert_eq!(rose.to_string(), "#e8a0bf");
/// # Ok(())
/// # }
/// ```
#[cfg_attr(feature = "pyffi", pyclass(eq, frozen, module = "prettypalette"))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColorVector {
    coordinates: [Float; 3],
    alpha: Option<Float>,
}

impl ColorVector {
    /// Create a new color vector with the given red, green, and blue channels.
    pub const fn new(red: Float, green: Float, blue: Float) -> Self {
        Self {
            coordinates: [red, green, blue],
            alpha: None,
        }
    }

    /// Create a new color vector with red, green, blue, and alpha channels.
    pub const fn with_alpha(red: Float, green: Float, blue: Float, alpha: Float) -> Self {
        Self {
            coordinates: [red, green, blue],
            alpha: Some(alpha),
        }
    }

    /// Create a new color vector from 24-bit sRGB coordinates.
    pub fn from_24bit(r: u8, g: u8, b: u8) -> Self {
        Self::from(from_24bit(r, g, b))
    }

    /// Create a new color vector from HSV coordinates.
    ///
    /// Hue is measured in turns, not degrees, and wraps around.
    pub fn from_hsv(hsv: [Float; 3]) -> Self {
        Self::from(hsv_to_rgb(&hsv))
    }

    /// Create a new color vector from CIE L\*a\*b\* coordinates.
    ///
    /// The result may be out of sRGB gamut and is not clamped.
    pub fn from_lab(lab: [Float; 3]) -> Self {
        Self::from(lab_to_rgb(&lab))
    }

    /// Get the red, green, and blue channels.
    #[inline]
    pub const fn coordinates(&self) -> &[Float; 3] {
        &self.coordinates
    }

    /// Get the red channel.
    #[inline]
    pub const fn red(&self) -> Float {
        self.coordinates[0]
    }

    /// Get the green channel.
    #[inline]
    pub const fn green(&self) -> Float {
        self.coordinates[1]
    }

    /// Get the blue channel.
    #[inline]
    pub const fn blue(&self) -> Float {
        self.coordinates[2]
    }

    /// Get the alpha channel, if any.
    #[inline]
    pub const fn alpha(&self) -> Option<Float> {
        self.alpha
    }

    /// Determine the number of channels, which is 3 without and 4 with alpha.
    #[inline]
    pub const fn channel_count(&self) -> usize {
        if self.alpha.is_some() {
            4
        } else {
            3
        }
    }

    /// Clamp all channels, including alpha, to unit range.
    #[must_use = "method returns a new color vector and does not mutate original value"]
    pub fn clamp(&self) -> Self {
        let [r, g, b] = self.coordinates;
        Self {
            coordinates: [r.clamp(0.0, 1.0), g.clamp(0.0, 1.0), b.clamp(0.0, 1.0)],
            alpha: self.alpha.map(|a| a.clamp(0.0, 1.0)),
        }
    }

    /// Convert to 24-bit sRGB coordinates, clamping and rounding each channel.
    pub fn to_24bit(&self) -> [u8; 3] {
        to_24bit(&self.coordinates)
    }

    /// Format as a lower case `#rrggbb` string, ignoring alpha.
    pub fn to_hex(&self) -> String {
        format_hex(&self.coordinates)
    }

    /// Convert to HSV coordinates, with hue in turns `0..1`.
    pub fn to_hsv(&self) -> [Float; 3] {
        rgb_to_hsv(&self.coordinates)
    }

    /// Convert to CIE L\*a\*b\* coordinates under D65.
    pub fn to_lab(&self) -> [Float; 3] {
        rgb_to_lab(&self.coordinates)
    }

    /// Compute the brightness, i.e., `0.299R + 0.587G + 0.114B`.
    pub fn brightness(&self) -> Float {
        brightness(&self.coordinates)
    }

    /// Compute the HSV saturation `(max - min) / max`, which is 0 for black.
    pub fn saturation(&self) -> Float {
        saturation(&self.coordinates)
    }

    /// Compute the perceptual distance to the other color.
    ///
    /// This method computes the Euclidean distance in CIE L\*a\*b\*, which
    /// approximates but is not CIEDE2000. Since perceptual distance is
    /// symmetric, receiver and argument are interchangeable.
    pub fn distance(&self, other: &Self) -> Float {
        perceptual_distance(&self.to_lab(), &other.to_lab())
    }
}

impl From<[Float; 3]> for ColorVector {
    fn from(value: [Float; 3]) -> Self {
        Self {
            coordinates: value,
            alpha: None,
        }
    }
}

impl From<[Float; 4]> for ColorVector {
    fn from(value: [Float; 4]) -> Self {
        let [r, g, b, a] = value;
        Self::with_alpha(r, g, b, a)
    }
}

impl AsRef<[Float; 3]> for ColorVector {
    fn as_ref(&self) -> &[Float; 3] {
        &self.coordinates
    }
}

impl FromStr for ColorVector {
    type Err = ColorFormatError;

    /// Parse a hexadecimal sRGB color, with or without leading `#`, in the
    /// six or three digit format.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_hex(s).map(Self::from)
    }
}

impl core::fmt::Display for ColorVector {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Parse the hexadecimal string as an sRGB color vector.
///
/// This function accepts `#rrggbb` as well as the three digit shorthand, with
/// or without hash, and ignores surrounding white space. Any other string
/// results in a [`ColorFormatError`].
pub fn hex_to_rgb(s: &str) -> Result<ColorVector, ColorFormatError> {
    ColorVector::from_str(s)
}

/// Format the color vector as a lower case `#rrggbb` string.
///
/// Each channel is clamped to unit range, scaled to `0..=255`, and rounded to
/// the nearest integer. The alpha channel is ignored.
pub fn rgb_to_hex(color: &ColorVector) -> String {
    color.to_hex()
}

#[cfg(feature = "pyffi")]
#[pymethods]
impl ColorVector {
    /// Create a new color vector. <i class=python-only>Python only!</i>
    #[new]
    #[pyo3(signature = (red, green, blue, alpha=None))]
    pub fn py_new(red: Float, green: Float, blue: Float, alpha: Option<Float>) -> Self {
        Self {
            coordinates: [red, green, blue],
            alpha,
        }
    }

    /// Parse a hexadecimal color. <i class=python-only>Python only!</i>
    #[staticmethod]
    pub fn parse(s: &str) -> Result<Self, ColorFormatError> {
        Self::from_str(s)
    }

    /// Get the red channel. <i class=python-only>Python only!</i>
    #[getter(red)]
    pub fn py_red(&self) -> Float {
        self.red()
    }

    /// Get the green channel. <i class=python-only>Python only!</i>
    #[getter(green)]
    pub fn py_green(&self) -> Float {
        self.green()
    }

    /// Get the blue channel. <i class=python-only>Python only!</i>
    #[getter(blue)]
    pub fn py_blue(&self) -> Float {
        self.blue()
    }

    /// Get the alpha channel. <i class=python-only>Python only!</i>
    #[getter(alpha)]
    pub fn py_alpha(&self) -> Option<Float> {
        self.alpha()
    }

    /// Format as `#rrggbb`. <i class=python-only>Python only!</i>
    #[pyo3(name = "to_hex")]
    pub fn py_to_hex(&self) -> String {
        self.to_hex()
    }

    /// Compute the brightness. <i class=python-only>Python only!</i>
    #[pyo3(name = "brightness")]
    pub fn py_brightness(&self) -> Float {
        self.brightness()
    }

    /// Compute the saturation. <i class=python-only>Python only!</i>
    #[pyo3(name = "saturation")]
    pub fn py_saturation(&self) -> Float {
        self.saturation()
    }

    /// Convert to HSV. <i class=python-only>Python only!</i>
    #[pyo3(name = "to_hsv")]
    pub fn py_to_hsv(&self) -> [Float; 3] {
        self.to_hsv()
    }

    /// Convert to CIE L\*a\*b\*. <i class=python-only>Python only!</i>
    #[pyo3(name = "to_lab")]
    pub fn py_to_lab(&self) -> [Float; 3] {
        self.to_lab()
    }

    /// Compute the perceptual distance. <i class=python-only>Python only!</i>
    #[pyo3(name = "distance")]
    pub fn py_distance(&self, other: &Self) -> Float {
        self.distance(other)
    }

    /// Get the number of channels. <i class=python-only>Python only!</i>
    pub fn __len__(&self) -> usize {
        self.channel_count()
    }

    /// Get a debug representation. <i class=python-only>Python only!</i>
    pub fn __repr__(&self) -> String {
        let [r, g, b] = self.coordinates;
        match self.alpha {
            Some(a) => format!("ColorVector({}, {}, {}, {})", r, g, b, a),
            None => format!("ColorVector({}, {}, {})", r, g, b),
        }
    }

    /// Get the hexadecimal representation. <i class=python-only>Python only!</i>
    pub fn __str__(&self) -> String {
        self.to_hex()
    }
}

// ====================================================================================================================

#[cfg(test)]
mod test {
    use super::{hex_to_rgb, rgb_to_hex, ColorVector};
    use crate::core::assert_within;
    use crate::error::ColorFormatError;

    #[test]
    fn test_channels() {
        let color = ColorVector::new(0.1, 0.2, 0.3);
        assert_eq!(color.channel_count(), 3);
        assert_eq!(color.alpha(), None);

        let color = ColorVector::with_alpha(0.1, 0.2, 0.3, 0.4);
        assert_eq!(color.channel_count(), 4);
        assert_eq!(color.alpha(), Some(0.4));
        assert_eq!(color.coordinates(), &[0.1, 0.2, 0.3]);

        let clamped = ColorVector::with_alpha(-0.5, 0.5, 1.5, 2.0).clamp();
        assert_eq!(clamped, ColorVector::with_alpha(0.0, 0.5, 1.0, 1.0));
    }

    #[test]
    fn test_hex() -> Result<(), ColorFormatError> {
        let color = hex_to_rgb("#336699")?;
        assert_eq!(color.to_24bit(), [0x33, 0x66, 0x99]);
        assert_eq!(rgb_to_hex(&color), "#336699");
        assert_eq!(format!("{}", ColorVector::new(1.0, 1.0, 1.0)), "#ffffff");
        assert_eq!(
            "#33669".parse::<ColorVector>(),
            Err(ColorFormatError::UnexpectedCharacters)
        );
        assert_eq!(
            rgb_to_hex(&ColorVector::with_alpha(0.0, 0.0, 0.0, 0.5)),
            "#000000"
        );
        Ok(())
    }

    #[test]
    fn test_color_math() {
        let red = ColorVector::new(1.0, 0.0, 0.0);
        let also_red = ColorVector::with_alpha(1.0, 0.0, 0.0, 0.25);
        assert_eq!(red.distance(&also_red), 0.0);
        assert_within!(red.to_hsv(), [0.0, 1.0, 1.0], 1e-12);
        assert_within!(
            ColorVector::from_hsv([0.0, 1.0, 1.0]).coordinates(),
            red.coordinates(),
            1e-12
        );
        let from_lab = ColorVector::from_lab(red.to_lab());
        assert_within!(from_lab.coordinates(), red.coordinates(), 1e-9);

        let blue = ColorVector::new(0.0, 0.0, 1.0);
        assert!(red.distance(&blue) > 100.0);
        assert_eq!(red.distance(&blue), blue.distance(&red));
    }
}
