use crate::Float;

/// Convert the given 24-bit RGB coordinates to floating point coordinates.
#[inline]
pub(crate) fn from_24bit(r: u8, g: u8, b: u8) -> [Float; 3] {
    [
        Float::from(r) / 255.0,
        Float::from(g) / 255.0,
        Float::from(b) / 255.0,
    ]
}

/// Convert the color coordinates to 24-bit representation.
///
/// This function clamps the coordinates to unit range before scaling them to
/// `0x00..=0xff` and rounding to the nearest integer.
pub(crate) fn to_24bit(coordinates: &[Float; 3]) -> [u8; 3] {
    #[inline]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn convert(value: Float) -> u8 {
        let value = if value.is_nan() { 0.0 } else { value };
        (value.clamp(0.0, 1.0) * 255.0).round() as u8
    }

    [
        convert(coordinates[0]),
        convert(coordinates[1]),
        convert(coordinates[2]),
    ]
}

// --------------------------------------------------------------------------------------------------------------------

/// Multiply the 3 by 3 matrix and 3-element vector with each other, producing a
/// new 3-element vector.
#[inline]
fn multiply(matrix: &[[Float; 3]; 3], vector: &[Float; 3]) -> [Float; 3] {
    let [row1, row2, row3] = matrix;

    [
        row1[0].mul_add(vector[0], row1[1].mul_add(vector[1], row1[2] * vector[2])),
        row2[0].mul_add(vector[0], row2[1].mul_add(vector[1], row2[2] * vector[2])),
        row3[0].mul_add(vector[0], row3[1].mul_add(vector[1], row3[2] * vector[2])),
    ]
}

// --------------------------------------------------------------------------------------------------------------------

/// Convert gamma-corrected sRGB coordinates to linear sRGB.
fn srgb_to_linear_srgb(value: &[Float; 3]) -> [Float; 3] {
    #[inline]
    fn convert(value: Float) -> Float {
        let magnitude = value.abs();
        if magnitude <= 0.04045 {
            value / 12.92
        } else {
            ((magnitude + 0.055) / 1.055).powf(2.4).copysign(value)
        }
    }

    [convert(value[0]), convert(value[1]), convert(value[2])]
}

/// Convert linear sRGB coordinates to gamma-corrected sRGB.
fn linear_srgb_to_srgb(value: &[Float; 3]) -> [Float; 3] {
    #[inline]
    fn convert(value: Float) -> Float {
        let magnitude = value.abs();
        if magnitude <= 0.0031308 {
            value * 12.92
        } else {
            magnitude
                .powf(1.0 / 2.4)
                .mul_add(1.055, -0.055)
                .copysign(value)
        }
    }

    [convert(value[0]), convert(value[1]), convert(value[2])]
}

// --------------------------------------------------------------------------------------------------------------------
// https://github.com/color-js/color.js/blob/a77e080a070039c534dda3965a769675aac5f75e/src/spaces/srgb-linear.js

#[rustfmt::skip]
#[allow(clippy::excessive_precision)]
const LINEAR_SRGB_TO_XYZ: [[Float; 3]; 3] = [
    [ 0.41239079926595934, 0.357584339383878,   0.1804807884018343  ],
    [ 0.21263900587151027, 0.715168678767756,   0.07219231536073371 ],
    [ 0.01933081871559182, 0.11919477979462598, 0.9505321522496607  ],
];

#[rustfmt::skip]
#[allow(clippy::excessive_precision)]
const XYZ_TO_LINEAR_SRGB: [[Float; 3]; 3] = [
    [  3.2409699419045226,  -1.537383177570094,   -0.4986107602930034  ],
    [ -0.9692436362808796,   1.8759675015077202,   0.04155505740717559 ],
    [  0.05563007969699366, -0.20397695888897652,  1.0569715142428786  ],
];

/// The D65 reference white in XYZ, normalized to Y = 1. It is the image of
/// sRGB white under [`LINEAR_SRGB_TO_XYZ`], so that white maps to a = b = 0.
#[allow(clippy::excessive_precision)]
const D65_WHITE: [Float; 3] = [0.9504559270516716, 1.0, 1.0890577507598784];

/// CIE's ε, the cube of 6/29 rounded as in the 1976 standard.
const EPSILON: Float = 0.008856;

/// CIE's κ, i.e., (29/3)³ rounded as in the 1976 standard.
const KAPPA: Float = 903.3;

// --------------------------------------------------------------------------------------------------------------------

/// Convert sRGB coordinates to CIE L\*a\*b\* under D65.
///
/// The conversion decodes the sRGB gamma, converts linear sRGB to XYZ, scales
/// by the reference white, and applies the piecewise cube-root/linear
/// transfer. Lightness ranges `0..=100` for in-gamut colors.
#[allow(non_snake_case)]
pub(crate) fn rgb_to_lab(value: &[Float; 3]) -> [Float; 3] {
    #[inline]
    fn transfer(t: Float) -> Float {
        if t > EPSILON {
            t.cbrt()
        } else {
            KAPPA.mul_add(t, 16.0) / 116.0
        }
    }

    let [x, y, z] = multiply(&LINEAR_SRGB_TO_XYZ, &srgb_to_linear_srgb(value));
    let fx = transfer(x / D65_WHITE[0]);
    let fy = transfer(y / D65_WHITE[1]);
    let fz = transfer(z / D65_WHITE[2]);

    let L = 116.0_f64.mul_add(fy, -16.0);
    let a = 500.0 * (fx - fy);
    let b = 200.0 * (fy - fz);
    [L, a, b]
}

/// Convert CIE L\*a\*b\* coordinates under D65 to sRGB.
///
/// This is the inverse of [`rgb_to_lab`]. The result is not clamped, so
/// out-of-gamut Lab colors produce coordinates outside unit range.
#[allow(non_snake_case)]
pub(crate) fn lab_to_rgb(value: &[Float; 3]) -> [Float; 3] {
    #[inline]
    fn inverse_transfer(f: Float) -> Float {
        let cube = f * f * f;
        if cube > EPSILON {
            cube
        } else {
            116.0_f64.mul_add(f, -16.0) / KAPPA
        }
    }

    let [L, a, b] = *value;
    let fy = (L + 16.0) / 116.0;
    let fx = a.mul_add(1.0 / 500.0, fy);
    let fz = b.mul_add(-1.0 / 200.0, fy);

    let y = if L > KAPPA * EPSILON {
        fy * fy * fy
    } else {
        L / KAPPA
    };

    let xyz = [
        inverse_transfer(fx) * D65_WHITE[0],
        y * D65_WHITE[1],
        inverse_transfer(fz) * D65_WHITE[2],
    ];

    linear_srgb_to_srgb(&multiply(&XYZ_TO_LINEAR_SRGB, &xyz))
}

// --------------------------------------------------------------------------------------------------------------------

/// Convert sRGB coordinates to HSV.
///
/// Hue is measured in turns, i.e., ranges `0..1` instead of `0..360`.
/// Achromatic colors have a hue of zero. Saturation and value range `0..=1`
/// for in-gamut colors.
pub(crate) fn rgb_to_hsv(value: &[Float; 3]) -> [Float; 3] {
    let [r, g, b] = *value;
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    let hue = if delta == 0.0 {
        0.0
    } else if max == r {
        ((g - b) / delta).rem_euclid(6.0) / 6.0
    } else if max == g {
        ((b - r) / delta + 2.0) / 6.0
    } else {
        ((r - g) / delta + 4.0) / 6.0
    };

    let saturation = if max == 0.0 { 0.0 } else { delta / max };

    [super::math::wrap_unit(hue), saturation, max]
}

/// Convert HSV coordinates to sRGB.
///
/// Hue is measured in turns and wraps around, so `1.25` denotes the same hue
/// as `0.25`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub(crate) fn hsv_to_rgb(value: &[Float; 3]) -> [Float; 3] {
    let [h, s, v] = *value;
    let h6 = super::math::wrap_unit(h) * 6.0;
    let sector = h6.floor();
    let fraction = h6 - sector;

    let p = v * (1.0 - s);
    let q = v * s.mul_add(-fraction, 1.0);
    let t = v * s.mul_add(fraction - 1.0, 1.0);

    match sector as u8 {
        0 => [v, t, p],
        1 => [q, v, p],
        2 => [p, v, t],
        3 => [p, q, v],
        4 => [t, p, v],
        _ => [v, p, q],
    }
}

// ====================================================================================================================
