use crate::Float;

/// The Rec. 601 luma coefficients.
const LUMA: &[Float; 3] = &[0.299, 0.587, 0.114];

/// Compute the brightness of the given sRGB coordinates.
///
/// Brightness is Rec. 601 luma, i.e., a weighted sum of the gamma-encoded
/// coordinates. It is not the luminance Y of XYZ.
#[inline]
pub(crate) fn brightness(coordinates: &[Float; 3]) -> Float {
    let [c1, c2, c3] = *LUMA;
    let [r, g, b] = *coordinates;
    r.mul_add(c1, g.mul_add(c2, b * c3))
}

/// Compute the saturation of the given sRGB coordinates.
///
/// This is HSV saturation `(max - min) / max`, with black having zero
/// saturation.
#[inline]
pub(crate) fn saturation(coordinates: &[Float; 3]) -> Float {
    let [r, g, b] = *coordinates;
    let max = r.max(g).max(b);
    if max == 0.0 {
        return 0.0;
    }

    let min = r.min(g).min(b);
    (max - min) / max
}

/// Compute the perceptual distance between two colors in CIE L\*a\*b\*.
///
/// This is the Euclidean distance, i.e., CIE76 ΔE\*, which only
/// approximates CIEDE2000.
#[inline]
pub(crate) fn perceptual_distance(lab1: &[Float; 3], lab2: &[Float; 3]) -> Float {
    let [l1, a1, b1] = *lab1;
    let [l2, a2, b2] = *lab2;

    let dl = l1 - l2;
    let da = a1 - a2;
    let db = b1 - b2;
    dl.mul_add(dl, da.mul_add(da, db * db)).sqrt()
}
