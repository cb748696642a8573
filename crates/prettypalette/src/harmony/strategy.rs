//! The per-category strategies for constructing coefficients.
//!
//! Hues and phases are both measured in turns, so that a strategy can use a
//! hue directly as phase. Offsets derived from a base color start from HSV,
//! which keeps saturation and value within predictable bounds.

use rand::Rng;

use super::{HarmonyCategory, PASTEL_MAX_SATURATION};
use crate::core::{hsv_to_rgb, wrap_unit, TAU};
use crate::validate::{is_earthy, is_low_saturation};
use crate::{ColorVector, CosineCoefficients, Float};

/// One radian in turns.
const RADIAN: Float = 1.0 / TAU;

/// Thirty degrees in turns.
const TWELFTH: Float = 1.0 / 12.0;

/// The hue ranges of earth tones: browns and oranges, greens, yellows and
/// tans, as well as reds and terracotta. The last range wraps around.
const EARTHY_HUES: [(Float, Float); 4] = [(0.03, 0.1), (0.2, 0.4), (0.1, 0.16), (0.96, 1.02)];

#[inline]
fn scale(color: &[Float; 3], factor: Float) -> [Float; 3] {
    [color[0] * factor, color[1] * factor, color[2] * factor]
}

#[inline]
fn jitter<R: Rng + ?Sized>(rng: &mut R, amount: Float) -> Float {
    rng.random_range(-amount..=amount)
}

/// Construct random coefficients for the given category.
pub(super) fn propose<R: Rng + ?Sized>(
    category: HarmonyCategory,
    rng: &mut R,
) -> CosineCoefficients {
    use HarmonyCategory::*;

    match category {
        Monochromatic => monochromatic(rng),
        Analogous => analogous(rng),
        Complementary => complementary(rng),
        SplitComplementary => split_complementary(rng),
        HighContrast => high_contrast(rng),
        Pastel => pastel(rng),
        Earthy => earthy(rng),
        Random => random(rng),
    }
}

/// Determine whether the colors pass the category's additional checks.
pub(super) fn accepts(category: HarmonyCategory, colors: &[ColorVector]) -> bool {
    match category {
        HarmonyCategory::Pastel => is_low_saturation(colors, PASTEL_MAX_SATURATION),
        HarmonyCategory::Earthy => is_earthy(colors),
        _ => true,
    }
}

fn monochromatic<R: Rng + ?Sized>(rng: &mut R) -> CosineCoefficients {
    let hue = rng.random_range(0.0..1.0);
    let base = hsv_to_rgb(&[
        hue,
        rng.random_range(0.35..=0.7),
        rng.random_range(0.45..=0.65),
    ]);
    let amplitude = scale(&base, rng.random_range(0.3..=0.5));
    let frequency = rng.random_range(0.2..=0.4);

    let mut phase = [0.0; 3];
    for p in phase.iter_mut() {
        *p = wrap_unit(hue + jitter(rng, 0.1 * RADIAN));
    }

    CosineCoefficients::new(base, amplitude, [frequency; 3], phase)
}

fn analogous<R: Rng + ?Sized>(rng: &mut R) -> CosineCoefficients {
    let hue = rng.random_range(0.0..1.0);
    let base = hsv_to_rgb(&[
        hue,
        rng.random_range(0.3..=0.55),
        rng.random_range(0.5..=0.7),
    ]);

    let mut amplitude = [0.0; 3];
    let mut frequency = [0.0; 3];
    for index in 0..3 {
        amplitude[index] = rng.random_range(0.2..=0.35);
        frequency[index] = rng.random_range(0.5..=1.0);
    }

    let phase = [
        hue,
        wrap_unit(TWELFTH.mul_add(rng.random_range(0.25..=0.5), hue)),
        wrap_unit(TWELFTH.mul_add(rng.random_range(0.5..=1.0), hue)),
    ];

    CosineCoefficients::new(base, amplitude, frequency, phase)
}

fn complementary<R: Rng + ?Sized>(rng: &mut R) -> CosineCoefficients {
    let hue = rng.random_range(0.0..1.0);
    let opposite = wrap_unit(hue + 0.5);

    let mut offset = [0.0; 3];
    let mut amplitude = [0.0; 3];
    let mut frequency = [0.0; 3];
    for index in 0..3 {
        offset[index] = rng.random_range(0.4..=0.6);
        amplitude[index] = rng.random_range(0.3..=0.45);
        frequency[index] = rng.random_range(0.5..=1.0);
    }

    let middle = if rng.random_bool(0.5) { hue } else { opposite };
    CosineCoefficients::new(offset, amplitude, frequency, [hue, middle, opposite])
}

fn split_complementary<R: Rng + ?Sized>(rng: &mut R) -> CosineCoefficients {
    let hue = rng.random_range(0.0..1.0);

    let mut offset = [0.0; 3];
    let mut amplitude = [0.0; 3];
    let mut frequency = [0.0; 3];
    for index in 0..3 {
        offset[index] = rng.random_range(0.4..=0.6);
        amplitude[index] = rng.random_range(0.3..=0.45);
        frequency[index] = rng.random_range(0.6..=1.0);
    }

    let phase = [
        hue,
        wrap_unit(hue + 0.5 - TWELFTH),
        wrap_unit(hue + 0.5 + TWELFTH),
    ];

    CosineCoefficients::new(offset, amplitude, frequency, phase)
}

fn high_contrast<R: Rng + ?Sized>(rng: &mut R) -> CosineCoefficients {
    let hue = rng.random_range(0.0..1.0);

    let mut offset = [0.0; 3];
    let mut amplitude = [0.0; 3];
    let mut frequency = [0.0; 3];
    for index in 0..3 {
        offset[index] = rng.random_range(0.45..=0.55);
        amplitude[index] = rng.random_range(0.35..=0.5);
        frequency[index] = rng.random_range(0.5..=1.0);
    }

    let phase = [hue, wrap_unit(hue + 0.25), wrap_unit(hue + 0.5)];
    CosineCoefficients::new(offset, amplitude, frequency, phase)
}

fn pastel<R: Rng + ?Sized>(rng: &mut R) -> CosineCoefficients {
    let hue = rng.random_range(0.0..1.0);

    let mut offset = [0.0; 3];
    let mut amplitude = [0.0; 3];
    let mut frequency = [0.0; 3];
    let mut phase = [0.0; 3];
    for index in 0..3 {
        offset[index] = rng.random_range(0.7..=0.95);
        amplitude[index] = rng.random_range(0.05..=0.2);
        frequency[index] = rng.random_range(0.3..=0.8);
        #[allow(clippy::cast_precision_loss)]
        let third = index as Float / 3.0;
        phase[index] = wrap_unit(hue + third + jitter(rng, 0.05));
    }

    CosineCoefficients::new(offset, amplitude, frequency, phase)
}

fn earthy<R: Rng + ?Sized>(rng: &mut R) -> CosineCoefficients {
    let (low, high) = EARTHY_HUES[rng.random_range(0..EARTHY_HUES.len())];
    let hue = wrap_unit(rng.random_range(low..=high));

    let base = hsv_to_rgb(&[
        hue,
        rng.random_range(0.3..=0.6),
        rng.random_range(0.45..=0.7),
    ]);
    let amplitude = scale(&base, rng.random_range(0.2..=0.4));
    let frequency = rng.random_range(0.3..=0.5);

    let mut phase = [0.0; 3];
    for p in phase.iter_mut() {
        *p = wrap_unit(hue + jitter(rng, 0.01));
    }

    CosineCoefficients::new(base, amplitude, [frequency; 3], phase)
}

fn random<R: Rng + ?Sized>(rng: &mut R) -> CosineCoefficients {
    let mut offset = [0.0; 3];
    let mut amplitude = [0.0; 3];
    let mut frequency = [0.0; 3];
    let mut phase = [0.0; 3];
    for index in 0..3 {
        let o: Float = rng.random_range(0.3..=0.7);
        offset[index] = o;
        // Never reach below 0 or above 1.
        amplitude[index] = rng.random_range(0.1..=o.min(1.0 - o));
        frequency[index] = rng.random_range(0.3..=1.5);
        phase[index] = rng.random_range(0.0..1.0);
    }

    CosineCoefficients::new(offset, amplitude, frequency, phase)
}

/// Get the fixed fallback coefficients for the given category.
pub(super) fn fallback(category: HarmonyCategory) -> CosineCoefficients {
    use HarmonyCategory::*;

    match category {
        Monochromatic => CosineCoefficients::new(
            [0.45, 0.35, 0.25],
            [0.25, 0.2, 0.15],
            [0.3, 0.3, 0.3],
            [0.0, 0.0, 0.0],
        ),
        Analogous => CosineCoefficients::new(
            [0.5, 0.5, 0.5],
            [0.3, 0.3, 0.3],
            [0.7, 0.7, 0.7],
            [0.0, 0.05, 0.1],
        ),
        Complementary => CosineCoefficients::new(
            [0.5, 0.5, 0.5],
            [0.4, 0.4, 0.4],
            [0.8, 0.8, 0.8],
            [0.0, 0.0, 0.5],
        ),
        SplitComplementary => CosineCoefficients::new(
            [0.5, 0.5, 0.5],
            [0.4, 0.4, 0.4],
            [0.8, 0.8, 0.8],
            [0.0, 0.4167, 0.5833],
        ),
        HighContrast => CosineCoefficients::new(
            [0.5, 0.5, 0.5],
            [0.5, 0.5, 0.5],
            [0.75, 0.75, 0.75],
            [0.0, 0.25, 0.5],
        ),
        Pastel => CosineCoefficients::new(
            [0.85, 0.82, 0.88],
            [0.1, 0.1, 0.1],
            [0.5, 0.5, 0.5],
            [0.0, 0.33, 0.67],
        ),
        Earthy => CosineCoefficients::new(
            [0.55, 0.42, 0.3],
            [0.15, 0.12, 0.09],
            [0.4, 0.4, 0.4],
            [0.1, 0.1, 0.1],
        ),
        Random => CosineCoefficients::default(),
    }
}

// ====================================================================================================================

#[cfg(test)]
mod test {
    use super::{accepts, fallback, propose, EARTHY_HUES};
    use crate::validate::{is_earthy, is_low_saturation};
    use crate::HarmonyCategory;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_proposals_are_bounded() {
        let mut rng = StdRng::seed_from_u64(31);
        for category in HarmonyCategory::ALL {
            for _ in 0..50 {
                let coefficients = propose(category, &mut rng);
                for frequency in coefficients.frequency().coordinates() {
                    assert!((0.2..=1.5).contains(frequency));
                }
                for phase in coefficients.phase().coordinates() {
                    assert!((0.0..1.0).contains(phase));
                }
                for color in coefficients.evaluate(7) {
                    for c in color.coordinates() {
                        assert!((0.0..=1.0).contains(c));
                    }
                }
            }
        }
    }

    #[test]
    fn test_random_avoids_clipping() {
        let mut rng = StdRng::seed_from_u64(32);
        for _ in 0..100 {
            let coefficients = propose(HarmonyCategory::Random, &mut rng);
            let offset = coefficients.offset().coordinates();
            let amplitude = coefficients.amplitude().coordinates();
            for index in 0..3 {
                assert!(offset[index] - amplitude[index] >= 0.0);
                assert!(offset[index] + amplitude[index] <= 1.0);
            }
        }
    }

    #[test]
    fn test_earthy_hues() {
        assert_eq!(EARTHY_HUES.len(), 4);

        let mut rng = StdRng::seed_from_u64(33);
        let mut earthy = 0;
        for _ in 0..100 {
            let colors = propose(HarmonyCategory::Earthy, &mut rng).evaluate(5);
            if is_earthy(&colors) {
                earthy += 1;
            }
        }
        assert!(earthy > 50, "only {} of 100 proposals are earthy", earthy);
    }

    #[test]
    fn test_accepts() {
        let pastel = fallback(HarmonyCategory::Pastel).evaluate(5);
        assert!(is_low_saturation(&pastel, 0.4));
        assert!(accepts(HarmonyCategory::Pastel, &pastel));

        let earthy = fallback(HarmonyCategory::Earthy).evaluate(5);
        assert!(accepts(HarmonyCategory::Earthy, &earthy));

        let rainbow = fallback(HarmonyCategory::Random).evaluate(5);
        assert!(!accepts(HarmonyCategory::Pastel, &rainbow));
        assert!(accepts(HarmonyCategory::Random, &rainbow));
    }
}
