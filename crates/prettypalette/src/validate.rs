//! Palette validation.
//!
//! The [`Constraints`] bound a palette's brightness, mean saturation, and
//! pairwise perceptual distance. [`is_valid`] checks them in that order and
//! stops at the first violation. [`is_low_saturation`] and [`is_earthy`]
//! capture the additional requirements of pastel and earthy palettes.

#[cfg(feature = "pyffi")]
use pyo3::prelude::*;

use crate::core::Accumulator;
use crate::{ColorVector, Float, HarmonyCategory};

/// The constraints for a valid palette.
///
/// The defaults, i.e., brightness between 0.15 and 0.85, mean saturation of
/// at least 0.2, and a minimum perceptual distance of 5, suit most harmony
/// categories. [`Constraints::for_category`] adjusts them for the categories
/// that differ.
#[cfg_attr(feature = "pyffi", pyclass(eq, frozen, get_all, module = "prettypalette"))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Constraints {
    /// The minimum brightness of every color.
    pub min_brightness: Float,
    /// The maximum brightness of every color.
    pub max_brightness: Float,
    /// The minimum mean saturation across all colors.
    pub min_saturation: Float,
    /// The minimum perceptual distance between any two colors.
    pub min_distance: Float,
}

impl Default for Constraints {
    fn default() -> Self {
        Self {
            min_brightness: 0.15,
            max_brightness: 0.85,
            min_saturation: 0.2,
            min_distance: 5.0,
        }
    }
}

impl Constraints {
    /// Get the default constraints for the given harmony category.
    pub fn for_category(category: HarmonyCategory) -> Self {
        use HarmonyCategory::*;

        let defaults = Self::default();
        match category {
            Monochromatic => Self {
                min_saturation: 0.15,
                ..defaults
            },
            Analogous | Complementary | SplitComplementary | Random => defaults,
            HighContrast => Self {
                min_brightness: 0.1,
                max_brightness: 0.9,
                min_distance: 20.0,
                ..defaults
            },
            Pastel => Self {
                min_brightness: 0.7,
                max_brightness: 0.95,
                min_saturation: 0.05,
                min_distance: 3.0,
            },
            Earthy => Self {
                max_brightness: 0.8,
                min_saturation: 0.1,
                ..defaults
            },
        }
    }
}

/// Determine whether the colors satisfy the constraints.
///
/// This function checks that every color's brightness falls within bounds,
/// that the mean saturation reaches the minimum, and that every pair of
/// colors is at least the minimum distance apart, in that order. It
/// short-circuits on the first violation. The distance check compares all
/// pairs and hence is quadratic in the number of colors.
///
/// An empty palette trivially has no violations but also no mean saturation;
/// it is treated as invalid.
pub fn is_valid(colors: &[ColorVector], constraints: &Constraints) -> bool {
    let brightness_range = constraints.min_brightness..=constraints.max_brightness;
    if !colors
        .iter()
        .all(|color| brightness_range.contains(&color.brightness()))
    {
        return false;
    }

    if colors.is_empty() {
        return false;
    }

    let total: Accumulator = colors.iter().map(ColorVector::saturation).collect();
    #[allow(clippy::cast_precision_loss)]
    let mean = total.total() / colors.len() as Float;
    if mean < constraints.min_saturation {
        return false;
    }

    let labs: Vec<[Float; 3]> = colors.iter().map(ColorVector::to_lab).collect();
    for (index, lab1) in labs.iter().enumerate() {
        for lab2 in &labs[index + 1..] {
            if crate::core::perceptual_distance(lab1, lab2) < constraints.min_distance {
                return false;
            }
        }
    }

    true
}

/// Determine whether every color's saturation is at most the given maximum.
pub fn is_low_saturation(colors: &[ColorVector], max_saturation: Float) -> bool {
    colors
        .iter()
        .all(|color| color.saturation() <= max_saturation)
}

/// The hue bands of earth tones, in turns.
///
/// The bands cover reds and terracotta at the wrap-around point, browns,
/// oranges, yellows, and tans, as well as olives and muted greens.
pub const EARTHY_HUE_BANDS: [(Float, Float); 3] = [(0.93, 1.0), (0.0, 0.17), (0.17, 0.45)];

/// The maximum HSV saturation of an earth tone.
pub const EARTHY_MAX_SATURATION: Float = 0.7;

/// The minimum percentage of earth tones in an earthy palette.
pub const EARTHY_MIN_PERCENT: usize = 70;

/// Determine whether the color is an earth tone.
pub fn is_earth_tone(color: &ColorVector) -> bool {
    let [hue, saturation, _] = color.to_hsv();
    saturation <= EARTHY_MAX_SATURATION
        && EARTHY_HUE_BANDS
            .iter()
            .any(|&(low, high)| low <= hue && hue <= high)
}

/// Determine whether the colors form an earthy palette.
///
/// A palette is earthy if at least 70% of its colors are earth tones, i.e.,
/// have an HSV saturation of at most 0.7 and a hue within one of the
/// [`EARTHY_HUE_BANDS`].
pub fn is_earthy(colors: &[ColorVector]) -> bool {
    if colors.is_empty() {
        return false;
    }

    let earthy = colors.iter().filter(|color| is_earth_tone(color)).count();
    100 * earthy >= EARTHY_MIN_PERCENT * colors.len()
}

// ====================================================================================================================

#[cfg(test)]
mod test {
    use super::{is_earth_tone, is_earthy, is_low_saturation, is_valid, Constraints};
    use crate::{ColorVector, CosineCoefficients, HarmonyCategory};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn spread() -> Vec<ColorVector> {
        vec![
            ColorVector::new(0.8, 0.3, 0.2),
            ColorVector::new(0.3, 0.7, 0.3),
            ColorVector::new(0.3, 0.4, 0.8),
            ColorVector::new(0.7, 0.6, 0.2),
        ]
    }

    #[test]
    fn test_is_valid() {
        let colors = spread();
        assert!(is_valid(&colors, &Constraints::default()));

        let too_dark = [ColorVector::new(0.05, 0.05, 0.1), colors[0]];
        assert!(!is_valid(&too_dark, &Constraints::default()));

        let too_bright = [ColorVector::new(1.0, 1.0, 0.9), colors[0]];
        assert!(!is_valid(&too_bright, &Constraints::default()));

        let too_gray = [ColorVector::new(0.4, 0.4, 0.4), ColorVector::new(0.6, 0.6, 0.6)];
        assert!(!is_valid(&too_gray, &Constraints::default()));

        let too_close = [colors[0], ColorVector::new(0.81, 0.3, 0.2)];
        assert!(!is_valid(&too_close, &Constraints::default()));

        assert!(!is_valid(&[], &Constraints::default()));
    }

    #[test]
    fn test_monotonicity() {
        let mut rng = StdRng::seed_from_u64(42);
        let loose = Constraints::default();

        for _ in 0..300 {
            let mut parameters = [0.0; crate::gradient::PARAMETER_COUNT];
            for p in parameters.iter_mut() {
                *p = rng.random_range(0.0..1.0);
            }
            let colors = CosineCoefficients::from_parameters(&parameters).evaluate(5);

            let tighter_saturation = Constraints {
                min_saturation: loose.min_saturation + rng.random_range(0.0..0.5),
                ..loose
            };
            let tighter_distance = Constraints {
                min_distance: loose.min_distance + rng.random_range(0.0..30.0),
                ..loose
            };
            let tighter_brightness = Constraints {
                min_brightness: loose.min_brightness + 0.1,
                max_brightness: loose.max_brightness - 0.1,
                ..loose
            };

            for tighter in [tighter_saturation, tighter_distance, tighter_brightness] {
                if is_valid(&colors, &tighter) {
                    assert!(
                        is_valid(&colors, &loose),
                        "tighter constraints {:?} accept what looser ones reject",
                        tighter
                    );
                }
            }
        }
    }

    #[test]
    fn test_is_low_saturation() {
        let pastels = [ColorVector::new(0.9, 0.8, 0.85), ColorVector::new(0.8, 0.85, 0.9)];
        assert!(is_low_saturation(&pastels, 0.4));
        assert!(!is_low_saturation(&spread(), 0.4));
        assert!(is_low_saturation(&[], 0.0));
    }

    #[test]
    fn test_is_earthy() {
        // HSV hue 0.08 (brown), 0.3 (olive), and 0.6 (blue) respectively.
        let brown = ColorVector::from_hsv([0.08, 0.5, 0.5]);
        let olive = ColorVector::from_hsv([0.3, 0.4, 0.5]);
        let blue = ColorVector::from_hsv([0.6, 0.5, 0.5]);
        let neon = ColorVector::from_hsv([0.08, 0.95, 0.9]);
        assert!(is_earth_tone(&brown));
        assert!(is_earth_tone(&olive));
        assert!(!is_earth_tone(&blue));
        assert!(!is_earth_tone(&neon));

        let mut eight_of_ten = vec![brown; 5];
        eight_of_ten.extend([olive; 3]);
        eight_of_ten.extend([blue, neon]);
        assert_eq!(eight_of_ten.len(), 10);
        assert!(is_earthy(&eight_of_ten));

        let mut six_of_ten = vec![brown; 3];
        six_of_ten.extend([olive; 3]);
        six_of_ten.extend([blue, blue, neon, neon]);
        assert_eq!(six_of_ten.len(), 10);
        assert!(!is_earthy(&six_of_ten));

        let mut seven_of_ten = vec![brown; 7];
        seven_of_ten.extend([blue; 3]);
        assert!(is_earthy(&seven_of_ten));

        assert!(!is_earthy(&[]));
    }

    #[test]
    fn test_category_constraints() {
        let pastel = Constraints::for_category(HarmonyCategory::Pastel);
        assert_eq!(pastel.min_brightness, 0.7);
        assert_eq!(pastel.max_brightness, 0.95);
        let contrast = Constraints::for_category(HarmonyCategory::HighContrast);
        assert_eq!(contrast.min_distance, 20.0);
        assert_eq!(
            Constraints::for_category(HarmonyCategory::Random),
            Constraints::default()
        );
    }
}
