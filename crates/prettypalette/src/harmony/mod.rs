//! Harmonious palette generation.
//!
//! Each [`HarmonyCategory`] names a color-theory strategy for randomly
//! constructing [`CosineCoefficients`]. [`generate_harmonious_palette`] draws
//! candidates with the strategy, evaluates them, and validates the colors
//! until a candidate passes or the attempt budget runs out. In the latter
//! case, it returns the category's fixed fallback coefficients and flags the
//! result as [`Quality::Fallback`]. It never fails.
//!
//! Randomness comes from the caller, so that a seeded generator reproduces
//! the same palette:
//!
//! ```
//! # use prettypalette::{generate_harmonious_palette, GenerationOptions, HarmonyCategory};
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let options = GenerationOptions::builder().steps(6).build();
//! let mut rng = StdRng::seed_from_u64(665);
//! let palette = generate_harmonious_palette(HarmonyCategory::Analogous, &options, &mut rng);
//!
//! let mut rng = StdRng::seed_from_u64(665);
//! let again = generate_harmonious_palette(HarmonyCategory::Analogous, &options, &mut rng);
//! assert_eq!(palette, again);
//! assert_eq!(palette.colors().len(), 6);
//! ```

mod strategy;

use core::str::FromStr;

#[cfg(feature = "pyffi")]
use pyo3::prelude::*;
use rand::Rng;
use tracing::{debug, trace};

use crate::error::HarmonyCategoryError;
use crate::validate::{is_valid, Constraints};
use crate::{ColorVector, CosineCoefficients, Float};

/// The minimum perceptual distance for high-contrast palettes.
pub const HIGH_CONTRAST_MIN_DISTANCE: Float = 20.0;

/// The maximum saturation of every color in a pastel palette.
pub const PASTEL_MAX_SATURATION: Float = 0.4;

/// The default number of gradient stops.
pub const DEFAULT_STEPS: usize = 5;

/// The default number of attempts before falling back.
pub const DEFAULT_MAX_ATTEMPTS: usize = 100;

/// The harmony categories.
///
/// A category selects the strategy for constructing random coefficients, the
/// default [`Constraints`], and any additional validation.
#[cfg_attr(
    feature = "pyffi",
    pyclass(eq, eq_int, frozen, hash, module = "prettypalette")
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HarmonyCategory {
    /// A single hue with varying brightness.
    Monochromatic,
    /// Neighboring hues within a 30° window.
    Analogous,
    /// A hue and its opposite.
    Complementary,
    /// A hue and the two hues 30° to either side of its opposite.
    SplitComplementary,
    /// Widely spaced phases and large amplitudes.
    HighContrast,
    /// Bright and desaturated.
    Pastel,
    /// Browns, tans, terracotta, and muted greens.
    Earthy,
    /// Anything goes, within the generic constraints.
    Random,
}

impl HarmonyCategory {
    /// All harmony categories.
    pub const ALL: [HarmonyCategory; 8] = [
        Self::Monochromatic,
        Self::Analogous,
        Self::Complementary,
        Self::SplitComplementary,
        Self::HighContrast,
        Self::Pastel,
        Self::Earthy,
        Self::Random,
    ];

    /// Get the category's kebab-case name.
    pub const fn name(&self) -> &'static str {
        match *self {
            Self::Monochromatic => "monochromatic",
            Self::Analogous => "analogous",
            Self::Complementary => "complementary",
            Self::SplitComplementary => "split-complementary",
            Self::HighContrast => "high-contrast",
            Self::Pastel => "pastel",
            Self::Earthy => "earthy",
            Self::Random => "random",
        }
    }

    /// Get the category's fixed fallback coefficients.
    pub fn fallback(&self) -> CosineCoefficients {
        strategy::fallback(*self)
    }
}

impl FromStr for HarmonyCategory {
    type Err = HarmonyCategoryError;

    /// Parse the category's name. Case and underscores versus dashes do not
    /// matter.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        Self::ALL
            .into_iter()
            .find(|category| category.name() == normalized)
            .ok_or_else(|| HarmonyCategoryError {
                name: s.to_owned(),
            })
    }
}

impl core::fmt::Display for HarmonyCategory {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(feature = "pyffi")]
#[pymethods]
impl HarmonyCategory {
    /// Parse a category name. <i class=python-only>Python only!</i>
    #[staticmethod]
    pub fn parse(s: &str) -> Result<Self, HarmonyCategoryError> {
        Self::from_str(s)
    }

    /// Get the fallback coefficients. <i class=python-only>Python only!</i>
    #[pyo3(name = "fallback")]
    pub fn py_fallback(&self) -> CosineCoefficients {
        self.fallback()
    }

    /// Get the name. <i class=python-only>Python only!</i>
    pub fn __str__(&self) -> &'static str {
        self.name()
    }
}

// ====================================================================================================================

#[derive(Clone, Debug, PartialEq)]
struct OptionData {
    steps: usize,
    max_attempts: usize,
    min_brightness: Option<Float>,
    max_brightness: Option<Float>,
    min_saturation: Option<Float>,
    min_distance: Option<Float>,
}

impl OptionData {
    const fn new() -> Self {
        Self {
            steps: DEFAULT_STEPS,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            min_brightness: None,
            max_brightness: None,
            min_saturation: None,
            min_distance: None,
        }
    }
}

/// A builder of generation options.
#[derive(Debug)]
pub struct GenerationOptionsBuilder(OptionData);

impl GenerationOptionsBuilder {
    /// Set the number of gradient stops.
    ///
    /// A palette has at least two stops, so that smaller values are raised to
    /// two.
    pub fn steps(&mut self, steps: usize) -> &mut Self {
        self.0.steps = steps.max(2);
        self
    }

    /// Set the maximum number of attempts before falling back.
    ///
    /// Zero attempts skip the search altogether.
    pub fn max_attempts(&mut self, max_attempts: usize) -> &mut Self {
        self.0.max_attempts = max_attempts;
        self
    }

    /// Override the category's minimum brightness.
    pub fn min_brightness(&mut self, value: Float) -> &mut Self {
        self.0.min_brightness = Some(value);
        self
    }

    /// Override the category's maximum brightness.
    pub fn max_brightness(&mut self, value: Float) -> &mut Self {
        self.0.max_brightness = Some(value);
        self
    }

    /// Override the category's minimum mean saturation.
    pub fn min_saturation(&mut self, value: Float) -> &mut Self {
        self.0.min_saturation = Some(value);
        self
    }

    /// Override the category's minimum perceptual distance.
    ///
    /// High-contrast palettes ignore overrides below
    /// [`HIGH_CONTRAST_MIN_DISTANCE`].
    pub fn min_distance(&mut self, value: Float) -> &mut Self {
        self.0.min_distance = Some(value);
        self
    }

    /// Apply whichever constraint overrides are present.
    ///
    /// Absent values leave the current setting, override or category default,
    /// untouched.
    pub fn overrides(
        &mut self,
        min_brightness: Option<Float>,
        max_brightness: Option<Float>,
        min_saturation: Option<Float>,
        min_distance: Option<Float>,
    ) -> &mut Self {
        self.0.min_brightness = min_brightness.or(self.0.min_brightness);
        self.0.max_brightness = max_brightness.or(self.0.max_brightness);
        self.0.min_saturation = min_saturation.or(self.0.min_saturation);
        self.0.min_distance = min_distance.or(self.0.min_distance);
        self
    }

    /// Instantiate the options.
    pub fn build(&self) -> GenerationOptions {
        GenerationOptions(self.0.clone())
    }
}

/// The options for palette generation.
///
/// By default, palettes have [`DEFAULT_STEPS`] stops and the search makes up
/// to [`DEFAULT_MAX_ATTEMPTS`] attempts with the category's constraints.
///
/// ```
/// # use prettypalette::{GenerationOptions, HarmonyCategory};
/// let options = GenerationOptions::builder()
///     .steps(8)
///     .min_saturation(0.3)
///     .build();
///
/// assert_eq!(options.steps(), 8);
/// assert_eq!(options.constraints(HarmonyCategory::Random).min_saturation, 0.3);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct GenerationOptions(OptionData);

impl Default for GenerationOptions {
    fn default() -> Self {
        GenerationOptions(OptionData::new())
    }
}

impl GenerationOptions {
    /// Create a new builder with the default option values.
    pub fn builder() -> GenerationOptionsBuilder {
        GenerationOptionsBuilder(OptionData::new())
    }

    /// Get the number of gradient stops.
    pub fn steps(&self) -> usize {
        self.0.steps
    }

    /// Get the maximum number of attempts.
    pub fn max_attempts(&self) -> usize {
        self.0.max_attempts
    }

    /// Resolve the constraints for the given category.
    ///
    /// This method starts with the category's defaults and applies the
    /// overrides. For high-contrast palettes, it then raises the minimum
    /// distance to at least [`HIGH_CONTRAST_MIN_DISTANCE`].
    pub fn constraints(&self, category: HarmonyCategory) -> Constraints {
        let defaults = Constraints::for_category(category);
        let mut constraints = Constraints {
            min_brightness: self.0.min_brightness.unwrap_or(defaults.min_brightness),
            max_brightness: self.0.max_brightness.unwrap_or(defaults.max_brightness),
            min_saturation: self.0.min_saturation.unwrap_or(defaults.min_saturation),
            min_distance: self.0.min_distance.unwrap_or(defaults.min_distance),
        };

        if category == HarmonyCategory::HighContrast {
            constraints.min_distance = constraints.min_distance.max(HIGH_CONTRAST_MIN_DISTANCE);
        }

        constraints
    }
}

// ====================================================================================================================

/// The quality of a generated palette.
#[cfg_attr(
    feature = "pyffi",
    pyclass(eq, eq_int, frozen, hash, module = "prettypalette")
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Quality {
    /// The palette satisfies all constraints.
    Valid,
    /// The search exhausted its attempts and fell back on fixed coefficients.
    Fallback,
}

/// The result of palette generation.
#[cfg_attr(feature = "pyffi", pyclass(eq, frozen, module = "prettypalette"))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct PaletteResult {
    coefficients: CosineCoefficients,
    colors: Vec<ColorVector>,
    category: HarmonyCategory,
    attempts: usize,
    quality: Quality,
}

impl PaletteResult {
    /// Get the coefficients.
    pub fn coefficients(&self) -> &CosineCoefficients {
        &self.coefficients
    }

    /// Get the evaluated colors.
    pub fn colors(&self) -> &[ColorVector] {
        &self.colors
    }

    /// Get the harmony category.
    pub fn category(&self) -> HarmonyCategory {
        self.category
    }

    /// Get the number of attempts consumed.
    pub fn attempts(&self) -> usize {
        self.attempts
    }

    /// Get the quality.
    pub fn quality(&self) -> Quality {
        self.quality
    }

    /// Determine whether the search fell back on fixed coefficients.
    pub fn is_fallback(&self) -> bool {
        self.quality == Quality::Fallback
    }

    /// Format the colors as `#rrggbb` strings.
    pub fn hex_colors(&self) -> Vec<String> {
        self.colors.iter().map(ColorVector::to_hex).collect()
    }
}

#[cfg(feature = "pyffi")]
#[pymethods]
impl PaletteResult {
    /// Get the coefficients. <i class=python-only>Python only!</i>
    #[getter(coefficients)]
    pub fn py_coefficients(&self) -> CosineCoefficients {
        self.coefficients
    }

    /// Get the colors. <i class=python-only>Python only!</i>
    #[getter(colors)]
    pub fn py_colors(&self) -> Vec<ColorVector> {
        self.colors.clone()
    }

    /// Get the category. <i class=python-only>Python only!</i>
    #[getter(category)]
    pub fn py_category(&self) -> HarmonyCategory {
        self.category
    }

    /// Get the attempts. <i class=python-only>Python only!</i>
    #[getter(attempts)]
    pub fn py_attempts(&self) -> usize {
        self.attempts
    }

    /// Get the quality. <i class=python-only>Python only!</i>
    #[getter(quality)]
    pub fn py_quality(&self) -> Quality {
        self.quality
    }

    /// Get the colors as hex strings. <i class=python-only>Python only!</i>
    #[pyo3(name = "hex_colors")]
    pub fn py_hex_colors(&self) -> Vec<String> {
        self.hex_colors()
    }
}

// ====================================================================================================================

/// Generate a harmonious palette.
///
/// This function repeatedly constructs random coefficients with the
/// category's strategy, evaluates them at `options.steps()` stops, and
/// validates the colors against the resolved constraints as well as the
/// category's additional predicate, if any. The first candidate to pass
/// becomes the result. If none passes within `options.max_attempts()`
/// attempts, the result has the category's fallback coefficients and
/// [`Quality::Fallback`].
pub fn generate_harmonious_palette<R: Rng + ?Sized>(
    category: HarmonyCategory,
    options: &GenerationOptions,
    rng: &mut R,
) -> PaletteResult {
    let steps = options.steps();
    let constraints = options.constraints(category);

    let mut attempt = 0;
    while attempt < options.max_attempts() {
        attempt += 1;

        let coefficients = strategy::propose(category, rng);
        let colors = coefficients.evaluate(steps);
        if is_valid(&colors, &constraints) && strategy::accepts(category, &colors) {
            debug!(%category, attempts = attempt, "generated palette");
            return PaletteResult {
                coefficients,
                colors,
                category,
                attempts: attempt,
                quality: Quality::Valid,
            };
        }

        trace!(%category, attempt, "rejected candidate palette");
    }

    debug!(%category, attempts = attempt, "falling back on fixed palette");
    let coefficients = strategy::fallback(category);
    PaletteResult {
        colors: coefficients.evaluate(steps),
        coefficients,
        category,
        attempts: attempt,
        quality: Quality::Fallback,
    }
}

// ====================================================================================================================
