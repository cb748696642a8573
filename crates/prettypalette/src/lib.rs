//! # Pretty 🌸 Palette
//!
//! Prettypalette generates, evaluates, and fits harmonious color palettes
//! expressed as cosine gradients.
#![cfg_attr(
    not(feature = "pyffi"),
    doc = " This version of the API documentation **covers native Rust interfaces
only**."
)]
#![cfg_attr(
    feature = "pyffi",
    doc = " This version of the API documentation **covers both Rust and Python
interfaces**."
)]
//!
//!
//! ## 1. Overview
//!
//! A cosine gradient maps a position `t` in `0..=1` to a color with the
//! per-channel formula `a + b · cos(2π · (c · t + d))`. Four vectors of
//! coefficients thus describe an entire palette. Prettypalette's main
//! abstractions are:
//!
//!   * [`ColorVector`] holds **three sRGB channels and an optional alpha
//!     channel**. It serves as concrete color and as coefficient vector alike
//!     and converts to hexadecimal, HSV, and CIELAB.
//!   * [`CosineCoefficients`] combines **four color vectors into a cosine
//!     gradient** and evaluates it at a single position or evenly spaced
//!     stops.
//!   * The [`validate`] module checks **brightness, saturation, and perceptual
//!     distance** of palettes against [`Constraints`](validate::Constraints).
//!   * The [`harmony`] module **generates harmonious palettes** for each
//!     [`HarmonyCategory`] by randomly constructing coefficients, rejecting
//!     invalid candidates, and falling back on fixed coefficients if need be.
//!   * The [`fit`] module **recovers coefficients from target colors** with
//!     gradient descent.
//!
//!
//! ## 2. One-Two-Three: Palettes!
//!
//! First, generate a palette for a harmony category. A seeded random number
//! generator makes the result reproducible.
//!
//! ```
//! # use prettypalette::{generate_harmonious_palette, GenerationOptions, HarmonyCategory};
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let mut rng = StdRng::seed_from_u64(42);
//! let options = GenerationOptions::builder().steps(7).build();
//! let palette = generate_harmonious_palette(HarmonyCategory::Pastel, &options, &mut rng);
//! assert_eq!(palette.colors().len(), 7);
//! ```
//!
//! Second, evaluate the same coefficients at a different resolution. Their
//! compactness is what makes cosine gradients so useful.
//!
//! ```
//! # use prettypalette::{evaluate_cosine_gradient, generate_harmonious_palette};
//! # use prettypalette::{GenerationOptions, HarmonyCategory};
//! # use rand::{rngs::StdRng, SeedableRng};
//! # let mut rng = StdRng::seed_from_u64(42);
//! # let options = GenerationOptions::builder().steps(7).build();
//! # let palette = generate_harmonious_palette(HarmonyCategory::Pastel, &options, &mut rng);
//! let colors = evaluate_cosine_gradient(32, palette.coefficients());
//! assert_eq!(colors.len(), 32);
//! assert_eq!(colors[0], palette.colors()[0]);
//! ```
//!
//! Third, go the other way and fit coefficients to existing colors.
//!
//! ```
//! # use prettypalette::fit::{fit_cosine_palette_robust, validate_fit};
//! # use rand::{rngs::StdRng, SeedableRng};
//! # let mut rng = StdRng::seed_from_u64(42);
//! let targets = ["#7f4c33", "#997a52", "#a3a370", "#8ab08a"];
//! let result = fit_cosine_palette_robust(&targets, 500, 0.005, 3, &mut rng)?;
//! let diagnostics = validate_fit(&targets, &result)?;
//! assert_eq!(diagnostics.comparisons().len(), 4);
//! # Ok::<(), prettypalette::error::FitError>(())
//! ```
//!
//!
//! ## 3. Optional Features
//!
//! Prettypalette supports two feature flags:
//!
//!   - **`pyffi`** controls prettypalette's Python integration through
//!     [PyO3](https://pyo3.rs/). This feature is disabled by default.
//!   - **`serde`** derives `Serialize` and `Deserialize` for colors,
//!     coefficients, constraints, and results. This feature is disabled by
//!     default.
//!
//! Prettypalette reports its progress through [tracing](https://docs.rs/tracing)
//! events at the debug and trace levels. It never installs a subscriber.
#![cfg_attr(
    feature = "pyffi",
    doc = "Items that are only available in Python are decorated with <i
    class=python-only>Python only!</i>."
)]

/// The floating point type in use.
pub type Float = f64;

/// [`Float`]'s bits.
pub type Bits = u64;

mod core;
pub mod error;
pub mod fit;
pub mod gradient;
pub mod harmony;
mod object;
pub mod validate;

#[cfg(feature = "pyffi")]
pub use core::close_enough;

#[doc(hidden)]
pub use core::to_eq_bits;

pub use fit::{fit_cosine_palette, fit_cosine_palette_robust, validate_fit};
pub use gradient::{
    evaluate_cosine_gradient, CosineCoefficients, GradientStops, PARAMETER_COUNT,
};
pub use harmony::{
    generate_harmonious_palette, GenerationOptions, GenerationOptionsBuilder, HarmonyCategory,
    PaletteResult, Quality,
};
pub use object::{hex_to_rgb, rgb_to_hex, ColorVector};

#[cfg(feature = "pyffi")]
use pyo3::prelude::*;

#[cfg(feature = "pyffi")]
mod pyffi {
    use pyo3::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use crate::error::{ColorFormatError, FitError};
    use crate::fit::{FitDiagnostics, FitResult};
    use crate::{
        ColorVector, CosineCoefficients, Float, GenerationOptions, HarmonyCategory, PaletteResult,
    };

    fn rng_for(seed: Option<u64>) -> StdRng {
        match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }

    /// Evaluate a cosine gradient at evenly spaced stops.
    #[pyfunction]
    pub fn evaluate_cosine_gradient(
        stops: usize,
        coefficients: CosineCoefficients,
    ) -> Vec<ColorVector> {
        crate::evaluate_cosine_gradient(stops, &coefficients)
    }

    /// Parse a hexadecimal color.
    #[pyfunction]
    pub fn hex_to_rgb(s: &str) -> Result<ColorVector, ColorFormatError> {
        crate::hex_to_rgb(s)
    }

    /// Format a color as `#rrggbb`.
    #[pyfunction]
    pub fn rgb_to_hex(color: ColorVector) -> String {
        crate::rgb_to_hex(&color)
    }

    /// Generate a harmonious palette, optionally from a seed.
    ///
    /// The brightness, saturation, and distance arguments override the
    /// category's constraints when present.
    #[pyfunction]
    #[pyo3(signature = (
        category,
        steps=5,
        max_attempts=100,
        seed=None,
        min_brightness=None,
        max_brightness=None,
        min_saturation=None,
        min_distance=None,
    ))]
    #[allow(clippy::too_many_arguments)]
    pub fn generate_harmonious_palette(
        category: HarmonyCategory,
        steps: usize,
        max_attempts: usize,
        seed: Option<u64>,
        min_brightness: Option<Float>,
        max_brightness: Option<Float>,
        min_saturation: Option<Float>,
        min_distance: Option<Float>,
    ) -> PaletteResult {
        let options = GenerationOptions::builder()
            .steps(steps)
            .max_attempts(max_attempts)
            .overrides(min_brightness, max_brightness, min_saturation, min_distance)
            .build();
        crate::generate_harmonious_palette(category, &options, &mut rng_for(seed))
    }

    /// Fit cosine coefficients to hexadecimal colors.
    #[pyfunction]
    #[pyo3(signature = (targets, max_iterations=1000, learning_rate=0.01))]
    pub fn fit_cosine_palette(
        targets: Vec<String>,
        max_iterations: usize,
        learning_rate: Float,
    ) -> Result<FitResult, FitError> {
        crate::fit_cosine_palette(&targets, max_iterations, learning_rate)
    }

    /// Robustly fit cosine coefficients to hexadecimal colors, optionally from
    /// a seed.
    #[pyfunction]
    #[pyo3(signature = (
        targets,
        max_iterations=1000,
        learning_rate=0.01,
        attempts=5,
        seed=None,
    ))]
    pub fn fit_cosine_palette_robust(
        targets: Vec<String>,
        max_iterations: usize,
        learning_rate: Float,
        attempts: usize,
        seed: Option<u64>,
    ) -> Result<FitResult, FitError> {
        crate::fit_cosine_palette_robust(
            &targets,
            max_iterations,
            learning_rate,
            attempts,
            &mut rng_for(seed),
        )
    }

    /// Compare fitted coefficients against hexadecimal colors.
    #[pyfunction]
    pub fn validate_fit(
        targets: Vec<String>,
        fitted: FitResult,
    ) -> Result<FitDiagnostics, FitError> {
        crate::validate_fit(&targets, &fitted)
    }
}

#[doc(hidden)]
#[cfg(feature = "pyffi")]
#[pymodule]
pub fn prettypalette(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(close_enough, m)?)?;
    m.add_function(wrap_pyfunction!(pyffi::evaluate_cosine_gradient, m)?)?;
    m.add_function(wrap_pyfunction!(pyffi::hex_to_rgb, m)?)?;
    m.add_function(wrap_pyfunction!(pyffi::rgb_to_hex, m)?)?;
    m.add_function(wrap_pyfunction!(pyffi::generate_harmonious_palette, m)?)?;
    m.add_function(wrap_pyfunction!(pyffi::fit_cosine_palette, m)?)?;
    m.add_function(wrap_pyfunction!(pyffi::fit_cosine_palette_robust, m)?)?;
    m.add_function(wrap_pyfunction!(pyffi::validate_fit, m)?)?;

    m.add_class::<ColorVector>()?;
    m.add_class::<CosineCoefficients>()?;
    m.add_class::<validate::Constraints>()?;
    m.add_class::<HarmonyCategory>()?;
    m.add_class::<Quality>()?;
    m.add_class::<PaletteResult>()?;
    m.add_class::<fit::GradientMethod>()?;
    m.add_class::<fit::FitResult>()?;
    m.add_class::<fit::FitDiagnostics>()?;
    m.add_class::<fit::ColorComparison>()?;

    Ok(())
}
