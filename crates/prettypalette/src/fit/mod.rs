//! Fitting cosine coefficients to target colors.
//!
//! Given a list of hexadecimal colors, the fitter searches for the
//! [`CosineCoefficients`] whose evenly spaced stops come closest to those
//! colors, minimizing the sum of squared channel differences with gradient
//! descent. [`fit_cosine_palette`] starts from a fixed initial guess and
//! leaves parameters unconstrained. [`fit_cosine_palette_robust`] restarts from
//! several random guesses, keeps the parameters within their admissible
//! ranges, and returns the best result.
//!
//! ```
//! # use prettypalette::fit::{fit_cosine_palette, validate_fit};
//! let targets = ["#ff4040", "#40ff40", "#4040ff"];
//! let result = fit_cosine_palette(&targets, 500, 0.02)?;
//! let diagnostics = validate_fit(&targets, &result)?;
//!
//! assert!(result.iterations() <= 500);
//! assert_eq!(diagnostics.comparisons().len(), 3);
//! # Ok::<(), prettypalette::error::FitError>(())
//! ```

mod objective;

#[cfg(feature = "pyffi")]
use pyo3::prelude::*;
use rand::Rng;
use tracing::{debug, trace};

use crate::core::{format_hex, Accumulator};
use crate::error::FitError;
use crate::gradient::PARAMETER_COUNT;
use crate::{CosineCoefficients, Float};
use objective::{clamp_parameters, parse_targets, Objective};

/// The error below which plain fitting stops early.
pub const PLAIN_TOLERANCE: Float = 1e-6;

/// The error below which robust fitting stops early.
pub const ROBUST_TOLERANCE: Float = 1e-8;

/// The factor by which the learning rate decays every 100 iterations.
pub const LEARNING_RATE_DECAY: Float = 0.95;

const DECAY_INTERVAL: usize = 100;

/// The initial guess for plain fitting: the rainbow palette.
const INITIAL_GUESS: [Float; PARAMETER_COUNT] = [
    0.5, 0.5, 0.5, // offset
    0.5, 0.5, 0.5, // amplitude
    1.0, 1.0, 1.0, // frequency
    0.0, 1.0 / 3.0, 2.0 / 3.0, // phase
];

/// The method for computing the objective's gradient.
#[cfg_attr(
    feature = "pyffi",
    pyclass(eq, eq_int, frozen, hash, module = "prettypalette")
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum GradientMethod {
    /// Central finite differences with a step of `1e-6`, requiring 24
    /// evaluations of the objective per iteration.
    #[default]
    CentralDifference,
    /// The closed-form partial derivatives, requiring a single pass over the
    /// targets per iteration.
    Analytic,
}

// ====================================================================================================================

#[derive(Clone, Debug, PartialEq)]
struct OptionData {
    max_iterations: usize,
    learning_rate: Float,
    attempts: usize,
    method: GradientMethod,
}

impl OptionData {
    const fn new() -> Self {
        Self {
            max_iterations: 1_000,
            learning_rate: 0.01,
            attempts: 5,
            method: GradientMethod::CentralDifference,
        }
    }
}

/// A builder of fit options.
#[derive(Debug)]
pub struct FitOptionsBuilder(OptionData);

impl FitOptionsBuilder {
    /// Set the maximum number of iterations per attempt.
    pub fn max_iterations(&mut self, max_iterations: usize) -> &mut Self {
        self.0.max_iterations = max_iterations;
        self
    }

    /// Set the initial learning rate.
    pub fn learning_rate(&mut self, learning_rate: Float) -> &mut Self {
        self.0.learning_rate = learning_rate;
        self
    }

    /// Set the number of random restarts for robust fitting.
    ///
    /// Zero attempts are treated as one.
    pub fn attempts(&mut self, attempts: usize) -> &mut Self {
        self.0.attempts = attempts;
        self
    }

    /// Set the gradient method.
    pub fn method(&mut self, method: GradientMethod) -> &mut Self {
        self.0.method = method;
        self
    }

    /// Instantiate the options.
    pub fn build(&self) -> FitOptions {
        FitOptions(self.0.clone())
    }
}

/// The options for fitting.
///
/// By default, fitting runs for up to 1,000 iterations with an initial
/// learning rate of 0.01 and central differences. Robust fitting makes five
/// attempts.
#[derive(Clone, Debug, PartialEq)]
pub struct FitOptions(OptionData);

impl Default for FitOptions {
    fn default() -> Self {
        FitOptions(OptionData::new())
    }
}

impl FitOptions {
    /// Create a new builder with the default option values.
    pub fn builder() -> FitOptionsBuilder {
        FitOptionsBuilder(OptionData::new())
    }

    /// Get the maximum number of iterations per attempt.
    pub fn max_iterations(&self) -> usize {
        self.0.max_iterations
    }

    /// Get the initial learning rate.
    pub fn learning_rate(&self) -> Float {
        self.0.learning_rate
    }

    /// Get the number of random restarts for robust fitting, which is at
    /// least one.
    pub fn attempts(&self) -> usize {
        self.0.attempts.max(1)
    }

    /// Get the gradient method.
    pub fn method(&self) -> GradientMethod {
        self.0.method
    }
}

// ====================================================================================================================

/// The result of fitting.
#[cfg_attr(feature = "pyffi", pyclass(eq, frozen, module = "prettypalette"))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FitResult {
    coefficients: CosineCoefficients,
    error: Float,
    iterations: usize,
}

impl FitResult {
    /// Get the fitted coefficients.
    pub const fn coefficients(&self) -> &CosineCoefficients {
        &self.coefficients
    }

    /// Get the final sum of squared errors.
    pub const fn error(&self) -> Float {
        self.error
    }

    /// Get the number of iterations run by the returned attempt.
    pub const fn iterations(&self) -> usize {
        self.iterations
    }
}

#[cfg(feature = "pyffi")]
#[pymethods]
impl FitResult {
    /// Get the coefficients. <i class=python-only>Python only!</i>
    #[getter(coefficients)]
    pub fn py_coefficients(&self) -> CosineCoefficients {
        self.coefficients
    }

    /// Get the error. <i class=python-only>Python only!</i>
    #[getter(error)]
    pub fn py_error(&self) -> Float {
        self.error
    }

    /// Get the iterations. <i class=python-only>Python only!</i>
    #[getter(iterations)]
    pub fn py_iterations(&self) -> usize {
        self.iterations
    }

    /// Get a debug representation. <i class=python-only>Python only!</i>
    pub fn __repr__(&self) -> String {
        format!("{:?}", self)
    }
}

/// A comparison between a target color and its fitted counterpart.
#[cfg_attr(feature = "pyffi", pyclass(eq, frozen, get_all, module = "prettypalette"))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct ColorComparison {
    /// The target color as `#rrggbb`.
    pub original: String,
    /// The fitted color as `#rrggbb`.
    pub fitted: String,
    /// The mean absolute channel error on the 0–255 scale.
    pub error: Float,
}

/// Diagnostics for fitted coefficients.
#[cfg_attr(feature = "pyffi", pyclass(eq, frozen, module = "prettypalette"))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct FitDiagnostics {
    average_error: Float,
    max_error: Float,
    comparisons: Vec<ColorComparison>,
}

impl FitDiagnostics {
    /// Get the mean absolute channel error on the 0–255 scale.
    pub const fn average_error(&self) -> Float {
        self.average_error
    }

    /// Get the maximum absolute channel error on the 0–255 scale.
    pub const fn max_error(&self) -> Float {
        self.max_error
    }

    /// Get the per-color comparisons.
    pub fn comparisons(&self) -> &[ColorComparison] {
        &self.comparisons
    }
}

#[cfg(feature = "pyffi")]
#[pymethods]
impl FitDiagnostics {
    /// Get the average error. <i class=python-only>Python only!</i>
    #[getter(average_error)]
    pub fn py_average_error(&self) -> Float {
        self.average_error
    }

    /// Get the maximum error. <i class=python-only>Python only!</i>
    #[getter(max_error)]
    pub fn py_max_error(&self) -> Float {
        self.max_error
    }

    /// Get the comparisons. <i class=python-only>Python only!</i>
    #[getter(comparisons)]
    pub fn py_comparisons(&self) -> Vec<ColorComparison> {
        self.comparisons.clone()
    }
}

// ====================================================================================================================

/// Run gradient descent from the given parameters.
fn descend(
    objective: &Objective,
    mut parameters: [Float; PARAMETER_COUNT],
    options: &FitOptions,
    clamp: bool,
    tolerance: Float,
) -> FitResult {
    let mut rate = options.learning_rate();
    let mut error = objective.error(&parameters);
    let mut iterations = 0;

    while iterations < options.max_iterations() && error >= tolerance {
        if iterations >= DECAY_INTERVAL && iterations % DECAY_INTERVAL == 0 {
            rate *= LEARNING_RATE_DECAY;
        }

        let gradient = objective.gradient(&parameters, options.method());
        for (p, g) in parameters.iter_mut().zip(gradient) {
            *p -= rate * g;
        }
        if clamp {
            clamp_parameters(&mut parameters);
        }

        error = objective.error(&parameters);
        iterations += 1;
    }

    FitResult {
        coefficients: CosineCoefficients::from_parameters(&parameters),
        error,
        iterations,
    }
}

/// Fit cosine coefficients to the target colors with the given options.
///
/// This function starts from the rainbow palette and does not constrain the
/// parameters. It stops after the maximum number of iterations or once the
/// error drops below [`PLAIN_TOLERANCE`]. The number of restarts is ignored.
pub fn fit_with<S: AsRef<str>>(targets: &[S], options: &FitOptions) -> Result<FitResult, FitError> {
    let objective = Objective::new(parse_targets(targets)?);
    let result = descend(&objective, INITIAL_GUESS, options, false, PLAIN_TOLERANCE);

    debug!(
        targets = targets.len(),
        error = result.error,
        iterations = result.iterations,
        "fitted cosine palette"
    );
    Ok(result)
}

/// Fit cosine coefficients to the target colors.
///
/// The targets are hexadecimal colors, assumed to sit at evenly spaced
/// positions. See [`fit_with`] for details.
pub fn fit_cosine_palette<S: AsRef<str>>(
    targets: &[S],
    max_iterations: usize,
    learning_rate: Float,
) -> Result<FitResult, FitError> {
    let options = FitOptions::builder()
        .max_iterations(max_iterations)
        .learning_rate(learning_rate)
        .build();
    fit_with(targets, &options)
}

/// Create random initial parameters for robust fitting.
fn random_parameters<R: Rng + ?Sized>(rng: &mut R) -> [Float; PARAMETER_COUNT] {
    let mut parameters = [0.0; PARAMETER_COUNT];
    for (index, p) in parameters.iter_mut().enumerate() {
        *p = match index / 3 {
            0 | 1 => rng.random_range(0.1..=0.9),
            2 => rng.random_range(0.5..=2.5),
            _ => rng.random_range(0.0..1.0),
        };
    }
    parameters
}

/// Make one robust fitting attempt from random parameters.
fn attempt<R: Rng + ?Sized>(
    objective: &Objective,
    options: &FitOptions,
    index: usize,
    rng: &mut R,
) -> FitResult {
    let result = descend(
        objective,
        random_parameters(rng),
        options,
        true,
        ROBUST_TOLERANCE,
    );
    trace!(
        attempt = index,
        error = result.error,
        iterations = result.iterations,
        "completed fitting attempt"
    );
    result
}

/// Robustly fit cosine coefficients to the target colors with the given
/// options.
///
/// This function makes the configured number of attempts, each starting from
/// random parameters. After every update, it clamps offsets and amplitudes to
/// `0..=1` and frequencies to `0.1..=5`, while phases wrap around into `0..1`.
/// Each attempt stops after the maximum number of iterations or once the error
/// drops below [`ROBUST_TOLERANCE`]. The result is the attempt with the lowest
/// error.
pub fn fit_robust_with<S: AsRef<str>, R: Rng + ?Sized>(
    targets: &[S],
    options: &FitOptions,
    rng: &mut R,
) -> Result<FitResult, FitError> {
    let objective = Objective::new(parse_targets(targets)?);

    let mut best = attempt(&objective, options, 0, rng);
    for index in 1..options.attempts() {
        let result = attempt(&objective, options, index, rng);
        if result.error < best.error {
            best = result;
        }
    }

    debug!(
        targets = targets.len(),
        attempts = options.attempts(),
        error = best.error,
        "robustly fitted cosine palette"
    );
    Ok(best)
}

/// Robustly fit cosine coefficients to the target colors.
///
/// The targets are hexadecimal colors, assumed to sit at evenly spaced
/// positions. Zero attempts are treated as one. See [`fit_robust_with`] for
/// details.
pub fn fit_cosine_palette_robust<S: AsRef<str>, R: Rng + ?Sized>(
    targets: &[S],
    max_iterations: usize,
    learning_rate: Float,
    attempts: usize,
    rng: &mut R,
) -> Result<FitResult, FitError> {
    let options = FitOptions::builder()
        .max_iterations(max_iterations)
        .learning_rate(learning_rate)
        .attempts(attempts)
        .build();
    fit_robust_with(targets, &options, rng)
}

/// Compare the fitted coefficients against the target colors.
///
/// This function evaluates the coefficients at as many stops as there are
/// targets and reports absolute channel errors on the 0–255 scale. It serves
/// diagnostic purposes only.
pub fn validate_fit<S: AsRef<str>>(
    targets: &[S],
    fitted: &FitResult,
) -> Result<FitDiagnostics, FitError> {
    let targets = parse_targets(targets)?;

    let mut total = Accumulator::default();
    let mut max_error: Float = 0.0;
    let mut comparisons = Vec::with_capacity(targets.len());

    for (target, color) in targets.iter().zip(fitted.coefficients.stops(targets.len())) {
        let mut sample = Accumulator::default();
        for (expected, actual) in target.iter().zip(color.coordinates()) {
            let delta = 255.0 * (expected - actual).abs();
            sample += delta;
            max_error = max_error.max(delta);
        }

        let sample_error = sample.total();
        total += sample_error;
        comparisons.push(ColorComparison {
            original: format_hex(target),
            fitted: color.to_hex(),
            error: sample_error / 3.0,
        });
    }

    #[allow(clippy::cast_precision_loss)]
    let average_error = total.total() / (3 * targets.len()) as Float;
    Ok(FitDiagnostics {
        average_error,
        max_error,
        comparisons,
    })
}

// ====================================================================================================================

#[cfg(test)]
mod test {
    use super::{
        fit_cosine_palette, fit_cosine_palette_robust, fit_robust_with, fit_with, validate_fit,
        FitOptions, GradientMethod, INITIAL_GUESS, PLAIN_TOLERANCE,
    };
    use crate::error::{ColorFormatError, FitError};
    use crate::{ColorVector, CosineCoefficients, Float};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn palette() -> Vec<String> {
        CosineCoefficients::new(
            [0.5, 0.45, 0.4],
            [0.3, 0.25, 0.2],
            [0.5, 0.5, 0.5],
            [0.0, 0.15, 0.3],
        )
        .evaluate(5)
        .iter()
        .map(ColorVector::to_hex)
        .collect()
    }

    #[test]
    fn test_errors() {
        let empty: [&str; 0] = [];
        assert_eq!(
            fit_cosine_palette(&empty, 10, 0.01),
            Err(FitError::NoTargetColors)
        );
        assert_eq!(
            fit_cosine_palette_robust(&empty, 10, 0.01, 2, &mut StdRng::seed_from_u64(1)),
            Err(FitError::NoTargetColors)
        );
        assert_eq!(
            fit_cosine_palette(&["#fff", "nope"], 10, 0.01),
            Err(FitError::Format(1, ColorFormatError::UnexpectedCharacters))
        );
    }

    #[test]
    fn test_early_exit() {
        // The rainbow's first stop is within a rounding error of #ff4040.
        let result = fit_cosine_palette(&["#ff4040"], 1_000, 0.05).unwrap();
        assert!(result.error() < PLAIN_TOLERANCE);
        assert!(result.iterations() < 10);

        let result = fit_cosine_palette(&["#ff4040"], 0, 0.05).unwrap();
        assert_eq!(result.iterations(), 0);
        assert_eq!(
            result.coefficients(),
            &CosineCoefficients::from_parameters(&INITIAL_GUESS)
        );
    }

    #[test]
    fn test_error_decreases() {
        let targets = palette();
        let initial = fit_cosine_palette(&targets, 0, 0.01).unwrap();
        let short = fit_cosine_palette(&targets, 50, 0.01).unwrap();
        let long = fit_cosine_palette(&targets, 1_000, 0.01).unwrap();

        assert!(short.error() < initial.error());
        assert!(long.error() <= short.error());
        assert_eq!(short.iterations(), 50);
    }

    #[test]
    fn test_single_target() {
        let result = fit_cosine_palette(&["#336699"], 2_000, 0.05).unwrap();
        let diagnostics = validate_fit(&["#336699"], &result).unwrap();
        assert!(diagnostics.max_error() < 1.0);
        assert_eq!(diagnostics.comparisons()[0].original, "#336699");
        assert_eq!(diagnostics.comparisons()[0].fitted, "#336699");
    }

    #[test]
    fn test_robust_round_trip() {
        let targets = palette();
        let mut rng = StdRng::seed_from_u64(2024);
        let result = fit_cosine_palette_robust(&targets, 3_000, 0.005, 8, &mut rng).unwrap();
        let diagnostics = validate_fit(&targets, &result).unwrap();

        assert!(
            diagnostics.average_error() < 5.0,
            "average error {} too large",
            diagnostics.average_error()
        );
        assert_eq!(diagnostics.comparisons().len(), targets.len());

        for vector in [
            result.coefficients().offset(),
            result.coefficients().amplitude(),
        ] {
            for c in vector.coordinates() {
                assert!((0.0..=1.0).contains(c));
            }
        }
        for c in result.coefficients().frequency().coordinates() {
            assert!((0.1..=5.0).contains(c));
        }
        for c in result.coefficients().phase().coordinates() {
            assert!((0.0..1.0).contains(c));
        }
    }

    #[test]
    fn test_round_trip_random_palettes() {
        let mut rng = StdRng::seed_from_u64(0x0dd5);

        for round in 0..6 {
            let mut offset = [0.0; 3];
            let mut amplitude = [0.0; 3];
            let mut frequency = [0.0; 3];
            let mut phase = [0.0; 3];
            for index in 0..3 {
                let o: Float = rng.random_range(0.3..=0.7);
                offset[index] = o;
                amplitude[index] = rng.random_range(0.1..=o.min(1.0 - o));
                frequency[index] = rng.random_range(0.3..=1.5);
                phase[index] = rng.random_range(0.0..1.0);
            }

            let stops: usize = rng.random_range(2..=8);
            let targets: Vec<String> = CosineCoefficients::new(offset, amplitude, frequency, phase)
                .evaluate(stops)
                .iter()
                .map(ColorVector::to_hex)
                .collect();

            let result = fit_cosine_palette_robust(&targets, 5_000, 0.1, 20, &mut rng).unwrap();
            let diagnostics = validate_fit(&targets, &result).unwrap();
            assert!(
                diagnostics.average_error() < 5.0,
                "round {} with {} stops has average error {}: {:?}",
                round,
                stops,
                diagnostics.average_error(),
                targets
            );
        }
    }

    #[test]
    fn test_robust_is_reproducible() {
        let targets = palette();
        let options = FitOptions::builder()
            .max_iterations(200)
            .learning_rate(0.005)
            .attempts(0)
            .build();
        assert_eq!(options.attempts(), 1);

        let first = fit_robust_with(&targets, &options, &mut StdRng::seed_from_u64(5)).unwrap();
        let second = fit_robust_with(&targets, &options, &mut StdRng::seed_from_u64(5)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_analytic_method() {
        let targets = palette();
        let numeric = FitOptions::builder().max_iterations(300).build();
        let analytic = FitOptions::builder()
            .max_iterations(300)
            .method(GradientMethod::Analytic)
            .build();

        let initial = fit_cosine_palette(&targets, 0, 0.01).unwrap();
        let numeric = fit_with(&targets, &numeric).unwrap();
        let analytic = fit_with(&targets, &analytic).unwrap();
        assert!(numeric.error() < initial.error());
        assert!(analytic.error() < initial.error());
        assert!(analytic.iterations() <= 300);
    }

    #[test]
    fn test_validate_fit() {
        let targets = ["#000000", "#ffffff"];
        let flat = fit_cosine_palette(&["#808080"], 0, 0.01).unwrap();
        let diagnostics = validate_fit(&targets, &flat).unwrap();

        // The rainbow evaluates to [1, 0.25, 0.25] at both stops.
        assert_eq!(diagnostics.comparisons()[0].fitted, "#ff4040");
        assert_eq!(diagnostics.comparisons()[1].fitted, "#ff4040");
        assert_eq!(diagnostics.max_error(), 255.0);
        assert!(diagnostics.average_error() > 100.0);
        assert_eq!(
            validate_fit(&["#12"], &flat),
            Err(FitError::Format(0, ColorFormatError::UnexpectedCharacters))
        );
    }
}
