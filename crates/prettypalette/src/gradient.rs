//! Cosine gradients.
//!
//! A cosine gradient maps a position `t` in `0..=1` to a color by evaluating
//!
//! ```text
//! color(t) = a + b · cos(2π · (c · t + d))
//! ```
//!
//! per channel, with offset `a`, amplitude `b`, frequency `c`, and phase `d`.
//! Four coefficient vectors thus describe an entire palette, which is what
//! makes the representation so compact.

#[cfg(feature = "pyffi")]
use pyo3::prelude::*;

use crate::core::TAU;
use crate::error::ChannelCountError;
use crate::{ColorVector, Float};

/// The number of scalar parameters of the RGB part of cosine coefficients.
pub const PARAMETER_COUNT: usize = 12;

/// Evaluate a single channel of the cosine formula without clamping.
#[inline]
pub(crate) fn cosine(
    offset: Float,
    amplitude: Float,
    frequency: Float,
    phase: Float,
    t: Float,
) -> Float {
    amplitude.mul_add((TAU * frequency.mul_add(t, phase)).cos(), offset)
}

/// Determine the position of the stop with the given index.
///
/// A single stop sits at position 0. Otherwise, stops are spaced evenly
/// between 0 and 1 inclusive.
#[inline]
#[allow(clippy::cast_precision_loss)]
pub(crate) fn position(index: usize, stops: usize) -> Float {
    if stops <= 1 {
        0.0
    } else {
        index as Float / (stops - 1) as Float
    }
}

/// The coefficients of a cosine gradient.
///
/// Cosine coefficients comprise four [`ColorVector`]s, the offset `a`, the
/// amplitude `b`, the frequency `c`, and the phase `d`, with phase measured in
/// turns. Either all four vectors have an alpha channel or none does.
///
/// ```
/// # use prettypalette::{ColorVector, CosineCoefficients};
/// let rainbow = CosineCoefficients::new(
///     [0.5, 0.5, 0.5],
///     [0.5, 0.5, 0.5],
///     [1.0, 1.0, 1.0],
///     [0.0, 0.33, 0.67],
/// );
/// let colors = rainbow.evaluate(5);
/// assert_eq!(colors.len(), 5);
/// assert_eq!(colors[0], rainbow.sample(0.0));
/// ```
#[cfg_attr(feature = "pyffi", pyclass(eq, frozen, module = "prettypalette"))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CosineCoefficients {
    offset: ColorVector,
    amplitude: ColorVector,
    frequency: ColorVector,
    phase: ColorVector,
}

impl CosineCoefficients {
    /// Create new cosine coefficients from red, green, and blue channels.
    pub const fn new(
        offset: [Float; 3],
        amplitude: [Float; 3],
        frequency: [Float; 3],
        phase: [Float; 3],
    ) -> Self {
        Self {
            offset: ColorVector::new(offset[0], offset[1], offset[2]),
            amplitude: ColorVector::new(amplitude[0], amplitude[1], amplitude[2]),
            frequency: ColorVector::new(frequency[0], frequency[1], frequency[2]),
            phase: ColorVector::new(phase[0], phase[1], phase[2]),
        }
    }

    /// Create new cosine coefficients from four color vectors.
    ///
    /// This function fails if the vectors do not share the same channel
    /// count, i.e., if some but not all of them have an alpha channel.
    pub fn from_vectors(
        offset: ColorVector,
        amplitude: ColorVector,
        frequency: ColorVector,
        phase: ColorVector,
    ) -> Result<Self, ChannelCountError> {
        let expected = offset.channel_count();
        for vector in [&amplitude, &frequency, &phase] {
            let actual = vector.channel_count();
            if actual != expected {
                return Err(ChannelCountError { expected, actual });
            }
        }

        Ok(Self {
            offset,
            amplitude,
            frequency,
            phase,
        })
    }

    /// Create new cosine coefficients from a flat parameter vector.
    ///
    /// The parameters are ordered offset, amplitude, frequency, and phase,
    /// each with red, green, and blue. The result has no alpha channel.
    pub fn from_parameters(parameters: &[Float; PARAMETER_COUNT]) -> Self {
        let p = parameters;
        Self::new(
            [p[0], p[1], p[2]],
            [p[3], p[4], p[5]],
            [p[6], p[7], p[8]],
            [p[9], p[10], p[11]],
        )
    }

    /// Flatten the red, green, and blue coefficients into a parameter vector.
    ///
    /// This is the inverse of [`CosineCoefficients::from_parameters`], dropping
    /// any alpha coefficients.
    pub fn to_parameters(&self) -> [Float; PARAMETER_COUNT] {
        let mut parameters = [0.0; PARAMETER_COUNT];
        for (index, vector) in self.vectors().iter().enumerate() {
            parameters[3 * index..3 * index + 3].copy_from_slice(vector.coordinates());
        }
        parameters
    }

    /// Get the offset `a`.
    pub const fn offset(&self) -> &ColorVector {
        &self.offset
    }

    /// Get the amplitude `b`.
    pub const fn amplitude(&self) -> &ColorVector {
        &self.amplitude
    }

    /// Get the frequency `c`.
    pub const fn frequency(&self) -> &ColorVector {
        &self.frequency
    }

    /// Get the phase `d` in turns.
    pub const fn phase(&self) -> &ColorVector {
        &self.phase
    }

    /// Get all four vectors in offset, amplitude, frequency, phase order.
    pub const fn vectors(&self) -> [&ColorVector; 4] {
        [&self.offset, &self.amplitude, &self.frequency, &self.phase]
    }

    /// Determine the channel count shared by all four vectors.
    pub const fn channel_count(&self) -> usize {
        self.offset.channel_count()
    }

    /// Evaluate the gradient at the given position without clamping.
    fn sample_unclamped(&self, t: Float) -> ColorVector {
        let [a, b, c, d] = self.vectors();
        let channel = |index: usize| {
            cosine(
                a.coordinates()[index],
                b.coordinates()[index],
                c.coordinates()[index],
                d.coordinates()[index],
                t,
            )
        };

        let rgb = [channel(0), channel(1), channel(2)];
        match (a.alpha(), b.alpha(), c.alpha(), d.alpha()) {
            (Some(aa), Some(ba), Some(ca), Some(da)) => {
                ColorVector::from([rgb[0], rgb[1], rgb[2], cosine(aa, ba, ca, da, t)])
            }
            _ => ColorVector::from(rgb),
        }
    }

    /// Evaluate the gradient at the given position.
    ///
    /// Each channel is clamped to unit range after evaluation. Positions
    /// outside `0..=1` are evaluated just the same, since the formula is
    /// defined for all reals.
    pub fn sample(&self, t: Float) -> ColorVector {
        self.sample_unclamped(t).clamp()
    }

    /// Create an iterator over the given number of evenly spaced stops.
    ///
    /// The iterator borrows the coefficients and retains no other state, so
    /// calling this method again simply restarts the evaluation.
    pub fn stops(&self, count: usize) -> GradientStops<'_> {
        GradientStops {
            coefficients: self,
            count,
            index: 0,
        }
    }

    /// Evaluate the gradient at the given number of evenly spaced stops.
    ///
    /// For one stop, the gradient is evaluated at position 0. For zero stops,
    /// the result is empty.
    pub fn evaluate(&self, count: usize) -> Vec<ColorVector> {
        self.stops(count).collect()
    }
}

impl Default for CosineCoefficients {
    /// The classic rainbow palette with phases a third of a turn apart.
    fn default() -> Self {
        Self::new(
            [0.5, 0.5, 0.5],
            [0.5, 0.5, 0.5],
            [1.0, 1.0, 1.0],
            [0.0, 1.0 / 3.0, 2.0 / 3.0],
        )
    }
}

#[cfg(feature = "pyffi")]
#[pymethods]
impl CosineCoefficients {
    /// Create new cosine coefficients. <i class=python-only>Python only!</i>
    #[new]
    pub fn py_new(
        offset: ColorVector,
        amplitude: ColorVector,
        frequency: ColorVector,
        phase: ColorVector,
    ) -> Result<Self, ChannelCountError> {
        Self::from_vectors(offset, amplitude, frequency, phase)
    }

    /// Get the offset. <i class=python-only>Python only!</i>
    #[getter(offset)]
    pub fn py_offset(&self) -> ColorVector {
        self.offset
    }

    /// Get the amplitude. <i class=python-only>Python only!</i>
    #[getter(amplitude)]
    pub fn py_amplitude(&self) -> ColorVector {
        self.amplitude
    }

    /// Get the frequency. <i class=python-only>Python only!</i>
    #[getter(frequency)]
    pub fn py_frequency(&self) -> ColorVector {
        self.frequency
    }

    /// Get the phase. <i class=python-only>Python only!</i>
    #[getter(phase)]
    pub fn py_phase(&self) -> ColorVector {
        self.phase
    }

    /// Evaluate at a single position. <i class=python-only>Python only!</i>
    #[pyo3(name = "sample")]
    pub fn py_sample(&self, t: Float) -> ColorVector {
        self.sample(t)
    }

    /// Evaluate at evenly spaced stops. <i class=python-only>Python only!</i>
    #[pyo3(name = "evaluate")]
    pub fn py_evaluate(&self, count: usize) -> Vec<ColorVector> {
        self.evaluate(count)
    }

    /// Get a debug representation. <i class=python-only>Python only!</i>
    pub fn __repr__(&self) -> String {
        format!("{:?}", self)
    }
}

/// An iterator over the stops of a cosine gradient.
///
/// This iterator is created by [`CosineCoefficients::stops`].
#[derive(Debug)]
pub struct GradientStops<'a> {
    coefficients: &'a CosineCoefficients,
    count: usize,
    index: usize,
}

impl Iterator for GradientStops<'_> {
    type Item = ColorVector;

    fn next(&mut self) -> Option<Self::Item> {
        if self.count <= self.index {
            return None;
        }

        let t = position(self.index, self.count);
        self.index += 1;
        Some(self.coefficients.sample(t))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.count - self.index;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for GradientStops<'_> {}

impl core::iter::FusedIterator for GradientStops<'_> {}

/// Evaluate the cosine gradient at the given number of evenly spaced stops.
///
/// This function is a convenience wrapper around
/// [`CosineCoefficients::evaluate`].
pub fn evaluate_cosine_gradient(
    stops: usize,
    coefficients: &CosineCoefficients,
) -> Vec<ColorVector> {
    coefficients.evaluate(stops)
}

// ====================================================================================================================

#[cfg(test)]
mod test {
    use super::{evaluate_cosine_gradient, position, CosineCoefficients};
    use crate::core::TAU;
    use crate::error::ChannelCountError;
    use crate::ColorVector;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn rainbow() -> CosineCoefficients {
        CosineCoefficients::new(
            [0.5, 0.5, 0.5],
            [0.5, 0.5, 0.5],
            [1.0, 1.0, 1.0],
            [0.0, 0.333, 0.667],
        )
    }

    #[test]
    fn test_hand_computed_stops() {
        let colors = evaluate_cosine_gradient(3, &rainbow());
        assert_eq!(colors.len(), 3);

        for (color, t) in colors.iter().zip([0.0, 0.5, 1.0]) {
            for (channel, phase) in color.coordinates().iter().zip([0.0, 0.333, 0.667]) {
                let expected = 0.5 + 0.5 * (TAU * (t + phase)).cos();
                assert!(
                    (channel - expected).abs() < 1e-9,
                    "t={} channel {} differs from {}",
                    t,
                    channel,
                    expected
                );
            }
        }

        // Red starts at its peak and bottoms out halfway through.
        assert!((colors[0].red() - 1.0).abs() < 1e-9);
        assert!(colors[1].red().abs() < 1e-9);
        assert!((colors[2].red() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_single_stop() {
        let coefficients = rainbow();
        let colors = coefficients.evaluate(1);
        assert_eq!(colors.len(), 1);
        assert_eq!(colors[0], coefficients.sample(0.0));
        assert_eq!(position(0, 1), 0.0);
        assert!(coefficients.evaluate(0).is_empty());
    }

    #[test]
    fn test_boundedness() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        for _ in 0..200 {
            let mut parameters = [0.0; super::PARAMETER_COUNT];
            for p in parameters.iter_mut() {
                *p = rng.random_range(-3.0..3.0);
            }

            let coefficients = CosineCoefficients::from_parameters(&parameters);
            let stops = rng.random_range(1..20);
            for color in coefficients.evaluate(stops) {
                assert!(
                    color.coordinates().iter().all(|c| (0.0..=1.0).contains(c)),
                    "{:?} out of range",
                    color
                );
            }
        }
    }

    #[test]
    fn test_stops_restart() {
        let coefficients = rainbow();
        let stops = coefficients.stops(7);
        assert_eq!(stops.len(), 7);
        let first: Vec<ColorVector> = stops.collect();
        let second: Vec<ColorVector> = coefficients.stops(7).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_parameters() {
        let coefficients = rainbow();
        let parameters = coefficients.to_parameters();
        assert_eq!(&parameters[9..], &[0.0, 0.333, 0.667]);
        assert_eq!(CosineCoefficients::from_parameters(&parameters), coefficients);
    }

    #[test]
    fn test_alpha() -> Result<(), ChannelCountError> {
        let opaque = ColorVector::with_alpha(0.5, 0.5, 0.5, 1.0);
        let flat = ColorVector::with_alpha(0.5, 0.5, 0.5, 0.0);
        let coefficients = CosineCoefficients::from_vectors(opaque, opaque, flat, flat)?;
        assert_eq!(coefficients.channel_count(), 4);
        for color in coefficients.evaluate(4) {
            // 1.0 + 1.0 · cos(0) = 2.0, clamped to 1.0
            assert_eq!(color.alpha(), Some(1.0));
        }

        let result = CosineCoefficients::from_vectors(
            opaque,
            ColorVector::new(0.5, 0.5, 0.5),
            flat,
            flat,
        );
        assert_eq!(
            result,
            Err(ChannelCountError {
                expected: 4,
                actual: 3
            })
        );
        Ok(())
    }
}
