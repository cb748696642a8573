use super::GradientMethod;
use crate::core::{parse_hex, wrap_unit, Accumulator, TAU};
use crate::error::FitError;
use crate::gradient::{cosine, position, PARAMETER_COUNT};
use crate::Float;

/// The step size for central differences.
const EPSILON: Float = 1e-6;

/// Parse the target colors.
pub(super) fn parse_targets<S: AsRef<str>>(targets: &[S]) -> Result<Vec<[Float; 3]>, FitError> {
    if targets.is_empty() {
        return Err(FitError::NoTargetColors);
    }

    targets
        .iter()
        .enumerate()
        .map(|(index, target)| {
            parse_hex(target.as_ref()).map_err(|error| FitError::Format(index, error))
        })
        .collect()
}

/// Clamp the parameters into their admissible ranges.
///
/// Offsets and amplitudes fall into `0..=1`, frequencies into `0.1..=5`, and
/// phases wrap around into `0..1`.
pub(super) fn clamp_parameters(parameters: &mut [Float; PARAMETER_COUNT]) {
    for (index, p) in parameters.iter_mut().enumerate() {
        let value = *p;
        *p = match index / 3 {
            0 | 1 => value.clamp(0.0, 1.0),
            2 => value.clamp(0.1, 5.0),
            _ => wrap_unit(value),
        };
    }
}

/// The sum of squared errors between a cosine gradient's stops and the
/// target colors.
#[derive(Debug)]
pub(super) struct Objective {
    targets: Vec<[Float; 3]>,
    positions: Vec<Float>,
}

impl Objective {
    pub fn new(targets: Vec<[Float; 3]>) -> Self {
        let positions = (0..targets.len())
            .map(|index| position(index, targets.len()))
            .collect();
        Self { targets, positions }
    }

    /// Evaluate the objective for the given parameters.
    pub fn error(&self, parameters: &[Float; PARAMETER_COUNT]) -> Float {
        let p = parameters;
        let mut sum = Accumulator::default();

        for (target, &t) in self.targets.iter().zip(&self.positions) {
            for channel in 0..3 {
                let value = cosine(p[channel], p[3 + channel], p[6 + channel], p[9 + channel], t)
                    .clamp(0.0, 1.0);
                let delta = value - target[channel];
                sum += delta * delta;
            }
        }

        sum.total()
    }

    /// Compute the objective's gradient with the given method.
    pub fn gradient(
        &self,
        parameters: &[Float; PARAMETER_COUNT],
        method: GradientMethod,
    ) -> [Float; PARAMETER_COUNT] {
        match method {
            GradientMethod::CentralDifference => self.central_difference(parameters),
            GradientMethod::Analytic => self.analytic(parameters),
        }
    }

    fn central_difference(
        &self,
        parameters: &[Float; PARAMETER_COUNT],
    ) -> [Float; PARAMETER_COUNT] {
        let mut gradient = [0.0; PARAMETER_COUNT];
        let mut shifted = *parameters;

        for index in 0..PARAMETER_COUNT {
            let original = shifted[index];
            shifted[index] = original + EPSILON;
            let above = self.error(&shifted);
            shifted[index] = original - EPSILON;
            let below = self.error(&shifted);
            shifted[index] = original;

            gradient[index] = (above - below) / (2.0 * EPSILON);
        }

        gradient
    }

    fn analytic(&self, parameters: &[Float; PARAMETER_COUNT]) -> [Float; PARAMETER_COUNT] {
        let p = parameters;
        let mut gradient = [0.0; PARAMETER_COUNT];

        for (target, &t) in self.targets.iter().zip(&self.positions) {
            for channel in 0..3 {
                let (offset, amplitude) = (p[channel], p[3 + channel]);
                let angle = TAU * p[6 + channel].mul_add(t, p[9 + channel]);
                let (sin, cos) = angle.sin_cos();

                let value = amplitude.mul_add(cos, offset);
                // Clamped stops do not respond to small changes.
                if !(0.0..=1.0).contains(&value) {
                    continue;
                }

                let residual = 2.0 * (value - target[channel]);
                let slope = -TAU * amplitude * sin;
                gradient[channel] += residual;
                gradient[3 + channel] += residual * cos;
                gradient[6 + channel] += residual * slope * t;
                gradient[9 + channel] += residual * slope;
            }
        }

        gradient
    }
}

// ====================================================================================================================

#[cfg(test)]
mod test {
    use super::{clamp_parameters, parse_targets, Objective};
    use crate::error::{ColorFormatError, FitError};
    use crate::fit::GradientMethod;
    use crate::CosineCoefficients;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn test_parse_targets() {
        assert_eq!(parse_targets::<&str>(&[]), Err(FitError::NoTargetColors));
        assert_eq!(
            parse_targets(&["#000", "#12345g"]),
            Err(FitError::Format(1, ColorFormatError::MalformedHex))
        );
        assert_eq!(
            parse_targets(&[String::from("#ffffff")]),
            Ok(vec![[1.0, 1.0, 1.0]])
        );
    }

    #[test]
    fn test_clamp_parameters() {
        let mut parameters = [
            -0.5, 0.5, 1.5, // offset
            2.0, -1.0, 0.3, // amplitude
            0.0, 9.0, 1.0, // frequency
            -0.25, 1.25, 0.5, // phase
        ];
        clamp_parameters(&mut parameters);
        assert_eq!(
            parameters,
            [0.0, 0.5, 1.0, 1.0, 0.0, 0.3, 0.1, 5.0, 1.0, 0.75, 0.25, 0.5]
        );
    }

    #[test]
    fn test_error() {
        let coefficients = CosineCoefficients::default();
        let targets = coefficients
            .evaluate(4)
            .iter()
            .map(|color| *color.coordinates())
            .collect();
        let objective = Objective::new(targets);
        assert_eq!(objective.error(&coefficients.to_parameters()), 0.0);

        let objective = Objective::new(vec![[0.0, 0.0, 0.0]]);
        let mut parameters = [0.0; 12];
        parameters[0] = 0.5;
        // Offset 0.5 plus amplitude 0 in the red channel only.
        assert_eq!(objective.error(&parameters), 0.25);
    }

    #[test]
    fn test_analytic_gradient() {
        let mut rng = StdRng::seed_from_u64(17);
        let targets = (0..5)
            .map(|_| {
                [
                    rng.random_range(0.0..1.0),
                    rng.random_range(0.0..1.0),
                    rng.random_range(0.0..1.0),
                ]
            })
            .collect();
        let objective = Objective::new(targets);

        for _ in 0..20 {
            // Keep every stop strictly inside the unit interval.
            let mut parameters = [0.0; 12];
            for channel in 0..3 {
                parameters[channel] = rng.random_range(0.4..0.6);
                parameters[3 + channel] = rng.random_range(0.05..0.35);
                parameters[6 + channel] = rng.random_range(0.5..2.0);
                parameters[9 + channel] = rng.random_range(0.0..1.0);
            }

            let numeric = objective.gradient(&parameters, GradientMethod::CentralDifference);
            let analytic = objective.gradient(&parameters, GradientMethod::Analytic);
            for (n, a) in numeric.iter().zip(analytic.iter()) {
                assert!((n - a).abs() < 1e-6, "{} vs {}", n, a);
            }
        }
    }
}
