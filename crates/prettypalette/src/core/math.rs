use crate::Float;

/// The factor determining rounding precision for equality comparisons.
///
/// When limiting a floating point number's precision, the number is
/// multiplied by this factor, rounded, and divided by the same factor again.
/// Being a power of ten, it directly translates into significant digits after
/// the decimal.
pub(crate) const ROUNDING_FACTOR: Float = 1e12;

/// Full turn in radians.
pub(crate) const TAU: Float = core::f64::consts::TAU;

/// Wrap the value into the unit interval `0..1`.
///
/// Cosine phases and HSV hues are both measured in turns, so whole turns carry
/// no information. Unlike `%`, this function maps negative values onto the
/// positive range as well.
#[inline]
pub(crate) fn wrap_unit(value: Float) -> Float {
    let wrapped = value.rem_euclid(1.0);
    // rem_euclid may round up to exactly 1.0 for tiny negative inputs.
    if wrapped < 1.0 {
        wrapped
    } else {
        0.0
    }
}

// ----------------------------------------------------------------------------------------------------------

/// A floating point accumulator.
///
/// Unlike plain summation with the `+` operator, this struct minimizes the
/// cumulative error by using [Kahan's algorithm with Neumaier's
/// improvements](https://en.wikipedia.org/wiki/Kahan_summation_algorithm).
#[derive(Debug, Default)]
pub(crate) struct Accumulator {
    sum: Float,
    compensation: Float,
}

impl Accumulator {
    #[inline]
    pub fn total(&self) -> Float {
        self.sum + self.compensation
    }
}

impl core::ops::Add<Float> for Accumulator {
    type Output = Accumulator;

    /// Accumulate the given number.
    ///
    /// This method moves the accumulator in and out again, so that it can be
    /// used as the state of a fold.
    fn add(self, rhs: Float) -> Self::Output {
        let mut lhs = self;
        lhs += rhs;
        lhs
    }
}

impl core::ops::AddAssign<Float> for Accumulator {
    fn add_assign(&mut self, rhs: Float) {
        let t = self.sum + rhs;
        if rhs.abs() < self.sum.abs() {
            self.compensation += (self.sum - t) + rhs;
        } else {
            self.compensation += (rhs - t) + self.sum;
        }
        self.sum = t;
    }
}

impl FromIterator<Float> for Accumulator {
    fn from_iter<I: IntoIterator<Item = Float>>(iter: I) -> Self {
        iter.into_iter().fold(Accumulator::default(), |acc, n| acc + n)
    }
}

#[cfg(test)]
mod test {
    use super::{wrap_unit, Accumulator};

    #[test]
    fn test_accumulator() {
        let mut accum = Accumulator::default();
        accum += 1.0;
        accum += 10e100;
        accum += 1.0;
        accum += -10e100;
        assert_eq!(accum.total(), 2.0);
        assert_eq!(1.0 + 10e100 + 1.0 - 10e100, 0.0);

        let collected: Accumulator = [0.1, 0.2, 0.3].into_iter().collect();
        assert!((collected.total() - 0.6).abs() < 1e-15);
    }

    #[test]
    fn test_wrap_unit() {
        assert_eq!(wrap_unit(0.25), 0.25);
        assert_eq!(wrap_unit(1.25), 0.25);
        assert_eq!(wrap_unit(-0.25), 0.75);
        assert_eq!(wrap_unit(3.0), 0.0);
        assert_eq!(wrap_unit(-1e-20), 0.0);
    }
}
