use super::math::ROUNDING_FACTOR;
use crate::{Bits, Float};

/// Assert that two floating point numbers are equal after normalization.
///
/// Both numbers pass through [`to_eq_bits`] first, which makes not-a-number
/// equal to zero, negative zero equal to positive zero, and ignores
/// differences beyond the twelfth decimal.
///
/// # Panics
///
/// This macro panics on different normalized bits, printing both numbers on
/// separate lines.
#[macro_export]
macro_rules! assert_close_enough {
    ($f1:expr, $f2:expr $(,)?) => {
        let (f1, f2) = ($f1, $f2);
        let bits1 = $crate::to_eq_bits(f1);
        let bits2 = $crate::to_eq_bits(f2);
        assert_eq!(bits1, bits2, "quantities differ:\n{:?}\n{:?}", f1, f2);
    };
}

/// Test macro for asserting that two channel arrays are within the given
/// absolute tolerance of each other.
///
/// # Panics
///
/// This macro panics if any pair of channels differs by more than the
/// tolerance. Its message places the arrays below each other for easy
/// comparability.
#[cfg(test)]
macro_rules! assert_within {
    ($cs1:expr, $cs2:expr, $tolerance:expr $(,)?) => {
        // Matching keeps temporaries alive until the assertion completes.
        match (&$cs1, &$cs2, $tolerance) {
            (cs1, cs2, tolerance) => {
                let within = cs1
                    .iter()
                    .zip(cs2.iter())
                    .all(|(c1, c2): (&$crate::Float, &$crate::Float)| {
                        (c1 - c2).abs() <= tolerance
                    });
                assert!(
                    within,
                    "channels differ by more than {}:\n{:?}\n{:?}",
                    tolerance, cs1, cs2
                );
            }
        }
    };
}

#[cfg(test)]
pub(crate) use assert_within;

/// Determine whether two floats are equal after normalization.
/// <i class=python-only>Python only!</i>
#[cfg(feature = "pyffi")]
#[pyo3::pyfunction]
pub fn close_enough(f1: Float, f2: Float) -> bool {
    to_eq_bits(f1) == to_eq_bits(f2)
}

/// Normalize the floating point number and return its bits.
///
/// Not-a-number becomes zero, the number is rounded to twelve decimals, and
/// negative zero becomes positive zero. The function is public only for the sake of
/// [`assert_close_enough`].
#[doc(hidden)]
#[inline]
pub fn to_eq_bits(f: Float) -> Bits {
    let f = if f.is_nan() { 0.0 } else { f };
    let rounded = (ROUNDING_FACTOR * f).round();
    if rounded == 0.0 {
        // Covers -0.0 as well.
        0.0_f64.to_bits()
    } else {
        rounded.to_bits()
    }
}

#[cfg(test)]
mod test {
    use super::to_eq_bits;

    #[test]
    fn test_to_eq_bits() {
        assert_eq!(to_eq_bits(-0.0), to_eq_bits(0.0));
        assert_eq!(to_eq_bits(f64::NAN), to_eq_bits(0.0));
        assert_eq!(to_eq_bits(0.1 + 0.2), to_eq_bits(0.3));
        assert_ne!(to_eq_bits(0.3), to_eq_bits(0.3001));
    }
}
