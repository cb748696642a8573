//! Utility module with prettypalette's errors.

#[cfg(feature = "pyffi")]
use pyo3::{exceptions::PyValueError, prelude::*};

/// An erroneous color format.
///
/// Only hexadecimal colors are recognized, so the variants describe the ways
/// in which a string can fail to be one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColorFormatError {
    /// A color format without any hexadecimal digits, e.g., the empty string
    /// or a lone `#`.
    UnknownFormat,

    /// A color format with unexpected characters or an unexpected number of
    /// characters. For example, `#00` is missing a hexadecimal digit, whereas
    /// `#💩00` has the correct length but contains an unsuitable character.
    UnexpectedCharacters,

    /// A color format with the right number of ASCII characters that are not
    /// all hexadecimal digits. For example, `#efg` has a malformed third
    /// coordinate.
    MalformedHex,
}

impl core::fmt::Display for ColorFormatError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        use ColorFormatError::*;

        match *self {
            UnknownFormat => {
                f.write_str("color format should have hexadecimal digits but has none")
            }
            UnexpectedCharacters => {
                f.write_str("color format should have 3 or 6 ASCII characters after the `#`")
            }
            MalformedHex => {
                f.write_str("color format coordinates should be hexadecimal integers but are not")
            }
        }
    }
}

impl std::error::Error for ColorFormatError {}

#[cfg(feature = "pyffi")]
impl From<ColorFormatError> for PyErr {
    fn from(value: ColorFormatError) -> Self {
        PyValueError::new_err(value.to_string())
    }
}

// ====================================================================================================================

/// An error indicating coefficient vectors with different channel counts.
///
/// The four vectors of [`CosineCoefficients`](crate::CosineCoefficients) must
/// either all have an alpha channel or all lack one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChannelCountError {
    pub expected: usize,
    pub actual: usize,
}

impl core::fmt::Display for ChannelCountError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_fmt(format_args!(
            "coefficient vectors should all have {} channels but one has {}",
            self.expected, self.actual
        ))
    }
}

impl std::error::Error for ChannelCountError {}

#[cfg(feature = "pyffi")]
impl From<ChannelCountError> for PyErr {
    fn from(value: ChannelCountError) -> Self {
        PyValueError::new_err(value.to_string())
    }
}

// ====================================================================================================================

/// An error indicating an unknown harmony category name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HarmonyCategoryError {
    pub name: String,
}

impl core::fmt::Display for HarmonyCategoryError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_fmt(format_args!(
            "\"{}\" should be a harmony category but is not",
            self.name
        ))
    }
}

impl std::error::Error for HarmonyCategoryError {}

#[cfg(feature = "pyffi")]
impl From<HarmonyCategoryError> for PyErr {
    fn from(value: HarmonyCategoryError) -> Self {
        PyValueError::new_err(value.to_string())
    }
}

// ====================================================================================================================

/// An error while fitting cosine coefficients to target colors.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FitError {
    /// The list of target colors is empty.
    NoTargetColors,

    /// The target color with the given index is not a hexadecimal color.
    Format(usize, ColorFormatError),
}

impl core::fmt::Display for FitError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match *self {
            Self::NoTargetColors => f.write_str("fitting requires at least one target color"),
            Self::Format(index, _) => {
                f.write_fmt(format_args!("could not parse target color #{}", index))
            }
        }
    }
}

impl std::error::Error for FitError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match *self {
            Self::NoTargetColors => None,
            Self::Format(_, ref error) => Some(error),
        }
    }
}

#[cfg(feature = "pyffi")]
impl From<FitError> for PyErr {
    fn from(value: FitError) -> Self {
        PyValueError::new_err(value.to_string())
    }
}
