mod conversion;
mod equality;
mod math;
mod metric;
mod string;

// conversion
pub(crate) use conversion::{from_24bit, hsv_to_rgb, lab_to_rgb, rgb_to_hsv, rgb_to_lab, to_24bit};

// equality
#[cfg(test)]
pub(crate) use equality::assert_within;
#[cfg(feature = "pyffi")]
pub use equality::close_enough;
pub use equality::to_eq_bits;

// math
pub(crate) use math::{wrap_unit, Accumulator, TAU};

// metric
pub(crate) use metric::{brightness, perceptual_distance, saturation};

// string
pub(crate) use string::{format_hex, parse_hex};
