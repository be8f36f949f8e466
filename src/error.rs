//! The error type shared by every fallible operation in this crate.

use thiserror::Error;

/// Everything that can go wrong when building or accessing an image.
///
/// None of these is recovered internally. An operation that returns an
/// `ImageError` has had no effect.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImageError {
    /// A point lies outside the domain of the image.
    #[error("Point {point} is outside the domain {lower}-{upper}")]
    OutOfDomain { point: String, lower: String, upper: String },

    /// A linear index is not in `0..size`.
    #[error("Index {index} is out of range for an image of size {size}")]
    IndexOutOfRange { index: usize, size: usize },

    /// Two things that must have the same number of dimensions do not.
    #[error("Expected {expected} dimensions, found {found}")]
    DimensionMismatch { expected: usize, found: usize },

    /// A buffer's shape, length, strides or alignment disagree with the
    /// domain or the requested major order.
    #[error("Layout mismatch: {0}")]
    LayoutMismatch(String),

    /// A buffer's element type is not the value type of the image.
    #[error("Format mismatch (buffer: {found}, image: {expected})")]
    FormatMismatch { expected: String, found: String },

    /// `lower_bound` is not below `upper_bound` in every dimension, or the
    /// domain has more points than fit in a `usize`.
    #[error("Invalid domain {lower}-{upper}")]
    InvalidDomain { lower: String, upper: String },

    /// Shifting a domain would move a bound past the range of `Integer`.
    #[error("Cannot translate domain {domain} by {shift}: coordinates overflow")]
    TranslationOverflow { domain: String, shift: String },

    /// A major order other than `"F"` or `"C"`.
    #[error("Invalid major order {0:?}, expected \"F\" or \"C\"")]
    InvalidOrder(String),

    /// A type name not known to [`AnyImage`].
    ///
    /// [`AnyImage`]: super::AnyImage
    #[error("Unknown image type {0:?}")]
    UnknownType(String),
}

/// `Result` specialised to [`ImageError`].
pub type Result<T> = std::result::Result<T, ImageError>;
