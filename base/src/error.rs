//! Error taxonomy shared by every transcendental and power function.
//!
//! The message text is part of the interface contract: callers match on it,
//! so wording changes here are breaking changes for the crate.

use core::fmt;

/// The distinguishable failure modes of the kernel.
///
/// Every public function that can fail returns one of these, never a partial
/// or NaN-like result. The destination (if one was supplied) is left
/// unmodified when an `Err` is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Square root of a negative operand.
    NegativeArg,
    /// Logarithm of a non-positive operand.
    NonPositiveLog,
    /// `log_n` called with a base that is non-positive or equal to one.
    InvalidBase,
    /// `pow(0, y)` with `y < 0`.
    ZeroToNegative,
    /// `pow(x, y)` with `x < 0` and `y` not an integer.
    NegativeToNonInteger,
    /// The requested `pow` would require materializing an unreasonable
    /// number of digits, given the operands and the target scale.
    ArgumentTooLarge,
    /// A textual round-trip between [`f64`] and the decimal representation
    /// failed to parse.
    Parse,
}

/// The error type returned by every fallible function in the kernel.
///
/// `Display` renders the exact, bit-stable message for the kind; `kind()`
/// lets callers branch without string matching.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct Error {
    kind: ErrorKind,
    message: &'static str,
}

impl Error {
    /// Build an error of the given kind with its fixed message text.
    pub const fn new(kind: ErrorKind, message: &'static str) -> Self {
        Error { kind, message }
    }

    /// The tagged kind, for callers that want to branch without matching text.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn negative_arg() -> Self {
        Error::new(ErrorKind::NegativeArg, "square root of a negative number is undefined")
    }

    pub fn non_positive_log() -> Self {
        Error::new(ErrorKind::NonPositiveLog, "logarithm of a non-positive number is undefined")
    }

    pub fn invalid_base() -> Self {
        Error::new(ErrorKind::InvalidBase, "logarithm base must be positive and not equal to one")
    }

    pub fn zero_to_negative() -> Self {
        Error::new(ErrorKind::ZeroToNegative, "zero raised to a negative power is undefined")
    }

    pub fn negative_to_non_integer() -> Self {
        Error::new(
            ErrorKind::NegativeToNonInteger,
            "a negative number raised to a non-integer power yields a complex result",
        )
    }

    pub fn argument_too_large() -> Self {
        Error::new(ErrorKind::ArgumentTooLarge, "argument too large")
    }

    pub fn parse(detail: impl fmt::Display) -> ParseError {
        ParseError(detail.to_string())
    }
}

/// Internal parse failure from the float/decimal bridge, carrying the text
/// that failed to scan. Converts into the public [`Error`] at the API
/// boundary, matching the `Parse` [`ErrorKind`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError(pub String);

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to parse {:?} as a decimal", self.0)
    }
}

impl From<ParseError> for Error {
    fn from(_: ParseError) -> Self {
        Error::new(ErrorKind::Parse, "failed to parse the float/decimal textual round-trip")
    }
}
