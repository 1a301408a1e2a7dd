//! The closed outcome taxonomy shared by the lexer and the writer.

use std::error;
use std::fmt;

/// Outcome of a single lexer or writer call.
///
/// Numeric ordering matters: [`Status::Failure`] is the threshold
/// between "quiet end" and "real error", any variant ordered after
/// it is a diagnostic the caller should report. [`Status::Retry`] sits
/// above that threshold too, but it never escapes the lexer's public
/// entry point (see `Lexer::read_byte`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Status {
    /// The call completed normally.
    Success,
    /// Internal "value ended" marker; callers should treat this as
    /// end-of-stream at EOF, same as [`Status::Success`].
    Failure,
    /// Internal re-dispatch request raised by a number's boundary
    /// byte. Never visible outside `Lexer::read_byte`.
    Retry,
    /// Unexpected end of input.
    NoData,
    /// The container-nesting stack is full.
    Overflow,
    /// A pop was attempted on an empty stack.
    Underflow,
    /// The output sink the caller layered on top of the writer failed.
    /// The writer itself never produces this; it is reserved for that
    /// caller-supplied sink.
    BadWrite,
    /// Expected `:`.
    ExpectedColon,
    /// Expected `,`.
    ExpectedComma,
    /// Expected a UTF-8 continuation byte.
    ExpectedContinuation,
    /// Expected `.`.
    ExpectedDecimal,
    /// Expected a decimal digit.
    ExpectedDigit,
    /// Expected an exponent sign or digit.
    ExpectedExponent,
    /// Expected a hexadecimal digit.
    ExpectedHexDigit,
    /// Expected the continuation of `false`/`null`/`true`.
    ExpectedLiteral,
    /// Expected a printable character inside a string.
    ExpectedPrintable,
    /// Expected `"`.
    ExpectedQuote,
    /// Expected a valid string escape sequence.
    ExpectedStringEscape,
    /// Expected a UTF-16 high surrogate.
    ExpectedUTF16Hi,
    /// Expected a UTF-16 low surrogate.
    ExpectedUTF16Lo,
    /// Expected a valid UTF-8 byte sequence.
    ExpectedUTF8,
    /// Expected the start of a value.
    ExpectedValue,
}

impl Status {
    /// `true` for any status a caller should surface as an error:
    /// everything ordered after [`Status::Failure`], excluding the
    /// internal-only [`Status::Retry`].
    pub fn is_error(self) -> bool {
        self > Status::Failure && self != Status::Retry
    }

    /// The phrase table backing [`strerror`] and this type's
    /// [`fmt::Display`] impl.
    fn phrase(self) -> &'static str {
        use Status::*;
        match self {
            Success => "Success",
            Failure => "End of value",
            Retry => "Retry requested",
            NoData => "Unexpected end of input",
            Overflow => "Container stack is full",
            Underflow => "Container stack is empty",
            BadWrite => "Output sink failed",
            ExpectedColon => "Expected ':'",
            ExpectedComma => "Expected ','",
            ExpectedContinuation => "Expected a UTF-8 continuation byte",
            ExpectedDecimal => "Expected '.'",
            ExpectedDigit => "Expected a digit",
            ExpectedExponent => "Expected an exponent sign or digit",
            ExpectedHexDigit => "Expected a hexadecimal digit",
            ExpectedLiteral => "Expected 'false', 'null', or 'true'",
            ExpectedPrintable => "Expected a printable character",
            ExpectedQuote => "Expected '\"'",
            ExpectedStringEscape => "Expected a valid string escape",
            ExpectedUTF16Hi => "Expected a UTF-16 high surrogate",
            ExpectedUTF16Lo => "Expected a UTF-16 low surrogate",
            ExpectedUTF8 => "Expected valid UTF-8",
            ExpectedValue => "Expected a value",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.phrase())
    }
}

impl error::Error for Status {}

/// Returns a short, capitalized, period-free phrase describing `status`.
///
/// A pure function of its argument, there is no out-of-range input
/// since `Status` is a closed enum. Named and shaped after `sajs_strerror`
/// for familiarity with callers used to that convention.
pub fn strerror(status: Status) -> &'static str {
    status.phrase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_is_the_error_threshold() {
        assert!(!Status::Success.is_error());
        assert!(!Status::Failure.is_error());
        assert!(!Status::Retry.is_error());
        assert!(Status::NoData.is_error());
        assert!(Status::Overflow.is_error());
        assert!(Status::Underflow.is_error());
        assert!(Status::ExpectedValue.is_error());
    }

    #[test]
    fn ordering_places_retry_and_diagnostics_above_failure() {
        assert!(Status::Success < Status::Failure);
        assert!(Status::Failure < Status::Retry);
        assert!(Status::Retry < Status::NoData);
    }

    #[test]
    fn strerror_has_no_trailing_period() {
        for s in [Status::Success, Status::ExpectedValue, Status::Overflow] {
            assert!(!strerror(s).ends_with('.'));
        }
    }

    #[test]
    fn display_matches_strerror() {
        assert_eq!(format!("{}", Status::ExpectedColon), strerror(Status::ExpectedColon));
    }
}
