// SPDX-License-Identifier: Apache-2.0

use crate::pool::PoolKind;

/// Errors that can occur while parsing a JSON document.
///
/// Every variant is recoverable: the parser unwinds, fires whatever it had
/// built so far, and leaves the pool exactly as populated as before the
/// call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseError {
    /// A hire request found the named pool exhausted.
    PoolExhausted(PoolKind),
    /// A byte that no grammar rule expected at this position.
    UnexpectedByte(u8),
    /// Input ended while the document was still incomplete.
    EndOfData,
    /// A `null`/`true`/`false` keyword did not match.
    InvalidLiteral,
    /// A numeric literal violated the number grammar.
    InvalidNumber,
    /// An integer literal outside the 32-bit signed range.
    NumericOverflow,
    /// An unknown character followed a backslash.
    InvalidEscapeSequence,
    /// A non-hex digit inside a `\uXXXX` escape.
    InvalidUnicodeHex,
    /// A lone surrogate or an invalid Unicode code point.
    InvalidUnicodeCodepoint,
    /// Decoded string bytes were not valid UTF-8.
    InvalidUtf8(core::str::Utf8Error),
}

impl From<core::str::Utf8Error> for ParseError {
    fn from(err: core::str::Utf8Error) -> Self {
        ParseError::InvalidUtf8(err)
    }
}

impl core::fmt::Display for ParseError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ParseError::PoolExhausted(kind) => write!(f, "{kind:?} pool exhausted"),
            ParseError::UnexpectedByte(byte) => write!(f, "unexpected byte 0x{byte:02x}"),
            ParseError::InvalidUtf8(err) => write!(f, "invalid UTF-8: {err}"),
            _ => write!(f, "{self:?}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::format;

    #[test]
    fn display_names_the_exhausted_pool() {
        let message = format!("{}", ParseError::PoolExhausted(PoolKind::Dict));
        assert_eq!(message, "Dict pool exhausted");
    }

    #[test]
    fn display_shows_offending_byte() {
        let message = format!("{}", ParseError::UnexpectedByte(b'}'));
        assert_eq!(message, "unexpected byte 0x7d");
    }

    #[test]
    fn utf8_errors_convert() {
        let bad = [0x80u8];
        let err = core::str::from_utf8(&bad).unwrap_err();
        let parse_error: ParseError = err.into();
        assert!(matches!(parse_error, ParseError::InvalidUtf8(_)));
    }
}
