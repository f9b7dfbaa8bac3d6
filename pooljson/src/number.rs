// SPDX-License-Identifier: Apache-2.0

//! Hand-rolled validator for JSON numeric literals.
//!
//! The state machine mirrors `-?(0|[1-9][0-9]*)(\.[0-9]+)?([eE][+-]?[0-9]+)?`.
//! The scan stops, without consuming, at the first byte that cannot extend
//! the literal; whether that byte is a legal continuation of the document is
//! the caller's problem.

use crate::cursor::SliceCursor;
use crate::parse_error::ParseError;

/// Outcome of a successful number scan.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Number {
    Int(i32),
    Real(f64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Start,
    Sign,
    Zero,
    Int,
    FracStart,
    Frac,
    ExpStart,
    ExpSign,
    Exp,
}

impl State {
    /// States a literal may legally end in.
    fn accepts(self) -> bool {
        matches!(self, State::Zero | State::Int | State::Frac | State::Exp)
    }
}

/// Scans one numeric literal off the cursor and materializes it.
///
/// A literal that never saw a fraction or exponent becomes `Int`; anything
/// else becomes `Real`. An integer outside the `i32` range is a
/// `NumericOverflow` error rather than a silent truncation.
pub(crate) fn scan_number(cur: &mut SliceCursor<'_>) -> Result<Number, ParseError> {
    let start = cur.pos();
    let mut state = State::Start;

    while let Some(byte) = cur.peek() {
        state = match byte {
            b'-' => match state {
                State::Start => State::Sign,
                State::ExpStart => State::ExpSign,
                _ => return Err(ParseError::InvalidNumber),
            },
            b'+' => match state {
                State::ExpStart => State::ExpSign,
                _ => return Err(ParseError::InvalidNumber),
            },
            b'.' => match state {
                State::Zero | State::Int => State::FracStart,
                _ => return Err(ParseError::InvalidNumber),
            },
            b'e' | b'E' => match state {
                State::Int | State::Frac => State::ExpStart,
                _ => return Err(ParseError::InvalidNumber),
            },
            b'0' => match state {
                State::Start | State::Sign => State::Zero,
                State::Int => State::Int,
                State::FracStart | State::Frac => State::Frac,
                State::ExpStart | State::ExpSign | State::Exp => State::Exp,
                // a second digit after a leading zero
                State::Zero => return Err(ParseError::InvalidNumber),
            },
            b'1'..=b'9' => match state {
                State::Start | State::Sign => State::Int,
                State::Int => State::Int,
                State::FracStart | State::Frac => State::Frac,
                State::ExpStart | State::ExpSign | State::Exp => State::Exp,
                State::Zero => return Err(ParseError::InvalidNumber),
            },
            // end of literal; the delimiter stays unconsumed
            _ => break,
        };
        cur.bump();
    }

    if !state.accepts() {
        return Err(ParseError::InvalidNumber);
    }

    let raw = cur
        .slice(start, cur.pos())
        .ok_or(ParseError::InvalidNumber)?;
    let text = core::str::from_utf8(raw)?;

    match state {
        State::Zero | State::Int => text
            .parse::<i32>()
            .map(Number::Int)
            .map_err(|_| ParseError::NumericOverflow),
        _ => text
            .parse::<f64>()
            .map(Number::Real)
            .map_err(|_| ParseError::InvalidNumber),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan(input: &str) -> Result<Number, ParseError> {
        let mut cur = SliceCursor::new(input.as_bytes());
        scan_number(&mut cur)
    }

    macro_rules! accept_int {
        ($($name:ident: $input:literal => $value:literal),+ $(,)?) => {
            $(paste::paste! {
                #[test]
                fn [<accepts_ $name>]() {
                    assert_eq!(scan($input), Ok(Number::Int($value)));
                }
            })+
        };
    }

    macro_rules! accept_real {
        ($($name:ident: $input:literal => $value:literal),+ $(,)?) => {
            $(paste::paste! {
                #[test]
                fn [<accepts_ $name>]() {
                    assert_eq!(scan($input), Ok(Number::Real($value)));
                }
            })+
        };
    }

    macro_rules! reject {
        ($($name:ident: $input:literal),+ $(,)?) => {
            $(paste::paste! {
                #[test]
                fn [<rejects_ $name>]() {
                    assert!(scan($input).is_err(), "{:?} should be rejected", $input);
                }
            })+
        };
    }

    accept_int! {
        zero: "0" => 0,
        negative_zero: "-0" => 0,
        small: "42" => 42,
        negative: "-17" => -17,
        int_max: "2147483647" => 2147483647,
        int_min: "-2147483648" => -2147483648,
    }

    accept_real! {
        simple_fraction: "2.5" => 2.5,
        zero_fraction: "0.25" => 0.25,
        negative_fraction: "-0.5" => -0.5,
        exponent: "1e3" => 1000.0,
        upper_exponent: "12E2" => 1200.0,
        signed_exponent: "1e+2" => 100.0,
        negative_exponent: "25e-1" => 2.5,
        fraction_with_exponent: "1.25e-2" => 0.0125,
    }

    reject! {
        empty: "",
        bare_sign: "-",
        bare_dot: ".",
        leading_zero: "01",
        leading_zero_negative: "-01",
        double_sign: "--1",
        dot_without_digits: "1.",
        dot_first: ".5",
        double_dot: "1.2.3",
        exponent_without_digits: "1e",
        exponent_sign_only: "1e-",
        exponent_double_sign: "1e--2",
        exponent_plus_plus: "1e++2",
        zero_exponent: "0e5",
        plus_prefix: "+1",
    }

    #[test]
    fn overflow_is_reported() {
        assert_eq!(scan("2147483648"), Err(ParseError::NumericOverflow));
        assert_eq!(scan("-2147483649"), Err(ParseError::NumericOverflow));
    }

    #[test]
    fn stops_at_delimiters_without_consuming() {
        for (input, rest) in [("1}", b'}'), ("2]", b']'), ("3,", b','), ("4 ", b' ')] {
            let mut cur = SliceCursor::new(input.as_bytes());
            assert!(scan_number(&mut cur).is_ok(), "{input:?}");
            assert_eq!(cur.peek(), Some(rest), "{input:?}");
        }
    }

    #[test]
    fn stops_at_arbitrary_non_number_byte() {
        let mut cur = SliceCursor::new(b"12x");
        assert_eq!(scan_number(&mut cur), Ok(Number::Int(12)));
        assert_eq!(cur.peek(), Some(b'x'));
    }

    #[test]
    fn huge_exponent_saturates_to_infinity() {
        match scan("1e999") {
            Ok(Number::Real(value)) => assert!(value.is_infinite()),
            other => panic!("expected a real, got {other:?}"),
        }
    }
}
