// SPDX-License-Identifier: Apache-2.0

// Failure paths: grammar violations, truncated input, pool exhaustion.
// Every failed parse must leave the free-slot counts untouched.

use pooljson::{parse, ParseError, Pool, PoolConfig, PoolKind};

fn pool() -> Pool {
    Pool::new(PoolConfig::new(16, 4, 4))
}

fn counts(pool: &Pool) -> (usize, usize, usize) {
    (pool.free_scals(), pool.free_dicts(), pool.free_vects())
}

/// Asserts the input fails to parse and that the failure was net-zero on
/// the pool.
fn assert_aborts_clean(input: &str) -> ParseError {
    let mut pool = pool();
    let before = counts(&pool);
    let err = parse(input, &mut pool).expect_err(input);
    assert_eq!(counts(&pool), before, "pool leaked on {input:?}");
    err
}

#[test]
fn missing_value_after_colon() {
    let err = assert_aborts_clean(r#"{"a": }"#);
    assert_eq!(err, ParseError::UnexpectedByte(b'}'));
}

#[test]
fn leading_zero_fails_the_number_machine() {
    let err = assert_aborts_clean(r#"{"n": 01}"#);
    assert_eq!(err, ParseError::InvalidNumber);
}

#[test]
fn malformed_numbers_abort_the_document() {
    assert_eq!(assert_aborts_clean(r#"{"n": 1.}"#), ParseError::InvalidNumber);
    assert_eq!(
        assert_aborts_clean(r#"{"n": 1e}"#),
        ParseError::InvalidNumber
    );
    assert_eq!(
        assert_aborts_clean(r#"{"n": .5}"#),
        ParseError::InvalidNumber
    );
    assert_eq!(
        assert_aborts_clean(r#"{"n": 1.2.3}"#),
        ParseError::InvalidNumber
    );
}

#[test]
fn integer_overflow_is_a_parse_error() {
    let err = assert_aborts_clean(r#"{"n": 2147483648}"#);
    assert_eq!(err, ParseError::NumericOverflow);
}

#[test]
fn dangling_name_before_comma() {
    let err = assert_aborts_clean(r#"{"a", "b": 1}"#);
    assert_eq!(err, ParseError::UnexpectedByte(b','));
}

#[test]
fn colon_without_name() {
    let err = assert_aborts_clean(r#"{: 1}"#);
    assert_eq!(err, ParseError::UnexpectedByte(b':'));
}

#[test]
fn two_names_in_a_row() {
    let err = assert_aborts_clean(r#"{"a" "b": 1}"#);
    assert_eq!(err, ParseError::UnexpectedByte(b'"'));
}

#[test]
fn truncated_documents_report_end_of_data() {
    for input in [
        "{",
        r#"{"a"#,
        r#"{"a": "#,
        r#"{"a": 1"#,
        r#"{"a": [1, 2"#,
        r#"{"a": "unterminated"#,
        r#"{"a": "esc\"#,
    ] {
        let err = assert_aborts_clean(input);
        assert_eq!(err, ParseError::EndOfData, "{input:?}");
    }
}

#[test]
fn bad_escape_sequences_abort() {
    assert_eq!(
        assert_aborts_clean(r#"{"s": "\x41"}"#),
        ParseError::InvalidEscapeSequence
    );
    assert_eq!(
        assert_aborts_clean(r#"{"s": "\uZZZZ"}"#),
        ParseError::InvalidUnicodeHex
    );
}

#[test]
fn broken_keywords_abort() {
    assert_eq!(assert_aborts_clean(r#"{"a": nil}"#), ParseError::InvalidLiteral);
    assert_eq!(
        assert_aborts_clean(r#"{"a": fals}"#),
        ParseError::InvalidLiteral
    );
    assert_eq!(
        assert_aborts_clean(r#"{"a": True}"#),
        ParseError::UnexpectedByte(b'T')
    );
}

#[test]
fn failure_deep_in_nesting_releases_the_whole_tree() {
    let err = assert_aborts_clean(r#"{"a": {"b": [1, {"c": [true, 01]}]}}"#);
    assert_eq!(err, ParseError::InvalidNumber);
}

#[test]
fn zero_dict_capacity_fails_the_outermost_hire() {
    let mut pool = Pool::new(PoolConfig::new(8, 0, 8));
    let before = counts(&pool);
    assert_eq!(
        parse("{}", &mut pool),
        Err(ParseError::PoolExhausted(PoolKind::Dict))
    );
    assert_eq!(counts(&pool), before);
}

#[test]
fn scalar_exhaustion_mid_parse_unwinds() {
    // two scalar slots cannot hold three values
    let mut pool = Pool::new(PoolConfig::new(2, 2, 2));
    let before = counts(&pool);
    assert_eq!(
        parse(r#"{"v": [1, 2, 3]}"#, &mut pool),
        Err(ParseError::PoolExhausted(PoolKind::Scal))
    );
    assert_eq!(counts(&pool), before);
}

#[test]
fn dict_exhaustion_mid_parse_unwinds() {
    let mut pool = Pool::new(PoolConfig::new(8, 1, 1));
    let before = counts(&pool);
    assert_eq!(
        parse(r#"{"a": {"b": 1}}"#, &mut pool),
        Err(ParseError::PoolExhausted(PoolKind::Dict))
    );
    assert_eq!(counts(&pool), before);
}

#[test]
fn pool_stays_usable_after_an_abort() {
    let mut pool = pool();
    assert!(parse(r#"{"bad": 01}"#, &mut pool).is_err());
    let root = parse(r#"{"good": 1}"#, &mut pool).unwrap();
    assert_eq!(pool.encode(root), r#"{"good":1}"#);
    pool.fire(root);
}
