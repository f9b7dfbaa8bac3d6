// SPDX-License-Identifier: Apache-2.0

//! Recursive-descent JSON parser.
//!
//! Every node is hired from the caller's [`Pool`]; any failure fires the
//! container under construction (and everything already attached to it)
//! before propagating, so a failed parse is net-zero on pool accounting.

use crate::cursor::SliceCursor;
use crate::escape;
use crate::node::{DictId, NodeId, ScalId, VectId};
use crate::number::{self, Number};
use crate::parse_error::ParseError;
use crate::pool::{Pool, PoolKind};

use alloc::string::String;
use alloc::vec::Vec;
use log::debug;

/// Parses a JSON document into a pooled tree.
///
/// The document root must be an object; leading whitespace is skipped and
/// input past the closing brace is not inspected. On success the caller
/// owns the returned tree and is responsible for firing it.
pub fn parse(input: &str, pool: &mut Pool) -> Result<DictId, ParseError> {
    parse_slice(input.as_bytes(), pool)
}

/// Byte-slice twin of [`parse`], for input that is not known to be UTF-8
/// up front. String content is still validated while it is decoded.
pub fn parse_slice(input: &[u8], pool: &mut Pool) -> Result<DictId, ParseError> {
    let mut parser = Parser {
        cur: SliceCursor::new(input),
        pool,
    };
    parser.parse_document()
}

struct Parser<'a, 'p> {
    cur: SliceCursor<'a>,
    pool: &'p mut Pool,
}

impl Parser<'_, '_> {
    fn parse_document(&mut self) -> Result<DictId, ParseError> {
        self.cur.skip_space();
        match self.eat_dict() {
            Ok(dict) => Ok(dict),
            Err(err) => {
                debug!("parse failed at byte {}: {}", self.cur.pos(), err);
                Err(err)
            }
        }
    }

    fn peek_or_eof(&mut self) -> Result<u8, ParseError> {
        self.cur.peek().ok_or(ParseError::EndOfData)
    }

    // ---- containers ----------------------------------------------------

    fn eat_dict(&mut self) -> Result<DictId, ParseError> {
        match self.peek_or_eof()? {
            b'{' => self.cur.bump(),
            other => return Err(ParseError::UnexpectedByte(other)),
        }
        let dict = self
            .pool
            .hire_dict()
            .ok_or(ParseError::PoolExhausted(PoolKind::Dict))?;
        match self.dict_body(dict) {
            Ok(()) => Ok(dict),
            Err(err) => {
                self.pool.fire(dict);
                Err(err)
            }
        }
    }

    /// Token loop between `{` and `}`: a quote starts a property name, a
    /// colon binds the pending name to the next value, commas separate.
    fn dict_body(&mut self, dict: DictId) -> Result<(), ParseError> {
        let mut pending: Option<String> = None;
        loop {
            self.cur.skip_space();
            match self.peek_or_eof()? {
                b'"' => {
                    if pending.is_some() {
                        // two names in a row, no colon between them
                        return Err(ParseError::UnexpectedByte(b'"'));
                    }
                    pending = Some(self.scan_str()?);
                }
                b':' => {
                    let name = pending.take().ok_or(ParseError::UnexpectedByte(b':'))?;
                    self.cur.bump();
                    let value = self.eat_value()?;
                    self.pool.set_prop(dict, name, value);
                }
                b',' => {
                    if pending.is_some() {
                        // dangling name without a colon
                        return Err(ParseError::UnexpectedByte(b','));
                    }
                    self.cur.bump();
                }
                b'}' => {
                    self.cur.bump();
                    return Ok(());
                }
                other => return Err(ParseError::UnexpectedByte(other)),
            }
        }
    }

    fn eat_vect(&mut self) -> Result<VectId, ParseError> {
        match self.peek_or_eof()? {
            b'[' => self.cur.bump(),
            other => return Err(ParseError::UnexpectedByte(other)),
        }
        let vect = self
            .pool
            .hire_vect()
            .ok_or(ParseError::PoolExhausted(PoolKind::Vect))?;
        match self.vect_body(vect) {
            Ok(()) => Ok(vect),
            Err(err) => {
                self.pool.fire(vect);
                Err(err)
            }
        }
    }

    fn vect_body(&mut self, vect: VectId) -> Result<(), ParseError> {
        self.cur.skip_space();
        if self.peek_or_eof()? == b']' {
            self.cur.bump();
            return Ok(());
        }
        loop {
            let value = self.eat_value()?;
            self.pool.push(vect, value);
            self.cur.skip_space();
            match self.peek_or_eof()? {
                b',' => self.cur.bump(),
                b']' => {
                    self.cur.bump();
                    return Ok(());
                }
                other => return Err(ParseError::UnexpectedByte(other)),
            }
        }
    }

    // ---- values --------------------------------------------------------

    fn eat_value(&mut self) -> Result<NodeId, ParseError> {
        self.cur.skip_space();
        match self.peek_or_eof()? {
            b'{' => self.eat_dict().map(NodeId::from),
            b'[' => self.eat_vect().map(NodeId::from),
            b'"' => self.eat_str().map(NodeId::from),
            b'n' => self.eat_null().map(NodeId::from),
            b't' => self.eat_true().map(NodeId::from),
            b'f' => self.eat_false().map(NodeId::from),
            b'0'..=b'9' | b'-' | b'.' => self.eat_num().map(NodeId::from),
            other => Err(ParseError::UnexpectedByte(other)),
        }
    }

    fn eat_null(&mut self) -> Result<ScalId, ParseError> {
        self.expect_keyword(b"null")?;
        self.pool
            .hire_scal()
            .ok_or(ParseError::PoolExhausted(PoolKind::Scal))
    }

    fn eat_true(&mut self) -> Result<ScalId, ParseError> {
        self.expect_keyword(b"true")?;
        self.pool
            .hire_bool(true)
            .ok_or(ParseError::PoolExhausted(PoolKind::Scal))
    }

    fn eat_false(&mut self) -> Result<ScalId, ParseError> {
        self.expect_keyword(b"false")?;
        self.pool
            .hire_bool(false)
            .ok_or(ParseError::PoolExhausted(PoolKind::Scal))
    }

    /// Forward-only keyword match: the cursor moves only on a full match.
    fn expect_keyword(&mut self, word: &'static [u8]) -> Result<(), ParseError> {
        if self.cur.starts_with(word) {
            self.cur.advance(word.len());
            Ok(())
        } else {
            Err(ParseError::InvalidLiteral)
        }
    }

    fn eat_num(&mut self) -> Result<ScalId, ParseError> {
        let hired = match number::scan_number(&mut self.cur)? {
            Number::Int(value) => self.pool.hire_int(value),
            Number::Real(value) => self.pool.hire_real(value),
        };
        hired.ok_or(ParseError::PoolExhausted(PoolKind::Scal))
    }

    fn eat_str(&mut self) -> Result<ScalId, ParseError> {
        let text = self.scan_str()?;
        self.pool
            .hire_str(text)
            .ok_or(ParseError::PoolExhausted(PoolKind::Scal))
    }

    // ---- strings -------------------------------------------------------

    /// Consumes a quoted string, decoding escapes; the cursor ends just
    /// past the closing quote.
    fn scan_str(&mut self) -> Result<String, ParseError> {
        match self.peek_or_eof()? {
            b'"' => self.cur.bump(),
            other => return Err(ParseError::UnexpectedByte(other)),
        }
        let mut buf: Vec<u8> = Vec::new();
        loop {
            let byte = self.cur.next_byte().ok_or(ParseError::EndOfData)?;
            match byte {
                b'"' => break,
                b'\\' => self.unescape_into(&mut buf)?,
                other => buf.push(other),
            }
        }
        String::from_utf8(buf).map_err(|err| ParseError::InvalidUtf8(err.utf8_error()))
    }

    fn unescape_into(&mut self, buf: &mut Vec<u8>) -> Result<(), ParseError> {
        let escape = self.cur.next_byte().ok_or(ParseError::EndOfData)?;
        if escape == b'u' {
            let ch = self.decode_unicode()?;
            let mut utf8 = [0u8; 4];
            buf.extend_from_slice(ch.encode_utf8(&mut utf8).as_bytes());
        } else {
            buf.push(escape::decode_simple(escape)?);
        }
        Ok(())
    }

    /// Decodes the `XXXX` of a `\uXXXX` escape, composing a surrogate pair
    /// when the unit is a high surrogate. The low half must follow as
    /// another `\uXXXX` escape immediately.
    fn decode_unicode(&mut self) -> Result<char, ParseError> {
        let unit = self.read_hex4()?;
        if escape::is_low_surrogate(unit) {
            return Err(ParseError::InvalidUnicodeCodepoint);
        }
        let codepoint = if escape::is_high_surrogate(unit) {
            if self.cur.next_byte().ok_or(ParseError::EndOfData)? != b'\\'
                || self.cur.next_byte().ok_or(ParseError::EndOfData)? != b'u'
            {
                return Err(ParseError::InvalidUnicodeCodepoint);
            }
            let low = self.read_hex4()?;
            escape::combine_surrogate_pair(unit, low)?
        } else {
            unit
        };
        escape::char_from_codepoint(codepoint)
    }

    fn read_hex4(&mut self) -> Result<u32, ParseError> {
        let mut value = 0u32;
        for _ in 0..4 {
            let byte = self.cur.next_byte().ok_or(ParseError::EndOfData)?;
            value = (value << 4) | escape::hex_digit(byte)?;
        }
        Ok(value)
    }
}
