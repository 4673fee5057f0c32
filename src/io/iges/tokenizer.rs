//! Free-format field tokenizer for the global and parameter sections.
//!
//! A record is a run of fields separated by the field delimiter and closed
//! by the record delimiter. Fields are either Hollerith strings (`nHtext`,
//! which may contain delimiters) or bare numeric text.

use crate::error::{IgesError, Result};
use crate::io::iges::record::{parse_integer, parse_percentage, parse_real};
use nom::{
    bytes::complete::{take, take_till},
    character::complete::{char, digit1, space0},
    combinator::map_res,
    sequence::terminated,
    IResult,
};

/// One field of a free-format record.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// Nothing between two delimiters; the reader substitutes a default.
    Empty,
    /// Bare text, a number or pointer.
    Raw(String),
    /// Hollerith string contents.
    Text(String),
}

impl Token {
    fn from_raw(text: &str) -> Self {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            Token::Empty
        } else {
            Token::Raw(trimmed.to_string())
        }
    }

    /// Whether the field was left empty.
    pub fn is_empty(&self) -> bool {
        matches!(self, Token::Empty)
    }

    /// Read a real value, `default` when empty.
    pub fn real(&self, default: f64) -> Result<f64> {
        match self {
            Token::Empty => Ok(default),
            Token::Raw(text) => parse_real(text)
                .ok_or_else(|| IgesError::Parse(format!("Expected a real number, found '{}'", text))),
            Token::Text(text) => Err(IgesError::Parse(format!(
                "Expected a real number, found string '{}'",
                text
            ))),
        }
    }

    /// Read a percentage as a fraction in `[0, 1]`, `default` when empty.
    pub fn percentage(&self, default: f64) -> Result<f64> {
        match self {
            Token::Empty => Ok(default),
            Token::Raw(text) => parse_percentage(text)
                .ok_or_else(|| IgesError::Parse(format!("Expected a percentage, found '{}'", text))),
            Token::Text(text) => Err(IgesError::Parse(format!(
                "Expected a percentage, found string '{}'",
                text
            ))),
        }
    }

    /// Read an integer value, `default` when empty.
    pub fn integer(&self, default: i32) -> Result<i32> {
        match self {
            Token::Empty => Ok(default),
            Token::Raw(text) => parse_integer(text)
                .ok_or_else(|| IgesError::Parse(format!("Expected an integer, found '{}'", text))),
            Token::Text(text) => Err(IgesError::Parse(format!(
                "Expected an integer, found string '{}'",
                text
            ))),
        }
    }

    /// Read a string value, `None` when empty.
    pub fn string(&self) -> Result<Option<String>> {
        match self {
            Token::Empty => Ok(None),
            Token::Text(text) => Ok(Some(text.clone())),
            Token::Raw(text) => Err(IgesError::Parse(format!(
                "Expected a string, found '{}'",
                text
            ))),
        }
    }
}

/// Outcome of scanning accumulated record text.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordScan {
    /// The record delimiter was reached.
    Complete(Vec<Token>),
    /// The text ended first; more lines are needed.
    Incomplete,
}

fn blank(input: &str) -> IResult<&str, &str> {
    space0(input)
}

/// `nH` prefix of a Hollerith string, yielding the character count.
pub(crate) fn hollerith_length(input: &str) -> IResult<&str, usize> {
    terminated(map_res(digit1, |digits: &str| digits.parse::<usize>()), char('H'))(input)
}

fn hollerith_text(input: &str, count: usize) -> IResult<&str, &str> {
    take(count)(input)
}

fn bare_text(input: &str, field: char, record: char) -> IResult<&str, &str> {
    take_till(move |c: char| c == field || c == record)(input)
}

fn nom_error(error: nom::Err<nom::error::Error<&str>>) -> IgesError {
    IgesError::Parse(format!("Malformed field: {}", error))
}

/// Scan `input` up to and including the record delimiter.
pub fn scan_record(input: &str, field: char, record: char) -> Result<RecordScan> {
    let mut tokens = Vec::new();
    let mut rest = input;

    loop {
        rest = blank(rest).map_err(nom_error)?.0;

        let token = match hollerith_length(rest) {
            Ok((text_start, count)) => {
                if text_start.chars().count() < count {
                    return Ok(RecordScan::Incomplete);
                }
                let (remaining, text) = hollerith_text(text_start, count).map_err(nom_error)?;
                rest = remaining;
                Token::Text(text.to_string())
            }
            Err(_) => {
                let (remaining, text) = bare_text(rest, field, record).map_err(nom_error)?;
                rest = remaining;
                Token::from_raw(text)
            }
        };
        tokens.push(token);

        rest = blank(rest).map_err(nom_error)?.0;
        match rest.chars().next() {
            None => return Ok(RecordScan::Incomplete),
            Some(c) if c == record => return Ok(RecordScan::Complete(tokens)),
            Some(c) if c == field => rest = &rest[c.len_utf8()..],
            Some(c) => {
                return Err(IgesError::Parse(format!(
                    "Expected a delimiter after field {}, found '{}'",
                    tokens.len(),
                    c
                )))
            }
        }
    }
}

/// Scan a record that must be complete.
pub fn tokenize_record(input: &str, field: char, record: char) -> Result<Vec<Token>> {
    match scan_record(input, field, record)? {
        RecordScan::Complete(tokens) => Ok(tokens),
        RecordScan::Incomplete => Err(IgesError::Structure(format!(
            "Record is not terminated by '{}'",
            record
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(text: &str) -> Token {
        Token::Raw(text.to_string())
    }

    fn text(text: &str) -> Token {
        Token::Text(text.to_string())
    }

    #[test]
    fn test_simple_record() {
        let tokens = tokenize_record("110,11,22,33,44,55,66;", ',', ';').unwrap();
        assert_eq!(tokens.len(), 7);
        assert_eq!(tokens[0], raw("110"));
        assert_eq!(tokens[6].real(0.0).unwrap(), 66.0);
    }

    #[test]
    fn test_empty_fields() {
        let tokens = tokenize_record(",,5,;", ',', ';').unwrap();
        assert_eq!(tokens, vec![Token::Empty, Token::Empty, raw("5"), Token::Empty]);
        assert_eq!(tokens[0].integer(32).unwrap(), 32);
        assert_eq!(tokens[3].string().unwrap(), None);
    }

    #[test]
    fn test_hollerith_with_delimiters() {
        let tokens = tokenize_record("6H,;,;,;,  4HBCAD ;", ',', ';').unwrap();
        assert_eq!(tokens, vec![text(",;,;,;"), text("BCAD")]);
    }

    #[test]
    fn test_leading_whitespace() {
        let tokens = tokenize_record("   1.5,   2HAB,\t7;", ',', ';').unwrap();
        assert_eq!(tokens, vec![raw("1.5"), text("AB"), raw("7")]);
    }

    #[test]
    fn test_incomplete_record() {
        assert_eq!(scan_record("110,1.,2.,", ',', ';').unwrap(), RecordScan::Incomplete);
        assert_eq!(scan_record("10Habc;", ',', ';').unwrap(), RecordScan::Incomplete);
        assert!(tokenize_record("110,1.", ',', ';').is_err());
    }

    #[test]
    fn test_hollerith_spanning_text() {
        let first = "110,10Habc";
        assert_eq!(scan_record(first, ',', ';').unwrap(), RecordScan::Incomplete);
        let joined = format!("{}defghij;", first);
        let tokens = tokenize_record(&joined, ',', ';').unwrap();
        assert_eq!(tokens[1], text("abcdefghij"));
    }

    #[test]
    fn test_custom_delimiters() {
        let tokens = tokenize_record("10Hidentifier/12Hfilename.igs#", '/', '#').unwrap();
        assert_eq!(tokens, vec![text("identifier"), text("filename.igs")]);
    }

    #[test]
    fn test_garbage_after_hollerith() {
        assert!(scan_record("2HABx,;", ',', ';').is_err());
    }

    #[test]
    fn test_token_conversions() {
        assert_eq!(raw("1.0D-3").real(0.0).unwrap(), 0.001);
        assert!(raw("abc").real(0.0).is_err());
        assert!(text("abc").integer(0).is_err());
        assert!(raw("12").string().is_err());
        assert_eq!(text("x").string().unwrap(), Some("x".to_string()));
    }
}
