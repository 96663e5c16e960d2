//! Number, boolean, and date/time candidate lexing (spec §4.1 "Number
//! lexing" and "Date/time lexing").
//!
//! `faxc_lex::lexer::number::lex_number` captures digits directly off the
//! cursor and dispatches on a leading `0x`/`0b`/`0o`; here the candidate is
//! captured as a maximal run first and classified afterwards, because a
//! TOML value position can't tell a number from a boolean, a date, or a
//! special float until the whole run has been read — the teacher's
//! language always knows it is looking at a number from the first byte.

use tomlrs_util::ParseError;

use crate::token::Token;

use super::core::Lexer;

fn is_candidate_delimiter(b: u8) -> bool {
    matches!(b, b',' | b']' | b'}' | b'\n' | b'\r' | b' ' | b'\t' | b'#')
}

fn strip_sign(text: &[u8]) -> (Option<u8>, &[u8]) {
    match text.first() {
        Some(&b @ b'+') | Some(&b @ b'-') => (Some(b), &text[1..]),
        _ => (None, text),
    }
}

fn has_integer_prefix(text: &[u8]) -> bool {
    let (_, rest) = strip_sign(text);
    rest.len() >= 2 && rest[0] == b'0' && matches!(rest[1], b'x' | b'X' | b'o' | b'O' | b'b' | b'B')
}

fn is_float_shape(text: &[u8]) -> bool {
    if has_integer_prefix(text) {
        return false;
    }
    let (_, rest) = strip_sign(text);
    if rest == b"inf" || rest == b"nan" {
        return true;
    }
    text.iter().any(|&b| b == b'.' || b == b'e' || b == b'E')
}

fn looks_like_datetime_shape(text: &[u8]) -> bool {
    (text.len() >= 10 && text.get(4) == Some(&b'-') && text.get(7) == Some(&b'-'))
        || (text.len() >= 8 && text.get(2) == Some(&b':') && text.get(5) == Some(&b':'))
}

fn validate_underscores(bytes: &[u8], is_digit: impl Fn(u8) -> bool) -> bool {
    for (i, &b) in bytes.iter().enumerate() {
        if b != b'_' {
            continue;
        }
        if i == 0 || i + 1 == bytes.len() {
            return false;
        }
        if !is_digit(bytes[i - 1]) || !is_digit(bytes[i + 1]) {
            return false;
        }
    }
    true
}

fn strip_underscores(bytes: &[u8]) -> Vec<u8> {
    bytes.iter().copied().filter(|&b| b != b'_').collect()
}

impl<'a> Lexer<'a> {
    /// Reads whatever comes next at a value position that isn't a quote,
    /// `[`, or `{`: a maximal run of non-delimiter bytes, with the
    /// single-space date/time join from spec §4.1, then classifies it.
    pub(crate) fn lex_value_candidate(&mut self) -> Result<Token, ParseError> {
        let start = self.cursor.position();
        self.capture_candidate_run();
        let mut text = self.cursor.slice_from(start).to_vec();

        if self.looks_like_date_only(&text) && self.next_is_single_space_then_time() {
            self.cursor.advance(); // the single joining space
            text.push(b'T');
            let time_start = self.cursor.position();
            self.capture_candidate_run();
            text.extend_from_slice(self.cursor.slice_from(time_start));
        }

        self.classify_candidate(&text)
    }

    fn capture_candidate_run(&mut self) {
        while let Some(b) = self.cursor.current_byte() {
            if is_candidate_delimiter(b) {
                break;
            }
            self.cursor.advance();
        }
    }

    fn looks_like_date_only(&self, text: &[u8]) -> bool {
        text.len() == 10
            && text[4] == b'-'
            && text[7] == b'-'
            && text.iter().enumerate().all(|(i, &b)| i == 4 || i == 7 || b.is_ascii_digit())
    }

    fn next_is_single_space_then_time(&self) -> bool {
        if self.cursor.current_byte() != Some(b' ') {
            return false;
        }
        let d0 = self.cursor.peek_byte(1);
        let d1 = self.cursor.peek_byte(2);
        let colon = self.cursor.peek_byte(3);
        matches!(d0, Some(b) if b.is_ascii_digit())
            && matches!(d1, Some(b) if b.is_ascii_digit())
            && colon == Some(b':')
    }

    fn classify_candidate(&self, text: &[u8]) -> Result<Token, ParseError> {
        if text.is_empty() {
            return Err(self.lexical_error("missing value after '='"));
        }
        if text == b"true" {
            return Ok(Token::Boolean(true));
        }
        if text == b"false" {
            return Ok(Token::Boolean(false));
        }
        if looks_like_datetime_shape(text) {
            return Ok(Token::DateTime(String::from_utf8_lossy(text).into_owned()));
        }
        if is_float_shape(text) {
            return self
                .parse_float(text)
                .map(Token::Float)
                .map_err(|message| self.lexical_error(message));
        }
        self.parse_integer(text)
            .map(Token::Integer)
            .map_err(|message| self.lexical_error(message))
    }

    fn parse_float(&self, text: &[u8]) -> Result<f64, String> {
        let (sign, rest) = strip_sign(text);
        let negative = sign == Some(b'-');

        if rest == b"inf" {
            return Ok(if negative { f64::NEG_INFINITY } else { f64::INFINITY });
        }
        if rest == b"nan" {
            return Ok(if negative { -f64::NAN } else { f64::NAN });
        }

        if !validate_underscores(rest, |b| b.is_ascii_digit()) {
            return Err("bad numeric literal: misplaced underscore".to_string());
        }

        let (int_part, after_int) = split_leading_digits(rest);
        if int_part.is_empty() {
            return Err("bad numeric literal: float must have an integer part".to_string());
        }
        let int_digits = strip_underscores(int_part);
        if int_digits.len() > 1 && int_digits[0] == b'0' {
            return Err("bad numeric literal: leading zero".to_string());
        }

        let mut cursor = after_int;
        if let Some(rest_after_dot) = cursor.strip_prefix(b".") {
            let (frac_digits, after_frac) = split_leading_digits(rest_after_dot);
            if frac_digits.is_empty() {
                return Err("bad numeric literal: digit required after '.'".to_string());
            }
            cursor = after_frac;
        }
        if let Some(b) = cursor.first() {
            if *b == b'e' || *b == b'E' {
                let mut exp_rest = &cursor[1..];
                if let Some(stripped) = exp_rest.strip_prefix(b"+").or_else(|| exp_rest.strip_prefix(b"-")) {
                    exp_rest = stripped;
                }
                let (exp_digits, after_exp) = split_leading_digits(exp_rest);
                if exp_digits.is_empty() {
                    return Err("bad numeric literal: digit required in exponent".to_string());
                }
                cursor = after_exp;
            }
        }
        if !cursor.is_empty() {
            return Err("bad numeric literal".to_string());
        }

        let cleaned = strip_underscores(rest);
        let cleaned_text = std::str::from_utf8(&cleaned).map_err(|_| "bad numeric literal".to_string())?;
        let value: f64 = cleaned_text.parse().map_err(|_| "bad numeric literal".to_string())?;
        Ok(if negative { -value } else { value })
    }

    fn parse_integer(&self, text: &[u8]) -> Result<i64, String> {
        let (sign, rest) = strip_sign(text);
        if rest.len() >= 2 && rest[0] == b'0' {
            match rest[1] {
                b'x' | b'X' if sign.is_none() => return parse_radix_integer(&rest[2..], 16, u8::is_ascii_hexdigit),
                b'o' | b'O' if sign.is_none() => {
                    return parse_radix_integer(&rest[2..], 8, |b| (b'0'..=b'7').contains(b))
                }
                b'b' | b'B' if sign.is_none() => {
                    return parse_radix_integer(&rest[2..], 2, |b| *b == b'0' || *b == b'1')
                }
                _ => {}
            }
        }

        if !validate_underscores(rest, |b| b.is_ascii_digit()) {
            return Err("bad numeric literal: misplaced underscore".to_string());
        }
        if rest.is_empty() || !rest.iter().all(|&b| b.is_ascii_digit() || b == b'_') {
            return Err("bad numeric literal".to_string());
        }
        let cleaned = strip_underscores(rest);
        if cleaned.len() > 1 && cleaned[0] == b'0' {
            return Err("bad numeric literal: leading zero".to_string());
        }
        let digits = std::str::from_utf8(&cleaned).map_err(|_| "bad numeric literal".to_string())?;
        // Parsed as the unsigned magnitude first: `i64::MIN`'s magnitude,
        // 9223372036854775808, is one past `i64::MAX` and would overflow a
        // direct `i64` parse before the sign is reapplied.
        let magnitude: u64 = digits.parse().map_err(|_| "integer literal overflow".to_string())?;
        if sign == Some(b'-') {
            if magnitude > i64::MIN.unsigned_abs() {
                return Err("integer literal overflow".to_string());
            }
            Ok(magnitude.wrapping_neg() as i64)
        } else {
            i64::try_from(magnitude).map_err(|_| "integer literal overflow".to_string())
        }
    }
}

fn split_leading_digits(bytes: &[u8]) -> (&[u8], &[u8]) {
    let mut i = 0;
    while i < bytes.len() && (bytes[i].is_ascii_digit() || bytes[i] == b'_') {
        i += 1;
    }
    (&bytes[..i], &bytes[i..])
}

fn parse_radix_integer(digits: &[u8], radix: u32, is_digit: impl Fn(&u8) -> bool) -> Result<i64, String> {
    if digits.is_empty() {
        return Err(format!("bad numeric literal: no digits after base-{radix} prefix"));
    }
    if !validate_underscores(digits, |b| is_digit(&b)) {
        return Err("bad numeric literal: misplaced underscore".to_string());
    }
    if !digits.iter().all(|b| is_digit(b) || *b == b'_') {
        return Err("bad numeric literal".to_string());
    }
    let cleaned = strip_underscores(digits);
    let text = std::str::from_utf8(&cleaned).map_err(|_| "bad numeric literal".to_string())?;
    let unsigned = u64::from_str_radix(text, radix).map_err(|_| "integer literal overflow".to_string())?;
    Ok(unsigned as i64)
}

#[cfg(test)]
mod tests {
    use tomlrs_util::{Config, Diagnostics};

    use super::super::core::Lexer;
    use crate::token::Token;

    fn lex_value(source: &[u8]) -> Token {
        let mut diagnostics = Diagnostics::new(256);
        let mut lexer = Lexer::new(source, &mut diagnostics, Config::default());
        lexer.lex_value_candidate().unwrap_or_else(Token::Error)
    }

    #[test]
    fn decimal_integer() {
        assert_eq!(lex_value(b"42"), Token::Integer(42));
        assert_eq!(lex_value(b"-17"), Token::Integer(-17));
    }

    #[test]
    fn hex_integer_with_underscore() {
        assert_eq!(lex_value(b"0xDEAD_BEEF"), Token::Integer(0xDEAD_BEEF));
    }

    #[test]
    fn octal_and_binary_integers() {
        assert_eq!(lex_value(b"0o17"), Token::Integer(0o17));
        assert_eq!(lex_value(b"0b1010"), Token::Integer(0b1010));
    }

    #[test]
    fn rejects_leading_zero() {
        assert!(matches!(lex_value(b"01"), Token::Error(_)));
    }

    #[test]
    fn rejects_double_underscore() {
        assert!(matches!(lex_value(b"1__2"), Token::Error(_)));
    }

    #[test]
    fn signed_64_bit_boundaries() {
        assert_eq!(lex_value(b"9223372036854775807"), Token::Integer(i64::MAX));
        assert_eq!(lex_value(b"-9223372036854775808"), Token::Integer(i64::MIN));
        assert!(matches!(lex_value(b"9223372036854775808"), Token::Error(_)));
        assert!(matches!(lex_value(b"-9223372036854775809"), Token::Error(_)));
    }

    #[test]
    fn float_basic() {
        match lex_value(b"3.1415") {
            Token::Float(f) => assert!((f - 3.1415).abs() < 1e-9),
            other => panic!("expected float, got {other:?}"),
        }
    }

    #[test]
    fn rejects_float_missing_fraction_digit() {
        assert!(matches!(lex_value(b"7."), Token::Error(_)));
    }

    #[test]
    fn rejects_float_missing_integer_digit() {
        assert!(matches!(lex_value(b".7"), Token::Error(_)));
    }

    #[test]
    fn special_floats() {
        assert!(matches!(lex_value(b"inf"), Token::Float(f) if f.is_infinite() && f.is_sign_positive()));
        assert!(matches!(lex_value(b"-inf"), Token::Float(f) if f.is_infinite() && f.is_sign_negative()));
        assert!(matches!(lex_value(b"nan"), Token::Float(f) if f.is_nan()));
    }

    #[test]
    fn boolean_literals() {
        assert_eq!(lex_value(b"true"), Token::Boolean(true));
        assert_eq!(lex_value(b"false"), Token::Boolean(false));
    }

    #[test]
    fn datetime_candidate_passes_through_raw() {
        assert_eq!(
            lex_value(b"1979-05-27T07:32:00Z"),
            Token::DateTime("1979-05-27T07:32:00Z".to_string())
        );
    }

    #[test]
    fn single_space_date_time_is_joined_with_t() {
        assert_eq!(
            lex_value(b"1979-05-27 07:32:00Z"),
            Token::DateTime("1979-05-27T07:32:00Z".to_string())
        );
    }

    #[test]
    fn bare_time_candidate() {
        assert_eq!(lex_value(b"07:32:00"), Token::DateTime("07:32:00".to_string()));
    }
}
