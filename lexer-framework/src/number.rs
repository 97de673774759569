//! Numeric literals.
//!
//! Naturals are written in decimal, or after a leading `0` in hexadecimal
//! (`0x1A`) or octal (`0o17`). Floats are decimal with a fraction, an
//! exponent, or both. Digits are folded with overflow checks; a literal too
//! large for its type fails after its digits.

use crate::token::TokenParser;
use parser_framework::{
    char_, choice, digit, hex_digit, many1, oct_digit, one_of, option, optional, pure, sequence,
    Message, Parser, Reply,
};

/// A number literal that may be either a natural or a float.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Natural(u64),
    Float(f64),
}

impl Number {
    pub fn as_f64(self) -> f64 {
        match self {
            Number::Natural(n) => n as f64,
            Number::Float(x) => x,
        }
    }
}

impl TokenParser {
    /// A non-negative integer in decimal, hexadecimal or octal.
    pub fn natural(&self) -> Parser<u64> {
        self.lexeme(nat().label("natural"))
    }

    /// A natural with an optional `-` or `+` sign.
    pub fn integer(&self) -> Parser<i64> {
        let sign = sign();
        let nat = nat();
        let integer = sequence(move |s| {
            let negative = s.run(&sign)?;
            let n = s.run(&nat)?;
            let value = if negative {
                0i64.checked_sub_unsigned(n)
            } else {
                i64::try_from(n).ok()
            };
            value.ok_or_else(|| s.fail("integer literal out of range"))
        });
        self.lexeme(integer.label("integer"))
    }

    /// A signed decimal float, which must have a fraction or an exponent.
    pub fn float(&self) -> Parser<f64> {
        let float = signed(floating());
        self.lexeme(float.label("float"))
    }

    /// A natural or a float, whichever the literal turns out to be.
    pub fn natural_or_float(&self) -> Parser<Number> {
        self.lexeme(nat_float().label("number"))
    }

    /// Any signed number literal, as a float.
    pub fn number(&self) -> Parser<f64> {
        let number = signed(nat_float().map(Number::as_f64));
        self.lexeme(number.label("number"))
    }

    /// Decimal digits.
    pub fn decimal(&self) -> Parser<u64> {
        decimal()
    }

    /// `x` or `X` followed by hexadecimal digits.
    pub fn hexadecimal(&self) -> Parser<u64> {
        hexadecimal()
    }

    /// `o` or `O` followed by octal digits.
    pub fn octal(&self) -> Parser<u64> {
        octal()
    }
}

/// Folds the digits matched by `digit` in base `radix`.
fn digits(radix: u32, digit: Parser<char>) -> Parser<u64> {
    let digits = many1(digit);
    Parser::new("digits", move |input| match digits.parse(input) {
        Reply::Ok { value, rest } => match fold_digits(&value, radix) {
            Some(n) => Reply::ok(n, rest),
            None => Reply::err(rest, Message::text("number literal out of range")),
        },
        Reply::Err { at, message } => Reply::Err { at, message },
    })
}

fn fold_digits(digits: &[char], radix: u32) -> Option<u64> {
    digits.iter().try_fold(0u64, |acc, d| {
        acc.checked_mul(u64::from(radix))?
            .checked_add(u64::from(d.to_digit(radix)?))
    })
}

fn decimal() -> Parser<u64> {
    digits(10, digit())
}

fn hexadecimal() -> Parser<u64> {
    one_of("xX").ignore_then(digits(16, hex_digit()))
}

fn octal() -> Parser<u64> {
    one_of("oO").ignore_then(digits(8, oct_digit()))
}

fn nat() -> Parser<u64> {
    let zero_number = choice(vec![hexadecimal(), octal(), decimal(), pure(0)]);
    char_('0').ignore_then(zero_number).or(decimal())
}

/// `true` for a leading minus.
fn sign() -> Parser<bool> {
    choice(vec![char_('-').to(true), char_('+').to(false), pure(false)])
}

fn signed(number: Parser<f64>) -> Parser<f64> {
    sign()
        .then(number)
        .map(|(negative, x)| if negative { -x } else { x })
}

/// `.` and decimal digits, as the value they add after the point.
fn fraction() -> Parser<f64> {
    char_('.')
        .ignore_then(many1(digit()).label("fraction"))
        .map(|digits| {
            digits.iter().rev().fold(0.0, |acc, d| {
                (f64::from(d.to_digit(10).unwrap_or(0)) + acc) / 10.0
            })
        })
}

/// `e` or `E`, an optional sign and a decimal exponent, as the power of ten
/// it scales by.
fn exponent() -> Parser<f64> {
    one_of("eE")
        .ignore_then(sign().then(decimal().label("exponent")))
        .map(|(negative, e)| {
            let scale = 10f64.powf(e as f64);
            if negative {
                1.0 / scale
            } else {
                scale
            }
        })
}

/// The part of a float after its integral digits: a fraction and scale.
fn fract_exponent() -> Parser<(f64, f64)> {
    choice(vec![
        fraction().then(option(1.0, exponent())),
        exponent().map(|scale| (0.0, scale)),
    ])
}

fn floating() -> Parser<f64> {
    decimal()
        .then(fract_exponent())
        .map(|(n, (fraction, scale))| (n as f64 + fraction) * scale)
}

fn decimal_float() -> Parser<Number> {
    decimal()
        .then(optional(fract_exponent()))
        .map(|(n, tail)| match tail {
            Some((fraction, scale)) => Number::Float((n as f64 + fraction) * scale),
            None => Number::Natural(n),
        })
}

fn nat_float() -> Parser<Number> {
    let zero_number = choice(vec![
        hexadecimal().map(Number::Natural),
        octal().map(Number::Natural),
        decimal_float(),
        fract_exponent().map(|(fraction, scale)| Number::Float(fraction * scale)),
        pure(Number::Natural(0)),
    ]);
    char_('0').ignore_then(zero_number).or(decimal_float())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fold_digits_checks_overflow() {
        let max: Vec<char> = u64::MAX.to_string().chars().collect();
        assert_eq!(fold_digits(&max, 10), Some(u64::MAX));

        let too_big: Vec<char> = "18446744073709551616".chars().collect();
        assert_eq!(fold_digits(&too_big, 10), None);
    }

    #[test]
    fn test_fold_digits_in_radix() {
        assert_eq!(fold_digits(&['1', 'A'], 16), Some(26));
        assert_eq!(fold_digits(&['1', '7'], 8), Some(15));
        assert_eq!(fold_digits(&['8'], 8), None);
    }
}
