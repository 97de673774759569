//! Calculator lexer example.
//! Demonstrates how to turn calculator input into a token stream with the
//! token parsers of lexer-framework.

use lexer_framework::{LanguageDef, TokenParser};
use parser_framework::{choice, many, parse, position, Parser, Position, Reply};

/// Token definition used by the calculator example (kept intentionally small).
#[derive(Debug, Clone, PartialEq)]
pub enum CalcToken {
    Number { value: f64, position: Position },
    Operator { symbol: String, position: Position },
    LeftParen { position: Position },
    RightParen { position: Position },
}

fn token(tokens: &TokenParser) -> Parser<CalcToken> {
    let number = tokens.natural_or_float().map(|n| n.as_f64());
    let kinds = choice(vec![
        number.map(|value| (Some(value), String::new())),
        tokens.symbol("(").map(|s| (None, s)),
        tokens.symbol(")").map(|s| (None, s)),
        tokens.operator().map(|s| (None, s)),
    ]);
    position()
        .then(kinds)
        .map(|(position, kind)| match kind {
            (Some(value), _) => CalcToken::Number { value, position },
            (None, symbol) if symbol == "(" => CalcToken::LeftParen { position },
            (None, symbol) if symbol == ")" => CalcToken::RightParen { position },
            (None, symbol) => CalcToken::Operator { symbol, position },
        })
}

fn main() {
    let def = LanguageDef {
        comment_line: Some("#".to_string()),
        ..LanguageDef::default()
    };
    let tokens = match TokenParser::new(def) {
        Ok(tokens) => tokens,
        Err(err) => {
            eprintln!("invalid language definition: {err}");
            return;
        }
    };
    let lexer = tokens.complete(many(token(&tokens)));

    let input = "3.5 * (2 + 4) # a comment\n  - 0x10 ** 2";
    println!("Input:\n{input}\n");
    match parse(&lexer, input) {
        Reply::Ok { value, .. } => {
            for token in value {
                println!("{token:?}");
            }
        }
        Reply::Err { at, message } => println!("Lexing failed at {}: {message}", at.position()),
    }
}
