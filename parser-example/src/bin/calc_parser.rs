//! Calculator parser example.
//!
//! Shows lexer-framework and parser-framework working together:
//! 1. lexer-framework supplies the tokens (numbers, operators, parentheses,
//!    `#` comments) from a language definition;
//! 2. parser-framework's expression builder assembles them into an AST
//!    according to an operator table;
//! 3. the AST is evaluated.
//!
//! Supported syntax:
//! - numbers (naturals, hexadecimal and octal naturals, floats)
//! - `+`, `-`, `*`, `/` (left associative) and `^` (right associative)
//! - unary minus, binding looser than `^` so `-2 ^ 2` is `-4`
//! - parentheses
//!
//! Expressions are taken from the command line, one per argument, or read
//! from stdin one per line. `RUST_LOG=debug` prints each AST.

use common_framework::{ParseError, Position};
use lexer_framework::{LanguageDef, TokenParser};
use parser_framework::{build_expression_parser, lazy, parse, position, Assoc, Operator, Parser};
use std::io::{self, BufRead};

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Number literal.
    Number { value: f64, position: Position },
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Unary { op: UnaryOp, operand: Box<Expr> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Subtract,
    Multiply,
    Divide,
    Power,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Negate,
}

impl Expr {
    pub fn evaluate(&self) -> f64 {
        match self {
            Expr::Number { value, .. } => *value,
            Expr::Unary {
                op: UnaryOp::Negate,
                operand,
            } => -operand.evaluate(),
            Expr::Binary { op, left, right } => {
                let (l, r) = (left.evaluate(), right.evaluate());
                match op {
                    BinaryOp::Add => l + r,
                    BinaryOp::Subtract => l - r,
                    BinaryOp::Multiply => l * r,
                    BinaryOp::Divide => l / r,
                    BinaryOp::Power => l.powf(r),
                }
            }
        }
    }
}

fn calculator_tokens() -> Result<TokenParser, lexer_framework::ConfigError> {
    let def = LanguageDef {
        comment_line: Some("#".to_string()),
        ..LanguageDef::default()
    }
    .with_reserved_op_names(["+", "-", "*", "/", "^"]);
    TokenParser::new(def)
}

fn binary(tokens: &TokenParser, symbol: &str, op: BinaryOp, assoc: Assoc) -> Operator<Expr> {
    Operator::binary(tokens.reserved_op(symbol), assoc, move |left: Expr, right: Expr| Expr::Binary {
        op,
        left: Box::new(left),
        right: Box::new(right),
    })
}

fn expression(tokens: &TokenParser) -> Parser<Expr> {
    let number = position()
        .then(tokens.natural_or_float())
        .map(|(position, n)| Expr::Number {
            value: n.as_f64(),
            position,
        });
    let nested = tokens.clone();
    let group = tokens.parens(lazy(move || expression(&nested)));
    let term = number.or(group).label("operand");

    let negate = Operator::prefix(tokens.reserved_op("-"), |operand: Expr| Expr::Unary {
        op: UnaryOp::Negate,
        operand: Box::new(operand),
    });
    let table = vec![
        vec![
            binary(tokens, "+", BinaryOp::Add, Assoc::Left),
            binary(tokens, "-", BinaryOp::Subtract, Assoc::Left),
        ],
        vec![
            binary(tokens, "*", BinaryOp::Multiply, Assoc::Left),
            binary(tokens, "/", BinaryOp::Divide, Assoc::Left),
        ],
        vec![negate],
        vec![binary(tokens, "^", BinaryOp::Power, Assoc::Right)],
    ];
    build_expression_parser(table, term)
}

/// Parses a whole calculator input into an AST.
pub fn parse_expression(tokens: &TokenParser, input: &str) -> Result<Expr, ParseError> {
    parse(&tokens.complete(expression(tokens)), input).into_result()
}

fn run(tokens: &TokenParser, input: &str) {
    match parse_expression(tokens, input) {
        Ok(ast) => {
            log::debug!("{input:?} parsed as {ast:#?}");
            println!("{} = {}", input.trim(), ast.evaluate());
        }
        Err(err) => eprintln!("{}: {err}", input.trim()),
    }
}

fn main() {
    env_logger::init();

    let tokens = match calculator_tokens() {
        Ok(tokens) => tokens,
        Err(err) => {
            eprintln!("invalid calculator language: {err}");
            std::process::exit(2);
        }
    };

    let args: Vec<String> = std::env::args().skip(1).collect();
    if !args.is_empty() {
        for arg in &args {
            run(&tokens, arg);
        }
        return;
    }

    for line in io::stdin().lock().lines() {
        match line {
            Ok(line) if line.trim().is_empty() => continue,
            Ok(line) => run(&tokens, &line),
            Err(err) => {
                eprintln!("failed to read input: {err}");
                std::process::exit(1);
            }
        }
    }
}
