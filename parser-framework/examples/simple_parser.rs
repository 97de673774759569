//! Minimal parser example.
//!
//! Demonstrates the parser-framework workflow:
//! 1. Build small parsers for the pieces of the input.
//! 2. Combine them into a grammar.
//! 3. Run the grammar over text and inspect the reply.
//!
//! The example parses `key = value` settings, one per line.

use parser_framework::{
    alpha_num, attempt, char_, choice, digit, eof, letter, many, many1, none_of, one_of, parse,
    recognize, sep_end_by, sequence, skip_many, string, Parser, Reply,
};

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Number(i64),
    Flag(bool),
    Text(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Setting {
    pub key: String,
    pub value: Value,
}

fn blanks() -> Parser<()> {
    skip_many(one_of(" \t"))
}

fn key() -> Parser<String> {
    recognize(letter().then(many(alpha_num().or(char_('_')))))
        .map(|slice| slice.to_string())
        .label("key")
}

fn value() -> Parser<Value> {
    let number = recognize(char_('-').or(digit()).then(many(digit())))
        .map(|slice| Value::Number(slice.parse().unwrap_or_default()));
    let flag = choice(vec![
        attempt(string("true")).to(Value::Flag(true)),
        attempt(string("false")).to(Value::Flag(false)),
    ]);
    let text = many1(none_of("\n")).map(|chars| Value::Text(chars.into_iter().collect()));
    choice(vec![number, flag, text]).label("value")
}

fn setting() -> Parser<Setting> {
    let (key, value, blanks) = (key(), value(), blanks());
    let equals = char_('=');
    sequence(move |s| {
        let key = s.run(&key)?;
        s.run(&blanks)?;
        s.run(&equals)?;
        s.run(&blanks)?;
        let value = s.run(&value)?;
        Ok(Setting { key, value })
    })
}

fn settings() -> Parser<Vec<Setting>> {
    sep_end_by(setting(), many1(char_('\n'))).then_ignore(eof())
}

fn main() {
    println!("=== Simple Parser Example ===\n");

    let inputs = [
        "name = demo\nthreads = 4\nverbose = true\n",
        "offset = -12",
        "name demo",
    ];

    for (index, input) in inputs.iter().enumerate() {
        println!("[Example {}] {:?}", index + 1, input);
        println!("{}", "=".repeat(50));
        match parse(&settings(), *input) {
            Reply::Ok { value, .. } => {
                for setting in value {
                    println!("{} => {:?}", setting.key, setting.value);
                }
            }
            Reply::Err { at, message } => {
                println!("Parse failed at {}: {}", at.position(), message);
            }
        }
        println!();
    }
}
