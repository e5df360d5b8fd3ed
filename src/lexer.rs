//! Tokenizer for the event-expression mini-language.
//!
//! The lexer tries a fixed, ordered list of rules at the start of the
//! remaining input and takes the first one that matches:
//!
//! ```text
//! whitespace   \s+
//! open paren   (
//! close paren  )
//! and          and
//! or           or
//! equals       = <number>        (integer or decimal)
//! event        [^\s)=]+
//! ```
//!
//! Rules are not word-bounded, so the keywords win over labels that merely
//! start with them: `orange` lexes as `or` followed by `ange`.
//!
//! If no rule matches (for example a dangling `=` without a number), lexing
//! stops and the remainder of the input is dropped without an error.

use std::fmt::{Display, Formatter};

use log::debug;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Whitespace,
    OpenParen,
    CloseParen,
    And,
    Or,
    /// Trailing `= p` annotation carrying a known probability.
    Equals(f64),
    /// Reference to a declared simple event.
    Event(String),
}

impl Display for Token {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::Whitespace => write!(f, " "),
            Token::OpenParen => write!(f, "("),
            Token::CloseParen => write!(f, ")"),
            Token::And => write!(f, "and"),
            Token::Or => write!(f, "or"),
            Token::Equals(p) => write!(f, "= {}", p),
            Token::Event(label) => write!(f, "{}", label),
        }
    }
}

#[derive(Debug, Copy, Clone)]
enum Rule {
    Whitespace,
    OpenParen,
    CloseParen,
    And,
    Or,
    Equals,
    Event,
}

/// Lexer rules in priority order.
static RULES: Lazy<Vec<(Rule, Regex)>> = Lazy::new(|| {
    [
        (Rule::Whitespace, r"^\s+"),
        (Rule::OpenParen, r"^\("),
        (Rule::CloseParen, r"^\)"),
        (Rule::And, r"^and"),
        (Rule::Or, r"^or"),
        (Rule::Equals, r"^=\s*([0-9]*\.?[0-9]+)"),
        (Rule::Event, r"^[^\s)=]+"),
    ]
    .into_iter()
    .map(|(rule, pattern)| (rule, Regex::new(pattern).expect("lexer patterns are valid")))
    .collect()
});

impl Rule {
    fn token(self, caps: &Captures<'_>) -> Option<Token> {
        let token = match self {
            Rule::Whitespace => Token::Whitespace,
            Rule::OpenParen => Token::OpenParen,
            Rule::CloseParen => Token::CloseParen,
            Rule::And => Token::And,
            Rule::Or => Token::Or,
            Rule::Equals => Token::Equals(caps.get(1)?.as_str().parse().ok()?),
            Rule::Event => Token::Event(caps[0].to_string()),
        };
        Some(token)
    }
}

/// Iterator over the raw tokens of one expression, whitespace included.
///
/// Every event label is checked against the declared simple events; an
/// undeclared label yields [`Error::UnknownEvent`] and ends the iteration.
pub struct Lexer<'a, S> {
    rest: &'a str,
    events: &'a [S],
}

impl<'a, S: AsRef<str>> Lexer<'a, S> {
    pub fn new(text: &'a str, events: &'a [S]) -> Self {
        Self { rest: text, events }
    }

    /// The part of the input not consumed yet.
    pub fn rest(&self) -> &'a str {
        self.rest
    }

    fn is_declared(&self, label: &str) -> bool {
        self.events.iter().any(|e| e.as_ref() == label)
    }

    fn next_match(&self) -> Option<(Token, usize)> {
        RULES.iter().find_map(|(rule, re)| {
            let caps = re.captures(self.rest)?;
            let token = rule.token(&caps)?;
            Some((token, caps[0].len()))
        })
    }
}

impl<S: AsRef<str>> Iterator for Lexer<'_, S> {
    type Item = Result<Token>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.rest.is_empty() {
            return None;
        }

        let Some((token, len)) = self.next_match() else {
            debug!("lexer stopped, dropping {:?}", self.rest);
            self.rest = "";
            return None;
        };
        self.rest = &self.rest[len..];

        if let Token::Event(label) = &token {
            if !self.is_declared(label) {
                self.rest = "";
                return Some(Err(Error::UnknownEvent(label.clone())));
            }
        }

        Some(Ok(token))
    }
}

/// Tokenizes `text`, discarding whitespace.
pub fn lex<S: AsRef<str>>(text: &str, events: &[S]) -> Result<Vec<Token>> {
    let tokens = Lexer::new(text, events)
        .filter(|t| !matches!(t, Ok(Token::Whitespace)))
        .collect::<Result<Vec<_>>>()?;
    debug!("lex({:?}) -> {} tokens", text, tokens.len());
    Ok(tokens)
}
