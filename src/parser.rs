//! Recursive-descent parser for event expressions.
//!
//! Grammar:
//!
//! ```text
//! input     = chain [ EQUALS ]
//! chain     = operand { (AND | OR) operand }
//! operand   = EVENT | '(' chain ')'
//! ```
//!
//! This is the right-recursive `exprList = expr exprTail` grammar with the
//! tail unrolled into a loop, so chains come out flat instead of being
//! spliced together. A probability annotation is only accepted at the very
//! end of the top-level chain, and all tokens must be consumed.

use std::iter::Peekable;
use std::vec::IntoIter;

use log::debug;

use crate::ast::{Chain, Expression, Op, Operand};
use crate::error::{Error, Result};
use crate::lexer::{lex, Token};

struct Parser {
    tokens: Peekable<IntoIter<Token>>,
}

impl Parser {
    fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens: tokens.into_iter().peekable(),
        }
    }

    fn unexpected(&mut self, expected: &'static str) -> Error {
        Error::UnexpectedToken {
            expected,
            found: self.tokens.next(),
        }
    }

    fn expect(&mut self, token: Token, expected: &'static str) -> Result<()> {
        if self.tokens.peek() == Some(&token) {
            self.tokens.next();
            Ok(())
        } else {
            Err(self.unexpected(expected))
        }
    }

    fn input(&mut self) -> Result<Expression> {
        let chain = self.chain()?;
        let probability = match self.tokens.peek() {
            Some(&Token::Equals(p)) => {
                self.tokens.next();
                Some(p)
            }
            _ => None,
        };
        if let Some(token) = self.tokens.next() {
            return Err(Error::TrailingInput { token });
        }
        Ok(Expression::new(chain, probability))
    }

    fn chain(&mut self) -> Result<Chain> {
        let mut chain = Chain::new(self.operand()?);
        loop {
            let op = match self.tokens.peek() {
                Some(Token::And) => Op::And,
                Some(Token::Or) => Op::Or,
                _ => return Ok(chain),
            };
            self.tokens.next();
            chain = chain.with(op, self.operand()?);
        }
    }

    fn operand(&mut self) -> Result<Operand> {
        match self
            .tokens
            .next_if(|t| matches!(t, Token::Event(_) | Token::OpenParen))
        {
            Some(Token::Event(label)) => Ok(Operand::Event(label)),
            Some(_) => {
                let inner = self.chain()?;
                self.expect(Token::CloseParen, "')'")?;
                Ok(Operand::Group(inner))
            }
            None => Err(self.unexpected("event or '('")),
        }
    }
}

/// Parses a token stream (whitespace already removed) into an [`Expression`].
pub fn parse(tokens: Vec<Token>) -> Result<Expression> {
    Parser::new(tokens).input()
}

/// Lexes and parses one input line.
pub fn parse_expression<S: AsRef<str>>(text: &str, events: &[S]) -> Result<Expression> {
    let expr = parse(lex(text, events)?)?;
    debug!("parsed {:?} as {}", text, expr);
    Ok(expr)
}

#[cfg(test)]
mod tests {
    use super::*;

    use test_log::test;

    const EVENTS: [&str; 4] = ["A", "B", "C", "D"];

    fn ev(label: &str) -> Operand {
        Operand::event(label)
    }

    #[test]
    fn test_parse_single_event() {
        let expr = parse_expression("A", &EVENTS).unwrap();
        assert_eq!(expr, Expression::new(Chain::new(ev("A")), None));
        assert!(expr.is_unknown());
    }

    #[test]
    fn test_parse_flat_chain_without_precedence() {
        let expr = parse_expression("A and B or C", &EVENTS).unwrap();
        let expected = Chain::new(ev("A")).with(Op::And, ev("B")).with(Op::Or, ev("C"));
        assert_eq!(expr.chain, expected);
        assert_eq!(expr.probability, None);
    }

    #[test]
    fn test_parse_groups_and_probability() {
        let expr = parse_expression("(A and C) or B and D = 0.6", &EVENTS).unwrap();
        let inner = Chain::new(ev("A")).with(Op::And, ev("C"));
        let expected = Chain::new(Operand::Group(inner))
            .with(Op::Or, ev("B"))
            .with(Op::And, ev("D"));
        assert_eq!(expr.chain, expected);
        assert_eq!(expr.probability, Some(0.6));
    }

    #[test]
    fn test_parse_nested_groups() {
        let expr = parse_expression("((A or B)) and C", &EVENTS).unwrap();
        let ab = Chain::new(ev("A")).with(Op::Or, ev("B"));
        let expected = Chain::new(Operand::Group(Chain::new(Operand::Group(ab)))).with(Op::And, ev("C"));
        assert_eq!(expr.chain, expected);
    }

    #[test]
    fn test_parse_group_in_tail() {
        let expr = parse_expression("A and (B or C) = 0.5", &EVENTS).unwrap();
        let bc = Chain::new(ev("B")).with(Op::Or, ev("C"));
        assert_eq!(expr.chain, Chain::new(ev("A")).with(Op::And, Operand::Group(bc)));
        assert_eq!(expr.probability, Some(0.5));
    }

    #[test]
    fn test_parse_empty_input() {
        let err = parse(vec![]).unwrap_err();
        assert_eq!(
            err,
            Error::UnexpectedToken {
                expected: "event or '('",
                found: None
            }
        );
    }

    #[test]
    fn test_parse_missing_operand() {
        let err = parse_expression("A and", &EVENTS).unwrap_err();
        assert!(matches!(err, Error::UnexpectedToken { found: None, .. }));

        let err = parse_expression("A and or B", &EVENTS).unwrap_err();
        assert_eq!(
            err,
            Error::UnexpectedToken {
                expected: "event or '('",
                found: Some(Token::Or)
            }
        );
    }

    #[test]
    fn test_parse_unmatched_parens() {
        let err = parse_expression("(A and B", &EVENTS).unwrap_err();
        assert_eq!(
            err,
            Error::UnexpectedToken {
                expected: "')'",
                found: None
            }
        );

        let err = parse_expression("A and B)", &EVENTS).unwrap_err();
        assert_eq!(
            err,
            Error::TrailingInput {
                token: Token::CloseParen
            }
        );
    }

    #[test]
    fn test_parse_rejects_probability_inside_group() {
        let err = parse_expression("(A = 0.5) and B", &EVENTS).unwrap_err();
        assert_eq!(
            err,
            Error::UnexpectedToken {
                expected: "')'",
                found: Some(Token::Equals(0.5))
            }
        );
    }

    #[test]
    fn test_parse_rejects_input_after_probability() {
        let err = parse_expression("A = 0.5 and B", &EVENTS).unwrap_err();
        assert_eq!(err, Error::TrailingInput { token: Token::And });
    }

    #[test]
    fn test_parse_unknown_event() {
        let err = parse_expression("A or X = 0.1", &EVENTS).unwrap_err();
        assert_eq!(err, Error::UnknownEvent("X".to_string()));
    }

    #[test]
    fn test_parse_dangling_equals_is_dropped() {
        let expr = parse_expression("A or B =", &EVENTS).unwrap();
        assert!(expr.is_unknown());
        assert_eq!(expr.chain, Chain::new(ev("A")).with(Op::Or, ev("B")));
    }
}
