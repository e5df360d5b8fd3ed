use std::fmt::{Display, Formatter};

/// Binary connective between two operands of a [`Chain`].
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Op {
    And,
    Or,
}

impl Display for Op {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Op::And => write!(f, "and"),
            Op::Or => write!(f, "or"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    /// Reference to a simple event by label.
    Event(String),
    /// Parenthesized sub-chain.
    Group(Chain),
}

impl Operand {
    pub fn event(label: impl Into<String>) -> Self {
        Operand::Event(label.into())
    }

    pub fn group(chain: Chain) -> Self {
        Operand::Group(chain)
    }
}

impl Display for Operand {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Operand::Event(label) => write!(f, "{}", label),
            Operand::Group(chain) => write!(f, "({})", chain),
        }
    }
}

/// Flat AND/OR chain: `first op1 x1 op2 x2 ...`.
///
/// There is no precedence between `and` and `or`; the chain folds strictly
/// left to right, so `A and B or C` means `(A and B) or C` and
/// `A or B and C` means `(A or B) and C`.
#[derive(Debug, Clone, PartialEq)]
pub struct Chain {
    pub first: Box<Operand>,
    pub rest: Vec<(Op, Operand)>,
}

impl Chain {
    pub fn new(first: Operand) -> Self {
        Self {
            first: Box::new(first),
            rest: Vec::new(),
        }
    }

    pub fn with(mut self, op: Op, operand: Operand) -> Self {
        self.rest.push((op, operand));
        self
    }

    /// Fold steps in order. The first operand comes with [`Op::Or`], which
    /// is what folding it into an empty coverage amounts to.
    pub fn steps(&self) -> impl Iterator<Item = (Op, &Operand)> {
        std::iter::once((Op::Or, self.first.as_ref())).chain(self.rest.iter().map(|(op, x)| (*op, x)))
    }
}

impl Display for Chain {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.first)?;
        for (op, operand) in &self.rest {
            write!(f, " {} {}", op, operand)?;
        }
        Ok(())
    }
}

/// One parsed input line: an event chain, plus its probability if known.
#[derive(Debug, Clone, PartialEq)]
pub struct Expression {
    pub chain: Chain,
    pub probability: Option<f64>,
}

impl Expression {
    pub fn new(chain: Chain, probability: Option<f64>) -> Self {
        Self { chain, probability }
    }

    pub fn is_unknown(&self) -> bool {
        self.probability.is_none()
    }
}

impl Display for Expression {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.chain)?;
        if let Some(p) = self.probability {
            write!(f, " = {}", p)?;
        }
        Ok(())
    }
}
