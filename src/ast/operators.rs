use std::cmp::Ordering;
use std::fmt;

/// Registered operator tokens.
///
/// This vocabulary is part of the wire format: adding a token is a breaking
/// change for anyone serializing queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    And,
    Or,
    Not,
    Lt,
    Le,
    Eq,
    Gt,
    Ge,
    /// Membership / substring (`co`)
    Co,
    Resolve,
}

impl Operator {
    pub const ALL: [Operator; 10] = [
        Operator::And,
        Operator::Or,
        Operator::Not,
        Operator::Lt,
        Operator::Le,
        Operator::Eq,
        Operator::Gt,
        Operator::Ge,
        Operator::Co,
        Operator::Resolve,
    ];

    /// Looks up an operator by token.
    ///
    /// The legacy `#`-prefixed spelling (`#and`, `#resolve`) is accepted too.
    pub fn from_token(token: &str) -> Option<Self> {
        let token = token.strip_prefix('#').unwrap_or(token);
        Self::ALL.into_iter().find(|op| op.token() == token)
    }

    /// Canonical token
    pub fn token(&self) -> &'static str {
        match self {
            Operator::And => "and",
            Operator::Or => "or",
            Operator::Not => "not",
            Operator::Lt => "lt",
            Operator::Le => "le",
            Operator::Eq => "eq",
            Operator::Gt => "gt",
            Operator::Ge => "ge",
            Operator::Co => "co",
            Operator::Resolve => "resolve",
        }
    }

    /// Fixed argument count, `None` for the variadic `resolve`.
    pub fn arity(&self) -> Option<usize> {
        match self {
            Operator::Not => Some(1),
            Operator::Resolve => None,
            _ => Some(2),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// Comparison operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompareOp {
    /// Less than (`lt`)
    Lt,
    /// Less than or equal (`le`)
    Le,
    /// Equal (`eq`)
    Eq,
    /// Greater than (`gt`)
    Gt,
    /// Greater than or equal (`ge`)
    Ge,
}

impl CompareOp {
    pub fn operator(&self) -> Operator {
        match self {
            CompareOp::Lt => Operator::Lt,
            CompareOp::Le => Operator::Le,
            CompareOp::Eq => Operator::Eq,
            CompareOp::Gt => Operator::Gt,
            CompareOp::Ge => Operator::Ge,
        }
    }

    /// Whether an ordering between two operands satisfies this comparison.
    pub fn accepts(&self, ordering: Ordering) -> bool {
        match self {
            CompareOp::Lt => ordering == Ordering::Less,
            CompareOp::Le => ordering != Ordering::Greater,
            CompareOp::Eq => ordering == Ordering::Equal,
            CompareOp::Gt => ordering == Ordering::Greater,
            CompareOp::Ge => ordering != Ordering::Less,
        }
    }
}
