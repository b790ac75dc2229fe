//! Symbolic values
//!
//! Provides [`SymValue`], the expression type every modeled element, length and
//! constraint is expressed in. Smart constructors fold constants eagerly so that
//! concrete computations never reach the path condition.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

/// Unary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnaryOp {
    /// Logical negation
    Not,
    /// Arithmetic negation
    Neg,
}

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinaryOp {
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `*`
    Mul,
    /// `==`
    Eq,
    /// `!=`
    Ne,
    /// `<`
    Lt,
    /// `<=`
    Le,
    /// `>`
    Gt,
    /// `>=`
    Ge,
    /// `&&`
    And,
    /// `||`
    Or,
}

impl BinaryOp {
    fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Eq => "==",
            Self::Ne => "!=",
            Self::Lt => "<",
            Self::Le => "<=",
            Self::Gt => ">",
            Self::Ge => ">=",
            Self::And => "&&",
            Self::Or => "||",
        }
    }

    /// Comparison with swapped meaning under negation (`<` ↔ `>=`)
    fn negated_comparison(self) -> Option<Self> {
        match self {
            Self::Eq => Some(Self::Ne),
            Self::Ne => Some(Self::Eq),
            Self::Lt => Some(Self::Ge),
            Self::Ge => Some(Self::Lt),
            Self::Gt => Some(Self::Le),
            Self::Le => Some(Self::Gt),
            _ => None,
        }
    }
}

/// Symbolic expression
///
/// # Invariants
/// - Values built through the smart constructors never contain an operator whose
///   operands are all constants
/// - Structural equality implies semantic equality (expressions are pure)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SymValue {
    /// Concrete integer
    Int(i64),
    /// Concrete boolean
    Bool(bool),
    /// Free symbol
    Symbol(String),
    /// Unary operation
    Unary(UnaryOp, Box<SymValue>),
    /// Binary operation
    Binary(BinaryOp, Box<SymValue>, Box<SymValue>),
}

impl SymValue {
    /// Concrete integer
    #[inline]
    #[must_use]
    pub fn int(value: i64) -> Self {
        Self::Int(value)
    }

    /// Concrete boolean
    #[inline]
    #[must_use]
    pub fn bool(value: bool) -> Self {
        Self::Bool(value)
    }

    /// Free symbol
    #[inline]
    #[must_use]
    pub fn symbol(name: impl Into<String>) -> Self {
        Self::Symbol(name.into())
    }

    /// Concrete integer, if this value is one
    #[inline]
    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Concrete boolean, if this value is one
    #[inline]
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// True for `Int` and `Bool`
    #[inline]
    #[must_use]
    pub fn is_concrete(&self) -> bool {
        matches!(self, Self::Int(_) | Self::Bool(_))
    }

    /// Build a unary expression, folding constants
    #[must_use]
    pub fn unary(op: UnaryOp, operand: Self) -> Self {
        match (op, operand) {
            (UnaryOp::Not, Self::Bool(b)) => Self::Bool(!b),
            (UnaryOp::Neg, Self::Int(v)) => Self::Int(v.wrapping_neg()),
            (UnaryOp::Not, Self::Unary(UnaryOp::Not, inner)) => *inner,
            (UnaryOp::Neg, Self::Unary(UnaryOp::Neg, inner)) => *inner,
            (UnaryOp::Not, Self::Binary(op, l, r)) => match op.negated_comparison() {
                Some(negated) => Self::Binary(negated, l, r),
                None => Self::Unary(UnaryOp::Not, Box::new(Self::Binary(op, l, r))),
            },
            (op, operand) => Self::Unary(op, Box::new(operand)),
        }
    }

    /// Build a binary expression, folding constants
    #[must_use]
    pub fn binary(op: BinaryOp, lhs: Self, rhs: Self) -> Self {
        use BinaryOp as B;

        match (op, &lhs, &rhs) {
            (B::Add, Self::Int(a), Self::Int(b)) => return Self::Int(a.wrapping_add(*b)),
            (B::Sub, Self::Int(a), Self::Int(b)) => return Self::Int(a.wrapping_sub(*b)),
            (B::Mul, Self::Int(a), Self::Int(b)) => return Self::Int(a.wrapping_mul(*b)),
            (B::Lt, Self::Int(a), Self::Int(b)) => return Self::Bool(a < b),
            (B::Le, Self::Int(a), Self::Int(b)) => return Self::Bool(a <= b),
            (B::Gt, Self::Int(a), Self::Int(b)) => return Self::Bool(a > b),
            (B::Ge, Self::Int(a), Self::Int(b)) => return Self::Bool(a >= b),
            (B::And, Self::Bool(false), _) | (B::And, _, Self::Bool(false)) => {
                return Self::Bool(false)
            }
            (B::Or, Self::Bool(true), _) | (B::Or, _, Self::Bool(true)) => {
                return Self::Bool(true)
            }
            (B::And, Self::Bool(true), _) | (B::Or, Self::Bool(false), _) => return rhs,
            (B::And, _, Self::Bool(true)) | (B::Or, _, Self::Bool(false)) => return lhs,
            _ => {}
        }

        if matches!(op, B::Eq | B::Ne) {
            if lhs.is_concrete() && rhs.is_concrete() {
                return Self::Bool((lhs == rhs) == (op == B::Eq));
            }
            if lhs == rhs {
                return Self::Bool(op == B::Eq);
            }
        }
        if matches!(op, B::Le | B::Ge) && lhs == rhs {
            return Self::Bool(true);
        }
        if matches!(op, B::Lt | B::Gt) && lhs == rhs {
            return Self::Bool(false);
        }

        Self::Binary(op, Box::new(lhs), Box::new(rhs))
    }

    /// `self == other`
    #[must_use]
    pub fn equals(&self, other: &Self) -> Self {
        Self::binary(BinaryOp::Eq, self.clone(), other.clone())
    }

    /// `self != other`
    #[must_use]
    pub fn not_equals(&self, other: &Self) -> Self {
        Self::binary(BinaryOp::Ne, self.clone(), other.clone())
    }

    /// `self < other`
    #[must_use]
    pub fn less_than(&self, other: &Self) -> Self {
        Self::binary(BinaryOp::Lt, self.clone(), other.clone())
    }

    /// `self <= other`
    #[must_use]
    pub fn less_eq(&self, other: &Self) -> Self {
        Self::binary(BinaryOp::Le, self.clone(), other.clone())
    }

    /// `self > other`
    #[must_use]
    pub fn greater_than(&self, other: &Self) -> Self {
        Self::binary(BinaryOp::Gt, self.clone(), other.clone())
    }

    /// `self >= other`
    #[must_use]
    pub fn greater_eq(&self, other: &Self) -> Self {
        Self::binary(BinaryOp::Ge, self.clone(), other.clone())
    }

    /// `self + other`
    #[must_use]
    pub fn plus(&self, other: &Self) -> Self {
        Self::binary(BinaryOp::Add, self.clone(), other.clone())
    }

    /// `self - other`
    #[must_use]
    pub fn minus(&self, other: &Self) -> Self {
        Self::binary(BinaryOp::Sub, self.clone(), other.clone())
    }

    /// `self * other`
    #[must_use]
    pub fn times(&self, other: &Self) -> Self {
        Self::binary(BinaryOp::Mul, self.clone(), other.clone())
    }

    /// `self && other`
    #[must_use]
    pub fn and(&self, other: &Self) -> Self {
        Self::binary(BinaryOp::And, self.clone(), other.clone())
    }

    /// `self || other`
    #[must_use]
    pub fn or(&self, other: &Self) -> Self {
        Self::binary(BinaryOp::Or, self.clone(), other.clone())
    }

    /// `!self`
    #[must_use]
    pub fn negate(&self) -> Self {
        Self::unary(UnaryOp::Not, self.clone())
    }
}

impl Display for SymValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{v}"),
            Self::Bool(v) => write!(f, "{v}"),
            Self::Symbol(name) => write!(f, "{name}"),
            Self::Unary(UnaryOp::Not, inner) => write!(f, "!{inner}"),
            Self::Unary(UnaryOp::Neg, inner) => write!(f, "-{inner}"),
            Self::Binary(op, l, r) => write!(f, "({l} {} {r})", op.symbol()),
        }
    }
}

impl From<i64> for SymValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<bool> for SymValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}
