//! Relational comparison of plant attributes.
//!
//! Every comparison fails closed: an unsupported operator, an unrecognized
//! operator token, or an operand whose type does not match the attribute
//! evaluates to `false` instead of raising an error.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::plant::{Attribute, Plant};

/// The five relational operators of the condition language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    /// `=`
    Eq,
    /// `<`
    Lt,
    /// `>`
    Gt,
    /// `<=`
    Le,
    /// `>=`
    Ge,
}

impl Operator {
    /// Get all operator variants.
    pub fn all() -> &'static [Operator] {
        &[
            Operator::Eq,
            Operator::Lt,
            Operator::Gt,
            Operator::Le,
            Operator::Ge,
        ]
    }

    /// The token spelling this operator.
    pub fn symbol(&self) -> &'static str {
        match self {
            Operator::Eq => "=",
            Operator::Lt => "<",
            Operator::Gt => ">",
            Operator::Le => "<=",
            Operator::Ge => ">=",
        }
    }

    /// Look up an operator by its token.
    pub fn from_symbol(token: &str) -> Option<Operator> {
        Self::all().iter().copied().find(|op| op.symbol() == token)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Values that can sit on either side of an [`Operator`].
pub trait Comparable {
    /// Apply `op` with `self` on the left and `rhs` on the right.
    fn satisfies(&self, op: Operator, rhs: &Self) -> bool;
}

macro_rules! ordered_comparable {
    ($($ty:ty),*) => {
        $(
            impl Comparable for $ty {
                fn satisfies(&self, op: Operator, rhs: &Self) -> bool {
                    match op {
                        Operator::Eq => self == rhs,
                        Operator::Lt => self < rhs,
                        Operator::Gt => self > rhs,
                        Operator::Le => self <= rhs,
                        Operator::Ge => self >= rhs,
                    }
                }
            }
        )*
    };
}

// Floats use exact equality, no epsilon.
ordered_comparable!(i64, f64);

impl Comparable for str {
    fn satisfies(&self, op: Operator, rhs: &Self) -> bool {
        match op {
            Operator::Eq => self == rhs,
            // Strings only support equality.
            _ => false,
        }
    }
}

/// Apply an optional operator. `None` stands for an unrecognized token.
pub fn apply<T: Comparable + ?Sized>(lhs: &T, op: Option<Operator>, rhs: &T) -> bool {
    match op {
        Some(op) => lhs.satisfies(op, rhs),
        None => false,
    }
}

/// The right-hand side of a condition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Operand {
    Int(i64),
    Float(f64),
    Text(String),
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Int(v) => write!(f, "{}", v),
            Operand::Float(v) => write!(f, "{}", v),
            Operand::Text(v) => f.write_str(v),
        }
    }
}

/// Compare a plant's attribute against an operand.
///
/// Only same-typed pairs are compared: tree ages against integers, shrub
/// months against text, cactus spines against floats. Any other pairing
/// is `false`.
pub fn compare(plant: &Plant, op: Option<Operator>, operand: &Operand) -> bool {
    match (plant.attribute(), operand) {
        (Attribute::Tree { age }, Operand::Int(rhs)) => apply(&i64::from(*age), op, rhs),
        (Attribute::Shrub { flowering_month }, Operand::Text(rhs)) => {
            apply(flowering_month.as_str(), op, rhs.as_str())
        }
        (Attribute::Cactus { spine_length }, Operand::Float(rhs)) => {
            apply(spine_length, op, rhs)
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operator_symbols_round_trip() {
        for op in Operator::all() {
            assert_eq!(Operator::from_symbol(op.symbol()), Some(*op));
        }
        assert_eq!(Operator::from_symbol("=="), None);
        assert_eq!(Operator::from_symbol("!="), None);
        assert_eq!(Operator::from_symbol("=<"), None);
    }

    #[test]
    fn test_integer_operators() {
        assert!(5i64.satisfies(Operator::Eq, &5));
        assert!(4i64.satisfies(Operator::Lt, &5));
        assert!(6i64.satisfies(Operator::Gt, &5));
        assert!(5i64.satisfies(Operator::Le, &5));
        assert!(5i64.satisfies(Operator::Ge, &5));
        assert!(!5i64.satisfies(Operator::Gt, &5));
        assert!(!5i64.satisfies(Operator::Lt, &5));
    }

    #[test]
    fn test_float_equality_is_exact() {
        assert!(2.5f64.satisfies(Operator::Eq, &2.5));
        assert!(2.5f64.satisfies(Operator::Le, &2.5));
        assert!(!2.5000001f64.satisfies(Operator::Le, &2.5));
        assert!(!(0.1f64 + 0.2).satisfies(Operator::Eq, &0.3));
    }

    #[test]
    fn test_string_supports_equality_only() {
        assert!("May".satisfies(Operator::Eq, "May"));
        assert!(!"May".satisfies(Operator::Eq, "may"));
        for op in [Operator::Lt, Operator::Gt, Operator::Le, Operator::Ge] {
            assert!(!"May".satisfies(op, "June"));
            assert!(!"May".satisfies(op, "May"));
        }
    }

    #[test]
    fn test_unrecognized_operator_is_false() {
        assert!(!apply(&5i64, None, &5));
        assert!(!apply(&1.0f64, None, &1.0));
        assert!(!apply("May", None, "May"));
    }

    #[test]
    fn test_compare_matching_types() {
        let oak = Plant::tree("Oak", 5);
        assert!(compare(&oak, Some(Operator::Ge), &Operand::Int(5)));
        assert!(!compare(&oak, Some(Operator::Gt), &Operand::Int(5)));

        let rose = Plant::shrub("Rose", "May");
        assert!(compare(&rose, Some(Operator::Eq), &Operand::Text("May".into())));
        assert!(!compare(&rose, Some(Operator::Gt), &Operand::Text("April".into())));

        let saguaro = Plant::cactus("Saguaro", 2.5);
        assert!(compare(&saguaro, Some(Operator::Le), &Operand::Float(2.5)));
    }

    #[test]
    fn test_compare_mismatched_types_is_false() {
        let oak = Plant::tree("Oak", 5);
        assert!(!compare(&oak, Some(Operator::Eq), &Operand::Float(5.0)));
        assert!(!compare(&oak, Some(Operator::Eq), &Operand::Text("5".into())));

        let saguaro = Plant::cactus("Saguaro", 2.0);
        assert!(!compare(&saguaro, Some(Operator::Eq), &Operand::Int(2)));

        let rose = Plant::shrub("Rose", "5");
        assert!(!compare(&rose, Some(Operator::Eq), &Operand::Int(5)));
    }

    #[test]
    fn test_compare_negative_operand_against_age() {
        let sapling = Plant::tree("Sapling", 0);
        assert!(compare(&sapling, Some(Operator::Gt), &Operand::Int(-1)));
    }
}
