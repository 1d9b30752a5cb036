//! Condition parsing for REM.
//!
//! A condition is `<field> <op> <value>`: the field selects the plant kind,
//! the value is parsed as that kind's attribute type, and the operator is
//! kept even when it is not one of the five known tokens so that the
//! comparison can fail closed.

use serde::Serialize;
use std::fmt;

use crate::core::compare::{self, Operand, Operator};
use crate::core::plant::{Plant, PlantKind};
use crate::error::{HerbariumError, Result};

/// A parsed single-field condition.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Condition {
    /// Compare one kind's attribute against an operand.
    Compare {
        target: PlantKind,
        /// `None` when the operator token is not recognized.
        operator: Option<Operator>,
        /// The raw operator token, kept for diagnostics.
        operator_token: String,
        operand: Operand,
    },
    /// A condition on an unknown field. Matches nothing.
    NoOp { field: String },
}

impl Condition {
    /// Parse a condition from text.
    ///
    /// Unknown fields yield [`Condition::NoOp`]. Missing parts, trailing
    /// tokens, and values that do not parse as the field's type are
    /// `MalformedCondition` errors.
    pub fn parse(text: &str) -> Result<Self> {
        let mut tokens = text.split_whitespace();

        let field = tokens
            .next()
            .ok_or_else(|| HerbariumError::malformed_condition("empty condition"))?;

        let Some(target) = PlantKind::from_field(field) else {
            tracing::debug!(field, "condition on unknown field matches nothing");
            return Ok(Condition::NoOp {
                field: field.to_string(),
            });
        };

        let operator_token = tokens.next().ok_or_else(|| {
            HerbariumError::malformed_condition(format!("missing operator after '{}'", field))
        })?;
        let value = tokens.next().ok_or_else(|| {
            HerbariumError::malformed_condition(format!(
                "missing value after '{} {}'",
                field, operator_token
            ))
        })?;
        if let Some(extra) = tokens.next() {
            return Err(HerbariumError::malformed_condition(format!(
                "unexpected token '{}' after value",
                extra
            )));
        }

        let operand = parse_operand(target, value)?;
        let operator = Operator::from_symbol(operator_token);
        if operator.is_none() {
            tracing::debug!(
                operator = operator_token,
                "unrecognized operator, condition matches nothing"
            );
        }

        Ok(Condition::Compare {
            target,
            operator,
            operator_token: operator_token.to_string(),
            operand,
        })
    }

    /// The kind this condition applies to, or `None` for an unknown field.
    pub fn target(&self) -> Option<PlantKind> {
        match self {
            Condition::Compare { target, .. } => Some(*target),
            Condition::NoOp { .. } => None,
        }
    }

    /// Check whether a plant satisfies this condition.
    ///
    /// Plants of a different kind never match.
    pub fn matches(&self, plant: &Plant) -> bool {
        match self {
            Condition::Compare {
                target,
                operator,
                operand,
                ..
            } => plant.kind() == *target && compare::compare(plant, *operator, operand),
            Condition::NoOp { .. } => false,
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Condition::Compare {
                target,
                operator_token,
                operand,
                ..
            } => write!(f, "{} {} {}", target.field(), operator_token, operand),
            Condition::NoOp { field } => write!(f, "{} (unknown field)", field),
        }
    }
}

fn parse_operand(target: PlantKind, value: &str) -> Result<Operand> {
    match target {
        PlantKind::Tree => value.parse::<i64>().map(Operand::Int).map_err(|_| {
            HerbariumError::malformed_condition(format!(
                "age value must be a whole number, got '{}'",
                value
            ))
        }),
        PlantKind::Shrub => Ok(Operand::Text(value.to_string())),
        PlantKind::Cactus => value
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .map(Operand::Float)
            .ok_or_else(|| {
                HerbariumError::malformed_condition(format!(
                    "spine value must be a finite number, got '{}'",
                    value
                ))
            }),
    }
}
