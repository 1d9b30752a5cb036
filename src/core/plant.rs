//! Plant record types for Herbarium.
//!
//! A plant is a name plus exactly one discriminating attribute, and the
//! attribute decides the plant's kind. Records are immutable once built:
//! fields are private and only read through accessors.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{HerbariumError, Result};

/// The closed set of plant kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlantKind {
    /// Trees, compared by age in years.
    Tree,
    /// Shrubs, compared by flowering month.
    Shrub,
    /// Cacti, compared by spine length.
    Cactus,
}

impl PlantKind {
    /// Get all kind variants.
    pub fn all() -> &'static [PlantKind] {
        &[PlantKind::Tree, PlantKind::Shrub, PlantKind::Cactus]
    }

    /// Get the display name for this kind.
    pub fn display_name(&self) -> &'static str {
        match self {
            PlantKind::Tree => "Tree",
            PlantKind::Shrub => "Shrub",
            PlantKind::Cactus => "Cactus",
        }
    }

    /// The keyword naming this kind in an ADD command.
    pub fn keyword(&self) -> &'static str {
        match self {
            PlantKind::Tree => "tree",
            PlantKind::Shrub => "shrub",
            PlantKind::Cactus => "cactus",
        }
    }

    /// The condition field that selects this kind in a REM command.
    pub fn field(&self) -> &'static str {
        match self {
            PlantKind::Tree => "age",
            PlantKind::Shrub => "month",
            PlantKind::Cactus => "spine",
        }
    }

    /// The label printed in front of the attribute value.
    pub fn attribute_label(&self) -> &'static str {
        match self {
            PlantKind::Tree => "Age",
            PlantKind::Shrub => "Flowering Month",
            PlantKind::Cactus => "Spine Length",
        }
    }

    /// Look up a kind by its ADD keyword. Matching is case-sensitive.
    pub fn from_keyword(keyword: &str) -> Option<PlantKind> {
        Self::all().iter().copied().find(|k| k.keyword() == keyword)
    }

    /// Look up a kind by its condition field.
    pub fn from_field(field: &str) -> Option<PlantKind> {
        Self::all().iter().copied().find(|k| k.field() == field)
    }
}

impl fmt::Display for PlantKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// The discriminating attribute of a plant, one variant per kind.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Attribute {
    /// Age of a tree in years.
    Tree { age: u32 },
    /// Month in which a shrub flowers. Free text.
    Shrub { flowering_month: String },
    /// Spine length of a cactus. Finite and non-negative.
    Cactus { spine_length: f64 },
}

impl Attribute {
    /// The kind this attribute belongs to.
    pub fn kind(&self) -> PlantKind {
        match self {
            Attribute::Tree { .. } => PlantKind::Tree,
            Attribute::Shrub { .. } => PlantKind::Shrub,
            Attribute::Cactus { .. } => PlantKind::Cactus,
        }
    }

    /// Render the value the way reports print it.
    ///
    /// Spine lengths always carry six fractional digits.
    pub fn render(&self) -> String {
        match self {
            Attribute::Tree { age } => age.to_string(),
            Attribute::Shrub { flowering_month } => flowering_month.clone(),
            Attribute::Cactus { spine_length } => format!("{:.6}", spine_length),
        }
    }
}

/// A single plant record.
///
/// Serialized for JSON reports only; plants are built through the
/// constructors or [`Plant::from_fields`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Plant {
    name: String,
    #[serde(flatten)]
    attribute: Attribute,
}

impl Plant {
    /// Create a tree.
    pub fn tree(name: impl Into<String>, age: u32) -> Self {
        Self {
            name: name.into(),
            attribute: Attribute::Tree { age },
        }
    }

    /// Create a shrub.
    pub fn shrub(name: impl Into<String>, flowering_month: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attribute: Attribute::Shrub {
                flowering_month: flowering_month.into(),
            },
        }
    }

    /// Create a cactus.
    pub fn cactus(name: impl Into<String>, spine_length: f64) -> Self {
        Self {
            name: name.into(),
            attribute: Attribute::Cactus { spine_length },
        }
    }

    /// Build a plant from the textual fields of an ADD command.
    ///
    /// The attribute is read from its first whitespace-separated token and
    /// parsed as the kind's type. Ages must be non-negative integers and
    /// spine lengths finite, non-negative numbers.
    pub fn from_fields(kind: PlantKind, name: &str, raw_attribute: &str) -> Result<Self> {
        let token = raw_attribute.split_whitespace().next().ok_or_else(|| {
            HerbariumError::malformed_record(format!(
                "missing {} for {}",
                kind.attribute_label().to_lowercase(),
                kind.keyword()
            ))
        })?;

        match kind {
            PlantKind::Tree => {
                let age = token.parse::<u32>().map_err(|_| {
                    HerbariumError::malformed_record(format!(
                        "age must be a non-negative whole number, got '{}'",
                        token
                    ))
                })?;
                Ok(Self::tree(name, age))
            }
            PlantKind::Shrub => Ok(Self::shrub(name, token)),
            PlantKind::Cactus => {
                let spine_length = token
                    .parse::<f64>()
                    .ok()
                    .filter(|v| v.is_finite() && *v >= 0.0);
                match spine_length {
                    Some(spine_length) => Ok(Self::cactus(name, spine_length)),
                    None => Err(HerbariumError::malformed_record(format!(
                        "spine length must be a non-negative number, got '{}'",
                        token
                    ))),
                }
            }
        }
    }

    /// The plant's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The plant's discriminating attribute.
    pub fn attribute(&self) -> &Attribute {
        &self.attribute
    }

    /// The plant's kind, fixed at construction.
    pub fn kind(&self) -> PlantKind {
        self.attribute.kind()
    }

    /// Human-readable report line: `<Kind>: <name>, <Label>: <value>`.
    pub fn describe(&self) -> String {
        let kind = self.kind();
        format!(
            "{}: {}, {}: {}",
            kind.display_name(),
            self.name,
            kind.attribute_label(),
            self.attribute.render()
        )
    }
}

impl fmt::Display for Plant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}
