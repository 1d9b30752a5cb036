//! Core types and logic for Herbarium.
//!
//! Plant records, the comparison engine, the condition parser, and the
//! command grammar. Nothing here performs I/O.

pub mod command;
pub mod compare;
pub mod condition;
pub mod plant;

pub use command::Command;
pub use compare::{compare, Comparable, Operand, Operator};
pub use condition::Condition;
pub use plant::{Attribute, Plant, PlantKind};
