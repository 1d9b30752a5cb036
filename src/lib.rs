//! Herbarium - in-memory plant register
//!
//! Herbarium keeps a collection of trees, shrubs and cacti and edits it
//! through a small line-oriented command language. Removal is driven by a
//! single-field condition such as `age > 3`, `month = June` or
//! `spine <= 2.5`, which is dispatched to the matching plant kind and
//! applied across the whole collection.

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod storage;
pub mod util;

pub use cli::{CommandOutput, DispatchOptions, Dispatcher, Session, SessionSummary};
pub use config::Config;
pub use crate::core::{Attribute, Command, Condition, Operand, Operator, Plant, PlantKind};
pub use error::{HerbariumError, Result};
pub use storage::PlantCollection;
