//! Record storage for Herbarium.
//!
//! Records live only for the lifetime of a session; the collection is the
//! single owner of every plant.

pub mod collection;

pub use collection::{PlantCollection, EMPTY_SENTINEL};
