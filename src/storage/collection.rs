//! In-memory plant collection.
//!
//! The collection is the sole owner of its plants. Plants are kept in
//! insertion order, duplicates are allowed, and the only way to shrink the
//! collection is a filtered remove.

use crate::core::{Condition, Plant};
use crate::error::Result;

/// Line printed by [`PlantCollection::list`] when there is nothing to list.
pub const EMPTY_SENTINEL: &str = "No plants in the container.";

/// Ordered, owned sequence of plants.
#[derive(Debug, Clone, Default)]
pub struct PlantCollection {
    plants: Vec<Plant>,
}

impl PlantCollection {
    /// Create a new empty collection.
    pub fn new() -> Self {
        Self { plants: Vec::new() }
    }

    /// Append a plant to the end of the collection.
    pub fn add(&mut self, plant: Plant) {
        tracing::debug!(plant = %plant, "adding plant");
        self.plants.push(plant);
    }

    /// Parse `condition_text` and remove every plant it matches.
    ///
    /// Returns the number of removed plants. A malformed condition is
    /// returned as an error and the collection is left unchanged.
    pub fn remove(&mut self, condition_text: &str) -> Result<usize> {
        let condition = Condition::parse(condition_text)?;
        Ok(self.remove_where(&condition))
    }

    /// Remove every plant matching an already parsed condition.
    ///
    /// Plants of another kind are always kept, and survivors keep their
    /// relative order.
    pub fn remove_where(&mut self, condition: &Condition) -> usize {
        if condition.target().is_none() {
            tracing::debug!(condition = %condition, "nothing to remove");
            return 0;
        }
        let before = self.plants.len();
        self.plants.retain(|plant| !condition.matches(plant));
        let removed = before - self.plants.len();
        tracing::debug!(condition = %condition, removed, "removed plants");
        removed
    }

    /// Report lines for every plant in insertion order.
    ///
    /// An empty collection yields the single [`EMPTY_SENTINEL`] line.
    pub fn list(&self) -> Vec<String> {
        if self.plants.is_empty() {
            return vec![EMPTY_SENTINEL.to_string()];
        }
        self.plants.iter().map(Plant::describe).collect()
    }

    /// Iterate over the plants in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Plant> {
        self.plants.iter()
    }

    /// Get the number of plants in the collection.
    pub fn len(&self) -> usize {
        self.plants.len()
    }

    /// Check if the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.plants.is_empty()
    }
}

impl<'a> IntoIterator for &'a PlantCollection {
    type Item = &'a Plant;
    type IntoIter = std::slice::Iter<'a, Plant>;

    fn into_iter(self) -> Self::IntoIter {
        self.plants.iter()
    }
}
