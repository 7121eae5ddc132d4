//! Generic named collection shared by every resource kind.
//!
//! Entities are kept in a `Vec` so iteration follows insertion order. Names
//! are compared case-sensitively.

use cloudsim_types::error::{Result, SimError};

/// An entity addressable by a unique name.
pub trait Named {
    /// Human-readable kind used in error messages ("instance", "ssh key", ...).
    const KIND: &'static str;

    /// The entity's unique name.
    fn name(&self) -> &str;
}

/// Insertion-ordered collection enforcing name uniqueness.
#[derive(Debug, Clone)]
pub struct Collection<T> {
    items: Vec<T>,
}

impl<T: Named> Collection<T> {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Insert an entity. Fails if the name is already taken.
    pub fn add(&mut self, item: T) -> Result<()> {
        if self.contains(item.name()) {
            return Err(SimError::DuplicateName {
                kind: T::KIND,
                name: item.name().to_string(),
            });
        }
        self.items.push(item);
        Ok(())
    }

    /// Look up an entity by exact name.
    pub fn get(&self, name: &str) -> Option<&T> {
        self.items.iter().find(|item| item.name() == name)
    }

    /// Whether an entity with this name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// All entities in insertion order.
    pub fn list(&self) -> Vec<&T> {
        self.items.iter().collect()
    }

    /// Entities matching `filter`, in insertion order.
    pub fn list_where<F>(&self, filter: F) -> Vec<&T>
    where
        F: Fn(&T) -> bool,
    {
        self.items.iter().filter(|item| filter(item)).collect()
    }

    /// Apply `mutator` to the named entity.
    ///
    /// The mutator may reject the change by returning an error; it must then
    /// leave the entity untouched.
    pub fn update<F, R>(&mut self, name: &str, mutator: F) -> Result<R>
    where
        F: FnOnce(&mut T) -> Result<R>,
    {
        let item = self
            .items
            .iter_mut()
            .find(|item| item.name() == name)
            .ok_or_else(|| not_found::<T>(name))?;
        mutator(item)
    }

    /// Remove and return the named entity.
    pub fn remove(&mut self, name: &str) -> Result<T> {
        let pos = self
            .items
            .iter()
            .position(|item| item.name() == name)
            .ok_or_else(|| not_found::<T>(name))?;
        Ok(self.items.remove(pos))
    }

    /// Iterate in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T: Named> Default for Collection<T> {
    fn default() -> Self {
        Self::new()
    }
}

fn not_found<T: Named>(name: &str) -> SimError {
    SimError::NotFound {
        kind: T::KIND,
        name: name.to_string(),
    }
}
