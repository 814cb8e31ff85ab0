//! Insertion-ordered registry of named models
//!
//! Scene code needs three things from its model storage: stable handles that
//! survive other entries coming and going, name lookup for widget/event
//! wiring, and iteration in insertion order so scene assembly stays
//! deterministic. Those are kept as explicit structures instead of leaning on
//! the iteration quirks of a single map.

use std::collections::HashMap;

use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// Stable handle to a registered model
    pub struct ModelKey;
}

/// Name-addressed, insertion-ordered model storage
#[derive(Debug)]
pub struct ModelRegistry<T> {
    models: SlotMap<ModelKey, T>,
    by_name: HashMap<String, ModelKey>,
    order: Vec<(String, ModelKey)>,
}

impl<T> Default for ModelRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ModelRegistry<T> {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            models: SlotMap::with_key(),
            by_name: HashMap::new(),
            order: Vec::new(),
        }
    }

    /// Insert a model under `name`, returning its handle
    ///
    /// Re-inserting an existing name replaces the model in place and keeps
    /// its original position in the iteration order.
    pub fn insert(&mut self, name: impl Into<String>, model: T) -> ModelKey {
        let name = name.into();

        if let Some(&key) = self.by_name.get(&name) {
            self.models[key] = model;
            return key;
        }

        let key = self.models.insert(model);
        self.by_name.insert(name.clone(), key);
        self.order.push((name, key));
        key
    }

    /// Look up a model by name
    pub fn get(&self, name: &str) -> Option<&T> {
        self.by_name.get(name).and_then(|&key| self.models.get(key))
    }

    /// Look up a model by name, mutably
    pub fn get_mut(&mut self, name: &str) -> Option<&mut T> {
        let key = *self.by_name.get(name)?;
        self.models.get_mut(key)
    }

    /// Look up a model by handle
    pub fn get_by_key(&self, key: ModelKey) -> Option<&T> {
        self.models.get(key)
    }

    /// Remove a model by name, returning it
    ///
    /// Removing an unknown name is an advisory error (logged), not a panic.
    pub fn remove(&mut self, name: &str) -> Option<T> {
        let Some(key) = self.by_name.remove(name) else {
            log::error!("ModelRegistry: cannot remove unknown model '{name}'");
            return None;
        };

        self.order.retain(|(_, k)| *k != key);
        self.models.remove(key)
    }

    /// True when `name` is registered
    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Number of registered models
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// True when nothing is registered
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Iterate models in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.order.iter().filter_map(|(_, key)| self.models.get(*key))
    }

    /// Iterate `(name, model)` pairs in insertion order
    pub fn iter_named(&self) -> impl Iterator<Item = (&str, &T)> {
        self.order
            .iter()
            .filter_map(|(name, key)| Some((name.as_str(), self.models.get(*key)?)))
    }
}
