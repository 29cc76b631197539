//! Arena of named step results

use crate::error::{Error, Result};
use std::any::{type_name, Any};
use std::collections::HashMap;

/// Results of the steps that completed so far, by step name
#[derive(Default)]
pub struct Outputs {
    values: HashMap<String, Box<dyn Any + Send + Sync>>,
    order: Vec<String>,
}

impl Outputs {
    /// Create an empty arena
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&mut self, step: impl Into<String>, value: Box<dyn Any + Send + Sync>) {
        let step = step.into();
        if self.values.insert(step.clone(), value).is_none() {
            self.order.push(step);
        }
    }

    /// Borrow the result of `step`
    pub fn get<T: Any>(&self, step: &str) -> Result<&T> {
        let value = self
            .values
            .get(step)
            .ok_or_else(|| Error::missing_output(step))?;
        value
            .downcast_ref::<T>()
            .ok_or_else(|| unexpected_type::<T>(step))
    }

    /// Move the result of `step` out of the arena
    pub fn take<T: Any>(&mut self, step: &str) -> Result<T> {
        let value = self
            .values
            .remove(step)
            .ok_or_else(|| Error::missing_output(step))?;
        match value.downcast::<T>() {
            Ok(value) => {
                self.order.retain(|name| name != step);
                Ok(*value)
            }
            Err(original) => {
                self.values.insert(step.to_string(), original);
                Err(unexpected_type::<T>(step))
            }
        }
    }

    /// Check if `step` recorded a result
    pub fn contains(&self, step: &str) -> bool {
        self.values.contains_key(step)
    }

    /// Number of recorded results
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if no result is recorded
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Step names in completion order
    pub fn steps(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }
}

impl std::fmt::Debug for Outputs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Outputs")
            .field("steps", &self.order)
            .finish_non_exhaustive()
    }
}

fn unexpected_type<T>(step: &str) -> Error {
    Error::validation(step, format!("output is not a {}", type_name::<T>()))
}
