use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::validation::{finite, not_blank};

/// Delivery zone. `locations` is a comma-separated list, kept as typed.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct ZoneInput {
    #[validate(custom(function = "not_blank", message = "Name is required"))]
    pub name: String,

    #[validate(
        custom(function = "finite", message = "cost must be a number"),
        range(min = 0.0, message = "cost must not be negative")
    )]
    pub cost: f64,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub category: String,

    #[serde(default)]
    pub locations: String,
}

impl ZoneInput {
    pub fn new(name: impl Into<String>, cost: f64) -> Self {
        Self {
            name: name.into(),
            cost,
            ..Default::default()
        }
    }

    pub fn with_locations(mut self, locations: impl Into<String>) -> Self {
        self.locations = locations.into();
        self
    }

    /// `locations` split on commas, blanks dropped.
    pub fn location_list(&self) -> Vec<&str> {
        self.locations
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect()
    }
}
