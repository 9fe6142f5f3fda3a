use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::validation::{finite, not_blank};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductCategory {
    Bar,
    Liquid,
    Butter,
}

impl ProductCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductCategory::Bar => "bar",
            ProductCategory::Liquid => "liquid",
            ProductCategory::Butter => "butter",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "bar" => Some(ProductCategory::Bar),
            "liquid" => Some(ProductCategory::Liquid),
            "butter" => Some(ProductCategory::Butter),
            _ => None,
        }
    }
}

fn known_category(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() || ProductCategory::parse(value).is_some() {
        return Ok(());
    }
    Err(ValidationError::new("category"))
}

/// Product form. Free-text fields default to `""` so the stored document
/// always carries every key.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct ProductInput {
    #[validate(custom(function = "not_blank", message = "Name is required"))]
    pub name: String,

    #[validate(
        custom(function = "finite", message = "price must be a number"),
        range(min = 0.0, message = "price must not be negative")
    )]
    pub price: f64,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    #[validate(custom(
        function = "known_category",
        message = "category must be one of bar, liquid, butter"
    ))]
    pub category: String,

    #[serde(default)]
    pub benefits: String,

    #[serde(default)]
    pub ingredients: String,

    #[serde(default)]
    pub size: String,

    #[serde(default)]
    pub stock: String,

    /// Current image URL as the edit form last saw it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl ProductInput {
    pub fn new(name: impl Into<String>, price: f64) -> Self {
        Self {
            name: name.into(),
            price,
            ..Default::default()
        }
    }

    pub fn with_category(mut self, category: ProductCategory) -> Self {
        self.category = category.as_str().to_string();
        self
    }

    pub fn with_stock(mut self, stock: impl Into<String>) -> Self {
        self.stock = stock.into();
        self
    }

    pub fn with_image(mut self, reference: impl Into<String>) -> Self {
        self.image = Some(reference.into());
        self
    }
}
