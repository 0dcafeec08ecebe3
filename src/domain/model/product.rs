use super::form::ValidationError;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Product identifier. The remote API hands out numbers, the local store
/// generates strings; both forms compare equal when their text matches.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProductId {
    Number(i64),
    Text(String),
}

impl ProductId {
    /// String-normalized form used for every id comparison.
    pub fn as_key(&self) -> String {
        match self {
            ProductId::Number(n) => n.to_string(),
            ProductId::Text(s) => s.clone(),
        }
    }
}

impl PartialEq for ProductId {
    fn eq(&self, other: &Self) -> bool {
        self.as_key() == other.as_key()
    }
}

impl Eq for ProductId {}

impl Hash for ProductId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_key().hash(state);
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProductId::Number(n) => write!(f, "{}", n),
            ProductId::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for ProductId {
    fn from(n: i64) -> Self {
        ProductId::Number(n)
    }
}

impl From<&str> for ProductId {
    fn from(s: &str) -> Self {
        ProductId::Text(s.to_string())
    }
}

impl From<String> for ProductId {
    fn from(s: String) -> Self {
        ProductId::Text(s)
    }
}

/// Catalog categories offered by the product form.
///
/// Records coming back from a backend may carry any string; unknown values
/// are kept verbatim in `Other`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    #[default]
    Electronics,
    Audio,
    Wearables,
    Photography,
    Gaming,
    Computers,
    Accessories,
    Home,
    Other(String),
}

impl Category {
    /// Choices in the order the form lists them.
    pub const CHOICES: [Category; 8] = [
        Category::Electronics,
        Category::Audio,
        Category::Wearables,
        Category::Photography,
        Category::Gaming,
        Category::Computers,
        Category::Accessories,
        Category::Home,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            Category::Electronics => "Electronics",
            Category::Audio => "Audio",
            Category::Wearables => "Wearables",
            Category::Photography => "Photography",
            Category::Gaming => "Gaming",
            Category::Computers => "Computers",
            Category::Accessories => "Accessories",
            Category::Home => "Home",
            Category::Other(s) => s,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Category::Other(_))
    }
}

impl From<String> for Category {
    fn from(s: String) -> Self {
        match s.as_str() {
            "Electronics" => Category::Electronics,
            "Audio" => Category::Audio,
            "Wearables" => Category::Wearables,
            "Photography" => Category::Photography,
            "Gaming" => Category::Gaming,
            "Computers" => Category::Computers,
            "Accessories" => Category::Accessories,
            "Home" => Category::Home,
            _ => Category::Other(s),
        }
    }
}

impl From<Category> for String {
    fn from(c: Category) -> Self {
        c.as_str().to_string()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A catalog record as stored by either backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub category: Category,
    pub price: f64,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image_url: String,
    /// Raw ISO-8601 text; an unparseable value is preserved and orders as epoch zero.
    #[serde(default)]
    pub created_at: String,
}

impl Product {
    /// Builds a stored record from create input. Only the creating layer calls this.
    pub fn from_new(id: ProductId, fields: NewProduct, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            name: fields.name,
            category: fields.category,
            price: fields.price,
            description: fields.description,
            image_url: fields.image_url,
            created_at: iso_timestamp(created_at),
        }
    }

    /// Merges the fields present in `patch`; `id` and `created_at` never change.
    pub fn apply(&mut self, patch: ProductPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(price) = patch.price {
            self.price = price;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(image_url) = patch.image_url {
            self.image_url = image_url;
        }
    }

    pub fn created_instant(&self) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(&self.created_at)
            .map(|dt| dt.with_timezone(&Utc))
            .unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
    }

    /// The create input this record was (or could have been) built from.
    pub fn fields(&self) -> NewProduct {
        NewProduct {
            name: self.name.clone(),
            category: self.category.clone(),
            price: self.price,
            description: self.description.clone(),
            image_url: self.image_url.clone(),
        }
    }
}

/// Create input: every field except `id` and `createdAt`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub name: String,
    pub category: Category,
    pub price: f64,
    pub description: String,
    pub image_url: String,
}

/// Partial update. Absent fields are left untouched and are not sent over the wire.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl NewProduct {
    /// Invariants every stored record keeps, whichever layer built the input.
    pub fn check(&self) -> Result<(), ValidationError> {
        check_name(&self.name)?;
        check_price(self.price)
    }
}

impl ProductPatch {
    /// Same invariants as `NewProduct::check`, for the fields present.
    pub fn check(&self) -> Result<(), ValidationError> {
        if let Some(name) = &self.name {
            check_name(name)?;
        }
        if let Some(price) = self.price {
            check_price(price)?;
        }
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.category.is_none()
            && self.price.is_none()
            && self.description.is_none()
            && self.image_url.is_none()
    }
}

/// Stored prices are finite and strictly positive.
pub fn is_valid_price(price: f64) -> bool {
    price.is_finite() && price > 0.0
}

fn check_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        Err(ValidationError::EmptyName)
    } else {
        Ok(())
    }
}

fn check_price(price: f64) -> Result<(), ValidationError> {
    if is_valid_price(price) {
        Ok(())
    } else {
        Err(ValidationError::InvalidPrice)
    }
}

/// `createdAt` format shared by both backends (UTC, millisecond precision, `Z` suffix).
pub fn iso_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}
