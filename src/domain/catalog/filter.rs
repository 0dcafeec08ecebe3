//! Filter/sort pipeline: full collection + filter state -> ordered visible subset.

use crate::domain::model::Product;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Inclusive price bounds. The default range accepts every non-negative price.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
}

impl Default for PriceRange {
    fn default() -> Self {
        Self {
            min: 0.0,
            max: f64::INFINITY,
        }
    }
}

impl PriceRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Builds a range from the raw min/max inputs. Blank or non-numeric
    /// input leaves that bound open (`0` for min, `+inf` for max).
    pub fn from_inputs(min: &str, max: &str) -> Self {
        let defaults = Self::default();
        Self {
            min: parse_bound(min).unwrap_or(defaults.min),
            max: parse_bound(max).unwrap_or(defaults.max),
        }
    }

    pub fn contains(&self, price: f64) -> bool {
        price >= self.min && price <= self.max
    }
}

fn parse_bound(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| !v.is_nan())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortField {
    Name,
    Price,
    Date,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortDirection {
    Asc,
    Desc,
}

/// Compound sort key written as `field-direction`, e.g. `price-desc`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SortOption {
    pub field: SortField,
    pub direction: SortDirection,
}

impl SortOption {
    pub const fn new(field: SortField, direction: SortDirection) -> Self {
        Self { field, direction }
    }

    /// Options in the order the sort selector lists them.
    pub const CHOICES: [SortOption; 6] = [
        SortOption::new(SortField::Name, SortDirection::Asc),
        SortOption::new(SortField::Name, SortDirection::Desc),
        SortOption::new(SortField::Price, SortDirection::Asc),
        SortOption::new(SortField::Price, SortDirection::Desc),
        SortOption::new(SortField::Date, SortDirection::Desc),
        SortOption::new(SortField::Date, SortDirection::Asc),
    ];

    fn compare(&self, a: &Product, b: &Product) -> Ordering {
        let ord = match self.field {
            SortField::Name => compare_names(&a.name, &b.name),
            SortField::Price => a.price.total_cmp(&b.price),
            SortField::Date => a
                .created_instant()
                .timestamp_millis()
                .cmp(&b.created_instant().timestamp_millis()),
        };
        match self.direction {
            SortDirection::Asc => ord,
            SortDirection::Desc => ord.reverse(),
        }
    }
}

impl Default for SortOption {
    fn default() -> Self {
        Self::new(SortField::Name, SortDirection::Asc)
    }
}

impl fmt::Display for SortOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let field = match self.field {
            SortField::Name => "name",
            SortField::Price => "price",
            SortField::Date => "date",
        };
        let direction = match self.direction {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        };
        write!(f, "{}-{}", field, direction)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown sort option '{0}' (expected name|price|date followed by -asc or -desc)")]
pub struct ParseSortOptionError(pub String);

impl FromStr for SortOption {
    type Err = ParseSortOptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseSortOptionError(s.to_string());
        let (field, direction) = s.trim().split_once('-').ok_or_else(err)?;
        let field = match field {
            "name" => SortField::Name,
            "price" => SortField::Price,
            "date" => SortField::Date,
            _ => return Err(err()),
        };
        let direction = match direction {
            "asc" => SortDirection::Asc,
            "desc" => SortDirection::Desc,
            _ => return Err(err()),
        };
        Ok(Self::new(field, direction))
    }
}

/// The three independent inputs the view feeds into the pipeline.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterState {
    pub search: String,
    pub price_range: PriceRange,
    pub sort: SortOption,
}

/// Case-insensitive substring match on the product name. An empty term matches everything.
pub fn matches_search(name: &str, term: &str) -> bool {
    name.to_lowercase().contains(&term.to_lowercase())
}

/// Applies search and price filters, then a stable sort. The input is not modified.
pub fn filter_and_sort(products: &[Product], filter: &FilterState) -> Vec<Product> {
    let mut visible: Vec<Product> = products
        .iter()
        .filter(|p| matches_search(&p.name, &filter.search) && filter.price_range.contains(p.price))
        .cloned()
        .collect();
    // `sort_by` is stable: equal keys keep their input order.
    visible.sort_by(|a, b| filter.sort.compare(a, b));
    visible
}

/// Locale-style name ordering: base characters first (accents and case ignored),
/// then accents, then case with lowercase ahead of uppercase.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    primary_key(a)
        .cmp(&primary_key(b))
        .then_with(|| a.to_lowercase().cmp(&b.to_lowercase()))
        .then_with(|| case_key(a).cmp(&case_key(b)))
}

/// Accent-stripped, lowercased characters. Punctuation and spaces rank ahead
/// of letters and digits, as collation tables order them.
fn primary_key(s: &str) -> Vec<(bool, char)> {
    s.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .map(|c| (c.is_alphanumeric(), c))
        .collect()
}

fn case_key(s: &str) -> Vec<bool> {
    s.chars().map(char::is_uppercase).collect()
}
