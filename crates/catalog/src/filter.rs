//! The filter engine: optional query parameters → a predicate over records.

use core::str::FromStr;

use rust_decimal::Decimal;

use crate::sweet::{Category, Sweet};

/// A conjunctive filter built from the raw `name`, `category`, `min_price`
/// and `max_price` query parameters.
///
/// Parsing is deliberately permissive: an unrecognized category or a price
/// bound that is not a valid decimal contributes no constraint instead of
/// failing the request. That mirrors the long-standing behavior of the
/// search endpoint; tightening it is tracked as a policy decision in
/// DESIGN.md.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SweetFilter {
    name: Option<String>,
    category: Option<Category>,
    min_price: Option<Decimal>,
    max_price: Option<Decimal>,
}

impl SweetFilter {
    /// Build a filter from raw query-parameter strings.
    pub fn from_raw(
        name: Option<&str>,
        category: Option<&str>,
        min_price: Option<&str>,
        max_price: Option<&str>,
    ) -> Self {
        Self {
            name: name.map(|n| n.to_lowercase()),
            category: category.and_then(|c| Category::from_str(c).ok()),
            min_price: min_price.and_then(parse_bound),
            max_price: max_price.and_then(parse_bound),
        }
    }

    /// True when the record satisfies every supplied constraint.
    pub fn matches(&self, sweet: &Sweet) -> bool {
        if let Some(needle) = &self.name {
            if !sweet.name.to_lowercase().contains(needle) {
                return false;
            }
        }

        if let Some(category) = self.category {
            if sweet.category != category {
                return false;
            }
        }

        let price = sweet.price.as_decimal();
        if let Some(min) = self.min_price {
            if price < min {
                return false;
            }
        }
        if let Some(max) = self.max_price {
            if price > max {
                return false;
            }
        }

        true
    }

    /// Retain matching records, preserving the input (name) order.
    pub fn apply(&self, mut records: Vec<Sweet>) -> Vec<Sweet> {
        records.retain(|sweet| self.matches(sweet));
        records
    }
}

fn parse_bound(raw: &str) -> Option<Decimal> {
    Decimal::from_str(raw.trim()).ok()
}
