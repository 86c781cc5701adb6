use serde::{Deserialize, Serialize};

use sweetshop_catalog::visibility::availability_visible;
use sweetshop_catalog::{Audience, Category, Sweet};
use sweetshop_core::{Price, SweetId};

// -------------------------
// Request DTOs
// -------------------------

/// Raw search parameters; all optional, parsed permissively by the filter
/// engine (see `sweetshop-catalog`).
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    pub name: Option<String>,
    pub category: Option<String>,
    pub min_price: Option<String>,
    pub max_price: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

// -------------------------
// Response DTOs
// -------------------------

/// A sweet as served to a given audience.
///
/// `is_available` is populated for staff and omitted (not null) for
/// customers; the policy decision itself lives in the catalog crate.
#[derive(Debug, Serialize)]
pub struct SweetResponse {
    pub id: SweetId,
    pub name: String,
    pub category: Category,
    pub price: Price,
    pub quantity: i64,
    pub stock_level: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_available: Option<bool>,
}

impl SweetResponse {
    pub fn for_audience(sweet: Sweet, audience: Audience) -> Self {
        Self {
            id: sweet.id,
            name: sweet.name,
            category: sweet.category,
            price: sweet.price,
            quantity: sweet.quantity,
            stock_level: sweet.stock_level,
            is_available: availability_visible(audience).then_some(sweet.is_available),
        }
    }

    pub fn list_for_audience(records: Vec<Sweet>, audience: Audience) -> Vec<Self> {
        records
            .into_iter()
            .map(|sweet| Self::for_audience(sweet, audience))
            .collect()
    }
}

#[derive(Debug, Serialize)]
pub struct RegisteredResponse {
    pub username: String,
    pub email: String,
}

#[derive(Debug, Serialize)]
pub struct TokenPairResponse {
    pub access: String,
    pub refresh: String,
}
