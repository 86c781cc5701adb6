//! The sweet inventory record and its write-path validation.

use core::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use sweetshop_core::{Price, SweetId, ValidationErrors};

/// Sweet category enumeration. Wire codes are the stored values
/// (`CHOCOLATE`, `GUMMY`, `HARD_CANDY`, `OTHER`).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    Chocolate,
    Gummy,
    HardCandy,
    Other,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Chocolate,
        Category::Gummy,
        Category::HardCandy,
        Category::Other,
    ];

    /// Stored/wire code.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Chocolate => "CHOCOLATE",
            Category::Gummy => "GUMMY",
            Category::HardCandy => "HARD_CANDY",
            Category::Other => "OTHER",
        }
    }

    /// Human-readable label, for the admin pages.
    pub fn label(&self) -> &'static str {
        match self {
            Category::Chocolate => "Chocolate",
            Category::Gummy => "Gummy",
            Category::HardCandy => "Hard Candy",
            Category::Other => "Other",
        }
    }
}

impl core::fmt::Display for Category {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CHOCOLATE" => Ok(Category::Chocolate),
            "GUMMY" => Ok(Category::Gummy),
            "HARD_CANDY" => Ok(Category::HardCandy),
            "OTHER" => Ok(Category::Other),
            _ => Err(()),
        }
    }
}

/// A stored inventory record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sweet {
    pub id: SweetId,
    pub name: String,
    pub category: Category,
    pub price: Price,
    pub quantity: i64,
    pub stock_level: i64,
    pub is_available: bool,
}

/// Raw write payload for create/replace, exactly as posted.
///
/// Every field is optional at the wire level; [`SweetDraft::validate`] turns
/// missing/invalid fields into per-field messages instead of a
/// deserialization failure. The numeric fields arrive as raw JSON values
/// (number or string) for the same reason: a malformed `price` must surface
/// as a `price` message, not a body-level parse error. Fields with model
/// defaults (`quantity`, `stock_level`, `is_available`) are not required.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SweetDraft {
    pub name: Option<String>,
    pub category: Option<String>,
    pub price: Option<serde_json::Value>,
    pub quantity: Option<serde_json::Value>,
    pub stock_level: Option<i64>,
    pub is_available: Option<bool>,
}

/// Field values that passed validation, ready to persist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidSweet {
    pub name: String,
    pub category: Category,
    pub price: Price,
    pub quantity: i64,
    pub stock_level: i64,
    pub is_available: bool,
}

impl SweetDraft {
    /// Validate the draft.
    ///
    /// Invariants enforced here: `name` required and non-blank, `category` a
    /// known choice, `price` a non-negative 2dp decimal, `quantity >= 0`.
    /// A missing or null `is_available` is coerced to `false`; it is never
    /// stored as null.
    pub fn validate(self) -> Result<ValidSweet, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let name = match self.name.map(|n| n.trim().to_string()) {
            Some(name) if !name.is_empty() => name,
            Some(_) => {
                errors.push("name", "This field may not be blank.");
                String::new()
            }
            None => {
                errors.push("name", "This field is required.");
                String::new()
            }
        };

        let category = match self.category.as_deref() {
            Some(raw) => match raw.parse::<Category>() {
                Ok(category) => Some(category),
                Err(()) => {
                    errors.push("category", format!("\"{raw}\" is not a valid choice."));
                    None
                }
            },
            None => {
                errors.push("category", "This field is required.");
                None
            }
        };

        let price = match self.price {
            Some(raw) => match parse_decimal(&raw) {
                Some(amount) => match Price::new(amount) {
                    Ok(price) => Some(price),
                    Err(_) => {
                        errors.push("price", "Ensure this value is greater than or equal to 0.");
                        None
                    }
                },
                None => {
                    errors.push("price", "A valid number is required.");
                    None
                }
            },
            None => {
                errors.push("price", "This field is required.");
                None
            }
        };

        let quantity = match self.quantity {
            Some(raw) => match parse_integer(&raw) {
                Some(quantity) => {
                    if quantity < 0 {
                        errors
                            .push("quantity", "Ensure this value is greater than or equal to 0.");
                    }
                    quantity
                }
                None => {
                    errors.push("quantity", "A valid integer is required.");
                    0
                }
            },
            None => 0,
        };

        match (category, price) {
            (Some(category), Some(price)) if errors.is_empty() => Ok(ValidSweet {
                name,
                category,
                price,
                quantity,
                stock_level: self.stock_level.unwrap_or(0),
                is_available: self.is_available.unwrap_or(false),
            }),
            _ => Err(errors),
        }
    }
}

fn parse_decimal(raw: &serde_json::Value) -> Option<Decimal> {
    match raw {
        serde_json::Value::Number(n) => Decimal::from_str(&n.to_string()).ok(),
        serde_json::Value::String(s) => Decimal::from_str(s.trim()).ok(),
        _ => None,
    }
}

fn parse_integer(raw: &serde_json::Value) -> Option<i64> {
    match raw {
        serde_json::Value::Number(n) => n.as_i64(),
        serde_json::Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
