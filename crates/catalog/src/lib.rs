//! `sweetshop-catalog` — the sweet inventory domain.
//!
//! Pure domain logic only: the record model, write-path validation, the
//! query-parameter filter engine, the role-based visibility policy, and the
//! reporting/export helpers. Persistence and HTTP live elsewhere.

pub mod filter;
pub mod report;
pub mod sweet;
pub mod visibility;

pub use filter::SweetFilter;
pub use report::{StockBreakdown, export_csv};
pub use sweet::{Category, Sweet, SweetDraft, ValidSweet};
pub use visibility::Audience;
