//! Reporting helpers for the admin surface and the CSV export.

use thiserror::Error;

use crate::sweet::Sweet;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("csv serialization failed: {0}")]
    Csv(#[from] csv::Error),
}

/// Availability partitions used by the stock management portal.
///
/// Input order (ascending by name) is preserved within each partition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StockBreakdown {
    pub available: Vec<Sweet>,
    pub unavailable: Vec<Sweet>,
}

impl StockBreakdown {
    pub fn partition(records: Vec<Sweet>) -> Self {
        let (available, unavailable) = records.into_iter().partition(|s| s.is_available);
        Self { available, unavailable }
    }

    pub fn available_count(&self) -> usize {
        self.available.len()
    }

    pub fn unavailable_count(&self) -> usize {
        self.unavailable.len()
    }

    pub fn total_count(&self) -> usize {
        self.available.len() + self.unavailable.len()
    }
}

/// Serialize every record (availability notwithstanding) as CSV.
///
/// Columns are exactly `name,category,price,quantity`; neither
/// `is_available` nor `stock_level` is exported. Prices render with two
/// fractional digits.
pub fn export_csv(records: &[Sweet]) -> Result<Vec<u8>, ReportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    writer.write_record(["name", "category", "price", "quantity"])?;
    for sweet in records {
        writer.write_record([
            sweet.name.as_str(),
            sweet.category.as_str(),
            &sweet.price.to_string(),
            &sweet.quantity.to_string(),
        ])?;
    }

    writer
        .into_inner()
        .map_err(|e| ReportError::Csv(e.into_error().into()))
}
