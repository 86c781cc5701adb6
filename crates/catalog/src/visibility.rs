//! Role-based visibility policy.
//!
//! Pure functions from (audience, record) to visibility so the contract is
//! testable without any HTTP or storage in the picture.

use crate::sweet::Sweet;

/// Who a response is being prepared for.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Audience {
    /// Staff/admin account: full record and field visibility.
    Staff,
    /// Regular authenticated account: available records only, no
    /// availability flag in responses.
    Customer,
}

impl Audience {
    pub fn from_staff_flag(is_staff: bool) -> Self {
        if is_staff { Audience::Staff } else { Audience::Customer }
    }

    pub fn is_staff(&self) -> bool {
        matches!(self, Audience::Staff)
    }
}

/// Record visibility: staff see everything, customers only available records.
pub fn record_visible(audience: Audience, sweet: &Sweet) -> bool {
    match audience {
        Audience::Staff => true,
        Audience::Customer => sweet.is_available,
    }
}

/// Field visibility for `is_available`: present for staff, omitted entirely
/// for customers.
pub fn availability_visible(audience: Audience) -> bool {
    audience.is_staff()
}

/// Filter a record set down to what the audience may see, preserving order.
pub fn visible_records(audience: Audience, mut records: Vec<Sweet>) -> Vec<Sweet> {
    records.retain(|sweet| record_visible(audience, sweet));
    records
}
