use sweetshop_catalog::Audience;
use sweetshop_core::UserId;

/// Authenticated requester for the current request.
///
/// Inserted by the bearer middleware; present on every protected route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequesterContext {
    user_id: UserId,
    username: String,
    staff: bool,
}

impl RequesterContext {
    pub fn new(user_id: UserId, username: String, staff: bool) -> Self {
        Self { user_id, username, staff }
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn is_staff(&self) -> bool {
        self.staff
    }

    pub fn audience(&self) -> Audience {
        Audience::from_staff_flag(self.staff)
    }
}
