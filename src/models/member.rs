//! Member model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use super::borrow::BorrowDetail;

/// Member model from database
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Member {
    pub member_id: i64,
    pub name: String,
    /// Unique across members, compared exactly (case-sensitive)
    pub email: String,
    pub created_at: DateTime<Utc>,
}

/// Create member request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateMember {
    #[validate(length(min = 1, message = "Name must not be empty"))]
    pub name: String,
    #[validate(length(min = 1, message = "Email must not be empty"))]
    pub email: String,
}

/// Change email request
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateMemberEmail {
    #[validate(length(min = 1, message = "Email must not be empty"))]
    pub email: String,
}

/// A member together with their whole borrow history
#[derive(Debug, Clone, Serialize)]
pub struct MemberDetails {
    pub member: Member,
    pub borrows: Vec<BorrowDetail>,
}

impl MemberDetails {
    /// Number of books the member currently holds
    pub fn open_borrows(&self) -> usize {
        self.borrows.iter().filter(|b| b.status.is_open()).count()
    }
}
