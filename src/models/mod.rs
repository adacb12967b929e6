//! Data models for Librarian

pub mod book;
pub mod borrow;
pub mod member;

// Re-export commonly used types
pub use book::{Book, CreateBook};
pub use borrow::{BorrowDetail, BorrowRecord, BorrowStatus};
pub use member::{CreateMember, Member, MemberDetails, UpdateMemberEmail};
