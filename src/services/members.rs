//! Member management service

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::member::{CreateMember, Member, MemberDetails, UpdateMemberEmail},
    repository::Repository,
};

#[derive(Clone)]
pub struct MembersService {
    repository: Repository,
}

impl MembersService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Get member by ID
    pub async fn get_member(&self, id: i64) -> AppResult<Member> {
        self.repository.members.get_by_id(id).await
    }

    /// Register a new member. Emails are unique (exact match).
    pub async fn add_member(&self, member: CreateMember) -> AppResult<Member> {
        member.validate()?;

        if self.repository.members.email_exists(&member.email, None).await? {
            tracing::warn!("Rejected member with duplicate email {}", member.email);
            return Err(AppError::DuplicateEmail(member.email));
        }

        let created = self.repository.members.create(&member).await?;
        tracing::info!("Added member id={}", created.member_id);
        Ok(created)
    }

    /// Change a member's email
    pub async fn update_member_email(&self, id: i64, update: UpdateMemberEmail) -> AppResult<Member> {
        update.validate()?;
        self.get_member(id).await?;

        if self.repository.members.email_exists(&update.email, Some(id)).await? {
            tracing::warn!("Rejected email change for member id={}: {} is taken", id, update.email);
            return Err(AppError::DuplicateEmail(update.email));
        }

        let updated = self.repository.members.update_email(id, &update.email).await?;
        tracing::info!("Updated email of member id={}", id);
        Ok(updated)
    }

    /// Delete a member. Refused while the member still holds books.
    pub async fn delete_member(&self, id: i64) -> AppResult<()> {
        self.repository.members.delete(id).await?;
        tracing::info!("Deleted member id={}", id);
        Ok(())
    }

    /// Member together with every borrow record and the borrowed book titles
    pub async fn member_details(&self, id: i64) -> AppResult<MemberDetails> {
        let member = self.get_member(id).await?;
        let borrows = self.repository.borrows.get_member_borrows(id).await?;
        Ok(MemberDetails { member, borrows })
    }

    /// Count members
    pub async fn count(&self) -> AppResult<i64> {
        self.repository.members.count().await
    }
}
