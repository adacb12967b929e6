//! Business logic services

pub mod catalog;
pub mod loans;
pub mod members;

use crate::repository::Repository;

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub members: members::MembersService,
    pub catalog: catalog::CatalogService,
    pub loans: loans::LoansService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository) -> Self {
        Self {
            members: members::MembersService::new(repository.clone()),
            catalog: catalog::CatalogService::new(repository.clone()),
            loans: loans::LoansService::new(repository),
        }
    }
}
