//! Users module - profile model and repository.

mod users_model;
mod users_repository;
mod users_traits;

pub use users_model::UserProfile;
pub use users_repository::LedgerUserProfileRepository;
pub use users_traits::UserProfileRepositoryTrait;
