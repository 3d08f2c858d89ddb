//! Goals module - domain models, services, and the progress engine.

mod goals_model;
mod goals_progress;
mod goals_repository;
mod goals_service;
mod goals_traits;

pub use goals_model::{Goal, GoalStatus, NewGoal};
pub use goals_progress::{category_progress_percent, GoalProgressEngine};
pub use goals_repository::LedgerGoalRepository;
pub use goals_service::GoalService;
pub use goals_traits::{GoalProgressEngineTrait, GoalRepositoryTrait, GoalServiceTrait};
