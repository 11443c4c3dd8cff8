pub mod cost_result_repo;
pub mod event_repo;
pub mod lost_potential_repo;
pub mod quiz_repo;
pub mod quiz_run_repo;
pub mod user_repo;

pub use cost_result_repo::CostResultRepo;
pub use event_repo::EventRepo;
pub use lost_potential_repo::LostPotentialRepo;
pub use quiz_repo::QuizRepo;
pub use quiz_run_repo::QuizRunRepo;
pub use user_repo::UserRepo;
