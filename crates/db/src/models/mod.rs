pub mod cost_result;
pub mod event;
pub mod lost_potential;
pub mod quiz;
pub mod quiz_run;
pub mod user;
