pub mod planner;
pub mod plan_step;

mod steps;
