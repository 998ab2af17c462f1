pub mod full_scan_step;
pub mod join_step;
pub mod filter_step;
pub mod aggregation_step;
pub mod sort_step;
pub mod limit_step;
pub mod project_selection_step;
