mod csvql_options;
mod csvql_error;

pub mod logger;

pub use csvql_options::*;
pub use csvql_error::*;
