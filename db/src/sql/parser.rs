pub mod parser;
pub mod expression_parser;
pub mod token_cursor;

pub use parser::Parser;
