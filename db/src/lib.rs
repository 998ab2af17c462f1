pub mod csvql;

mod sql;
mod table;
mod value;

pub use csvql::CsvQl;
pub use sql::query_result::QueryResult;
pub use sql::statement::*;
pub use sql::expression::*;
pub use sql::token::{Token, LocatedToken, TokenSpan};
pub use table::row::Row;
pub use value::*;
