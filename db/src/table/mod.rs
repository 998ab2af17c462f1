pub mod row;
pub mod column_namespace;
pub mod table_scanner;
