use std::fmt::{Debug, Display, Formatter};

//Positions are char offsets into the submitted statement, starting from 0
pub type TokenPosition = usize;

pub enum CsvqlError {
    //Parse errors
    IllegalToken(TokenPosition, String),
    MalformedNumber(TokenPosition),
    SyntaxError(TokenPosition, String),

    //Execution errors
    TableNotFound(String, String), //Table name, file path
    CannotReadTable(String, String), //Table name, reason
    UnknownColumn(String),
    AmbiguousColumn(String, Vec<String>), //Column name, tables that contain it
    UnsupportedJoinCondition(String),
    AggregateWithoutGroupBy(String),

    //Cli errors
    CannotReadOptionsFile(String, std::io::Error),
    CannotWriteOptionsFile(String, std::io::Error),
    CannotDecodeOptionsFile(String, serde_json::Error),
    CannotReadVariables(String, std::io::Error),
    CannotDecodeVariables(String, serde_json::Error),
    CannotWriteVariables(String, std::io::Error),
    CannotListTables(String, std::io::Error),
    CannotExport(String, String), //File path, reason
    BaseDirectoryNotFound(String),
}

impl CsvqlError {
    pub fn is_parse_error(&self) -> bool {
        matches!(self,
            CsvqlError::IllegalToken(_, _) |
            CsvqlError::MalformedNumber(_) |
            CsvqlError::SyntaxError(_, _)
        )
    }

    pub fn position(&self) -> Option<TokenPosition> {
        match self {
            CsvqlError::IllegalToken(position, _) |
            CsvqlError::MalformedNumber(position) |
            CsvqlError::SyntaxError(position, _) => Some(*position),
            _ => None
        }
    }
}

impl Display for CsvqlError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            CsvqlError::IllegalToken(position, message) => {
                write!(f, "Syntax error at position {}: {}", position, message)
            }
            CsvqlError::MalformedNumber(position) => {
                write!(f, "Syntax error at position {}: number is out of range", position)
            }
            CsvqlError::SyntaxError(position, message) => {
                write!(f, "Syntax error at position {}: {}", position, message)
            }
            CsvqlError::TableNotFound(table_name, path) => {
                write!(f, "Table not found: {}. File: {}", table_name, path)
            }
            CsvqlError::CannotReadTable(table_name, reason) => {
                write!(f, "Cannot read table {}. Error: {}", table_name, reason)
            }
            CsvqlError::UnknownColumn(column_name) => {
                write!(f, "Unknown column \"{}\"", column_name)
            }
            CsvqlError::AmbiguousColumn(column_name, tables) => {
                write!(f, "Column reference \"{}\" is ambiguous. It exists in tables: {}", column_name, tables.join(", "))
            }
            CsvqlError::UnsupportedJoinCondition(message) => {
                write!(f, "Unsupported join condition: {}", message)
            }
            CsvqlError::AggregateWithoutGroupBy(column_name) => {
                write!(f, "Aggregate column {} requires a GROUP BY clause", column_name)
            }
            CsvqlError::CannotReadOptionsFile(path, io_error) => {
                write!(f, "Cannot read options file {}. IO Error: {}", path, io_error)
            }
            CsvqlError::CannotWriteOptionsFile(path, io_error) => {
                write!(f, "Cannot write options file {}. IO Error: {}", path, io_error)
            }
            CsvqlError::CannotDecodeOptionsFile(path, json_error) => {
                write!(f, "Cannot decode options file {}. Error: {}", path, json_error)
            }
            CsvqlError::CannotReadVariables(path, io_error) => {
                write!(f, "Cannot read variables file {}. IO Error: {}", path, io_error)
            }
            CsvqlError::CannotDecodeVariables(path, json_error) => {
                write!(f, "Cannot decode variables file {}. Error: {}", path, json_error)
            }
            CsvqlError::CannotWriteVariables(path, io_error) => {
                write!(f, "Cannot write variables file {}. IO Error: {}", path, io_error)
            }
            CsvqlError::CannotListTables(path, io_error) => {
                write!(f, "Cannot list tables in {}. IO Error: {}", path, io_error)
            }
            CsvqlError::CannotExport(path, reason) => {
                write!(f, "Cannot export result to {}. {}", path, reason)
            }
            CsvqlError::BaseDirectoryNotFound(path) => {
                write!(f, "Directory not found: {}", path)
            }
        }
    }
}

impl Debug for CsvqlError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(self, f)
    }
}

impl std::error::Error for CsvqlError {}

#[cfg(test)]
mod test {
    use crate::CsvqlError;

    #[test]
    fn ambiguous_column_names_tables() {
        let error = CsvqlError::AmbiguousColumn(
            String::from("dept_id"),
            vec![String::from("employees"), String::from("department")]
        );

        assert_eq!(
            error.to_string(),
            "Column reference \"dept_id\" is ambiguous. It exists in tables: employees, department"
        );
        assert!(!error.is_parse_error());
        assert_eq!(error.position(), None);
    }

    #[test]
    fn syntax_error_keeps_position() {
        let error = CsvqlError::SyntaxError(7, String::from("Expected FROM"));

        assert!(error.is_parse_error());
        assert_eq!(error.position(), Some(7));
        assert_eq!(error.to_string(), "Syntax error at position 7: Expected FROM");
    }
}
