use crate::sql::token::Token;
use std::cmp::Ordering;
use std::fmt::{Display, Formatter};

//Cells are untyped. A cell is an Integer if its whole text parses as i64, otherwise it is a String
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Integer(i64),
    String(String),
}

impl Value {
    pub fn from_cell(cell: &str) -> Value {
        match cell.parse::<i64>() {
            Ok(integer) => Value::Integer(integer),
            Err(_) => Value::String(cell.to_string()),
        }
    }

    //Only number and string literals carry a value
    pub fn from_literal(token: &Token) -> Option<Value> {
        match token {
            Token::Number(number) => Some(Value::Integer(*number)),
            Token::String(string) => Some(Value::String(string.clone())),
            _ => None,
        }
    }

    pub fn create_boolean(value: bool) -> Value {
        Value::Integer(if value { 1 } else { 0 })
    }

    //Only Integer(0) is false
    pub fn is_true(&self) -> bool {
        !matches!(self, Value::Integer(0))
    }

    pub fn get_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(integer) => Some(*integer),
            Value::String(string) => string.parse::<i64>().ok(),
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Integer(integer) => write!(f, "{}", integer),
            Value::String(string) => write!(f, "{}", string),
        }
    }
}

//Integer comparison when both sides parse as i64, lexicographic otherwise.
//Used by MAX, MIN and ORDER BY
pub fn compare_cells(a: &str, b: &str) -> Ordering {
    match (a.parse::<i64>(), b.parse::<i64>()) {
        (Ok(a), Ok(b)) => a.cmp(&b),
        _ => a.cmp(b),
    }
}
