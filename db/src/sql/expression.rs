use crate::sql::token::Token;

#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    //Number or string literal token
    Literal(Token),
    Identifier(String),
    QualifiedIdentifier(TableIdentifier),

    Binary(BinaryOperator, Box<Expression>, Box<Expression>),
    //Expression, lower bound, upper bound. Bounds are single token atoms
    Between(Box<Expression>, Box<Expression>, Box<Expression>),
    //Expression, candidate literal tokens
    In(Box<Expression>, Vec<Token>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableIdentifier {
    pub table_name: String,
    pub field_name: String,
}

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum BinaryOperator {
    And,
    Or,
    NotEqual,
    Equal,
    Greater,
    GreaterEqual,
    Less,
    LessEqual,
}

impl Expression {
    pub fn identifier(name: &str) -> Expression {
        Expression::Identifier(name.to_string())
    }

    pub fn number(number: i64) -> Expression {
        Expression::Literal(Token::Number(number))
    }

    pub fn string(string: &str) -> Expression {
        Expression::Literal(Token::String(string.to_string()))
    }

    pub fn qualified(table_name: &str, field_name: &str) -> Expression {
        Expression::QualifiedIdentifier(TableIdentifier {
            table_name: table_name.to_string(),
            field_name: field_name.to_string(),
        })
    }

    pub fn binary(operator: BinaryOperator, left: Expression, right: Expression) -> Expression {
        Expression::Binary(operator, Box::new(left), Box::new(right))
    }
}
