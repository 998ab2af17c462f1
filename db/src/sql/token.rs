use shared::TokenPosition;

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    //Literals
    Identifier(String),
    Number(i64),
    String(String),

    //Keywords
    Select,
    As,
    From,
    Where,
    And,
    Or,
    Between,
    In,
    Limit,
    OrderBy,
    GroupBy,
    Asc,
    Desc,
    Join,
    LeftJoin,
    RightJoin,
    On,

    //Aggregate functions
    Sum,
    Count,
    Average,
    Max,
    Min,

    //Operators
    Equal,
    NotEqual,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,

    //Punctuation
    Comma,
    Dot,
    Star,
    OpenParen,
    CloseParen,

    EOF,
}

//[start, end) char offsets of the token in the statement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenSpan {
    pub start: TokenPosition,
    pub end: TokenPosition,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LocatedToken {
    pub token: Token,
    pub span: TokenSpan,
}

impl Token {
    pub fn keyword(text: &str) -> Option<Token> {
        match text {
            "SELECT" => Some(Token::Select),
            "AS" => Some(Token::As),
            "FROM" => Some(Token::From),
            "WHERE" => Some(Token::Where),
            "AND" => Some(Token::And),
            "OR" => Some(Token::Or),
            "BETWEEN" => Some(Token::Between),
            "IN" => Some(Token::In),
            "LIMIT" => Some(Token::Limit),
            "ORDER BY" => Some(Token::OrderBy),
            "GROUP BY" => Some(Token::GroupBy),
            "ASC" => Some(Token::Asc),
            "DESC" => Some(Token::Desc),
            "JOIN" => Some(Token::Join),
            "LEFT JOIN" => Some(Token::LeftJoin),
            "RIGHT JOIN" => Some(Token::RightJoin),
            "ON" => Some(Token::On),
            "SUM" => Some(Token::Sum),
            "COUNT" => Some(Token::Count),
            "AVG" => Some(Token::Average),
            "MAX" => Some(Token::Max),
            "MIN" => Some(Token::Min),
            _ => None,
        }
    }

    pub fn is_aggregate_function(&self) -> bool {
        matches!(self, Token::Sum | Token::Count | Token::Average | Token::Max | Token::Min)
    }

    pub fn is_join(&self) -> bool {
        matches!(self, Token::Join | Token::LeftJoin | Token::RightJoin)
    }

    pub fn is_literal(&self) -> bool {
        matches!(self, Token::Number(_) | Token::String(_))
    }

    //Text used in diagnostics
    pub fn describe(&self) -> String {
        match self {
            Token::Identifier(identifier) => format!("identifier {}", identifier),
            Token::Number(number) => format!("number {}", number),
            Token::String(string) => format!("string '{}'", string),
            Token::OrderBy => String::from("ORDER BY"),
            Token::GroupBy => String::from("GROUP BY"),
            Token::LeftJoin => String::from("LEFT JOIN"),
            Token::RightJoin => String::from("RIGHT JOIN"),
            Token::Average => String::from("AVG"),
            Token::Equal => String::from("="),
            Token::NotEqual => String::from("<>"),
            Token::Less => String::from("<"),
            Token::LessEqual => String::from("<="),
            Token::Greater => String::from(">"),
            Token::GreaterEqual => String::from(">="),
            Token::Comma => String::from(","),
            Token::Dot => String::from("."),
            Token::Star => String::from("*"),
            Token::OpenParen => String::from("("),
            Token::CloseParen => String::from(")"),
            Token::EOF => String::from("end of input"),
            other => format!("{:?}", other).to_uppercase(),
        }
    }
}
