use crate::sql::token::{LocatedToken, Token, TokenSpan};
use shared::CsvqlError;
use shared::TokenPosition;

static EOF: LocatedToken = LocatedToken {
    token: Token::EOF,
    span: TokenSpan { start: 0, end: 0 },
};

//Read position over an immutable token slice. Once the EOF token is reached the cursor stays there
pub struct TokenCursor<'a> {
    tokens: &'a [LocatedToken],
    position: usize,
}

impl<'a> TokenCursor<'a> {
    pub fn create(tokens: &'a [LocatedToken]) -> TokenCursor<'a> {
        TokenCursor { tokens, position: 0 }
    }

    pub fn peek(&self) -> &'a Token {
        &self.current().token
    }

    pub fn current(&self) -> &'a LocatedToken {
        self.tokens.get(self.position)
            .or(self.tokens.last())
            .unwrap_or(&EOF)
    }

    //Returns the current token and moves to the next one
    pub fn advance(&mut self) -> &'a LocatedToken {
        let current = self.current();
        if self.position < self.tokens.len() && current.token != Token::EOF {
            self.position += 1;
        }
        current
    }

    pub fn maybe_expect(&mut self, expected: &Token) -> bool {
        if self.peek() == expected {
            self.advance();
            true
        } else {
            false
        }
    }

    pub fn expect(&mut self, expected: &Token, message: &str) -> Result<&'a LocatedToken, CsvqlError> {
        if self.peek() == expected {
            Ok(self.advance())
        } else {
            Err(self.error(message))
        }
    }

    pub fn identifier(&mut self, message: &str) -> Result<String, CsvqlError> {
        match self.peek() {
            Token::Identifier(identifier) => {
                self.advance();
                Ok(identifier.clone())
            },
            _ => Err(self.error(message))
        }
    }

    pub fn source_position(&self) -> TokenPosition {
        self.current().span.start
    }

    //Syntax error pointing at the current token
    pub fn error(&self, message: &str) -> CsvqlError {
        CsvqlError::SyntaxError(
            self.source_position(),
            format!("{}. Found {}", message, self.peek().describe())
        )
    }
}
