use crate::sql::token::{LocatedToken, Token, TokenSpan};
use shared::logger::{logger, CsvqlLayer};
use shared::CsvqlError;
use shared::CsvqlError::{IllegalToken, MalformedNumber};

//After one of these words the scanner keeps going into a second word: ORDER BY, GROUP BY, LEFT JOIN, RIGHT JOIN
const TWO_WORD_KEYWORD_PREFIXES: [&str; 4] = ["ORDER", "GROUP", "LEFT", "RIGHT"];

const OPERATOR_CHARS: [char; 4] = ['>', '<', '=', '!'];

pub struct Tokenizer {
    chars: Vec<char>,
    //This will point to the next character to scan before calling next_token()
    next: usize,
}

impl Tokenizer {
    pub fn create(
        string: &str,
    ) -> Tokenizer {
        Tokenizer { chars: string.chars().collect(), next: 0 }
    }

    //The returned tokens always end with a single Token::EOF
    pub fn tokenize(mut self) -> Result<Vec<LocatedToken>, CsvqlError> {
        let mut tokens = Vec::new();

        loop {
            let token = self.next_token()?;
            let is_eof = token.token == Token::EOF;
            tokens.push(token);
            if is_eof {
                break;
            }
        }

        logger().debug(CsvqlLayer::Lexer, &format!("Produced {} tokens", tokens.len()));

        Ok(tokens)
    }

    pub fn next_token(&mut self) -> Result<LocatedToken, CsvqlError> {
        self.skip_unknown_chars();
        let start = self.next;
        let token = self.get_token()?;

        Ok(LocatedToken {
            token,
            span: TokenSpan { start, end: self.next },
        })
    }

    fn get_token(&mut self) -> Result<Token, CsvqlError> {
        if self.end_reached() {
            return Ok(Token::EOF);
        }
        if self.is_number() {
            return self.number();
        }
        if self.current() == '\'' {
            return Ok(self.string());
        }
        if self.is_alpha() {
            return self.identifier();
        }
        if self.is_operator() {
            return Ok(self.operator());
        }

        match self.advance() {
            ',' => Ok(Token::Comma),
            '.' => Ok(Token::Dot),
            '*' => Ok(Token::Star),
            '(' => Ok(Token::OpenParen),
            ')' => Ok(Token::CloseParen),
            other => Err(IllegalToken(self.next - 1, format!("Unexpected character {}", other)))
        }
    }

    //Whitespaces and any character that cannot start a token are ignored
    fn skip_unknown_chars(&mut self) {
        while !self.end_reached() {
            let current = self.current();
            let starts_token = self.is_number() || self.is_alpha() || self.is_operator() ||
                matches!(current, '\'' | ',' | '.' | '*' | '(' | ')');
            if starts_token {
                break;
            }
            self.next += 1;
        }
    }

    //An unterminated string consumes the rest of the input
    fn string(&mut self) -> Token {
        //Get rid of the opening '
        self.advance();
        let mut string = String::new();

        while !self.end_reached() && self.current() != '\'' {
            string.push(self.advance());
        }

        if !self.end_reached() {
            //Get rid of the closing '
            self.advance();
        }

        Token::String(string)
    }

    fn identifier(&mut self) -> Result<Token, CsvqlError> {
        let mut identifier = String::new();
        let mut has_underscore = false;

        while !self.end_reached() {
            let current = self.current();
            if current == '-' {
                return Err(IllegalToken(self.next, String::from("Identifiers cannot contain '-'")));
            }
            if current == '_' {
                has_underscore = true;
            }

            if TWO_WORD_KEYWORD_PREFIXES.contains(&identifier.as_str()) {
                //Consume the separator between both words
            } else if !current.is_ascii_alphabetic() && Self::ends_identifier(current, has_underscore) {
                break;
            }

            identifier.push(self.advance());
        }

        Ok(Token::keyword(&identifier).unwrap_or(Token::Identifier(identifier)))
    }

    //Identifiers with an underscore only stop at , ) . or whitespace
    fn ends_identifier(current: char, has_underscore: bool) -> bool {
        if has_underscore {
            matches!(current, ',' | ')' | '.') || Self::is_whitespace(current)
        } else {
            !current.is_ascii_digit()
        }
    }

    fn number(&mut self) -> Result<Token, CsvqlError> {
        let start_number_index = self.next;

        while !self.end_reached() && self.is_number() {
            self.advance();
        }

        let number_string: String = self.chars[start_number_index..self.next].iter().collect();

        match number_string.parse::<i64>() {
            Ok(i64_value) => Ok(Token::Number(i64_value)),
            Err(_) => Err(MalformedNumber(start_number_index)),
        }
    }

    //Unknown combinations like != or == end up being =
    fn operator(&mut self) -> Token {
        let mut operator = String::new();

        while !self.end_reached() && self.is_operator() {
            operator.push(self.advance());
        }

        match operator.as_str() {
            ">" => Token::Greater,
            ">=" => Token::GreaterEqual,
            "<" => Token::Less,
            "<=" => Token::LessEqual,
            "<>" => Token::NotEqual,
            _ => Token::Equal,
        }
    }

    fn is_whitespace(char: char) -> bool {
        matches!(char, ' ' | '\t' | '\n' | '\r')
    }

    fn is_alpha(&self) -> bool {
        self.current().is_ascii_alphabetic()
    }

    fn is_number(&self) -> bool {
        self.current().is_ascii_digit()
    }

    fn is_operator(&self) -> bool {
        OPERATOR_CHARS.contains(&self.current())
    }

    fn advance(&mut self) -> char {
        let current = self.current();
        self.next += 1;
        current
    }

    fn current(&self) -> char {
        self.chars[self.next]
    }

    fn end_reached(&self) -> bool {
        self.next >= self.chars.len()
    }
}
