use crate::sql::expression::{BinaryOperator, Expression, TableIdentifier};
use crate::sql::parser::token_cursor::TokenCursor;
use crate::sql::token::Token;
use shared::CsvqlError;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ExpressionGrammar {
    //WHERE clauses. Atoms are numbers, strings and column names
    Value,
    //ON clauses. Atoms are table.field references and literals
    JoinCondition,
}

#[derive(Clone, Copy)]
enum InfixKind {
    Binary(BinaryOperator),
    Between,
    In,
}

struct InfixOperator {
    token: Token,
    binding_power: u16,
    kind: InfixKind,
}

static VALUE_OPERATORS: [InfixOperator; 10] = [
    InfixOperator { token: Token::Or, binding_power: 100, kind: InfixKind::Binary(BinaryOperator::Or) },
    InfixOperator { token: Token::And, binding_power: 200, kind: InfixKind::Binary(BinaryOperator::And) },
    InfixOperator { token: Token::Between, binding_power: 400, kind: InfixKind::Between },
    InfixOperator { token: Token::In, binding_power: 400, kind: InfixKind::In },
    InfixOperator { token: Token::Greater, binding_power: 500, kind: InfixKind::Binary(BinaryOperator::Greater) },
    InfixOperator { token: Token::GreaterEqual, binding_power: 500, kind: InfixKind::Binary(BinaryOperator::GreaterEqual) },
    InfixOperator { token: Token::Less, binding_power: 500, kind: InfixKind::Binary(BinaryOperator::Less) },
    InfixOperator { token: Token::LessEqual, binding_power: 500, kind: InfixKind::Binary(BinaryOperator::LessEqual) },
    InfixOperator { token: Token::Equal, binding_power: 500, kind: InfixKind::Binary(BinaryOperator::Equal) },
    InfixOperator { token: Token::NotEqual, binding_power: 500, kind: InfixKind::Binary(BinaryOperator::NotEqual) },
];

static JOIN_CONDITION_OPERATORS: [InfixOperator; 8] = [
    InfixOperator { token: Token::Or, binding_power: 100, kind: InfixKind::Binary(BinaryOperator::Or) },
    InfixOperator { token: Token::And, binding_power: 200, kind: InfixKind::Binary(BinaryOperator::And) },
    InfixOperator { token: Token::Greater, binding_power: 500, kind: InfixKind::Binary(BinaryOperator::Greater) },
    InfixOperator { token: Token::GreaterEqual, binding_power: 500, kind: InfixKind::Binary(BinaryOperator::GreaterEqual) },
    InfixOperator { token: Token::Less, binding_power: 500, kind: InfixKind::Binary(BinaryOperator::Less) },
    InfixOperator { token: Token::LessEqual, binding_power: 500, kind: InfixKind::Binary(BinaryOperator::LessEqual) },
    InfixOperator { token: Token::Equal, binding_power: 500, kind: InfixKind::Binary(BinaryOperator::Equal) },
    InfixOperator { token: Token::NotEqual, binding_power: 500, kind: InfixKind::Binary(BinaryOperator::NotEqual) },
];

impl ExpressionGrammar {
    fn infix_operator(&self, token: &Token) -> Option<&'static InfixOperator> {
        let operators: &'static [InfixOperator] = match self {
            ExpressionGrammar::Value => &VALUE_OPERATORS,
            ExpressionGrammar::JoinCondition => &JOIN_CONDITION_OPERATORS,
        };

        operators.iter().find(|operator| operator.token == *token)
    }
}

//Precedence climbing. Stops at the first token that is not an infix operator binding tighter than min_binding_power.
//There is no grouping with parentheses
pub fn parse_expression(
    cursor: &mut TokenCursor,
    grammar: ExpressionGrammar,
    min_binding_power: u16,
) -> Result<Expression, CsvqlError> {
    let mut expression = parse_atom(cursor, grammar)?;

    while let Some(operator) = grammar.infix_operator(cursor.peek()) {
        if operator.binding_power <= min_binding_power {
            break;
        }

        cursor.advance();

        expression = match operator.kind {
            InfixKind::Binary(binary_operator) => {
                let right = parse_expression(cursor, grammar, operator.binding_power)?;
                Expression::binary(binary_operator, expression, right)
            },
            InfixKind::Between => parse_between(cursor, expression)?,
            InfixKind::In => parse_in(cursor, expression)?,
        };
    }

    Ok(expression)
}

fn parse_atom(cursor: &mut TokenCursor, grammar: ExpressionGrammar) -> Result<Expression, CsvqlError> {
    match (grammar, cursor.peek()) {
        (_, Token::Number(_)) | (_, Token::String(_)) => {
            Ok(Expression::Literal(cursor.advance().token.clone()))
        },
        (ExpressionGrammar::Value, Token::Identifier(identifier)) => {
            cursor.advance();
            Ok(Expression::Identifier(identifier.clone()))
        },
        (ExpressionGrammar::JoinCondition, Token::Identifier(_)) => {
            parse_table_identifier(cursor)
        },
        (ExpressionGrammar::Value, _) => Err(cursor.error("Expected a number, a string or a column name")),
        (ExpressionGrammar::JoinCondition, _) => Err(cursor.error("Expected a column reference like table.field")),
    }
}

fn parse_table_identifier(cursor: &mut TokenCursor) -> Result<Expression, CsvqlError> {
    let table_name = cursor.identifier("Expected table name")?;
    cursor.expect(&Token::Dot, "Malformed qualified column. Expected '.' between table and field")?;
    let field_name = cursor.identifier("Malformed qualified column. Expected field name after '.'")?;

    Ok(Expression::QualifiedIdentifier(TableIdentifier { table_name, field_name }))
}

//Bounds are the single tokens around AND. AND itself is skipped, not parsed as an operator
fn parse_between(cursor: &mut TokenCursor, expression: Expression) -> Result<Expression, CsvqlError> {
    let lower = parse_between_bound(cursor)?;
    cursor.expect(&Token::And, "Unterminated BETWEEN. Expected AND between both bounds")?;
    let upper = parse_between_bound(cursor)?;

    Ok(Expression::Between(Box::new(expression), Box::new(lower), Box::new(upper)))
}

fn parse_between_bound(cursor: &mut TokenCursor) -> Result<Expression, CsvqlError> {
    match cursor.peek() {
        Token::Number(_) | Token::String(_) => Ok(Expression::Literal(cursor.advance().token.clone())),
        Token::Identifier(identifier) => {
            cursor.advance();
            Ok(Expression::Identifier(identifier.clone()))
        },
        _ => Err(cursor.error("Unterminated BETWEEN. Expected a bound"))
    }
}

fn parse_in(cursor: &mut TokenCursor, expression: Expression) -> Result<Expression, CsvqlError> {
    cursor.expect(&Token::OpenParen, "Malformed IN list. Expected (")?;
    let mut candidates = Vec::new();

    loop {
        if !cursor.peek().is_literal() {
            return Err(cursor.error("Malformed IN list. Only number and string literals are allowed"));
        }
        candidates.push(cursor.advance().token.clone());

        if cursor.maybe_expect(&Token::CloseParen) {
            break;
        }
        cursor.expect(&Token::Comma, "Unterminated IN list. Expected , or )")?;
    }

    Ok(Expression::In(Box::new(expression), candidates))
}
