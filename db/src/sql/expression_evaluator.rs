use crate::sql::expression::{BinaryOperator, Expression};
use crate::table::column_namespace::ColumnNamespace;
use crate::table::row::Row;
use crate::value::Value;
use shared::CsvqlError;

pub fn evaluate_where_expression(
    row: &Row,
    namespace: &ColumnNamespace,
    expression: &Expression,
) -> Result<bool, CsvqlError> {
    Ok(evaluate_where_value(row, namespace, expression)? == Value::create_boolean(true))
}

//Always 0 or 1. A bare column or literal is 0 only when it is the integer 0
pub fn evaluate_where_value(
    row: &Row,
    namespace: &ColumnNamespace,
    expression: &Expression,
) -> Result<Value, CsvqlError> {
    Ok(Value::create_boolean(evaluate_expression(row, namespace, expression)?.is_true()))
}

pub fn evaluate_expression(
    row: &Row,
    namespace: &ColumnNamespace,
    expression: &Expression,
) -> Result<Value, CsvqlError> {
    match expression {
        Expression::Literal(token) => Ok(Value::from_literal(token)
            .unwrap_or_else(|| Value::String(String::new()))),
        Expression::Identifier(field_name) => {
            let position = namespace.resolve(field_name)?;
            Ok(Value::from_cell(row.get(position)))
        },
        Expression::QualifiedIdentifier(identifier) => {
            let position = namespace.resolve_qualified(&identifier.table_name, &identifier.field_name)?;
            Ok(Value::from_cell(row.get(position)))
        },
        Expression::Binary(operator, left, right) => {
            let left = evaluate_expression(row, namespace, left)?;
            let right = evaluate_expression(row, namespace, right)?;
            Ok(Value::create_boolean(evaluate_binary_op(*operator, &left, &right)))
        },
        Expression::Between(expression, lower, upper) => {
            let value = evaluate_expression(row, namespace, expression)?;
            Ok(Value::create_boolean(evaluate_between(&value, lower, upper)))
        },
        Expression::In(expression, candidates) => {
            let value = evaluate_expression(row, namespace, expression)?.to_string();
            let found = candidates.iter()
                .filter_map(Value::from_literal)
                .any(|candidate| candidate.to_string() == value);
            Ok(Value::create_boolean(found))
        },
    }
}

//Fails with the first column reference that the namespace cannot resolve
pub fn check_column_references(
    namespace: &ColumnNamespace,
    expression: &Expression,
) -> Result<(), CsvqlError> {
    match expression {
        Expression::Literal(_) => Ok(()),
        Expression::Identifier(field_name) => namespace.resolve(field_name).map(|_| ()),
        Expression::QualifiedIdentifier(identifier) => namespace
            .resolve_qualified(&identifier.table_name, &identifier.field_name)
            .map(|_| ()),
        Expression::Binary(_, left, right) => {
            check_column_references(namespace, left)?;
            check_column_references(namespace, right)
        },
        Expression::Between(expression, lower, upper) => {
            check_column_references(namespace, expression)?;
            check_column_references(namespace, lower)?;
            check_column_references(namespace, upper)
        },
        Expression::In(expression, _) => check_column_references(namespace, expression),
    }
}

//Strings only support =. Any other operator with a string operand is false
fn evaluate_binary_op(operator: BinaryOperator, left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Integer(left), Value::Integer(right)) => match operator {
            BinaryOperator::And => *left != 0 && *right != 0,
            BinaryOperator::Or => *left != 0 || *right != 0,
            BinaryOperator::Equal => left == right,
            BinaryOperator::NotEqual => left != right,
            BinaryOperator::Greater => left > right,
            BinaryOperator::GreaterEqual => left >= right,
            BinaryOperator::Less => left < right,
            BinaryOperator::LessEqual => left <= right,
        },
        _ => operator == BinaryOperator::Equal && left.to_string() == right.to_string(),
    }
}

//Inclusive range. Bounds must be literals that hold an integer
fn evaluate_between(value: &Value, lower: &Expression, upper: &Expression) -> bool {
    let value = match value {
        Value::Integer(value) => *value,
        Value::String(_) => return false,
    };

    match (literal_integer(lower), literal_integer(upper)) {
        (Some(lower), Some(upper)) => lower <= value && value <= upper,
        _ => false,
    }
}

fn literal_integer(expression: &Expression) -> Option<i64> {
    match expression {
        Expression::Literal(token) => Value::from_literal(token)?.get_integer(),
        _ => None,
    }
}

#[cfg(test)]
mod test {
    use crate::sql::expression::Expression;
    use crate::sql::expression_evaluator::{check_column_references, evaluate_where_expression, evaluate_where_value};
    use crate::sql::parser::expression_parser::{parse_expression, ExpressionGrammar};
    use crate::sql::parser::token_cursor::TokenCursor;
    use crate::sql::tokenizer::Tokenizer;
    use crate::table::column_namespace::ColumnNamespace;
    use crate::table::row::Row;
    use crate::value::Value;
    use shared::CsvqlError;

    fn expression(query: &str) -> Expression {
        let tokens = Tokenizer::create(query).tokenize().unwrap();
        parse_expression(&mut TokenCursor::create(&tokens), ExpressionGrammar::Value, 0).unwrap()
    }

    fn employees() -> ColumnNamespace {
        let header: Vec<String> = ["id", "name", "salary", "age"].iter().map(|name| name.to_string()).collect();
        ColumnNamespace::create_for_table("employees", &header)
    }

    fn row(values: &[&str]) -> Row {
        Row::create(values.iter().map(|value| value.to_string()).collect())
    }

    fn passes(query: &str, row: &Row) -> bool {
        evaluate_where_expression(row, &employees(), &expression(query)).unwrap()
    }

    #[test]
    fn integer_comparisons() {
        let alice = row(&["1", "Alice", "60000", "31"]);

        assert!(passes("salary > 50000", &alice));
        assert!(passes("salary >= 60000", &alice));
        assert!(!passes("salary < 60000", &alice));
        assert!(passes("salary <= 60000", &alice));
        assert!(passes("age = 31", &alice));
        assert!(passes("age <> 30", &alice));
        assert!(!passes("age <> 31", &alice));
    }

    #[test]
    fn results_are_zero_or_one() {
        let alice = row(&["1", "Alice", "60000", "31"]);

        for query in ["salary > 50000", "name = 'Bob'", "age BETWEEN 1 AND 2", "name IN ('Alice')", "id = 1 OR id = 2 AND age = 3", "name", "salary", "'text'", "7"] {
            let value = evaluate_where_value(&alice, &employees(), &expression(query)).unwrap();
            assert!(value == Value::Integer(0) || value == Value::Integer(1));
        }
    }

    #[test]
    fn bare_atoms_as_predicates() {
        let alice = row(&["1", "Alice", "60000", "31"]);
        let bob = row(&["2", "Bob", "0", "29"]);

        assert_eq!(evaluate_where_value(&alice, &employees(), &expression("salary")).unwrap(), Value::Integer(1));
        assert_eq!(evaluate_where_value(&bob, &employees(), &expression("salary")).unwrap(), Value::Integer(0));
        assert_eq!(evaluate_where_value(&bob, &employees(), &expression("name")).unwrap(), Value::Integer(1));
        assert!(!passes("0", &alice));
    }

    #[test]
    fn strings_only_support_equality() {
        let alice = row(&["1", "Alice", "60000", "31"]);

        assert!(passes("name = 'Alice'", &alice));
        assert!(!passes("name = 'alice'", &alice));
        assert!(!passes("name > 'A'", &alice));
        assert!(!passes("name <> 'Bob'", &alice));
    }

    #[test]
    fn quoted_number_equals_integer_cell() {
        assert!(passes("age = '31'", &row(&["1", "Alice", "60000", "31"])));
    }

    #[test]
    fn logical_operators() {
        let bob = row(&["2", "Bob", "45000", "29"]);

        assert!(passes("age < 30 AND salary < 50000", &bob));
        assert!(!passes("age < 30 AND salary > 50000", &bob));
        assert!(passes("age > 30 OR name = 'Bob'", &bob));
    }

    #[test]
    fn between_is_inclusive() {
        let with_age = |age: &str| row(&["1", "Alice", "60000", age]);

        assert!(passes("age BETWEEN 30 AND 40", &with_age("30")));
        assert!(passes("age BETWEEN 30 AND 40", &with_age("35")));
        assert!(passes("age BETWEEN 30 AND 40", &with_age("40")));
        assert!(!passes("age BETWEEN 30 AND 40", &with_age("29")));
        assert!(!passes("age BETWEEN 30 AND 40", &with_age("41")));
        assert!(!passes("age BETWEEN 30 AND 40", &with_age("thirty")));
    }

    #[test]
    fn between_bounds_must_be_literals() {
        let alice = row(&["1", "Alice", "60000", "31"]);

        assert!(passes("age BETWEEN '30' AND '40'", &alice));
        assert!(!passes("age BETWEEN id AND 40", &alice));
    }

    #[test]
    fn in_list_membership() {
        let alice = row(&["1", "Alice", "60000", "31"]);

        assert!(passes("name IN ('Bob', 'Alice')", &alice));
        assert!(passes("age IN (30, 31)", &alice));
        assert!(!passes("name IN ('Bob', 'Carol')", &alice));
    }

    #[test]
    fn check_column_references_without_rows() {
        assert!(check_column_references(&employees(), &expression("age BETWEEN 1 AND salary OR name IN ('a')")).is_ok());
        assert!(matches!(
            check_column_references(&employees(), &expression("age > 1 AND dept = 'eng'")),
            Err(CsvqlError::UnknownColumn(name)) if name == "dept"
        ));
    }

    #[test]
    fn unknown_column() {
        let result = evaluate_where_expression(&row(&["1"]), &employees(), &expression("dept = 'eng'"));

        assert!(matches!(result, Err(CsvqlError::UnknownColumn(name)) if name == "dept"));
    }
}
