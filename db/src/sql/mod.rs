pub mod statement_executor;
pub mod statement;
pub mod parser;
pub mod query_result;
pub mod expression;

pub mod token;
pub(crate) mod tokenizer;
mod plan;
mod expression_evaluator;
