pub mod evaluator;
pub mod ranking;
