pub mod cycles;
pub mod eliminate_epsilon;
pub mod eliminate_left_recursion;
pub mod grammar;
pub mod left_factoring;
pub mod parse;
pub mod pretty_print;
pub mod transform;
pub mod validate;
pub use grammar::{Grammar, Production};
pub use transform::Transformation;
