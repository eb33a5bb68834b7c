pub mod cnf;
pub mod derivation;
pub mod eliminate_epsilon;
pub mod eliminate_unit;
pub mod eliminate_useless;
pub mod error;
pub mod grammar;
pub mod parse;
pub mod pretty_print;
pub mod symbol;
pub use grammar::Grammar;

pub const EPSILON: &str = "eps";
