//! Condition parsing and evaluation module
//!
//! This module handles parsing condition strings like "CHR>5 & TLT?[1001]"
//! and evaluating them against a LifeState.

mod ast;
mod evaluator;
pub mod parser;
mod predicate;


pub use ast::*;
pub use evaluator::*;
pub use parser::parse;
pub use predicate::*;
