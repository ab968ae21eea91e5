//! Event processing module

mod processor;
mod selector;


pub use processor::*;
pub use selector::*;
