//! Talent processing module

mod exclusion;
mod processor;


pub use exclusion::*;
pub use processor::*;
