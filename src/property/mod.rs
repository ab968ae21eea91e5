//! Life state and typed attribute keys

mod allocation;
mod key;
mod state;

#[cfg(test)]
mod property_tests;

pub use allocation::*;
pub use key::*;
pub use state::*;
