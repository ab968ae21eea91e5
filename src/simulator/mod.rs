//! Life simulation module

mod handler;
mod life;


pub use handler::*;
pub use life::*;
