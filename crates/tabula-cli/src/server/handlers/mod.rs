//! API request handlers.

mod analysis;
mod charts;
mod health;
mod models;
mod rows;

pub use analysis::*;
pub use charts::*;
pub use health::*;
pub use models::*;
pub use rows::*;
