//! Profile management domain

pub mod ports;
pub mod service;
pub mod store;

pub use ports::*;
pub use service::*;
pub use store::*;
