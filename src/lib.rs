pub mod generator;
pub mod session;
pub mod sort_core;
