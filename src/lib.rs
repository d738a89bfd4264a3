// ./src/lib.rs
pub mod math;
pub mod physics;
pub mod setup;
pub mod visualization;
