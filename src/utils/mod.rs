pub mod jwt;
pub mod random;
pub mod tracing;
