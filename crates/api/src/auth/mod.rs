//! Authentication primitives.

pub mod jwt;
