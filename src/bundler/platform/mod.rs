//! Package format implementations.

pub mod nipkg;
