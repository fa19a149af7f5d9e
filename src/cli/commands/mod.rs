//! Command execution functions.

mod build;
mod init;

pub use build::execute as build;
pub use init::execute as init;
