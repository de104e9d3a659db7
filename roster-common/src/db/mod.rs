//! Store initialization

pub mod init;

pub use init::*;
