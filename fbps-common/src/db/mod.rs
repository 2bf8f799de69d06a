//! Database bootstrap, reference catalogs and migrations

pub mod catalog_seed;
pub mod init;
pub mod migrations;

pub use init::*;
pub use migrations::*;
