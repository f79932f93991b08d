//! Command implementations.

pub mod completions;
pub mod init;
pub mod net;
pub mod run;
pub mod status;
pub mod sync;
pub mod version;
