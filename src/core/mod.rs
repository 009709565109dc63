//! Infrastructure: backend clients and shared helpers.

pub mod client;
pub mod util;
