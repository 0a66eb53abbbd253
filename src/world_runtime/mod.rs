pub mod session;
pub mod streaming;
