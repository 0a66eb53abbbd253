pub mod layouts;
pub mod settlement;
pub mod structure;
