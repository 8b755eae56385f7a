pub mod action;
pub mod engine;
pub mod result;
pub mod risk;
pub mod serialization;
