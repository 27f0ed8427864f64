pub mod completed;
pub mod risk;
