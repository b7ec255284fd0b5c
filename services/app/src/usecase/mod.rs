pub mod account;
pub mod task;
pub mod tip;
pub mod token;
