pub mod action;
pub mod query;
pub mod select;
pub mod status;
