pub mod database;
pub mod pagination;
pub mod token;
pub mod validation;
