pub mod create_model;
pub mod dispatch;
pub mod find;
