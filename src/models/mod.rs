// Module exports for models

pub mod calendar_type;
pub mod event;
pub mod segment;
pub mod settings;
