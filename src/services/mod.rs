// Service module exports

pub mod layout;
pub mod settings;
pub mod store;
