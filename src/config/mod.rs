pub mod args;
pub mod credentials;
pub mod settings;
