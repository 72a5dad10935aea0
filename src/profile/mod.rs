pub mod client;
pub mod flatten;
pub mod profile_model;
