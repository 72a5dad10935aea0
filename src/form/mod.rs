pub mod classifier;
pub mod form_model;
pub mod scanner;
