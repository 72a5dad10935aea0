pub mod page_driver;
pub mod session;
