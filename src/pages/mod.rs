pub mod browser;
pub mod detail;
pub mod not_found;
