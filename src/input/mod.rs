//! Input module
//! Loads employee, job and project records and writes employees back

pub mod store;

pub use store::DataStore;
