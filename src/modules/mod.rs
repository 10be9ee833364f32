pub mod admin;
pub mod profile;
pub mod refiner;
