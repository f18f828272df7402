pub mod admin;
pub mod imports;
pub mod pharmacies;
pub mod sync;
