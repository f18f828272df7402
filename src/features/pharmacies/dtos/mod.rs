mod pharmacy_dto;

pub use pharmacy_dto::{PharmacyResponseDto, PharmacySearchQuery};
