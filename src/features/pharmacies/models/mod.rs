mod pharmacy;
mod schedule;

pub use pharmacy::{NewPharmacy, Pharmacy, PharmacyKey};
pub use schedule::{NewSchedule, ScheduleKey};

/// One validated sheet row: a pharmacy together with the validity window it
/// is on duty for. The repository's replace operation consumes an ordered
/// sequence of these.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportEntry {
    pub pharmacy: NewPharmacy,
    pub schedule: NewSchedule,
}
