mod booking;
mod schedule;

pub use booking::PgBookingStore;
pub use schedule::PgRuleStore;
