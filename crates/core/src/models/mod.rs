mod booking;
mod rule;
mod slot;

pub use booking::{
    AdminDeleteReceipt, BookingRecord, BookingStatus, CancellationReceipt, CreateBookingRequest,
    DEFAULT_PRICE,
};
pub use rule::ScheduleRule;
pub use slot::{derive_slot_id, Slot};
