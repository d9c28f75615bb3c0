//! Hospital domain: rooms, staff, patients and the disease table

pub mod diseases;
pub mod patients;
pub mod rooms;
pub mod staff;
