pub use rusb;
pub mod commands;
pub mod controller;
pub mod devices;
pub mod error;

pub const VID_SONY: u16 = 0x054c;
pub const PID_SIXAXIS: u16 = 0x0268;

pub const USB_CLASS_HID: u8 = 0x03;
