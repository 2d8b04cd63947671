//! Province names and their boundary files.

pub mod boundary;
pub mod province;
