/*
LICENSE: See LICENSE file
*/

#![cfg_attr(not(test), no_std)]

//! Platform-agnostic driver for the Sensirion SF04 generation of liquid
//! flow sensors (LG16 / SLG family), built on `embedded-hal` traits.
//!
//! The sensors store factory calibration in on-chip EEPROM: five
//! calibration fields, each holding a scale factor and a unit code. The
//! driver runs the bring-up sequence (soft reset, user register read,
//! calibration field retrieval, switch to continuous measurement mode)
//! and converts the raw signed readings to a flow rate in the unit the
//! device was calibrated with.

pub mod interface;
mod macros;
pub mod protocol;

mod driver;

pub use crate::driver::{convert, Calibration, FlowReading, SF04};

/// All possible errors in this crate
#[derive(Debug, PartialEq)]
pub enum Error<E> {
    /// Bus transaction failed: write not acknowledged, or fewer response
    /// bytes available than requested
    Comm(E),

    /// Unit code read from the calibration field is not in the unit table
    UnmappedUnitCode(u16),

    /// User register selected a calibration field the EEPROM does not have
    InvalidCalibrationField(u8),

    /// A calibration word did not match its CRC byte
    /// (only reported when CRC validation is enabled)
    CrcMismatch,

    /// Measurement requested before calibration was retrieved
    NotCalibrated,
}
