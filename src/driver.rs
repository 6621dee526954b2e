use core::fmt;

use embedded_hal::blocking::delay::DelayMs;

use crate::debug_println;
use crate::interface::SensorInterface;
use crate::protocol;
use crate::Error;

/// delay between startup attempts
const STARTUP_RETRY_DELAY_MS: u16 = 1000;
/// time the device needs to finish a soft reset
const RESET_SETTLE_MS: u16 = 50;

/// Calibration retrieved from the sensor's EEPROM at startup.
/// Immutable for the rest of the session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Calibration {
    /// divisor applied to raw measurements
    pub scale_factor: u16,
    /// unit code as stored in the calibration field
    pub unit_code: u16,
    /// resolved unit label; stays `None` until a known unit code is seen
    pub unit: Option<&'static str>,
}

/// One converted measurement
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlowReading {
    /// flow rate in the calibrated unit
    pub flow: f32,
    /// unit label, if the session has one
    pub unit: Option<&'static str>,
}

impl fmt::Display for FlowReading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.unit {
            Some(unit) => write!(f, "{:.2} {}", self.flow, unit),
            None => write!(f, "{:.2}", self.flow),
        }
    }
}

/// Raw counts to flow rate in the calibrated unit
pub fn convert(raw: i16, scale_factor: u16) -> f32 {
    f32::from(raw) / f32::from(scale_factor)
}

pub struct SF04<SI> {
    pub(crate) sensor_interface: SI,
    calibration: Option<Calibration>,
    validate_crc: bool,
}

impl<SI> SF04<SI> {
    pub fn new_with_interface(sensor_interface: SI) -> Self {
        Self {
            sensor_interface,
            calibration: None,
            validate_crc: false,
        }
    }

    /// Check the CRC bytes of EEPROM reads against the Sensirion CRC-8.
    /// The stock firmware reads them without checking, which stays the
    /// default here.
    pub fn with_crc_validation(mut self) -> Self {
        self.validate_crc = true;
        self
    }

    /// Session calibration, once startup has completed
    pub fn calibration(&self) -> Option<&Calibration> {
        self.calibration.as_ref()
    }
}

impl<SI, SE> SF04<SI>
where
    SI: SensorInterface<SensorError = SE>,
{
    /// Run the startup sequence until it succeeds, waiting 1000 ms between
    /// attempts. The sensor cannot usefully run without valid calibration,
    /// so there is no attempt bound.
    pub fn startup(&mut self, delay: &mut impl DelayMs<u16>) {
        loop {
            match self.try_startup(delay) {
                Ok(()) => break,
                Err(_) => {
                    debug_println!("sensor startup failed, retrying...");
                    delay.delay_ms(STARTUP_RETRY_DELAY_MS);
                }
            }
        }
    }

    /// One pass of the startup sequence: soft reset, user register read,
    /// calibration field retrieval, switch to continuous measurement mode.
    /// Any failed transaction aborts the pass.
    pub fn try_startup(&mut self, delay: &mut impl DelayMs<u16>) -> Result<(), Error<SE>> {
        self.soft_reset(delay)?;

        let user_reg = self.read_user_register()?;
        let field_index = protocol::active_field_index(user_reg);
        let (scale_factor, unit_code) = self.read_calibration_field(field_index)?;

        let unit = match self.resolve_unit(unit_code) {
            Ok(label) => Some(label),
            Err(_) => {
                debug_println!("no matching unit code: {}", unit_code);
                // keep whatever label an earlier startup resolved
                self.calibration.and_then(|cal| cal.unit)
            }
        };

        self.calibration = Some(Calibration {
            scale_factor,
            unit_code,
            unit,
        });
        debug_println!("scale factor: {}", scale_factor);
        debug_println!("unit: {:?}, code: {}", unit, unit_code);

        self.start_measurement()?;
        Ok(())
    }

    /// Send the soft reset opcode and give the device time to come back up
    pub fn soft_reset(&mut self, delay: &mut impl DelayMs<u16>) -> Result<(), Error<SE>> {
        self.send_command(&[protocol::CMD_SOFT_RESET])?;
        delay.delay_ms(RESET_SETTLE_MS);
        Ok(())
    }

    /// Read the 16-bit user register
    pub fn read_user_register(&mut self) -> Result<u16, Error<SE>> {
        self.send_command(&[protocol::CMD_READ_USER_REGISTER])?;
        let mut buf = [0u8; 2];
        self.read_response(&mut buf)?;
        Ok(u16::from_be_bytes(buf))
    }

    /// Read the scale factor and unit code of one calibration field.
    /// The two CRC bytes in the response are checked only when CRC
    /// validation was enabled.
    pub fn read_calibration_field(&mut self, field_index: usize) -> Result<(u16, u16), Error<SE>> {
        let address = *protocol::SCALE_FACTOR_ADDRESSES
            .get(field_index)
            .ok_or(Error::InvalidCalibrationField(field_index as u8))?;
        let addr_bytes = protocol::eeprom_address_bytes(address);
        self.send_command(&[protocol::CMD_EEPROM_READ, addr_bytes[0], addr_bytes[1]])?;

        // scale factor word, CRC, unit code word, CRC
        let mut buf = [0u8; 6];
        self.read_response(&mut buf)?;
        if self.validate_crc
            && (protocol::crc8(&buf[0..2]) != buf[2] || protocol::crc8(&buf[3..5]) != buf[5])
        {
            return Err(Error::CrcMismatch);
        }

        let scale_factor = u16::from_be_bytes([buf[0], buf[1]]);
        let unit_code = u16::from_be_bytes([buf[3], buf[4]]);
        Ok((scale_factor, unit_code))
    }

    /// Switch the device to continuous measurement mode
    pub fn start_measurement(&mut self) -> Result<(), Error<SE>> {
        self.send_command(&[protocol::CMD_START_MEASUREMENT])
    }

    /// Unit label for an EEPROM unit code
    pub fn resolve_unit(&self, unit_code: u16) -> Result<&'static str, Error<SE>> {
        protocol::flow_unit(unit_code).ok_or(Error::UnmappedUnitCode(unit_code))
    }

    /// Read one raw signed measurement.
    /// Only the two value bytes are requested; the CRC byte the sensor
    /// would send next is deliberately left on the device.
    pub fn read_raw(&mut self) -> Result<i16, Error<SE>> {
        let mut buf = [0u8; 2];
        self.read_response(&mut buf)?;
        Ok(i16::from_be_bytes(buf))
    }

    /// Read one measurement and convert it with the session calibration.
    /// A failure here spoils this cycle only; the caller keeps polling.
    pub fn read_flow(&mut self) -> Result<FlowReading, Error<SE>> {
        let cal = self.calibration.ok_or(Error::NotCalibrated)?;
        let raw = self.read_raw()?;
        Ok(FlowReading {
            flow: convert(raw, cal.scale_factor),
            unit: cal.unit,
        })
    }

    fn send_command(&mut self, command: &[u8]) -> Result<(), Error<SE>> {
        self.sensor_interface
            .send_command(command)
            .map_err(Error::Comm)
    }

    fn read_response(&mut self, buf: &mut [u8]) -> Result<(), Error<SE>> {
        self.sensor_interface
            .read_response(buf)
            .map_err(Error::Comm)
    }
}
