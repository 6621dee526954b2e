use super::SensorInterface;
use crate::protocol::SENSOR_ADDRESS;

/// Communicates with the sensor over a two-wire bus.
///
/// The whole sensor family answers on one fixed address, so the port is
/// the only thing the caller provides.
pub struct I2cInterface<I2C> {
    /// i2c port
    i2c_port: I2C,
    /// address for i2c communications with the sensor
    address: u8,
}

impl<I2C, CommE> I2cInterface<I2C>
where
    I2C: embedded_hal::blocking::i2c::Write<Error = CommE>
        + embedded_hal::blocking::i2c::Read<Error = CommE>,
{
    pub fn new(i2c: I2C) -> Self {
        Self {
            i2c_port: i2c,
            address: SENSOR_ADDRESS,
        }
    }

    /// Give the wrapped port back
    pub fn free(self) -> I2C {
        self.i2c_port
    }

    /// Borrow the wrapped port
    pub fn port_mut(&mut self) -> &mut I2C {
        &mut self.i2c_port
    }
}

impl<I2C, CommE> SensorInterface for I2cInterface<I2C>
where
    I2C: embedded_hal::blocking::i2c::Write<Error = CommE>
        + embedded_hal::blocking::i2c::Read<Error = CommE>,
{
    type SensorError = CommE;

    fn send_command(&mut self, command: &[u8]) -> Result<(), Self::SensorError> {
        self.i2c_port.write(self.address, command)
    }

    fn read_response(&mut self, recv_buf: &mut [u8]) -> Result<(), Self::SensorError> {
        self.i2c_port.read(self.address, recv_buf)
    }
}
