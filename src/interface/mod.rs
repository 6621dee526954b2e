pub mod i2c;

#[cfg(test)]
pub mod mock_i2c_port;

/// A method of communicating with the sensor.
///
/// One call is one bus transaction. Retries are the caller's business;
/// this layer only reports whether the peripheral played along.
pub trait SensorInterface {
    /// Interface error type
    type SensorError;

    /// Send a command: an opcode byte, optionally followed by payload bytes
    fn send_command(&mut self, command: &[u8]) -> Result<(), Self::SensorError>;

    /// Read exactly `recv_buf.len()` response bytes from the sensor.
    /// Fewer bytes available is a failure, never a partial read.
    fn read_response(&mut self, recv_buf: &mut [u8]) -> Result<(), Self::SensorError>;
}

pub use self::i2c::I2cInterface;
