//! Command set and calibration tables for the SF04 sensor generation.
//!
//! Everything protocol-shaped lives here so the sequencing logic in
//! [`crate::SF04`] carries no raw literals.

/// the i2c address used by the liquid flow sensors
pub const SENSOR_ADDRESS: u8 = 0x40;

/// soft reset
pub const CMD_SOFT_RESET: u8 = 0xFE;
/// read the 16-bit user register
pub const CMD_READ_USER_REGISTER: u8 = 0xE3;
/// enter EEPROM read mode; payload is a left-aligned 12-bit word address
pub const CMD_EEPROM_READ: u8 = 0xFA;
/// start continuous measurement
pub const CMD_START_MEASUREMENT: u8 = 0xF1;

/// bits <6:4> of the user register select the active calibration field
const USER_REG_FIELD_MASK: u16 = 0x0070;
const USER_REG_FIELD_SHIFT: u16 = 4;

/// EEPROM word addresses of the scale factor for calibration fields 0-4.
/// The unit code word sits right behind the scale factor and its CRC,
/// so one 6-byte read returns both.
pub const SCALE_FACTOR_ADDRESSES: [u16; 5] = [0x2B6, 0x5B6, 0x8B6, 0xBB6, 0xEB6];

/// Flow unit labels and the EEPROM unit codes that select them
pub const FLOW_UNITS: [(u16, &str); 5] = [
    (2115, "nl/min"),
    (2116, "ul/min"),
    (2117, "ml/min"),
    (2100, "ul/sec"),
    (2133, "ml/h"),
];

/// Index of the calibration field selected by the user register
pub fn active_field_index(user_reg: u16) -> usize {
    ((user_reg & USER_REG_FIELD_MASK) >> USER_REG_FIELD_SHIFT) as usize
}

/// Unit label for an EEPROM unit code, if the code is known
pub fn flow_unit(unit_code: u16) -> Option<&'static str> {
    FLOW_UNITS
        .iter()
        .find(|(code, _)| *code == unit_code)
        .map(|(_, label)| *label)
}

/// Encode an EEPROM word address in the left-aligned 12-bit wire format
pub fn eeprom_address_bytes(address: u16) -> [u8; 2] {
    [(address >> 4) as u8, ((address << 12) >> 8) as u8]
}

/// CRC-8 over EEPROM words: polynomial 0x31, initialization 0x00
pub fn crc8(data: &[u8]) -> u8 {
    let mut crc: u8 = 0x00;
    for byte in data {
        crc ^= byte;
        for _ in 0..8 {
            crc = if crc & 0x80 != 0 {
                (crc << 1) ^ 0x31
            } else {
                crc << 1
            };
        }
    }
    crc
}
