extern crate std;

use std::collections::VecDeque;

use embedded_hal::blocking::i2c::{Read, Write};

const MAX_FAKE_PACKET_SIZE: usize = 8;

/// One canned bus transaction
pub struct FakePacket {
    pub addr: u8,
    pub len: usize,
    pub buf: [u8; MAX_FAKE_PACKET_SIZE],
}

impl FakePacket {
    pub fn new_from_slice(addr: u8, slice: &[u8]) -> Self {
        let src_len = slice.len();
        let mut inst = Self {
            addr,
            len: src_len,
            buf: [0; MAX_FAKE_PACKET_SIZE],
        };
        inst.buf[..src_len].copy_from_slice(slice);
        inst
    }

    pub fn bytes(&self) -> &[u8] {
        &self.buf[..self.len]
    }
}

/// Fake two-wire port: replays canned responses, records every write,
/// and can inject write failures and short reads.
pub struct FakeI2cPort {
    pub available_packets: VecDeque<FakePacket>,
    pub sent_packets: VecDeque<FakePacket>,
    write_failures_remaining: usize,
}

impl FakeI2cPort {
    pub fn new() -> Self {
        FakeI2cPort {
            available_packets: VecDeque::with_capacity(3),
            sent_packets: VecDeque::with_capacity(3),
            write_failures_remaining: 0,
        }
    }

    /// Enqueue a response to be read later.
    /// A packet shorter than the eventual read request becomes a short read.
    pub fn add_available_packet(&mut self, bytes: &[u8]) {
        let pack = FakePacket::new_from_slice(0, bytes);
        self.available_packets.push_back(pack);
    }

    /// Make the next `count` writes fail with a bus error
    pub fn fail_next_writes(&mut self, count: usize) {
        self.write_failures_remaining = count;
    }
}

impl Read for FakeI2cPort {
    type Error = ();

    fn read(&mut self, _addr: u8, buffer: &mut [u8]) -> Result<(), Self::Error> {
        let next_pack = self.available_packets.pop_front().ok_or(())?;
        if next_pack.len < buffer.len() {
            // fewer bytes available than requested
            return Err(());
        }
        // bytes beyond the request stay on the device (eg a trailing CRC)
        buffer.copy_from_slice(&next_pack.buf[..buffer.len()]);
        Ok(())
    }
}

impl Write for FakeI2cPort {
    type Error = ();

    fn write(&mut self, addr: u8, bytes: &[u8]) -> Result<(), Self::Error> {
        if self.write_failures_remaining > 0 {
            self.write_failures_remaining -= 1;
            return Err(());
        }
        let sent_pack = FakePacket::new_from_slice(addr, bytes);
        self.sent_packets.push_back(sent_pack);
        Ok(())
    }
}
