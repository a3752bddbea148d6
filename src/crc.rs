//! CRC-8 used by the ROM to protect MAC addresses burned in eFuse.
//!
//! This is the Dallas/Maxim 1-Wire CRC: reflected polynomial `0x31`, zero
//! initial value and no output XOR.

use crc::{Algorithm, Crc};

use crate::address::MacAddress;

static ALGO_CRC8_MAC: Algorithm<u8> = Algorithm {
    width: 8,
    poly: 0x31,
    init: 0,
    refin: true,
    refout: true,
    xorout: 0,
    check: 0xa1,
    residue: 0,
};

/// Computes and verifies the checksum of a MAC address.
pub struct Crc8 {
    algo: Crc<u8>,
}

impl Crc8 {
    /// Creates the validator.
    pub const fn new() -> Self {
        Self {
            algo: Crc::<u8>::new(&ALGO_CRC8_MAC),
        }
    }

    /// Checksum over arbitrary bytes.
    pub fn crc(&self, data: &[u8]) -> u8 {
        let mut digest = self.algo.digest();
        digest.update(data);
        digest.finalize()
    }

    /// Checksum over the six octets of `mac`.
    pub fn mac_crc(&self, mac: &MacAddress) -> u8 {
        self.crc(mac.as_bytes())
    }

    /// Returns `true` if `recorded` is the checksum of `mac`.
    pub fn verify(&self, mac: &MacAddress, recorded: u8) -> bool {
        self.mac_crc(mac) == recorded
    }
}

impl Default for Crc8 {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_value() {
        assert_eq!(Crc8::new().crc(b"123456789"), 0xa1);
    }

    #[test]
    fn known_addresses() {
        let crc = Crc8::new();

        let mac = MacAddress::new([0x24, 0x0a, 0xc4, 0x12, 0x34, 0x56]);
        assert_eq!(crc.mac_crc(&mac), 0xf5);
        assert!(crc.verify(&mac, 0xf5));

        let mac = MacAddress::new([0x30, 0xae, 0xa4, 0x07, 0x0d, 0x64]);
        assert!(crc.verify(&mac, 0x2c));

        assert_eq!(crc.mac_crc(&MacAddress::UNSET), 0x00);
    }

    #[test]
    fn any_flipped_crc_bit_fails() {
        let crc = Crc8::new();
        let mac = MacAddress::new([0xaa, 0xbb, 0xcc, 0xdd, 0xee, 0xff]);
        let good = crc.mac_crc(&mac);
        assert_eq!(good, 0x12);

        for bit in 0..8 {
            assert!(!crc.verify(&mac, good ^ (1 << bit)));
        }
    }
}
