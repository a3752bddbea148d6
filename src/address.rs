//! # MAC address types
//!
//! [MacAddress] is the EUI-48 value every interface address is derived from.
//! Chips with an IEEE 802.15.4 radio can additionally burn two extension
//! bytes next to the factory MAC, which together with a custom MAC form an
//! [ExtendedMacAddress].

use core::{fmt, str::FromStr};

use crate::Error;

/// Length of a standard MAC address in bytes.
pub const MAC_ADDRESS_LEN: usize = 6;

/// Length of an extended (EUI-64) MAC address in bytes.
pub const EXTENDED_MAC_ADDRESS_LEN: usize = 8;

const MULTICAST_BIT: u8 = 0x01;
const LOCAL_BIT: u8 = 0x02;
const ADDRESS_MASK: u64 = 0xffff_ffff_ffff;

/// An EUI-48 MAC address.
///
/// The all-zero address is never a valid base address; the crate uses it as
/// the "not set" marker (see [MacAddress::UNSET]).
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Default)]
pub struct MacAddress([u8; MAC_ADDRESS_LEN]);

impl MacAddress {
    /// The all-zero address.
    pub const UNSET: Self = Self([0; MAC_ADDRESS_LEN]);

    /// Creates an address from its six octets, most significant first.
    pub const fn new(octets: [u8; MAC_ADDRESS_LEN]) -> Self {
        Self(octets)
    }

    /// The six octets of the address.
    pub const fn octets(&self) -> [u8; MAC_ADDRESS_LEN] {
        self.0
    }

    /// The octets of the address as a slice.
    pub const fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Returns `true` if every octet is zero.
    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|&b| b == 0)
    }

    /// Returns `true` if the group bit (bit 0 of the first octet) is set.
    pub const fn is_multicast(&self) -> bool {
        self.0[0] & MULTICAST_BIT != 0
    }

    /// Returns `true` if the group bit is clear.
    pub const fn is_unicast(&self) -> bool {
        !self.is_multicast()
    }

    /// Returns `true` if the locally-administered bit (bit 1 of the first
    /// octet) is set.
    pub const fn is_locally_administered(&self) -> bool {
        self.0[0] & LOCAL_BIT != 0
    }

    /// Returns `true` if the address was assigned out of a vendor's registered
    /// block.
    pub const fn is_universal(&self) -> bool {
        !self.is_locally_administered()
    }

    /// Adds `n` to the last octet. Overflow wraps within that octet and is
    /// not carried into the fifth one.
    pub(crate) const fn wrapping_add_last(mut self, n: u8) -> Self {
        self.0[MAC_ADDRESS_LEN - 1] = self.0[MAC_ADDRESS_LEN - 1].wrapping_add(n);
        self
    }

    /// Adds `offset` to the address read as a 48-bit big-endian integer,
    /// carrying between octets.
    pub(crate) const fn carrying_add(self, offset: u64) -> Self {
        Self::from_bits(self.to_bits().wrapping_add(offset))
    }

    const fn to_bits(self) -> u64 {
        let o = self.0;
        u64::from_be_bytes([0, 0, o[0], o[1], o[2], o[3], o[4], o[5]])
    }

    const fn from_bits(bits: u64) -> Self {
        let b = (bits & ADDRESS_MASK).to_be_bytes();
        Self([b[2], b[3], b[4], b[5], b[6], b[7]])
    }
}

impl From<[u8; MAC_ADDRESS_LEN]> for MacAddress {
    fn from(octets: [u8; MAC_ADDRESS_LEN]) -> Self {
        Self(octets)
    }
}

impl From<MacAddress> for [u8; MAC_ADDRESS_LEN] {
    fn from(mac: MacAddress) -> Self {
        mac.0
    }
}

impl TryFrom<&[u8]> for MacAddress {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        <[u8; MAC_ADDRESS_LEN]>::try_from(bytes)
            .map(Self)
            .map_err(|_| Error::InvalidArgument)
    }
}

impl FromStr for MacAddress {
    type Err = Error;

    /// Parses the colon separated form, e.g. `24:0A:C4:12:34:56`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut octets = [0u8; MAC_ADDRESS_LEN];
        let mut parts = s.split(':');

        for octet in octets.iter_mut() {
            let part = parts.next().ok_or(Error::InvalidArgument)?;
            if part.len() != 2 || !part.bytes().all(|b| b.is_ascii_hexdigit()) {
                return Err(Error::InvalidArgument);
            }
            *octet = u8::from_str_radix(part, 16).map_err(|_| Error::InvalidArgument)?;
        }

        if parts.next().is_some() {
            return Err(Error::InvalidArgument);
        }

        Ok(Self(octets))
    }
}

impl fmt::Display for MacAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let o = &self.0;
        write!(
            f,
            "{:02X}:{:02X}:{:02X}:{:02X}:{:02X}:{:02X}",
            o[0], o[1], o[2], o[3], o[4], o[5]
        )
    }
}

impl fmt::Debug for MacAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MacAddress({self})")
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for MacAddress {
    fn format(&self, fmt: defmt::Formatter<'_>) {
        let o = &self.0;
        defmt::write!(
            fmt,
            "{:02X}:{:02X}:{:02X}:{:02X}:{:02X}:{:02X}",
            o[0],
            o[1],
            o[2],
            o[3],
            o[4],
            o[5]
        )
    }
}

/// An EUI-64 address made of a custom MAC and the two extension bytes burned
/// in eFuse.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ExtendedMacAddress([u8; EXTENDED_MAC_ADDRESS_LEN]);

impl ExtendedMacAddress {
    /// Creates an extended address from its eight octets.
    pub const fn new(octets: [u8; EXTENDED_MAC_ADDRESS_LEN]) -> Self {
        Self(octets)
    }

    /// Joins a 6-byte address and its 2-byte extension.
    pub const fn from_parts(base: MacAddress, extension: [u8; 2]) -> Self {
        let b = base.0;
        Self([b[0], b[1], b[2], b[3], b[4], b[5], extension[0], extension[1]])
    }

    /// The eight octets of the address.
    pub const fn octets(&self) -> [u8; EXTENDED_MAC_ADDRESS_LEN] {
        self.0
    }

    /// The leading six octets.
    pub const fn base(&self) -> MacAddress {
        let o = self.0;
        MacAddress([o[0], o[1], o[2], o[3], o[4], o[5]])
    }

    /// The trailing two octets.
    pub const fn extension(&self) -> [u8; 2] {
        [self.0[6], self.0[7]]
    }
}

impl fmt::Display for ExtendedMacAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [e0, e1] = self.extension();
        write!(f, "{}:{e0:02X}:{e1:02X}", self.base())
    }
}

/// A user-burned MAC address, in the width the chip is configured for.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CustomMacAddress {
    /// 6-byte address.
    Standard(MacAddress),
    /// 8-byte address.
    Extended(ExtendedMacAddress),
}

impl CustomMacAddress {
    /// The 6-byte address usable as a base MAC.
    pub const fn base(&self) -> MacAddress {
        match self {
            Self::Standard(mac) => *mac,
            Self::Extended(mac) => mac.base(),
        }
    }

    /// The raw address bytes, six or eight of them.
    pub const fn as_bytes(&self) -> &[u8] {
        match self {
            Self::Standard(mac) => &mac.0,
            Self::Extended(mac) => &mac.0,
        }
    }
}

/// An inclusive range of MAC addresses, compared octet by octet.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MacRange {
    start: MacAddress,
    end: MacAddress,
}

impl MacRange {
    /// Creates the range `start..=end`.
    pub const fn new(start: [u8; MAC_ADDRESS_LEN], end: [u8; MAC_ADDRESS_LEN]) -> Self {
        Self {
            start: MacAddress(start),
            end: MacAddress(end),
        }
    }

    /// First address in the range.
    pub const fn start(&self) -> MacAddress {
        self.start
    }

    /// Last address in the range.
    pub const fn end(&self) -> MacAddress {
        self.end
    }

    /// Returns `true` if `mac` lies within the range.
    pub fn contains(&self, mac: &MacAddress) -> bool {
        self.start <= *mac && *mac <= self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: MacAddress = MacAddress::new([0xaa, 0xbb, 0xcc, 0xdd, 0xee, 0xff]);

    #[test]
    fn address_bits() {
        assert!(BASE.is_unicast());
        assert!(BASE.is_locally_administered());
        assert!(!BASE.is_zero());
        assert!(MacAddress::UNSET.is_zero());

        let multicast = MacAddress::new([0x01, 0x00, 0x5e, 0x00, 0x00, 0x01]);
        assert!(multicast.is_multicast());
        assert!(multicast.is_universal());
    }

    #[test]
    fn last_octet_wraps_without_carry() {
        assert_eq!(
            BASE.wrapping_add_last(1).octets(),
            [0xaa, 0xbb, 0xcc, 0xdd, 0xee, 0x00]
        );
        assert_eq!(
            BASE.wrapping_add_last(3).octets(),
            [0xaa, 0xbb, 0xcc, 0xdd, 0xee, 0x02]
        );
    }

    #[test]
    fn carrying_add_propagates_into_higher_octets() {
        let mac = MacAddress::new([0x7c, 0xdf, 0xa1, 0x00, 0x40, 0x00]);
        assert_eq!(
            mac.carrying_add(0x01_d000).octets(),
            [0x7c, 0xdf, 0xa1, 0x02, 0x10, 0x00]
        );

        let top = MacAddress::new([0xff; 6]);
        assert_eq!(top.carrying_add(1), MacAddress::UNSET);
    }

    #[test]
    fn parse_and_display() {
        let mac: MacAddress = "AA:BB:CC:DD:EE:FF".parse().unwrap();
        assert_eq!(mac, BASE);

        let mut buf = [0u8; 17];
        let mut w = Cursor(&mut buf, 0);
        core::fmt::write(&mut w, format_args!("{mac}")).unwrap();
        assert_eq!(&buf, b"AA:BB:CC:DD:EE:FF");

        assert_eq!("aa:bb:cc:dd:ee".parse::<MacAddress>(), Err(Error::InvalidArgument));
        assert_eq!(
            "aa:bb:cc:dd:ee:ff:00".parse::<MacAddress>(),
            Err(Error::InvalidArgument)
        );
        assert_eq!("aa:bb:cc:dd:ee:f".parse::<MacAddress>(), Err(Error::InvalidArgument));
        assert_eq!("aa:bb:cc:dd:ee:zz".parse::<MacAddress>(), Err(Error::InvalidArgument));
    }

    #[test]
    fn from_slice() {
        let bytes = [0x24, 0x0a, 0xc4, 0x12, 0x34, 0x56, 0x78];
        assert_eq!(
            MacAddress::try_from(&bytes[..6]).unwrap().octets(),
            [0x24, 0x0a, 0xc4, 0x12, 0x34, 0x56]
        );
        assert_eq!(MacAddress::try_from(&bytes[..]), Err(Error::InvalidArgument));
        assert_eq!(MacAddress::try_from(&bytes[..0]), Err(Error::InvalidArgument));
    }

    #[test]
    fn extended_parts() {
        let ext = ExtendedMacAddress::from_parts(BASE, [0x12, 0x34]);
        assert_eq!(ext.base(), BASE);
        assert_eq!(ext.extension(), [0x12, 0x34]);
        assert_eq!(CustomMacAddress::Extended(ext).as_bytes().len(), 8);
        assert_eq!(CustomMacAddress::Extended(ext).base(), BASE);
        assert_eq!(CustomMacAddress::Standard(BASE).as_bytes().len(), 6);
    }

    #[test]
    fn range_bounds_are_inclusive() {
        let range = MacRange::new(
            [0x7c, 0xdf, 0xa1, 0x00, 0x30, 0x00],
            [0x7c, 0xdf, 0xa1, 0x00, 0x5f, 0xff],
        );

        assert!(range.contains(&range.start()));
        assert!(range.contains(&range.end()));
        assert!(range.contains(&MacAddress::new([0x7c, 0xdf, 0xa1, 0x00, 0x40, 0x00])));
        assert!(!range.contains(&MacAddress::new([0x7c, 0xdf, 0xa1, 0x00, 0x2f, 0xff])));
        assert!(!range.contains(&MacAddress::new([0x7c, 0xdf, 0xa1, 0x00, 0x60, 0x00])));
        assert!(!range.contains(&MacAddress::new([0x7c, 0xdf, 0xa2, 0x00, 0x40, 0x00])));
    }

    struct Cursor<'a>(&'a mut [u8], usize);

    impl core::fmt::Write for Cursor<'_> {
        fn write_str(&mut self, s: &str) -> core::fmt::Result {
            let end = self.1 + s.len();
            self.0
                .get_mut(self.1..end)
                .ok_or(core::fmt::Error)?
                .copy_from_slice(s.as_bytes());
            self.1 = end;
            Ok(())
        }
    }
}
