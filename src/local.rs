//! Locally administered addresses.

use crate::address::MacAddress;

const LOCAL_BIT: u8 = 0x02;
const MAX_TRIES: u8 = 64;

/// Derives a locally administered address from a universal one.
///
/// The first octet gets the locally-administered bit set and is then XORed
/// with `idx << 2` for `idx` counting up from zero; the first candidate that
/// differs from `universal` is returned. The remaining octets are copied
/// unchanged.
///
/// The result is part of what devices get provisioned with, so the search
/// order must not change.
///
/// ```rust
/// use esp_mac::{MacAddress, derive_local_mac};
///
/// let universal = MacAddress::new([0x24, 0x0a, 0xc4, 0x12, 0x34, 0x56]);
/// let local = derive_local_mac(universal);
///
/// assert_eq!(local.octets(), [0x26, 0x0a, 0xc4, 0x12, 0x34, 0x56]);
/// ```
pub fn derive_local_mac(universal: MacAddress) -> MacAddress {
    let octets = universal.octets();
    let mut local = octets;

    for idx in 0..MAX_TRIES {
        local[0] = (octets[0] | LOCAL_BIT) ^ (idx << 2);

        if local != octets {
            break;
        }
    }

    MacAddress::new(local)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sets_local_bit_on_universal_address() {
        let universal = MacAddress::new([0x30, 0xae, 0xa4, 0x07, 0x0d, 0x64]);
        let local = derive_local_mac(universal);

        assert_eq!(local.octets(), [0x32, 0xae, 0xa4, 0x07, 0x0d, 0x64]);
        assert!(local.is_locally_administered());
    }

    #[test]
    fn already_local_address_takes_second_candidate() {
        // 0xaa already has the local bit, so idx 0 reproduces the input.
        let universal = MacAddress::new([0xaa, 0xbb, 0xcc, 0xdd, 0xee, 0x00]);
        let local = derive_local_mac(universal);

        assert_eq!(local.octets(), [0xae, 0xbb, 0xcc, 0xdd, 0xee, 0x00]);
        assert!(local.is_locally_administered());
    }

    #[test]
    fn always_local_and_different() {
        for first in 0..=u8::MAX {
            let mac = MacAddress::new([first, 0x11, 0x22, 0x33, 0x44, 0x55]);
            let local = derive_local_mac(mac);

            assert!(local.is_locally_administered());
            assert_ne!(local, mac);
            assert_eq!(local.octets()[1..], mac.octets()[1..]);
            assert_eq!(local.is_multicast(), mac.is_multicast());
        }
    }

    #[test]
    fn deterministic() {
        let mac = MacAddress::new([0x7c, 0xdf, 0xa1, 0x00, 0x40, 0x00]);
        assert_eq!(derive_local_mac(mac), derive_local_mac(mac));
    }
}
