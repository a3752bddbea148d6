//! Deployment configuration for address derivation.

use crate::chip::ChipVariant;

/// Number of universally administered addresses reserved per device.
///
/// Factories allocate either two or four consecutive addresses per chip. The
/// interfaces that do not get one of them use a locally administered address
/// instead.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UniversalAddresses {
    /// Station and Bluetooth are universal.
    Two,
    /// Station, SoftAP, Bluetooth and Ethernet are universal.
    #[default]
    Four,
}

/// Address derivation configuration.
///
/// Built once at startup and handed to the
/// [InterfaceMacResolver](crate::InterfaceMacResolver).
///
/// ```rust
/// use esp_mac::{ChipVariant, Config};
///
/// let config = Config::default()
///     .with_chip_variant(ChipVariant::Esp32s3)
///     .with_derive_eth_from_universe(false);
///
/// assert!(config.derive_softap_from_universe());
/// assert_eq!(config.bt_offset(), 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, procmacros::BuilderLite)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    #[builder_lite(skip_getter)]
    chip_variant: ChipVariant,
    #[builder_lite(skip_getter)]
    derive_softap_from_universe: bool,
    #[builder_lite(skip_getter)]
    derive_bt_from_universe: bool,
    #[builder_lite(skip_getter)]
    bt_offset: u8,
    #[builder_lite(skip_getter)]
    derive_eth_from_universe: bool,
    #[builder_lite(skip_getter)]
    ignore_crc_errors: bool,
    #[builder_lite(skip_getter)]
    extended_address_mode: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self::for_universal_addresses(UniversalAddresses::Four)
    }
}

impl Config {
    /// The configuration matching a factory allocation of `count` universal
    /// addresses.
    pub const fn for_universal_addresses(count: UniversalAddresses) -> Self {
        let four = matches!(count, UniversalAddresses::Four);
        Self {
            chip_variant: ChipVariant::Esp32,
            derive_softap_from_universe: four,
            derive_bt_from_universe: true,
            bt_offset: if four { 2 } else { 1 },
            derive_eth_from_universe: four,
            ignore_crc_errors: false,
            extended_address_mode: false,
        }
    }

    /// The chip whose eFuse layout and quirks apply.
    pub const fn chip_variant(&self) -> ChipVariant {
        self.chip_variant
    }

    /// Whether the SoftAP address is `base + 1` rather than locally
    /// administered.
    pub const fn derive_softap_from_universe(&self) -> bool {
        self.derive_softap_from_universe
    }

    /// Whether the Bluetooth address is `base + bt_offset` rather than the base
    /// address itself.
    pub const fn derive_bt_from_universe(&self) -> bool {
        self.derive_bt_from_universe
    }

    /// Added to the last octet of the base address for Bluetooth.
    pub const fn bt_offset(&self) -> u8 {
        self.bt_offset
    }

    /// Whether the Ethernet address is `base + 3` rather than locally
    /// administered.
    pub const fn derive_eth_from_universe(&self) -> bool {
        self.derive_eth_from_universe
    }

    /// Whether a CRC mismatch on a burned MAC is reported as a warning instead
    /// of an error.
    pub const fn ignore_crc_errors(&self) -> bool {
        self.ignore_crc_errors
    }

    /// Whether custom MACs are read as 8-byte addresses.
    pub const fn extended_address_mode(&self) -> bool {
        self.extended_address_mode
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn four_universal_addresses() {
        let config = Config::default();
        assert_eq!(config, Config::for_universal_addresses(UniversalAddresses::Four));
        assert!(config.derive_softap_from_universe());
        assert!(config.derive_bt_from_universe());
        assert!(config.derive_eth_from_universe());
        assert_eq!(config.bt_offset(), 2);
        assert!(!config.ignore_crc_errors());
        assert!(!config.extended_address_mode());
    }

    #[test]
    fn two_universal_addresses() {
        let config = Config::for_universal_addresses(UniversalAddresses::Two);
        assert!(!config.derive_softap_from_universe());
        assert!(config.derive_bt_from_universe());
        assert!(!config.derive_eth_from_universe());
        assert_eq!(config.bt_offset(), 1);
    }

    #[test]
    fn builder_overrides() {
        let config = Config::default()
            .with_chip_variant(ChipVariant::Esp32c6)
            .with_bt_offset(5)
            .with_ignore_crc_errors(true)
            .with_extended_address_mode(true);

        assert_eq!(config.chip_variant(), ChipVariant::Esp32c6);
        assert_eq!(config.bt_offset(), 5);
        assert!(config.ignore_crc_errors());
        assert!(config.extended_address_mode());
        // Untouched fields keep the preset.
        assert!(config.derive_softap_from_universe());
        assert!(config.derive_eth_from_universe());
    }

    #[test]
    fn builder_turns_preset_into_other_preset() {
        let config = Config::default()
            .with_derive_softap_from_universe(false)
            .with_derive_bt_from_universe(true)
            .with_derive_eth_from_universe(false)
            .with_bt_offset(1);

        assert_eq!(config, Config::for_universal_addresses(UniversalAddresses::Two));
    }
}
