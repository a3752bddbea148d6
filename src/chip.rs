//! # Chip variants
//!
//! Every supported chip stores its MAC addresses in different eFuse fields and
//! carries its own set of quirks. Those differences are collected in one
//! [MacLayout] per [ChipVariant], selected once through the crate's
//! [Config](crate::Config).

use crate::{
    address::MacRange,
    efuse::{EfuseBlock, EfuseField},
};

/// The chips this crate knows the eFuse layout of.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, strum::FromRepr, strum::Display)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ChipVariant {
    /// ESP32
    #[default]
    #[strum(to_string = "ESP32")]
    Esp32,
    /// ESP32-C2
    #[strum(to_string = "ESP32-C2")]
    Esp32c2,
    /// ESP32-C3
    #[strum(to_string = "ESP32-C3")]
    Esp32c3,
    /// ESP32-C6
    #[strum(to_string = "ESP32-C6")]
    Esp32c6,
    /// ESP32-H2
    #[strum(to_string = "ESP32-H2")]
    Esp32h2,
    /// ESP32-S2
    #[strum(to_string = "ESP32-S2")]
    Esp32s2,
    /// ESP32-S3
    #[strum(to_string = "ESP32-S3")]
    Esp32s3,
}

impl ChipVariant {
    /// The MAC-related eFuse layout of this chip.
    pub const fn mac_layout(self) -> &'static MacLayout {
        match self {
            Self::Esp32 => &ESP32,
            Self::Esp32c2 => &ESP32C2,
            Self::Esp32c3 => &ESP32C3,
            Self::Esp32c6 => &ESP32C6,
            Self::Esp32h2 => &ESP32H2,
            Self::Esp32s2 => &ESP32S2,
            Self::Esp32s3 => &ESP32S3,
        }
    }
}

/// Versioned custom MAC layout, found on chips which keep the custom MAC in
/// a block shared with other data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CustomMacHeader {
    /// Layout version byte.
    pub version: EfuseField,
    /// The only version this crate understands.
    pub expected_version: u8,
    /// CRC-8 of the custom MAC.
    pub crc: EfuseField,
}

/// Remapping of addresses that were burned twice by mistake.
///
/// Devices whose base address falls into `range` get their SoftAP address
/// moved into a disjoint reserved block by adding `offset` to the full 48-bit
/// address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SoftApRemap {
    /// Affected base addresses.
    pub range: MacRange,
    /// Added to the base address, with carry between octets.
    pub offset: u64,
}

/// Where and how a chip stores its MAC addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MacLayout {
    /// Factory MAC, 48 bits, stored most significant byte last.
    pub factory_mac: EfuseField,
    /// CRC-8 of the factory MAC, only recorded on the oldest chips.
    pub factory_crc: Option<EfuseField>,
    /// Factory addresses accepted even when their CRC does not match. These
    /// are reserved for vendor-internal use.
    pub crc_exempt: Option<MacRange>,
    /// User-burned custom MAC, 48 bits.
    pub custom_mac: EfuseField,
    /// Version and checksum guarding the custom MAC.
    pub custom_header: Option<CustomMacHeader>,
    /// Two extra bytes turning the custom MAC into an EUI-64.
    pub mac_ext: Option<EfuseField>,
    /// SoftAP remapping for a known batch of mis-burned devices.
    pub softap_remap: Option<SoftApRemap>,
}

const FACTORY_MAC_BLOCK1: EfuseField = EfuseField::new(EfuseBlock::Block1, 0, 48);
const USER_DATA_MAC_CUSTOM: EfuseField = EfuseField::new(EfuseBlock::Block3, 200, 48);
const MAC_EXT: EfuseField = EfuseField::new(EfuseBlock::Block1, 48, 16);

static ESP32: MacLayout = MacLayout {
    factory_mac: EfuseField::new(EfuseBlock::Block0, 32, 48),
    factory_crc: Some(EfuseField::new(EfuseBlock::Block0, 80, 8)),
    crc_exempt: Some(MacRange::new(
        [0x18, 0xfe, 0x34, 0x6a, 0x85, 0xc7],
        [0x18, 0xfe, 0x34, 0x6a, 0x85, 0xf8],
    )),
    custom_mac: EfuseField::new(EfuseBlock::Block3, 8, 48),
    custom_header: Some(CustomMacHeader {
        version: EfuseField::new(EfuseBlock::Block3, 184, 8),
        expected_version: 1,
        crc: EfuseField::new(EfuseBlock::Block3, 0, 8),
    }),
    mac_ext: None,
    softap_remap: None,
};

static ESP32C2: MacLayout = MacLayout {
    factory_mac: EfuseField::new(EfuseBlock::Block2, 0, 48),
    factory_crc: None,
    crc_exempt: None,
    custom_mac: EfuseField::new(EfuseBlock::Block1, 0, 48),
    custom_header: None,
    mac_ext: None,
    softap_remap: None,
};

const BLOCK1_FACTORY: MacLayout = MacLayout {
    factory_mac: FACTORY_MAC_BLOCK1,
    factory_crc: None,
    crc_exempt: None,
    custom_mac: USER_DATA_MAC_CUSTOM,
    custom_header: None,
    mac_ext: None,
    softap_remap: None,
};

static ESP32C3: MacLayout = BLOCK1_FACTORY;

static ESP32C6: MacLayout = MacLayout {
    mac_ext: Some(MAC_EXT),
    ..BLOCK1_FACTORY
};

static ESP32H2: MacLayout = MacLayout {
    mac_ext: Some(MAC_EXT),
    ..BLOCK1_FACTORY
};

// Some ESP32-S2 were burned with 0x7cdfa1003000..=0x7cdfa1005fff twice. Their
// SoftAP addresses move to the reserved 0x7cdfa1020000..=0x7cdfa1022fff.
static ESP32S2: MacLayout = MacLayout {
    softap_remap: Some(SoftApRemap {
        range: MacRange::new(
            [0x7c, 0xdf, 0xa1, 0x00, 0x30, 0x00],
            [0x7c, 0xdf, 0xa1, 0x00, 0x5f, 0xff],
        ),
        offset: 0x01_d000,
    }),
    ..BLOCK1_FACTORY
};

static ESP32S3: MacLayout = BLOCK1_FACTORY;
