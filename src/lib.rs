//! # MAC address management for ESP32 devices
//!
//! ## Overview
//!
//! This crate decides which MAC address each network interface of the chip
//! uses.
//!
//! - keep a base MAC address in RAM that the application may override
//! - read the factory and custom MAC addresses from eFuse, checking their
//!   CRC-8 and layout version where the chip records them
//! - derive the Wi-Fi station, Wi-Fi access point, Bluetooth and Ethernet
//!   addresses from the base address
//!
//! eFuse access goes through the [EfuseReader] trait. [EfuseImage] implements
//! it for an in-memory copy of the eFuse blocks, which is handy for tests and
//! for tools working on eFuse dumps.
//!
//! ## Examples
//!
//! ### Resolving interface addresses from eFuse
//!
//! ```rust
//! use esp_mac::{
//!     BaseMacStore,
//!     ChipVariant,
//!     Config,
//!     EfuseImage,
//!     InterfaceMacResolver,
//!     MacType,
//! };
//!
//! let chip = ChipVariant::Esp32c3;
//! let mut efuse = EfuseImage::blank();
//! efuse
//!     .write_field_be(
//!         chip.mac_layout().factory_mac,
//!         &[0x24, 0x0a, 0xc4, 0x12, 0x34, 0x56],
//!     )
//!     .unwrap();
//!
//! let store = BaseMacStore::new();
//! let resolver =
//!     InterfaceMacResolver::with_store(efuse, Config::default().with_chip_variant(chip), &store);
//!
//! let eth = resolver.interface_mac_address(MacType::Ethernet).unwrap();
//! assert_eq!(eth.octets(), [0x24, 0x0a, 0xc4, 0x12, 0x34, 0x59]);
//! ```
//!
//! ### Overriding the base address
//!
//! ```rust
//! esp_mac::set_base_mac_address(&[0x24, 0x0a, 0xc4, 0x00, 0x00, 0x01]).unwrap();
//!
//! let base = esp_mac::base_mac_address().unwrap();
//! assert_eq!(base.octets(), [0x24, 0x0a, 0xc4, 0x00, 0x00, 0x01]);
//!
//! // Multicast addresses are refused.
//! assert!(esp_mac::set_base_mac_address(&[0x01, 0x00, 0x5e, 0x00, 0x00, 0x01]).is_err());
//! ```
//!
//! ## Feature Flags
#![doc = document_features::document_features!(feature_label = r#"<span class="stab portability"><code>{feature}</code></span>"#)]
#![doc(html_logo_url = "https://avatars.githubusercontent.com/u/46717278")]
#![cfg_attr(not(test), no_std)]

// MUST be the first module
mod fmt;

pub mod address;
pub mod chip;
pub mod config;
pub mod crc;
pub mod efuse;
mod error;
pub mod local;
pub mod resolver;
pub mod source;
pub mod store;

pub use self::{
    address::{CustomMacAddress, ExtendedMacAddress, MacAddress, MacRange},
    chip::{ChipVariant, MacLayout},
    config::{Config, UniversalAddresses},
    crc::Crc8,
    efuse::{EfuseBlock, EfuseField, EfuseImage, EfuseReader},
    error::Error,
    local::derive_local_mac,
    resolver::{InterfaceMacResolver, MacType},
    source::{FuseMac, Integrity, MacSource},
    store::{BaseMacStore, base_mac_address, set_base_mac_address},
};
