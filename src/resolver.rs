//! # Per-interface MAC addresses
//!
//! ## Overview
//!
//! Every network interface of the chip needs its own MAC address, yet only one
//! base address is stored. The interface addresses are computed from the base
//! address on every lookup, so changing the base address changes all of them
//! consistently:
//!
//! | Interface  | Universe-derived               | Otherwise                        |
//! |------------|--------------------------------|----------------------------------|
//! | Station    | base                           | base                             |
//! | SoftAP     | base, last octet + 1           | [derive_local_mac]\(base)        |
//! | Bluetooth  | base, last octet + `bt_offset` | base                             |
//! | Ethernet   | base, last octet + 3           | [derive_local_mac]\(base + 1)    |
//!
//! Adding to the last octet wraps around without touching the fifth octet.
//! The one exception is the ESP32-S2 SoftAP remap (see
//! [SoftApRemap](crate::chip::SoftApRemap)), which adds a fixed offset with
//! carry across octets.
//!
//! ## Examples
//!
//! ```rust
//! use esp_mac::{BaseMacStore, ChipVariant, Config, EfuseImage, InterfaceMacResolver, MacType};
//!
//! let store = BaseMacStore::new();
//! let config = Config::default().with_chip_variant(ChipVariant::Esp32s3);
//! let resolver = InterfaceMacResolver::with_store(EfuseImage::blank(), config, &store);
//!
//! resolver.set_base_mac_address("24:0A:C4:12:34:56".parse().unwrap()).unwrap();
//!
//! let ap = resolver.interface_mac_address(MacType::SoftApWifi).unwrap();
//! assert_eq!(ap.octets(), [0x24, 0x0a, 0xc4, 0x12, 0x34, 0x57]);
//! ```

use crate::{
    Error,
    address::{CustomMacAddress, MacAddress},
    chip::MacLayout,
    config::Config,
    efuse::EfuseReader,
    local::derive_local_mac,
    source::{FuseMac, MacSource},
    store::{BASE_MAC, BaseMacStore},
};

const ETH_UNIVERSE_OFFSET: u8 = 3;

/// The interfaces a MAC address can be resolved for.
///
/// The discriminants follow the numbering used by the Wi-Fi and Bluetooth
/// driver blobs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::FromRepr)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u32)]
pub enum MacType {
    /// Wi-Fi station
    StationWifi = 0,
    /// Wi-Fi access point
    SoftApWifi = 1,
    /// Bluetooth
    Bluetooth = 2,
    /// Ethernet
    Ethernet = 3,
}

impl TryFrom<u32> for MacType {
    type Error = Error;

    fn try_from(raw: u32) -> Result<Self, Self::Error> {
        Self::from_repr(raw).ok_or_else(|| {
            error!("mac type is incorrect");
            Error::InvalidArgument
        })
    }
}

/// Resolves the MAC address of each interface.
///
/// Lookups read the base address from a [BaseMacStore]. If none has been set
/// yet, the factory MAC is read from eFuse and written back to the store, so
/// eFuse is read only once.
pub struct InterfaceMacResolver<'s, R> {
    source: MacSource<R>,
    config: Config,
    layout: &'static MacLayout,
    store: &'s BaseMacStore,
}

impl<R> InterfaceMacResolver<'static, R>
where
    R: EfuseReader,
{
    /// Creates a resolver backed by the process-wide base address, the one
    /// [set_base_mac_address](crate::set_base_mac_address) writes to.
    pub fn new(reader: R, config: Config) -> Self {
        Self::with_store(reader, config, &BASE_MAC)
    }
}

impl<'s, R> InterfaceMacResolver<'s, R>
where
    R: EfuseReader,
{
    /// Creates a resolver backed by `store`.
    pub fn with_store(reader: R, config: Config, store: &'s BaseMacStore) -> Self {
        Self {
            source: MacSource::new(reader, &config),
            config,
            layout: config.chip_variant().mac_layout(),
            store,
        }
    }

    /// The configuration this resolver was created with.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The eFuse source used to populate the base address.
    pub fn source(&self) -> &MacSource<R> {
        &self.source
    }

    /// Sets the base address all interface addresses derive from.
    pub fn set_base_mac_address(&self, mac: MacAddress) -> Result<(), Error> {
        self.store.set(mac)
    }

    /// The base address, or [Error::Unset] if it has not been set or loaded.
    pub fn base_mac_address(&self) -> Result<MacAddress, Error> {
        self.store.get()
    }

    /// Reads the factory MAC from eFuse.
    pub fn default_mac_address(&self) -> Result<FuseMac, Error> {
        self.source.get_default()
    }

    /// Reads the custom MAC from eFuse.
    pub fn custom_mac_address(&self) -> Result<FuseMac<CustomMacAddress>, Error> {
        self.source.get_custom()
    }

    /// Makes the custom MAC burned in eFuse the base address.
    pub fn use_custom_as_base(&self) -> Result<MacAddress, Error> {
        let custom = self.source.get_custom()?;
        let base = custom.address.base();
        self.store.set(base)?;
        Ok(base)
    }

    /// Returns the MAC address of the interface `mac_type`.
    ///
    /// Errors from reading the factory MAC are passed on unchanged; there is
    /// no further fallback.
    pub fn interface_mac_address(&self, mac_type: MacType) -> Result<MacAddress, Error> {
        let base = self.base_or_load()?;

        let mac = match mac_type {
            MacType::StationWifi => base,
            MacType::SoftApWifi => self.softap(base),
            MacType::Bluetooth => {
                if self.config.derive_bt_from_universe() {
                    base.wrapping_add_last(self.config.bt_offset())
                } else {
                    base
                }
            }
            MacType::Ethernet => {
                if self.config.derive_eth_from_universe() {
                    base.wrapping_add_last(ETH_UNIVERSE_OFFSET)
                } else {
                    // Bumped first so it never equals the SoftAP address.
                    derive_local_mac(base.wrapping_add_last(1))
                }
            }
        };

        Ok(mac)
    }

    /// Like [Self::interface_mac_address], for a raw interface number.
    pub fn interface_mac_address_raw(&self, mac_type: u32) -> Result<MacAddress, Error> {
        self.interface_mac_address(MacType::try_from(mac_type)?)
    }

    fn softap(&self, base: MacAddress) -> MacAddress {
        if !self.config.derive_softap_from_universe() {
            return derive_local_mac(base);
        }

        match self.layout.softap_remap {
            Some(remap) if remap.range.contains(&base) => {
                debug!("Remapping SoftAP MAC of {}", base);
                base.carrying_add(remap.offset)
            }
            _ => base.wrapping_add_last(1),
        }
    }

    fn base_or_load(&self) -> Result<MacAddress, Error> {
        if let Ok(mac) = self.store.get() {
            return Ok(mac);
        }

        info!("read default base MAC address from EFUSE");
        let mac = self.source.get_default()?.address;
        self.store.set(mac)?;

        Ok(mac)
    }
}
