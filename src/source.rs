//! # MAC addresses burned in eFuse
//!
//! ## Overview
//!
//! Two addresses can be burned into a chip:
//!
//!   * the factory MAC, programmed by the vendor and always present
//!   * the custom MAC, optionally programmed by the product maker
//!
//! [MacSource] reads either of them and checks that what it read is usable:
//! blank fields, unknown layout versions and checksum mismatches are reported
//! as errors. Nothing is cached and failed reads are not retried.

use crate::{
    Error,
    address::{CustomMacAddress, ExtendedMacAddress, MAC_ADDRESS_LEN, MacAddress},
    chip::MacLayout,
    config::Config,
    crc::Crc8,
    efuse::{EfuseField, EfuseReader},
};

/// How a MAC address read from eFuse was checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Integrity {
    /// The recorded CRC matches.
    Verified,
    /// The chip records no CRC for this field.
    Unchecked,
    /// The CRC does not match, but the address is in the vendor's reserved
    /// range where that is expected.
    ReservedRange,
    /// The CRC does not match and the mismatch was ignored as configured.
    Ignored,
}

/// A MAC address read from eFuse together with the outcome of its integrity
/// check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FuseMac<T = MacAddress> {
    /// The address.
    pub address: T,
    /// How the address was checked.
    pub integrity: Integrity,
}

/// Reads factory and custom MAC addresses from eFuse.
pub struct MacSource<R> {
    reader: R,
    layout: &'static MacLayout,
    ignore_crc_errors: bool,
    extended_address_mode: bool,
    crc: Crc8,
}

impl<R> MacSource<R>
where
    R: EfuseReader,
{
    /// Creates a source reading through `reader`, with the layout and CRC
    /// policy given by `config`.
    pub fn new(reader: R, config: &Config) -> Self {
        Self {
            reader,
            layout: config.chip_variant().mac_layout(),
            ignore_crc_errors: config.ignore_crc_errors(),
            extended_address_mode: config.extended_address_mode(),
            crc: Crc8::new(),
        }
    }

    /// The underlying eFuse reader.
    pub fn reader(&self) -> &R {
        &self.reader
    }

    /// Reads the factory-programmed MAC address.
    ///
    /// On chips that record a CRC for it, a mismatch fails with
    /// [Error::Integrity] unless the address lies in the vendor's reserved
    /// range or CRC errors are configured to be ignored.
    pub fn get_default(&self) -> Result<FuseMac, Error> {
        let mut octets = [0u8; MAC_ADDRESS_LEN];
        self.read_be(self.layout.factory_mac, &mut octets)?;
        let mac = MacAddress::new(octets);

        let Some(crc_field) = self.layout.factory_crc else {
            return Ok(FuseMac {
                address: mac,
                integrity: Integrity::Unchecked,
            });
        };

        let recorded = self.read_u8(crc_field)?;
        if self.crc.verify(&mac, recorded) {
            return Ok(FuseMac {
                address: mac,
                integrity: Integrity::Verified,
            });
        }

        if self.layout.crc_exempt.is_some_and(|range| range.contains(&mac)) {
            debug!("Accepting reserved MAC {} despite CRC mismatch", mac);
            return Ok(FuseMac {
                address: mac,
                integrity: Integrity::ReservedRange,
            });
        }

        error!(
            "Factory MAC CRC error, efuse_crc = {:#x}; calc_crc = {:#x}",
            recorded,
            self.crc.mac_crc(&mac)
        );
        self.crc_mismatch(mac)
    }

    /// Reads the user-programmed MAC address.
    ///
    /// Fails with [Error::NotProgrammed] if the field was never burned and,
    /// on chips with a versioned layout, with [Error::Version] if the layout
    /// version is not the expected one. In extended address mode the two
    /// extension bytes are appended; chips without them fail with
    /// [Error::InvalidArgument].
    pub fn get_custom(&self) -> Result<FuseMac<CustomMacAddress>, Error> {
        let ext_field = match (self.extended_address_mode, self.layout.mac_ext) {
            (false, _) => None,
            (true, Some(field)) => Some(field),
            (true, None) => {
                error!("Extended MAC addresses are not supported by this chip");
                return Err(Error::InvalidArgument);
            }
        };

        let header = self.layout.custom_header;
        if let Some(header) = header {
            let version = self.read_u8(header.version)?;
            if version != header.expected_version {
                error!("Custom MAC layout version error, version = {}", version);
                return Err(Error::Version);
            }
        }

        let mut octets = [0u8; MAC_ADDRESS_LEN];
        self.read_le(self.layout.custom_mac, &mut octets)?;
        let mac = MacAddress::new(octets);

        if mac.is_zero() {
            error!("eFuse MAC_CUSTOM is empty");
            return Err(Error::NotProgrammed);
        }

        let address = match ext_field {
            Some(field) => {
                let mut ext = [0u8; 2];
                self.read_le(field, &mut ext)?;
                CustomMacAddress::Extended(ExtendedMacAddress::from_parts(mac, ext))
            }
            None => CustomMacAddress::Standard(mac),
        };

        let Some(header) = header else {
            return Ok(FuseMac {
                address,
                integrity: Integrity::Unchecked,
            });
        };

        let recorded = self.read_u8(header.crc)?;
        if self.crc.verify(&mac, recorded) {
            return Ok(FuseMac {
                address,
                integrity: Integrity::Verified,
            });
        }

        error!(
            "Custom MAC CRC error, efuse_crc = {:#x}; calc_crc = {:#x}",
            recorded,
            self.crc.mac_crc(&mac)
        );
        self.crc_mismatch(address)
    }

    fn crc_mismatch<T>(&self, address: T) -> Result<FuseMac<T>, Error> {
        if !self.ignore_crc_errors {
            return Err(Error::Integrity);
        }

        warn!("Ignore MAC CRC error");
        Ok(FuseMac {
            address,
            integrity: Integrity::Ignored,
        })
    }

    fn read_le(&self, field: EfuseField, out: &mut [u8]) -> Result<(), Error> {
        self.reader.read_field_le(field, out).map_err(|_e| {
            error!("Failed to read eFuse field");
            Error::FuseRead
        })
    }

    fn read_be(&self, field: EfuseField, out: &mut [u8]) -> Result<(), Error> {
        self.reader.read_field_be(field, out).map_err(|_e| {
            error!("Failed to read eFuse field");
            Error::FuseRead
        })
    }

    fn read_u8(&self, field: EfuseField) -> Result<u8, Error> {
        let mut byte = [0u8; 1];
        self.read_le(field, &mut byte)?;
        Ok(byte[0])
    }
}
