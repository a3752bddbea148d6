//! # Base MAC address storage
//!
//! ## Overview
//!
//! The base MAC address is the one address every interface address is
//! derived from. It lives in RAM only: it starts out unset on every boot, is
//! either set explicitly by the application or loaded from eFuse on first
//! use, and may be overwritten at any time.
//!
//! The address is read and written as a whole inside a critical section, so
//! an interrupt handler reading it while another context writes it never
//! sees a mix of old and new octets.

use core::cell::Cell;

use critical_section::Mutex;

use crate::{Error, address::MacAddress};

/// A single-slot, interrupt-safe cell holding the base MAC address.
///
/// The all-zero address marks the slot as unset.
pub struct BaseMacStore {
    mac: Mutex<Cell<MacAddress>>,
}

impl BaseMacStore {
    /// Creates an empty store.
    pub const fn new() -> Self {
        Self {
            mac: Mutex::new(Cell::new(MacAddress::UNSET)),
        }
    }

    /// Replaces the stored address.
    ///
    /// Fails with [Error::InvalidArgument] for multicast addresses and for the
    /// all-zero address. The stored value is left untouched in that case.
    pub fn set(&self, mac: MacAddress) -> Result<(), Error> {
        if mac.is_zero() {
            error!("Base MAC address must not be all zero");
            return Err(Error::InvalidArgument);
        }
        if mac.is_multicast() {
            error!("Base MAC must be a unicast MAC");
            return Err(Error::InvalidArgument);
        }

        critical_section::with(|cs| self.mac.borrow(cs).set(mac));

        Ok(())
    }

    /// Returns a copy of the stored address, or [Error::Unset] if none has
    /// been set yet.
    pub fn get(&self) -> Result<MacAddress, Error> {
        let mac = critical_section::with(|cs| self.mac.borrow(cs).get());

        if mac.is_zero() {
            info!("Base MAC address is not set");
            return Err(Error::Unset);
        }

        Ok(mac)
    }
}

impl Default for BaseMacStore {
    fn default() -> Self {
        Self::new()
    }
}

/// The process-wide base MAC address.
pub(crate) static BASE_MAC: BaseMacStore = BaseMacStore::new();

/// Sets the process-wide base MAC address.
///
/// `mac` must be exactly six bytes and a unicast address; otherwise
/// [Error::InvalidArgument] is returned. The value does not survive a reset.
pub fn set_base_mac_address(mac: &[u8]) -> Result<(), Error> {
    let mac = MacAddress::try_from(mac).inspect_err(|_| {
        error!("Base MAC address must be 6 bytes long");
    })?;
    BASE_MAC.set(mac)
}

/// Returns the process-wide base MAC address, or [Error::Unset] if neither
/// [set_base_mac_address] nor an interface lookup has populated it yet.
pub fn base_mac_address() -> Result<MacAddress, Error> {
    BASE_MAC.get()
}
