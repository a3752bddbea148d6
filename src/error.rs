/// Errors which can be returned.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, strum::Display)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// The given address is malformed (wrong length, multicast or all-zero)
    /// or the requested interface type is unknown.
    InvalidArgument,
    /// No base MAC address has been set yet.
    Unset,
    /// The eFuse field holding the address has never been burned.
    NotProgrammed,
    /// The underlying eFuse read failed.
    FuseRead,
    /// The CRC recorded in eFuse does not match the address.
    Integrity,
    /// The custom MAC eFuse layout carries an unexpected version byte.
    Version,
}

impl core::error::Error for Error {}

