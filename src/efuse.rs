//! # eFuse access
//!
//! ## Overview
//!
//! MAC addresses are burned into one-time programmable eFuse blocks. This
//! module describes where a value lives ([EfuseField]) and abstracts over how
//! it is read ([EfuseReader]), so the address logic in this crate runs against
//! the hardware driver on target and against an [EfuseImage] on the host.
//!
//! Fields are read in little-endian order: the first output byte holds the
//! lowest eight bits of the field. [EfuseReader::read_field_be] reverses the
//! bytes, which is how factory MAC addresses are laid out.

use core::cmp;

/// Number of 32-bit words in each block of an [EfuseImage].
pub const BLOCK_WORDS: usize = 8;

/// Number of blocks in an [EfuseImage].
pub const BLOCK_COUNT: usize = 11;

/// An eFuse block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::FromRepr)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum EfuseBlock {
    Block0,
    Block1,
    Block2,
    Block3,
    Block4,
    Block5,
    Block6,
    Block7,
    Block8,
    Block9,
    Block10,
}

/// The location of a value in eFuse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EfuseField {
    /// The block
    pub(crate) block: EfuseBlock,
    /// Starting bit in the efuse block
    pub(crate) bit_start: u32,
    /// Number of bits
    pub(crate) bit_count: u32,
}

impl EfuseField {
    /// Creates a field covering `bit_count` bits of `block`, starting at
    /// `bit_start`.
    pub const fn new(block: EfuseBlock, bit_start: u32, bit_count: u32) -> Self {
        Self {
            block,
            bit_start,
            bit_count,
        }
    }

    /// The block the field lives in.
    pub const fn block(&self) -> EfuseBlock {
        self.block
    }

    /// First bit of the field within its block.
    pub const fn bit_start(&self) -> u32 {
        self.bit_start
    }

    /// Width of the field in bits.
    pub const fn bit_count(&self) -> u32 {
        self.bit_count
    }

    /// Width of the field in whole bytes.
    pub const fn byte_len(&self) -> usize {
        (self.bit_count as usize).div_ceil(8)
    }
}

/// Read access to eFuse fields.
///
/// Implemented by whatever talks to the eFuse controller; this crate only ever
/// reads.
pub trait EfuseReader {
    /// Error reported by the underlying driver.
    type Error: core::fmt::Debug;

    /// Reads `field` into `out`, least significant byte first.
    ///
    /// Bytes of `out` past the end of the field are zeroed; bits of the field
    /// past the end of `out` are not read.
    fn read_field_le(&self, field: EfuseField, out: &mut [u8]) -> Result<(), Self::Error>;

    /// Reads `field` into `out`, most significant byte first.
    fn read_field_be(&self, field: EfuseField, out: &mut [u8]) -> Result<(), Self::Error> {
        self.read_field_le(field, out)?;
        out.reverse();
        Ok(())
    }
}

impl<T> EfuseReader for &T
where
    T: EfuseReader + ?Sized,
{
    type Error = T::Error;

    fn read_field_le(&self, field: EfuseField, out: &mut [u8]) -> Result<(), Self::Error> {
        (**self).read_field_le(field, out)
    }

    fn read_field_be(&self, field: EfuseField, out: &mut [u8]) -> Result<(), Self::Error> {
        (**self).read_field_be(field, out)
    }
}

/// Errors returned by [EfuseImage].
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, strum::Display)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EfuseImageError {
    /// The field extends past the end of its block.
    OutOfBounds,
}

impl core::error::Error for EfuseImageError {}

/// An in-memory copy of the eFuse blocks.
///
/// Useful for host-side provisioning tools and for tests. Reads behave like
/// the eFuse controller's read registers; writes OR bits in, since a burned
/// bit can never be cleared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EfuseImage {
    blocks: [[u32; BLOCK_WORDS]; BLOCK_COUNT],
}

impl EfuseImage {
    /// An image with no bit burned.
    pub const fn blank() -> Self {
        Self {
            blocks: [[0; BLOCK_WORDS]; BLOCK_COUNT],
        }
    }

    /// Creates an image from raw block words, e.g. a dump of the read
    /// registers.
    pub const fn from_words(blocks: [[u32; BLOCK_WORDS]; BLOCK_COUNT]) -> Self {
        Self { blocks }
    }

    /// The raw words of `block`.
    pub fn block_words(&self, block: EfuseBlock) -> &[u32; BLOCK_WORDS] {
        &self.blocks[block as usize]
    }

    /// Burns `bytes` into `field`, least significant byte first.
    pub fn write_field_le(
        &mut self,
        field: EfuseField,
        bytes: &[u8],
    ) -> Result<(), EfuseImageError> {
        check_bounds(field)?;

        let words = &mut self.blocks[field.block as usize];
        let bit_count = cmp::min(field.bit_count as usize, bytes.len() * 8);

        for i in 0..bit_count {
            if bytes[i / 8] & (1 << (i % 8)) != 0 {
                let bit = field.bit_start as usize + i;
                words[bit / 32] |= 1 << (bit % 32);
            }
        }

        Ok(())
    }

    /// Burns `bytes` into `field`, most significant byte first.
    pub fn write_field_be(
        &mut self,
        field: EfuseField,
        bytes: &[u8],
    ) -> Result<(), EfuseImageError> {
        let mut le = [0u8; BLOCK_WORDS * 4];
        let le = &mut le[..cmp::min(bytes.len(), BLOCK_WORDS * 4)];
        for (dst, src) in le.iter_mut().zip(bytes.iter().rev()) {
            *dst = *src;
        }
        self.write_field_le(field, le)
    }
}

impl Default for EfuseImage {
    fn default() -> Self {
        Self::blank()
    }
}

impl EfuseReader for EfuseImage {
    type Error = EfuseImageError;

    fn read_field_le(&self, field: EfuseField, out: &mut [u8]) -> Result<(), Self::Error> {
        check_bounds(field)?;
        read_bits(&self.blocks[field.block as usize], field, out);
        Ok(())
    }
}

fn check_bounds(field: EfuseField) -> Result<(), EfuseImageError> {
    let end = field.bit_start as usize + field.bit_count as usize;
    if end > BLOCK_WORDS * 32 {
        return Err(EfuseImageError::OutOfBounds);
    }
    Ok(())
}

/// Copies the bits of `field` out of `words`, one 32-bit window at a time.
fn read_bits(words: &[u32], field: EfuseField, out: &mut [u8]) {
    let mut bytes = out;

    let bit_off = field.bit_start as usize;
    let bit_end = cmp::min(field.bit_count as usize, bytes.len() * 8) + bit_off;

    let word_bit_off = bit_off % 32;
    let word_bit_ext = 32 - word_bit_off;

    let mut word_off = bit_off / 32;
    for bit_off in (bit_off..bit_end).step_by(32) {
        let mut word = words[word_off] >> word_bit_off;
        word_off += 1;

        let word_bit_len = cmp::min(bit_end - bit_off, 32);
        if word_bit_len > word_bit_ext {
            // Append bits from the beginning of the next word:
            word |= words[word_off].wrapping_shl(word_bit_ext as u32);
        }

        if word_bit_len < 32 {
            word &= u32::MAX >> (32 - word_bit_len);
        }

        let byte_len = word_bit_len.div_ceil(8);
        bytes[..byte_len].copy_from_slice(&word.to_le_bytes()[..byte_len]);

        bytes = &mut bytes[byte_len..];
    }

    // Fill untouched bytes with zeros:
    bytes.fill(0);
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALIGNED: EfuseField = EfuseField::new(EfuseBlock::Block1, 0, 48);
    const UNALIGNED: EfuseField = EfuseField::new(EfuseBlock::Block3, 200, 48);
    const CROSSING: EfuseField = EfuseField::new(EfuseBlock::Block0, 20, 20);

    #[test]
    fn reads_word_aligned_field() {
        let mut words = [[0u32; BLOCK_WORDS]; BLOCK_COUNT];
        words[1][0] = 0x0403_0201;
        words[1][1] = 0xffff_0605;
        let image = EfuseImage::from_words(words);

        let mut out = [0u8; 6];
        image.read_field_le(ALIGNED, &mut out).unwrap();
        assert_eq!(out, [0x01, 0x02, 0x03, 0x04, 0x05, 0x06]);

        image.read_field_be(ALIGNED, &mut out).unwrap();
        assert_eq!(out, [0x06, 0x05, 0x04, 0x03, 0x02, 0x01]);
    }

    #[test]
    fn reads_field_crossing_words() {
        let mut words = [[0u32; BLOCK_WORDS]; BLOCK_COUNT];
        words[0][0] = 0xabc0_0000;
        words[0][1] = 0x0000_00de;
        let image = EfuseImage::from_words(words);

        let mut out = [0u8; 3];
        image.read_field_le(CROSSING, &mut out).unwrap();
        assert_eq!(out, [0xbc, 0xea, 0x0d]);
    }

    #[test]
    fn write_then_read_unaligned() {
        let mac = [0x24, 0x0a, 0xc4, 0x12, 0x34, 0x56];
        let mut image = EfuseImage::blank();
        image.write_field_le(UNALIGNED, &mac).unwrap();

        let mut out = [0u8; 6];
        image.read_field_le(UNALIGNED, &mut out).unwrap();
        assert_eq!(out, mac);

        // bit 200 is bit 8 of word 6
        assert_eq!(image.block_words(EfuseBlock::Block3)[6], 0xc40a_2400);
    }

    #[test]
    fn write_be_is_reversed() {
        let mac = [0x24, 0x0a, 0xc4, 0x12, 0x34, 0x56];
        let mut image = EfuseImage::blank();
        image.write_field_be(ALIGNED, &mac).unwrap();

        let mut out = [0u8; 6];
        image.read_field_be(ALIGNED, &mut out).unwrap();
        assert_eq!(out, mac);

        image.read_field_le(ALIGNED, &mut out).unwrap();
        assert_eq!(out, [0x56, 0x34, 0x12, 0xc4, 0x0a, 0x24]);
    }

    #[test]
    fn burning_only_sets_bits() {
        let field = EfuseField::new(EfuseBlock::Block2, 0, 8);
        let mut image = EfuseImage::blank();
        image.write_field_le(field, &[0x0f]).unwrap();
        image.write_field_le(field, &[0xf0]).unwrap();

        let mut out = [0u8; 1];
        image.read_field_le(field, &mut out).unwrap();
        assert_eq!(out, [0xff]);
    }

    #[test]
    fn short_field_zero_fills_output() {
        let field = EfuseField::new(EfuseBlock::Block2, 4, 8);
        let mut image = EfuseImage::blank();
        image.write_field_le(field, &[0xa5]).unwrap();

        let mut out = [0xffu8; 4];
        image.read_field_le(field, &mut out).unwrap();
        assert_eq!(out, [0xa5, 0, 0, 0]);
    }

    #[test]
    fn field_past_block_end() {
        let field = EfuseField::new(EfuseBlock::Block3, 250, 8);
        let mut image = EfuseImage::blank();
        let mut out = [0u8; 1];

        assert_eq!(
            image.read_field_le(field, &mut out),
            Err(EfuseImageError::OutOfBounds)
        );
        assert_eq!(
            image.write_field_le(field, &[1]),
            Err(EfuseImageError::OutOfBounds)
        );
    }

    #[test]
    fn field_sizes() {
        assert_eq!(UNALIGNED.byte_len(), 6);
        assert_eq!(EfuseField::new(EfuseBlock::Block0, 0, 1).byte_len(), 1);
        assert_eq!(EfuseBlock::from_repr(3), Some(EfuseBlock::Block3));
        assert_eq!(EfuseBlock::from_repr(11), None);
    }
}
