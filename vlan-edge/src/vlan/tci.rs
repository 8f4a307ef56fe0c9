//! Tag Control Information codec.
//!
//! The TCI is the big-endian 16-bit field at offset 14 of an 802.1Q header:
//! PCP in bits 15..13, DEI in bit 12 and VID in bits 11..0.

use byteorder::{ByteOrder, NetworkEndian};

/// Mask of the 12 VID bits.
pub const VID_MASK: u16 = 0x0fff;
/// VID carried by a priority-only tag.
pub const VID_PRIORITY: u16 = 0;
/// Largest value the VID field can hold.
pub const VID_MAX: u16 = 4095;
/// Largest 802.1p priority.
pub const PCP_MAX: u8 = 7;

/// The VLAN identifier.
#[inline]
pub fn vid(tci: [u8; 2]) -> u16 {
    NetworkEndian::read_u16(&tci[..]) & VID_MASK
}

/// The priority code point.
#[inline]
pub fn pcp(tci: [u8; 2]) -> u8 {
    tci[0] >> 5
}

/// The drop eligible indicator (CFI in older revisions).
#[inline]
pub fn dei(tci: [u8; 2]) -> bool {
    tci[0] & 0x10 != 0
}

/// Build a TCI. Bits of `pcp` and `vid` beyond their field widths are
/// discarded.
#[inline]
pub fn encode(pcp: u8, dei: bool, vid: u16) -> [u8; 2] {
    let value = (u16::from(pcp & PCP_MAX) << 13) | (u16::from(dei) << 12) | (vid & VID_MASK);
    let mut tci = [0; 2];
    NetworkEndian::write_u16(&mut tci[..], value);
    tci
}

/// Replace the VID of `tci`, keeping PCP and DEI.
#[inline]
pub fn with_vid(tci: [u8; 2], vid: u16) -> [u8; 2] {
    encode(pcp(tci), dei(tci), vid)
}
