use byteorder::{ByteOrder, NetworkEndian};

use crate::ether::{EtherAddr, EtherType, ETHER_ADDRS_LEN, ETHER_HEADER_LEN};
use crate::vlan::tci;
use crate::{Buf, PktBufMut};

/// Byte length of an Ethernet header carrying one 802.1Q tag.
pub const DOT1Q_HEADER_LEN: usize = 18;
/// Byte length of the tag itself, TPID plus TCI.
pub const DOT1Q_TAG_LEN: usize = DOT1Q_HEADER_LEN - ETHER_HEADER_LEN;

/// A view of the 18-byte 802.1Q Ethernet header at the start of a frame.
///
/// Reads never go past byte 18 and no accessor checks the TPID; use
/// [`Dot1qPacket::is_tagged`] for that.
#[derive(Debug, Clone, Copy)]
pub struct Dot1qPacket<T> {
    buf: T,
}

impl<T: Buf> Dot1qPacket<T> {
    /// Wrap `buf` without checking its length.
    #[inline]
    pub fn parse_unchecked(buf: T) -> Self {
        Self { buf }
    }

    /// Wrap `buf`, returning it back if it is shorter than 18 bytes.
    #[inline]
    pub fn parse(buf: T) -> Result<Self, T> {
        if buf.chunk().len() < DOT1Q_HEADER_LEN {
            return Err(buf);
        }
        Ok(Self { buf })
    }

    /// The wrapped buffer.
    #[inline]
    pub fn buf(&self) -> &T {
        &self.buf
    }

    /// Unwrap the buffer.
    #[inline]
    pub fn release(self) -> T {
        self.buf
    }

    /// The 18 header bytes.
    #[inline]
    pub fn header_slice(&self) -> &[u8] {
        &self.buf.chunk()[0..DOT1Q_HEADER_LEN]
    }

    /// The destination and source MAC pair.
    #[inline]
    pub fn addrs(&self) -> [u8; ETHER_ADDRS_LEN] {
        let mut addrs = [0; ETHER_ADDRS_LEN];
        addrs.copy_from_slice(&self.buf.chunk()[0..ETHER_ADDRS_LEN]);
        addrs
    }

    /// Destination MAC address.
    #[inline]
    pub fn dst_addr(&self) -> EtherAddr {
        EtherAddr::from_bytes(&self.buf.chunk()[0..6])
    }

    /// Source MAC address.
    #[inline]
    pub fn src_addr(&self) -> EtherAddr {
        EtherAddr::from_bytes(&self.buf.chunk()[6..12])
    }

    /// The tag protocol identifier at offset 12.
    #[inline]
    pub fn tpid(&self) -> EtherType {
        EtherType::from(NetworkEndian::read_u16(&self.buf.chunk()[12..14]))
    }

    /// Whether the TPID is 0x8100.
    #[inline]
    pub fn is_tagged(&self) -> bool {
        self.tpid() == EtherType::VLAN
    }

    /// The raw TCI bytes.
    #[inline]
    pub fn tci(&self) -> [u8; 2] {
        [self.buf.chunk()[14], self.buf.chunk()[15]]
    }

    /// The 802.1p priority code point.
    #[inline]
    pub fn priority(&self) -> u8 {
        tci::pcp(self.tci())
    }

    /// The drop eligible indicator.
    #[inline]
    pub fn dei_flag(&self) -> bool {
        tci::dei(self.tci())
    }

    /// The VLAN identifier; 0 marks a priority-only tag.
    #[inline]
    pub fn vlan_id(&self) -> u16 {
        tci::vid(self.tci())
    }

    /// The EtherType of the encapsulated payload, at offset 16.
    #[inline]
    pub fn ethertype(&self) -> EtherType {
        EtherType::from(NetworkEndian::read_u16(&self.buf.chunk()[16..18]))
    }
}

#[allow(missing_docs)]
impl<T: PktBufMut> Dot1qPacket<T> {
    #[inline]
    pub fn set_addrs(&mut self, addrs: &[u8; ETHER_ADDRS_LEN]) {
        (&mut self.buf.chunk_mut()[0..ETHER_ADDRS_LEN]).copy_from_slice(&addrs[..]);
    }

    #[inline]
    pub fn set_tpid(&mut self, value: EtherType) {
        NetworkEndian::write_u16(&mut self.buf.chunk_mut()[12..14], u16::from(value));
    }

    #[inline]
    pub fn set_tci(&mut self, value: [u8; 2]) {
        (&mut self.buf.chunk_mut()[14..16]).copy_from_slice(&value[..]);
    }

    #[inline]
    pub fn set_priority(&mut self, value: u8) {
        assert!(value <= tci::PCP_MAX);
        let tci = self.tci();
        self.set_tci(tci::encode(value, tci::dei(tci), tci::vid(tci)));
    }

    #[inline]
    pub fn set_dei_flag(&mut self, value: bool) {
        let tci = self.tci();
        self.set_tci(tci::encode(tci::pcp(tci), value, tci::vid(tci)));
    }

    /// Overwrite the VID, leaving PCP and DEI as they are.
    #[inline]
    pub fn set_vlan_id(&mut self, value: u16) {
        assert!(value <= tci::VID_MAX);
        let tci = self.tci();
        self.set_tci(tci::with_vid(tci, value));
    }

    #[inline]
    pub fn set_ethertype(&mut self, value: EtherType) {
        NetworkEndian::write_u16(&mut self.buf.chunk_mut()[16..18], u16::from(value));
    }
}
