use byteorder::{ByteOrder, NetworkEndian};

use crate::ether::{EtherAddr, EtherType};
use crate::{Buf, PktBuf, PktBufMut};

/// Byte length of an untagged Ethernet II header.
pub const ETHER_HEADER_LEN: usize = 14;
/// Byte length of the destination and source MAC pair.
pub const ETHER_ADDRS_LEN: usize = 12;

/// An untagged Ethernet II header view over a frame buffer.
#[derive(Debug, Clone, Copy)]
pub struct EtherPacket<T> {
    buf: T,
}

impl<T: Buf> EtherPacket<T> {
    /// Wrap `buf` without checking its length.
    #[inline]
    pub fn parse_unchecked(buf: T) -> Self {
        Self { buf }
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

    /// Wrap `buf`, returning it back if it is shorter than the header.
    #[inline]
    pub fn parse(buf: T) -> Result<Self, T> {
        if buf.chunk().len() < ETHER_HEADER_LEN {
            return Err(buf);
        }
        Ok(Self { buf })
    }

    /// The 14 header bytes.
    #[inline]
    pub fn header_slice(&self) -> &[u8] {
        &self.buf.chunk()[0..ETHER_HEADER_LEN]
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

    /// The EtherType (or 802.3 length) field at offset 12.
    #[inline]
    pub fn ethertype(&self) -> EtherType {
        EtherType::from(NetworkEndian::read_u16(&self.buf.chunk()[12..14]))
    }

    /// Whether the EtherType slot holds the 802.1Q TPID.
    #[inline]
    pub fn is_dot1q(&self) -> bool {
        self.ethertype() == EtherType::VLAN
    }
}

impl<T: PktBuf> EtherPacket<T> {
    /// Drop the header and return the buffer positioned at the payload.
    #[inline]
    pub fn payload(self) -> T {
        let mut buf = self.buf;
        buf.advance(ETHER_HEADER_LEN);
        buf
    }
}

impl<T: PktBufMut> EtherPacket<T> {
    /// Overwrite the destination and source MAC pair.
    #[inline]
    pub fn set_addrs(&mut self, addrs: &[u8; ETHER_ADDRS_LEN]) {
        (&mut self.buf.chunk_mut()[0..ETHER_ADDRS_LEN]).copy_from_slice(&addrs[..]);
    }

    /// Overwrite the destination MAC address.
    #[inline]
    pub fn set_dst_addr(&mut self, value: EtherAddr) {
        (&mut self.buf.chunk_mut()[0..6]).copy_from_slice(value.as_bytes());
    }

    /// Overwrite the source MAC address.
    #[inline]
    pub fn set_src_addr(&mut self, value: EtherAddr) {
        (&mut self.buf.chunk_mut()[6..12]).copy_from_slice(value.as_bytes());
    }

    /// Overwrite the EtherType field.
    #[inline]
    pub fn set_ethertype(&mut self, value: EtherType) {
        NetworkEndian::write_u16(&mut self.buf.chunk_mut()[12..14], u16::from(value));
    }
}
