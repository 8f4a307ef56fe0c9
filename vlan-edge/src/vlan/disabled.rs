//! Stand-ins used when the `tagging` feature is off.
//!
//! Callers in the tunnel do not know whether VLAN support was built, so the
//! signatures match the real transforms.

use crate::config::VlanConfig;
use crate::error::DropReason;
use crate::{Buf, PktBufMut};

/// Every frame belongs to VID 0 and is left untouched.
#[inline]
pub fn strip_tag<T: PktBufMut>(_cfg: &VlanConfig, _buf: &mut T) -> Result<u16, DropReason> {
    Ok(0)
}

/// Does nothing.
#[inline]
pub fn prepend_tag<T: PktBufMut>(_cfg: &VlanConfig, _buf: &mut T) -> Result<(), DropReason> {
    Ok(())
}

/// Always asks for the frame to be dropped.
#[inline]
pub fn should_drop_client_tag<T: Buf + ?Sized>(_buf: &T) -> bool {
    true
}
