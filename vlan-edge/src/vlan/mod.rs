//! IEEE 802.1Q tagging at the tap edge.
//!
//! A frame on the tap is in one of three shapes:
//!
//! - **untagged**: the EtherType slot at offset 12 holds anything but 0x8100;
//! - **priority-tagged**: an 802.1Q header whose VID is 0, carrying a PCP but
//!   no VLAN membership;
//! - **VLAN-tagged**: an 802.1Q header with a non-zero VID.
//!
//! ```text
//!  0  | dst MAC (6)     |
//!  6  | src MAC (6)     |
//! 12  | TPID = 0x8100   |
//! 14  | TCI (PCP:3|DEI:1|VID:12) |
//! 16  | inner ethertype |
//! 18  | payload ...     |
//! ```
//!
//! The transforms in this module move frames between those shapes in place.
//!
//! # Example
//!
//! ```rust
//! use vlan_edge::vlan::{prepend_tag, strip_tag, DOT1Q_TAG_LEN};
//! use vlan_edge::{Buf, CursorMut, VlanConfig, VlanMode};
//!
//! let cfg = VlanConfig::new(VlanMode::All, 7).unwrap();
//!
//! let mut bytes = [0u8; 64];
//! bytes[DOT1Q_TAG_LEN + 12] = 0x08; // IPv4
//! let mut frame = CursorMut::with_headroom(&mut bytes[..], DOT1Q_TAG_LEN, 60);
//!
//! prepend_tag(&cfg, &mut frame).unwrap();
//! assert_eq!(&frame.chunk()[12..18], &[0x81, 0x00, 0x00, 0x07, 0x08, 0x00]);
//!
//! assert_eq!(strip_tag(&cfg, &mut frame), Ok(7));
//! assert_eq!(frame.remaining(), 60);
//! ```

pub mod tci;

mod packet;
pub use packet::{Dot1qPacket, DOT1Q_HEADER_LEN, DOT1Q_TAG_LEN};

#[cfg(feature = "tagging")]
mod ops;
#[cfg(feature = "tagging")]
pub use ops::{prepend_tag, should_drop_client_tag, strip_tag};

#[cfg(not(feature = "tagging"))]
mod disabled;
#[cfg(not(feature = "tagging"))]
pub use disabled::{prepend_tag, should_drop_client_tag, strip_tag};
