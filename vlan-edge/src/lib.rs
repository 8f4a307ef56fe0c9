#![warn(missing_docs, missing_debug_implementations, rust_2018_idioms)]
#![no_std]

//! IEEE 802.1Q access-port edge for the tap side of an Ethernet tunnel server.
//!
//! Every tunnel client is an access port of a virtual switch whose trunk is
//! the shared tap device. This crate provides the in-place frame transforms
//! that sit on that boundary:
//!
//! - [`vlan::strip_tag`]: tap to client, classifies and untags a frame.
//! - [`vlan::prepend_tag`]: client to tap, tags a frame with the client PVID.
//! - [`vlan::should_drop_client_tag`]: rejects tagged frames from clients.
//! - [`edge::process_outgoing_tap`]: picks the egress transform per tap mode.
//!
//! All transforms work on a [`PktBufMut`] with headroom, such as
//! [`CursorMut`], and never allocate.

#[cfg(any(test, feature = "std"))]
extern crate std;

#[macro_use]
mod macros;

mod traits;
pub use traits::{Buf, PktBuf, PktBufMut};

mod cursors;
pub use cursors::{Cursor, CursorMut};

pub mod config;
pub mod edge;
pub mod error;
pub mod ether;
pub mod vlan;

pub use config::{ConfigError, VlanConfig, VlanMode, VlanOptions};
pub use edge::{process_outgoing_tap, VlanClient, VlanEdge};
pub use error::DropReason;
