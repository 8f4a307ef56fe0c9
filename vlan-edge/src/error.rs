//! Why a frame was dropped.

use thiserror::Error;

/// Reason a transform dropped a frame.
///
/// Every drop is local to one frame: the buffer is cleared to zero length
/// and nothing else changes.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DropReason {
    /// The frame is shorter than the header it must carry.
    #[error("frame too short")]
    ShortFrame,

    /// A VLAN-tagged frame reached a port that only accepts untagged or
    /// priority-tagged frames.
    #[error("vlan-tagged frame on an untagged port, vid: {vid}")]
    WrongModeTag {
        /// VID found in the tag.
        vid: u16,
    },

    /// An untagged frame reached a port that only accepts tagged frames.
    #[error("untagged frame on a tagged-only port (proto/len {proto:#06x})")]
    WrongModeUntagged {
        /// Value of the EtherType slot.
        proto: u16,
    },

    /// The client belongs to a VLAN other than the untagged port's PVID.
    #[error("client pvid {client} does not match port pvid {port}")]
    CrossVlan {
        /// PVID of the sending client.
        client: u16,
        /// PVID of the tap.
        port: u16,
    },

    /// The buffer has less than 4 bytes of headroom for a new tag.
    #[error("no headroom for an 802.1q tag")]
    NoHeadroom,
}

impl DropReason {
    /// Short kebab-case name, used as the `reason` field of debug events.
    pub const fn as_str(&self) -> &'static str {
        match self {
            DropReason::ShortFrame => "short-frame",
            DropReason::WrongModeTag { .. } => "wrong-mode-tag",
            DropReason::WrongModeUntagged { .. } => "wrong-mode-untagged",
            DropReason::CrossVlan { .. } => "cross-vlan",
            DropReason::NoHeadroom => "no-headroom",
        }
    }
}
