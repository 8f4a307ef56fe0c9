use tracing::debug;

use crate::config::{VlanConfig, VlanMode};
use crate::error::DropReason;
use crate::ether::{EtherPacket, EtherType, ETHER_HEADER_LEN};
use crate::vlan::{tci, Dot1qPacket, DOT1Q_HEADER_LEN, DOT1Q_TAG_LEN};
use crate::{Buf, Cursor, PktBuf, PktBufMut};

#[inline]
fn drop_frame<T: PktBuf, R>(buf: &mut T, reason: DropReason) -> Result<R, DropReason> {
    buf.clear();
    Err(reason)
}

fn drop_short<T: PktBuf, R>(buf: &mut T) -> Result<R, DropReason> {
    let reason = DropReason::ShortFrame;
    debug!(reason = reason.as_str(), len = buf.remaining(), "dropping frame");
    drop_frame(buf, reason)
}

/// Classify a frame read from the tap and remove its 802.1Q tag.
///
/// Returns the VID the frame belongs to:
///
/// - untagged frames belong to `cfg.pvid()`, unless the port is
///   [`VlanMode::OnlyTagged`], which drops them;
/// - priority-tagged frames (VID 0) keep their tag and belong to
///   `cfg.pvid()`;
/// - VLAN-tagged frames lose their tag, along with its priority, and belong
///   to the VID they carried, unless the port is
///   [`VlanMode::OnlyUntaggedOrPriority`], which drops them.
///
/// A dropped frame is cleared to zero length.
pub fn strip_tag<T: PktBufMut>(cfg: &VlanConfig, buf: &mut T) -> Result<u16, DropReason> {
    // Untagged runts of 14 to 17 bytes also fail here. Kept for wire
    // compatibility with existing peers.
    if buf.chunk().len() < DOT1Q_HEADER_LEN {
        return drop_short(buf);
    }

    let pkt = Dot1qPacket::parse_unchecked(&mut *buf);
    let tpid = pkt.tpid();

    if tpid != EtherType::VLAN {
        if cfg.mode() == VlanMode::OnlyTagged {
            let reason = DropReason::WrongModeUntagged { proto: tpid.raw() };
            debug!(
                reason = reason.as_str(),
                proto = tpid.raw(),
                "dropping frame without vlan-tag (proto/len {:#06x})",
                tpid.raw()
            );
            return drop_frame(buf, reason);
        }

        debug!(
            reason = "untagged",
            vid = cfg.pvid(),
            proto = tpid.raw(),
            "assuming pvid for frame without vlan-tag"
        );
        return Ok(cfg.pvid());
    }

    let vid = pkt.vlan_id();
    let inner = pkt.ethertype();
    let addrs = pkt.addrs();

    if vid == tci::VID_PRIORITY {
        // The sender asked for a priority only; the tag stays.
        debug!(
            reason = "priority-tagged",
            vid = cfg.pvid(),
            pcp = pkt.priority(),
            proto = inner.raw(),
            "assuming pvid for priority-tagged frame"
        );
        return Ok(cfg.pvid());
    }

    if cfg.mode() == VlanMode::OnlyUntaggedOrPriority {
        let reason = DropReason::WrongModeTag { vid };
        debug!(
            reason = reason.as_str(),
            vid,
            proto = inner.raw(),
            "dropping frame with vlan-tag"
        );
        return drop_frame(buf, reason);
    }

    debug!(
        reason = "stripped",
        vid,
        proto = inner.raw(),
        "removing vlan-tag from frame"
    );
    buf.advance(DOT1Q_TAG_LEN);
    let mut eth = EtherPacket::parse_unchecked(&mut *buf);
    eth.set_addrs(&addrs);
    eth.set_ethertype(inner);

    Ok(vid)
}

/// Tag a frame headed for the tap with the PVID of `cfg`.
///
/// Untagged frames get a fresh tag with priority 0 in the headroom in front
/// of them. A priority-tagged frame reuses its tag: only the VID is
/// rewritten, PCP and DEI are kept. The caller decides whether the frame
/// needs a tag at all, see [`crate::process_outgoing_tap`].
///
/// A dropped frame is cleared to zero length.
pub fn prepend_tag<T: PktBufMut>(cfg: &VlanConfig, buf: &mut T) -> Result<(), DropReason> {
    if buf.chunk().len() < ETHER_HEADER_LEN {
        return drop_short(buf);
    }

    let eth = EtherPacket::parse_unchecked(&mut *buf);
    if eth.is_dot1q() {
        // VLAN-tagged frames never get here, the client filter has dropped
        // them.
        if buf.chunk().len() < DOT1Q_HEADER_LEN {
            return drop_short(buf);
        }

        let mut pkt = Dot1qPacket::parse_unchecked(&mut *buf);
        pkt.set_vlan_id(cfg.pvid());
        debug!(
            reason = "retagged",
            vid = cfg.pvid(),
            proto = pkt.ethertype().raw(),
            "tagging priority-tagged frame"
        );
        return Ok(());
    }

    let addrs = eth.addrs();
    let proto = eth.ethertype();

    // The old ethertype at offset 12 lands at offset 16, where the inner
    // ethertype belongs.
    if !buf.try_move_back(DOT1Q_TAG_LEN) {
        let reason = DropReason::NoHeadroom;
        debug!(
            reason = reason.as_str(),
            headroom = buf.chunk_headroom(),
            "dropping frame"
        );
        return drop_frame(buf, reason);
    }
    let mut pkt = Dot1qPacket::parse_unchecked(&mut *buf);
    pkt.set_addrs(&addrs);
    pkt.set_tpid(EtherType::VLAN);
    pkt.set_tci(tci::encode(0, false, cfg.pvid()));

    debug!(
        reason = "tagged",
        vid = cfg.pvid(),
        proto = proto.raw(),
        "tagging frame"
    );
    Ok(())
}

/// Whether a frame sent by a client must be dropped because it carries a
/// VLAN tag.
///
/// Clients are access ports. They may send priority-tagged frames, since
/// those claim no VLAN membership, but never VLAN-tagged ones. Frames too
/// short to hold a tag pass; later size checks deal with them.
pub fn should_drop_client_tag<T: Buf + ?Sized>(buf: &T) -> bool {
    let Ok(pkt) = Dot1qPacket::parse(Cursor::new(buf.chunk())) else {
        debug!(
            reason = "short-frame",
            len = buf.remaining(),
            "passing frame too short for a vlan-tag"
        );
        return false;
    };
    if !pkt.is_tagged() {
        debug!(
            reason = "untagged",
            proto = pkt.tpid().raw(),
            "passing incoming frame"
        );
        return false;
    }

    let vid = pkt.vlan_id();
    if vid == tci::VID_PRIORITY {
        debug!(
            reason = "priority-tagged",
            pcp = pkt.priority(),
            "passing priority-tagged incoming frame"
        );
        return false;
    }

    debug!(
        reason = "client-vlan-tag",
        vid, "dropping vlan-tagged incoming frame"
    );
    true
}
