#![cfg(feature = "tagging")]

mod common;
use common::*;

use std::io;
use std::sync::{Arc, Mutex};

use vlan_edge::vlan::*;
use vlan_edge::*;

#[derive(Clone, Default)]
struct Captured(Arc<Mutex<Vec<u8>>>);

impl io::Write for Captured {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn capture<F: FnOnce()>(f: F) -> String {
    let out = Captured::default();
    let writer = out.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();
    tracing::subscriber::with_default(subscriber, f);

    let bytes = out.0.lock().unwrap().clone();
    String::from_utf8(bytes).unwrap()
}

#[test]
fn drop_events_carry_reason_and_vid() {
    let frame = file_to_packet("vlan7_ipv4.dat");
    let cfg = VlanConfig::new(VlanMode::OnlyUntaggedOrPriority, 1).unwrap();

    let logs = capture(|| {
        let mut storage = with_headroom(&frame, HEADROOM);
        let mut buf = CursorMut::with_headroom(&mut storage[..], HEADROOM, frame.len());
        assert!(strip_tag(&cfg, &mut buf).is_err());
    });

    assert!(logs.contains("DEBUG"));
    assert!(logs.contains("dropping frame with vlan-tag"));
    assert!(logs.contains("wrong-mode-tag"));
    assert!(logs.contains("vid=7"));
    assert!(logs.contains("proto=2048"));
}

#[test]
fn accept_events_carry_vid() {
    let frame = file_to_packet("untagged_ipv4.dat");
    let cfg = VlanConfig::new(VlanMode::All, 1).unwrap();

    let logs = capture(|| {
        let mut storage = with_headroom(&frame, HEADROOM);
        let mut buf = CursorMut::with_headroom(&mut storage[..], HEADROOM, frame.len());
        assert_eq!(strip_tag(&cfg, &mut buf), Ok(1));
        prepend_tag(&cfg.with_pvid(30).unwrap(), &mut buf).unwrap();
    });

    assert!(logs.contains("assuming pvid for frame without vlan-tag"));
    assert!(logs.contains("tagging frame"));
    assert!(logs.contains("vid=30"));
}

fn event_line<'a>(logs: &'a str, message: &str) -> &'a str {
    logs.lines()
        .find(|line| line.contains(message))
        .unwrap_or_else(|| panic!("no event {message:?} in:\n{logs}"))
}

#[test]
fn every_decision_carries_reason() {
    let untagged = file_to_packet("untagged_ipv4.dat");
    let tagged = file_to_packet("vlan7_ipv4.dat");
    let prio = file_to_packet("prio_tagged_ipv4.dat");
    let cfg = VlanConfig::new(VlanMode::All, 1).unwrap();

    let logs = capture(|| {
        let mut storage = with_headroom(&untagged, HEADROOM);
        let mut buf = CursorMut::with_headroom(&mut storage[..], HEADROOM, untagged.len());
        assert_eq!(strip_tag(&cfg, &mut buf), Ok(1));
        assert!(!should_drop_client_tag(&buf));
        prepend_tag(&cfg.with_pvid(30).unwrap(), &mut buf).unwrap();

        let mut storage = with_headroom(&tagged, HEADROOM);
        let mut buf = CursorMut::with_headroom(&mut storage[..], HEADROOM, tagged.len());
        assert_eq!(strip_tag(&cfg, &mut buf), Ok(7));

        let mut storage = with_headroom(&prio, HEADROOM);
        let mut buf = CursorMut::with_headroom(&mut storage[..], HEADROOM, prio.len());
        assert_eq!(strip_tag(&cfg, &mut buf), Ok(1));
        prepend_tag(&cfg.with_pvid(9).unwrap(), &mut buf).unwrap();
    });

    for (message, reason) in [
        ("assuming pvid for frame without vlan-tag", "untagged"),
        ("passing incoming frame", "untagged"),
        ("tagging frame", "tagged"),
        ("removing vlan-tag from frame", "stripped"),
        ("assuming pvid for priority-tagged frame", "priority-tagged"),
        ("tagging priority-tagged frame", "retagged"),
    ] {
        let line = event_line(&logs, message);
        assert!(line.contains("reason="), "{line}");
        assert!(line.contains(reason), "{line}");
    }
}

#[test]
fn dispatcher_events_carry_reason() {
    let frame = file_to_packet("untagged_ipv4.dat");
    let top = VlanConfig::new(VlanMode::OnlyUntaggedOrPriority, 1).unwrap();

    let logs = capture(|| {
        let mut storage = with_headroom(&frame, HEADROOM);
        let mut client = TestClient::new(top, &mut storage[..], HEADROOM);
        assert_eq!(process_outgoing_tap(&top, &mut client), Ok(()));

        let mut storage = with_headroom(&frame, HEADROOM);
        let mut client = TestClient::new(top.with_pvid(2).unwrap(), &mut storage[..], HEADROOM);
        let reason = process_outgoing_tap(&top, &mut client).unwrap_err();
        assert_eq!(reason.as_str(), "cross-vlan");
    });

    let line = event_line(&logs, "passing frame untagged");
    assert!(line.contains("reason="), "{line}");
    assert!(line.contains("native-vlan"), "{line}");

    let line = event_line(&logs, "dropping frame from wrong vlan");
    assert!(line.contains("cross-vlan"), "{line}");
    assert!(line.contains("vid=2"), "{line}");
}
