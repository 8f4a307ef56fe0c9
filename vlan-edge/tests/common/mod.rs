#![allow(dead_code)]

use std::{fs::File, io::Read, path::PathBuf};

use vlan_edge::{CursorMut, VlanClient, VlanConfig};

/// Headroom reserved in front of every test frame.
pub const HEADROOM: usize = 16;

pub fn file_to_packet(fname: &str) -> Vec<u8> {
    let mut program_path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    program_path.push("tests");
    program_path.push("packet_examples");
    program_path.push(fname);

    let mut file = File::open(program_path).unwrap();
    let mut content = String::new();
    file.read_to_string(&mut content).unwrap();
    let content = content.trim();

    assert!(content.len() % 2 == 0);
    (0..content.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&content[i..i + 2], 16).unwrap())
        .collect()
}

/// Copy `frame` into a fresh buffer behind `headroom` spare bytes.
pub fn with_headroom(frame: &[u8], headroom: usize) -> Vec<u8> {
    let mut storage = vec![0; headroom + frame.len()];
    storage[headroom..].copy_from_slice(frame);
    storage
}

/// A tunnel client holding one outgoing frame.
pub struct TestClient<'a> {
    pub vlan: VlanConfig,
    pub to_tap: CursorMut<'a>,
}

impl<'a> TestClient<'a> {
    pub fn new(vlan: VlanConfig, storage: &'a mut [u8], headroom: usize) -> Self {
        let len = storage.len() - headroom;
        TestClient {
            vlan,
            to_tap: CursorMut::with_headroom(storage, headroom, len),
        }
    }
}

impl<'a> VlanClient for TestClient<'a> {
    type Buf = CursorMut<'a>;

    fn vlan(&self) -> &VlanConfig {
        &self.vlan
    }

    fn outgoing(&mut self) -> &mut CursorMut<'a> {
        &mut self.to_tap
    }
}
