use criterion::{black_box, criterion_group, criterion_main, Criterion};
use vlan_edge::{CursorMut, VlanClient, VlanConfig, VlanEdge, VlanMode};

const UNTAGGED: [u8; 14] = [
    0x00, 0x0b, 0x86, 0x64, 0x8b, 0xa0, 0x00, 0x50, 0x56, 0xae, 0x76, 0xf5, 0x08, 0x00,
];

struct Client<'a> {
    vlan: VlanConfig,
    to_tap: CursorMut<'a>,
}

impl<'a> VlanClient for Client<'a> {
    type Buf = CursorMut<'a>;

    fn vlan(&self) -> &VlanConfig {
        &self.vlan
    }

    fn outgoing(&mut self) -> &mut CursorMut<'a> {
        &mut self.to_tap
    }
}

// One client frame to the tap and back, as a tunnel server relays it
// between two clients on the same foreign vlan.
fn fwd(edge: &VlanEdge, vlan: VlanConfig, buf: &mut [u8], frame_len: usize) -> u16 {
    buf[4..18].copy_from_slice(&UNTAGGED);
    let mut client = Client {
        vlan,
        to_tap: CursorMut::with_headroom(buf, 4, frame_len),
    };
    if edge.from_client(&client.to_tap) {
        return 0;
    }
    edge.to_tap(&mut client).unwrap();
    edge.from_tap(&mut client.to_tap).unwrap()
}

pub fn b(c: &mut Criterion) {
    let edge = VlanEdge::new(Some(VlanConfig::new(VlanMode::All, 1).unwrap()));
    let vlan = edge.client_config(7).unwrap().unwrap();
    c.bench_function("edge_fwd", |b| {
        let mut buf = [0; 200];
        b.iter(|| {
            fwd(&edge, vlan, black_box(&mut buf[..]), black_box(64));
        })
    });
}

criterion_group!(benches, b);
criterion_main!(benches);
