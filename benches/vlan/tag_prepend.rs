use bytes::Buf;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use vlan_edge::vlan::*;
use vlan_edge::{CursorMut, VlanConfig, VlanMode};

const UNTAGGED: [u8; 14] = [
    0x00, 0x0b, 0x86, 0x64, 0x8b, 0xa0, 0x00, 0x50, 0x56, 0xae, 0x76, 0xf5, 0x08, 0x00,
];

fn prepend(buf: &mut [u8], frame_len: usize, cfg: &VlanConfig) -> usize {
    buf[DOT1Q_TAG_LEN..DOT1Q_TAG_LEN + 14].copy_from_slice(&UNTAGGED);
    let mut pkt = CursorMut::with_headroom(buf, DOT1Q_TAG_LEN, frame_len);
    prepend_tag(cfg, &mut pkt).unwrap();
    pkt.remaining()
}

pub fn b(c: &mut Criterion) {
    let cfg = VlanConfig::new(VlanMode::OnlyTagged, 200).unwrap();
    c.bench_function("tag_prepend", |b| {
        let mut buf = [0; 200];
        b.iter(|| {
            prepend(black_box(&mut buf[..]), black_box(104), &cfg);
        })
    });
}

criterion_group!(benches, b);
criterion_main!(benches);
