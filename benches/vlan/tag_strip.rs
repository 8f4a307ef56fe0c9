use criterion::{black_box, criterion_group, criterion_main, Criterion};
use vlan_edge::vlan::*;
use vlan_edge::{CursorMut, VlanConfig, VlanMode};

const TAGGED: [u8; 18] = [
    0x00, 0x0b, 0x86, 0x64, 0x8b, 0xa0, 0x00, 0x50, 0x56, 0xae, 0x76, 0xf5, 0x81, 0x00, 0x00,
    0xc8, 0x08, 0x00,
];

fn strip(buf: &mut [u8], frame_len: usize, cfg: &VlanConfig) -> u16 {
    buf[..18].copy_from_slice(&TAGGED);
    let mut pkt = CursorMut::with_headroom(buf, 0, frame_len);
    strip_tag(cfg, &mut pkt).unwrap()
}

pub fn b(c: &mut Criterion) {
    let cfg = VlanConfig::new(VlanMode::All, 1).unwrap();
    c.bench_function("tag_strip", |b| {
        let mut buf = [0; 200];
        b.iter(|| {
            strip(black_box(&mut buf[..]), black_box(108), &cfg);
        })
    });
}

criterion_group!(benches, b);
criterion_main!(benches);
