use byte_ring::ByteRing;
use divan::{black_box, Bencher};

fn main() {
    divan::main();
}

fn generate_test_data(len: usize) -> Vec<u8> {
    (0..len).map(|_| fastrand::u8(..)).collect()
}

#[divan::bench(args = [
    16, 64, 256, 1024
])]
fn bench_push_pop_cycle(bencher: Bencher<'_, '_>, capacity: usize) {
    let data = generate_test_data(capacity);

    bencher.bench(move || {
        let mut ring = ByteRing::new(capacity).unwrap();
        for &byte in &data {
            ring.push(black_box(byte)).unwrap();
        }
        let mut sum = 0u64;
        while let Ok(byte) = ring.pop() {
            sum += u64::from(byte);
        }
        sum
    });
}

#[divan::bench(args = [
    16, 64, 256, 1024
])]
fn bench_bulk_write_read(bencher: Bencher<'_, '_>, capacity: usize) {
    let data = generate_test_data(capacity);

    bencher.bench(move || {
        let mut ring = ByteRing::new(capacity).unwrap();
        let mut out = vec![0; capacity];
        let wrote = ring.write(black_box(&data));
        let got = ring.read(black_box(&mut out));
        wrote + got
    });
}
