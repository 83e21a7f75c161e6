use criterion::{Criterion, criterion_group, criterion_main};
use fractal::{
    ByteMap, DiamondSquare, DiamondSquareConfig, Grid2D, Histogram, LinearMidpoint, WideMap,
};

const SIZE: usize = 257;
const SEED: u64 = 2025;

fn bench_byte_range(c: &mut Criterion) {
    c.bench_function("DiamondSquare u8 257x257", |b| {
        let ds = DiamondSquare::new(DiamondSquareConfig::byte_range().with_seed(SEED));
        b.iter(|| {
            let mut map: ByteMap = Grid2D::new(SIZE, SIZE);
            ds.generate(&mut map, None).unwrap();
        })
    });
}

fn bench_byte_range_with_histogram(c: &mut Criterion) {
    c.bench_function("DiamondSquare u8 257x257 + histogram", |b| {
        let ds = DiamondSquare::new(DiamondSquareConfig::byte_range().with_seed(SEED));
        let mut hist = Histogram::new(255);
        b.iter(|| {
            let mut map: ByteMap = Grid2D::new(SIZE, SIZE);
            ds.generate(&mut map, Some(&mut hist)).unwrap();
        })
    });
}

fn bench_free_steps_and_craters(c: &mut Criterion) {
    c.bench_function("DiamondSquare u8 257x257 free steps + cratering", |b| {
        let mut config = DiamondSquareConfig::byte_range().with_seed(SEED);
        config.free_steps = 3;
        config.cratering = true;
        let ds = DiamondSquare::new(config);
        b.iter(|| {
            let mut map: ByteMap = Grid2D::new(SIZE, SIZE);
            ds.generate(&mut map, None).unwrap();
        })
    });
}

fn bench_custom_range(c: &mut Criterion) {
    c.bench_function("DiamondSquare i32 513x513 range 0..=4095", |b| {
        let mut config = DiamondSquareConfig::custom_range(4095).with_seed(SEED);
        config.variance = 2048.0;
        let ds = DiamondSquare::new(config);
        b.iter(|| {
            let mut map: WideMap = Grid2D::new(513, 513);
            ds.generate(&mut map, None).unwrap();
        })
    });
}

fn bench_linear(c: &mut Criterion) {
    c.bench_function("LinearMidpoint 4097 cells", |b| {
        let mut line_gen = LinearMidpoint::seeded(SEED);
        b.iter(|| {
            let mut line = vec![0i32; 4097];
            line_gen.generate(&mut line, 1000).unwrap();
        })
    });
}

criterion_group!(
    fractal_benchmarks,
    bench_byte_range,
    bench_byte_range_with_histogram,
    bench_free_steps_and_craters,
    bench_custom_range,
    bench_linear
);
criterion_main!(fractal_benchmarks);
