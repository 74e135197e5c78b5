use criterion::{criterion_group, criterion_main, Criterion};
use thinning::{BinaryImage, Thinning};

fn synthetic_mask() -> BinaryImage {
    let (width, height) = (640usize, 480usize);
    let mut mask = BinaryImage::new(width, height);
    // A filled rectangle and a thick diagonal band, inset from the border.
    for y in 40..200 {
        for x in 60..540 {
            mask.put(x, y, true);
        }
    }
    for y in 1..height - 1 {
        for x in 1..width - 1 {
            if x.abs_diff(y) < 12 {
                mask.put(x, y, true);
            }
        }
    }
    mask
}

fn thin_zhang_suen(c: &mut Criterion) {
    let mask = synthetic_mask();
    let config = Thinning::zhang_suen();
    c.bench_function("thin_zhang_suen", |b| b.iter(|| config.thin(&mask).unwrap()));
}

fn thin_guo_hall(c: &mut Criterion) {
    let mask = synthetic_mask();
    let config = Thinning::guo_hall();
    c.bench_function("thin_guo_hall", |b| b.iter(|| config.thin(&mask).unwrap()));
}

criterion_group!(
    name = thinning_benches;
    config = Criterion::default().sample_size(10);
    targets = thin_zhang_suen, thin_guo_hall
);
criterion_main!(thinning_benches);
