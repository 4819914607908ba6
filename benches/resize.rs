use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use filtered_resize::filter::FilterType;
use filtered_resize::raster::{Depth, PixelPacket, Raster};
use filtered_resize::resize;

fn source() -> Raster {
    Raster::from_fn(1024, 768, Depth::Eight, |x, y| {
        PixelPacket::new((x % 256) as u16, (y % 256) as u16, ((x ^ y) % 256) as u16, 255)
    })
    .unwrap()
}

pub fn bench_downscale(c: &mut Criterion) {
    let src = source();
    let mut group = c.benchmark_group("downscale");
    for filter in [FilterType::Box, FilterType::Triangle, FilterType::Mitchell, FilterType::Lanczos] {
        group.bench_with_input(BenchmarkId::from_parameter(filter), &filter, |b, &filter| {
            b.iter(|| resize(black_box(&src), 320, 240, Some(filter), 1.0).unwrap());
        });
    }
    group.finish();
}

pub fn bench_upscale(c: &mut Criterion) {
    let src = Raster::from_fn(256, 192, Depth::Eight, |x, y| {
        PixelPacket::gray(((x * y) % 256) as u16, 255)
    })
    .unwrap()
    .with_alpha(true);

    c.bench_function("upscale_mitchell_alpha", |b| {
        b.iter(|| resize(black_box(&src), 1024, 768, None, 1.0).unwrap());
    });
}

criterion_group!(benches, bench_downscale, bench_upscale);
criterion_main!(benches);
