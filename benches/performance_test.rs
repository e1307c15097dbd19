use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use huewheel::{
    convert, ColorFormat, GenerationFlags, Hsl, PaletteGenerator, PaletteRequest, Rgb, Scheme,
    SwatchBoard,
};
use rand::{rngs::StdRng, SeedableRng};
use std::time::Duration;

fn sample_colors(size: usize) -> Vec<Rgb> {
    (0..size)
        .map(|i| Rgb::new((i * 7) as u8, (i * 13) as u8, (i * 31) as u8))
        .collect()
}

pub fn bench_conversions(c: &mut Criterion) {
    let mut group = c.benchmark_group("conversions");
    group.sample_size(100);
    group.measurement_time(Duration::from_secs(10));

    for size in [100, 1000, 10000].iter() {
        let colors = sample_colors(*size);

        group.bench_with_input(BenchmarkId::new("rgb_hsl_round_trip", size), &colors, |b, colors| {
            b.iter(|| {
                for rgb in colors {
                    black_box(convert::hsl_to_rgb(&convert::rgb_to_hsl(black_box(rgb))));
                }
            });
        });

        group.bench_with_input(BenchmarkId::new("rgb_lab_round_trip", size), &colors, |b, colors| {
            b.iter(|| {
                for rgb in colors {
                    black_box(convert::lab_to_rgb(&convert::rgb_to_lab(black_box(rgb))));
                }
            });
        });

        group.bench_with_input(BenchmarkId::new("expand_all_formats", size), &colors, |b, colors| {
            b.iter(|| {
                for rgb in colors {
                    for format in ColorFormat::ALL {
                        black_box(format.from_rgb(black_box(rgb)));
                    }
                }
            });
        });
    }
    group.finish();
}

pub fn bench_palettes(c: &mut Criterion) {
    let mut group = c.benchmark_group("palettes");
    group.sample_size(100);
    group.measurement_time(Duration::from_secs(10));

    let generator = PaletteGenerator::default();
    for scheme in [Scheme::Complementary, Scheme::Hexadic, Scheme::Diadic, Scheme::Random] {
        for count in [6, 60, 600].iter() {
            group.bench_with_input(
                BenchmarkId::new(scheme.name(), count),
                count,
                |b, &count| {
                    let request = PaletteRequest::new(scheme, count)
                        .seed(Hsl::new(200.0, 60.0, 50.0))
                        .flags(GenerationFlags::limited());
                    let mut rng = StdRng::seed_from_u64(count as u64);
                    b.iter(|| {
                        let mut board = SwatchBoard::new();
                        black_box(generator.generate(black_box(&request), &mut rng, &mut board));
                    });
                },
            );
        }
    }
    group.finish();
}

criterion_group!(
    name = benches;
    config = Criterion::default()
        .sample_size(100)
        .measurement_time(Duration::from_secs(10));
    targets = bench_conversions, bench_palettes
);
criterion_main!(benches);
