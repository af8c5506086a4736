//! Benchmarks for ccm operations.
//!
//! Run with: `cargo bench`

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::hint::black_box;

use ccm_core::{CIExy, IdAllocator};
use ccm_lut::{find_neighbors, inverse_evaluate_lut1d, Lut1D};
use ccm_math::{bradford_adaptation, Mat3, Mat4};
use ccm_output::{ColorConfig, ColorManager, HeadCaps, StockColorManager};
use ccm_primaries::{gamut_to_gamut_matrix, normalized_primary_matrix, NamedPrimaries, NpmDirection};
use ccm_profile::{Capabilities, IniFile, ProfileTable};
use ccm_transfer::ToneCurve;

const WESTON_INI: &str = "\
[core]
color-management=true

[color-profile]
name=hdr
prim_named=bt2020
tf_named=st2084_pq
target_red=0.68 0.32
target_green=0.265 0.69
target_blue=0.15 0.06
target_white=0.3127 0.329
target_min_lum=0.005
target_max_lum=1000
max_cll=1000
max_fall=400

[color-profile]
name=sdr
prim_named=srgb
tf_power=2.4
min_lum=0.2
ref_lum=100
max_lum=120

[output]
name=DP-1
eotf-mode=st2084
colorimetry-mode=bt2020rgb
color-profile=hdr
";

/// Benchmark matrix inversion.
fn bench_matrix(c: &mut Criterion) {
    let mut group = c.benchmark_group("matrix");

    let m3 = Mat3::from_rows([[0.4124, 0.3576, 0.1805], [0.2126, 0.7152, 0.0722], [0.0193, 0.1192, 0.9505]]);
    let m4 = Mat4::from_rows([
        [4.0, 1.0, 0.5, 0.0],
        [1.0, 3.0, 0.0, 0.2],
        [0.5, 0.0, 2.0, 1.0],
        [0.0, 0.2, 1.0, 5.0],
    ]);

    group.bench_function("mat3_invert", |b| b.iter(|| black_box(m3).invert()));
    group.bench_function("mat4_invert", |b| b.iter(|| black_box(m4).invert()));
    group.bench_function("mat3_mul", |b| b.iter(|| black_box(m3) * black_box(m3)));

    group.finish();
}

/// Benchmark primary matrices and adaptation.
fn bench_gamut(c: &mut Criterion) {
    let mut group = c.benchmark_group("gamut");

    for p in [NamedPrimaries::Srgb, NamedPrimaries::Bt2020, NamedPrimaries::DciP3] {
        let g = p.gamut();
        group.bench_with_input(BenchmarkId::new("npm", p.name()), &g, |b, g| {
            b.iter(|| normalized_primary_matrix(black_box(g), NpmDirection::Forward))
        });
    }

    let srgb = NamedPrimaries::Srgb.gamut();
    let p3 = NamedPrimaries::DciP3.gamut();
    group.bench_function("gamut_to_gamut_adapted", |b| {
        b.iter(|| gamut_to_gamut_matrix(black_box(&srgb), black_box(&p3), true))
    });
    group.bench_function("bradford", |b| {
        b.iter(|| bradford_adaptation(black_box(CIExy::D65), black_box(CIExy::D50)))
    });

    group.finish();
}

/// Benchmark curve evaluation and LUT inversion.
fn bench_lut(c: &mut Criterion) {
    let mut group = c.benchmark_group("lut");

    let values: Vec<f32> = (0..10000).map(|i| i as f32 / 10000.0).collect();
    group.throughput(Throughput::Elements(values.len() as u64));

    for curve in [ToneCurve::SrgbEotf, ToneCurve::St2084PqEotf, ToneCurve::HlgOetf] {
        group.bench_with_input(BenchmarkId::new("curve", curve.name()), &values, |b, v| {
            b.iter(|| v.iter().map(|&x| curve.apply(black_box(x))).collect::<Vec<_>>())
        });
    }

    for size in [256, 1024, 4096] {
        let lut = Lut1D::from_curve(ToneCurve::Power22Eotf, size).unwrap();
        group.bench_with_input(BenchmarkId::new("find_neighbors", size), &lut, |b, lut| {
            b.iter(|| {
                values
                    .iter()
                    .map(|&y| find_neighbors(lut.as_slice(), black_box(y)))
                    .collect::<Vec<_>>()
            })
        });
        group.bench_with_input(BenchmarkId::new("inverse_evaluate", size), &lut, |b, lut| {
            b.iter(|| {
                values
                    .iter()
                    .map(|&y| inverse_evaluate_lut1d(lut.as_slice(), black_box(y)))
                    .collect::<Vec<_>>()
            })
        });
    }

    group.finish();
}

/// Benchmark config parsing and output setup.
fn bench_config(c: &mut Criterion) {
    let mut group = c.benchmark_group("config");
    let caps = Capabilities::all();

    group.bench_function("ini_parse", |b| b.iter(|| IniFile::parse(black_box(WESTON_INI))));

    let ini = IniFile::parse(WESTON_INI).unwrap();
    group.bench_function("profile_table", |b| b.iter(|| ProfileTable::from_ini(black_box(&ini), &caps)));

    let (config, _) = ColorConfig::from_ini(&ini, &caps);
    group.bench_function("configure_output", |b| {
        b.iter(|| {
            let mut cm = StockColorManager::default();
            let out = config
                .configure_output(&ini, &mut cm, "DP-1", HeadCaps::all(), None)
                .unwrap();
            cm.destroy_color_profile(out.profile);
        })
    });

    group.finish();
}

/// Benchmark id allocation with churn.
fn bench_ids(c: &mut Criterion) {
    c.bench_function("id_allocator_churn", |b| {
        b.iter(|| {
            let mut ids = IdAllocator::new();
            for _ in 0..1000 {
                ids.get_id();
            }
            for id in (1..1000).step_by(3) {
                let _ = ids.put_id(id);
            }
            for _ in 0..500 {
                black_box(ids.get_id());
            }
        })
    });
}

criterion_group!(benches, bench_matrix, bench_gamut, bench_lut, bench_config, bench_ids);
criterion_main!(benches);
