use criterion::{criterion_group, criterion_main, Criterion};
use gdal::DriverManager;
use rastergrid::{GdalEngine, OpenOptions, PixelType, Raster};
use std::path::PathBuf;
use tempfile::TempDir;

const SIZE: (usize, usize) = (2048, 2048);

fn fixture(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("bench.tif");
    DriverManager::get_driver_by_name("GTiff")
        .unwrap()
        .create_with_band_type::<u16, _>(&path, SIZE.0, SIZE.1, 1)
        .unwrap();
    path
}

fn bench_open(c: &mut Criterion) {
    GdalEngine::init();
    let dir = tempfile::tempdir().unwrap();
    let path = fixture(&dir);
    c.bench_function("open", |b| {
        b.iter(|| Raster::<u16>::open(&path, OpenOptions::default()).unwrap())
    });
}

fn bench_write(c: &mut Criterion) {
    GdalEngine::init();
    let dir = tempfile::tempdir().unwrap();
    let raster = Raster::<u16>::open(fixture(&dir), OpenOptions::default()).unwrap();
    let destination = dir.path().join("out.tif");
    c.bench_function("write", |b| {
        b.iter(|| {
            raster
                .write(&destination, "GTiff", PixelType::UInt16)
                .unwrap()
        })
    });
}

criterion_group!(benches, bench_open, bench_write);
criterion_main!(benches);
