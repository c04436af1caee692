use calibration::{CalibrationGrid, CalibrationSample};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use gaze_mapper::GazeMapper;
use geometry::{FacePoint, ScreenSize};

fn calibration_set(side: usize) -> Vec<CalibrationSample> {
    let fractions: Vec<f64> = (0..side).map(|i| i as f64 / (side - 1) as f64).collect();
    let screen = ScreenSize::default();
    CalibrationGrid::from_axis_fractions(&fractions, &fractions)
        .targets
        .iter()
        .map(|&(fx, fy)| {
            CalibrationSample::new(
                screen.at_fraction(fx, fy),
                FacePoint::new(0.4 + fx * 0.2, 0.45 + fy * 0.1),
            )
        })
        .collect()
}

fn benchmark_map_face_to_screen(c: &mut Criterion) {
    let mut group = c.benchmark_group("map_face_to_screen");
    let mapper = GazeMapper::default();
    let screen = ScreenSize::default();

    for side in [3usize, 5, 10].iter() {
        let samples = calibration_set(*side);
        group.bench_with_input(
            BenchmarkId::new("samples", samples.len()),
            &samples,
            |b, samples| {
                b.iter(|| {
                    black_box(mapper.map(
                        black_box(Some(FacePoint::new(0.51, 0.49))),
                        samples,
                        screen,
                    ))
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, benchmark_map_face_to_screen);
criterion_main!(benches);
