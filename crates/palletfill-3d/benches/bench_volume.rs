use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

use palletfill_3d::{
    depth::{depth_to_pointcloud, DepthFrame, FieldOfView},
    ops::{select_roi, Axis, RoiBox},
    volume::to_volume,
};

// a tilted floor with a box standing on it
fn synthetic_frame(width: usize, height: usize) -> DepthFrame {
    let data = (0..width * height)
        .map(|idx| {
            let (x, y) = (idx % width, idx / width);
            let floor = 1.2 + 0.4 * y as f64 / height as f64;
            if (width / 4..width / 2).contains(&x) && (height / 4..height / 2).contains(&y) {
                floor - 0.3
            } else {
                floor
            }
        })
        .collect();
    DepthFrame::new(width, height, data).expect("synthetic frame has a valid size")
}

fn bench_volume(c: &mut Criterion) {
    let mut group = c.benchmark_group("volume");

    let fov = FieldOfView::default();
    let roi = RoiBox::default().with_axis(Axis::Z, [1.1, 0.6]);

    for (width, height) in [(160, 120), (320, 240), (640, 480)].iter() {
        group.throughput(criterion::Throughput::Elements((*width * *height) as u64));
        let parameter_string = format!("{}x{}", width, height);
        let frame = synthetic_frame(*width, *height);

        group.bench_with_input(
            BenchmarkId::new("depth_to_pointcloud", &parameter_string),
            &frame,
            |b, frame| b.iter(|| black_box(depth_to_pointcloud(frame, &fov))),
        );

        let cloud = match depth_to_pointcloud(&frame, &fov) {
            Ok(cloud) => select_roi(&cloud, &[0.0, 0.0, -0.75], &[0.23554, 0.0, 0.0], &roi),
            Err(_) => continue,
        };

        group.bench_with_input(
            BenchmarkId::new("to_volume", &parameter_string),
            &cloud,
            |b, cloud| b.iter(|| black_box(to_volume(cloud))),
        );
    }

    group.finish();
}

criterion_group!(benches, bench_volume);
criterion_main!(benches);
