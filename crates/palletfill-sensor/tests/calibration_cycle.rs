use std::path::Path;

use approx::assert_relative_eq;
use palletfill_3d::{
    depth::{DepthFrame, FieldOfView},
    io::write_depth_raw,
    transforms::euler_to_rotation_matrix,
};
use palletfill_sensor::{
    source::SourceError, RawDirectorySource, Reference, SensorConfig, VolumeSensor,
};

const WIDTH: usize = 64;
const HEIGHT: usize = 48;
const DEPTH_SCALE: f64 = 0.001;
const ROTATION: [f64; 3] = [0.3, 0.0, 0.0];
const SHIFT: [f64; 3] = [0.0, 0.0, -0.5];

const FLOOR: f64 = 1.0;
const TOP: f64 = 0.6;

// Ray of a pixel in the aligned frame, for unit depth.
fn aligned_ray(i: usize, j: usize, fov: &FieldOfView) -> [f64; 3] {
    let sx = (fov.horizontal * std::f64::consts::PI / 360.0).tan() / (WIDTH as f64 / 2.0);
    let sy = (fov.vertical * std::f64::consts::PI / 360.0).tan() / (HEIGHT as f64 / 2.0);
    let r = [
        sx * (i as f64 - (WIDTH / 2) as f64),
        sy * (j as f64 - (HEIGHT / 2) as f64),
        1.0,
    ];
    let m = euler_to_rotation_matrix(&ROTATION);
    [
        r[0] * m[0][0] + r[1] * m[1][0] + r[2] * m[2][0],
        r[0] * m[0][1] + r[1] * m[1][1] + r[2] * m[2][1],
        r[0] * m[0][2] + r[1] * m[1][2] + r[2] * m[2][2],
    ]
}

// Depth image of a floor at z = FLOOR where `covered(x, y)` marks boxes reaching z = TOP.
fn render(fov: &FieldOfView, covered: impl Fn(f64, f64) -> bool) -> DepthFrame {
    let mut data = Vec::with_capacity(WIDTH * HEIGHT);
    for j in 0..HEIGHT {
        for i in 0..WIDTH {
            let ray = aligned_ray(i, j, fov);
            let d_floor = (FLOOR - SHIFT[2]) / ray[2];
            let (x, y) = (d_floor * ray[0] + SHIFT[0], d_floor * ray[1] + SHIFT[1]);
            let d = if covered(x, y) {
                (TOP - SHIFT[2]) / ray[2]
            } else {
                d_floor
            };
            data.push(d);
        }
    }
    DepthFrame::new(WIDTH, HEIGHT, data).expect("rendered frame has a valid size")
}

fn center_y(fov: &FieldOfView) -> f64 {
    let ray = aligned_ray(WIDTH / 2, HEIGHT / 2, fov);
    (FLOOR - SHIFT[2]) / ray[2] * ray[1] + SHIFT[1]
}

fn write_frames(
    dir: &Path,
    frame: &DepthFrame,
    count: usize,
) -> Result<(), Box<dyn std::error::Error>> {
    std::fs::create_dir_all(dir)?;
    for idx in 0..count {
        write_depth_raw(dir.join(format!("{:06}.raw", idx)), frame, DEPTH_SCALE)?;
    }
    Ok(())
}

fn open_frames(root: &Path, name: &str) -> Result<RawDirectorySource, SourceError> {
    RawDirectorySource::open(root.join(name), WIDTH, HEIGHT, DEPTH_SCALE)
}

#[test]
fn calibrate_persist_and_measure() -> Result<(), Box<dyn std::error::Error>> {
    let tmp_dir = tempfile::tempdir()?;
    let fov = FieldOfView::default();
    let y0 = center_y(&fov);

    write_frames(&tmp_dir.path().join("empty"), &render(&fov, |_, _| false), 3)?;
    write_frames(&tmp_dir.path().join("full"), &render(&fov, |_, _| true), 3)?;
    write_frames(&tmp_dir.path().join("half"), &render(&fov, |x, _| x < 0.0), 3)?;

    let config_path = tmp_dir.path().join("config.json");
    let config = SensorConfig {
        fov: [fov.horizontal, fov.vertical],
        rotation: ROTATION,
        shift: SHIFT,
        borders: [Some([0.3, -0.3]), Some([y0 + 0.3, y0 - 0.3]), Some([2.0, -2.0])],
        depth_scale: DEPTH_SCALE,
        max_articles: 10,
        ..Default::default()
    };
    config.save(&config_path)?;

    // empty pallet
    let config = SensorConfig::load(&config_path)?;
    let source = open_frames(tmp_dir.path(), "empty")?;
    let mut sensor = VolumeSensor::from_config(source, &config);
    let volume_empty = sensor.calibrate_empty(5)?;
    assert!(sensor.calibration_error(Reference::Empty)? < 1e-9);
    config.with_state(sensor.state()).save(&config_path)?;

    // full pallet
    let config = SensorConfig::load(&config_path)?;
    let source = open_frames(tmp_dir.path(), "full")?;
    let mut sensor = VolumeSensor::from_config(source, &config);
    let volume_full = sensor.calibrate_full(5)?;
    config.with_state(sensor.state()).save(&config_path)?;

    // the floor sits further from the camera than the box tops
    assert!(volume_empty > volume_full);

    let config = SensorConfig::load(&config_path)?;
    assert_eq!(config.volume_empty, volume_empty);
    assert_eq!(config.volume_full, volume_full);

    // the flat references are close to their height times the 0.6 x 0.6 footprint
    assert_relative_eq!(volume_empty, FLOOR * 0.36, max_relative = 0.15);
    assert_relative_eq!(volume_full, TOP * 0.36, max_relative = 0.15);

    // half of the footprint covered
    let source = open_frames(tmp_dir.path(), "half")?;
    let mut sensor = VolumeSensor::from_config(source, &config);
    let measurement = sensor.measure_fill_rate()?;
    assert!(
        measurement.fill_rate > 0.35 && measurement.fill_rate < 0.65,
        "fill rate {}",
        measurement.fill_rate
    );

    let report = sensor.report().ok_or("missing report")?;
    assert_eq!(report.max_articles, 10);
    assert!((3..=7).contains(&report.filled_articles));

    Ok(())
}
