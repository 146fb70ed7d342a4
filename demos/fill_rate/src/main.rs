use std::{path::PathBuf, str::FromStr};

use argh::FromArgs;

use palletfill::sensor::{
    engine::DEFAULT_CALIBRATION_SAMPLES, RawDirectorySource, Reference, SensorConfig,
    VolumeSensor,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Measure,
    CalibrateEmpty,
    CalibrateFull,
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "measure" => Ok(Mode::Measure),
            "calibrate-empty" => Ok(Mode::CalibrateEmpty),
            "calibrate-full" => Ok(Mode::CalibrateFull),
            _ => Err(format!(
                "unknown mode `{s}`, expected measure, calibrate-empty or calibrate-full"
            )),
        }
    }
}

#[derive(FromArgs, Debug)]
/// Measure or calibrate the fill rate of a pallet from recorded depth frames.
struct Args {
    /// one of: measure, calibrate-empty, calibrate-full
    #[argh(positional)]
    mode: Mode,

    /// path to the directory containing the raw depth frames
    #[argh(option, short = 'f')]
    frames_dir: PathBuf,

    /// path to the sensor configuration, created on calibration if missing
    #[argh(option, short = 'c', default = "PathBuf::from(\"config.json\")")]
    config: PathBuf,

    /// width of the depth frames in pixels
    #[argh(option, default = "640")]
    width: usize,

    /// height of the depth frames in pixels
    #[argh(option, default = "480")]
    height: usize,

    /// number of frames to average when calibrating, or to measure
    #[argh(option, short = 'n', default = "DEFAULT_CALIBRATION_SAMPLES")]
    num_samples: usize,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args: Args = argh::from_env();

    let config = if args.config.exists() {
        SensorConfig::load(&args.config)?
    } else {
        log::warn!(
            "{} not found, using the default configuration",
            args.config.display()
        );
        SensorConfig::default()
    };

    let source = RawDirectorySource::open(
        &args.frames_dir,
        args.width,
        args.height,
        config.depth_scale,
    )?;
    let mut sensor = VolumeSensor::from_config(source, &config);

    match args.mode {
        Mode::Measure => {
            for _ in 0..args.num_samples {
                sensor.measure_fill_rate()?;
                if let Some(report) = sensor.report() {
                    println!(
                        "volume: {:.4} m^3  fill rate: {:.3}  articles: {}  ({:?})",
                        report.volume, report.fill_rate, report, report.band
                    );
                }
            }
        }
        Mode::CalibrateEmpty | Mode::CalibrateFull => {
            let reference = if args.mode == Mode::CalibrateEmpty {
                Reference::Empty
            } else {
                Reference::Full
            };

            println!("Measuring {} volume...", reference);
            let volume = match reference {
                Reference::Empty => sensor.calibrate_empty(args.num_samples)?,
                Reference::Full => sensor.calibrate_full(args.num_samples)?,
            };
            println!("Calibrated {} volume: {:.6} m^3", reference, volume);

            let error = sensor.calibration_error(reference)?;
            println!("Error in m^3: {:.6}", error);

            config.with_state(sensor.state()).save(&args.config)?;
            println!("Saved calibration to {}", args.config.display());
        }
    }

    Ok(())
}
