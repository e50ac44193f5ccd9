use std::{env, f64::consts::PI};

use nalgebra::Vector3;
use radsim::{
    config::parser::parse_file,
    error::Result,
    radar::Radar,
    scene::{Target, TargetCollection},
    signal::{approx::VectorApproxFunction, SampledDomain},
};
use tracing::info;
use tracing_subscriber::EnvFilter;

const DEFAULT_CONFIG: &str = "radar_configs/short_range_radar.txt";

// A target flying a circle of `radius` m around (`centre`, 0, 100) once every `period` s.
fn circling_target(centre: f64, radius: f64, period: f64) -> Result<Target> {
    let times = SampledDomain::inclusive(0., period, 361)?;
    let path = VectorApproxFunction::from_fn(times, |t| {
        let angle = 2. * PI * t / period;
        Vector3::new(centre + radius * angle.cos(), radius * angle.sin(), 100.)
    })?;
    Target::with_path(path, 5.)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut args = env::args().skip(1);
    let config_path = args.next().unwrap_or_else(|| DEFAULT_CONFIG.to_string());
    let num_pulses: usize = args.next().and_then(|n| n.parse().ok()).unwrap_or(20);

    let config = parse_file(&config_path)?;
    let mut radar = Radar::new(&config)?;
    radar.set_seed(1);
    info!(
        config = %config_path,
        bins = radar.num_range_bins(),
        range_bin = radar.range_bin(),
        instrumented_range = radar.instrumented_range(),
        "radar loaded"
    );

    let mut targets = TargetCollection::new();
    targets.append_copy(&circling_target(8000., 500., 60.)?);
    targets.append_copy(&Target::fixed(Vector3::new(15_000., 200., 0.), 20.)?);

    for _ in 0..num_pulses {
        let pulse = radar.generate_pulse_data(&targets, None)?;
        let registry = pulse.registry();
        let (peak_bin, peak) = registry
            .iter()
            .enumerate()
            .max_by_key(|&(_, level)| *level)
            .map(|(bin, level)| (bin, *level))
            .unwrap_or((0, 0));
        info!(
            time = pulse.time(),
            peak_bin,
            peak,
            peak_range = radar.get_range(peak_bin).unwrap_or(f64::NAN),
            "pulse"
        );
    }
    Ok(())
}
