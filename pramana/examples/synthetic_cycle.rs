//! Synthetic measuring cycle.
//!
//! Builds a parabolic blade template and a displaced, noisy scan of it, then
//! runs the cycle an orchestration layer would: part checks, best fit,
//! area stock, special stock and C2.
//!
//! Usage:
//!   cargo run --example synthetic_cycle
//!   cargo run --example synthetic_cycle -- --dx 0.05 --dy -0.03 --thickness 0.2
//!   cargo run --example synthetic_cycle -- -c configs/pramana.yaml --method border-trim
//!
//! Set `RUST_LOG=debug` to follow the best fit and hill climb.

use std::path::Path;

use clap::{Parser, ValueEnum};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use pramana::{
    BestFitMethod, Point2D, PramanaConfig, Profile, SectionCurve, Side, SidePair, Workpiece,
};

/// Best-fit strategy selection
#[derive(Clone, Copy, Debug, ValueEnum)]
enum Method {
    /// Border-trimmed centroid
    BorderTrim,
    /// Resampled centroid with hill climbing
    Resampled,
}

/// Run one measuring cycle on a synthetic blade
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "configs/pramana.yaml")]
    config: String,

    /// Best-fit strategy, overrides the configuration
    #[arg(short, long, value_enum)]
    method: Option<Method>,

    /// Scan displacement in x (mm)
    #[arg(long, default_value_t = 0.04, allow_hyphen_values = true)]
    dx: f64,

    /// Scan displacement in y (mm)
    #[arg(long, default_value_t = -0.02, allow_hyphen_values = true)]
    dy: f64,

    /// Material left on each side (mm)
    #[arg(short, long, default_value_t = 0.15)]
    thickness: f64,

    /// Scan noise amplitude (mm)
    #[arg(short, long, default_value_t = 0.005)]
    noise: f64,

    /// Random seed
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
}

const SECTIONS: std::ops::Range<usize> = 100..360;
const POINTS: usize = 161;

fn surface(side: Side, section: usize, x: f64) -> f64 {
    let t = 0.8 + section as f64 * 0.001;
    match side {
        Side::Convex => t - 0.05 * x * x,
        Side::Concave => -t + 0.02 * x * x,
    }
}

fn template() -> SidePair<Profile> {
    let profile = |side| {
        Profile::from_sections(
            side,
            SECTIONS.map(|s| {
                let curve = SectionCurve::from_points((0..POINTS).map(|i| {
                    let x = -4.0 + i as f64 * 0.05;
                    Point2D::new(x, surface(side, s, x))
                }));
                (s, curve)
            }),
        )
    };
    SidePair::new(profile(Side::Convex), profile(Side::Concave))
}

/// Displaced, thickened and noisy scan; concave scanned trailing edge first.
fn scan(args: &Args) -> SidePair<Profile> {
    let mut rng = StdRng::seed_from_u64(args.seed);
    let mut profile = |side: Side| {
        let outward = match side {
            Side::Convex => args.thickness,
            Side::Concave => -args.thickness,
        };
        let sections: Vec<_> = SECTIONS
            .map(|s| {
                let curve = SectionCurve::from_points((0..POINTS).map(|i| {
                    let x = -4.0 + i as f64 * 0.05;
                    let noise = rng.gen_range(-args.noise..=args.noise);
                    Point2D::new(x + args.dx, surface(side, s, x) + outward + args.dy + noise)
                }));
                match side {
                    Side::Convex => (s, curve),
                    Side::Concave => (s, curve.reversed()),
                }
            })
            .collect();
        Profile::from_sections(side, sections)
    };
    SidePair::new(profile(Side::Convex), profile(Side::Concave))
}

fn load_config(args: &Args) -> PramanaConfig {
    let path = Path::new(&args.config);
    let mut config = if path.exists() {
        PramanaConfig::load(path).unwrap_or_else(|e| {
            eprintln!("Warning: Failed to load config: {}, using defaults", e);
            PramanaConfig::default()
        })
    } else {
        println!("Config not found at {}, using defaults", path.display());
        PramanaConfig::default()
    };
    if let Some(method) = args.method {
        config.best_fit.method = match method {
            Method::BorderTrim => BestFitMethod::BorderTrim,
            Method::Resampled => BestFitMethod::Resampled,
        };
    }
    config
}

fn main() -> pramana::Result<()> {
    env_logger::init();
    let args = Args::parse();
    let config = load_config(&args);

    println!(
        "Scan: dx={:+.3} dy={:+.3} thickness={:.3} noise={:.3}",
        args.dx, args.dy, args.thickness, args.noise
    );
    let mut workpiece = Workpiece::new(config, template(), scan(&args))?;

    let scrap = workpiece.scrap_check()?;
    for finding in [&scrap.convex, &scrap.concave].into_iter().flatten() {
        println!(
            "Scrap: {} side, section {}, {} points below threshold",
            finding.side,
            finding.section,
            finding.bad_values.len()
        );
    }
    if workpiece.no_stock()? {
        println!("No stock left on the control sections");
    }

    let before = workpiece.mean_control_stock()?;
    let correction = workpiece.apply_best_fit()?;
    let after = workpiece.mean_control_stock()?;
    println!(
        "Best fit ({:?}): dx={:+.2} dy={:+.2}, mean control stock {:?} -> {:?}",
        workpiece.config().best_fit.method,
        correction.dx,
        correction.dy,
        before,
        after
    );

    let area = workpiece.area_stock()?;
    println!("\nArea stock (mm):");
    println!("{:>6} {:>10} {:>10}", "zone", "convex", "concave");
    for (id, convex) in area.convex.means() {
        let concave = area.concave.zone(id).and_then(|z| z.mean);
        println!("{:>6} {:>10} {:>10}", id, fmt(convex), fmt(concave));
    }

    let special = workpiece.special_stock()?;
    println!(
        "\nSpecial stock (anomaly: {}, full chord: {}):",
        special.anomaly_detected, special.full_domain
    );
    for (id, mean) in special.means() {
        println!("{:>6} {:>10}", id, fmt(mean));
    }

    println!("\nC2:");
    for m in workpiece.c2()? {
        println!(
            "  section {:>3}: {:>6.3} (nominal {:.3}, deviation {:+.2})",
            m.section,
            m.reported(),
            m.nominal,
            m.deviation()
        );
    }
    Ok(())
}

fn fmt(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{v:.3}"))
}
