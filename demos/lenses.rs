//! Runs the default time-delay model over a few named lenses.
//!
//! Set `RUST_LOG=debug` to see the intermediate curvature arguments.

use twine_lensing::models::lensing::time_delay::{
    DelayError, DelayModel, Ellipticities, TimeDelayResult, Uncertainty,
};
use uom::si::{
    f64::{Length, Mass, Ratio},
    length::meter,
    mass::kilogram,
    ratio::ratio,
    time::{day, second},
};

struct Example {
    name: &'static str,
    mass: f64,
    first_path: f64,
    second_path: f64,
    ellipticity: f64,
}

const EXAMPLES: [Example; 4] = [
    Example {
        name: "reference galaxy",
        mass: 2e41,
        first_path: 1.892e20,
        second_path: 2.176e9,
        ellipticity: 0.0,
    },
    Example {
        name: "compact group",
        mass: 1e41,
        first_path: 3e9,
        second_path: 1e9,
        ellipticity: 0.0,
    },
    Example {
        name: "elliptical galaxy",
        mass: 2e41,
        first_path: 2e9,
        second_path: 1e9,
        ellipticity: 0.2,
    },
    Example {
        name: "massive cluster",
        mass: 3e45,
        first_path: 1.892e20,
        second_path: 2.176e9,
        ellipticity: 0.0,
    },
];

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let model = DelayModel::default();

    println!("Single lenses");
    for example in &EXAMPLES {
        let result = model.time_delay(
            Mass::new::<kilogram>(example.mass),
            Length::new::<meter>(example.first_path),
            Length::new::<meter>(example.second_path),
            Ratio::new::<ratio>(example.ellipticity),
            Uncertainty::default(),
        );
        report(example.name, &result);
    }

    let invalid = model.time_delay(
        Mass::new::<kilogram>(-1e41),
        Length::new::<meter>(1.892e20),
        Length::new::<meter>(2.176e9),
        Ratio::new::<ratio>(0.0),
        Uncertainty::default(),
    );
    report("negative mass", &invalid);

    println!("\nBatch");
    let masses: Vec<_> = EXAMPLES.iter().map(|e| Mass::new::<kilogram>(e.mass)).collect();
    let first: Vec<_> = EXAMPLES.iter().map(|e| Length::new::<meter>(e.first_path)).collect();
    let second_paths: Vec<_> = EXAMPLES.iter().map(|e| Length::new::<meter>(e.second_path)).collect();
    let ellipticity: Vec<_> = EXAMPLES.iter().map(|e| Ratio::new::<ratio>(e.ellipticity)).collect();

    match model.time_delays(
        &masses,
        &first,
        &second_paths,
        Ellipticities::PerLens(&ellipticity),
        Uncertainty::default(),
    ) {
        Ok(results) => {
            for (example, result) in EXAMPLES.iter().zip(&results) {
                report(example.name, result);
            }
        }
        Err(err) => println!("  batch rejected: {err}"),
    }
}

fn report(name: &str, result: &Result<TimeDelayResult, DelayError>) {
    match result {
        Ok(r) => println!(
            "  {name:<18} {:>12.4e} s ± {:.4e} s ({:.3} days), {} field, mu={:.3e}, lambda={:.4e} s",
            r.value.get::<second>(),
            r.error.get::<second>(),
            r.value.get::<day>(),
            r.regime,
            r.mu,
            r.lambda.get::<second>(),
        ),
        Err(err) => println!("  {name:<18} error: {err} ({:?})", err.kind()),
    }
}
