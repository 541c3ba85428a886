#![allow(clippy::missing_docs_in_private_items)]
#![allow(clippy::arithmetic_side_effects)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::indexing_slicing)]

use chainmap::{ChainMap, TableConfig};
use plotters::prelude::*;
use rand::{Rng, distr::Alphanumeric};
use tracing::info;
use tracing_subscriber::EnvFilter;

// Load factors compared in the plot
const LOAD_FACTORS: [f64; 3] = [0.5, 0.75, 1.0];
// Number of measurements per load factor
const STEPS: usize = 10;
// Keys added between two measurements
const KEYS_PER_STEP: usize = 5_000;
// Random keys are this many alphanumeric characters long
const KEY_LENGTH: usize = 8;
const INITIAL_CAPACITY: usize = 16;
const OUTPUT: &str = "chain_lengths.png";

#[derive(Debug, Clone, Copy)]
struct Sample {
    keys: usize,
    capacity: usize,
    longest_chain: usize,
    mean_chain: f64,
}

fn random_key(rng: &mut impl Rng) -> String {
    rng.sample_iter(Alphanumeric).take(KEY_LENGTH).map(char::from).collect()
}

// Mean length of the non-empty chains, i.e. the expected scan length of a successful lookup
fn mean_chain(map: &ChainMap<String, ()>) -> f64 {
    let (occupied, total) = map
        .chain_lengths()
        .filter(|&len| len > 0)
        .fold((0_usize, 0_usize), |(occupied, total), len| (occupied + 1, total + len));
    if occupied == 0 { 0.0 } else { total as f64 / occupied as f64 }
}

fn measure(load_factor: f64, keys: &[String]) -> Result<Vec<Sample>, Box<dyn std::error::Error>> {
    let mut map = ChainMap::with_config(TableConfig::new(INITIAL_CAPACITY, load_factor)?);
    let mut samples = Vec::with_capacity(STEPS);

    for chunk in keys.chunks(KEYS_PER_STEP) {
        for key in chunk {
            map.set(key.clone(), ())?;
        }
        samples.push(Sample {
            keys: map.len(),
            capacity: map.capacity(),
            longest_chain: map.longest_chain(),
            mean_chain: mean_chain(&map),
        });
    }

    Ok(samples)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let mut rng = rand::rng();
    let keys: Vec<String> = (0..STEPS * KEYS_PER_STEP).map(|_| random_key(&mut rng)).collect();

    let mut results = Vec::with_capacity(LOAD_FACTORS.len());
    for load_factor in LOAD_FACTORS {
        let samples = measure(load_factor, &keys)?;
        for sample in &samples {
            info!(
                load_factor,
                keys = sample.keys,
                capacity = sample.capacity,
                longest_chain = sample.longest_chain,
                mean_chain = sample.mean_chain,
                "measured"
            );
        }
        results.push(samples);
    }

    let root = BitMapBackend::new(OUTPUT, (1200, 900)).into_drawing_area();
    root.fill(&WHITE)?;
    let areas = root.split_evenly((2, 1));

    let colors = [RGBColor(220, 50, 50), RGBColor(50, 90, 220), RGBColor(50, 180, 50)];
    let max_keys = STEPS * KEYS_PER_STEP;
    let max_longest =
        results.iter().flatten().map(|s| s.longest_chain).max().unwrap_or(1) as f64 * 1.1;
    let max_mean = results.iter().flatten().map(|s| s.mean_chain).fold(1.0, f64::max) * 1.1;

    let mut longest = ChartBuilder::on(&areas[0])
        .caption("Longest chain", ("sans-serif", 30))
        .margin(15)
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d(0..max_keys, 0.0..max_longest)?;
    longest
        .configure_mesh()
        .x_desc("Keys inserted")
        .y_desc("Entries in the longest chain")
        .draw()?;

    let mut mean = ChartBuilder::on(&areas[1])
        .caption("Mean non-empty chain", ("sans-serif", 30))
        .margin(15)
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d(0..max_keys, 0.0..max_mean)?;
    mean.configure_mesh().x_desc("Keys inserted").y_desc("Entries per used bucket").draw()?;

    for ((samples, load_factor), color) in results.iter().zip(LOAD_FACTORS).zip(colors) {
        let style = ShapeStyle::from(&color).stroke_width(2);
        let label = format!("load factor {load_factor}");

        longest
            .draw_series(LineSeries::new(
                samples.iter().map(|s| (s.keys, s.longest_chain as f64)),
                style,
            ))?
            .label(label.as_str())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], style));
        mean.draw_series(LineSeries::new(samples.iter().map(|s| (s.keys, s.mean_chain)), style))?
            .label(label.as_str())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], style));
    }

    for chart in [&mut longest, &mut mean] {
        chart
            .configure_series_labels()
            .background_style(&WHITE.mix(0.8))
            .border_style(&BLACK)
            .position(SeriesLabelPosition::UpperLeft)
            .draw()?;
    }

    root.present()?;
    println!("Generated {OUTPUT}");

    Ok(())
}
