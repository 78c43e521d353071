//! width_join: attach NVDB road width to road-network links offline.
//!
//! Reads a saved `veglenkesekvenser` response and a saved `vegobjekter/838`
//! response, joins width onto each road link by nearest midpoint, and
//! optionally writes the result as GeoJSON.
//!
//! ```text
//! width_join <roadnet.json> <width.json> [out.geojson] [vehicle_width_m]
//! ```
//!
//! Set `RUST_LOG=debug` to see per-phase counts from the matcher.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::time::Instant;

use anyhow::{Context, Result, bail};
use log::info;

use rw_core::parse_number;
use rw_match::{SpatialMatcher, VehicleFilter};
use rw_nvdb::{LayerKind, ObjectResponse, RoadnetResponse, to_feature_collection};

fn open(path: &str) -> Result<BufReader<File>> {
    let file = File::open(path).with_context(|| format!("opening {path}"))?;
    Ok(BufReader::new(file))
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.len() < 2 {
        bail!("usage: width_join <roadnet.json> <width.json> [out.geojson] [vehicle_width_m]");
    }

    println!("=== width_join ===");

    // 1. Decode both layers.
    let mut roads = RoadnetResponse::from_reader(open(&args[0])?)
        .with_context(|| format!("decoding {}", args[0]))?
        .into_features();
    let widths = ObjectResponse::from_reader(open(&args[1])?)
        .with_context(|| format!("decoding {}", args[1]))?
        .into_features(LayerKind::Width)?;
    println!("Road links: {}  |  Width objects: {}", roads.len(), widths.len());

    // 2. Join.
    let matcher = SpatialMatcher::default();
    let opts = matcher.options();
    println!(
        "Cell: {}°  |  Max distance: {} m",
        opts.cell_size_degrees, opts.max_match_meters
    );

    let t0 = Instant::now();
    let report = matcher.attach_nearest_attribute(&mut roads, &widths);
    let elapsed = t0.elapsed();

    println!();
    println!("Indexed:   {:>8}  (skipped {})", report.indexed, report.skipped_reference);
    println!("Matched:   {:>8}", report.matched);
    println!("Unmatched: {:>8}  (skipped {})", report.unmatched, report.skipped_target);
    println!("Join time: {:.3} ms", elapsed.as_secs_f64() * 1e3);

    // 3. Optional vehicle clearance.
    if let Some(text) = args.get(3) {
        let width = parse_number(text).with_context(|| format!("vehicle width {text:?}"))?;
        let filter = VehicleFilter::new(Some(width));
        println!(
            "Too narrow for {width} m: {} of {} links",
            filter.too_narrow(&roads).len(),
            roads.len()
        );
    }

    // 4. Optional GeoJSON output.
    if let Some(out) = args.get(2) {
        let collection = to_feature_collection(&roads)?;
        let file = File::create(out).with_context(|| format!("creating {out}"))?;
        serde_json::to_writer(BufWriter::new(file), &collection)?;
        info!("wrote {} features to {out}", roads.len());
        println!("Output: {out}");
    }

    Ok(())
}
