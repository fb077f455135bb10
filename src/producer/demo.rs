//! Deterministic demo snapshots
//!
//! Canonical-schema batches for local development, the `datagen` binary, and
//! the test suites. Values follow the daily shapes of the real feeds (solar
//! tracks daylight, gas peaks with load, wind peaks overnight) but are
//! computed, not sampled, so repeated runs produce identical files.

use crate::schema::Dataset;
use crate::Result;

use arrow_array::{ArrayRef, Float64Array, RecordBatch, StringArray, TimestampNanosecondArray};
use chrono::{DateTime, Duration, Timelike, Utc};
use std::f64::consts::PI;
use std::sync::Arc;

/// Geographic bounding box for Texas.
#[derive(Debug, Clone, Copy)]
pub struct TexasBounds {
    pub lat_min: f64,
    pub lat_max: f64,
    pub lon_min: f64,
    pub lon_max: f64,
}

impl TexasBounds {
    /// True when the coordinate falls inside the box.
    pub fn contains(&self, lat: f64, lon: f64) -> bool {
        (self.lat_min..=self.lat_max).contains(&lat) && (self.lon_min..=self.lon_max).contains(&lon)
    }
}

/// Texas state boundaries used to sanity-check producer coordinates.
pub const TEXAS_BOUNDS: TexasBounds = TexasBounds {
    lat_min: 25.84,
    lat_max: 36.50,
    lon_min: -106.65,
    lon_max: -93.51,
};

fn utf8(values: Vec<String>) -> ArrayRef {
    Arc::new(StringArray::from(values))
}

fn floats(values: Vec<f64>) -> ArrayRef {
    Arc::new(Float64Array::from(values))
}

fn timestamps_utc(values: Vec<i64>) -> ArrayRef {
    Arc::new(TimestampNanosecondArray::from(values).with_timezone("UTC"))
}

/// Hourly generation by fuel type over the trailing `days`, ending at `now`
/// truncated to the hour.
pub fn fuelmix(days: u32, now: DateTime<Utc>) -> Result<RecordBatch> {
    let fuels = ["coal", "natural gas", "nuclear", "wind", "solar", "hydro"];
    let end = now - Duration::minutes(now.minute() as i64) - Duration::seconds(now.second() as i64);
    let start = end - Duration::days(days as i64);
    let hours = (days as i64) * 24;
    let stamp = now.to_rfc3339();

    let mut periods = Vec::new();
    let mut fuel_col = Vec::new();
    let mut values = Vec::new();
    let mut updated = Vec::new();

    for h in 0..=hours {
        let period = start + Duration::hours(h);
        let hour = period.hour() as f64;
        let i = h as f64;

        for fuel in fuels {
            let value: f64 = match fuel {
                // steady baseload
                "coal" => 3000.0 + 150.0 * (i * 0.7).sin(),
                // peaking with afternoon load
                "natural gas" => {
                    let peak = if (10.0..=20.0).contains(&hour) {
                        1000.0
                    } else {
                        -500.0
                    };
                    15000.0 + peak + 1200.0 * (i * 0.3).sin()
                }
                "nuclear" => 5000.0 + 80.0 * (i * 0.9).sin(),
                // night peak
                "wind" => {
                    let night = if hour <= 3.0 || hour >= 22.0 { 2000.0 } else { 0.0 };
                    8000.0 + night + 1500.0 * (i * 0.5).sin()
                }
                // daytime only
                "solar" => {
                    if (6.0..=18.0).contains(&hour) {
                        (3000.0 * ((hour - 6.0) * PI / 12.0).sin()).max(0.0)
                    } else {
                        0.0
                    }
                }
                _ => 500.0 + 40.0 * (i * 1.1).sin(),
            };

            periods.push(period.timestamp_nanos_opt().unwrap_or(0));
            fuel_col.push(fuel.to_string());
            values.push(value.max(0.0));
            updated.push(stamp.clone());
        }
    }

    Ok(RecordBatch::try_new(
        Dataset::Fuelmix.schema().to_arrow(),
        vec![
            timestamps_utc(periods),
            utf8(fuel_col),
            floats(values),
            utf8(updated),
        ],
    )?)
}

/// Settlement point prices for the ERCOT trading hubs and load zones.
pub fn price_map(now: DateTime<Utc>) -> Result<RecordBatch> {
    let nodes = [
        ("HB_HOUSTON", 29.7604, -95.3698, 3.2, "Houston"),
        ("HB_NORTH", 32.7767, -96.7970, 2.8, "North"),
        ("HB_SOUTH", 29.4241, -98.4936, 3.0, "South"),
        ("HB_WEST", 31.9973, -102.0779, 2.4, "West"),
        ("LZ_AEN", 30.2672, -97.7431, 3.4, "Austin"),
        ("LZ_CPS", 29.4252, -98.4946, 3.1, "San Antonio"),
        ("LZ_RAYBN", 33.5779, -96.1825, 2.9, "Northeast"),
        ("LZ_LCRA", 30.5708, -98.2766, 3.3, "Hill Country"),
    ];
    let stamp = now.to_rfc3339();

    Ok(RecordBatch::try_new(
        Dataset::PriceMap.schema().to_arrow(),
        vec![
            utf8(nodes.iter().map(|n| n.0.to_string()).collect()),
            floats(nodes.iter().map(|n| n.1).collect()),
            floats(nodes.iter().map(|n| n.2).collect()),
            floats(nodes.iter().map(|n| n.3).collect()),
            utf8(nodes.iter().map(|n| n.4.to_string()).collect()),
            utf8(nodes.iter().map(|_| stamp.clone()).collect()),
        ],
    )?)
}

/// Operating generation facilities across the major Texas fleets.
pub fn generation(now: DateTime<Utc>) -> Result<RecordBatch> {
    let plants = [
        ("South Texas Project", 28.7950, -96.0480, 2560.0, "nuclear"),
        ("Comanche Peak", 32.2985, -97.7856, 2400.0, "nuclear"),
        ("W.A. Parish", 29.4778, -95.6322, 3653.0, "coal"),
        ("Martin Lake", 32.2600, -94.5700, 2250.0, "coal"),
        ("Cedar Bayou", 29.7550, -94.9250, 2258.0, "natural gas"),
        ("Roscoe Wind Farm", 32.4487, -100.5387, 781.5, "wind"),
        ("Horse Hollow", 32.1890, -100.0310, 735.5, "wind"),
        ("Permian Energy Center", 31.6300, -103.4200, 420.0, "solar"),
        ("Buchanan Dam", 30.7516, -98.4184, 54.9, "hydro"),
    ];
    let stamp = now.to_rfc3339();

    Ok(RecordBatch::try_new(
        Dataset::Generation.schema().to_arrow(),
        vec![
            utf8(plants.iter().map(|p| p.0.to_string()).collect()),
            floats(plants.iter().map(|p| p.1).collect()),
            floats(plants.iter().map(|p| p.2).collect()),
            floats(plants.iter().map(|p| p.3).collect()),
            utf8(plants.iter().map(|p| p.4.to_string()).collect()),
            utf8(plants.iter().map(|_| stamp.clone()).collect()),
        ],
    )?)
}

/// Interconnection queue projects awaiting study or approval.
pub fn queue(now: DateTime<Utc>) -> Result<RecordBatch> {
    let projects = [
        ("Bluebonnet Solar", 30.1500, -97.0200, 250.0, "solar", "Active"),
        ("Llano Estacado Wind", 34.1800, -101.7000, 480.0, "wind", "Active"),
        ("Gulf Coast Storage", 28.9500, -95.3600, 150.0, "battery", "Under Study"),
        ("Panhandle Wind II", 35.2200, -101.8300, 320.0, "wind", "Approved"),
        ("Brazos Valley Solar", 30.6280, -96.3340, 180.0, "solar", "Under Study"),
        ("Laredo Peaker", 27.5060, -99.5080, 90.0, "natural gas", "Suspended"),
    ];
    let stamp = now.to_rfc3339();

    Ok(RecordBatch::try_new(
        Dataset::Queue.schema().to_arrow(),
        vec![
            utf8(projects.iter().map(|p| p.0.to_string()).collect()),
            floats(projects.iter().map(|p| p.1).collect()),
            floats(projects.iter().map(|p| p.2).collect()),
            floats(projects.iter().map(|p| p.3).collect()),
            utf8(projects.iter().map(|p| p.4.to_string()).collect()),
            utf8(projects.iter().map(|p| p.5.to_string()).collect()),
            utf8(projects.iter().map(|_| stamp.clone()).collect()),
        ],
    )?)
}

/// Marker color per development status.
fn status_color(status: &str) -> &'static str {
    match status {
        "Major" => "#C8102E",
        "Early" => "#FF8C00",
        "Exploratory" => "#F1C40F",
        _ => "#1B365D",
    }
}

/// Marker radius scaled by tonnage: 2500 base, log-scaled growth.
fn tonnage_radius(tonnage: f64) -> f64 {
    if tonnage > 0.0 {
        2500.0 + tonnage.max(1.0).log10() * 3000.0
    } else {
        2500.0
    }
}

/// Rare-earth and critical mineral deposit sites.
pub fn minerals(now: DateTime<Utc>) -> Result<RecordBatch> {
    struct Deposit {
        name: &'static str,
        lat: f64,
        lon: f64,
        minerals: &'static str,
        tonnage: f64,
        status: &'static str,
        county: &'static str,
        details: &'static str,
    }

    let deposits = [
        Deposit {
            name: "Round Top Mountain",
            lat: 31.2766,
            lon: -105.4780,
            minerals: "REEs, Lithium, Beryllium",
            tonnage: 364_000.0,
            status: "Major",
            county: "Hudspeth",
            details: "Heavy rare-earth rhyolite deposit under active development",
        },
        Deposit {
            name: "Smackover Formation",
            lat: 33.0362,
            lon: -94.3663,
            minerals: "Lithium",
            tonnage: 120_000.0,
            status: "Major",
            county: "Cass",
            details: "Lithium-rich brine play in the East Texas Smackover trend",
        },
        Deposit {
            name: "Dell City Zinc Zone",
            lat: 31.9370,
            lon: -105.2080,
            minerals: "Zinc",
            tonnage: 15_000.0,
            status: "Early",
            county: "Hudspeth",
            details: "Carbonate-hosted zinc mineralization",
        },
        Deposit {
            name: "Panhandle Helium Field",
            lat: 35.4030,
            lon: -101.6620,
            minerals: "Helium",
            tonnage: 0.0,
            status: "Early",
            county: "Potter",
            details: "Helium extraction from legacy gas wells",
        },
        Deposit {
            name: "Brewster County REE Survey",
            lat: 29.8080,
            lon: -103.2520,
            minerals: "REEs",
            tonnage: 0.0,
            status: "Exploratory",
            county: "Brewster",
            details: "Regional geochemical survey of alkaline intrusions",
        },
        Deposit {
            name: "Cave Peak",
            lat: 31.1990,
            lon: -104.9550,
            minerals: "Molybdenum, REEs",
            tonnage: 8_000.0,
            status: "Exploratory",
            county: "Culberson",
            details: "Porphyry molybdenum system with REE enrichment",
        },
        Deposit {
            name: "Llano Uplift Prospect",
            lat: 30.7100,
            lon: -98.6800,
            minerals: "REEs, Thorium",
            tonnage: 0.0,
            status: "Discovery",
            county: "Llano",
            details: "Initial prospecting in Precambrian basement exposures",
        },
    ];
    let stamp = now.to_rfc3339();

    let tooltips: Vec<String> = deposits
        .iter()
        .map(|d| {
            format!(
                "{}\nMinerals: {}\nStatus: {}\nEst. Tonnage: {:.0} MT\nCounty: {}",
                d.name, d.minerals, d.status, d.tonnage, d.county
            )
        })
        .collect();

    Ok(RecordBatch::try_new(
        Dataset::Minerals.schema().to_arrow(),
        vec![
            utf8(deposits.iter().map(|d| d.name.to_string()).collect()),
            floats(deposits.iter().map(|d| d.lat).collect()),
            floats(deposits.iter().map(|d| d.lon).collect()),
            utf8(deposits.iter().map(|d| d.minerals.to_string()).collect()),
            floats(deposits.iter().map(|d| d.tonnage).collect()),
            utf8(deposits.iter().map(|d| d.status.to_string()).collect()),
            utf8(deposits.iter().map(|d| d.county.to_string()).collect()),
            utf8(deposits.iter().map(|d| d.details.to_string()).collect()),
            utf8(deposits
                .iter()
                .map(|d| status_color(d.status).to_string())
                .collect()),
            floats(deposits.iter().map(|d| tonnage_radius(d.tonnage)).collect()),
            utf8(tooltips),
            utf8(deposits.iter().map(|_| "Curated demo set".to_string()).collect()),
            utf8(deposits.iter().map(|_| stamp.clone()).collect()),
        ],
    )?)
}

/// Demo snapshot for any dataset. `days` only affects `fuelmix`.
pub fn demo_batch(dataset: Dataset, days: u32, now: DateTime<Utc>) -> Result<RecordBatch> {
    match dataset {
        Dataset::Fuelmix => fuelmix(days, now),
        Dataset::PriceMap => price_map(now),
        Dataset::Generation => generation(now),
        Dataset::Queue => queue(now),
        Dataset::Minerals => minerals(now),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::validate;
    use arrow_array::Array;

    #[test]
    fn test_every_demo_batch_is_canonical() {
        let now = Utc::now();
        for dataset in Dataset::ALL {
            let batch = demo_batch(dataset, 2, now).unwrap();
            assert!(batch.num_rows() > 0, "{} demo must have rows", dataset);
            let report = validate(&batch, dataset);
            assert!(
                report.is_valid() && report.extra.is_empty(),
                "{} demo must match its canonical schema exactly",
                dataset
            );
        }
    }

    #[test]
    fn test_fuelmix_row_count_and_hours() {
        let now = Utc::now();
        let batch = fuelmix(7, now).unwrap();
        // 7 days of hourly periods, inclusive endpoint, 6 fuels
        assert_eq!(batch.num_rows(), (7 * 24 + 1) * 6);
    }

    #[test]
    fn test_demo_is_deterministic() {
        let now = Utc::now();
        let a = fuelmix(1, now).unwrap();
        let b = fuelmix(1, now).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_map_coordinates_inside_texas() {
        let now = Utc::now();
        for dataset in [Dataset::PriceMap, Dataset::Generation, Dataset::Queue, Dataset::Minerals]
        {
            let batch = demo_batch(dataset, 1, now).unwrap();
            let lat_idx = batch.schema().index_of("lat").unwrap();
            let lon_idx = batch.schema().index_of("lon").unwrap();
            let lats = batch
                .column(lat_idx)
                .as_any()
                .downcast_ref::<Float64Array>()
                .unwrap();
            let lons = batch
                .column(lon_idx)
                .as_any()
                .downcast_ref::<Float64Array>()
                .unwrap();
            for i in 0..batch.num_rows() {
                assert!(
                    TEXAS_BOUNDS.contains(lats.value(i), lons.value(i)),
                    "{} row {} is outside Texas",
                    dataset,
                    i
                );
            }
        }
    }

    #[test]
    fn test_tonnage_radius_scaling() {
        assert_eq!(tonnage_radius(0.0), 2500.0);
        assert_eq!(tonnage_radius(1.0), 2500.0);
        assert!(tonnage_radius(100_000.0) > tonnage_radius(1_000.0));
    }

    #[test]
    fn test_solar_is_dark_at_night() {
        let now = Utc::now();
        let batch = fuelmix(1, now).unwrap();
        let fuels = batch
            .column(1)
            .as_any()
            .downcast_ref::<StringArray>()
            .unwrap();
        let values = batch
            .column(2)
            .as_any()
            .downcast_ref::<Float64Array>()
            .unwrap();
        let periods = batch
            .column(0)
            .as_any()
            .downcast_ref::<TimestampNanosecondArray>()
            .unwrap();

        for i in 0..batch.num_rows() {
            if fuels.value(i) == "solar" {
                let ts = DateTime::from_timestamp_nanos(periods.value(i));
                let hour = ts.hour();
                if !(6..=18).contains(&hour) {
                    assert_eq!(values.value(i), 0.0, "solar must be zero at hour {hour}");
                }
            }
        }
    }
}
