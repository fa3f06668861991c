//! Synthetic sales dataset generation.
//!
//! Produces rows with the same schema as the published dataset so the
//! dashboard can be exercised offline. One row per month, each attributed to
//! a single vehicle type, with recession years showing lower sales and higher
//! unemployment.

use std::path::Path;

use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::Normal;

use crate::data::DataError;
use crate::domain::{Column, Month, SalesRecord, VehicleType};

/// Calendar years flagged as recessions in the synthetic data.
const RECESSION_YEARS: [i32; 9] = [1980, 1981, 1982, 1991, 2000, 2001, 2007, 2008, 2009];

#[derive(Debug, Clone)]
pub struct SampleConfig {
    pub seed: u64,
    pub start_year: i32,
    pub end_year: i32,
}

impl Default for SampleConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            start_year: 1980,
            end_year: 2023,
        }
    }
}

pub fn generate_sample(config: &SampleConfig) -> Result<Vec<SalesRecord>, DataError> {
    if config.end_year < config.start_year {
        return Err(DataError::InvalidSample(format!(
            "end year {} is before start year {}",
            config.end_year, config.start_year
        )));
    }

    let mut rng = StdRng::seed_from_u64(config.seed);
    let noise = Normal::new(0.0, 1.0).map_err(|e| DataError::InvalidSample(e.to_string()))?;

    let mut out = Vec::new();
    for year in config.start_year..=config.end_year {
        let recession = RECESSION_YEARS.contains(&year);
        for month in Month::ALL {
            let vehicle = VehicleType::ALL[rng.gen_range(0..VehicleType::ALL.len())];

            // Baselines per regime; noise is relative.
            let (sales_mean, unemployment_mean): (f64, f64) = if recession {
                (1_400.0, 6.5)
            } else {
                (3_000.0, 3.5)
            };
            let sales = (sales_mean * (1.0 + 0.2 * noise.sample(&mut rng))).max(50.0);
            let advertising = (sales * 1.2 * (1.0 + 0.15 * noise.sample(&mut rng))).max(10.0);
            let unemployment = (unemployment_mean + 0.8 * noise.sample(&mut rng)).clamp(1.0, 12.0);

            out.push(SalesRecord {
                year,
                month,
                vehicle_type: vehicle.raw_key().to_string(),
                automobile_sales: round1(sales),
                advertising_expenditure: advertising.round(),
                unemployment_rate: round1(unemployment),
                recession,
            });
        }
    }

    Ok(out)
}

/// Write rows in the published column layout.
pub fn write_sample_csv(path: &Path, records: &[SalesRecord]) -> Result<(), DataError> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record([
        Column::Year.header(),
        Column::Month.header(),
        Column::Recession.header(),
        Column::AutomobileSales.header(),
        Column::AdvertisingExpenditure.header(),
        Column::VehicleType.header(),
        Column::UnemploymentRate.header(),
    ])?;

    for r in records {
        writer.write_record([
            r.year.to_string(),
            r.month.label().to_string(),
            u8::from(r.recession).to_string(),
            r.automobile_sales.to_string(),
            r.advertising_expenditure.to_string(),
            r.vehicle_type.clone(),
            r.unemployment_rate.to_string(),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}
