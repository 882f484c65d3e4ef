use std::path::Path;

use anyhow::{Context, Result};
use rust_decimal::Decimal;
use tracing::{debug, info};
use vehicle_tax_core::format::{Locale, LocaleFormatter};
use vehicle_tax_core::{CombinedTaxResult, TaxResultAggregator, TaxScheduleConfig};
use vehicle_tax_data::VehicleLoader;

use crate::config::{AppConfig, ConfigError};
use crate::report::{self, BatchRow};

/// Schedule and formatter shared by every command.
#[derive(Debug, Clone)]
pub struct App {
    schedule: TaxScheduleConfig,
    formatter: LocaleFormatter,
}

impl App {
    pub fn new(
        schedule: TaxScheduleConfig,
        locale: Locale,
    ) -> Self {
        Self {
            schedule,
            formatter: LocaleFormatter::new(locale),
        }
    }

    /// Builds the app from the loaded configuration and an optional
    /// command line locale.
    pub fn from_config(
        config: &AppConfig,
        locale_override: Option<&str>,
    ) -> Result<Self, ConfigError> {
        let locale = config.locale(locale_override)?;
        debug!(%locale, custom_schedule = config.schedule.is_some(), "building app");
        Ok(Self::new(config.schedule(), locale))
    }

    fn aggregator(&self) -> TaxResultAggregator<'_> {
        TaxResultAggregator::new(&self.schedule, &self.formatter)
    }

    pub fn compute(
        &self,
        power: Decimal,
        weight: Decimal,
    ) -> CombinedTaxResult {
        self.aggregator().compute_combined(power, weight)
    }

    /// Output of `vehicle-tax calc`.
    pub fn calc(
        &self,
        power: Decimal,
        weight: Decimal,
        json: bool,
    ) -> Result<String> {
        let result = self.compute(power, weight);
        info!(%power, %weight, monthly_total = %result.monthly_total, "calculated");
        if json {
            let mut text =
                serde_json::to_string_pretty(&result).context("Failed to serialize result")?;
            text.push('\n');
            Ok(text)
        } else {
            Ok(report::render_combined(&result, &self.formatter))
        }
    }

    /// Output of `vehicle-tax batch`.
    pub fn batch(
        &self,
        file: &Path,
    ) -> Result<String> {
        let vehicles = VehicleLoader::load_from_file(file)
            .with_context(|| format!("Failed to load vehicles from: {}", file.display()))?;
        info!(count = vehicles.len(), file = %file.display(), "loaded vehicles");

        let aggregator = self.aggregator();
        let rows: Vec<BatchRow> = vehicles
            .into_iter()
            .map(|vehicle| {
                let result = vehicle.tax(&aggregator);
                BatchRow {
                    name: vehicle.name,
                    power_total: result.power_total,
                    weight_total: result.weight_total,
                    monthly_total: result.monthly_total,
                }
            })
            .collect();

        Ok(report::render_batch(&rows, &self.formatter))
    }

    /// Output of `vehicle-tax schedule`.
    pub fn schedule(&self) -> String {
        report::render_schedule(&self.schedule, &self.formatter)
    }
}
