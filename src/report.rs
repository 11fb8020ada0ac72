use crate::config::Config;
use crate::sampler::mean_inter_arrival;
use crate::simulation::Replications;
use crate::stats::{HOURS, HourlyProfile, HourlySummary};
use crate::time::{SECONDS_PER_HOUR, Time};
use colored::Colorize;
use serde::Serialize;
use tabled::settings::{Alignment, Style};
use tabled::{Table, Tabled};

/// Waits at or above this many seconds are highlighted.
const LONG_WAIT: f64 = 300.0;
const NOTABLE_WAIT: f64 = 60.0;

/// Hour-of-day averages of a finished run (or pooled replications).
///
/// Series are indexed by hour 0..=23. An hour with no samples is `None`
/// unless the report was built with `zero_fill`.
#[derive(Debug, Serialize)]
pub struct Report {
    pub seeds: Vec<u64>,
    pub sim_time: f64,
    pub num_airstrips: usize,
    pub arrivals_only: bool,
    pub aircraft_spawned: usize,
    pub aircraft_completed: usize,
    pub peak_runway_use: usize,
    pub inter_arrival: Vec<Option<f64>>,
    pub landing_wait: Vec<Option<f64>>,
    pub takeoff_wait: Vec<Option<f64>>,
    #[serde(skip)]
    summary: HourlySummary,
}

#[derive(Tabled)]
struct HourRow {
    #[tabled(rename = "Hour")]
    hour: String,
    #[tabled(rename = "Mean gap (s)")]
    expected_gap: String,
    #[tabled(rename = "Avg gap (s)")]
    gap: String,
    #[tabled(rename = "Landing wait (s)")]
    landing: String,
    #[tabled(rename = "Takeoff wait (s)")]
    takeoff: String,
    #[tabled(rename = "Landings")]
    landings: u64,
    #[tabled(rename = "Takeoffs")]
    takeoffs: u64,
}

fn series(profile: &HourlyProfile, zero_fill: bool) -> Vec<Option<f64>> {
    if zero_fill {
        profile.zero_filled().into_iter().map(Some).collect()
    } else {
        profile.averages().to_vec()
    }
}

fn fmt_value(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{:.1}", v))
}

fn fmt_wait(value: Option<f64>) -> String {
    let text = fmt_value(value);
    match value {
        Some(v) if v >= LONG_WAIT => text.red().to_string(),
        Some(v) if v >= NOTABLE_WAIT => text.yellow().to_string(),
        _ => text,
    }
}

impl Report {
    pub fn new(config: &Config, runs: &Replications, zero_fill: bool) -> Report {
        let summary = runs.stats.summarize();
        Report {
            seeds: runs.seeds.clone(),
            sim_time: config.sim_time,
            num_airstrips: config.num_airstrips,
            arrivals_only: config.arrivals_only,
            aircraft_spawned: runs.aircraft_spawned,
            aircraft_completed: runs.aircraft_completed,
            peak_runway_use: runs.peak_runway_use,
            inter_arrival: series(&summary.inter_arrival, zero_fill),
            landing_wait: series(&summary.landing_wait, zero_fill),
            takeoff_wait: series(&summary.takeoff_wait, zero_fill),
            summary,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn headline(&self) -> String {
        let mode = if self.arrivals_only {
            "arrivals only".to_string()
        } else {
            format!("{} runway unit(s)", self.num_airstrips)
        };
        format!(
            "{} {} over {:.1} h, {} replication(s): {} aircraft, {} departed, peak runway use {}",
            "Runway simulation".bold(),
            mode,
            self.sim_time / SECONDS_PER_HOUR,
            self.seeds.len(),
            self.aircraft_spawned.to_string().cyan(),
            self.aircraft_completed.to_string().green(),
            self.peak_runway_use,
        )
    }

    pub fn table(&self) -> String {
        let rows = (0..HOURS)
            .map(|hour| HourRow {
                hour: format!("{:02}:00", hour),
                expected_gap: fmt_value(mean_inter_arrival(Time(
                    hour as f64 * SECONDS_PER_HOUR,
                ))),
                gap: fmt_value(self.inter_arrival[hour]),
                landing: fmt_wait(self.landing_wait[hour]),
                takeoff: fmt_wait(self.takeoff_wait[hour]),
                landings: self.summary.landing_wait.bucket(hour).count,
                takeoffs: self.summary.takeoff_wait.bucket(hour).count,
            })
            .collect::<Vec<_>>();
        let mut table = Table::new(rows);
        table.with(Style::rounded());
        table.with(Alignment::left());
        table.to_string()
    }
}
