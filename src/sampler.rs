use crate::config::Config;
use crate::error::ConfigError;
use crate::time::Time;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand_distr::{Bernoulli, Distribution, Exp, Gamma};

/// Erlang shape of the delay magnitude.
pub const DELAY_SHAPE: f64 = 3.0;
/// Erlang shape of the turnaround duration.
pub const TURNAROUND_SHAPE: f64 = 7.0;

/// Time-of-day windows `[from, to)` in seconds and their mean inter-arrival
/// time. Anything before the first window has no traffic.
pub const ARRIVAL_WINDOWS: [(f64, f64, f64); 5] = [
    (18000.0, 28800.0, 120.0),
    (28800.0, 39600.0, 30.0),
    (39600.0, 54000.0, 150.0),
    (54000.0, 72000.0, 30.0),
    (72000.0, 86400.0, 120.0),
];

fn window(t: Time) -> Option<usize> {
    let tod = t.time_of_day();
    ARRIVAL_WINDOWS
        .iter()
        .position(|(from, to, _)| *from <= tod && tod < *to)
}

/// Mean inter-arrival time at `t`, or `None` inside the night window.
pub fn mean_inter_arrival(t: Time) -> Option<f64> {
    window(t).map(|i| ARRIVAL_WINDOWS[i].2)
}

/// All stochastic draws of a run, taken from one seeded generator so that a
/// run is reproducible from its seed.
#[derive(Debug, Clone)]
pub struct Sampler {
    rng: StdRng,
    arrivals: Vec<Exp<f64>>,
    delayed: Bernoulli,
    delay: Gamma<f64>,
    turnaround: Gamma<f64>,
}

impl Sampler {
    pub fn new(config: &Config) -> Result<Self, ConfigError> {
        let arrivals = ARRIVAL_WINDOWS
            .iter()
            .map(|(_, _, mean)| {
                Exp::new(1.0 / mean)
                    .map_err(|e| ConfigError::invalid("arrival_windows", e.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        let delayed = Bernoulli::new(config.p_delay)
            .map_err(|e| ConfigError::invalid("p_delay", e.to_string()))?;
        let delay = Gamma::new(DELAY_SHAPE, config.u_delay)
            .map_err(|e| ConfigError::invalid("u_delay", e.to_string()))?;
        let turnaround = Gamma::new(TURNAROUND_SHAPE, config.u_turnaround)
            .map_err(|e| ConfigError::invalid("u_turnaround", e.to_string()))?;

        Ok(Sampler {
            rng: StdRng::seed_from_u64(config.seed),
            arrivals,
            delayed,
            delay,
            turnaround,
        })
    }

    /// Draws the gap until the next arrival, exponentially distributed with the
    /// mean of the window containing `t`. `None` means no traffic at `t`.
    pub fn arrival_intensity(&mut self, t: Time) -> Option<f64> {
        let i = window(t)?;
        Some(self.arrivals[i].sample(&mut self.rng))
    }

    pub fn is_delayed(&mut self) -> bool {
        self.delayed.sample(&mut self.rng)
    }

    pub fn delay_magnitude(&mut self) -> f64 {
        self.delay.sample(&mut self.rng)
    }

    pub fn turnaround_duration(&mut self) -> f64 {
        self.turnaround.sample(&mut self.rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sampler(config: Config) -> Sampler {
        Sampler::new(&config).unwrap()
    }

    #[test]
    fn test_night_window_has_no_arrivals() {
        let mut s = sampler(Config::default());
        assert_eq!(None, s.arrival_intensity(Time(0.0)));
        assert_eq!(None, s.arrival_intensity(Time(3600.0)));
        assert_eq!(None, s.arrival_intensity(Time(17999.9)));
        assert!(s.arrival_intensity(Time(18000.0)).is_some());
    }

    #[test]
    fn test_window_boundaries() {
        assert_eq!(None, mean_inter_arrival(Time(17999.0)));
        assert_eq!(Some(120.0), mean_inter_arrival(Time(18000.0)));
        assert_eq!(Some(30.0), mean_inter_arrival(Time(28800.0)));
        assert_eq!(Some(150.0), mean_inter_arrival(Time(39600.0)));
        assert_eq!(Some(30.0), mean_inter_arrival(Time(54000.0)));
        assert_eq!(Some(120.0), mean_inter_arrival(Time(72000.0)));
        assert_eq!(Some(120.0), mean_inter_arrival(Time(86399.0)));
        assert_eq!(None, mean_inter_arrival(Time(86400.0 + 3600.0)));
        assert_eq!(Some(30.0), mean_inter_arrival(Time(86400.0 + 30000.0)));
    }

    #[test]
    fn test_same_seed_same_stream() {
        let mut a = sampler(Config::default());
        let mut b = sampler(Config::default());
        for _ in 0..100 {
            assert_eq!(
                a.arrival_intensity(Time(30000.0)),
                b.arrival_intensity(Time(30000.0))
            );
            assert_eq!(a.is_delayed(), b.is_delayed());
            assert_eq!(a.delay_magnitude(), b.delay_magnitude());
            assert_eq!(a.turnaround_duration(), b.turnaround_duration());
        }
    }

    #[test]
    fn test_delay_probability_extremes() {
        let mut never = sampler(Config {
            p_delay: 0.0,
            ..Config::default()
        });
        let mut always = sampler(Config {
            p_delay: 1.0,
            ..Config::default()
        });
        for _ in 0..100 {
            assert!(!never.is_delayed());
            assert!(always.is_delayed());
        }
    }

    #[test]
    fn test_sample_means_are_plausible() {
        let mut s = sampler(Config::default());
        let n = 20_000;
        let gap = (0..n)
            .filter_map(|_| s.arrival_intensity(Time(30000.0)))
            .sum::<f64>()
            / n as f64;
        assert!((27.0..33.0).contains(&gap), "mean gap {gap}");

        let turnaround = (0..n).map(|_| s.turnaround_duration()).sum::<f64>() / n as f64;
        let expected = TURNAROUND_SHAPE * 45.0 * 60.0;
        assert!(
            (turnaround - expected).abs() < expected * 0.05,
            "mean turnaround {turnaround}"
        );

        let delay = (0..n).map(|_| s.delay_magnitude()).sum::<f64>() / n as f64;
        assert!((delay - 1500.0).abs() < 75.0, "mean delay {delay}");
    }
}
