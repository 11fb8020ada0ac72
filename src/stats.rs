use crate::time::Time;

pub const HOURS: usize = 24;

/// One observation and the simulated time it was taken at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub value: f64,
    pub at: Time,
}

/// Raw samples of a run, in recording order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Stats {
    pub inter_arrivals: Vec<Sample>,
    pub landing_waits: Vec<Sample>,
    pub takeoff_waits: Vec<Sample>,
}

impl Stats {
    pub fn record_inter_arrival(&mut self, gap: f64, at: Time) {
        self.inter_arrivals.push(Sample { value: gap, at });
    }

    pub fn record_landing_wait(&mut self, wait: f64, at: Time) {
        debug_assert!(wait >= 0.0, "negative landing wait {wait}");
        self.landing_waits.push(Sample { value: wait, at });
    }

    pub fn record_takeoff_wait(&mut self, wait: f64, at: Time) {
        debug_assert!(wait >= 0.0, "negative takeoff wait {wait}");
        self.takeoff_waits.push(Sample { value: wait, at });
    }

    /// Appends the samples of another run.
    pub fn merge(&mut self, other: Stats) {
        self.inter_arrivals.extend(other.inter_arrivals);
        self.landing_waits.extend(other.landing_waits);
        self.takeoff_waits.extend(other.takeoff_waits);
    }

    pub fn summarize(&self) -> HourlySummary {
        HourlySummary {
            inter_arrival: HourlyProfile::from_samples(&self.inter_arrivals),
            landing_wait: HourlyProfile::from_samples(&self.landing_waits),
            takeoff_wait: HourlyProfile::from_samples(&self.takeoff_waits),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct HourBucket {
    pub sum: f64,
    pub count: u64,
}

impl HourBucket {
    /// `None` when nothing was observed in this hour.
    pub fn average(&self) -> Option<f64> {
        (self.count > 0).then(|| self.sum / self.count as f64)
    }
}

/// A series reduced to hour-of-day buckets.
#[derive(Debug, Clone, PartialEq)]
pub struct HourlyProfile {
    buckets: [HourBucket; HOURS],
}

impl HourlyProfile {
    pub fn from_samples(samples: &[Sample]) -> HourlyProfile {
        let mut buckets = [HourBucket::default(); HOURS];
        for sample in samples {
            let bucket = &mut buckets[sample.at.hour_of_day()];
            bucket.sum += sample.value;
            bucket.count += 1;
        }
        HourlyProfile { buckets }
    }

    pub fn bucket(&self, hour: usize) -> &HourBucket {
        &self.buckets[hour % HOURS]
    }

    pub fn averages(&self) -> [Option<f64>; HOURS] {
        self.buckets.map(|b| b.average())
    }

    /// Averages with empty hours reported as 0.0.
    pub fn zero_filled(&self) -> [f64; HOURS] {
        self.buckets.map(|b| b.average().unwrap_or(0.0))
    }

    pub fn total_count(&self) -> u64 {
        self.buckets.iter().map(|b| b.count).sum()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HourlySummary {
    pub inter_arrival: HourlyProfile,
    pub landing_wait: HourlyProfile,
    pub takeoff_wait: HourlyProfile,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(value: f64, at: f64) -> Sample {
        Sample { value, at: Time(at) }
    }

    #[test]
    fn test_bucket_by_hour() {
        let samples = vec![
            sample(10.0, 0.0),
            sample(20.0, 3599.0),
            sample(30.0, 3600.0),
            sample(40.0, 86400.0 + 10.0),
        ];
        let profile = HourlyProfile::from_samples(&samples);
        assert_eq!(HourBucket { sum: 70.0, count: 3 }, *profile.bucket(0));
        assert_eq!(HourBucket { sum: 30.0, count: 1 }, *profile.bucket(1));
        assert_eq!(Some(70.0 / 3.0), profile.averages()[0]);
        assert_eq!(Some(30.0), profile.averages()[1]);
        assert_eq!(4, profile.total_count());
    }

    #[test]
    fn test_empty_hours_are_absent() {
        let profile = HourlyProfile::from_samples(&[sample(0.0, 7200.0)]);
        let averages = profile.averages();
        assert_eq!(Some(0.0), averages[2]);
        assert_eq!(None, averages[3]);

        let legacy = profile.zero_filled();
        assert_eq!(0.0, legacy[2]);
        assert_eq!(0.0, legacy[3]);
    }

    #[test]
    fn test_reduction_is_idempotent() {
        let mut stats = Stats::default();
        stats.record_inter_arrival(0.0, Time(0.0));
        stats.record_inter_arrival(95.0, Time(18000.0));
        stats.record_landing_wait(12.5, Time(18100.0));
        stats.record_takeoff_wait(0.0, Time(40000.0));
        assert_eq!(stats.summarize(), stats.summarize());
    }

    #[test]
    fn test_merge_accumulates_into_same_buckets() {
        let mut a = Stats::default();
        a.record_landing_wait(10.0, Time(20000.0));
        let mut b = Stats::default();
        b.record_landing_wait(30.0, Time(20500.0));
        a.merge(b);

        let summary = a.summarize();
        assert_eq!(Some(20.0), summary.landing_wait.averages()[5]);
        assert_eq!(2, summary.landing_wait.total_count());
        assert_eq!(0, summary.takeoff_wait.total_count());
    }
}
