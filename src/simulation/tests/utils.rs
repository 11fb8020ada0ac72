use crate::config::Config;
use crate::simulation::Simulation;
use crate::time::Time;
use proptest::prelude::*;

/// Deterministic config with no random delays.
pub fn config(num_airstrips: usize) -> Config {
    Config {
        p_delay: 0.0,
        num_airstrips,
        ..Config::default()
    }
}

pub fn simulation(config: Config) -> Simulation {
    Simulation::new(config).unwrap()
}

/// Advances the clock to `t`, running everything due before it.
pub fn advance(sim: &mut Simulation, t: f64) {
    sim.run_until(Time(t));
}

pub fn assert_close(expected: f64, actual: f64) {
    assert!(
        (expected - actual).abs() < 1e-6,
        "expected {expected}, got {actual}"
    );
}

pub fn arb_config() -> impl Strategy<Value = Config> {
    (any::<u64>(), 0.0..1.0f64, 1..4usize, 0.0..240.0f64, 50.0..800.0f64).prop_map(
        |(seed, p_delay, num_airstrips, t_guard, u_delay)| Config {
            seed,
            p_delay,
            num_airstrips,
            t_guard,
            u_delay,
            ..Config::default()
        },
    )
}
