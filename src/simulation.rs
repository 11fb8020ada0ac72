use crate::aircraft::{Aircraft, AircraftId, Phase};
use crate::config::Config;
use crate::error::ConfigError;
use crate::runway::{Operation, Request, Runway};
use crate::sampler::Sampler;
use crate::scheduler::Scheduler;
use crate::stats::Stats;
use crate::time::{SECONDS_PER_HOUR, Time};
use tracing::{debug, info, info_span, trace};


/// How long the generator sleeps when the current hour has no traffic.
pub const QUIESCENT_STEP: f64 = SECONDS_PER_HOUR;

/// Continuations carried by the event queue. Each one holds only what the
/// next step of its process needs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Event {
    /// Next step of the arrival generator.
    Generate,
    /// Delay (if any) is over; ask for a runway unit to land.
    RequestLanding(AircraftId),
    /// Landing roll finished; give the unit back.
    LandingCleared(AircraftId),
    /// Turnaround finished; ask for a runway unit to take off.
    RequestTakeoff(AircraftId),
    /// Takeoff finished; give the unit back.
    TakeoffCleared(AircraftId),
}

/// Everything one run owns: clock, randomness, runway, aircraft and samples.
#[derive(Debug)]
pub struct Simulation {
    config: Config,
    scheduler: Scheduler<Event>,
    sampler: Sampler,
    runway: Option<Runway>,
    aircraft: Vec<Aircraft>,
    stats: Stats,
}

/// Result of a finished run.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub seed: u64,
    pub ended_at: Time,
    pub aircraft: Vec<Aircraft>,
    pub stats: Stats,
    pub peak_runway_use: usize,
}

impl RunOutcome {
    pub fn completed(&self) -> usize {
        self.aircraft.iter().filter(|a| a.is_done()).count()
    }
}

/// Samples of several independent runs pooled together.
#[derive(Debug, Clone)]
pub struct Replications {
    pub seeds: Vec<u64>,
    pub stats: Stats,
    pub aircraft_spawned: usize,
    pub aircraft_completed: usize,
    pub peak_runway_use: usize,
}

impl Simulation {
    /// Builds an idle run context. Nothing is scheduled until
    /// [`Simulation::start_generator`] or [`Simulation::spawn_aircraft`].
    pub fn new(config: Config) -> Result<Simulation, ConfigError> {
        config.validate()?;
        let sampler = Sampler::new(&config)?;
        let runway = (!config.arrivals_only).then(|| Runway::new(config.num_airstrips));
        Ok(Simulation {
            config,
            scheduler: Scheduler::new(),
            sampler,
            runway,
            aircraft: vec![],
            stats: Stats::default(),
        })
    }

    pub fn now(&self) -> Time {
        self.scheduler.now()
    }

    pub fn next_event_at(&self) -> Option<Time> {
        self.scheduler.peek_time()
    }

    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    pub fn aircraft(&self, id: AircraftId) -> Option<&Aircraft> {
        id.checked_sub(1)
            .and_then(|i| self.aircraft.get(i as usize))
    }

    pub fn runway(&self) -> Option<&Runway> {
        self.runway.as_ref()
    }

    pub fn start_generator(&mut self) {
        self.scheduler.schedule_at(self.now(), Event::Generate);
    }

    /// Creates an aircraft scheduled now and starts its lifecycle. Ids start
    /// at 1 and follow creation order.
    ///
    /// An undelayed aircraft asks for the runway before any other event due at
    /// this instant runs, so a unit released right now goes to it rather than
    /// to a queued takeoff.
    pub fn spawn_aircraft(&mut self, delay: f64) -> AircraftId {
        let now = self.now();
        let id = self.aircraft.len() as AircraftId + 1;
        let aircraft = Aircraft::new(id, now, delay);
        let delayed = aircraft.is_delayed();
        self.aircraft.push(aircraft);
        debug!(id, %now, delay, "aircraft spawned");
        if delayed {
            self.enter(id, Phase::DelayWait);
            self.scheduler.schedule_in(delay, Event::RequestLanding(id));
        } else {
            self.request_runway(id, Operation::Landing);
        }
        id
    }

    /// Runs every event due strictly before `horizon`, then parks the clock there.
    pub fn run_until(&mut self, horizon: Time) {
        while let Some(event) = self.scheduler.pop_before(horizon) {
            trace!(now = %self.now(), ?event, "dispatch");
            self.dispatch(event);
        }
        self.scheduler.advance_to(horizon);
    }

    /// Full run over the configured horizon.
    pub fn run(mut self) -> RunOutcome {
        let span = info_span!("run", seed = self.config.seed);
        let _guard = span.enter();

        info!(
            horizon = self.config.sim_time,
            runway_units = self.runway.as_ref().map(Runway::capacity),
            "simulation started"
        );
        self.start_generator();
        self.run_until(Time(self.config.sim_time));
        let outcome = self.finish();
        info!(
            spawned = outcome.aircraft.len(),
            completed = outcome.completed(),
            peak_runway_use = outcome.peak_runway_use,
            "simulation finished"
        );
        outcome
    }

    /// Consumes the run context. Aircraft still in flight keep whatever phase
    /// they reached.
    pub fn finish(self) -> RunOutcome {
        RunOutcome {
            seed: self.config.seed,
            ended_at: self.scheduler.now(),
            peak_runway_use: self.runway.as_ref().map_or(0, Runway::peak),
            aircraft: self.aircraft,
            stats: self.stats,
        }
    }

    fn dispatch(&mut self, event: Event) {
        match event {
            Event::Generate => self.generate(),
            Event::RequestLanding(id) => self.request_runway(id, Operation::Landing),
            Event::LandingCleared(id) => {
                self.release_runway();
                let turnaround = self.sampler.turnaround_duration();
                self.enter(id, Phase::TurningAround);
                self.scheduler.schedule_in(turnaround, Event::RequestTakeoff(id));
            }
            Event::RequestTakeoff(id) => self.request_runway(id, Operation::Takeoff),
            Event::TakeoffCleared(id) => {
                self.release_runway();
                self.enter(id, Phase::Done);
                debug!(id, now = %self.now(), "aircraft departed");
            }
        }
    }

    fn generate(&mut self) {
        let now = self.now();
        match self.sampler.arrival_intensity(now) {
            None => {
                self.stats.record_inter_arrival(0.0, now);
                self.scheduler.schedule_in(QUIESCENT_STEP, Event::Generate);
            }
            Some(gap) => {
                let gap = gap.max(self.config.t_guard);
                let delay = if self.sampler.is_delayed() {
                    self.sampler.delay_magnitude()
                } else {
                    0.0
                };
                self.stats.record_inter_arrival(gap, now);
                if self.runway.is_some() {
                    self.spawn_aircraft(delay);
                }
                self.scheduler.schedule_in(gap, Event::Generate);
            }
        }
    }

    fn request_runway(&mut self, id: AircraftId, operation: Operation) {
        let waiting = match operation {
            Operation::Landing => Phase::WaitingForLanding,
            Operation::Takeoff => Phase::WaitingForTakeoff,
        };
        self.enter(id, waiting);
        let request = Request {
            aircraft: id,
            operation,
            requested_at: self.now(),
        };
        let granted = self.runway.as_mut().and_then(|r| r.request(request));
        match granted {
            Some(request) => self.grant(request),
            None => trace!(id, %operation, "queued for runway"),
        }
    }

    fn release_runway(&mut self) {
        if let Some(next) = self.runway.as_mut().and_then(Runway::release) {
            self.grant(next);
        }
    }

    fn grant(&mut self, request: Request) {
        let now = self.now();
        let wait = now - request.requested_at;
        let id = request.aircraft;
        debug!(id, operation = %request.operation, %now, wait, "runway granted");

        let (phase, hold, cleared) = match request.operation {
            Operation::Landing => {
                self.stats.record_landing_wait(wait, now);
                (Phase::Landing, self.config.landing_time, Event::LandingCleared(id))
            }
            Operation::Takeoff => {
                self.stats.record_takeoff_wait(wait, now);
                (Phase::TakingOff, self.config.takeoff_time, Event::TakeoffCleared(id))
            }
        };
        if let Some(aircraft) = self.aircraft_mut(id) {
            match request.operation {
                Operation::Landing => aircraft.landing_queue_wait = Some(wait),
                Operation::Takeoff => aircraft.takeoff_queue_wait = Some(wait),
            }
        }
        self.enter(id, phase);
        self.scheduler.schedule_in(hold, cleared);
    }

    fn enter(&mut self, id: AircraftId, phase: Phase) {
        if let Some(aircraft) = self.aircraft_mut(id) {
            aircraft.enter(phase);
        }
    }

    fn aircraft_mut(&mut self, id: AircraftId) -> Option<&mut Aircraft> {
        id.checked_sub(1)
            .and_then(|i| self.aircraft.get_mut(i as usize))
    }
}

/// Runs `count` independent simulations seeded `seed, seed + 1, ...` and pools
/// their samples.
pub fn run_replications(config: &Config, count: u32) -> Result<Replications, ConfigError> {
    if count == 0 {
        return Err(ConfigError::invalid("replications", "must be at least 1"));
    }
    let mut pooled = Replications {
        seeds: vec![],
        stats: Stats::default(),
        aircraft_spawned: 0,
        aircraft_completed: 0,
        peak_runway_use: 0,
    };
    for i in 0..count {
        let config = Config {
            seed: config.seed.wrapping_add(i as u64),
            ..config.clone()
        };
        let outcome = Simulation::new(config)?.run();
        pooled.seeds.push(outcome.seed);
        pooled.aircraft_spawned += outcome.aircraft.len();
        pooled.aircraft_completed += outcome.completed();
        pooled.peak_runway_use = pooled.peak_runway_use.max(outcome.peak_runway_use);
        pooled.stats.merge(outcome.stats);
    }
    Ok(pooled)
}
