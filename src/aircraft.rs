use crate::time::Time;

pub type AircraftId = u64;

/// Lifecycle of an aircraft at the airport. Phases only move forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Phase {
    Scheduled,
    DelayWait,
    WaitingForLanding,
    Landing,
    TurningAround,
    WaitingForTakeoff,
    TakingOff,
    Done,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Aircraft {
    pub id: AircraftId,
    pub scheduled: Time,
    pub delay: f64,
    pub landing_queue_wait: Option<f64>,
    pub takeoff_queue_wait: Option<f64>,
    pub phase: Phase,
}

impl Aircraft {
    pub fn new(id: AircraftId, scheduled: Time, delay: f64) -> Aircraft {
        Aircraft {
            id,
            scheduled,
            delay,
            landing_queue_wait: None,
            takeoff_queue_wait: None,
            phase: Phase::Scheduled,
        }
    }

    pub fn is_delayed(&self) -> bool {
        self.delay > 0.0
    }

    pub fn is_done(&self) -> bool {
        self.phase == Phase::Done
    }

    pub(crate) fn enter(&mut self, next: Phase) {
        debug_assert!(
            next > self.phase,
            "aircraft {} cannot go from {:?} to {:?}",
            self.id,
            self.phase,
            next
        );
        self.phase = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_aircraft() {
        let ac = Aircraft::new(7, Time(18000.0), 0.0);
        assert_eq!(Phase::Scheduled, ac.phase);
        assert!(!ac.is_delayed());
        assert!(!ac.is_done());
        assert_eq!(None, ac.landing_queue_wait);
    }

    #[test]
    fn test_phases_are_ordered() {
        let mut ac = Aircraft::new(1, Time(0.0), 120.0);
        assert!(ac.is_delayed());
        for phase in [
            Phase::DelayWait,
            Phase::WaitingForLanding,
            Phase::Landing,
            Phase::TurningAround,
            Phase::WaitingForTakeoff,
            Phase::TakingOff,
            Phase::Done,
        ] {
            ac.enter(phase);
        }
        assert!(ac.is_done());
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic]
    fn test_phase_cannot_go_back() {
        let mut ac = Aircraft::new(1, Time(0.0), 0.0);
        ac.enter(Phase::Landing);
        ac.enter(Phase::WaitingForLanding);
    }
}
