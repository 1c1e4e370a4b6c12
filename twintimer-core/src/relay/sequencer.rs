//! Relay actuation sequencer
//!
//! Relays are never switched on a bare line. A toggle runs a fixed cycle
//! measured from the first service after the request:
//!
//! ```text
//!  t:        0          rail_on            rail_off      complete
//!            │             │                  │             │
//!  relay  ───┼─────────────┴──── HIGH ────────┴─────────────┼─── LOW, state flips
//!  rail   ───┴──── LOW ────┼───── HIGH ───────┼──── LOW ────┴───
//! ```
//!
//! Every pending relay shares the same cycle; a request made while a cycle
//! is running joins it.

use twintimer_hal::{elapsed_ms, Millis, OutputPin};

use crate::config::{ActuationTiming, Settings, SettingsField};

/// The two switched loads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Relay {
    /// Schedule-driven living-room relay
    LivingRoom,
    /// Manually driven room relay
    Room,
}

impl Relay {
    pub const ALL: [Relay; 2] = [Relay::LivingRoom, Relay::Room];

    const fn index(self) -> usize {
        match self {
            Relay::LivingRoom => 0,
            Relay::Room => 1,
        }
    }

    /// Settings field holding the relay's requested state
    pub const fn state_field(self) -> SettingsField {
        match self {
            Relay::LivingRoom => SettingsField::LivingRoomState,
            Relay::Room => SettingsField::RoomState,
        }
    }
}

/// Set of relays, e.g. those switched by one cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RelaySet {
    members: [bool; 2],
}

impl RelaySet {
    pub const fn empty() -> Self {
        Self {
            members: [false; 2],
        }
    }

    pub fn insert(&mut self, relay: Relay) {
        self.members[relay.index()] = true;
    }

    pub fn contains(&self, relay: Relay) -> bool {
        self.members[relay.index()]
    }

    pub fn is_empty(&self) -> bool {
        !self.members.iter().any(|&m| m)
    }

    pub fn iter(&self) -> impl Iterator<Item = Relay> + '_ {
        Relay::ALL.into_iter().filter(|r| self.contains(*r))
    }
}

/// Output lines of the relay board
pub struct RelayBank<P> {
    power: P,
    living_room: P,
    room: P,
}

impl<P: OutputPin> RelayBank<P> {
    /// Take the lines and drive them all low
    pub fn new(mut power: P, mut living_room: P, mut room: P) -> Self {
        power.set_low();
        living_room.set_low();
        room.set_low();
        Self {
            power,
            living_room,
            room,
        }
    }

    /// Auxiliary power rail
    pub fn power(&self) -> &P {
        &self.power
    }

    pub fn line(&self, relay: Relay) -> &P {
        match relay {
            Relay::LivingRoom => &self.living_room,
            Relay::Room => &self.room,
        }
    }

    fn line_mut(&mut self, relay: Relay) -> &mut P {
        match relay {
            Relay::LivingRoom => &mut self.living_room,
            Relay::Room => &mut self.room,
        }
    }
}

/// Position within the actuation cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Phase {
    /// Nothing pending
    Idle,
    /// Relay lines driven, rail still off
    PowerRampUp,
    /// Rail on
    HoldPower,
    /// Rail off again, waiting to release the relay lines
    PowerRampDown,
}

/// Drives pending relay toggles through the actuation cycle
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ActuationSequencer {
    timing: ActuationTiming,
    pending: [bool; 2],
    started_ms: Option<Millis>,
}

impl ActuationSequencer {
    pub const fn new(timing: ActuationTiming) -> Self {
        Self {
            timing,
            pending: [false; 2],
            started_ms: None,
        }
    }

    /// Queue a toggle; returns false if one was already pending
    pub fn request(&mut self, relay: Relay) -> bool {
        let slot = &mut self.pending[relay.index()];
        let newly = !*slot;
        *slot = true;
        newly
    }

    pub fn is_pending(&self, relay: Relay) -> bool {
        self.pending[relay.index()]
    }

    /// Check if any toggle is pending
    pub fn is_active(&self) -> bool {
        self.pending.iter().any(|&p| p)
    }

    /// Cycle phase at `now`
    pub fn phase(&self, now: Millis) -> Phase {
        if !self.is_active() {
            return Phase::Idle;
        }
        let t = self.started_ms.map_or(0, |start| elapsed_ms(now, start));
        if t > self.timing.rail_off_ms {
            Phase::PowerRampDown
        } else if t > self.timing.rail_on_ms {
            Phase::HoldPower
        } else {
            Phase::PowerRampUp
        }
    }

    /// Advance the cycle
    ///
    /// Returns the relays switched when the cycle completes. Their applied
    /// state in `settings` has been flipped and mirrored into the requested
    /// state; persisting the record is up to the caller.
    pub fn service<P: OutputPin>(
        &mut self,
        now: Millis,
        settings: &mut Settings,
        bank: &mut RelayBank<P>,
    ) -> Option<RelaySet> {
        if !self.is_active() {
            return None;
        }

        let started = *self.started_ms.get_or_insert(now);
        let t = elapsed_ms(now, started);

        if t > self.timing.complete_ms {
            bank.power.set_low();
            let mut switched = RelaySet::empty();
            for relay in Relay::ALL {
                if core::mem::take(&mut self.pending[relay.index()]) {
                    bank.line_mut(relay).set_low();
                    settings.relay_mut(relay).flip();
                    switched.insert(relay);
                }
            }
            self.started_ms = None;
            return Some(switched);
        }

        for relay in Relay::ALL {
            if self.is_pending(relay) {
                bank.line_mut(relay).set_high();
            }
        }

        if t > self.timing.rail_off_ms {
            bank.power.set_low();
        } else if t > self.timing.rail_on_ms {
            bank.power.set_high();
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct MockOutput {
        high: bool,
        writes: u32,
    }

    impl OutputPin for MockOutput {
        fn set_high(&mut self) {
            self.high = true;
            self.writes += 1;
        }

        fn set_low(&mut self) {
            self.high = false;
            self.writes += 1;
        }

        fn is_set_high(&self) -> bool {
            self.high
        }
    }

    fn bank() -> RelayBank<MockOutput> {
        RelayBank::new(
            MockOutput::default(),
            MockOutput::default(),
            MockOutput::default(),
        )
    }

    #[test]
    fn test_idle_does_nothing() {
        let mut seq = ActuationSequencer::new(ActuationTiming::default());
        let mut settings = Settings::default();
        let mut bank = bank();

        assert_eq!(seq.service(100, &mut settings, &mut bank), None);
        assert_eq!(seq.phase(100), Phase::Idle);
        assert_eq!(bank.power().writes, 1);
        assert_eq!(bank.line(Relay::Room).writes, 1);
    }

    #[test]
    fn test_rail_window() {
        let mut seq = ActuationSequencer::new(ActuationTiming::default());
        let mut settings = Settings::default();
        let mut bank = bank();
        let start = 1000;

        assert!(seq.request(Relay::LivingRoom));
        for t in [0, 250, 500, 501, 5000, 10_500, 10_501, 11_000] {
            assert_eq!(seq.service(start + t, &mut settings, &mut bank), None);
            let rail = t > 500 && t <= 10_500;
            assert_eq!(bank.power().is_set_high(), rail, "rail at t={}", t);
            assert!(bank.line(Relay::LivingRoom).is_set_high());
            assert!(bank.line(Relay::Room).is_set_low());
            assert!(!settings.living_room.is_on());
        }
        assert_eq!(seq.phase(start + 11_000), Phase::PowerRampDown);
    }

    #[test]
    fn test_commit_flips_once() {
        let mut seq = ActuationSequencer::new(ActuationTiming::default());
        let mut settings = Settings::default();
        let mut bank = bank();

        seq.request(Relay::LivingRoom);
        seq.service(0, &mut settings, &mut bank);
        assert_eq!(seq.phase(600), Phase::HoldPower);

        let switched = seq.service(11_001, &mut settings, &mut bank).unwrap();
        assert!(switched.contains(Relay::LivingRoom));
        assert!(!switched.contains(Relay::Room));
        assert!(settings.living_room.is_on());
        assert_eq!(settings.living_room.requested, 1);
        assert!(!seq.is_pending(Relay::LivingRoom));
        assert!(bank.line(Relay::LivingRoom).is_set_low());
        assert!(bank.power().is_set_low());

        assert_eq!(seq.service(11_002, &mut settings, &mut bank), None);
        assert!(settings.living_room.is_on());
        assert_eq!(seq.phase(11_002), Phase::Idle);
    }

    #[test]
    fn test_late_request_joins_cycle() {
        let mut seq = ActuationSequencer::new(ActuationTiming::default());
        let mut settings = Settings::default();
        settings.room.applied = 1;
        let mut bank = bank();

        seq.request(Relay::LivingRoom);
        seq.service(0, &mut settings, &mut bank);
        seq.service(5000, &mut settings, &mut bank);
        assert!(seq.request(Relay::Room));
        assert!(!seq.request(Relay::Room));
        seq.service(6000, &mut settings, &mut bank);
        assert!(bank.line(Relay::Room).is_set_high());

        let switched = seq.service(11_001, &mut settings, &mut bank).unwrap();
        assert_eq!(switched.iter().count(), 2);
        assert!(settings.living_room.is_on());
        assert!(!settings.room.is_on());
        assert_eq!(settings.room.requested, 0);
        assert!(!seq.is_active());
    }

    #[test]
    fn test_sparse_service_still_drops_rail() {
        let mut seq = ActuationSequencer::new(ActuationTiming::default());
        let mut settings = Settings::default();
        let mut bank = bank();

        seq.request(Relay::Room);
        seq.service(0, &mut settings, &mut bank);
        seq.service(1000, &mut settings, &mut bank);
        assert!(bank.power().is_set_high());
        assert!(seq.service(20_000, &mut settings, &mut bank).is_some());
        assert!(bank.power().is_set_low());
    }

    #[test]
    fn test_cycle_across_rollover() {
        let mut seq = ActuationSequencer::new(ActuationTiming::default());
        let mut settings = Settings::default();
        let mut bank = bank();
        let start = u32::MAX - 100;

        seq.request(Relay::Room);
        seq.service(start, &mut settings, &mut bank);
        seq.service(start.wrapping_add(600), &mut settings, &mut bank);
        assert!(bank.power().is_set_high());
        assert!(seq
            .service(start.wrapping_add(11_001), &mut settings, &mut bank)
            .is_some());
        assert!(settings.room.is_on());
    }

    #[test]
    fn test_relay_set() {
        let mut set = RelaySet::empty();
        assert!(set.is_empty());
        set.insert(Relay::Room);
        assert!(!set.is_empty());
        assert_eq!(set.iter().collect::<std::vec::Vec<_>>(), [Relay::Room]);
    }
}
