use crate::RngState;
use serde::{Deserialize, Serialize};

/// Optional rule-module cards. At most one is current; it is replaced at the
/// start of each marshal-seat turn and overrides base behavior everywhere
/// through the predicate flags below.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum EventId {
    /// All permanents in play are discarded when revealed.
    Thunderstorm,
    /// Killers collect an extra bounty for the round.
    Vendetta,
    /// The first player ever eliminated returns at two hp, once per game.
    DeadMan,
    /// Every check draw counts as the favorable suit.
    FullMoon,
    /// Equipment in play counts for nothing.
    Lasso,
    /// Character traits are suspended.
    Hangover,
    /// Attacks ignore distance entirely.
    Shootout,
    /// Every weapon counts as range one.
    CloseQuarters,
    /// Each player takes one damage when their turn ends.
    Heatwave,
    /// All hands are played face up.
    Revelation,
}

impl EventId {
    pub const ALL: [EventId; 10] = [
        EventId::Thunderstorm,
        EventId::Vendetta,
        EventId::DeadMan,
        EventId::FullMoon,
        EventId::Lasso,
        EventId::Hangover,
        EventId::Shootout,
        EventId::CloseQuarters,
        EventId::Heatwave,
        EventId::Revelation,
    ];

    pub fn label(self) -> &'static str {
        match self {
            EventId::Thunderstorm => "Thunderstorm",
            EventId::Vendetta => "Vendetta",
            EventId::DeadMan => "Dead Man",
            EventId::FullMoon => "Full Moon",
            EventId::Lasso => "Lasso",
            EventId::Hangover => "Hangover",
            EventId::Shootout => "Shootout",
            EventId::CloseQuarters => "Close Quarters",
            EventId::Heatwave => "Heatwave",
            EventId::Revelation => "Revelation",
        }
    }
}

/// Build the pre-shuffled event deck for one game.
pub fn event_deck(rng: &mut RngState) -> Vec<EventId> {
    let mut deck = EventId::ALL.to_vec();
    rng.shuffle(&mut deck);
    deck
}

/// Predicate helpers over the optional active event. The rest of the engine
/// queries these instead of matching on `EventId`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ActiveEvent(pub Option<EventId>);

impl ActiveEvent {
    pub fn suppresses_equipment(self) -> bool {
        self.0 == Some(EventId::Lasso)
    }

    pub fn suppresses_traits(self) -> bool {
        self.0 == Some(EventId::Hangover)
    }

    pub fn checks_always_pass(self) -> bool {
        self.0 == Some(EventId::FullMoon)
    }

    pub fn attacks_ignore_distance(self) -> bool {
        self.0 == Some(EventId::Shootout)
    }

    pub fn forces_range_one(self) -> bool {
        self.0 == Some(EventId::CloseQuarters)
    }

    pub fn end_turn_damage(self) -> u8 {
        if self.0 == Some(EventId::Heatwave) {
            1
        } else {
            0
        }
    }

    pub fn kill_bonus(self) -> u8 {
        if self.0 == Some(EventId::Vendetta) {
            2
        } else {
            0
        }
    }

    pub fn reveals_hands(self) -> bool {
        self.0 == Some(EventId::Revelation)
    }
}
