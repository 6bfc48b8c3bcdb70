use crate::{Card, CardName, EventId, PendingKind, PlayerId, Role, Winner};
use serde::{Deserialize, Serialize};

/// Structured game log. Commands push, the session layer drains and fans the
/// entries out to clients.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Event {
    PlayerJoined { player: PlayerId, name: String },
    PlayerLeft { player: PlayerId },
    GameStarted { players: usize },
    TurnStarted { player: PlayerId },
    TurnSkipped { player: PlayerId, by: CardName },
    EventRevealed { event: EventId },
    CardsDrawn { player: PlayerId, count: usize },
    CardPlayed { player: PlayerId, card: Card },
    CardDiscarded { player: PlayerId, card: Card },
    CheckDrawn { player: PlayerId, card: Card, passed: bool },
    PlayIgnored { player: PlayerId, card: Card },
    DamageApplied { player: PlayerId, amount: u8, hp: i8 },
    Healed { player: PlayerId, amount: u8, hp: i8 },
    AutoSaved { player: PlayerId, card: Card },
    PlayerEliminated { player: PlayerId, role: Role },
    PlayerRevived { player: PlayerId },
    InterruptOpened { kind: PendingKind, awaiting: PlayerId },
    InterruptAdvanced { awaiting: PlayerId },
    InterruptResolved { kind: PendingKind },
    AbilityUsed { player: PlayerId },
    GameOver { winner: Winner },
    GameReset,
}

#[derive(Debug, Default)]
pub struct EventBus {
    queue: Vec<Event>,
}

impl EventBus {
    pub fn push(&mut self, event: Event) {
        self.queue.push(event);
    }

    pub fn drain(&mut self) -> impl Iterator<Item = Event> + '_ {
        self.queue.drain(..)
    }

    pub fn take(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.queue)
    }
}
