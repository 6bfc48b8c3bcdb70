use crate::{Card, DrawVariant, PlayerId};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Effect captured by a pay-a-cost-first card, executed by the continuation
/// dispatcher once the cost step completes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum DeferredEffect {
    /// An attack that ignores weapon range, aimed while the cost was paid.
    RangedAttack { target: PlayerId },
}

/// Discriminator for the single in-flight interrupt.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum PendingKind {
    /// Play a dodge or take the damage.
    DodgeOrDamage { amount: u8 },
    /// Discard an attack card or take the damage.
    DiscardAttackOrDamage { amount: u8 },
    /// Alternating forced attacks until one side cannot answer.
    Duel { attacker: PlayerId, defender: PlayerId },
    /// One pick per responder from the revealed cards.
    GeneralStore,
    /// The thief chooses hand or table as the steal source.
    StealPick { target: PlayerId, discard: bool },
    /// Discard down to the hand limit before the turn may end.
    HandLimitDiscard,
    /// Pay a discard, then run the captured effect.
    DeferredCost { effect: DeferredEffect },
    /// Character draw-phase choice; suspends the draw phase until answered.
    DrawPick { variant: DrawVariant, picks_left: u8 },
    /// Copycat picks whose character sheet to borrow this turn.
    CopyCharacter,
}

impl PendingKind {
    pub fn label(self) -> &'static str {
        match self {
            PendingKind::DodgeOrDamage { .. } => "dodge or take the hit",
            PendingKind::DiscardAttackOrDamage { .. } => "discard an attack or take the hit",
            PendingKind::Duel { .. } => "duel",
            PendingKind::GeneralStore => "pick from the store",
            PendingKind::StealPick { .. } => "pick what to steal",
            PendingKind::HandLimitDiscard => "discard down to your hand limit",
            PendingKind::DeferredCost { .. } => "pay the cost",
            PendingKind::DrawPick { .. } => "choose your draw",
            PendingKind::CopyCharacter => "pick a character to copy",
        }
    }
}

/// The game paused, awaiting a specific response. At most one exists; only
/// the head of `queue` may answer.
#[derive(Debug, Clone)]
pub struct PendingAction {
    pub kind: PendingKind,
    pub source: PlayerId,
    pub queue: VecDeque<PlayerId>,
    pub revealed: Vec<Card>,
}

impl PendingAction {
    pub fn single(kind: PendingKind, source: PlayerId, responder: PlayerId) -> Self {
        Self {
            kind,
            source,
            queue: VecDeque::from([responder]),
            revealed: Vec::new(),
        }
    }

    pub fn broadcast(kind: PendingKind, source: PlayerId, responders: Vec<PlayerId>) -> Self {
        Self {
            kind,
            source,
            queue: responders.into(),
            revealed: Vec::new(),
        }
    }

    pub fn awaiting(&self) -> Option<PlayerId> {
        self.queue.front().copied()
    }

    pub fn pop_current(&mut self) -> Option<PlayerId> {
        self.queue.pop_front()
    }

    /// Duel rotation: the answered side moves out, the opponent moves in.
    pub fn swap_to(&mut self, next: PlayerId) {
        self.queue.pop_front();
        self.queue.push_front(next);
    }

    pub fn is_done(&self) -> bool {
        self.queue.is_empty()
    }

    /// Drop a responder anywhere in the queue (player removal).
    pub fn remove_responder(&mut self, player: PlayerId) {
        self.queue.retain(|&p| p != player);
    }
}

/// One answer to an outstanding interrupt.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Response {
    /// Answer with a qualifying hand card.
    PlayCard { index: usize },
    /// Answer with a reactive in-play card instead of a hand card.
    UseInPlay { index: usize },
    /// Accept the default consequence.
    Pass,
    /// Pick one of the revealed cards.
    PickCard { index: usize },
    /// Pick a player (steal victims, borrowed characters).
    PickPlayer { target: PlayerId },
    /// Steal blind from the target's hand.
    FromHand,
    /// Steal a specific in-play card.
    FromTable { index: usize },
    /// Take a specific in-play card from a chosen player (draw variants).
    TakeInPlay { target: PlayerId, index: usize },
    /// Decline the variant and draw from the deck instead.
    DrawFromDeck,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn broadcast_queue_shrinks_to_idle() {
        let responders = vec![PlayerId(1), PlayerId(2), PlayerId(3)];
        let mut pending = PendingAction::broadcast(
            PendingKind::DodgeOrDamage { amount: 1 },
            PlayerId(0),
            responders.clone(),
        );
        for (i, expected) in responders.iter().enumerate() {
            assert_eq!(pending.awaiting(), Some(*expected));
            pending.pop_current();
            assert_eq!(pending.queue.len(), responders.len() - i - 1);
        }
        assert!(pending.is_done());
    }

    #[test]
    fn duel_rotation_keeps_one_responder() {
        let mut pending = PendingAction::single(
            PendingKind::Duel {
                attacker: PlayerId(0),
                defender: PlayerId(1),
            },
            PlayerId(0),
            PlayerId(1),
        );
        pending.swap_to(PlayerId(0));
        assert_eq!(pending.awaiting(), Some(PlayerId(0)));
        assert_eq!(pending.queue.len(), 1);
    }
}
