use crate::{characters, Card, EventId, Game, Phase, PlayerId, Role, Winner};
use serde::Serialize;
use uuid::Uuid;

/// Everything one client may know about the game. Built inside the session
/// lock; plain data, no references back into the aggregate.
#[derive(Debug, Clone, Serialize)]
pub struct GameView {
    pub phase: Phase,
    pub winner: Option<Winner>,
    pub active_event: Option<EventId>,
    pub deck_size: usize,
    pub discard_top: Option<Card>,
    pub current_player: Option<Uuid>,
    pub players: Vec<PlayerView>,
    pub pending: Option<PendingView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlayerView {
    pub id: Uuid,
    pub name: String,
    pub hp: i8,
    pub max_hp: u8,
    pub alive: bool,
    pub ghost: bool,
    /// Hidden until it must show: own seat, the marshal, the dead, game over.
    pub role: Option<Role>,
    pub character: &'static str,
    pub hand_count: usize,
    /// Only the owner sees faces, unless an event turns all hands face up.
    pub hand: Option<Vec<Card>>,
    pub in_play: Vec<Card>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PendingView {
    pub kind: &'static str,
    pub awaiting: Option<Uuid>,
    pub revealed: Vec<Card>,
}

impl Game {
    /// Project the state for one viewer (or a spectator when `None`).
    pub fn view_for(&self, viewer: Option<PlayerId>) -> GameView {
        let over = self.phase == Phase::Finished;
        let hands_open = self.active_event().reveals_hands();

        let players = self
            .players
            .iter()
            .map(|p| {
                let own = viewer == Some(p.id);
                let role = if over || own || !p.alive || p.role == Role::Marshal {
                    Some(p.role)
                } else {
                    None
                };
                let hand = if own || hands_open || over {
                    Some(p.hand.clone())
                } else {
                    None
                };
                PlayerView {
                    id: p.public_id,
                    name: p.name.clone(),
                    hp: p.hp,
                    max_hp: p.max_hp,
                    alive: p.alive,
                    ghost: p.ghost,
                    role,
                    character: characters::character_spec(p.character).name,
                    hand_count: p.hand.len(),
                    hand,
                    in_play: p.in_play.clone(),
                }
            })
            .collect();

        let pending = self.pending.as_ref().map(|pending| {
            let to_viewer = viewer.is_some() && pending.awaiting() == viewer;
            let store = matches!(pending.kind, crate::PendingKind::GeneralStore);
            PendingView {
                kind: pending.kind.label(),
                awaiting: pending
                    .awaiting()
                    .and_then(|id| self.player(id).ok())
                    .map(|p| p.public_id),
                revealed: if store || to_viewer {
                    pending.revealed.clone()
                } else {
                    Vec::new()
                },
            }
        });

        GameView {
            phase: self.phase,
            winner: self.winner,
            active_event: self.active_event_id,
            deck_size: self.deck.remaining(),
            discard_top: self.deck.top_discard().copied(),
            current_player: self
                .current_player()
                .and_then(|id| self.player(id).ok())
                .map(|p| p.public_id),
            players,
            pending,
        }
    }
}
