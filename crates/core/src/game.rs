use crate::{
    Deck, EventId, GameConfig, PendingAction, Player, PlayerId, RngState, Table,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

mod abilities;
mod combat;
mod lifecycle;
mod resolve;
mod respond;
mod state;
mod turn;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Phase {
    Lobby,
    Playing,
    Finished,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Winner {
    /// Marshal and deputies.
    Lawful,
    Outlaws,
    Renegade,
}

impl Winner {
    pub fn label(self) -> &'static str {
        match self {
            Winner::Lawful => "the marshal's side",
            Winner::Outlaws => "the outlaws",
            Winner::Renegade => "the renegade",
        }
    }
}

/// Every way a command can be rejected. Rejections never mutate state.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    #[error("game is full")]
    GameFull,
    #[error("game already started")]
    AlreadyStarted,
    #[error("game has not started")]
    NotStarted,
    #[error("game is over")]
    GameOver,
    #[error("need between {0} and {1} players")]
    PlayerCount(usize, usize),
    #[error("unknown player")]
    UnknownPlayer,
    #[error("not your turn")]
    NotYourTurn,
    #[error("a response is outstanding")]
    InterruptOutstanding,
    #[error("no response is outstanding")]
    NoInterrupt,
    #[error("waiting on another player's response")]
    NotYourInterrupt,
    #[error("invalid card index")]
    InvalidCardIndex,
    #[error("this card needs a target")]
    MissingTarget,
    #[error("invalid target")]
    InvalidTarget,
    #[error("you cannot target yourself with this card")]
    SelfTarget,
    #[error("target is out of range")]
    OutOfRange,
    #[error("you already attacked this turn")]
    AttackLimit,
    #[error("that card cannot be played on its own")]
    NotPlayable,
    #[error("that card is not ready until your next turn")]
    CardNotReady,
    #[error("that response does not answer the outstanding request")]
    InvalidResponse,
    #[error("no such ability is available")]
    NoAbility,
    #[error("already at full health")]
    FullHealth,
    #[error("not enough cards to pay the cost")]
    CostUnmet,
}

/// One game's authoritative state. A single owned aggregate; everything
/// crosses the boundary through the command methods and view projections.
#[derive(Debug)]
pub struct Game {
    pub config: GameConfig,
    pub rng: RngState,
    pub deck: Deck,
    pub players: Vec<Player>,
    pub table: Table,
    pub pending: Option<PendingAction>,
    pub phase: Phase,
    pub winner: Option<Winner>,
    pub event_deck: Vec<EventId>,
    pub active_event_id: Option<EventId>,
    pub first_eliminated: Option<PlayerId>,
    pub dead_man_used: bool,
    next_player_id: u32,
}
