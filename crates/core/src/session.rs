use crate::{
    Event, EventBus, Game, GameConfig, GameError, GameView, PlayerId, Response,
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;
use tracing::{debug, info};
use uuid::Uuid;

/// Opaque room identifier handed to transports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameId(pub Uuid);

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("no such game")]
    UnknownGame,
    #[error("no such player")]
    UnknownPlayer,
    #[error("game state is unrecoverable")]
    Poisoned,
    #[error(transparent)]
    Game(#[from] GameError),
}

/// A command from one client, addressed with public ids only.
#[derive(Debug, Clone)]
pub enum Command {
    Start,
    Reset,
    Leave,
    Play {
        card_index: usize,
        target: Option<Uuid>,
    },
    Ability {
        indices: Vec<usize>,
        target: Option<Uuid>,
    },
    Respond(ResponseKind),
    EndTurn,
}

/// Public-id flavor of [`Response`]; translated inside the lock.
#[derive(Debug, Clone, Copy)]
pub enum ResponseKind {
    PlayCard { index: usize },
    UseInPlay { index: usize },
    Pass,
    PickCard { index: usize },
    PickPlayer { target: Uuid },
    FromHand,
    FromTable { index: usize },
    TakeInPlay { target: Uuid, index: usize },
    DrawFromDeck,
}

/// What a successful command hands back: a headline, the rendered log since
/// the last command, and the caller's redacted snapshot.
#[derive(Debug, Clone)]
pub struct Outcome {
    pub message: String,
    pub log: Vec<String>,
    pub view: GameView,
}

/// All live games. One mutex per game; a command holds its game's lock for
/// the whole mutation and snapshot.
#[derive(Default)]
pub struct GameManager {
    games: Mutex<HashMap<GameId, Arc<Mutex<Game>>>>,
}

impl GameManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create_game(&self, config: GameConfig) -> Result<GameId, SessionError> {
        let id = GameId(Uuid::new_v4());
        let game = Arc::new(Mutex::new(Game::new(config)));
        self.games
            .lock()
            .map_err(|_| SessionError::Poisoned)?
            .insert(id, game);
        info!(game = %id.0, "game created");
        Ok(id)
    }

    pub fn remove_game(&self, id: GameId) -> Result<(), SessionError> {
        let removed = self
            .games
            .lock()
            .map_err(|_| SessionError::Poisoned)?
            .remove(&id);
        if removed.is_none() {
            return Err(SessionError::UnknownGame);
        }
        info!(game = %id.0, "game removed");
        Ok(())
    }

    fn game(&self, id: GameId) -> Result<Arc<Mutex<Game>>, SessionError> {
        self.games
            .lock()
            .map_err(|_| SessionError::Poisoned)?
            .get(&id)
            .cloned()
            .ok_or(SessionError::UnknownGame)
    }

    /// Seat a new player and hand back their public id.
    pub fn join(&self, id: GameId, name: &str) -> Result<(Uuid, Outcome), SessionError> {
        let handle = self.game(id)?;
        let mut game = handle.lock().map_err(|_| SessionError::Poisoned)?;
        let mut events = EventBus::default();
        let public = game.join(name, &mut events)?;
        info!(game = %id.0, player = %public, "player joined");
        let viewer = game.resolve_public(public);
        Ok((
            public,
            outcome(&game, viewer, format!("{name} sat down"), &mut events),
        ))
    }

    /// Run one command under the game's lock. Rejections leave the game
    /// untouched and still return cleanly to the caller.
    pub fn command(
        &self,
        id: GameId,
        player: Uuid,
        command: Command,
    ) -> Result<Outcome, SessionError> {
        let handle = self.game(id)?;
        let mut game = handle.lock().map_err(|_| SessionError::Poisoned)?;
        let pid = game
            .resolve_public(player)
            .ok_or(SessionError::UnknownPlayer)?;
        let mut events = EventBus::default();
        debug!(game = %id.0, player = %player, ?command, "command");

        let message = match command {
            Command::Start => {
                game.start(&mut events)?;
                "game on".to_string()
            }
            Command::Reset => {
                game.reset(&mut events)?;
                "table cleared".to_string()
            }
            Command::Leave => {
                game.leave(pid, &mut events)?;
                "left the table".to_string()
            }
            Command::Play { card_index, target } => {
                let target = self.resolve_target(&game, target)?;
                game.play(pid, card_index, target, &mut events)?;
                "card played".to_string()
            }
            Command::Ability { indices, target } => {
                let target = self.resolve_target(&game, target)?;
                game.activate_ability(pid, &indices, target, &mut events)?;
                "ability used".to_string()
            }
            Command::Respond(kind) => {
                let response = self.resolve_response(&game, kind)?;
                game.respond(pid, response, &mut events)?;
                "response accepted".to_string()
            }
            Command::EndTurn => {
                game.end_turn(pid, &mut events)?;
                "turn ended".to_string()
            }
        };

        let viewer = game.resolve_public(player);
        Ok(outcome(&game, viewer, message, &mut events))
    }

    /// Read-only snapshot for one client, or a spectator.
    pub fn snapshot(&self, id: GameId, player: Option<Uuid>) -> Result<GameView, SessionError> {
        let handle = self.game(id)?;
        let game = handle.lock().map_err(|_| SessionError::Poisoned)?;
        let viewer = player.and_then(|p| game.resolve_public(p));
        Ok(game.view_for(viewer))
    }

    fn resolve_target(
        &self,
        game: &Game,
        target: Option<Uuid>,
    ) -> Result<Option<PlayerId>, SessionError> {
        match target {
            None => Ok(None),
            Some(public) => game
                .resolve_public(public)
                .map(Some)
                .ok_or(SessionError::UnknownPlayer),
        }
    }

    fn resolve_response(
        &self,
        game: &Game,
        kind: ResponseKind,
    ) -> Result<Response, SessionError> {
        Ok(match kind {
            ResponseKind::PlayCard { index } => Response::PlayCard { index },
            ResponseKind::UseInPlay { index } => Response::UseInPlay { index },
            ResponseKind::Pass => Response::Pass,
            ResponseKind::PickCard { index } => Response::PickCard { index },
            ResponseKind::PickPlayer { target } => Response::PickPlayer {
                target: game
                    .resolve_public(target)
                    .ok_or(SessionError::UnknownPlayer)?,
            },
            ResponseKind::FromHand => Response::FromHand,
            ResponseKind::FromTable { index } => Response::FromTable { index },
            ResponseKind::TakeInPlay { target, index } => Response::TakeInPlay {
                target: game
                    .resolve_public(target)
                    .ok_or(SessionError::UnknownPlayer)?,
                index,
            },
            ResponseKind::DrawFromDeck => Response::DrawFromDeck,
        })
    }
}

fn outcome(
    game: &Game,
    viewer: Option<PlayerId>,
    message: String,
    events: &mut EventBus,
) -> Outcome {
    let log = events
        .drain()
        .map(|event| render_event(game, &event))
        .collect();
    Outcome {
        message,
        log,
        view: game.view_for(viewer),
    }
}

fn name_of(game: &Game, id: PlayerId) -> String {
    game.player(id)
        .map(|p| p.name.clone())
        .unwrap_or_else(|_| "someone".to_string())
}

/// Human-readable log line for one event. Names are resolved while the lock
/// is still held.
fn render_event(game: &Game, event: &Event) -> String {
    match event {
        Event::PlayerJoined { name, .. } => format!("{name} sat down"),
        Event::PlayerLeft { player } => format!("{} left the table", name_of(game, *player)),
        Event::GameStarted { players } => format!("game started with {players} players"),
        Event::TurnStarted { player } => format!("{}'s turn", name_of(game, *player)),
        Event::TurnSkipped { player, by } => {
            format!("{} sits this one out ({})", name_of(game, *player), by.label())
        }
        Event::EventRevealed { event } => format!("event: {}", event.label()),
        Event::CardsDrawn { player, count } => {
            format!("{} draws {count}", name_of(game, *player))
        }
        Event::CardPlayed { player, card } => {
            format!("{} plays {}", name_of(game, *player), card.name.label())
        }
        Event::CardDiscarded { player, card } => {
            format!("{} discards {}", name_of(game, *player), card.name.label())
        }
        Event::CheckDrawn {
            player,
            card,
            passed,
        } => format!(
            "{} flips {} ({})",
            name_of(game, *player),
            card.name.label(),
            if *passed { "saved" } else { "no luck" }
        ),
        Event::PlayIgnored { player, card } => format!(
            "{} shrugs off {}",
            name_of(game, *player),
            card.name.label()
        ),
        Event::DamageApplied { player, amount, hp } => format!(
            "{} takes {amount} damage ({hp} hp left)",
            name_of(game, *player)
        ),
        Event::Healed { player, amount, hp } => {
            format!("{} heals {amount} ({hp} hp)", name_of(game, *player))
        }
        Event::AutoSaved { player, card } => format!(
            "{} gulps a {} to stay up",
            name_of(game, *player),
            card.name.label()
        ),
        Event::PlayerEliminated { player, role } => format!(
            "{} is eliminated (was {})",
            name_of(game, *player),
            role.label()
        ),
        Event::PlayerRevived { player } => {
            format!("{} rides again", name_of(game, *player))
        }
        Event::InterruptOpened { kind, awaiting } => {
            format!("{}: {}", name_of(game, *awaiting), kind.label())
        }
        Event::InterruptAdvanced { awaiting } => {
            format!("waiting on {}", name_of(game, *awaiting))
        }
        Event::InterruptResolved { .. } => "resolved".to_string(),
        Event::AbilityUsed { player } => {
            format!("{} uses an ability", name_of(game, *player))
        }
        Event::GameOver { winner } => format!("game over: victory for {}", winner.label()),
        Event::GameReset => "table reset".to_string(),
    }
}
