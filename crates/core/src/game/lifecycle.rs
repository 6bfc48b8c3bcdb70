use super::*;
use crate::{
    catalog, characters, event_cards, CharacterId, Event, EventBus, GameError, Role,
};
use uuid::Uuid;

impl Game {
    /// Seat a new player in the lobby. Returns the public id handed to the
    /// transport layer.
    pub fn join(&mut self, name: &str, events: &mut EventBus) -> Result<Uuid, GameError> {
        if self.phase != Phase::Lobby {
            return Err(GameError::AlreadyStarted);
        }
        if self.players.len() >= self.config.max_players {
            return Err(GameError::GameFull);
        }
        let id = self.alloc_player_id();
        let player = Player::new(id, name.to_string());
        let public = player.public_id;
        events.push(Event::PlayerJoined {
            player: id,
            name: name.to_string(),
        });
        self.players.push(player);
        Ok(public)
    }

    /// Remove a player. In the lobby the seat simply disappears; mid-game
    /// this is the forced-elimination path the room manager uses for
    /// unresponsive players.
    pub fn leave(&mut self, player: PlayerId, events: &mut EventBus) -> Result<(), GameError> {
        self.player(player)?;
        if self.phase == Phase::Finished {
            return Err(GameError::GameOver);
        }
        events.push(Event::PlayerLeft { player });
        if self.phase == Phase::Lobby {
            self.players.retain(|p| p.id != player);
            return Ok(());
        }

        let was_turn_holder = self.current_player() == Some(player);
        let was_alive = self.player(player)?.alive;
        if was_alive {
            self.eliminate(None, player, events);
        }
        self.drop_from_pending(player, events);
        if self.phase == Phase::Finished {
            return Ok(());
        }
        if was_turn_holder && self.pending.is_none() {
            self.begin_turn(events);
        }
        Ok(())
    }

    /// Deal roles, characters, hit points and opening hands, then open the
    /// marshal's first turn.
    pub fn start(&mut self, events: &mut EventBus) -> Result<(), GameError> {
        if self.phase != Phase::Lobby {
            return Err(GameError::AlreadyStarted);
        }
        let count = self.players.len();
        if count < self.config.min_players || count > self.config.max_players {
            return Err(GameError::PlayerCount(
                self.config.min_players,
                self.config.max_players,
            ));
        }

        self.deck = catalog::build_deck(&mut self.rng);
        if self.config.events_enabled {
            self.event_deck = event_cards::event_deck(&mut self.rng);
        }

        let mut roles = GameConfig::roles_for(count);
        self.rng.shuffle(&mut roles);
        let mut pool: Vec<CharacterId> = CharacterId::ALL.to_vec();
        self.rng.shuffle(&mut pool);

        let marshal_bonus = self.config.marshal_bonus_hp;
        for (i, player) in self.players.iter_mut().enumerate() {
            player.role = roles[i];
            player.character = pool[i % pool.len()];
            let spec = characters::character_spec(player.character);
            let mut max_hp = spec.max_hp;
            if player.role == Role::Marshal {
                max_hp += marshal_bonus;
            }
            player.max_hp = max_hp;
            player.hp = max_hp as i8;
            player.alive = true;
        }

        let mut seats: Vec<PlayerId> = self.players.iter().map(|p| p.id).collect();
        self.rng.shuffle(&mut seats);
        self.table = Table::new(seats);

        // The marshal opens the game.
        if let Some(marshal) = self.marshal() {
            if let Some(pos) = self.table.position(marshal) {
                self.table.current = pos;
            }
        }

        // Opening hand equals starting hit points.
        let deals: Vec<(PlayerId, usize)> = self
            .players
            .iter()
            .map(|p| (p.id, p.hp.max(0) as usize))
            .collect();
        for (id, count) in deals {
            self.draw_to(id, count, events);
        }

        self.phase = Phase::Playing;
        events.push(Event::GameStarted {
            players: self.players.len(),
        });
        self.begin_turn(events);
        Ok(())
    }

    /// Wipe the table back to an empty lobby. The only mutation allowed
    /// after game over.
    pub fn reset(&mut self, events: &mut EventBus) -> Result<(), GameError> {
        let config = self.config.clone();
        let seed = self.rng.next_u64();
        let mut fresh = Game::new(GameConfig {
            seed: Some(seed),
            ..config
        });
        fresh.next_player_id = self.next_player_id;
        *self = fresh;
        events.push(Event::GameReset);
        Ok(())
    }

    // === Win evaluation ===

    fn evaluate_winner(&self) -> Option<Winner> {
        let marshal_alive = self
            .players
            .iter()
            .any(|p| p.role == Role::Marshal && p.alive);
        let alive: Vec<&Player> = self.players.iter().filter(|p| p.alive).collect();
        if !marshal_alive {
            if alive.len() == 1 && alive[0].role == Role::Renegade {
                return Some(Winner::Renegade);
            }
            return Some(Winner::Outlaws);
        }
        let enemies_left = alive
            .iter()
            .any(|p| matches!(p.role, Role::Outlaw | Role::Renegade));
        if !enemies_left {
            return Some(Winner::Lawful);
        }
        None
    }

    /// Terminal check, run after every death and every interrupt
    /// resolution. Idempotent once the game is over.
    pub(super) fn check_win(&mut self, events: &mut EventBus) -> bool {
        if self.phase == Phase::Finished {
            return true;
        }
        if let Some(winner) = self.evaluate_winner() {
            self.winner = Some(winner);
            self.phase = Phase::Finished;
            self.pending = None;
            events.push(Event::GameOver { winner });
            return true;
        }
        false
    }

    /// Remove a player from any outstanding responder queue; resolve the
    /// interrupt if that empties it.
    pub(super) fn drop_from_pending(&mut self, player: PlayerId, events: &mut EventBus) {
        let Some(pending) = self.pending.as_mut() else {
            return;
        };
        if pending.source == player && pending.queue.is_empty() {
            return;
        }
        pending.remove_responder(player);
        if pending.is_done() {
            let kind = pending.kind;
            let leftovers = std::mem::take(&mut pending.revealed);
            self.deck.discard_all(leftovers);
            self.pending = None;
            events.push(Event::InterruptResolved { kind });
            self.check_win(events);
        }
    }
}
