use super::*;
use crate::{
    characters, ActiveEvent, Card, CardName, CharacterSpec, Event, EventBus, GameError,
};
use uuid::Uuid;

impl Game {
    pub fn new(config: GameConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => RngState::from_seed(seed),
            None => RngState::from_entropy(),
        };
        Self {
            config,
            rng,
            deck: Deck::default(),
            players: Vec::new(),
            table: Table::default(),
            pending: None,
            phase: Phase::Lobby,
            winner: None,
            event_deck: Vec::new(),
            active_event_id: None,
            first_eliminated: None,
            dead_man_used: false,
            next_player_id: 0,
        }
    }

    pub(super) fn alloc_player_id(&mut self) -> PlayerId {
        let id = PlayerId(self.next_player_id);
        self.next_player_id += 1;
        id
    }

    pub fn player(&self, id: PlayerId) -> Result<&Player, GameError> {
        self.players
            .iter()
            .find(|p| p.id == id)
            .ok_or(GameError::UnknownPlayer)
    }

    pub fn player_mut(&mut self, id: PlayerId) -> Result<&mut Player, GameError> {
        self.players
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(GameError::UnknownPlayer)
    }

    /// Public-id to internal-id resolution consumed by the session layer.
    pub fn resolve_public(&self, public: Uuid) -> Option<PlayerId> {
        self.players
            .iter()
            .find(|p| p.public_id == public)
            .map(|p| p.id)
    }

    pub fn current_player(&self) -> Option<PlayerId> {
        self.table.current_player()
    }

    pub fn marshal(&self) -> Option<PlayerId> {
        self.players
            .iter()
            .find(|p| p.role == crate::Role::Marshal)
            .map(|p| p.id)
    }

    pub fn alive_players(&self) -> Vec<PlayerId> {
        self.table.turn_order.clone()
    }

    pub fn active_event(&self) -> ActiveEvent {
        ActiveEvent(self.active_event_id)
    }

    /// Character traits are suspended wholesale by one event.
    pub fn traits_active(&self) -> bool {
        !self.active_event().suppresses_traits()
    }

    /// The character sheet in force for a player, honoring a borrowed one.
    pub fn character_of(&self, id: PlayerId) -> Result<CharacterSpec, GameError> {
        let player = self.player(id)?;
        let character = player.borrowed.unwrap_or(player.character);
        Ok(characters::character_spec(character))
    }

    /// Character sheet, or `None` while traits are suspended.
    pub fn trait_of(&self, id: PlayerId) -> Option<CharacterSpec> {
        if !self.traits_active() {
            return None;
        }
        self.character_of(id).ok()
    }

    /// Trickshot plays attacks as dodges and dodges as attacks; dispatch runs
    /// on the effective identity, not the printed one.
    pub fn effective_name(&self, player: PlayerId, card: &Card) -> CardName {
        if let Some(spec) = self.trait_of(player) {
            if spec.attack_dodge_duality {
                match card.name {
                    CardName::Attack => return CardName::Dodge,
                    CardName::Dodge => return CardName::Attack,
                    _ => {}
                }
            }
        }
        card.name
    }

    // === Command gates ===

    pub(super) fn ensure_playing(&self) -> Result<(), GameError> {
        match self.phase {
            Phase::Lobby => Err(GameError::NotStarted),
            Phase::Finished => Err(GameError::GameOver),
            Phase::Playing => Ok(()),
        }
    }

    pub(super) fn ensure_no_pending(&self) -> Result<(), GameError> {
        if self.pending.is_some() {
            Err(GameError::InterruptOutstanding)
        } else {
            Ok(())
        }
    }

    pub(super) fn ensure_turn(&self, player: PlayerId) -> Result<(), GameError> {
        self.player(player)?;
        if self.current_player() != Some(player) {
            return Err(GameError::NotYourTurn);
        }
        Ok(())
    }

    // === Card movement ===

    pub(super) fn draw_to(&mut self, player: PlayerId, count: usize, events: &mut EventBus) {
        let cards = self.deck.draw_cards(count, &mut self.rng);
        let drawn = cards.len();
        if let Ok(p) = self.player_mut(player) {
            p.hand.extend(cards);
        }
        if drawn > 0 {
            events.push(Event::CardsDrawn {
                player,
                count: drawn,
            });
        }
    }

    pub(super) fn discard_from_hand(
        &mut self,
        player: PlayerId,
        index: usize,
        events: &mut EventBus,
    ) -> Result<Card, GameError> {
        let p = self.player_mut(player)?;
        if index >= p.hand.len() {
            return Err(GameError::InvalidCardIndex);
        }
        let card = p.hand.remove(index);
        self.deck.discard(card);
        events.push(Event::CardDiscarded { player, card });
        Ok(card)
    }

    /// A check draw for `player`; `favorable` decides the base outcome, the
    /// full-moon event forces success either way.
    pub(super) fn run_check(
        &mut self,
        player: PlayerId,
        events: &mut EventBus,
        favorable: impl Fn(&Card) -> bool,
    ) -> bool {
        let forced = self.active_event().checks_always_pass();
        let Some(card) = self.deck.check_draw(&mut self.rng) else {
            // Both piles empty: treat the check as failed rather than crash.
            return forced;
        };
        let passed = forced || favorable(&card);
        events.push(Event::CheckDrawn {
            player,
            card,
            passed,
        });
        passed
    }

    /// Bonus draw for traits that reward answering with a card outside the
    /// owner's own turn.
    pub(super) fn outside_turn_reflex(&mut self, player: PlayerId, events: &mut EventBus) {
        if self.current_player() == Some(player) {
            return;
        }
        let draws = self
            .trait_of(player)
            .map(|spec| spec.outside_turn_draw)
            .unwrap_or(false);
        if draws {
            self.draw_to(player, 1, events);
        }
    }
}
