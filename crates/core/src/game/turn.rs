use super::*;
use crate::{
    CardName, DrawVariant, Event, EventBus, EventId, GameError, PendingAction, PendingKind,
    Suit,
};

impl Game {
    /// Open the current seat's turn. Iterative on purpose: jail skips,
    /// dynamite deaths and event one-shots can all push the turn onward, and
    /// chaining those recursively would be unbounded when several players go
    /// down at once.
    pub(super) fn begin_turn(&mut self, events: &mut EventBus) {
        let bound = self.table.alive_count().max(1) + 1;
        for _ in 0..bound {
            if self.phase != Phase::Playing || self.pending.is_some() {
                return;
            }
            let Some(player) = self.current_player() else {
                return;
            };
            if let Ok(p) = self.player_mut(player) {
                p.reset_turn_counters();
            }

            // A new event comes up whenever the marshal's seat opens.
            if self.marshal() == Some(player) {
                self.advance_event(events);
                if self.phase != Phase::Playing {
                    return;
                }
                if self.current_player() != Some(player) {
                    continue;
                }
            }

            events.push(Event::TurnStarted { player });

            self.dynamite_check(player, events);
            if self.phase != Phase::Playing {
                return;
            }
            if self.player(player).map(|p| !p.alive).unwrap_or(true)
                || self.current_player() != Some(player)
            {
                continue;
            }

            if self.jail_check(player, events) {
                self.table.advance();
                continue;
            }

            // A copycat picks whose character sheet to borrow before
            // drawing; the draw phase resumes once the pick lands.
            let copies = self
                .trait_of(player)
                .map(|spec| spec.copycat)
                .unwrap_or(false);
            if copies && self.table.alive_count() > 1 {
                let pending =
                    PendingAction::single(PendingKind::CopyCharacter, player, player);
                self.open_pending(pending, events);
                return;
            }

            self.draw_phase(player, events);
            return;
        }
    }

    fn advance_event(&mut self, events: &mut EventBus) {
        if self.event_deck.is_empty() {
            return;
        }
        let event = self.event_deck.remove(0);
        self.event_deck.push(event);
        self.active_event_id = Some(event);
        events.push(Event::EventRevealed { event });
        match event {
            EventId::Thunderstorm => self.thunderstorm(events),
            EventId::DeadMan => self.dead_man(events),
            _ => {}
        }
    }

    /// Every card in play blows away.
    fn thunderstorm(&mut self, _events: &mut EventBus) {
        let ids: Vec<PlayerId> = self.alive_players();
        for id in ids {
            if let Ok(p) = self.player_mut(id) {
                p.fresh.clear();
                let cards: Vec<_> = p.in_play.drain(..).collect();
                self.deck.discard_all(cards);
            }
        }
    }

    /// The first player ever eliminated rides again, once per game, at two
    /// hit points and two cards.
    fn dead_man(&mut self, events: &mut EventBus) {
        if self.dead_man_used {
            return;
        }
        let Some(id) = self.first_eliminated else {
            return;
        };
        if self.player(id).map(|p| p.alive).unwrap_or(true) {
            return;
        }
        self.dead_man_used = true;
        if let Ok(p) = self.player_mut(id) {
            p.alive = true;
            p.ghost = true;
            p.hp = 2.min(p.max_hp as i8);
        }
        self.table.insert_after_current(id);
        self.draw_to(id, 2, events);
        events.push(Event::PlayerRevived { player: id });
    }

    /// Spades two through nine and the dynamite goes off for three damage;
    /// anything else passes it to the next living player.
    fn dynamite_check(&mut self, player: PlayerId, events: &mut EventBus) {
        let Some(index) = self
            .player(player)
            .ok()
            .and_then(|p| p.in_play_index(CardName::Dynamite))
        else {
            return;
        };
        let passed = self.run_check(player, events, |card| {
            !(card.suit == Suit::Spades && (2..=9).contains(&card.rank.value()))
        });
        let Ok(p) = self.player_mut(player) else {
            return;
        };
        let dynamite = p.in_play.remove(index);
        if passed {
            match self.table.left_neighbor(player) {
                Some(next) => {
                    if let Ok(np) = self.player_mut(next) {
                        np.in_play.push(dynamite);
                    }
                }
                None => self.deck.discard(dynamite),
            }
        } else {
            self.deck.discard(dynamite);
            self.apply_damage(None, player, 3, events);
        }
    }

    /// Hearts breaks jail. Either way the card is spent; a failed check
    /// skips the whole turn.
    fn jail_check(&mut self, player: PlayerId, events: &mut EventBus) -> bool {
        let Some(index) = self
            .player(player)
            .ok()
            .and_then(|p| p.in_play_index(CardName::Jail))
        else {
            return false;
        };
        let passed = self.run_check(player, events, |card| card.suit == Suit::Hearts);
        if let Ok(p) = self.player_mut(player) {
            let jail = p.in_play.remove(index);
            self.deck.discard(jail);
        }
        if !passed {
            events.push(Event::TurnSkipped {
                player,
                by: CardName::Jail,
            });
        }
        !passed
    }

    pub(super) fn draw_phase(&mut self, player: PlayerId, events: &mut EventBus) {
        let variant = self
            .trait_of(player)
            .map(|spec| spec.draw_variant)
            .unwrap_or(DrawVariant::Standard);
        match variant {
            DrawVariant::Standard => self.draw_to(player, 2, events),
            DrawVariant::TopOfDiscard => {
                match self.deck.take_top_discard() {
                    Some(card) => {
                        if let Ok(p) = self.player_mut(player) {
                            p.hand.push(card);
                        }
                        events.push(Event::CardsDrawn { player, count: 1 });
                        self.draw_to(player, 1, events);
                    }
                    None => self.draw_to(player, 2, events),
                }
            }
            DrawVariant::WoundScaled => {
                let wounds = self.player(player).map(|p| p.wounds()).unwrap_or(0);
                self.draw_to(player, 1 + wounds as usize, events);
            }
            DrawVariant::StealThenDraw => {
                let has_victims = self
                    .table
                    .others_from(player)
                    .iter()
                    .any(|&id| self.player(id).map(|p| !p.hand.is_empty()).unwrap_or(false));
                if !has_victims {
                    self.draw_to(player, 2, events);
                    return;
                }
                let pending = PendingAction::single(
                    PendingKind::DrawPick {
                        variant,
                        picks_left: 1,
                    },
                    player,
                    player,
                );
                self.open_pending(pending, events);
            }
            DrawVariant::RevealPick => {
                let revealed = self.deck.draw_cards(3, &mut self.rng);
                if revealed.len() < 3 {
                    // Not enough cards to offer a choice; take what came up.
                    let count = revealed.len();
                    if let Ok(p) = self.player_mut(player) {
                        p.hand.extend(revealed);
                    }
                    if count > 0 {
                        events.push(Event::CardsDrawn { player, count });
                    }
                    return;
                }
                let mut pending = PendingAction::single(
                    PendingKind::DrawPick {
                        variant,
                        picks_left: 2,
                    },
                    player,
                    player,
                );
                pending.revealed = revealed;
                self.open_pending(pending, events);
            }
            DrawVariant::EquipmentOrDraw => {
                let any_equipment = self
                    .table
                    .from_player(player)
                    .iter()
                    .any(|&id| {
                        id != player
                            && self
                                .player(id)
                                .map(|p| !p.in_play.is_empty())
                                .unwrap_or(false)
                    });
                if !any_equipment {
                    self.draw_to(player, 2, events);
                    return;
                }
                let pending = PendingAction::single(
                    PendingKind::DrawPick {
                        variant,
                        picks_left: 1,
                    },
                    player,
                    player,
                );
                self.open_pending(pending, events);
            }
        }
    }

    /// Close out the acting player's turn, or demand the forced discard
    /// first when the hand limit is exceeded.
    pub fn end_turn(&mut self, player: PlayerId, events: &mut EventBus) -> Result<(), GameError> {
        self.ensure_playing()?;
        self.ensure_no_pending()?;
        self.ensure_turn(player)?;

        if self.over_hand_limit(player) {
            let pending = PendingAction::single(PendingKind::HandLimitDiscard, player, player);
            self.open_pending(pending, events);
            return Ok(());
        }
        self.finish_turn(player, events);
        Ok(())
    }

    pub(super) fn over_hand_limit(&self, player: PlayerId) -> bool {
        let Ok(p) = self.player(player) else {
            return false;
        };
        if self
            .trait_of(player)
            .map(|spec| spec.no_hand_limit)
            .unwrap_or(false)
        {
            return false;
        }
        p.hand.len() > p.hp.max(0) as usize
    }

    /// End-of-turn event effects, then hand the table to the next seat.
    pub(super) fn finish_turn(&mut self, player: PlayerId, events: &mut EventBus) {
        let burn = self.active_event().end_turn_damage();
        if burn > 0 {
            self.apply_damage(None, player, burn, events);
        }
        if self.phase != Phase::Playing {
            return;
        }
        if self.current_player() == Some(player) {
            self.table.advance();
        }
        self.begin_turn(events);
    }
}
