use super::*;
use crate::{
    catalog, CardCategory, CardName, DeferredEffect, DrawVariant, Event, EventBus, GameError,
    PendingKind, Response,
};

impl Game {
    /// Answer the outstanding interrupt. Only the head of the responder
    /// queue gets through; everyone else is told to wait.
    pub fn respond(
        &mut self,
        player: PlayerId,
        response: Response,
        events: &mut EventBus,
    ) -> Result<(), GameError> {
        self.ensure_playing()?;
        let pending = self.pending.as_ref().ok_or(GameError::NoInterrupt)?;
        if pending.awaiting() != Some(player) {
            return Err(GameError::NotYourInterrupt);
        }
        let kind = pending.kind;
        let source = pending.source;
        let holder = self.current_player();

        match kind {
            PendingKind::DodgeOrDamage { amount } => {
                self.respond_dodge(player, source, amount, response, events)?
            }
            PendingKind::DiscardAttackOrDamage { amount } => {
                self.respond_ambush(player, source, amount, response, events)?
            }
            PendingKind::Duel { attacker, defender } => {
                self.respond_duel(player, attacker, defender, response, events)?
            }
            PendingKind::GeneralStore => self.respond_store(player, response, events)?,
            PendingKind::StealPick { target, discard } => {
                self.respond_steal(player, target, discard, response, events)?
            }
            PendingKind::HandLimitDiscard => {
                self.respond_hand_limit(player, response, events)?
            }
            PendingKind::DeferredCost { effect } => {
                self.respond_deferred(player, source, effect, response, events)?
            }
            PendingKind::DrawPick {
                variant,
                picks_left,
            } => self.respond_draw_pick(player, variant, picks_left, response, events)?,
            PendingKind::CopyCharacter => self.respond_copy(player, response, events)?,
        }

        // A duel or a pass can take the turn holder down mid-interrupt; the
        // next seat's turn has to open once the dust settles.
        if self.phase == Phase::Playing && self.pending.is_none() {
            if let Some(holder) = holder {
                if self.player(holder).map(|p| !p.alive).unwrap_or(true) {
                    self.begin_turn(events);
                }
            }
        }
        Ok(())
    }

    // === Per-kind handlers ===

    fn respond_dodge(
        &mut self,
        player: PlayerId,
        source: PlayerId,
        amount: u8,
        response: Response,
        events: &mut EventBus,
    ) -> Result<(), GameError> {
        match response {
            Response::PlayCard { index } => {
                self.answer_with_hand_card(player, index, CardName::Dodge, events)?;
                self.pop_responder(events);
            }
            Response::UseInPlay { index } => {
                self.answer_with_reactive(player, index, events)?;
                self.pop_responder(events);
            }
            Response::Pass => {
                self.pop_quietly();
                self.apply_damage(Some(source), player, amount, events);
                self.settle_pending(events);
            }
            _ => return Err(GameError::InvalidResponse),
        }
        Ok(())
    }

    fn respond_ambush(
        &mut self,
        player: PlayerId,
        source: PlayerId,
        amount: u8,
        response: Response,
        events: &mut EventBus,
    ) -> Result<(), GameError> {
        match response {
            Response::PlayCard { index } => {
                self.answer_with_hand_card(player, index, CardName::Attack, events)?;
                self.pop_responder(events);
            }
            Response::Pass => {
                self.pop_quietly();
                self.apply_damage(Some(source), player, amount, events);
                self.settle_pending(events);
            }
            _ => return Err(GameError::InvalidResponse),
        }
        Ok(())
    }

    fn respond_duel(
        &mut self,
        player: PlayerId,
        attacker: PlayerId,
        defender: PlayerId,
        response: Response,
        events: &mut EventBus,
    ) -> Result<(), GameError> {
        let opponent = if player == defender { attacker } else { defender };
        match response {
            Response::PlayCard { index } => {
                self.answer_with_hand_card(player, index, CardName::Attack, events)?;
                if let Some(pending) = self.pending.as_mut() {
                    pending.swap_to(opponent);
                    events.push(Event::InterruptAdvanced { awaiting: opponent });
                }
            }
            Response::Pass => {
                self.pop_quietly();
                self.apply_damage(Some(opponent), player, 1, events);
                self.settle_pending(events);
            }
            _ => return Err(GameError::InvalidResponse),
        }
        Ok(())
    }

    fn respond_store(
        &mut self,
        player: PlayerId,
        response: Response,
        events: &mut EventBus,
    ) -> Result<(), GameError> {
        let Response::PickCard { index } = response else {
            return Err(GameError::InvalidResponse);
        };
        let card = {
            let pending = self.pending.as_mut().ok_or(GameError::NoInterrupt)?;
            if index >= pending.revealed.len() {
                return Err(GameError::InvalidCardIndex);
            }
            pending.revealed.remove(index)
        };
        if let Ok(p) = self.player_mut(player) {
            p.hand.push(card);
        }
        events.push(Event::CardsDrawn { player, count: 1 });
        // Out of cards means out of turns; nobody picks from an empty shelf.
        if let Some(pending) = self.pending.as_mut() {
            if pending.revealed.is_empty() {
                pending.queue.clear();
            }
        }
        self.pop_responder(events);
        Ok(())
    }

    fn respond_steal(
        &mut self,
        player: PlayerId,
        target: PlayerId,
        to_discard: bool,
        response: Response,
        events: &mut EventBus,
    ) -> Result<(), GameError> {
        let card = match response {
            Response::FromHand => {
                let len = self.player(target)?.hand.len();
                if len == 0 {
                    return Err(GameError::InvalidResponse);
                }
                let index = self.rng.pick(len);
                self.player_mut(target)?.hand.remove(index)
            }
            Response::FromTable { index } => {
                let p = self.player_mut(target)?;
                if index >= p.in_play.len() {
                    return Err(GameError::InvalidCardIndex);
                }
                let card = p.in_play.remove(index);
                p.fresh.remove(&card.id);
                card
            }
            Response::Pass => {
                self.pop_responder(events);
                return Ok(());
            }
            _ => return Err(GameError::InvalidResponse),
        };
        if to_discard {
            self.deck.discard(card);
            events.push(Event::CardDiscarded {
                player: target,
                card,
            });
        } else if let Ok(p) = self.player_mut(player) {
            p.hand.push(card);
        }
        self.pop_responder(events);
        Ok(())
    }

    fn respond_hand_limit(
        &mut self,
        player: PlayerId,
        response: Response,
        events: &mut EventBus,
    ) -> Result<(), GameError> {
        let Response::PlayCard { index } = response else {
            return Err(GameError::InvalidResponse);
        };
        self.discard_from_hand(player, index, events)?;
        if self.over_hand_limit(player) {
            // Same responder keeps answering until the hand fits.
            return Ok(());
        }
        self.pop_responder(events);
        if self.phase == Phase::Playing && self.pending.is_none() {
            self.finish_turn(player, events);
        }
        Ok(())
    }

    fn respond_deferred(
        &mut self,
        player: PlayerId,
        source: PlayerId,
        effect: DeferredEffect,
        response: Response,
        events: &mut EventBus,
    ) -> Result<(), GameError> {
        match response {
            Response::PlayCard { index } => {
                self.discard_from_hand(player, index, events)?;
                self.pop_responder(events);
                // Cost paid; the captured effect fires immediately.
                match effect {
                    DeferredEffect::RangedAttack { target } => {
                        if self.table.position(target).is_some() {
                            self.open_attack(source, target, 1, events);
                        }
                    }
                }
            }
            Response::Pass => self.pop_responder(events),
            _ => return Err(GameError::InvalidResponse),
        }
        Ok(())
    }

    fn respond_draw_pick(
        &mut self,
        player: PlayerId,
        variant: DrawVariant,
        picks_left: u8,
        response: Response,
        events: &mut EventBus,
    ) -> Result<(), GameError> {
        match (variant, response) {
            (DrawVariant::StealThenDraw, Response::PickPlayer { target }) => {
                if target == player || self.table.position(target).is_none() {
                    return Err(GameError::InvalidTarget);
                }
                let len = self.player(target)?.hand.len();
                if len == 0 {
                    return Err(GameError::InvalidTarget);
                }
                let index = self.rng.pick(len);
                let card = self.player_mut(target)?.hand.remove(index);
                if let Ok(p) = self.player_mut(player) {
                    p.hand.push(card);
                }
                events.push(Event::CardsDrawn { player, count: 1 });
                self.pop_responder(events);
                self.draw_to(player, 1, events);
            }
            (DrawVariant::RevealPick, Response::PickCard { index }) => {
                let card = {
                    let pending = self.pending.as_mut().ok_or(GameError::NoInterrupt)?;
                    if index >= pending.revealed.len() {
                        return Err(GameError::InvalidCardIndex);
                    }
                    pending.revealed.remove(index)
                };
                if let Ok(p) = self.player_mut(player) {
                    p.hand.push(card);
                }
                events.push(Event::CardsDrawn { player, count: 1 });
                if picks_left > 1 {
                    if let Some(pending) = self.pending.as_mut() {
                        pending.kind = PendingKind::DrawPick {
                            variant,
                            picks_left: picks_left - 1,
                        };
                    }
                } else {
                    self.pop_responder(events);
                }
            }
            (DrawVariant::EquipmentOrDraw, Response::TakeInPlay { target, index }) => {
                if target == player || self.table.position(target).is_none() {
                    return Err(GameError::InvalidTarget);
                }
                let card = {
                    let p = self.player_mut(target)?;
                    if index >= p.in_play.len() {
                        return Err(GameError::InvalidCardIndex);
                    }
                    let card = p.in_play.remove(index);
                    p.fresh.remove(&card.id);
                    card
                };
                if let Ok(p) = self.player_mut(player) {
                    p.hand.push(card);
                }
                events.push(Event::CardsDrawn { player, count: 1 });
                self.pop_responder(events);
            }
            (_, Response::DrawFromDeck) => {
                self.pop_responder(events);
                self.draw_to(player, 2, events);
            }
            _ => return Err(GameError::InvalidResponse),
        }
        Ok(())
    }

    fn respond_copy(
        &mut self,
        player: PlayerId,
        response: Response,
        events: &mut EventBus,
    ) -> Result<(), GameError> {
        match response {
            Response::PickPlayer { target } => {
                if target == player || self.table.position(target).is_none() {
                    return Err(GameError::InvalidTarget);
                }
                let borrowed = self.player(target)?.character;
                self.player_mut(player)?.borrowed = Some(borrowed);
                self.pop_responder(events);
            }
            Response::Pass => self.pop_responder(events),
            _ => return Err(GameError::InvalidResponse),
        }
        // The suspended draw phase resumes under the borrowed sheet.
        if self.phase == Phase::Playing && self.pending.is_none() {
            self.draw_phase(player, events);
        }
        Ok(())
    }

    // === Shared response plumbing ===

    /// Spend a hand card whose effective identity matches `required`.
    fn answer_with_hand_card(
        &mut self,
        player: PlayerId,
        index: usize,
        required: CardName,
        events: &mut EventBus,
    ) -> Result<(), GameError> {
        let card = *self
            .player(player)?
            .hand
            .get(index)
            .ok_or(GameError::InvalidCardIndex)?;
        if self.effective_name(player, &card) != required {
            return Err(GameError::InvalidResponse);
        }
        let card = self.player_mut(player)?.hand.remove(index);
        self.deck.discard(card);
        events.push(Event::CardPlayed { player, card });
        self.outside_turn_reflex(player, events);
        Ok(())
    }

    /// Spend a reactive in-play card instead of a hand card. Inert until the
    /// owner's next turn if freshly played.
    fn answer_with_reactive(
        &mut self,
        player: PlayerId,
        index: usize,
        events: &mut EventBus,
    ) -> Result<(), GameError> {
        let card = *self
            .player(player)?
            .in_play
            .get(index)
            .ok_or(GameError::InvalidCardIndex)?;
        if catalog::card_spec(card.name).category != CardCategory::ReactiveAbility {
            return Err(GameError::InvalidResponse);
        }
        if self.player(player)?.fresh.contains(&card.id) {
            return Err(GameError::CardNotReady);
        }
        let p = self.player_mut(player)?;
        let card = p.in_play.remove(index);
        self.deck.discard(card);
        events.push(Event::CardPlayed { player, card });
        self.outside_turn_reflex(player, events);
        Ok(())
    }

    /// Dequeue the head responder and advance or resolve.
    fn pop_responder(&mut self, events: &mut EventBus) {
        if let Some(pending) = self.pending.as_mut() {
            pending.pop_current();
        }
        self.settle_pending(events);
    }

    /// Dequeue without settling, for handlers that still have side effects
    /// to run against the open interrupt.
    fn pop_quietly(&mut self) {
        if let Some(pending) = self.pending.as_mut() {
            pending.pop_current();
        }
    }

    pub(super) fn settle_pending(&mut self, events: &mut EventBus) {
        let Some(pending) = self.pending.as_ref() else {
            return;
        };
        if pending.is_done() {
            if let Some(pending) = self.pending.take() {
                self.deck.discard_all(pending.revealed);
                events.push(Event::InterruptResolved { kind: pending.kind });
                self.check_win(events);
            }
        } else if let Some(next) = pending.awaiting() {
            events.push(Event::InterruptAdvanced { awaiting: next });
        }
    }
}
