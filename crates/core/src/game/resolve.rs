use super::*;
use crate::{
    catalog, distance, Card, CardCategory, CardName, DeferredEffect, Event, EventBus,
    GameError, PendingAction, PendingKind,
};

impl Game {
    /// Play a hand card. Validation happens up front so a rejection never
    /// leaves a half-applied play behind.
    pub fn play(
        &mut self,
        player: PlayerId,
        card_index: usize,
        target: Option<PlayerId>,
        events: &mut EventBus,
    ) -> Result<(), GameError> {
        self.ensure_playing()?;
        self.ensure_no_pending()?;
        self.ensure_turn(player)?;

        let card = *self
            .player(player)?
            .hand
            .get(card_index)
            .ok_or(GameError::InvalidCardIndex)?;
        let effective = self.effective_name(player, &card);
        let spec = catalog::card_spec(effective);

        if effective == CardName::Dodge {
            return Err(GameError::NotPlayable);
        }

        let equips = matches!(
            spec.category,
            CardCategory::Weapon
                | CardCategory::Permanent
                | CardCategory::ActiveAbility
                | CardCategory::ReactiveAbility
        );

        // Equipment lands in front of its owner; targeting only matters at
        // activation time. Jail is the one permanent aimed at someone else.
        let target = if equips && effective != CardName::Jail {
            None
        } else {
            self.validate_target(player, spec, target)?
        };

        match effective {
            CardName::Attack => {
                if !distance::attack_allowed(self, player) {
                    return Err(GameError::AttackLimit);
                }
                self.check_range(player, target, spec)?;
            }
            CardName::Jail => {
                let t = target.ok_or(GameError::MissingTarget)?;
                if self.marshal() == Some(t) {
                    return Err(GameError::InvalidTarget);
                }
            }
            CardName::Springfield => {
                // Cost is a second card; the one being played does not count.
                if self.player(player)?.hand.len() < 2 {
                    return Err(GameError::CostUnmet);
                }
            }
            CardName::Tonic => {
                let t = target.unwrap_or(player);
                let p = self.player(t)?;
                if p.hp >= p.max_hp as i8 {
                    return Err(GameError::FullHealth);
                }
            }
            _ => self.check_range(player, target, spec)?,
        }

        // Suit immunity intercepts a play aimed at the holder: the card is
        // spent, nothing happens.
        if let Some(t) = target {
            if t != player && self.immune_to(t, &card) {
                let p = self.player_mut(player)?;
                let card = p.hand.remove(card_index);
                self.deck.discard(card);
                events.push(Event::CardPlayed { player, card });
                events.push(Event::PlayIgnored { player: t, card });
                return Ok(());
            }
        }

        let p = self.player_mut(player)?;
        let card = p.hand.remove(card_index);
        events.push(Event::CardPlayed { player, card });

        if equips {
            let owner = if effective == CardName::Jail {
                target.ok_or(GameError::MissingTarget)?
            } else {
                player
            };
            let evicted = self.player_mut(owner)?.equip(card);
            self.deck.discard_all(evicted);
            return Ok(());
        }

        self.deck.discard(card);
        self.dispatch(player, effective, &card, target, events);
        Ok(())
    }

    fn dispatch(
        &mut self,
        player: PlayerId,
        effective: CardName,
        card: &Card,
        target: Option<PlayerId>,
        events: &mut EventBus,
    ) {
        match effective {
            CardName::Attack => {
                if let Ok(p) = self.player_mut(player) {
                    p.attacks_this_turn += 1;
                }
                if let Some(t) = target {
                    self.open_attack(player, t, 1, events);
                }
            }
            CardName::Tonic => {
                let t = target.unwrap_or(player);
                if let Ok(p) = self.player_mut(t) {
                    p.heal(1);
                    let hp = p.hp;
                    events.push(Event::Healed {
                        player: t,
                        amount: 1,
                        hp,
                    });
                }
            }
            CardName::Saloon => {
                for id in self.alive_players() {
                    if let Ok(p) = self.player_mut(id) {
                        if p.hp < p.max_hp as i8 {
                            p.heal(1);
                            let hp = p.hp;
                            events.push(Event::Healed {
                                player: id,
                                amount: 1,
                                hp,
                            });
                        }
                    }
                }
            }
            CardName::Stagecoach => self.draw_to(player, 2, events),
            CardName::Express => self.draw_to(player, 3, events),
            CardName::Snatch => {
                if let Some(t) = target {
                    let pending = PendingAction::single(
                        PendingKind::StealPick {
                            target: t,
                            discard: false,
                        },
                        player,
                        player,
                    );
                    self.open_pending(pending, events);
                }
            }
            CardName::Sabotage => {
                if let Some(t) = target {
                    let pending = PendingAction::single(
                        PendingKind::StealPick {
                            target: t,
                            discard: true,
                        },
                        player,
                        player,
                    );
                    self.open_pending(pending, events);
                }
            }
            CardName::Duel => {
                if let Some(t) = target {
                    let pending = PendingAction::single(
                        PendingKind::Duel {
                            attacker: player,
                            defender: t,
                        },
                        player,
                        t,
                    );
                    self.open_pending(pending, events);
                }
            }
            CardName::Ambush => {
                let responders: Vec<PlayerId> = self
                    .table
                    .others_from(player)
                    .into_iter()
                    .filter(|&id| !self.immune_to(id, card))
                    .collect();
                let pending = PendingAction::broadcast(
                    PendingKind::DiscardAttackOrDamage { amount: 1 },
                    player,
                    responders,
                );
                self.open_pending(pending, events);
            }
            CardName::Gatling => {
                // Passive defenses fire up front; only unsaved targets are
                // asked to respond.
                let candidates: Vec<PlayerId> = self
                    .table
                    .others_from(player)
                    .into_iter()
                    .filter(|&id| !self.immune_to(id, card))
                    .collect();
                let mut responders = Vec::new();
                for id in candidates {
                    if !self.attack_auto_saved(id, events) {
                        responders.push(id);
                    }
                }
                let pending = PendingAction::broadcast(
                    PendingKind::DodgeOrDamage { amount: 1 },
                    player,
                    responders,
                );
                self.open_pending(pending, events);
            }
            CardName::GeneralStore => {
                let queue = self.table.from_player(player);
                let revealed = self.deck.draw_cards(queue.len(), &mut self.rng);
                let mut pending =
                    PendingAction::broadcast(PendingKind::GeneralStore, player, queue);
                pending.revealed = revealed;
                self.open_pending(pending, events);
            }
            CardName::Springfield => {
                if let Some(t) = target {
                    let pending = PendingAction::single(
                        PendingKind::DeferredCost {
                            effect: DeferredEffect::RangedAttack { target: t },
                        },
                        player,
                        player,
                    );
                    self.open_pending(pending, events);
                }
            }
            // Equipment and dodges never reach the dispatch table.
            _ => {}
        }
    }

    fn validate_target(
        &self,
        player: PlayerId,
        spec: &catalog::CardSpec,
        target: Option<PlayerId>,
    ) -> Result<Option<PlayerId>, GameError> {
        let Some(t) = target else {
            if spec.needs_target {
                return Err(GameError::MissingTarget);
            }
            return Ok(None);
        };
        if !spec.needs_target && !spec.allows_any_target {
            // A target on an untargeted card is noise, not an error.
            return Ok(None);
        }
        self.player(t)?;
        if self.table.position(t).is_none() {
            return Err(GameError::InvalidTarget);
        }
        if t == player && !spec.allows_any_target {
            return Err(GameError::SelfTarget);
        }
        Ok(Some(t))
    }

    fn check_range(
        &self,
        player: PlayerId,
        target: Option<PlayerId>,
        spec: &catalog::CardSpec,
    ) -> Result<(), GameError> {
        let Some(t) = target.filter(|&t| t != player) else {
            return Ok(());
        };
        let d = distance::distance(self, player, t).ok_or(GameError::InvalidTarget)?;
        if spec.attack_class {
            if self.active_event().attacks_ignore_distance() {
                return Ok(());
            }
            if d > distance::weapon_range(self, player) {
                return Err(GameError::OutOfRange);
            }
        } else if spec.reach_one && d > 1 {
            return Err(GameError::OutOfRange);
        }
        Ok(())
    }

    pub(super) fn immune_to(&self, player: PlayerId, card: &Card) -> bool {
        self.trait_of(player)
            .and_then(|spec| spec.immune_suit)
            .map(|suit| suit == card.suit)
            .unwrap_or(false)
    }
}
