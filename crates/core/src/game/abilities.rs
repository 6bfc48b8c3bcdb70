use super::*;
use crate::{
    catalog, distance, ActiveAbility, CardCategory, CardName, Event, EventBus, GameError,
};

impl Game {
    /// Spend an ability on the owner's turn: one in-play index fires a
    /// played ability card, two hand indices pay a character ability's cost.
    pub fn activate_ability(
        &mut self,
        player: PlayerId,
        indices: &[usize],
        target: Option<PlayerId>,
        events: &mut EventBus,
    ) -> Result<(), GameError> {
        self.ensure_playing()?;
        self.ensure_no_pending()?;
        self.ensure_turn(player)?;
        match indices {
            [index] => self.fire_ability_card(player, *index, target, events),
            [a, b] => self.fire_character_ability(player, *a, *b, events),
            _ => Err(GameError::NoAbility),
        }
    }

    fn fire_ability_card(
        &mut self,
        player: PlayerId,
        index: usize,
        target: Option<PlayerId>,
        events: &mut EventBus,
    ) -> Result<(), GameError> {
        let card = *self
            .player(player)?
            .in_play
            .get(index)
            .ok_or(GameError::InvalidCardIndex)?;
        let spec = catalog::card_spec(card.name);
        if spec.category != CardCategory::ActiveAbility {
            return Err(GameError::NoAbility);
        }
        if self.player(player)?.fresh.contains(&card.id) {
            return Err(GameError::CardNotReady);
        }

        match card.name {
            CardName::Derringer => {
                let t = target.ok_or(GameError::MissingTarget)?;
                if t == player {
                    return Err(GameError::SelfTarget);
                }
                if self.table.position(t).is_none() {
                    return Err(GameError::InvalidTarget);
                }
                let d = distance::distance(self, player, t).ok_or(GameError::InvalidTarget)?;
                if d > 1 {
                    return Err(GameError::OutOfRange);
                }
                self.spend_in_play(player, index, events);
                events.push(Event::AbilityUsed { player });
                if self.immune_to(t, &card) {
                    events.push(Event::PlayIgnored { player: t, card });
                } else {
                    self.open_attack(player, t, 1, events);
                }
                // The little gun comes with a consolation draw.
                self.draw_to(player, 1, events);
            }
            CardName::Canteen => {
                let p = self.player(player)?;
                if p.hp >= p.max_hp as i8 {
                    return Err(GameError::FullHealth);
                }
                self.spend_in_play(player, index, events);
                events.push(Event::AbilityUsed { player });
                if let Ok(p) = self.player_mut(player) {
                    p.heal(1);
                    let hp = p.hp;
                    events.push(Event::Healed {
                        player,
                        amount: 1,
                        hp,
                    });
                }
            }
            _ => return Err(GameError::NoAbility),
        }
        Ok(())
    }

    fn fire_character_ability(
        &mut self,
        player: PlayerId,
        a: usize,
        b: usize,
        events: &mut EventBus,
    ) -> Result<(), GameError> {
        let ability = self
            .trait_of(player)
            .and_then(|spec| spec.active_ability)
            .ok_or(GameError::NoAbility)?;
        match ability {
            ActiveAbility::DiscardTwoToHeal => {
                if self.player(player)?.ability_uses_this_turn >= 1 {
                    return Err(GameError::NoAbility);
                }
                let p = self.player(player)?;
                if p.hp >= p.max_hp as i8 {
                    return Err(GameError::FullHealth);
                }
                if p.hand.len() < 2 {
                    return Err(GameError::CostUnmet);
                }
                if a == b || a >= p.hand.len() || b >= p.hand.len() {
                    return Err(GameError::InvalidCardIndex);
                }
                let (first, second) = (a.max(b), a.min(b));
                self.discard_from_hand(player, first, events)?;
                self.discard_from_hand(player, second, events)?;
                if let Ok(p) = self.player_mut(player) {
                    p.ability_uses_this_turn += 1;
                    p.heal(1);
                    let hp = p.hp;
                    events.push(Event::AbilityUsed { player });
                    events.push(Event::Healed {
                        player,
                        amount: 1,
                        hp,
                    });
                }
            }
        }
        Ok(())
    }

    fn spend_in_play(&mut self, player: PlayerId, index: usize, events: &mut EventBus) {
        if let Ok(p) = self.player_mut(player) {
            if index < p.in_play.len() {
                let card = p.in_play.remove(index);
                p.fresh.remove(&card.id);
                self.deck.discard(card);
                events.push(Event::CardPlayed { player, card });
            }
        }
    }
}
