use super::*;
use crate::{
    CardName, DamageReflex, EliminationBonus, Event, EventBus, PendingKind, Role, Suit,
};

impl Game {
    /// Decrement hit points and resolve the consequences: the automatic
    /// self-preservation tonic, elimination cascades, survivor reflexes and
    /// the terminal win check.
    pub(super) fn apply_damage(
        &mut self,
        attacker: Option<PlayerId>,
        target: PlayerId,
        amount: u8,
        events: &mut EventBus,
    ) {
        if self.phase == Phase::Finished || amount == 0 {
            return;
        }
        let Ok(player) = self.player_mut(target) else {
            return;
        };
        if !player.alive {
            return;
        }
        player.hp -= amount as i8;
        let hp = player.hp;
        events.push(Event::DamageApplied {
            player: target,
            amount,
            hp,
        });

        self.auto_save(target, events);

        let survived = self.player(target).map(|p| p.hp > 0).unwrap_or(false);
        if !survived {
            self.eliminate(attacker, target, events);
            return;
        }
        self.damage_reflex(attacker, target, amount, events);
    }

    /// While lethal and more than two players stand, tonics in hand are
    /// drunk automatically until the holder climbs back above zero. The
    /// source behaves this way unconditionally, so we do too.
    fn auto_save(&mut self, target: PlayerId, events: &mut EventBus) {
        while self.table.alive_count() > 2 {
            let Ok(player) = self.player(target) else {
                return;
            };
            if player.hp > 0 {
                return;
            }
            let Some(index) = player.hand_index_of(CardName::Tonic) else {
                return;
            };
            let Ok(player) = self.player_mut(target) else {
                return;
            };
            let card = player.hand.remove(index);
            player.hp += 1;
            let hp = player.hp;
            self.deck.discard(card);
            events.push(Event::AutoSaved {
                player: target,
                card,
            });
            events.push(Event::Healed {
                player: target,
                amount: 1,
                hp,
            });
        }
    }

    fn damage_reflex(
        &mut self,
        attacker: Option<PlayerId>,
        target: PlayerId,
        amount: u8,
        events: &mut EventBus,
    ) {
        let Some(spec) = self.trait_of(target) else {
            return;
        };
        match spec.damage_reflex {
            Some(DamageReflex::DrawPerDamage) => {
                self.draw_to(target, amount as usize, events);
            }
            Some(DamageReflex::StealFromAttacker) => {
                let Some(attacker) = attacker.filter(|&a| a != target) else {
                    return;
                };
                for _ in 0..amount {
                    let len = self
                        .player(attacker)
                        .map(|p| p.hand.len())
                        .unwrap_or(0);
                    if len == 0 {
                        break;
                    }
                    let index = self.rng.pick(len);
                    let Ok(p) = self.player_mut(attacker) else {
                        break;
                    };
                    let card = p.hand.remove(index);
                    if let Ok(p) = self.player_mut(target) {
                        p.hand.push(card);
                    } else {
                        self.deck.discard(card);
                    }
                }
            }
            None => {}
        }
    }

    /// Mark a player dead and run the full elimination cascade.
    pub(super) fn eliminate(
        &mut self,
        killer: Option<PlayerId>,
        target: PlayerId,
        events: &mut EventBus,
    ) {
        let Ok(player) = self.player_mut(target) else {
            return;
        };
        player.alive = false;
        player.ghost = false;
        let role = player.role;
        let cards = player.strip_cards();
        self.table.remove(target);
        if self.first_eliminated.is_none() {
            self.first_eliminated = Some(target);
        }
        events.push(Event::PlayerEliminated {
            player: target,
            role,
        });

        // A living scavenger inherits the spoils; otherwise they are discarded.
        let scavenger = self
            .alive_players()
            .into_iter()
            .find(|&id| self.trait_of(id).map(|s| s.scavenger).unwrap_or(false));
        match scavenger {
            Some(id) => {
                if let Ok(p) = self.player_mut(id) {
                    p.hand.extend(cards);
                }
            }
            None => self.deck.discard_all(cards),
        }

        self.kill_rewards(killer, target, role, events);
        self.elimination_bonuses(target, events);
        self.drop_from_pending(target, events);
        self.check_win(events);
    }

    fn kill_rewards(
        &mut self,
        killer: Option<PlayerId>,
        target: PlayerId,
        role: Role,
        events: &mut EventBus,
    ) {
        let Some(killer) = killer.filter(|&k| k != target) else {
            return;
        };
        if self.player(killer).map(|p| !p.alive).unwrap_or(true) {
            return;
        }
        // Both enemy factions carry the bounty.
        if matches!(role, Role::Outlaw | Role::Renegade) {
            let bounty = 3 + self.active_event().kill_bonus() as usize;
            self.draw_to(killer, bounty, events);
        }
        let killer_is_marshal = self
            .player(killer)
            .map(|p| p.role == Role::Marshal)
            .unwrap_or(false);
        if killer_is_marshal && role == Role::Deputy {
            // Shooting your own deputy costs you everything you hold.
            if let Ok(p) = self.player_mut(killer) {
                let forfeited = p.strip_cards();
                self.deck.discard_all(forfeited);
            }
        }
    }

    fn elimination_bonuses(&mut self, dead: PlayerId, events: &mut EventBus) {
        let holders: Vec<(PlayerId, EliminationBonus)> = self
            .alive_players()
            .into_iter()
            .filter(|&id| id != dead)
            .filter_map(|id| {
                self.trait_of(id)
                    .and_then(|spec| spec.elimination_bonus.map(|bonus| (id, bonus)))
            })
            .collect();
        for (id, bonus) in holders {
            match bonus {
                EliminationBonus::DrawTwo => self.draw_to(id, 2, events),
                EliminationBonus::HealTwo => {
                    if let Ok(p) = self.player_mut(id) {
                        p.heal(2);
                        let hp = p.hp;
                        events.push(Event::Healed {
                            player: id,
                            amount: 2,
                            hp,
                        });
                    }
                }
            }
        }
    }

    /// Open an attack on `target`: the passive defense checks run first, and
    /// only an unsaved target is asked to respond.
    pub(super) fn open_attack(
        &mut self,
        attacker: PlayerId,
        target: PlayerId,
        amount: u8,
        events: &mut EventBus,
    ) {
        if self.attack_auto_saved(target, events) {
            return;
        }
        let pending = crate::PendingAction::single(
            PendingKind::DodgeOrDamage { amount },
            attacker,
            target,
        );
        self.open_pending(pending, events);
    }

    /// One passive defense check per barrel source: a barrel in play (unless
    /// equipment is suppressed) and the innate trait each grant one draw.
    pub(super) fn attack_auto_saved(&mut self, target: PlayerId, events: &mut EventBus) -> bool {
        let mut checks = 0;
        if !self.active_event().suppresses_equipment()
            && self
                .player(target)
                .map(|p| p.has_in_play(CardName::Barrel))
                .unwrap_or(false)
        {
            checks += 1;
        }
        if self
            .trait_of(target)
            .map(|spec| spec.innate_barrel)
            .unwrap_or(false)
        {
            checks += 1;
        }
        for _ in 0..checks {
            if self.run_check(target, events, |card| card.suit == Suit::Hearts) {
                return true;
            }
        }
        false
    }

    pub(super) fn open_pending(&mut self, pending: crate::PendingAction, events: &mut EventBus) {
        if let Some(awaiting) = pending.awaiting() {
            events.push(Event::InterruptOpened {
                kind: pending.kind,
                awaiting,
            });
            self.pending = Some(pending);
        }
    }
}
