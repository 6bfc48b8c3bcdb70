use crate::{catalog, Card, CardCategory, CardName, CharacterId};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;

/// Internal player identity. Never leaves the core; transport only ever sees
/// the public uuid.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlayerId(pub u32);

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Role {
    Marshal,
    Deputy,
    Outlaw,
    Renegade,
}

impl Role {
    pub fn label(self) -> &'static str {
        match self {
            Role::Marshal => "Marshal",
            Role::Deputy => "Deputy",
            Role::Outlaw => "Outlaw",
            Role::Renegade => "Renegade",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Player {
    pub id: PlayerId,
    pub public_id: Uuid,
    pub name: String,
    pub hp: i8,
    pub max_hp: u8,
    pub alive: bool,
    /// Set when an event pulls the player back from the dead; cleared if
    /// they are eliminated again.
    pub ghost: bool,
    pub role: Role,
    pub character: CharacterId,
    /// Transient character override for copycats, cleared at turn reset.
    pub borrowed: Option<CharacterId>,
    pub hand: Vec<Card>,
    pub in_play: Vec<Card>,
    /// Ids of in-play ability cards played this turn; inert until the
    /// owner's next turn begins.
    pub fresh: HashSet<u32>,
    pub attacks_this_turn: u8,
    pub ability_uses_this_turn: u8,
}

impl Player {
    pub fn new(id: PlayerId, name: String) -> Self {
        Self {
            id,
            public_id: Uuid::new_v4(),
            name,
            hp: 0,
            max_hp: 0,
            alive: true,
            ghost: false,
            role: Role::Outlaw,
            character: CharacterId::QuickdrawKid,
            borrowed: None,
            hand: Vec::new(),
            in_play: Vec::new(),
            fresh: HashSet::new(),
            attacks_this_turn: 0,
            ability_uses_this_turn: 0,
        }
    }

    pub fn heal(&mut self, amount: u8) {
        self.hp = (self.hp + amount as i8).min(self.max_hp as i8);
    }

    pub fn wounds(&self) -> u8 {
        (self.max_hp as i8 - self.hp).max(0) as u8
    }

    pub fn weapon(&self) -> Option<&Card> {
        self.in_play
            .iter()
            .find(|card| catalog::card_spec(card.name).category == CardCategory::Weapon)
    }

    pub fn has_in_play(&self, name: CardName) -> bool {
        self.in_play.iter().any(|card| card.name == name)
    }

    pub fn in_play_index(&self, name: CardName) -> Option<usize> {
        self.in_play.iter().position(|card| card.name == name)
    }

    /// Put a permanent, weapon or ability card in front of the player.
    /// Returns the cards evicted by the one-weapon / one-copy rules.
    pub fn equip(&mut self, card: Card) -> Vec<Card> {
        let category = catalog::card_spec(card.name).category;
        let mut evicted = Vec::new();
        if category == CardCategory::Weapon {
            while let Some(pos) = self
                .in_play
                .iter()
                .position(|c| catalog::card_spec(c.name).category == CardCategory::Weapon)
            {
                evicted.push(self.in_play.remove(pos));
            }
        } else {
            while let Some(pos) = self.in_play.iter().position(|c| c.name == card.name) {
                evicted.push(self.in_play.remove(pos));
            }
        }
        for old in &evicted {
            self.fresh.remove(&old.id);
        }
        if matches!(
            category,
            CardCategory::ActiveAbility | CardCategory::ReactiveAbility
        ) {
            self.fresh.insert(card.id);
        }
        self.in_play.push(card);
        evicted
    }

    /// Strip everything the player holds, for elimination and penalties.
    pub fn strip_cards(&mut self) -> Vec<Card> {
        self.fresh.clear();
        let mut cards: Vec<Card> = self.hand.drain(..).collect();
        cards.extend(self.in_play.drain(..));
        cards
    }

    pub fn reset_turn_counters(&mut self) {
        self.attacks_this_turn = 0;
        self.ability_uses_this_turn = 0;
        self.borrowed = None;
        self.fresh.clear();
    }

    pub fn hand_index_of(&self, name: CardName) -> Option<usize> {
        self.hand.iter().position(|card| card.name == name)
    }
}
