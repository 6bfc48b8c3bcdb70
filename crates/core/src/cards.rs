use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Suit {
    Spades,
    Hearts,
    Clubs,
    Diamonds,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Rank {
    Ace,
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
}

impl Rank {
    pub const ALL: [Rank; 13] = [
        Rank::Ace,
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
    ];

    pub fn value(self) -> u8 {
        match self {
            Rank::Ace => 1,
            Rank::Two => 2,
            Rank::Three => 3,
            Rank::Four => 4,
            Rank::Five => 5,
            Rank::Six => 6,
            Rank::Seven => 7,
            Rank::Eight => 8,
            Rank::Nine => 9,
            Rank::Ten => 10,
            Rank::Jack => 11,
            Rank::Queen => 12,
            Rank::King => 13,
        }
    }
}

/// How a card behaves once played.
///
/// Consumables resolve and go to the discard pile. Permanents, weapons and
/// ability cards stay in front of their owner until removed.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum CardCategory {
    Consumable,
    Permanent,
    Weapon,
    ActiveAbility,
    ReactiveAbility,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum CardName {
    Attack,
    Dodge,
    Tonic,
    Saloon,
    Stagecoach,
    Express,
    Snatch,
    Sabotage,
    Duel,
    Ambush,
    Gatling,
    GeneralStore,
    Springfield,
    Jail,
    Dynamite,
    Barrel,
    Mustang,
    Scope,
    Derringer,
    Canteen,
    IronPlate,
    Volcanic,
    Schofield,
    Remington,
    Carbine,
    Winchester,
}

impl CardName {
    pub fn label(self) -> &'static str {
        match self {
            CardName::Attack => "Attack",
            CardName::Dodge => "Dodge",
            CardName::Tonic => "Tonic",
            CardName::Saloon => "Saloon",
            CardName::Stagecoach => "Stagecoach",
            CardName::Express => "Express",
            CardName::Snatch => "Snatch",
            CardName::Sabotage => "Sabotage",
            CardName::Duel => "Duel",
            CardName::Ambush => "Ambush",
            CardName::Gatling => "Gatling",
            CardName::GeneralStore => "General Store",
            CardName::Springfield => "Springfield",
            CardName::Jail => "Jail",
            CardName::Dynamite => "Dynamite",
            CardName::Barrel => "Barrel",
            CardName::Mustang => "Mustang",
            CardName::Scope => "Scope",
            CardName::Derringer => "Derringer",
            CardName::Canteen => "Canteen",
            CardName::IronPlate => "Iron Plate",
            CardName::Volcanic => "Volcanic",
            CardName::Schofield => "Schofield",
            CardName::Remington => "Remington",
            CardName::Carbine => "Carbine",
            CardName::Winchester => "Winchester",
        }
    }
}

/// A printed card. Suit and rank are assigned from the pool at deck-build
/// time and only matter for check draws and display.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Card {
    pub id: u32,
    pub name: CardName,
    pub suit: Suit,
    pub rank: Rank,
}

impl Card {
    pub fn new(id: u32, name: CardName, suit: Suit, rank: Rank) -> Self {
        Self {
            id,
            name,
            suit,
            rank,
        }
    }
}
