use crate::{Card, CardCategory, CardName, Deck, Rank, RngState, Suit};

/// Rules metadata for one card identifier. Pure lookup, no mutation.
#[derive(Debug, Clone, Copy)]
pub struct CardSpec {
    pub name: CardName,
    pub category: CardCategory,
    /// Printed range of a weapon card.
    pub weapon_range: Option<u8>,
    /// Weapon ignores the one-attack-per-turn limit.
    pub unlimited_attacks: bool,
    /// Counts against the primary attack limit and may be answered by a dodge.
    pub attack_class: bool,
    /// Playable only against a target at distance 1, regardless of weapon.
    pub reach_one: bool,
    /// Requires a living target other than the player.
    pub needs_target: bool,
    /// The one healing card that may also be aimed at another player.
    pub allows_any_target: bool,
}

const fn spec(name: CardName, category: CardCategory) -> CardSpec {
    CardSpec {
        name,
        category,
        weapon_range: None,
        unlimited_attacks: false,
        attack_class: false,
        reach_one: false,
        needs_target: false,
        allows_any_target: false,
    }
}

const fn targeted(name: CardName, category: CardCategory, reach_one: bool) -> CardSpec {
    CardSpec {
        name,
        category,
        weapon_range: None,
        unlimited_attacks: false,
        attack_class: false,
        reach_one,
        needs_target: true,
        allows_any_target: false,
    }
}

const fn weapon(name: CardName, range: u8, unlimited: bool) -> CardSpec {
    CardSpec {
        name,
        category: CardCategory::Weapon,
        weapon_range: Some(range),
        unlimited_attacks: unlimited,
        attack_class: false,
        reach_one: false,
        needs_target: false,
        allows_any_target: false,
    }
}

static ATTACK: CardSpec = CardSpec {
    name: CardName::Attack,
    category: CardCategory::Consumable,
    weapon_range: None,
    unlimited_attacks: false,
    attack_class: true,
    reach_one: false,
    needs_target: true,
    allows_any_target: false,
};
static DODGE: CardSpec = spec(CardName::Dodge, CardCategory::Consumable);
static TONIC: CardSpec = CardSpec {
    name: CardName::Tonic,
    category: CardCategory::Consumable,
    weapon_range: None,
    unlimited_attacks: false,
    attack_class: false,
    reach_one: false,
    needs_target: false,
    allows_any_target: true,
};
static SALOON: CardSpec = spec(CardName::Saloon, CardCategory::Consumable);
static STAGECOACH: CardSpec = spec(CardName::Stagecoach, CardCategory::Consumable);
static EXPRESS: CardSpec = spec(CardName::Express, CardCategory::Consumable);
static SNATCH: CardSpec = targeted(CardName::Snatch, CardCategory::Consumable, true);
static SABOTAGE: CardSpec = targeted(CardName::Sabotage, CardCategory::Consumable, false);
static DUEL: CardSpec = targeted(CardName::Duel, CardCategory::Consumable, false);
static AMBUSH: CardSpec = spec(CardName::Ambush, CardCategory::Consumable);
static GATLING: CardSpec = spec(CardName::Gatling, CardCategory::Consumable);
static GENERAL_STORE: CardSpec = spec(CardName::GeneralStore, CardCategory::Consumable);
static SPRINGFIELD: CardSpec = targeted(CardName::Springfield, CardCategory::Consumable, false);
static JAIL: CardSpec = targeted(CardName::Jail, CardCategory::Permanent, false);
static DYNAMITE: CardSpec = spec(CardName::Dynamite, CardCategory::Permanent);
static BARREL: CardSpec = spec(CardName::Barrel, CardCategory::Permanent);
static MUSTANG: CardSpec = spec(CardName::Mustang, CardCategory::Permanent);
static SCOPE: CardSpec = spec(CardName::Scope, CardCategory::Permanent);
static DERRINGER: CardSpec = targeted(CardName::Derringer, CardCategory::ActiveAbility, true);
static CANTEEN: CardSpec = spec(CardName::Canteen, CardCategory::ActiveAbility);
static IRON_PLATE: CardSpec = spec(CardName::IronPlate, CardCategory::ReactiveAbility);
static VOLCANIC: CardSpec = weapon(CardName::Volcanic, 1, true);
static SCHOFIELD: CardSpec = weapon(CardName::Schofield, 2, false);
static REMINGTON: CardSpec = weapon(CardName::Remington, 3, false);
static CARBINE: CardSpec = weapon(CardName::Carbine, 4, false);
static WINCHESTER: CardSpec = weapon(CardName::Winchester, 5, false);

pub fn card_spec(name: CardName) -> &'static CardSpec {
    match name {
        CardName::Attack => &ATTACK,
        CardName::Dodge => &DODGE,
        CardName::Tonic => &TONIC,
        CardName::Saloon => &SALOON,
        CardName::Stagecoach => &STAGECOACH,
        CardName::Express => &EXPRESS,
        CardName::Snatch => &SNATCH,
        CardName::Sabotage => &SABOTAGE,
        CardName::Duel => &DUEL,
        CardName::Ambush => &AMBUSH,
        CardName::Gatling => &GATLING,
        CardName::GeneralStore => &GENERAL_STORE,
        CardName::Springfield => &SPRINGFIELD,
        CardName::Jail => &JAIL,
        CardName::Dynamite => &DYNAMITE,
        CardName::Barrel => &BARREL,
        CardName::Mustang => &MUSTANG,
        CardName::Scope => &SCOPE,
        CardName::Derringer => &DERRINGER,
        CardName::Canteen => &CANTEEN,
        CardName::IronPlate => &IRON_PLATE,
        CardName::Volcanic => &VOLCANIC,
        CardName::Schofield => &SCHOFIELD,
        CardName::Remington => &REMINGTON,
        CardName::Carbine => &CARBINE,
        CardName::Winchester => &WINCHESTER,
    }
}

const DECK_LIST: &[(CardName, usize)] = &[
    (CardName::Attack, 25),
    (CardName::Dodge, 12),
    (CardName::Tonic, 6),
    (CardName::Saloon, 1),
    (CardName::Stagecoach, 2),
    (CardName::Express, 1),
    (CardName::Snatch, 4),
    (CardName::Sabotage, 4),
    (CardName::Duel, 3),
    (CardName::Ambush, 2),
    (CardName::Gatling, 1),
    (CardName::GeneralStore, 2),
    (CardName::Springfield, 1),
    (CardName::Jail, 3),
    (CardName::Dynamite, 1),
    (CardName::Barrel, 2),
    (CardName::Mustang, 2),
    (CardName::Scope, 1),
    (CardName::Derringer, 1),
    (CardName::Canteen, 1),
    (CardName::IronPlate, 2),
    (CardName::Volcanic, 2),
    (CardName::Schofield, 3),
    (CardName::Remington, 1),
    (CardName::Carbine, 1),
    (CardName::Winchester, 1),
];

pub fn deck_size() -> usize {
    DECK_LIST.iter().map(|(_, count)| count).sum()
}

/// Suit/rank pool the printed cards draw from: two interleaved standard
/// fifty-two card sets, shuffled before assignment.
fn suit_rank_pool(rng: &mut RngState) -> Vec<(Suit, Rank)> {
    let mut pool = Vec::with_capacity(104);
    for _ in 0..2 {
        for suit in [Suit::Spades, Suit::Hearts, Suit::Clubs, Suit::Diamonds] {
            for rank in Rank::ALL {
                pool.push((suit, rank));
            }
        }
    }
    rng.shuffle(&mut pool);
    pool
}

/// Build and shuffle the full draw pile, assigning card ids from 1.
pub fn build_deck(rng: &mut RngState) -> Deck {
    let pool = suit_rank_pool(rng);
    let mut draw = Vec::with_capacity(deck_size());
    let mut next_id = 1u32;
    let mut pool_iter = pool.into_iter();
    for &(name, count) in DECK_LIST {
        for _ in 0..count {
            let (suit, rank) = pool_iter.next().unwrap_or((Suit::Spades, Rank::Ace));
            draw.push(Card::new(next_id, name, suit, rank));
            next_id = next_id.saturating_add(1);
        }
    }
    let mut deck = Deck {
        draw,
        discard: Vec::new(),
    };
    deck.shuffle(rng);
    deck
}
