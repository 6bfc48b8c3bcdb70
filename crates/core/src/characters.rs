use crate::Suit;
use serde::{Deserialize, Serialize};

/// Draw-phase behavior at the start of the owner's turn.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum DrawVariant {
    /// Draw two from the deck.
    Standard,
    /// Pick a victim to steal a hand card from (or draw blind), then draw one.
    StealThenDraw,
    /// Reveal three, keep two, discard the rest.
    RevealPick,
    /// Take the top of the discard pile, then draw one.
    TopOfDiscard,
    /// Draw one plus one per wound.
    WoundScaled,
    /// Take one card in play in front of another player, or draw two blind.
    EquipmentOrDraw,
}

/// Reflex fired when the owner survives a damage resolution.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum DamageReflex {
    /// Draw one card per point of damage taken.
    DrawPerDamage,
    /// Take one random card from the attacker's hand per point of damage.
    StealFromAttacker,
}

/// Bonus granted to a living holder when any other player is eliminated.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum EliminationBonus {
    DrawTwo,
    HealTwo,
}

/// Owner-activated character ability, spent through `activate_ability`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ActiveAbility {
    /// Discard two hand cards to heal one.
    DiscardTwoToHeal,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum CharacterId {
    QuickdrawKid,
    EagleEye,
    Shadowfoot,
    IronHide,
    Snakeblood,
    Gravedigger,
    Bloodhound,
    Rattlesnake,
    Undertaker,
    Sawbones,
    Packrat,
    Trickshot,
    Lightfinger,
    Prospector,
    Cardsharp,
    ScarredVeteran,
    Quartermaster,
    Medic,
    Opportunist,
    Mimic,
}

impl CharacterId {
    pub const ALL: [CharacterId; 20] = [
        CharacterId::QuickdrawKid,
        CharacterId::EagleEye,
        CharacterId::Shadowfoot,
        CharacterId::IronHide,
        CharacterId::Snakeblood,
        CharacterId::Gravedigger,
        CharacterId::Bloodhound,
        CharacterId::Rattlesnake,
        CharacterId::Undertaker,
        CharacterId::Sawbones,
        CharacterId::Packrat,
        CharacterId::Trickshot,
        CharacterId::Lightfinger,
        CharacterId::Prospector,
        CharacterId::Cardsharp,
        CharacterId::ScarredVeteran,
        CharacterId::Quartermaster,
        CharacterId::Medic,
        CharacterId::Opportunist,
        CharacterId::Mimic,
    ];
}

/// Capability descriptor for one character. Components consult these named
/// hooks through the keyed lookup rather than matching on display names.
#[derive(Debug, Clone, Copy)]
pub struct CharacterSpec {
    pub id: CharacterId,
    pub name: &'static str,
    pub max_hp: u8,
    pub draw_variant: DrawVariant,
    /// Others see this player one seat farther away.
    pub seen_farther: u8,
    /// This player sees others one seat closer.
    pub sees_closer: u8,
    pub damage_reflex: Option<DamageReflex>,
    /// A built-in passive defense check, as if a barrel were in play.
    pub innate_barrel: bool,
    /// Immune to cards of this suit played by other players.
    pub immune_suit: Option<Suit>,
    pub unlimited_attacks: bool,
    /// Inherits an eliminated player's cards instead of the discard pile.
    pub scavenger: bool,
    pub no_hand_limit: bool,
    /// May play an attack as a dodge and a dodge as an attack.
    pub attack_dodge_duality: bool,
    pub elimination_bonus: Option<EliminationBonus>,
    pub active_ability: Option<ActiveAbility>,
    /// Draws one card after answering an interrupt with a card outside the
    /// owner's own turn.
    pub outside_turn_draw: bool,
    /// Borrows another player's character sheet each turn.
    pub copycat: bool,
}

const fn base(id: CharacterId, name: &'static str, max_hp: u8) -> CharacterSpec {
    CharacterSpec {
        id,
        name,
        max_hp,
        draw_variant: DrawVariant::Standard,
        seen_farther: 0,
        sees_closer: 0,
        damage_reflex: None,
        innate_barrel: false,
        immune_suit: None,
        unlimited_attacks: false,
        scavenger: false,
        no_hand_limit: false,
        attack_dodge_duality: false,
        elimination_bonus: None,
        active_ability: None,
        outside_turn_draw: false,
        copycat: false,
    }
}

pub fn character_spec(id: CharacterId) -> CharacterSpec {
    match id {
        CharacterId::QuickdrawKid => CharacterSpec {
            unlimited_attacks: true,
            ..base(id, "Quickdraw Kid", 4)
        },
        CharacterId::EagleEye => CharacterSpec {
            sees_closer: 1,
            ..base(id, "Eagle Eye", 4)
        },
        CharacterId::Shadowfoot => CharacterSpec {
            seen_farther: 1,
            ..base(id, "Shadowfoot", 3)
        },
        CharacterId::IronHide => CharacterSpec {
            innate_barrel: true,
            ..base(id, "Iron Hide", 4)
        },
        CharacterId::Snakeblood => CharacterSpec {
            immune_suit: Some(Suit::Diamonds),
            ..base(id, "Snakeblood", 3)
        },
        CharacterId::Gravedigger => CharacterSpec {
            scavenger: true,
            ..base(id, "Gravedigger", 4)
        },
        CharacterId::Bloodhound => CharacterSpec {
            damage_reflex: Some(DamageReflex::DrawPerDamage),
            ..base(id, "Bloodhound", 4)
        },
        CharacterId::Rattlesnake => CharacterSpec {
            damage_reflex: Some(DamageReflex::StealFromAttacker),
            ..base(id, "Rattlesnake", 3)
        },
        CharacterId::Undertaker => CharacterSpec {
            elimination_bonus: Some(EliminationBonus::DrawTwo),
            ..base(id, "Undertaker", 4)
        },
        CharacterId::Sawbones => CharacterSpec {
            elimination_bonus: Some(EliminationBonus::HealTwo),
            ..base(id, "Sawbones", 4)
        },
        CharacterId::Packrat => CharacterSpec {
            no_hand_limit: true,
            ..base(id, "Packrat", 3)
        },
        CharacterId::Trickshot => CharacterSpec {
            attack_dodge_duality: true,
            ..base(id, "Trickshot", 4)
        },
        CharacterId::Lightfinger => CharacterSpec {
            draw_variant: DrawVariant::StealThenDraw,
            ..base(id, "Lightfinger", 4)
        },
        CharacterId::Prospector => CharacterSpec {
            draw_variant: DrawVariant::TopOfDiscard,
            ..base(id, "Prospector", 4)
        },
        CharacterId::Cardsharp => CharacterSpec {
            draw_variant: DrawVariant::RevealPick,
            ..base(id, "Cardsharp", 4)
        },
        CharacterId::ScarredVeteran => CharacterSpec {
            draw_variant: DrawVariant::WoundScaled,
            ..base(id, "Scarred Veteran", 5)
        },
        CharacterId::Quartermaster => CharacterSpec {
            draw_variant: DrawVariant::EquipmentOrDraw,
            ..base(id, "Quartermaster", 4)
        },
        CharacterId::Medic => CharacterSpec {
            active_ability: Some(ActiveAbility::DiscardTwoToHeal),
            ..base(id, "Medic", 4)
        },
        CharacterId::Opportunist => CharacterSpec {
            outside_turn_draw: true,
            ..base(id, "Opportunist", 4)
        },
        CharacterId::Mimic => CharacterSpec {
            copycat: true,
            ..base(id, "Mimic", 3)
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_character_has_a_spec() {
        for id in CharacterId::ALL {
            let spec = character_spec(id);
            assert_eq!(spec.id, id);
            assert!(spec.max_hp >= 3 && spec.max_hp <= 5);
        }
    }
}
