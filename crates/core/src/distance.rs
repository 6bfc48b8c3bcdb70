use crate::{catalog, CardName, Game, PlayerId};

/// Seating distance from `from` to `to` with equipment and character
/// modifiers applied. Symmetric without modifiers; never below 1 for two
/// distinct living players.
pub fn distance(game: &Game, from: PlayerId, to: PlayerId) -> Option<u32> {
    let base = game.table.seat_distance(from, to)? as i32;
    let mut d = base;

    if !game.active_event().suppresses_equipment() {
        if player_has(game, to, CardName::Mustang) {
            d += 1;
        }
        if player_has(game, from, CardName::Scope) {
            d -= 1;
        }
    }
    if let Some(spec) = game.trait_of(to) {
        d += spec.seen_farther as i32;
    }
    if let Some(spec) = game.trait_of(from) {
        d -= spec.sees_closer as i32;
    }
    Some(d.max(1) as u32)
}

/// Effective weapon range: base 1, the equipped weapon's printed range, or a
/// forced 1 under the close-quarters event.
pub fn weapon_range(game: &Game, player: PlayerId) -> u32 {
    if game.active_event().forces_range_one() {
        return 1;
    }
    game.player(player)
        .ok()
        .and_then(|p| p.weapon())
        .and_then(|weapon| catalog::card_spec(weapon.name).weapon_range)
        .unwrap_or(1) as u32
}

/// Whether another primary attack may be played this turn. The
/// trait-suppressing event voids both unlimited-attack exemptions, weapon
/// and character alike.
pub fn attack_allowed(game: &Game, player: PlayerId) -> bool {
    let Ok(p) = game.player(player) else {
        return false;
    };
    if game.active_event().suppresses_traits() {
        return p.attacks_this_turn < 1;
    }
    let weapon_unlimited = p
        .weapon()
        .map(|weapon| catalog::card_spec(weapon.name).unlimited_attacks)
        .unwrap_or(false);
    let trait_unlimited = game
        .trait_of(player)
        .map(|spec| spec.unlimited_attacks)
        .unwrap_or(false);
    weapon_unlimited || trait_unlimited || p.attacks_this_turn < 1
}

fn player_has(game: &Game, player: PlayerId, name: CardName) -> bool {
    game.player(player)
        .map(|p| p.has_in_play(name))
        .unwrap_or(false)
}
