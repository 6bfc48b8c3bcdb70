use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    pub min_players: usize,
    pub max_players: usize,
    /// Deal the rule-module event deck alongside the base game.
    pub events_enabled: bool,
    /// Marshal plays with one extra hit point.
    pub marshal_bonus_hp: u8,
    /// Fixed seed for replays and tests; fresh entropy when absent.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            min_players: 4,
            max_players: 7,
            events_enabled: true,
            marshal_bonus_hp: 1,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Role deal for a given player count: one marshal, one renegade, the
    /// rest split between outlaws and deputies.
    pub fn roles_for(count: usize) -> Vec<crate::Role> {
        use crate::Role;
        let mut roles = vec![Role::Marshal, Role::Renegade, Role::Outlaw, Role::Outlaw];
        if count >= 5 {
            roles.push(Role::Deputy);
        }
        if count >= 6 {
            roles.push(Role::Outlaw);
        }
        if count >= 7 {
            roles.push(Role::Deputy);
        }
        // Oversized custom tables pad out with outlaws.
        while roles.len() < count {
            roles.push(Role::Outlaw);
        }
        roles.truncate(count);
        roles
    }
}
