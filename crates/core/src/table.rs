use crate::PlayerId;
use serde::{Deserialize, Serialize};

/// Seating and turn rotation. `seats` is the fixed layout including the
/// eliminated; `turn_order` only ever holds living players.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Table {
    pub seats: Vec<PlayerId>,
    pub turn_order: Vec<PlayerId>,
    pub current: usize,
}

impl Table {
    pub fn new(seats: Vec<PlayerId>) -> Self {
        Self {
            turn_order: seats.clone(),
            seats,
            current: 0,
        }
    }

    pub fn current_player(&self) -> Option<PlayerId> {
        self.turn_order.get(self.current).copied()
    }

    pub fn alive_count(&self) -> usize {
        self.turn_order.len()
    }

    pub fn position(&self, player: PlayerId) -> Option<usize> {
        self.turn_order.iter().position(|&p| p == player)
    }

    /// Step the turn index to the next living player and return them.
    pub fn advance(&mut self) -> Option<PlayerId> {
        if self.turn_order.is_empty() {
            return None;
        }
        self.current = (self.current + 1) % self.turn_order.len();
        self.current_player()
    }

    /// Drop an eliminated player, keeping the current index pointed at the
    /// same player when possible.
    pub fn remove(&mut self, player: PlayerId) {
        if let Some(pos) = self.position(player) {
            self.turn_order.remove(pos);
            if self.turn_order.is_empty() {
                self.current = 0;
            } else if pos < self.current {
                self.current -= 1;
            } else if self.current >= self.turn_order.len() {
                self.current = 0;
            }
        }
    }

    /// Re-seat a revived player directly after the current turn holder.
    pub fn insert_after_current(&mut self, player: PlayerId) {
        if self.turn_order.contains(&player) {
            return;
        }
        if self.turn_order.is_empty() {
            self.turn_order.push(player);
            self.current = 0;
        } else {
            let at = (self.current + 1).min(self.turn_order.len());
            self.turn_order.insert(at, player);
        }
    }

    /// Living players in turn order starting from (and excluding) `from`.
    pub fn others_from(&self, from: PlayerId) -> Vec<PlayerId> {
        let Some(start) = self.position(from) else {
            return self.turn_order.clone();
        };
        let len = self.turn_order.len();
        (1..len)
            .map(|offset| self.turn_order[(start + offset) % len])
            .collect()
    }

    /// Living players in turn order starting from and including `from`.
    pub fn from_player(&self, from: PlayerId) -> Vec<PlayerId> {
        let mut order = self.others_from(from);
        if self.position(from).is_some() {
            order.insert(0, from);
        }
        order
    }

    /// The living player seated directly after `from`.
    pub fn left_neighbor(&self, from: PlayerId) -> Option<PlayerId> {
        self.others_from(from).first().copied()
    }

    /// Minimum of clockwise and counter-clockwise seat offsets, before
    /// modifiers. Callers exclude self-targeting.
    pub fn seat_distance(&self, from: PlayerId, to: PlayerId) -> Option<usize> {
        let a = self.position(from)?;
        let b = self.position(to)?;
        let len = self.turn_order.len();
        let forward = (b + len - a) % len;
        let backward = (a + len - b) % len;
        Some(forward.min(backward))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(n: u32) -> Table {
        Table::new((0..n).map(PlayerId).collect())
    }

    #[test]
    fn seat_distance_is_symmetric() {
        let t = table(5);
        for a in 0..5u32 {
            for b in 0..5u32 {
                assert_eq!(
                    t.seat_distance(PlayerId(a), PlayerId(b)),
                    t.seat_distance(PlayerId(b), PlayerId(a))
                );
            }
        }
        assert_eq!(t.seat_distance(PlayerId(0), PlayerId(3)), Some(2));
    }

    #[test]
    fn remove_keeps_current_player_stable() {
        let mut t = table(4);
        t.current = 2;
        t.remove(PlayerId(1));
        assert_eq!(t.current_player(), Some(PlayerId(2)));
        t.remove(PlayerId(3));
        assert_eq!(t.current_player(), Some(PlayerId(2)));
    }

    #[test]
    fn remove_current_wraps_to_next() {
        let mut t = table(3);
        t.current = 2;
        t.remove(PlayerId(2));
        assert_eq!(t.current_player(), Some(PlayerId(0)));
    }

    #[test]
    fn others_from_walks_turn_order() {
        let t = table(4);
        assert_eq!(
            t.others_from(PlayerId(1)),
            vec![PlayerId(2), PlayerId(3), PlayerId(0)]
        );
    }
}
