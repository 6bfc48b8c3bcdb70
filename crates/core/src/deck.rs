use crate::{Card, RngState};

/// Draw and discard piles. Both piles are owned here; the rest of the engine
/// only draws and discards.
#[derive(Debug, Default, Clone)]
pub struct Deck {
    pub draw: Vec<Card>,
    pub discard: Vec<Card>,
}

impl Deck {
    pub fn shuffle(&mut self, rng: &mut RngState) {
        rng.shuffle(&mut self.draw);
    }

    /// Draw up to `count` cards, folding the discard pile back in when the
    /// draw pile runs dry mid-draw. Yields fewer cards only when both piles
    /// are exhausted.
    pub fn draw_cards(&mut self, count: usize, rng: &mut RngState) -> Vec<Card> {
        let mut cards = Vec::with_capacity(count);
        for _ in 0..count {
            if self.draw.is_empty() {
                self.reshuffle_discard(rng);
            }
            match self.draw.pop() {
                Some(card) => cards.push(card),
                None => break,
            }
        }
        cards
    }

    pub fn draw_one(&mut self, rng: &mut RngState) -> Option<Card> {
        self.draw_cards(1, rng).pop()
    }

    pub fn discard(&mut self, card: Card) {
        self.discard.push(card);
    }

    pub fn discard_all(&mut self, mut cards: Vec<Card>) {
        self.discard.append(&mut cards);
    }

    pub fn top_discard(&self) -> Option<&Card> {
        self.discard.last()
    }

    pub fn take_top_discard(&mut self) -> Option<Card> {
        self.discard.pop()
    }

    /// A check draw: the card is flipped, discarded immediately, and returned
    /// for the caller to inspect.
    pub fn check_draw(&mut self, rng: &mut RngState) -> Option<Card> {
        let card = self.draw_one(rng)?;
        self.discard.push(card);
        Some(card)
    }

    pub fn remaining(&self) -> usize {
        self.draw.len()
    }

    fn reshuffle_discard(&mut self, rng: &mut RngState) {
        if self.discard.is_empty() {
            return;
        }
        self.draw.append(&mut self.discard);
        rng.shuffle(&mut self.draw);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;

    #[test]
    fn draw_all_discard_all_round_trips() {
        let mut rng = RngState::from_seed(3);
        let mut deck = catalog::build_deck(&mut rng);
        let total = deck.draw.len();

        let drawn = deck.draw_cards(total, &mut rng);
        assert_eq!(drawn.len(), total);
        assert!(deck.draw.is_empty());

        deck.discard_all(drawn);
        let again = deck.draw_cards(total, &mut rng);
        assert_eq!(again.len(), total);

        let mut ids: Vec<u32> = again.iter().map(|card| card.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), total);
    }

    #[test]
    fn exhausted_piles_yield_short_draws() {
        let mut rng = RngState::from_seed(3);
        let mut deck = catalog::build_deck(&mut rng);
        let total = deck.draw.len();
        let _ = deck.draw_cards(total, &mut rng);

        let empty = deck.draw_cards(2, &mut rng);
        assert!(empty.is_empty());
    }

    #[test]
    fn check_draw_lands_in_discard() {
        let mut rng = RngState::from_seed(3);
        let mut deck = catalog::build_deck(&mut rng);
        let card = deck.check_draw(&mut rng).unwrap();
        assert_eq!(deck.top_discard().map(|c| c.id), Some(card.id));
    }
}
