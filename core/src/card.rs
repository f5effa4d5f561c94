use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::*;

/// Opaque handle to the picture printed on a card face.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ArtworkRef(u16);

impl ArtworkRef {
    /// Artwork seeds are drawn from `0..SEED_RANGE`.
    pub const SEED_RANGE: u16 = 1000;

    pub const fn new(seed: u16) -> Self {
        Self(seed)
    }

    pub const fn seed(self) -> u16 {
        self.0
    }

    pub fn url(self) -> String {
        format!("https://picsum.photos/200?random={}", self.0)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub pair_id: PairId,
    pub artwork: ArtworkRef,
}

impl Card {
    pub const fn new(id: CardId, pair_id: PairId, artwork: ArtworkRef) -> Self {
        Self {
            id,
            pair_id,
            artwork,
        }
    }

    pub const fn matches(&self, other: &Card) -> bool {
        self.pair_id == other.pair_id
    }
}

/// Ordered cards dealt for one game.
///
/// Every id is unique and every pair id is shared by exactly two cards. The
/// empty deck is valid and stands for a game that was never dealt.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Card>", into = "Vec<Card>")]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    pub fn from_cards(cards: Vec<Card>) -> Result<Self> {
        if cards.len() > usize::from(MAX_PAIRS) * 2 {
            return Err(GameError::TooManyPairs);
        }

        let mut ids = BTreeSet::new();
        let mut pairs: BTreeMap<PairId, usize> = BTreeMap::new();
        for card in &cards {
            if !ids.insert(card.id) {
                return Err(GameError::DuplicateCardId(card.id));
            }
            *pairs.entry(card.pair_id).or_default() += 1;
        }

        if let Some((&pair_id, &count)) = pairs.iter().find(|&(_, &count)| count != 2) {
            return Err(GameError::UnpairedCard(pair_id, count));
        }

        Ok(Self { cards })
    }

    pub(crate) fn from_cards_unchecked(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn pair_count(&self) -> usize {
        self.cards.len() / 2
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    pub fn card(&self, id: CardId) -> Option<&Card> {
        self.cards.iter().find(|card| card.id == id)
    }

    pub fn contains(&self, id: CardId) -> bool {
        self.card(id).is_some()
    }

    pub fn position_of(&self, id: CardId) -> Option<usize> {
        self.cards.iter().position(|card| card.id == id)
    }
}

impl TryFrom<Vec<Card>> for Deck {
    type Error = GameError;

    fn try_from(cards: Vec<Card>) -> Result<Self> {
        Self::from_cards(cards)
    }
}

impl From<Deck> for Vec<Card> {
    fn from(deck: Deck) -> Self {
        deck.cards
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(id: CardId, pair_id: PairId) -> Card {
        Card::new(id, pair_id, ArtworkRef::new(pair_id.into()))
    }

    #[test]
    fn accepts_well_formed_deck() {
        let deck = Deck::from_cards(vec![card(0, 0), card(1, 0), card(2, 1), card(3, 1)]).unwrap();

        assert_eq!(deck.len(), 4);
        assert_eq!(deck.pair_count(), 2);
        assert_eq!(deck.card(2).map(|c| c.pair_id), Some(1));
        assert_eq!(deck.position_of(3), Some(3));
        assert!(!deck.contains(9));
    }

    #[test]
    fn rejects_duplicate_ids() {
        let err = Deck::from_cards(vec![card(0, 0), card(0, 0)]).unwrap_err();
        assert_eq!(err, GameError::DuplicateCardId(0));
    }

    #[test]
    fn rejects_lone_and_triple_pairs() {
        let err = Deck::from_cards(vec![card(0, 0), card(1, 0), card(2, 1)]).unwrap_err();
        assert_eq!(err, GameError::UnpairedCard(1, 1));

        let err = Deck::from_cards(vec![card(0, 0), card(1, 0), card(2, 0), card(3, 1)])
            .unwrap_err();
        assert_eq!(err, GameError::UnpairedCard(0, 3));
    }

    #[test]
    fn deserialize_validates_deck() {
        let json = r#"[{"id":0,"pair_id":0,"artwork":7},{"id":1,"pair_id":1,"artwork":8}]"#;
        assert!(serde_json::from_str::<Deck>(json).is_err());

        let json = r#"[{"id":0,"pair_id":0,"artwork":7},{"id":1,"pair_id":0,"artwork":7}]"#;
        let deck: Deck = serde_json::from_str(json).unwrap();
        assert_eq!(deck.len(), 2);
    }

    #[test]
    fn artwork_url_embeds_seed() {
        assert_eq!(
            ArtworkRef::new(42).url(),
            "https://picsum.photos/200?random=42"
        );
    }
}
