use rand::prelude::*;
use rand::seq::index;

use super::*;

/// Generation strategy that deals every pair once and shuffles the whole deck, reproducible from its seed.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomDeckGenerator {
    seed: u64,
}

impl RandomDeckGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl DeckGenerator for RandomDeckGenerator {
    fn generate(self, config: &GameConfig) -> Deck {
        let mut rng = SmallRng::seed_from_u64(self.seed);
        generate_deck(config.pair_count, &mut rng)
    }
}

/// Deals `pair_count` pairs with distinct artwork and applies a uniform shuffle.
///
/// Pair `i` owns card ids `2i` and `2i + 1`, so ids are stable across shuffles.
pub fn generate_deck<R: Rng + ?Sized>(pair_count: PairCount, rng: &mut R) -> Deck {
    let pair_count = pair_count.clamp(1, MAX_PAIRS);

    let artwork = index::sample(
        rng,
        ArtworkRef::SEED_RANGE.into(),
        usize::from(pair_count),
    );

    let mut cards: Vec<Card> = artwork
        .iter()
        .zip(0..pair_count)
        .flat_map(|(seed, pair_id)| {
            // seeds are sampled below SEED_RANGE
            let artwork = ArtworkRef::new(seed as u16);
            [
                Card::new(pair_id * 2, pair_id, artwork),
                Card::new(pair_id * 2 + 1, pair_id, artwork),
            ]
        })
        .collect();

    // Fisher-Yates
    cards.shuffle(rng);

    log::debug!("Dealt {} cards in {} pairs", cards.len(), pair_count);
    Deck::from_cards_unchecked(cards)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::{BTreeMap, BTreeSet};

    fn assert_valid(deck: &Deck, pair_count: usize) {
        assert_eq!(deck.len(), pair_count * 2);

        let ids: BTreeSet<_> = deck.iter().map(|card| card.id).collect();
        assert_eq!(ids.len(), pair_count * 2);

        let mut pairs: BTreeMap<PairId, Vec<&Card>> = BTreeMap::new();
        for card in deck.iter() {
            pairs.entry(card.pair_id).or_default().push(card);
        }
        assert_eq!(pairs.len(), pair_count);
        for cards in pairs.values() {
            assert_eq!(cards.len(), 2);
            assert_eq!(cards[0].artwork, cards[1].artwork);
        }

        let artwork: BTreeSet<_> = deck.iter().map(|card| card.artwork).collect();
        assert_eq!(artwork.len(), pair_count);
    }

    #[test]
    fn decks_are_valid_for_every_pair_count() {
        for pair_count in 1..=MAX_PAIRS {
            let deck = RandomDeckGenerator::new(u64::from(pair_count))
                .generate(&GameConfig::new(pair_count));
            assert_valid(&deck, pair_count.into());
        }
    }

    #[test]
    fn zero_pairs_is_clamped_to_one() {
        let mut rng = SmallRng::seed_from_u64(3);
        let deck = generate_deck(0, &mut rng);
        assert_valid(&deck, 1);
    }

    #[test]
    fn same_seed_yields_same_deck() {
        let config = GameConfig::default();
        let a = RandomDeckGenerator::new(1234).generate(&config);
        let b = RandomDeckGenerator::new(1234).generate(&config);
        assert_eq!(a, b);
    }

    #[test]
    fn different_seeds_shuffle_differently() {
        let config = GameConfig::default();
        let decks: BTreeSet<Vec<CardId>> = (0..20)
            .map(|seed| {
                RandomDeckGenerator::new(seed)
                    .generate(&config)
                    .iter()
                    .map(|card| card.id)
                    .collect()
            })
            .collect();
        assert!(decks.len() > 1);
    }

    #[test]
    fn card_position_is_uniform() {
        const SAMPLES: usize = 16_000;
        let config = GameConfig::default();
        let cards = usize::from(config.total_cards());
        let mut hits = vec![0usize; cards];

        for seed in 0..SAMPLES as u64 {
            let deck = RandomDeckGenerator::new(seed).generate(&config);
            hits[deck.position_of(0).unwrap()] += 1;
        }

        // expected 1000 per slot with a standard deviation near 31
        let expected = SAMPLES / cards;
        for (position, &count) in hits.iter().enumerate() {
            assert!(
                count.abs_diff(expected) < 200,
                "position {position} hit {count} times, expected about {expected}"
            );
        }
    }
}
