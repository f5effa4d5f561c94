use serde::{Deserialize, Serialize};

use crate::*;

/// Discrete inputs accepted by [`GameState::apply`].
#[derive(Clone, Debug, PartialEq)]
pub enum Action {
    Initialize(Deck),
    Flip(CardId),
    CheckMatch,
    ResetFlipped,
    Reset(Deck),
}

/// Coarse state of a game, derived from the [`GameState`] fields.
///
/// Valid transitions:
/// - Empty -> Playing
/// - Playing -> Checking | Resolving (second card flipped)
/// - Checking -> Playing | Complete
/// - Resolving -> Playing
/// - any -> Playing (initialize or reset)
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// No deck dealt yet
    Empty,
    /// Zero or one card face-up
    Playing,
    /// Two matching cards face-up, waiting to be confirmed
    Checking,
    /// Two different cards face-up, waiting to be turned back down
    Resolving,
    /// Every pair matched
    Complete,
}

impl Phase {
    pub const fn accepts_flips(self) -> bool {
        matches!(self, Self::Playing)
    }

    pub const fn is_complete(self) -> bool {
        matches!(self, Self::Complete)
    }
}

/// How the rendering layer should draw a card.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardFace {
    Hidden,
    Revealed,
    Matched,
}

impl CardFace {
    pub const fn is_face_up(self) -> bool {
        matches!(self, Self::Revealed | Self::Matched)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    cards: Deck,
    flipped_cards: Vec<CardId>,
    matched_cards: Vec<CardId>,
    clicks: u32,
    game_start_time: Option<Timestamp>,
    game_end_time: Option<Timestamp>,
}

impl GameState {
    /// Single mutation entry point. Out-of-sequence or malformed actions leave the state untouched.
    pub fn apply(&mut self, action: Action, now: Timestamp) -> Outcome {
        match action {
            Action::Initialize(deck) | Action::Reset(deck) => self.deal(deck),
            Action::Flip(id) => self.flip(id, now),
            Action::CheckMatch => self.check_match(now),
            Action::ResetFlipped => self.reset_flipped(),
        }
    }

    pub fn deck(&self) -> &Deck {
        &self.cards
    }

    pub fn cards(&self) -> &[Card] {
        self.cards.cards()
    }

    pub fn flipped_cards(&self) -> &[CardId] {
        &self.flipped_cards
    }

    pub fn matched_cards(&self) -> &[CardId] {
        &self.matched_cards
    }

    pub fn clicks(&self) -> u32 {
        self.clicks
    }

    pub fn game_start_time(&self) -> Option<Timestamp> {
        self.game_start_time
    }

    pub fn game_end_time(&self) -> Option<Timestamp> {
        self.game_end_time
    }

    pub fn is_game_complete(&self) -> bool {
        !self.cards.is_empty() && self.matched_cards.len() == self.cards.len()
    }

    pub fn is_flipped(&self, id: CardId) -> bool {
        self.flipped_cards.contains(&id)
    }

    pub fn is_matched(&self, id: CardId) -> bool {
        self.matched_cards.contains(&id)
    }

    pub fn face(&self, id: CardId) -> CardFace {
        if self.is_matched(id) {
            CardFace::Matched
        } else if self.is_flipped(id) {
            CardFace::Revealed
        } else {
            CardFace::Hidden
        }
    }

    pub fn phase(&self) -> Phase {
        if self.cards.is_empty() {
            return Phase::Empty;
        }
        if self.is_game_complete() {
            return Phase::Complete;
        }

        match self.flipped_pair() {
            Some((first, second)) if first.matches(second) => Phase::Checking,
            Some(_) => Phase::Resolving,
            None => Phase::Playing,
        }
    }

    /// Seconds between the first flip and completion, or `now` while still playing.
    pub fn elapsed_secs(&self, now: Timestamp) -> u32 {
        if let Some(started_at) = self.game_start_time {
            elapsed_secs(started_at, self.game_end_time.unwrap_or(now))
        } else {
            0
        }
    }

    fn deal(&mut self, deck: Deck) -> Outcome {
        log::debug!("New game with {} pairs", deck.pair_count());
        *self = Self {
            cards: deck,
            ..Default::default()
        };
        Outcome::Initialized
    }

    fn flip(&mut self, id: CardId, now: Timestamp) -> Outcome {
        if !self.phase().accepts_flips()
            || !self.cards.contains(id)
            || self.is_flipped(id)
            || self.is_matched(id)
        {
            log::trace!("Ignoring flip of card {}", id);
            return Outcome::NoChange;
        }

        if self.game_start_time.is_none() {
            self.game_start_time = Some(now);
        }
        self.flipped_cards.push(id);
        self.clicks = self.clicks.saturating_add(1);
        log::debug!("Flipped card {}, clicks: {}", id, self.clicks);

        if self.flipped_cards.len() == 2 {
            Outcome::PairFlipped
        } else {
            Outcome::Flipped
        }
    }

    fn check_match(&mut self, now: Timestamp) -> Outcome {
        let Some((first, second)) = self.flipped_pair() else {
            return Outcome::NoChange;
        };

        if !first.matches(second) {
            log::debug!("Cards {} and {} do not match", first.id, second.id);
            return Outcome::Mismatched;
        }

        let ids = [first.id, second.id];
        self.matched_cards.extend(ids);
        self.flipped_cards.clear();
        log::debug!("Matched cards {:?}", ids);

        if self.is_game_complete() {
            if self.game_end_time.is_none() {
                self.game_end_time = Some(now);
            }
            log::debug!("Game complete in {} clicks", self.clicks);
            Outcome::Completed
        } else {
            Outcome::Matched
        }
    }

    fn reset_flipped(&mut self) -> Outcome {
        if self.flipped_cards.is_empty() {
            return Outcome::NoChange;
        }
        self.flipped_cards.clear();
        Outcome::Cleared
    }

    fn flipped_pair(&self) -> Option<(&Card, &Card)> {
        let &[first, second] = self.flipped_cards.as_slice() else {
            return None;
        };
        Some((self.cards.card(first)?, self.cards.card(second)?))
    }
}
