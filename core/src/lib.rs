use core::time::Duration;
use serde::{Deserialize, Serialize};

pub use card::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use host::*;
pub use session::*;
pub use summary::*;
pub use types::*;

mod card;
mod engine;
mod error;
mod generator;
mod host;
mod session;
mod summary;
mod types;

/// Pairs dealt per game unless configured otherwise.
pub const DEFAULT_PAIR_COUNT: PairCount = 8;

/// Largest pair count whose card ids still fit in [`CardId`].
pub const MAX_PAIRS: PairCount = 128;

/// How long a mismatched pair stays visible before flipping back.
pub const DEFAULT_MISMATCH_DELAY: Duration = Duration::from_millis(2000);

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub pair_count: PairCount,
    pub mismatch_delay: Duration,
    /// Resolve a flipped pair through the [`Scheduler`] instead of within the click.
    #[serde(default)]
    pub defer_check_match: bool,
}

impl GameConfig {
    pub const fn new_unchecked(pair_count: PairCount, mismatch_delay: Duration) -> Self {
        Self {
            pair_count,
            mismatch_delay,
            defer_check_match: false,
        }
    }

    pub fn new(pair_count: PairCount) -> Self {
        Self::new_unchecked(pair_count.clamp(1, MAX_PAIRS), DEFAULT_MISMATCH_DELAY)
    }

    pub const fn with_mismatch_delay(self, mismatch_delay: Duration) -> Self {
        Self {
            mismatch_delay,
            ..self
        }
    }

    pub const fn with_deferred_check_match(self, defer_check_match: bool) -> Self {
        Self {
            defer_check_match,
            ..self
        }
    }

    pub const fn total_cards(&self) -> u16 {
        self.pair_count as u16 * 2
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new_unchecked(DEFAULT_PAIR_COUNT, DEFAULT_MISMATCH_DELAY)
    }
}

/// Result of applying a single [`Action`] to a [`GameState`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Action was rejected or had nothing to do.
    NoChange,
    /// A fresh deck was dealt.
    Initialized,
    /// First card of a pair turned face-up.
    Flipped,
    /// Second card turned face-up, the pair is waiting for [`Action::CheckMatch`].
    PairFlipped,
    /// Flipped pair matched and stays revealed.
    Matched,
    /// Flipped pair differs and waits for [`Action::ResetFlipped`].
    Mismatched,
    /// Second card turned face-up and differs from the first, so
    /// [`Action::ResetFlipped`] is due.
    RevealedMismatch,
    /// Last pair matched.
    Completed,
    /// Face-up unmatched cards were turned back down.
    Cleared,
}

impl Outcome {
    /// Whether the state was modified and should be rendered again.
    pub const fn has_update(self) -> bool {
        use Outcome::*;
        match self {
            NoChange => false,
            Initialized => true,
            Flipped => true,
            PairFlipped => true,
            Matched => true,
            Mismatched => false,
            RevealedMismatch => true,
            Completed => true,
            Cleared => true,
        }
    }
}
