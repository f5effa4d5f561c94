use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    NewBest,
    CloseToBest,
    KeepPracticing,
}

impl Verdict {
    /// Within 20% of the previous best counts as close.
    pub fn rate(clicks: u32, previous_best: Option<u32>, is_new_best: bool) -> Self {
        match previous_best {
            _ if is_new_best => Self::NewBest,
            Some(best) if best > 0 && u64::from(clicks) * 5 <= u64::from(best) * 6 => {
                Self::CloseToBest
            }
            _ => Self::KeepPracticing,
        }
    }

    pub const fn message(self) -> &'static str {
        use Verdict::*;
        match self {
            NewBest => "Congratulations! You've achieved a new best score!",
            CloseToBest => "Great job! You were very close to your best score.",
            KeepPracticing => "Well done! Keep practicing to improve your score.",
        }
    }
}

/// Result of a completed game, as shown on the results screen.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSummary {
    pub clicks: u32,
    pub duration_secs: u32,
    /// Best score before this game was recorded.
    pub previous_best: Option<u32>,
    pub is_new_best: bool,
    pub verdict: Verdict,
}

impl GameSummary {
    pub fn new(clicks: u32, duration_secs: u32, previous_best: Option<u32>) -> Self {
        let is_new_best = previous_best.is_none_or(|best| clicks < best);
        Self {
            clicks,
            duration_secs,
            previous_best,
            is_new_best,
            verdict: Verdict::rate(clicks, previous_best, is_new_best),
        }
    }

    pub fn best_score(&self) -> u32 {
        match self.previous_best {
            Some(best) if !self.is_new_best => best,
            _ => self.clicks,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_completion_is_a_new_best() {
        let summary = GameSummary::new(30, 45, None);
        assert!(summary.is_new_best);
        assert_eq!(summary.verdict, Verdict::NewBest);
        assert_eq!(summary.best_score(), 30);
    }

    #[test]
    fn tying_the_best_is_not_a_new_best() {
        let summary = GameSummary::new(20, 10, Some(20));
        assert!(!summary.is_new_best);
        assert_eq!(summary.verdict, Verdict::CloseToBest);
        assert_eq!(summary.best_score(), 20);
    }

    #[test]
    fn close_threshold_is_twenty_percent() {
        assert_eq!(Verdict::rate(24, Some(20), false), Verdict::CloseToBest);
        assert_eq!(Verdict::rate(25, Some(20), false), Verdict::KeepPracticing);
    }

    #[test]
    fn beating_the_best_reports_new_score() {
        let summary = GameSummary::new(18, 10, Some(20));
        assert!(summary.is_new_best);
        assert_eq!(summary.best_score(), 18);
        assert!(summary.verdict.message().starts_with("Congratulations"));
    }
}
