use core::fmt;
use core::time::Duration;
use rand::prelude::*;

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Observer = Box<dyn FnMut(&GameState)>;

/// Host-facing game: owns the [`GameState`] and drives it from clicks, restarts and fired timers.
///
/// Time, deferred delivery and best-score persistence are injected so the same
/// session runs under a browser event loop or a virtual-time test harness.
pub struct GameSession<C, S, B>
where
    S: Scheduler,
{
    config: GameConfig,
    state: GameState,
    rng: SmallRng,
    clock: C,
    scheduler: S,
    store: B,
    epoch: u32,
    pending_check: Option<S::Handle>,
    pending_reset: Option<S::Handle>,
    best_score: Option<u32>,
    summary: Option<GameSummary>,
    observers: Vec<(SubscriptionId, Observer)>,
    next_subscription: u64,
}

impl<C, S, B> GameSession<C, S, B>
where
    C: Clock,
    S: Scheduler,
    B: BestScoreStore,
{
    /// Reads the stored best score once and deals the first deck.
    pub fn new(config: GameConfig, seed: u64, clock: C, scheduler: S, store: B) -> Self {
        let best_score = store.read_best_score();
        log::debug!("Loaded best score: {:?}", best_score);

        let mut session = Self {
            config,
            state: GameState::default(),
            rng: SmallRng::seed_from_u64(seed),
            clock,
            scheduler,
            store,
            epoch: 0,
            pending_check: None,
            pending_reset: None,
            best_score,
            summary: None,
            observers: Vec::new(),
            next_subscription: 0,
        };
        session.start(Action::Initialize);
        session
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn best_score(&self) -> Option<u32> {
        self.best_score
    }

    /// Results of the current game once it is complete.
    pub fn summary(&self) -> Option<&GameSummary> {
        self.summary.as_ref()
    }

    pub fn elapsed_secs(&self) -> u32 {
        self.state.elapsed_secs(self.clock.now())
    }

    pub fn has_pending_check(&self) -> bool {
        self.pending_check.is_some()
    }

    pub fn has_pending_reset(&self) -> bool {
        self.pending_reset.is_some()
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    pub fn store(&self) -> &B {
        &self.store
    }

    /// Flips a card and, once two are face-up, resolves the pair.
    ///
    /// The pair is checked within the click unless the config defers it, in
    /// which case [`FollowUp::CheckMatch`] goes to the scheduler with no delay
    /// and the click reports [`Outcome::PairFlipped`].
    pub fn handle_card_click(&mut self, id: CardId) -> Outcome {
        let outcome = match self.apply(Action::Flip(id)) {
            Outcome::PairFlipped if !self.config.defer_check_match => {
                match self.apply(Action::CheckMatch) {
                    // the second card is face-up even though the check changed nothing
                    Outcome::Mismatched => Outcome::RevealedMismatch,
                    outcome => outcome,
                }
            }
            outcome => outcome,
        };
        self.follow_through(outcome);
        outcome
    }

    /// Deals a new deck, dropping every counter and any pending timer.
    pub fn reset_game(&mut self) -> Outcome {
        self.start(Action::Reset)
    }

    /// Delivers a task previously handed to the [`Scheduler`].
    ///
    /// Tasks scheduled for an earlier game are dropped.
    pub fn fire(&mut self, task: Scheduled) -> Outcome {
        if task.epoch() != self.epoch {
            log::debug!("Dropping stale {:?}, current epoch {}", task, self.epoch);
            return Outcome::NoChange;
        }

        match task.follow_up() {
            FollowUp::CheckMatch => self.pending_check = None,
            FollowUp::ResetFlipped => self.pending_reset = None,
        }

        let outcome = self.apply(task.follow_up().into());
        self.follow_through(outcome);
        outcome
    }

    pub fn subscribe(&mut self, observer: impl FnMut(&GameState) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(subscription, _)| *subscription != id);
        self.observers.len() != before
    }

    fn start(&mut self, action: fn(Deck) -> Action) -> Outcome {
        for handle in [self.pending_check.take(), self.pending_reset.take()]
            .into_iter()
            .flatten()
        {
            self.scheduler.cancel(handle);
        }
        self.epoch = self.epoch.wrapping_add(1);
        self.summary = None;

        let deck = generate_deck(self.config.pair_count, &mut self.rng);
        self.apply(action(deck))
    }

    fn apply(&mut self, action: Action) -> Outcome {
        let outcome = self.state.apply(action, self.clock.now());
        if outcome.has_update() {
            self.notify();
        }
        outcome
    }

    fn follow_through(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::PairFlipped => {
                let handle = self.schedule(Duration::ZERO, FollowUp::CheckMatch);
                if let Some(stale) = self.pending_check.replace(handle) {
                    self.scheduler.cancel(stale);
                }
            }
            Outcome::Mismatched | Outcome::RevealedMismatch => {
                let handle = self.schedule(self.config.mismatch_delay, FollowUp::ResetFlipped);
                if let Some(stale) = self.pending_reset.replace(handle) {
                    self.scheduler.cancel(stale);
                }
            }
            Outcome::Completed => self.record_result(),
            _ => {}
        }
    }

    fn schedule(&mut self, delay: Duration, follow_up: FollowUp) -> S::Handle {
        let task = Scheduled::new(self.epoch, follow_up);
        self.scheduler.after(delay, task)
    }

    fn record_result(&mut self) {
        let clicks = self.state.clicks();
        let duration_secs = self.state.elapsed_secs(self.clock.now());
        let summary = GameSummary::new(clicks, duration_secs, self.best_score);

        if summary.is_new_best {
            log::info!("New best score: {} clicks", clicks);
            self.best_score = Some(clicks);
            if let Err(err) = self.store.write_best_score(clicks) {
                log::warn!("Failed to save best score: {}", err);
            }
        }

        self.summary = Some(summary);
    }

    fn notify(&mut self) {
        let state = &self.state;
        for (_, observer) in self.observers.iter_mut() {
            observer(state);
        }
    }
}

impl<C, S, B> fmt::Debug for GameSession<C, S, B>
where
    S: Scheduler,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameSession")
            .field("config", &self.config)
            .field("state", &self.state)
            .field("epoch", &self.epoch)
            .field("best_score", &self.best_score)
            .field("summary", &self.summary)
            .field("observers", &self.observers.len())
            .finish_non_exhaustive()
    }
}
