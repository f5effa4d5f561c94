use core::time::Duration;
use gloo::timers::callback::Timeout;
use pairs_core as game;
use yew::Callback;

/// Delivers scheduled follow-ups back to the component through browser timeouts.
#[derive(Debug)]
pub(crate) struct TimerScheduler {
    deliver: Callback<game::Scheduled>,
}

impl TimerScheduler {
    pub(crate) fn new(deliver: Callback<game::Scheduled>) -> Self {
        Self { deliver }
    }
}

impl game::Scheduler for TimerScheduler {
    type Handle = Timeout;

    fn after(&mut self, delay: Duration, task: game::Scheduled) -> Timeout {
        let deliver = self.deliver.clone();
        let millis = delay.as_millis().try_into().unwrap_or(u32::MAX);
        log::trace!("scheduling {:?} in {}ms", task, millis);
        Timeout::new(millis, move || deliver.emit(task))
    }

    fn cancel(&mut self, handle: Timeout) {
        log::trace!("cancelling pending timeout");
        // dropping clears the browser timeout
        drop(handle);
    }
}
