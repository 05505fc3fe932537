//! Tick Scheduler
//!
//! Deterministic single-threaded timing source. Subscribers register with
//! `on_tick` and are called once per elapsed second, in registration order,
//! when the driver calls `advance`. There is no background thread; the host
//! (UI loop, CLI, test) decides when a second has elapsed.

/// Handle returned by [`TickScheduler::on_tick`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

pub type TickCallback<'a> = Box<dyn FnMut(u64) + 'a>;

#[derive(Default)]
pub struct TickScheduler<'a> {
    next_id: u64,
    elapsed_seconds: u64,
    subscribers: Vec<(SubscriptionId, TickCallback<'a>)>,
}

impl<'a> TickScheduler<'a> {
    pub fn new() -> Self {
        Self { next_id: 0, elapsed_seconds: 0, subscribers: Vec::new() }
    }

    /// Register a callback. It receives the 1-based elapsed second count.
    pub fn on_tick(&mut self, callback: impl FnMut(u64) + 'a) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    /// Remove a subscriber. Returns `false` if it was already gone.
    pub fn cancel(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sub_id, _)| *sub_id != id);
        self.subscribers.len() != before
    }

    pub fn advance(&mut self, seconds: u32) {
        for _ in 0..seconds {
            self.elapsed_seconds += 1;
            let now = self.elapsed_seconds;
            for (_, callback) in self.subscribers.iter_mut() {
                callback(now);
            }
        }
    }

    pub fn elapsed_seconds(&self) -> u64 {
        self.elapsed_seconds
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}
