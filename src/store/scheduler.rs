//! Handles of delayed tasks owned by the store.

use parking_lot::Mutex;
use tokio::task::AbortHandle;

#[derive(Default)]
struct Slots {
    /// Timer of the visible notification and the generation it closes.
    auto_close: Option<(u64, AbortHandle)>,
    navigations: Vec<AbortHandle>,
}

#[derive(Default)]
pub(crate) struct Scheduler {
    slots: Mutex<Slots>,
}

impl Scheduler {
    /// Installs the auto-close timer for `generation`, aborting the previous one.
    ///
    /// A timer for an older generation than the installed one is aborted
    /// instead, so effects that arrive out of order cannot revive a stale timer.
    pub fn replace_auto_close(&self, generation: u64, handle: AbortHandle) {
        let mut slots = self.slots.lock();
        match slots.auto_close.take() {
            Some((current, existing)) if current > generation => {
                handle.abort();
                slots.auto_close = Some((current, existing));
            }
            Some((_, existing)) => {
                existing.abort();
                slots.auto_close = Some((generation, handle));
            }
            None => slots.auto_close = Some((generation, handle)),
        }
    }

    pub fn add_navigation(&self, handle: AbortHandle) {
        let mut slots = self.slots.lock();
        slots.navigations.retain(|h| !h.is_finished());
        slots.navigations.push(handle);
    }

    /// Pending navigations that have not fired yet.
    pub fn pending_navigations(&self) -> usize {
        self.slots
            .lock()
            .navigations
            .iter()
            .filter(|h| !h.is_finished())
            .count()
    }

    pub fn cancel_navigations(&self) {
        for handle in self.slots.lock().navigations.drain(..) {
            handle.abort();
        }
    }

    pub fn cancel_all(&self) {
        let mut slots = self.slots.lock();
        if let Some((_, handle)) = slots.auto_close.take() {
            handle.abort();
        }
        for handle in slots.navigations.drain(..) {
            handle.abort();
        }
    }
}
