use parking_lot::Mutex;
use std::future::Future;
use std::sync::Arc;

enum Slot<T> {
    Idle,
    Loading,
    Ready(T),
}

/// A single in-flight background request whose result the UI polls.
///
/// Spawning again abandons the previous request: its worker still runs to
/// completion but writes into a slot nobody reads.
pub struct Request<T> {
    slot: Arc<Mutex<Slot<T>>>,
}

impl<T> Default for Request<T> {
    fn default() -> Self {
        Self {
            slot: Arc::new(Mutex::new(Slot::Idle)),
        }
    }
}

impl<T: Send + 'static> Request<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drive `future` to completion on a worker thread and repaint `ctx`
    /// when the result lands.
    pub fn spawn<F>(&mut self, ctx: &egui::Context, future: F)
    where
        F: Future<Output = T> + Send + 'static,
    {
        let slot = Arc::new(Mutex::new(Slot::Loading));
        self.slot = Arc::clone(&slot);

        let ctx = ctx.clone();
        std::thread::spawn(move || {
            let value = futures::executor::block_on(future);
            *slot.lock() = Slot::Ready(value);
            ctx.request_repaint();
        });
    }

    pub fn is_loading(&self) -> bool {
        matches!(*self.slot.lock(), Slot::Loading)
    }

    /// Take the result if it has arrived, leaving the request idle
    pub fn poll(&mut self) -> Option<T> {
        let mut slot = self.slot.lock();
        match std::mem::replace(&mut *slot, Slot::Idle) {
            Slot::Ready(value) => Some(value),
            other => {
                *slot = other;
                None
            }
        }
    }
}
