//! Done signal: single-shot, idempotent, broadcast cancellation.
//!
//! Built on channel disconnection: the guard holds the only sender, workers
//! hold receiver clones. Nothing is ever sent; raising the signal drops the
//! sender, which makes every receiver ready (disconnected) at once. Once
//! raised it can never be un-raised.

use crossbeam_channel::{Receiver, Sender, TryRecvError, bounded};

/// Worker-side half of the done signal. Cloned into every digest worker;
/// becomes permanently ready once the guard raises.
#[derive(Clone)]
pub struct DoneSignal {
    pub(crate) rx: Receiver<()>,
}

impl DoneSignal {
    pub fn is_raised(&self) -> bool {
        matches!(self.rx.try_recv(), Err(TryRecvError::Disconnected))
    }
}

/// Owning half of the done signal. Raising twice is the same as raising once,
/// and dropping the guard raises, so the scope that created it releases the
/// signal on every exit path.
pub struct DoneGuard {
    tx: Option<Sender<()>>,
}

impl DoneGuard {
    pub fn raise(&mut self) {
        self.tx.take();
    }

    pub fn is_raised(&self) -> bool {
        self.tx.is_none()
    }
}

pub fn done_signal() -> (DoneGuard, DoneSignal) {
    let (tx, rx) = bounded::<()>(0);
    (DoneGuard { tx: Some(tx) }, DoneSignal { rx })
}
