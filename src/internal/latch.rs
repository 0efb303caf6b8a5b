use core::sync::atomic::{AtomicBool, Ordering::SeqCst};

/// State of a [`DepletionLatch`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Liveness {
    /// Producers may still yield items
    Active,
    /// Terminal. Nothing will be yielded ever again.
    Depleted,
}

/// One-way `Active -> Depleted` switch
#[derive(Debug, Default)]
pub struct DepletionLatch(AtomicBool);

impl DepletionLatch {
    pub const fn new() -> Self {
        Self(AtomicBool::new(false))
    }

    #[inline]
    pub fn state(&self) -> Liveness {
        if self.is_depleted() {
            Liveness::Depleted
        } else {
            Liveness::Active
        }
    }

    #[inline]
    pub fn is_depleted(&self) -> bool {
        self.0.load(SeqCst)
    }

    /// Moves the latch into [`Liveness::Depleted`]. Repeated calls are no-ops.
    #[inline]
    pub fn trip(&self) {
        self.0.store(true, SeqCst);
    }
}
