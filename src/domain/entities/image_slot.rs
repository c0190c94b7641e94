//! Lazy image loading state machine for one card.

use std::time::{Duration, Instant};

/// Backoff retry cycles granted before a slot gives up.
pub const RETRY_BUDGET: u32 = 3;

/// Delay between a failed attempt and the next one.
pub const RETRY_BACKOFF: Duration = Duration::from_secs(1);

/// Loading state of a card's image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotStatus {
    /// Not yet visible; no network activity.
    Idle,
    /// Visible; a fallback chain walk should begin.
    PendingVisible,
    /// A chain walk is in flight or a retry is scheduled.
    Loading,
    /// An adopted candidate rendered successfully.
    Loaded,
    /// Retry budget exhausted; placeholder shown permanently.
    FailedFinal,
}

/// Per-card image slot.
///
/// Transitions: `Idle -> PendingVisible -> Loading -> {Loaded | FailedFinal}`,
/// with `Loaded -> Loading` on a post-adoption render error. Each failure
/// consumes one retry out of [`RETRY_BUDGET`] and schedules the next walk
/// after [`RETRY_BACKOFF`]. Slots are fully independent: two cards carrying
/// the same URL load and retry separately.
#[derive(Debug, Clone)]
pub struct ImageSlot {
    source: Option<String>,
    adopted: Option<String>,
    status: SlotStatus,
    retries: u32,
    retry_at: Option<Instant>,
}

impl ImageSlot {
    /// Creates an idle slot for a resolved source URL (or none).
    #[must_use]
    pub fn new(source: Option<String>) -> Self {
        Self {
            source,
            adopted: None,
            status: SlotStatus::Idle,
            retries: 0,
            retry_at: None,
        }
    }

    /// Returns the resolved source URL, if the post had one.
    #[must_use]
    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    /// Returns the currently adopted candidate URL.
    #[must_use]
    pub fn adopted(&self) -> Option<&str> {
        self.adopted.as_deref()
    }

    /// Returns the current status.
    #[must_use]
    pub const fn status(&self) -> SlotStatus {
        self.status
    }

    /// Returns how many attempts have failed so far.
    #[must_use]
    pub const fn retries(&self) -> u32 {
        self.retries
    }

    /// Returns true if the slot has never been triggered.
    #[must_use]
    pub fn needs_visibility(&self) -> bool {
        self.status == SlotStatus::Idle
    }

    /// Marks the slot visible. Returns true on the `Idle -> PendingVisible`
    /// transition; later visibility events are ignored.
    pub fn mark_visible(&mut self) -> bool {
        if self.status == SlotStatus::Idle {
            self.status = SlotStatus::PendingVisible;
            true
        } else {
            false
        }
    }

    /// Begins a chain walk. Returns true if a walk should be spawned.
    pub fn begin_loading(&mut self) -> bool {
        if self.status == SlotStatus::PendingVisible {
            self.status = SlotStatus::Loading;
            true
        } else {
            false
        }
    }

    /// Adopts a candidate that loaded successfully.
    pub fn adopt(&mut self, url: impl Into<String>) {
        self.adopted = Some(url.into());
        self.status = SlotStatus::Loaded;
        self.retry_at = None;
    }

    /// Records a walk in which every candidate failed.
    ///
    /// Returns true when another attempt is scheduled, false when the budget
    /// is exhausted and the slot is now terminal.
    pub fn record_exhausted(&mut self, now: Instant) -> bool {
        self.fail_attempt(now)
    }

    /// Records a render error on the adopted candidate, re-entering the
    /// loading state unless the budget is exhausted.
    pub fn record_render_error(&mut self, now: Instant) -> bool {
        if self.status == SlotStatus::Loaded {
            self.status = SlotStatus::Loading;
        }
        self.fail_attempt(now)
    }

    fn fail_attempt(&mut self, now: Instant) -> bool {
        // The budget is checked before counting: failures 1..=RETRY_BUDGET
        // each schedule a backoff cycle, the next one is terminal.
        if self.retries >= RETRY_BUDGET {
            self.status = SlotStatus::FailedFinal;
            self.retry_at = None;
            false
        } else {
            self.retries += 1;
            self.status = SlotStatus::Loading;
            self.retry_at = Some(now + RETRY_BACKOFF);
            true
        }
    }

    /// Consumes a due retry. Returns true exactly once per scheduled retry,
    /// when its backoff has elapsed.
    pub fn take_due_retry(&mut self, now: Instant) -> bool {
        match self.retry_at {
            Some(at) if now >= at && self.status == SlotStatus::Loading => {
                self.retry_at = None;
                true
            }
            _ => false,
        }
    }
}
