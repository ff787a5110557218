use hashbrown::HashMap;

/// Opaque identity of a timer requested by the controller.
///
/// Ids are never reused within one controller, so a late expiration of a
/// cancelled timer can always be told apart from its replacement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(pub u64);

/// What a timer does when it fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerKind {
    HidePreloader,
    /// Trailing edge of the scroll debounce window.
    ScrollSettled,
    RevealCard(usize),
    ShowHero(usize),
    ReleaseScrollLock,
}

/// Bookkeeping for live timers.
#[derive(Debug, Default)]
pub struct TimerTable {
    next_id: u64,
    live: HashMap<TimerId, TimerKind>,
}

impl TimerTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a fresh id and remember what it is for.
    pub fn arm(&mut self, kind: TimerKind) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        self.live.insert(id, kind);
        id
    }

    /// Forget a timer. Returns `false` when it already fired or was never armed.
    pub fn disarm(&mut self, id: TimerId) -> bool {
        self.live.remove(&id).is_some()
    }

    /// Consume an expiration. Stale ids yield `None`.
    pub fn fire(&mut self, id: TimerId) -> Option<TimerKind> {
        self.live.remove(&id)
    }
}

/// Delay of the `index`-th element of a cascade: `base + step * index`.
///
/// Saturates at `u32::MAX` rather than wrapping, so the order of a long cascade
/// is preserved.
pub fn cascade_delay_ms(base_ms: u32, step_ms: u32, index: usize) -> u32 {
    let index = u32::try_from(index).unwrap_or(u32::MAX);
    base_ms.saturating_add(step_ms.saturating_mul(index))
}
