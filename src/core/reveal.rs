use hashbrown::HashSet;

use super::config::ControllerConfig;

/// Which entrance animation an element belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RevealKind {
    /// Revealed when it intersects the viewport.
    OnScroll,
    /// Revealed on a fixed cascade after bootstrap.
    ServiceCard,
    /// Faded in on a fixed cascade after bootstrap.
    HeroFadeIn,
}

/// An element of one of the reveal collections, by document order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RevealTarget {
    pub kind: RevealKind,
    pub index: usize,
}

impl RevealTarget {
    pub fn new(kind: RevealKind, index: usize) -> Self {
        Self { kind, index }
    }
}

/// Options for the viewport intersection watcher.
#[derive(Debug, Clone, PartialEq)]
pub struct RevealOptions {
    pub threshold: f64,
    pub root_margin: String,
}

impl RevealOptions {
    pub fn from_config(cfg: &ControllerConfig) -> Self {
        Self {
            threshold: cfg.reveal_threshold,
            root_margin: cfg.reveal_root_margin.clone(),
        }
    }
}

/// One-way reveal markers.
///
/// There is deliberately no way to clear a marker.
#[derive(Debug, Default)]
pub struct RevealRegistry {
    revealed: HashSet<RevealTarget>,
}

impl RevealRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the marker. Returns `true` only the first time for a given target.
    pub fn mark(&mut self, target: RevealTarget) -> bool {
        self.revealed.insert(target)
    }

    pub fn is_revealed(&self, target: RevealTarget) -> bool {
        self.revealed.contains(&target)
    }

    pub fn revealed_count(&self) -> usize {
        self.revealed.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mark_is_idempotent() {
        let mut r = RevealRegistry::new();
        let t = RevealTarget::new(RevealKind::OnScroll, 4);
        assert!(r.mark(t));
        for _ in 0..10 {
            assert!(!r.mark(t));
        }
        assert!(r.is_revealed(t));
        assert_eq!(r.revealed_count(), 1);
    }

    #[test]
    fn kinds_are_tracked_separately() {
        let mut r = RevealRegistry::new();
        assert!(r.mark(RevealTarget::new(RevealKind::ServiceCard, 0)));
        assert!(r.mark(RevealTarget::new(RevealKind::HeroFadeIn, 0)));
        assert!(!r.is_revealed(RevealTarget::new(RevealKind::OnScroll, 0)));
    }

    #[test]
    fn options_follow_config() {
        let opts = RevealOptions::from_config(&ControllerConfig::default());
        assert_eq!(opts.threshold, 0.1);
        assert_eq!(opts.root_margin, "0px 0px -50px 0px");
    }
}
