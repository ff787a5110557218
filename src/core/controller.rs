use core::fmt;

use super::config::ControllerConfig;
use super::debounce::Debouncer;
use super::navigation::is_activation_key;
use super::page::{Command, Event, PageInventory};
use super::reveal::{RevealKind, RevealOptions, RevealRegistry, RevealTarget};
use super::state::{parallax_translate, AppState};
use super::timers::{cascade_delay_ms, TimerId, TimerKind, TimerTable};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BootstrapError {
    /// The root container is absent; nothing is wired.
    MissingAppContainer(String),
    AlreadyStarted,
    InvalidConfig(&'static str),
}

impl fmt::Display for BootstrapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingAppContainer(sel) => {
                write!(f, "{sel} element not found; page controller cannot initialize")
            }
            Self::AlreadyStarted => write!(f, "page controller already started"),
            Self::InvalidConfig(msg) => write!(f, "invalid config: {msg}"),
        }
    }
}

impl std::error::Error for BootstrapError {}

/// Scroll/reveal controller for the landing page.
///
/// Host-driven: the binding pushes [`Event`]s and applies the returned
/// [`Command`]s. Timers are requested through [`Command::ScheduleTimer`] and
/// come back as [`Event::TimerFired`].
#[derive(Debug)]
pub struct Controller {
    cfg: ControllerConfig,
    page: Option<PageInventory>,
    state: AppState,
    timers: TimerTable,
    scroll: Debouncer<f64>,
    reveals: RevealRegistry,
}

impl Controller {
    pub fn new(cfg: ControllerConfig) -> Self {
        let scroll = Debouncer::new(cfg.scroll_debounce_ms);
        Self {
            cfg,
            page: None,
            state: AppState::new(),
            timers: TimerTable::new(),
            scroll,
            reveals: RevealRegistry::new(),
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn reveals(&self) -> &RevealRegistry {
        &self.reveals
    }

    pub fn is_started(&self) -> bool {
        self.page.is_some()
    }

    /// Wire the page. All-or-nothing: on error no command is produced.
    pub fn bootstrap(&mut self, page: &PageInventory) -> Result<Vec<Command>, BootstrapError> {
        if self.page.is_some() {
            return Err(BootstrapError::AlreadyStarted);
        }
        self.cfg.validate().map_err(BootstrapError::InvalidConfig)?;
        if !page.has_app_container {
            let err = BootstrapError::MissingAppContainer(self.cfg.selectors.app_container.clone());
            tracing::error!("{err}");
            return Err(err);
        }
        self.page = Some(*page);

        let mut out = Vec::new();

        if page.has_preloader {
            out.push(self.schedule(self.cfg.preloader_delay_ms, TimerKind::HidePreloader));
        }

        out.push(Command::ListenScroll);

        out.push(Command::ObserveReveals(RevealOptions::from_config(&self.cfg)));
        for i in 0..page.service_card_count {
            let delay = cascade_delay_ms(0, self.cfg.card_stagger_ms, i);
            out.push(self.schedule(delay, TimerKind::RevealCard(i)));
        }
        for i in 0..page.hero_fade_in_count {
            let delay = cascade_delay_ms(self.cfg.hero_base_delay_ms, self.cfg.hero_stagger_ms, i);
            out.push(self.schedule(delay, TimerKind::ShowHero(i)));
        }

        out.push(Command::InterceptAnchors);
        out.push(Command::ListenKeyboard);
        out.push(Command::ListenResourceErrors);

        tracing::debug!(
            cards = page.service_card_count,
            heroes = page.hero_fade_in_count,
            reveals = page.reveal_on_scroll_count,
            "page controller started"
        );
        Ok(out)
    }

    /// Process one host event. Events before a successful bootstrap are ignored.
    pub fn handle(&mut self, event: Event) -> Vec<Command> {
        let Some(page) = self.page else {
            return Vec::new();
        };

        match event {
            Event::Scroll { offset } | Event::Resize { offset } => self.push_scroll(offset),
            Event::TimerFired(id) => self.on_timer(id, &page),
            Event::Intersection {
                index,
                is_intersecting,
            } => {
                if !is_intersecting || index >= page.reveal_on_scroll_count {
                    return Vec::new();
                }
                self.reveal(RevealTarget::new(RevealKind::OnScroll, index))
                    .into_iter()
                    .collect()
            }
            Event::AnchorActivated {
                fragment,
                target_found,
            } => self.scroll_to(fragment, target_found),
            Event::KeyDown {
                key,
                on_booking_control,
            } => {
                if on_booking_control && is_activation_key(&key) {
                    vec![self.open_booking()]
                } else {
                    Vec::new()
                }
            }
            Event::BookingClicked => vec![self.open_booking()],
            Event::Focus {
                on_booking_control,
                focused,
            } => {
                if on_booking_control {
                    vec![Command::SetFocusRing { focused }]
                } else {
                    Vec::new()
                }
            }
            Event::ResourceError { is_image } => {
                if is_image {
                    vec![Command::HideFailedImage]
                } else {
                    Vec::new()
                }
            }
        }
    }

    fn schedule(&mut self, delay_ms: u32, kind: TimerKind) -> Command {
        let id = self.timers.arm(kind);
        Command::ScheduleTimer { id, delay_ms, kind }
    }

    fn push_scroll(&mut self, offset: f64) -> Vec<Command> {
        let timers = &mut self.timers;
        let r = self
            .scroll
            .push(offset, || timers.arm(TimerKind::ScrollSettled));

        let mut out = Vec::with_capacity(2);
        if let Some(prev) = r.cancel {
            self.timers.disarm(prev);
            out.push(Command::CancelTimer(prev));
        }
        out.push(Command::ScheduleTimer {
            id: r.schedule,
            delay_ms: r.delay_ms,
            kind: TimerKind::ScrollSettled,
        });
        out
    }

    fn on_timer(&mut self, id: TimerId, page: &PageInventory) -> Vec<Command> {
        let Some(kind) = self.timers.fire(id) else {
            return Vec::new();
        };

        match kind {
            TimerKind::HidePreloader => vec![Command::HidePreloader],
            TimerKind::ScrollSettled => match self.scroll.settle(id) {
                Some(offset) => self.apply_scroll(offset, page),
                None => Vec::new(),
            },
            TimerKind::RevealCard(i) => self
                .reveal(RevealTarget::new(RevealKind::ServiceCard, i))
                .into_iter()
                .collect(),
            TimerKind::ShowHero(i) => self
                .reveal(RevealTarget::new(RevealKind::HeroFadeIn, i))
                .into_iter()
                .collect(),
            TimerKind::ReleaseScrollLock => {
                self.state.programmatic_scroll.release();
                Vec::new()
            }
        }
    }

    fn apply_scroll(&mut self, offset: f64, page: &PageInventory) -> Vec<Command> {
        self.state
            .apply_scroll(offset, self.cfg.floating_button_threshold_px);

        let mut out = Vec::with_capacity(2);
        if page.has_floating_button {
            out.push(Command::SetFloatingButton {
                visible: self.state.floating_button_visible(),
            });
        }
        if page.has_hero_background {
            out.push(Command::SetParallax {
                translate_y: parallax_translate(self.state.scroll_position(), self.cfg.parallax_factor),
            });
        }
        out
    }

    fn reveal(&mut self, target: RevealTarget) -> Option<Command> {
        if !self.reveals.mark(target) {
            return None;
        }
        Some(match target.kind {
            RevealKind::HeroFadeIn => Command::ShowHero(target.index),
            RevealKind::OnScroll | RevealKind::ServiceCard => Command::AddRevealed(target),
        })
    }

    fn scroll_to(&mut self, fragment: String, target_found: bool) -> Vec<Command> {
        if !target_found {
            tracing::debug!(%fragment, "anchor target not found");
            return Vec::new();
        }
        if !self.state.programmatic_scroll.try_acquire() {
            tracing::debug!(%fragment, "anchor scroll already in flight; ignoring");
            return Vec::new();
        }
        vec![
            Command::ScrollIntoView { id: fragment },
            self.schedule(self.cfg.scroll_lock_ms, TimerKind::ReleaseScrollLock),
        ]
    }

    fn open_booking(&self) -> Command {
        Command::OpenBooking {
            url: self.cfg.booking_url.clone(),
        }
    }
}

impl Default for Controller {
    fn default() -> Self {
        Self::new(ControllerConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::harness::VirtualScheduler;
    use crate::reveal::RevealKind;
    use std::sync::{Arc, Mutex};
    use tracing_subscriber::layer::{Context, SubscriberExt};
    use tracing_subscriber::Layer;

    fn started(page: PageInventory) -> (Controller, VirtualScheduler) {
        let mut c = Controller::default();
        let cmds = c.bootstrap(&page).unwrap();
        let mut sched = VirtualScheduler::new();
        sched.absorb(&cmds);
        (c, sched)
    }

    #[test]
    fn missing_container_wires_nothing() {
        let mut c = Controller::default();
        let page = PageInventory {
            has_app_container: false,
            ..PageInventory::complete(3, 3, 3)
        };
        let err = c.bootstrap(&page).unwrap_err();
        assert_eq!(
            err,
            BootstrapError::MissingAppContainer(".app-container".to_string())
        );
        assert!(!c.is_started());
        assert!(c.handle(Event::Scroll { offset: 500.0 }).is_empty());
        assert!(c.handle(Event::BookingClicked).is_empty());
    }

    /// Records the level of every event it sees.
    #[derive(Clone, Default)]
    struct LevelCapture {
        levels: Arc<Mutex<Vec<tracing::Level>>>,
    }

    impl<S: tracing::Subscriber> Layer<S> for LevelCapture {
        fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
            if let Ok(mut levels) = self.levels.lock() {
                levels.push(*event.metadata().level());
            }
        }
    }

    #[test]
    fn missing_container_logs_one_error() {
        let capture = LevelCapture::default();
        let subscriber = tracing_subscriber::registry().with(capture.clone());

        let mut c = Controller::default();
        let page = PageInventory {
            has_app_container: false,
            ..PageInventory::complete(3, 3, 3)
        };
        let result = tracing::subscriber::with_default(subscriber, || {
            let result = c.bootstrap(&page);
            c.handle(Event::Scroll { offset: 500.0 });
            result
        });
        assert!(result.is_err());

        let levels = capture.levels.lock().unwrap();
        let errors = levels.iter().filter(|l| **l == tracing::Level::ERROR).count();
        assert_eq!(errors, 1);
    }

    #[test]
    fn bootstrap_order_and_listeners() {
        let mut c = Controller::default();
        let cmds = c.bootstrap(&PageInventory::complete(2, 0, 0)).unwrap();
        let listeners: Vec<_> = cmds.iter().filter(|c| c.is_listener()).collect();
        assert_eq!(listeners.len(), 5);
        assert!(matches!(
            cmds[0],
            Command::ScheduleTimer {
                delay_ms: 1500,
                kind: TimerKind::HidePreloader,
                ..
            }
        ));
        assert_eq!(cmds[1], Command::ListenScroll);
        assert_eq!(c.bootstrap(&PageInventory::complete(2, 0, 0)), Err(BootstrapError::AlreadyStarted));
    }

    #[test]
    fn invalid_config_is_rejected() {
        let mut cfg = ControllerConfig::default();
        cfg.reveal_threshold = 2.0;
        let mut c = Controller::new(cfg);
        assert!(matches!(
            c.bootstrap(&PageInventory::complete(0, 0, 0)),
            Err(BootstrapError::InvalidConfig(_))
        ));
    }

    #[test]
    fn preloader_hides_after_delay() {
        let (mut c, mut sched) = started(PageInventory::complete(0, 0, 0));
        assert!(sched.advance_to(1499, &mut c).is_empty());
        assert_eq!(sched.advance_to(1500, &mut c), vec![Command::HidePreloader]);
    }

    #[test]
    fn missing_preloader_is_skipped() {
        let page = PageInventory {
            has_preloader: false,
            ..PageInventory::complete(0, 0, 0)
        };
        let (mut c, mut sched) = started(page);
        assert!(sched.advance_to(5_000, &mut c).is_empty());
    }

    #[test]
    fn burst_of_scrolls_runs_once_with_last_offset() {
        let (mut c, mut sched) = started(PageInventory::complete(0, 0, 0));
        sched.advance_to(2_000, &mut c);

        // 50 samples inside a single 10ms window.
        for i in 0..50 {
            let cmds = c.handle(Event::Scroll {
                offset: 100.0 + 10.0 * i as f64,
            });
            sched.absorb(&cmds);
            sched.advance_by(0, &mut c);
        }
        let out = sched.advance_by(10, &mut c);
        assert_eq!(
            out,
            vec![
                Command::SetFloatingButton { visible: true },
                Command::SetParallax {
                    translate_y: 590.0 * 0.3
                },
            ]
        );
        assert_eq!(c.state().scroll_position(), 590.0);
        assert_eq!(sched.pending(), 0);
        assert!(sched.advance_by(1_000, &mut c).is_empty());
    }

    #[test]
    fn spaced_scrolls_each_run() {
        let (mut c, mut sched) = started(PageInventory::complete(0, 0, 0));
        sched.advance_to(2_000, &mut c);

        sched.absorb(&c.handle(Event::Scroll { offset: 400.0 }));
        let first = sched.advance_by(11, &mut c);
        assert!(first.contains(&Command::SetFloatingButton { visible: true }));

        sched.absorb(&c.handle(Event::Resize { offset: 100.0 }));
        let second = sched.advance_by(11, &mut c);
        assert!(second.contains(&Command::SetFloatingButton { visible: false }));
        assert!(!c.state().floating_button_visible());
    }

    #[test]
    fn scroll_without_optional_elements_only_updates_state() {
        let page = PageInventory {
            has_floating_button: false,
            has_hero_background: false,
            ..PageInventory::complete(0, 0, 0)
        };
        let (mut c, mut sched) = started(page);
        sched.advance_to(2_000, &mut c);
        sched.absorb(&c.handle(Event::Scroll { offset: 350.0 }));
        assert!(sched.advance_by(10, &mut c).is_empty());
        assert!(c.state().floating_button_visible());
    }

    #[test]
    fn cards_cascade_in_index_order() {
        let (mut c, mut sched) = started(PageInventory::complete(0, 4, 0));
        let fired = sched.run_all(&mut c);
        let cards: Vec<(u64, usize)> = fired
            .iter()
            .filter_map(|(at, cmd)| match cmd {
                Command::AddRevealed(t) if t.kind == RevealKind::ServiceCard => Some((*at, t.index)),
                _ => None,
            })
            .collect();
        assert_eq!(cards, vec![(0, 0), (200, 1), (400, 2), (600, 3)]);
    }

    #[test]
    fn heroes_fade_in_after_base_delay() {
        let (mut c, mut sched) = started(PageInventory::complete(0, 0, 3));
        let fired = sched.run_all(&mut c);
        let heroes: Vec<(u64, usize)> = fired
            .iter()
            .filter_map(|(at, cmd)| match cmd {
                Command::ShowHero(i) => Some((*at, *i)),
                _ => None,
            })
            .collect();
        assert_eq!(heroes, vec![(800, 0), (1000, 1), (1200, 2)]);
    }

    #[test]
    fn intersection_reveals_once() {
        let (mut c, _) = started(PageInventory::complete(2, 0, 0));
        assert!(c
            .handle(Event::Intersection {
                index: 1,
                is_intersecting: false
            })
            .is_empty());

        let first = c.handle(Event::Intersection {
            index: 1,
            is_intersecting: true,
        });
        assert_eq!(
            first,
            vec![Command::AddRevealed(RevealTarget::new(RevealKind::OnScroll, 1))]
        );
        for visible in [false, true, false, true] {
            assert!(c
                .handle(Event::Intersection {
                    index: 1,
                    is_intersecting: visible
                })
                .is_empty());
        }
        assert!(c
            .reveals()
            .is_revealed(RevealTarget::new(RevealKind::OnScroll, 1)));

        // Out of range entries are ignored.
        assert!(c
            .handle(Event::Intersection {
                index: 9,
                is_intersecting: true
            })
            .is_empty());
    }

    #[test]
    fn missing_anchor_target_is_a_no_op() {
        let (mut c, _) = started(PageInventory::complete(0, 0, 0));
        let out = c.handle(Event::AnchorActivated {
            fragment: "nowhere".to_string(),
            target_found: false,
        });
        assert!(out.is_empty());
        assert!(!c.state().is_programmatic_scroll_in_flight());
    }

    #[test]
    fn anchor_scroll_locks_for_a_second() {
        let (mut c, mut sched) = started(PageInventory {
            has_preloader: false,
            ..PageInventory::complete(0, 0, 0)
        });
        let anchor = || Event::AnchorActivated {
            fragment: "services".to_string(),
            target_found: true,
        };

        let out = c.handle(anchor());
        assert_eq!(
            out[0],
            Command::ScrollIntoView {
                id: "services".to_string()
            }
        );
        sched.absorb(&out);
        assert!(c.state().is_programmatic_scroll_in_flight());

        sched.advance_by(999, &mut c);
        assert!(c.handle(anchor()).is_empty());

        sched.advance_by(1, &mut c);
        assert_eq!(sched.now_ms(), 1_000);
        assert!(!c.state().is_programmatic_scroll_in_flight());
        assert!(!c.handle(anchor()).is_empty());
    }

    #[test]
    fn enter_on_booking_control_opens_booking() {
        let (mut c, _) = started(PageInventory::complete(0, 0, 0));
        let open = Command::OpenBooking {
            url: crate::config::BOOKING_URL.to_string(),
        };
        assert_eq!(
            c.handle(Event::KeyDown {
                key: "Enter".to_string(),
                on_booking_control: true
            }),
            vec![open.clone()]
        );
        assert!(c
            .handle(Event::KeyDown {
                key: "Enter".to_string(),
                on_booking_control: false
            })
            .is_empty());
        assert!(c
            .handle(Event::KeyDown {
                key: "Escape".to_string(),
                on_booking_control: true
            })
            .is_empty());
        assert_eq!(c.handle(Event::BookingClicked), vec![open]);
    }

    #[test]
    fn focus_and_image_errors() {
        let (mut c, _) = started(PageInventory::complete(0, 0, 0));
        assert_eq!(
            c.handle(Event::Focus {
                on_booking_control: true,
                focused: true
            }),
            vec![Command::SetFocusRing { focused: true }]
        );
        assert!(c
            .handle(Event::Focus {
                on_booking_control: false,
                focused: true
            })
            .is_empty());
        assert_eq!(
            c.handle(Event::ResourceError { is_image: true }),
            vec![Command::HideFailedImage]
        );
        assert!(c.handle(Event::ResourceError { is_image: false }).is_empty());
    }

    #[test]
    fn stale_timer_ids_are_ignored() {
        let (mut c, _) = started(PageInventory::complete(0, 0, 0));
        assert!(c.handle(Event::TimerFired(TimerId(9_999))).is_empty());
    }
}
