//! Deterministic stand-in for the browser timer queue, used by tests.

use std::collections::BTreeMap;

use crate::controller::Controller;
use crate::page::{Command, Event};
use crate::timers::TimerId;

/// Executes `ScheduleTimer`/`CancelTimer` commands against a virtual clock.
///
/// Timers due at the same instant fire in scheduling order.
#[derive(Debug, Default)]
pub struct VirtualScheduler {
    now_ms: u64,
    seq: u64,
    queue: BTreeMap<(u64, u64), TimerId>,
}

impl VirtualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Take over the timer commands in `cmds`; everything else is ignored.
    pub fn absorb(&mut self, cmds: &[Command]) {
        for cmd in cmds {
            match cmd {
                Command::ScheduleTimer { id, delay_ms, .. } => {
                    let due = self.now_ms + u64::from(*delay_ms);
                    self.queue.insert((due, self.seq), *id);
                    self.seq += 1;
                }
                Command::CancelTimer(id) => self.queue.retain(|_, v| v != id),
                _ => {}
            }
        }
    }

    /// Fire every timer due up to `t`, returning the non-timer commands produced.
    pub fn advance_to(&mut self, t: u64, c: &mut Controller) -> Vec<Command> {
        self.fire_until(t, c).into_iter().map(|(_, cmd)| cmd).collect()
    }

    pub fn advance_by(&mut self, dt: u64, c: &mut Controller) -> Vec<Command> {
        self.advance_to(self.now_ms + dt, c)
    }

    /// Drain the queue, tagging each command with the time it was produced.
    pub fn run_all(&mut self, c: &mut Controller) -> Vec<(u64, Command)> {
        let mut out = Vec::new();
        while let Some(horizon) = self.queue.keys().map(|(due, _)| *due).max() {
            out.extend(self.fire_until(horizon, c));
        }
        out
    }

    fn fire_until(&mut self, t: u64, c: &mut Controller) -> Vec<(u64, Command)> {
        let mut out = Vec::new();
        loop {
            let Some(((due, seq), id)) = self.queue.first_key_value().map(|(k, v)| (*k, *v)) else {
                break;
            };
            if due > t {
                break;
            }
            self.queue.remove(&(due, seq));
            self.now_ms = due;
            let cmds = c.handle(Event::TimerFired(id));
            self.absorb(&cmds);
            out.extend(
                cmds.into_iter()
                    .filter(|cmd| {
                        !matches!(cmd, Command::ScheduleTimer { .. } | Command::CancelTimer(_))
                    })
                    .map(|cmd| (due, cmd)),
            );
        }
        self.now_ms = self.now_ms.max(t);
        out
    }
}
