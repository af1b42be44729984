//! Scroll mirroring between the two views.
//!
//! A scroll on either side restarts a short debounce window; once the window
//! elapses without further events, the latest offset is applied to the other
//! side. Bursts of events therefore collapse into a single sync.
//!
//! The report page runs the same machine in the browser, rendered by
//! [`ScrollSync::script`] from the session's window and enabled state.

use std::time::{Duration, Instant};

use crate::config::{HostConfig, Side};

/// Time source, injectable for tests.
pub trait Clock {
    fn now(&self) -> Instant;
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Scroll position of a view, in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollOffset {
    pub top: f64,
    pub left: f64,
}

#[derive(Debug, Clone, Copy)]
struct Pending {
    target: Side,
    offset: ScrollOffset,
    at: Instant,
}

/// Debounced scroll mirroring for one pair of views.
#[derive(Debug)]
pub struct ScrollSync<C: Clock = SystemClock> {
    clock: C,
    debounce: Duration,
    enabled: bool,
    pending: Option<Pending>,
}

impl ScrollSync<SystemClock> {
    pub fn new(debounce: Duration) -> Self {
        Self::with_clock(SystemClock, debounce)
    }

    pub fn from_config(config: &HostConfig) -> Self {
        let mut sync = Self::new(config.scroll_debounce);
        sync.set_enabled(config.scroll_mirroring);
        sync
    }
}

impl<C: Clock> ScrollSync<C> {
    pub fn with_clock(clock: C, debounce: Duration) -> Self {
        Self {
            clock,
            debounce,
            enabled: true,
            pending: None,
        }
    }

    pub fn debounce(&self) -> Duration {
        self.debounce
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Turning mirroring off drops any pending sync.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.pending = None;
        }
    }

    /// Record a scroll of `side`, replacing whatever was pending.
    pub fn on_scroll(&mut self, side: Side, offset: ScrollOffset) {
        if !self.enabled {
            return;
        }
        self.pending = Some(Pending {
            target: side.opposite(),
            offset,
            at: self.clock.now(),
        });
    }

    /// The sync to apply now, if the debounce window has elapsed.
    pub fn poll(&mut self) -> Option<(Side, ScrollOffset)> {
        let pending = self.pending?;
        if self.clock.now().duration_since(pending.at) < self.debounce {
            return None;
        }
        self.pending = None;
        Some((pending.target, pending.offset))
    }

    /// Browser-side mirroring for the report's `left` and `right` frames.
    ///
    /// One pending sync is shared by both frames: every scroll replaces it
    /// and restarts the window, and only the latest one is applied. Empty
    /// when mirroring is disabled.
    pub fn script(&self) -> String {
        if !self.enabled {
            return String::new();
        }
        let debounce_ms = self.debounce.as_millis();
        format!(
            r#"<script>
(() => {{
  const frames = [document.getElementById("left"), document.getElementById("right")];
  let timer;
  const sync = (source, target) => {{
    clearTimeout(timer);
    timer = setTimeout(() => {{
      const from = source.contentDocument && source.contentDocument.documentElement;
      const to = target.contentDocument && target.contentDocument.documentElement;
      if (from && to) {{
        to.scrollTop = from.scrollTop;
        to.scrollLeft = from.scrollLeft;
      }}
    }}, {debounce_ms});
  }};
  let loaded = 0;
  for (const frame of frames) {{
    frame.addEventListener("load", () => {{
      if (++loaded < 2) return;
      const [a, b] = frames;
      a.contentDocument.addEventListener("scroll", () => sync(a, b));
      b.contentDocument.addEventListener("scroll", () => sync(b, a));
    }});
  }}
}})();
</script>"#
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use facet_testhelpers::test;
    use std::cell::Cell;

    struct FakeClock {
        start: Instant,
        elapsed: Cell<Duration>,
    }

    impl FakeClock {
        fn new() -> Self {
            Self {
                start: Instant::now(),
                elapsed: Cell::new(Duration::ZERO),
            }
        }

        fn advance(&self, by: Duration) {
            self.elapsed.set(self.elapsed.get() + by);
        }
    }

    impl Clock for &FakeClock {
        fn now(&self) -> Instant {
            self.start + self.elapsed.get()
        }
    }

    fn offset(top: f64) -> ScrollOffset {
        ScrollOffset { top, left: 0.0 }
    }

    #[test]
    fn test_sync_after_window() {
        let clock = FakeClock::new();
        let mut sync = ScrollSync::with_clock(&clock, Duration::from_millis(16));

        sync.on_scroll(Side::Left, offset(120.0));
        assert_eq!(sync.poll(), None);

        clock.advance(Duration::from_millis(16));
        assert_eq!(sync.poll(), Some((Side::Right, offset(120.0))));
        assert_eq!(sync.poll(), None);
    }

    #[test]
    fn test_burst_coalesces_to_latest() {
        let clock = FakeClock::new();
        let mut sync = ScrollSync::with_clock(&clock, Duration::from_millis(16));

        for top in [10.0, 20.0, 30.0, 40.0] {
            sync.on_scroll(Side::Right, offset(top));
            clock.advance(Duration::from_millis(10));
            assert_eq!(sync.poll(), None);
        }

        clock.advance(Duration::from_millis(6));
        assert_eq!(sync.poll(), Some((Side::Left, offset(40.0))));
    }

    #[test]
    fn test_latest_side_wins() {
        let clock = FakeClock::new();
        let mut sync = ScrollSync::with_clock(&clock, Duration::from_millis(16));

        sync.on_scroll(Side::Left, offset(1.0));
        sync.on_scroll(Side::Right, offset(2.0));
        clock.advance(Duration::from_millis(20));
        assert_eq!(sync.poll(), Some((Side::Left, offset(2.0))));
    }

    #[test]
    fn test_disabled() {
        let clock = FakeClock::new();
        let mut sync = ScrollSync::with_clock(&clock, Duration::from_millis(16));

        sync.on_scroll(Side::Left, offset(5.0));
        sync.set_enabled(false);
        assert!(!sync.is_enabled());
        sync.on_scroll(Side::Left, offset(6.0));
        clock.advance(Duration::from_millis(100));
        assert_eq!(sync.poll(), None);
    }

    #[test]
    fn test_script_follows_session_state() {
        let config = HostConfig {
            scroll_debounce: Duration::from_millis(40),
            ..HostConfig::default()
        };
        let sync = ScrollSync::from_config(&config);
        assert_eq!(sync.debounce(), Duration::from_millis(40));
        assert!(sync.script().contains("}, 40);"));

        let config = HostConfig {
            scroll_mirroring: false,
            ..HostConfig::default()
        };
        let sync = ScrollSync::from_config(&config);
        assert!(!sync.is_enabled());
        assert_eq!(sync.script(), "");
    }
}
