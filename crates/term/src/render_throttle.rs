//! Frame skipping for the tick loop.
//!
//! The runner ticks every 16 ms but the board only changes on input and the
//! timer only changes once per second. Rendering is keyed on the snapshot
//! fingerprint with a slow heartbeat for terminals that drop output.

#[derive(Debug, Clone)]
pub struct RenderThrottle {
    heartbeat_ms: u64,
    last_render_ms: u64,
    last_fingerprint: u64,
    has_rendered: bool,
}

impl RenderThrottle {
    pub fn new(heartbeat_ms: u64) -> Self {
        Self {
            heartbeat_ms,
            last_render_ms: 0,
            last_fingerprint: 0,
            has_rendered: false,
        }
    }

    /// Decide whether to draw a frame at `now_ms`.
    ///
    /// Always true for the first call and on a fingerprint change; otherwise
    /// at most once per heartbeat interval.
    pub fn should_render(&mut self, now_ms: u64, fingerprint: u64) -> bool {
        let due = !self.has_rendered
            || fingerprint != self.last_fingerprint
            || now_ms.saturating_sub(self.last_render_ms) >= self.heartbeat_ms;
        if due {
            self.has_rendered = true;
            self.last_render_ms = now_ms;
            self.last_fingerprint = fingerprint;
        }
        due
    }

    /// Force the next call to render (resize, screen switch).
    pub fn invalidate(&mut self) {
        self.has_rendered = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_on_change_and_heartbeat_only() {
        let mut t = RenderThrottle::new(500);
        assert!(t.should_render(0, 1));
        assert!(!t.should_render(16, 1));
        assert!(t.should_render(32, 2));
        assert!(!t.should_render(500, 2));
        assert!(t.should_render(532, 2));

        t.invalidate();
        assert!(t.should_render(540, 2));
    }
}
