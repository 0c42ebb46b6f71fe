use wasm_bindgen::prelude::*;

/// Snapshot of the last `tick()`
#[wasm_bindgen]
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TickStats {
    pub(super) pairs_checked: u32,
    pub(super) collisions: u32,
    pub(super) resolved: u32,
    pub(super) tick_ms: f64,
}

impl TickStats {
    /// Run one tick against fresh counters and stamp its wall time into `tick_ms`
    pub(super) fn timed<T>(tick: impl FnOnce(&mut TickStats) -> T) -> (TickStats, T) {
        let started = now_ms();
        let mut stats = TickStats::default();
        let out = tick(&mut stats);
        stats.tick_ms = (now_ms() - started).max(0.0);
        (stats, out)
    }
}

#[wasm_bindgen]
impl TickStats {
    #[wasm_bindgen(getter)]
    pub fn pairs_checked(&self) -> u32 { self.pairs_checked }
    #[wasm_bindgen(getter)]
    pub fn collisions(&self) -> u32 { self.collisions }
    /// Collisions that actually changed a body (approaching, not both static)
    #[wasm_bindgen(getter)]
    pub fn resolved(&self) -> u32 { self.resolved }
    #[wasm_bindgen(getter)]
    pub fn tick_ms(&self) -> f64 { self.tick_ms }
}

/// Milliseconds since an arbitrary origin; only differences mean anything
#[cfg(target_arch = "wasm32")]
fn now_ms() -> f64 {
    js_sys::Date::now()
}

#[cfg(not(target_arch = "wasm32"))]
fn now_ms() -> f64 {
    use std::sync::OnceLock;
    use std::time::Instant;

    static ORIGIN: OnceLock<Instant> = OnceLock::new();
    ORIGIN.get_or_init(Instant::now).elapsed().as_secs_f64() * 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timed_starts_from_zeroed_counters() {
        let (stats, checked) = TickStats::timed(|stats| {
            assert_eq!(*stats, TickStats::default());
            stats.pairs_checked = 3;
            stats.collisions = 1;
            stats.pairs_checked
        });
        assert_eq!(checked, 3);
        assert_eq!(stats.pairs_checked(), 3);
        assert_eq!(stats.collisions(), 1);
        assert_eq!(stats.resolved(), 0);
        assert!(stats.tick_ms() >= 0.0);
    }

    #[test]
    fn timed_measures_the_closure() {
        let (stats, ()) = TickStats::timed(|_| std::thread::sleep(std::time::Duration::from_millis(5)));
        assert!(stats.tick_ms() >= 4.0, "measured {} ms", stats.tick_ms());
    }
}
