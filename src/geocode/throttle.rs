use std::thread;
use std::time::{Duration, Instant};
use tracing::debug;

use super::Geocoder;
use crate::error::LookupError;
use crate::record::Coordinates;

/// Wraps a geocoder so calls start at least `min_interval` apart.
///
/// One throttle is shared by the whole run. The first call goes out
/// immediately; later calls block the thread until the interval since the
/// previous call started has passed.
pub struct Throttled<G> {
    inner: G,
    min_interval: Duration,
    last_call: Option<Instant>,
}

impl<G: Geocoder> Throttled<G> {
    pub fn new(inner: G, min_interval: Duration) -> Self {
        Throttled {
            inner,
            min_interval,
            last_call: None,
        }
    }

    #[cfg(test)]
    fn inner(&self) -> &G {
        &self.inner
    }

    fn wait_turn(&mut self) {
        if let Some(last) = self.last_call {
            let elapsed = last.elapsed();
            if elapsed < self.min_interval {
                let wait = self.min_interval - elapsed;
                debug!("Waiting {:.3}s before next lookup", wait.as_secs_f64());
                thread::sleep(wait);
            }
        }
        self.last_call = Some(Instant::now());
    }
}

impl<G: Geocoder> Geocoder for Throttled<G> {
    fn lookup(&mut self, query: &str) -> Result<Option<Coordinates>, LookupError> {
        self.wait_turn();
        self.inner.lookup(query)
    }
}
