//! Reverse Lookup
//!
//! Address -> domain resolution used by the domains classifier.
//! This is the only I/O reachable from normalization, so it sits behind
//! the `ReverseLookup` trait and is passed in by the caller.
//!
//! Every failure (no PTR record, resolver error, unparsable address, no
//! network) is reported the same way: `None`.

use std::collections::HashMap;
use std::net::IpAddr;
use std::str::FromStr;

use parking_lot::Mutex;

// ============================================================================
// CAPABILITY
// ============================================================================

pub trait ReverseLookup {
    /// Resolve `address` to a host name, `None` when unresolvable
    fn lookup(&self, address: &str) -> Option<String>;
}

impl<F> ReverseLookup for F
where
    F: Fn(&str) -> Option<String>,
{
    fn lookup(&self, address: &str) -> Option<String> {
        self(address)
    }
}

// ============================================================================
// IMPLEMENTATIONS
// ============================================================================

/// System resolver (getnameinfo), one blocking attempt, no retries
#[derive(Debug, Default, Clone, Copy)]
pub struct DnsReverseLookup;

impl ReverseLookup for DnsReverseLookup {
    fn lookup(&self, address: &str) -> Option<String> {
        let ip = IpAddr::from_str(address.trim()).ok()?;
        let host = dns_lookup::lookup_addr(&ip).ok()?;
        if host.is_empty() {
            None
        } else {
            Some(host)
        }
    }
}

/// Never resolves; addresses are exported as-is
#[derive(Debug, Default, Clone, Copy)]
pub struct NoReverseLookup;

impl ReverseLookup for NoReverseLookup {
    fn lookup(&self, _address: &str) -> Option<String> {
        None
    }
}

/// Same-run memo over another lookup. Failures are cached too.
pub struct CachedLookup<L> {
    inner: L,
    cache: Mutex<HashMap<String, Option<String>>>,
}

impl<L: ReverseLookup> CachedLookup<L> {
    pub fn new(inner: L) -> Self {
        Self {
            inner,
            cache: Mutex::new(HashMap::new()),
        }
    }

    pub fn cached_entries(&self) -> usize {
        self.cache.lock().len()
    }
}

impl<L: ReverseLookup> ReverseLookup for CachedLookup<L> {
    fn lookup(&self, address: &str) -> Option<String> {
        if let Some(hit) = self.cache.lock().get(address) {
            return hit.clone();
        }
        // Lock released during the blocking call
        let resolved = self.inner.lookup(address);
        self.cache
            .lock()
            .insert(address.to_string(), resolved.clone());
        resolved
    }
}

/// Pick the lookup for a run
pub fn build_lookup(resolve: bool, cache: bool) -> Box<dyn ReverseLookup> {
    match (resolve, cache) {
        (false, _) => Box::new(NoReverseLookup),
        (true, true) => Box::new(CachedLookup::new(DnsReverseLookup)),
        (true, false) => Box::new(DnsReverseLookup),
    }
}

// ============================================================================
// TESTS
// ============================================================================
