//! Last-request-wins guarding for a shared view region.
//!
//! Report queries may overlap when the user changes filters quickly.
//! There is no cancellation plumbing: a region hands out monotonically
//! increasing tokens and accepts a completion only from the most recently
//! issued one, so a slow response can never clobber a view already updated
//! by a faster, later-issued request. Stale responses are simply ignored
//! on arrival.

/// Token identifying one initiated request against a region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegionToken(u64);

/// A view region whose content always corresponds to the most recently
/// initiated query.
#[derive(Debug, Clone, Default)]
pub struct ViewRegion<T> {
    latest: u64,
    value: Option<T>,
}

impl<T> ViewRegion<T> {
    pub fn new() -> Self {
        Self {
            latest: 0,
            value: None,
        }
    }

    /// Record a newly initiated request; supersedes all earlier tokens.
    pub fn begin(&mut self) -> RegionToken {
        self.latest += 1;
        RegionToken(self.latest)
    }

    /// Install a completed result. Returns false (leaving the region
    /// untouched) if the token was superseded.
    pub fn complete(&mut self, token: RegionToken, value: T) -> bool {
        if token.0 != self.latest {
            return false;
        }
        self.value = Some(value);
        true
    }

    pub fn current(&self) -> Option<&T> {
        self.value.as_ref()
    }
}
