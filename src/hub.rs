//! Hub: extension point for a future networked front end.
//!
//! Instantiable, with no behavior of its own yet.

/// Placeholder for a networked front end over a [`Graph`](crate::Graph).
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Hub;

impl Hub {
    pub fn new() -> Self {
        Hub
    }
}
