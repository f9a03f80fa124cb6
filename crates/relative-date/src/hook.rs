//! Formatting hooks for a host calendar library.
//!
//! A host that renders dates through pattern tokens can register these
//! handlers in its extension table: each one takes the bound date value and
//! returns a string. Nothing here touches the host's own rendering.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::adapter::Instant;
use crate::error::Result;
use crate::relative::{relative_date, FormatOptions};
use crate::schedule::schedule;

/// Token under which [`relative_with`] registers the relative label.
pub const RELATIVE_TOKEN: &str = "R";

/// Token under which [`schedule_with`] registers the schedule label.
pub const SCHEDULE_TOKEN: &str = "schedule";

/// A formatting capability: bound date in, string out.
pub type Handler = Arc<dyn Fn(&Instant) -> Result<String> + Send + Sync>;

/// Handlers keyed by pattern token.
#[derive(Clone, Default)]
pub struct Handlers {
    table: BTreeMap<String, Handler>,
}

impl Handlers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the handler for `token`.
    pub fn register<F>(mut self, token: impl Into<String>, handler: F) -> Self
    where
        F: Fn(&Instant) -> Result<String> + Send + Sync + 'static,
    {
        self.table.insert(token.into(), Arc::new(handler));
        self
    }

    /// Take every handler from `other`; its tokens win on conflict.
    pub fn extend(mut self, other: Handlers) -> Self {
        self.table.extend(other.table);
        self
    }

    pub fn get(&self, token: &str) -> Option<&Handler> {
        self.table.get(token)
    }

    /// Run the handler for `token`, or `None` if nothing is registered.
    pub fn call(&self, token: &str, value: &Instant) -> Option<Result<String>> {
        self.get(token).map(|handler| handler(value))
    }

    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.table.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

impl fmt::Debug for Handlers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.table.keys()).finish()
    }
}

/// The relative-label handler under [`RELATIVE_TOKEN`], using `options` on
/// every call.
pub fn relative_with(options: FormatOptions) -> Handlers {
    Handlers::new().register(RELATIVE_TOKEN, move |value: &Instant| {
        relative_date(value, &options)
    })
}

/// [`relative_with`] using default labels, the host zone and the clock.
pub fn relative() -> Handlers {
    relative_with(FormatOptions::default())
}

/// The schedule-label handler under [`SCHEDULE_TOKEN`].
pub fn schedule_with(options: FormatOptions) -> Handlers {
    Handlers::new().register(SCHEDULE_TOKEN, move |value: &Instant| schedule(value, &options))
}
