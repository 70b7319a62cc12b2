//! Identifier reconciliation map for one conversion session
//!
//! TaskData documents identify elements with prefixed strings (`TSK12`,
//! `PFD3`) while the canonical model uses numeric reference ids. This module
//! keeps the two id spaces bijective for the lifetime of a conversion session
//! and generates fresh document ids for entities that do not have one yet.
//!
//! The map uses interior locking so one instance can be shared by reference
//! (or behind an `Arc`) between every mapping call of a session, including
//! calls made from several threads. Each check-and-insert happens inside a
//! single write critical section, so two conflicting registrations racing
//! each other always produce exactly one error.

use crate::app::models::canonical::ReferenceId;
use crate::{Error, Result};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

#[cfg(test)]
pub mod tests;

/// A registered pair of document and canonical identifiers
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct IdentifierLink {
    /// Document identifier (e.g. `TSK1`)
    pub external: String,
    /// Canonical reference id
    pub internal: ReferenceId,
}

impl IdentifierLink {
    pub fn new(external: impl Into<String>, internal: ReferenceId) -> Self {
        Self {
            external: external.into(),
            internal,
        }
    }
}

/// Bidirectional identifier store shared by all mapping calls of a session
#[derive(Debug, Default)]
pub struct IdentifierMap {
    state: RwLock<MapState>,
}

#[derive(Debug, Default)]
struct MapState {
    /// Document id -> reference id
    by_external: HashMap<String, ReferenceId>,

    /// Reference id -> document id
    by_internal: HashMap<ReferenceId, String>,

    /// Last sequence number handed out per prefix
    sequences: HashMap<String, u64>,

    /// Lowest reference id minted or reserved so far (0 when none)
    lowest_internal: ReferenceId,
}

impl MapState {
    fn insert(&mut self, external: String, internal: ReferenceId) {
        self.lowest_internal = self.lowest_internal.min(internal);
        self.by_internal.insert(internal, external.clone());
        self.by_external.insert(external, internal);
    }

    fn next_external(&mut self, prefix: &str) -> String {
        let sequence = self.sequences.entry(prefix.to_string()).or_insert(0);
        loop {
            *sequence += 1;
            let candidate = format!("{}{}", prefix, sequence);
            if !self.by_external.contains_key(&candidate) {
                return candidate;
            }
        }
    }

    fn mint_internal(&mut self) -> Result<ReferenceId> {
        loop {
            let lowest = self.lowest_internal;
            self.lowest_internal = lowest
                .checked_sub(1)
                .ok_or_else(|| Error::identifiers_exhausted(lowest))?;
            if !self.by_internal.contains_key(&self.lowest_internal) {
                return Ok(self.lowest_internal);
            }
        }
    }
}

impl IdentifierMap {
    /// Create an empty map
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a map preloaded with previously registered pairs
    pub fn with_links(links: &[IdentifierLink]) -> Result<Self> {
        let map = Self::new();
        map.seed(links)?;
        Ok(map)
    }

    /// Register a document id against a reference id
    ///
    /// Re-registering an identical pair is a no-op. A pair that contradicts an
    /// existing binding on either side fails with
    /// [`Error::ConflictingIdentifier`] and leaves the map untouched.
    pub fn register(&self, external: &str, internal: ReferenceId) -> Result<()> {
        let mut state = self.state.write();

        match (
            state.by_external.get(external).copied(),
            state.by_internal.get(&internal),
        ) {
            (Some(bound), _) if bound == internal => Ok(()),
            (Some(bound), _) => Err(Error::conflicting_identifier(
                external,
                internal,
                format!("'{}' is already bound to {}", external, bound),
            )),
            (None, Some(existing)) => Err(Error::conflicting_identifier(
                external,
                internal,
                format!("{} is already bound to '{}'", internal, existing),
            )),
            (None, None) => {
                state.insert(external.to_string(), internal);
                debug!("Registered identifier {} <-> {}", external, internal);
                Ok(())
            }
        }
    }

    /// Look up the reference id bound to a document id
    pub fn resolve_internal(&self, external: &str) -> Option<ReferenceId> {
        self.state.read().by_external.get(external).copied()
    }

    /// Look up the document id bound to a reference id
    pub fn resolve_external(&self, internal: ReferenceId) -> Option<String> {
        self.state.read().by_internal.get(&internal).cloned()
    }

    /// Generate a fresh document id for `prefix` and bind it to a freshly
    /// minted reference id
    pub fn generate_external(&self, prefix: &str) -> Result<(String, ReferenceId)> {
        let mut state = self.state.write();
        let internal = state.mint_internal()?;
        let external = state.next_external(prefix);
        state.insert(external.clone(), internal);

        debug!("Generated identifier {} <-> {}", external, internal);
        Ok((external, internal))
    }

    /// Return the document id bound to `internal`, generating and registering
    /// the next id for `prefix` when there is none yet
    pub fn assign_external(&self, prefix: &str, internal: ReferenceId) -> String {
        let mut state = self.state.write();
        if let Some(existing) = state.by_internal.get(&internal) {
            return existing.clone();
        }

        let external = state.next_external(prefix);
        state.insert(external.clone(), internal);

        debug!("Assigned identifier {} <-> {}", external, internal);
        external
    }

    /// Mint a reference id for a new canonical entity
    ///
    /// Minted ids are negative and strictly decreasing, and never collide with
    /// registered or reserved ids. Fails with [`Error::IdentifiersExhausted`]
    /// once no id is left below the lowest one in use.
    pub fn mint_internal(&self) -> Result<ReferenceId> {
        self.state.write().mint_internal()
    }

    /// Keep minted ids below every id in `ids`
    pub fn reserve_internal<I>(&self, ids: I)
    where
        I: IntoIterator<Item = ReferenceId>,
    {
        let mut state = self.state.write();
        for id in ids {
            state.lowest_internal = state.lowest_internal.min(id);
        }
    }

    /// Preload previously registered pairs
    pub fn seed(&self, links: &[IdentifierLink]) -> Result<()> {
        for link in links {
            self.register(&link.external, link.internal)?;
        }
        Ok(())
    }

    /// Snapshot of every registered pair, ordered by document id
    pub fn links(&self) -> Vec<IdentifierLink> {
        let state = self.state.read();
        let mut links: Vec<IdentifierLink> = state
            .by_external
            .iter()
            .map(|(external, internal)| IdentifierLink::new(external.clone(), *internal))
            .collect();
        links.sort();
        links
    }

    /// Check whether a document id is registered
    pub fn contains_external(&self, external: &str) -> bool {
        self.state.read().by_external.contains_key(external)
    }

    /// Check whether a reference id is registered
    pub fn contains_internal(&self, internal: ReferenceId) -> bool {
        self.state.read().by_internal.contains_key(&internal)
    }

    /// Number of registered pairs
    pub fn len(&self) -> usize {
        self.state.read().by_external.len()
    }

    /// Whether no pair is registered
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
