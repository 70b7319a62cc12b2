//! Shared test utilities and fixtures for identifier map tests

use super::{IdentifierLink, IdentifierMap};


/// Create a map holding a grower, a farm and a field binding
pub fn create_seeded_map() -> IdentifierMap {
    IdentifierMap::with_links(&[
        IdentifierLink::new("CTR1", 10),
        IdentifierLink::new("FRM1", 20),
        IdentifierLink::new("PFD1", 30),
    ])
    .unwrap()
}
