#![allow(dead_code)]

use ideapile::config::{PileConfig, ServiceConfig};
use ideapile::pile::IdeaPile;
use ideapile::store::IdeaStore;

/// Fresh in-memory store with schema and migrations applied.
pub fn test_store() -> IdeaStore {
    IdeaStore::open_in_memory().unwrap()
}

/// Fresh in-memory pile with default (unconfigured) service settings.
pub fn test_pile() -> IdeaPile {
    IdeaPile::open_in_memory(&PileConfig::default()).unwrap()
}

/// Service config pointing at a port nothing listens on, so every call
/// fails fast with a transport error.
pub fn unreachable_service() -> ServiceConfig {
    ServiceConfig {
        api_key: Some("sk-test".into()),
        base_url: "http://127.0.0.1:9".into(),
        timeout_secs: 2,
        ..ServiceConfig::default()
    }
}
