//! Shared fixtures for service tests

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use forum_core::{ActivitySlot, User};
use forum_db::MemoryStore;
use forum_service::{FixedClock, ServiceContext, ServiceContextBuilder, ServiceSettings};

pub struct Harness {
    pub store: MemoryStore,
    pub clock: Arc<FixedClock>,
    pub ctx: ServiceContext,
}

pub fn slot(raw: u16) -> ActivitySlot {
    ActivitySlot::new(raw).unwrap()
}

pub fn harness_at(now: u16) -> Harness {
    harness_with(now, ServiceSettings::default())
}

pub fn harness_with(now: u16, settings: ServiceSettings) -> Harness {
    let store = MemoryStore::new();
    let clock = Arc::new(FixedClock::new(slot(now)));
    let ctx = ServiceContextBuilder::new()
        .store(store.clone())
        .clock(clock.clone())
        .settings(settings)
        .build()
        .unwrap();
    Harness { store, clock, ctx }
}

pub fn short_timeout() -> ServiceSettings {
    ServiceSettings {
        store_timeout: Duration::from_millis(20),
        ..ServiceSettings::default()
    }
}

impl Harness {
    pub fn user(&self, name: &str) -> User {
        self.store
            .add_user(name, &format!("{name}@example.com"), "not-a-real-hash")
    }
}
