// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicI64, Ordering};

macro_rules! entity_id {
    ($name:ident) => {
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            pub const fn new(value: i64) -> Self {
                Self(value)
            }

            pub const fn get(self) -> i64 {
                self.0
            }
        }

        impl From<i64> for $name {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }
    };
}

entity_id!(ItemId);

/// Hands out monotonically increasing item ids. Shared by reference, so the
/// counter is atomic rather than requiring `&mut` access from reducers.
#[derive(Debug)]
pub struct ItemIdSequence {
    next: AtomicI64,
}

impl ItemIdSequence {
    pub const fn starting_at(first: i64) -> Self {
        Self {
            next: AtomicI64::new(first),
        }
    }

    pub fn next_id(&self) -> ItemId {
        ItemId::new(self.next.fetch_add(1, Ordering::Relaxed))
    }

    /// Moves the counter past `id` so freshly loaded quotes do not collide
    /// with rows created afterwards.
    pub fn observe(&self, id: ItemId) {
        self.next.fetch_max(id.get() + 1, Ordering::Relaxed);
    }
}
