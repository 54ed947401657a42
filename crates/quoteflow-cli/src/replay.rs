// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use quoteflow_app::{Action, Catalog, LogicConfig, RootReducer, Store};
use std::fs;
use std::path::Path;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReplaySummary {
    pub applied: usize,
    pub changed: usize,
    pub unknown: usize,
}

pub fn read_actions(path: &Path) -> Result<Vec<Action>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("read action script {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| {
        format!(
            "decode action script {}; expected a JSON array of {{\"type\", \"payload\"}} objects",
            path.display()
        )
    })
}

/// Applies `actions` in order to a fresh store built from `logic`.
pub fn replay(actions: &[Action], logic: LogicConfig) -> (Store, ReplaySummary) {
    let mut store = Store::new(RootReducer::new(Catalog::roller_blinds(), logic));
    let mut summary = ReplaySummary::default();
    for (position, action) in actions.iter().enumerate() {
        if matches!(action, Action::Unknown) {
            warn!(position, "skipping action with unrecognized type");
            summary.unknown += 1;
        }
        if store.dispatch(action) {
            summary.changed += 1;
        }
        summary.applied += 1;
    }
    info!(
        applied = summary.applied,
        changed = summary.changed,
        unknown = summary.unknown,
        "replay finished"
    );
    (store, summary)
}

pub fn render_state(store: &Store) -> Result<String> {
    serde_json::to_string_pretty(store.state().as_ref()).context("encode final state as JSON")
}
