// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use std::sync::Arc;
use tracing::debug;

use crate::quote_reducer::reduce_quote;
use crate::ui_reducer::reduce_ui;
use crate::{Action, AppState, Collaborators, ConfigProvider, ProductFactory, QuoteState};

/// Routes `action` to both slices. When neither slice changes the input
/// `Arc` comes back untouched, so callers can skip work with `Arc::ptr_eq`.
pub fn reduce(state: &Arc<AppState>, action: &Action, deps: Collaborators<'_>) -> Arc<AppState> {
    let ui = reduce_ui(&state.ui, action);
    let quote = reduce_quote(&state.quote, action, deps);

    if Arc::ptr_eq(&ui, &state.ui) && Arc::ptr_eq(&quote, &state.quote) {
        return Arc::clone(state);
    }
    Arc::new(AppState { ui, quote })
}

/// Owns the collaborators a reduction needs.
pub struct RootReducer {
    products: Box<dyn ProductFactory>,
    config: Box<dyn ConfigProvider>,
}

impl RootReducer {
    pub fn new(
        products: impl ProductFactory + 'static,
        config: impl ConfigProvider + 'static,
    ) -> Self {
        Self {
            products: Box::new(products),
            config: Box::new(config),
        }
    }

    pub fn collaborators(&self) -> Collaborators<'_> {
        Collaborators::new(self.products.as_ref(), self.config.as_ref())
    }

    pub fn reduce(&self, state: &Arc<AppState>, action: &Action) -> Arc<AppState> {
        reduce(state, action, self.collaborators())
    }
}

impl std::fmt::Debug for RootReducer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RootReducer")
            .field("collaborators", &self.collaborators())
            .finish()
    }
}

/// Holds the current state and applies actions to it in order.
#[derive(Debug)]
pub struct Store {
    state: Arc<AppState>,
    reducer: RootReducer,
}

impl Store {
    pub fn new(reducer: RootReducer) -> Self {
        Self::with_state(reducer, Arc::new(AppState::initial()))
    }

    pub fn with_state(reducer: RootReducer, state: Arc<AppState>) -> Self {
        Self { state, reducer }
    }

    pub fn state(&self) -> &Arc<AppState> {
        &self.state
    }

    /// Applies one action and reports whether the state changed.
    pub fn dispatch(&mut self, action: &Action) -> bool {
        let next = self.reducer.reduce(&self.state, action);
        let changed = !Arc::ptr_eq(&next, &self.state);
        debug!(action = action.name(), changed, "dispatched");
        self.state = next;
        changed
    }

    /// Replaces the quote with a loaded one. The interface starts over and
    /// the totals are marked stale until recalculated.
    pub fn load_quote(&mut self, quote: Arc<QuoteState>) {
        self.dispatch(&Action::SetQuoteData {
            new_quote_data: quote,
        });
        self.dispatch(&Action::ResetUi);
        self.dispatch(&Action::SetSumOutdated { is_outdated: true });
    }

    pub fn reset_all(&mut self) {
        self.dispatch(&Action::ResetQuoteData);
        self.dispatch(&Action::ResetUi);
    }
}
