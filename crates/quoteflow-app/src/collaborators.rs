// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Result, bail};
use std::collections::{BTreeMap, BTreeSet};

use crate::{ItemIdSequence, QuoteState, ROLLER_BLIND, Row};

pub const DEFAULT_HD_WINDER_THRESHOLD_AREA: u64 = 2_000_000;
pub const DEFAULT_FABRIC_TYPE_SEQUENCE: [&str; 3] = ["BO", "BO1", "SN"];

/// Supplies blank rows for one product type.
pub trait ProductStrategy: Send + Sync {
    /// A fresh blank row with a never-before-issued id.
    fn initial_item_data(&self) -> Row;

    /// Called after a quote is loaded so later ids do not collide with it.
    fn reserve_ids(&self, _rows: &[Row]) {}
}

pub trait ProductFactory: Send + Sync {
    fn product_strategy(&self, product_key: &str) -> Option<&dyn ProductStrategy>;

    fn reserve_ids(&self, quote: &QuoteState) {
        for (key, product) in &quote.products {
            if let Some(strategy) = self.product_strategy(key) {
                strategy.reserve_ids(&product.items);
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogicThresholds {
    pub hd_winder_threshold_area: u64,
}

pub trait ConfigProvider: Send + Sync {
    fn logic_thresholds(&self) -> Option<LogicThresholds>;
    fn fabric_type_sequence(&self) -> &[String];
}

/// What a reduction may consult. Borrowed for the duration of one call.
#[derive(Clone, Copy)]
pub struct Collaborators<'a> {
    pub products: &'a dyn ProductFactory,
    pub config: &'a dyn ConfigProvider,
}

impl<'a> Collaborators<'a> {
    pub fn new(products: &'a dyn ProductFactory, config: &'a dyn ConfigProvider) -> Self {
        Self { products, config }
    }
}

impl std::fmt::Debug for Collaborators<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Collaborators")
            .field("thresholds", &self.config.logic_thresholds())
            .field("fabric_types", &self.config.fabric_type_sequence())
            .finish_non_exhaustive()
    }
}

#[derive(Debug)]
pub struct RollerBlindStrategy {
    ids: ItemIdSequence,
}

impl RollerBlindStrategy {
    pub fn new() -> Self {
        Self {
            ids: ItemIdSequence::starting_at(QuoteState::TEMPLATE_ITEM_ID.get() + 1),
        }
    }
}

impl Default for RollerBlindStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl ProductStrategy for RollerBlindStrategy {
    fn initial_item_data(&self) -> Row {
        Row::blank(self.ids.next_id())
    }

    fn reserve_ids(&self, rows: &[Row]) {
        for row in rows {
            self.ids.observe(row.item_id);
        }
    }
}

/// Product key to strategy lookup.
#[derive(Default)]
pub struct Catalog {
    strategies: BTreeMap<String, Box<dyn ProductStrategy>>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn roller_blinds() -> Self {
        Self::new().with_product(ROLLER_BLIND, RollerBlindStrategy::new())
    }

    pub fn with_product(
        mut self,
        key: impl Into<String>,
        strategy: impl ProductStrategy + 'static,
    ) -> Self {
        self.strategies.insert(key.into(), Box::new(strategy));
        self
    }

    pub fn product_keys(&self) -> impl Iterator<Item = &str> {
        self.strategies.keys().map(String::as_str)
    }
}

impl std::fmt::Debug for Catalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Catalog")
            .field("products", &self.strategies.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl ProductFactory for Catalog {
    fn product_strategy(&self, product_key: &str) -> Option<&dyn ProductStrategy> {
        self.strategies.get(product_key).map(|strategy| strategy.as_ref())
    }
}

/// Pricing-logic settings: the auto-HD-winder area and the fabric type cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogicConfig {
    pub hd_winder_threshold_area: u64,
    pub fabric_type_sequence: Vec<String>,
}

impl Default for LogicConfig {
    fn default() -> Self {
        Self {
            hd_winder_threshold_area: DEFAULT_HD_WINDER_THRESHOLD_AREA,
            fabric_type_sequence: DEFAULT_FABRIC_TYPE_SEQUENCE.map(str::to_owned).to_vec(),
        }
    }
}

impl LogicConfig {
    pub fn validate(&self) -> Result<()> {
        if self.hd_winder_threshold_area == 0 {
            bail!("hd winder threshold area must be positive");
        }
        if self.fabric_type_sequence.is_empty() {
            bail!("fabric type sequence is empty; list at least one fabric type code");
        }

        let mut seen = BTreeSet::new();
        for code in &self.fabric_type_sequence {
            if code.trim().is_empty() {
                bail!("fabric type sequence contains a blank code");
            }
            if !seen.insert(code.as_str()) {
                bail!("fabric type {code:?} appears more than once in the sequence");
            }
        }
        Ok(())
    }
}

impl ConfigProvider for LogicConfig {
    fn logic_thresholds(&self) -> Option<LogicThresholds> {
        Some(LogicThresholds {
            hd_winder_threshold_area: self.hd_winder_threshold_area,
        })
    }

    fn fabric_type_sequence(&self) -> &[String] {
        &self.fabric_type_sequence
    }
}
