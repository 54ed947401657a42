// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Result, ensure};
use quoteflow_app::items::satisfies_tail_invariant;
use quoteflow_app::{
    Action, Catalog, Collaborators, DriveComponent, FieldValue, ItemField, ItemId, LogicConfig,
    QuoteState, ROLLER_BLIND, RootReducer, Row, Store,
};
use std::collections::BTreeSet;
use std::sync::Arc;

const FABRIC_TYPES: [&str; 3] = ["BO", "BO1", "SN"];
const LOCATIONS: [&str; 10] = [
    "Lounge", "Kitchen", "Dining", "Bed 1", "Bed 2", "Bed 3", "Study", "Laundry", "Ensuite",
    "Hallway",
];
const FABRICS: [&str; 6] = ["Sanctuary", "Linesque", "Kleenscreen", "Vibe", "Focus", "Haven"];
const COLORS: [&str; 6] = ["White", "Chalk", "Charcoal", "Sand", "Pebble", "Night"];
const MOTORS: [&str; 2] = ["M1", "M2"];

/// Owns the collaborators a reduction borrows.
#[derive(Debug)]
pub struct Fixture {
    pub catalog: Catalog,
    pub config: LogicConfig,
}

impl Fixture {
    pub fn new() -> Self {
        Self::with_config(LogicConfig::default())
    }

    pub fn with_config(config: LogicConfig) -> Self {
        Self {
            catalog: Catalog::roller_blinds(),
            config,
        }
    }

    pub fn deps(&self) -> Collaborators<'_> {
        Collaborators::new(&self.catalog, &self.config)
    }
}

impl Default for Fixture {
    fn default() -> Self {
        Self::new()
    }
}

pub fn store() -> Store {
    Store::new(RootReducer::new(Catalog::roller_blinds(), LogicConfig::default()))
}

pub fn blank_row(id: i64) -> Row {
    Row::blank(ItemId::new(id))
}

pub fn sized_row(id: i64, width: u32, height: u32) -> Row {
    Row {
        width: Some(width),
        height: Some(height),
        ..blank_row(id)
    }
}

pub fn typed_row(id: i64, width: u32, height: u32, fabric_type: &str) -> Row {
    Row {
        fabric_type: fabric_type.to_owned(),
        ..sized_row(id, width, height)
    }
}

/// The initial quote with its roller-blind rows replaced by `rows`.
pub fn quote_with_rows(rows: Vec<Row>) -> Arc<QuoteState> {
    let mut quote = QuoteState::initial();
    if let Some(product) = quote.products.get_mut(ROLLER_BLIND) {
        Arc::make_mut(product).items = rows;
    }
    Arc::new(quote)
}

pub fn check_tail_invariant(quote: &QuoteState) -> Result<()> {
    let items = quote.active_items();
    ensure!(
        satisfies_tail_invariant(items),
        "row list breaks the blank-tail shape: {:?}",
        items
            .iter()
            .map(|row| (row.item_id.get(), row.width, row.height))
            .collect::<Vec<_>>()
    );
    Ok(())
}

/// Actions that type a width and height into row `row_index`.
pub fn enter_size(row_index: usize, width: u32, height: u32) -> [Action; 2] {
    [
        Action::UpdateItemValue {
            row_index,
            column: ItemField::Width,
            value: FieldValue::from(width),
        },
        Action::UpdateItemValue {
            row_index,
            column: ItemField::Height,
            value: FieldValue::from(height),
        },
    ]
}

/// Seeded source for `QuoteFaker`. Same seed, same session.
#[derive(Debug, Clone)]
struct SessionRng {
    state: u64,
}

impl SessionRng {
    fn new(seed: u64) -> Self {
        let mut state = seed ^ 0x9E37_79B9_7F4A_7C15;
        if state == 0 {
            state = 0xA409_3822_299F_31D0;
        }
        Self { state }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self
            .state
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);

        let mut x = self.state;
        x ^= x >> 13;
        x ^= x << 7;
        x ^= x >> 17;
        x
    }

    /// Uniform index in `0..n`; zero for empty or single-element ranges.
    fn below(&mut self, n: usize) -> usize {
        match n {
            0 | 1 => 0,
            _ => (self.next_u64() % n as u64) as usize,
        }
    }

    fn coin(&mut self) -> bool {
        self.next_u64() & 1 == 1
    }

    fn choose<T: Copy>(&mut self, options: &[T]) -> T {
        options[self.below(options.len())]
    }

    /// A length in `min..=max` millimetres on a 10 mm grid.
    fn millimetres(&mut self, min: u32, max: u32) -> u32 {
        let steps = ((max - min) / 10) as usize + 1;
        min + self.below(steps) as u32 * 10
    }
}

/// Seeded generator of plausible rows and edit sessions.
#[derive(Debug, Clone)]
pub struct QuoteFaker {
    rng: SessionRng,
}

impl QuoteFaker {
    pub fn new(seed: u64) -> Self {
        let normalized = if seed == 0 { 1 } else { seed };
        Self {
            rng: SessionRng::new(normalized),
        }
    }

    /// A filled-in row: dimensions in 10 mm steps, a fabric type and a room.
    pub fn row(&mut self, id: i64) -> Row {
        let width = self.rng.millimetres(400, 3000);
        let height = self.rng.millimetres(400, 3200);
        let mut row = typed_row(id, width, height, self.rng.choose(&FABRIC_TYPES));
        row.location = self.rng.choose(&LOCATIONS).to_owned();
        if self.rng.coin() {
            row.fabric = self.rng.choose(&FABRICS).to_owned();
            row.color = self.rng.choose(&COLORS).to_owned();
        }
        row
    }

    /// `count` filled rows followed by the blank tail row.
    pub fn quote(&mut self, count: usize) -> Arc<QuoteState> {
        let mut rows: Vec<Row> = (0..count)
            .map(|offset| self.row(offset as i64 + 1))
            .collect();
        rows.push(blank_row(count as i64 + 1));
        quote_with_rows(rows)
    }

    /// A quote action aimed at a row index up to one past `row_count`, so
    /// out-of-range edits turn up too.
    pub fn action(&mut self, row_count: usize) -> Action {
        let row_index = self.rng.below(row_count + 1);
        match self.rng.below(12) {
            0 => Action::UpdateItemValue {
                row_index,
                column: ItemField::Width,
                value: FieldValue::from(self.rng.millimetres(0, 3000)),
            },
            1 => Action::UpdateItemValue {
                row_index,
                column: ItemField::Height,
                value: FieldValue::from(self.rng.millimetres(0, 3200)),
            },
            2 => Action::InsertRow {
                selected_index: row_index,
            },
            3 => Action::DeleteRow {
                selected_index: row_index,
            },
            4 => Action::ClearRow {
                selected_index: row_index,
            },
            5 => Action::CycleItemType { row_index },
            6 => Action::SetItemType {
                row_index,
                new_type: self.rng.choose(&FABRIC_TYPES).to_owned(),
            },
            7 => Action::CycleK3Property {
                row_index,
                column: self.rng.choose(&[ItemField::Over, ItemField::Oi, ItemField::Lr]),
            },
            8 => Action::UpdateWinderMotorProperty {
                row_index,
                property: if self.rng.coin() {
                    DriveComponent::Winder
                } else {
                    DriveComponent::Motor
                },
                value: self.rng.choose(&MOTORS).to_owned(),
            },
            9 => Action::BatchUpdateFabricType {
                new_type: self.rng.coin().then(|| self.rng.choose(&FABRIC_TYPES).to_owned()),
            },
            10 => Action::BatchUpdateLfProperties {
                row_indexes: BTreeSet::from([row_index]),
                fabric_name: self.rng.choose(&FABRICS).to_owned(),
                fabric_color: self.rng.choose(&COLORS).to_owned(),
            },
            _ => Action::UpdateItemProperty {
                row_index,
                property: ItemField::Location,
                value: FieldValue::from(self.rng.choose(&LOCATIONS)),
            },
        }
    }
}
