// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use crate::ids::ItemId;

pub const ROLLER_BLIND: &str = "rollerBlind";
pub const HD_WINDER: &str = "HD";
pub const DUAL_BRACKET: &str = "D";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldKind {
    Dimension,
    Cents,
    Text,
}

/// Every addressable column of a quote row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ItemField {
    Width,
    Height,
    FabricType,
    Fabric,
    Color,
    Location,
    Winder,
    Motor,
    Chain,
    Dual,
    Over,
    Oi,
    Lr,
    LinePrice,
}

impl ItemField {
    pub const ALL: [Self; 14] = [
        Self::Width,
        Self::Height,
        Self::FabricType,
        Self::Fabric,
        Self::Color,
        Self::Location,
        Self::Winder,
        Self::Motor,
        Self::Chain,
        Self::Dual,
        Self::Over,
        Self::Oi,
        Self::Lr,
        Self::LinePrice,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Width => "width",
            Self::Height => "height",
            Self::FabricType => "fabricType",
            Self::Fabric => "fabric",
            Self::Color => "color",
            Self::Location => "location",
            Self::Winder => "winder",
            Self::Motor => "motor",
            Self::Chain => "chain",
            Self::Dual => "dual",
            Self::Over => "over",
            Self::Oi => "oi",
            Self::Lr => "lr",
            Self::LinePrice => "linePrice",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.as_str() == value)
    }

    pub const fn expected_kind(self) -> FieldKind {
        match self {
            Self::Width | Self::Height => FieldKind::Dimension,
            Self::LinePrice => FieldKind::Cents,
            Self::FabricType
            | Self::Fabric
            | Self::Color
            | Self::Location
            | Self::Winder
            | Self::Motor
            | Self::Chain
            | Self::Dual
            | Self::Over
            | Self::Oi
            | Self::Lr => FieldKind::Text,
        }
    }

    /// Fixed value cycle for the K3 toggle columns; `None` for everything else.
    pub const fn cycle_sequence(self) -> Option<&'static [&'static str]> {
        match self {
            Self::Over => Some(&["O", ""]),
            Self::Oi => Some(&["IN", "OUT"]),
            Self::Lr => Some(&["L", "R"]),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Number(i64),
    Text(String),
    Empty,
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        Self::Number(value)
    }
}

impl From<u32> for FieldValue {
    fn from(value: u32) -> Self {
        Self::Number(i64::from(value))
    }
}

/// One quote line. Dimensions are millimetres, prices are cents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Row {
    pub item_id: ItemId,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
    #[serde(default)]
    pub fabric_type: String,
    #[serde(default)]
    pub fabric: String,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub winder: String,
    #[serde(default)]
    pub motor: String,
    #[serde(default)]
    pub chain: String,
    #[serde(default)]
    pub dual: String,
    #[serde(default)]
    pub over: String,
    #[serde(default)]
    pub oi: String,
    #[serde(default)]
    pub lr: String,
    #[serde(default)]
    pub line_price: Option<i64>,
}

impl Row {
    pub fn blank(item_id: ItemId) -> Self {
        Self {
            item_id,
            width: None,
            height: None,
            fabric_type: String::new(),
            fabric: String::new(),
            color: String::new(),
            location: String::new(),
            winder: String::new(),
            motor: String::new(),
            chain: String::new(),
            dual: String::new(),
            over: String::new(),
            oi: String::new(),
            lr: String::new(),
            line_price: None,
        }
    }

    /// True when either dimension has been entered.
    pub fn has_dimension(&self) -> bool {
        self.width.is_some_and(|w| w > 0) || self.height.is_some_and(|h| h > 0)
    }

    pub fn has_both_dimensions(&self) -> bool {
        self.width.is_some_and(|w| w > 0) && self.height.is_some_and(|h| h > 0)
    }

    pub fn is_blank(&self) -> bool {
        !self.has_dimension() && self.fabric_type.is_empty()
    }

    /// Width times height in square millimetres, when both are set.
    pub fn area(&self) -> Option<u64> {
        match (self.width, self.height) {
            (Some(w), Some(h)) if w > 0 && h > 0 => Some(u64::from(w) * u64::from(h)),
            _ => None,
        }
    }

    pub fn field(&self, field: ItemField) -> FieldValue {
        let number = |value: Option<i64>| value.map_or(FieldValue::Empty, FieldValue::Number);
        match field {
            ItemField::Width => number(self.width.map(i64::from)),
            ItemField::Height => number(self.height.map(i64::from)),
            ItemField::LinePrice => number(self.line_price),
            text => FieldValue::Text(self.text(text).to_owned()),
        }
    }

    fn text(&self, field: ItemField) -> &str {
        match field {
            ItemField::FabricType => &self.fabric_type,
            ItemField::Fabric => &self.fabric,
            ItemField::Color => &self.color,
            ItemField::Location => &self.location,
            ItemField::Winder => &self.winder,
            ItemField::Motor => &self.motor,
            ItemField::Chain => &self.chain,
            ItemField::Dual => &self.dual,
            ItemField::Over => &self.over,
            ItemField::Oi => &self.oi,
            ItemField::Lr => &self.lr,
            ItemField::Width | ItemField::Height | ItemField::LinePrice => "",
        }
    }

    fn text_mut(&mut self, field: ItemField) -> Option<&mut String> {
        match field {
            ItemField::FabricType => Some(&mut self.fabric_type),
            ItemField::Fabric => Some(&mut self.fabric),
            ItemField::Color => Some(&mut self.color),
            ItemField::Location => Some(&mut self.location),
            ItemField::Winder => Some(&mut self.winder),
            ItemField::Motor => Some(&mut self.motor),
            ItemField::Chain => Some(&mut self.chain),
            ItemField::Dual => Some(&mut self.dual),
            ItemField::Over => Some(&mut self.over),
            ItemField::Oi => Some(&mut self.oi),
            ItemField::Lr => Some(&mut self.lr),
            ItemField::Width | ItemField::Height | ItemField::LinePrice => None,
        }
    }

    /// Returns a copy with one field replaced, or `None` when the value does
    /// not fit the field's kind. A fabric type change goes through
    /// [`Row::with_fabric_type`] so dependent fields are invalidated.
    pub fn with_field(&self, field: ItemField, value: &FieldValue) -> Option<Self> {
        if field == ItemField::FabricType {
            let code = match value {
                FieldValue::Text(code) => code.as_str(),
                FieldValue::Empty => "",
                FieldValue::Number(_) => return None,
            };
            if code == self.fabric_type {
                return Some(self.clone());
            }
            return Some(self.with_fabric_type(code));
        }

        let mut next = self.clone();
        match (field.expected_kind(), value) {
            (FieldKind::Dimension, FieldValue::Number(raw)) => {
                let mm = u32::try_from(*raw).ok()?;
                *next.dimension_mut(field)? = (mm > 0).then_some(mm);
            }
            (FieldKind::Dimension, FieldValue::Empty) => {
                *next.dimension_mut(field)? = None;
            }
            (FieldKind::Cents, FieldValue::Number(cents)) => next.line_price = Some(*cents),
            (FieldKind::Cents, FieldValue::Empty) => next.line_price = None,
            (FieldKind::Text, FieldValue::Text(text)) => text.clone_into(next.text_mut(field)?),
            (FieldKind::Text, FieldValue::Empty) => next.text_mut(field)?.clear(),
            _ => return None,
        }
        Some(next)
    }

    fn dimension_mut(&mut self, field: ItemField) -> Option<&mut Option<u32>> {
        match field {
            ItemField::Width => Some(&mut self.width),
            ItemField::Height => Some(&mut self.height),
            _ => None,
        }
    }

    /// A type change voids the price and the fabric picked for the old type.
    pub fn with_fabric_type(&self, code: &str) -> Self {
        Self {
            fabric_type: code.to_owned(),
            line_price: None,
            fabric: String::new(),
            color: String::new(),
            ..self.clone()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessoryLine {
    pub count: u32,
    pub price: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSummary {
    #[serde(default)]
    pub total_sum: Option<i64>,
    #[serde(default)]
    pub accessories: BTreeMap<String, AccessoryLine>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductData {
    pub items: Vec<Row>,
    #[serde(default)]
    pub summary: ProductSummary,
}

impl ProductData {
    pub fn with_first_row(row: Row) -> Self {
        Self {
            items: vec![row],
            summary: ProductSummary::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteUiMetadata {
    #[serde(default)]
    pub lf_modified_row_indexes: BTreeSet<usize>,
}

/// F1 panel values captured into the quote when it is saved or exported.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct F1Snapshot {
    pub remote_1ch_qty: Option<u32>,
    pub remote_16ch_qty: Option<u32>,
    pub dual_combo_qty: Option<u32>,
    pub dual_slim_qty: Option<u32>,
    pub discount_percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteState {
    pub current_product: String,
    pub products: BTreeMap<String, Arc<ProductData>>,
    #[serde(default)]
    pub ui_metadata: QuoteUiMetadata,
    #[serde(default)]
    pub f1_snapshot: F1Snapshot,
}

impl QuoteState {
    pub const TEMPLATE_ITEM_ID: ItemId = ItemId::new(1);

    /// The quote every session starts from and every reset returns to.
    pub fn initial() -> Self {
        let mut products = BTreeMap::new();
        products.insert(
            ROLLER_BLIND.to_owned(),
            Arc::new(ProductData::with_first_row(Row::blank(
                Self::TEMPLATE_ITEM_ID,
            ))),
        );
        Self {
            current_product: ROLLER_BLIND.to_owned(),
            products,
            ui_metadata: QuoteUiMetadata::default(),
            f1_snapshot: F1Snapshot::default(),
        }
    }

    pub fn active_product(&self) -> Option<&Arc<ProductData>> {
        self.products.get(&self.current_product)
    }

    pub fn active_items(&self) -> &[Row] {
        self.active_product()
            .map_or(&[], |product| product.items.as_slice())
    }

    /// Whether the active product holds anything a user typed in. Loading
    /// over such a quote should be confirmed first.
    pub fn has_entered_items(&self) -> bool {
        match self.active_items() {
            [] => false,
            [only] => only.has_dimension(),
            _ => true,
        }
    }

    pub fn with_f1_snapshot(&self, f1: &crate::F1State) -> Self {
        Self {
            f1_snapshot: F1Snapshot {
                remote_1ch_qty: f1.remote_1ch_qty,
                remote_16ch_qty: f1.remote_16ch_qty,
                dual_combo_qty: f1.dual_combo_qty,
                dual_slim_qty: f1.dual_slim_qty,
                discount_percentage: f1.discount_percentage,
            },
            ..self.clone()
        }
    }
}
