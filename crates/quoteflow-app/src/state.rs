// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::Arc;

use crate::{ItemField, QuoteState};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ViewKind {
    QuickQuote,
    DetailConfig,
}

impl ViewKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::QuickQuote => "QUICK_QUOTE",
            Self::DetailConfig => "DETAIL_CONFIG",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "QUICK_QUOTE" => Some(Self::QuickQuote),
            "DETAIL_CONFIG" => Some(Self::DetailConfig),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CellRef {
    pub row_index: usize,
    pub column: ItemField,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DriveAccessory {
    Winder,
    Motor,
    Remote,
    Charger,
    Cord,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeeType {
    Delivery,
    Install,
    Removal,
}

impl FeeType {
    pub const fn exclusion_key(self) -> F2Key {
        match self {
            Self::Delivery => F2Key::DeliveryFeeExcluded,
            Self::Install => F2Key::InstallFeeExcluded,
            Self::Removal => F2Key::RemovalFeeExcluded,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct F1State {
    pub remote_1ch_qty: Option<u32>,
    pub remote_16ch_qty: Option<u32>,
    pub dual_combo_qty: Option<u32>,
    pub dual_slim_qty: Option<u32>,
    pub discount_percentage: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum F2ValueKind {
    Count,
    Cents,
    Percentage,
    Flag,
}

/// The closed set of F2 panel keys. Writes can only target these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum F2Key {
    WifiQty,
    DeliveryQty,
    InstallQty,
    RemovalQty,
    MulTimes,
    Discount,
    WifiSum,
    DeliveryFee,
    InstallFee,
    RemovalFee,
    AcceSum,
    EAcceSum,
    SurchargeFee,
    FirstRbPrice,
    DisRbPrice,
    SumPrice,
    RbProfit,
    Gst,
    NetProfit,
    DeliveryFeeExcluded,
    InstallFeeExcluded,
    RemovalFeeExcluded,
}

impl F2Key {
    pub const fn expected_value_kind(self) -> F2ValueKind {
        match self {
            Self::WifiQty | Self::DeliveryQty | Self::InstallQty | Self::RemovalQty => {
                F2ValueKind::Count
            }
            Self::MulTimes | Self::Discount => F2ValueKind::Percentage,
            Self::DeliveryFeeExcluded | Self::InstallFeeExcluded | Self::RemovalFeeExcluded => {
                F2ValueKind::Flag
            }
            Self::WifiSum
            | Self::DeliveryFee
            | Self::InstallFee
            | Self::RemovalFee
            | Self::AcceSum
            | Self::EAcceSum
            | Self::SurchargeFee
            | Self::FirstRbPrice
            | Self::DisRbPrice
            | Self::SumPrice
            | Self::RbProfit
            | Self::Gst
            | Self::NetProfit => F2ValueKind::Cents,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum F2Value {
    Count(u32),
    Cents(Option<i64>),
    Percentage(f64),
    Flag(bool),
}

impl F2Value {
    pub const fn kind(self) -> F2ValueKind {
        match self {
            Self::Count(_) => F2ValueKind::Count,
            Self::Cents(_) => F2ValueKind::Cents,
            Self::Percentage(_) => F2ValueKind::Percentage,
            Self::Flag(_) => F2ValueKind::Flag,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct F2State {
    pub wifi_qty: u32,
    pub delivery_qty: u32,
    pub install_qty: u32,
    pub removal_qty: u32,
    pub mul_times: f64,
    pub discount: f64,
    pub wifi_sum: Option<i64>,
    pub delivery_fee: Option<i64>,
    pub install_fee: Option<i64>,
    pub removal_fee: Option<i64>,
    pub acce_sum: Option<i64>,
    pub e_acce_sum: Option<i64>,
    pub surcharge_fee: Option<i64>,
    pub first_rb_price: Option<i64>,
    pub dis_rb_price: Option<i64>,
    pub sum_price: Option<i64>,
    pub rb_profit: Option<i64>,
    pub gst: Option<i64>,
    pub net_profit: Option<i64>,
    pub delivery_fee_excluded: bool,
    pub install_fee_excluded: bool,
    pub removal_fee_excluded: bool,
}

impl F2State {
    pub fn get(&self, key: F2Key) -> F2Value {
        match key {
            F2Key::WifiQty => F2Value::Count(self.wifi_qty),
            F2Key::DeliveryQty => F2Value::Count(self.delivery_qty),
            F2Key::InstallQty => F2Value::Count(self.install_qty),
            F2Key::RemovalQty => F2Value::Count(self.removal_qty),
            F2Key::MulTimes => F2Value::Percentage(self.mul_times),
            F2Key::Discount => F2Value::Percentage(self.discount),
            F2Key::WifiSum => F2Value::Cents(self.wifi_sum),
            F2Key::DeliveryFee => F2Value::Cents(self.delivery_fee),
            F2Key::InstallFee => F2Value::Cents(self.install_fee),
            F2Key::RemovalFee => F2Value::Cents(self.removal_fee),
            F2Key::AcceSum => F2Value::Cents(self.acce_sum),
            F2Key::EAcceSum => F2Value::Cents(self.e_acce_sum),
            F2Key::SurchargeFee => F2Value::Cents(self.surcharge_fee),
            F2Key::FirstRbPrice => F2Value::Cents(self.first_rb_price),
            F2Key::DisRbPrice => F2Value::Cents(self.dis_rb_price),
            F2Key::SumPrice => F2Value::Cents(self.sum_price),
            F2Key::RbProfit => F2Value::Cents(self.rb_profit),
            F2Key::Gst => F2Value::Cents(self.gst),
            F2Key::NetProfit => F2Value::Cents(self.net_profit),
            F2Key::DeliveryFeeExcluded => F2Value::Flag(self.delivery_fee_excluded),
            F2Key::InstallFeeExcluded => F2Value::Flag(self.install_fee_excluded),
            F2Key::RemovalFeeExcluded => F2Value::Flag(self.removal_fee_excluded),
        }
    }

    /// Writes `value` under `key`. Returns false, leaving the panel
    /// untouched, when the value kind does not match the key.
    pub fn set(&mut self, key: F2Key, value: F2Value) -> bool {
        match (key, value) {
            (F2Key::WifiQty, F2Value::Count(qty)) => self.wifi_qty = qty,
            (F2Key::DeliveryQty, F2Value::Count(qty)) => self.delivery_qty = qty,
            (F2Key::InstallQty, F2Value::Count(qty)) => self.install_qty = qty,
            (F2Key::RemovalQty, F2Value::Count(qty)) => self.removal_qty = qty,
            (F2Key::MulTimes, F2Value::Percentage(pct)) => self.mul_times = pct,
            (F2Key::Discount, F2Value::Percentage(pct)) => self.discount = pct,
            (F2Key::WifiSum, F2Value::Cents(cents)) => self.wifi_sum = cents,
            (F2Key::DeliveryFee, F2Value::Cents(cents)) => self.delivery_fee = cents,
            (F2Key::InstallFee, F2Value::Cents(cents)) => self.install_fee = cents,
            (F2Key::RemovalFee, F2Value::Cents(cents)) => self.removal_fee = cents,
            (F2Key::AcceSum, F2Value::Cents(cents)) => self.acce_sum = cents,
            (F2Key::EAcceSum, F2Value::Cents(cents)) => self.e_acce_sum = cents,
            (F2Key::SurchargeFee, F2Value::Cents(cents)) => self.surcharge_fee = cents,
            (F2Key::FirstRbPrice, F2Value::Cents(cents)) => self.first_rb_price = cents,
            (F2Key::DisRbPrice, F2Value::Cents(cents)) => self.dis_rb_price = cents,
            (F2Key::SumPrice, F2Value::Cents(cents)) => self.sum_price = cents,
            (F2Key::RbProfit, F2Value::Cents(cents)) => self.rb_profit = cents,
            (F2Key::Gst, F2Value::Cents(cents)) => self.gst = cents,
            (F2Key::NetProfit, F2Value::Cents(cents)) => self.net_profit = cents,
            (F2Key::DeliveryFeeExcluded, F2Value::Flag(flag)) => self.delivery_fee_excluded = flag,
            (F2Key::InstallFeeExcluded, F2Value::Flag(flag)) => self.install_fee_excluded = flag,
            (F2Key::RemovalFeeExcluded, F2Value::Flag(flag)) => self.removal_fee_excluded = flag,
            _ => return false,
        }
        true
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UiState {
    pub current_view: ViewKind,
    pub visible_columns: Vec<String>,
    pub active_tab_id: String,

    pub active_cell: CellRef,
    pub input_mode: ItemField,
    pub input_value: String,
    pub active_edit_mode: Option<String>,
    pub target_cell: Option<CellRef>,
    pub location_input_value: String,

    pub selected_row_index: Option<usize>,
    pub is_multi_select_mode: bool,
    pub multi_select_selected_indexes: BTreeSet<usize>,
    pub lf_selected_row_indexes: BTreeSet<usize>,

    pub dual_chain_mode: Option<String>,
    pub dual_chain_input_value: String,
    pub dual_price: Option<i64>,

    pub drive_accessory_mode: Option<String>,
    pub drive_remote_count: u32,
    pub drive_charger_count: u32,
    pub drive_cord_count: u32,
    pub drive_winder_total_price: Option<i64>,
    pub drive_motor_total_price: Option<i64>,
    pub drive_remote_total_price: Option<i64>,
    pub drive_charger_total_price: Option<i64>,
    pub drive_cord_total_price: Option<i64>,
    pub drive_grand_total: Option<i64>,

    pub summary_winder_price: Option<i64>,
    pub summary_motor_price: Option<i64>,
    pub summary_remote_price: Option<i64>,
    pub summary_charger_price: Option<i64>,
    pub summary_cord_price: Option<i64>,
    pub summary_accessories_total: Option<i64>,

    pub f1: F1State,
    pub f2: F2State,
    pub is_sum_outdated: bool,
}

pub const QUICK_QUOTE_COLUMNS: [&str; 5] = ["sequence", "width", "height", "TYPE", "Price"];
pub const DEFAULT_TAB_ID: &str = "k1-tab";

impl Default for UiState {
    fn default() -> Self {
        Self {
            current_view: ViewKind::QuickQuote,
            visible_columns: QUICK_QUOTE_COLUMNS.map(str::to_owned).to_vec(),
            active_tab_id: DEFAULT_TAB_ID.to_owned(),
            active_cell: CellRef {
                row_index: 0,
                column: ItemField::Width,
            },
            input_mode: ItemField::Width,
            input_value: String::new(),
            active_edit_mode: None,
            target_cell: None,
            location_input_value: String::new(),
            selected_row_index: None,
            is_multi_select_mode: false,
            multi_select_selected_indexes: BTreeSet::new(),
            lf_selected_row_indexes: BTreeSet::new(),
            dual_chain_mode: None,
            dual_chain_input_value: String::new(),
            dual_price: None,
            drive_accessory_mode: None,
            drive_remote_count: 0,
            drive_charger_count: 0,
            drive_cord_count: 0,
            drive_winder_total_price: None,
            drive_motor_total_price: None,
            drive_remote_total_price: None,
            drive_charger_total_price: None,
            drive_cord_total_price: None,
            drive_grand_total: None,
            summary_winder_price: None,
            summary_motor_price: None,
            summary_remote_price: None,
            summary_charger_price: None,
            summary_cord_price: None,
            summary_accessories_total: None,
            f1: F1State::default(),
            f2: F2State::default(),
            is_sum_outdated: false,
        }
    }
}

/// The whole state tree. Slices are shared, so an unchanged slice keeps its
/// pointer across dispatches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    pub ui: Arc<UiState>,
    #[serde(rename = "quoteData")]
    pub quote: Arc<QuoteState>,
}

impl AppState {
    pub fn initial() -> Self {
        Self {
            ui: Arc::new(UiState::default()),
            quote: Arc::new(QuoteState::initial()),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::initial()
    }
}
