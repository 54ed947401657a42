// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

//! Quantities and totals behind the F1 cost panel.
//!
//! Nothing here touches state. The distribution helpers check user input and
//! hand back the action to dispatch.

use anyhow::{Result, bail};

use crate::{Action, DUAL_BRACKET, HD_WINDER, QuoteState, Row, UiState};

const GST_RATE_PERCENT: i64 = 10;

pub fn hd_winder_count(items: &[Row]) -> u32 {
    count_rows(items, |row| row.winder == HD_WINDER)
}

pub fn motor_count(items: &[Row]) -> u32 {
    count_rows(items, |row| !row.motor.is_empty())
}

/// Dual brackets are sold in pairs; an odd one out does not count.
pub fn dual_pair_count(items: &[Row]) -> u32 {
    count_rows(items, |row| row.dual == DUAL_BRACKET) / 2
}

fn count_rows(items: &[Row], keep: impl Fn(&Row) -> bool) -> u32 {
    let count = items.iter().filter(|row| keep(row)).count();
    u32::try_from(count).unwrap_or(u32::MAX)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemoteSplit {
    pub one_channel: u32,
    pub sixteen_channel: u32,
}

impl RemoteSplit {
    /// Until the panel is edited every remote is a 16-channel one.
    pub fn effective(ui: &UiState) -> Self {
        let total = ui.drive_remote_count;
        match ui.f1.remote_1ch_qty {
            None => Self {
                one_channel: 0,
                sixteen_channel: total,
            },
            Some(one_channel) => Self {
                one_channel,
                sixteen_channel: total.saturating_sub(one_channel),
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DualSplit {
    pub combo: u32,
    pub slim: u32,
}

impl DualSplit {
    /// Until the panel is edited every pair is a combo bracket.
    pub fn effective(quote: &QuoteState, ui: &UiState) -> Self {
        Self {
            combo: ui
                .f1
                .dual_combo_qty
                .unwrap_or_else(|| dual_pair_count(quote.active_items())),
            slim: ui.f1.dual_slim_qty.unwrap_or(0),
        }
    }
}

pub fn remote_distribution_action(ui: &UiState, qty1: i64, qty16: i64) -> Result<Action> {
    let (qty1, qty16) = checked_split(qty1, qty16, ui.drive_remote_count)?;
    Ok(Action::SetF1RemoteDistribution { qty1, qty16 })
}

pub fn dual_distribution_action(
    quote: &QuoteState,
    ui: &UiState,
    combo: i64,
    slim: i64,
) -> Result<Action> {
    let total = dual_pair_count(quote.active_items());
    let (combo_qty, slim_qty) = checked_split(combo, slim, total)?;
    Ok(Action::SetF1DualDistribution {
        combo_qty,
        slim_qty,
    })
}

fn checked_split(first: i64, second: i64, total: u32) -> Result<(u32, u32)> {
    let (Ok(first), Ok(second)) = (u32::try_from(first), u32::try_from(second)) else {
        bail!("quantities must be positive numbers");
    };
    let sum = u64::from(first) + u64::from(second);
    if sum != u64::from(total) {
        bail!("total must equal {total}; current total: {sum}");
    }
    Ok((first, second))
}

/// Panel totals in cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct F1Totals {
    pub rb_price: i64,
    pub sub_total: i64,
    pub gst: i64,
    pub final_total: i64,
}

impl F1Totals {
    /// `retail_total` is the blinds' list price; `discount_percentage`
    /// comes off it before the component total is added and GST applied.
    pub fn compute(component_total: i64, retail_total: i64, discount_percentage: f64) -> Self {
        let rb_price = (retail_total as f64 * (1.0 - discount_percentage / 100.0)).round() as i64;
        let sub_total = component_total + rb_price;
        let gst = (sub_total as f64 * GST_RATE_PERCENT as f64 / 100.0).round() as i64;
        Self {
            rb_price,
            sub_total,
            gst,
            final_total: sub_total + gst,
        }
    }
}
