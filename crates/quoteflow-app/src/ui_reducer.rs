// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::trace;

use crate::{Action, DriveAccessory, F2Value, UiState};

/// Applies `action` to the interface slice. Plain field replacement; the
/// only guards are the closed F2 schema and drive-accessory counts.
pub fn reduce_ui(state: &Arc<UiState>, action: &Action) -> Arc<UiState> {
    match action {
        Action::SetCurrentView { view_name } => update(state, |ui| ui.current_view = *view_name),
        Action::SetVisibleColumns { columns } => {
            update(state, |ui| ui.visible_columns.clone_from(columns))
        }
        Action::SetActiveTab { tab_id } => update(state, |ui| ui.active_tab_id.clone_from(tab_id)),
        Action::SetActiveCell(cell) => update(state, |ui| {
            ui.active_cell = *cell;
            ui.input_mode = cell.column;
        }),
        Action::SetInputValue { value } => update(state, |ui| ui.input_value.clone_from(value)),
        Action::AppendInputValue { key } => update(state, |ui| ui.input_value.push_str(key)),
        Action::DeleteLastInputChar => update(state, |ui| {
            ui.input_value.pop();
        }),
        Action::ClearInputValue => update(state, |ui| ui.input_value.clear()),
        Action::SetSelectedRowIndex { row_index } => {
            update(state, |ui| ui.selected_row_index = *row_index)
        }
        Action::ToggleMultiSelectMode => update(state, |ui| {
            let entering = !ui.is_multi_select_mode;
            ui.is_multi_select_mode = entering;
            ui.multi_select_selected_indexes = if entering {
                ui.selected_row_index.into_iter().collect()
            } else {
                BTreeSet::new()
            };
            ui.selected_row_index = None;
        }),
        Action::ToggleMultiSelectSelection { row_index } => update(state, |ui| {
            toggle(&mut ui.multi_select_selected_indexes, *row_index);
        }),
        Action::ClearMultiSelectSelection => {
            update(state, |ui| ui.multi_select_selected_indexes.clear())
        }
        Action::SetActiveEditMode { mode } => {
            update(state, |ui| ui.active_edit_mode.clone_from(mode))
        }
        Action::SetTargetCell { cell } => update(state, |ui| ui.target_cell = *cell),
        Action::SetLocationInputValue { value } => {
            update(state, |ui| ui.location_input_value.clone_from(value))
        }
        Action::ToggleLfSelection { row_index } => update(state, |ui| {
            toggle(&mut ui.lf_selected_row_indexes, *row_index);
        }),
        Action::ClearLfSelection => update(state, |ui| ui.lf_selected_row_indexes.clear()),
        Action::SetDualChainMode { mode } => {
            update(state, |ui| ui.dual_chain_mode.clone_from(mode))
        }
        Action::SetDriveAccessoryMode { mode } => {
            update(state, |ui| ui.drive_accessory_mode.clone_from(mode))
        }
        Action::SetDriveAccessoryCount { accessory, count } => {
            let Ok(count) = u32::try_from(*count) else {
                trace!(count, "negative accessory count ignored");
                return Arc::clone(state);
            };
            try_update(state, |ui| {
                let slot = match accessory {
                    DriveAccessory::Remote => &mut ui.drive_remote_count,
                    DriveAccessory::Charger => &mut ui.drive_charger_count,
                    DriveAccessory::Cord => &mut ui.drive_cord_count,
                    DriveAccessory::Winder | DriveAccessory::Motor => return false,
                };
                *slot = count;
                true
            })
        }
        Action::SetDriveAccessoryTotalPrice { accessory, price } => update(state, |ui| {
            let slot = match accessory {
                DriveAccessory::Winder => &mut ui.drive_winder_total_price,
                DriveAccessory::Motor => &mut ui.drive_motor_total_price,
                DriveAccessory::Remote => &mut ui.drive_remote_total_price,
                DriveAccessory::Charger => &mut ui.drive_charger_total_price,
                DriveAccessory::Cord => &mut ui.drive_cord_total_price,
            };
            *slot = *price;
        }),
        Action::SetDriveGrandTotal { price } => update(state, |ui| ui.drive_grand_total = *price),
        Action::SetDualPrice { price } => update(state, |ui| ui.dual_price = *price),
        Action::ClearDualChainInputValue => update(state, |ui| ui.dual_chain_input_value.clear()),
        Action::SetSummaryWinderPrice { price } => {
            update(state, |ui| ui.summary_winder_price = *price)
        }
        Action::SetSummaryMotorPrice { price } => {
            update(state, |ui| ui.summary_motor_price = *price)
        }
        Action::SetSummaryRemotePrice { price } => {
            update(state, |ui| ui.summary_remote_price = *price)
        }
        Action::SetSummaryChargerPrice { price } => {
            update(state, |ui| ui.summary_charger_price = *price)
        }
        Action::SetSummaryCordPrice { price } => {
            update(state, |ui| ui.summary_cord_price = *price)
        }
        Action::SetSummaryAccessoriesTotal { price } => {
            update(state, |ui| ui.summary_accessories_total = *price)
        }
        Action::SetF1RemoteDistribution { qty1, qty16 } => update(state, |ui| {
            ui.f1.remote_1ch_qty = Some(*qty1);
            ui.f1.remote_16ch_qty = Some(*qty16);
        }),
        Action::SetF1DualDistribution {
            combo_qty,
            slim_qty,
        } => update(state, |ui| {
            ui.f1.dual_combo_qty = Some(*combo_qty);
            ui.f1.dual_slim_qty = Some(*slim_qty);
        }),
        Action::SetF1DiscountPercentage { percentage } => {
            update(state, |ui| ui.f1.discount_percentage = *percentage)
        }
        Action::SetF2Value { key, value } => try_update(state, |ui| ui.f2.set(*key, *value)),
        Action::ToggleF2FeeExclusion { fee_type } => try_update(state, |ui| {
            let key = fee_type.exclusion_key();
            let F2Value::Flag(excluded) = ui.f2.get(key) else {
                return false;
            };
            ui.f2.set(key, F2Value::Flag(!excluded))
        }),
        Action::SetSumOutdated { is_outdated } => {
            update(state, |ui| ui.is_sum_outdated = *is_outdated)
        }
        Action::ResetUi => Arc::new(UiState::default()),
        _ => Arc::clone(state),
    }
}

fn update(state: &Arc<UiState>, apply: impl FnOnce(&mut UiState)) -> Arc<UiState> {
    let mut next = UiState::clone(state);
    apply(&mut next);
    Arc::new(next)
}

/// Like [`update`], but `apply` may refuse the write by returning false.
fn try_update(state: &Arc<UiState>, apply: impl FnOnce(&mut UiState) -> bool) -> Arc<UiState> {
    let mut next = UiState::clone(state);
    if apply(&mut next) {
        Arc::new(next)
    } else {
        Arc::clone(state)
    }
}

fn toggle(set: &mut BTreeSet<usize>, index: usize) {
    if !set.remove(&index) {
        set.insert(index);
    }
}
