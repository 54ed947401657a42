// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use quoteflow_app::ui_reducer::reduce_ui;
use quoteflow_app::{
    Action, CellRef, DriveAccessory, F2Key, F2Value, FeeType, ItemField, UiState, ViewKind,
};
use std::collections::BTreeSet;
use std::sync::Arc;

fn apply(state: &Arc<UiState>, action: &Action) -> Arc<UiState> {
    reduce_ui(state, action)
}

#[test]
fn entering_multi_select_seeds_from_selected_row() {
    let state = apply(
        &Arc::new(UiState::default()),
        &Action::SetSelectedRowIndex { row_index: Some(3) },
    );

    let entered = apply(&state, &Action::ToggleMultiSelectMode);
    assert!(entered.is_multi_select_mode);
    assert_eq!(entered.multi_select_selected_indexes, BTreeSet::from([3]));
    assert_eq!(entered.selected_row_index, None);

    let left = apply(&entered, &Action::ToggleMultiSelectMode);
    assert!(!left.is_multi_select_mode);
    assert!(left.multi_select_selected_indexes.is_empty());
}

#[test]
fn entering_multi_select_without_selection_starts_empty() {
    let entered = apply(&Arc::new(UiState::default()), &Action::ToggleMultiSelectMode);
    assert!(entered.is_multi_select_mode);
    assert!(entered.multi_select_selected_indexes.is_empty());
}

#[test]
fn toggling_a_row_twice_restores_the_selection() {
    let original = Arc::new(UiState {
        multi_select_selected_indexes: BTreeSet::from([0, 2]),
        lf_selected_row_indexes: BTreeSet::from([1]),
        ..UiState::default()
    });

    for row_index in [0, 5] {
        let once = apply(&original, &Action::ToggleMultiSelectSelection { row_index });
        let twice = apply(&once, &Action::ToggleMultiSelectSelection { row_index });
        assert_ne!(
            once.multi_select_selected_indexes,
            original.multi_select_selected_indexes
        );
        assert_eq!(
            twice.multi_select_selected_indexes,
            original.multi_select_selected_indexes
        );

        let once = apply(&original, &Action::ToggleLfSelection { row_index });
        let twice = apply(&once, &Action::ToggleLfSelection { row_index });
        assert_eq!(twice.lf_selected_row_indexes, original.lf_selected_row_indexes);
    }
}

#[test]
fn clear_selections() {
    let state = Arc::new(UiState {
        multi_select_selected_indexes: BTreeSet::from([0, 2]),
        lf_selected_row_indexes: BTreeSet::from([1]),
        ..UiState::default()
    });
    let cleared = apply(&state, &Action::ClearMultiSelectSelection);
    let cleared = apply(&cleared, &Action::ClearLfSelection);
    assert!(cleared.multi_select_selected_indexes.is_empty());
    assert!(cleared.lf_selected_row_indexes.is_empty());
}

#[test]
fn active_cell_switches_input_mode() {
    let cell = CellRef {
        row_index: 2,
        column: ItemField::Height,
    };
    let state = apply(&Arc::new(UiState::default()), &Action::SetActiveCell(cell));
    assert_eq!(state.active_cell, cell);
    assert_eq!(state.input_mode, ItemField::Height);
}

#[test]
fn input_buffer_edits() {
    let mut state = Arc::new(UiState::default());
    for key in ["1", "2", "5"] {
        state = apply(
            &state,
            &Action::AppendInputValue {
                key: key.to_owned(),
            },
        );
    }
    assert_eq!(state.input_value, "125");

    state = apply(&state, &Action::DeleteLastInputChar);
    assert_eq!(state.input_value, "12");

    state = apply(&state, &Action::ClearInputValue);
    assert_eq!(state.input_value, "");

    state = apply(
        &state,
        &Action::SetInputValue {
            value: "900".to_owned(),
        },
    );
    assert_eq!(state.input_value, "900");
}

#[test]
fn navigation_fields_are_replaced() {
    let mut state = Arc::new(UiState::default());
    state = apply(
        &state,
        &Action::SetCurrentView {
            view_name: ViewKind::DetailConfig,
        },
    );
    state = apply(
        &state,
        &Action::SetVisibleColumns {
            columns: vec!["sequence".to_owned(), "fabric".to_owned()],
        },
    );
    state = apply(
        &state,
        &Action::SetActiveTab {
            tab_id: "k2-tab".to_owned(),
        },
    );
    assert_eq!(state.current_view, ViewKind::DetailConfig);
    assert_eq!(state.visible_columns, vec!["sequence", "fabric"]);
    assert_eq!(state.active_tab_id, "k2-tab");
}

#[test]
fn accessory_counts_reject_negative_and_drive_components() {
    let state = Arc::new(UiState::default());

    let counted = apply(
        &state,
        &Action::SetDriveAccessoryCount {
            accessory: DriveAccessory::Remote,
            count: 3,
        },
    );
    assert_eq!(counted.drive_remote_count, 3);

    for action in [
        Action::SetDriveAccessoryCount {
            accessory: DriveAccessory::Cord,
            count: -1,
        },
        Action::SetDriveAccessoryCount {
            accessory: DriveAccessory::Motor,
            count: 1,
        },
    ] {
        let next = apply(&counted, &action);
        assert!(Arc::ptr_eq(&counted, &next));
    }
}

#[test]
fn accessory_prices_land_in_matching_slot() {
    let state = apply(
        &Arc::new(UiState::default()),
        &Action::SetDriveAccessoryTotalPrice {
            accessory: DriveAccessory::Charger,
            price: Some(4_500),
        },
    );
    assert_eq!(state.drive_charger_total_price, Some(4_500));
    assert_eq!(state.drive_cord_total_price, None);
}

#[test]
fn f1_distributions_are_stored() {
    let mut state = Arc::new(UiState::default());
    state = apply(&state, &Action::SetF1RemoteDistribution { qty1: 1, qty16: 2 });
    state = apply(
        &state,
        &Action::SetF1DualDistribution {
            combo_qty: 2,
            slim_qty: 0,
        },
    );
    state = apply(&state, &Action::SetF1DiscountPercentage { percentage: 12.5 });
    assert_eq!(state.f1.remote_1ch_qty, Some(1));
    assert_eq!(state.f1.remote_16ch_qty, Some(2));
    assert_eq!(state.f1.dual_combo_qty, Some(2));
    assert_eq!(state.f1.dual_slim_qty, Some(0));
    assert_eq!(state.f1.discount_percentage, 12.5);
}

#[test]
fn f2_writes_need_matching_value_kind() {
    let state = Arc::new(UiState::default());

    let written = apply(
        &state,
        &Action::SetF2Value {
            key: F2Key::DeliveryFee,
            value: F2Value::Cents(Some(8_000)),
        },
    );
    assert_eq!(written.f2.delivery_fee, Some(8_000));

    let mismatched = apply(
        &written,
        &Action::SetF2Value {
            key: F2Key::DeliveryFee,
            value: F2Value::Flag(true),
        },
    );
    assert!(Arc::ptr_eq(&written, &mismatched));
}

#[test]
fn fee_exclusion_toggles() {
    let state = Arc::new(UiState::default());
    let excluded = apply(
        &state,
        &Action::ToggleF2FeeExclusion {
            fee_type: FeeType::Install,
        },
    );
    assert!(excluded.f2.install_fee_excluded);
    assert!(!excluded.f2.delivery_fee_excluded);

    let restored = apply(
        &excluded,
        &Action::ToggleF2FeeExclusion {
            fee_type: FeeType::Install,
        },
    );
    assert_eq!(*restored, *state);
}

#[test]
fn reset_returns_default_state() {
    let mut state = Arc::new(UiState::default());
    for action in [
        Action::SetSumOutdated { is_outdated: true },
        Action::SetSummaryWinderPrice { price: Some(3_000) },
        Action::SetDualPrice { price: Some(1_000) },
        Action::ToggleMultiSelectMode,
    ] {
        state = apply(&state, &action);
    }
    assert_ne!(*state, UiState::default());

    let reset = apply(&state, &Action::ResetUi);
    assert_eq!(*reset, UiState::default());
}

#[test]
fn unknown_action_is_identity() {
    let state = Arc::new(UiState::default());
    let next = apply(&state, &Action::Unknown);
    assert!(Arc::ptr_eq(&state, &next));
}
