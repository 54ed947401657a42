// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use tracing::{trace, warn};

use crate::items::consolidate_empty_rows;
use crate::{
    AccessoryLine, Action, Collaborators, DriveComponent, FieldValue, HD_WINDER, ItemField,
    ProductData, ProductStrategy, QuoteState, Row,
};

/// Applies `action` to the quote slice. Returns `state` itself (same `Arc`)
/// when the action is not a quote action or changes nothing.
pub fn reduce_quote(
    state: &Arc<QuoteState>,
    action: &Action,
    deps: Collaborators<'_>,
) -> Arc<QuoteState> {
    match action {
        Action::SetQuoteData { new_quote_data } => {
            deps.products.reserve_ids(new_quote_data);
            Arc::clone(new_quote_data)
        }
        Action::ResetQuoteData => Arc::new(QuoteState::initial()),
        Action::InsertRow { selected_index } => insert_row(state, deps, *selected_index),
        Action::DeleteRow { selected_index } => delete_row(state, deps, *selected_index),
        Action::ClearRow { selected_index } => clear_row(state, deps, *selected_index),
        Action::UpdateItemValue {
            row_index,
            column,
            value,
        } => update_item_value(state, deps, *row_index, *column, value),
        Action::BatchUpdateProperty { property, value } => {
            commit_items(state, deps, |items, _| {
                let backup = items.len().saturating_sub(1);
                items
                    .iter()
                    .enumerate()
                    .map(|(index, row)| {
                        if index == backup {
                            Some(row.clone())
                        } else {
                            row.with_field(*property, value)
                        }
                    })
                    .collect()
            })
        }
        Action::BatchUpdatePropertyByType {
            fabric_type,
            property,
            value,
            indexes_to_exclude,
        } => commit_items(state, deps, |items, _| {
            items
                .iter()
                .enumerate()
                .map(|(index, row)| {
                    if indexes_to_exclude.contains(&index) || row.fabric_type != *fabric_type {
                        Some(row.clone())
                    } else {
                        row.with_field(*property, value)
                    }
                })
                .collect()
        }),
        Action::UpdateItemProperty {
            row_index,
            property,
            value,
        } => commit_items(state, deps, |items, _| {
            let updated = items.get(*row_index)?.with_field(*property, value)?;
            replace_row(items, *row_index, updated)
        }),
        Action::UpdateWinderMotorProperty {
            row_index,
            property,
            value,
        } => update_winder_motor(state, deps, *row_index, *property, value),
        Action::CycleK3Property { row_index, column } => {
            cycle_column(state, deps, *row_index, *column)
        }
        Action::CycleItemType { row_index } => {
            change_fabric_types(state, deps, TypeChange::Cycle(*row_index))
        }
        Action::SetItemType {
            row_index,
            new_type,
        } => change_fabric_types(state, deps, TypeChange::Set(*row_index, new_type)),
        Action::BatchUpdateFabricType { new_type } => {
            change_fabric_types(state, deps, TypeChange::AllSized(new_type.as_deref()))
        }
        Action::BatchUpdateFabricTypeForSelection {
            selected_indexes,
            new_type,
        } => change_fabric_types(
            state,
            deps,
            TypeChange::Selection(selected_indexes, new_type),
        ),
        Action::BatchUpdateLfProperties {
            row_indexes,
            fabric_name,
            fabric_color,
        } => commit_items(state, deps, |items, _| {
            Some(map_rows(items, |index, row| {
                row_indexes.contains(&index).then(|| Row {
                    fabric: fabric_name.clone(),
                    color: fabric_color.clone(),
                    ..row.clone()
                })
            }))
        }),
        Action::RemoveLfProperties { row_indexes } => commit_items(state, deps, |items, _| {
            Some(map_rows(items, |index, row| {
                row_indexes.contains(&index).then(|| Row {
                    fabric: String::new(),
                    color: String::new(),
                    ..row.clone()
                })
            }))
        }),
        Action::AddLfModifiedRows { row_indexes } => {
            update_lf_modified(state, |tracked| tracked.extend(row_indexes.iter().copied()))
        }
        Action::RemoveLfModifiedRows { row_indexes } => {
            update_lf_modified(state, |tracked| {
                tracked.retain(|index| !row_indexes.contains(index));
            })
        }
        Action::UpdateAccessorySummary { data } => update_accessory_summary(state, data),
        _ => Arc::clone(state),
    }
}

/// Runs a row-list edit against the active product and restores the tail.
///
/// `edit` returns `None` to abandon the action (absent row, value of the
/// wrong kind). Rows whose fabric type differs afterwards are dropped from
/// the linked-fabric tracking set. Structural edits that change the row
/// count leave that set alone.
fn commit_items<F>(state: &Arc<QuoteState>, deps: Collaborators<'_>, edit: F) -> Arc<QuoteState>
where
    F: FnOnce(&[Row], &dyn ProductStrategy) -> Option<Vec<Row>>,
{
    let Some(product) = state.active_product() else {
        warn!(product = %state.current_product, "active product is missing from the quote");
        return Arc::clone(state);
    };
    let Some(strategy) = deps.products.product_strategy(&state.current_product) else {
        warn!(product = %state.current_product, "no product strategy registered");
        return Arc::clone(state);
    };

    let Some(edited) = edit(&product.items, strategy) else {
        return Arc::clone(state);
    };
    if edited == product.items {
        return Arc::clone(state);
    }

    let retyped: Vec<usize> = if edited.len() == product.items.len() {
        product
            .items
            .iter()
            .zip(&edited)
            .enumerate()
            .filter(|(_, (before, after))| before.fabric_type != after.fabric_type)
            .map(|(index, _)| index)
            .collect()
    } else {
        Vec::new()
    };

    let items = consolidate_empty_rows(edited, strategy);
    if items == product.items {
        return Arc::clone(state);
    }

    let mut next = QuoteState::clone(state);
    next.products.insert(
        state.current_product.clone(),
        Arc::new(ProductData {
            items,
            summary: product.summary.clone(),
        }),
    );
    for index in retyped {
        next.ui_metadata.lf_modified_row_indexes.remove(&index);
    }
    Arc::new(next)
}

fn replace_row(items: &[Row], index: usize, row: Row) -> Option<Vec<Row>> {
    let mut next = items.to_vec();
    *next.get_mut(index)? = row;
    Some(next)
}

/// Copies `items`, swapping in every row `change` returns.
fn map_rows(items: &[Row], mut change: impl FnMut(usize, &Row) -> Option<Row>) -> Vec<Row> {
    items
        .iter()
        .enumerate()
        .map(|(index, row)| change(index, row).unwrap_or_else(|| row.clone()))
        .collect()
}

/// A blank row that keeps the identity of the slot it replaces.
fn blank_in_place(strategy: &dyn ProductStrategy, original: &Row) -> Row {
    Row {
        item_id: original.item_id,
        ..strategy.initial_item_data()
    }
}

fn insert_row(state: &Arc<QuoteState>, deps: Collaborators<'_>, after: usize) -> Arc<QuoteState> {
    commit_items(state, deps, |items, strategy| {
        if after >= items.len() {
            return None;
        }
        // A blank row after the blank tail would be consolidated away.
        if after + 1 == items.len() && items[after].is_blank() {
            return None;
        }
        let mut next = items.to_vec();
        next.insert(after + 1, strategy.initial_item_data());
        Some(next)
    })
}

fn delete_row(state: &Arc<QuoteState>, deps: Collaborators<'_>, index: usize) -> Arc<QuoteState> {
    commit_items(state, deps, |items, strategy| {
        let target = items.get(index)?;
        let last = items.last()?;
        let last_populated = items.len() > 1 && index == items.len() - 2 && !last.has_dimension();

        let mut next = items.to_vec();
        if last_populated || items.len() == 1 {
            next[index] = blank_in_place(strategy, target);
        } else {
            next.remove(index);
        }
        Some(next)
    })
}

fn clear_row(state: &Arc<QuoteState>, deps: Collaborators<'_>, index: usize) -> Arc<QuoteState> {
    commit_items(state, deps, |items, strategy| {
        let cleared = blank_in_place(strategy, items.get(index)?);
        replace_row(items, index, cleared)
    })
}

fn update_item_value(
    state: &Arc<QuoteState>,
    deps: Collaborators<'_>,
    row_index: usize,
    column: ItemField,
    value: &FieldValue,
) -> Arc<QuoteState> {
    commit_items(state, deps, |items, _| {
        let row = items.get(row_index)?;
        let mut updated = row.with_field(column, value)?;
        if updated == *row {
            return None;
        }

        if matches!(column, ItemField::Width | ItemField::Height)
            && updated.motor.is_empty()
            && let (Some(area), Some(thresholds)) = (updated.area(), deps.config.logic_thresholds())
            && area > thresholds.hd_winder_threshold_area
        {
            trace!(row_index, area, "area over threshold; assigning HD winder");
            HD_WINDER.clone_into(&mut updated.winder);
        }
        replace_row(items, row_index, updated)
    })
}

/// Winder and motor exclude each other: setting one clears the other.
fn update_winder_motor(
    state: &Arc<QuoteState>,
    deps: Collaborators<'_>,
    row_index: usize,
    property: DriveComponent,
    value: &str,
) -> Arc<QuoteState> {
    commit_items(state, deps, |items, _| {
        let row = items.get(row_index)?;
        let mut updated = row.clone();
        let (target, other) = match property {
            DriveComponent::Winder => (&mut updated.winder, &mut updated.motor),
            DriveComponent::Motor => (&mut updated.motor, &mut updated.winder),
        };
        if target.as_str() == value {
            return None;
        }
        value.clone_into(target);
        if !value.is_empty() {
            other.clear();
        }
        replace_row(items, row_index, updated)
    })
}

fn cycle_column(
    state: &Arc<QuoteState>,
    deps: Collaborators<'_>,
    row_index: usize,
    column: ItemField,
) -> Arc<QuoteState> {
    let Some(sequence) = column.cycle_sequence() else {
        trace!(column = column.as_str(), "column has no value cycle");
        return Arc::clone(state);
    };

    commit_items(state, deps, |items, _| {
        let row = items.get(row_index)?;
        let FieldValue::Text(current) = row.field(column) else {
            return None;
        };
        let next = sequence
            .iter()
            .position(|value| *value == current)
            .map_or(0, |position| (position + 1) % sequence.len());
        let updated = row.with_field(column, &FieldValue::from(sequence[next]))?;
        replace_row(items, row_index, updated)
    })
}

enum TypeChange<'a> {
    /// Advance one row that has a dimension.
    Cycle(usize),
    Set(usize, &'a str),
    /// Every row with both dimensions; `None` advances from the first such row.
    AllSized(Option<&'a str>),
    Selection(&'a BTreeSet<usize>, &'a str),
}

/// The code after `current` in `sequence`, wrapping. An unset type counts as
/// the last code, so the first cycle lands on the first code.
fn next_fabric_type<'s>(sequence: &'s [String], current: &str) -> &'s str {
    let current = if current.is_empty() {
        sequence.last().map_or("", String::as_str)
    } else {
        current
    };
    let next = sequence
        .iter()
        .position(|code| code == current)
        .map_or(0, |position| (position + 1) % sequence.len());
    &sequence[next]
}

fn change_fabric_types(
    state: &Arc<QuoteState>,
    deps: Collaborators<'_>,
    change: TypeChange<'_>,
) -> Arc<QuoteState> {
    let sequence = deps.config.fabric_type_sequence();
    if sequence.is_empty() {
        warn!("fabric type sequence is empty; ignoring type change");
        return Arc::clone(state);
    }

    let retype = |row: &Row, code: &str| (row.fabric_type != code).then(|| row.with_fabric_type(code));

    commit_items(state, deps, |items, _| match change {
        TypeChange::Cycle(index) => {
            let row = items.get(index).filter(|row| row.has_dimension())?;
            let updated = retype(row, next_fabric_type(sequence, &row.fabric_type))?;
            replace_row(items, index, updated)
        }
        TypeChange::Set(index, code) => {
            let updated = retype(items.get(index)?, code)?;
            replace_row(items, index, updated)
        }
        TypeChange::AllSized(code) => {
            let code = code.unwrap_or_else(|| {
                let current = items
                    .iter()
                    .find(|row| row.has_both_dimensions())
                    .map_or("", |row| row.fabric_type.as_str());
                next_fabric_type(sequence, current)
            });
            Some(map_rows(items, |_, row| {
                row.has_both_dimensions()
                    .then(|| retype(row, code))
                    .flatten()
            }))
        }
        TypeChange::Selection(selected, code) => Some(map_rows(items, |index, row| {
            (selected.contains(&index) && row.has_both_dimensions())
                .then(|| retype(row, code))
                .flatten()
        })),
    })
}

fn update_lf_modified(
    state: &Arc<QuoteState>,
    edit: impl FnOnce(&mut BTreeSet<usize>),
) -> Arc<QuoteState> {
    let mut tracked = state.ui_metadata.lf_modified_row_indexes.clone();
    edit(&mut tracked);
    if tracked == state.ui_metadata.lf_modified_row_indexes {
        return Arc::clone(state);
    }

    let mut next = QuoteState::clone(state);
    next.ui_metadata.lf_modified_row_indexes = tracked;
    Arc::new(next)
}

/// Shallow merge: keys in `data` overwrite, every other key is kept.
fn update_accessory_summary(
    state: &Arc<QuoteState>,
    data: &BTreeMap<String, AccessoryLine>,
) -> Arc<QuoteState> {
    let Some(product) = state.active_product() else {
        return Arc::clone(state);
    };
    let mut accessories = product.summary.accessories.clone();
    accessories.extend(data.iter().map(|(key, line)| (key.clone(), *line)));
    if accessories == product.summary.accessories {
        return Arc::clone(state);
    }

    let mut updated = ProductData::clone(product);
    updated.summary.accessories = accessories;
    let mut next = QuoteState::clone(state);
    next.products
        .insert(state.current_product.clone(), Arc::new(updated));
    Arc::new(next)
}
