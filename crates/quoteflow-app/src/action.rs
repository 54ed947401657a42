// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::{Deserialize, Deserializer, Serialize, Serializer, de};
use serde_json::{Map, Value};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use crate::{
    AccessoryLine, CellRef, DriveAccessory, F2Key, F2Value, FeeType, FieldValue, ItemField,
    QuoteState, ViewKind,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DriveComponent {
    Winder,
    Motor,
}

/// Every state transition the engine understands. Serialized as
/// `{"type": "...", "payload": {...}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    remote = "Self",
    tag = "type",
    content = "payload",
    rename_all = "SCREAMING_SNAKE_CASE",
    rename_all_fields = "camelCase"
)]
pub enum Action {
    // Quote data.
    SetQuoteData {
        new_quote_data: Arc<QuoteState>,
    },
    ResetQuoteData,
    InsertRow {
        selected_index: usize,
    },
    DeleteRow {
        selected_index: usize,
    },
    ClearRow {
        selected_index: usize,
    },
    UpdateItemValue {
        row_index: usize,
        column: ItemField,
        value: FieldValue,
    },
    BatchUpdateProperty {
        property: ItemField,
        value: FieldValue,
    },
    BatchUpdatePropertyByType {
        #[serde(rename = "type")]
        fabric_type: String,
        property: ItemField,
        value: FieldValue,
        #[serde(default)]
        indexes_to_exclude: BTreeSet<usize>,
    },
    UpdateItemProperty {
        row_index: usize,
        property: ItemField,
        value: FieldValue,
    },
    UpdateWinderMotorProperty {
        row_index: usize,
        property: DriveComponent,
        value: String,
    },
    CycleK3Property {
        row_index: usize,
        column: ItemField,
    },
    CycleItemType {
        row_index: usize,
    },
    SetItemType {
        row_index: usize,
        new_type: String,
    },
    BatchUpdateFabricType {
        #[serde(default)]
        new_type: Option<String>,
    },
    BatchUpdateFabricTypeForSelection {
        selected_indexes: BTreeSet<usize>,
        new_type: String,
    },
    BatchUpdateLfProperties {
        row_indexes: BTreeSet<usize>,
        fabric_name: String,
        fabric_color: String,
    },
    RemoveLfProperties {
        row_indexes: BTreeSet<usize>,
    },
    AddLfModifiedRows {
        row_indexes: BTreeSet<usize>,
    },
    RemoveLfModifiedRows {
        row_indexes: BTreeSet<usize>,
    },
    UpdateAccessorySummary {
        data: BTreeMap<String, AccessoryLine>,
    },

    // Interface state.
    SetCurrentView {
        view_name: ViewKind,
    },
    SetVisibleColumns {
        columns: Vec<String>,
    },
    SetActiveTab {
        tab_id: String,
    },
    SetActiveCell(CellRef),
    SetInputValue {
        value: String,
    },
    AppendInputValue {
        key: String,
    },
    DeleteLastInputChar,
    ClearInputValue,
    SetSelectedRowIndex {
        row_index: Option<usize>,
    },
    ToggleMultiSelectMode,
    ToggleMultiSelectSelection {
        row_index: usize,
    },
    ClearMultiSelectSelection,
    SetActiveEditMode {
        mode: Option<String>,
    },
    SetTargetCell {
        cell: Option<CellRef>,
    },
    SetLocationInputValue {
        value: String,
    },
    ToggleLfSelection {
        row_index: usize,
    },
    ClearLfSelection,
    SetDualChainMode {
        mode: Option<String>,
    },
    SetDriveAccessoryMode {
        mode: Option<String>,
    },
    SetDriveAccessoryCount {
        accessory: DriveAccessory,
        count: i64,
    },
    SetDriveAccessoryTotalPrice {
        accessory: DriveAccessory,
        price: Option<i64>,
    },
    SetDriveGrandTotal {
        price: Option<i64>,
    },
    SetDualPrice {
        price: Option<i64>,
    },
    ClearDualChainInputValue,
    SetSummaryWinderPrice {
        price: Option<i64>,
    },
    SetSummaryMotorPrice {
        price: Option<i64>,
    },
    SetSummaryRemotePrice {
        price: Option<i64>,
    },
    SetSummaryChargerPrice {
        price: Option<i64>,
    },
    SetSummaryCordPrice {
        price: Option<i64>,
    },
    SetSummaryAccessoriesTotal {
        price: Option<i64>,
    },
    SetF1RemoteDistribution {
        qty1: u32,
        qty16: u32,
    },
    SetF1DualDistribution {
        combo_qty: u32,
        slim_qty: u32,
    },
    SetF1DiscountPercentage {
        percentage: f64,
    },
    SetF2Value {
        key: F2Key,
        value: F2Value,
    },
    ToggleF2FeeExclusion {
        fee_type: FeeType,
    },
    SetSumOutdated {
        is_outdated: bool,
    },
    ResetUi,

    /// Any type name this engine does not know. Always a no-op; its
    /// payload, if any, is dropped.
    #[serde(other)]
    Unknown,
}

#[derive(Deserialize)]
struct Envelope {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    payload: Option<Value>,
}

impl Serialize for Action {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        Self::serialize(self, serializer)
    }
}

impl<'de> Deserialize<'de> for Action {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let Envelope { kind, payload } = Envelope::deserialize(deserializer)?;

        let mut wire = Map::new();
        wire.insert("type".to_owned(), Value::String(kind));
        // The tag alone resolves unrecognised names to `Unknown`.
        if let Ok(Self::Unknown) = Self::deserialize(&Value::Object(wire.clone())) {
            return Ok(Self::Unknown);
        }
        if let Some(payload) = payload {
            wire.insert("payload".to_owned(), payload);
        }
        Self::deserialize(Value::Object(wire)).map_err(de::Error::custom)
    }
}

impl Action {
    pub const fn name(&self) -> &'static str {
        match self {
            Self::SetQuoteData { .. } => "SET_QUOTE_DATA",
            Self::ResetQuoteData => "RESET_QUOTE_DATA",
            Self::InsertRow { .. } => "INSERT_ROW",
            Self::DeleteRow { .. } => "DELETE_ROW",
            Self::ClearRow { .. } => "CLEAR_ROW",
            Self::UpdateItemValue { .. } => "UPDATE_ITEM_VALUE",
            Self::BatchUpdateProperty { .. } => "BATCH_UPDATE_PROPERTY",
            Self::BatchUpdatePropertyByType { .. } => "BATCH_UPDATE_PROPERTY_BY_TYPE",
            Self::UpdateItemProperty { .. } => "UPDATE_ITEM_PROPERTY",
            Self::UpdateWinderMotorProperty { .. } => "UPDATE_WINDER_MOTOR_PROPERTY",
            Self::CycleK3Property { .. } => "CYCLE_K3_PROPERTY",
            Self::CycleItemType { .. } => "CYCLE_ITEM_TYPE",
            Self::SetItemType { .. } => "SET_ITEM_TYPE",
            Self::BatchUpdateFabricType { .. } => "BATCH_UPDATE_FABRIC_TYPE",
            Self::BatchUpdateFabricTypeForSelection { .. } => {
                "BATCH_UPDATE_FABRIC_TYPE_FOR_SELECTION"
            }
            Self::BatchUpdateLfProperties { .. } => "BATCH_UPDATE_LF_PROPERTIES",
            Self::RemoveLfProperties { .. } => "REMOVE_LF_PROPERTIES",
            Self::AddLfModifiedRows { .. } => "ADD_LF_MODIFIED_ROWS",
            Self::RemoveLfModifiedRows { .. } => "REMOVE_LF_MODIFIED_ROWS",
            Self::UpdateAccessorySummary { .. } => "UPDATE_ACCESSORY_SUMMARY",
            Self::SetCurrentView { .. } => "SET_CURRENT_VIEW",
            Self::SetVisibleColumns { .. } => "SET_VISIBLE_COLUMNS",
            Self::SetActiveTab { .. } => "SET_ACTIVE_TAB",
            Self::SetActiveCell(_) => "SET_ACTIVE_CELL",
            Self::SetInputValue { .. } => "SET_INPUT_VALUE",
            Self::AppendInputValue { .. } => "APPEND_INPUT_VALUE",
            Self::DeleteLastInputChar => "DELETE_LAST_INPUT_CHAR",
            Self::ClearInputValue => "CLEAR_INPUT_VALUE",
            Self::SetSelectedRowIndex { .. } => "SET_SELECTED_ROW_INDEX",
            Self::ToggleMultiSelectMode => "TOGGLE_MULTI_SELECT_MODE",
            Self::ToggleMultiSelectSelection { .. } => "TOGGLE_MULTI_SELECT_SELECTION",
            Self::ClearMultiSelectSelection => "CLEAR_MULTI_SELECT_SELECTION",
            Self::SetActiveEditMode { .. } => "SET_ACTIVE_EDIT_MODE",
            Self::SetTargetCell { .. } => "SET_TARGET_CELL",
            Self::SetLocationInputValue { .. } => "SET_LOCATION_INPUT_VALUE",
            Self::ToggleLfSelection { .. } => "TOGGLE_LF_SELECTION",
            Self::ClearLfSelection => "CLEAR_LF_SELECTION",
            Self::SetDualChainMode { .. } => "SET_DUAL_CHAIN_MODE",
            Self::SetDriveAccessoryMode { .. } => "SET_DRIVE_ACCESSORY_MODE",
            Self::SetDriveAccessoryCount { .. } => "SET_DRIVE_ACCESSORY_COUNT",
            Self::SetDriveAccessoryTotalPrice { .. } => "SET_DRIVE_ACCESSORY_TOTAL_PRICE",
            Self::SetDriveGrandTotal { .. } => "SET_DRIVE_GRAND_TOTAL",
            Self::SetDualPrice { .. } => "SET_DUAL_PRICE",
            Self::ClearDualChainInputValue => "CLEAR_DUAL_CHAIN_INPUT_VALUE",
            Self::SetSummaryWinderPrice { .. } => "SET_SUMMARY_WINDER_PRICE",
            Self::SetSummaryMotorPrice { .. } => "SET_SUMMARY_MOTOR_PRICE",
            Self::SetSummaryRemotePrice { .. } => "SET_SUMMARY_REMOTE_PRICE",
            Self::SetSummaryChargerPrice { .. } => "SET_SUMMARY_CHARGER_PRICE",
            Self::SetSummaryCordPrice { .. } => "SET_SUMMARY_CORD_PRICE",
            Self::SetSummaryAccessoriesTotal { .. } => "SET_SUMMARY_ACCESSORIES_TOTAL",
            Self::SetF1RemoteDistribution { .. } => "SET_F1_REMOTE_DISTRIBUTION",
            Self::SetF1DualDistribution { .. } => "SET_F1_DUAL_DISTRIBUTION",
            Self::SetF1DiscountPercentage { .. } => "SET_F1_DISCOUNT_PERCENTAGE",
            Self::SetF2Value { .. } => "SET_F2_VALUE",
            Self::ToggleF2FeeExclusion { .. } => "TOGGLE_F2_FEE_EXCLUSION",
            Self::SetSumOutdated { .. } => "SET_SUM_OUTDATED",
            Self::ResetUi => "RESET_UI",
            Self::Unknown => "UNKNOWN",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Action, DriveComponent};
    use crate::{FieldValue, ItemField};

    #[test]
    fn wire_shape_uses_type_and_payload() {
        let action = Action::UpdateItemValue {
            row_index: 0,
            column: ItemField::Width,
            value: FieldValue::Number(1000),
        };
        let json = serde_json::to_value(&action).expect("serialize action");
        assert_eq!(json["type"], "UPDATE_ITEM_VALUE");
        assert_eq!(json["payload"]["rowIndex"], 0);
        assert_eq!(json["payload"]["column"], "width");
        assert_eq!(json["payload"]["value"], 1000);
    }

    #[test]
    fn parses_actions_from_json() {
        let parsed: Action = serde_json::from_str(
            r#"{"type":"UPDATE_WINDER_MOTOR_PROPERTY","payload":{"rowIndex":2,"property":"motor","value":"M1"}}"#,
        )
        .expect("parse winder/motor action");
        assert_eq!(
            parsed,
            Action::UpdateWinderMotorProperty {
                row_index: 2,
                property: DriveComponent::Motor,
                value: "M1".to_owned(),
            }
        );

        let cycle: Action =
            serde_json::from_str(r#"{"type":"CYCLE_K3_PROPERTY","payload":{"rowIndex":0,"column":"over"}}"#)
                .expect("parse cycle action");
        assert_eq!(cycle.name(), "CYCLE_K3_PROPERTY");
    }

    #[test]
    fn unit_actions_need_no_payload() {
        let reset: Action =
            serde_json::from_str(r#"{"type":"RESET_UI"}"#).expect("parse reset action");
        assert_eq!(reset, Action::ResetUi);
    }

    #[test]
    fn unknown_type_parses_as_unknown() {
        let action: Action =
            serde_json::from_str(r#"{"type":"OPEN_PRINT_PREVIEW"}"#).expect("parse unknown");
        assert_eq!(action, Action::Unknown);
    }

    #[test]
    fn unknown_type_drops_its_payload() {
        let action: Action = serde_json::from_str(
            r#"{"type":"OPEN_PRINT_PREVIEW","payload":{"format":"a4","copies":2}}"#,
        )
        .expect("parse unknown with payload");
        assert_eq!(action, Action::Unknown);
    }

    #[test]
    fn known_type_still_rejects_bad_payload() {
        let result = serde_json::from_str::<Action>(
            r#"{"type":"INSERT_ROW","payload":{"selectedIndex":"first"}}"#,
        );
        assert!(result.is_err());

        let missing = serde_json::from_str::<Action>(r#"{"type":"INSERT_ROW"}"#);
        assert!(missing.is_err());
    }
}
