use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::warn;

use crate::coords::BlockPos;
use crate::selection::RegionSelection;
use crate::sub_region::SubRegionBox;

/// Persisted form of a [`RegionSelection`].
///
/// Box entries stay as raw JSON so a single corrupt box can be skipped on load
/// without rejecting the rest of the selection.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SelectionRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub boxes: Vec<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin: Option<BlockPos>,
}

impl SelectionRecord {
    /// Reads the known fields of a selection object. A field of the wrong shape
    /// is treated as absent, and a non-array `boxes` as an empty list.
    pub fn from_json_object(mut object: Map<String, Value>) -> Self {
        let boxes = match object.remove("boxes") {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(entries)) => entries,
            Some(_) => {
                warn!(field = "boxes", "selection_field_ignored");
                Vec::new()
            }
        };

        Self {
            name: lenient_field(&mut object, "name"),
            current: lenient_field(&mut object, "current"),
            boxes,
            origin: lenient_field(&mut object, "origin"),
        }
    }
}

fn lenient_field<T: DeserializeOwned>(
    object: &mut Map<String, Value>,
    field: &'static str,
) -> Option<T> {
    match object.remove(field) {
        None | Some(Value::Null) => None,
        Some(value) => match serde_json::from_value(value) {
            Ok(decoded) => Some(decoded),
            Err(error) => {
                warn!(field, error = %error, "selection_field_ignored");
                None
            }
        },
    }
}

#[derive(Debug, Error)]
pub enum SelectionParseError {
    #[error("parse selection json: {source}")]
    Json {
        #[source]
        source: serde_json::Error,
    },
    #[error("parse selection json at {path}: {source}")]
    JsonAt {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("encode selection json: {0}")]
    Encode(#[source] serde_json::Error),
}

impl RegionSelection {
    pub fn to_record(&self) -> SelectionRecord {
        let boxes = self
            .sub_region_boxes
            .values()
            .filter_map(|sub_box| serde_json::to_value(sub_box.to_record()).ok())
            .collect::<Vec<_>>();
        let current = if boxes.is_empty() {
            None
        } else {
            self.current_box.clone()
        };

        SelectionRecord {
            name: Some(self.name.clone()),
            current,
            boxes,
            origin: self.explicit_origin,
        }
    }

    pub fn from_record(record: SelectionRecord) -> Self {
        let mut selection = RegionSelection::new();

        for (index, entry) in record.boxes.iter().enumerate() {
            match SubRegionBox::from_record_value(entry) {
                Some(sub_box) => {
                    selection
                        .sub_region_boxes
                        .insert(sub_box.name().to_string(), sub_box);
                }
                None => warn!(index, "selection_box_skipped"),
            }
        }

        if let Some(name) = record.name {
            selection.name = name;
        }

        if let Some(current) = record.current {
            if selection.sub_region_boxes.contains_key(&current) {
                selection.current_box = Some(current);
            } else {
                warn!(
                    selection = %selection.name,
                    current = %current,
                    "selection_current_box_missing"
                );
            }
        }

        match record.origin {
            Some(origin) => selection.set_explicit_origin(Some(origin)),
            None => selection.update_calculated_origin(),
        }

        selection
    }

    pub fn to_json_string(&self) -> Result<String, SelectionParseError> {
        serde_json::to_string_pretty(&self.to_record()).map_err(SelectionParseError::Encode)
    }
}

pub fn parse_selection_record(raw: &str) -> Result<SelectionRecord, SelectionParseError> {
    let mut deserializer = serde_json::Deserializer::from_str(raw);
    let object = serde_path_to_error::deserialize::<_, Map<String, Value>>(&mut deserializer)
        .map_err(|error| {
            let path = error.path().to_string();
            let source = error.into_inner();
            if path.is_empty() || path == "." {
                SelectionParseError::Json { source }
            } else {
                SelectionParseError::JsonAt { path, source }
            }
        })?;
    Ok(SelectionRecord::from_json_object(object))
}

pub fn parse_selection_json(raw: &str) -> Result<RegionSelection, SelectionParseError> {
    parse_selection_record(raw).map(RegionSelection::from_record)
}
