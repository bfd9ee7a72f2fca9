//! Cost checklist normalization.

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

use crate::domain::AppError;

/// Checklist line item as submitted, and as forwarded when checked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostItem {
    pub title: String,
    #[serde(rename = "isChecked")]
    pub is_checked: bool,
    #[serde(default)]
    pub value: Option<Value>,
    #[serde(default)]
    pub quantity: Option<Value>,
    #[serde(default)]
    pub rate: Option<Value>,
}

/// A named cost section with generic and project-specific items.
#[derive(Debug, Clone, Deserialize)]
pub struct CostSectionInput {
    pub name: String,
    pub generic: Vec<CostItem>,
    pub specific: Vec<CostItem>,
}

/// Checked items of one section, generic items first.
#[derive(Debug, Clone, PartialEq)]
pub struct CostSection {
    pub name: String,
    pub items: Vec<CostItem>,
}

/// Section name to checked items, in first-appearance order.
///
/// Serializes as a JSON object.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CostInfo {
    sections: Vec<CostSection>,
}

impl CostInfo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a section, replacing an existing one with the same name in place.
    pub fn insert(&mut self, section: CostSection) {
        match self.sections.iter_mut().find(|existing| existing.name == section.name) {
            Some(existing) => *existing = section,
            None => self.sections.push(section),
        }
    }

    pub fn get(&self, name: &str) -> Option<&[CostItem]> {
        self.sections.iter().find(|s| s.name == name).map(|s| s.items.as_slice())
    }

    pub fn sections(&self) -> &[CostSection] {
        &self.sections
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

impl Serialize for CostInfo {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.sections.len()))?;
        for section in &self.sections {
            map.serialize_entry(&section.name, &section.items)?;
        }
        map.end()
    }
}

/// Keep only checked items of each section, generic then specific.
pub fn extract_cost_info(sections: &[Value]) -> Result<CostInfo, AppError> {
    let mut info = CostInfo::new();

    for (index, raw) in sections.iter().enumerate() {
        let section = CostSectionInput::deserialize(raw)
            .map_err(|e| AppError::malformed(format!("cost_info_payload[{}]", index), e))?;

        let items = section
            .generic
            .into_iter()
            .chain(section.specific)
            .filter(|item| item.is_checked)
            .collect();

        info.insert(CostSection { name: section.name, items });
    }

    Ok(info)
}
