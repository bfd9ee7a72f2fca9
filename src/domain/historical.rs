//! Historical unit-price reference data, grouped by cost category.
//!
//! The dataset is a YAML document with a `rows` list. Column names differ
//! between dataset revisions, so the columns the loader reads are named by a
//! [`HistoricalSchema`] rather than hardcoded. Every other column is carried
//! through untouched.

use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};

use crate::domain::AppError;

/// Logical field to source-column mapping for the active dataset revision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HistoricalSchema {
    #[serde(default = "default_category_column")]
    pub category: String,
    #[serde(default = "default_sub_category_column")]
    pub sub_category: Option<String>,
    #[serde(default = "default_unit_column")]
    pub unit: Option<String>,
    #[serde(default = "default_price_column")]
    pub price: Option<String>,
    #[serde(default)]
    pub range: Option<String>,
    /// Further columns rendered after the fixed ones, labelled by column name.
    #[serde(default)]
    pub extra: Vec<String>,
}

impl Default for HistoricalSchema {
    fn default() -> Self {
        Self {
            category: default_category_column(),
            sub_category: default_sub_category_column(),
            unit: default_unit_column(),
            price: default_price_column(),
            range: None,
            extra: Vec::new(),
        }
    }
}

fn default_category_column() -> String {
    "Category".to_string()
}

fn default_sub_category_column() -> Option<String> {
    Some("Sub Category".to_string())
}

fn default_unit_column() -> Option<String> {
    Some("Unit".to_string())
}

fn default_price_column() -> Option<String> {
    Some("Rate (£)".to_string())
}

impl HistoricalSchema {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.category.trim().is_empty() {
            return Err(AppError::config_error("historical.columns.category must not be empty"));
        }
        if self.extra.iter().any(|column| column.trim().is_empty()) {
            return Err(AppError::config_error(
                "historical.columns.extra entries must not be empty",
            ));
        }
        Ok(())
    }
}

/// One dataset row with all of its source columns, in file order.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoricalRow {
    columns: Mapping,
}

impl HistoricalRow {
    pub fn new(columns: Mapping) -> Self {
        Self { columns }
    }

    /// Cell text for `column`, if present and non-null.
    pub fn cell(&self, column: &str) -> Option<String> {
        self.columns.get(column).and_then(scalar_text)
    }

    pub fn columns(&self) -> &Mapping {
        &self.columns
    }
}

/// Rows sharing one category value.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoricalCategory {
    pub name: String,
    pub rows: Vec<HistoricalRow>,
}

/// Dataset grouped by category, categories in first-appearance order.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoricalData {
    schema: HistoricalSchema,
    categories: Vec<HistoricalCategory>,
}

#[derive(Debug, Deserialize)]
struct DatasetDocument {
    #[serde(default)]
    rows: Vec<Mapping>,
}

impl HistoricalData {
    /// Parse dataset text and group its rows.
    ///
    /// `source_name` only labels errors.
    pub fn parse(
        content: &str,
        source_name: &str,
        schema: &HistoricalSchema,
    ) -> Result<Self, AppError> {
        let document: DatasetDocument =
            serde_yaml::from_str(content).map_err(|e| AppError::HistoricalDataset {
                source_name: source_name.to_string(),
                details: e.to_string(),
            })?;

        let rows = document.rows.into_iter().map(HistoricalRow::new).collect();
        Self::group(rows, source_name, schema)
    }

    /// Group rows by the schema's category column.
    ///
    /// A row without a category value fails the whole load.
    pub fn group(
        rows: Vec<HistoricalRow>,
        source_name: &str,
        schema: &HistoricalSchema,
    ) -> Result<Self, AppError> {
        let mut categories: Vec<HistoricalCategory> = Vec::new();

        for (index, row) in rows.into_iter().enumerate() {
            let name = row.cell(&schema.category).ok_or_else(|| AppError::HistoricalDataset {
                source_name: source_name.to_string(),
                details: format!("row {} has no '{}' value", index + 1, schema.category),
            })?;

            match categories.iter_mut().find(|c| c.name == name) {
                Some(category) => category.rows.push(row),
                None => categories.push(HistoricalCategory { name, rows: vec![row] }),
            }
        }

        Ok(Self { schema: schema.clone(), categories })
    }

    pub fn categories(&self) -> &[HistoricalCategory] {
        &self.categories
    }

    pub fn get(&self, category: &str) -> Option<&[HistoricalRow]> {
        self.categories.iter().find(|c| c.name == category).map(|c| c.rows.as_slice())
    }

    pub fn row_count(&self) -> usize {
        self.categories.iter().map(|c| c.rows.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Render as category headers followed by indented line items.
    pub fn render(&self) -> String {
        if self.categories.is_empty() {
            return "N/A".to_string();
        }

        let mut lines = Vec::new();
        for category in &self.categories {
            lines.push(format!("Category: {}", category.name));
            for row in &category.rows {
                lines.push(format!("  - {}", self.render_row(row)));
            }
        }
        lines.join("\n")
    }

    fn render_row(&self, row: &HistoricalRow) -> String {
        let cell = |column: &Option<String>| {
            column.as_deref().and_then(|c| row.cell(c)).unwrap_or_else(|| "N/A".to_string())
        };

        let mut parts = vec![
            format!("Sub-category: {}", cell(&self.schema.sub_category)),
            format!("Unit: {}", cell(&self.schema.unit)),
            format!("Price: {}", cell(&self.schema.price)),
        ];
        if self.schema.range.is_some() {
            parts.push(format!("Range: {}", cell(&self.schema.range)));
        }
        for column in &self.schema.extra {
            let value = row.cell(column).unwrap_or_else(|| "N/A".to_string());
            parts.push(format!("{}: {}", column, value));
        }
        parts.join(" | ")
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Tagged(tagged) => scalar_text(&tagged.value),
        Value::Null | Value::Sequence(_) | Value::Mapping(_) => None,
    }
}
