use super::{PromptContext, PromptError, TemplateRenderer};
use crate::domain::cost_info::CostInfo;
use crate::domain::historical::HistoricalData;
use crate::domain::project_info::{ProjectDetails, ProjectField};

/// Variables every question template may reference.
pub const QUESTION_VARIABLES: [&str; 6] = [
    "work_type",
    "gross_internal_area",
    "expected_finishes",
    "site_conditions",
    "cost_info",
    "historical_data",
];

/// Build the substitution context for a question template.
pub fn question_context(
    project_details: &ProjectDetails,
    cost_info: &CostInfo,
    historical_data: &HistoricalData,
) -> Result<PromptContext, PromptError> {
    let mut context = PromptContext::new();
    for field in ProjectField::ALL {
        context = context.with_var(field.key(), project_details.display(field));
    }

    let cost_text = serde_json::to_string_pretty(cost_info).map_err(|e| {
        PromptError::Serialization { what: "cost info".to_string(), reason: e.to_string() }
    })?;

    Ok(context
        .with_var("cost_info", cost_text)
        .with_var("historical_data", historical_data.render()))
}

/// Compose the analysis question sent as the user message.
pub fn formulate_question<R: TemplateRenderer + ?Sized>(
    renderer: &R,
    template_name: &str,
    project_details: &ProjectDetails,
    cost_info: &CostInfo,
    historical_data: &HistoricalData,
) -> Result<String, PromptError> {
    let context = question_context(project_details, cost_info, historical_data)?;
    renderer.render(template_name, &context)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{EmbeddedPromptTemplateStore, MinijinjaTemplateRenderer};
    use crate::domain::cost_info::extract_cost_info;
    use crate::domain::historical::HistoricalSchema;
    use crate::ports::PromptTemplateStore;
    use serde_json::json;

    const HEADINGS: [&str; 4] =
        ["Elevations:", "Floor Plan:", "Roof Plan:", "Feasibility Estimate:"];

    fn bundled_renderer() -> MinijinjaTemplateRenderer {
        MinijinjaTemplateRenderer::from_store(&EmbeddedPromptTemplateStore::new()).unwrap()
    }

    fn empty_historical() -> HistoricalData {
        HistoricalData::parse("rows: []", "test", &HistoricalSchema::default()).unwrap()
    }

    #[test]
    fn every_bundled_template_keeps_output_headings_with_empty_inputs() {
        let store = EmbeddedPromptTemplateStore::new();
        let renderer = bundled_renderer();

        for name in store.template_names() {
            let question = formulate_question(
                &renderer,
                &name,
                &ProjectDetails::new(),
                &CostInfo::new(),
                &empty_historical(),
            )
            .unwrap();

            for heading in HEADINGS {
                assert!(question.contains(heading), "{} lacks heading {}", name, heading);
            }
        }
    }

    #[test]
    fn missing_project_fields_render_not_available() {
        let mut details = ProjectDetails::new();
        details.insert(ProjectField::WorkType, "Extension");

        let question = formulate_question(
            &bundled_renderer(),
            "feasibility-v2",
            &details,
            &CostInfo::new(),
            &empty_historical(),
        )
        .unwrap();

        assert!(question.contains("Project Type: Extension"));
        assert!(question.contains("Gross Internal Area: N/A"));
        assert!(question.contains("Site-specific Conditions: N/A"));
    }

    #[test]
    fn cost_and_historical_blocks_appear_in_question() {
        let cost_info = extract_cost_info(&[json!({
            "name": "Roof",
            "generic": [{"title": "Tiles", "isChecked": true, "rate": 50}],
            "specific": []
        })])
        .unwrap();
        let historical = HistoricalData::parse(
            concat!(
                "rows:\n",
                "  - Category: Roof\n",
                "    Sub Category: Tiles\n",
                "    Unit: m2\n",
                "    \"Rate (£)\": 65\n",
            ),
            "test",
            &HistoricalSchema::default(),
        )
        .unwrap();

        let question = formulate_question(
            &bundled_renderer(),
            "feasibility-v2",
            &ProjectDetails::new(),
            &cost_info,
            &historical,
        )
        .unwrap();

        assert!(question.contains("\"title\": \"Tiles\""));
        assert!(question.contains("Category: Roof"));
        assert!(question.contains("Sub-category: Tiles | Unit: m2 | Price: 65"));

        let cost_at = question.find("\"title\": \"Tiles\"").unwrap();
        let history_at = question.find("Category: Roof").unwrap();
        assert!(cost_at < history_at);
    }

    #[test]
    fn context_exposes_all_question_variables() {
        let context =
            question_context(&ProjectDetails::new(), &CostInfo::new(), &empty_historical())
                .unwrap();

        for name in QUESTION_VARIABLES {
            assert!(context.get(name).is_some(), "missing {}", name);
        }
        assert_eq!(context.get("cost_info"), Some("{}"));
    }
}
