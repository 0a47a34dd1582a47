//! Prompt construction
//!
//! The configure prompt carries everything the model needs to answer with a
//! payload the ingestor accepts: its role, the current settings, the field
//! list and the payload JSON Schema.

use plotagent_schema::{payload_json_schema, ConfigPatch, Setting, SettingField};

use crate::client::PromptRequest;

/// Default role line
pub const DEFAULT_ROLE: &str = "You are an AI agent managing 3D plotter configurations.";

/// Builds [`PromptRequest`]s for the agent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptBuilder {
    role: String,
    include_schema: bool,
}

impl Default for PromptBuilder {
    fn default() -> Self {
        Self {
            role: DEFAULT_ROLE.to_string(),
            include_schema: true,
        }
    }
}

impl PromptBuilder {
    /// Create builder with the default role
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With a custom role line
    #[inline]
    #[must_use]
    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = role.into();
        self
    }

    /// With or without the embedded JSON Schema
    #[inline]
    #[must_use]
    pub fn with_schema(mut self, include: bool) -> Self {
        self.include_schema = include;
        self
    }

    /// Role line in effect
    #[inline]
    #[must_use]
    pub fn role(&self) -> &str {
        &self.role
    }

    /// Request asking the model for a settings payload
    ///
    /// # Arguments
    /// * `instruction` - What the user wants changed
    /// * `current` - Snapshot of the target's settings
    #[must_use]
    pub fn configure_request(&self, instruction: &str, current: &ConfigPatch) -> PromptRequest {
        let mut system = String::new();
        system.push_str(&self.role);
        system.push_str("\n\n");

        if let Some(sentence) = describe_plotter(current) {
            system.push_str(&sentence);
            system.push_str("\n\n");
        }

        if current.is_empty() {
            system.push_str("The current settings are unknown.\n");
        } else {
            system.push_str("Current settings:\n");
            for setting in current.iter() {
                system.push_str(&format!("- {setting}\n"));
            }
        }

        system.push_str("\nSettable fields:\n");
        for field in SettingField::ALL {
            system.push_str(&format!("- {}: {}\n", field, field.describe()));
        }

        system.push_str(
            "\nReply with a single JSON object containing only the fields to change. \
             Omit fields that should stay as they are. Do not add any other text.",
        );

        if self.include_schema {
            let schema = serde_json::to_string_pretty(&payload_json_schema()).unwrap_or_default();
            system.push_str("\n\nJSON Schema of the reply:\n");
            system.push_str(&schema);
        }

        PromptRequest::new(system, instruction)
    }

    /// Request asking the model a yes/no question about one field
    #[must_use]
    pub fn decision_request(&self, question: &str, field: SettingField) -> PromptRequest {
        let system = format!(
            "{}\n\nThe user's message concerns `{}` ({}). Answer true if the user wants it \
             enabled and false if they do not. Reply with only true or false.",
            self.role,
            field,
            field.describe()
        );
        PromptRequest::new(system, question)
    }
}

/// One-sentence summary of the headline settings, when both are known
fn describe_plotter(current: &ConfigPatch) -> Option<String> {
    match (
        current.get(SettingField::BackgroundColor),
        current.get(SettingField::WindowSize),
    ) {
        (Some(Setting::BackgroundColor(color)), Some(Setting::WindowSize(size))) => Some(format!(
            "The plotter has a background color of {color} and a window size of {size}."
        )),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plotagent_schema::{PlotterSettings, SettingsTarget};

    #[test]
    fn configure_prompt_carries_state_fields_and_schema() {
        let builder = PromptBuilder::new();
        let request = builder.configure_request(
            "Set background to blue and decrease font size.",
            &PlotterSettings::default().snapshot(),
        );

        assert_eq!(request.user, "Set background to blue and decrease font size.");
        assert!(request.system.starts_with(DEFAULT_ROLE));
        assert!(request
            .system
            .contains("The plotter has a background color of white and a window size of 800x600."));
        assert!(request.system.contains("- background_color=\"white\""));
        assert!(request.system.contains("- window_size=[800,600]"));
        for field in SettingField::ALL {
            assert!(request.system.contains(&format!("- {}: ", field.name())));
        }
        assert!(request.system.contains("JSON Schema of the reply"));
        assert!(request.system.contains("\"properties\""));
    }

    #[test]
    fn configure_prompt_without_schema_or_state() {
        let builder = PromptBuilder::new()
            .with_role("You tune plots.")
            .with_schema(false);
        let request = builder.configure_request("Hide axes", &ConfigPatch::new());

        assert!(request.system.starts_with("You tune plots."));
        assert!(request.system.contains("The current settings are unknown."));
        assert!(!request.system.contains("The plotter has"));
        assert!(!request.system.contains("JSON Schema"));
    }

    #[test]
    fn decision_prompt_names_field() {
        let request = PromptBuilder::new().decision_request("I want to show edges.", SettingField::ShowEdges);

        assert_eq!(request.user, "I want to show edges.");
        assert!(request.system.contains("`show_edges`"));
        assert!(request.system.contains("Reply with only true or false."));
    }
}
