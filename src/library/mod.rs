use crate::errors::PromptError;
use crate::options::PromptOptions;
use crate::prompt;
use serde::Serialize;

/// Pure renderer for one variant. Plain `fn` pointers carry no captured state,
/// so catalog entries can be shared freely across threads.
pub type RenderFn = fn(&PromptOptions) -> String;

#[derive(Clone, Copy)]
pub struct PromptVariant {
    pub id: &'static str,
    pub label: &'static str,
    pub description: &'static str,
    pub render: RenderFn,
}

impl std::fmt::Debug for PromptVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PromptVariant")
            .field("id", &self.id)
            .field("label", &self.label)
            .finish()
    }
}

/// What a selection UI needs to show a variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VariantInfo {
    pub id: &'static str,
    pub label: &'static str,
    pub description: &'static str,
}

#[derive(Debug)]
pub struct PromptLibrary {
    variants: &'static [PromptVariant],
}

pub static LIBRARY: PromptLibrary = PromptLibrary::new(&[
    PromptVariant {
        id: "default",
        label: "Default Prompt",
        description: "Full planning prompt with database, design and quick action protocols",
        render: prompt::system_prompt,
    },
    PromptVariant {
        id: "original",
        label: "Fine-Tuned Prompt",
        description: "General development prompt optimized for less token usage",
        render: prompt::system_prompt_fine_tuned,
    },
    PromptVariant {
        id: "optimized",
        label: "Optimized Prompt (experimental)",
        description: "An experimental version of the prompt for lower token usage",
        render: prompt::system_prompt_compact,
    },
]);

impl PromptLibrary {
    pub const fn new(variants: &'static [PromptVariant]) -> Self {
        Self { variants }
    }

    /// Declaration order, unfiltered.
    pub fn list(&self) -> Vec<VariantInfo> {
        self.variants
            .iter()
            .map(|v| VariantInfo { id: v.id, label: v.label, description: v.description })
            .collect()
    }

    pub fn get(&self, id: &str) -> Result<&PromptVariant, PromptError> {
        self.variants
            .iter()
            .find(|v| v.id == id)
            .ok_or_else(|| PromptError::NotFound(id.to_string()))
    }

    pub fn resolve(&self, id: &str, options: &PromptOptions) -> Result<String, PromptError> {
        let variant = self.get(id)?;
        let doc = (variant.render)(options);
        tracing::debug!(variant = variant.id, bytes = doc.len(), "rendered prompt");
        Ok(doc)
    }
}

pub fn list_variants() -> Vec<VariantInfo> {
    LIBRARY.list()
}

pub fn resolve(id: &str, options: &PromptOptions) -> Result<String, PromptError> {
    LIBRARY.resolve(id, options)
}
