use crate::errors::PromptError;
use crate::options::{DesignScheme, PromptOptions, SupabaseConnection};
use crate::safety::{MarkupAllowlist, TagName};
use fs_err as fs;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub schema_version: String,
    pub variant: String,
    pub out_dir: String,
    pub cwd: String,
    pub allowed_html_elements: MarkupAllowlist,
    pub modification_tag_name: TagName,
    pub design_scheme: Option<DesignScheme>,
    pub supabase: Option<SupabaseConnection>,
}

impl Default for Config {
    fn default() -> Self {
        let opts = PromptOptions::default();
        Self {
            schema_version: "2025-10-01".into(),
            variant: "default".into(),
            out_dir: ".vibe/prompts".into(),
            cwd: opts.cwd,
            allowed_html_elements: opts.allowed_html_elements,
            modification_tag_name: opts.modification_tag_name,
            design_scheme: None,
            supabase: None,
        }
    }
}

impl Config {
    /// Load a config file; the format follows the extension (toml, yaml/yml, json).
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let cfg = read_structured(path)?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(cfg)
    }

    pub fn prompt_options(&self) -> PromptOptions {
        PromptOptions {
            cwd: self.cwd.clone(),
            allowed_html_elements: self.allowed_html_elements.clone(),
            modification_tag_name: self.modification_tag_name.clone(),
            design_scheme: self.design_scheme.clone(),
            supabase: self.supabase.clone(),
        }
    }
}

pub fn load_design_scheme(path: &Path) -> anyhow::Result<DesignScheme> {
    read_structured(path)
}

fn read_structured<T: DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let raw = fs::read_to_string(path)?;
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();
    let value = match ext.as_str() {
        "toml" => toml::from_str(&raw)?,
        "yaml" | "yml" => serde_yaml::from_str(&raw)?,
        "json" => serde_json::from_str(&raw)?,
        other => {
            return Err(PromptError::Config(format!(
                "unsupported config format {:?} for {}",
                other,
                path.display()
            ))
            .into())
        }
    };
    Ok(value)
}
