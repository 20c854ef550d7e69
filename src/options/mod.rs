use crate::safety::{MarkupAllowlist, TagName};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Runtime inputs for one prompt render. Immutable for the duration of a call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PromptOptions {
    pub cwd: String,
    pub allowed_html_elements: MarkupAllowlist,
    pub modification_tag_name: TagName,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub design_scheme: Option<DesignScheme>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supabase: Option<SupabaseConnection>,
}

impl Default for PromptOptions {
    fn default() -> Self {
        Self {
            cwd: "/home/project".into(),
            allowed_html_elements: MarkupAllowlist::default(),
            modification_tag_name: TagName::default(),
            design_scheme: None,
            supabase: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorRole {
    Primary,
    Secondary,
    Background,
    Text,
    Accent,
}

impl ColorRole {
    /// Order in which roles are listed in the document.
    pub const ALL: [ColorRole; 5] = [
        ColorRole::Primary,
        ColorRole::Secondary,
        ColorRole::Background,
        ColorRole::Text,
        ColorRole::Accent,
    ];

    pub fn key(self) -> &'static str {
        match self {
            ColorRole::Primary => "primary",
            ColorRole::Secondary => "secondary",
            ColorRole::Background => "background",
            ColorRole::Text => "text",
            ColorRole::Accent => "accent",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ColorRole::Primary => "Primary Color",
            ColorRole::Secondary => "Secondary Color",
            ColorRole::Background => "Background Color",
            ColorRole::Text => "Text Color",
            ColorRole::Accent => "Accent Color",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DesignScheme {
    pub name: String,
    #[serde(default)]
    pub colors: BTreeMap<String, String>,
}

impl DesignScheme {
    /// Known roles present in `colors`, in [`ColorRole::ALL`] order.
    /// Missing roles are skipped; keys that are not a known role are ignored.
    pub fn palette(&self) -> Vec<(ColorRole, &str)> {
        ColorRole::ALL
            .iter()
            .filter_map(|role| self.colors.get(role.key()).map(|c| (*role, c.as_str())))
            .collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supabase_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anon_key: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupabaseConnection {
    #[serde(default)]
    pub is_connected: bool,
    #[serde(default)]
    pub has_selected_project: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credentials: Option<Credentials>,
}

/// Where the user stands with the hosted database, as seen by the prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState<'a> {
    Disconnected,
    ConnectedNoProject,
    ConnectedIncompleteCredentials,
    ConnectedWithCredentials { url: &'a str, anon_key: &'a str },
}

impl SupabaseConnection {
    pub fn state(&self) -> ConnectionState<'_> {
        if !self.is_connected {
            return ConnectionState::Disconnected;
        }
        if !self.has_selected_project {
            return ConnectionState::ConnectedNoProject;
        }
        let creds = self.credentials.as_ref();
        let url = creds.and_then(|c| c.supabase_url.as_deref()).filter(|s| !s.is_empty());
        let anon_key = creds.and_then(|c| c.anon_key.as_deref()).filter(|s| !s.is_empty());
        match (url, anon_key) {
            (Some(url), Some(anon_key)) => ConnectionState::ConnectedWithCredentials { url, anon_key },
            _ => ConnectionState::ConnectedIncompleteCredentials,
        }
    }
}
