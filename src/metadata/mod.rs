//! Project manifest (package.json) loading and metadata resolution.

mod resolver;

pub use resolver::{MetadataField, MetadataResolver, MetadataSource, ResolvedField};

use std::path::Path;

/// Project manifest filename.
pub const MANIFEST_FILE_NAME: &str = "package.json";

/// Fields read from package.json.
///
/// Only string values are taken; anything else is treated as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectManifest {
    /// `name`
    pub name: Option<String>,

    /// `version`
    pub version: Option<String>,

    /// `description`
    pub description: Option<String>,

    /// `author`, either the string form or `{ "name", "email" }` rendered as "Name <email>".
    pub author: Option<String>,
}

impl ProjectManifest {
    /// Parses package.json contents.
    pub fn parse(contents: &str) -> serde_json::Result<Self> {
        let value: serde_json::Value = serde_json::from_str(contents)?;

        let string_field = |key: &str| {
            value
                .get(key)
                .and_then(|v| v.as_str())
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(String::from)
        };

        Ok(Self {
            name: string_field("name"),
            version: string_field("version"),
            description: string_field("description"),
            author: value.get("author").and_then(author_text),
        })
    }
}

fn author_text(author: &serde_json::Value) -> Option<String> {
    match author {
        serde_json::Value::String(text) => Some(text.trim().to_string()).filter(|t| !t.is_empty()),
        serde_json::Value::Object(person) => {
            let name = person
                .get("name")
                .and_then(|v| v.as_str())
                .map(str::trim)
                .filter(|v| !v.is_empty())?;
            match person
                .get("email")
                .and_then(|v| v.as_str())
                .filter(|v| !v.is_empty())
            {
                Some(email) => Some(format!("{name} <{email}>")),
                None => Some(name.to_string()),
            }
        }
        _ => None,
    }
}

/// Loads package.json from the project root.
///
/// A missing or unparseable manifest yields `None`; callers fall through to the next
/// metadata tier.
pub fn load_manifest(project_root: &Path) -> Option<ProjectManifest> {
    let path = project_root.join(MANIFEST_FILE_NAME);
    let contents = match std::fs::read_to_string(&path) {
        Ok(contents) => contents,
        Err(e) => {
            log::debug!("No usable {}: {}", path.display(), e);
            return None;
        }
    };

    match ProjectManifest::parse(&contents) {
        Ok(manifest) => Some(manifest),
        Err(e) => {
            log::debug!("Ignoring unparseable {}: {}", path.display(), e);
            None
        }
    }
}
