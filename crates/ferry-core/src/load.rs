use serde::{Deserialize, Serialize};

/// How a single load applies to the target object.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LoadMode {
    /// Append to the target's contents (default).
    #[default]
    Append,
    /// Replace the target's contents.
    FullRefresh,
}

/// A load-job description consumed by the external bulk loader.
///
/// Parsed once per source from its template file, then resolved per staged
/// object: the stream placeholder is replaced with the concrete object URI
/// and the mode is optionally overridden.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadJobTemplate {
    /// Source connection identifier.
    pub source_conn: String,
    /// Source stream placeholder; replaced with the staged object URI.
    pub source_stream: String,
    /// Target connection identifier.
    pub target_conn: String,
    /// Target object identifier, e.g. `analytics.events`.
    pub target_object: String,
    #[serde(default)]
    pub mode: LoadMode,
}

impl LoadJobTemplate {
    /// Clone the template with the stream pointed at `object_uri`, applying
    /// `mode_override` when present.
    pub fn resolve(&self, object_uri: &str, mode_override: Option<LoadMode>) -> LoadJobTemplate {
        let mut job = self.clone();
        job.source_stream = object_uri.to_string();
        if let Some(mode) = mode_override {
            job.mode = mode;
        }
        job
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn template() -> LoadJobTemplate {
        LoadJobTemplate {
            source_conn: "GCS".to_string(),
            source_stream: "{object}".to_string(),
            target_conn: "WAREHOUSE".to_string(),
            target_object: "analytics.events".to_string(),
            mode: LoadMode::Append,
        }
    }

    #[test]
    fn test_resolve_replaces_stream() {
        let job = template().resolve("gs://b/exports/f1.json", None);
        assert_eq!(job.source_stream, "gs://b/exports/f1.json");
        assert_eq!(job.mode, LoadMode::Append);
        assert_eq!(job.target_object, "analytics.events");
    }

    #[test]
    fn test_resolve_applies_mode_override() {
        let job = template().resolve("gs://b/f.json", Some(LoadMode::FullRefresh));
        assert_eq!(job.mode, LoadMode::FullRefresh);
    }

    #[test]
    fn test_resolve_does_not_mutate_template() {
        let tmpl = template();
        let _ = tmpl.resolve("gs://b/f.json", Some(LoadMode::FullRefresh));
        assert_eq!(tmpl.source_stream, "{object}");
        assert_eq!(tmpl.mode, LoadMode::Append);
    }

    #[test]
    fn test_mode_serializes_kebab_case() {
        assert_eq!(
            serde_json::to_string(&LoadMode::FullRefresh).unwrap(),
            "\"full-refresh\""
        );
        assert_eq!(serde_json::to_string(&LoadMode::Append).unwrap(), "\"append\"");
    }
}
