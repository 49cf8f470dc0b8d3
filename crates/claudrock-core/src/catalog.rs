//! Short model names and the Bedrock identifiers they stand for
//!
//! Each client owns one [`ModelCatalog`]. Lookups never fail: an unknown
//! short name resolves to a fallback entry instead.

use serde::Serialize;

/// Display-only facts about a catalog model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ModelMetadata {
    pub generation: &'static str,
    pub cost: &'static str,
    pub best_for: &'static str,
}

/// One row of a catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CatalogEntry {
    pub short_name: &'static str,
    pub model_id: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<ModelMetadata>,
}

const fn entry(short_name: &'static str, model_id: &'static str) -> CatalogEntry {
    CatalogEntry {
        short_name,
        model_id,
        metadata: None,
    }
}

const fn described(
    short_name: &'static str,
    model_id: &'static str,
    generation: &'static str,
    cost: &'static str,
    best_for: &'static str,
) -> CatalogEntry {
    CatalogEntry {
        short_name,
        model_id,
        metadata: Some(ModelMetadata {
            generation,
            cost,
            best_for,
        }),
    }
}

static CLAUDE3_MODELS: [CatalogEntry; 3] = [
    entry("haiku", "anthropic.claude-3-haiku-20240307-v1:0"),
    entry("sonnet", "anthropic.claude-3-5-sonnet-20240620-v1:0"),
    entry("sonnet_v2", "anthropic.claude-3-5-sonnet-20241022-v2:0"),
];

static CLAUDE4_MODELS: [CatalogEntry; 10] = [
    described(
        "opus4.1",
        "anthropic.claude-opus-4-1-20250805-v1:0",
        "Claude 4",
        "Premium",
        "Most advanced reasoning, complex tasks",
    ),
    described(
        "opus4",
        "anthropic.claude-opus-4-20250514-v1:0",
        "Claude 4",
        "Premium",
        "Advanced reasoning, research",
    ),
    described(
        "sonnet4",
        "anthropic.claude-sonnet-4-20250514-v1:0",
        "Claude 4",
        "High",
        "Balanced performance, coding",
    ),
    described(
        "sonnet3.5",
        "anthropic.claude-3-5-sonnet-20240620-v1:0",
        "Claude 3.5",
        "Medium",
        "Advanced tasks, good balance",
    ),
    described(
        "sonnet3.5v2",
        "anthropic.claude-3-5-sonnet-20241022-v2:0",
        "Claude 3.5",
        "Medium",
        "Latest improvements",
    ),
    described(
        "haiku3.5",
        "anthropic.claude-3-5-haiku-20241022-v1:0",
        "Claude 3.5",
        "Low",
        "Fast responses, efficiency",
    ),
    described(
        "sonnet3.7",
        "anthropic.claude-3-7-sonnet-20250219-v1:0",
        "Claude 3.7",
        "Medium",
        "Enhanced capabilities",
    ),
    described(
        "haiku",
        "anthropic.claude-3-haiku-20240307-v1:0",
        "Claude 3",
        "Very Low",
        "Speed, cost optimization",
    ),
    described(
        "sonnet",
        "anthropic.claude-3-sonnet-20240229-v1:0",
        "Claude 3",
        "Low",
        "General purpose",
    ),
    described(
        "opus",
        "anthropic.claude-3-opus-20240229-v1:0",
        "Claude 3",
        "Medium",
        "Complex reasoning",
    ),
];

/// Immutable table of short names
#[derive(Debug, Clone, Copy)]
pub struct ModelCatalog {
    entries: &'static [CatalogEntry],
    default_entry: &'static CatalogEntry,
}

impl ModelCatalog {
    /// Claude 3 / 3.5 catalog (`haiku`, `sonnet`, `sonnet_v2`), defaulting to `haiku`
    pub fn claude3() -> Self {
        Self {
            entries: &CLAUDE3_MODELS,
            default_entry: &CLAUDE3_MODELS[0],
        }
    }

    /// Claude 4 catalog with every supported generation, defaulting to `sonnet4`
    pub fn claude4() -> Self {
        Self {
            entries: &CLAUDE4_MODELS,
            default_entry: &CLAUDE4_MODELS[2],
        }
    }

    /// All entries, in display order
    pub fn entries(&self) -> &'static [CatalogEntry] {
        self.entries
    }

    pub fn short_names(&self) -> impl Iterator<Item = &'static str> {
        self.entries.iter().map(|e| e.short_name)
    }

    /// The entry unknown names resolve to
    pub fn default_entry(&self) -> &'static CatalogEntry {
        self.default_entry
    }

    /// Exact lookup without fallback
    pub fn get(&self, short_name: &str) -> Option<&'static CatalogEntry> {
        self.entries.iter().find(|e| e.short_name == short_name)
    }

    pub fn contains(&self, short_name: &str) -> bool {
        self.get(short_name).is_some()
    }

    /// Resolve a short name, falling back to the catalog default
    pub fn resolve(&self, short_name: &str) -> &'static CatalogEntry {
        self.get(short_name).unwrap_or(self.default_entry)
    }

    /// Resolve a short name, falling back to `fallback` (and then to the
    /// catalog default if `fallback` is not in the table either)
    pub fn resolve_or(&self, short_name: &str, fallback: &str) -> &'static CatalogEntry {
        self.get(short_name)
            .or_else(|| self.get(fallback))
            .unwrap_or(self.default_entry)
    }

    /// Metadata for an exact short name
    pub fn metadata(&self, short_name: &str) -> Option<ModelMetadata> {
        self.get(short_name).and_then(|e| e.metadata)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claude3_known_names() {
        let catalog = ModelCatalog::claude3();
        assert_eq!(
            catalog.resolve("haiku").model_id,
            "anthropic.claude-3-haiku-20240307-v1:0"
        );
        assert_eq!(
            catalog.resolve("sonnet").model_id,
            "anthropic.claude-3-5-sonnet-20240620-v1:0"
        );
        assert_eq!(
            catalog.resolve("sonnet_v2").model_id,
            "anthropic.claude-3-5-sonnet-20241022-v2:0"
        );
    }

    #[test]
    fn test_every_entry_resolves_to_itself() {
        for catalog in [ModelCatalog::claude3(), ModelCatalog::claude4()] {
            for entry in catalog.entries() {
                assert_eq!(catalog.resolve(entry.short_name), entry);
            }
        }
    }

    #[test]
    fn test_unknown_names_fall_back_to_default() {
        let claude3 = ModelCatalog::claude3();
        assert_eq!(claude3.resolve("gpt-4").short_name, "haiku");
        assert_eq!(claude3.resolve("").short_name, "haiku");

        let claude4 = ModelCatalog::claude4();
        assert_eq!(claude4.resolve("opus5").short_name, "sonnet4");
        assert_eq!(claude4.default_entry().model_id, "anthropic.claude-sonnet-4-20250514-v1:0");
    }

    #[test]
    fn test_resolve_or_uses_operation_fallback() {
        let claude3 = ModelCatalog::claude3();
        assert_eq!(claude3.resolve_or("nope", "sonnet").short_name, "sonnet");
        assert_eq!(claude3.resolve_or("sonnet_v2", "sonnet").short_name, "sonnet_v2");
        assert_eq!(claude3.resolve_or("nope", "also-nope").short_name, "haiku");
    }

    #[test]
    fn test_short_names_differ_between_generations() {
        // "sonnet" means Claude 3.5 Sonnet in the small table but Claude 3 Sonnet in the large one
        assert_ne!(
            ModelCatalog::claude3().resolve("sonnet").model_id,
            ModelCatalog::claude4().resolve("sonnet").model_id
        );
    }

    #[test]
    fn test_claude4_metadata() {
        let catalog = ModelCatalog::claude4();
        assert_eq!(catalog.entries().len(), 10);
        assert!(catalog.entries().iter().all(|e| e.metadata.is_some()));

        let opus = catalog.metadata("opus4.1").unwrap();
        assert_eq!(opus.generation, "Claude 4");
        assert_eq!(opus.cost, "Premium");
        assert!(catalog.metadata("unknown").is_none());
        assert!(ModelCatalog::claude3().metadata("haiku").is_none());
    }
}
