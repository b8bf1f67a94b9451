//! Structured filter evaluation and the resource type alias table

use crate::models::Resource;
use crate::search::query::SearchFilters;
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Built-in short names for common resource types.
///
/// Each alias expands to lower-case substrings of the canonical type string.
static BUILTIN_TYPE_ALIASES: Lazy<HashMap<&'static str, Vec<&'static str>>> = Lazy::new(|| {
    HashMap::from([
        ("vm", vec!["microsoft.compute/virtualmachines"]),
        ("storage", vec!["microsoft.storage/storageaccounts"]),
        ("aks", vec!["microsoft.containerservice/managedclusters"]),
        (
            "network",
            vec![
                "microsoft.network/virtualnetworks",
                "microsoft.network/networksecuritygroups",
                "microsoft.network/publicipaddresses",
                "microsoft.network/networkinterfaces",
                "microsoft.network/loadbalancers",
            ],
        ),
        ("keyvault", vec!["microsoft.keyvault/vaults"]),
        ("sql", vec!["microsoft.sql/servers", "microsoft.dbforpostgresql", "microsoft.dbformysql"]),
        ("acr", vec!["microsoft.containerregistry/registries"]),
        ("aci", vec!["microsoft.containerinstance/containergroups"]),
        ("webapp", vec!["microsoft.web/sites"]),
        ("function", vec!["microsoft.web/sites"]),
    ])
});

/// Alias lookup table: built-in aliases plus any configured extensions
#[derive(Debug, Clone, Default)]
pub struct TypeAliases {
    extra: HashMap<String, Vec<String>>,
}

impl TypeAliases {
    /// Table holding only the built-in aliases
    pub fn builtin() -> Self {
        Self::default()
    }

    /// Extend the built-in table. A configured alias replaces a built-in alias
    /// of the same name.
    pub fn with_extra(extra: &HashMap<String, Vec<String>>) -> Self {
        let extra: HashMap<String, Vec<String>> = extra
            .iter()
            .map(|(alias, expansions)| {
                (
                    alias.to_lowercase(),
                    expansions.iter().map(|e| e.to_lowercase()).collect(),
                )
            })
            .collect();

        Self { extra }
    }

    /// True when `alias` names a known alias whose expansion occurs in the
    /// (lower-cased) resource type
    pub fn matches(&self, alias: &str, type_lower: &str) -> bool {
        if let Some(expansions) = self.extra.get(alias) {
            return expansions.iter().any(|e| type_lower.contains(e.as_str()));
        }

        BUILTIN_TYPE_ALIASES
            .get(alias)
            .map_or(false, |expansions| expansions.iter().any(|e| type_lower.contains(e)))
    }

    /// All alias names, sorted
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = BUILTIN_TYPE_ALIASES
            .keys()
            .map(|k| k.to_string())
            .chain(self.extra.keys().cloned())
            .collect();
        names.sort();
        names.dedup();
        names
    }
}

/// Evaluates [`SearchFilters`] against resources
#[derive(Debug, Clone, Default)]
pub struct FilterMatcher {
    aliases: TypeAliases,
}

impl FilterMatcher {
    pub fn new(aliases: TypeAliases) -> Self {
        Self { aliases }
    }

    pub fn aliases(&self) -> &TypeAliases {
        &self.aliases
    }

    /// True when the resource passes every active filter
    pub fn matches(&self, resource: &Resource, filters: &SearchFilters) -> bool {
        self.matches_type(resource, filters.resource_type.as_deref())
            && contains_ci(&resource.location, filters.location.as_deref())
            && contains_ci(&resource.resource_group, filters.resource_group.as_deref())
            && matches_tags(resource, filters)
            && !is_excluded(resource, &filters.excluded_types)
    }

    fn matches_type(&self, resource: &Resource, filter: Option<&str>) -> bool {
        let filter = match filter {
            Some(f) if !f.is_empty() => f.to_lowercase(),
            _ => return true,
        };

        let type_lower = resource.resource_type.to_lowercase();

        type_lower.contains(&filter)
            || self.aliases.matches(&filter, &type_lower)
            || resource.type_suffix().to_lowercase().contains(&filter)
    }
}

/// Case-insensitive substring check; an unset or empty filter always passes
fn contains_ci(field: &str, filter: Option<&str>) -> bool {
    match filter {
        Some(f) if !f.is_empty() => field.to_lowercase().contains(&f.to_lowercase()),
        _ => true,
    }
}

fn matches_tags(resource: &Resource, filters: &SearchFilters) -> bool {
    filters.tags.iter().all(|(required_key, required_value)| {
        let required_key = required_key.to_lowercase();
        let required_value = required_value.to_lowercase();

        resource.tags.iter().any(|(key, value)| {
            key.to_lowercase().contains(&required_key)
                && (required_value.is_empty() || value.to_lowercase().contains(&required_value))
        })
    })
}

fn is_excluded(resource: &Resource, excluded_types: &[String]) -> bool {
    if excluded_types.is_empty() {
        return false;
    }

    let type_lower = resource.resource_type.to_lowercase();
    excluded_types
        .iter()
        .filter(|excluded| !excluded.is_empty())
        .any(|excluded| type_lower.contains(&excluded.to_lowercase()))
}
