//! Common fixtures for search integration tests

use resource_search::models::Resource;
use resource_search::search::{SearchConfig, SearchEngine};

/// Helper to create a search engine over the given catalog
pub fn create_test_engine(resources: Vec<Resource>) -> SearchEngine {
    create_engine_with_config(SearchConfig::default(), resources)
}

pub fn create_engine_with_config(config: SearchConfig, resources: Vec<Resource>) -> SearchEngine {
    let mut engine = SearchEngine::new(config).expect("valid search config");
    engine.set_catalog(resources);
    engine
}

/// Helper to create a test resource
pub fn create_test_resource(
    id: &str,
    name: &str,
    resource_type: &str,
    location: &str,
    resource_group: &str,
) -> Resource {
    Resource::new(id, name, resource_type)
        .with_location(location)
        .with_resource_group(resource_group)
        .with_status("Succeeded")
}

/// A small subscription worth of resources
pub fn sample_catalog() -> Vec<Resource> {
    vec![
        create_test_resource(
            "vm-web",
            "web-server-vm",
            "Microsoft.Compute/virtualMachines",
            "eastus",
            "rg-frontend",
        )
        .with_tag("env", "production")
        .with_tag("team", "web")
        .with_property("vmSize", "Standard_D2s_v3"),
        create_test_resource(
            "vm-batch",
            "batch-worker-01",
            "Microsoft.Compute/virtualMachines",
            "westeurope",
            "rg-batch",
        )
        .with_tag("env", "staging"),
        create_test_resource(
            "aks-main",
            "main-cluster",
            "Microsoft.ContainerService/managedClusters",
            "eastus",
            "rg-platform",
        )
        .with_tag("env", "production"),
        create_test_resource(
            "sql-orders",
            "orders-sql",
            "Microsoft.Sql/servers",
            "eastus2",
            "rg-data",
        )
        .with_tag("owner", "data-team"),
        create_test_resource(
            "st-logs",
            "logsarchive",
            "Microsoft.Storage/storageAccounts",
            "westus",
            "rg-platform",
        ),
        create_test_resource(
            "aci-jobs",
            "nightly-jobs",
            "Microsoft.ContainerInstance/containerGroups",
            "westus",
            "rg-batch",
        )
        .with_tag("schedule", "nightly"),
    ]
}
