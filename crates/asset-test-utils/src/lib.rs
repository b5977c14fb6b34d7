//! Testing utilities for asset-lens workspace
//!
//! Shared fixtures for definitions, neighbors and fetched fragments.

#![allow(missing_docs)]

use asset_model::{
    AssetKey, AssetNodeDefinition, ConfigField, ConfigSchema, ConfigType, FreshnessPolicy,
    JobRef, LiveDataMap, LiveStatus, MetadataEntry, MetadataValue, NeighborAsset, RepositoryRef,
    TypeInfo, TypeSummary,
};
use serde_json::{json, Value};

pub fn key(path: &str) -> AssetKey {
    path.parse().unwrap()
}

pub fn repository(name: &str, location: &str) -> RepositoryRef {
    RepositoryRef {
        id: format!("{name}@{location}"),
        name: name.to_string(),
        location_name: location.to_string(),
    }
}

/// Definition with only a key
pub fn bare_definition(path: &str) -> AssetNodeDefinition {
    AssetNodeDefinition::new(key(path))
}

/// Definition with every optional panel populated
pub fn full_definition() -> AssetNodeDefinition {
    let mut def = AssetNodeDefinition::new(key("warehouse/orders"));
    def.description = Some("Cleaned **orders** table.".to_string());
    def.op_version = Some("v3".to_string());
    def.group_name = Some("sales".to_string());
    def.compute_kind = Some("dbt".to_string());
    def.jobs = vec![JobRef::hidden("__ASSET_JOB_0"), JobRef::visible("nightly_refresh")];
    def.freshness_policy = Some(FreshnessPolicy {
        maximum_lag_minutes: 60,
        cron_schedule: Some("0 9 * * *".to_string()),
        cron_schedule_timezone: Some("UTC".to_string()),
    });
    def.partition_description = Some("Daily, starting 2024-01-01 UTC.".to_string());
    def.repository = Some(repository("analytics", "prod"));
    def.required_resources = vec![
        "warehouse".to_string(),
        "IO_manager".to_string(),
        "alerts".to_string(),
    ];
    def.config = ConfigSchema::Typed(ConfigType {
        key: "Shape.orders".to_string(),
        description: None,
        fields: vec![ConfigField {
            name: "limit".to_string(),
            type_key: "Int".to_string(),
            is_required: true,
            description: Some("Row cap".to_string()),
        }],
    });
    def.output_type = TypeInfo::Typed(TypeSummary {
        display_name: "DataFrame".to_string(),
        description: None,
    });
    def.metadata = vec![
        MetadataEntry::new("owner", MetadataValue::Text("data-eng".to_string())),
        MetadataEntry::new("source", MetadataValue::Asset(key("raw/orders"))),
        MetadataEntry::new("loader", MetadataValue::Job("load_orders".to_string())),
    ];
    def.op_names = vec!["orders".to_string()];
    def
}

pub fn neighbors(paths: &[&str]) -> Vec<NeighborAsset> {
    paths.iter().map(|p| NeighborAsset::new(key(p))).collect()
}

pub fn live(entries: &[(&str, LiveStatus)]) -> LiveDataMap {
    entries.iter().map(|(p, s)| (key(p), *s)).collect()
}

/// Fetched bundle JSON for `full_definition`'s asset
pub fn bundle_json() -> Value {
    json!({
        "assetNode": {
            "id": "analytics.prod.warehouse.orders",
            "assetKey": { "path": ["warehouse", "orders"] },
            "description": "Cleaned orders table.",
            "opVersion": "v3",
            "jobNames": ["__ASSET_JOB_0", "nightly_refresh"],
            "repository": { "id": "r1", "name": "analytics", "location": { "name": "prod" } },
            "requiredResources": [{ "resourceKey": "warehouse" }, { "resourceKey": "alerts" }],
            "configField": { "configType": { "key": "Any" } },
            "type": { "displayName": "DataFrame" },
            "metadataEntries": [
                { "__typename": "TextMetadataEntry", "label": "owner", "text": "data-eng" }
            ],
            "opNames": ["orders"]
        },
        "upstream": [
            { "assetKey": { "path": ["raw", "orders"] }, "isSource": true }
        ],
        "downstream": [
            { "assetKey": { "path": ["marts", "revenue"] } }
        ],
        "liveData": [
            { "assetKey": { "path": ["raw", "orders"] }, "status": "MATERIALIZED", "timestampMs": 1700000000000_i64 }
        ]
    })
}
