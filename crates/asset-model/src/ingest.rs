//! Fragment ingestion boundary
//!
//! The fetched payload arrives as the camelCase JSON of the asset-node
//! GraphQL fragment. [`ingest`] turns it into an [`AssetNodeDefinition`]
//! exactly once: the permissive "any" type and the synthetic asset-group
//! job names are recognised here and recorded as tagged variants and flags,
//! so nothing downstream compares against magic strings.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::definition::{
    AssetNodeDefinition, AutoMaterializePolicy, AutoMaterializePolicyType, ConfigField,
    ConfigSchema, ConfigType, FreshnessPolicy, JobRef, NeighborAsset, RepositoryRef, TypeInfo,
    TypeSummary,
};
use crate::key::{AssetKey, AssetKeyError};
use crate::live::{LiveDataMap, LiveStatus};
use crate::metadata::{MetadataEntry, MetadataValue};

/// Type name the schema layer uses for "accepts anything"
pub const DEFAULT_ANY_TYPE_SENTINEL: &str = "Any";

/// Name prefix of synthetic asset-group jobs
pub const DEFAULT_HIDDEN_JOB_PREFIX: &str = "__ASSET_JOB";

/// Conventions applied while ingesting
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestOptions {
    /// Config type key / type display name treated as untyped
    pub any_type_sentinel: String,
    /// Job-name prefix marking synthetic asset-group jobs
    pub hidden_job_prefix: String,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self {
            any_type_sentinel: DEFAULT_ANY_TYPE_SENTINEL.to_string(),
            hidden_job_prefix: DEFAULT_HIDDEN_JOB_PREFIX.to_string(),
        }
    }
}

/// `assetKey { path }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetKeyFragment {
    pub path: Vec<String>,
}

impl AssetKeyFragment {
    fn into_key(self) -> Result<AssetKey, IngestError> {
        AssetKey::new(self.path).map_err(IngestError::from)
    }
}

/// The asset-node definition fragment as fetched
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetNodeFragment {
    #[serde(default)]
    pub id: Option<String>,
    pub asset_key: AssetKeyFragment,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub op_version: Option<String>,
    #[serde(default)]
    pub group_name: Option<String>,
    #[serde(default)]
    pub compute_kind: Option<String>,
    #[serde(default)]
    pub job_names: Vec<String>,
    #[serde(default)]
    pub auto_materialize_policy: Option<AutoMaterializePolicyFragment>,
    #[serde(default)]
    pub freshness_policy: Option<FreshnessPolicyFragment>,
    #[serde(default)]
    pub partition_definition: Option<PartitionDefinitionFragment>,
    #[serde(default)]
    pub repository: Option<RepositoryFragment>,
    #[serde(default)]
    pub required_resources: Vec<ResourceRequirementFragment>,
    #[serde(default)]
    pub config_field: Option<ConfigFieldFragment>,
    #[serde(default, rename = "type")]
    pub output_type: Option<DagsterTypeFragment>,
    #[serde(default)]
    pub metadata_entries: Vec<MetadataEntryFragment>,
    #[serde(default)]
    pub op_names: Vec<String>,
    #[serde(default)]
    pub graph_name: Option<String>,
    #[serde(default)]
    pub is_source: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutoMaterializePolicyFragment {
    pub policy_type: AutoMaterializePolicyType,
    #[serde(default)]
    pub max_materializations_per_minute: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FreshnessPolicyFragment {
    pub maximum_lag_minutes: f64,
    #[serde(default)]
    pub cron_schedule: Option<String>,
    #[serde(default)]
    pub cron_schedule_timezone: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartitionDefinitionFragment {
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryFragment {
    pub id: String,
    pub name: String,
    pub location: LocationFragment,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationFragment {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceRequirementFragment {
    pub resource_key: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigFieldFragment {
    #[serde(default)]
    pub name: Option<String>,
    pub config_type: ConfigTypeFragment,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigTypeFragment {
    pub key: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub fields: Vec<ConfigTypeFieldFragment>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigTypeFieldFragment {
    pub name: String,
    pub config_type_key: String,
    #[serde(default)]
    pub is_required: bool,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DagsterTypeFragment {
    pub display_name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Metadata entry; the value fields depend on `__typename`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetadataEntryFragment {
    #[serde(rename = "__typename")]
    pub typename: String,
    pub label: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

/// Neighbor descriptor as fetched
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NeighborFragment {
    pub asset_key: AssetKeyFragment,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub compute_kind: Option<String>,
    #[serde(default)]
    pub is_source: bool,
}

/// Live data row as fetched
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiveDataFragment {
    pub asset_key: AssetKeyFragment,
    #[serde(flatten)]
    pub status: LiveStatus,
}

/// Everything fetched for one detail page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetViewBundle {
    pub asset_node: AssetNodeFragment,
    #[serde(default)]
    pub upstream: Vec<NeighborFragment>,
    #[serde(default)]
    pub downstream: Vec<NeighborFragment>,
    #[serde(default)]
    pub live_data: Vec<LiveDataFragment>,
}

/// Typed result of [`ingest_bundle`]
#[derive(Debug, Clone, PartialEq)]
pub struct IngestedBundle {
    pub definition: AssetNodeDefinition,
    pub upstream: Vec<NeighborAsset>,
    pub downstream: Vec<NeighborAsset>,
    pub live: LiveDataMap,
}

/// Convert a fetched fragment into a typed definition
///
/// # Errors
/// Returns error on an empty asset key or a malformed freshness policy.
/// Metadata entries never fail: unknown types become
/// [`MetadataValue::Unsupported`] and entries without a usable value
/// become [`MetadataValue::Null`].
pub fn ingest(
    fragment: AssetNodeFragment,
    options: &IngestOptions,
) -> Result<AssetNodeDefinition, IngestError> {
    let key = fragment.asset_key.into_key()?;

    let jobs: Vec<JobRef> = fragment
        .job_names
        .into_iter()
        .map(|name| JobRef {
            hidden: name.starts_with(&options.hidden_job_prefix),
            name,
        })
        .collect();
    let hidden = jobs.iter().filter(|job| job.hidden).count();
    if hidden > 0 {
        tracing::debug!(asset = %key, hidden, "marked asset-group jobs hidden");
    }

    let freshness_policy = fragment
        .freshness_policy
        .map(|policy| freshness_policy(&key, policy))
        .transpose()?;

    let metadata: Vec<MetadataEntry> = fragment
        .metadata_entries
        .into_iter()
        .map(metadata_entry)
        .collect();

    Ok(AssetNodeDefinition {
        description: fragment.description,
        op_version: fragment.op_version,
        group_name: fragment.group_name,
        compute_kind: fragment.compute_kind,
        jobs,
        auto_materialize_policy: fragment.auto_materialize_policy.map(|p| AutoMaterializePolicy {
            policy_type: p.policy_type,
            max_materializations_per_minute: p.max_materializations_per_minute,
        }),
        freshness_policy,
        partition_description: fragment.partition_definition.map(|p| p.description),
        repository: fragment.repository.map(|r| RepositoryRef {
            id: r.id,
            name: r.name,
            location_name: r.location.name,
        }),
        required_resources: fragment
            .required_resources
            .into_iter()
            .map(|r| r.resource_key)
            .collect(),
        config: config_schema(fragment.config_field, options),
        output_type: type_info(fragment.output_type, options),
        metadata,
        op_names: fragment.op_names,
        graph_name: fragment.graph_name,
        is_source: fragment.is_source,
        key,
    })
}

/// Ingest the definition, neighbors and live data of one detail page
///
/// # Errors
/// Returns the first error from the definition or any neighbor key
pub fn ingest_bundle(
    bundle: AssetViewBundle,
    options: &IngestOptions,
) -> Result<IngestedBundle, IngestError> {
    let definition = ingest(bundle.asset_node, options)?;
    let upstream = bundle
        .upstream
        .into_iter()
        .map(neighbor)
        .collect::<Result<Vec<_>, _>>()?;
    let downstream = bundle
        .downstream
        .into_iter()
        .map(neighbor)
        .collect::<Result<Vec<_>, _>>()?;
    let live = bundle
        .live_data
        .into_iter()
        .map(|row| -> Result<_, IngestError> { Ok((row.asset_key.into_key()?, row.status)) })
        .collect::<Result<LiveDataMap, IngestError>>()?;

    tracing::debug!(
        asset = %definition.key,
        upstream = upstream.len(),
        downstream = downstream.len(),
        live = live.len(),
        "ingested asset view bundle"
    );

    Ok(IngestedBundle {
        definition,
        upstream,
        downstream,
        live,
    })
}

/// Parse and ingest a bundle from JSON text
///
/// # Errors
/// Returns [`IngestError::Json`] on malformed JSON, otherwise as [`ingest_bundle`]
pub fn ingest_bundle_json(json: &str, options: &IngestOptions) -> Result<IngestedBundle, IngestError> {
    let bundle: AssetViewBundle = serde_json::from_str(json)?;
    ingest_bundle(bundle, options)
}

fn neighbor(fragment: NeighborFragment) -> Result<NeighborAsset, IngestError> {
    Ok(NeighborAsset {
        key: fragment.asset_key.into_key()?,
        description: fragment.description,
        compute_kind: fragment.compute_kind,
        is_source: fragment.is_source,
    })
}

fn freshness_policy(
    key: &AssetKey,
    policy: FreshnessPolicyFragment,
) -> Result<FreshnessPolicy, IngestError> {
    let lag = policy.maximum_lag_minutes;
    if !lag.is_finite() || lag < 0.0 {
        return Err(IngestError::InvalidFreshnessPolicy {
            asset: key.to_string(),
            maximum_lag_minutes: lag,
        });
    }
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let maximum_lag_minutes = lag.round() as u64;
    Ok(FreshnessPolicy {
        maximum_lag_minutes,
        cron_schedule: policy.cron_schedule,
        cron_schedule_timezone: policy.cron_schedule_timezone,
    })
}

fn config_schema(field: Option<ConfigFieldFragment>, options: &IngestOptions) -> ConfigSchema {
    match field {
        Some(field) if field.config_type.key != options.any_type_sentinel => {
            let ty = field.config_type;
            ConfigSchema::Typed(ConfigType {
                key: ty.key,
                description: ty.description,
                fields: ty
                    .fields
                    .into_iter()
                    .map(|f| ConfigField {
                        name: f.name,
                        type_key: f.config_type_key,
                        is_required: f.is_required,
                        description: f.description,
                    })
                    .collect(),
            })
        }
        _ => ConfigSchema::Untyped,
    }
}

fn type_info(ty: Option<DagsterTypeFragment>, options: &IngestOptions) -> TypeInfo {
    match ty {
        Some(ty) if ty.display_name != options.any_type_sentinel => TypeInfo::Typed(TypeSummary {
            display_name: ty.display_name,
            description: ty.description,
        }),
        _ => TypeInfo::Untyped,
    }
}

fn metadata_entry(fragment: MetadataEntryFragment) -> MetadataEntry {
    let MetadataEntryFragment {
        typename,
        label,
        description,
        fields,
    } = fragment;

    let string = |field: &str| fields.get(field).and_then(Value::as_str).map(str::to_string);

    let value = match typename.as_str() {
        "TextMetadataEntry" => string("text").map(MetadataValue::Text),
        "MarkdownMetadataEntry" => string("mdStr").map(MetadataValue::Markdown),
        "UrlMetadataEntry" => string("url").map(MetadataValue::Url),
        "PathMetadataEntry" => string("path").map(MetadataValue::Path),
        "NotebookMetadataEntry" => string("path").map(MetadataValue::Notebook),
        "JobMetadataEntry" => string("jobName").map(MetadataValue::Job),
        "JsonMetadataEntry" => string("jsonString").map(|raw| match serde_json::from_str(&raw) {
            Ok(parsed) => MetadataValue::Json(parsed),
            Err(err) => {
                tracing::debug!(label = %label, error = %err, "json metadata is not json; showing raw text");
                MetadataValue::Text(raw)
            }
        }),
        // Values outside i64 arrive only as their string representation.
        "IntMetadataEntry" => fields
            .get("intValue")
            .and_then(Value::as_i64)
            .map(MetadataValue::Int)
            .or_else(|| string("intRepr").map(MetadataValue::Text)),
        "FloatMetadataEntry" => fields
            .get("floatValue")
            .and_then(Value::as_f64)
            .map(MetadataValue::Float),
        "BoolMetadataEntry" => fields
            .get("boolValue")
            .and_then(Value::as_bool)
            .map(MetadataValue::Bool),
        "NullMetadataEntry" => Some(MetadataValue::Null),
        "AssetMetadataEntry" => fields
            .get("assetKey")
            .cloned()
            .and_then(|v| serde_json::from_value::<AssetKeyFragment>(v).ok())
            .and_then(|key| key.into_key().ok())
            .map(MetadataValue::Asset),
        "PythonArtifactMetadataEntry" => string("module")
            .zip(string("name"))
            .map(|(module, name)| MetadataValue::PythonArtifact { module, name }),
        _ => {
            tracing::debug!(label = %label, typename = %typename, "metadata entry type not modelled");
            Some(MetadataValue::Unsupported {
                typename: typename.clone(),
            })
        }
    };

    let value = value.unwrap_or_else(|| {
        tracing::debug!(label = %label, typename = %typename, "metadata entry without a usable value");
        MetadataValue::Null
    });

    MetadataEntry {
        label,
        description,
        value,
    }
}

/// Errors raised at the ingestion boundary
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    /// Malformed JSON payload
    #[error("invalid fragment json: {0}")]
    Json(#[from] serde_json::Error),

    /// Asset key without usable segments
    #[error("invalid asset key: {0}")]
    AssetKey(#[from] AssetKeyError),

    /// Negative or non-finite lag
    #[error("invalid freshness policy on {asset}: maximum lag {maximum_lag_minutes}")]
    InvalidFreshnessPolicy {
        asset: String,
        maximum_lag_minutes: f64,
    },
}
