//! Asset node definition view
//!
//! [`AssetNodeDefinitionView::build`] is a pure function of the typed
//! definition, its neighbors, the live-status map and the [`ViewConfig`].
//! Absent optional fields suppress their panel; nothing here fails.

use asset_filter::Searchable;
use asset_model::{
    status_of, AssetKey, AssetNodeDefinition, AutoMaterializePolicy, AutoMaterializePolicyType,
    FilterQuery, FreshnessPolicy, LiveDataMap, MetadataEntry, MetadataValue, NeighborAsset,
};
use serde::Serialize;

use crate::collate;
use crate::config::ViewConfig;
use crate::links::{asset_path, job_path, lineage_path, resource_path, LineageScope, RepoAddress};
use crate::panels::{
    Annotations, AutoMaterializePanel, ConfigPanel, EmptyState, FreshnessPanel, Link,
    MetadataPanel, MetadataRow, NeighborEntry, NeighborSection, ResourcesPanel, Section,
    TypePanel, UnderlyingOps,
};

/// Inputs of one detail page
#[derive(Debug, Clone, Copy)]
pub struct ViewInputs<'a> {
    /// The asset being shown
    pub definition: &'a AssetNodeDefinition,
    /// Direct upstream neighbors
    pub upstream: &'a [NeighborAsset],
    /// Direct downstream neighbors
    pub downstream: &'a [NeighborAsset],
    /// Live materialization status by asset
    pub live: &'a LiveDataMap,
    /// Query narrowing both neighbor lists
    pub neighbor_filter: Option<&'a FilterQuery>,
}

impl<'a> ViewInputs<'a> {
    /// Inputs without a neighbor filter
    #[must_use]
    pub fn new(
        definition: &'a AssetNodeDefinition,
        upstream: &'a [NeighborAsset],
        downstream: &'a [NeighborAsset],
        live: &'a LiveDataMap,
    ) -> Self {
        Self {
            definition,
            upstream,
            downstream,
            live,
            neighbor_filter: None,
        }
    }

    /// Narrow both neighbor lists by `query`
    #[must_use]
    pub fn with_neighbor_filter(mut self, query: &'a FilterQuery) -> Self {
        self.neighbor_filter = Some(query);
        self
    }
}

/// Two-column detail view of one asset definition
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssetNodeDefinitionView {
    /// Asset identity
    pub key: AssetKey,
    /// `a / b / c`
    pub display_name: String,
    /// Resolved owning repository
    pub repository: Option<RepoAddress>,
    /// Badges beside the name
    pub annotations: Annotations,
    /// Markdown description
    pub description: Section<String>,
    /// Upstream neighbors
    pub upstream: NeighborSection,
    /// Downstream neighbors
    pub downstream: NeighborSection,
    /// Required resources, collation-sorted
    pub required_resources: ResourcesPanel,
    /// Config schema
    pub config: ConfigPanel,
    /// Output type
    pub output_type: TypePanel,
    /// Definition metadata table
    pub metadata: MetadataPanel,
    /// Code version, when set
    pub code_version: Option<String>,
    /// Freshness policy, when set
    pub freshness: Option<FreshnessPanel>,
    /// Auto-materialize policy, when set
    pub auto_materialize: Option<AutoMaterializePanel>,
    /// Partition definition description, when partitioned
    pub partitions: Option<String>,
}

impl AssetNodeDefinitionView {
    /// Derive the view
    #[must_use]
    pub fn build(inputs: &ViewInputs<'_>, config: &ViewConfig) -> Self {
        let def = inputs.definition;
        let repository = RepoAddress::resolve(def.repository.as_ref());
        if repository.is_none() && (!def.required_resources.is_empty() || def.visible_jobs().next().is_some()) {
            tracing::warn!(asset = %def.key, "repository unresolvable; rendering resource and job links unlinked");
        }

        let view = Self {
            key: def.key.clone(),
            display_name: def.key.display_name(),
            annotations: annotations(def, repository.as_ref()),
            description: match &def.description {
                Some(text) if !text.trim().is_empty() => Section::Content(text.clone()),
                _ => Section::Empty(EmptyState::new("No description provided")),
            },
            upstream: neighbor_section(&def.key, LineageScope::Upstream, inputs.upstream, inputs, config),
            downstream: neighbor_section(
                &def.key,
                LineageScope::Downstream,
                inputs.downstream,
                inputs,
                config,
            ),
            required_resources: required_resources(&def.required_resources, repository.as_ref()),
            config: match def.config.typed() {
                Some(ty) => Section::Content(ty.clone()),
                None => Section::Empty(EmptyState::with_docs(
                    "No configuration",
                    &config.docs.config_schema,
                )),
            },
            output_type: match def.output_type.typed() {
                Some(summary) => Section::Content(summary.clone()),
                None => Section::Empty(EmptyState::with_docs("No type data", &config.docs.type_system)),
            },
            metadata: metadata(&def.metadata, repository.as_ref(), config),
            code_version: def.op_version.clone(),
            freshness: def.freshness_policy.as_ref().map(freshness),
            auto_materialize: def.auto_materialize_policy.as_ref().map(auto_materialize),
            partitions: def.partition_description.clone(),
            repository,
        };

        tracing::debug!(
            asset = %view.key,
            upstream = view.upstream.total,
            downstream = view.downstream.total,
            resources = def.required_resources.len(),
            metadata = def.metadata.len(),
            "built asset definition view"
        );
        view
    }
}

fn annotations(def: &AssetNodeDefinition, repository: Option<&RepoAddress>) -> Annotations {
    let jobs = def
        .visible_jobs()
        .map(|job| Link {
            text: job.name.clone(),
            href: repository.map(|addr| job_path(addr, &job.name)),
        })
        .collect();

    let underlying = match (&def.graph_name, def.op_names.as_slice()) {
        (Some(graph), _) => UnderlyingOps::Graph {
            name: graph.clone(),
        },
        (None, [op]) if *op == def.key.join("__") => UnderlyingOps::Hidden,
        (None, [op]) => UnderlyingOps::Op { name: op.clone() },
        (None, []) => UnderlyingOps::Hidden,
        (None, ops) => UnderlyingOps::Ops { count: ops.len() },
    };

    Annotations {
        jobs,
        underlying,
        source_asset: def.is_source,
        group_name: def.group_name.clone(),
        compute_kind: def.compute_kind.clone(),
    }
}

fn neighbor_section(
    key: &AssetKey,
    scope: LineageScope,
    neighbors: &[NeighborAsset],
    inputs: &ViewInputs<'_>,
    config: &ViewConfig,
) -> NeighborSection {
    let matching: Vec<&NeighborAsset> = match inputs.neighbor_filter {
        Some(query) if !query.is_identity() => neighbors
            .iter()
            .filter(|n| n.key.matches_query(query))
            .collect(),
        _ => neighbors.iter().collect(),
    };
    let total = matching.len();
    let overflow = total.saturating_sub(config.neighbor_display_limit.get());

    let entries = if matching.is_empty() {
        let message = match (scope, inputs.neighbor_filter) {
            (_, Some(query)) if !query.is_identity() && !neighbors.is_empty() => {
                format!("No {} assets match \"{}\"", scope.as_str(), query.raw())
            }
            (LineageScope::Upstream, _) => "No upstream assets".to_string(),
            (LineageScope::Downstream, _) => "No downstream assets".to_string(),
        };
        Section::Empty(EmptyState::new(message))
    } else {
        Section::Content(
            matching
                .into_iter()
                .take(config.neighbor_display_limit.get())
                .map(|n| NeighborEntry {
                    key: n.key.clone(),
                    link: Link {
                        text: n.key.display_name(),
                        href: Some(asset_path(&n.key)),
                    },
                    status: status_of(inputs.live, &n.key),
                    is_source: n.is_source,
                    compute_kind: n.compute_kind.clone(),
                    description: n.description.clone(),
                })
                .collect(),
        )
    };

    let title = match scope {
        LineageScope::Upstream => "Upstream assets",
        LineageScope::Downstream => "Downstream assets",
    };

    NeighborSection {
        scope,
        header: Link {
            text: format!("{title} ({})", neighbors.len()),
            href: Some(lineage_path(key, scope)),
        },
        entries,
        total,
        overflow,
    }
}

fn required_resources(keys: &[String], repository: Option<&RepoAddress>) -> ResourcesPanel {
    if keys.is_empty() {
        return Section::Empty(EmptyState::new("No required resources"));
    }
    let mut sorted: Vec<&String> = keys.iter().collect();
    collate::sort(&mut sorted);
    Section::Content(
        sorted
            .into_iter()
            .map(|key| Link {
                text: key.clone(),
                href: repository.map(|addr| resource_path(addr, key)),
            })
            .collect(),
    )
}

fn metadata(
    entries: &[MetadataEntry],
    repository: Option<&RepoAddress>,
    config: &ViewConfig,
) -> MetadataPanel {
    if entries.is_empty() {
        return Section::Empty(EmptyState::with_docs("No metadata", &config.docs.metadata));
    }
    Section::Content(
        entries
            .iter()
            .map(|entry| {
                let href = match &entry.value {
                    MetadataValue::Url(url) => Some(url.clone()),
                    MetadataValue::Asset(key) => Some(asset_path(key)),
                    MetadataValue::Job(name) => repository.map(|addr| job_path(addr, name)),
                    _ => None,
                };
                MetadataRow {
                    label: entry.label.clone(),
                    description: entry.description.clone(),
                    value: entry.value.clone(),
                    link: Link {
                        text: entry.value.display_text(),
                        href,
                    },
                }
            })
            .collect(),
    )
}

fn freshness(policy: &FreshnessPolicy) -> FreshnessPanel {
    let mut summary = format!("Maximum lag: {}", humanize_minutes(policy.maximum_lag_minutes));
    if let Some(cron) = &policy.cron_schedule {
        summary.push_str(&format!(", evaluated against `{cron}`"));
        if let Some(tz) = &policy.cron_schedule_timezone {
            summary.push_str(&format!(" ({tz})"));
        }
    }
    FreshnessPanel {
        maximum_lag_minutes: policy.maximum_lag_minutes,
        cron_schedule: policy.cron_schedule.clone(),
        cron_schedule_timezone: policy.cron_schedule_timezone.clone(),
        summary,
    }
}

fn auto_materialize(policy: &AutoMaterializePolicy) -> AutoMaterializePanel {
    let mut summary = match policy.policy_type {
        AutoMaterializePolicyType::Eager => {
            "Eager: materializes whenever upstream data changes".to_string()
        }
        AutoMaterializePolicyType::Lazy => {
            "Lazy: materializes only when needed to meet downstream freshness".to_string()
        }
    };
    if let Some(limit) = policy.max_materializations_per_minute {
        summary.push_str(&format!(", at most {limit} per minute"));
    }
    AutoMaterializePanel {
        policy_type: policy.policy_type,
        max_materializations_per_minute: policy.max_materializations_per_minute,
        summary,
    }
}

/// `90` → `1 hour 30 minutes`
fn humanize_minutes(minutes: u64) -> String {
    fn unit(n: u64, name: &str) -> String {
        if n == 1 {
            format!("1 {name}")
        } else {
            format!("{n} {name}s")
        }
    }

    if minutes == 0 {
        return "0 minutes".to_string();
    }
    let days = minutes / 1440;
    let hours = (minutes % 1440) / 60;
    let mins = minutes % 60;
    let mut parts = Vec::new();
    if days > 0 {
        parts.push(unit(days, "day"));
    }
    if hours > 0 {
        parts.push(unit(hours, "hour"));
    }
    if mins > 0 {
        parts.push(unit(mins, "minute"));
    }
    parts.join(" ")
}
