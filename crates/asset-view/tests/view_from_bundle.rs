use asset_model::{ingest_bundle_json, FilterQuery, IngestOptions, LiveStatus};
use asset_test_utils::{bundle_json, full_definition, repository};
use asset_view::{render_text, AssetNodeDefinitionView, Link, ViewConfig, ViewInputs};
use pretty_assertions::assert_eq;

fn view_of_fixture_bundle(config: &ViewConfig) -> AssetNodeDefinitionView {
    let bundle = ingest_bundle_json(&bundle_json().to_string(), &config.ingest).unwrap();
    AssetNodeDefinitionView::build(
        &ViewInputs::new(&bundle.definition, &bundle.upstream, &bundle.downstream, &bundle.live),
        config,
    )
}

#[test]
fn any_config_renders_no_configuration() {
    let view = view_of_fixture_bundle(&ViewConfig::default());
    assert_eq!(view.config.empty_state().unwrap().message, "No configuration");
    assert_eq!(view.output_type.content().unwrap().display_name, "DataFrame");
}

#[test]
fn hidden_job_prefix_is_applied_at_ingestion() {
    let view = view_of_fixture_bundle(&ViewConfig::default());
    assert_eq!(
        view.annotations.jobs,
        vec![Link {
            text: "nightly_refresh".to_string(),
            href: Some("/locations/analytics@prod/jobs/nightly_refresh".to_string()),
        }]
    );
}

#[test]
fn custom_ingest_conventions_flow_through_config() {
    let mut config = ViewConfig::default();
    config.ingest = IngestOptions {
        any_type_sentinel: "Anything".to_string(),
        hidden_job_prefix: "__HIDDEN".to_string(),
    };
    let view = view_of_fixture_bundle(&config);
    assert_eq!(view.config.content().unwrap().key, "Any");
    assert_eq!(view.annotations.jobs.len(), 2);
}

#[test]
fn neighbors_and_live_status_from_bundle() {
    let view = view_of_fixture_bundle(&ViewConfig::default());
    let upstream = view.upstream.entries.content().unwrap();
    assert_eq!(upstream.len(), 1);
    assert!(upstream[0].is_source);
    assert_eq!(
        upstream[0].status,
        LiveStatus::Materialized {
            timestamp_ms: 1_700_000_000_000
        }
    );

    let downstream = view.downstream.entries.content().unwrap();
    assert_eq!(downstream[0].status, LiveStatus::Unknown);
    assert_eq!(
        view.downstream.header.href.as_deref(),
        Some("/assets/warehouse/orders?view=lineage&lineageScope=downstream")
    );
}

#[test]
fn resources_sorted_by_collation() {
    let view = view_of_fixture_bundle(&ViewConfig::default());
    let names: Vec<&str> = view
        .required_resources
        .content()
        .unwrap()
        .iter()
        .map(|l| l.text.as_str())
        .collect();
    assert_eq!(names, vec!["alerts", "warehouse"]);
}

#[test]
fn unresolvable_repository_leaves_links_off() {
    let mut def = full_definition();
    def.repository = Some(repository("analytics", ""));
    let live = Default::default();
    let view = AssetNodeDefinitionView::build(
        &ViewInputs::new(&def, &[], &[], &live),
        &ViewConfig::default(),
    );
    assert!(view.repository.is_none());
    assert!(view.annotations.jobs.iter().all(|job| job.href.is_none()));
    assert!(view
        .required_resources
        .content()
        .unwrap()
        .iter()
        .all(|r| r.href.is_none()));
    // Asset links do not depend on the repository.
    let rows = view.metadata.content().unwrap();
    assert_eq!(rows[1].link.href.as_deref(), Some("/assets/raw/orders"));
    assert_eq!(rows[2].link.href, None);
}

#[test]
fn neighbor_filter_is_case_insensitive() {
    let config = ViewConfig::default();
    let bundle = ingest_bundle_json(&bundle_json().to_string(), &config.ingest).unwrap();
    let query = FilterQuery::new("REV");
    let view = AssetNodeDefinitionView::build(
        &ViewInputs::new(&bundle.definition, &bundle.upstream, &bundle.downstream, &bundle.live)
            .with_neighbor_filter(&query),
        &config,
    );
    assert!(view.upstream.entries.is_empty());
    assert_eq!(view.downstream.total, 1);
}

#[test]
fn text_report_round_trips_the_view() {
    let text = render_text(&view_of_fixture_bundle(&ViewConfig::default()));
    assert!(text.contains("Repository: analytics@prod"));
    assert!(text.contains("[Materialized] raw / orders </assets/raw/orders> (source)"));
    assert!(text.contains("No configuration"));
}

#[test]
fn unmodelled_metadata_still_builds_the_view() {
    let mut json = bundle_json();
    json["assetNode"]["metadataEntries"]
        .as_array_mut()
        .unwrap()
        .push(serde_json::json!({
            "__typename": "TableSchemaMetadataEntry",
            "label": "columns",
            "schema": { "columns": [{ "name": "id", "type": "int" }] }
        }));
    let config = ViewConfig::default();
    let bundle = ingest_bundle_json(&json.to_string(), &config.ingest).unwrap();
    let view = AssetNodeDefinitionView::build(
        &ViewInputs::new(&bundle.definition, &bundle.upstream, &bundle.downstream, &bundle.live),
        &config,
    );
    let rows = view.metadata.content().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].link.text, "data-eng");
    assert_eq!(rows[1].label, "columns");
    assert_eq!(rows[1].link.text, "[TableSchemaMetadataEntry]");
    assert_eq!(rows[1].link.href, None);
}
