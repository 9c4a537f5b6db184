//! JSON shape and JsonSchema validation tests for entity types.

use schemars::schema_for;
use oak_core::entities::*;
use oak_core::enums::TaxonLevel;
use oak_core::export::ExportFile;
use oak_core::import::{ImportOutcome, ImportSummary};
use oak_core::merge::MergeConflict;

fn schema_errors<T: schemars::JsonSchema>(instance: &serde_json::Value) -> Vec<String> {
    let schema = serde_json::to_value(schema_for!(T)).unwrap();
    let validator = jsonschema::validator_for(&schema).expect("schema should be valid");
    validator
        .iter_errors(instance)
        .map(|e| format!("{e}"))
        .collect()
}

fn bebbiana() -> Entry {
    Entry {
        name: "× bebbiana".into(),
        author: Some("C.K.Schneid.".into()),
        is_hybrid: true,
        subgenus: Some("Quercus".into()),
        parent1: Some("alba".into()),
        parent2: Some("macrocarpa".into()),
        external_links: vec![ExternalLink {
            name: "Oaks of the World".into(),
            url: "https://oaks.of.the.world.free.fr/quercus_x_bebbiana.htm".into(),
            logo: None,
        }],
        ..Entry::default()
    }
}

#[test]
fn entry_validates_against_its_schema() {
    let value = serde_json::to_value(bebbiana()).unwrap();
    assert!(schema_errors::<Entry>(&value).is_empty());
    assert_eq!(value["scientific_name"], "× bebbiana");
    assert!(value.get("conservation_status").is_none());
}

#[test]
fn entry_schema_rejects_wrong_types() {
    let value = serde_json::json!({"scientific_name": "alba", "synonyms": "not-a-list"});
    assert!(!schema_errors::<Entry>(&value).is_empty());
}

#[test]
fn taxon_schema_rejects_unknown_level() {
    let ok = serde_json::to_value(Taxon {
        name: "Lobatae".into(),
        level: TaxonLevel::Section,
        parent: Some("Quercus".into()),
        author: None,
        notes: None,
    })
    .unwrap();
    assert!(schema_errors::<Taxon>(&ok).is_empty());

    let bad = serde_json::json!({"name": "Lobatae", "level": "genus"});
    assert!(!schema_errors::<Taxon>(&bad).is_empty());
}

#[test]
fn source_record_defaults_fill_in() {
    let record: SourceRecord =
        serde_json::from_str(r#"{"scientific_name": "alba", "source_id": 1}"#).unwrap();
    assert!(!record.is_preferred);
    assert!(record.local_names.is_empty());
}

#[test]
fn import_summary_validates_against_its_schema() {
    let mut summary = ImportSummary::default();
    summary.record(
        "alba",
        ImportOutcome::Skipped {
            conflicts: vec![MergeConflict::new("author", "L.", "Linnaeus")],
        },
    );
    let value = serde_json::to_value(&summary).unwrap();
    assert!(schema_errors::<ImportSummary>(&value).is_empty());
    assert_eq!(value["details"][0]["outcome"], "skipped");
}

#[test]
fn export_file_validates_against_its_schema() {
    let record = SourceRecord {
        scientific_name: "× bebbiana".into(),
        source_id: 1,
        is_preferred: true,
        ..SourceRecord::default()
    };
    let source = Source {
        id: 1,
        source_type: "website".into(),
        name: "Oaks of the World".into(),
        ..Source::default()
    };
    let file = ExportFile::build(vec![bebbiana()], vec![source], vec![record], chrono::Utc::now());

    let value = serde_json::to_value(&file).unwrap();
    assert!(schema_errors::<ExportFile>(&value).is_empty());
    assert_eq!(value["species"][0]["taxonomy"]["genus"], "Quercus");
    assert_eq!(value["species"][0]["sources"][0]["source_name"], "Oaks of the World");
}
