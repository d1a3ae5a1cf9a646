//! End-to-end search tests over the fixture library

mod common;

use common::fixtures::load_library;
use imbib_search::{search, tokenize, EmptyQuery, MatchStrength, SearchConfig, SearchEngine};
use rstest::rstest;

fn ids(query: &str) -> Vec<String> {
    let library = load_library();
    search(query, &library)
        .iter()
        .map(|r| r.record.id.clone())
        .collect()
}

// === Query Forms ===

#[rstest]
#[case("author:Smith \"RNA structure\"", &["Smith-2024"])]
#[case("year:2023", &["Jones-2023"])]
#[case("doi:10.1093/NAR", &["Smith-2024"])]
#[case("pmid:3818", &["Smith-2024"])]
#[case("pmcid:pmc9000001", &["Garcia-2022"])]
#[case("url:example.org", &["Consortium-2021"])]
#[case("keyword:genomics", &["Garcia-2022"])]
#[case("tag:methods", &["Garcia-2022"])]
#[case("title:\"deep learning basics\"", &["Jones-2023"])]
#[case("deep learning transformer", &["Smith-2024"])]
#[case("garcia", &["Garcia-2022"])]
#[case("\"lucía garcía\"", &["Garcia-2022"])]
#[case("unknown:value", &[])]
#[case("author:Nobody", &[])]
fn test_query_forms(#[case] query: &str, #[case] expected: &[&str]) {
    assert_eq!(ids(query), expected);
}

// === Acronym Sensitivity ===

#[test]
fn test_uppercase_acronym_skips_lowercase_prose() {
    // Garcia-2022 only mentions "rna" in lowercase inside its abstract
    assert_eq!(ids("RNA"), vec!["Smith-2024"]);
}

#[test]
fn test_lowercase_query_is_case_insensitive() {
    let found = ids("rna");
    assert!(found.contains(&"Garcia-2022".to_string()));
    assert!(found.contains(&"Smith-2024".to_string()));
}

#[test]
fn test_ai_acronym() {
    assert_eq!(ids("AI"), vec!["Consortium-2021"]);
    // "Said", "painter" and "Ai Weiwei" only match the lowercase form
    assert_eq!(ids("ai"), vec!["Consortium-2021", "Lee-2020"]);
}

#[test]
fn test_phrase_ignores_acronym_rule() {
    let found = ids("\"RNA was extracted\"");
    assert_eq!(found, vec!["Garcia-2022"]);
}

// === Ranking ===

#[test]
fn test_strength_tiers_order_results() {
    let library = load_library();
    let results = search("rna", &library);

    let ranked: Vec<(&str, MatchStrength)> = results
        .iter()
        .map(|r| (r.record.id.as_str(), r.strength))
        .collect();

    // "Journal of Teaching" contains "rna" as well
    assert_eq!(
        ranked,
        vec![
            ("Smith-2024", MatchStrength::Strong),
            ("Garcia-2022", MatchStrength::Weak),
            ("Jones-2023", MatchStrength::Weak),
        ]
    );
}

#[test]
fn test_exact_tier_for_identifier_and_field_matches() {
    let library = load_library();
    let results = search("author:Smith year:2024", &library);
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].strength, MatchStrength::Exact);

    let by_doi = search("10.1093/nar/gkae001", &library);
    assert_eq!(by_doi[0].record.id, "Smith-2024");
    assert_eq!(by_doi[0].strength, MatchStrength::Exact);
}

#[test]
fn test_equal_strength_breaks_ties_by_id() {
    assert_eq!(ids("learning"), vec!["Jones-2023", "Smith-2024"]);
}

#[test]
fn test_secondary_surface_is_weak() {
    let library = load_library();
    let results = search("networks", &library);
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].record.id, "Jones-2023");
    assert_eq!(results[0].strength, MatchStrength::Weak);
}

// === Narrowing ===

#[test]
fn test_adding_tokens_narrows_results() {
    let broad = ids("learning");
    let narrower = ids("learning RNA");
    let narrowest = ids("learning RNA author:Jones");

    assert!(narrower.iter().all(|id| broad.contains(id)));
    assert!(narrowest.iter().all(|id| narrower.contains(id)));
    assert_eq!(narrower, vec!["Smith-2024"]);
    assert!(narrowest.is_empty());
}

// === Empty Queries and Configuration ===

#[test]
fn test_empty_query_returns_snapshot_order() {
    let library = load_library();
    let results = search("", &library);
    let found: Vec<&str> = results.iter().map(|r| r.record.id.as_str()).collect();
    let snapshot: Vec<&str> = library.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(found, snapshot);
    assert!(tokenize("  ").is_empty());
}

#[test]
fn test_engine_from_toml_config() {
    let config = SearchConfig::from_toml(
        r#"
limit = 1
empty_query = "match_none"
acronym_sensitive = false
"#,
    )
    .unwrap();
    assert_eq!(config.empty_query, EmptyQuery::MatchNone);

    let engine = SearchEngine::new(config);
    let library = load_library();

    assert!(engine.search("", &library).is_empty());

    // Without the acronym rule "RNA" also reaches the lowercase abstract,
    // but only the best result survives the limit
    let results = engine.search("RNA", &library);
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].record.id, "Smith-2024");
}

#[test]
fn test_results_do_not_outlive_tokens() {
    let library = load_library();
    let engine = SearchEngine::default();
    let parsed = tokenize("author:Smith");
    let first = engine.search_parsed(&parsed, &library);
    let second = engine.search_parsed(&parsed, &library);
    assert_eq!(first.len(), second.len());
    assert_eq!(first[0].record.id, second[0].record.id);
}
