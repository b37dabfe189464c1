use std::sync::Arc;

use dosesense::application::services::{DEFAULT_SITES, DEFAULT_TOP_K, WebRetrievalService};

use crate::helpers::{StaticScraper, StaticSearch, hit};

fn five_hits() -> Vec<dosesense::domain::SearchResult> {
    (1..=5)
        .map(|i| {
            hit(
                &format!("Result {i}"),
                &format!("https://example.org/{i}"),
                &format!("Snippet number {i}."),
            )
        })
        .collect()
}

#[tokio::test]
async fn given_no_overrides_when_retrieving_then_default_sites_and_top_k_apply() {
    let search = Arc::new(StaticSearch::returning(five_hits()));
    let service = WebRetrievalService::new(search.clone(), Arc::new(StaticScraper::default()));

    let response = service.retrieve("ibuprofen dosage", None, None).await;

    assert_eq!(response.results.len(), DEFAULT_TOP_K);
    assert_eq!(response.sites, DEFAULT_SITES.map(String::from).to_vec());
    assert!(response.degraded_reason.is_none());
    let queries = search.recorded_queries();
    assert_eq!(queries.len(), 1);
    assert_eq!(queries[0].0, "ibuprofen dosage");
}

#[tokio::test]
async fn given_explicit_sites_and_top_k_when_retrieving_then_they_override_defaults() {
    let search = Arc::new(StaticSearch::returning(five_hits()));
    let service = WebRetrievalService::new(search.clone(), Arc::new(StaticScraper::default()));
    let sites = vec!["nih.gov".to_string()];

    let response = service.retrieve("q", Some(&sites), Some(1)).await;

    assert_eq!(response.results.len(), 1);
    assert_eq!(response.sites, sites);
    assert_eq!(search.recorded_queries()[0].1, sites);
}

#[tokio::test]
async fn given_empty_site_list_when_retrieving_then_defaults_are_used() {
    let search = Arc::new(StaticSearch::returning(Vec::new()));
    let service = WebRetrievalService::new(search, Arc::new(StaticScraper::default()))
        .with_default_sites(vec!["cdc.gov".to_string()]);

    let response = service.retrieve("q", Some(&[]), None).await;

    assert_eq!(response.sites, vec!["cdc.gov".to_string()]);
}

#[tokio::test]
async fn given_scraped_page_when_retrieving_then_chunk_is_context_window_around_snippet() {
    let page = "Intro text here. Another line. Snippet number 1. Following line. Last one. Tail.";
    let scraper = StaticScraper::default().with("https://example.org/1", page);
    let service =
        WebRetrievalService::new(Arc::new(StaticSearch::returning(five_hits())), Arc::new(scraper))
            .with_context(1, 0.3);

    let response = service.retrieve("q", None, Some(2)).await;

    assert_eq!(
        response.results[0].chunk,
        "Another line. Snippet number 1. Following line."
    );
    assert_eq!(response.results[1].chunk, "Snippet number 2.");
}

#[tokio::test]
async fn given_search_backend_down_when_retrieving_then_response_is_empty_and_degraded() {
    let service = WebRetrievalService::new(
        Arc::new(StaticSearch::unavailable()),
        Arc::new(StaticScraper::default()),
    );

    let response = service.retrieve("q", None, None).await;

    assert!(response.results.is_empty());
    assert_eq!(
        response.degraded_reason.as_deref(),
        Some("search backend returned 503")
    );
}

#[tokio::test]
async fn given_results_when_building_prompt_then_question_snippets_and_links_are_split() {
    let service = WebRetrievalService::new(
        Arc::new(StaticSearch::returning(five_hits())),
        Arc::new(StaticScraper::default()),
    );
    let response = service.retrieve("What is aspirin for?", None, Some(2)).await;

    let (prompt, references) = response.prompt_and_references();

    assert_eq!(
        prompt,
        "Question: What is aspirin for?\nSnippets:Snippet number 1. Snippet number 2."
    );
    assert_eq!(
        references,
        "\nReference Links:\nhttps://example.org/1\nhttps://example.org/2"
    );
}
