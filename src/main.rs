use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::net::TcpListener;

use dosesense::application::ports::PrescriptionRepository;
use dosesense::application::services::{
    DocumentParser, GenerationService, PrescriptionWorkflow, WebRetrievalService,
};
use dosesense::infrastructure::http::RetryPolicy;
use dosesense::infrastructure::layout::{AzureApiVersion, AzureLayoutAdapter};
use dosesense::infrastructure::llm::{LlmApiMode, OpenAiCompatibleClient};
use dosesense::infrastructure::observability::{TracingConfig, init_tracing};
use dosesense::infrastructure::pdf::LopdfSplitter;
use dosesense::infrastructure::persistence::{
    InMemoryPrescriptionRepository, PgPrescriptionRepository, create_pool, run_migrations,
};
use dosesense::infrastructure::scraping::HtmlScraper;
use dosesense::infrastructure::search::BingSearchClient;
use dosesense::infrastructure::templates::FsTemplateStore;
use dosesense::presentation::{AppState, Environment, Settings, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let environment = Environment::from_env().map_err(anyhow::Error::msg)?;
    let settings = Settings::load(environment).context("failed to load settings")?;

    init_tracing(&TracingConfig::new(
        environment.as_str(),
        settings.logging.json,
        settings.logging.filter.clone(),
    ));

    let repository = build_repository(&settings).await?;

    let retry = RetryPolicy {
        max_retries: settings.http.max_retries,
        initial_backoff: Duration::from_millis(settings.http.initial_backoff_ms),
        max_backoff: Duration::from_millis(settings.http.max_backoff_ms),
    };

    let layout_version = AzureApiVersion::try_from(settings.layout.api_version.clone())
        .map_err(anyhow::Error::msg)?;
    let layout_analyzer = Arc::new(
        AzureLayoutAdapter::new(
            &settings.layout.endpoint,
            &settings.layout.api_key,
            layout_version,
        )
        .with_polling(
            Duration::from_secs(settings.layout.poll_timeout_secs),
            Duration::from_millis(settings.layout.initial_backoff_ms),
        ),
    );
    tracing::info!(
        api_version = layout_analyzer.version().api_version(),
        "Layout analysis backend configured"
    );
    let parser = Arc::new(DocumentParser::new(
        layout_analyzer,
        Arc::new(LopdfSplitter::new()),
        settings.parser.max_concurrent_pages,
    ));

    let llm_mode =
        LlmApiMode::try_from(settings.llm.api_mode.clone()).map_err(anyhow::Error::msg)?;
    let llm_client = Arc::new(
        OpenAiCompatibleClient::with_timeout(
            &settings.llm.endpoint,
            &settings.llm.model,
            Some(settings.llm.api_key.clone()),
            llm_mode,
            Duration::from_secs(settings.llm.timeout_secs),
        )
        .with_provider(&settings.llm.provider)
        .with_sampling(settings.llm.max_tokens, settings.llm.temperature)
        .with_retry(retry),
    );
    let templates = Arc::new(FsTemplateStore::new(&settings.llm.templates_dir));
    tracing::info!(templates_dir = %templates.dir().display(), "Prompt templates configured");
    let generation = Arc::new(GenerationService::new(llm_client, templates));

    let search_client = Arc::new(
        BingSearchClient::with_timeout(
            &settings.search.endpoint,
            &settings.search.subscription_key,
            &settings.search.custom_config_id,
            Duration::from_secs(settings.search.timeout_secs),
        )
        .with_retry(retry),
    );
    let scraper = Arc::new(HtmlScraper::with_timeout(Duration::from_secs(
        settings.scrape.timeout_secs,
    )));
    let retrieval_service = Arc::new(
        WebRetrievalService::new(search_client, scraper)
            .with_default_sites(settings.search.default_sites.clone())
            .with_default_top_k(settings.search.top_k)
            .with_context(
                settings.search.context_sentences,
                settings.search.similarity_threshold,
            ),
    );

    let workflow = Arc::new(PrescriptionWorkflow::new(
        repository,
        parser,
        generation,
        Arc::clone(&retrieval_service),
    ));

    let router = create_router(AppState {
        workflow,
        retrieval_service,
    });

    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!(%addr, environment = %environment, "Listening");

    axum::serve(listener, router).await?;

    Ok(())
}

async fn build_repository(settings: &Settings) -> anyhow::Result<Arc<dyn PrescriptionRepository>> {
    if settings.database.url.is_empty() {
        tracing::warn!("No database url configured, using in-memory prescription storage");
        return Ok(Arc::new(InMemoryPrescriptionRepository::new()));
    }

    let pool = create_pool(&settings.database.url, settings.database.max_connections).await?;
    if settings.database.run_migrations {
        tracing::info!("Running database migrations");
        run_migrations(&pool).await?;
    }

    Ok(Arc::new(PgPrescriptionRepository::new(pool)))
}
