//! Binary entrypoint for the Remedy API server.
use remedy_api::{run, AppState};
use remedy_classifier::{Classifier, ClassifierConfig, OllamaClassifier};
use remedy_core::KnowledgeBase;
use remedy_engine::{CoreState, DecisionEngine};
use remedy_store::TicketStore;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    // Defaults can be overridden with REMEDY_ADDR / REMEDY_KEDB_PATH /
    // REMEDY_TICKETS_PATH
    let addr = std::env::var("REMEDY_ADDR").unwrap_or_else(|_| "0.0.0.0:8787".to_string());
    let kedb_path =
        std::env::var("REMEDY_KEDB_PATH").unwrap_or_else(|_| "data/kedb.json".to_string());
    let tickets_path =
        std::env::var("REMEDY_TICKETS_PATH").unwrap_or_else(|_| "data/tickets.json".to_string());

    let kedb = KnowledgeBase::load(&kedb_path);
    let core = Arc::new(CoreState::new(TicketStore::open(&tickets_path)));

    let classifier: Option<Arc<dyn Classifier>> =
        match OllamaClassifier::new(ClassifierConfig::from_env()) {
            Ok(client) => Some(Arc::new(client)),
            Err(e) => {
                tracing::warn!(error = %e, "classifier unavailable at startup");
                None
            }
        };

    let engine = Arc::new(DecisionEngine::new(kedb, classifier, core));
    run(&addr, AppState::new(engine)).await;
}
