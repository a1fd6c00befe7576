mod config;

use std::sync::Arc;

use axum::Router;
use config::MetaServerConfig;
use meta_client::{ActivationClient, SystemCredentialSource};
use meta_fanout::{trigger_router, RuleFanout, TriggerActivationWriter, TriggerFanoutState};
use meta_router::{meta_router, MetaRouterState};
use meta_store::{ActivationStore, AuthStore, EntityStore, InMemoryStore};
use tower_http::trace::TraceLayer;

#[tokio::main]
async fn main() {
    meta_core::init_tracing();

    let config = match MetaServerConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            tracing::error!(error = %err, "failed to load configuration");
            std::process::exit(1);
        }
    };

    // The entity/auth/activation stores are external systems out of scope
    // for this codebase (`spec.md` §1); `InMemoryStore` is the in-process
    // fallback until a real backend is wired in.
    let store = Arc::new(InMemoryStore::new());
    let entity_store = store.clone() as Arc<dyn EntityStore>;
    let auth_store = store.clone() as Arc<dyn AuthStore>;
    let activation_store = store.clone() as Arc<dyn ActivationStore>;

    let http_client = reqwest::Client::builder()
        .timeout(config.invocation_timeout)
        .build()
        .expect("reqwest client configuration is always valid");
    let activation_client = ActivationClient::new(http_client, config.backend_host_base.clone(), config.api_version.clone());
    let credential_source = Arc::new(SystemCredentialSource::new(config.system_namespace.clone(), auth_store.clone()));

    let meta_state = MetaRouterState {
        entity_store: entity_store.clone(),
        auth_store: auth_store.clone(),
        activation_client: activation_client.clone(),
        credential_source,
        system_namespace: config.system_namespace.clone(),
        mount_path: config.meta_mount_path(),
    };

    let fanout_state = TriggerFanoutState {
        entity_store,
        auth_store,
        writer: TriggerActivationWriter::new(activation_store, RuleFanout::new(activation_client)),
    };

    let app = Router::new()
        .nest(&config.meta_mount_path(), meta_router(meta_state))
        .nest("/triggers", trigger_router(fanout_state))
        .layer(TraceLayer::new_for_http());

    tracing::info!(bind_address = %config.bind_address, mount = %config.meta_mount_path(), "starting meta gateway");
    let listener = tokio::net::TcpListener::bind(&config.bind_address)
        .await
        .unwrap_or_else(|err| panic!("failed to bind {}: {err}", config.bind_address));
    axum::serve(listener, app).await.unwrap_or_else(|err| panic!("server error: {err}"));
}
