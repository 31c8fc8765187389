use std::sync::Arc;
use axum::http::{HeaderValue, Method};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use meditrack::{
    app,
    config::Config,
    services::{
        AdherenceService, DrugInfoService, InteractionService, Localizer, MemoryStore,
        NotificationService, PrescriptionService, RecordStore, TranslationService, UserService,
    },
    state::AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("LOG_LEVEL")
                .unwrap_or_else(|_| "meditrack=debug,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting MediTrack service...");

    dotenv::dotenv().ok();
    let config = Config::from_env()?;

    let store: Arc<dyn RecordStore> = Arc::new(MemoryStore::new());

    // Bootstrap task: the service never starts without an administrator.
    let user_service = UserService::new(store.clone());
    if user_service.ensure_default_admin(&config).await? {
        info!("Default administrator account bootstrapped");
    }

    let localizer: Arc<dyn Localizer> = Arc::new(TranslationService::new(&config)?);
    let drug_info_service = DrugInfoService::new(&config, localizer.clone())?;
    let interaction_service = InteractionService::new(
        Arc::new(drug_info_service.clone()),
        localizer.clone(),
        &config,
    );
    let notification_service = NotificationService::new(store.clone());
    let prescription_service = PrescriptionService::new(store.clone());
    let adherence_service = AdherenceService::new(store.clone(), notification_service.clone());

    let app_state = Arc::new(AppState {
        config: config.clone(),
        store,
        user_service,
        drug_info_service,
        interaction_service,
        notification_service,
        prescription_service,
        adherence_service,
    });

    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers(Any)
        .allow_origin(
            config
                .cors_allowed_origins
                .split(',')
                .map(|origin| origin.parse::<HeaderValue>().unwrap())
                .collect::<Vec<_>>(),
        );

    let app = app(app_state)
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    let addr = format!("{}:{}", config.server_host, config.server_port);
    info!("Starting server on http://{}", addr);

    axum::Server::bind(&addr.parse()?)
        .serve(app.into_make_service())
        .await?;

    Ok(())
}
