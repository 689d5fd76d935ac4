use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};

use crate::api::MailerApi;
use crate::config::Config;
use crate::handlers;
use crate::service::Dispatcher;
use crate::store::RecordStore;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub store: RecordStore,
    pub dispatcher: Dispatcher,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let client = reqwest::Client::new();
        let store = RecordStore::new(client.clone(), &config);
        let mailer = MailerApi::new(client, &config);
        let dispatcher = Dispatcher::new(store.clone(), mailer);
        Self {
            config: Arc::new(config),
            store,
            dispatcher,
        }
    }
}

pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/login",
            get(handlers::auth::login_form).post(handlers::auth::login),
        )
        .route("/logout", get(handlers::auth::logout))
        .route("/", get(handlers::record::editor))
        .route("/api/save", post(handlers::record::save))
        .route("/api/send", post(handlers::record::send))
        .route("/health", get(handlers::record::health))
        .with_state(state)
}
