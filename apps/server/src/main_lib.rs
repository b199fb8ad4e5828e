use std::sync::Arc;

use tally_core::{
    expenses::{ExpenseService, ExpenseServiceTrait},
    users::{UserService, UserServiceTrait},
    utils::{Clock, SystemClock},
};
use tally_storage_sqlite::{
    db::{self, write_actor},
    expenses::ExpenseRepository,
    users::UserRepository,
};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::{auth::AuthManager, config::Config};

pub struct AppState {
    pub expense_service: Arc<dyn ExpenseServiceTrait + Send + Sync>,
    pub user_service: Arc<dyn UserServiceTrait + Send + Sync>,
    pub clock: Arc<dyn Clock>,
    pub auth: Arc<AuthManager>,
}

pub fn init_tracing() {
    let log_format = std::env::var("TALLY_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    // `try_init` so repeated calls (tests) keep the first subscriber.
    let _ = if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .try_init()
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .try_init()
    };
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    build_state_with_clock(config, Arc::new(SystemClock)).await
}

/// Like [`build_state`], with the time source supplied by the caller.
pub async fn build_state_with_clock(
    config: &Config,
    clock: Arc<dyn Clock>,
) -> anyhow::Result<Arc<AppState>> {
    let db_path = db::init(&config.db_path)?;
    tracing::info!("Database path in use: {}", db_path);

    let pool = db::create_pool(&db_path)?;
    db::run_migrations(&pool)?;
    let writer = write_actor::spawn_writer((*pool).clone());

    let user_repo = Arc::new(UserRepository::new(pool.clone(), writer.clone()));
    let user_service = Arc::new(UserService::new(user_repo, clock.clone()));

    let expense_repo = Arc::new(ExpenseRepository::new(pool.clone(), writer.clone()));
    let expense_service = Arc::new(ExpenseService::new(expense_repo, clock.clone()));

    let auth = Arc::new(AuthManager::new(&config.secret_key, config.token_ttl));

    Ok(Arc::new(AppState {
        expense_service,
        user_service,
        clock,
        auth,
    }))
}
