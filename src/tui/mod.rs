pub mod app;
pub mod components;
pub mod pages;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use iocraft::prelude::*;
use tokio::sync::broadcast;

use crate::core::api::ResearchClient;
use crate::core::config::ApiConfig;
use crate::core::form::ResearchQuery;
use crate::core::notify::Notifier;

/// Messages broadcast between TUI components.
#[derive(Debug, Clone)]
pub enum AppMessage {
    /// The form passed validation; the app decides whether to start a job.
    ResearchRequested(ResearchQuery),
    ResearchStarted,
    JobSubmitted { input_id: String },
    JobEvent(String),
    ResearchCompleted { input_id: String, result: String },
    ResearchFailed(String),
    Toast(String),
}

/// Shared application context passed via ContextProvider.
#[derive(Clone)]
pub struct AppContext {
    pub client: Arc<ResearchClient>,
    pub poll_interval: Duration,
    pub ui_sender: broadcast::Sender<AppMessage>,
}

/// Shows notifications as a toast in the status line.
#[derive(Clone)]
pub struct ToastNotifier {
    sender: broadcast::Sender<AppMessage>,
}

impl ToastNotifier {
    pub fn new(sender: broadcast::Sender<AppMessage>) -> Self {
        Self { sender }
    }
}

impl Notifier for ToastNotifier {
    fn notify(&self, message: &str) {
        let _ = self.sender.send(AppMessage::Toast(message.to_string()));
    }
}

pub async fn run() -> Result<()> {
    let config = ApiConfig::load();
    tracing::info!(base_url = %config.base_url, "starting tui");

    let client = Arc::new(ResearchClient::new(&config));
    let (ui_sender, _) = broadcast::channel::<AppMessage>(256);

    let ctx = AppContext {
        client,
        poll_interval: config.poll_interval,
        ui_sender,
    };

    element! {
        ContextProvider(value: Context::owned(ctx)) {
            app::App
        }
    }
    .render_loop()
    .await?;

    Ok(())
}
