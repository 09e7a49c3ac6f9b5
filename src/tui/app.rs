use std::sync::Arc;
use std::time::Duration;

use iocraft::prelude::*;
use tokio::sync::broadcast;

use crate::core::api::ResearchClient;
use crate::core::form::ResearchQuery;
use crate::core::research::{self, ResearchEvent, ResearchOutcome};
use crate::tui::pages::main_page::MainPage;
use crate::tui::{AppContext, AppMessage};

/// Root component. Owns the loading flag and the research job lifecycle;
/// the form below only reports validated submissions.
#[component]
pub fn App(mut hooks: Hooks) -> impl Into<AnyElement<'static>> {
    let (stdout, _stderr) = hooks.use_output();
    let header_rendered = hooks.use_state(|| false);
    let loading = hooks.use_state(|| false);

    let app_ctx = hooks.use_context::<AppContext>();
    let ui_sender = app_ctx.ui_sender.clone();
    let client = app_ctx.client.clone();
    let poll_interval = app_ctx.poll_interval;

    // Output welcome header once.
    let mut header_rendered_clone = header_rendered;
    let stdout_header = stdout.clone();
    hooks.use_future(async move {
        if !*header_rendered_clone.read() {
            stdout_header.println("\x1b[1;34mtechscout\x1b[0m");
            stdout_header.println("Technology research · Tab switch field · Enter submit · Esc clear");
            stdout_header.println("");
            header_rendered_clone.set(true);
        }
    });

    // Start jobs for validated submissions and print progress above the rendered area.
    let stdout_msgs = stdout.clone();
    let mut loading_track = loading;
    hooks.use_future(async move {
        let mut rx = ui_sender.subscribe();
        while let Ok(msg) = rx.recv().await {
            match msg {
                AppMessage::ResearchRequested(query) => {
                    let mut is_loading = *loading_track.read();
                    if !admit_request(&mut is_loading) {
                        tracing::debug!("research already running, request dropped");
                        continue;
                    }
                    loading_track.set(is_loading);
                    stdout_msgs.println(format!(
                        "\x1b[36m▶ {} · {}\x1b[0m",
                        query.technologies.join(", "),
                        query.business_areas.join(", ")
                    ));
                    let _ = ui_sender.send(AppMessage::ResearchStarted);
                    spawn_research_task(query, client.clone(), poll_interval, ui_sender.clone());
                }
                AppMessage::JobSubmitted { input_id } => {
                    stdout_msgs.println(format!("\x1b[2mjob {}\x1b[0m", input_id));
                }
                AppMessage::JobEvent(data) => {
                    stdout_msgs.println(format!("\x1b[32m⏺ {}\x1b[0m", data));
                }
                AppMessage::ResearchCompleted { result, .. } => {
                    loading_track.set(false);
                    stdout_msgs.println("\x1b[33m✓ research complete\x1b[0m");
                    for line in result.lines() {
                        stdout_msgs.println(line);
                    }
                    stdout_msgs.println("");
                }
                AppMessage::ResearchFailed(e) => {
                    loading_track.set(false);
                    stdout_msgs.println(format!("\x1b[31mError: {}\x1b[0m", e));
                }
                AppMessage::ResearchStarted | AppMessage::Toast(_) => {}
            }
        }
    });

    let is_loading = *loading.read();

    element! {
        MainPage(is_loading: is_loading)
    }
}

/// Accept a research request only when no job is running, marking the app busy.
fn admit_request(is_loading: &mut bool) -> bool {
    if *is_loading {
        return false;
    }
    *is_loading = true;
    true
}

fn spawn_research_task(
    query: ResearchQuery,
    client: Arc<ResearchClient>,
    poll_interval: Duration,
    sender: broadcast::Sender<AppMessage>,
) {
    tokio::spawn(async move {
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel::<ResearchEvent>();

        // Forward research events to broadcast in real time.
        let sender_fwd = sender.clone();
        let forwarder = tokio::spawn(async move {
            while let Some(event) = rx.recv().await {
                let msg = match event {
                    ResearchEvent::Submitted { input_id } => AppMessage::JobSubmitted { input_id },
                    ResearchEvent::Event(data) => AppMessage::JobEvent(data),
                };
                let _ = sender_fwd.send(msg);
            }
        });

        let result = research::run_research(&client, &query, poll_interval, tx).await;
        let _ = forwarder.await;

        let msg = match result {
            Ok(ResearchOutcome::Completed { input_id, result }) => {
                AppMessage::ResearchCompleted { input_id, result }
            }
            Ok(ResearchOutcome::Failed { input_id, reason }) => {
                AppMessage::ResearchFailed(format!("job {input_id} failed: {reason}"))
            }
            Err(e) => {
                tracing::warn!("research task failed: {e:#}");
                AppMessage::ResearchFailed(e.to_string())
            }
        };
        let _ = sender.send(msg);
    });
}
