use iocraft::prelude::*;
use std::time::Duration;

use crate::tui::{AppContext, AppMessage};

/// Seconds a toast stays visible.
const TOAST_SECS: u64 = 3;

/// Toast line plus an animated "researching" line with the latest job event.
#[component]
pub fn StatusLine(mut hooks: Hooks) -> impl Into<AnyElement<'static>> {
    let is_processing = hooks.use_state(|| false);
    let elapsed = hooks.use_state(|| 0u64);
    let tick = hooks.use_state(|| 0u64);
    let toast = hooks.use_state(|| Option::<String>::None);
    let toast_ttl = hooks.use_state(|| 0u64);
    let job_id = hooks.use_state(|| Option::<String>::None);
    let last_event = hooks.use_state(|| Option::<String>::None);

    let app_ctx = hooks.use_context::<AppContext>();
    let ui_sender = app_ctx.ui_sender.clone();

    // Subscribe to job lifecycle and toasts.
    let mut is_proc = is_processing;
    let mut toast_ref = toast;
    let mut toast_ttl_ref = toast_ttl;
    let mut job_id_ref = job_id;
    let mut last_event_ref = last_event;
    hooks.use_future(async move {
        let mut rx = ui_sender.subscribe();
        while let Ok(msg) = rx.recv().await {
            match msg {
                AppMessage::ResearchStarted => {
                    is_proc.set(true);
                    job_id_ref.set(None);
                    last_event_ref.set(None);
                }
                AppMessage::JobSubmitted { input_id } => job_id_ref.set(Some(input_id)),
                AppMessage::JobEvent(data) => last_event_ref.set(Some(data)),
                AppMessage::ResearchCompleted { .. } | AppMessage::ResearchFailed(_) => {
                    is_proc.set(false);
                    job_id_ref.set(None);
                    last_event_ref.set(None);
                }
                AppMessage::Toast(message) => {
                    toast_ref.set(Some(message));
                    toast_ttl_ref.set(TOAST_SECS);
                }
                AppMessage::ResearchRequested(_) => {}
            }
        }
    });

    // Tick timer for elapsed seconds, spinner animation and toast expiry.
    let mut tick_clone = tick;
    let mut elapsed_clone = elapsed;
    let mut toast_clear = toast;
    let mut toast_ttl_clone = toast_ttl;
    let is_proc_timer = is_processing;
    hooks.use_future(async move {
        loop {
            tokio::time::sleep(Duration::from_secs(1)).await;
            tick_clone += 1;
            if *is_proc_timer.read() {
                elapsed_clone += 1;
            } else {
                elapsed_clone.set(0);
            }

            let ttl = *toast_ttl_clone.read();
            if ttl > 0 {
                toast_ttl_clone.set(ttl - 1);
                if ttl == 1 {
                    toast_clear.set(None);
                }
            }
        }
    });

    let spinners = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
    let idx = (*tick.read() % spinners.len() as u64) as usize;

    let toast_line = toast.read().clone().map(|message| {
        element! {
            View(background_color: Color::Red, padding_left: 1, padding_right: 1) {
                Text(content: format!("✗ {}", message), color: Color::White, weight: Weight::Bold)
            }
        }
        .into_any()
    });

    let progress = if *is_processing.read() {
        let secs = *elapsed.read();
        let job = job_id
            .read()
            .as_ref()
            .map(|id| format!(" · job {id}"))
            .unwrap_or_default();
        let text = format!("{} Researching… ({}s){}", spinners[idx], secs, job);
        let detail = last_event.read().clone().map(|event| {
            element! {
                View(padding_left: 1) {
                    Text(content: event, color: Color::Grey, align: TextAlign::Left)
                }
            }
            .into_any()
        });
        Some(
            element! {
                View(flex_direction: FlexDirection::Column, align_items: AlignItems::Start) {
                    View(padding_left: 1) {
                        Text(content: text, color: Color::Yellow, weight: Weight::Bold)
                    }
                    #(detail)
                }
            }
            .into_any(),
        )
    } else {
        None
    };

    if toast_line.is_none() && progress.is_none() {
        return element! { View {} };
    }

    element! {
        View(margin_bottom: 1, flex_direction: FlexDirection::Column, align_items: AlignItems::Start) {
            #(toast_line)
            #(progress)
        }
    }
}
