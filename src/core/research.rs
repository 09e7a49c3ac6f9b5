use std::time::Duration;

use anyhow::Result;
use tokio::sync::mpsc;

use crate::core::api::{JobStatus, ResearchClient};
use crate::core::form::ResearchQuery;

/// Events emitted while a research job runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResearchEvent {
    Submitted { input_id: String },
    Event(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResearchOutcome {
    Completed { input_id: String, result: String },
    Failed { input_id: String, reason: String },
}

/// Submit `query` and poll the job until the server reports it finished.
/// Each server event is forwarded once, in order.
pub async fn run_research(
    client: &ResearchClient,
    query: &ResearchQuery,
    poll_interval: Duration,
    tx: mpsc::UnboundedSender<ResearchEvent>,
) -> Result<ResearchOutcome> {
    let ticket = client
        .submit(&query.technologies, &query.business_areas)
        .await?;
    let input_id = ticket.input_id;
    let _ = tx.send(ResearchEvent::Submitted {
        input_id: input_id.clone(),
    });

    let mut seen = 0usize;
    loop {
        tokio::time::sleep(poll_interval).await;
        let report = client.status(&input_id).await?;

        for event in report.events.iter().skip(seen) {
            let _ = tx.send(ResearchEvent::Event(event.data.clone()));
        }
        seen = seen.max(report.events.len());

        if !report.status.is_finished() {
            continue;
        }

        let text = report.result_text();
        return Ok(if report.status == JobStatus::Complete {
            tracing::info!(%input_id, "research job complete");
            ResearchOutcome::Completed {
                input_id,
                result: text,
            }
        } else {
            tracing::warn!(%input_id, "research job failed");
            ResearchOutcome::Failed {
                input_id,
                reason: text,
            }
        });
    }
}
