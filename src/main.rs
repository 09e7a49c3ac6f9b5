use anyhow::{Result, bail};
use clap::{Parser, Subcommand};
use crossterm::style::Stylize;
use techscout::core::api::ResearchClient;
use techscout::core::config::ApiConfig;
use techscout::core::form::{Field, InputForm, ResearchQuery, SubmitOutcome};
use techscout::core::logging;
use techscout::core::notify::StderrNotifier;
use techscout::core::research::{self, ResearchEvent, ResearchOutcome};

#[derive(Parser)]
#[command(name = "techscout", version, about = "Technology research client")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate the lists and start a research job without the TUI
    Submit {
        /// Comma-separated technologies (at most 5)
        #[arg(long)]
        technologies: String,
        /// Comma-separated business areas (at most 5)
        #[arg(long)]
        business_areas: String,
        /// Follow the job until it finishes
        #[arg(long)]
        wait: bool,
    },
    /// Show status, events and result of a research job
    Status {
        /// Job id returned by `submit`
        input_id: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Err(e) = logging::init() {
        eprintln!("logging disabled: {e}");
    }

    match cli.command {
        None => techscout::tui::run().await,
        Some(Commands::Submit {
            technologies,
            business_areas,
            wait,
        }) => cmd_submit(technologies, business_areas, wait).await,
        Some(Commands::Status { input_id }) => cmd_status(&input_id).await,
    }
}

async fn cmd_submit(technologies: String, business_areas: String, wait: bool) -> Result<()> {
    let mut query = None;
    let mut form = InputForm::new(
        |technologies: Vec<String>, business_areas: Vec<String>| {
            query = Some(ResearchQuery {
                technologies,
                business_areas,
            })
        },
        false,
        StderrNotifier,
    );
    form.set_value(Field::Technologies, technologies);
    form.set_value(Field::BusinessAreas, business_areas);

    if let SubmitOutcome::Rejected(errors) = form.submit() {
        for (field, err) in errors.iter() {
            eprintln!("  {}: {}", field, field.error_message(err));
        }
        bail!("invalid input");
    }
    drop(form);

    let Some(query) = query else {
        bail!("form did not produce a query");
    };

    let config = ApiConfig::load();
    let client = ResearchClient::new(&config);

    if !wait {
        let ticket = client
            .submit(&query.technologies, &query.business_areas)
            .await?;
        println!("{}", ticket.input_id);
        return Ok(());
    }

    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel::<ResearchEvent>();
    let printer = tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            match event {
                ResearchEvent::Submitted { input_id } => {
                    println!("{} {input_id}", "job".dim());
                }
                ResearchEvent::Event(data) => println!("{} {data}", "⏺".green()),
            }
        }
    });

    let outcome = research::run_research(&client, &query, config.poll_interval, tx).await;
    let _ = printer.await;

    match outcome? {
        ResearchOutcome::Completed { result, .. } => {
            println!("{}", "✓ research complete".yellow());
            println!("{result}");
            Ok(())
        }
        ResearchOutcome::Failed { input_id, reason } => {
            bail!("job {input_id} failed: {reason}")
        }
    }
}

async fn cmd_status(input_id: &str) -> Result<()> {
    let config = ApiConfig::load();
    let client = ResearchClient::new(&config);
    let report = client.status(input_id).await?;

    println!("Job {}  [{:?}]\n", report.input_id.as_str().bold(), report.status);

    if report.events.is_empty() {
        println!("No events yet.");
    } else {
        println!("Events:");
        for event in &report.events {
            println!("  {}  {}", event.timestamp.as_str().dim(), event.data);
        }
    }

    let result = report.result_text();
    if !result.is_empty() {
        println!("\nResult:\n{result}");
    }

    Ok(())
}
