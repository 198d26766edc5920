use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use leadform::error::ErrorCode;
use leadform::form::{LeadForm, SubmissionStatus, variants};
use leadform::intake::{self, IntakeState};
use leadform::transport::{HttpTransport, TransportConfig};

#[derive(Parser)]
#[command(name = "leadform", about = "Starlight Solar lead forms")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Serve the reference intake endpoint for every form.
    Serve {
        #[arg(long, env = "PORT", default_value_t = 3000)]
        port: u16,
    },
    /// Fill one form and submit it to `LEADFORM_BASE_URL`.
    Submit {
        /// Form id (quote, free-quote, builder-partnership, realtor-partnership, contact).
        #[arg(long)]
        form: String,
        /// Field assignment, `name=value`. Repeatable.
        #[arg(long = "field", value_parser = parse_assignment)]
        fields: Vec<(String, String)>,
    },
}

fn parse_assignment(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(k, v)| (k.trim().to_string(), v.to_string()))
        .ok_or_else(|| format!("expected name=value, got '{raw}'"))
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    match Cli::parse().command {
        Command::Serve { port } => serve(port).await,
        Command::Submit { form, fields } => submit(&form, fields).await,
    }
}

async fn serve(port: u16) -> ExitCode {
    let forms = match variants::all() {
        Ok(forms) => forms,
        Err(e) => {
            tracing::error!(error = %e, code = e.error_code(), "form registry invalid");
            return ExitCode::FAILURE;
        }
    };
    let app = intake::router(IntakeState::new(forms));

    let listener = match tokio::net::TcpListener::bind(format!("0.0.0.0:{port}")).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(error = %e, %port, "failed to bind");
            return ExitCode::FAILURE;
        }
    };

    tracing::info!(%port, "lead intake listening");
    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!(error = %e, "server failed");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

async fn submit(form_id: &str, assignments: Vec<(String, String)>) -> ExitCode {
    let config = match variants::by_id(form_id) {
        Ok(Some(config)) => config,
        Ok(None) => {
            eprintln!("unknown form '{form_id}'");
            return ExitCode::FAILURE;
        }
        Err(e) => {
            eprintln!("[{}] {e}", e.error_code());
            return ExitCode::FAILURE;
        }
    };

    let transport = match HttpTransport::new(TransportConfig::from_env()) {
        Ok(transport) => Arc::new(transport),
        Err(e) => {
            eprintln!("[{}] {e}", e.error_code());
            return ExitCode::FAILURE;
        }
    };

    let form = LeadForm::new(Arc::new(config), transport);
    for (name, value) in assignments {
        if let Err(e) = form.set_field(&name, value) {
            eprintln!("[{}] {e}", e.error_code());
            return ExitCode::FAILURE;
        }
    }

    match form.submit().await {
        Ok(status) => {
            let message = form.snapshot().message.unwrap_or_default();
            println!("{status:?}: {message}");
            if status == SubmissionStatus::Succeeded { ExitCode::SUCCESS } else { ExitCode::FAILURE }
        }
        Err(e) => {
            eprintln!("[{}] {e}", e.error_code());
            ExitCode::FAILURE
        }
    }
}
