use clap::Parser;
use schemagen::adapters::form::GeneratorForm;
use schemagen::adapters::terminal::TerminalPresenter;
use schemagen::cli::Cli;
use schemagen::config::Settings;
use std::process::ExitCode;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let settings = Settings::new_with_cli(&cli)?;

    info!(
        endpoint = %settings.service.endpoint,
        timeout_seconds = settings.service.timeout_seconds,
        "Starting schemagen"
    );

    let controller = schemagen::create_controller(&settings)?;
    let presenter = TerminalPresenter::new(cli.save_to.clone());
    let mut form = GeneratorForm::new(cli.build_model(), controller, presenter);

    if !form.send_request() {
        return Ok(ExitCode::from(2));
    }

    loop {
        if form.is_sending() {
            tokio::select! {
                more = form.process_next_event() => if !more { break },
                _ = tokio::signal::ctrl_c() => {
                    warn!("Interrupted, cancelling request");
                    form.cancel_request();
                }
            }
        } else if !form.process_next_event().await {
            break;
        }
    }

    let success = form.outcome().is_some_and(|outcome| outcome.is_success());
    Ok(if success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
