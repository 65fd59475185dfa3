use blink_sense::blink::{BlinkConfig, BlinkEngine};
use blink_sense::config::Config;
use blink_sense::host::Session;
use blink_sense::logging::{init_tracing, LogConfig};
use blink_sense::report::{Record, Reporter};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let config = Config::from_env();

    init_tracing(&LogConfig::from(&config));
    tracing::info!("Starting blink-sense");

    let blink_config = BlinkConfig::from_env(&config.blink);
    let engine = match BlinkEngine::new(blink_config) {
        Ok(engine) => engine,
        Err(e) => {
            tracing::error!(error = %e, "Invalid blink configuration");
            std::process::exit(1);
        }
    };
    let mut session = Session::new(engine, Reporter::new(config.display_hold_secs));

    let mut stdout = tokio::io::stdout();
    if let Err(e) = emit(&mut stdout, &[Record::status("Blink detector ready")]).await {
        tracing::error!(error = %e, "Failed to write to stdout");
        return;
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let shutdown = shutdown_signal();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = &mut shutdown => break,
            line = lines.next_line() => match line {
                Ok(Some(line)) => {
                    let records = session.handle_line(&line);
                    if let Err(e) = emit(&mut stdout, &records).await {
                        tracing::error!(error = %e, "Failed to write to stdout");
                        break;
                    }
                }
                Ok(None) => {
                    tracing::info!("Input closed");
                    break;
                }
                Err(e) => {
                    tracing::error!(error = %e, "Failed to read from stdin");
                    break;
                }
            },
        }
    }

    let _ = emit(&mut stdout, &[Record::status("Stopping blink detector")]).await;
    tracing::info!("Shutdown complete");
}

async fn emit(stdout: &mut tokio::io::Stdout, records: &[Record]) -> std::io::Result<()> {
    for record in records {
        match record.to_line() {
            Ok(line) => {
                stdout.write_all(line.as_bytes()).await?;
                stdout.write_all(b"\n").await?;
            }
            Err(e) => tracing::error!(error = %e, "Failed to serialize record"),
        }
    }
    stdout.flush().await
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => {},
                    _ = sigterm.recv() => {},
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to install SIGTERM handler");
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }

    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }

    tracing::info!("Shutdown signal received");
}
