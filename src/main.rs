//! Bilimanga Downloader - CLI entry point.

use std::process::ExitCode;

use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{fmt, EnvFilter};

use bilimanga_downloader::{
    api::MangaApi,
    cli::Args,
    config::{parse_manga_id, validate_config, Config},
    download::download_manga,
    error::{exit_codes, Error, Result},
    output::{
        create_spinner, print_banner, print_error, print_info, print_manga_stats,
        print_manga_summary, print_success, print_warning,
    },
};

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(e) => {
            print_error(&format!("{}", e));
            match e {
                Error::Config(_)
                | Error::ConfigValidation { .. }
                | Error::MissingConfig(_)
                | Error::InvalidMangaId(_)
                | Error::TomlParse(_) => ExitCode::from(exit_codes::CONFIG_ERROR as u8),
                Error::Api { .. } | Error::Protocol(_) | Error::Network(_) => {
                    ExitCode::from(exit_codes::API_ERROR as u8)
                }
                Error::Archive(_) | Error::DataIntegrity { .. } => {
                    ExitCode::from(exit_codes::DOWNLOAD_ERROR as u8)
                }
                Error::Download(_) => ExitCode::from(exit_codes::SOME_EPISODES_FAILED as u8),
                Error::Cancelled => ExitCode::from(exit_codes::ABORT as u8),
                _ => ExitCode::from(exit_codes::UNEXPECTED_ERROR as u8),
            }
        }
    }
}

async fn run() -> Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Set up logging
    let log_level = if args.debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    fmt().with_env_filter(filter).with_target(false).init();

    print_banner();

    // Load configuration
    let config_path = args.config.clone();
    let mut config = if config_path.exists() {
        Config::load(&config_path)?
    } else {
        print_warning(&format!(
            "Configuration file not found: {}",
            config_path.display()
        ));
        print_info("Using default configuration with CLI arguments");
        Config::default()
    };

    // Merge CLI arguments into config
    args.merge_into_config(&mut config);

    validate_config(&config)?;

    let manga_id = parse_manga_id(config.target.manga.as_deref().unwrap_or_default())?;
    let cookie = config.resolve_cookie()?;

    let api = MangaApi::new(&cookie, &config.account.user_agent, config.request_timeout())?;

    // Validate the session by fetching the profile
    let spinner = create_spinner("Connecting to Bilibili Manga...");
    let user = api.get_user_info().await;
    spinner.finish_and_clear();
    let user = user?;
    if !user.is_login {
        print_warning("Session cookie is not logged in; only free episodes will be available");
    } else {
        print_info(&format!("Logged in as: {}", user.uname));
    }

    let detail = api.get_manga_detail(manga_id).await?;

    print_manga_summary(&detail, &config);

    // Stop in-flight downloads on Ctrl-C
    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupted, cancelling downloads");
            trigger.cancel();
        }
    });

    let state = download_manga(&api, &config, &detail, &cancel).await?;
    print_manga_stats(&state);

    if state.has_failures() {
        print_warning("Some episodes failed or are incomplete; rerun to retry failed episodes");
        return Err(Error::Download(format!(
            "{} episode(s) failed, {} incomplete",
            state.episodes_failed, state.episodes_incomplete
        )));
    }

    print_success(&format!("Finished downloading {}", detail.title));
    Ok(())
}
