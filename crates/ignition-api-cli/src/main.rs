//! # Ignition API CLI
//!
//! Command-line access to the gateway configuration API for inspecting
//! resources, projects and redundancy settings, and for encrypting secrets.
//!
//! Connection settings come from the environment (see [`CliConfig`]).

use anyhow::{Context, Result};
use ignition_api_client::model::DEFAULT_MODULE;
use ignition_api_client::{CallContext, GatewayClient};
use serde_json::Value;
use std::env;
use tracing_subscriber::EnvFilter;

mod config;

pub use config::CliConfig;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        print_help();
        return Ok(());
    }

    let command = args[1].as_str();
    if matches!(command, "help" | "--help" | "-h") {
        print_help();
        return Ok(());
    }

    let config = CliConfig::from_env().context("Failed to load configuration")?;
    let client = GatewayClient::new(config.client_config()).context("Failed to create client")?;
    let ctx = CallContext::background();

    tracing::debug!(host = %config.host, command, "running command");

    match command {
        "get" => {
            if args.len() < 4 {
                eprintln!("Usage: ignition-api get <type> <name> [module]");
                std::process::exit(1);
            }
            let module = args.get(4).map_or(DEFAULT_MODULE, String::as_str);
            let resource = client
                .get_resource::<Value>(&ctx, module, &args[2], &args[3])
                .await
                .with_context(|| format!("Failed to read {module}/{}/{}", args[2], args[3]))?;
            print_json(&resource)?;
        }
        "delete" => {
            if args.len() < 5 {
                eprintln!("Usage: ignition-api delete <type> <name> <signature> [module]");
                std::process::exit(1);
            }
            let module = args.get(5).map_or(DEFAULT_MODULE, String::as_str);
            client
                .delete_resource(&ctx, module, &args[2], &args[3], &args[4])
                .await
                .with_context(|| format!("Failed to delete {module}/{}/{}", args[2], args[3]))?;
            tracing::info!(module, kind = %args[2], name = %args[3], "resource deleted");
        }
        "project" => {
            if args.len() < 3 {
                eprintln!("Usage: ignition-api project <name>");
                std::process::exit(1);
            }
            let project = client
                .get_project(&ctx, &args[2])
                .await
                .with_context(|| format!("Failed to read project {}", args[2]))?;
            print_json(&project)?;
        }
        "encrypt" => {
            if args.len() < 3 {
                eprintln!("Usage: ignition-api encrypt <plaintext>");
                std::process::exit(1);
            }
            let secret = client
                .encrypt_secret(&ctx, &args[2])
                .await
                .context("Failed to encrypt secret")?;
            print_json(&secret)?;
        }
        "redundancy" => {
            let settings = client
                .get_redundancy_config(&ctx)
                .await
                .context("Failed to read redundancy settings")?;
            print_json(&settings)?;
        }
        cmd => {
            eprintln!("Unknown command: {cmd}");
            print_help();
            std::process::exit(1);
        }
    }

    Ok(())
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    let text = serde_json::to_string_pretty(value).context("Failed to render JSON")?;
    println!("{text}");
    Ok(())
}

fn print_help() {
    println!(
        r#"Ignition API CLI

USAGE:
    ignition-api <COMMAND> [ARGS]

COMMANDS:
    get <type> <name> [module]                 Show a resource (module defaults to "ignition")
    delete <type> <name> <signature> [module]  Delete one revision of a resource
    project <name>                             Show a project
    encrypt <plaintext>                        Encrypt a secret for use in resource configs
    redundancy                                 Show the redundancy settings
    help                                       Show this help message

ENVIRONMENT:
    IGNITION_HOST                 Gateway base URL (required)
    IGNITION_TOKEN                API token (required)
    IGNITION_ALLOW_INSECURE_TLS   Skip certificate verification (default false)
    IGNITION_TIMEOUT_SECS         Per-request timeout in seconds (default 10)
    RUST_LOG                      Log filter (default info)

EXAMPLES:
    ignition-api get database-connection main-db
    ignition-api get alarm-notification-profile ops com.inductiveautomation.alarm-notification
    ignition-api encrypt "hunter2"
"#
    );
}
