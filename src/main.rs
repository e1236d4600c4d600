use anyhow::{Context, Result};
use clap::Parser;
use feedicon::{find_icon, Config, FetchOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Get the default config file path (~/.config/feedicon/config.toml)
fn default_config_path() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME environment variable not set")?;
    Ok(PathBuf::from(home)
        .join(".config")
        .join("feedicon")
        .join("config.toml"))
}

/// Writes the icon next to `dst` first, then renames it into place so a failed
/// download never leaves a truncated file behind.
fn save_icon(dst: &Path, content: &[u8]) -> Result<()> {
    let mut part_name = dst.as_os_str().to_owned();
    part_name.push(".part");
    let part_path = PathBuf::from(part_name);

    let mut file = std::fs::File::create(&part_path)
        .with_context(|| format!("Failed to create '{}'", part_path.display()))?;
    file.write_all(content)
        .and_then(|()| file.sync_all())
        .and_then(|()| std::fs::rename(&part_path, dst))
        .inspect_err(|_| {
            let _ = std::fs::remove_file(&part_path);
        })
        .with_context(|| format!("Failed to write icon to '{}'", dst.display()))
}

#[derive(Parser, Debug)]
#[command(name = "feedicon", about = "Find and download a website's favicon")]
struct Args {
    /// Website URL to find the icon for
    website_url: String,

    /// Icon URL declared by the feed (skips HTML discovery)
    #[arg(long, value_name = "URL")]
    icon_url: Option<String>,

    /// User agent to send (defaults to the configured one)
    #[arg(long, value_name = "UA")]
    user_agent: Option<String>,

    /// Fetch through the configured proxy
    #[arg(long)]
    proxy: bool,

    /// Accept self-signed TLS certificates
    #[arg(long)]
    allow_self_signed: bool,

    /// Config file (defaults to ~/.config/feedicon/config.toml)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Write the icon bytes to this file
    #[arg(long, short, value_name = "FILE")]
    output: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config_path = match args.config {
        Some(path) => path,
        None => default_config_path()?,
    };
    let config = Config::load(&config_path)
        .with_context(|| format!("Failed to load config from {}", config_path.display()))?;
    tracing::debug!(config = ?config, "Using configuration");

    let options = FetchOptions {
        user_agent: args.user_agent.unwrap_or_default(),
        fetch_via_proxy: args.proxy,
        allow_self_signed_certificates: args.allow_self_signed,
    };

    let icon = find_icon(
        &config.client_config(),
        &args.website_url,
        args.icon_url.as_deref(),
        options,
    )
    .await
    .with_context(|| format!("Failed to find icon for {}", args.website_url))?;

    println!("hash:      {}", icon.hash());
    println!("mime_type: {}", icon.mime_type());
    println!("size:      {} bytes", icon.content().len());

    if let Some(output) = &args.output {
        save_icon(output, icon.content())?;
        println!("Saved icon to: {}", output.display());
    }

    Ok(())
}
