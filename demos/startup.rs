//! Startup routine collecting every setup failure before giving up
//!
//! Run with `RUST_LOG=envtag=debug` to see each field being bound.

use std::net::SocketAddr;
use std::path::PathBuf;

use envtag::{Binder, EnvConfig, Group};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Default, EnvConfig)]
struct Config {
    // Required: no default
    #[env("DATABASE_URL")]
    pub database_url: String,

    #[env("LISTEN=127.0.0.1:8080")]
    pub listen: Option<SocketAddr>,

    #[env("DATA_DIR=/var/lib/demo")]
    pub data_dir: PathBuf,

    #[env("WORKERS=4")]
    pub workers: u16,

    #[env("ALLOWED_ORIGINS=[],json")]
    pub allowed_origins: Vec<String>,
}

fn open_database(url: &str) -> anyhow::Result<String> {
    anyhow::ensure!(
        url.starts_with("postgres://"),
        "unsupported database url '{url}'"
    );
    Ok(url.to_string())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // Set environment variables for demonstration
    std::env::set_var("DATABASE_URL", "postgres://localhost/demo");
    std::env::set_var("ALLOWED_ORIGINS", r#"["https://example.com"]"#);

    let mut group = Group::new();

    let (config, outcome) = Binder::default().bind::<Config>();
    let config = group.append(config, outcome);
    let database = group.take(open_database(&config.database_url));

    // Panics with every recorded error at once
    group.must_succeed();

    println!("Configuration loaded:");
    println!("  Database: {}", database.unwrap_or_default());
    println!("  Listen: {:?}", config.listen);
    println!("  Data dir: {}", config.data_dir.display());
    println!("  Workers: {}", config.workers);
    println!("  Allowed origins: {:?}", config.allowed_origins);
}
