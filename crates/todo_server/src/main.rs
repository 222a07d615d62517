use clap::Parser;
use std::path::PathBuf;
use todo_web::config::parse_timeout_secs;
use todo_web::ServerConfig;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Todo list web server
#[derive(Parser, Debug)]
#[command(name = "todo_server")]
#[command(about = "Serve the todo list web app and its JSON API", long_about = None)]
struct Args {
    /// Address to bind (overrides APP_HOST)
    #[arg(long)]
    host: Option<String>,

    /// Port to bind (overrides APP_PORT)
    #[arg(short, long)]
    port: Option<u16>,

    /// SQLite database file (overrides TODO_DB_PATH)
    #[arg(long)]
    db: Option<PathBuf>,

    /// Directory holding session files (overrides TODO_SESSION_DIR)
    #[arg(long)]
    sessions: Option<PathBuf>,

    /// Session idle timeout in seconds (overrides TODO_SESSION_TIMEOUT)
    #[arg(long, value_name = "SECS", value_parser = clap::value_parser!(i64).range(1..))]
    session_timeout: Option<i64>,

    /// Number of HTTP workers (overrides APP_WORKERS)
    #[arg(short, long)]
    workers: Option<usize>,
}

impl Args {
    fn apply(self, mut config: ServerConfig) -> ServerConfig {
        if let Some(host) = self.host {
            config.host = host;
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(db) = self.db {
            config.database_path = db;
        }
        if let Some(sessions) = self.sessions {
            config.session_dir = sessions;
        }
        if let Some(timeout) = self
            .session_timeout
            .and_then(|secs| parse_timeout_secs(&secs.to_string()))
        {
            config.session_timeout = timeout;
        }
        if let Some(workers) = self.workers.filter(|n| *n > 0) {
            config.workers = workers;
        }
        config
    }
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(
            fmt::layer()
                .with_target(true)
                .with_thread_ids(false)
                .with_line_number(true)
                .with_file(false),
        )
        .init();

    let args = Args::parse();
    let config = args.apply(ServerConfig::from_env());

    if let Err(e) = serve(config).await {
        tracing::error!("Failed to run todo server: {:#}", e);
        std::process::exit(1);
    }
}

async fn serve(config: ServerConfig) -> anyhow::Result<()> {
    tracing::info!(
        address = %config.bind_address(),
        database = %config.database_path.display(),
        sessions = %config.session_dir.display(),
        session_timeout_secs = config.session_timeout.num_seconds(),
        "Starting todo server"
    );
    todo_web::server::run(config)
        .await
        .map_err(anyhow::Error::msg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_config() {
        let args = Args::parse_from([
            "todo_server",
            "--port",
            "9001",
            "--db",
            "/tmp/x.db",
            "--workers",
            "2",
        ]);
        let config = args.apply(ServerConfig::default());

        assert_eq!(config.port, 9001);
        assert_eq!(config.database_path, PathBuf::from("/tmp/x.db"));
        assert_eq!(config.workers, 2);
        assert_eq!(config.host, "127.0.0.1");
    }

    #[test]
    fn test_session_timeout_flag() {
        let args = Args::parse_from(["todo_server", "--session-timeout", "600"]);
        let config = args.apply(ServerConfig::default());
        assert_eq!(config.session_timeout.num_seconds(), 600);

        assert!(Args::try_parse_from(["todo_server", "--session-timeout", "0"]).is_err());
    }

    #[test]
    fn test_no_flags_keep_config() {
        let args = Args::parse_from(["todo_server"]);
        assert_eq!(args.apply(ServerConfig::default()), ServerConfig::default());
    }
}
