//! Command-line flags and configuration assembly.
//!
//! Precedence, lowest first: built-in defaults, `--config` TOML file,
//! environment (including `.env`), flags.

use clap::Parser;
use movie_core::{AppConfig, FileConfig};
use std::path::PathBuf;

/// Fallback variable name for the OMDb key, kept for existing `.env` files.
const LEGACY_API_KEY_VAR: &str = "API_KEY";

#[derive(Debug, Parser)]
#[command(name = "movies", version, about = "Personal movie collection manager")]
pub struct Args {
    /// Optional TOML config file.
    #[arg(short, long, env = "MOVIES_CONFIG")]
    pub config: Option<PathBuf>,

    /// SQLite database file.
    #[arg(long, env = "MOVIES_DB_PATH")]
    pub db_path: Option<PathBuf>,

    /// OMDb API key.
    #[arg(long, env = "OMDB_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// OMDb endpoint.
    #[arg(long, env = "OMDB_API_URL")]
    pub api_url: Option<String>,

    /// Remote request timeout in seconds.
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Directory for rolling log files.
    #[arg(long, env = "MOVIES_LOG_DIR")]
    pub log_dir: Option<PathBuf>,

    /// trace|debug|info|warn|error
    #[arg(long, env = "MOVIES_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// HTML template with __TEMPLATE_TITLE__ and __TEMPLATE_MOVIE_GRID__.
    #[arg(long)]
    pub template: Option<PathBuf>,

    /// Where index.html and histograms are written.
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Page title of the generated website.
    #[arg(long)]
    pub site_title: Option<String>,
}

impl Args {
    /// Builds the effective configuration; does not validate it.
    pub fn into_config(self) -> Result<AppConfig, movie_core::ConfigError> {
        let mut config = AppConfig::default();
        if let Some(path) = self.config.as_deref() {
            config = config.merge_file(FileConfig::load(path)?);
        }

        let api_key = self
            .api_key
            .or_else(|| std::env::var(LEGACY_API_KEY_VAR).ok());

        Ok(config.merge_file(FileConfig {
            db_path: self.db_path,
            api_key,
            api_url: self.api_url,
            request_timeout_secs: self.timeout,
            log_dir: self.log_dir,
            log_level: self.log_level,
            template_path: self.template,
            output_dir: self.output_dir,
            site_title: self.site_title,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::Args;
    use clap::Parser;
    use std::path::PathBuf;

    #[test]
    fn flags_override_defaults() {
        let args = Args::parse_from([
            "movies",
            "--db-path",
            "/tmp/films.db",
            "--api-key",
            "secret",
            "--timeout",
            "3",
            "--site-title",
            "Friday Night",
        ]);
        let config = args.into_config().unwrap();
        assert_eq!(config.db_path, PathBuf::from("/tmp/films.db"));
        assert_eq!(config.api_key, "secret");
        assert_eq!(config.request_timeout_secs, 3);
        assert_eq!(config.site_title, "Friday Night");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn config_file_is_overridden_by_flags() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("movies.toml");
        std::fs::write(
            &path,
            "api_key = \"from-file\"\noutput_dir = \"site\"\nsite_title = \"File Title\"\n",
        )
        .unwrap();

        let args = Args::parse_from([
            "movies",
            "--config",
            path.to_str().unwrap(),
            "--site-title",
            "Flag Title",
        ]);
        let config = args.into_config().unwrap();
        assert_eq!(config.output_dir, PathBuf::from("site"));
        assert_eq!(config.site_title, "Flag Title");
    }
}
