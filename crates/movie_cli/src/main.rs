//! `movies` command-line entry point.
//!
//! # Responsibility
//! - Assemble configuration, start logging, open storage.
//! - Hand control to the interactive menu loop.
//!
//! Startup failures (bad config, unusable database) are fatal; everything
//! after that is reported inside the loop.

mod args;
mod console;
mod menu;

use anyhow::Context;
use args::Args;
use clap::Parser;
use console::{Console, ExportSettings};
use log::info;
use movie_core::db::open_db;
use movie_core::{
    absolute_log_dir, init_logging, load_template, MovieService, OmdbClient,
    SqliteMovieRepository,
};
use std::io;

fn main() -> anyhow::Result<()> {
    // A missing .env is fine; real environment variables still apply.
    dotenv::dotenv().ok();

    let config = Args::parse().into_config()?;
    config.validate()?;

    let log_dir = absolute_log_dir(&config.log_dir).context("cannot resolve log directory")?;
    init_logging(&config.log_level, &log_dir).map_err(anyhow::Error::msg)?;

    let conn = open_db(&config.db_path).with_context(|| {
        format!(
            "could not open movie database `{}`",
            config.db_path.display()
        )
    })?;
    let source = OmdbClient::new(
        config.api_url.as_str(),
        config.api_key.as_str(),
        config.request_timeout(),
    )
    .context("could not set up the OMDb client")?;
    let template = load_template(config.template_path.as_deref())
        .context("could not read the website template")?;

    info!("event=cli_ready module=cli status=ok");

    let service = MovieService::new(SqliteMovieRepository::new(&conn));
    let export = ExportSettings {
        template,
        site_title: config.site_title.clone(),
        output_dir: config.output_dir.clone(),
    };
    let stdin = io::stdin();
    let mut console = Console::new(service, source, export, stdin.lock(), io::stdout());
    console.run()?;

    info!("event=cli_exit module=cli status=ok");
    Ok(())
}
