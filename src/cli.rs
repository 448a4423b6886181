//! Command-line interface for tasktube
//!
//! A single command: parse flags, resolve configuration, and hand off
//! to the terminal UI.

use std::path::PathBuf;

use clap::Parser;

use crate::config::Config;
use crate::error::Result;
use crate::task::Filter;
use crate::transport::TaskClient;

/// tasktube - terminal client for the TaskTube task API
///
/// Lists, filters, creates, edits, toggles, and deletes tasks against
/// a REST backend.
#[derive(Parser, Debug)]
#[command(name = "tasktube")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Base URL of the task API (overrides the config file)
    #[arg(long, env = "TASKTUBE_API_URL")]
    pub api_url: Option<String>,

    /// Path to the configuration file
    #[arg(long, env = "TASKTUBE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Initial filter: all, active, completed, upcoming, today
    #[arg(long, default_value = "all")]
    pub filter: String,
}

impl Cli {
    /// Execute the CLI: resolve config and start the viewer.
    pub fn run(self) -> Result<()> {
        let config = Config::load(self.config.as_deref())?;
        let filter = Filter::parse(&self.filter)?;
        let base_url = self.api_url.unwrap_or(config.api.base_url);
        tracing::debug!(%base_url, filter = filter.id(), "starting viewer");

        let client = TaskClient::new(&base_url)?;
        crate::ui::run(client, filter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_args_verify() {
        Cli::command().debug_assert();
    }

    #[test]
    fn filter_flag_defaults_to_all() {
        let cli = Cli::parse_from(["tasktube"]);
        assert_eq!(cli.filter, "all");
    }
}
