//! The export run: resolve settings, log in, fetch, preview, export.

use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::time::Duration;

use reqwest::Url;

use super::args::Cli;
use super::prompt::Prompter;
use crate::core::fetcher::{DEFAULT_ROW_LIMIT, DEFAULT_TABLE, FetchRequest, fetch_table};
use crate::core::models::ColumnFilter;
use crate::core::session::{Credentials, Session, base_url};
use crate::error::{PmaError, Result};
use crate::export::{ExportFormat, choice_list, export_table};
use crate::render::{Reporter, render_preview};
use crate::storage::{Config, ConfigSource};

/// Everything a run needs, after flags, config and prompts were merged.
#[derive(Debug, Clone)]
pub struct RunSettings {
    pub base_url: Url,
    pub credentials: Credentials,
    pub request: FetchRequest,
    /// `None` means ask after the preview.
    pub format: Option<ExportFormat>,
    pub output_dir: PathBuf,
    pub timeout: Duration,
}

/// First of flag value and config value, with where it came from.
fn pick<T>(flag: Option<T>, file: Option<T>) -> Option<(T, ConfigSource)> {
    flag.map(|v| (v, ConfigSource::Cli))
        .or_else(|| file.map(|v| (v, ConfigSource::ConfigFile)))
}

fn missing(flag: &str) -> PmaError {
    PmaError::InvalidInput(format!("{flag} is required with --batch"))
}

impl RunSettings {
    /// Merge flags, config file and interactive answers.
    ///
    /// Questions are asked in a fixed order and only for values no other
    /// source provided. With `--batch` nothing is asked.
    ///
    /// # Errors
    ///
    /// Returns [`PmaError::InvalidInput`] for unusable answers or, in batch
    /// mode, missing required values.
    pub fn resolve<R: BufRead, W: Write>(
        cli: &Cli,
        config: &Config,
        prompter: &mut Prompter<R, W>,
    ) -> Result<Self> {
        let conn = &config.connection;
        let batch = cli.batch;

        let (https, source) = match pick(cli.scheme.map(|s| s.is_https()), config.https()) {
            Some(found) => found,
            None if batch => (false, ConfigSource::Default),
            None => (prompter.confirm("Use HTTPS? [y/n]:")?, ConfigSource::Prompt),
        };
        tracing::debug!(https, %source, "scheme resolved");

        let (host, source) = match pick(cli.host.clone(), conn.host.clone()) {
            Some(found) => found,
            None if batch => return Err(missing("--host")),
            None => (
                prompter.ask_required("Enter phpMyAdmin domain or IP:", "host")?,
                ConfigSource::Prompt,
            ),
        };
        tracing::debug!(%host, %source, "host resolved");
        let base_url = base_url(https, &host)?;

        let (username, _) = match pick(cli.user.clone(), conn.username.clone()) {
            Some(found) => found,
            None if batch => return Err(missing("--user")),
            None => (
                prompter.ask_required("Enter phpMyAdmin username:", "username")?,
                ConfigSource::Prompt,
            ),
        };

        let password = match cli.password.clone() {
            Some(password) => password,
            None if batch => return Err(missing("--password")),
            None => prompter.ask("Enter phpMyAdmin password:")?,
        };

        let (database, source) = match pick(cli.db.clone(), conn.database.clone()) {
            Some(found) => found,
            None if batch => return Err(missing("--db")),
            None => (
                prompter.ask_required("Enter database name:", "database name")?,
                ConfigSource::Prompt,
            ),
        };
        tracing::debug!(%database, %source, "database resolved");

        let table = pick(cli.table.clone(), conn.table.clone())
            .map_or_else(|| DEFAULT_TABLE.to_string(), |(t, _)| t.trim().to_string());

        let limit = match cli.limit {
            Some(limit) => limit,
            None if batch => DEFAULT_ROW_LIMIT,
            None => {
                if prompter.confirm("Limit total number of rows? [y/n]:")? {
                    prompter.ask_number("Enter total number of rows to fetch:")?
                } else {
                    DEFAULT_ROW_LIMIT
                }
            }
        };

        let columns = match cli.columns.as_deref() {
            Some(list) => Some(ColumnFilter::parse(list)),
            None if batch => None,
            None => {
                if prompter.confirm("Select specific columns? [y/n]:")? {
                    Some(ColumnFilter::parse(
                        &prompter.ask("Enter columns comma-separated (exact names):")?,
                    ))
                } else {
                    None
                }
            }
        };

        let format = cli
            .format
            .map(ExportFormat::from)
            .or_else(|| config.export_format())
            .or_else(|| batch.then_some(ExportFormat::None));

        let output_dir = cli
            .output_dir
            .clone()
            .or_else(|| config.export.output_dir.clone())
            .unwrap_or_else(|| PathBuf::from("."));

        let timeout = cli
            .timeout
            .map_or_else(|| config.timeout(), Duration::from_secs);

        Ok(Self {
            base_url,
            credentials: Credentials::new(username, password),
            request: FetchRequest::new(database)
                .with_table(table)
                .with_columns(columns)
                .with_limit(limit),
            format,
            output_dir,
            timeout,
        })
    }
}

/// Run against the process's stdin/stdout.
///
/// # Errors
///
/// Returns the first error of any step; nothing is retried.
pub async fn execute(cli: &Cli, reporter: Reporter) -> Result<Option<PathBuf>> {
    cli.validate()?;
    let config = Config::load()?;
    tracing::debug!(
        interactive = crate::util::env::stdin_is_tty(),
        batch = cli.batch,
        "configuration loaded"
    );
    let stdin = std::io::stdin();
    let mut prompter = Prompter::new(stdin.lock(), std::io::stdout(), reporter);
    run(cli, &config, &mut prompter, reporter).await
}

/// The full run with an explicit prompt source.
///
/// Returns the path of the written file, or `None` when nothing was exported.
///
/// # Errors
///
/// Returns the first error of any step; nothing is retried.
pub async fn run<R: BufRead, W: Write>(
    cli: &Cli,
    config: &Config,
    prompter: &mut Prompter<R, W>,
    reporter: Reporter,
) -> Result<Option<PathBuf>> {
    let settings = RunSettings::resolve(cli, config, prompter)?;
    tracing::info!(
        base_url = %settings.base_url,
        database = %settings.request.database,
        table = %settings.request.table,
        limit = settings.request.limit,
        "starting export run"
    );

    let session = Session::login(
        settings.base_url.clone(),
        &settings.credentials,
        settings.timeout,
        &reporter,
    )
    .await?;
    let table = fetch_table(&session, &settings.request, &reporter).await?;

    reporter.heading("Preview of data:");
    reporter.block(&render_preview(&table));

    let format = match settings.format {
        Some(format) => format,
        None => ExportFormat::from_choice(
            &prompter.ask_emphasized(&format!("Export format? {}:", choice_list()))?,
        ),
    };
    export_table(&table, format, &settings.output_dir, &reporter)
}
