use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use log::{info, warn};
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use crate::auth::{Credentials, Token};
use crate::config::{Config, OutputFormat};
use crate::issues::{run_pipeline, ExportOptions, FieldSelection, RawIssue, PROCESSING_START};
use crate::output::{export_report, print_summary, ExportProgress};
use crate::providers::{FileProvider, JiraProvider};
use crate::report::IssueReport;

#[derive(Parser)]
#[command(name = "issuelens")]
#[command(author, version, about = "Jira issue report exporter", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file (defaults to ./issuelens.{toml,json,yaml,yml})
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[arg(short, long, global = true)]
    output: Option<PathBuf>,

    #[arg(short, long, global = true, value_enum)]
    format: Option<OutputFormat>,

    #[arg(short, long, global = true, default_value_t = false)]
    pretty: bool,

    #[command(flatten)]
    export: ExportArgs,
}

#[derive(Args)]
struct ExportArgs {
    /// Comma-separated columns to export (e.g. "Key,Summary,Issue Type")
    #[arg(long, global = true, value_delimiter = ',')]
    fields: Vec<String>,

    /// Skip issues whose status is Closed or Accepted
    #[arg(long, global = true)]
    open_only: bool,

    #[arg(long, global = true)]
    no_severity_pivot: bool,

    #[arg(long, global = true)]
    no_blockers_pivot: bool,

    #[arg(long, global = true)]
    no_bug_resolution_pivot: bool,
}

impl ExportArgs {
    /// Layers command-line flags over the configured export options.
    fn apply(&self, mut options: ExportOptions) -> Result<ExportOptions> {
        if !self.fields.is_empty() {
            options.fields = FieldSelection::from_labels(&self.fields)?;
        }
        options.open_only |= self.open_only;
        options.pivots.severity &= !self.no_severity_pivot;
        options.pivots.blockers &= !self.no_blockers_pivot;
        options.pivots.bug_resolution &= !self.no_bug_resolution_pivot;
        Ok(options)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Export issues matching a JQL query from a Jira server
    Jira {
        #[arg(short, long)]
        server: Option<String>,

        #[arg(short, long)]
        user: Option<String>,

        #[arg(short, long, env = "JIRA_API_TOKEN", hide_env_values = true)]
        token: Option<String>,

        #[arg(short, long)]
        jql: Option<String>,

        #[arg(long)]
        page_size: Option<usize>,

        /// Store server, user, token and JQL in the config file
        #[arg(long, default_value_t = false)]
        save_credentials: bool,
    },
    /// Export issues from a saved Jira search response (JSON)
    File { path: PathBuf },
}

struct JiraArgs<'a> {
    server: &'a Option<String>,
    user: &'a Option<String>,
    token: &'a Option<String>,
    jql: &'a Option<String>,
    page_size: Option<usize>,
    save_credentials: bool,
}

impl Cli {
    fn save_path(&self) -> Option<PathBuf> {
        self.config.clone().or_else(Config::user_config_path)
    }

    async fn fetch_from_jira(
        &self,
        args: JiraArgs<'_>,
        config: &mut Config,
        progress: &ExportProgress,
    ) -> Result<(Vec<RawIssue>, String)> {
        let jira = &mut config.jira;
        let server = args
            .server
            .clone()
            .or_else(|| jira.server.clone())
            .context("No Jira server given (use --server or [jira] server in the config)")?;
        let jql = args
            .jql
            .clone()
            .or_else(|| jira.jql.clone())
            .context("No JQL query given (use --jql or [jira] jql in the config)")?;
        let user = args.user.clone().or_else(|| jira.user.clone());
        let token = args.token.clone().or_else(|| jira.api_token.clone());
        let page_size = args.page_size.unwrap_or(jira.page_size);

        if args.save_credentials {
            jira.server = Some(server.clone());
            jira.user.clone_from(&user);
            jira.api_token.clone_from(&token);
            jira.jql = Some(jql.clone());
            jira.page_size = page_size;

            let path = self
                .save_path()
                .context("No location to save credentials (use --config)")?;
            config.save(&path)?;
            info!("Credentials saved to: {}", path.display());
        }

        let credentials = match (user, token) {
            (Some(user), Some(token)) => Some(Credentials::new(user, Token::from(token))),
            (None, None) => None,
            _ => {
                warn!("Both user and API token are needed for authentication; connecting anonymously");
                None
            }
        };

        let provider = JiraProvider::new(&server, credentials, jql, page_size)?;
        let issues = provider.fetch_issues(|value| progress.set(value)).await?;
        Ok((issues, provider.describe()))
    }

    async fn collect(
        &self,
        config: &mut Config,
        options: &ExportOptions,
        progress: &ExportProgress,
    ) -> Result<IssueReport> {
        let (issues, source) = match &self.command {
            Commands::Jira {
                server,
                user,
                token,
                jql,
                page_size,
                save_credentials,
            } => {
                let args = JiraArgs {
                    server,
                    user,
                    token,
                    jql,
                    page_size: *page_size,
                    save_credentials: *save_credentials,
                };
                self.fetch_from_jira(args, config, progress).await?
            }
            Commands::File { path } => {
                let provider = FileProvider::new(path);
                (provider.fetch_issues()?, provider.describe())
            }
        };

        progress.set(PROCESSING_START);
        progress.start_processing();

        let report = run_pipeline(&issues, options, &source, |value| progress.set(value))?;
        Ok(report)
    }

    fn write_report(&self, config: &Config, report: &IssueReport) -> Result<()> {
        let format = self.format.unwrap_or(config.output.format);
        let pretty = self.pretty || config.output.pretty;

        if format == OutputFormat::Summary {
            if self.output.is_some() {
                warn!("--output is ignored for the summary format");
            }
            print_summary(report);
            return Ok(());
        }

        let path = self.output.clone().or_else(|| {
            let name = timestamped_file_name(report, format);
            match config.output.directory.as_deref() {
                Some(dir) => Some(dir.join(name)),
                // Spreadsheets never go to stdout.
                None if format.is_binary() => Some(PathBuf::from(name)),
                None => None,
            }
        });

        if let Some(path) = path {
            write_to_file(&path, report, format, pretty)?;
            info!("Report written to: {}", path.display());
        } else {
            let stdout = std::io::stdout();
            let mut handle = stdout.lock();
            export_report(report, format, pretty, &mut handle)?;
        }

        Ok(())
    }

    pub async fn execute(&self) -> Result<()> {
        let creates_config = matches!(
            self.command,
            Commands::Jira {
                save_credentials: true,
                ..
            }
        );
        let mut config = if creates_config {
            Config::load_for_update(self.config.as_deref())?
        } else {
            Config::load(self.config.as_deref())?
        };
        let options = self.export.apply(config.export.clone())?;

        let progress = ExportProgress::start();
        let result = self.collect(&mut config, &options, &progress).await;
        let report = match result {
            Ok(report) => {
                progress.finish();
                report
            }
            Err(e) => {
                progress.abandon();
                return Err(e);
            }
        };

        self.write_report(&config, &report)
    }
}

fn timestamped_file_name(report: &IssueReport, format: OutputFormat) -> String {
    format!(
        "jira_issues_{}.{}",
        report.generated_at.format("%Y%m%d_%H%M%S"),
        format.extension()
    )
}

fn write_to_file(
    path: &Path,
    report: &IssueReport,
    format: OutputFormat,
    pretty: bool,
) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create output file: {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    export_report(report, format, pretty, &mut writer)?;
    Ok(())
}
