use std::path::PathBuf;
use std::sync::Arc;

use career_portal::client::HttpPortalClient;
use career_portal::config::{ApiConfig, AppConfig};
use career_portal::error::AppError;
use career_portal::telemetry;
use career_portal::workflows::applications::{ApplicationId, FormField, ResumeFile};
use career_portal::workflows::jobs::JobId;
use clap::{Args, Parser, Subcommand};
use tracing::{info, warn};

use crate::session::{Session, StatusMode};

#[derive(Parser, Debug)]
#[command(
    name = "portal",
    about = "Browse open positions, apply with a résumé, and track application status",
    version
)]
struct Cli {
    /// Override the configured job service base URL
    #[arg(long, global = true)]
    api_url: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Browse posted jobs
    Jobs {
        #[command(subcommand)]
        command: JobsCommand,
    },
    /// Submit an application for a job
    Apply(ApplyArgs),
    /// Show the processing status of a submitted application
    Status(StatusArgs),
}

#[derive(Subcommand, Debug)]
enum JobsCommand {
    /// List jobs, newest first as returned by the service
    List(ListArgs),
    /// Show the full posting for one job
    Show {
        job_id: String,
    },
}

#[derive(Args, Debug, Default)]
struct ListArgs {
    /// Only list jobs in this category
    #[arg(long)]
    category: Option<String>,
    /// Also write the listing to a CSV file
    #[arg(long)]
    export_csv: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct ApplyArgs {
    job_id: String,
    #[arg(long)]
    full_name: String,
    #[arg(long)]
    email: String,
    #[arg(long)]
    phone: String,
    /// PDF, DOC, or DOCX résumé, at most 5MB
    #[arg(long)]
    resume: PathBuf,
    #[arg(long)]
    linkedin: Option<String>,
    #[arg(long)]
    portfolio: Option<String>,
    #[arg(long)]
    cover_letter: Option<String>,
    #[arg(long)]
    additional_info: Option<String>,
    /// Print the status route instead of opening the status view
    #[arg(long, conflicts_with = "watch")]
    no_follow: bool,
    /// Keep polling the status view until Ctrl-C
    #[arg(long)]
    watch: bool,
}

impl ApplyArgs {
    fn fields(&self) -> Vec<(FormField, String)> {
        let optional = [
            (FormField::LinkedIn, &self.linkedin),
            (FormField::Portfolio, &self.portfolio),
            (FormField::CoverLetter, &self.cover_letter),
            (FormField::AdditionalInfo, &self.additional_info),
        ];

        let mut fields = vec![
            (FormField::FullName, self.full_name.clone()),
            (FormField::Email, self.email.clone()),
            (FormField::Phone, self.phone.clone()),
        ];
        fields.extend(
            optional
                .into_iter()
                .filter_map(|(field, value)| value.clone().map(|value| (field, value))),
        );
        fields
    }

    fn status_mode(&self) -> Option<StatusMode> {
        match (self.no_follow, self.watch) {
            (true, _) => None,
            (false, true) => Some(StatusMode::Watch),
            (false, false) => Some(StatusMode::Once),
        }
    }
}

#[derive(Args, Debug)]
struct StatusArgs {
    application_id: String,
    /// Keep polling until Ctrl-C
    #[arg(long)]
    watch: bool,
}

async fn ctrl_c() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "could not listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let mut config = AppConfig::load()?;

    if let Some(api_url) = cli.api_url.as_deref() {
        config.api.base_url = ApiConfig::normalize_base_url(api_url)?;
    }

    telemetry::init(&config.telemetry, config.environment)?;

    let client = HttpPortalClient::new(&config.api)?;
    info!(environment = ?config.environment, base_url = %client.base_url(), "portal client ready");
    let session = Session::new(Arc::new(client), config.tracking);
    let mut stdout = std::io::stdout().lock();

    match cli.command {
        Command::Jobs {
            command: JobsCommand::List(args),
        } => {
            session
                .list_jobs(args.category, args.export_csv.as_deref(), &mut stdout)
                .await?;
        }
        Command::Jobs {
            command: JobsCommand::Show { job_id },
        } => {
            session
                .show_job(&JobId::from(job_id.as_str()), &mut stdout)
                .await?;
        }
        Command::Apply(args) => {
            let resume = ResumeFile::from_path(&args.resume)?;
            session
                .apply(
                    JobId::from(args.job_id.as_str()),
                    args.fields(),
                    resume,
                    args.status_mode(),
                    ctrl_c(),
                    &mut stdout,
                )
                .await?;
        }
        Command::Status(args) => {
            let mode = if args.watch {
                StatusMode::Watch
            } else {
                StatusMode::Once
            };
            session
                .track(
                    ApplicationId::from(args.application_id.as_str()),
                    mode,
                    ctrl_c(),
                    &mut stdout,
                )
                .await?;
        }
    }
    Ok(())
}
