use std::io::{self, Write};
use std::path::PathBuf;

use clap::{Parser, Subcommand};

use cold_outreach::config::{self, Settings, SmtpSettings};
use cold_outreach::logging::init_logger;
use cold_outreach::mailer::{Mailer, SmtpMailer};
use cold_outreach::models::FollowUpStage;
use cold_outreach::source::load_contacts;
use cold_outreach::stats::CampaignStats;
use cold_outreach::templates::TemplateRenderer;
use cold_outreach::{CampaignDriver, CampaignError, ContactStore, RunSummary};

#[derive(Parser, Debug)]
#[command(
    name = "outreach",
    about = "Send and track a multilingual cold email campaign"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Send initial emails to a slice of a contact list.
    Send {
        /// Contact list exported from the prospecting tool.
        #[arg(long)]
        csv: PathBuf,
        /// Offset of the first contact to email.
        #[arg(long, default_value_t = 0)]
        start: usize,
        /// Maximum emails this run (defaults to, and is capped at, MAX_EMAILS_PER_DAY).
        #[arg(long)]
        max: Option<usize>,
        /// Simulate sending without contacting the SMTP relay.
        #[arg(long)]
        dry_run: bool,
    },
    /// Render the first contacts' emails without sending.
    Preview {
        #[arg(long)]
        csv: PathBuf,
        #[arg(long, default_value_t = 5)]
        count: usize,
    },
    /// Send a follow-up stage to every contact that is due for it.
    FollowUp {
        /// Follow-up stage (1, 2 or 3).
        #[arg(long, value_parser = clap::value_parser!(u8).range(1..=3))]
        stage: u8,
        #[arg(long)]
        max: Option<usize>,
        #[arg(long)]
        dry_run: bool,
    },
    /// Record a reply from a contact.
    Reply {
        #[arg(long)]
        email: String,
        #[arg(long, default_value = "")]
        content: String,
    },
    /// Record a scheduled meeting.
    Meeting {
        #[arg(long)]
        email: String,
        #[arg(long)]
        date: String,
    },
    /// Stop all further follow-ups to a contact.
    Unsubscribe {
        #[arg(long)]
        email: String,
    },
    /// Record a delivery bounce.
    Bounce {
        #[arg(long)]
        email: String,
        #[arg(long)]
        status: String,
    },
    /// Print campaign statistics.
    Stats {
        #[arg(long)]
        json: bool,
    },
}

fn connect_mailer(dry_run: bool) -> Result<Option<SmtpMailer>, Box<dyn std::error::Error>> {
    if dry_run {
        return Ok(None);
    }
    let smtp = SmtpSettings::from_env()?;
    Ok(Some(SmtpMailer::from_settings(&smtp)?))
}

fn print_summary(summary: &RunSummary) {
    println!(
        "Sent: {}, Failed: {}",
        summary.sent_count, summary.failed_count
    );
    println!("Next batch should start from index: {}", summary.next_start_index);
}

fn report_lookup(found: bool, email: &str, action: &str) -> io::Result<()> {
    if found {
        println!("Recorded {action} for {email}");
    } else {
        writeln!(
            io::stderr(),
            "warning: {email} is not in the tracking table; nothing recorded"
        )?;
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    config::load_dotenv();
    init_logger(config::log_file_from_env().as_deref());

    let cli = Cli::parse();
    let settings = Settings::from_env()?;
    let store = ContactStore::open(&settings.tracking_file)?
        .template_version(settings.template_version.clone());
    let renderer = TemplateRenderer::new(settings.sender.clone());

    match cli.command {
        Command::Send {
            csv,
            start,
            max,
            dry_run,
        } => {
            let mailer = connect_mailer(dry_run)?;
            let driver = CampaignDriver::new(
                &settings,
                &store,
                &renderer,
                mailer.as_ref().map(|m| m as &dyn Mailer),
            );

            let contacts = load_contacts(&csv)?;
            match driver
                .run(&contacts, start, settings.batch_limit(max), dry_run)
                .await
            {
                Ok(summary) => print_summary(&summary),
                Err(CampaignError::Interrupted { summary, source }) => {
                    writeln!(io::stderr(), "error: tracking failed: {source}")?;
                    print_summary(&summary);
                    std::process::exit(1);
                }
                Err(err) => return Err(err.into()),
            }
        }
        Command::Preview { csv, count } => {
            let driver = CampaignDriver::new(&settings, &store, &renderer, None);
            let contacts = load_contacts(&csv)?;
            let previews = driver.preview(&contacts, count);

            println!("\n=== EMAIL PREVIEW (first {} contacts) ===\n", previews.len());
            for preview in &previews {
                println!("{preview}");
            }
        }
        Command::FollowUp {
            stage,
            max,
            dry_run,
        } => {
            let stage = FollowUpStage::from_number(stage)
                .ok_or_else(|| format!("unsupported follow-up stage {stage}"))?;
            let mailer = connect_mailer(dry_run)?;
            let driver = CampaignDriver::new(
                &settings,
                &store,
                &renderer,
                mailer.as_ref().map(|m| m as &dyn Mailer),
            );

            let summary = driver
                .run_follow_ups(stage, settings.batch_limit(max), dry_run)
                .await?;

            println!(
                "{stage}: due {}, sent {}, failed {}, skipped {}",
                summary.due_count, summary.sent_count, summary.failed_count, summary.skipped_count
            );
        }
        Command::Reply { email, content } => {
            let found = store.log_reply(&email, &content)?;
            report_lookup(found, &email, "reply")?;
        }
        Command::Meeting { email, date } => {
            let found = store.log_meeting_scheduled(&email, &date)?;
            report_lookup(found, &email, "meeting")?;
        }
        Command::Unsubscribe { email } => {
            let found = store.mark_unsubscribed(&email)?;
            report_lookup(found, &email, "unsubscribe")?;
        }
        Command::Bounce { email, status } => {
            let found = store.mark_bounced(&email, &status)?;
            report_lookup(found, &email, "bounce")?;
        }
        Command::Stats { json } => {
            let stats = CampaignStats::aggregate(&store.load_all()?);
            if json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                println!("{stats}");
            }
        }
    }

    Ok(())
}
