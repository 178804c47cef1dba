use std::io::{self, Write};

use clap::Parser;

use cold_outreach::config::{self, Settings, SmtpSettings};
use cold_outreach::logging::init_logger;
use cold_outreach::mailer::{Mailer, OutgoingEmail, SmtpMailer};
use cold_outreach::models::Language;
use cold_outreach::templates::TemplateRenderer;

#[derive(Parser, Debug)]
#[command(
    name = "send_test_email",
    about = "Send one sample outreach email per language to a test inbox"
)]
struct Args {
    /// Inbox that receives the samples.
    #[arg(long)]
    to: String,

    /// Only send this language (english, arabic or french).
    #[arg(long)]
    language: Option<String>,

    #[arg(long, default_value = "Ahmed")]
    first_name: String,

    #[arg(long, default_value = "Test Company")]
    company: String,

    #[arg(long, default_value = "Managing Director")]
    job_title: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    config::load_dotenv();
    init_logger(None);

    let args = Args::parse();
    if !args.to.contains('@') {
        writeln!(io::stderr(), "error: --to must be an email address")?;
        std::process::exit(1);
    }

    let languages: Vec<Language> = match args.language.as_deref() {
        Some(raw) => match raw.parse::<Language>() {
            Ok(language) => vec![language],
            Err(()) => {
                writeln!(
                    io::stderr(),
                    "error: unsupported language '{raw}'. Use english, arabic or french."
                )?;
                std::process::exit(1);
            }
        },
        None => Language::ALL.to_vec(),
    };

    let settings = Settings::from_env()?;
    let mailer = SmtpMailer::from_settings(&SmtpSettings::from_env()?)?;
    if !mailer.verify().await? {
        writeln!(io::stderr(), "error: SMTP relay rejected the connection test")?;
        std::process::exit(1);
    }

    let renderer = TemplateRenderer::new(settings.sender.clone());
    let mut failures = 0usize;

    for language in languages {
        let mut rendered = renderer.render(
            language,
            &args.first_name,
            &args.company,
            &args.job_title,
            &settings.booking_link,
        );
        rendered.subject = format!("[TEST {}] {}", language.as_str().to_uppercase(), rendered.subject);

        let email = OutgoingEmail::new(&args.to, "Test Inbox", rendered);
        match mailer.send(&email).await {
            Ok(()) => println!("Sent {language} sample to {}", args.to),
            Err(err) => {
                failures += 1;
                log::error!("failed to send {} sample: {}", language, err);
            }
        }
    }

    if failures > 0 {
        std::process::exit(1);
    }
    Ok(())
}
