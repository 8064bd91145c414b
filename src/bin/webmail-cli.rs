#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc)]

//! CLI for a webmail REST API account

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use webmail_client::{
    ApiConfig, EmailMessage, Folder, Mailbox, SessionStore, WebmailClient,
};

#[derive(Parser)]
#[command(name = "webmail-cli")]
#[command(about = "Command line client for a webmail REST API")]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Log in and persist the session
    Login,

    /// Clear the persisted session
    Logout,

    /// List emails in a folder
    List {
        /// Folder to list from
        #[arg(long, default_value = "inbox")]
        folder: Folder,

        /// Maximum number of emails to show
        #[arg(long, default_value = "20")]
        limit: usize,

        /// Filter by a search term (subject, sender, or body)
        #[arg(long)]
        search: Option<String>,
    },

    /// Show a single email by id
    Show {
        /// Email id
        id: String,
    },

    /// Send an email
    Send {
        /// Recipient address (repeatable)
        #[arg(long, required = true)]
        to: Vec<String>,

        /// Subject line
        #[arg(long)]
        subject: String,

        /// Message body
        #[arg(long, default_value = "")]
        body: String,

        /// CC address (repeatable)
        #[arg(long)]
        cc: Vec<String>,
    },

    /// Move an email to another folder
    Move {
        /// Email id
        id: String,

        /// Destination folder
        folder: Folder,
    },

    /// Delete an email permanently
    Delete {
        /// Email id
        id: String,
    },

    /// Show per-folder counters and storage usage
    Stats,

    /// Change the account password
    Passwd {
        /// Current password
        #[arg(long)]
        current: String,

        /// New password
        #[arg(long)]
        new: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let config = ApiConfig::from_env()?;
    let store = config.session_dir.clone().map_or_else(
        SessionStore::default_location,
        SessionStore::new,
    );
    let client = WebmailClient::with_session_store(&config, store);

    match &args.command {
        Command::Login => {
            let profile = client.login(&config.email, &config.password).await?;
            if args.json {
                println!("{}", serde_json::to_string_pretty(&profile)?);
            } else {
                println!("Logged in as {}", profile.email);
            }
            return Ok(());
        }
        Command::Logout => {
            client.logout()?;
            println!("Logged out");
            return Ok(());
        }
        _ => {}
    }

    // Every other command needs an active session: resume the
    // persisted one, or log in fresh with the configured credentials.
    if !client.restore_session()? {
        client.login(&config.email, &config.password).await?;
    }
    let mut mailbox = Mailbox::new(client);

    match &args.command {
        Command::Login | Command::Logout => unreachable!("handled above"),
        Command::List {
            folder,
            limit,
            search,
        } => {
            cmd_list(&mut mailbox, &args, *folder, *limit, search.as_deref()).await?;
        }
        Command::Show { id } => {
            cmd_show(&mailbox, &args, id).await?;
        }
        Command::Send {
            to,
            subject,
            body,
            cc,
        } => {
            let outgoing = webmail_client::OutgoingEmail {
                to: to.clone(),
                subject: subject.clone(),
                body: body.clone(),
                cc: cc.clone(),
                bcc: Vec::new(),
            };
            let receipt = mailbox.send(&outgoing).await?;
            if args.json {
                println!(
                    "{}",
                    serde_json::json!({ "email_id": receipt.email_id })
                );
            } else {
                println!("Sent {}", receipt.email_id);
            }
        }
        Command::Move { id, folder } => {
            mailbox.move_message(id, *folder).await?;
            println!("Moved {id} to {folder}");
        }
        Command::Delete { id } => {
            mailbox.delete_message(id).await?;
            println!("Deleted {id}");
        }
        Command::Stats => {
            cmd_stats(&mut mailbox, &args).await?;
        }
        Command::Passwd { current, new } => {
            mailbox.change_password(current, new).await?;
            println!("Password changed");
        }
    }

    Ok(())
}

async fn cmd_list(
    mailbox: &mut Mailbox,
    args: &Args,
    folder: Folder,
    limit: usize,
    search: Option<&str>,
) -> anyhow::Result<()> {
    mailbox.open_folder(folder).await?;

    let matches = search.map_or_else(
        || mailbox.messages(folder).iter().collect::<Vec<_>>(),
        |term| mailbox.search(term),
    );
    let display: Vec<&EmailMessage> = matches.into_iter().take(limit).collect();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&display)?);
    } else {
        print_email_table(&display);
    }

    Ok(())
}

async fn cmd_show(mailbox: &Mailbox, args: &Args, id: &str) -> anyhow::Result<()> {
    let email = mailbox.message(id).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&email)?);
    } else {
        print_email_detail(&email);
    }

    Ok(())
}

async fn cmd_stats(mailbox: &mut Mailbox, args: &Args) -> anyhow::Result<()> {
    mailbox.refresh_stats().await?;
    let stats = mailbox.stats();

    if args.json {
        println!("{}", serde_json::to_string_pretty(stats)?);
    } else {
        for folder in Folder::ALL {
            println!("{:<8} {}", folder.as_str(), stats.count_for(folder));
        }
        println!("{:<8} {}", "unread", stats.unread);
        println!(
            "storage  {} / {} MB",
            stats.storage_used, stats.storage_quota
        );
    }

    Ok(())
}

fn print_email_table(emails: &[&EmailMessage]) {
    if emails.is_empty() {
        println!("No emails found.");
        return;
    }

    let header = format!(
        "{:<10} {:<17} {:<30} {}",
        "ID", "Date", "From", "Subject"
    );
    println!("{header}");
    println!("{}", "-".repeat(100));

    for email in emails {
        println!(
            "{:<10} {:<17} {:<30} {}",
            email.id,
            email.timestamp.format("%Y-%m-%d %H:%M"),
            truncate(&email.from, 28),
            truncate(&email.subject, 40),
        );
    }

    println!("\n{} email(s)", emails.len());
}

fn print_email_detail(email: &EmailMessage) {
    println!("ID:      {}", email.id);
    println!(
        "Date:    {}",
        email.timestamp.format("%Y-%m-%d %H:%M:%S")
    );
    println!("From:    {}", email.from);
    println!("To:      {}", email.to.join(", "));

    if !email.cc.is_empty() {
        println!("CC:      {}", email.cc.join(", "));
    }

    println!("Subject: {}", email.subject);
    println!("Folder:  {}", email.folder);
    println!("Read:    {}", if email.read { "yes" } else { "no" });

    if !email.attachments.is_empty() {
        println!("Attachments: {}", email.attachments.join(", "));
    }

    println!("\n--- Body ---\n");
    println!("{}", email.body);
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{truncated}...")
    }
}
