use std::sync::Arc;

use clap::{Parser, Subcommand};
use eyre::Result;

use promptkeep_core::models::entry::NewEntry;
use promptkeep_history::{EntryStore, ListQuery};
use promptkeep_popup::clipboard::SystemClipboard;
use promptkeep_popup::commands;
use promptkeep_popup::config;
use promptkeep_popup::state::PopupState;
use promptkeep_popup::tabs::LocalTabs;
use promptkeep_relay::site_of;
use promptkeep_storage::FileStore;

#[derive(Parser)]
#[command(name = "promptkeep", version, about = "Saved prompt history")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List saved prompts, most recent first
    List {
        /// Only show prompts whose text or site contains TERM
        #[arg(long, value_name = "TERM")]
        search: Option<String>,
    },
    /// Save a prompt
    Add {
        text: String,
        /// Hostname to record; taken from --url when omitted
        #[arg(long)]
        site: Option<String>,
        #[arg(long)]
        url: Option<String>,
    },
    /// Delete the prompt at INDEX
    Delete { index: usize },
    /// Delete every saved prompt
    Clear,
    /// Copy the prompt at INDEX to the clipboard
    Copy { index: usize },
    /// Print the active configuration
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = config::load_config()?;

    if let Command::Config = cli.command {
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    let kv = FileStore::open(&config.store_path).await?;
    let store = EntryStore::spawn(Arc::new(kv), config.history_settings());
    let state = PopupState::new(
        store,
        Arc::new(LocalTabs::new()),
        Arc::new(SystemClipboard),
    );

    match cli.command {
        Command::List { search } => {
            let query = search.map(ListQuery::search).unwrap_or_default();
            let list = commands::list_entries(&state, query)
                .await
                .map_err(|e| eyre::eyre!(e))?;
            print!("{list}");
        }
        Command::Add { text, site, url } => {
            let site = site
                .or_else(|| url.as_deref().map(site_of))
                .unwrap_or_default();
            let mut draft = NewEntry::new(text).with_site(site);
            if let Some(url) = url {
                draft = draft.with_source_url(url);
            }
            let outcome = commands::add_entry(&state, draft)
                .await
                .map_err(|e| eyre::eyre!(e))?;
            println!("{outcome:?}");
        }
        Command::Delete { index } => {
            let deleted = commands::delete_entry(&state, index)
                .await
                .map_err(|e| eyre::eyre!(e))?;
            if !deleted {
                eyre::bail!("no entry at index {index}");
            }
        }
        Command::Clear => {
            commands::clear_entries(&state)
                .await
                .map_err(|e| eyre::eyre!(e))?;
        }
        Command::Copy { index } => {
            let text = commands::entry_text(&state, index)
                .await
                .map_err(|e| eyre::eyre!(e))?;
            commands::copy_entry(&state, &text)
                .await
                .map_err(|e| eyre::eyre!(e))?;
            println!("Copied");
        }
        Command::Config => {}
    }

    Ok(())
}
