mod roster;

use anyhow::{bail, Context, Result};
use ccn_core::preferences::{PreferenceFile, PreferenceStore};
use ccn_core::{ChatEvent, ColoredChatNames, CommandSender, PluginConfig, Server};
use clap::{Parser, Subcommand};
use roster::Roster;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::writer::MakeWriterExt;
use tracing_subscriber::EnvFilter;

/// ColoredChatNames admin tool
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Plugin settings file. Created with defaults when missing.
    #[arg(long, default_value = "Config.toml")]
    config: PathBuf,

    /// Overrides `data_file` from the settings file.
    #[arg(long)]
    data: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print players who turned colored chat names off.
    List,
    /// Flip a player's colored chat names preference.
    Toggle { player: String },
    /// Show how a chat message would be rewritten.
    Preview {
        /// TOML file with `[[players]]` entries (name, display_name, permissions).
        #[arg(long)]
        roster: PathBuf,
        /// Who says the message. Defaults to the first player in the roster.
        #[arg(long)]
        sender: Option<String>,
        message: String,
    },
}

fn main() -> Result<()> {
    // Setup logging
    let logfile = tracing_appender::rolling::daily("./logs", "coloredchatnames.log");
    let env_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .with_env_var("CCN_LOG")
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_writer(logfile.and(std::io::stderr))
        .with_env_filter(env_filter)
        .init();

    let args = Args::parse();
    let mut config = PluginConfig::load(&args.config)?;
    if let Some(data) = &args.data {
        config.data_file = data.to_string_lossy().into_owned();
    }

    match args.command {
        Command::List => {
            let file = PreferenceFile::new(&config.data_file);
            let mut store = PreferenceStore::new();
            file.load_into(&mut store)
                .with_context(|| format!("failed to load {}", file.path().display()))?;
            for name in store.snapshot() {
                println!("{}", name);
            }
        }
        Command::Toggle { player } => {
            let file = PreferenceFile::new(&config.data_file);
            let mut store = PreferenceStore::new();
            file.load_into(&mut store)
                .with_context(|| format!("failed to load {}", file.path().display()))?;
            let enabled = store.toggle(&player);
            file.write(&store.snapshot())
                .with_context(|| format!("failed to save {}", file.path().display()))?;
            let change = if enabled { "enabled" } else { "disabled" };
            info!("Colored name chat {} for {}", change, player);
            println!("Colored name chat {} for {}", change, player);
        }
        Command::Preview {
            roster,
            sender,
            message,
        } => {
            let roster = Roster::load(&roster)?;
            let speaker = match &sender {
                Some(name) => roster.find_player(name),
                None => roster.online_players().into_iter().next(),
            };
            let Some(speaker) = speaker else {
                bail!("no such player in the roster");
            };

            let plugin = ColoredChatNames::enable(config);
            let mut event = ChatEvent::new(speaker, message);
            plugin.on_chat(&roster, &mut event);
            if event.cancelled {
                println!("(message was not delivered)");
                return Ok(());
            }
            let line = plugin.render_chat(&event.player, &event.message);
            println!("{}", event.message);
            println!("{}", line.encode_json());
            roster.send_message(&CommandSender::Console, line);
        }
    }

    Ok(())
}
