use crate::advert::{AdvertisementFilter, FilterAction};
use crate::commands::{
    self, CommandError, CommandResult, CommandSender, ExecutionContext, RuntimeError,
    TOGGLE_COMMAND,
};
use crate::config::PluginConfig;
use crate::player::OnlinePlayer;
use crate::preferences::{PersistenceError, PreferenceFile, PreferenceStore};
use crate::server::{ChatEvent, Server};
use crate::substitution;
use ccn_text::{ColorCode, TextComponent, TextComponentBuilder};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::{debug, error, info, warn};

/// Senders need this to get their messages colored.
pub const COLORED_PERMISSION: &str = "coloredchatnames";

struct State {
    preferences: PreferenceStore,
    advertisements: AdvertisementFilter,
    /// A toggle happened that has not reached the data file yet.
    unsaved: bool,
}

/// The plugin as the host sees it.
///
/// Chat events may arrive on a different thread than commands, so all mutable
/// state sits behind one lock. Disk writes never happen under that lock; they
/// are serialized by `save_lock` instead.
pub struct ColoredChatNames {
    config: PluginConfig,
    file: PreferenceFile,
    state: Mutex<State>,
    save_lock: Mutex<()>,
}

impl ColoredChatNames {
    /// Writes the data file if it is missing and loads the saved preferences.
    pub fn enable(config: PluginConfig) -> ColoredChatNames {
        let file = PreferenceFile::new(&config.data_file);
        if let Err(err) = file.save_default() {
            error!("Could not create {}: {}", file.path().display(), err);
        }

        let mut preferences = PreferenceStore::new();
        match file.load_into(&mut preferences) {
            Ok(()) => info!(
                "Loaded {} players with colored chat names disabled",
                preferences.len()
            ),
            Err(err) => error!(
                "Could not load {}, starting with everyone enabled: {}",
                file.path().display(),
                err
            ),
        }

        if config.advertisement_signature.is_empty() {
            info!("Advertisement filter is off, set advertisement_signature to turn it on");
        }
        let advertisements = AdvertisementFilter::new(config.advertisement_signature.clone());
        ColoredChatNames {
            config,
            file,
            state: Mutex::new(State {
                preferences,
                advertisements,
                unsaved: false,
            }),
            save_lock: Mutex::new(()),
        }
    }

    /// Retries a save that failed after a toggle. Without pending changes the
    /// data file is not touched.
    pub fn disable(&self) -> Result<(), PersistenceError> {
        let _save = self.save_lock.lock().unwrap_or_else(PoisonError::into_inner);
        let snapshot = {
            let state = self.lock();
            if !state.unsaved {
                return Ok(());
            }
            state.preferences.snapshot()
        };
        self.file.write(&snapshot)?;
        self.lock().unsaved = false;
        Ok(())
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn is_coloring_enabled(&self, player: &str) -> bool {
        self.lock().preferences.is_coloring_enabled(player)
    }

    pub fn disabled_players(&self) -> Vec<String> {
        self.lock().preferences.snapshot()
    }

    fn player_enabled(preferences: &PreferenceStore, player: &OnlinePlayer) -> bool {
        player.has_permission(COLORED_PERMISSION) && preferences.is_coloring_enabled(&player.name)
    }

    pub fn on_chat<S: Server + ?Sized>(&self, server: &S, event: &mut ChatEvent) {
        if event.cancelled {
            return;
        }

        let player = &event.player;
        let enabled = {
            let mut state = self.lock();
            let action = state
                .advertisements
                .check_first_message(&player.name, &event.message);
            if action == FilterAction::Remove {
                None
            } else {
                Some(Self::player_enabled(&state.preferences, player))
            }
        };

        let Some(enabled) = enabled else {
            warn!("Removing {} for advertising: {}", player.name, event.message);
            event.cancelled = true;
            let reason = TextComponentBuilder::new(self.config.advertisement_kick_message.clone())
                .color_code(ColorCode::Red)
                .finish();
            server.kick_player(&player.name, reason);
            return;
        };
        if !enabled {
            return;
        }

        let online = server.online_players();
        let rewritten = if self.config.skip_preformatted {
            substitution::substitute_unless_formatted(&event.message, &online)
        } else {
            substitution::substitute(&event.message, &online)
        };
        if rewritten != event.message {
            debug!("Colored names in message from {}", player.name);
            event.message = rewritten;
        }
    }

    /// Returns `false` when the host should show its usage text instead.
    pub fn on_command<S: Server + ?Sized>(
        &self,
        server: &S,
        sender: CommandSender,
        label: &str,
        args: &[String],
    ) -> bool {
        if !label.eq_ignore_ascii_case(TOGGLE_COMMAND) {
            return false;
        }

        let ctx = ExecutionContext::new(server, sender, args);
        match self.execute_toggle(&ctx) {
            Ok(()) => true,
            Err(CommandError::Runtime(err)) => {
                ctx.error(&err.to_string());
                !matches!(err, RuntimeError::TooManyArguments)
            }
            Err(err @ CommandError::Persistence(_)) => {
                error!("{}", err);
                ctx.error(&err.to_string());
                true
            }
        }
    }

    fn execute_toggle<S: Server + ?Sized>(&self, ctx: &ExecutionContext<'_, S>) -> CommandResult<()> {
        let target = commands::determine_target(ctx)?;

        // Held across toggle and write so saves land in toggle order
        let _save = self.save_lock.lock().unwrap_or_else(PoisonError::into_inner);
        let (enabled, snapshot) = {
            let mut state = self.lock();
            let enabled = state.preferences.toggle(&target);
            state.unsaved = true;
            (enabled, state.preferences.snapshot())
        };
        let saved = self.file.write(&snapshot);
        if saved.is_ok() {
            self.lock().unsaved = false;
        }

        let change = if enabled { "enabled" } else { "disabled" };
        info!("{:?} {} colored chat names for {}", ctx.sender(), change, target);
        ctx.reply(&format!("Colored name chat {} for {}", change, target));
        saved?;
        Ok(())
    }

    /// Renders a chat line with the configured format, e.g. `<{username}> {message}`.
    pub fn render_chat(&self, player: &OnlinePlayer, message: &str) -> TextComponent {
        let line = self
            .config
            .chat_format
            .replace("{username}", &player.display_name)
            .replace("{message}", message);
        TextComponent::join(TextComponent::from_legacy_text(&line))
    }
}
