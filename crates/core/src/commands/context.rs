use super::CommandSender;
use crate::commands::error::{CommandResult, RuntimeError};
use crate::server::Server;
use ccn_text::{ColorCode, TextComponentBuilder};

pub struct ExecutionContext<'a, S: Server + ?Sized> {
    server: &'a S,
    sender: CommandSender,
    arguments: &'a [String],
}

impl<'a, S: Server + ?Sized> ExecutionContext<'a, S> {
    pub(crate) fn new(server: &'a S, sender: CommandSender, arguments: &'a [String]) -> Self {
        Self {
            server,
            sender,
            arguments,
        }
    }

    pub fn args(&self) -> &[String] {
        self.arguments
    }

    pub fn server(&self) -> &S {
        self.server
    }

    pub fn sender(&self) -> &CommandSender {
        &self.sender
    }

    fn send(&self, message: &str, color: ColorCode) {
        let component = TextComponentBuilder::new(message.to_string())
            .color_code(color)
            .finish();
        self.server.send_message(&self.sender, component);
    }

    pub fn reply(&self, message: &str) {
        self.send(message, ColorCode::Green);
    }

    pub fn error(&self, message: &str) {
        self.send(message, ColorCode::Red);
    }

    pub fn has_permission(&self, permission: &str) -> bool {
        match &self.sender {
            CommandSender::Player(name) => self
                .server
                .get_player_exact(name)
                .is_some_and(|player| player.has_permission(permission)),
            CommandSender::Console => true,
        }
    }

    pub fn require_permission(&self, permission: &str) -> CommandResult<()> {
        if !self.has_permission(permission) {
            return Err(RuntimeError::Unauthorized {
                permission: permission.to_string(),
            }
            .into());
        }
        Ok(())
    }

    /// The issuing player's name, or an error when run from the console.
    pub fn player_name(&self) -> CommandResult<&str> {
        match &self.sender {
            CommandSender::Player(name) => Ok(name),
            CommandSender::Console => Err(RuntimeError::NoImplicitTarget.into()),
        }
    }
}
