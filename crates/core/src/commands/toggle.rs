use super::context::ExecutionContext;
use super::error::{CommandResult, RuntimeError};
use crate::server::Server;

pub const TOGGLE_COMMAND: &str = "coloredchatnames";
pub const TOGGLE_OTHER_PERMISSION: &str = "coloredchatnames.toggle.other";

/// Works out whose preference `/coloredchatnames [player]` should flip.
pub fn determine_target<S: Server + ?Sized>(ctx: &ExecutionContext<'_, S>) -> CommandResult<String> {
    match ctx.args() {
        // Player unspecified - target self
        [] => Ok(ctx.player_name()?.to_owned()),
        [name] => {
            ctx.require_permission(TOGGLE_OTHER_PERMISSION)?;
            let target = ctx
                .server()
                .find_player(name)
                .ok_or_else(|| RuntimeError::TargetNotFound { name: name.clone() })?;
            Ok(target.name)
        }
        _ => Err(RuntimeError::TooManyArguments.into()),
    }
}
