mod login;
mod logout;
mod status;

use derma_config::DermaConfig;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::AuthCommands;

/// Handle `derma auth <subcommand>`.
pub fn handle(action: &AuthCommands, flags: &GlobalFlags, config: &DermaConfig) -> anyhow::Result<()> {
    match action {
        AuthCommands::Login(args) => login::handle(args, flags),
        AuthCommands::Logout => logout::handle(flags),
        AuthCommands::Status => status::handle(flags, config),
    }
}
