use inv_compose::{AdminAction, Procedure};
use inv_config::InvConfig;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(command: Commands, config: &InvConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::Reset(args) => commands::compose::handle(Procedure::reset(args.force), config, flags).await,
        Commands::Setup(args) => {
            commands::compose::handle(Procedure::setup(args.reset, args.force), config, flags).await
        }
        Commands::Backup => commands::compose::handle(Procedure::single(AdminAction::Backup), config, flags).await,
        Commands::Restore => {
            commands::compose::handle(Procedure::single(AdminAction::Restore), config, flags).await
        }
        Commands::ExportRecords(args) => {
            let action = AdminAction::ExportRecords { file: args.file };
            commands::compose::handle(Procedure::single(action), config, flags).await
        }
        Commands::ImportRecords(args) => {
            let action = AdminAction::ImportRecords {
                file: args.file,
                clear: args.clear,
            };
            commands::compose::handle(Procedure::single(action), config, flags).await
        }
        Commands::Init => commands::init::handle(config, flags).await,
        Commands::Import(args) => commands::import::handle(&args, config, flags).await,
        Commands::Delete { action } => commands::delete::handle(&action, config, flags).await,
        Commands::Units => commands::units::handle(config, flags).await,
        Commands::Bom { action } => commands::bom::handle(&action, config, flags).await,
        Commands::Config => commands::config::handle(config, flags),
        Commands::Value(args) => commands::value::handle(&args, flags),
    }
}
