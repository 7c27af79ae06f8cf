use crate::cli::commands::{active_user, open_store};
use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::errors::AppResult;
use crate::export::ExportLogic;
use crate::state::AppState;
use crate::utils::path::expand_arg;

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        format,
        file,
        range,
        force,
    } = &cli.command
    {
        let store = open_store(cfg)?;
        let user = active_user(&store, cli, cfg)?;
        let state = AppState::load(&store, user)?;

        ExportLogic::export(
            store.conn(),
            &state,
            *format,
            &expand_arg(file),
            range.as_deref(),
            *force,
        )?;
    }
    Ok(())
}
