use crate::cli::commands::{active_user, open_store};
use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::errors::AppResult;
use crate::models::{PreferencesUpdate, UserPreferences};
use crate::state::AppState;
use crate::ui::messages::success;

fn print_prefs(email: &str, p: &UserPreferences) {
    println!("👤 Preferences for {email}\n");
    println!("  currency     : {} ({})", p.currency, p.currency_symbol());
    println!("  timezone     : {}", p.timezone);
    println!("  default view : {}", p.default_view.to_db_str());
}

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    if let Commands::Prefs {
        currency,
        timezone,
        default_view,
    } = &cli.command
    {
        let store = open_store(cfg)?;
        let user = active_user(&store, cli, cfg)?;
        let mut state = AppState::load(&store, user)?;

        let update = PreferencesUpdate {
            currency: currency.clone(),
            timezone: timezone.clone(),
            default_view: *default_view,
        };

        if !update.is_empty() {
            state.update_preferences(&update)?;
            success("Preferences updated.");
        }

        print_prefs(&state.user.email, &state.preferences);
    }
    Ok(())
}
