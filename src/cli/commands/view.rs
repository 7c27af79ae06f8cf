use crate::cli::commands::{active_user, calendar, dashboard, open_store};
use crate::cli::parser::Cli;
use crate::config::Config;
use crate::core::clock::Clock;
use crate::errors::AppResult;
use crate::models::{DefaultView, Granularity};
use crate::state::AppState;
use crate::utils::date::today;

/// Open the view chosen in the user's preferences, for the current period.
pub fn handle(cli: &Cli, cfg: &Config, clock: &dyn Clock) -> AppResult<()> {
    let store = open_store(cfg)?;
    let user = active_user(&store, cli, cfg)?;
    let state = AppState::load(&store, user)?;
    let now = today(clock);

    match state.preferences.default_view {
        DefaultView::Dashboard => dashboard::render(&state, cfg, Granularity::Month, now),
        DefaultView::Calendar => calendar::render(&state, cfg, now),
    }
    Ok(())
}
