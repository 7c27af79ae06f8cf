use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// View opened by `tiplogger view`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DefaultView {
    #[default]
    Dashboard,
    Calendar,
}

impl DefaultView {
    pub fn to_db_str(&self) -> &'static str {
        match self {
            DefaultView::Dashboard => "dashboard",
            DefaultView::Calendar => "calendar",
        }
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "dashboard" => Some(DefaultView::Dashboard),
            "calendar" => Some(DefaultView::Calendar),
            _ => None,
        }
    }
}

/// Per-user settings, created with defaults when the user is added.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserPreferences {
    pub currency: String,
    pub timezone: String,
    pub default_view: DefaultView,
}

impl Default for UserPreferences {
    fn default() -> Self {
        Self {
            currency: "USD".to_string(),
            timezone: "UTC".to_string(),
            default_view: DefaultView::Dashboard,
        }
    }
}

impl UserPreferences {
    /// Symbol printed in front of amounts.
    pub fn currency_symbol(&self) -> &str {
        currency_symbol(&self.currency)
    }

    /// Merge a partial update on top of the current values.
    pub fn merged(&self, update: &PreferencesUpdate) -> Self {
        Self {
            currency: update
                .currency
                .as_ref()
                .map(|c| c.to_uppercase())
                .unwrap_or_else(|| self.currency.clone()),
            timezone: update
                .timezone
                .clone()
                .unwrap_or_else(|| self.timezone.clone()),
            default_view: update.default_view.unwrap_or(self.default_view),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct PreferencesUpdate {
    pub currency: Option<String>,
    pub timezone: Option<String>,
    pub default_view: Option<DefaultView>,
}

impl PreferencesUpdate {
    pub fn is_empty(&self) -> bool {
        self.currency.is_none() && self.timezone.is_none() && self.default_view.is_none()
    }
}

pub fn currency_symbol(code: &str) -> &str {
    match code {
        "USD" | "CAD" => "$",
        "EUR" => "€",
        "GBP" => "£",
        other => other,
    }
}
