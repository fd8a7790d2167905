use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Settings {
    pub business: Business,
    #[serde(default)]
    pub display: DisplaySettings,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Business {
    pub name: String,
    #[serde(default)]
    pub owner: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct DisplaySettings {
    pub currency_symbol: String,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            currency_symbol: "$".to_string(),
        }
    }
}
