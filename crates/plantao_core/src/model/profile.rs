use serde::{Deserialize, Serialize};

use super::lenient;
use crate::money;

/// Profile document: the monthly goal plus onboarding survey answers.
///
/// Survey answers are not interpreted; they are kept in `survey` so that a
/// goal update writes them back untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    #[serde(default, deserialize_with = "lenient::string")]
    pub monthly_goal: String,
    #[serde(flatten)]
    pub survey: serde_json::Map<String, serde_json::Value>,
}

impl Profile {
    /// Goal as a number; zero means no goal is set.
    pub fn goal(&self) -> f64 {
        money::parse_decimal(&self.monthly_goal)
    }

    pub fn set_goal(&mut self, goal: f64) {
        self.monthly_goal = money::format_brl(goal.max(0.0));
    }
}
