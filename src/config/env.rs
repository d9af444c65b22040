//! Environment overrides applied on top of file config.

use super::defaults::{ENV_HISTORY_FILE, ENV_LOG_FILE, ENV_NO_COLOR, ENV_PROMPT};
use super::Config;

pub(super) fn apply_runtime_env_overrides<FEnv>(config: &mut Config, env_lookup: &FEnv)
where
    FEnv: Fn(&str) -> Option<String>,
{
    if let Some(prompt) = env_lookup(ENV_PROMPT) {
        config.display.prompt = prompt;
    }
    if let Some(file) = non_empty(env_lookup(ENV_HISTORY_FILE)) {
        config.history.file = Some(file);
    }
    if non_empty(env_lookup(ENV_NO_COLOR)).is_some() {
        config.display.color = false;
    }
    if let Some(file) = non_empty(env_lookup(ENV_LOG_FILE)) {
        config.logging.file = Some(file);
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
