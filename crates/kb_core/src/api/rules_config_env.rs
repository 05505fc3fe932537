use crate::engine::RuleConfig;
use crate::error::Result;
use std::env;

pub(crate) const RULES_CONFIG_PATH_ENV: &str = "KB_RULES_CONFIG_PATH";

/// Rule config named by `KB_RULES_CONFIG_PATH`, or the standard rules when
/// the variable is unset or blank.
pub(crate) fn rules_config_from_env() -> Result<RuleConfig> {
    rules_config_from_path(env::var(RULES_CONFIG_PATH_ENV).ok().as_deref())
}

fn rules_config_from_path(path: Option<&str>) -> Result<RuleConfig> {
    let Some(path) = path.map(str::trim).filter(|p| !p.is_empty()) else {
        return Ok(RuleConfig::standard());
    };

    let config = RuleConfig::load(path)?;
    tracing::info!("Rule config loaded from {RULES_CONFIG_PATH_ENV}='{path}'");
    Ok(config)
}
