use anyhow::{Context, Result};
use chrono::NaiveDate;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use centavo_core::category::ExpenseCategory;
use centavo_core::insight::RuleConfig;

use crate::state::ensure_centavo_home;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub rules: RulesSection,
    pub watch: WatchSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RulesSection {
    /// Recommended savings rate, percent of income
    pub savings_rate_target: f64,
    /// Ceiling for categories not listed in `category_limits`
    pub default_category_limit: f64,
    /// Budget alert percent when the budget record carries none
    pub default_alert_percent: f64,
    /// Days ahead that count as an "upcoming" bill
    pub upcoming_window_days: i64,
    /// Per-category ceilings, percent of income, keyed by slug
    pub category_limits: BTreeMap<String, f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatchSection {
    /// Minutes between analysis passes
    pub interval_minutes: u64,
    /// Local hour when upcoming-bill reminders are generated
    pub bill_check_hour: u32,
    /// IANA timezone for "today" and the check hour
    pub timezone: String,
}

impl Default for Config {
    fn default() -> Self {
        let defaults = RuleConfig::default();
        let category_limits = defaults
            .category_limits
            .iter()
            .map(|(c, v)| (c.slug().to_string(), *v))
            .collect();
        Self {
            rules: RulesSection {
                savings_rate_target: defaults.savings_rate_target,
                default_category_limit: defaults.default_category_limit,
                default_alert_percent: defaults.default_alert_percent,
                upcoming_window_days: defaults.upcoming_window_days,
                category_limits,
            },
            watch: WatchSection {
                interval_minutes: 30,
                bill_check_hour: 8,
                timezone: "America/Sao_Paulo".to_string(),
            },
        }
    }
}

impl Config {
    /// Convert the file representation into the core evaluator config.
    /// Unknown category slugs are ignored rather than rejected.
    pub fn rule_config(&self) -> RuleConfig {
        let category_limits: Vec<(ExpenseCategory, f64)> = self
            .rules
            .category_limits
            .iter()
            .filter_map(|(slug, limit)| {
                ExpenseCategory::from_label(slug).map(|c| (c, *limit))
            })
            .collect();
        RuleConfig {
            category_limits,
            default_category_limit: self.rules.default_category_limit,
            savings_rate_target: self.rules.savings_rate_target,
            default_alert_percent: self.rules.default_alert_percent,
            upcoming_window_days: self.rules.upcoming_window_days,
        }
    }

    pub fn timezone(&self) -> Tz {
        self.watch.timezone.parse().unwrap_or(chrono_tz::UTC)
    }

    /// Today's date in the configured timezone.
    pub fn local_today(&self) -> NaiveDate {
        chrono::Utc::now().with_timezone(&self.timezone()).date_naive()
    }

    /// Current hour in the configured timezone.
    pub fn local_hour(&self) -> u32 {
        use chrono::Timelike;
        chrono::Utc::now().with_timezone(&self.timezone()).hour()
    }
}

pub fn config_path() -> Result<PathBuf> {
    Ok(ensure_centavo_home()?.join("config.toml"))
}

pub fn load_config() -> Result<Config> {
    let p = config_path()?;
    if !p.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(&p).with_context(|| format!("read {}", p.display()))?;
    Ok(toml::from_str(&s).context("parse config.toml")?)
}

pub fn save_config(cfg: &Config) -> Result<()> {
    let p = config_path()?;
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(&p, s).with_context(|| format!("write {}", p.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_round_trips_through_toml() {
        let cfg = Config::default();
        let s = toml::to_string_pretty(&cfg).unwrap();
        let back: Config = toml::from_str(&s).unwrap();
        assert_eq!(back.rules.savings_rate_target, 20.0);
        assert_eq!(back.watch.interval_minutes, 30);
        assert_eq!(back.rules.category_limits["moradia"], 30.0);
    }

    #[test]
    fn rule_config_resolves_slugs() {
        let cfg = Config::default();
        let rules = cfg.rule_config();
        assert_eq!(rules.limit_for(ExpenseCategory::Moradia), 30.0);
        assert_eq!(rules.limit_for(ExpenseCategory::Saude), 15.0);
    }

    #[test]
    fn unknown_timezone_falls_back_to_utc() {
        let mut cfg = Config::default();
        cfg.watch.timezone = "Not/AZone".to_string();
        assert_eq!(cfg.timezone(), chrono_tz::UTC);
    }

    #[test]
    fn unknown_category_slug_is_ignored() {
        let mut cfg = Config::default();
        cfg.rules.category_limits.insert("servicos".to_string(), 12.0);
        let rules = cfg.rule_config();
        // Falls back to the default limit, not 12.
        assert_eq!(rules.limit_for(ExpenseCategory::Outros), 15.0);
    }
}
