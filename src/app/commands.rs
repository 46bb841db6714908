use crate::adapters::registry::ClientRegistry;
use crate::config::TomlConfig;
use crate::domain::clients::{ClientTag, DrafthouseClient, FeedsClient};
use crate::domain::day_part::{parse_time_of_day, DayPart};
use crate::utils::error::{MccError, Result};
use crate::utils::validation::Validate;
use chrono::{DateTime, FixedOffset, Local, Utc};
use std::path::Path;

/// A classified instant, with the label it was printed under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub label: String,
    pub part: DayPart,
}

impl Classification {
    pub fn render(&self) -> String {
        format!(
            "{} {} ({}-{})",
            self.label,
            self.part,
            self.part.start_time().format("%H:%M"),
            self.part.end_time().format("%H:%M")
        )
    }
}

pub fn day_part_rows() -> Vec<String> {
    let mut rows = vec![format!("{:<10} {:>5}  {:>5}  {}", "DAY PART", "START", "END", "NOTE")];

    for part in DayPart::ALL {
        let note = if part.is_unknown() {
            "sentinel"
        } else if part.is_wraparound() {
            "wraps midnight"
        } else {
            ""
        };
        rows.push(
            format!(
                "{:<10} {:>5}  {:>5}  {}",
                part.as_str(),
                part.start_time().format("%H:%M"),
                part.end_time().format("%H:%M"),
                note
            )
            .trim_end()
            .to_string(),
        );
    }

    rows
}

/// 載入並驗證配置檔
pub fn load_config(path: &str) -> Result<TomlConfig> {
    tracing::info!("📁 Loading configuration from: {}", path);
    let toml_config = TomlConfig::from_file(path)?;
    toml_config.validate()?;
    tracing::info!("✅ Configuration loaded and validated successfully");
    Ok(toml_config)
}

/// Classifies `HH:MM[:SS]`, falling back to an RFC 3339 datetime in its own offset.
pub fn classify_input(raw: &str) -> Result<Classification> {
    match parse_time_of_day(raw) {
        Ok(time_of_day) => Ok(Classification {
            label: time_of_day.format("%H:%M:%S").to_string(),
            part: DayPart::classify(time_of_day),
        }),
        Err(time_err) => {
            let at = DateTime::parse_from_rfc3339(raw.trim()).map_err(|_| time_err)?;
            Ok(Classification {
                label: at.to_rfc3339(),
                part: DayPart::classify_at(&at),
            })
        }
    }
}

/// Classifies `now` in the venue offset, or in system local time without one.
pub fn classify_instant(now: DateTime<Utc>, offset: Option<FixedOffset>) -> Classification {
    match offset {
        Some(offset) => {
            let local = now.with_timezone(&offset);
            Classification {
                label: local.to_rfc3339(),
                part: DayPart::classify_at(&local),
            }
        }
        None => {
            let local = now.with_timezone(&Local);
            Classification {
                label: local.to_rfc3339(),
                part: DayPart::classify_at(&local),
            }
        }
    }
}

/// 配置檔存在時讀取影城時區偏移，否則回傳 `None`
pub fn venue_offset_from(config_path: &str) -> Result<Option<FixedOffset>> {
    if Path::new(config_path).exists() {
        load_config(config_path)?.venue_offset()
    } else {
        tracing::debug!("No config at {}, using system local time", config_path);
        Ok(None)
    }
}

pub fn classify(time: Option<&str>, config_path: &str) -> Result<Classification> {
    let classification = match time {
        Some(raw) => classify_input(raw)?,
        None => classify_instant(Utc::now(), venue_offset_from(config_path)?),
    };

    tracing::info!("{} -> {}", classification.label, classification.part);
    Ok(classification)
}

/// Wires both tagged clients; either one missing is a startup error.
pub fn wire_clients(config: &TomlConfig) -> Result<ClientRegistry> {
    if let Some(venue) = config.venue_name() {
        tracing::info!("🎬 Venue: {}", venue);
    }

    let registry = ClientRegistry::from_config(&config.clients)?;
    registry.resolve::<DrafthouseClient>()?;
    registry.resolve::<FeedsClient>()?;
    Ok(registry)
}

pub fn client_rows(registry: &ClientRegistry) -> Result<Vec<String>> {
    let drafthouse = registry.resolve::<DrafthouseClient>()?;
    let feeds = registry.resolve::<FeedsClient>()?;

    Ok(vec![
        format!("{:<11} {}", DrafthouseClient::NAME, drafthouse.base_url()),
        format!("{:<11} {}", FeedsClient::NAME, feeds.base_url()),
    ])
}

/// 解析 `<tag>:<path>` 格式
pub fn parse_fetch_target(spec: &str) -> Result<(&str, &str)> {
    match spec.split_once(':') {
        Some((tag, path)) if !tag.trim().is_empty() => Ok((tag.trim(), path)),
        _ => Err(MccError::InvalidConfigValueError {
            field: "--fetch".to_string(),
            value: spec.to_string(),
            reason: "Expected <tag>:<path>".to_string(),
        }),
    }
}

pub async fn fetch(registry: &ClientRegistry, spec: &str) -> Result<serde_json::Value> {
    let (tag, path) = parse_fetch_target(spec)?;
    let gateway = registry.gateway_by_name(tag)?;
    gateway.get_json(path).await
}
