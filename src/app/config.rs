use std::fmt;
use std::time::Duration;

use crate::app::AppError;
use crate::app::dashboard::DashboardSettings;
use crate::app::upload::UploadSettings;
use crate::domain::format::is_valid_date_pattern;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportConfig {
    Http {
        base_url: String,
        timeout: Option<Duration>,
    },
    Replay {
        script_path: String,
    },
}

impl fmt::Display for TransportConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Http { base_url, .. } => write!(f, "http {base_url}"),
            Self::Replay { script_path } => write!(f, "replay {script_path}"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub transport: TransportConfig,
    pub redirect_delay_ms: u64,
    pub alert_ttl_ms: u64,
    pub map_zoom: u8,
    pub dashboard_path: String,
    pub upload_path: String,
    pub date_format: String,
}

impl ClientConfig {
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let transport = match non_empty(&lookup, "GNSS_REPLAY_SCRIPT") {
            Some(script_path) => TransportConfig::Replay { script_path },
            None => {
                let base_url = non_empty(&lookup, "GNSS_API_URL").ok_or_else(|| {
                    AppError::config("GNSS_API_URL is required unless GNSS_REPLAY_SCRIPT is set")
                })?;
                if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
                    return Err(AppError::config(
                        "GNSS_API_URL must start with http:// or https://",
                    ));
                }

                // 0 or unset waits indefinitely
                let timeout_ms = parse_or_default(&lookup, "GNSS_REQUEST_TIMEOUT_MS", 0_u64)?;
                let timeout = (timeout_ms > 0).then(|| Duration::from_millis(timeout_ms));

                TransportConfig::Http { base_url, timeout }
            }
        };

        let date_format =
            non_empty(&lookup, "GNSS_DATE_FORMAT").unwrap_or_else(|| "%Y-%m-%d".to_string());
        if !is_valid_date_pattern(&date_format) {
            return Err(AppError::config(format!(
                "GNSS_DATE_FORMAT has an unsupported specifier: {date_format}"
            )));
        }

        Ok(Self {
            transport,
            redirect_delay_ms: parse_or_default(&lookup, "GNSS_REDIRECT_DELAY_MS", 1500_u64)?,
            alert_ttl_ms: parse_or_default(&lookup, "GNSS_ALERT_TTL_MS", 5000_u64)?,
            map_zoom: parse_or_default(&lookup, "GNSS_MAP_ZOOM", 13_u8)?,
            dashboard_path: non_empty(&lookup, "GNSS_DASHBOARD_PATH")
                .unwrap_or_else(|| "/dashboard".to_string()),
            upload_path: non_empty(&lookup, "GNSS_UPLOAD_PATH")
                .unwrap_or_else(|| "/upload".to_string()),
            date_format,
        })
    }

    pub fn alert_lifetime(&self) -> Duration {
        Duration::from_millis(self.alert_ttl_ms)
    }

    pub fn upload_settings(&self) -> UploadSettings {
        UploadSettings {
            dashboard_path: self.dashboard_path.clone(),
            redirect_delay: Duration::from_millis(self.redirect_delay_ms),
        }
    }

    pub fn dashboard_settings(&self) -> DashboardSettings {
        DashboardSettings {
            map_zoom: self.map_zoom,
            date_format: self.date_format.clone(),
            upload_path: self.upload_path.clone(),
        }
    }
}

fn non_empty<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_or_default<T, F>(lookup: &F, key: &str, default: T) -> Result<T, AppError>
where
    T: std::str::FromStr + Copy,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|_| AppError::config(format!("{key} must be a valid number"))),
        None => Ok(default),
    }
}
