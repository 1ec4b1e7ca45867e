use crate::telemetry::LogLevel;

pub const DEFAULT_INTRO_START_DELAY_MS: u32 = 100;
pub const DEFAULT_INTRO_SECTION_MS: u32 = 1_200;
pub const DEFAULT_INTRO_SECTION_GAP_MS: u32 = 500;
pub const DEFAULT_INTRO_ACTIVATION_DELAY_MS: u32 = 50;
pub const DEFAULT_INTRO_EXIT_MS: u32 = 1_500;
pub const DEFAULT_INTRO_SKIP_EXIT_MS: u32 = 1_000;

pub const DEFAULT_TYPING_TYPE_MS: u32 = 200;
pub const DEFAULT_TYPING_DELETE_MS: u32 = 100;
pub const DEFAULT_TYPING_HOLD_MS: u32 = 2_000;
pub const DEFAULT_TYPING_PAUSE_MS: u32 = 500;
pub const DEFAULT_TYPING_WORDS: [&str; 2] = ["Java Enthusiast", "Problem Solver"];

pub const DEFAULT_LOG_LEVEL: LogLevel = LogLevel::Info;

pub const INTRO_SECTION_MS_BOUNDS: (u32, u32) = (200, 10_000);
pub const INTRO_SECTION_GAP_MS_BOUNDS: (u32, u32) = (0, 5_000);

pub const EMAILJS_ENDPOINT: &str = "https://api.emailjs.com/api/v1.0/email/send";
pub const EMAILJS_UNCONFIGURED_SERVICE_ID: &str = "YOUR_SERVICE_ID";
const EMAILJS_UNCONFIGURED_TEMPLATE_ID: &str = "YOUR_TEMPLATE_ID";
const EMAILJS_UNCONFIGURED_PUBLIC_KEY: &str = "YOUR_PUBLIC_KEY";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IntroTimings {
    pub start_delay_ms: u32,
    pub section_ms: u32,
    pub gap_ms: u32,
    pub activation_delay_ms: u32,
    pub exit_ms: u32,
    pub skip_exit_ms: u32,
}

impl Default for IntroTimings {
    fn default() -> Self {
        Self {
            start_delay_ms: DEFAULT_INTRO_START_DELAY_MS,
            section_ms: DEFAULT_INTRO_SECTION_MS,
            gap_ms: DEFAULT_INTRO_SECTION_GAP_MS,
            activation_delay_ms: DEFAULT_INTRO_ACTIVATION_DELAY_MS,
            exit_ms: DEFAULT_INTRO_EXIT_MS,
            skip_exit_ms: DEFAULT_INTRO_SKIP_EXIT_MS,
        }
    }
}

impl IntroTimings {
    pub fn from_build_env() -> Self {
        Self {
            section_ms: parse_u32_with_bounds(
                option_env!("PORTFOLIO_INTRO_SECTION_MS"),
                DEFAULT_INTRO_SECTION_MS,
                INTRO_SECTION_MS_BOUNDS,
            ),
            gap_ms: parse_u32_with_bounds(
                option_env!("PORTFOLIO_INTRO_SECTION_GAP_MS"),
                DEFAULT_INTRO_SECTION_GAP_MS,
                INTRO_SECTION_GAP_MS_BOUNDS,
            ),
            ..Self::default()
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TypingTimings {
    pub type_ms: u32,
    pub delete_ms: u32,
    pub hold_ms: u32,
    pub pause_ms: u32,
}

impl Default for TypingTimings {
    fn default() -> Self {
        Self {
            type_ms: DEFAULT_TYPING_TYPE_MS,
            delete_ms: DEFAULT_TYPING_DELETE_MS,
            hold_ms: DEFAULT_TYPING_HOLD_MS,
            pause_ms: DEFAULT_TYPING_PAUSE_MS,
        }
    }
}

/// Credentials for the EmailJS REST endpoint. The defaults are sentinels,
/// which the contact form reports as "not configured" on failure.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EmailJsConfig {
    pub service_id: String,
    pub template_id: String,
    pub public_key: String,
}

impl Default for EmailJsConfig {
    fn default() -> Self {
        Self {
            service_id: EMAILJS_UNCONFIGURED_SERVICE_ID.to_string(),
            template_id: EMAILJS_UNCONFIGURED_TEMPLATE_ID.to_string(),
            public_key: EMAILJS_UNCONFIGURED_PUBLIC_KEY.to_string(),
        }
    }
}

impl EmailJsConfig {
    pub fn from_build_env() -> Self {
        let defaults = Self::default();

        Self {
            service_id: parse_non_empty_string(option_env!("EMAILJS_SERVICE_ID"))
                .unwrap_or(defaults.service_id),
            template_id: parse_non_empty_string(option_env!("EMAILJS_TEMPLATE_ID"))
                .unwrap_or(defaults.template_id),
            public_key: parse_non_empty_string(option_env!("EMAILJS_PUBLIC_KEY"))
                .unwrap_or(defaults.public_key),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.service_id != EMAILJS_UNCONFIGURED_SERVICE_ID
    }
}

pub fn log_level() -> LogLevel {
    parse_log_level(option_env!("PORTFOLIO_LOG_LEVEL"), DEFAULT_LOG_LEVEL)
}

pub fn typing_words() -> Vec<String> {
    parse_word_list(option_env!("PORTFOLIO_TYPING_WORDS")).unwrap_or_else(|| {
        DEFAULT_TYPING_WORDS
            .iter()
            .map(|word| word.to_string())
            .collect()
    })
}

pub fn parse_u32_with_bounds(raw: Option<&str>, default: u32, bounds: (u32, u32)) -> u32 {
    raw.and_then(|value| value.trim().parse::<u32>().ok())
        .filter(|value| (bounds.0..=bounds.1).contains(value))
        .unwrap_or(default)
}

pub fn parse_non_empty_string(raw: Option<&str>) -> Option<String> {
    raw.map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

pub fn parse_log_level(raw: Option<&str>, default: LogLevel) -> LogLevel {
    match parse_non_empty_string(raw)
        .unwrap_or_else(|| default.as_str().to_string())
        .to_ascii_lowercase()
        .as_str()
    {
        "debug" => LogLevel::Debug,
        "info" => LogLevel::Info,
        "warn" => LogLevel::Warn,
        _ => default,
    }
}

/// `|`-separated list; blank entries are dropped.
pub fn parse_word_list(raw: Option<&str>) -> Option<Vec<String>> {
    let words: Vec<String> = parse_non_empty_string(raw)?
        .split('|')
        .map(str::trim)
        .filter(|word| !word.is_empty())
        .map(ToString::to_string)
        .collect();

    (!words.is_empty()).then_some(words)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounded_values_fall_back_outside_range() {
        assert_eq!(parse_u32_with_bounds(Some(" 900 "), 1_200, (200, 10_000)), 900);
        assert_eq!(parse_u32_with_bounds(Some("50"), 1_200, (200, 10_000)), 1_200);
        assert_eq!(parse_u32_with_bounds(Some("soon"), 1_200, (200, 10_000)), 1_200);
        assert_eq!(parse_u32_with_bounds(None, 1_200, (200, 10_000)), 1_200);
    }

    #[test]
    fn log_level_is_case_insensitive_with_default() {
        assert_eq!(parse_log_level(Some("DEBUG"), LogLevel::Info), LogLevel::Debug);
        assert_eq!(parse_log_level(Some("warn"), LogLevel::Info), LogLevel::Warn);
        assert_eq!(parse_log_level(Some("loud"), LogLevel::Info), LogLevel::Info);
        assert_eq!(parse_log_level(None, LogLevel::Warn), LogLevel::Warn);
    }

    #[test]
    fn word_list_drops_blank_entries() {
        assert_eq!(
            parse_word_list(Some("Rustacean | | Builder")),
            Some(vec!["Rustacean".to_string(), "Builder".to_string()])
        );
        assert_eq!(parse_word_list(Some(" | ")), None);
        assert_eq!(parse_word_list(None), None);
    }

    #[test]
    fn sentinel_service_id_is_unconfigured() {
        assert!(!EmailJsConfig::default().is_configured());

        let configured = EmailJsConfig {
            service_id: "service_live".to_string(),
            ..EmailJsConfig::default()
        };
        assert!(configured.is_configured());
    }
}
