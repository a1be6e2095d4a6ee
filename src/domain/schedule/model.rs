use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::error::ScheduleError;
use super::trigger::translate;

/// Recurrence keyword for interval-based schedules.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Interval {
    Daily,
    Weekly,
    Monthly,
    #[default]
    #[serde(alias = "")]
    None,
}

impl Interval {
    pub fn as_str(&self) -> &'static str {
        match self {
            Interval::Daily => "daily",
            Interval::Weekly => "weekly",
            Interval::Monthly => "monthly",
            Interval::None => "none",
        }
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DayOfWeek {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl DayOfWeek {
    pub const ALL: [DayOfWeek; 7] = [
        DayOfWeek::Monday,
        DayOfWeek::Tuesday,
        DayOfWeek::Wednesday,
        DayOfWeek::Thursday,
        DayOfWeek::Friday,
        DayOfWeek::Saturday,
        DayOfWeek::Sunday,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DayOfWeek::Monday => "monday",
            DayOfWeek::Tuesday => "tuesday",
            DayOfWeek::Wednesday => "wednesday",
            DayOfWeek::Thursday => "thursday",
            DayOfWeek::Friday => "friday",
            DayOfWeek::Saturday => "saturday",
            DayOfWeek::Sunday => "sunday",
        }
    }

    /// Cron day-of-week number (Sunday = 0).
    pub fn cron_number(&self) -> u32 {
        match self {
            DayOfWeek::Sunday => 0,
            DayOfWeek::Monday => 1,
            DayOfWeek::Tuesday => 2,
            DayOfWeek::Wednesday => 3,
            DayOfWeek::Thursday => 4,
            DayOfWeek::Friday => 5,
            DayOfWeek::Saturday => 6,
        }
    }
}

impl FromStr for DayOfWeek {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_lowercase();
        DayOfWeek::ALL
            .into_iter()
            .find(|day| day.as_str() == lowered || day.as_str()[..3] == lowered)
            .ok_or_else(|| ScheduleError::InvalidDayOfWeek(s.to_string()))
    }
}

impl fmt::Display for DayOfWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for DayOfWeek {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for DayOfWeek {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Schedule declaration for a domain.
///
/// Either `cron` or the interval fields are authoritative; a non-empty `cron`
/// always wins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScheduleConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub interval: Interval,
    #[serde(default)]
    pub hour: u32,
    #[serde(default)]
    pub minute: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day_of_week: Option<DayOfWeek>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day_of_month: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cron: Option<String>,
}

impl ScheduleConfig {
    pub fn daily(hour: u32, minute: u32) -> Self {
        Self { enabled: true, interval: Interval::Daily, hour, minute, ..Default::default() }
    }

    pub fn weekly(day: DayOfWeek, hour: u32, minute: u32) -> Self {
        Self {
            enabled: true,
            interval: Interval::Weekly,
            hour,
            minute,
            day_of_week: Some(day),
            ..Default::default()
        }
    }

    pub fn monthly(day: u32, hour: u32, minute: u32) -> Self {
        Self {
            enabled: true,
            interval: Interval::Monthly,
            hour,
            minute,
            day_of_month: Some(day),
            ..Default::default()
        }
    }

    pub fn cron(expression: impl Into<String>) -> Self {
        Self { enabled: true, cron: Some(expression.into()), ..Default::default() }
    }

    /// The cron expression when it is the authoritative trigger source.
    pub fn cron_expression(&self) -> Option<&str> {
        self.cron.as_deref().map(str::trim).filter(|expr| !expr.is_empty())
    }

    /// Disabled schedules are not checked; enabled ones must translate.
    pub fn validate(&self) -> Result<(), ScheduleError> {
        if !self.enabled {
            return Ok(());
        }
        translate(self).map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_interval_schedule_from_toml() {
        let schedule: ScheduleConfig = toml::from_str(
            r#"
enabled = true
interval = "weekly"
day_of_week = "Friday"
hour = 6
minute = 30
"#,
        )
        .unwrap();
        assert_eq!(schedule.interval, Interval::Weekly);
        assert_eq!(schedule.day_of_week, Some(DayOfWeek::Friday));
        assert!(schedule.validate().is_ok());
    }

    #[test]
    fn empty_interval_means_none() {
        let schedule: ScheduleConfig = toml::from_str("interval = \"\"").unwrap();
        assert_eq!(schedule.interval, Interval::None);
        assert!(!schedule.enabled);
    }

    #[test]
    fn unknown_weekday_is_rejected() {
        let err = toml::from_str::<ScheduleConfig>("day_of_week = \"funday\"").unwrap_err();
        assert!(err.to_string().contains("Invalid day_of_week"));
    }

    #[test]
    fn weekday_abbreviations_parse() {
        assert_eq!("mon".parse::<DayOfWeek>().unwrap(), DayOfWeek::Monday);
        assert_eq!("SUN".parse::<DayOfWeek>().unwrap(), DayOfWeek::Sunday);
    }

    #[test]
    fn disabled_schedule_skips_validation() {
        let schedule = ScheduleConfig { hour: 99, ..Default::default() };
        assert!(schedule.validate().is_ok());
    }

    #[test]
    fn enabled_schedule_checks_ranges() {
        let schedule = ScheduleConfig { hour: 24, ..ScheduleConfig::daily(0, 0) };
        let err = schedule.validate().unwrap_err();
        assert_eq!(err.field(), Some("hour"));
    }

    #[test]
    fn blank_cron_is_not_authoritative() {
        let schedule = ScheduleConfig { cron: Some("  ".into()), ..ScheduleConfig::daily(1, 0) };
        assert_eq!(schedule.cron_expression(), None);
    }
}
