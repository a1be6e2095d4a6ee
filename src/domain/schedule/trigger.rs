//! Translation of schedule declarations into normalized cron triggers.

use std::str::FromStr;

use chrono::{DateTime, Datelike, Months, NaiveDate, TimeZone};
use cron::Schedule;

use super::error::ScheduleError;
use super::model::{Interval, ScheduleConfig};
use super::weekday_field::WeekdayField;

/// How far ahead a clamped monthly trigger searches before giving up.
const MAX_SEARCH_MONTHS: u32 = 5 * 12;

/// Normalized five-field trigger produced from any schedule declaration.
#[derive(Debug, Clone)]
pub struct TriggerSpec {
    expression: String,
    rule: Rule,
}

#[derive(Debug, Clone)]
enum Rule {
    /// Fires at the earliest firing of any schedule. Restricted day-of-month
    /// and day-of-week fields are split into two schedules, since crontab
    /// matches either of them.
    Cron(Vec<Schedule>),
    /// Fires on `day` of every month, or on its last day when the month is
    /// shorter.
    ClampedMonthly { day: u32, hour: u32, minute: u32 },
}

impl PartialEq for TriggerSpec {
    fn eq(&self, other: &Self) -> bool {
        self.expression == other.expression
            && self.clamps_day_of_month() == other.clamps_day_of_month()
    }
}

impl Eq for TriggerSpec {}

/// Translate an enabled schedule into a trigger. Cron always wins over
/// interval fields.
pub fn translate(schedule: &ScheduleConfig) -> Result<TriggerSpec, ScheduleError> {
    if !schedule.enabled {
        return Err(ScheduleError::Disabled);
    }

    if let Some(expression) = schedule.cron_expression() {
        if schedule.interval != Interval::None {
            tracing::debug!(interval = %schedule.interval, "cron overrides interval fields");
        }
        return TriggerSpec::from_crontab(expression);
    }

    if schedule.interval == Interval::None {
        return Err(ScheduleError::MissingTrigger);
    }

    check_range("hour", schedule.hour, 0, 23)?;
    check_range("minute", schedule.minute, 0, 59)?;
    let (hour, minute) = (schedule.hour, schedule.minute);

    match schedule.interval {
        Interval::Daily => TriggerSpec::from_crontab(&format!("{} {} * * *", minute, hour)),
        Interval::Weekly => {
            let day = schedule.day_of_week.ok_or(ScheduleError::MissingField {
                interval: Interval::Weekly,
                field: "day_of_week",
            })?;
            TriggerSpec::from_crontab(&format!("{} {} * * {}", minute, hour, day.cron_number()))
        }
        Interval::Monthly => {
            let day = schedule.day_of_month.ok_or(ScheduleError::MissingField {
                interval: Interval::Monthly,
                field: "day_of_month",
            })?;
            check_range("day_of_month", day, 1, 31)?;
            Ok(TriggerSpec {
                expression: format!("{} {} {} * *", minute, hour, day),
                rule: Rule::ClampedMonthly { day, hour, minute },
            })
        }
        Interval::None => Err(ScheduleError::MissingTrigger),
    }
}

fn check_range(field: &'static str, value: u32, min: u32, max: u32) -> Result<(), ScheduleError> {
    if value < min || value > max {
        return Err(ScheduleError::OutOfRange { field, value, min, max });
    }
    Ok(())
}

impl TriggerSpec {
    /// Parse a standard five-field crontab expression.
    pub fn from_crontab(expression: &str) -> Result<Self, ScheduleError> {
        let invalid = |reason: String| ScheduleError::InvalidCron {
            expression: expression.to_string(),
            reason,
        };

        let fields: Vec<&str> = expression.split_whitespace().collect();
        let &[minute, hour, day_of_month, month, day_of_week] = fields.as_slice() else {
            return Err(invalid(format!("expected 5 fields, found {}", fields.len())));
        };
        let weekdays = WeekdayField::parse(day_of_week).map_err(invalid)?;

        let schedule = |day_of_month: &str, day_of_week: &str| {
            let six_fields =
                format!("0 {} {} {} {} {}", minute, hour, day_of_month, month, day_of_week);
            Schedule::from_str(&six_fields).map_err(|err| invalid(err.to_string()))
        };
        let schedule_weekdays = weekdays.to_schedule_field();
        let schedules = if day_of_month.starts_with('*') || weekdays.is_star() {
            vec![schedule(day_of_month, &schedule_weekdays)?]
        } else {
            vec![schedule(day_of_month, "*")?, schedule("*", &schedule_weekdays)?]
        };

        let normalized = format!("{} {} {} {} {}", minute, hour, day_of_month, month, weekdays);
        Ok(Self { expression: normalized.to_lowercase(), rule: Rule::Cron(schedules) })
    }

    /// Render as `minute hour day-of-month month day-of-week`, weekdays in
    /// crontab numbering.
    pub fn to_cron_string(&self) -> String {
        self.expression.clone()
    }

    /// Day-of-month values past the end of a month fire on its last day.
    pub fn clamps_day_of_month(&self) -> bool {
        matches!(self.rule, Rule::ClampedMonthly { .. })
    }

    /// Next firing strictly after `after`, in the same timezone.
    ///
    /// Local times that do not exist (DST gaps) are skipped.
    pub fn next_after<Tz: TimeZone>(&self, after: &DateTime<Tz>) -> Option<DateTime<Tz>> {
        match &self.rule {
            Rule::Cron(schedules) => {
                schedules.iter().filter_map(|schedule| schedule.after(after).next()).min()
            }
            Rule::ClampedMonthly { day, hour, minute } => {
                next_clamped(*day, *hour, *minute, after)
            }
        }
    }
}

fn next_clamped<Tz: TimeZone>(
    day: u32,
    hour: u32,
    minute: u32,
    after: &DateTime<Tz>,
) -> Option<DateTime<Tz>> {
    let tz = after.timezone();
    let local = after.naive_local();
    let mut month = local.date().with_day(1)?;

    for _ in 0..=MAX_SEARCH_MONTHS {
        let candidate =
            month.with_day(day.min(last_day_of_month(month)))?.and_hms_opt(hour, minute, 0)?;
        if candidate > local {
            if let Some(fire_at) = tz.from_local_datetime(&candidate).earliest() {
                return Some(fire_at);
            }
        }
        month = month.checked_add_months(Months::new(1))?;
    }
    None
}

fn last_day_of_month(first: NaiveDate) -> u32 {
    first
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .map(|last| last.day())
        .unwrap_or(28)
}
