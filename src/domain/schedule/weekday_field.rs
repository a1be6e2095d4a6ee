//! Crontab day-of-week field normalization.
//!
//! Crontab numbers weekdays 0-7 with both 0 and 7 meaning Sunday, while the
//! `cron` crate numbers them 1-7 starting at Sunday. Items starting with `*`
//! select the same days in both numberings and pass through; everything else
//! is expanded into explicit days.

use std::collections::BTreeSet;
use std::fmt;

const NAMES: [&str; 7] = ["sun", "mon", "tue", "wed", "thu", "fri", "sat"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct WeekdayField {
    star: bool,
    wildcards: Vec<String>,
    /// Crontab numbering, Sunday = 0.
    days: BTreeSet<u32>,
}

impl WeekdayField {
    pub(super) fn parse(field: &str) -> Result<Self, String> {
        let mut wildcards = Vec::new();
        let mut days = BTreeSet::new();

        for item in field.split(',') {
            if item == "?" || item.starts_with('*') {
                wildcards.push(item.to_string());
                continue;
            }

            let (range, step) = match item.split_once('/') {
                Some((range, step)) => {
                    let step = step
                        .parse::<usize>()
                        .ok()
                        .filter(|step| *step > 0)
                        .ok_or_else(|| format!("invalid day-of-week step '{}'", step))?;
                    (range, Some(step))
                }
                None => (item, None),
            };
            let (start, end) = match (range.split_once('-'), step) {
                (Some((start, end)), _) => (day_number(start)?, day_number(end)?),
                // `n/s` runs from n to the end of the week.
                (None, Some(_)) => (day_number(range)?, 7),
                (None, None) => {
                    let day = day_number(range)?;
                    (day, day)
                }
            };
            if start > end {
                return Err(format!("day-of-week range '{}' runs backwards", range));
            }
            days.extend((start..=end).step_by(step.unwrap_or(1)).map(|day| day % 7));
        }

        Ok(Self { star: field.starts_with('*') || field.starts_with('?'), wildcards, days })
    }

    /// Whether the field counts as unrestricted when combined with
    /// day-of-month. Like vixie cron, only the leading character decides, so
    /// `*/2` is unrestricted while `1-5` is not.
    pub(super) fn is_star(&self) -> bool {
        self.star
    }

    /// Rendering in the `cron` crate's numbering.
    pub(super) fn to_schedule_field(&self) -> String {
        self.join(|day| day + 1)
    }

    fn join(&self, number: impl Fn(u32) -> u32) -> String {
        self.wildcards
            .iter()
            .cloned()
            .chain(self.days.iter().map(|day| number(*day).to_string()))
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl fmt::Display for WeekdayField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.join(|day| day))
    }
}

fn day_number(token: &str) -> Result<u32, String> {
    let lowered = token.to_lowercase();
    if let Some(index) = NAMES.iter().position(|name| *name == lowered) {
        return Ok(index as u32);
    }
    match token.parse::<u32>() {
        Ok(day) if day <= 7 => Ok(day),
        Ok(day) => Err(format!("day-of-week value {} out of range 0-7", day)),
        Err(_) => Err(format!("invalid day-of-week value '{}'", token)),
    }
}
