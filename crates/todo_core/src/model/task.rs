//! Task domain model.
//!
//! # Responsibility
//! - Define the canonical task record and its JSON wire shape.
//! - Provide title normalization shared by create and edit paths.
//!
//! # Invariants
//! - `id` is a random UUID and never reused for another task.
//! - `title` is trimmed and non-empty.
//! - `created_at` is fixed at construction and truncated to milliseconds.
//! - The serialized `createdAt` round-trips exactly, even for finer values.
//!
//! # Wire format
//! Fields serialize in camelCase. `dueDate` is `YYYY-MM-DD` or `""` when
//! unset; `createdAt` is RFC 3339 UTC with millisecond precision, widened to
//! micro- or nanoseconds only when the value carries them.

use chrono::{DateTime, NaiveDate, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use uuid::Uuid;

/// Stable identifier for a task.
pub type TaskId = Uuid;

/// Calendar format used for `dueDate` in storage and CLI input.
pub const DUE_DATE_FORMAT: &str = "%Y-%m-%d";

/// Task priority chosen at creation time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    /// No priority selected.
    #[default]
    None,
    Low,
    Medium,
    High,
}

impl Priority {
    /// Returns the stable storage name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl Display for Priority {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = ParseModeError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "none" | "" => Ok(Self::None),
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            _ => Err(ParseModeError::new("priority", value, "none|low|medium|high")),
        }
    }
}

/// Error returned when a mode or priority name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseModeError {
    kind: &'static str,
    value: String,
    expected: &'static str,
}

impl ParseModeError {
    pub(crate) fn new(kind: &'static str, value: &str, expected: &'static str) -> Self {
        Self {
            kind,
            value: value.to_string(),
            expected,
        }
    }
}

impl Display for ParseModeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unsupported {} `{}`; expected {}",
            self.kind, self.value, self.expected
        )
    }
}

impl Error for ParseModeError {}

/// Validation errors for task invariants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskValidationError {
    /// Title is empty after trimming.
    EmptyTitle,
    /// Title carries leading or trailing whitespace.
    UntrimmedTitle,
}

impl Display for TaskValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "task title must not be blank"),
            Self::UntrimmedTitle => write!(f, "task title must be trimmed"),
        }
    }
}

impl Error for TaskValidationError {}

/// Canonical task record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    /// Empty string when the user gave no description.
    #[serde(default)]
    pub description: String,
    #[serde(default, with = "due_date_format")]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub completed: bool,
    #[serde(with = "created_at_format")]
    pub created_at: DateTime<Utc>,
}

impl Task {
    /// Creates an open task with a generated id.
    ///
    /// Returns `None` when `title` is blank after trimming. Title and
    /// description are stored trimmed.
    pub fn new(
        title: &str,
        description: &str,
        due_date: Option<NaiveDate>,
        priority: Priority,
        created_at: DateTime<Utc>,
    ) -> Option<Self> {
        let title = normalize_title(title)?;
        Some(Self {
            id: Uuid::new_v4(),
            title,
            description: description.trim().to_string(),
            due_date,
            priority,
            completed: false,
            created_at: created_at.trunc_subsecs(3),
        })
    }

    /// Validates invariants that must hold for stored tasks.
    pub fn validate(&self) -> Result<(), TaskValidationError> {
        if self.title.trim().is_empty() {
            return Err(TaskValidationError::EmptyTitle);
        }
        if self.title.trim() != self.title {
            return Err(TaskValidationError::UntrimmedTitle);
        }
        Ok(())
    }
}

/// Trims a title candidate, returning `None` when nothing is left.
pub fn normalize_title(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

mod due_date_format {
    use super::DUE_DATE_FORMAT;
    use chrono::NaiveDate;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        value: &Option<NaiveDate>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(date) => serializer.collect_str(&date.format(DUE_DATE_FORMAT)),
            None => serializer.serialize_str(""),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<NaiveDate>, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        match raw.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(text) => NaiveDate::parse_from_str(text, DUE_DATE_FORMAT)
                .map(Some)
                .map_err(|err| de::Error::custom(format!("invalid dueDate `{text}`: {err}"))),
        }
    }
}

mod created_at_format {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        value: &DateTime<Utc>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        // Sub-millisecond values come from hand-built tasks; keep every digit so
        // a reload compares equal.
        let precision = if value.timestamp_subsec_nanos() % 1_000_000 == 0 {
            SecondsFormat::Millis
        } else {
            SecondsFormat::AutoSi
        };
        serializer.serialize_str(&value.to_rfc3339_opts(precision, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(raw.trim())
            .map(|value| value.with_timezone(&Utc))
            .map_err(|err| de::Error::custom(format!("invalid createdAt `{raw}`: {err}")))
    }
}

#[cfg(test)]
mod tests {
    use super::{normalize_title, Priority, Task, TaskValidationError};
    use chrono::{NaiveDate, TimeDelta, TimeZone, Utc};

    fn created_at() -> chrono::DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, 9, 30, 0).unwrap()
    }

    #[test]
    fn new_trims_title_and_description() {
        let task = Task::new("  Buy milk ", "  two litres ", None, Priority::Low, created_at())
            .expect("non-blank title should create a task");
        assert_eq!(task.title, "Buy milk");
        assert_eq!(task.description, "two litres");
        assert!(!task.completed);
        assert!(task.validate().is_ok());
    }

    #[test]
    fn new_rejects_blank_title() {
        assert!(Task::new("   ", "", None, Priority::None, created_at()).is_none());
        assert!(normalize_title("\t\n").is_none());
    }

    #[test]
    fn validate_flags_blank_and_untrimmed_titles() {
        let mut task = Task::new("ok", "", None, Priority::None, created_at()).unwrap();
        task.title = " ".to_string();
        assert_eq!(task.validate(), Err(TaskValidationError::EmptyTitle));
        task.title = " padded".to_string();
        assert_eq!(task.validate(), Err(TaskValidationError::UntrimmedTitle));
    }

    #[test]
    fn serializes_with_camel_case_and_empty_due_date() {
        let task = Task::new("Pay bills", "", None, Priority::High, created_at()).unwrap();
        let json = serde_json::to_value(&task).expect("task should serialize");
        assert_eq!(json["dueDate"], "");
        assert_eq!(json["priority"], "high");
        assert_eq!(json["completed"], false);
        assert_eq!(json["createdAt"], "2025-03-01T09:30:00.000Z");
    }

    #[test]
    fn sub_millisecond_created_at_keeps_its_digits() {
        let mut task = Task::new("Precise", "", None, Priority::None, created_at()).unwrap();
        task.created_at += TimeDelta::microseconds(1500);
        let json = serde_json::to_value(&task).expect("task should serialize");
        assert_eq!(json["createdAt"], "2025-03-01T09:30:00.001500Z");

        let back: Task = serde_json::from_value(json).expect("task should deserialize");
        assert_eq!(back, task);
    }

    #[test]
    fn deserializes_due_date_and_missing_optional_fields() {
        let raw = r#"{
            "id": "7f0c4a52-2f0e-4f65-9d6b-2b8c0f3f4a11",
            "title": "Dentist",
            "dueDate": "2025-04-10",
            "createdAt": "2025-03-01T09:30:00.000Z"
        }"#;
        let task: Task = serde_json::from_str(raw).expect("task should deserialize");
        assert_eq!(task.due_date, NaiveDate::from_ymd_opt(2025, 4, 10));
        assert_eq!(task.description, "");
        assert_eq!(task.priority, Priority::None);
        assert!(!task.completed);
    }

    #[test]
    fn priority_parses_case_insensitively() {
        assert_eq!("HIGH".parse::<Priority>(), Ok(Priority::High));
        assert_eq!("".parse::<Priority>(), Ok(Priority::None));
        let err = "urgent".parse::<Priority>().expect_err("unknown priority");
        assert!(err.to_string().contains("urgent"));
    }
}
