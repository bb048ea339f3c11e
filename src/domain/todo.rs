use chrono::{Local, NaiveDate};
use serde::Serialize;
use std::fmt;

pub const DEFAULT_TODO_TITLE: &str = "Default To-Do Title";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize)]
pub struct TodoId(pub u64);

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for TodoId {
    fn from(id: u64) -> Self {
        TodoId(id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    id: TodoId,
    title: String,
    description: String,
    due_date: Option<String>,
}

impl Todo {
    /// Creates an unattached todo. The id stays 0 until a project adopts it.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_due_date(mut self, due_date: impl Into<String>) -> Self {
        self.due_date = Some(due_date.into());
        self
    }

    pub(crate) fn from_parts(
        id: TodoId,
        title: String,
        description: String,
        due_date: Option<String>,
    ) -> Self {
        Self {
            id,
            title,
            description,
            due_date,
        }
    }

    pub fn id(&self) -> TodoId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn due_date(&self) -> Option<&str> {
        self.due_date.as_deref()
    }

    pub(crate) fn set_id(&mut self, id: TodoId) {
        self.id = id;
    }

    pub fn update(&mut self, updates: &TodoUpdate) {
        if let Some(title) = &updates.title {
            self.title = if title.trim().is_empty() {
                DEFAULT_TODO_TITLE.to_string()
            } else {
                title.clone()
            };
        }
        if let Some(description) = &updates.description {
            self.description = description.clone();
        }
        if let Some(due_date) = &updates.due_date {
            self.due_date = due_date.clone();
        }
    }

    /// Format due date for display
    pub fn due_date_display(&self) -> String {
        self.due_date_display_from(Local::now().date_naive())
    }

    fn due_date_display_from(&self, today: NaiveDate) -> String {
        let Some(raw) = self.due_date.as_deref() else {
            return "No due date".to_string();
        };
        let Ok(due) = NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d") else {
            return raw.to_string();
        };

        match (due - today).num_days() {
            0 => "Today".to_string(),
            1 => "Tomorrow".to_string(),
            -1 => "Yesterday".to_string(),
            d if d < 0 => format!("{} days ago", -d),
            d if d <= 7 => format!("In {d} days"),
            _ => due.format("%Y-%m-%d").to_string(),
        }
    }
}

/// Closed set of todo fields a caller may change. `None` leaves a field alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub due_date: Option<Option<String>>,
}

impl TodoUpdate {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.due_date.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn new_todo_has_placeholder_id_and_empty_fields() {
        let todo = Todo::new("buy milk");
        assert_eq!(todo.id(), TodoId(0));
        assert_eq!(todo.title(), "buy milk");
        assert_eq!(todo.description(), "");
        assert_eq!(todo.due_date(), None);

        let blank = Todo::default();
        assert_eq!(blank.title(), "");
    }

    #[test]
    fn update_applies_only_present_fields() {
        let mut todo = Todo::new("t").with_description("d").with_due_date("2024-01-01");
        todo.update(&TodoUpdate {
            description: Some("new description".to_string()),
            ..Default::default()
        });

        assert_eq!(todo.title(), "t");
        assert_eq!(todo.description(), "new description");
        assert_eq!(todo.due_date(), Some("2024-01-01"));
    }

    #[test]
    fn blank_title_falls_back_to_default() {
        let mut todo = Todo::new("t");
        todo.update(&TodoUpdate {
            title: Some(String::new()),
            ..Default::default()
        });
        assert_eq!(todo.title(), DEFAULT_TODO_TITLE);

        todo.update(&TodoUpdate {
            title: Some("   \t".to_string()),
            ..Default::default()
        });
        assert_eq!(todo.title(), DEFAULT_TODO_TITLE);
    }

    #[test]
    fn due_date_can_be_cleared() {
        let mut todo = Todo::new("t").with_due_date("friday");
        todo.update(&TodoUpdate {
            due_date: Some(None),
            ..Default::default()
        });
        assert_eq!(todo.due_date(), None);
    }

    #[test]
    fn clone_keeps_every_field() {
        let mut original = Todo::new("t").with_description("d").with_due_date("2024-03-01");
        original.set_id(TodoId(7));

        let mut copy = original.clone();
        assert_eq!(copy, original);

        copy.update(&TodoUpdate {
            title: Some("changed".to_string()),
            ..Default::default()
        });
        assert_eq!(original.title(), "t");
    }

    #[test]
    fn due_date_display_labels() {
        let today = date("2024-05-10");

        assert_eq!(Todo::new("t").due_date_display_from(today), "No due date");
        assert_eq!(
            Todo::new("t").with_due_date("2024-05-10").due_date_display_from(today),
            "Today"
        );
        assert_eq!(
            Todo::new("t").with_due_date("2024-05-11").due_date_display_from(today),
            "Tomorrow"
        );
        assert_eq!(
            Todo::new("t").with_due_date("2024-05-09").due_date_display_from(today),
            "Yesterday"
        );
        assert_eq!(
            Todo::new("t").with_due_date("2024-05-07").due_date_display_from(today),
            "3 days ago"
        );
        assert_eq!(
            Todo::new("t").with_due_date("2024-05-15").due_date_display_from(today),
            "In 5 days"
        );
        assert_eq!(
            Todo::new("t").with_due_date("2024-07-01").due_date_display_from(today),
            "2024-07-01"
        );
        assert_eq!(
            Todo::new("t").with_due_date("next week").due_date_display_from(today),
            "next week"
        );
    }

    #[test]
    fn empty_update_detection() {
        assert!(TodoUpdate::default().is_empty());
        assert!(!TodoUpdate {
            due_date: Some(None),
            ..Default::default()
        }
        .is_empty());
    }
}
