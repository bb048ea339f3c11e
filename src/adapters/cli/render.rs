//! Plain-text views over store snapshots: the sidebar listing and the
//! empty / project / todo detail panes.

use crate::domain::{Project, Todo};
use std::fmt::Write;

pub fn render_sidebar(projects: &[Project]) -> String {
    let mut out = String::from("Projects\n");
    if projects.is_empty() {
        out.push_str("  (no projects yet)\n");
        return out;
    }

    for project in projects {
        let marker = if project.hidden() { '▸' } else { '▾' };
        let _ = writeln!(out, "{marker} [{}] {}", project.id(), project.name());
        if project.hidden() {
            continue;
        }
        for todo in project.todos() {
            let _ = writeln!(out, "    [{}] {}", todo.id(), todo.title());
        }
    }
    out
}

pub fn render_empty_pane() -> String {
    "Nothing selected\n\nPick a project or a to-do from the sidebar.\n".to_string()
}

pub fn render_project_pane(project: &Project) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} (project {})", project.name(), project.id());
    if !project.description().is_empty() {
        let _ = writeln!(out, "{}", project.description());
    }
    out.push('\n');

    if project.todos().is_empty() {
        out.push_str("  No to-dos\n");
    }
    for todo in project.todos() {
        let _ = writeln!(
            out,
            "  [{}] {} | {}",
            todo.id(),
            todo.title(),
            todo.due_date_display()
        );
    }
    out
}

pub fn render_todo_pane(project: &Project, todo: &Todo) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} > {}", project.name(), todo.title());
    let _ = writeln!(out, "Due: {}", todo.due_date_display());
    if !todo.description().is_empty() {
        out.push('\n');
        let _ = writeln!(out, "{}", todo.description());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ProjectId, TodoId};

    fn project_with_todos() -> Project {
        let mut project = Project::new("Home").with_description("chores");
        project.set_id(ProjectId(1));
        project.add_todo(Todo::new("dishes")).unwrap();
        project.add_todo(Todo::new("laundry").with_due_date("someday")).unwrap();
        project
    }

    #[test]
    fn sidebar_lists_open_projects_with_todos() {
        let mut folded = Project::new("Work").with_hidden(true);
        folded.set_id(ProjectId(2));
        folded.add_todo(Todo::new("report")).unwrap();

        let sidebar = render_sidebar(&[project_with_todos(), folded]);
        assert_eq!(
            sidebar,
            "Projects\n▾ [1] Home\n    [1] dishes\n    [2] laundry\n▸ [2] Work\n"
        );
    }

    #[test]
    fn sidebar_without_projects() {
        assert_eq!(render_sidebar(&[]), "Projects\n  (no projects yet)\n");
    }

    #[test]
    fn project_pane_shows_due_labels() {
        let pane = render_project_pane(&project_with_todos());
        assert!(pane.starts_with("Home (project 1)\nchores\n"));
        assert!(pane.contains("  [1] dishes | No due date\n"));
        assert!(pane.contains("  [2] laundry | someday\n"));
    }

    #[test]
    fn empty_project_pane() {
        let pane = render_project_pane(&Project::new("Empty"));
        assert!(pane.contains("No to-dos"));
    }

    #[test]
    fn todo_pane_shows_details() {
        let project = project_with_todos();
        let todo = project.get_todo(TodoId(2)).unwrap();
        assert_eq!(
            render_todo_pane(&project, &todo),
            "Home > laundry\nDue: someday\n"
        );

        let described = Todo::new("x").with_description("longer text");
        assert!(render_todo_pane(&project, &described).ends_with("\nlonger text\n"));
    }
}
