use super::render;
use crate::application::{AppError, AppResult, ProjectStore};
use crate::domain::*;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use serde::Serialize;

const NEW_PROJECT_NAME: &str = "New Project";
const NEW_TODO_TITLE: &str = "New To-do";

/// Result of one command: text for stdout, or a failure message for stderr.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Printed(String),
    Failed(String),
}

fn id_arg(name: &'static str, help: &'static str) -> Arg {
    Arg::new(name)
        .help(help)
        .required(true)
        .value_parser(value_parser!(u64))
}

fn text_arg(name: &'static str, help: &'static str) -> Arg {
    Arg::new(name).long(name).value_name("TEXT").help(help)
}

pub fn build_cli() -> Command {
    Command::new("todo-projects")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Projects and to-dos, kept in a local snapshot")
        .long_about("Projects and to-dos, kept in a local snapshot.\n\nRun without a subcommand to print the sidebar.")
        .arg(
            Arg::new("data-dir")
                .long("data-dir")
                .value_name("DIR")
                .help("Directory holding the snapshot (overrides TODO_PROJECTS_DATA_DIR)")
                .value_parser(value_parser!(std::path::PathBuf))
                .global(true),
        )
        .arg(
            Arg::new("key")
                .long("key")
                .value_name("KEY")
                .help("Storage slot to read and write")
                .global(true),
        )
        .arg(
            Arg::new("ephemeral")
                .long("ephemeral")
                .help("Keep everything in memory for this run only")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand(Command::new("sidebar").about("Print projects and their to-dos"))
        .subcommand(
            Command::new("view")
                .about("Print the detail pane for nothing, a project, or a to-do")
                .arg(
                    Arg::new("project_id")
                        .help("Project to show")
                        .value_parser(value_parser!(u64)),
                )
                .arg(
                    Arg::new("todo_id")
                        .help("To-do to show")
                        .requires("project_id")
                        .value_parser(value_parser!(u64)),
                ),
        )
        .subcommand(Command::new("export").about("Print the stored snapshot document"))
        .subcommand(
            Command::new("projects")
                .about("Project operations")
                .subcommand_required(true)
                .subcommand(Command::new("list").about("List projects as JSON"))
                .subcommand(
                    Command::new("show")
                        .about("Show one project as JSON")
                        .arg(id_arg("id", "Project ID")),
                )
                .subcommand(
                    Command::new("add")
                        .about("Create a project")
                        .arg(Arg::new("name").help("Project name"))
                        .arg(text_arg("description", "Project description")),
                )
                .subcommand(
                    Command::new("update")
                        .about("Change project fields")
                        .arg(id_arg("id", "Project ID"))
                        .arg(text_arg("name", "New name (blank resets to the default)"))
                        .arg(text_arg("description", "New description"))
                        .arg(
                            Arg::new("hidden")
                                .long("hidden")
                                .value_name("BOOL")
                                .help("Fold the project in the sidebar")
                                .value_parser(value_parser!(bool)),
                        ),
                )
                .subcommand(
                    Command::new("toggle")
                        .about("Fold or unfold a project in the sidebar")
                        .arg(id_arg("id", "Project ID")),
                )
                .subcommand(
                    Command::new("delete")
                        .about("Delete a project and its to-dos")
                        .arg(id_arg("id", "Project ID")),
                ),
        )
        .subcommand(
            Command::new("todos")
                .about("To-do operations")
                .subcommand_required(true)
                .subcommand(
                    Command::new("list")
                        .about("List a project's to-dos as JSON")
                        .arg(id_arg("project_id", "Project ID")),
                )
                .subcommand(
                    Command::new("show")
                        .about("Show one to-do as JSON")
                        .arg(id_arg("project_id", "Project ID"))
                        .arg(id_arg("todo_id", "To-do ID")),
                )
                .subcommand(
                    Command::new("add")
                        .about("Add a to-do to a project")
                        .arg(id_arg("project_id", "Project ID"))
                        .arg(Arg::new("title").help("To-do title"))
                        .arg(text_arg("description", "To-do description"))
                        .arg(text_arg("due", "Due date, e.g. 2024-05-10")),
                )
                .subcommand(
                    Command::new("update")
                        .about("Change to-do fields")
                        .arg(id_arg("project_id", "Project ID"))
                        .arg(id_arg("todo_id", "To-do ID"))
                        .arg(text_arg("title", "New title (blank resets to the default)"))
                        .arg(text_arg("description", "New description"))
                        .arg(text_arg("due", "New due date"))
                        .arg(
                            Arg::new("clear-due")
                                .long("clear-due")
                                .help("Remove the due date")
                                .action(ArgAction::SetTrue)
                                .conflicts_with("due"),
                        ),
                )
                .subcommand(
                    Command::new("delete")
                        .about("Delete a to-do")
                        .arg(id_arg("project_id", "Project ID"))
                        .arg(id_arg("todo_id", "To-do ID")),
                ),
        )
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> AppResult<String> {
    serde_json::to_string_pretty(value).map_err(|e| AppError::Serialization(e.to_string()))
}

fn project_id(matches: &ArgMatches, name: &str) -> ProjectId {
    ProjectId(matches.get_one::<u64>(name).copied().unwrap_or_default())
}

fn todo_id(matches: &ArgMatches, name: &str) -> TodoId {
    TodoId(matches.get_one::<u64>(name).copied().unwrap_or_default())
}

fn text(matches: &ArgMatches, name: &str) -> Option<String> {
    matches.get_one::<String>(name).cloned()
}

fn missing_project(id: ProjectId) -> Outcome {
    Outcome::Failed(format!("Project {id} not found"))
}

fn missing_todo(project_id: ProjectId, todo_id: TodoId) -> Outcome {
    Outcome::Failed(format!("To-do {todo_id} not found in project {project_id}"))
}

fn nothing_to_update() -> Outcome {
    Outcome::Failed("Nothing to update; pass at least one field".to_string())
}

/// Runs a parsed command line against the store.
pub fn dispatch(matches: &ArgMatches, store: &mut ProjectStore) -> AppResult<Outcome> {
    match matches.subcommand() {
        None | Some(("sidebar", _)) => Ok(Outcome::Printed(render::render_sidebar(
            &store.get_projects(),
        ))),
        Some(("view", view_matches)) => view(view_matches, store),
        Some(("export", _)) => Ok(Outcome::Printed(to_json(&store.snapshot())?)),
        Some(("projects", project_matches)) => projects(project_matches, store),
        Some(("todos", todo_matches)) => todos(todo_matches, store),
        Some((other, _)) => Ok(Outcome::Failed(format!("Unknown command `{other}`"))),
    }
}

fn view(matches: &ArgMatches, store: &ProjectStore) -> AppResult<Outcome> {
    let Some(&pid) = matches.get_one::<u64>("project_id") else {
        return Ok(Outcome::Printed(render::render_empty_pane()));
    };
    let pid = ProjectId(pid);
    let Some(project) = store.get_project(pid) else {
        return Ok(missing_project(pid));
    };

    match matches.get_one::<u64>("todo_id") {
        None => Ok(Outcome::Printed(render::render_project_pane(&project))),
        Some(&tid) => match project.get_todo(TodoId(tid)) {
            Some(todo) => Ok(Outcome::Printed(render::render_todo_pane(&project, &todo))),
            None => Ok(missing_todo(pid, TodoId(tid))),
        },
    }
}

fn projects(matches: &ArgMatches, store: &mut ProjectStore) -> AppResult<Outcome> {
    match matches.subcommand() {
        Some(("list", _)) => Ok(Outcome::Printed(to_json(&store.get_projects())?)),
        Some(("show", sub)) => {
            let id = project_id(sub, "id");
            match store.get_project(id) {
                Some(project) => Ok(Outcome::Printed(to_json(&project)?)),
                None => Ok(missing_project(id)),
            }
        }
        Some(("add", sub)) => {
            let name = text(sub, "name").unwrap_or_else(|| NEW_PROJECT_NAME.to_string());
            let mut project = Project::new(name);
            if let Some(description) = text(sub, "description") {
                project = project.with_description(description);
            }
            let id = store.add_project(project)?;
            Ok(Outcome::Printed(format!("Created project {id}\n")))
        }
        Some(("update", sub)) => {
            let id = project_id(sub, "id");
            let updates = ProjectUpdate {
                name: text(sub, "name"),
                description: text(sub, "description"),
                hidden: sub.get_one::<bool>("hidden").copied(),
            };
            if updates.is_empty() {
                return Ok(nothing_to_update());
            }
            if store.update_project(id, &updates)? {
                Ok(Outcome::Printed(format!("Updated project {id}\n")))
            } else {
                Ok(missing_project(id))
            }
        }
        Some(("toggle", sub)) => {
            let id = project_id(sub, "id");
            match store.toggle_project_hidden(id)? {
                Some(true) => Ok(Outcome::Printed(format!("Folded project {id}\n"))),
                Some(false) => Ok(Outcome::Printed(format!("Unfolded project {id}\n"))),
                None => Ok(missing_project(id)),
            }
        }
        Some(("delete", sub)) => {
            let id = project_id(sub, "id");
            match store.delete_project(id)? {
                Some(removed) => Ok(Outcome::Printed(format!(
                    "Deleted project {id} ({})\n",
                    removed.name()
                ))),
                None => Ok(missing_project(id)),
            }
        }
        Some((other, _)) => Ok(Outcome::Failed(format!(
            "Unknown projects subcommand `{other}`"
        ))),
        None => Ok(Outcome::Failed("Missing projects subcommand".to_string())),
    }
}

fn todos(matches: &ArgMatches, store: &mut ProjectStore) -> AppResult<Outcome> {
    match matches.subcommand() {
        Some(("list", sub)) => {
            let pid = project_id(sub, "project_id");
            match store.get_todos_from_project(pid) {
                Some(todos) => Ok(Outcome::Printed(to_json(&todos)?)),
                None => Ok(missing_project(pid)),
            }
        }
        Some(("show", sub)) => {
            let pid = project_id(sub, "project_id");
            let tid = todo_id(sub, "todo_id");
            match store.get_todo_from_project(pid, tid) {
                Some(todo) => Ok(Outcome::Printed(to_json(&todo)?)),
                None => Ok(missing_todo(pid, tid)),
            }
        }
        Some(("add", sub)) => {
            let pid = project_id(sub, "project_id");
            let title = text(sub, "title").unwrap_or_else(|| NEW_TODO_TITLE.to_string());
            let mut todo = Todo::new(title);
            if let Some(description) = text(sub, "description") {
                todo = todo.with_description(description);
            }
            if let Some(due) = text(sub, "due") {
                todo = todo.with_due_date(due);
            }
            match store.add_todo_to_project(pid, todo)? {
                Some(tid) => Ok(Outcome::Printed(format!(
                    "Created to-do {tid} in project {pid}\n"
                ))),
                None => Ok(missing_project(pid)),
            }
        }
        Some(("update", sub)) => {
            let pid = project_id(sub, "project_id");
            let tid = todo_id(sub, "todo_id");
            let due_date = if sub.get_flag("clear-due") {
                Some(None)
            } else {
                text(sub, "due").map(Some)
            };
            let updates = TodoUpdate {
                title: text(sub, "title"),
                description: text(sub, "description"),
                due_date,
            };
            if updates.is_empty() {
                return Ok(nothing_to_update());
            }
            if store.update_todo_from_project(pid, tid, &updates)? {
                Ok(Outcome::Printed(format!(
                    "Updated to-do {tid} in project {pid}\n"
                )))
            } else {
                Ok(missing_todo(pid, tid))
            }
        }
        Some(("delete", sub)) => {
            let pid = project_id(sub, "project_id");
            let tid = todo_id(sub, "todo_id");
            match store.delete_todo_from_project(pid, tid)? {
                Some(removed) => Ok(Outcome::Printed(format!(
                    "Deleted to-do {tid} ({}) from project {pid}\n",
                    removed.title()
                ))),
                None => Ok(missing_todo(pid, tid)),
            }
        }
        Some((other, _)) => Ok(Outcome::Failed(format!(
            "Unknown todos subcommand `{other}`"
        ))),
        None => Ok(Outcome::Failed("Missing todos subcommand".to_string())),
    }
}
