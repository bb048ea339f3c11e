use crate::domain::*;
use serde::{Deserialize, Serialize};

// Persisted document layout. Field names are part of the on-disk format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotDto {
    pub id_counter: u64,
    #[serde(default)]
    pub projects_list: Vec<ProjectDto>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDto {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub hidden: bool,
    pub id_counter: u64,
    #[serde(default)]
    pub todos: Vec<TodoDto>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoDto {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub due_date: Option<String>,
}

impl SnapshotDto {
    pub fn capture(project_id_counter: u64, projects: &[Project]) -> Self {
        Self {
            id_counter: project_id_counter,
            projects_list: projects.iter().map(ProjectDto::from).collect(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

impl From<&Todo> for TodoDto {
    fn from(todo: &Todo) -> Self {
        Self {
            id: todo.id().0,
            title: todo.title().to_string(),
            description: todo.description().to_string(),
            due_date: todo.due_date().map(str::to_string),
        }
    }
}

impl From<TodoDto> for Todo {
    fn from(dto: TodoDto) -> Self {
        Todo::from_parts(TodoId(dto.id), dto.title, dto.description, dto.due_date)
    }
}

impl From<&Project> for ProjectDto {
    fn from(project: &Project) -> Self {
        Self {
            id: project.id().0,
            name: project.name().to_string(),
            description: project.description().to_string(),
            hidden: project.hidden(),
            id_counter: project.todo_id_counter(),
            todos: project.todos().iter().map(TodoDto::from).collect(),
        }
    }
}

impl From<ProjectDto> for Project {
    fn from(dto: ProjectDto) -> Self {
        Project::from_parts(
            ProjectId(dto.id),
            dto.name,
            dto.description,
            dto.hidden,
            dto.todos.into_iter().map(Todo::from).collect(),
            dto.id_counter,
        )
    }
}
