use super::error::{DomainError, DomainResult};
use super::todo::{Todo, TodoId, TodoUpdate};
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;

pub const DEFAULT_PROJECT_NAME: &str = "Default Project Name";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize)]
pub struct ProjectId(pub u64);

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for ProjectId {
    fn from(id: u64) -> Self {
        ProjectId(id)
    }
}

/// A named group of todos.
///
/// The project owns its todos and hands out their ids from a private counter
/// that only moves forward, so a deleted todo's id is never issued again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    id: ProjectId,
    name: String,
    description: String,
    hidden: bool,
    todos: Vec<Todo>,
    #[serde(rename = "idCounter")]
    todo_id_counter: u64,
}

impl Default for Project {
    fn default() -> Self {
        Self {
            id: ProjectId(0),
            name: String::new(),
            description: String::new(),
            hidden: false,
            todos: Vec::new(),
            todo_id_counter: 1,
        }
    }
}

impl Project {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    /// Seeds the project with copies of `todos`. Their ids are kept as given and
    /// the counter is moved past the largest of them.
    ///
    /// Fails if two seeds share an id or the largest id leaves no room to grow.
    pub fn with_todos(mut self, todos: &[Todo]) -> DomainResult<Self> {
        self.todos = todos.to_vec();
        self.check_todo_ids()?;
        if let Some(floor) = self.next_free_todo_id()? {
            self.todo_id_counter = self.todo_id_counter.max(floor);
        }
        Ok(self)
    }

    pub(crate) fn from_parts(
        id: ProjectId,
        name: String,
        description: String,
        hidden: bool,
        todos: Vec<Todo>,
        todo_id_counter: u64,
    ) -> Self {
        Self {
            id,
            name,
            description,
            hidden,
            todos,
            todo_id_counter,
        }
    }

    pub fn id(&self) -> ProjectId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn hidden(&self) -> bool {
        self.hidden
    }

    pub fn todo_id_counter(&self) -> u64 {
        self.todo_id_counter
    }

    pub fn todo_count(&self) -> usize {
        self.todos.len()
    }

    /// Borrowed view of the todos, in insertion order.
    pub fn todos(&self) -> &[Todo] {
        &self.todos
    }

    pub(crate) fn set_id(&mut self, id: ProjectId) {
        self.id = id;
    }

    pub(crate) fn set_todo_id_counter(&mut self, counter: u64) {
        self.todo_id_counter = counter;
    }

    /// Adopts `todo`, stamping it with the next id from this project's counter.
    pub fn add_todo(&mut self, mut todo: Todo) -> DomainResult<TodoId> {
        let id = TodoId(self.todo_id_counter);
        self.todo_id_counter = self
            .todo_id_counter
            .checked_add(1)
            .ok_or(DomainError::IdsExhausted(self.todo_id_counter))?;
        todo.set_id(id);
        self.todos.push(todo);
        Ok(id)
    }

    pub fn get_todos(&self) -> Vec<Todo> {
        self.todos.clone()
    }

    pub fn get_todo(&self, id: TodoId) -> Option<Todo> {
        self.todos.iter().find(|todo| todo.id() == id).cloned()
    }

    pub fn update_todo(&mut self, id: TodoId, updates: &TodoUpdate) -> bool {
        match self.todos.iter_mut().find(|todo| todo.id() == id) {
            Some(todo) => {
                todo.update(updates);
                true
            }
            None => false,
        }
    }

    pub fn delete_todo(&mut self, id: TodoId) -> Option<Todo> {
        let index = self.todos.iter().position(|todo| todo.id() == id)?;
        Some(self.todos.remove(index))
    }

    pub fn update(&mut self, updates: &ProjectUpdate) {
        if let Some(name) = &updates.name {
            self.name = if name.trim().is_empty() {
                DEFAULT_PROJECT_NAME.to_string()
            } else {
                name.clone()
            };
        }
        if let Some(description) = &updates.description {
            self.description = description.clone();
        }
        if let Some(hidden) = updates.hidden {
            self.hidden = hidden;
        }
    }

    /// Flips the fold state and returns the new value.
    pub fn toggle_hidden(&mut self) -> bool {
        self.hidden = !self.hidden;
        self.hidden
    }

    /// Highest todo id currently held, if any.
    pub(crate) fn max_todo_id(&self) -> Option<TodoId> {
        self.todos.iter().map(Todo::id).max()
    }

    /// One past the highest todo id held, or `None` for an empty project.
    pub(crate) fn next_free_todo_id(&self) -> DomainResult<Option<u64>> {
        self.max_todo_id()
            .map(|max| max.0.checked_add(1).ok_or(DomainError::IdsExhausted(max.0)))
            .transpose()
    }

    pub(crate) fn check_todo_ids(&self) -> DomainResult<()> {
        let mut seen = HashSet::with_capacity(self.todos.len());
        for todo in &self.todos {
            if !seen.insert(todo.id()) {
                return Err(DomainError::DuplicateTodoId(todo.id().0));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub hidden: Option<bool>,
}

impl ProjectUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none() && self.hidden.is_none()
    }
}
