use super::{AppError, AppResult, SnapshotDto};
use crate::domain::*;
use crate::ports::KeyValueStorage;
use std::collections::HashSet;
use std::sync::Arc;

/// Storage slot the snapshot lives under unless configured otherwise.
pub const DEFAULT_STORAGE_KEY: &str = "userData";

/// In-memory owner of every project, persisted as one document after each mutation.
///
/// Reads hand out clones; only the mutating methods touch the stored projects.
/// Lookups are linear scans over the project list.
pub struct ProjectStore {
    projects: Vec<Project>,
    project_id_counter: u64,
    storage: Arc<dyn KeyValueStorage>,
    storage_key: String,
}

impl ProjectStore {
    /// Opens the store, rebuilding it from the snapshot under `storage_key` if one exists.
    pub fn open(
        storage: Arc<dyn KeyValueStorage>,
        storage_key: impl Into<String>,
    ) -> AppResult<Self> {
        let storage_key = storage_key.into();
        let mut store = Self {
            projects: Vec::new(),
            project_id_counter: 1,
            storage,
            storage_key,
        };

        match store.storage.get_item(&store.storage_key)? {
            Some(json) => {
                let snapshot =
                    SnapshotDto::from_json(&json).map_err(|e| AppError::CorruptSnapshot {
                        key: store.storage_key.clone(),
                        reason: e.to_string(),
                    })?;
                store.restore(snapshot)?;
                tracing::info!(
                    "Loaded {} project(s) from `{}`",
                    store.projects.len(),
                    store.storage_key
                );
            }
            None => {
                tracing::info!("No snapshot under `{}`, starting empty", store.storage_key);
            }
        }

        Ok(store)
    }

    /// Rebuilds state from `snapshot`, rejecting documents whose ids collide or
    /// whose counters cannot move past the ids already issued.
    fn restore(&mut self, snapshot: SnapshotDto) -> AppResult<()> {
        let corrupt = |reason: String| AppError::CorruptSnapshot {
            key: self.storage_key.clone(),
            reason,
        };

        let mut projects: Vec<Project> = snapshot
            .projects_list
            .into_iter()
            .map(Project::from)
            .collect();

        let mut seen = HashSet::with_capacity(projects.len());
        for project in &projects {
            if !seen.insert(project.id()) {
                return Err(corrupt(format!("duplicate project id {}", project.id())));
            }
        }

        let mut project_id_counter = snapshot.id_counter.max(1);
        // Hand-edited documents can carry counters that would reissue ids.
        if let Some(max_id) = projects.iter().map(Project::id).max() {
            if project_id_counter <= max_id.0 {
                let floor = max_id
                    .0
                    .checked_add(1)
                    .ok_or_else(|| corrupt(format!("project id {max_id} leaves no id to issue")))?;
                tracing::warn!(
                    "Project id counter {} does not exceed id {}, raising it",
                    project_id_counter,
                    max_id
                );
                project_id_counter = floor;
            }
        }

        for project in &mut projects {
            project
                .check_todo_ids()
                .map_err(|e| corrupt(format!("{} in project {}", e, project.id())))?;
            let floor = project
                .next_free_todo_id()
                .map_err(|e| corrupt(format!("{} in project {}", e, project.id())))?
                .unwrap_or(1);
            if project.todo_id_counter() < floor {
                tracing::warn!(
                    "Todo id counter {} of project {} is behind its todos, raising it to {}",
                    project.todo_id_counter(),
                    project.id(),
                    floor
                );
                project.set_todo_id_counter(floor);
            }
        }

        self.project_id_counter = project_id_counter;
        self.projects = projects;
        Ok(())
    }

    pub fn project_id_counter(&self) -> u64 {
        self.project_id_counter
    }

    /// The document that the next write would store.
    pub fn snapshot(&self) -> SnapshotDto {
        SnapshotDto::capture(self.project_id_counter, &self.projects)
    }

    fn persist(&self) -> AppResult<()> {
        let json = self
            .snapshot()
            .to_json()
            .map_err(|e| AppError::Serialization(e.to_string()))?;
        self.storage.set_item(&self.storage_key, &json)?;
        tracing::debug!(
            "Saved {} project(s) to `{}` ({} bytes)",
            self.projects.len(),
            self.storage_key,
            json.len()
        );
        Ok(())
    }

    fn find_project_mut(&mut self, id: ProjectId) -> Option<&mut Project> {
        let project = self.projects.iter_mut().find(|project| project.id() == id);
        if project.is_none() {
            tracing::debug!("Project {} not found, ignoring todo operation", id);
        }
        project
    }

    fn find_project(&self, id: ProjectId) -> Option<&Project> {
        self.projects.iter().find(|project| project.id() == id)
    }

    pub fn get_projects(&self) -> Vec<Project> {
        self.projects.clone()
    }

    pub fn get_project(&self, id: ProjectId) -> Option<Project> {
        self.find_project(id).cloned()
    }

    pub fn add_project(&mut self, mut project: Project) -> AppResult<ProjectId> {
        let id = ProjectId(self.project_id_counter);
        self.project_id_counter = self
            .project_id_counter
            .checked_add(1)
            .ok_or(DomainError::IdsExhausted(self.project_id_counter))?;
        project.set_id(id);
        tracing::info!("Adding project {} ({})", id, project.name());
        self.projects.push(project);
        self.persist()?;
        Ok(id)
    }

    pub fn update_project(&mut self, id: ProjectId, updates: &ProjectUpdate) -> AppResult<bool> {
        let Some(project) = self.projects.iter_mut().find(|project| project.id() == id) else {
            return Ok(false);
        };
        project.update(updates);
        self.persist()?;
        Ok(true)
    }

    /// Flips a project's fold state, returning the new value.
    pub fn toggle_project_hidden(&mut self, id: ProjectId) -> AppResult<Option<bool>> {
        let Some(project) = self.projects.iter_mut().find(|project| project.id() == id) else {
            return Ok(None);
        };
        let hidden = project.toggle_hidden();
        self.persist()?;
        Ok(Some(hidden))
    }

    pub fn delete_project(&mut self, id: ProjectId) -> AppResult<Option<Project>> {
        let Some(index) = self.projects.iter().position(|project| project.id() == id) else {
            return Ok(None);
        };
        let removed = self.projects.remove(index);
        tracing::info!("Deleted project {} ({})", id, removed.name());
        self.persist()?;
        Ok(Some(removed))
    }

    /// Returns `None` without writing anything when the project does not exist.
    pub fn add_todo_to_project(
        &mut self,
        project_id: ProjectId,
        todo: Todo,
    ) -> AppResult<Option<TodoId>> {
        let Some(project) = self.find_project_mut(project_id) else {
            return Ok(None);
        };
        let todo_id = project.add_todo(todo)?;
        tracing::debug!("Added todo {} to project {}", todo_id, project_id);
        self.persist()?;
        Ok(Some(todo_id))
    }

    pub fn get_todos_from_project(&self, project_id: ProjectId) -> Option<Vec<Todo>> {
        self.find_project(project_id).map(Project::get_todos)
    }

    pub fn get_todo_from_project(&self, project_id: ProjectId, todo_id: TodoId) -> Option<Todo> {
        self.find_project(project_id)?.get_todo(todo_id)
    }

    /// `false` covers both a missing project and a missing todo.
    pub fn update_todo_from_project(
        &mut self,
        project_id: ProjectId,
        todo_id: TodoId,
        updates: &TodoUpdate,
    ) -> AppResult<bool> {
        let Some(project) = self.find_project_mut(project_id) else {
            return Ok(false);
        };
        let updated = project.update_todo(todo_id, updates);
        tracing::debug!(
            "Update of todo {} in project {}: found={}",
            todo_id,
            project_id,
            updated
        );
        self.persist()?;
        Ok(updated)
    }

    pub fn delete_todo_from_project(
        &mut self,
        project_id: ProjectId,
        todo_id: TodoId,
    ) -> AppResult<Option<Todo>> {
        let Some(project) = self.find_project_mut(project_id) else {
            return Ok(None);
        };
        let removed = project.delete_todo(todo_id);
        tracing::debug!(
            "Delete of todo {} in project {}: found={}",
            todo_id,
            project_id,
            removed.is_some()
        );
        self.persist()?;
        Ok(removed)
    }
}
