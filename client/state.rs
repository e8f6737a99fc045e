use crate::*;

/// Unpersisted form values for an in-progress create or edit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Draft {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
}

/// Client state container: a disposable cache of the server's list plus
/// the two form drafts. At most one row is in edit mode, tracked by id.
/// Local mutations happen only after the server confirms, so a failed
/// call leaves the list exactly as it was.
pub struct App<C: TodoRpc> {
    rpc: C,
    pub todos: Vec<Todo>,
    pub creating: bool,
    pub editing: Option<i64>,
    pub create_draft: Draft,
    pub edit_draft: Draft,
}

impl<C: TodoRpc> App<C> {
    pub fn new(rpc: C) -> Self {
        Self {
            rpc,
            todos: Vec::new(),
            creating: false,
            editing: None,
            create_draft: Draft::default(),
            edit_draft: Draft::default(),
        }
    }

    /// Replaces the whole cache with the server's list.
    pub async fn load(&mut self) -> Result {
        match self.rpc.get_todos().await {
            Ok(todos) => {
                self.todos = todos;
                OK
            }
            Err(e) => {
                error!("failed to load todos: {e}");
                Err(e)
            }
        }
    }

    /// Submits the create draft; on success prepends the new row (the
    /// server lists newest first) and clears the draft.
    pub async fn submit_create(&mut self) -> Result {
        if self.create_draft.title.trim().is_empty() {
            return Err(Error::Validation("title must not be empty".to_owned()));
        }
        let input = CreateTodo {
            title: self.create_draft.title.clone(),
            description: none_if_empty(&self.create_draft.description),
        };
        self.creating = true;
        let result = self.rpc.create_todo(input).await;
        self.creating = false;
        match result {
            Ok(todo) => {
                self.todos.insert(0, todo);
                self.create_draft = Draft::default();
                OK
            }
            Err(e) => {
                error!("failed to create todo: {e}");
                Err(e)
            }
        }
    }

    pub async fn toggle(&mut self, id: i64) -> Result {
        match self.rpc.toggle_todo(id).await {
            Ok(updated) => {
                self.replace(updated);
                OK
            }
            Err(e) => {
                error!("failed to toggle todo {id}: {e}");
                Err(e)
            }
        }
    }

    pub async fn delete(&mut self, id: i64) -> Result {
        match self.rpc.delete_todo(id).await {
            Ok(_) => {
                self.todos.retain(|t| t.id != id);
                OK
            }
            Err(e) => {
                error!("failed to delete todo {id}: {e}");
                Err(e)
            }
        }
    }

    /// Enters edit mode for the row, snapshotting its current values
    /// into the edit draft. No-op for ids not in the cache.
    pub fn start_editing(&mut self, id: i64) {
        if let Some(todo) = self.todos.iter().find(|t| t.id == id) {
            self.editing = Some(id);
            self.edit_draft = Draft {
                title: todo.title.clone(),
                description: todo.description.clone().unwrap_or_default(),
            };
        }
    }

    /// Discards the edit draft without contacting the server.
    pub fn cancel_editing(&mut self) {
        self.editing = None;
        self.edit_draft = Draft::default();
    }

    /// Sends the edit draft as a partial update; on success swaps the row
    /// in place and leaves edit mode.
    pub async fn save_edit(&mut self) -> Result {
        let Some(id) = self.editing else { return OK };
        if self.edit_draft.title.trim().is_empty() {
            return Err(Error::Validation("title must not be empty".to_owned()));
        }
        let patch = UpdateTodo {
            title: Some(self.edit_draft.title.clone()),
            description: Some(none_if_empty(&self.edit_draft.description)),
            completed: None,
        };
        match self.rpc.update_todo(id, patch).await {
            Ok(updated) => {
                self.replace(updated);
                self.cancel_editing();
                OK
            }
            Err(e) => {
                error!("failed to update todo {id}: {e}");
                Err(e)
            }
        }
    }

    pub fn pending(&self) -> impl Iterator<Item = &Todo> {
        self.todos.iter().filter(|t| !t.completed)
    }

    pub fn completed(&self) -> impl Iterator<Item = &Todo> {
        self.todos.iter().filter(|t| t.completed)
    }

    pub fn pending_count(&self) -> usize {
        self.pending().count()
    }

    pub fn completed_count(&self) -> usize {
        self.completed().count()
    }

    fn replace(&mut self, updated: Todo) {
        if let Some(slot) = self.todos.iter_mut().find(|t| t.id == updated.id) {
            *slot = updated;
        }
    }
}

fn none_if_empty(s: &str) -> Option<String> {
    if s.trim().is_empty() {
        None
    } else {
        Some(s.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{
        atomic::{AtomicBool, AtomicI64, AtomicUsize, Ordering},
        Mutex,
    };

    /// In-memory stand-in for the server side of the boundary.
    #[derive(Default)]
    struct FakeRpc {
        todos: Mutex<Vec<Todo>>,
        next_id: AtomicI64,
        calls: AtomicUsize,
        fail_next: AtomicBool,
    }

    impl FakeRpc {
        fn seeded(titles: &[&str]) -> Self {
            let fake = Self::default();
            for title in titles {
                let _ = seed_todo(&fake, title);
            }
            fake
        }

        fn fail_next(&self) {
            self.fail_next.store(true, Ordering::SeqCst);
        }

        fn check_failure(&self) -> Result {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_next.swap(false, Ordering::SeqCst) {
                return Err(Error::Rpc("server unreachable".to_owned()));
            }
            OK
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    fn seed_todo(fake: &FakeRpc, title: &str) -> Todo {
        let now = Utc::now();
        let todo = Todo {
            id: fake.next_id.fetch_add(1, Ordering::SeqCst) + 1,
            title: title.to_owned(),
            description: None,
            completed: false,
            created_at: now,
            updated_at: now,
        };
        fake.todos.lock().unwrap().insert(0, todo.clone());
        todo
    }

    #[async_trait]
    impl TodoRpc for FakeRpc {
        async fn get_todos(&self) -> Result<Vec<Todo>> {
            self.check_failure()?;
            Ok(self.todos.lock().unwrap().clone())
        }

        async fn create_todo(&self, input: CreateTodo) -> Result<Todo> {
            self.check_failure()?;
            input.validate()?;
            let mut todo = seed_todo(self, &input.title);
            todo.description = input.description;
            self.todos.lock().unwrap()[0] = todo.clone();
            Ok(todo)
        }

        async fn update_todo(&self, id: i64, patch: UpdateTodo) -> Result<Todo> {
            self.check_failure()?;
            patch.validate()?;
            let mut todos = self.todos.lock().unwrap();
            let todo = todos
                .iter_mut()
                .find(|t| t.id == id)
                .ok_or(Error::NotFound(id))?;
            if let Some(title) = patch.title {
                todo.title = title;
            }
            if let Some(description) = patch.description {
                todo.description = description;
            }
            if let Some(completed) = patch.completed {
                todo.completed = completed;
            }
            todo.updated_at = todo.updated_at + Duration::microseconds(1);
            Ok(todo.clone())
        }

        async fn toggle_todo(&self, id: i64) -> Result<Todo> {
            self.check_failure()?;
            let mut todos = self.todos.lock().unwrap();
            let todo = todos
                .iter_mut()
                .find(|t| t.id == id)
                .ok_or(Error::NotFound(id))?;
            todo.completed = !todo.completed;
            todo.updated_at = todo.updated_at + Duration::microseconds(1);
            Ok(todo.clone())
        }

        async fn delete_todo(&self, id: i64) -> Result<DeleteResult> {
            self.check_failure()?;
            let mut todos = self.todos.lock().unwrap();
            let before = todos.len();
            todos.retain(|t| t.id != id);
            Ok(DeleteResult {
                success: todos.len() < before,
            })
        }
    }

    #[tokio::test]
    async fn load_fills_the_cache() {
        let mut app = App::new(FakeRpc::seeded(&["A", "B"]));
        app.load().await.unwrap();
        assert_eq!(app.todos.len(), 2);
        assert_eq!(app.todos[0].title, "B");
    }

    #[tokio::test]
    async fn create_prepends_and_clears_the_draft() {
        let mut app = App::new(FakeRpc::seeded(&["A"]));
        app.load().await.unwrap();
        app.create_draft = Draft {
            title: "B".to_owned(),
            description: "details".to_owned(),
        };
        app.submit_create().await.unwrap();
        assert!(!app.creating);
        assert_eq!(app.todos[0].title, "B");
        assert_eq!(app.todos[0].description.as_deref(), Some("details"));
        assert_eq!(app.create_draft, Draft::default());
    }

    #[tokio::test]
    async fn blank_create_draft_never_reaches_the_server() {
        let mut app = App::new(FakeRpc::default());
        app.create_draft.title = "   ".to_owned();
        assert!(matches!(
            app.submit_create().await,
            Err(Error::Validation(_))
        ));
        assert_eq!(app.rpc.call_count(), 0);
        // the draft survives so the user can fix it
        assert_eq!(app.create_draft.title, "   ");
    }

    #[tokio::test]
    async fn toggle_replaces_the_row_in_place() {
        let mut app = App::new(FakeRpc::seeded(&["A", "B"]));
        app.load().await.unwrap();
        let id = app.todos[1].id;
        app.toggle(id).await.unwrap();
        assert_eq!(app.todos.len(), 2);
        assert_eq!(app.todos[1].id, id);
        assert!(app.todos[1].completed);
        assert!(!app.todos[0].completed);
    }

    #[tokio::test]
    async fn delete_removes_only_the_matching_row() {
        let mut app = App::new(FakeRpc::seeded(&["A", "B"]));
        app.load().await.unwrap();
        let id = app.todos[0].id;
        app.delete(id).await.unwrap();
        assert_eq!(app.todos.len(), 1);
        assert_eq!(app.todos[0].title, "A");
    }

    #[tokio::test]
    async fn editing_snapshots_cancel_discards() {
        let mut app = App::new(FakeRpc::seeded(&["A"]));
        app.load().await.unwrap();
        let id = app.todos[0].id;
        let calls_before = app.rpc.call_count();

        app.start_editing(id);
        assert_eq!(app.editing, Some(id));
        assert_eq!(app.edit_draft.title, "A");

        app.edit_draft.title = "changed locally".to_owned();
        app.cancel_editing();
        assert_eq!(app.editing, None);
        assert_eq!(app.edit_draft, Draft::default());
        assert_eq!(app.todos[0].title, "A");
        // neither enter nor cancel talked to the server
        assert_eq!(app.rpc.call_count(), calls_before);
    }

    #[tokio::test]
    async fn start_editing_unknown_id_is_a_no_op() {
        let mut app = App::new(FakeRpc::seeded(&["A"]));
        app.load().await.unwrap();
        app.start_editing(999);
        assert_eq!(app.editing, None);
    }

    #[tokio::test]
    async fn save_edit_updates_and_leaves_edit_mode() {
        let mut app = App::new(FakeRpc::seeded(&["A"]));
        app.load().await.unwrap();
        let id = app.todos[0].id;
        app.start_editing(id);
        app.edit_draft.title = "A2".to_owned();
        app.edit_draft.description = String::new();

        app.save_edit().await.unwrap();
        assert_eq!(app.editing, None);
        assert_eq!(app.todos[0].title, "A2");
        assert_eq!(app.todos[0].description, None);
    }

    #[tokio::test]
    async fn failed_mutation_leaves_the_cache_untouched() {
        let mut app = App::new(FakeRpc::seeded(&["A"]));
        app.load().await.unwrap();
        let snapshot = app.todos.clone();
        let id = snapshot[0].id;

        app.rpc.fail_next();
        assert!(app.toggle(id).await.is_err());
        assert_eq!(app.todos, snapshot);

        app.rpc.fail_next();
        assert!(app.delete(id).await.is_err());
        assert_eq!(app.todos, snapshot);

        app.create_draft.title = "new".to_owned();
        app.rpc.fail_next();
        assert!(app.submit_create().await.is_err());
        assert_eq!(app.todos, snapshot);
        assert!(!app.creating);
    }

    #[tokio::test]
    async fn counters_split_pending_and_completed() {
        let mut app = App::new(FakeRpc::seeded(&["A", "B", "C"]));
        app.load().await.unwrap();
        let id = app.todos[0].id;
        app.toggle(id).await.unwrap();
        assert_eq!(app.pending_count(), 2);
        assert_eq!(app.completed_count(), 1);
    }
}
