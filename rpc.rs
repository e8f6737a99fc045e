use crate::{handlers, *};

/// The typed RPC boundary. The server-side [`Handlers`] and the remote
/// [`RpcClient`](crate::client::RpcClient) both implement it, so client
/// code is written once against this trait.
#[async_trait]
pub trait TodoRpc: Send + Sync {
    async fn get_todos(&self) -> Result<Vec<Todo>>;
    async fn create_todo(&self, input: CreateTodo) -> Result<Todo>;
    async fn update_todo(&self, id: i64, patch: UpdateTodo) -> Result<Todo>;
    async fn toggle_todo(&self, id: i64) -> Result<Todo>;
    async fn delete_todo(&self, id: i64) -> Result<DeleteResult>;
}

/// Server-side endpoint of the boundary: the handlers bound to a pool.
#[derive(Clone)]
pub struct Handlers {
    db: Db,
}

impl Handlers {
    pub fn new(db: Db) -> Self {
        Self { db }
    }
}

#[async_trait]
impl TodoRpc for Handlers {
    async fn get_todos(&self) -> Result<Vec<Todo>> {
        handlers::get_todos(&self.db).await
    }
    async fn create_todo(&self, input: CreateTodo) -> Result<Todo> {
        handlers::create_todo(&self.db, input).await
    }
    async fn update_todo(&self, id: i64, patch: UpdateTodo) -> Result<Todo> {
        handlers::update_todo(&self.db, id, patch).await
    }
    async fn toggle_todo(&self, id: i64) -> Result<Todo> {
        handlers::toggle_todo(&self.db, id).await
    }
    async fn delete_todo(&self, id: i64) -> Result<DeleteResult> {
        handlers::delete_todo(&self.db, id).await
    }
}

/// JSON surface of the boundary, nested under `/api` by the host.
pub fn api_router(db: Db) -> Router {
    Router::new()
        .route("/todos", get(list).post(create))
        .route("/todos/:id", patch(update).delete(remove))
        .route("/todos/:id/toggle", post(toggle))
        .with_state(db)
}

async fn list(State(db): State<Db>) -> Result<Json<Vec<Todo>>> {
    Ok(Json(handlers::get_todos(&db).await?))
}

async fn create(
    State(db): State<Db>,
    Json(input): Json<CreateTodo>,
) -> Result<(StatusCode, Json<Todo>)> {
    let todo = handlers::create_todo(&db, input).await?;
    Ok((StatusCode::CREATED, Json(todo)))
}

async fn update(
    State(db): State<Db>,
    Path(id): Path<i64>,
    Json(patch): Json<UpdateTodo>,
) -> Result<Json<Todo>> {
    Ok(Json(handlers::update_todo(&db, id, patch).await?))
}

async fn toggle(State(db): State<Db>, Path(id): Path<i64>) -> Result<Json<Todo>> {
    Ok(Json(handlers::toggle_todo(&db, id).await?))
}

async fn remove(State(db): State<Db>, Path(id): Path<i64>) -> Result<Json<DeleteResult>> {
    Ok(Json(handlers::delete_todo(&db, id).await?))
}
