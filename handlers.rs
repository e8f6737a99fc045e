use crate::*;

/// Validates the input and inserts a new row with both timestamps set to
/// the same instant and `completed = false`.
pub async fn create_todo(db: &Db, input: CreateTodo) -> Result<Todo> {
    input.validate()?;
    let now = Utc::now();
    let todo = sqlx::query_as::<_, Todo>(
        "INSERT INTO todos (title, description, completed, created_at, updated_at) \
         VALUES (?, ?, 0, ?, ?) RETURNING *",
    )
    .bind(&input.title)
    .bind(&input.description)
    .bind(now)
    .bind(now)
    .fetch_one(db)
    .await?;
    debug!("created todo {}", todo.id);
    Ok(todo)
}

/// All rows, newest first. The id tiebreak keeps same-instant rows in
/// creation order.
pub async fn get_todos(db: &Db) -> Result<Vec<Todo>> {
    let todos =
        sqlx::query_as::<_, Todo>("SELECT * FROM todos ORDER BY created_at DESC, id DESC")
            .fetch_all(db)
            .await?;
    Ok(todos)
}

/// Applies only the fields present in the patch and bumps `updated_at`.
/// Fields absent from the patch keep their stored values.
pub async fn update_todo(db: &Db, id: i64, patch: UpdateTodo) -> Result<Todo> {
    patch.validate()?;
    let prior = sqlx::query_as::<_, Todo>("SELECT * FROM todos WHERE id = ?")
        .bind(id)
        .fetch_optional(db)
        .await?
        .ok_or(Error::NotFound(id))?;

    let title = patch.title.unwrap_or(prior.title);
    let description = match patch.description {
        Some(description) => description,
        None => prior.description,
    };
    let completed = patch.completed.unwrap_or(prior.completed);

    let todo = sqlx::query_as::<_, Todo>(
        "UPDATE todos SET title = ?, description = ?, completed = ?, updated_at = ? \
         WHERE id = ? RETURNING *",
    )
    .bind(&title)
    .bind(&description)
    .bind(completed)
    .bind(after(prior.updated_at))
    .bind(id)
    .fetch_one(db)
    .await?;
    debug!("updated todo {id}");
    Ok(todo)
}

/// Flips `completed` in a single statement so concurrent toggles compose
/// instead of both writing the same inverted value.
pub async fn toggle_todo(db: &Db, id: i64) -> Result<Todo> {
    let prior_updated_at = sqlx::query_scalar::<_, DateTime<Utc>>(
        "SELECT updated_at FROM todos WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(db)
    .await?
    .ok_or(Error::NotFound(id))?;

    let todo = sqlx::query_as::<_, Todo>(
        "UPDATE todos SET completed = NOT completed, updated_at = ? WHERE id = ? RETURNING *",
    )
    .bind(after(prior_updated_at))
    .bind(id)
    .fetch_optional(db)
    .await?
    .ok_or(Error::NotFound(id))?;
    debug!("toggled todo {id} to completed = {}", todo.completed);
    Ok(todo)
}

/// Removes the row if present. A miss is a reported outcome, not an error.
pub async fn delete_todo(db: &Db, id: i64) -> Result<DeleteResult> {
    let result = sqlx::query("DELETE FROM todos WHERE id = ?")
        .bind(id)
        .execute(db)
        .await?;
    let success = result.rows_affected() > 0;
    debug!("delete todo {id}: success = {success}");
    Ok(DeleteResult { success })
}

// `updated_at` must strictly grow on every mutation, even if the clock
// has not advanced past the previous write.
fn after(prior: DateTime<Utc>) -> DateTime<Utc> {
    let now = Utc::now();
    if now > prior {
        now
    } else {
        prior + Duration::microseconds(1)
    }
}
