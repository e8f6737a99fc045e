use crate::*;

/// The browser UI is htmx-driven, so the client state container lives
/// server-side as the page's session state. Single-user scope, one session.
pub type SharedApp = Arc<RwLock<App<Handlers>>>;

const HTMX: &str = "https://unpkg.com/htmx.org@1.9.12";
const PICO_CSS: &str = "https://cdn.jsdelivr.net/npm/@picocss/pico@2/css/pico.min.css";

pub fn ui_router(app: SharedApp) -> Router {
    Router::new()
        .route("/", get(page))
        .route("/todos", post(create))
        .route("/todos/:id", delete(remove))
        .route("/todos/:id/toggle", post(toggle))
        .route("/todos/:id/edit", post(edit))
        .route("/todos/:id/save", post(save))
        .route("/todos/:id/cancel", post(cancel))
        .with_state(app)
}

async fn page(State(app): State<SharedApp>) -> Markup {
    let mut app = app.write().await;
    // page load is the "mount": refresh the cache from the server state
    let _ = app.load().await;
    html! {(DOCTYPE) html {
        head {
            meta charset="utf-8";
            meta name="viewport" content="width=device-width, initial-scale=1.0";
            title { "Todos" }
            script src=(HTMX) {}
            link rel="stylesheet" href=(PICO_CSS);
        }
        body { main class="container" {
            h1 { "Todos" }
            (main_fragment(&app))
        }}
    }}
}

async fn create(State(app): State<SharedApp>, Form(draft): Form<Draft>) -> Markup {
    let mut app = app.write().await;
    app.create_draft = draft;
    // failures are logged by the container and the draft stays on screen
    let _ = app.submit_create().await;
    main_fragment(&app)
}

async fn toggle(State(app): State<SharedApp>, Path(id): Path<i64>) -> Markup {
    let mut app = app.write().await;
    let _ = app.toggle(id).await;
    main_fragment(&app)
}

async fn remove(State(app): State<SharedApp>, Path(id): Path<i64>) -> Markup {
    let mut app = app.write().await;
    let _ = app.delete(id).await;
    main_fragment(&app)
}

async fn edit(State(app): State<SharedApp>, Path(id): Path<i64>) -> Markup {
    let mut app = app.write().await;
    app.start_editing(id);
    main_fragment(&app)
}

async fn save(
    State(app): State<SharedApp>,
    Path(id): Path<i64>,
    Form(draft): Form<Draft>,
) -> Markup {
    let mut app = app.write().await;
    if app.editing == Some(id) {
        app.edit_draft = draft;
        let _ = app.save_edit().await;
    }
    main_fragment(&app)
}

async fn cancel(State(app): State<SharedApp>, Path(_id): Path<i64>) -> Markup {
    let mut app = app.write().await;
    app.cancel_editing();
    main_fragment(&app)
}

/// Everything below the header; every mutation swaps this whole block.
pub fn main_fragment(app: &App<Handlers>) -> Markup {
    html! { div #todos {
        (stats(app))
        (create_form(app))
        section {
            h2 { "Pending" }
            @if app.pending_count() == 0 {
                p { "Nothing pending. Add a todo above." }
            }
            @for todo in app.pending() { (todo_item(app, todo)) }
        }
        @if app.completed_count() > 0 {
            section {
                h2 { "Completed" }
                @for todo in app.completed() { (todo_item(app, todo)) }
            }
        }
    }}
}

fn stats(app: &App<Handlers>) -> Markup {
    html! { p .stats {
        strong { (app.todos.len()) } " total, "
        strong { (app.pending_count()) } " pending, "
        strong { (app.completed_count()) } " completed"
    }}
}

fn create_form(app: &App<Handlers>) -> Markup {
    html! { form hx-post="/todos" hx-target="#todos" hx-swap="outerHTML" {
        input
            type="text"
            name="title"
            placeholder="What needs to be done?"
            value=(app.create_draft.title)
            required;
        textarea name="description" placeholder="Add a description (optional)" {
            (app.create_draft.description)
        }
        button type="submit" disabled[app.creating] {
            @if app.creating { "Adding..." } @else { "Add todo" }
        }
    }}
}

fn todo_item(app: &App<Handlers>, todo: &Todo) -> Markup {
    if app.editing == Some(todo.id) {
        return edit_form(app, todo.id);
    }
    html! { article .todo data-id=(todo.id) {
        label {
            input
                type="checkbox"
                checked[todo.completed]
                hx-post={ "/todos/" (todo.id) "/toggle" }
                hx-target="#todos"
                hx-swap="outerHTML";
            @if todo.completed { s { (todo.title) } } @else { (todo.title) }
        }
        @if let Some(description) = &todo.description {
            p .description { (description) }
        }
        small { "Created " (todo.created_at.format("%b %e, %Y").to_string()) }
        div .actions {
            button
                hx-post={ "/todos/" (todo.id) "/edit" }
                hx-target="#todos"
                hx-swap="outerHTML" { "Edit" }
            button
                hx-delete={ "/todos/" (todo.id) }
                hx-confirm="Delete this todo? This cannot be undone."
                hx-target="#todos"
                hx-swap="outerHTML" { "Delete" }
        }
    }}
}

fn edit_form(app: &App<Handlers>, id: i64) -> Markup {
    html! { article .todo.editing data-id=(id) {
        form hx-post={ "/todos/" (id) "/save" } hx-target="#todos" hx-swap="outerHTML" {
            input type="text" name="title" value=(app.edit_draft.title) required;
            textarea name="description" placeholder="Description" {
                (app.edit_draft.description)
            }
            button type="submit" { "Save" }
            button
                type="button"
                hx-post={ "/todos/" (id) "/cancel" }
                hx-target="#todos"
                hx-swap="outerHTML" { "Cancel" }
        }
    }}
}
