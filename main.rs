use todo_app::*;

#[tokio::main]
async fn main() -> Result {
    init_tracing();
    migrate(&DB).await?;
    serve(router(DB.clone())).await
}
