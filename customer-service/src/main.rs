use customer_service::prelude::*;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::load()?;
    init_tracing(&config)?;

    let pool = create_pool(&config.database).await?;
    let store = PgStore::new(pool, config.database.statement_timeout());
    let api = CustomerApi::new(CustomerService::new(store));

    serve(&config, api).await
}
