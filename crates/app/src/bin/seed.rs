// HR Docs - bootstrap the first admin employee and the document type catalogue

use tracing::info;

use hrdocs_common::{Config, Cpf, Error};
use hrdocs_db::{PgStore, Store};
use hrdocs_documents::DocumentTypesService;
use hrdocs_domain::DocumentTypeName;
use hrdocs_employees::{AdminEmployeesService, NewEmployee};

fn required(name: &str) -> anyhow::Result<String> {
    std::env::var(name).map_err(|_| anyhow::anyhow!("{} is required", name))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(&config.rust_log))
        .init();

    let cpf = Cpf::parse(&required("SEED_ADMIN_CPF")?)
        .map_err(|e| anyhow::anyhow!("SEED_ADMIN_CPF is invalid: {}", e))?;
    let admin = NewEmployee {
        first_name: std::env::var("SEED_ADMIN_FIRST_NAME")
            .unwrap_or_else(|_| "Admin".to_string()),
        last_name: std::env::var("SEED_ADMIN_LAST_NAME").unwrap_or_else(|_| "User".to_string()),
        username: required("SEED_ADMIN_USERNAME")?,
        password: required("SEED_ADMIN_PASSWORD")?,
        cpf,
        role: None,
    };

    let store = PgStore::connect(&config.database_url).await?;
    store.migrate().await?;

    match AdminEmployeesService::new(store.clone())
        .ensure_admin(admin)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create admin: {}", e))?
    {
        Some(admin) => {
            info!(employee_id = %admin.id, username = %admin.username, "Admin created")
        }
        None => info!("Admin already exists, skipping"),
    }

    let document_types = DocumentTypesService::new(store.clone());
    for name in DocumentTypeName::ALL {
        match document_types.create(name).await {
            Ok(created) => {
                info!(document_type_id = %created.id, name = %name, "Document type created")
            }
            Err(Error::Conflict(_)) => {}
            Err(e) => {
                return Err(anyhow::anyhow!(
                    "Failed to create document type {}: {}",
                    name,
                    e
                ))
            }
        }
    }

    store.close().await;
    info!("Seed complete");
    Ok(())
}
