//! Create-admin command - Bootstrap the first back-office account.

use std::sync::Arc;

use validator::Validate;

use crate::api::handlers::auth_handler::RegisterRequest;
use crate::cli::args::CreateAdminArgs;
use crate::config::Config;
use crate::errors::AppResult;
use crate::infra::{Database, Persistence};
use crate::services::{AuthService, Authenticator};

/// Execute the create-admin command
pub async fn execute(args: CreateAdminArgs, config: Config) -> AppResult<()> {
    let request = RegisterRequest {
        email: args.email,
        password: args.password,
    };
    request.validate()?;

    let db = Database::connect(&config).await?;
    let uow = Arc::new(Persistence::new(db.get_connection()));
    let auth = Authenticator::new(uow, config);

    let admin = auth.register(request.email, request.password).await?;
    println!("Created admin {} ({})", admin.email, admin.id);

    Ok(())
}
