use crate::cli::actions::Action;
use crate::gardisto::{
    handlers::auth::{GateConfig, GateState, Principal, StaticStrategy},
    new,
};
use anyhow::Result;
use std::sync::Arc;

/// Handle the server action
pub async fn handle(action: Action) -> Result<()> {
    match action {
        Action::Server {
            port,
            login_path,
            logout_path,
            failure_path,
            success_path,
            use_referrer,
            user,
            password,
        } => {
            let config = GateConfig::new()
                .with_auth_login_path(login_path)
                .with_auth_logout_path(logout_path)
                .with_auth_failure_path(failure_path)
                .with_auth_success_path(success_path)
                .with_auth_use_referrer(use_referrer);

            let principal = Principal {
                id: user.clone(),
                email: format!("{user}@localhost"),
                name: user.clone(),
            };
            let strategy = StaticStrategy::default().with_user(&user, &password, principal);

            let state = GateState::new(config, Arc::new(strategy));

            new(port, Arc::new(state)).await?;
        }
    }

    Ok(())
}
