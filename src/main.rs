use tracing::{error, info, warn, Instrument};
use user_directory::app_system::{setup_tracing, DirectorySystem};
use user_directory::config::Config;
use user_directory::domain::{User, UserDraft, UserRole};

#[tokio::main]
async fn main() -> Result<(), String> {
    let config = Config::new("directory").map_err(|e| e.to_string())?;

    // Setup tracing once for the entire application
    setup_tracing(config.log.level);

    info!("Starting user directory");

    let system = DirectorySystem::new(&config);

    // Seed the store
    let seed = [
        User::new("Chris", 25, "UMM", "chris@this.that", UserRole::Admin),
        User::new("Pat", 37, "IBM", "pat@something.com", UserRole::Editor),
        User::new("Jamie", 37, "OHMNET", "jamie@frogs.com", UserRole::Viewer),
        User::new("Sam", 45, "OHMNET", "sam@frogs.com", UserRole::Viewer),
    ];
    for user in seed {
        system.store.create_user(user).await.map_err(|e| e.to_string())?;
    }

    // Filter: viewers on the server, "sa" locally
    let span = tracing::info_span!("filtering");
    let view = async {
        system.filter.set_role(Some(UserRole::Viewer)).await?;
        system.filter.settled().await?;
        system.filter.set_name(Some("sa".to_owned())).await
    }
    .instrument(span)
    .await
    .map_err(|e| e.to_string())?;

    for user in &view.users {
        info!(user_name = %user.name, company = %user.company, "Filtered user");
    }

    // Submit a complete draft, then one without a company
    let draft = UserDraft {
        name: Some("John Smith".to_owned()),
        age: Some(25),
        company: Some("Acme".to_owned()),
        email: Some("user@example.com".to_owned()),
        avatar: None,
        role: UserRole::Editor,
    };

    let span = tracing::info_span!("submission");
    async {
        for draft in [draft.clone(), UserDraft { company: None, ..draft }] {
            if !system.submission.can_submit(&draft) {
                warn!("Draft not ready for submission");
                continue;
            }
            let outcome = system.submission.submit(&draft).await;
            match outcome.id() {
                Some(id) => info!(user_id = %id, status = %outcome.status, "Submission succeeded"),
                None => error!(status = %outcome.status, "Submission failed"),
            }
        }
    }
    .instrument(span)
    .await;

    let companies = system
        .store
        .companies(Default::default(), Default::default())
        .await
        .map_err(|e| e.to_string())?;
    for company in &companies {
        info!(company = %company.company, count = company.count, "Company");
    }

    // Shutdown system gracefully
    system.shutdown().await?;

    info!("Application completed successfully");
    Ok(())
}
