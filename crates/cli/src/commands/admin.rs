//! Admin-only user management commands.

use std::io::Write;

use bramblefig_client::error::ClientError;
use bramblefig_client::state::Storefront;
use bramblefig_core::UserId;

/// List all users.
pub async fn users(storefront: &Storefront) -> Result<(), ClientError> {
    let users = storefront.api().list_users().await?;

    println!("{:<10} {:<24} {:<32} {:>5}", "ID", "NAME", "EMAIL", "ADMIN");
    for user in users {
        println!(
            "{:<10} {:<24} {:<32} {:>5}",
            user.id.to_string(),
            user.name,
            user.email,
            if user.is_admin { "yes" } else { "no" },
        );
    }

    Ok(())
}

/// Delete a user after confirmation.
pub async fn delete_user(storefront: &Storefront, id: &str, yes: bool) -> Result<(), ClientError> {
    if !yes && !confirm(&format!("Delete user {id}?")) {
        println!("Aborted.");
        return Ok(());
    }

    storefront.api().delete_user(&UserId::new(id)).await?;
    println!("User {id} deleted.");

    Ok(())
}

/// Prompt for a y/N answer on stdin. Anything but `y`/`yes` declines.
fn confirm(prompt: &str) -> bool {
    print!("{prompt} [y/N] ");
    if std::io::stdout().flush().is_err() {
        return false;
    }

    let mut answer = String::new();
    if std::io::stdin().read_line(&mut answer).is_err() {
        return false;
    }

    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}
