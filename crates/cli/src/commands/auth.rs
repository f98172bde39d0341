//! Authentication and profile commands.

use bramblefig_client::api::ProfileUpdate;
use bramblefig_client::error::ClientError;
use bramblefig_client::state::Storefront;

/// Log in and store the session.
pub async fn login(storefront: &Storefront, email: &str, password: &str) -> Result<(), ClientError> {
    let session = storefront.api().login(email, password).await?;

    let name = session.name.clone();
    storefront.login(session)?;
    println!("Welcome back, {name}!");

    Ok(())
}

/// Create an account; a successful registration logs straight in.
pub async fn register(
    storefront: &Storefront,
    name: &str,
    email: &str,
    password: &str,
) -> Result<(), ClientError> {
    let session = storefront.api().register(name, email, password).await?;

    storefront.login(session)?;
    println!("Account created. Welcome, {name}!");

    Ok(())
}

/// Drop the current session.
pub fn logout(storefront: &Storefront) -> Result<(), ClientError> {
    if storefront.session().is_logged_in() {
        storefront.logout();
        println!("Logged out.");
    } else {
        println!("Not logged in.");
    }
    Ok(())
}

/// Show the locally stored session.
pub fn whoami(storefront: &Storefront) -> Result<(), ClientError> {
    match storefront.session().current() {
        Some(session) => {
            println!("{} <{}>", session.name, session.email);
            if session.is_admin {
                println!("(admin)");
            }
        }
        None => println!("Not logged in."),
    }
    Ok(())
}

/// Update the profile. The backend hands back a fresh session payload,
/// which replaces the stored one.
pub async fn update(
    storefront: &Storefront,
    name: Option<String>,
    password: Option<String>,
) -> Result<(), ClientError> {
    let current = storefront.api().profile().await?;

    let update = ProfileUpdate {
        name: name.unwrap_or(current.name),
        email: current.email,
        password: password.unwrap_or_default(),
    };

    let session = storefront.api().update_profile(&update).await?;
    storefront.login(session)?;
    println!("Profile updated!");

    Ok(())
}
