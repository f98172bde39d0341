//! Favorites commands.

use bramblefig_client::error::ClientError;
use bramblefig_client::state::Storefront;
use bramblefig_core::{ProductId, format_usd};

/// Toggle a product in the favorites list.
pub async fn toggle(storefront: &Storefront, id: &str) -> Result<(), ClientError> {
    let product = storefront.api().get_product(&ProductId::new(id)).await?;

    let added = storefront.favorites().toggle(&product)?;
    if added {
        println!("Added to favorites!");
    } else {
        println!("Removed from favorites");
    }

    Ok(())
}

/// List favorites.
pub fn list(storefront: &Storefront) -> Result<(), ClientError> {
    let entries = storefront.favorites().entries();

    if entries.is_empty() {
        println!("No favorites yet.");
        return Ok(());
    }

    println!("{:<10} {:<32} {:>10}", "ID", "NAME", "PRICE");
    for entry in entries {
        println!(
            "{:<10} {:<32} {:>10}",
            entry.id.to_string(),
            entry.name,
            format_usd(entry.price)
        );
    }

    Ok(())
}
