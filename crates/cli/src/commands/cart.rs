//! Cart commands.

use bramblefig_client::error::ClientError;
use bramblefig_client::state::Storefront;
use bramblefig_client::store::cart::{cart_summary_tax_rate, free_shipping_threshold};
use bramblefig_core::{ProductId, format_usd};

/// Show the cart and its summary totals.
///
/// The summary uses the cart view's 8% tax rate; the order review applies
/// its own.
pub fn show(storefront: &Storefront) -> Result<(), ClientError> {
    let lines = storefront.cart().lines();

    if lines.is_empty() {
        println!("Your cart is empty.");
        return Ok(());
    }

    println!("{:<10} {:<32} {:>5} {:>10} {:>10}", "ID", "NAME", "QTY", "PRICE", "LINE");
    for line in &lines {
        println!(
            "{:<10} {:<32} {:>5} {:>10} {:>10}",
            line.product.to_string(),
            line.name,
            line.qty,
            format_usd(line.price),
            format_usd(line.price * rust_decimal::Decimal::from(line.qty)),
        );
    }

    let totals = storefront.cart().totals(cart_summary_tax_rate());
    println!();
    println!("Subtotal: {}", format_usd(totals.subtotal));
    println!("Shipping: {}", format_usd(totals.shipping));
    println!("Tax:      {}", format_usd(totals.tax));
    println!("Total:    {}", format_usd(totals.total));

    if totals.subtotal > free_shipping_threshold() {
        println!("\nYou qualify for free shipping!");
    } else {
        println!(
            "\nAdd {} more to qualify for free shipping.",
            format_usd(free_shipping_threshold() - totals.subtotal)
        );
    }

    Ok(())
}

/// Fetch a product and add it to the cart.
pub async fn add(storefront: &Storefront, id: &str, qty: u32) -> Result<(), ClientError> {
    let product = storefront.api().get_product(&ProductId::new(id)).await?;

    storefront.cart().add_item(&product, qty)?;
    println!("Added to cart: {} x{qty}", product.name);

    Ok(())
}

/// Set a line's quantity. The minimum of 1 is enforced at the argument
/// parser; dropping a line is `remove`.
pub fn set_qty(storefront: &Storefront, id: &str, qty: u32) -> Result<(), ClientError> {
    storefront.cart().set_quantity(&ProductId::new(id), qty)?;
    println!("Quantity updated.");
    Ok(())
}

/// Remove a line from the cart.
pub fn remove(storefront: &Storefront, id: &str) -> Result<(), ClientError> {
    storefront.cart().remove_item(&ProductId::new(id))?;
    println!("Removed from cart.");
    Ok(())
}

/// Empty the cart.
pub fn clear(storefront: &Storefront) -> Result<(), ClientError> {
    storefront.cart().clear();
    println!("Cart cleared.");
    Ok(())
}
