//! Checkout flow commands: shipping -> payment -> review -> place.

use bramblefig_client::error::ClientError;
use bramblefig_client::models::ShippingAddress;
use bramblefig_client::state::Storefront;
use bramblefig_core::{PaymentMethod, format_usd};

/// Stage the shipping address.
pub fn shipping(
    storefront: &Storefront,
    address: String,
    city: String,
    postal_code: String,
    country: String,
) -> Result<(), ClientError> {
    storefront.drafts().set_shipping(&ShippingAddress {
        address,
        city,
        postal_code,
        country,
    })?;

    println!("Shipping address saved. Next: `bf-cli checkout payment`.");
    Ok(())
}

/// Choose the payment method.
pub fn payment(storefront: &Storefront, method: PaymentMethod) -> Result<(), ClientError> {
    storefront.drafts().set_payment_method(method)?;
    println!("Payment method saved: {method}. Next: `bf-cli checkout review`.");
    Ok(())
}

/// Show the order review.
pub fn review(storefront: &Storefront) -> Result<(), ClientError> {
    let review = storefront.checkout().review()?;

    println!("Shipping");
    let addr = &review.shipping_address;
    println!(
        "  {}, {}, {}, {}",
        addr.address, addr.city, addr.postal_code, addr.country
    );

    println!("Payment");
    println!("  {}", review.payment_method);

    println!("Items");
    for item in &review.items {
        println!(
            "  {} x {:<32} {:>10}",
            item.qty,
            item.name,
            format_usd(item.price * rust_decimal::Decimal::from(item.qty)),
        );
    }

    println!();
    println!("Subtotal: {}", format_usd(review.totals.subtotal));
    println!("Tax:      {}", format_usd(review.totals.tax));
    println!("Shipping: {}", format_usd(review.totals.shipping));
    println!("Total:    {}", format_usd(review.totals.total));
    println!("\nPlace with `bf-cli checkout place`.");

    Ok(())
}

/// Place the order.
pub async fn place(storefront: &Storefront) -> Result<(), ClientError> {
    let order = storefront.checkout().place_order().await?;

    println!("Thank you! Your order id is: {}", order.id);
    if let Some(user) = &order.user {
        println!("We'll send a confirmation email to {}.", user.email);
    }
    println!("Track it with `bf-cli orders show {}`.", order.id);

    Ok(())
}
