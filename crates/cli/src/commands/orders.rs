//! Order history commands.

use bramblefig_client::error::ClientError;
use bramblefig_client::state::Storefront;
use bramblefig_core::{OrderId, format_usd};

/// List the current user's orders.
pub async fn list(storefront: &Storefront) -> Result<(), ClientError> {
    let orders = storefront.api().my_orders().await?;

    if orders.is_empty() {
        println!("No orders found.");
        return Ok(());
    }

    println!("{:<12} {:>10} {:>6} {:>10}", "ORDER", "TOTAL", "PAID", "DELIVERED");
    for order in orders {
        println!(
            "{:<12} {:>10} {:>6} {:>10}",
            order.id.to_string(),
            format_usd(order.total_price),
            if order.is_paid { "yes" } else { "no" },
            if order.is_delivered { "yes" } else { "no" },
        );
    }

    Ok(())
}

/// Show one order.
pub async fn show(storefront: &Storefront, id: &str) -> Result<(), ClientError> {
    let order = storefront.api().get_order(&OrderId::new(id)).await?;

    println!("Order {}", order.id);
    if let Some(user) = &order.user {
        println!("Placed by: {}", user.email);
    }

    if let Some(addr) = &order.shipping_address {
        println!(
            "Ship to:   {}, {}, {}, {}",
            addr.address, addr.city, addr.postal_code, addr.country
        );
    }
    if let Some(method) = order.payment_method {
        println!("Payment:   {method}");
    }

    if !order.order_items.is_empty() {
        println!("Items:");
        for item in &order.order_items {
            println!(
                "  {} x {:<32} {:>10}",
                item.qty,
                item.name,
                format_usd(item.price * rust_decimal::Decimal::from(item.qty)),
            );
        }
    }

    println!("Total:     {}", format_usd(order.total_price));
    match order.paid_at {
        Some(paid_at) if order.is_paid => println!("Paid at:   {paid_at}"),
        _ => println!("Not paid yet - `bf-cli orders pay {}`", order.id),
    }
    if order.is_delivered {
        println!("Delivered.");
    }

    Ok(())
}

/// Mark an order as paid.
pub async fn pay(storefront: &Storefront, id: &str) -> Result<(), ClientError> {
    storefront.api().pay_order(&OrderId::new(id)).await?;
    println!("Payment marked as successful!");
    Ok(())
}
