//! Catalog browsing commands.

use bramblefig_client::api::{NewReview, ProductQuery};
use bramblefig_client::error::ClientError;
use bramblefig_client::state::Storefront;
use bramblefig_core::{ProductId, ReviewId, format_usd};

/// List products, optionally filtered by keyword/category.
pub async fn list(
    storefront: &Storefront,
    page: u32,
    keyword: Option<String>,
    category: Option<String>,
    limit: Option<u32>,
) -> Result<(), ClientError> {
    let query = ProductQuery {
        page: Some(page),
        keyword,
        category,
        limit,
    };

    let listing = storefront.api().list_products(&query).await?;

    if listing.products.is_empty() {
        println!("No products found.");
        return Ok(());
    }

    println!(
        "{:<10} {:<32} {:>10} {:>7} {:>6}",
        "ID", "NAME", "PRICE", "RATING", "STOCK"
    );
    for product in &listing.products {
        let favorite = if storefront.favorites().is_favorite(&product.id) {
            " *"
        } else {
            ""
        };
        println!(
            "{:<10} {:<32} {:>10} {:>7.1} {:>6}{favorite}",
            product.id.to_string(),
            truncate(&product.name, 32),
            format_usd(product.price),
            product.rating,
            product.count_in_stock,
        );
    }
    println!("\nPage {} of {}", listing.page, listing.pages);

    Ok(())
}

/// Show one product in full, reviews included.
pub async fn show(storefront: &Storefront, id: &str) -> Result<(), ClientError> {
    let product = storefront.api().get_product(&ProductId::new(id)).await?;

    println!("{} ({})", product.name, product.id);
    if let Some(brand) = &product.brand {
        println!("Brand:    {brand}");
    }
    if let Some(category) = &product.category {
        println!("Category: {category}");
    }
    print!("Price:    {}", format_usd(product.price));
    if let Some(old_price) = product.old_price {
        print!("  (was {})", format_usd(old_price));
    }
    println!();
    println!(
        "Rating:   {:.1} ({} reviews)",
        product.rating, product.num_reviews
    );
    println!(
        "Stock:    {}",
        if product.in_stock() {
            product.count_in_stock.to_string()
        } else {
            "out of stock".to_owned()
        }
    );
    if let Some(description) = &product.description {
        println!("\n{description}");
    }

    if !product.reviews.is_empty() {
        println!("\nReviews:");
        for review in &product.reviews {
            println!("  [{}] {}/5 by {}", review.id, review.rating, review.name);
            println!("      {}", review.comment);
        }
    }

    Ok(())
}

/// List the distinct catalog categories.
pub async fn categories(storefront: &Storefront) -> Result<(), ClientError> {
    let categories = storefront.api().list_categories().await?;

    if categories.is_empty() {
        println!("No categories.");
    }
    for category in categories {
        println!("{category}");
    }

    Ok(())
}

/// Submit a review for a product.
pub async fn review(
    storefront: &Storefront,
    id: &str,
    rating: u32,
    comment: String,
) -> Result<(), ClientError> {
    storefront
        .api()
        .create_review(&ProductId::new(id), &NewReview { rating, comment })
        .await?;

    println!("Review submitted successfully!");
    Ok(())
}

/// Delete one of your reviews from a product.
pub async fn delete_review(
    storefront: &Storefront,
    id: &str,
    review_id: &str,
) -> Result<(), ClientError> {
    storefront
        .api()
        .delete_review(&ProductId::new(id), &ReviewId::new(review_id))
        .await?;

    println!("Review deleted successfully!");
    Ok(())
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_owned()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{cut}…")
    }
}
