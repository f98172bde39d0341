//! Product catalog endpoints.

use serde::Serialize;
use tracing::{debug, instrument};

use bramblefig_core::{ProductId, ReviewId};

use crate::models::{CategoryList, Product, ProductPage};

use super::{ApiError, CacheValue, ShopApi};

/// Query parameters for the product list endpoint.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProductQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keyword: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

impl ProductQuery {
    /// A plain page fetch with no search filters.
    #[must_use]
    pub const fn page(page: u32) -> Self {
        Self {
            page: Some(page),
            keyword: None,
            category: None,
            limit: None,
        }
    }

    const fn is_filtered(&self) -> bool {
        self.keyword.is_some() || self.category.is_some()
    }
}

/// New review payload for `POST products/{id}/reviews/`.
#[derive(Debug, Clone, Serialize)]
pub struct NewReview {
    pub rating: u32,
    pub comment: String,
}

impl ShopApi {
    /// Get a paginated product listing.
    ///
    /// Unfiltered pages are cached; keyword/category searches always go to
    /// the backend.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn list_products(&self, query: &ProductQuery) -> Result<ProductPage, ApiError> {
        let cache_key = format!(
            "products:{}:{}",
            query.page.unwrap_or(1),
            query.limit.map_or_else(String::new, |l| l.to_string()),
        );

        if !query.is_filtered()
            && let Some(CacheValue::Page(page)) = self.cache_get(&cache_key).await
        {
            debug!("cache hit for product page");
            return Ok(page);
        }

        let page: ProductPage = self.get_json_with_query("products/", query).await?;

        if !query.is_filtered() {
            self.cache_put(cache_key, CacheValue::Page(page.clone()))
                .await;
        }

        Ok(page)
    }

    /// Get a single product by id, reviews included.
    ///
    /// # Errors
    ///
    /// Returns an error if the product is not found or the request fails.
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub async fn get_product(&self, product_id: &ProductId) -> Result<Product, ApiError> {
        let cache_key = product_cache_key(product_id);

        if let Some(CacheValue::Product(product)) = self.cache_get(&cache_key).await {
            debug!("cache hit for product");
            return Ok(*product);
        }

        let product: Product = self.get_json(&format!("products/{product_id}/")).await?;

        self.cache_put(cache_key, CacheValue::Product(Box::new(product.clone())))
            .await;

        Ok(product)
    }

    /// Get the distinct category names.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn list_categories(&self) -> Result<Vec<String>, ApiError> {
        let list: CategoryList = self.get_json("products/categories/").await?;
        Ok(list.categories)
    }

    /// Submit a review for a product. Requires a session.
    ///
    /// The cached product is invalidated so the next read sees the fresh
    /// review list.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the session is rejected.
    #[instrument(skip(self, review), fields(product_id = %product_id))]
    pub async fn create_review(
        &self,
        product_id: &ProductId,
        review: &NewReview,
    ) -> Result<(), ApiError> {
        self.post_unit(&format!("products/{product_id}/reviews/"), review)
            .await?;

        self.invalidate_cached_product(&product_cache_key(product_id))
            .await;

        Ok(())
    }

    /// Delete a review from a product. Requires a session.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the session is rejected.
    #[instrument(skip(self), fields(product_id = %product_id, review_id = %review_id))]
    pub async fn delete_review(
        &self,
        product_id: &ProductId,
        review_id: &ReviewId,
    ) -> Result<(), ApiError> {
        self.delete_unit(&format!("products/{product_id}/reviews/{review_id}/"))
            .await?;

        self.invalidate_cached_product(&product_cache_key(product_id))
            .await;

        Ok(())
    }
}

fn product_cache_key(product_id: &ProductId) -> String {
    format!("product:{product_id}")
}
