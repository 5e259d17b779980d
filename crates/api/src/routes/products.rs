//! Product route handlers.

use axum::extract::{Path, State};
use microshop_core::{Product, ProductId};
use serde::Serialize;
use tracing::instrument;

use crate::error::{AppError, Result, add_breadcrumb};
use crate::middleware::OptionalUser;
use crate::response::ApiResponse;
use crate::state::AppState;

/// The last segment of `/api/products/{category}/{segment}`.
///
/// All-digit segments address a product; anything else names a sub-category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProductSegment {
    Id(ProductId),
    SubCategory(String),
}

impl ProductSegment {
    /// Classify a path segment.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotFound` for an all-digit segment too large to be a
    /// product id.
    pub fn parse(segment: &str) -> Result<Self> {
        if !segment.is_empty() && segment.bytes().all(|b| b.is_ascii_digit()) {
            return segment
                .parse::<ProductId>()
                .map(Self::Id)
                .map_err(|_| AppError::NotFound("Product not found".to_string()));
        }

        Ok(Self::SubCategory(segment.to_string()))
    }
}

/// Either a single product or a sub-category listing.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum SegmentData {
    Product(Product),
    Products(Vec<Product>),
}

/// All products, in menu order.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> ApiResponse<Vec<Product>> {
    ApiResponse::ok(state.catalog().get_all().cloned().collect())
}

/// Products of one main category. Unknown categories yield an empty list.
#[instrument(skip(state))]
pub async fn by_category(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> ApiResponse<Vec<Product>> {
    ApiResponse::ok(state.catalog().get_by_category(&category).to_vec())
}

/// A product by id, or a sub-category listing.
///
/// Viewing a product counts towards the shopper's interests.
#[instrument(skip(state, user))]
pub async fn by_segment(
    State(state): State<AppState>,
    OptionalUser(user): OptionalUser,
    Path((category, segment)): Path<(String, String)>,
) -> Result<ApiResponse<SegmentData>> {
    let data = match ProductSegment::parse(&segment)? {
        ProductSegment::Id(id) => {
            let product = state
                .catalog()
                .get_by_category_and_id(&category, id)
                .ok_or_else(|| AppError::NotFound("Product not found".to_string()))?;

            state.interests().track_view(user.as_ref(), id).await;
            add_breadcrumb(
                "navigation",
                "Viewed product",
                &[("product_id", &id.to_string()), ("category", &category)],
            );

            SegmentData::Product(product.clone())
        }
        ProductSegment::SubCategory(sub_category) => SegmentData::Products(
            state
                .catalog()
                .get_by_category_and_sub_category(&category, &sub_category)
                .into_iter()
                .cloned()
                .collect(),
        ),
    };

    Ok(ApiResponse::ok(data))
}
