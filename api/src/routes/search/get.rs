//! Catalogue search handlers.

use axum::{
    Extension, Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use db::models::order::OrderStatus;
use services::Actor;
use services::filters::{RangeFilter, non_blank};
use services::search_service::{
    OrderSearch, ProductSearch, ProductSort, SearchContext, SortOrder, VendorSearch,
};
use util::state::AppState;

use crate::extract::QueryParams;
use crate::response::{ApiResponse, PaginatedResponse, bad_request, service_error};
use crate::routes::common::{page_request, parse_optional, search_service};
use crate::routes::search::common::{
    CategoryParams, DayEdge, GlobalParams, HistoryParams, OrderParams, PopularParams, ProductParams,
    VendorParams, parse_date_bound,
};

const DEFAULT_POPULAR_LIMIT: u64 = 10;
const DEFAULT_HISTORY_LIMIT: u64 = 20;

/// GET /api/search/products
///
/// ### Query Parameters
/// - `q` → matched case-insensitively against name and description
/// - `categoryId`, `vendorId`
/// - `minPrice`, `maxPrice` → inclusive bounds
/// - `inStock` → `true` for stock above zero, `false` for sold out
/// - `sortBy` → `price`, `createdAt` (default) or `name`
/// - `sortOrder` → `asc` or `desc` (default)
/// - `page`, `limit`
///
/// A non-empty `q` is recorded in the search history with its result count.
pub async fn search_products(
    State(app_state): State<AppState>,
    Extension(ctx): Extension<SearchContext>,
    QueryParams(params): QueryParams<ProductParams>,
) -> Response {
    let sort_by = match parse_optional::<ProductSort>(params.sort_by.as_deref(), "sortBy") {
        Ok(sort_by) => sort_by.unwrap_or_default(),
        Err(response) => return response,
    };
    let sort_order = match parse_optional::<SortOrder>(params.sort_order.as_deref(), "sortOrder") {
        Ok(sort_order) => sort_order.unwrap_or_default(),
        Err(response) => return response,
    };

    let search = ProductSearch {
        query: params.q.and_then(non_blank),
        category_id: params.category_id,
        vendor_id: params.vendor_id,
        price: RangeFilter::new()
            .at_least(params.min_price)
            .at_most(params.max_price),
        in_stock: params.in_stock,
        sort_by,
        sort_order,
    };
    let page = page_request(params.page, params.limit);

    match search_service(&app_state).products(&search, page, &ctx).await {
        Ok((products, total)) => (
            StatusCode::OK,
            Json(PaginatedResponse::new(products, page, total, "Products retrieved successfully")),
        )
            .into_response(),
        Err(e) => service_error(e, "Failed to search products"),
    }
}

/// GET /api/search/categories
pub async fn search_categories(
    State(app_state): State<AppState>,
    QueryParams(params): QueryParams<CategoryParams>,
) -> Response {
    let query = params.q.and_then(non_blank);
    let page = page_request(params.page, params.limit);

    match search_service(&app_state).categories(query.as_deref(), page).await {
        Ok((categories, total)) => (
            StatusCode::OK,
            Json(PaginatedResponse::new(
                categories,
                page,
                total,
                "Categories retrieved successfully",
            )),
        )
            .into_response(),
        Err(e) => service_error(e, "Failed to search categories"),
    }
}

/// GET /api/search/vendors
///
/// `q` matches name, company name or email; `country` and `city` are exact.
pub async fn search_vendors(
    State(app_state): State<AppState>,
    QueryParams(params): QueryParams<VendorParams>,
) -> Response {
    let search = VendorSearch {
        query: params.q.and_then(non_blank),
        country: params.country.and_then(non_blank),
        city: params.city.and_then(non_blank),
    };
    let page = page_request(params.page, params.limit);

    match search_service(&app_state).vendors(&search, page).await {
        Ok((vendors, total)) => (
            StatusCode::OK,
            Json(PaginatedResponse::new(vendors, page, total, "Vendors retrieved successfully")),
        )
            .into_response(),
        Err(e) => service_error(e, "Failed to search vendors"),
    }
}

/// GET /api/search/orders
///
/// Staff only. `q` matches the order number; `dateFrom`/`dateTo` accept RFC
/// 3339 timestamps or `YYYY-MM-DD`.
pub async fn search_orders(
    State(app_state): State<AppState>,
    QueryParams(params): QueryParams<OrderParams>,
) -> Response {
    let status = match parse_optional::<OrderStatus>(params.status.as_deref(), "status") {
        Ok(status) => status,
        Err(response) => return response,
    };

    let date_from = match params.date_from.as_deref().filter(|s| !s.trim().is_empty()) {
        None => None,
        Some(raw) => match parse_date_bound(raw, DayEdge::Start) {
            Some(ts) => Some(ts),
            None => return bad_request(format!("Invalid dateFrom: {raw}")),
        },
    };
    let date_to = match params.date_to.as_deref().filter(|s| !s.trim().is_empty()) {
        None => None,
        Some(raw) => match parse_date_bound(raw, DayEdge::End) {
            Some(ts) => Some(ts),
            None => return bad_request(format!("Invalid dateTo: {raw}")),
        },
    };

    let search = OrderSearch {
        query: params.q.and_then(non_blank),
        status,
        total: RangeFilter::new()
            .at_least(params.min_total)
            .at_most(params.max_total),
        created: RangeFilter::new().at_least(date_from).at_most(date_to),
    };
    let page = page_request(params.page, params.limit);

    match search_service(&app_state).orders(&search, page).await {
        Ok((orders, total)) => (
            StatusCode::OK,
            Json(PaginatedResponse::new(orders, page, total, "Orders retrieved successfully")),
        )
            .into_response(),
        Err(e) => service_error(e, "Failed to search orders"),
    }
}

/// GET /api/search/global?q=...
///
/// Top five products, categories and vendors for one query. `q` is required.
pub async fn search_global(
    State(app_state): State<AppState>,
    Extension(ctx): Extension<SearchContext>,
    QueryParams(params): QueryParams<GlobalParams>,
) -> Response {
    match search_service(&app_state).global(params.q, &ctx).await {
        Ok(results) => (
            StatusCode::OK,
            Json(ApiResponse::success(results, "Search completed successfully")),
        )
            .into_response(),
        Err(e) => service_error(e, "Failed to run search"),
    }
}

/// GET /api/search/popular?limit&days
pub async fn popular_searches(
    State(app_state): State<AppState>,
    QueryParams(params): QueryParams<PopularParams>,
) -> Response {
    let limit = params.limit.unwrap_or(DEFAULT_POPULAR_LIMIT).clamp(1, 100);

    match search_service(&app_state).popular(limit, params.days).await {
        Ok(popular) => (
            StatusCode::OK,
            Json(ApiResponse::success(popular, "Popular searches retrieved successfully")),
        )
            .into_response(),
        Err(e) => service_error(e, "Failed to retrieve popular searches"),
    }
}

/// GET /api/search/history?limit
///
/// The caller's own searches, newest first.
pub async fn search_history(
    State(app_state): State<AppState>,
    Extension(actor): Extension<Actor>,
    QueryParams(params): QueryParams<HistoryParams>,
) -> Response {
    let limit = params.limit.unwrap_or(DEFAULT_HISTORY_LIMIT).clamp(1, 100);

    match search_service(&app_state).history(&actor, limit).await {
        Ok(history) => (
            StatusCode::OK,
            Json(ApiResponse::success(history, "Search history retrieved successfully")),
        )
            .into_response(),
        Err(e) => service_error(e, "Failed to retrieve search history"),
    }
}

/// GET /api/search/saved
pub async fn list_saved_searches(
    State(app_state): State<AppState>,
    Extension(actor): Extension<Actor>,
) -> Response {
    match search_service(&app_state).saved_searches(&actor).await {
        Ok(saved) => (
            StatusCode::OK,
            Json(ApiResponse::success(saved, "Saved searches retrieved successfully")),
        )
            .into_response(),
        Err(e) => service_error(e, "Failed to retrieve saved searches"),
    }
}
