//! Catalogue search, search history and saved searches.
//!
//! Every non-empty product or global query is written to `search_history`
//! with its result count; the popular-searches report reads it back grouped
//! by query text.

use chrono::{DateTime, TimeDelta, Utc};
use db::models::order::OrderStatus;
use db::models::{category, order, product, saved_search, search_history, vendor};
use sea_orm::ActiveValue::Set;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, ModelTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum::{Display, EnumString};
use tracing::{info, warn};
use util::paging::PageRequest;

use crate::actor::Actor;
use crate::error::{ServiceError, ServiceResult};
use crate::filters::{RangeFilter, contains_any, non_blank};

/// Results per entity in a global search.
pub const GLOBAL_RESULTS_PER_KIND: u64 = 5;

/// Default window of the popular-searches report, in days.
pub const POPULAR_WINDOW_DAYS: i64 = 30;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString, Deserialize)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum ProductSort {
    Price,
    #[default]
    CreatedAt,
    Name,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString, Deserialize)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

/// Who issued a search, for the history log.
#[derive(Debug, Clone, Default)]
pub struct SearchContext {
    pub actor: Option<Actor>,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct ProductSearch {
    pub query: Option<String>,
    pub category_id: Option<i64>,
    pub vendor_id: Option<i64>,
    pub price: RangeFilter<f64>,
    pub in_stock: Option<bool>,
    pub sort_by: ProductSort,
    pub sort_order: SortOrder,
}

#[derive(Debug, Clone, Default)]
pub struct VendorSearch {
    pub query: Option<String>,
    pub country: Option<String>,
    pub city: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct OrderSearch {
    pub query: Option<String>,
    pub status: Option<OrderStatus>,
    pub total: RangeFilter<f64>,
    pub created: RangeFilter<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalResults {
    pub query: String,
    pub products: Vec<product::Model>,
    pub categories: Vec<category::Model>,
    pub vendors: Vec<vendor::Model>,
    pub total: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PopularSearch {
    pub query: String,
    pub count: i64,
}

#[derive(Debug, Clone, Default)]
pub struct NewSavedSearch {
    pub name: String,
    pub query: String,
    pub filters: Option<Value>,
}

impl ProductSearch {
    fn condition(&self) -> Condition {
        let mut condition = Condition::all();
        if let Some(query) = &self.query {
            condition = condition.add(contains_any(
                query,
                &[product::Column::Name, product::Column::Description],
            ));
        }
        if let Some(category_id) = self.category_id {
            condition = condition.add(product::Column::CategoryId.eq(category_id));
        }
        if let Some(vendor_id) = self.vendor_id {
            condition = condition.add(product::Column::VendorId.eq(vendor_id));
        }
        condition = self.price.apply(condition, product::Column::Price);
        match self.in_stock {
            Some(true) => condition = condition.add(product::Column::Stock.gt(0)),
            Some(false) => condition = condition.add(product::Column::Stock.lte(0)),
            None => {}
        }
        condition
    }
}

impl VendorSearch {
    fn condition(&self) -> Condition {
        let mut condition = Condition::all();
        if let Some(query) = &self.query {
            condition = condition.add(contains_any(
                query,
                &[vendor::Column::Name, vendor::Column::CompanyName, vendor::Column::Email],
            ));
        }
        if let Some(country) = &self.country {
            condition = condition.add(vendor::Column::Country.eq(country.clone()));
        }
        if let Some(city) = &self.city {
            condition = condition.add(vendor::Column::City.eq(city.clone()));
        }
        condition
    }
}

impl OrderSearch {
    fn condition(&self) -> Condition {
        let mut condition = Condition::all();
        if let Some(query) = &self.query {
            condition = condition.add(contains_any(query, &[order::Column::OrderNumber]));
        }
        if let Some(status) = self.status {
            condition = condition.add(order::Column::Status.eq(status));
        }
        condition = self.total.apply(condition, order::Column::TotalAmount);
        self.created.apply(condition, order::Column::CreatedAt)
    }
}

fn category_condition(query: Option<&str>) -> Condition {
    match query {
        Some(query) => contains_any(query, &[category::Column::Name, category::Column::Description]),
        None => Condition::all(),
    }
}

fn actor_columns(actor: Option<&Actor>) -> (Option<i64>, Option<String>) {
    match actor {
        Some(actor) => (actor.id(), Some(actor.actor_type().to_string())),
        None => (None, None),
    }
}

pub struct SearchService {
    db: DatabaseConnection,
}

impl SearchService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Appends a history row. A failed write is logged and does not fail the
    /// search it belongs to.
    async fn record(&self, ctx: &SearchContext, query: &str, results_count: u64) {
        let (user_id, user_type) = actor_columns(ctx.actor.as_ref());
        let row = search_history::ActiveModel {
            query: Set(query.to_string()),
            results_count: Set(results_count as i64),
            user_id: Set(user_id),
            user_type: Set(user_type),
            ip_address: Set(ctx.ip_address.clone()),
            user_agent: Set(ctx.user_agent.clone()),
            created_at: Set(Utc::now()),
            ..Default::default()
        };
        if let Err(err) = row.insert(&self.db).await {
            warn!(error = %err, query, "Failed to record search history");
        }
    }

    pub async fn products(
        &self,
        search: &ProductSearch,
        page: PageRequest,
        ctx: &SearchContext,
    ) -> ServiceResult<(Vec<product::Model>, u64)> {
        let column = match search.sort_by {
            ProductSort::Price => product::Column::Price,
            ProductSort::CreatedAt => product::Column::CreatedAt,
            ProductSort::Name => product::Column::Name,
        };
        let select = product::Entity::find().filter(search.condition());
        let select = match search.sort_order {
            SortOrder::Asc => select.order_by_asc(column),
            SortOrder::Desc => select.order_by_desc(column),
        }
        .order_by_asc(product::Column::Id);

        let paginator = select.paginate(&self.db, page.take());
        let total = paginator.num_items().await?;
        let rows = paginator.fetch_page(page.page - 1).await?;

        if let Some(query) = &search.query {
            self.record(ctx, query, total).await;
        }
        Ok((rows, total))
    }

    pub async fn categories(&self, query: Option<&str>, page: PageRequest) -> ServiceResult<(Vec<category::Model>, u64)> {
        let paginator = category::Entity::find()
            .filter(category_condition(query))
            .order_by_asc(category::Column::Name)
            .paginate(&self.db, page.take());
        let total = paginator.num_items().await?;
        let rows = paginator.fetch_page(page.page - 1).await?;
        Ok((rows, total))
    }

    pub async fn vendors(&self, search: &VendorSearch, page: PageRequest) -> ServiceResult<(Vec<vendor::Model>, u64)> {
        let paginator = vendor::Entity::find()
            .filter(search.condition())
            .order_by_asc(vendor::Column::Name)
            .paginate(&self.db, page.take());
        let total = paginator.num_items().await?;
        let rows = paginator.fetch_page(page.page - 1).await?;
        Ok((rows, total))
    }

    pub async fn orders(&self, search: &OrderSearch, page: PageRequest) -> ServiceResult<(Vec<order::Model>, u64)> {
        let paginator = order::Entity::find()
            .filter(search.condition())
            .order_by_desc(order::Column::CreatedAt)
            .order_by_desc(order::Column::Id)
            .paginate(&self.db, page.take());
        let total = paginator.num_items().await?;
        let rows = paginator.fetch_page(page.page - 1).await?;
        Ok((rows, total))
    }

    /// Top matches of each catalogue kind for one query.
    pub async fn global(&self, query: Option<String>, ctx: &SearchContext) -> ServiceResult<GlobalResults> {
        let query = query
            .and_then(non_blank)
            .ok_or_else(|| ServiceError::validation("Search query is required"))?;

        let products = product::Entity::find()
            .filter(contains_any(&query, &[product::Column::Name, product::Column::Description]))
            .order_by_asc(product::Column::Name)
            .limit(GLOBAL_RESULTS_PER_KIND)
            .all(&self.db)
            .await?;
        let categories = category::Entity::find()
            .filter(category_condition(Some(query.as_str())))
            .order_by_asc(category::Column::Name)
            .limit(GLOBAL_RESULTS_PER_KIND)
            .all(&self.db)
            .await?;
        let vendors = vendor::Entity::find()
            .filter(contains_any(&query, &[vendor::Column::Name, vendor::Column::CompanyName]))
            .order_by_asc(vendor::Column::Name)
            .limit(GLOBAL_RESULTS_PER_KIND)
            .all(&self.db)
            .await?;

        let total = (products.len() + categories.len() + vendors.len()) as u64;
        self.record(ctx, &query, total).await;

        Ok(GlobalResults {
            query,
            products,
            categories,
            vendors,
            total,
        })
    }

    /// Most frequent queries, most frequent first. `days` of zero or less
    /// means all time; a window reaching past the calendar's range is a
    /// validation error.
    pub async fn popular(&self, limit: u64, days: Option<i64>) -> ServiceResult<Vec<PopularSearch>> {
        let days = days.unwrap_or(POPULAR_WINDOW_DAYS);
        let mut select = search_history::Entity::find()
            .select_only()
            .column(search_history::Column::Query)
            .column_as(search_history::Column::Id.count(), "count");
        if days > 0 {
            let since = TimeDelta::try_days(days)
                .and_then(|window| Utc::now().checked_sub_signed(window))
                .ok_or_else(|| ServiceError::validation(format!("Invalid days: {days}")))?;
            select = select.filter(search_history::Column::CreatedAt.gte(since));
        }

        let rows = select
            .group_by(search_history::Column::Query)
            .order_by_desc(search_history::Column::Id.count())
            .order_by_asc(search_history::Column::Query)
            .limit(limit)
            .into_tuple::<(String, i64)>()
            .all(&self.db)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(query, count)| PopularSearch { query, count })
            .collect())
    }

    /// The actor's own searches, newest first.
    pub async fn history(&self, actor: &Actor, limit: u64) -> ServiceResult<Vec<search_history::Model>> {
        let (user_id, user_type) = actor_columns(Some(actor));
        let mut condition = Condition::all().add(search_history::Column::UserType.eq(user_type));
        condition = match user_id {
            Some(id) => condition.add(search_history::Column::UserId.eq(id)),
            None => condition.add(search_history::Column::UserId.is_null()),
        };

        Ok(search_history::Entity::find()
            .filter(condition)
            .order_by_desc(search_history::Column::CreatedAt)
            .order_by_desc(search_history::Column::Id)
            .limit(limit)
            .all(&self.db)
            .await?)
    }

    fn owner(actor: &Actor) -> ServiceResult<(i64, String)> {
        let id = actor
            .id()
            .ok_or_else(|| ServiceError::validation("Saved searches need a user account"))?;
        Ok((id, actor.actor_type().to_string()))
    }

    pub async fn saved_searches(&self, actor: &Actor) -> ServiceResult<Vec<saved_search::Model>> {
        let (user_id, user_type) = Self::owner(actor)?;
        Ok(saved_search::Entity::find()
            .filter(saved_search::Column::UserId.eq(user_id))
            .filter(saved_search::Column::UserType.eq(user_type))
            .order_by_desc(saved_search::Column::CreatedAt)
            .all(&self.db)
            .await?)
    }

    pub async fn save_search(&self, actor: &Actor, input: NewSavedSearch) -> ServiceResult<saved_search::Model> {
        let (user_id, user_type) = Self::owner(actor)?;
        let name = non_blank(input.name).ok_or_else(|| ServiceError::validation("Name is required"))?;
        let query = non_blank(input.query).ok_or_else(|| ServiceError::validation("Query is required"))?;

        let saved = saved_search::ActiveModel {
            user_id: Set(user_id),
            user_type: Set(user_type),
            name: Set(name),
            query: Set(query),
            filters: Set(input.filters.filter(|f| !f.is_null())),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&self.db)
        .await?;

        info!(saved_search_id = saved.id, user_id, "Search saved");
        Ok(saved)
    }

    /// Deletes one of the actor's saved searches. Someone else's search is
    /// reported as missing.
    pub async fn delete_saved_search(&self, actor: &Actor, id: i64) -> ServiceResult<()> {
        let (user_id, user_type) = Self::owner(actor)?;
        let saved = saved_search::Entity::find_by_id(id)
            .filter(saved_search::Column::UserId.eq(user_id))
            .filter(saved_search::Column::UserType.eq(user_type))
            .one(&self.db)
            .await?
            .ok_or_else(|| ServiceError::not_found("Saved search not found"))?;

        saved.delete(&self.db).await?;
        info!(saved_search_id = id, user_id, "Saved search deleted");
        Ok(())
    }
}
