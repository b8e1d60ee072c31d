//! Typed filter builders.
//!
//! Route handlers turn query strings into these structs; the stores turn them
//! into `WHERE` clauses (or in-memory predicates). Range bounds on the same
//! field merge instead of overwriting each other.

use db::models::offer_support_ticket::{TicketPriority, TicketStatus};
use db::models::offer_update_request::UpdateRequestStatus;
use sea_orm::sea_query::{Expr, Func, LikeExpr, SimpleExpr};
use sea_orm::{ColumnTrait, Condition, Value};

#[derive(Debug, Clone, Default)]
pub struct TicketFilter {
    pub offer_id: Option<i64>,
    pub trader_id: Option<i64>,
    /// Restricts results to tickets of these traders. `Some(vec![])` matches nothing.
    pub trader_ids: Option<Vec<i64>>,
    pub employee_id: Option<i64>,
    pub status: Option<TicketStatus>,
    pub priority: Option<TicketPriority>,
    pub query: Option<String>,
}

impl TicketFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_offer_id(mut self, offer_id: i64) -> Self {
        self.offer_id = Some(offer_id);
        self
    }

    pub fn with_trader_id(mut self, trader_id: i64) -> Self {
        self.trader_id = Some(trader_id);
        self
    }

    pub fn with_trader_ids(mut self, trader_ids: Vec<i64>) -> Self {
        self.trader_ids = Some(trader_ids);
        self
    }

    pub fn with_employee_id(mut self, employee_id: i64) -> Self {
        self.employee_id = Some(employee_id);
        self
    }

    pub fn with_status(mut self, status: TicketStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_priority(mut self, priority: TicketPriority) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn with_query(mut self, query: String) -> Self {
        self.query = non_blank(query);
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct UpdateRequestFilter {
    pub offer_id: Option<i64>,
    /// Restricts results to requests on these offers. `Some(vec![])` matches nothing.
    pub offer_ids: Option<Vec<i64>>,
    pub status: Option<UpdateRequestStatus>,
}

impl UpdateRequestFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_offer_id(mut self, offer_id: i64) -> Self {
        self.offer_id = Some(offer_id);
        self
    }

    pub fn with_offer_ids(mut self, offer_ids: Vec<i64>) -> Self {
        self.offer_ids = Some(offer_ids);
        self
    }

    pub fn with_status(mut self, status: UpdateRequestStatus) -> Self {
        self.status = Some(status);
        self
    }
}

/// Inclusive bounds on one column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangeFilter<T> {
    pub gte: Option<T>,
    pub lte: Option<T>,
}

impl<T> Default for RangeFilter<T> {
    fn default() -> Self {
        Self { gte: None, lte: None }
    }
}

impl<T: Copy + PartialOrd> RangeFilter<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn at_least(mut self, value: Option<T>) -> Self {
        if value.is_some() {
            self.gte = value;
        }
        self
    }

    pub fn at_most(mut self, value: Option<T>) -> Self {
        if value.is_some() {
            self.lte = value;
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.gte.is_none() && self.lte.is_none()
    }

    pub fn contains(&self, value: T) -> bool {
        self.gte.is_none_or(|min| value >= min) && self.lte.is_none_or(|max| value <= max)
    }

    pub fn apply<C>(&self, condition: Condition, column: C) -> Condition
    where
        C: ColumnTrait,
        T: Into<Value>,
    {
        let mut condition = condition;
        if let Some(min) = self.gte {
            condition = condition.add(column.gte(min));
        }
        if let Some(max) = self.lte {
            condition = condition.add(column.lte(max));
        }
        condition
    }
}

const LIKE_ESCAPE: char = '\\';

/// Case-insensitive substring match of `term` against any of `columns`.
/// `%` and `_` in the term match themselves.
pub fn contains_any<C>(term: &str, columns: &[C]) -> Condition
where
    C: ColumnTrait,
{
    let pattern = format!("%{}%", escape_like(&term.to_lowercase()));
    columns.iter().fold(Condition::any(), |cond, column| {
        cond.add(lower_like(*column, &pattern))
    })
}

fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for ch in term.chars() {
        if matches!(ch, '%' | '_') || ch == LIKE_ESCAPE {
            escaped.push(LIKE_ESCAPE);
        }
        escaped.push(ch);
    }
    escaped
}

fn lower_like<C: ColumnTrait>(column: C, pattern: &str) -> SimpleExpr {
    Expr::expr(Func::lower(Expr::col(column.as_column_ref())))
        .like(LikeExpr::new(pattern).escape(LIKE_ESCAPE))
}

/// In-memory counterpart of [`contains_any`].
pub fn text_matches(term: &str, haystacks: &[&str]) -> bool {
    let needle = term.to_lowercase();
    haystacks.iter().any(|h| h.to_lowercase().contains(&needle))
}

pub fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() { None } else { Some(trimmed.to_string()) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_bounds_merge() {
        let range = RangeFilter::new().at_least(Some(10.0)).at_most(Some(50.0));
        assert_eq!(range.gte, Some(10.0));
        assert_eq!(range.lte, Some(50.0));
        assert!(range.contains(10.0));
        assert!(range.contains(50.0));
        assert!(!range.contains(50.5));
    }

    #[test]
    fn absent_bound_keeps_existing_one() {
        let range = RangeFilter::new().at_least(Some(5)).at_least(None).at_most(None);
        assert_eq!(range.gte, Some(5));
        assert!(range.lte.is_none());
        assert!(!range.is_empty());
    }

    #[test]
    fn text_match_ignores_case() {
        assert!(text_matches("LAPTOP", &["Gaming laptop", "x"]));
        assert!(!text_matches("phone", &["Gaming laptop"]));
    }

    #[test]
    fn like_wildcards_are_escaped() {
        assert_eq!(escape_like("50%_off"), "50\\%\\_off");
        assert_eq!(escape_like("a\\b"), "a\\\\b");
        assert_eq!(escape_like("plain"), "plain");
    }

    #[test]
    fn blank_query_is_dropped() {
        assert!(TicketFilter::new().with_query("   ".into()).query.is_none());
        assert_eq!(
            TicketFilter::new().with_query(" late ".into()).query.as_deref(),
            Some("late")
        );
    }
}
