//! GraphQL filter input types for list queries
//!
//! Operator-style filter objects, composed per entity into `*WhereInput`s:
//! - eq (exact match)
//! - contains, startsWith, endsWith (string matching, case-insensitive)
//! - gte, lte (range bounds)
//! - yearGte/yearLte, monthGte/monthLte (calendar parts of a timestamp)
//!
//! All fields are optional; present fields combine with AND. Each where
//! input converts into the matching repository filter struct.

use async_graphql::InputObject;
use rust_decimal::Decimal;

use crate::db::{CustomerFilter, OrderFilter, ProductFilter};

/// Filter for string fields
#[derive(InputObject, Default, Clone, Debug)]
pub struct StringFilter {
    /// Equals
    pub eq: Option<String>,
    /// Contains substring (case-insensitive)
    pub contains: Option<String>,
    /// Starts with (case-insensitive)
    pub starts_with: Option<String>,
    /// Ends with (case-insensitive)
    pub ends_with: Option<String>,
}

/// Range filter for integer fields
#[derive(InputObject, Default, Clone, Debug)]
pub struct IntRangeFilter {
    /// Greater than or equal
    pub gte: Option<i32>,
    /// Less than or equal
    pub lte: Option<i32>,
}

/// Range filter for decimal fields
#[derive(InputObject, Default, Clone, Debug)]
pub struct DecimalRangeFilter {
    /// Greater than or equal
    pub gte: Option<Decimal>,
    /// Less than or equal
    pub lte: Option<Decimal>,
}

/// Calendar-part bounds for timestamp fields
#[derive(InputObject, Default, Clone, Debug)]
pub struct DatePartsFilter {
    /// Year is greater than or equal
    pub year_gte: Option<i32>,
    /// Year is less than or equal
    pub year_lte: Option<i32>,
    /// Month (1-12) is greater than or equal
    pub month_gte: Option<i32>,
    /// Month (1-12) is less than or equal
    pub month_lte: Option<i32>,
}

/// Filter arguments for the allCustomers query
#[derive(InputObject, Default, Clone, Debug)]
pub struct CustomerWhereInput {
    pub name: Option<StringFilter>,
    pub email: Option<StringFilter>,
    pub created_at: Option<DatePartsFilter>,
    /// Case-insensitive regex matched against the phone, e.g. "^\\+1"
    pub phone_country_code: Option<String>,
}

/// Filter arguments for the allProducts query
#[derive(InputObject, Default, Clone, Debug)]
pub struct ProductWhereInput {
    pub name: Option<StringFilter>,
    pub price: Option<DecimalRangeFilter>,
    pub stock: Option<IntRangeFilter>,
}

/// Filter arguments for the allOrders query
#[derive(InputObject, Default, Clone, Debug)]
pub struct OrderWhereInput {
    pub total_amount: Option<DecimalRangeFilter>,
    pub order_date: Option<DatePartsFilter>,
    /// Matches against the owning customer's name
    pub customer_name: Option<StringFilter>,
    /// Matches orders containing at least one product with a matching name
    pub product_name: Option<StringFilter>,
}

impl StringFilter {
    /// Check if the filter has any conditions
    pub fn is_empty(&self) -> bool {
        self.eq.is_none()
            && self.contains.is_none()
            && self.starts_with.is_none()
            && self.ends_with.is_none()
    }
}

impl IntRangeFilter {
    /// Check if the filter has any conditions
    pub fn is_empty(&self) -> bool {
        self.gte.is_none() && self.lte.is_none()
    }
}

impl DecimalRangeFilter {
    /// Check if the filter has any conditions
    pub fn is_empty(&self) -> bool {
        self.gte.is_none() && self.lte.is_none()
    }
}

impl DatePartsFilter {
    /// Check if the filter has any conditions
    pub fn is_empty(&self) -> bool {
        self.year_gte.is_none()
            && self.year_lte.is_none()
            && self.month_gte.is_none()
            && self.month_lte.is_none()
    }
}

// ============================================================================
// Conversions into repository filters
// ============================================================================

impl CustomerWhereInput {
    pub fn into_filter(self) -> CustomerFilter {
        let mut filter = CustomerFilter::default();

        if let Some(name) = self.name.filter(|f| !f.is_empty()) {
            filter.name_eq = name.eq;
            filter.name_contains = name.contains;
            filter.name_starts_with = name.starts_with;
            filter.name_ends_with = name.ends_with;
        }
        if let Some(email) = self.email.filter(|f| !f.is_empty()) {
            filter.email_eq = email.eq;
            filter.email_contains = email.contains;
            filter.email_starts_with = email.starts_with;
            filter.email_ends_with = email.ends_with;
        }
        if let Some(created) = self.created_at.filter(|f| !f.is_empty()) {
            filter.created_year_gte = created.year_gte;
            filter.created_year_lte = created.year_lte;
            filter.created_month_gte = created.month_gte;
            filter.created_month_lte = created.month_lte;
        }
        filter.phone_pattern = self.phone_country_code;

        filter
    }
}

impl ProductWhereInput {
    pub fn into_filter(self) -> ProductFilter {
        let mut filter = ProductFilter::default();

        if let Some(name) = self.name.filter(|f| !f.is_empty()) {
            filter.name_eq = name.eq;
            filter.name_contains = name.contains;
            filter.name_starts_with = name.starts_with;
            filter.name_ends_with = name.ends_with;
        }
        if let Some(price) = self.price.filter(|f| !f.is_empty()) {
            filter.price_gte = price.gte;
            filter.price_lte = price.lte;
        }
        if let Some(stock) = self.stock.filter(|f| !f.is_empty()) {
            filter.stock_gte = stock.gte;
            filter.stock_lte = stock.lte;
        }

        filter
    }
}

impl OrderWhereInput {
    pub fn into_filter(self) -> OrderFilter {
        let mut filter = OrderFilter::default();

        if let Some(total) = self.total_amount.filter(|f| !f.is_empty()) {
            filter.total_gte = total.gte;
            filter.total_lte = total.lte;
        }
        if let Some(date) = self.order_date.filter(|f| !f.is_empty()) {
            filter.date_year_gte = date.year_gte;
            filter.date_year_lte = date.year_lte;
            filter.date_month_gte = date.month_gte;
            filter.date_month_lte = date.month_lte;
        }
        if let Some(customer_name) = self.customer_name.filter(|f| !f.is_empty()) {
            filter.customer_name_eq = customer_name.eq;
            filter.customer_name_contains = customer_name.contains;
            filter.customer_name_starts_with = customer_name.starts_with;
            filter.customer_name_ends_with = customer_name.ends_with;
        }
        if let Some(product_name) = self.product_name.filter(|f| !f.is_empty()) {
            filter.product_name_eq = product_name.eq;
            filter.product_name_contains = product_name.contains;
            filter.product_name_starts_with = product_name.starts_with;
            filter.product_name_ends_with = product_name.ends_with;
        }

        filter
    }
}
