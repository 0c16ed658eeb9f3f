//! GraphQL type definitions
//!
//! These types mirror the database records but are decorated with
//! async-graphql attributes.

use async_graphql::{InputObject, SimpleObject};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A customer
#[derive(Debug, Clone, SimpleObject, Serialize, Deserialize)]
pub struct Customer {
    /// Unique ID
    pub id: String,
    /// Full name
    pub name: String,
    /// Email address (unique across customers)
    pub email: String,
    /// Phone number (empty when not provided)
    pub phone: String,
    /// When the customer was created
    pub created_at: DateTime<Utc>,
}

/// A product
#[derive(Debug, Clone, SimpleObject, Serialize, Deserialize)]
pub struct Product {
    /// Unique ID
    pub id: String,
    /// Product name
    pub name: String,
    /// Unit price
    pub price: Decimal,
    /// Units in stock
    pub stock: i32,
}

/// An order placed by a customer
#[derive(Debug, Clone, SimpleObject, Serialize, Deserialize)]
pub struct Order {
    /// Unique ID
    pub id: String,
    /// The customer who placed the order
    pub customer: Customer,
    /// The ordered products
    pub products: Vec<Product>,
    /// When the order was placed
    pub order_date: DateTime<Utc>,
    /// Sum of the product prices at creation time
    pub total_amount: Decimal,
}

/// Input for creating a customer
#[derive(Debug, Clone, InputObject)]
pub struct CustomerInput {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
}

/// Input for creating a product
#[derive(Debug, Clone, InputObject)]
pub struct ProductInput {
    pub name: String,
    pub price: Decimal,
    /// Defaults to 0 when omitted
    pub stock: Option<i32>,
}

/// Input for creating an order
#[derive(Debug, Clone, InputObject)]
pub struct OrderInput {
    pub customer_id: String,
    pub product_ids: Vec<String>,
    /// Defaults to the current time when omitted
    pub order_date: Option<DateTime<Utc>>,
}

crate::define_connection!(CustomerConnection, CustomerEdge, Customer);
crate::define_connection!(ProductConnection, ProductEdge, Product);
crate::define_connection!(OrderConnection, OrderEdge, Order);

/// Result of creating a customer
#[derive(Debug, SimpleObject)]
pub struct CreateCustomerPayload {
    pub customer: Option<Customer>,
    pub message: String,
}

/// Result of a bulk customer import
#[derive(Debug, SimpleObject)]
pub struct BulkCreateCustomersPayload {
    /// Customers that were created
    pub customers: Vec<Customer>,
    /// One entry per failed record, e.g. "record 2: email 'b@x.com' is already in use"
    pub errors: Vec<String>,
    pub message: String,
}

/// Result of creating a product
#[derive(Debug, SimpleObject)]
pub struct CreateProductPayload {
    pub product: Option<Product>,
    pub message: String,
}

/// Result of creating an order
#[derive(Debug, SimpleObject)]
pub struct CreateOrderPayload {
    pub order: Option<Order>,
    pub message: String,
}
