// Helper functions shared across GraphQL query/mutation modules.

use std::collections::HashMap;

use rust_decimal::Decimal;

use crate::db::{CustomerRecord, OrderProductRow, OrderRecord, ProductRecord};
use crate::graphql::types::{Customer, Order, Product};

/// Convert a CustomerRecord from the database to a GraphQL Customer type
pub(crate) fn customer_record_to_graphql(r: CustomerRecord) -> Customer {
    Customer {
        id: r.id.to_string(),
        name: r.name,
        email: r.email,
        phone: r.phone,
        created_at: r.created_at,
    }
}

/// Convert a ProductRecord from the database to a GraphQL Product type
pub(crate) fn product_record_to_graphql(r: ProductRecord) -> Product {
    Product {
        id: r.id.to_string(),
        name: r.name,
        price: r.price,
        stock: r.stock,
    }
}

/// Convert an OrderRecord plus its loaded relations to a GraphQL Order type
pub(crate) fn order_record_to_graphql(
    r: OrderRecord,
    customer: Customer,
    products: Vec<Product>,
) -> Order {
    Order {
        id: r.id.to_string(),
        customer,
        products,
        order_date: r.order_date,
        total_amount: r.total_amount,
    }
}

/// Sum the prices of the resolved products for an order
///
/// Every occurrence counts: an id listed twice contributes its price twice.
pub(crate) fn order_total(products: &[ProductRecord]) -> Decimal {
    products.iter().map(|p| p.price).sum()
}

/// Group eager-loaded association rows into per-order product lists
pub(crate) fn group_order_products(rows: Vec<OrderProductRow>) -> HashMap<i64, Vec<Product>> {
    let mut by_order: HashMap<i64, Vec<Product>> = HashMap::new();
    for row in rows {
        by_order.entry(row.order_id).or_default().push(Product {
            id: row.id.to_string(),
            name: row.name,
            price: row.price,
            stock: row.stock,
        });
    }
    by_order
}
