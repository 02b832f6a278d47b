//! Response objects for the Admin GraphQL queries issued by [`crate::ShopifyApi`].
use serde::{Deserialize, Serialize};

/// A GraphQL connection. We never page past the first batch, so `pageInfo` is not requested.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Connection<T> {
    pub edges: Vec<Edge<T>>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Edge<T> {
    pub node: T,
}

impl<T> Connection<T> {
    pub fn into_nodes(self) -> Vec<T> {
        self.edges.into_iter().map(|e| e.node).collect()
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProductSummary {
    pub id: String,
    pub title: String,
    pub handle: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProductDetail {
    pub id: String,
    pub title: String,
    pub variants: Connection<VariantNode>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct VariantNode {
    pub id: String,
    pub price: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderNode {
    pub id: String,
    pub name: String,
    pub customer: Option<CustomerNode>,
    pub line_items: Connection<LineItemNode>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerNode {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LineItemNode {
    pub product: Option<ProductRef>,
    pub title: String,
    pub quantity: i64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProductRef {
    pub id: String,
}

/// A flattened view of an order that contains a given product.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct OrderWithProduct {
    pub order_id: String,
    pub order_name: String,
    pub customer_name: String,
    pub items: Vec<OrderItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct OrderItem {
    pub title: String,
    pub quantity: i64,
}

impl CustomerNode {
    pub fn full_name(&self) -> String {
        let first = self.first_name.as_deref().unwrap_or_default();
        let last = self.last_name.as_deref().unwrap_or_default();
        format!("{first} {last}").trim().to_string()
    }
}

impl From<OrderNode> for OrderWithProduct {
    fn from(order: OrderNode) -> Self {
        let customer_name = order.customer.as_ref().map(CustomerNode::full_name).unwrap_or_else(|| "Guest".into());
        let items = order
            .line_items
            .into_nodes()
            .into_iter()
            .map(|item| OrderItem { title: item.title, quantity: item.quantity })
            .collect();
        Self { order_id: order.id, order_name: order.name, customer_name, items }
    }
}
