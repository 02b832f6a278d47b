use std::sync::Arc;

use chrono::{DateTime, SecondsFormat, Utc};
use graphql_parser::parse_query;
use log::*;
use reqwest::{
    header::{HeaderMap, HeaderValue},
    Client,
    Method,
};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;

use crate::{
    config::ShopifyConfig,
    data_objects::{Connection, OrderNode, OrderWithProduct, ProductDetail, ProductSummary},
    ShopifyApiError,
};

#[derive(Clone)]
pub struct ShopifyApi {
    config: ShopifyConfig,
    client: Arc<Client>,
}

const PRODUCTS_QUERY: &str = r#"
query listProducts($count: Int!) {
  products(first: $count) { edges { node { id title handle } } }
}"#;

const PRODUCT_QUERY: &str = r#"
query getProduct($id: ID!) {
  product(id: $id) { id title variants(first: 10) { edges { node { id price } } } }
}"#;

const ORDERS_WITH_PRODUCT_QUERY: &str = r#"
query getOrdersWithProduct($queryString: String!) {
  orders(first: 50, query: $queryString) {
    edges {
      node {
        id
        name
        customer { firstName lastName }
        lineItems(first: 50) { edges { node { product { id } title quantity } } }
      }
    }
  }
}"#;

impl ShopifyApi {
    pub fn new(config: ShopifyConfig) -> Result<Self, ShopifyApiError> {
        let mut headers = HeaderMap::with_capacity(2);
        let val = HeaderValue::from_str(config.admin_access_token.reveal().as_str())
            .map_err(|e| ShopifyApiError::Initialization(e.to_string()))?;
        headers.insert("X-Shopify-Access-Token", val);
        headers.insert("Content-Type", HeaderValue::from_static("application/json"));
        let client = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| ShopifyApiError::Initialization(e.to_string()))?;
        Ok(Self { config, client: Arc::new(client) })
    }

    pub async fn rest_query<T: DeserializeOwned, B: Serialize>(
        &self,
        method: Method,
        path: &str,
        params: &[(&str, &str)],
        body: Option<B>,
    ) -> Result<T, ShopifyApiError> {
        let url = self.url(path);
        trace!("Sending REST query: {url}");
        let mut req = self.client.request(method, url);
        if !params.is_empty() {
            req = req.query(params);
        }
        if let Some(body) = body {
            req = req.json(&body);
        }
        let response = req.send().await.map_err(|e| ShopifyApiError::RestResponseError(e.to_string()))?;
        if response.status().is_success() {
            trace!("REST query successful. {}", response.status());
            response.json::<T>().await.map_err(|e| ShopifyApiError::JsonError(e.to_string()))
        } else {
            let status = response.status().as_u16();
            let message = response.text().await.map_err(|e| ShopifyApiError::RestResponseError(e.to_string()))?;
            Err(ShopifyApiError::QueryError { status, message })
        }
    }

    pub async fn graphql_query<T: DeserializeOwned>(
        &self,
        query: &str,
        variables: Option<Value>,
    ) -> Result<T, ShopifyApiError> {
        let query = parse_query::<String>(query).map_err(|e| ShopifyApiError::InvalidGraphQL(e.to_string()))?;
        let mut body = serde_json::json!({
            "query": query.to_string(),
        });
        if let Some(vars) = variables {
            body["variables"] = vars;
        }
        trace!("Sending GraphQL query: {body}");
        let result = self.rest_query::<Value, Value>(Method::POST, "/graphql.json", &[], Some(body)).await?;
        if let Some(errors) = result["errors"].as_array() {
            let e = errors.iter().map(|e| e.to_string()).collect::<Vec<String>>().join(", ");
            return Err(ShopifyApiError::GraphQLError(e));
        }
        let data = result["data"].clone();
        let costs = result["extensions"]["cost"].clone();
        trace!("GraphQL response: {data}");
        trace!("GraphQL costs: {costs}");
        if data.is_null() {
            return Err(ShopifyApiError::EmptyResponse);
        }
        let result = serde_json::from_value(data).map_err(|e| ShopifyApiError::JsonError(e.to_string()))?;
        Ok(result)
    }

    pub fn url(&self, path: &str) -> String {
        format!("https://{}/admin/api/{}{path}", self.config.shop, self.config.api_version)
    }

    /// Fetches the first `count` products in the store.
    pub async fn fetch_products(&self, count: u64) -> Result<Vec<ProductSummary>, ShopifyApiError> {
        #[derive(Deserialize)]
        struct ProductsResponse {
            products: Connection<ProductSummary>,
        }
        debug!("Fetching the first {count} products");
        let variables = serde_json::json!({ "count": count });
        let result = self.graphql_query::<ProductsResponse>(PRODUCTS_QUERY, Some(variables)).await?;
        let products = result.products.into_nodes();
        info!("Fetched {} products", products.len());
        Ok(products)
    }

    /// Fetches a product, and the first 10 of its variants, by its GraphQL id (`gid://shopify/Product/{id}`).
    pub async fn fetch_product(&self, id: &str) -> Result<ProductDetail, ShopifyApiError> {
        #[derive(Deserialize)]
        struct ProductResponse {
            product: Option<ProductDetail>,
        }
        debug!("Fetching product {id}");
        let variables = serde_json::json!({ "id": id });
        let result = self.graphql_query::<ProductResponse>(PRODUCT_QUERY, Some(variables)).await?;
        result.product.ok_or(ShopifyApiError::EmptyResponse)
    }

    /// Fetches up to 50 orders created on or after `since` that contain the given product.
    pub async fn fetch_orders_with_product(
        &self,
        product_id: &str,
        since: DateTime<Utc>,
    ) -> Result<Vec<OrderWithProduct>, ShopifyApiError> {
        #[derive(Deserialize)]
        struct OrdersResponse {
            orders: Connection<OrderNode>,
        }
        let query_string = orders_with_product_filter(product_id, since);
        debug!("Fetching orders matching {query_string}");
        let variables = serde_json::json!({ "queryString": query_string });
        let result = self.graphql_query::<OrdersResponse>(ORDERS_WITH_PRODUCT_QUERY, Some(variables)).await?;
        let orders = result.orders.into_nodes().into_iter().map(OrderWithProduct::from).collect::<Vec<_>>();
        info!("Found {} orders containing product {product_id}", orders.len());
        Ok(orders)
    }
}

fn orders_with_product_filter(product_id: &str, since: DateTime<Utc>) -> String {
    let since = since.to_rfc3339_opts(SecondsFormat::Secs, true);
    format!("created_at:>='{since}' AND line_items.product_id:'{product_id}'")
}
