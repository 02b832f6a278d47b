//! # Shopify Price Watch server
//! This module hosts the server code for the price watch. It is responsible for:
//! * Listening for incoming `products/update` webhook requests from Shopify.
//! * Verifying the HMAC signature of every webhook call against the raw request body.
//! * Extracting the product's price and passing it to the [`price_watch_engine::PriceTrackerApi`], which emails an
//!   alert when the price has dropped by more than the configured threshold.
//!
//! ## Configuration
//! The server is configured via environment variables. See [config](config/index.html) for more information.
//!
//! ## Routes
//! The server exposes the following routes:
//! * `/`: A JSON description of the API.
//! * `/health`: A health check route that returns a 200 OK response.
//! * `/webhooks/products/update`: `POST` receives product update events from Shopify. `GET` returns the endpoint
//!   status. Any other method gets a 405.

pub mod cli;
pub mod config;
pub mod data_objects;
pub mod errors;
pub mod integrations;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod shopify_routes;

#[cfg(test)]
mod endpoint_tests;
