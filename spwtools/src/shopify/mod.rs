mod command_def;
mod command_handler;
mod formatting;

pub use command_def::{OrdersCommand, ProductsCommand, ShopifyCommand};
pub use command_handler::handle_shopify_command;
