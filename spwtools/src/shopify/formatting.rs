use prettytable::{
    format::{LinePosition, LineSeparator, TableFormat},
    row,
    Table,
};
use shopify_tools::data_objects::{OrderWithProduct, ProductDetail, ProductSummary};

fn markdown_format() -> TableFormat {
    prettytable::format::FormatBuilder::new()
        .column_separator('|')
        .borders('|')
        .separator(LinePosition::Title, LineSeparator::new('-', '|', '|', '|'))
        .padding(1, 1)
        .build()
}

fn markdown_style(table: &mut Table) {
    table.set_format(markdown_format());
}

pub fn format_products(products: &[ProductSummary]) -> String {
    if products.is_empty() {
        return "No products".to_string();
    }
    let mut table = Table::new();
    table.set_titles(row!["ID", "Title", "Handle"]);
    products.iter().for_each(|p| {
        table.add_row(row![p.id, p.title, p.handle]);
    });
    markdown_style(&mut table);
    table.to_string()
}

pub fn format_product_detail(product: &ProductDetail) -> String {
    let mut table = Table::new();
    table.set_titles(row!["Variant ID", "Price"]);
    product.variants.edges.iter().for_each(|e| {
        table.add_row(row![e.node.id, e.node.price]);
    });
    markdown_style(&mut table);
    format!("{} ({})\n{table}", product.title, product.id)
}

pub fn format_orders_with_product(orders: &[OrderWithProduct]) -> String {
    if orders.is_empty() {
        return "No orders found".to_string();
    }
    let mut table = Table::new();
    table.set_titles(row!["Order", "Order ID", "Customer", "Items"]);
    orders.iter().for_each(|order| {
        let items = order.items.iter().map(|i| format!("{} x {}", i.quantity, i.title)).collect::<Vec<_>>().join("\n");
        table.add_row(row![order.order_name, order.order_id, order.customer_name, items]);
    });
    markdown_style(&mut table);
    table.to_string()
}
