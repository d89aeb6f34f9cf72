//! Plain-text shipping and billing documents for customer orders.

use crate::sales::{Address, Customer, CustomerOrder, Money};
use chrono::NaiveDate;
use thiserror::Error;

/// Document generation errors.
#[derive(Debug, Error, PartialEq)]
pub enum DocumentError {
    #[error("order {0} has no shipping address configured")]
    MissingShippingAddress(String),
}

fn format_address(address: &Address) -> String {
    let instructions = address
        .instructions
        .as_deref()
        .map(|text| format!("\nInstrucciones: {text}"))
        .unwrap_or_default();
    format!(
        "{}\n{} {} ({})\n{}{}",
        address.street,
        address.postal_code,
        address.city,
        address.province,
        address.country,
        instructions
    )
}

fn format_money(money: &Money) -> String {
    format!(
        "{}{:.2} {}",
        money.currency.symbol, money.amount, money.currency.code
    )
}

/// Parcel label for the carrier.
pub fn shipping_label(customer: &Customer, ship_to: &Address) -> String {
    format!(
        "ETIQUETA DE ENVÍO\nCliente: {}\nDestino:\n{}\n",
        customer.name,
        format_address(ship_to)
    )
}

/// Delivery note (albarán) listing shippable lines.
pub fn delivery_note(order: &CustomerOrder) -> Result<String, DocumentError> {
    let ship_to = order
        .customer
        .shipping_address
        .as_ref()
        .ok_or_else(|| DocumentError::MissingShippingAddress(order.number.clone()))?;
    let lines: Vec<String> = order
        .lines
        .iter()
        .map(|line| format!("- {} | {} | {}", line.sku, line.description, line.quantity))
        .collect();
    Ok(format!(
        "ALBARÁN\nOrden: {}\nFecha: {}\nCliente: {}\nDirección envío:\n{}\nLíneas:\n{}\n",
        order.number,
        order.date,
        order.customer.name,
        format_address(ship_to),
        lines.join("\n")
    ))
}

/// Invoice with priced lines and the order total.
pub fn invoice(order: &CustomerOrder, issued_on: NaiveDate) -> String {
    let lines: Vec<String> = order
        .lines
        .iter()
        .map(|line| {
            format!(
                "- {}: {} x {}",
                line.description,
                line.quantity,
                format_money(&line.unit_price)
            )
        })
        .collect();
    format!(
        "FACTURA\nOrden: {}\nFecha emisión: {}\nCliente: {}\nLíneas:\n{}\nTotal: {}\n",
        order.number,
        issued_on,
        order.customer.name,
        lines.join("\n"),
        format_money(&order.total())
    )
}

/// Label, delivery note, and invoice for one order, in that order.
pub fn render_all(
    order: &CustomerOrder,
    issued_on: NaiveDate,
) -> Result<[String; 3], DocumentError> {
    let ship_to = order
        .customer
        .shipping_address
        .as_ref()
        .ok_or_else(|| DocumentError::MissingShippingAddress(order.number.clone()))?;
    Ok([
        shipping_label(&order.customer, ship_to),
        delivery_note(order)?,
        invoice(order, issued_on),
    ])
}
