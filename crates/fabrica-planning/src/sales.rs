//! Rich customer and order model backing the sales documents.
//!
//! The dashboard's flat `SalesOrder` carries only the numbers the tables
//! need; invoicing and shipping want full customer records, priced lines,
//! and currency-checked money arithmetic.

use chrono::NaiveDate;
use fabrica_core::OrderStatus;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Currency code plus the symbol printed on documents.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Currency {
    pub code: String,
    pub symbol: String,
}

impl Currency {
    pub fn eur() -> Self {
        Self {
            code: "EUR".to_string(),
            symbol: "€".to_string(),
        }
    }
}

/// Money arithmetic errors.
#[derive(Debug, Error, PartialEq)]
pub enum MoneyError {
    #[error("cannot combine amounts in {left} and {right}")]
    CurrencyMismatch { left: String, right: String },
}

/// An amount in a concrete currency.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Money {
    pub amount: Decimal,
    pub currency: Currency,
}

impl Money {
    pub fn new(amount: Decimal, currency: Currency) -> Self {
        Self { amount, currency }
    }

    pub fn zero(currency: Currency) -> Self {
        Self::new(Decimal::ZERO, currency)
    }

    /// Add two amounts; mixing currencies is an error.
    pub fn add(&self, other: &Money) -> Result<Money, MoneyError> {
        if self.currency != other.currency {
            return Err(MoneyError::CurrencyMismatch {
                left: self.currency.code.clone(),
                right: other.currency.code.clone(),
            });
        }
        Ok(Money::new(self.amount + other.amount, self.currency.clone()))
    }

    pub fn scale(&self, factor: Decimal) -> Money {
        Money::new(self.amount * factor, self.currency.clone())
    }
}

/// A person at the customer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub role: Option<String>,
}

/// Postal address, with optional delivery instructions.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub street: String,
    pub city: String,
    pub province: String,
    pub postal_code: String,
    pub country: String,
    pub instructions: Option<String>,
}

/// Agreed payment conditions.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CommercialTerms {
    pub payment_method: String,
    pub payment_days: u16,
    pub discount_pct: Decimal,
    pub notes: Option<String>,
}

/// A customer with full contact and delivery details.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub id: String,
    pub name: String,
    pub contacts: Vec<Contact>,
    pub addresses: Vec<Address>,
    pub terms: Option<CommercialTerms>,
    pub shipping_address: Option<Address>,
}

/// One priced order line.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OrderLine {
    pub sku: String,
    pub description: String,
    pub quantity: u32,
    pub unit_price: Money,
}

impl OrderLine {
    pub fn total(&self) -> Money {
        self.unit_price.scale(Decimal::from(self.quantity))
    }
}

/// Errors building an order.
#[derive(Debug, Error, PartialEq)]
pub enum OrderError {
    #[error("line currency {line} does not match order currency {order}")]
    LineCurrencyMismatch { line: String, order: String },
}

/// A customer order with priced lines, all in the order's currency.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CustomerOrder {
    pub number: String,
    pub customer: Customer,
    pub currency: Currency,
    pub date: NaiveDate,
    pub status: OrderStatus,
    pub lines: Vec<OrderLine>,
}

impl CustomerOrder {
    pub fn new(
        number: impl Into<String>,
        customer: Customer,
        currency: Currency,
        date: NaiveDate,
    ) -> Self {
        Self {
            number: number.into(),
            customer,
            currency,
            date,
            status: OrderStatus::Pending,
            lines: Vec::new(),
        }
    }

    /// Append a line; its price must be in the order's currency.
    pub fn add_line(&mut self, line: OrderLine) -> Result<(), OrderError> {
        if line.unit_price.currency != self.currency {
            return Err(OrderError::LineCurrencyMismatch {
                line: line.unit_price.currency.code.clone(),
                order: self.currency.code.clone(),
            });
        }
        self.lines.push(line);
        Ok(())
    }

    /// Order total. Lines share the order currency by construction.
    pub fn total(&self) -> Money {
        let amount = self.lines.iter().map(|line| line.total().amount).sum();
        Money::new(amount, self.currency.clone())
    }

    pub fn set_status(&mut self, status: OrderStatus) {
        self.status = status;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn usd() -> Currency {
        Currency {
            code: "USD".to_string(),
            symbol: "$".to_string(),
        }
    }

    fn casa_urbana() -> Customer {
        Customer {
            id: "CL-001".to_string(),
            name: "Casa Urbana".to_string(),
            contacts: vec![Contact {
                name: "Marta Gil".to_string(),
                email: Some("compras@casaurbana.example".to_string()),
                phone: None,
                role: Some("Compras".to_string()),
            }],
            addresses: vec![],
            terms: Some(CommercialTerms {
                payment_method: "transferencia".to_string(),
                payment_days: 30,
                discount_pct: Decimal::ZERO,
                notes: None,
            }),
            shipping_address: Some(Address {
                street: "C/ Mayor 12".to_string(),
                city: "Madrid".to_string(),
                province: "Madrid".to_string(),
                postal_code: "28013".to_string(),
                country: "España".to_string(),
                instructions: Some("Muelle 2, mañanas".to_string()),
            }),
        }
    }

    fn order_with_lines() -> CustomerOrder {
        let mut order = CustomerOrder::new(
            "PD-311",
            casa_urbana(),
            Currency::eur(),
            NaiveDate::from_ymd_opt(2026, 1, 9).unwrap(),
        );
        order
            .add_line(OrderLine {
                sku: "MX-100".to_string(),
                description: "Silla MX-100".to_string(),
                quantity: 30,
                unit_price: Money::new(Decimal::new(180, 0), Currency::eur()),
            })
            .unwrap();
        order
            .add_line(OrderLine {
                sku: "CJ-14".to_string(),
                description: "Cojín a juego".to_string(),
                quantity: 30,
                unit_price: Money::new(Decimal::new(2150, 2), Currency::eur()),
            })
            .unwrap();
        order
    }

    #[test]
    fn money_addition_requires_matching_currency() {
        let a = Money::new(Decimal::new(100, 0), Currency::eur());
        let b = Money::new(Decimal::new(50, 0), Currency::eur());
        assert_eq!(a.add(&b).unwrap().amount, Decimal::new(150, 0));

        let c = Money::new(Decimal::new(50, 0), usd());
        assert_eq!(
            a.add(&c),
            Err(MoneyError::CurrencyMismatch {
                left: "EUR".to_string(),
                right: "USD".to_string(),
            })
        );
    }

    #[test]
    fn line_total_scales_by_quantity() {
        let line = OrderLine {
            sku: "MX-100".to_string(),
            description: "Silla MX-100".to_string(),
            quantity: 30,
            unit_price: Money::new(Decimal::new(180, 0), Currency::eur()),
        };
        assert_eq!(line.total().amount, Decimal::new(5400, 0));
    }

    #[test]
    fn foreign_currency_lines_are_rejected() {
        let mut order = CustomerOrder::new(
            "PD-900",
            casa_urbana(),
            Currency::eur(),
            NaiveDate::from_ymd_opt(2026, 1, 9).unwrap(),
        );
        let result = order.add_line(OrderLine {
            sku: "MX-100".to_string(),
            description: "Silla MX-100".to_string(),
            quantity: 1,
            unit_price: Money::new(Decimal::ONE, usd()),
        });
        assert_eq!(
            result,
            Err(OrderError::LineCurrencyMismatch {
                line: "USD".to_string(),
                order: "EUR".to_string(),
            })
        );
        assert!(order.lines.is_empty());
    }

    #[test]
    fn order_total_sums_line_totals() {
        let order = order_with_lines();
        // 30 × 180 + 30 × 21.50
        assert_eq!(order.total().amount, Decimal::new(6045_00, 2));
        assert_eq!(order.total().currency, Currency::eur());
    }

    #[test]
    fn status_starts_pending_and_can_progress() {
        let mut order = order_with_lines();
        assert_eq!(order.status, OrderStatus::Pending);
        order.set_status(OrderStatus::InProduction);
        assert_eq!(order.status, OrderStatus::InProduction);
    }
}
