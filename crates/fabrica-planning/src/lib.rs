#![deny(warnings)]

//! Back-office planning features for the furniture factory: escandallo
//! (bill-of-materials) costing, MRP net requirements, workshop station
//! tracking, the inventory movement ledger, and sales documents.

pub mod bom;
pub mod documents;
pub mod ledger;
pub mod mrp;
pub mod sales;
pub mod workshop;

pub use bom::{Bom, BomLine, Fabric};
pub use mrp::{plan, BillOfMaterials, Requirement};
pub use sales::{Currency, Customer, CustomerOrder, Money, OrderLine};
