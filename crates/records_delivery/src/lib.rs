//! Sample food delivery domain.
//!
//! Four record types and the dataset that ties them together:
//!
//! - [`Person`] (`people`) - clients placing orders
//! - [`Courier`] (`couriers`) - who delivers
//! - [`Restaurant`] (`restaurants`) - who cooks
//! - [`Order`] (`orders`) - references a person, a courier and a restaurant
//!
//! [`DeliveryDataset::entity_types`] lists the referenced types before
//! `Order`, so every codec loads and stores them in a foreign-key-safe order.

mod courier;
mod dataset;
mod order;
mod person;
mod restaurant;

pub use courier::Courier;
pub use dataset::DeliveryDataset;
pub use order::Order;
pub use person::Person;
pub use restaurant::Restaurant;
