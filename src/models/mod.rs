mod stock;
mod user;

pub use stock::{NewStock, Stock};
pub use user::{NewUser, User};
