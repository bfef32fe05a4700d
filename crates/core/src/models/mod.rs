pub mod market;
pub mod portfolio;
pub mod price;
pub mod settings;
pub mod stock;
pub mod transaction;
pub mod user;
