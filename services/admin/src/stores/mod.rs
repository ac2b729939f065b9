//! State containers consumed by the views

pub mod auth;
pub mod category;
pub mod product;

pub use auth::AuthStore;
pub use category::CategoryStore;
pub use product::ProductStore;
