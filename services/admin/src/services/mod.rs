//! Domain services mapping catalog operations onto backend calls

pub mod auth;
pub mod category;
pub mod product;

pub use auth::AuthService;
pub use category::CategoryService;
pub use product::ProductService;
