//! Wire models exchanged with the catalog backend

pub mod auth;
pub mod category;
pub mod product;

// Re-export for convenience
pub use auth::{LoginRequest, LoginResponse, UserProfile};
pub use category::Category;
pub use product::{Product, ProductDraft, ProductPage};
