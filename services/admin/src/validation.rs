//! Input validation utilities
//!
//! Field validators return `Ok(())` when the value is acceptable or the
//! message for the first rule it breaks. Form validators check every field
//! independently and collect one message per failing field; an empty map
//! means the form may be submitted.

use regex::Regex;
use std::collections::BTreeMap;
use std::sync::OnceLock;

pub const USERNAME_MIN_LEN: usize = 3;
pub const USERNAME_MAX_LEN: usize = 50;
pub const PASSWORD_MIN_LEN: usize = 6;
pub const PASSWORD_MAX_LEN: usize = 100;
pub const PRODUCT_NAME_MIN_LEN: usize = 3;
pub const PRODUCT_NAME_MAX_LEN: usize = 100;
pub const PRICE_MAX: f64 = 100_000_000.0;
pub const QUANTITY_MAX: i64 = 10_000;
pub const DESCRIPTION_MAX_LEN: usize = 500;

/// User-facing validation messages
pub mod messages {
    pub const USERNAME_REQUIRED: &str = "Username is required";
    pub const USERNAME_TOO_SHORT: &str = "Username must be at least 3 characters long";
    pub const USERNAME_TOO_LONG: &str = "Username must be at most 50 characters long";
    pub const USERNAME_INVALID_CHARS: &str =
        "Username can only contain letters, numbers, dots, hyphens and underscores";

    pub const PASSWORD_REQUIRED: &str = "Password is required";
    pub const PASSWORD_TOO_SHORT: &str = "Password must be at least 6 characters long";
    pub const PASSWORD_TOO_LONG: &str = "Password must be at most 100 characters long";
    pub const PASSWORD_LETTER_AND_DIGIT: &str =
        "Password must contain at least one letter and one digit";

    pub const NAME_REQUIRED: &str = "Product name is required";
    pub const NAME_TOO_SHORT: &str = "Product name must be at least 3 characters long";
    pub const NAME_TOO_LONG: &str = "Product name must be at most 100 characters long";

    pub const PRICE_REQUIRED: &str = "Price is required";
    pub const PRICE_NOT_POSITIVE: &str = "Price must be greater than 0";
    pub const PRICE_TOO_HIGH: &str = "Price must not exceed 100,000,000";

    pub const QUANTITY_REQUIRED: &str = "Quantity is required";
    pub const QUANTITY_NEGATIVE: &str = "Quantity must be 0 or more";
    pub const QUANTITY_TOO_HIGH: &str = "Quantity must not exceed 10,000";

    pub const DESCRIPTION_TOO_LONG: &str = "Description must be at most 500 characters long";

    pub const CATEGORY_REQUIRED: &str = "Please choose a category";
}

use messages::*;

/// Fields of the login form
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LoginField {
    Username,
    Password,
}

impl LoginField {
    pub fn as_str(&self) -> &'static str {
        match self {
            LoginField::Username => "username",
            LoginField::Password => "password",
        }
    }
}

/// Fields of the product form
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ProductField {
    Name,
    Price,
    Quantity,
    Description,
    Category,
}

impl ProductField {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductField::Name => "name",
            ProductField::Price => "price",
            ProductField::Quantity => "quantity",
            ProductField::Description => "description",
            ProductField::Category => "category_id",
        }
    }
}

/// Login field errors; absence of a key means the field is valid
pub type CredentialErrors = BTreeMap<LoginField, String>;

/// Product field errors; absence of a key means the field is valid
pub type ProductErrors = BTreeMap<ProductField, String>;

/// Raw product form values before validation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductInput {
    pub name: String,
    pub price: Option<f64>,
    pub quantity: Option<i64>,
    pub description: Option<String>,
    pub category_id: String,
}

/// Validate username
pub fn validate_username(username: &str) -> Result<(), String> {
    if username.trim().is_empty() {
        return Err(USERNAME_REQUIRED.to_string());
    }

    let len = username.chars().count();
    if len < USERNAME_MIN_LEN {
        return Err(USERNAME_TOO_SHORT.to_string());
    }

    if len > USERNAME_MAX_LEN {
        return Err(USERNAME_TOO_LONG.to_string());
    }

    static USERNAME_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = USERNAME_REGEX.get_or_init(|| {
        Regex::new(r"^[a-zA-Z0-9._-]+$").expect("Failed to compile username regex")
    });

    if !regex.is_match(username) {
        return Err(USERNAME_INVALID_CHARS.to_string());
    }

    Ok(())
}

/// Validate password
pub fn validate_password(password: &str) -> Result<(), String> {
    if password.trim().is_empty() {
        return Err(PASSWORD_REQUIRED.to_string());
    }

    let len = password.chars().count();
    if len < PASSWORD_MIN_LEN {
        return Err(PASSWORD_TOO_SHORT.to_string());
    }

    if len > PASSWORD_MAX_LEN {
        return Err(PASSWORD_TOO_LONG.to_string());
    }

    let mut has_letter = false;
    let mut has_digit = false;

    for c in password.chars() {
        if c.is_ascii_alphabetic() {
            has_letter = true;
        } else if c.is_ascii_digit() {
            has_digit = true;
        }
    }

    if !has_letter || !has_digit {
        return Err(PASSWORD_LETTER_AND_DIGIT.to_string());
    }

    Ok(())
}

/// Validate the login form
pub fn validate_credentials(username: &str, password: &str) -> CredentialErrors {
    let mut errors = CredentialErrors::new();

    if let Err(message) = validate_username(username) {
        errors.insert(LoginField::Username, message);
    }

    if let Err(message) = validate_password(password) {
        errors.insert(LoginField::Password, message);
    }

    errors
}

fn validate_name(name: &str) -> Result<(), &'static str> {
    if name.trim().is_empty() {
        return Err(NAME_REQUIRED);
    }

    let len = name.chars().count();
    if len < PRODUCT_NAME_MIN_LEN {
        return Err(NAME_TOO_SHORT);
    }

    if len > PRODUCT_NAME_MAX_LEN {
        return Err(NAME_TOO_LONG);
    }

    Ok(())
}

fn validate_price(price: Option<f64>) -> Result<(), &'static str> {
    let Some(price) = price else {
        return Err(PRICE_REQUIRED);
    };

    if price.is_nan() || price <= 0.0 {
        return Err(PRICE_NOT_POSITIVE);
    }

    if price > PRICE_MAX {
        return Err(PRICE_TOO_HIGH);
    }

    Ok(())
}

fn validate_quantity(quantity: Option<i64>) -> Result<(), &'static str> {
    let Some(quantity) = quantity else {
        return Err(QUANTITY_REQUIRED);
    };

    if quantity < 0 {
        return Err(QUANTITY_NEGATIVE);
    }

    if quantity > QUANTITY_MAX {
        return Err(QUANTITY_TOO_HIGH);
    }

    Ok(())
}

fn validate_description(description: Option<&str>) -> Result<(), &'static str> {
    match description {
        Some(text) if text.chars().count() > DESCRIPTION_MAX_LEN => Err(DESCRIPTION_TOO_LONG),
        _ => Ok(()),
    }
}

fn validate_category(category_id: &str) -> Result<(), &'static str> {
    if category_id.trim().is_empty() {
        return Err(CATEGORY_REQUIRED);
    }
    Ok(())
}

/// Validate a candidate product, checking every field
pub fn validate_product(product: &ProductInput) -> ProductErrors {
    let checks = [
        (ProductField::Name, validate_name(&product.name)),
        (ProductField::Price, validate_price(product.price)),
        (ProductField::Quantity, validate_quantity(product.quantity)),
        (
            ProductField::Description,
            validate_description(product.description.as_deref()),
        ),
        (ProductField::Category, validate_category(&product.category_id)),
    ];

    checks
        .into_iter()
        .filter_map(|(field, result)| result.err().map(|message| (field, message.to_string())))
        .collect()
}
