//! Command-line front end
//!
//! Each command is one user action against the stores; the rendered output on
//! stdout plays the part of the admin pages.

use anyhow::{Context, Result, bail};

use crate::models::{Category, Product, ProductDraft};
use crate::notification::{Notification, NotificationKind};
use crate::state::AppState;
use crate::validation::{ProductInput, validate_credentials};

pub const USAGE: &str = "\
Usage: admin <command> [args]

Commands:
  login <username> <password>
  logout
  whoami
  products [page] [search]
  product <id>
  add <name> <price> <quantity> <category_id> [description]
  update <id> <name> <price> <quantity> <category_id> [description]
  delete <id>
  categories";

/// A parsed user action
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Login { username: String, password: String },
    Logout,
    WhoAmI,
    Products { page: u32, search: Option<String> },
    Product { id: i64 },
    Add(ProductInput),
    Update { id: i64, input: ProductInput },
    Delete { id: i64 },
    Categories,
}

impl Command {
    /// Parse the arguments following the program name
    pub fn parse(args: &[String]) -> Result<Self> {
        let Some((name, rest)) = args.split_first() else {
            bail!("Missing command");
        };

        let command = match (name.as_str(), rest) {
            ("login", [username, password]) => Command::Login {
                username: username.clone(),
                password: password.clone(),
            },
            ("logout", []) => Command::Logout,
            ("whoami", []) => Command::WhoAmI,
            ("products", []) => Command::Products {
                page: 0,
                search: None,
            },
            ("products", [page, search @ ..]) if search.len() <= 1 => Command::Products {
                page: parse_page(page)?,
                search: search.first().cloned(),
            },
            ("product", [id]) => Command::Product { id: parse_id(id)? },
            ("add", fields) => Command::Add(parse_product_input(fields)?),
            ("update", [id, fields @ ..]) => Command::Update {
                id: parse_id(id)?,
                input: parse_product_input(fields)?,
            },
            ("delete", [id]) => Command::Delete { id: parse_id(id)? },
            ("categories", []) => Command::Categories,
            (other, _) => bail!("Unknown command or wrong arguments: {}", other),
        };

        Ok(command)
    }

    /// Whether the command needs a logged in session
    fn requires_session(&self) -> bool {
        !matches!(self, Command::Login { .. })
    }
}

/// Pages are shown one-based on the command line
fn parse_page(raw: &str) -> Result<u32> {
    let page: u32 = raw
        .parse()
        .with_context(|| format!("Page must be a positive number, got {:?}", raw))?;
    if page == 0 {
        bail!("Pages start at 1");
    }
    Ok(page - 1)
}

fn parse_id(raw: &str) -> Result<i64> {
    raw.parse()
        .with_context(|| format!("Product id must be a number, got {:?}", raw))
}

fn parse_product_input(fields: &[String]) -> Result<ProductInput> {
    let [name, price, quantity, category_id, description @ ..] = fields else {
        bail!("Expected <name> <price> <quantity> <category_id> [description]");
    };
    if description.len() > 1 {
        bail!("Quote the description if it contains spaces");
    }

    let price = price
        .parse::<f64>()
        .with_context(|| format!("Price must be a number, got {:?}", price))?;
    let quantity = quantity
        .parse::<i64>()
        .with_context(|| format!("Quantity must be a whole number, got {:?}", quantity))?;

    Ok(ProductInput {
        name: name.clone(),
        price: Some(price),
        quantity: Some(quantity),
        description: description.first().cloned(),
        category_id: category_id.clone(),
    })
}

/// Run one command; returns whether it succeeded
pub async fn run(app: &AppState, command: Command) -> Result<bool> {
    if command.requires_session() {
        app.auth_store.init().await;
        if !app.auth_store.is_authenticated().await {
            println!("Not logged in. Run `admin login <username> <password>` first.");
            return Ok(false);
        }
    }

    let ok = match command {
        Command::Login { username, password } => log_in(app, &username, &password).await,
        Command::Logout => {
            app.log_out().await;
            true
        }
        Command::WhoAmI => {
            let base_url = &app.config.base_url;
            match app.auth_store.state().await.user {
                Some(user) => println!("Logged in as {} on {}", user.username, base_url),
                None => println!("Logged in on {} (profile unavailable)", base_url),
            }
            true
        }
        Command::Products { page, search } => {
            let loaded = match search {
                Some(term) => app.load_search(&term, page).await,
                None => app.load_listing(page).await,
            };
            if loaded {
                render_listing(app).await;
            }
            loaded
        }
        Command::Product { id } => match app.product_service.get_product(id).await {
            Ok(product) => {
                render_products(std::slice::from_ref(&product));
                if let Some(description) = product.description.filter(|d| !d.is_empty()) {
                    println!("\n{}", description);
                }
                true
            }
            Err(e) if e.status() == Some(404) => {
                println!("Product {} not found", id);
                false
            }
            Err(e) => {
                println!("Could not load product {}: {}", id, e);
                false
            }
        },
        Command::Add(input) => match submittable(input) {
            Some(draft) => app.product_store.add_product(&draft).await,
            None => false,
        },
        Command::Update { id, input } => match submittable(input) {
            Some(draft) => app.product_store.update_product(id, &draft).await,
            None => false,
        },
        Command::Delete { id } => app.product_store.delete_product(id).await,
        Command::Categories => {
            let loaded = app.category_store.get_all_category().await;
            if loaded {
                render_categories(&app.category_store.state().await.categories);
            }
            loaded
        }
    };

    Ok(ok)
}

/// Check credentials locally before sending them
async fn log_in(app: &AppState, username: &str, password: &str) -> bool {
    let errors = validate_credentials(username, password);
    if !errors.is_empty() {
        for (field, message) in &errors {
            println!("{}: {}", field.as_str(), message);
        }
        return false;
    }
    app.auth_store.log_in(username, password).await
}

/// Validate a product form, printing field errors instead of submitting
fn submittable(input: ProductInput) -> Option<ProductDraft> {
    match ProductDraft::try_from(input) {
        Ok(draft) => Some(draft),
        Err(errors) => {
            for (field, message) in &errors {
                println!("{}: {}", field.as_str(), message);
            }
            None
        }
    }
}

async fn render_listing(app: &AppState) {
    let state = app.product_store.state().await;

    println!("Product Manager ({})", state.quantity);
    if let Some(term) = &state.search {
        println!("Search: {}", term);
    }
    render_products(&state.products);
    let page = state.current_page + 1;
    let total = state.total_pages.max(1);
    println!("Page {page} / {total}");
}

fn render_products(products: &[Product]) {
    if products.is_empty() {
        println!("No products");
        return;
    }

    println!(
        "{:>6}  {:<30}  {:>14}  {:>8}  {}",
        "ID", "NAME", "PRICE", "QTY", "CATEGORY"
    );
    for product in products {
        let Product {
            id,
            product_name,
            price,
            quantity,
            category,
            ..
        } = product;
        let category = category.as_ref().map_or("-", |c| c.name.as_str());
        println!("{id:>6}  {product_name:<30}  {price:>14.2}  {quantity:>8}  {category}");
    }
}

fn render_categories(categories: &[Category]) {
    for category in categories {
        println!("{:>4}  {}", category.id, category.name);
    }
}

/// Print a notification the way the toast surface would show it
pub fn render_notification(notification: &Notification) {
    let marker = match notification.kind {
        NotificationKind::Success => "✓",
        NotificationKind::Error => "✗",
        NotificationKind::Info => "i",
    };
    let message = &notification.message;
    match &notification.description {
        Some(description) => println!("{marker} {message} ({description})"),
        None => println!("{marker} {message}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(raw: &[&str]) -> Result<Command> {
        let args: Vec<String> = raw.iter().map(|s| s.to_string()).collect();
        Command::parse(&args)
    }

    #[test]
    fn test_parse_login_and_simple_commands() {
        assert_eq!(
            parse(&["login", "admin123", "admin123"]).unwrap(),
            Command::Login {
                username: "admin123".to_string(),
                password: "admin123".to_string()
            }
        );
        assert_eq!(parse(&["logout"]).unwrap(), Command::Logout);
        assert_eq!(parse(&["categories"]).unwrap(), Command::Categories);
        assert_eq!(parse(&["delete", "7"]).unwrap(), Command::Delete { id: 7 });
    }

    #[test]
    fn test_parse_products_pages_are_one_based() {
        assert_eq!(
            parse(&["products"]).unwrap(),
            Command::Products {
                page: 0,
                search: None
            }
        );
        assert_eq!(
            parse(&["products", "3", "dell"]).unwrap(),
            Command::Products {
                page: 2,
                search: Some("dell".to_string())
            }
        );
        assert!(parse(&["products", "0"]).is_err());
    }

    #[test]
    fn test_parse_product_forms() {
        let add = parse(&["add", "Laptop Dell", "150000", "20", "1"]).unwrap();
        assert_eq!(
            add,
            Command::Add(ProductInput {
                name: "Laptop Dell".to_string(),
                price: Some(150000.0),
                quantity: Some(20),
                description: None,
                category_id: "1".to_string(),
            })
        );

        let update = parse(&["update", "3", "Laptop", "10", "1", "2", "Thin"]).unwrap();
        let Command::Update { id, input } = update else {
            panic!("expected update");
        };
        assert_eq!(id, 3);
        assert_eq!(input.description.as_deref(), Some("Thin"));

        assert!(parse(&["add", "Laptop", "cheap", "1", "1"]).is_err());
        assert!(parse(&["add", "Laptop"]).is_err());
    }

    #[test]
    fn test_parse_rejects_unknown() {
        assert!(parse(&[]).is_err());
        assert!(parse(&["export"]).is_err());
        assert!(parse(&["logout", "now"]).is_err());
    }

    #[test]
    fn test_only_login_runs_without_session() {
        let login = parse(&["login", "admin123", "admin123"]).unwrap();
        assert!(!login.requires_session());
        assert!(parse(&["logout"]).unwrap().requires_session());
        assert!(parse(&["products"]).unwrap().requires_session());
    }
}
