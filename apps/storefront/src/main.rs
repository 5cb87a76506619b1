//! # Storefront Entry Point
//!
//! A small command-line front onto the storefront commands.
//!
//! ## Usage
//! ```bash
//! storefront                      # catalog and cart
//! storefront catalog [TERM]       # search the catalog
//! storefront add <PRODUCT_ID>     # +1 unit
//! storefront set <PRODUCT_ID> <N> # set quantity (0 removes)
//! storefront coupons              # list coupon codes
//! storefront coupon <CODE>        # select a coupon
//! storefront checkout             # complete the order
//! ```
//!
//! Configuration comes from `STOREFRONT_*` environment variables; logs
//! from `RUST_LOG`.

use std::env;
use std::process::ExitCode;

use storefront::commands::{cart, coupon, product};
use storefront::error::{ApiError, ApiResult};
use storefront::state::ConfigState;
use storefront::{init_tracing, Storefront};

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    let config = ConfigState::from_env();
    let app = match Storefront::open(config).await {
        Ok(app) => app,
        Err(e) => {
            eprintln!("Failed to open storefront: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let args: Vec<String> = env::args().skip(1).collect();
    let outcome = run(&app, &args).await;

    for notice in app.notifications().snapshot() {
        println!("[{:?}] {}", notice.kind, notice.message);
    }

    app.shutdown().await;

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(app: &Storefront, args: &[String]) -> ApiResult<()> {
    let (db, store, notices) = (app.db(), app.store(), app.notifications());

    match args.first().map(String::as_str) {
        None => {
            print_catalog(app, "");
            print_cart(app);
        }
        Some("catalog") => {
            let term = args.get(1).map(String::as_str).unwrap_or("");
            print_catalog(app, term);
        }
        Some("add") => {
            let id = arg(args, 1)?;
            cart::add_to_cart(db, store, notices, id).await?;
            print_cart(app);
        }
        Some("set") => {
            let id = arg(args, 1)?;
            let quantity = arg(args, 2)?.parse::<i64>().map_err(|e| {
                ApiError::validation(format!("quantity: {}", e))
            })?;
            cart::update_cart_item(db, store, notices, id, quantity).await?;
            print_cart(app);
        }
        Some("coupon") => {
            cart::apply_coupon(store, notices, arg(args, 1)?).await?;
            print_cart(app);
        }
        Some("coupons") => {
            for coupon in coupon::list_coupons(store) {
                println!("  {:<12} {}", coupon.code, coupon.name);
            }
        }
        Some("checkout") => {
            cart::complete_order(db, store, notices).await?;
        }
        Some(other) => {
            return Err(ApiError::validation(format!(
                "Unknown command: {}",
                other
            )));
        }
    }

    Ok(())
}

fn arg<'a>(args: &'a [String], index: usize) -> ApiResult<&'a str> {
    args.get(index)
        .map(String::as_str)
        .ok_or_else(|| ApiError::validation("Missing argument"))
}

fn print_catalog(app: &Storefront, term: &str) {
    println!("{}", app.config().store_name);
    println!("================================");

    for view in product::list_products(app.store(), app.config(), term, None) {
        let badge = if view.product.is_recommended { " ★" } else { "" };
        println!(
            "  {:<38} {:<16}{} {:>12}",
            view.product.id, view.product.name, badge, view.display_price
        );
    }
    println!();
}

fn print_cart(app: &Storefront) {
    let response = cart::get_cart(app.store());
    let config = app.config();
    let mode = config.view_mode;

    println!("Cart ({} items)", response.item_count);
    for line in &response.lines {
        let discount = if line.is_discounted() {
            format!(" -{}%", line.discount_percent())
        } else {
            String::new()
        };
        println!(
            "  {:<16} x{:<4}{:<6} {:>12}",
            line.name,
            line.quantity,
            discount,
            config.format_price(line.total, mode, None)
        );
    }

    if let Some(coupon) = &response.selected_coupon {
        println!("  Coupon: {} ({})", coupon.name, coupon.code);
    }
    println!(
        "  Before discount: {}",
        config.format_price(response.totals.total_before_discount, mode, None)
    );
    println!(
        "  Total:           {}",
        config.format_price(response.totals.total_after_discount, mode, None)
    );
}
