//! Cart commands.

use std::future::Future;
use std::process::ExitCode;

use anyhow::Result;
use dialoguer::Confirm;
use rocket_cache::CacheError;
use rocket_commerce::{Cart, Product};
use rocket_store::{reset_slot, CartError, MemoryNotifier, UpdateOutcome};
use serde::Serialize;

use super::{AddArgs, ClearArgs, RemoveArgs, UpdateArgs};
use crate::context::Context;
use crate::output::{format_price, truncate};

const TITLE_WIDTH: usize = 32;

/// Cart as printed in JSON mode.
#[derive(Serialize)]
struct CartView<'a> {
    items: &'a [Product],
    item_count: i64,
    subtotal: f64,
}

/// Run the show command.
pub async fn show(ctx: &Context) -> Result<ExitCode> {
    let (store, _) = ctx.open_store()?;
    print_cart(ctx, &store.cart());
    Ok(ExitCode::SUCCESS)
}

/// Run the add command.
pub async fn add(args: AddArgs, ctx: &Context) -> Result<ExitCode> {
    let (store, notifier) = ctx.open_store()?;
    let result = run_op(
        ctx,
        &notifier,
        &format!("Checking stock for product {}", args.id),
        store.add_product(args.id),
    )
    .await;

    Ok(match result {
        Ok(cart) => {
            let title = cart.get(args.id).map(|p| p.title.as_str()).unwrap_or_default();
            ctx.output.success(&format!(
                "Added {} ({} in cart)",
                title,
                cart.amount_of(args.id)
            ));
            print_cart(ctx, &cart);
            ExitCode::SUCCESS
        }
        Err(err) => failed(ctx, err),
    })
}

/// Run the remove command.
pub async fn remove(args: RemoveArgs, ctx: &Context) -> Result<ExitCode> {
    let (store, notifier) = ctx.open_store()?;
    let result = run_op(
        ctx,
        &notifier,
        &format!("Removing product {}", args.id),
        store.remove_product(args.id),
    )
    .await;

    Ok(match result {
        Ok(cart) => {
            ctx.output.success(&format!("Removed product {}", args.id));
            print_cart(ctx, &cart);
            ExitCode::SUCCESS
        }
        Err(err) => failed(ctx, err),
    })
}

/// Run the update command.
pub async fn update(args: UpdateArgs, ctx: &Context) -> Result<ExitCode> {
    let (store, notifier) = ctx.open_store()?;
    let result = run_op(
        ctx,
        &notifier,
        &format!("Checking stock for product {}", args.id),
        store.update_product_amount(args.id, args.amount),
    )
    .await;

    Ok(match result {
        Ok(UpdateOutcome::Updated(cart)) => {
            ctx.output.success(&format!(
                "Product {} amount set to {}",
                args.id, args.amount
            ));
            print_cart(ctx, &cart);
            ExitCode::SUCCESS
        }
        Ok(UpdateOutcome::Ignored) => {
            ctx.output
                .debug(&format!("Amount {} is not positive, cart unchanged", args.amount));
            print_cart(ctx, &store.cart());
            ExitCode::SUCCESS
        }
        Err(err) => failed(ctx, err),
    })
}

/// Run the clear command.
///
/// A stored cart that no longer decodes is discarded without being read.
pub async fn clear(args: ClearArgs, ctx: &Context) -> Result<ExitCode> {
    let (store, notifier) = match ctx.open_store() {
        Ok(opened) => opened,
        Err(err) if is_unreadable_slot(&err) => return discard_unreadable(&args, ctx, &err),
        Err(err) => return Err(err),
    };

    let cart = store.cart();
    if cart.is_empty() {
        ctx.output.info("Cart is already empty");
        return Ok(ExitCode::SUCCESS);
    }

    if !args.yes {
        ctx.output.warn(&format!(
            "This will remove {} product(s) from the cart",
            cart.len()
        ));
    }
    if !confirmed(&args, ctx, "Clear the cart?")? {
        ctx.output.info("Cancelled");
        return Ok(ExitCode::SUCCESS);
    }

    let result = run_op(ctx, &notifier, "Clearing cart", store.clear()).await;
    Ok(match result {
        Ok(cart) => {
            ctx.output.success("Cart cleared");
            print_cart(ctx, &cart);
            ExitCode::SUCCESS
        }
        Err(err) => failed(ctx, err),
    })
}

fn is_unreadable_slot(err: &anyhow::Error) -> bool {
    matches!(
        err.downcast_ref::<CartError>(),
        Some(CartError::Storage(CacheError::Corrupt { .. }))
    )
}

fn discard_unreadable(args: &ClearArgs, ctx: &Context, err: &anyhow::Error) -> Result<ExitCode> {
    ctx.output.warn(&format!("{:#}", err));
    if !confirmed(args, ctx, "Discard the stored cart?")? {
        ctx.output.info("Cancelled");
        return Ok(ExitCode::SUCCESS);
    }

    reset_slot(ctx.open_cache()?, &ctx.config.store_config())?;
    ctx.output.success("Stored cart discarded");
    print_cart(ctx, &Cart::new());
    Ok(ExitCode::SUCCESS)
}

fn confirmed(args: &ClearArgs, ctx: &Context, prompt: &str) -> Result<bool> {
    if args.yes || ctx.output.is_json() {
        return Ok(true);
    }
    Ok(Confirm::new().with_prompt(prompt).default(false).interact()?)
}

/// Await a store operation behind a spinner, then print the toasts it raised.
async fn run_op<T, F>(
    ctx: &Context,
    notifier: &MemoryNotifier,
    msg: &str,
    op: F,
) -> Result<T, CartError>
where
    F: Future<Output = Result<T, CartError>>,
{
    let pb = ctx.output.spinner(msg);
    let result = op.await;
    pb.finish_and_clear();

    for toast in notifier.drain() {
        ctx.output.toast(&toast);
    }
    result
}

/// The store has already toasted the failure; add detail in verbose mode.
fn failed(ctx: &Context, err: CartError) -> ExitCode {
    ctx.output.debug(&format!("{:#}", anyhow::Error::from(err)));
    ExitCode::FAILURE
}

fn print_cart(ctx: &Context, cart: &Cart) {
    if ctx.output.is_json() {
        ctx.output.json(&CartView {
            items: cart.items(),
            item_count: cart.item_count(),
            subtotal: cart.subtotal(),
        });
        return;
    }

    if cart.is_empty() {
        ctx.output.info("Your cart is empty");
        return;
    }

    let widths = [6, TITLE_WIDTH, 6, 12, 12];
    ctx.output.header("Cart");
    ctx.output
        .table_row(&["ID", "PRODUCT", "QTY", "PRICE", "SUBTOTAL"], &widths);
    for product in cart {
        let id = product.id.to_string();
        let title = truncate(&product.title, TITLE_WIDTH);
        let amount = product.amount.to_string();
        let price = format_price(product.price);
        let line_total = format_price(product.line_total());
        ctx.output.table_row(
            &[&id, &title, &amount, &price, &line_total],
            &widths,
        );
    }

    println!();
    ctx.output.kv("items", &cart.item_count().to_string());
    ctx.output.kv("total", &format_price(cart.subtotal()));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CliConfig;
    use crate::output::Output;
    use rocket_cache::{FileStore, KvStore, DEFAULT_CART_SLOT};
    use rocket_commerce::ProductId;
    use std::path::PathBuf;

    const DB: &str = r#"{
        "stock": [{ "id": 1, "amount": 1 }, { "id": 2, "amount": 3 }],
        "products": [
            { "id": 1, "title": "Tênis de Caminhada", "price": 179.9, "image": "" },
            { "id": 2, "title": "Tênis VR Caminhada", "price": 139.9, "image": "" }
        ]
    }"#;

    fn context(name: &str) -> Context {
        let cwd = std::env::temp_dir().join(format!("rocket-cli-{}-{}", name, std::process::id()));
        let _ = std::fs::remove_dir_all(&cwd);
        std::fs::create_dir_all(&cwd).unwrap();

        let fixture = cwd.join("db.json");
        std::fs::write(&fixture, DB).unwrap();

        Context {
            config: CliConfig::default(),
            config_path: None,
            output: Output::new(false, true),
            cwd,
            fixture: Some(fixture),
        }
    }

    fn cleanup(ctx: Context) {
        let root: PathBuf = ctx.cwd;
        let _ = std::fs::remove_dir_all(root);
    }

    fn succeeded(code: ExitCode) -> bool {
        format!("{code:?}") == format!("{:?}", ExitCode::SUCCESS)
    }

    #[tokio::test]
    async fn test_clear_discards_unreadable_slot() {
        let ctx = context("clear-unreadable");
        FileStore::open(ctx.storage_dir())
            .unwrap()
            .set(DEFAULT_CART_SLOT, b"{corrupt")
            .unwrap();
        assert!(ctx.open_store().is_err());

        let code = clear(ClearArgs { yes: true }, &ctx).await.unwrap();

        assert!(succeeded(code));
        assert!(!ctx.open_cache().unwrap().exists(DEFAULT_CART_SLOT).unwrap());
        let (store, _) = ctx.open_store().unwrap();
        assert!(store.cart().is_empty());
        cleanup(ctx);
    }

    #[tokio::test]
    async fn test_add_then_clear() {
        let ctx = context("add-clear");

        let code = add(AddArgs { id: ProductId::new(2) }, &ctx).await.unwrap();
        assert!(succeeded(code));
        let (store, _) = ctx.open_store().unwrap();
        assert_eq!(store.cart().amount_of(ProductId::new(2)), 1);
        drop(store);

        let code = clear(ClearArgs { yes: true }, &ctx).await.unwrap();
        assert!(succeeded(code));
        let (store, _) = ctx.open_store().unwrap();
        assert!(store.cart().is_empty());
        cleanup(ctx);
    }

    #[tokio::test]
    async fn test_add_beyond_stock_fails() {
        let ctx = context("add-out-of-stock");

        assert!(succeeded(add(AddArgs { id: ProductId::new(1) }, &ctx).await.unwrap()));
        let code = add(AddArgs { id: ProductId::new(1) }, &ctx).await.unwrap();

        assert!(!succeeded(code));
        let (store, _) = ctx.open_store().unwrap();
        assert_eq!(store.cart().amount_of(ProductId::new(1)), 1);
        cleanup(ctx);
    }
}
