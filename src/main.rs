use clap::Parser;
use tracing_subscriber::EnvFilter;

use menu_customizer_rs::cli::{Cli, Command};
use menu_customizer_rs::error::{CustomizeError, Result};
use menu_customizer_rs::interface::{
    customize_interactively, display_cart, display_payload, display_session, display_summary,
    match_legacy_name, match_variant, prompt_yes_no,
};
use menu_customizer_rs::models::{MenuItem, VariantKind};
use menu_customizer_rs::pricing::{LEGACY_EXTRAS, LEGACY_SIZES};
use menu_customizer_rs::state::{
    fetch_customization, find_menu_item, load_cart, load_menu, CartConsumer, CartFile,
    CustomizationSession, JsonDirProvider, PricingMode,
};

fn main() {
    setup_tracing();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Log to stderr, filtered by `RUST_LOG` (warnings only by default).
fn setup_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        Command::Summary { item } => cmd_summary(&cli, *item),
        Command::Customize { item } => cmd_customize(&cli, *item),
        Command::Quote {
            item,
            size,
            extras,
            addons,
            substitutes,
            quantity,
            instructions,
            save,
        } => {
            let picks = Picks {
                size: size.as_deref(),
                extras,
                addons,
                substitutes,
                quantity: *quantity,
                instructions: instructions.as_deref(),
            };
            cmd_quote(&cli, *item, &picks, *save)
        }
        Command::Cart => cmd_cart(&cli),
    }
}

fn load_item(cli: &Cli, item_id: u64) -> Result<MenuItem> {
    let menu = load_menu(&cli.menu)?;
    find_menu_item(&menu, item_id)
}

/// Show what customization an item offers.
fn cmd_summary(cli: &Cli, item_id: u64) -> Result<()> {
    let item = load_item(cli, item_id)?;
    let provider = JsonDirProvider::new(&cli.data_dir);

    let summary = fetch_customization(&provider, item_id).map(|response| response.summary());
    display_summary(&item.name, summary.as_ref());
    Ok(())
}

/// Customize interactively, then add to the cart on confirm.
fn cmd_customize(cli: &Cli, item_id: u64) -> Result<()> {
    let item = load_item(cli, item_id)?;
    let provider = JsonDirProvider::new(&cli.data_dir);

    let mut session = CustomizationSession::open(item, &provider);
    if session.mode() == PricingMode::Legacy {
        println!("No customization options found; using standard sizes and extras.");
    }

    loop {
        if !customize_interactively(&mut session)? {
            println!("Cancelled. Nothing was added.");
            return Ok(());
        }

        if session.missing_required().is_empty()
            || prompt_yes_no("Some required options are not chosen. Add anyway?", false)?
        {
            break;
        }
    }

    let line = session.confirm();
    display_payload(&line)?;

    let mut cart = CartFile::new(&cli.cart);
    cart.add_to_cart(line)?;
    println!("Added to cart.");

    Ok(())
}

/// Selections given on the command line.
struct Picks<'a> {
    size: Option<&'a str>,
    extras: &'a [String],
    addons: &'a [String],
    substitutes: &'a [String],
    quantity: i64,
    instructions: Option<&'a str>,
}

/// Apply named picks to a session on whichever path it runs.
fn apply_picks(session: &mut CustomizationSession, picks: &Picks<'_>) -> Result<()> {
    match session.catalog().cloned() {
        Some(catalog) => {
            if let Some(size) = picks.size {
                let variant = match_variant(&catalog, VariantKind::Size, size)?;
                session.toggle_variant(variant.id, VariantKind::Size)?;
            }

            let named = [
                (VariantKind::Extra, picks.extras),
                (VariantKind::Addon, picks.addons),
                (VariantKind::Substitute, picks.substitutes),
            ];
            for (kind, names) in named {
                for name in names {
                    let variant = match_variant(&catalog, kind, name)?;
                    if !session.is_selected(variant.id, kind) {
                        session.toggle_variant(variant.id, kind)?;
                    }
                }
            }
        }
        None => {
            if !picks.addons.is_empty() || !picks.substitutes.is_empty() {
                return Err(CustomizeError::InvalidInput(
                    "this item has no add-ons or substitutes; only --size and --extra apply"
                        .to_string(),
                ));
            }

            if let Some(size) = picks.size {
                session.select_legacy_size(match_legacy_name(&LEGACY_SIZES, size)?)?;
            }
            for name in picks.extras {
                let canonical = match_legacy_name(&LEGACY_EXTRAS, name)?;
                let already = session
                    .legacy_selection()
                    .is_some_and(|s| s.is_extra_selected(canonical));
                if !already {
                    session.toggle_legacy_extra(canonical)?;
                }
            }
        }
    }

    session.set_quantity(picks.quantity);
    if let Some(text) = picks.instructions {
        session.set_special_instructions(text);
    }
    Ok(())
}

/// Price a customization from command-line picks.
fn cmd_quote(cli: &Cli, item_id: u64, picks: &Picks<'_>, save: bool) -> Result<()> {
    let item = load_item(cli, item_id)?;
    let provider = JsonDirProvider::new(&cli.data_dir);

    let mut session = CustomizationSession::open(item, &provider);
    apply_picks(&mut session, picks)?;

    println!("=== {} ===", session.item().name);
    display_session(&session);

    let line = session.confirm();
    display_payload(&line)?;

    if save {
        let mut cart = CartFile::new(&cli.cart);
        cart.add_to_cart(line)?;
        println!("Added to cart.");
    }

    Ok(())
}

/// List the cart.
fn cmd_cart(cli: &Cli) -> Result<()> {
    let lines = load_cart(&cli.cart)?;
    display_cart(&lines);
    Ok(())
}
