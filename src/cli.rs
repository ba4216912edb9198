use clap::{Parser, Subcommand};

/// Menu customizer: price and customize menu items before adding them to a cart.
#[derive(Parser, Debug)]
#[command(name = "menu_customizer")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Path to the menu JSON file (array of menu items).
    #[arg(short, long, default_value = "menu.json", global = true)]
    pub menu: String,

    /// Directory holding `menu-items/<id>/customization.json` files.
    #[arg(short, long, default_value = "menu_data", global = true)]
    pub data_dir: String,

    /// Path to the cart JSON file.
    #[arg(short, long, default_value = "cart.json", global = true)]
    pub cart: String,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show whether an item offers customization, and what kind.
    Summary {
        /// Menu item id.
        #[arg(long)]
        item: u64,
    },

    /// Customize an item interactively and add it to the cart.
    Customize {
        /// Menu item id.
        #[arg(long)]
        item: u64,
    },

    /// Price a customization without prompting.
    Quote {
        /// Menu item id.
        #[arg(long)]
        item: u64,

        /// Size name.
        #[arg(long)]
        size: Option<String>,

        /// Extra name (repeatable).
        #[arg(long = "extra")]
        extras: Vec<String>,

        /// Add-on name (repeatable).
        #[arg(long = "addon")]
        addons: Vec<String>,

        /// Substitute name (repeatable).
        #[arg(long = "substitute")]
        substitutes: Vec<String>,

        /// Number of items.
        #[arg(short, long, default_value = "1", allow_negative_numbers = true)]
        quantity: i64,

        /// Special instructions for the kitchen.
        #[arg(long)]
        instructions: Option<String>,

        /// Append the result to the cart.
        #[arg(long)]
        save: bool,
    },

    /// List the cart.
    Cart,
}
