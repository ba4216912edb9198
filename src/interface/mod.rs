pub mod prompts;
pub mod render;

pub use prompts::{
    customize_interactively, match_legacy_name, match_variant, prompt_instructions, prompt_yes_no,
};
pub use render::{
    display_breakdown, display_cart, display_payload, display_session, display_summary,
    format_modifier, format_price, variant_label,
};
