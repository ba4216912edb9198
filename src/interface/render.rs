use crate::models::{CartLine, Customization, CustomizationSummary, Variant};
use crate::pricing::PriceBreakdown;
use crate::state::CustomizationSession;

/// Format whole currency units with a symbol and thousands separators.
pub fn format_price(amount: i64, currency: &str) -> String {
    let symbol = match currency.to_ascii_uppercase().as_str() {
        "NGN" => "₦".to_string(),
        "USD" => "$".to_string(),
        "GBP" => "£".to_string(),
        "EUR" => "€".to_string(),
        other => format!("{} ", other),
    };

    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if amount < 0 { "-" } else { "" };
    format!("{}{}{}", sign, symbol, grouped)
}

/// Signed delta such as `+₦500`. Empty for zero.
pub fn format_modifier(amount: i64, currency: &str) -> String {
    match amount {
        0 => String::new(),
        a if a > 0 => format!("+{}", format_price(a, currency)),
        a => format_price(a, currency),
    }
}

/// Label for a variant in a picker. Prefers the server's display string.
pub fn variant_label(variant: &Variant, currency: &str) -> String {
    let price = variant
        .formatted_price
        .clone()
        .unwrap_or_else(|| format_modifier(variant.price_modifier, currency));

    if price.is_empty() {
        variant.name.clone()
    } else {
        format!("{} ({})", variant.name, price)
    }
}

/// Display the customization summary for an item.
pub fn display_summary(item_name: &str, summary: Option<&CustomizationSummary>) {
    println!();
    println!("=== {} ===", item_name);

    let Some(summary) = summary.filter(|s| s.has_variants()) else {
        println!("No customization options. Items are added with the standard options.");
        println!();
        return;
    };

    let yes_no = |flag: bool| if flag { "yes" } else { "no" };
    println!("  Sizes:       {}", yes_no(summary.has_sizes));
    println!("  Extras:      {}", yes_no(summary.has_extras));
    println!("  Add-ons:     {}", yes_no(summary.has_addons));
    println!("  Substitutes: {}", yes_no(summary.has_substitutes));
    println!(
        "  {} variants, {} required",
        summary.total_variants, summary.required_variants
    );
    println!();
}

/// Display an itemized price.
pub fn display_breakdown(breakdown: &PriceBreakdown, currency: &str) {
    let width = breakdown
        .lines
        .iter()
        .map(|l| l.label.chars().count())
        .max()
        .unwrap_or(10)
        .max(10);

    println!();
    for line in &breakdown.lines {
        let amount = match line.kind {
            None if line.label == "Base price" => format_price(line.amount, currency),
            _ => {
                let delta = format_modifier(line.amount, currency);
                if delta.is_empty() { "-".to_string() } else { delta }
            }
        };
        println!("  {:<width$}  {:>12}", line.label, amount, width = width);
    }
    println!("  {}", "-".repeat(width + 14));
    println!(
        "  {:<width$}  {:>12}",
        "Unit price",
        format_price(breakdown.unit_price, currency),
        width = width
    );
    println!(
        "  {:<width$}  {:>12}",
        format!("x {}", breakdown.quantity),
        format_price(breakdown.total, currency),
        width = width
    );
    println!();
}

/// Display the current state of a session: breakdown plus required notices.
pub fn display_session(session: &CustomizationSession) {
    let currency = &session.item().currency;
    display_breakdown(&session.breakdown(), currency);

    let missing = session.missing_required();
    if !missing.is_empty() {
        let names: Vec<&str> = missing.iter().map(|v| v.name.as_str()).collect();
        println!("Note: required options not chosen: {}", names.join(", "));
        println!();
    }
}

/// Display a confirmed line's payload as JSON.
pub fn display_payload(line: &CartLine) -> serde_json::Result<()> {
    println!("{}", serde_json::to_string_pretty(line)?);
    Ok(())
}

/// Display all cart lines with their totals.
pub fn display_cart(lines: &[CartLine]) {
    if lines.is_empty() {
        println!("Cart is empty.");
        return;
    }

    println!();
    println!("=== Cart ({} lines) ===", lines.len());
    println!();

    let max_name_len = lines.iter().map(|l| l.item.name.len()).max().unwrap_or(10);

    for (i, line) in lines.iter().enumerate() {
        let detail = match &line.customization {
            Customization::Rich(rich) => {
                let picked = rich.size.iter().count()
                    + rich.extras.len()
                    + rich.addons.len()
                    + rich.substitutes.len();
                format!("{} options", picked)
            }
            Customization::Legacy(legacy) => {
                if legacy.extras.is_empty() {
                    legacy.size.clone()
                } else {
                    format!("{}, {}", legacy.size, legacy.extras.join(", "))
                }
            }
        };

        println!(
            "{:>3}. {:<width$} x{:<3} {:>12}  [{}]",
            i + 1,
            line.item.name,
            line.quantity,
            format_price(line.total, &line.item.currency),
            detail,
            width = max_name_len
        );
    }

    println!();
}
