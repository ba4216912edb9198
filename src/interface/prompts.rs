use dialoguer::{Confirm, Input, Select};
use strsim::jaro_winkler;

use crate::error::{CustomizeError, Result};
use crate::interface::render::{display_session, format_modifier, format_price, variant_label};
use crate::models::{Variant, VariantCatalog, VariantId, VariantKind};
use crate::pricing::constants::{LEGACY_EXTRAS, LEGACY_SIZES, NAME_MATCH_THRESHOLD};
use crate::state::CustomizationSession;

/// What one menu entry in the customization picker does.
#[derive(Debug, Clone, Copy)]
enum Action {
    Toggle(VariantId, VariantKind),
    LegacySize(&'static str),
    LegacyExtra(&'static str),
    Increase,
    Decrease,
    Instructions,
    Confirm,
    Cancel,
}

fn catalog_entries(session: &CustomizationSession, catalog: &VariantCatalog) -> Vec<(String, Action)> {
    let currency = &session.item().currency;
    let mut entries = Vec::new();

    for kind in VariantKind::ALL {
        for variant in catalog.group(kind) {
            let selected = session.is_selected(variant.id, kind);
            let marker = match (kind.is_exclusive(), selected) {
                (true, true) => "(•)",
                (true, false) => "( )",
                (false, true) => "[x]",
                (false, false) => "[ ]",
            };
            let required = if variant.is_required { " *" } else { "" };
            entries.push((
                format!(
                    "{} {:<12} {}{}",
                    marker,
                    kind.heading(),
                    variant_label(variant, currency),
                    required
                ),
                Action::Toggle(variant.id, kind),
            ));
        }
    }

    entries
}

fn legacy_entries(session: &CustomizationSession) -> Vec<(String, Action)> {
    let currency = &session.item().currency;
    let Some(selection) = session.legacy_selection() else {
        return Vec::new();
    };

    let sizes = LEGACY_SIZES.iter().map(|&(name, delta)| {
        let marker = if selection.size() == name { "(•)" } else { "( )" };
        (
            format!("{} Size         {} {}", marker, name, format_modifier(delta, currency)),
            Action::LegacySize(name),
        )
    });

    let extras = LEGACY_EXTRAS.iter().map(|&(name, delta)| {
        let marker = if selection.is_extra_selected(name) { "[x]" } else { "[ ]" };
        (
            format!("{} Extras       {} {}", marker, name, format_modifier(delta, currency)),
            Action::LegacyExtra(name),
        )
    });

    sizes.chain(extras).collect()
}

fn control_entries(session: &CustomizationSession) -> Vec<(String, Action)> {
    let instructions = session.special_instructions().trim();
    vec![
        (format!("Quantity: {}  (+1)", session.quantity()), Action::Increase),
        (format!("Quantity: {}  (-1)", session.quantity()), Action::Decrease),
        (
            if instructions.is_empty() {
                "Special instructions: (none)".to_string()
            } else {
                format!("Special instructions: {}", instructions)
            },
            Action::Instructions,
        ),
        (
            format!(
                "Add to cart - {}",
                format_price(session.total(), &session.item().currency)
            ),
            Action::Confirm,
        ),
        ("Cancel".to_string(), Action::Cancel),
    ]
}

/// Run the interactive picker until the user confirms or cancels.
///
/// Returns `true` on confirm. The session is left in its final state.
pub fn customize_interactively(session: &mut CustomizationSession) -> Result<bool> {
    let mut cursor = 0;

    loop {
        display_session(session);

        let mut entries = match session.catalog() {
            Some(catalog) => catalog_entries(session, catalog),
            None => legacy_entries(session),
        };
        entries.extend(control_entries(session));

        let labels: Vec<&str> = entries.iter().map(|(label, _)| label.as_str()).collect();
        cursor = cursor.min(labels.len().saturating_sub(1));

        let choice = Select::new()
            .with_prompt(format!("Customize '{}'", session.item().name))
            .items(&labels)
            .default(cursor)
            .interact()?;
        cursor = choice;

        match entries[choice].1 {
            Action::Toggle(id, kind) => {
                session.toggle_variant(id, kind)?;
            }
            Action::LegacySize(name) => session.select_legacy_size(name)?,
            Action::LegacyExtra(name) => {
                session.toggle_legacy_extra(name)?;
            }
            Action::Increase => session.increment_quantity(),
            Action::Decrease => session.decrement_quantity(),
            Action::Instructions => {
                let text = prompt_instructions(session.special_instructions())?;
                session.set_special_instructions(text);
            }
            Action::Confirm => return Ok(true),
            Action::Cancel => return Ok(false),
        }
    }
}

/// Prompt for free-text instructions, prefilled with the current text.
pub fn prompt_instructions(current: &str) -> Result<String> {
    let text: String = Input::new()
        .with_prompt("Special instructions (leave empty for none)")
        .with_initial_text(current)
        .allow_empty(true)
        .interact_text()?;
    Ok(text)
}

/// Prompt for yes/no confirmation.
pub fn prompt_yes_no(prompt: &str, default: bool) -> Result<bool> {
    Ok(Confirm::new()
        .with_prompt(prompt)
        .default(default)
        .interact()?)
}

/// Resolve a typed name to a variant in one group.
///
/// Exact (case-insensitive) names win; otherwise the closest name by
/// Jaro-Winkler similarity above [`NAME_MATCH_THRESHOLD`].
pub fn match_variant<'a>(catalog: &'a VariantCatalog, kind: VariantKind, input: &str) -> Result<&'a Variant> {
    if let Some(variant) = catalog.find_by_name(kind, input) {
        return Ok(variant);
    }

    let wanted = input.trim().to_lowercase();
    catalog
        .group(kind)
        .iter()
        .map(|v| (v, jaro_winkler(&v.name.to_lowercase(), &wanted)))
        .filter(|(_, score)| *score > NAME_MATCH_THRESHOLD)
        .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(v, _)| v)
        .ok_or_else(|| CustomizeError::VariantNotFound(format!("{} '{}'", kind, input)))
}

/// Resolve a typed name against a fixed flat-rate table, the same way.
pub fn match_legacy_name(table: &[(&'static str, i64)], input: &str) -> Result<&'static str> {
    let wanted = input.trim().to_lowercase();
    if let Some(&(name, _)) = table.iter().find(|(name, _)| name.to_lowercase() == wanted) {
        return Ok(name);
    }

    table
        .iter()
        .map(|&(name, _)| (name, jaro_winkler(&name.to_lowercase(), &wanted)))
        .filter(|(_, score)| *score > NAME_MATCH_THRESHOLD)
        .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(name, _)| name)
        .ok_or_else(|| CustomizeError::VariantNotFound(input.to_string()))
}
