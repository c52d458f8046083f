//! Handler functions for the `piper config` subcommands.
//!
//! Each handler loads the document from the path it is given, performs one
//! query or mutation through `crate::profiles`, saves if it mutated, and prints
//! a status line through `crate::ui`. Nothing is cached between calls.

use anyhow::Result;
use comfy_table::Color;
use std::path::Path;
use tracing::warn;

use crate::document::{ConfigDocument, Profile};
use crate::profiles::{self, CurrentProfile};
use crate::ui::Ui;

/// Show the current profile and every configured profile
pub fn view(config: &Path, ui: &Ui) -> Result<()> {
    let doc = ConfigDocument::load(config)?;

    match profiles::current(&doc) {
        CurrentProfile::Unset => {
            ui.println(format!("Current profile: {}", ui.dim("(none)")));
        }
        CurrentProfile::Active(profile) => {
            ui.println(format!("Current profile: {}", ui.bold(&profile.name)));
        }
        CurrentProfile::Dangling(name) => {
            ui.println(format!("Current profile: {}", ui.bold(name)));
            ui.warn(format!("Current profile '{}' does not match any configured profile", name));
        }
    }
    ui.newline();

    ui.section("Profiles");
    if doc.profiles.is_empty() {
        ui.println(ui.dim("  (none)"));
        return Ok(());
    }
    ui.println(profile_table(&doc, ui).to_string());

    Ok(())
}

/// Make `name` the current profile
pub fn use_profile(config: &Path, name: &str, ui: &Ui) -> Result<()> {
    let mut doc = ConfigDocument::load(config)?;
    profiles::set_current(&mut doc, name)?;
    doc.save(config)?;

    ui.ok(format!("Switched to profile '{}'", name));
    Ok(())
}

/// Print the current profile name. Stdout carries only the name.
pub fn current_profile(config: &Path, ui: &Ui) -> Result<()> {
    let doc = ConfigDocument::load(config)?;

    match profiles::current(&doc) {
        CurrentProfile::Unset => ui.warn_stderr("No current profile set"),
        CurrentProfile::Active(profile) => ui.println(&profile.name),
        CurrentProfile::Dangling(name) => {
            warn!(profile = name, "current profile does not match any configured profile");
            ui.println(name);
        }
    }

    Ok(())
}

/// Append a new profile
pub fn add_profile(config: &Path, profile: Profile, ui: &Ui) -> Result<()> {
    let mut doc = ConfigDocument::load(config)?;
    let name = profile.name.clone();
    profiles::add_profile(&mut doc, profile)?;
    doc.save(config)?;

    ui.ok(format!("Added profile '{}'", name));
    Ok(())
}

/// Delete a profile by name
pub fn remove_profile(config: &Path, name: &str, ui: &Ui) -> Result<()> {
    let mut doc = ConfigDocument::load(config)?;
    let was_current = doc.current_profile == name;
    profiles::remove_profile(&mut doc, name)?;
    doc.save(config)?;

    ui.ok(format!("Removed profile '{}'", name));
    if was_current {
        ui.info("Current profile cleared");
    }
    Ok(())
}

/// List all profiles with provider and server
pub fn list_profiles(config: &Path, ui: &Ui) -> Result<()> {
    let doc = ConfigDocument::load(config)?;

    if profiles::list_profiles(&doc).is_empty() {
        ui.warn("No profiles configured.");
        ui.newline();
        ui.println("Add one with:");
        ui.println(format!(
            "  {} config add-profile <name> <provider> <token> <server>",
            ui.bold("piper")
        ));
        return Ok(());
    }

    ui.println(profile_table(&doc, ui).to_string());
    Ok(())
}

/// Name/provider/server table, marking the current profile. Tokens are never shown.
fn profile_table(doc: &ConfigDocument, ui: &Ui) -> comfy_table::Table {
    let mut table = ui.table();
    table.set_header(vec![
        ui.header_cell(""),
        ui.header_cell("Profile"),
        ui.header_cell("Provider"),
        ui.header_cell("Server"),
    ]);

    for profile in profiles::list_profiles(doc) {
        let is_current = profile.name == doc.current_profile;
        let marker = if is_current { ui.icon_current() } else { " " };
        let name_cell = if is_current {
            ui.colored_cell(&profile.name, Color::Green)
        } else {
            ui.cell(&profile.name)
        };

        table.add_row(vec![
            ui.cell(marker),
            name_cell,
            ui.cell(&profile.provider),
            ui.cell(&profile.server),
        ]);
    }

    table
}
