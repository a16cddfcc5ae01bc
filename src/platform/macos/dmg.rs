//! `dmgbuild` settings generation.
//!
//! The settings file is Python. Every value is converted to a Python literal
//! here and substituted verbatim, so the template itself contains no
//! expressions.
//!
//! Each top-level file appears once in `files` and once in
//! `icon_locations`; dmgbuild has no separate removal list, the image is
//! discarded as a whole.

use crate::error::{RenderError, Result};
use crate::manifest::FileManifest;
use crate::platform::template;
use crate::platform::Emitter;
use crate::settings::DmgSettings;
use crate::version::ProductVersion;
use serde::Serialize;
use std::fmt::Display;

const TARGET: &str = "dmg";
const TEMPLATE: &str = include_str!("templates/dmgbuild.settings.py.hbs");

/// Python string literal.
fn py_str(value: &str) -> String {
    let mut literal = String::with_capacity(value.len() + 2);
    literal.push('"');
    for c in value.chars() {
        match c {
            '\\' => literal.push_str("\\\\"),
            '"' => literal.push_str("\\\""),
            '\n' => literal.push_str("\\n"),
            '\r' => literal.push_str("\\r"),
            '\t' => literal.push_str("\\t"),
            c if c.is_control() => literal.push_str(&format!("\\x{:02x}", c as u32)),
            c => literal.push(c),
        }
    }
    literal.push('"');
    literal
}

fn py_bool(value: bool) -> &'static str {
    if value { "True" } else { "False" }
}

fn py_pair<T: Display>((a, b): (T, T)) -> String {
    format!("({a}, {b})")
}

fn py_tuple(items: &[String]) -> String {
    match items {
        [single] => format!("({single},)"),
        _ => format!("({})", items.join(", ")),
    }
}

fn py_dict(items: &[(String, String)]) -> String {
    let body: Vec<String> = items.iter().map(|(k, v)| format!("{k}: {v}")).collect();
    format!("{{{}}}", body.join(", "))
}

fn py_dict_multiline(items: &[(String, String)]) -> String {
    let mut literal = String::from("{\n");
    for (key, value) in items {
        literal.push_str(&format!("    {key}: {value},\n"));
    }
    literal.push('}');
    literal
}

#[derive(Serialize)]
struct DmgDocument {
    format: String,
    files: String,
    badge_icon: String,
    symlinks: String,
    icon_locations: String,
    background: String,
    show_status_bar: &'static str,
    show_tab_view: &'static str,
    show_toolbar: &'static str,
    show_pathbar: &'static str,
    show_sidebar: &'static str,
    sidebar_width: u32,
    window_rect: String,
    default_view: String,
    show_icon_preview: &'static str,
    grid_offset: String,
    grid_spacing: u32,
    scroll_position: String,
    label_pos: String,
    text_size: u32,
    icon_size: u32,
    list_icon_size: u32,
    list_text_size: u32,
    list_sort_by: String,
    list_use_relative_dates: &'static str,
    list_columns: String,
    list_column_widths: String,
    list_column_sort_directions: String,
}

impl DmgSettings {
    /// Position of every item in the image window, files first, then
    /// symlinks.
    ///
    /// Items without a configured position go on the row of the rightmost
    /// configured item, `grid_spacing` apart.
    pub fn icon_positions(&self, manifest: &FileManifest) -> Result<Vec<(String, (i32, i32))>> {
        let mut names: Vec<&str> = manifest.ids().collect();
        for link in self.symlinks.keys() {
            if names.contains(&link.as_str()) {
                return Err(unrenderable(format!(
                    "symlink '{link}' has the same name as a file"
                )));
            }
            names.push(link);
        }

        if let Some(unknown) = self
            .icon_locations
            .keys()
            .find(|name| !names.contains(&name.as_str()))
        {
            return Err(unrenderable(format!(
                "icon location '{unknown}' names neither a file nor a symlink"
            )));
        }

        let spacing = i32::try_from(self.grid_spacing).unwrap_or(i32::MAX);
        let mut next = self
            .icon_locations
            .values()
            .max_by_key(|(x, _)| *x)
            .map(|&(x, y)| (x.saturating_add(spacing), y))
            .unwrap_or((spacing, spacing));

        let positions = names
            .into_iter()
            .map(|name| {
                let position = match self.icon_locations.get(name) {
                    Some(&configured) => configured,
                    None => {
                        let auto = next;
                        next.0 = next.0.saturating_add(spacing);
                        log::debug!("Placing '{name}' at ({}, {})", auto.0, auto.1);
                        auto
                    }
                };
                (name.to_string(), position)
            })
            .collect();
        Ok(positions)
    }
}

fn unrenderable(reason: String) -> crate::error::PackagingError {
    RenderError::UnrenderableManifest {
        target: TARGET,
        reason,
    }
    .into()
}

impl Emitter for DmgSettings {
    fn render(&self, version: &ProductVersion, manifest: &FileManifest) -> Result<String> {
        let positions = self.icon_positions(manifest)?;

        let files: Vec<String> = manifest
            .iter()
            .map(|entry| {
                if entry.source() == entry.id() {
                    py_str(entry.id())
                } else {
                    format!("({}, {})", py_str(entry.source()), py_str(entry.id()))
                }
            })
            .collect();

        let badge_icon = match (manifest.main_executable(), &self.badge_icon) {
            (Some(main), Some(badge)) => py_str(&format!("{}/{}", main.id(), badge)),
            _ => "None".to_string(),
        };

        let symlinks: Vec<(String, String)> = self
            .symlinks
            .iter()
            .map(|(name, target)| (py_str(name), py_str(target)))
            .collect();

        let icon_locations: Vec<(String, String)> = positions
            .into_iter()
            .map(|(name, position)| (py_str(&name), py_pair(position)))
            .collect();

        let list_columns: Vec<String> = self.list_columns.iter().map(|c| py_str(c)).collect();
        let widths: Vec<(String, String)> = self
            .list_column_settings
            .iter()
            .map(|c| (py_str(&c.name), c.width.to_string()))
            .collect();
        let directions: Vec<(String, String)> = self
            .list_column_settings
            .iter()
            .map(|c| (py_str(&c.name), py_str(&c.sort_direction)))
            .collect();

        let document = DmgDocument {
            format: py_str(&self.format),
            files: format!("[{}]", files.join(", ")),
            badge_icon,
            symlinks: py_dict(&symlinks),
            icon_locations: py_dict(&icon_locations),
            background: py_str(&self.background),
            show_status_bar: py_bool(self.show_status_bar),
            show_tab_view: py_bool(self.show_tab_view),
            show_toolbar: py_bool(self.show_toolbar),
            show_pathbar: py_bool(self.show_pathbar),
            show_sidebar: py_bool(self.show_sidebar),
            sidebar_width: self.sidebar_width,
            window_rect: format!(
                "({}, {})",
                py_pair(self.window_position),
                py_pair(self.window_size)
            ),
            default_view: py_str(&self.default_view),
            show_icon_preview: py_bool(self.show_icon_preview),
            grid_offset: py_pair(self.grid_offset),
            grid_spacing: self.grid_spacing,
            scroll_position: py_pair(self.scroll_position),
            label_pos: py_str(&self.label_pos),
            text_size: self.text_size,
            icon_size: self.icon_size,
            list_icon_size: self.list_icon_size,
            list_text_size: self.list_text_size,
            list_sort_by: py_str(&self.list_sort_by),
            list_use_relative_dates: py_bool(self.list_use_relative_dates),
            list_columns: py_tuple(&list_columns),
            list_column_widths: py_dict_multiline(&widths),
            list_column_sort_directions: py_dict_multiline(&directions),
        };

        log::debug!(
            "Rendering dmgbuild settings for version {} with {} file(s)",
            version.dotted_triple(),
            manifest.len()
        );
        template::render(
            "dmgbuild.settings.py",
            TEMPLATE,
            handlebars::no_escape,
            &document,
        )
    }
}
