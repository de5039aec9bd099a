use std::collections::HashMap;

use ratatui::style::Color;

use crate::model::{ThemeKind, UiConfig};

/// Parsed color theme for the TUI
#[derive(Debug, Clone)]
pub struct Theme {
    pub kind: ThemeKind,
    pub background: Color,
    /// Column and card fill
    pub surface: Color,
    pub text: Color,
    pub text_bright: Color,
    pub highlight: Color,
    pub dim: Color,
    pub red: Color,
    pub yellow: Color,
    pub green: Color,
    pub selection_bg: Color,
    pub selection_border: Color,
    /// Drop marker shown while dragging
    pub placeholder: Color,
    /// Per-tag colors
    pub tag_colors: HashMap<String, Color>,
}

fn default_tag_colors() -> HashMap<String, Color> {
    let mut tag_colors = HashMap::new();
    tag_colors.insert("bug".into(), Color::Rgb(0xFF, 0x44, 0x44));
    tag_colors.insert("urgent".into(), Color::Rgb(0xFF, 0x8C, 0x00));
    tag_colors.insert("design".into(), Color::Rgb(0x44, 0xDD, 0xFF));
    tag_colors.insert("feature".into(), Color::Rgb(0x44, 0xFF, 0x88));
    tag_colors
}

impl Theme {
    pub fn dark() -> Self {
        Theme {
            kind: ThemeKind::Dark,
            background: Color::Rgb(0x0F, 0x11, 0x1A),
            surface: Color::Rgb(0x1A, 0x1D, 0x2B),
            text: Color::Rgb(0xC8, 0xCC, 0xE0),
            text_bright: Color::Rgb(0xFF, 0xFF, 0xFF),
            highlight: Color::Rgb(0x7C, 0x9C, 0xFF),
            dim: Color::Rgb(0x6B, 0x70, 0x8C),
            red: Color::Rgb(0xFF, 0x55, 0x55),
            yellow: Color::Rgb(0xFF, 0xD7, 0x00),
            green: Color::Rgb(0x4A, 0xDE, 0x80),
            selection_bg: Color::Rgb(0x2A, 0x30, 0x4A),
            selection_border: Color::Rgb(0x7C, 0x9C, 0xFF),
            placeholder: Color::Rgb(0x4A, 0xDE, 0x80),
            tag_colors: default_tag_colors(),
        }
    }

    pub fn light() -> Self {
        Theme {
            kind: ThemeKind::Light,
            background: Color::Rgb(0xF4, 0xF5, 0xF7),
            surface: Color::Rgb(0xFF, 0xFF, 0xFF),
            text: Color::Rgb(0x2E, 0x34, 0x40),
            text_bright: Color::Rgb(0x00, 0x00, 0x00),
            highlight: Color::Rgb(0x25, 0x63, 0xEB),
            dim: Color::Rgb(0x8A, 0x90, 0x9C),
            red: Color::Rgb(0xDC, 0x26, 0x26),
            yellow: Color::Rgb(0xB4, 0x83, 0x09),
            green: Color::Rgb(0x16, 0xA3, 0x4A),
            selection_bg: Color::Rgb(0xDB, 0xE6, 0xFE),
            selection_border: Color::Rgb(0x25, 0x63, 0xEB),
            placeholder: Color::Rgb(0x16, 0xA3, 0x4A),
            tag_colors: default_tag_colors(),
        }
    }

    /// Theme for `kind`, with `[ui.colors]` (dark) or `[ui.light_colors]`
    /// (light) overrides and `[ui.tag_colors]` applied
    pub fn from_config(kind: ThemeKind, ui: &UiConfig) -> Self {
        let (mut theme, overrides) = match kind {
            ThemeKind::Dark => (Theme::dark(), &ui.colors),
            ThemeKind::Light => (Theme::light(), &ui.light_colors),
        };

        for (key, value) in overrides {
            let Some(color) = parse_hex_color(value) else {
                tracing::warn!(key = %key, value = %value, "ignoring invalid color");
                continue;
            };
            match key.as_str() {
                "background" => theme.background = color,
                "surface" => theme.surface = color,
                "text" => theme.text = color,
                "text_bright" => theme.text_bright = color,
                "highlight" => theme.highlight = color,
                "dim" => theme.dim = color,
                "red" => theme.red = color,
                "yellow" => theme.yellow = color,
                "green" => theme.green = color,
                "selection_bg" => theme.selection_bg = color,
                "selection_border" => theme.selection_border = color,
                "placeholder" => theme.placeholder = color,
                _ => {}
            }
        }

        for (tag, value) in &ui.tag_colors {
            if let Some(color) = parse_hex_color(value) {
                theme.tag_colors.insert(tag.clone(), color);
            }
        }

        theme
    }

    /// Get the color for a tag, falling back to dim text
    pub fn tag_color(&self, tag: &str) -> Color {
        self.tag_colors.get(tag).copied().unwrap_or(self.dim)
    }
}

/// Parse a hex color string like "#FF4444" into an RGB Color
fn parse_hex_color(hex: &str) -> Option<Color> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some(Color::Rgb(channel(0)?, channel(2)?, channel(4)?))
}
