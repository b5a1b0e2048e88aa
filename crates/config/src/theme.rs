// Board themes
//
// Built-in dark/light themes plus user themes loaded from JSON:
//
// {"name": "Paper", "dark": false,
//  "colors": {"inside": "#eeeeee", "font": "#000000"}}
//
// Colors a user theme leaves out come from the built-in theme it is based on.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::Color;

/// Where the active theme comes from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "type", content = "value")]
pub enum ThemeSource {
    #[default]
    Dark,
    Light,
    /// Theme file: a path, `~/` path, or a file name in the themes directory
    Custom(String),
}

#[derive(Debug, Clone, Deserialize)]
struct ThemeFile {
    name: String,
    #[serde(default = "default_dark")]
    dark: bool,
    #[serde(default)]
    colors: ThemeFileColors,
}

fn default_dark() -> bool {
    true
}

#[derive(Debug, Clone, Default, Deserialize)]
struct ThemeFileColors {
    inside: Option<String>,
    font: Option<String>,
}

/// Two-entry palette used by the raster canvas.
///
/// Pixels only ever store an index into this palette, so swapping themes
/// recolors a canvas without touching its content.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub background: Color,
    pub foreground: Color,
}

impl Palette {
    pub const fn new(background: Color, foreground: Color) -> Self {
        Self { background, foreground }
    }
}

impl Default for Palette {
    fn default() -> Self {
        ThemeColors::dark().canvas_palette()
    }
}

/// Resolved theme colors
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThemeColors {
    /// Task body fill
    pub inside: Color,
    /// Text and pencil ink
    pub font: Color,
}

impl ThemeColors {
    pub fn dark() -> Self {
        ThemeColors {
            inside: Color::from_hex(0x0f172a),
            font: Color::from_hex(0xf1f5f9),
        }
    }

    pub fn light() -> Self {
        ThemeColors {
            inside: Color::from_hex(0xf1f5f9),
            font: Color::from_hex(0x0f172a),
        }
    }

    /// Canvas palette: task fill as background, font color as ink
    pub fn canvas_palette(&self) -> Palette {
        Palette::new(self.inside, self.font)
    }

    fn from_file(file: &ThemeFile) -> Self {
        let base = if file.dark { Self::dark() } else { Self::light() };
        let pick = |hex: &Option<String>, fallback: Color| {
            hex.as_deref().and_then(parse_hex).unwrap_or(fallback)
        };

        ThemeColors {
            inside: pick(&file.colors.inside, base.inside),
            font: pick(&file.colors.font, base.font),
        }
    }
}

/// Parse `#rrggbb` or `#rgb`.
pub fn parse_hex(hex: &str) -> Option<Color> {
    let digits = hex.trim().trim_start_matches('#');
    let value = u32::from_str_radix(digits, 16).ok()?;
    match digits.len() {
        6 => Some(Color::from_hex(value)),
        3 => {
            let (r, g, b) = ((value >> 8) & 0xF, (value >> 4) & 0xF, value & 0xF);
            Some(Color::from_hex((r * 0x11) << 16 | (g * 0x11) << 8 | b * 0x11))
        }
        _ => None,
    }
}

/// Active theme and where it came from
pub struct ThemeManager {
    source: ThemeSource,
    current: ThemeColors,
    current_name: String,
}

impl ThemeManager {
    pub fn new(source: ThemeSource) -> Self {
        let (current, current_name) = resolve(&source);
        ThemeManager { source, current, current_name }
    }

    pub fn theme(&self) -> ThemeColors {
        self.current
    }

    /// Palette for canvases under the current theme
    pub fn palette(&self) -> Palette {
        self.current.canvas_palette()
    }

    pub fn name(&self) -> &str {
        &self.current_name
    }

    pub fn source(&self) -> &ThemeSource {
        &self.source
    }

    pub fn set_source(&mut self, source: ThemeSource) {
        self.source = source;
        self.reload();
    }

    /// Re-read the theme; picks up edits to a custom theme file.
    pub fn reload(&mut self) {
        let (theme, name) = resolve(&self.source);
        self.current = theme;
        self.current_name = name;
    }

    /// `<config_dir>/taskboard/themes`
    pub fn custom_themes_dir() -> Option<PathBuf> {
        Some(dirs::config_dir()?.join("taskboard").join("themes"))
    }
}

fn resolve(source: &ThemeSource) -> (ThemeColors, String) {
    match source {
        ThemeSource::Dark => (ThemeColors::dark(), "Dark".into()),
        ThemeSource::Light => (ThemeColors::light(), "Light".into()),
        ThemeSource::Custom(spec) => match load_theme_file(spec) {
            Ok(file) => (ThemeColors::from_file(&file), file.name),
            Err(e) => {
                log::warn!("Failed to load theme {}: {}", spec, e);
                (ThemeColors::dark(), "Dark (fallback)".into())
            }
        },
    }
}

fn load_theme_file(spec: &str) -> Result<ThemeFile, String> {
    let path = theme_path(spec).ok_or_else(|| "no home or config directory".to_string())?;
    let content = fs::read_to_string(&path).map_err(|e| format!("{}: {}", path.display(), e))?;
    serde_json::from_str(&content).map_err(|e| format!("{}: {}", path.display(), e))
}

fn theme_path(spec: &str) -> Option<PathBuf> {
    if let Some(rest) = spec.strip_prefix("~/") {
        return Some(dirs::home_dir()?.join(rest));
    }
    let path = Path::new(spec);
    if path.components().count() > 1 || path.is_absolute() {
        return Some(path.to_path_buf());
    }
    // Bare file name: look in the themes directory
    Some(ThemeManager::custom_themes_dir()?.join(spec))
}
