use std::env;

use ratatui::style::{Color, Modifier, Style};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColorMode {
    TrueColor,
    Ansi256,
    Ansi16,
}

impl ColorMode {
    /// `STUDIO_COLOR_MODE` wins, then `COLORTERM` / `TERM`.
    pub fn detect() -> Self {
        if let Some(mode) = env::var("STUDIO_COLOR_MODE").ok().and_then(|v| Self::parse(&v)) {
            return mode;
        }
        let colorterm = env::var("COLORTERM").unwrap_or_default().to_ascii_lowercase();
        if colorterm.contains("truecolor") || colorterm.contains("24bit") {
            return ColorMode::TrueColor;
        }
        if env::var("TERM").unwrap_or_default().contains("256color") {
            return ColorMode::Ansi256;
        }
        ColorMode::Ansi16
    }

    fn parse(v: &str) -> Option<Self> {
        match v.to_ascii_lowercase().as_str() {
            "24bit" | "truecolor" | "rgb" => Some(ColorMode::TrueColor),
            "256" | "ansi256" => Some(ColorMode::Ansi256),
            "16" | "ansi16" | "ansi" => Some(ColorMode::Ansi16),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum UiGroup {
    Border,
    FocusBorder,
    Dimmed,
    Text,
    Title,
    Accent,
    Selected,
    Success,
    Warn,
    Error,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

#[derive(Clone, Debug)]
pub struct Palette {
    pub fg: Rgb,
    pub dim: Rgb,
    pub border: Rgb,
    pub accent: Rgb,
    pub accent_alt: Rgb,
    pub success: Rgb,
    pub warn: Rgb,
    pub error: Rgb,
}

impl Default for Palette {
    fn default() -> Self {
        // violet gradient of the studio branding
        Self {
            fg: Rgb(226, 228, 240),
            dim: Rgb(120, 124, 150),
            border: Rgb(70, 74, 100),
            accent: Rgb(102, 126, 234),
            accent_alt: Rgb(118, 75, 162),
            success: Rgb(72, 187, 120),
            warn: Rgb(237, 137, 54),
            error: Rgb(229, 62, 62),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Theme {
    pub mode: ColorMode,
    pub palette: Palette,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            mode: ColorMode::detect(),
            palette: Palette::default(),
        }
    }
}

impl Theme {
    pub fn style(&self, group: UiGroup) -> Style {
        let p = &self.palette;
        match group {
            UiGroup::Border => Style::default().fg(self.color(p.border)),
            UiGroup::FocusBorder => Style::default().fg(self.color(p.accent)),
            UiGroup::Dimmed => Style::default().fg(self.color(p.dim)),
            UiGroup::Text => Style::default().fg(self.color(p.fg)),
            UiGroup::Title => Style::default()
                .fg(self.color(p.fg))
                .add_modifier(Modifier::BOLD),
            UiGroup::Accent => Style::default()
                .fg(self.color(p.accent))
                .add_modifier(Modifier::BOLD),
            UiGroup::Selected => Style::default()
                .bg(self.color(p.accent_alt))
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            UiGroup::Success => Style::default()
                .fg(self.color(p.success))
                .add_modifier(Modifier::BOLD),
            UiGroup::Warn => Style::default()
                .fg(self.color(p.warn))
                .add_modifier(Modifier::BOLD),
            UiGroup::Error => Style::default()
                .fg(self.color(p.error))
                .add_modifier(Modifier::BOLD),
        }
    }

    pub fn color(&self, rgb: Rgb) -> Color {
        match self.mode {
            ColorMode::TrueColor => Color::Rgb(rgb.0, rgb.1, rgb.2),
            ColorMode::Ansi256 => Color::Indexed(cube_index(rgb)),
            ColorMode::Ansi16 => nearest_ansi16(rgb),
        }
    }
}

/// Position in the 6x6x6 cube of the xterm palette (16..=231).
fn cube_index(Rgb(r, g, b): Rgb) -> u8 {
    let level = |c: u8| (u16::from(c) * 5 + 127) / 255;
    (16 + 36 * level(r) + 6 * level(g) + level(b)) as u8
}

fn nearest_ansi16(Rgb(r, g, b): Rgb) -> Color {
    const TABLE: [(Color, (i32, i32, i32)); 16] = [
        (Color::Black, (0, 0, 0)),
        (Color::Red, (205, 0, 0)),
        (Color::Green, (0, 205, 0)),
        (Color::Yellow, (205, 205, 0)),
        (Color::Blue, (0, 0, 238)),
        (Color::Magenta, (205, 0, 205)),
        (Color::Cyan, (0, 205, 205)),
        (Color::Gray, (229, 229, 229)),
        (Color::DarkGray, (127, 127, 127)),
        (Color::LightRed, (255, 0, 0)),
        (Color::LightGreen, (0, 255, 0)),
        (Color::LightYellow, (255, 255, 0)),
        (Color::LightBlue, (92, 92, 255)),
        (Color::LightMagenta, (255, 0, 255)),
        (Color::LightCyan, (0, 255, 255)),
        (Color::White, (255, 255, 255)),
    ];
    let (r, g, b) = (i32::from(r), i32::from(g), i32::from(b));
    TABLE
        .iter()
        .min_by_key(|(_, (cr, cg, cb))| (cr - r).pow(2) + (cg - g).pow(2) + (cb - b).pow(2))
        .map_or(Color::White, |(c, _)| *c)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cube_corners() {
        assert_eq!(cube_index(Rgb(0, 0, 0)), 16);
        assert_eq!(cube_index(Rgb(255, 255, 255)), 231);
    }

    #[test]
    fn ansi16_picks_nearest() {
        assert_eq!(nearest_ansi16(Rgb(250, 5, 5)), Color::LightRed);
        assert_eq!(nearest_ansi16(Rgb(10, 10, 10)), Color::Black);
        assert_eq!(nearest_ansi16(Rgb(102, 126, 234)), Color::LightBlue);
    }

    #[test]
    fn parses_overrides() {
        assert_eq!(ColorMode::parse("TrueColor"), Some(ColorMode::TrueColor));
        assert_eq!(ColorMode::parse("256"), Some(ColorMode::Ansi256));
        assert_eq!(ColorMode::parse("mono"), None);
    }
}
