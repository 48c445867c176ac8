use engine::Category;
use ratatui::style::Color;

#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub background: Color,
    pub surface: Color,
    pub text: Color,
    pub text_muted: Color,
    pub accent: Color,
    pub positive: Color,
    pub warning: Color,
    pub error: Color,
    pub border: Color,
    pub border_focused: Color,
    pub selection: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            background: Color::Rgb(8, 12, 16),
            surface: Color::Rgb(20, 26, 32),
            text: Color::Rgb(220, 220, 220),
            text_muted: Color::Rgb(140, 140, 140),
            accent: Color::Rgb(80, 160, 160),
            positive: Color::Rgb(34, 197, 94),
            warning: Color::Rgb(245, 158, 11),
            error: Color::Rgb(200, 80, 80),
            border: Color::Rgb(60, 70, 80),
            border_focused: Color::Rgb(80, 160, 160),
            selection: Color::Rgb(36, 48, 58),
        }
    }
}

impl Theme {
    /// Chart and marker colour of a category.
    pub fn category(&self, category: Category) -> Color {
        rgb(category.color())
    }
}

fn rgb(hex: u32) -> Color {
    let [_, r, g, b] = hex.to_be_bytes();
    Color::Rgb(r, g, b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_colours_split_into_channels() {
        assert_eq!(rgb(0x22C55E), Color::Rgb(0x22, 0xC5, 0x5E));
    }
}
