// Color palette shared by all views
use ratatui::style::Color;

/// Reject / destructive actions
pub const ACCENT_PRIMARY: Color = Color::Rgb(239, 83, 80);
/// Accept / positive actions
pub const ACCENT_SECONDARY: Color = Color::Rgb(102, 187, 106);
/// Titles and highlighted keys
pub const ACCENT_HIGHLIGHT: Color = Color::Rgb(171, 71, 188);
/// Reload control
pub const ACCENT_RELOAD: Color = Color::Rgb(255, 202, 40);

pub const BG_DARK: Color = Color::Rgb(18, 18, 18);
pub const TEXT_PRIMARY: Color = Color::Rgb(236, 236, 236);
pub const TEXT_SECONDARY: Color = Color::Rgb(150, 150, 150);
pub const TEXT_DISABLED: Color = Color::Rgb(80, 80, 80);
pub const BORDER_COLOR: Color = Color::Rgb(70, 70, 70);
