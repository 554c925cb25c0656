//! UI Theme - colors, icons and column widths shared by all output.

use crossterm::style::Color;

/// Default theme for ntrim output
#[derive(Debug, Clone, Default)]
pub struct Theme {
    /// Colors for different UI elements
    pub colors: ColorScheme,
    /// Status icons
    pub icons: Icons,
    /// Column widths
    pub layout: Layout,
}

/// Color scheme for UI elements
#[derive(Debug, Clone)]
pub struct ColorScheme {
    /// Package names (primary content)
    pub package_name: Color,
    /// Sizes and secondary info
    pub secondary: Color,
    /// Headers and labels
    pub header: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self {
            package_name: Color::Cyan,
            secondary: Color::DarkGrey,
            header: Color::DarkGrey,
            success: Color::Green,
            warning: Color::Yellow,
            error: Color::Red,
        }
    }
}

/// Status icons for different states
#[derive(Debug, Clone)]
pub struct Icons {
    pub success: &'static str,
    pub error: &'static str,
    pub warning: &'static str,
    pub info: &'static str,
}

impl Default for Icons {
    fn default() -> Self {
        Self {
            success: "✓",
            error: "✗",
            warning: "⚠",
            info: "ℹ",
        }
    }
}

/// Column widths for summary and plan listings
#[derive(Debug, Clone)]
pub struct Layout {
    /// Width of the label column in the summary
    pub label_width: usize,
    /// Width allocated for package name column
    pub name_width: usize,
    /// Width allocated for version column
    pub version_width: usize,
    /// Width allocated for size column
    pub size_width: usize,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            label_width: 12,
            name_width: 40,
            version_width: 16,
            size_width: 12,
        }
    }
}
