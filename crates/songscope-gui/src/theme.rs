//! Visual styling for the Songscope dashboard.

use egui::{Color32, CornerRadius, Stroke, Style, Visuals};
use songscope_registry::Rgb;

/// Theme colors for the dashboard.
pub struct Theme {
    /// Main window background color.
    pub background: Color32,
    /// Panel/card background color.
    pub panel_bg: Color32,
    /// Plot area background color.
    pub plot_bg: Color32,
    /// Primary accent color (brush fill, badges, radar area).
    pub accent: Color32,
    /// Primary text color.
    pub text_primary: Color32,
    /// Secondary/muted text color.
    pub text_secondary: Color32,
    /// Grid lines and axes.
    pub grid: Color32,
    /// Outline of the hovered point.
    pub hover: Color32,
    /// Lasso toggle while lasso mode is on.
    pub lasso_on: Color32,
    /// Lasso toggle while lasso mode is off.
    pub lasso_off: Color32,
    /// Error text.
    pub error: Color32,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            background: Color32::from_rgb(22, 22, 30),
            panel_bg: Color32::from_rgb(32, 32, 42),
            plot_bg: Color32::from_rgb(18, 18, 24),
            accent: Color32::from_rgb(0x66, 0x7E, 0xEA),
            text_primary: Color32::from_rgb(230, 230, 235),
            text_secondary: Color32::from_rgb(150, 150, 160),
            grid: Color32::from_rgb(70, 70, 82),
            hover: Color32::from_rgb(0xFF, 0xD7, 0x00),
            lasso_on: Color32::from_rgb(0x10, 0xB9, 0x81),
            lasso_off: Color32::from_rgb(0x6B, 0x72, 0x80),
            error: Color32::from_rgb(220, 100, 100),
        }
    }
}

impl Theme {
    /// Apply the theme to an egui context.
    pub fn apply(&self, ctx: &egui::Context) {
        let mut style = Style::default();

        let mut visuals = Visuals::dark();

        visuals.window_fill = self.panel_bg;
        visuals.panel_fill = self.panel_bg;
        visuals.extreme_bg_color = self.background;
        visuals.faint_bg_color = Color32::from_rgb(38, 38, 50);

        visuals.widgets.noninteractive.bg_fill = self.panel_bg;
        visuals.widgets.noninteractive.fg_stroke = Stroke::new(1.0, self.text_secondary);
        visuals.widgets.noninteractive.corner_radius = CornerRadius::same(4);

        visuals.widgets.inactive.bg_fill = Color32::from_rgb(45, 45, 58);
        visuals.widgets.inactive.fg_stroke = Stroke::new(1.0, self.text_primary);
        visuals.widgets.inactive.corner_radius = CornerRadius::same(4);

        visuals.widgets.hovered.bg_fill = Color32::from_rgb(55, 55, 72);
        visuals.widgets.hovered.fg_stroke = Stroke::new(1.5, self.accent);
        visuals.widgets.hovered.corner_radius = CornerRadius::same(4);

        visuals.widgets.active.bg_fill = Color32::from_rgb(65, 65, 86);
        visuals.widgets.active.fg_stroke = Stroke::new(2.0, self.accent);
        visuals.widgets.active.corner_radius = CornerRadius::same(4);

        visuals.selection.bg_fill = self.accent.gamma_multiply(0.3);
        visuals.selection.stroke = Stroke::new(1.0, self.accent);

        visuals.override_text_color = Some(self.text_primary);

        style.visuals = visuals;

        style.spacing.item_spacing = egui::vec2(8.0, 6.0);
        style.spacing.window_margin = egui::Margin::same(12);
        style.spacing.button_padding = egui::vec2(8.0, 4.0);

        ctx.set_style(style);
    }

    /// Heatmap cell color: red for negative, green for positive correlation.
    pub fn correlation_color(&self, r: f64) -> Color32 {
        let t = ((r.clamp(-1.0, 1.0) + 1.0) / 2.0) as f32;
        to_color32(songscope_registry::Palette::RdYlGn.sample(t))
    }
}

/// Convert a registry color.
pub fn to_color32(rgb: Rgb) -> Color32 {
    Color32::from_rgb(rgb.0, rgb.1, rgb.2)
}

/// Same color at `opacity` in `[0, 1]`.
pub fn with_opacity(color: Color32, opacity: f32) -> Color32 {
    let [r, g, b, _] = color.to_array();
    Color32::from_rgba_unmultiplied(r, g, b, (opacity.clamp(0.0, 1.0) * 255.0).round() as u8)
}
