use egui::{Color32, CornerRadius, Stroke, Visuals};

/// Reddit's own palette: orangered accents on the grey "night mode" or the blue-grey day page.
pub struct AppTheme {
    pub is_dark: bool,
    pub background: Color32,
    pub card_background: Color32,
    pub text: Color32,
    pub secondary_text: Color32,
    pub highlight: Color32,
    pub separator: Color32,
    pub score_high: Color32,
    pub score_medium: Color32,
    pub score_low: Color32,
    pub error: Color32,
    pub button_background: Color32,
    pub button_foreground: Color32,
}

const ORANGERED: Color32 = Color32::from_rgb(255, 69, 0);
const UPVOTE_LIGHT: Color32 = Color32::from_rgb(204, 55, 0);
const LINK_BLUE: Color32 = Color32::from_rgb(0, 121, 211);

impl AppTheme {
    pub fn dark() -> Self {
        Self {
            is_dark: true,
            background: Color32::from_rgb(3, 3, 3),
            card_background: Color32::from_rgb(26, 26, 27),
            text: Color32::from_rgb(215, 218, 220),
            secondary_text: Color32::from_rgb(129, 131, 132),
            highlight: ORANGERED,
            separator: Color32::from_rgb(52, 53, 54),
            score_high: ORANGERED,
            score_medium: Color32::from_rgb(148, 148, 255), // periwinkle
            score_low: Color32::from_rgb(129, 131, 132),
            error: Color32::from_rgb(234, 0, 39),
            button_background: Color32::from_rgb(39, 39, 41),
            button_foreground: Color32::from_rgb(215, 218, 220),
        }
    }

    pub fn light() -> Self {
        Self {
            is_dark: false,
            background: Color32::from_rgb(218, 224, 230),
            card_background: Color32::WHITE,
            text: Color32::from_rgb(26, 26, 27),
            secondary_text: Color32::from_rgb(124, 124, 124),
            highlight: UPVOTE_LIGHT,
            separator: Color32::from_rgb(204, 204, 204),
            score_high: UPVOTE_LIGHT,
            score_medium: LINK_BLUE,
            score_low: Color32::from_rgb(124, 124, 124),
            error: Color32::from_rgb(234, 0, 39),
            button_background: Color32::from_rgb(246, 247, 248),
            button_foreground: LINK_BLUE,
        }
    }

    pub fn for_mode(is_dark_mode: bool) -> Self {
        if is_dark_mode {
            Self::dark()
        } else {
            Self::light()
        }
    }

    /// Starts from egui's stock visuals and only swaps in the page colors and the accent.
    pub fn apply_to_ctx(&self, ctx: &egui::Context) {
        let mut visuals = if self.is_dark {
            Visuals::dark()
        } else {
            Visuals::light()
        };

        visuals.panel_fill = self.background;
        visuals.extreme_bg_color = self.card_background;
        visuals.override_text_color = Some(self.text);
        visuals.widgets.inactive.weak_bg_fill = self.button_background;
        visuals.widgets.inactive.corner_radius = CornerRadius::same(12); // pill buttons
        visuals.widgets.hovered.corner_radius = CornerRadius::same(12);
        visuals.widgets.active.corner_radius = CornerRadius::same(12);
        visuals.selection.bg_fill = self.highlight;
        visuals.selection.stroke = Stroke::new(1.0, self.highlight);
        visuals.hyperlink_color = LINK_BLUE;

        ctx.set_visuals(visuals);
    }

    // Reddit's top-of-month scores run much higher than HN's
    pub fn score_color(&self, score: i64) -> Color32 {
        if score >= 10_000 {
            self.score_high
        } else if score >= 1_000 {
            self.score_medium
        } else {
            self.score_low
        }
    }

    pub fn card_stroke(&self, score: i64) -> Stroke {
        if score >= 10_000 {
            Stroke::new(1.5, self.score_high)
        } else {
            Stroke::new(1.0, self.separator)
        }
    }
}
