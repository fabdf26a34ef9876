use egui::{Color32, RichText, ScrollArea, Ui};

use crate::models::Subreddit;
use crate::theme::AppTheme;

/// Renders the subreddit list, marking the entry whose url is `active_url`.
/// Returns the subreddit the user clicked this frame, if any.
pub fn show(
    ui: &mut Ui,
    theme: &AppTheme,
    items: &[Subreddit],
    active_url: Option<&str>,
) -> Option<Subreddit> {
    let mut selected = None;

    if items.is_empty() {
        ui.label(
            RichText::new("No subreddits yet")
                .color(theme.secondary_text)
                .italics(),
        );
        return None;
    }

    ScrollArea::vertical()
        .id_salt("navigation_scroll")
        .auto_shrink([false, false])
        .show(ui, |ui| {
            for item in items {
                let is_active = active_url == Some(item.url());
                let text = if is_active {
                    RichText::new(item.display_name())
                        .size(15.0)
                        .color(theme.highlight)
                        .strong()
                } else {
                    RichText::new(item.display_name())
                        .size(15.0)
                        .color(theme.text)
                };

                let mut response = ui.add_sized(
                    [ui.available_width(), 26.0],
                    egui::Button::new(text)
                        .fill(if is_active {
                            theme.card_background
                        } else {
                            Color32::TRANSPARENT
                        })
                        .stroke(if is_active {
                            egui::Stroke::new(1.5, theme.highlight)
                        } else {
                            egui::Stroke::NONE
                        }),
                );

                if let Some(summary) = item.summary() {
                    response = response.on_hover_text(summary);
                }

                if response.clicked() {
                    selected = Some(item.clone());
                }
            }
        });

    selected
}
