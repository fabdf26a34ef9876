use egui::{CornerRadius, RichText, Ui};

use crate::models::Story;
use crate::theme::AppTheme;

/// Something the user asked for while looking at the list.
#[derive(Debug, Clone, PartialEq)]
pub enum StoryAction {
    OpenLink(String),
    CopyLink(String),
}

/// Renders `stories` as cards numbered from `first_rank`.
pub fn show(
    ui: &mut Ui,
    theme: &AppTheme,
    stories: &[Story],
    first_rank: usize,
    base_url: &str,
) -> Option<StoryAction> {
    let mut action = None;
    let now = chrono::Utc::now();

    if stories.is_empty() {
        ui.label(
            RichText::new("No stories on this page")
                .color(theme.secondary_text)
                .italics(),
        );
        return None;
    }

    for (offset, story) in stories.iter().enumerate() {
        egui::Frame::new()
            .fill(theme.card_background)
            .corner_radius(CornerRadius::same(8))
            .stroke(theme.card_stroke(story.data.score))
            .inner_margin(12.0)
            .outer_margin(egui::vec2(8.0, 6.0))
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.label(
                        RichText::new(format!("{}", first_rank + offset))
                            .color(theme.secondary_text)
                            .size(16.0),
                    );
                    ui.add_space(8.0);

                    let title = ui.add(
                        egui::Label::new(
                            RichText::new(story.title())
                                .color(theme.text)
                                .size(16.0)
                                .strong(),
                        )
                        .sense(egui::Sense::click()),
                    );
                    if title.hovered() {
                        ui.output_mut(|o| o.cursor_icon = egui::CursorIcon::PointingHand);
                    }
                    if title.clicked() {
                        if let Some(url) = story.link_url(base_url) {
                            action = Some(StoryAction::OpenLink(url));
                        }
                    }

                    if let Some(domain) = story.data.domain.as_deref().filter(|d| !d.is_empty()) {
                        ui.add_space(8.0);
                        ui.label(
                            RichText::new(format!("({})", domain))
                                .color(theme.secondary_text)
                                .italics(),
                        );
                    }

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.label(
                            RichText::new(format!("{} pts", story.data.score))
                                .color(theme.score_color(story.data.score))
                                .strong(),
                        );
                    });
                });

                ui.horizontal(|ui| {
                    ui.label(RichText::new("by").color(theme.secondary_text).size(14.0));
                    ui.label(RichText::new(story.author()).color(theme.text).size(14.0));
                    ui.add_space(8.0);
                    ui.label(
                        RichText::new(story.time_ago(now))
                            .color(theme.secondary_text)
                            .size(14.0),
                    );
                    if story.data.stickied {
                        ui.label(RichText::new("pinned").color(theme.highlight).size(12.0));
                    }
                    if story.data.over_18 {
                        ui.label(RichText::new("NSFW").color(theme.error).size(12.0));
                    }

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if let Some(permalink) = story.permalink_url(base_url) {
                            let copy_btn = ui.add(
                                egui::Button::new(
                                    RichText::new("Copy link")
                                        .size(13.0)
                                        .color(theme.button_foreground),
                                )
                                .corner_radius(CornerRadius::same(6))
                                .fill(theme.button_background),
                            );
                            if copy_btn.clicked() {
                                action = Some(StoryAction::CopyLink(permalink.clone()));
                            }

                            let comments_btn = ui.add(
                                egui::Button::new(
                                    RichText::new(format!("{} comments", story.data.num_comments))
                                        .size(13.0)
                                        .color(theme.button_foreground),
                                )
                                .corner_radius(CornerRadius::same(6))
                                .fill(theme.button_background),
                            );
                            if comments_btn.clicked() {
                                action = Some(StoryAction::OpenLink(permalink));
                            }
                        } else {
                            ui.label(
                                RichText::new(format!("{} comments", story.data.num_comments))
                                    .color(theme.secondary_text)
                                    .size(13.0),
                            );
                        }
                    });
                });
            });
    }

    action
}
