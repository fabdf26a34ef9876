use eframe::egui;
use egui::{CornerRadius, RichText, ScrollArea, ViewportBuilder};
use std::sync::Arc;
use std::time::Duration;

mod config;
mod controller;
mod error;
mod logging;
mod models;
mod navigation;
mod reddit_client;
mod state;
mod story_list;
mod theme;

use crate::config::AppConfig;
use crate::controller::Controller;
use crate::reddit_client::RedditClient;
use crate::story_list::StoryAction;
use crate::theme::AppTheme;

fn main() -> anyhow::Result<()> {
    logging::init_from_env();

    let config = AppConfig::from_env()?;
    let client = RedditClient::new(&config)?;
    tracing::info!(base_url = %config.base_url, page_size = config.page_size, "starting");

    let options = eframe::NativeOptions {
        viewport: ViewportBuilder::default()
            .with_inner_size([1100.0, 760.0])
            .with_min_inner_size([720.0, 480.0])
            .with_title("Subreddit Reader"),
        ..Default::default()
    };

    eframe::run_native(
        "Subreddit Reader",
        options,
        Box::new(move |cc| {
            let mut app = RedditReaderApp::new(&config, client);

            if let Some(storage) = cc.storage {
                // Restore the saved theme preference
                if let Some(theme_str) = storage.get_string("is_dark_mode") {
                    if let Ok(is_dark_mode) = theme_str.parse::<bool>() {
                        app.is_dark_mode = is_dark_mode;
                        app.theme = AppTheme::for_mode(is_dark_mode);
                    }
                }
            }

            Ok(Box::new(app))
        }),
    )
    .map_err(|e| anyhow::anyhow!("UI failed: {}", e))
}

struct RedditReaderApp {
    controller: Controller,
    base_url: String,
    page_size: usize,
    theme: AppTheme,
    is_dark_mode: bool,
    clipboard: Option<arboard::Clipboard>,
    // Transient feedback such as "Link copied"
    notice: Option<String>,
}

impl RedditReaderApp {
    fn new(config: &AppConfig, client: RedditClient) -> Self {
        Self {
            controller: Controller::new(Arc::new(client), config.page_size),
            base_url: config.base_url.clone(),
            page_size: config.page_size,
            theme: AppTheme::dark(),
            is_dark_mode: true,
            clipboard: None,
            notice: None,
        }
    }

    fn toggle_theme(&mut self) {
        self.is_dark_mode = !self.is_dark_mode;
        self.theme = AppTheme::for_mode(self.is_dark_mode);
    }

    fn open_link(&mut self, url: &str) {
        if let Err(e) = open::that(url) {
            tracing::warn!(url, error = %e, "failed to open link");
            self.notice = Some(format!("Could not open browser: {}", e));
        }
    }

    fn copy_link(&mut self, url: &str) {
        if self.clipboard.is_none() {
            match arboard::Clipboard::new() {
                Ok(clipboard) => self.clipboard = Some(clipboard),
                Err(e) => {
                    tracing::warn!(error = %e, "clipboard unavailable");
                    self.notice = Some("Clipboard is not available".to_string());
                    return;
                }
            }
        }

        if let Some(clipboard) = self.clipboard.as_mut() {
            match clipboard.set_text(url.to_string()) {
                Ok(()) => self.notice = Some("Link copied".to_string()),
                Err(e) => {
                    tracing::warn!(error = %e, "failed to copy link");
                    self.notice = Some(format!("Could not copy link: {}", e));
                }
            }
        }
    }

    fn handle_story_action(&mut self, action: StoryAction) {
        match action {
            StoryAction::OpenLink(url) => self.open_link(&url),
            StoryAction::CopyLink(url) => self.copy_link(&url),
        }
    }

    fn process_keyboard_shortcuts(&mut self, ctx: &egui::Context) {
        let (left, right, refresh, theme) = ctx.input(|i| {
            (
                i.key_pressed(egui::Key::ArrowLeft),
                i.key_pressed(egui::Key::ArrowRight),
                i.key_pressed(egui::Key::R),
                i.key_pressed(egui::Key::T),
            )
        });

        if left {
            self.controller.prev_page();
        }
        if right {
            self.controller.next_page();
        }
        if refresh {
            self.controller.refresh_subreddits();
        }
        if theme {
            self.toggle_theme();
        }
    }

    fn render_header(&mut self, ctx: &egui::Context) {
        let mut toggle_theme = false;
        let mut refresh = false;

        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.add_space(6.0);
            ui.horizontal(|ui| {
                ui.heading(
                    RichText::new(self.controller.state().title())
                        .color(self.theme.highlight)
                        .size(26.0)
                        .strong(),
                );

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let theme_label = if self.is_dark_mode { "Light" } else { "Dark" };
                    if ui
                        .add(
                            egui::Button::new(RichText::new(theme_label).color(self.theme.button_foreground))
                                .corner_radius(CornerRadius::same(6))
                                .fill(self.theme.button_background),
                        )
                        .on_hover_text("Toggle theme (T)")
                        .clicked()
                    {
                        toggle_theme = true;
                    }

                    if ui
                        .add(
                            egui::Button::new(RichText::new("Refresh").color(self.theme.button_foreground))
                                .corner_radius(CornerRadius::same(6))
                                .fill(self.theme.button_background),
                        )
                        .on_hover_text("Reload subreddit list (R)")
                        .clicked()
                    {
                        refresh = true;
                    }
                });
            });
            ui.add_space(6.0);
        });

        if toggle_theme {
            self.toggle_theme();
        }
        if refresh {
            self.controller.refresh_subreddits();
        }
    }

    fn render_status_bar(&mut self, ctx: &egui::Context) {
        let mut dismiss = false;

        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if self.controller.is_loading() {
                    ui.spinner();
                    ui.label(RichText::new("Loading…").color(self.theme.secondary_text));
                }

                if let Some(error) = self.controller.last_error() {
                    ui.label(RichText::new(error).color(self.theme.error));
                    if ui.small_button("Dismiss").clicked() {
                        dismiss = true;
                    }
                } else if let Some(notice) = &self.notice {
                    ui.label(RichText::new(notice.as_str()).color(self.theme.secondary_text));
                }
            });
        });

        if dismiss {
            self.controller.dismiss_error();
        }
    }

    fn render_navigation(&mut self, ctx: &egui::Context) {
        let mut selected = None;

        egui::SidePanel::left("navigation")
            .resizable(true)
            .default_width(220.0)
            .show(ctx, |ui| {
                ui.add_space(8.0);
                ui.label(RichText::new("Subreddits").color(self.theme.secondary_text).size(14.0));
                ui.separator();

                let state = self.controller.state();
                selected = navigation::show(ui, &self.theme, &state.navigation_items, state.active_url());
            });

        if let Some(subreddit) = selected {
            self.notice = None;
            self.controller.select_subreddit(subreddit);
        }
    }

    fn render_stories(&mut self, ctx: &egui::Context) {
        let mut story_action = None;
        let mut go_previous = false;
        let mut go_next = false;

        egui::CentralPanel::default().show(ctx, |ui| {
            let state = self.controller.state();

            // Only shown once the current page has arrived
            let Some(stories) = state.current_stories() else {
                if state.selected_subreddit.is_none() {
                    ui.label(
                        RichText::new("Pick a subreddit on the left to see its top stories of the month.")
                            .color(self.theme.secondary_text),
                    );
                }
                return;
            };

            ui.horizontal(|ui| {
                ui.label(
                    RichText::new(format!("Current Page: {}", state.current_page))
                        .color(self.theme.text)
                        .size(14.0),
                );

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    go_next = ui
                        .add_enabled(state.can_go_next(), egui::Button::new("Next Page"))
                        .clicked();
                    go_previous = ui
                        .add_enabled(state.can_go_previous(), egui::Button::new("Previous Page"))
                        .clicked();
                });
            });
            ui.separator();

            let first_rank = (state.current_page - 1) * self.page_size + 1;
            ScrollArea::vertical()
                .id_salt(("stories_scroll", state.current_page))
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    story_action = story_list::show(ui, &self.theme, stories, first_rank, &self.base_url);
                });
        });

        if go_previous {
            self.controller.prev_page();
        }
        if go_next {
            self.controller.next_page();
        }
        if let Some(action) = story_action {
            self.handle_story_action(action);
        }
    }
}

impl eframe::App for RedditReaderApp {
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        storage.set_string("is_dark_mode", self.is_dark_mode.to_string());
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.theme.apply_to_ctx(ctx);

        // First frame kicks off the subreddit list
        self.controller.mount();

        if self.controller.poll() {
            ctx.request_repaint();
        }
        if self.controller.is_loading() {
            // Keep polling while requests are out
            ctx.request_repaint_after(Duration::from_millis(100));
        }

        self.process_keyboard_shortcuts(ctx);

        self.render_header(ctx);
        self.render_status_bar(ctx);
        self.render_navigation(ctx);
        self.render_stories(ctx);
    }
}
