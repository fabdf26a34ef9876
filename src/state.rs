//! Application state and the reducer that is the only place it changes.
//!
//! Every transition goes through [`reduce`], which builds a new [`AppState`] from the old one
//! and an [`Action`]. Actions that reset the visible page say so through
//! [`Action::resets_page`], and the reducer applies that reset after the action itself, so the
//! rule lives in one spot instead of in each branch.

use std::collections::BTreeMap;

use crate::models::{Story, Subreddit};

/// Stories for one subreddit, keyed by 1-based page number.
pub type StoryPages = BTreeMap<usize, Vec<Story>>;

pub const FIRST_PAGE: usize = 1;

#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    pub navigation_items: Vec<Subreddit>,
    pub story_items: StoryPages,
    pub selected_subreddit: Option<Subreddit>,
    pub current_page: usize,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            navigation_items: Vec::new(),
            story_items: StoryPages::new(),
            selected_subreddit: None,
            current_page: FIRST_PAGE,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    SetNavigationItems(Vec<Subreddit>),
    SetSelectedSubreddit(Subreddit),
    SetStoryItems { page: usize, items: Vec<Story> },
    SetStoryPage(usize),
}

impl Action {
    /// Selecting a subreddit and receiving any page of stories both snap the view to page 1.
    pub fn resets_page(&self) -> bool {
        matches!(
            self,
            Action::SetSelectedSubreddit(_) | Action::SetStoryItems { .. }
        )
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Action::SetNavigationItems(_) => "set-navigation-items",
            Action::SetSelectedSubreddit(_) => "set-selected-subreddit",
            Action::SetStoryItems { .. } => "set-story-items",
            Action::SetStoryPage(_) => "set-story-page",
        }
    }
}

pub fn reduce(state: &AppState, action: Action) -> AppState {
    let resets_page = action.resets_page();

    let mut next = match action {
        Action::SetNavigationItems(items) => AppState {
            navigation_items: items,
            ..state.clone()
        },
        Action::SetSelectedSubreddit(subreddit) => AppState {
            selected_subreddit: Some(subreddit),
            story_items: StoryPages::new(),
            ..state.clone()
        },
        Action::SetStoryItems { page, items } => {
            let mut story_items = state.story_items.clone();
            story_items.insert(page, items);
            AppState {
                story_items,
                ..state.clone()
            }
        }
        Action::SetStoryPage(page) => AppState {
            current_page: page,
            ..state.clone()
        },
    };

    if resets_page {
        next.current_page = FIRST_PAGE;
    }
    next
}

/// Splits `items` into consecutive chunks of `page_size`; the last chunk may be shorter.
/// Chunk `i` is page `i + 1`. An empty input yields no pages.
pub fn paginate<T: Clone>(items: &[T], page_size: usize) -> Vec<(usize, Vec<T>)> {
    let page_size = page_size.max(1);
    items
        .chunks(page_size)
        .enumerate()
        .map(|(index, chunk)| (index + FIRST_PAGE, chunk.to_vec()))
        .collect()
}

impl AppState {
    pub fn page_count(&self) -> usize {
        self.story_items.len()
    }

    /// Stories on the current page, or `None` while that page has not arrived.
    pub fn current_stories(&self) -> Option<&[Story]> {
        self.story_items.get(&self.current_page).map(Vec::as_slice)
    }

    pub fn active_url(&self) -> Option<&str> {
        self.selected_subreddit.as_ref().map(Subreddit::url)
    }

    pub fn title(&self) -> &str {
        match &self.selected_subreddit {
            Some(subreddit) => subreddit.display_name(),
            None => "Choose your path",
        }
    }

    pub fn can_go_previous(&self) -> bool {
        self.current_page != FIRST_PAGE
    }

    pub fn can_go_next(&self) -> bool {
        self.current_page < self.page_count()
    }
}
