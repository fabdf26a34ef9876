use serde::Deserialize;

/// Envelope shared by both Reddit listing endpoints: `{ data: { children: [...] } }`.
#[derive(Debug, Clone, Deserialize)]
pub struct Listing<T> {
    pub data: ListingData<T>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ListingData<T> {
    #[serde(default = "Vec::new")]
    pub children: Vec<T>,
}

impl<T> Listing<T> {
    pub fn into_children(self) -> Vec<T> {
        self.data.children
    }
}

/// A subreddit entry from `/reddits.json`. Identity is `data.url`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Subreddit {
    pub data: SubredditData,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SubredditData {
    pub display_name: String,
    pub url: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub public_description: Option<String>,
    #[serde(default)]
    pub subscribers: Option<u64>,
    #[serde(default)]
    pub over18: bool,
}

impl Subreddit {
    pub fn display_name(&self) -> &str {
        &self.data.display_name
    }

    pub fn url(&self) -> &str {
        &self.data.url
    }

    // Hover text for the navigation list
    pub fn summary(&self) -> Option<String> {
        let description = self
            .data
            .public_description
            .as_deref()
            .filter(|d| !d.trim().is_empty())
            .or(self.data.title.as_deref())?;

        let text = html_escape::decode_html_entities(description).to_string();
        match self.data.subscribers {
            Some(count) => Some(format!("{}\n{} subscribers", text, count)),
            None => Some(text),
        }
    }
}

/// A story (link post) from a subreddit listing. Only `title` is guaranteed.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Story {
    pub data: StoryData,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StoryData {
    pub title: String,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub score: i64,
    #[serde(default)]
    pub num_comments: u64,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub permalink: Option<String>,
    #[serde(default)]
    pub domain: Option<String>,
    #[serde(default)]
    pub created_utc: Option<f64>,
    #[serde(default)]
    pub over_18: bool,
    #[serde(default)]
    pub stickied: bool,
}

impl Story {
    /// Title with HTML entities (`&amp;` and friends) decoded.
    pub fn title(&self) -> String {
        html_escape::decode_html_entities(&self.data.title).to_string()
    }

    pub fn author(&self) -> &str {
        self.data.author.as_deref().unwrap_or("[deleted]")
    }

    /// Absolute link to the discussion page on `base_url`.
    pub fn permalink_url(&self, base_url: &str) -> Option<String> {
        self.data
            .permalink
            .as_deref()
            .map(|p| format!("{}{}", base_url.trim_end_matches('/'), p))
    }

    /// The outbound link, falling back to the discussion page for self posts.
    pub fn link_url(&self, base_url: &str) -> Option<String> {
        match self.data.url.as_deref() {
            Some(url) if url.starts_with("http") => {
                Some(html_escape::decode_html_entities(url).to_string())
            }
            _ => self.permalink_url(base_url),
        }
    }

    pub fn time_ago(&self, now: chrono::DateTime<chrono::Utc>) -> String {
        match self.data.created_utc {
            Some(ts) => format_time_ago(ts, now),
            None => String::new(),
        }
    }
}

// Matches the "N hours ago" wording readers expect from news sites
pub fn format_time_ago(created_utc: f64, now: chrono::DateTime<chrono::Utc>) -> String {
    let created = match chrono::DateTime::from_timestamp(created_utc as i64, 0) {
        Some(created) => created,
        None => return String::new(),
    };

    let elapsed = now.signed_duration_since(created);
    let plural = |n: i64, unit: &str| {
        if n == 1 {
            format!("1 {} ago", unit)
        } else {
            format!("{} {}s ago", n, unit)
        }
    };

    if elapsed.num_seconds() < 60 {
        "just now".to_string()
    } else if elapsed.num_minutes() < 60 {
        plural(elapsed.num_minutes(), "minute")
    } else if elapsed.num_hours() < 24 {
        plural(elapsed.num_hours(), "hour")
    } else if elapsed.num_days() < 30 {
        plural(elapsed.num_days(), "day")
    } else if elapsed.num_days() < 365 {
        plural(elapsed.num_days() / 30, "month")
    } else {
        plural(elapsed.num_days() / 365, "year")
    }
}
