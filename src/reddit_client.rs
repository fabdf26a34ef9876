use reqwest::blocking::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use crate::config::AppConfig;
use crate::error::{ReaderError, Result};
use crate::models::{Listing, Story, Subreddit};

/// The two Reddit reads the reader needs. Implemented over HTTP by [`RedditClient`];
/// tests substitute in-memory fakes.
pub trait RedditApi: Send + Sync {
    fn fetch_subreddits(&self) -> Result<Vec<Subreddit>>;
    fn fetch_top_stories(&self, subreddit_url: &str) -> Result<Vec<Story>>;
}

#[derive(Clone)]
pub struct RedditClient {
    client: Client,
    base_url: String,
    sort: String,
    time_window: String,
}

impl RedditClient {
    pub fn new(config: &AppConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(ReaderError::ClientBuild)?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            sort: config.sort.clone(),
            time_window: config.time_window.clone(),
        })
    }

    pub fn subreddits_url(&self) -> String {
        format!("{}/reddits.json", self.base_url)
    }

    /// `subreddit_url` is the listing's own `url` field, e.g. `/r/aww/`.
    pub fn stories_url(&self, subreddit_url: &str) -> String {
        format!(
            "{}{}.json?sort={}&t={}",
            self.base_url, subreddit_url, self.sort, self.time_window
        )
    }

    fn get_listing<T: DeserializeOwned>(&self, url: &str) -> Result<Vec<T>> {
        debug!(url, "GET");
        let response = self.client.get(url).send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(ReaderError::Status {
                status,
                url: url.to_string(),
            });
        }

        let body = response.bytes()?;
        let listing: Listing<T> = serde_json::from_slice(&body)?;
        Ok(listing.into_children())
    }
}

impl RedditApi for RedditClient {
    #[instrument(skip(self))]
    fn fetch_subreddits(&self) -> Result<Vec<Subreddit>> {
        let subreddits = self.get_listing(&self.subreddits_url())?;
        debug!(count = subreddits.len(), "fetched subreddit list");
        Ok(subreddits)
    }

    #[instrument(skip(self))]
    fn fetch_top_stories(&self, subreddit_url: &str) -> Result<Vec<Story>> {
        let stories = self.get_listing(&self.stories_url(subreddit_url))?;
        debug!(count = stories.len(), "fetched stories");
        Ok(stories)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_default_endpoint_urls() {
        let client = RedditClient::new(&AppConfig::default()).unwrap();

        assert_eq!(client.subreddits_url(), "https://www.reddit.com/reddits.json");
        assert_eq!(
            client.stories_url("/r/aww/"),
            "https://www.reddit.com/r/aww/.json?sort=top&t=month"
        );
        assert_eq!(
            client.stories_url("/r/aww"),
            "https://www.reddit.com/r/aww.json?sort=top&t=month"
        );
    }

    #[test]
    fn respects_configured_base_url() {
        let config = AppConfig {
            base_url: "http://127.0.0.1:9000/".to_string(),
            time_window: "week".to_string(),
            ..AppConfig::default()
        };
        let client = RedditClient::new(&config).unwrap();

        assert_eq!(client.subreddits_url(), "http://127.0.0.1:9000/reddits.json");
        assert_eq!(
            client.stories_url("/r/rust/"),
            "http://127.0.0.1:9000/r/rust/.json?sort=top&t=week"
        );
    }

    mod http {
        use crate::config::AppConfig;
        use crate::error::ReaderError;
        use crate::reddit_client::{RedditApi, RedditClient};
        use serde_json::json;
        use wiremock::matchers::{method, path, query_param};
        use wiremock::{Mock, MockServer, ResponseTemplate};

        // wiremock needs a runtime to start; the blocking client must run outside of it
        fn start_server() -> (tokio::runtime::Runtime, MockServer) {
            let rt = tokio::runtime::Runtime::new().unwrap();
            let server = rt.block_on(MockServer::start());
            (rt, server)
        }

        fn client_for(server: &MockServer) -> RedditClient {
            let config = AppConfig {
                base_url: server.uri(),
                ..AppConfig::default()
            };
            RedditClient::new(&config).unwrap()
        }

        #[test]
        fn fetches_top_stories_of_the_month() {
            let (rt, server) = start_server();
            rt.block_on(
                Mock::given(method("GET"))
                    .and(path("/r/rust/.json"))
                    .and(query_param("sort", "top"))
                    .and(query_param("t", "month"))
                    .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                        "kind": "Listing",
                        "data": {
                            "children": [
                                { "kind": "t3", "data": { "title": "First", "score": 4200 } },
                                { "kind": "t3", "data": { "title": "Second" } }
                            ]
                        }
                    })))
                    .mount(&server),
            );

            let stories = client_for(&server).fetch_top_stories("/r/rust/").unwrap();

            assert_eq!(stories.len(), 2);
            assert_eq!(stories[0].data.title, "First");
            assert_eq!(stories[0].data.score, 4200);
            assert_eq!(stories[1].data.title, "Second");
        }

        #[test]
        fn fetches_subreddit_list() {
            let (rt, server) = start_server();
            rt.block_on(
                Mock::given(method("GET"))
                    .and(path("/reddits.json"))
                    .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                        "data": { "children": [ { "data": { "display_name": "aww", "url": "/r/aww/" } } ] }
                    })))
                    .mount(&server),
            );

            let subreddits = client_for(&server).fetch_subreddits().unwrap();

            assert_eq!(subreddits.len(), 1);
            assert_eq!(subreddits[0].url(), "/r/aww/");
        }

        #[test]
        fn non_success_status_is_reported() {
            let (rt, server) = start_server();
            rt.block_on(
                Mock::given(method("GET"))
                    .and(path("/r/gone/.json"))
                    .respond_with(ResponseTemplate::new(404))
                    .mount(&server),
            );

            let err = client_for(&server).fetch_top_stories("/r/gone/").unwrap_err();

            match err {
                ReaderError::Status { status, url } => {
                    assert_eq!(status, reqwest::StatusCode::NOT_FOUND);
                    assert!(url.ends_with("/r/gone/.json?sort=top&t=month"));
                }
                other => panic!("expected Status error, got {:?}", other),
            }
        }

        #[test]
        fn malformed_body_is_a_decode_error() {
            let (rt, server) = start_server();
            rt.block_on(
                Mock::given(method("GET"))
                    .and(path("/reddits.json"))
                    .respond_with(ResponseTemplate::new(200).set_body_string("<html>rate limited</html>"))
                    .mount(&server),
            );

            let err = client_for(&server).fetch_subreddits().unwrap_err();

            assert!(matches!(err, ReaderError::Decode(_)), "got {:?}", err);
        }
    }
}
