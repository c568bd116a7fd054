use crate::error::BackendError;
use crate::post::TweetsResponse;
use reqwest::{Client, Url};
use std::future::Future;

/// Anything that can answer "which posts does the backend have for this
/// handle". The controller only talks to the backend through this seam.
pub trait TweetSource: Send + Sync {
    fn fetch_tweets(
        &self,
        handle: &str,
    ) -> impl Future<Output = Result<TweetsResponse, BackendError>> + Send;
}

/// `GET {API_BASE_URL}/tweets/{handle}` over reqwest.
#[derive(Clone)]
pub struct HttpTweetSource {
    client: Client,
    base_url: Url,
}

impl HttpTweetSource {
    pub fn new(client: Client, base_url: Url) -> Self {
        Self { client, base_url }
    }

    /// The handle becomes a single, percent-encoded path segment.
    pub fn tweets_url(&self, handle: &str) -> Result<Url, BackendError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| BackendError::InvalidBaseUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .push("tweets")
            .push(handle);
        Ok(url)
    }
}

impl TweetSource for HttpTweetSource {
    async fn fetch_tweets(&self, handle: &str) -> Result<TweetsResponse, BackendError> {
        let url = self.tweets_url(handle)?;
        tracing::debug!(%url, "querying moderation backend");

        let resp = self.client.get(url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(BackendError::Status(status));
        }

        Ok(resp.json::<TweetsResponse>().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{get, web, App, HttpResponse, HttpServer, Responder};
    use serde_json::json;

    #[get("/api/tweets/{handle}")]
    async fn tweets(handle: web::Path<String>) -> impl Responder {
        match handle.as_str() {
            "broken" => HttpResponse::InternalServerError().finish(),
            "garbage" => HttpResponse::Ok().body("<html>not json</html>"),
            "first timer" => HttpResponse::Ok().json(json!({
                "isScanning": true,
                "isFirstTime": true,
                "message": "scanning",
            })),
            other => HttpResponse::Ok().json(json!({
                "tweets": [{ "tweetId": "1", "userName": other, "hateScore": 2 }],
                "isScanning": false,
                "isFirstTime": false,
                "message": "",
            })),
        }
    }

    /// Spins up a throwaway backend on an ephemeral port.
    fn start_backend() -> HttpTweetSource {
        let server = HttpServer::new(|| App::new().service(tweets))
            .workers(1)
            .bind(("127.0.0.1", 0))
            .unwrap();
        let addr = server.addrs()[0];
        actix_web::rt::spawn(server.run());

        let base_url = Url::parse(&format!("http://{addr}/api")).unwrap();
        HttpTweetSource::new(Client::new(), base_url)
    }

    #[test]
    fn builds_path_from_base_url() {
        let source = HttpTweetSource::new(
            Client::new(),
            Url::parse("https://hateguard.example/api/").unwrap(),
        );
        assert_eq!(
            source.tweets_url("alice").unwrap().as_str(),
            "https://hateguard.example/api/tweets/alice"
        );
        assert_eq!(
            source.tweets_url("a b/c").unwrap().as_str(),
            "https://hateguard.example/api/tweets/a%20b%2Fc"
        );
    }

    #[test]
    fn rejects_base_url_without_path() {
        let source = HttpTweetSource::new(Client::new(), Url::parse("mailto:x@y.z").unwrap());
        assert!(matches!(
            source.tweets_url("alice"),
            Err(BackendError::InvalidBaseUrl(_))
        ));
    }

    #[actix_web::test]
    async fn fetches_and_decodes_posts() {
        let source = start_backend();
        let body = source.fetch_tweets("alice").await.unwrap();
        let posts = body.tweets.unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].author_handle, "alice");
        assert_eq!(posts[0].hate_score, 2.0);
        assert_eq!(body.message.as_deref(), Some(""));
    }

    #[actix_web::test]
    async fn escaped_handle_reaches_the_backend() {
        let source = start_backend();
        let body = source.fetch_tweets("first timer").await.unwrap();
        assert!(body.tweets.is_none());
        assert!(body.is_scanning);
    }

    #[actix_web::test]
    async fn non_success_status_is_an_error() {
        let source = start_backend();
        let err = source.fetch_tweets("broken").await.unwrap_err();
        assert!(matches!(err, BackendError::Status(s) if s.as_u16() == 500));
    }

    #[actix_web::test]
    async fn undecodable_body_is_a_transport_error() {
        let source = start_backend();
        let err = source.fetch_tweets("garbage").await.unwrap_err();
        assert!(matches!(err, BackendError::Transport(_)));
    }
}
