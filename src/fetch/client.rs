use async_trait::async_trait;
use reqwest::{Request, Response};

/// Minimal HTTP seam so remote sources can be fetched through any client.
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn execute(&self, req: Request) -> reqwest::Result<Response>;
}
