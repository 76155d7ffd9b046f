use std::sync::Arc;

use aws_sdk_s3::Client as S3Client;
use tracing_subscriber::{fmt, EnvFilter};

use gallery_server::render::HtmlGalleryRenderer;
use gallery_server::server;
use gallery_server::state::AppState;
use gallery_server::types::Environment;
use media_store::S3ObjectStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let environment = Environment::from_env();

    // JSON logs for staging/production, regular format for development
    match environment {
        Environment::Production | Environment::Staging => {
            fmt()
                .json()
                .with_env_filter(EnvFilter::from_default_env())
                .init();
        }
        Environment::Development { .. } => {
            fmt().with_env_filter(EnvFilter::from_default_env()).init();
        }
    }

    let s3_client = S3Client::from_conf(environment.s3_client_config().await);
    let store = S3ObjectStore::new(s3_client)
        .with_presign_expiry(environment.presigned_url_expiry_secs());

    let state = AppState {
        store: Arc::new(store),
        renderer: Arc::new(HtmlGalleryRenderer),
        thumbnail_bucket: environment.thumbnail_bucket(),
    };

    server::start(state).await
}
