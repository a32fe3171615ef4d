use std::net::SocketAddr;
use std::sync::Arc;

use reqwest::redirect::Policy;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter};
use tempfile::TempDir;

// Leading `::` disambiguates the workspace crate from this test module.
use ::common::media::filesystem::FilesystemMediaStore;
use server::config::{AppConfig, DatabaseConfig, MediaConfig, ServerConfig};
use server::entity::{author, category, post, post_image};
use server::state::AppState;

pub mod routes {
    pub const NEW_POST: &str = "/posts/new";
    pub const COMPOSE: &str = "/posts/compose";
    pub const THANKS: &str = "/posts/thanks";

    pub fn post_detail(id: i32) -> String {
        format!("/posts/{id}")
    }

    pub fn media(image_id: &str) -> String {
        format!("/media/{image_id}")
    }
}

/// A running application instance backed by a throwaway SQLite database
/// and media directory, reachable over a real TCP listener.
pub struct TestApp {
    pub addr: SocketAddr,
    pub client: reqwest::Client,
    pub db: DatabaseConnection,
    _workdir: TempDir,
}

pub struct TestResponse {
    pub status: u16,
    pub location: Option<String>,
    pub content_type: Option<String>,
    pub etag: Option<String>,
    /// Body decoded as text, for HTML assertions.
    pub body: String,
    /// Raw body bytes, for binary responses.
    pub bytes: Vec<u8>,
}

impl TestApp {
    pub async fn spawn() -> Self {
        let workdir = tempfile::tempdir().expect("create temp dir");
        let db_path = workdir.path().join("inkwell-test.db");
        let db_url = format!("sqlite://{}?mode=rwc", db_path.display());

        let db = server::database::init_db(&db_url).await.expect("init database");
        server::seed::seed_defaults(&db).await.expect("seed defaults");

        let media_root = workdir.path().join("media");
        let media = FilesystemMediaStore::new(media_root.clone(), 8 * 1024 * 1024)
            .await
            .expect("create media store");

        let config = AppConfig {
            server: ServerConfig {
                host: "127.0.0.1".into(),
                port: 0,
            },
            database: DatabaseConfig { url: db_url },
            media: MediaConfig {
                root: media_root.display().to_string(),
                max_upload_size: 8 * 1024 * 1024,
            },
        };

        let state = AppState {
            config,
            db: db.clone(),
            media: Arc::new(media),
        };
        let app = server::build_router(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind listener");
        let addr = listener.local_addr().expect("listener addr");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("serve");
        });

        // Redirects stay visible to assertions.
        let client = reqwest::Client::builder()
            .redirect(Policy::none())
            .build()
            .expect("build client");

        TestApp {
            addr,
            client,
            db,
            _workdir: workdir,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub async fn get(&self, path: &str) -> TestResponse {
        let res = self.client.get(self.url(path)).send().await.expect("GET request");
        Self::into_response(res).await
    }

    pub async fn get_with_header(&self, path: &str, name: &str, value: &str) -> TestResponse {
        let res = self
            .client
            .get(self.url(path))
            .header(name, value)
            .send()
            .await
            .expect("GET request");
        Self::into_response(res).await
    }

    pub async fn post_form(&self, path: &str, fields: &[(&str, &str)]) -> TestResponse {
        let res = self
            .client
            .post(self.url(path))
            .form(fields)
            .send()
            .await
            .expect("POST form");
        Self::into_response(res).await
    }

    pub async fn post_multipart(&self, path: &str, form: reqwest::multipart::Form) -> TestResponse {
        let res = self
            .client
            .post(self.url(path))
            .multipart(form)
            .send()
            .await
            .expect("POST multipart");
        Self::into_response(res).await
    }

    async fn into_response(res: reqwest::Response) -> TestResponse {
        let status = res.status().as_u16();
        let header = |name: &str| {
            res.headers()
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(String::from)
        };
        let location = header("location");
        let content_type = header("content-type");
        let etag = header("etag");
        let bytes = res.bytes().await.expect("read body").to_vec();
        let body = String::from_utf8_lossy(&bytes).into_owned();
        TestResponse {
            status,
            location,
            content_type,
            etag,
            body,
            bytes,
        }
    }

    // Direct database access for assertions.

    pub async fn count_posts(&self) -> u64 {
        post::Entity::find().count(&self.db).await.expect("count posts")
    }

    pub async fn count_images(&self) -> u64 {
        post_image::Entity::find()
            .count(&self.db)
            .await
            .expect("count images")
    }

    pub async fn find_post_by_title(&self, title: &str) -> Option<post::Model> {
        post::Entity::find()
            .filter(post::Column::Title.eq(title))
            .one(&self.db)
            .await
            .expect("find post")
    }

    pub async fn category_id(&self, name: &str) -> i32 {
        category::Entity::find()
            .filter(category::Column::Name.eq(name))
            .one(&self.db)
            .await
            .expect("query category")
            .expect("seeded category")
            .id
    }

    pub async fn author_id(&self, name: &str) -> i32 {
        author::Entity::find()
            .filter(author::Column::Name.eq(name))
            .one(&self.db)
            .await
            .expect("query author")
            .expect("seeded author")
            .id
    }
}

/// Minimal PNG file: magic bytes followed by padding. Enough for the
/// server-side sniffer, which only inspects the signature.
pub const PNG_BYTES: &[u8] = &[
    0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, b'I', b'H', b'D',
    b'R', 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01,
];
