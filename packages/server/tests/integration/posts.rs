use crate::common::{TestApp, routes};

mod quick_form {
    use super::*;

    #[tokio::test]
    async fn form_page_renders() {
        let app = TestApp::spawn().await;

        let res = app.get(routes::NEW_POST).await;

        assert_eq!(res.status, 200);
        assert!(res.body.contains("<form method=\"post\" action=\"/posts/new\""));
        assert!(res.body.contains("name=\"title\""));
        assert!(res.body.contains("name=\"created_at\""));
    }

    #[tokio::test]
    async fn root_redirects_to_form() {
        let app = TestApp::spawn().await;

        let res = app.get("/").await;

        assert_eq!(res.status, 303);
        assert_eq!(res.location.as_deref(), Some("/posts/new"));
    }

    #[tokio::test]
    async fn valid_submission_creates_one_post_and_redirects() {
        let app = TestApp::spawn().await;

        let res = app
            .post_form(
                routes::NEW_POST,
                &[
                    ("title", "A day in the garden"),
                    ("text", "We planted tomatoes."),
                    ("is_active", "on"),
                    ("created_at", "2024-06-01T09:15"),
                ],
            )
            .await;

        assert_eq!(res.status, 303);
        assert_eq!(res.location.as_deref(), Some(routes::THANKS));
        assert_eq!(app.count_posts().await, 1);

        let post = app.find_post_by_title("A day in the garden").await.unwrap();
        assert_eq!(post.text, "We planted tomatoes.");
        assert!(post.is_active);
        assert_eq!(post.category_id, None);
    }

    #[tokio::test]
    async fn missing_title_redisplays_form_and_writes_nothing() {
        let app = TestApp::spawn().await;

        let res = app
            .post_form(
                routes::NEW_POST,
                &[
                    ("text", "No title here."),
                    ("is_active", "on"),
                    ("created_at", "2024-06-01T09:15"),
                ],
            )
            .await;

        assert_eq!(res.status, 200);
        assert!(res.body.contains("Title is required"));
        // Entered values survive the round trip.
        assert!(res.body.contains("No title here."));
        assert_eq!(app.count_posts().await, 0);
    }

    #[tokio::test]
    async fn invalid_datetime_redisplays_form() {
        let app = TestApp::spawn().await;

        let res = app
            .post_form(
                routes::NEW_POST,
                &[
                    ("title", "Bad date"),
                    ("text", "Text"),
                    ("is_active", "on"),
                    ("created_at", "yesterday at noon"),
                ],
            )
            .await;

        assert_eq!(res.status, 200);
        assert!(res.body.contains("Enter a valid date and time"));
        assert_eq!(app.count_posts().await, 0);
    }

    #[tokio::test]
    async fn unchecked_active_box_fails_validation() {
        let app = TestApp::spawn().await;

        let res = app
            .post_form(
                routes::NEW_POST,
                &[
                    ("title", "Draft attempt"),
                    ("text", "Text"),
                    ("created_at", "2024-06-01T09:15"),
                ],
            )
            .await;

        assert_eq!(res.status, 200);
        assert!(res.body.contains("This field must be checked"));
        assert_eq!(app.count_posts().await, 0);
    }

    #[tokio::test]
    async fn whitespace_only_title_counts_as_missing() {
        let app = TestApp::spawn().await;

        let res = app
            .post_form(
                routes::NEW_POST,
                &[
                    ("title", "   "),
                    ("text", "Text"),
                    ("is_active", "on"),
                    ("created_at", "2024-06-01T09:15"),
                ],
            )
            .await;

        assert_eq!(res.status, 200);
        assert!(res.body.contains("Title is required"));
        assert_eq!(app.count_posts().await, 0);
    }

    #[tokio::test]
    async fn thanks_page_renders() {
        let app = TestApp::spawn().await;

        let res = app.get(routes::THANKS).await;

        assert_eq!(res.status, 200);
        assert!(res.body.contains("Thank you"));
    }
}

mod detail {
    use super::*;

    #[tokio::test]
    async fn detail_page_shows_created_post() {
        let app = TestApp::spawn().await;
        app.post_form(
            routes::NEW_POST,
            &[
                ("title", "Visible post"),
                ("text", "Some body text."),
                ("is_active", "on"),
                ("created_at", "2024-06-01T09:15"),
            ],
        )
        .await;
        let post = app.find_post_by_title("Visible post").await.unwrap();

        let res = app.get(&routes::post_detail(post.id)).await;

        assert_eq!(res.status, 200);
        assert!(res.body.contains("Visible post"));
        assert!(res.body.contains("Some body text."));
        assert!(res.body.contains("2024-06-01 09:15"));
    }

    #[tokio::test]
    async fn unknown_post_returns_404_page() {
        let app = TestApp::spawn().await;

        let res = app.get(&routes::post_detail(424242)).await;

        assert_eq!(res.status, 404);
        assert!(res.body.contains("Blog post not found"));
    }
}
