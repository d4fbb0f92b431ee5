use crate::common::{TestApp, routes};

mod feed_page {
    use super::*;

    #[tokio::test]
    async fn empty_feed_shows_placeholder() {
        let app = TestApp::spawn().await;

        let res = app.get(routes::FEED).await;

        assert_eq!(res.status, 200);
        assert!(res.text.contains("No submissions yet."));
        assert!(res.text.contains(r#"action="/submit""#));
    }

    #[tokio::test]
    async fn workshop_round_trip() {
        let app = TestApp::spawn().await;
        app.submit("Ada", "2+2?", "4", "team1").await;

        let team1 = app.get(&routes::feed_for("team1")).await;
        assert_eq!(team1.status, 200);
        assert!(team1.text.contains("Ada"));
        assert!(team1.text.contains("Recent Submissions (team1)"));
        assert!(team1.text.contains(r#"name="workshop" value="team1""#));

        let team2 = app.get(&routes::feed_for("team2")).await;
        assert!(!team2.text.contains("Ada"));
        assert!(team2.text.contains("No submissions yet."));

        let global = app.get(routes::FEED).await;
        assert!(global.text.contains("Ada"));
    }

    #[tokio::test]
    async fn workshop_filter_is_exact_match() {
        let app = TestApp::spawn().await;
        app.submit("in-team", "p", "r", "team").await;
        app.submit("in-team1", "p", "r", "team1").await;
        app.submit("in-TEAM", "p", "r", "TEAM").await;

        let rows = app.list(Some("team")).await;
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "in-team");
    }

    #[tokio::test]
    async fn empty_filter_means_global_feed() {
        let app = TestApp::spawn().await;
        app.submit("Ada", "p", "r", "team1").await;
        app.submit("Bob", "p", "r", "").await;

        let res = app.get("/?w=").await;
        assert!(res.text.contains("Ada"));
        assert!(res.text.contains("Bob"));
    }

    #[tokio::test]
    async fn repeated_filter_uses_the_first_tag() {
        let app = TestApp::spawn().await;
        app.submit("Ada", "p", "r", "team1").await;
        app.submit("Bob", "p", "r", "team2").await;

        let res = app.get("/?w=team1&w=team2").await;

        assert_eq!(res.status, 200);
        assert!(res.text.contains("Ada"));
        assert!(!res.text.contains("Bob"));
    }

    #[tokio::test]
    async fn submitted_markup_is_escaped() {
        let app = TestApp::spawn().await;
        app.submit("<img src=x onerror=alert(1)>", "<script>p</script>", "r", "")
            .await;

        let res = app.get(routes::FEED).await;
        assert!(!res.text.contains("<script>p</script>"));
        assert!(res.text.contains("&lt;script&gt;p&lt;/script&gt;"));
        assert!(!res.text.contains("<img src=x"));
    }

    #[tokio::test]
    async fn inline_images_render_on_cards() {
        let app = TestApp::spawn().await;
        app.post_form(
            routes::SUBMIT,
            &[
                ("name", "Ada"),
                ("prompt", "p"),
                ("result", "r"),
                ("image_data_url", "data:image/png;base64,AAAA"),
            ],
        )
        .await;

        let res = app.get(routes::FEED).await;
        assert!(res.text.contains(r#"src="data:image/png;base64,AAAA""#));
    }
}

mod static_assets {
    use super::*;

    #[tokio::test]
    async fn capture_script_is_served() {
        let app = TestApp::spawn().await;

        let res = app.get(routes::CAPTURE_JS).await;

        assert_eq!(res.status, 200);
        assert!(res.text.contains("image_data_url"));
        assert!(res.text.contains("toDataURL('image/jpeg'"));
    }

    #[tokio::test]
    async fn health_check_answers_ok() {
        let app = TestApp::spawn().await;
        let res = app.get(routes::HEALTH).await;
        assert_eq!(res.status, 200);
        assert_eq!(res.text, "ok");
    }
}
