use crate::common::{TestApp, routes};

async fn protected_app() -> TestApp {
    TestApp::spawn_with(|config| {
        config.security.csrf_secret = Some("integration-test-secret".into());
    })
    .await
}

/// Pull the `csrf_token` value out of a rendered form.
fn extract_token(html: &str) -> String {
    let marker = r#"name="csrf_token" value=""#;
    let start = html.find(marker).expect("page should carry a csrf token") + marker.len();
    let end = html[start..].find('"').unwrap() + start;
    html[start..end].to_string()
}

#[tokio::test]
async fn submit_without_token_is_forbidden() {
    let app = protected_app().await;

    let res = app.submit("Ada", "p", "r", "").await;

    assert_eq!(res.status, 403);
    assert_eq!(app.count(None).await, 0);
}

#[tokio::test]
async fn submit_with_page_token_succeeds() {
    let app = protected_app().await;
    let page = app.get(routes::FEED).await;
    let token = extract_token(&page.text);

    let res = app
        .post_form(
            routes::SUBMIT,
            &[("name", "Ada"), ("prompt", "p"), ("result", "r"), ("csrf_token", &token)],
        )
        .await;

    res.assert_redirect("/");
    assert_eq!(app.count(None).await, 1);
}

#[tokio::test]
async fn delete_with_forged_token_is_forbidden() {
    let app = protected_app().await;
    let page = app.get(routes::FEED).await;
    let token = extract_token(&page.text);
    app.post_form(
        routes::SUBMIT,
        &[("name", "Ada"), ("prompt", "p"), ("result", "r"), ("csrf_token", &token)],
    )
    .await;
    let id = app.latest_id().await.to_string();

    let res = app
        .post_form(routes::DELETE, &[("id", &id), ("csrf_token", "not-a-token")])
        .await;
    assert_eq!(res.status, 403);
    assert_eq!(app.count(None).await, 1);

    let res = app
        .post_form(routes::DELETE, &[("id", &id), ("csrf_token", &token)])
        .await;
    res.assert_redirect("/");
    assert_eq!(app.count(None).await, 0);
}

#[tokio::test]
async fn tokens_are_absent_when_protection_is_off() {
    let app = TestApp::spawn().await;
    let page = app.get(routes::FEED).await;
    assert!(!page.text.contains("csrf_token"));
}
