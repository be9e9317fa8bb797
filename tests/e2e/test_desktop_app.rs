use crate::e2e::helpers;

use helpers::TestContext;
use hyper::StatusCode;
use pretty_assertions::assert_eq;
use test_context::test_context;

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_return_not_found_when_app_is_missing(ctx: &TestContext) {
    let response = ctx.client.get("/download_app").await.unwrap();

    response
        .assert_status(StatusCode::NOT_FOUND)
        .assert_error_message("App not found on server");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_download_app_when_present(ctx: &TestContext) {
    let app_path = &ctx.config.desktop_app_path;
    std::fs::create_dir_all(app_path.parent().unwrap()).unwrap();
    std::fs::write(app_path, b"MZ fake executable").unwrap();

    let response = ctx.client.get("/download_app").await.unwrap();

    response.assert_status(StatusCode::OK);
    assert_eq!(response.body_bytes, b"MZ fake executable");
    let disposition = response.header("content-disposition").unwrap();
    assert!(disposition.contains("attachment"));
    assert!(disposition.contains("app.exe"));
}
