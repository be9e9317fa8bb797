use crate::e2e::helpers;

use helpers::fake_tts::FakeTtsBehavior;
use helpers::fixtures::PdfFixtures;
use helpers::TestContext;
use hyper::StatusCode;
use pdf_narrator::domain::conversion::ConvertedAudio;
use pretty_assertions::assert_eq;
use regex::Regex;
use test_context::test_context;

use helpers::api_client::FormPart;

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_convert_pdf_to_audio(ctx: &TestContext) {
    let pdf = PdfFixtures::with_text("Hello World");

    let response = ctx
        .client
        .upload_pdf("Hello World.pdf", &pdf, Some("Male"), None)
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);
    let converted: ConvertedAudio = response.json().unwrap();

    let pattern = Regex::new(r"^hello_world_\d+\.mp3$").unwrap();
    assert!(
        pattern.is_match(&converted.filename),
        "Unexpected artifact name {}",
        converted.filename
    );
    assert_eq!(
        converted.audio_url,
        format!("/static/audio/{}", converted.filename)
    );

    let download = ctx
        .client
        .get(&format!("/download/{}", converted.filename))
        .await
        .unwrap();
    download.assert_status(StatusCode::OK);
    assert!(!download.body_bytes.is_empty());
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_default_to_male_voice_and_normal_speed(ctx: &TestContext) {
    let pdf = PdfFixtures::with_text("Defaults apply");

    let response = ctx.client.upload_pdf("defaults.pdf", &pdf, None, None).await.unwrap();

    response.assert_status(StatusCode::OK);
    let converted: ConvertedAudio = response.json().unwrap();

    let audio = std::fs::read(ctx.audio_path(&converted.filename)).unwrap();
    let audio = String::from_utf8_lossy(&audio);
    assert!(audio.contains("fake-male|1|"), "Unexpected fake audio {}", audio);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_apply_female_voice_and_speed(ctx: &TestContext) {
    let pdf = PdfFixtures::with_text("Faster please");

    let response = ctx
        .client
        .upload_pdf("fast.pdf", &pdf, Some("female"), Some("1.5"))
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);
    let converted: ConvertedAudio = response.json().unwrap();

    let audio = std::fs::read(ctx.audio_path(&converted.filename)).unwrap();
    assert!(String::from_utf8_lossy(&audio).contains("fake-female|1.5|"));
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_pdf_without_text(ctx: &TestContext) {
    let pdf = PdfFixtures::without_text();

    let response = ctx.client.upload_pdf("scan.pdf", &pdf, None, None).await.unwrap();

    response
        .assert_status(StatusCode::BAD_REQUEST)
        .assert_error_message("Empty or unreadable");
    assert!(ctx.audio_files().is_empty());
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_corrupt_pdf(ctx: &TestContext) {
    let response = ctx
        .client
        .upload_pdf("broken.pdf", b"%PDF-1.4 truncated garbage", None, None)
        .await
        .unwrap();

    response
        .assert_status(StatusCode::BAD_REQUEST)
        .assert_error_message("Empty or unreadable");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_give_distinct_names_to_identical_uploads(ctx: &TestContext) {
    let pdf = PdfFixtures::with_text("Same content twice");

    let (first, second) = tokio::join!(
        ctx.client.upload_pdf("report.pdf", &pdf, None, None),
        ctx.client.upload_pdf("report.pdf", &pdf, None, None),
    );

    let first = first.unwrap();
    let second = second.unwrap();
    first.assert_status(StatusCode::OK);
    second.assert_status(StatusCode::OK);

    let first: ConvertedAudio = first.json().unwrap();
    let second: ConvertedAudio = second.json().unwrap();
    assert_ne!(first.filename, second.filename);
    assert_eq!(ctx.audio_files().len(), 2);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_keep_concurrent_same_name_uploads_apart(ctx: &TestContext) {
    let alice = PdfFixtures::with_text("Alice quarterly figures");
    let bob = PdfFixtures::with_text("Bob travel plans");

    let (alice_response, bob_response) = tokio::join!(
        ctx.client.upload_pdf("report.pdf", &alice, None, None),
        ctx.client.upload_pdf("report.pdf", &bob, None, None),
    );

    let alice_audio: ConvertedAudio = alice_response.unwrap().json().unwrap();
    let bob_audio: ConvertedAudio = bob_response.unwrap().json().unwrap();

    let alice_bytes = std::fs::read(ctx.audio_path(&alice_audio.filename)).unwrap();
    let bob_bytes = std::fs::read(ctx.audio_path(&bob_audio.filename)).unwrap();
    let alice_text = String::from_utf8_lossy(&alice_bytes);
    let bob_text = String::from_utf8_lossy(&bob_bytes);

    assert!(alice_text.contains("Alice quarterly figures"), "got {}", alice_text);
    assert!(!alice_text.contains("Bob"));
    assert!(bob_text.contains("Bob travel plans"), "got {}", bob_text);
    assert!(!bob_text.contains("Alice"));
    assert_eq!(ctx.upload_files().len(), 2);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_sanitize_traversal_filenames(ctx: &TestContext) {
    let pdf = PdfFixtures::with_text("Nothing to see");

    let response = ctx
        .client
        .upload_pdf("../../etc/passwd.pdf", &pdf, None, None)
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);
    let converted: ConvertedAudio = response.json().unwrap();

    assert!(converted.filename.starts_with("etc_passwd_"));
    assert!(!converted.filename.contains('/'));
    assert!(ctx.audio_path(&converted.filename).is_file());
    let uploads = ctx.upload_files();
    assert_eq!(uploads.len(), 1);
    assert!(uploads[0].ends_with("_etc_passwd.pdf"), "stored as {}", uploads[0]);
}

#[tokio::test]
async fn it_should_return_server_error_when_synthesis_fails() {
    let ctx = TestContext::start(FakeTtsBehavior::Fail).await.unwrap();
    let pdf = PdfFixtures::with_text("This will not be spoken");

    let response = ctx.client.upload_pdf("fail.pdf", &pdf, None, None).await.unwrap();

    response
        .assert_status(StatusCode::INTERNAL_SERVER_ERROR)
        .assert_error_message("Could not convert text to audio");
    assert!(ctx.audio_files().is_empty());
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_unknown_voice(ctx: &TestContext) {
    let pdf = PdfFixtures::with_text("Voice check");

    let response = ctx
        .client
        .upload_pdf("voice.pdf", &pdf, Some("Robot"), None)
        .await
        .unwrap();

    response
        .assert_status(StatusCode::BAD_REQUEST)
        .assert_error_message("Unsupported voice");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_invalid_speed(ctx: &TestContext) {
    let pdf = PdfFixtures::with_text("Speed check");

    for speed in ["fast", "0", "-1"] {
        let response = ctx
            .client
            .upload_pdf("speed.pdf", &pdf, None, Some(speed))
            .await
            .unwrap();

        response.assert_status(StatusCode::BAD_REQUEST);
    }
    assert!(ctx.audio_files().is_empty());
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_require_file_part(ctx: &TestContext) {
    let response = ctx
        .client
        .post_multipart("/", &[FormPart::Text { name: "voice", value: "Male" }])
        .await
        .unwrap();

    response
        .assert_status(StatusCode::BAD_REQUEST)
        .assert_error_message("No file part");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_require_selected_file(ctx: &TestContext) {
    let response = ctx.client.upload_pdf("", b"", None, None).await.unwrap();

    response
        .assert_status(StatusCode::BAD_REQUEST)
        .assert_error_message("No selected file");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_non_pdf_uploads(ctx: &TestContext) {
    let response = ctx
        .client
        .upload_pdf("notes.txt", b"plain text", None, None)
        .await
        .unwrap();

    response
        .assert_status(StatusCode::BAD_REQUEST)
        .assert_error_message("Only PDF files are supported");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_render_upload_page(ctx: &TestContext) {
    let pdf = PdfFixtures::with_text("Listed on the page");
    let converted: ConvertedAudio = ctx
        .client
        .upload_pdf("listed.pdf", &pdf, None, None)
        .await
        .unwrap()
        .json()
        .unwrap();

    let response = ctx.client.get("/").await.unwrap();

    response.assert_status(StatusCode::OK);
    let html = response.text();
    assert!(html.contains("<form"));
    assert!(html.contains(&converted.filename));
}
