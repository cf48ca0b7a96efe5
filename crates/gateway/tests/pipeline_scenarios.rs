//! End-to-end pipeline behavior against a recording fake provider.

mod common;

use common::*;
use pl_domain::Error;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Directory-backed
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[tokio::test]
async fn text_file_next_to_skipped_image_counts_one() {
    let tree = tempfile::TempDir::new().unwrap();
    write(tree.path(), "a.txt", "hello");
    write(tree.path(), "b.png", [0x89, b'P', b'N', b'G']);
    let provider = RecordingProvider::ok();
    let svc = service(tree.path(), provider.clone());

    let outcome = svc
        .analyze_directory(tree.path().to_str().unwrap(), None)
        .await
        .unwrap();

    assert_eq!(outcome.files_analyzed, 1);
    assert_eq!(outcome.text, "stub answer");
    assert_eq!(outcome.model, "stub-model");
    assert_eq!(provider.call_count(), 1);
    let prompt = provider.last_prompt();
    assert!(prompt.contains("--- File: a.txt ---\nhello"));
    assert!(!prompt.contains("b.png"));
}

#[tokio::test]
async fn only_filtered_files_is_empty_result_without_model_call() {
    let tree = tempfile::TempDir::new().unwrap();
    write(tree.path(), "logo.png", [1u8, 2, 3]);
    write(tree.path(), "bundle.zip", [4u8, 5, 6]);
    let provider = RecordingProvider::ok();
    let svc = service(tree.path(), provider.clone());

    let err = svc
        .analyze_directory(tree.path().to_str().unwrap(), None)
        .await
        .unwrap_err();

    assert!(matches!(err, Error::EmptyResult(_)), "got {err:?}");
    assert_eq!(provider.call_count(), 0);
}

#[tokio::test]
async fn empty_directory_is_empty_result() {
    let tree = tempfile::TempDir::new().unwrap();
    let provider = RecordingProvider::ok();
    let svc = service(tree.path(), provider.clone());

    let err = svc
        .query_directory(tree.path().to_str().unwrap(), "anything?", None)
        .await
        .unwrap_err();

    assert!(matches!(err, Error::EmptyResult(_)));
    assert_eq!(provider.call_count(), 0);
}

#[tokio::test]
async fn only_binary_files_is_empty_result() {
    let tree = tempfile::TempDir::new().unwrap();
    write(tree.path(), "blob.dat", [0xffu8, 0xfe, 0x00, 0x80]);
    let provider = RecordingProvider::ok();
    let svc = service(tree.path(), provider.clone());

    let err = svc
        .analyze_directory(tree.path().to_str().unwrap(), None)
        .await
        .unwrap_err();

    assert!(matches!(err, Error::EmptyResult(_)));
    assert_eq!(provider.call_count(), 0);
}

#[tokio::test]
async fn query_drops_oversized_file_but_summary_caps_it() {
    let tree = tempfile::TempDir::new().unwrap();
    write(tree.path(), "big.txt", "b".repeat(600_000));
    write(tree.path(), "small.txt", "s".repeat(10_000));
    let provider = RecordingProvider::ok();
    let svc = service(tree.path(), provider.clone());
    let root = tree.path().to_str().unwrap();

    let query = svc.query_directory(root, "what is here?", None).await.unwrap();
    assert_eq!(query.files_included, 1);
    assert_eq!(query.files_analyzed, 2);
    let prompt = provider.last_prompt();
    assert!(!prompt.contains("big.txt"));
    assert!(prompt.contains("--- File: small.txt (small.txt) ---"));
    assert!(prompt.contains("Based on the 1 files provided above"));

    let summary = svc.analyze_directory(root, None).await.unwrap();
    assert_eq!(summary.files_included, 2);
    let prompt = provider.last_prompt();
    assert!(prompt.contains(&format!("--- File: big.txt ---\n{}\n\n", "b".repeat(20_000))));
    assert!(!prompt.contains(&"b".repeat(20_001)));
}

#[tokio::test]
async fn query_names_the_directory_and_quotes_the_question() {
    let parent = tempfile::TempDir::new().unwrap();
    let root = parent.path().join("my-service");
    write(&root, "src/main.rs", "fn main() {}");
    let provider = RecordingProvider::ok();
    let svc = service(parent.path(), provider.clone());

    svc.query_directory(root.to_str().unwrap(), "How does it start?", Some("gemini-2.5-pro".into()))
        .await
        .unwrap();

    let calls = provider.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].model.as_deref(), Some("gemini-2.5-pro"));
    assert!(calls[0].prompt.contains("analyzing the project \"my-service\""));
    assert!(calls[0].prompt.contains("USER QUESTION: \"How does it start?\""));
    assert!(calls[0].prompt.contains("--- File: main.rs (src/main.rs) ---"));
}

#[tokio::test]
async fn skipped_directories_never_reach_the_prompt() {
    let tree = tempfile::TempDir::new().unwrap();
    write(tree.path(), "index.js", "console.log(1)");
    write(tree.path(), "node_modules/dep/index.js", "module.exports = 1");
    write(tree.path(), "pkg/.git/config", "[core]");
    write(tree.path(), "node_modules_old/keep.js", "kept");
    let provider = RecordingProvider::ok();
    let svc = service(tree.path(), provider.clone());

    let outcome = svc
        .analyze_directory(tree.path().to_str().unwrap(), None)
        .await
        .unwrap();

    assert_eq!(outcome.files_analyzed, 2);
    let prompt = provider.last_prompt();
    assert!(prompt.contains("keep.js"));
    assert!(!prompt.contains("module.exports"));
    assert!(!prompt.contains("[core]"));
}

#[cfg(unix)]
#[tokio::test]
async fn unreadable_subdirectory_does_not_abort() {
    use std::os::unix::fs::PermissionsExt;

    let tree = tempfile::TempDir::new().unwrap();
    write(tree.path(), "ok/visible.txt", "still here");
    write(tree.path(), "locked/hidden.txt", "secret");
    let locked = tree.path().join("locked");
    std::fs::set_permissions(&locked, std::fs::Permissions::from_mode(0o000)).unwrap();

    let provider = RecordingProvider::ok();
    let svc = service(tree.path(), provider.clone());
    let result = svc
        .analyze_directory(tree.path().to_str().unwrap(), None)
        .await;

    std::fs::set_permissions(&locked, std::fs::Permissions::from_mode(0o755)).unwrap();

    let outcome = result.unwrap();
    assert!(provider.last_prompt().contains("still here"));
    let traversal = outcome.traversal.unwrap();
    // Privileged runs can still list the directory.
    if std::fs::read_dir(&locked).is_err() {
        assert_eq!(traversal.errors, 1);
    }
}

#[tokio::test]
async fn validation_happens_before_any_io() {
    let provider = RecordingProvider::ok();
    let svc = service(std::path::Path::new("/nonexistent"), provider.clone());

    let err = svc.analyze_directory("   ", None).await.unwrap_err();
    assert!(matches!(err, Error::InvalidInput(_)));

    let err = svc.query_directory("/tmp", "", None).await.unwrap_err();
    assert!(matches!(err, Error::InvalidInput(_)));

    let err = svc
        .analyze_directory("/definitely/not/a/real/dir", None)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));

    assert_eq!(provider.call_count(), 0);
}

#[tokio::test]
async fn file_root_is_not_a_directory() {
    let tree = tempfile::TempDir::new().unwrap();
    write(tree.path(), "a.txt", "hello");
    let provider = RecordingProvider::ok();
    let svc = service(tree.path(), provider.clone());

    let err = svc
        .analyze_directory(tree.path().join("a.txt").to_str().unwrap(), None)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::NotADirectory(_)));
}

#[tokio::test]
async fn provider_failure_surfaces_once() {
    let tree = tempfile::TempDir::new().unwrap();
    write(tree.path(), "a.txt", "hello");
    let provider = RecordingProvider::failing("HTTP 429 - quota exceeded");
    let svc = service(tree.path(), provider.clone());

    let err = svc
        .analyze_directory(tree.path().to_str().unwrap(), None)
        .await
        .unwrap_err();

    assert!(err.to_string().contains("quota exceeded"));
    assert_eq!(provider.call_count(), 1);
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Single file
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[tokio::test]
async fn live_file_is_truncated_to_ninety_thousand_chars() {
    let tree = tempfile::TempDir::new().unwrap();
    write(tree.path(), "huge.log", format!("{}{}", "x".repeat(90_000), "y".repeat(100)));
    let provider = RecordingProvider::ok();
    let svc = service(tree.path(), provider.clone());

    let outcome = svc
        .analyze_file(tree.path().join("huge.log").to_str().unwrap(), None)
        .await
        .unwrap();

    assert_eq!(outcome.files_included, 1);
    let prompt = provider.last_prompt();
    assert!(prompt.contains("file named \"huge.log\""));
    let body = prompt.split("File Content:\n").nth(1).unwrap();
    assert_eq!(body, format!("{}\n", "x".repeat(90_000)));
}

#[tokio::test]
async fn binary_file_is_rejected_before_model_call() {
    let tree = tempfile::TempDir::new().unwrap();
    write(tree.path(), "blob.bin", [0xffu8, 0x00, 0xfe]);
    let provider = RecordingProvider::ok();
    let svc = service(tree.path(), provider.clone());

    let err = svc
        .analyze_file(tree.path().join("blob.bin").to_str().unwrap(), None)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::InvalidInput(_)));
    assert_eq!(provider.call_count(), 0);
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Project-backed
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[tokio::test]
async fn project_summary_uses_only_files_with_content() {
    let store = tempfile::TempDir::new().unwrap();
    save_project(
        store.path(),
        "demo",
        "Demo",
        vec![
            text_record("README.md", "# Demo"),
            contentless_record("diagram.png", "image/png"),
            contentless_record("data.bin", "text/plain"),
        ],
    )
    .await;
    let provider = RecordingProvider::ok();
    let svc = service(store.path(), provider.clone());

    let outcome = svc.analyze_project("demo", None).await.unwrap();

    assert_eq!(outcome.files_analyzed, 1);
    assert_eq!(outcome.files_included, 1);
    let prompt = provider.last_prompt();
    assert!(prompt.contains("--- File: README.md ---\n# Demo"));
    assert!(!prompt.contains("data.bin"));
}

#[tokio::test]
async fn project_without_text_is_empty_result() {
    let store = tempfile::TempDir::new().unwrap();
    save_project(store.path(), "pics", "Pics", vec![contentless_record("a.png", "image/png")]).await;
    save_project(store.path(), "none", "None", vec![]).await;
    let provider = RecordingProvider::ok();
    let svc = service(store.path(), provider.clone());

    let err = svc.analyze_project("pics", None).await.unwrap_err();
    assert!(matches!(err, Error::EmptyResult(ref m) if m == "no analyzable text files found"));
    let err = svc.analyze_project("none", None).await.unwrap_err();
    assert!(matches!(err, Error::EmptyResult(ref m) if m == "no files to analyze"));
    assert_eq!(provider.call_count(), 0);
}

#[tokio::test]
async fn project_query_uses_stored_name() {
    let store = tempfile::TempDir::new().unwrap();
    save_project(
        store.path(),
        "shop",
        "Shop Backend",
        vec![text_record("src/cart.rs", "pub struct Cart;")],
    )
    .await;
    let provider = RecordingProvider::ok();
    let svc = service(store.path(), provider.clone());

    let outcome = svc.query_project("shop", "What is Cart?", None).await.unwrap();

    assert_eq!(outcome.files_included, 1);
    let prompt = provider.last_prompt();
    assert!(prompt.contains("analyzing the project \"Shop Backend\""));
    assert!(prompt.contains("--- File: cart.rs (src/cart.rs) ---\n```\npub struct Cart;\n```"));
}

#[tokio::test]
async fn unknown_project_and_file_are_not_found() {
    let store = tempfile::TempDir::new().unwrap();
    save_project(store.path(), "demo", "Demo", vec![text_record("a.txt", "x")]).await;
    let provider = RecordingProvider::ok();
    let svc = service(store.path(), provider.clone());

    let err = svc.analyze_project("ghost", None).await.unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));
    let err = svc.analyze_project_file("demo", "b.txt", None).await.unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));
    assert_eq!(provider.call_count(), 0);
}

#[tokio::test]
async fn stored_file_without_text_is_invalid_input() {
    let store = tempfile::TempDir::new().unwrap();
    save_project(
        store.path(),
        "demo",
        "Demo",
        vec![contentless_record("logo.png", "image/png"), text_record("a.txt", "alpha")],
    )
    .await;
    let provider = RecordingProvider::ok();
    let svc = service(store.path(), provider.clone());

    let err = svc.analyze_project_file("demo", "logo.png", None).await.unwrap_err();
    assert!(matches!(err, Error::InvalidInput(_)));

    let outcome = svc.analyze_project_file("demo", "a.txt", None).await.unwrap();
    assert_eq!(outcome.files_analyzed, 1);
    assert!(provider.last_prompt().contains("File Content:\nalpha\n"));
}

#[tokio::test]
async fn stored_image_content_never_reaches_the_model() {
    let store = tempfile::TempDir::new().unwrap();
    let mut logo = text_record("logo.svg", "<svg>IMAGE-BYTES</svg>");
    logo.declared_type = "image/svg+xml".into();
    save_project(store.path(), "art", "Art", vec![logo.clone()]).await;
    save_project(
        store.path(),
        "mixed",
        "Mixed",
        vec![logo, text_record("README.md", "# Mixed")],
    )
    .await;
    let provider = RecordingProvider::ok();
    let svc = service(store.path(), provider.clone());

    let err = svc.analyze_project_file("art", "logo.svg", None).await.unwrap_err();
    assert!(matches!(err, Error::InvalidInput(_)));
    let err = svc.analyze_project("art", None).await.unwrap_err();
    assert!(matches!(err, Error::EmptyResult(ref m) if m == "no analyzable text files found"));
    assert_eq!(provider.call_count(), 0);

    let outcome = svc.analyze_project("mixed", None).await.unwrap();
    assert_eq!(outcome.files_analyzed, 1);
    assert_eq!(outcome.files_included, 1);
    svc.query_project("mixed", "what is drawn?", None).await.unwrap();
    for call in provider.calls() {
        assert!(!call.prompt.contains("IMAGE-BYTES"));
    }
    assert_eq!(provider.call_count(), 2);
}

#[tokio::test]
async fn dry_run_pipeline_matches_what_the_service_sends() {
    let tree = tempfile::TempDir::new().unwrap();
    write(tree.path(), "a.txt", "hello");
    let provider = RecordingProvider::ok();
    let svc = service(tree.path(), provider.clone());
    let root = tree.path().to_str().unwrap();

    let prepared = svc.pipeline().prepare_directory_query(root, "why?").await.unwrap();
    assert_eq!(provider.call_count(), 0);

    svc.query_directory(root, "why?", None).await.unwrap();
    assert_eq!(provider.last_prompt(), prepared.prompt);
}
