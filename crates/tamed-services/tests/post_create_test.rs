//! End-to-end post creation over the filesystem stores.

mod helpers;

use std::collections::HashSet;

use std::sync::Arc;

use helpers::TestApp;
use tamed_core::AppError;
use tamed_services::test_helpers::fixtures::{
    elf_bytes, jpeg_bytes, large_jpeg_bytes, png_bytes,
};
use tamed_services::test_helpers::BrokenSource;
use tamed_services::UploadedFile;

#[tokio::test]
async fn two_jpegs_with_and_without_extension() {
    let app = TestApp::new().await;
    let files = vec![
        UploadedFile::from_bytes("a.jpg", jpeg_bytes()),
        UploadedFile::from_bytes("b", jpeg_bytes()),
    ];

    let results = app.services.posts.create(&files).await.unwrap();
    assert_eq!(results.len(), 2);

    let a = results[0].post().expect("a.jpg should succeed");
    let b = results[1].post().expect("b should succeed");
    assert!(a.link.ends_with(&format!("/{}.jpg", a.post_id)));
    assert!(b.link.ends_with(&format!("/{}.jpg", b.post_id)));
    assert!(a.tags.is_empty() && b.tags.is_empty());

    assert_eq!(
        app.media_files(),
        {
            let mut names = vec![format!("{}.jpg", a.post_id), format!("{}.jpg", b.post_id)];
            names.sort();
            names
        }
    );
    assert_eq!(app.post_records().len(), 2);
}

#[tokio::test]
async fn zero_size_file_fails_the_batch() {
    let app = TestApp::new().await;
    let files = vec![UploadedFile::from_bytes("empty.png", Vec::new())];

    let err = app.services.posts.create(&files).await.unwrap_err();
    assert!(matches!(err, AppError::BadRequest(ref msg) if msg == "postsrv.create: empty data inside 0 file"));
    assert!(app.media_files().is_empty());
    assert!(app.post_records().is_empty());
}

#[tokio::test]
async fn zero_size_anywhere_in_batch_stores_nothing() {
    let app = TestApp::new().await;
    let files = vec![
        UploadedFile::from_bytes("a.jpg", jpeg_bytes()),
        UploadedFile::from_bytes("b.jpg", jpeg_bytes()),
        UploadedFile::from_bytes("c.jpg", Vec::new()),
    ];

    let err = app.services.posts.create(&files).await.unwrap_err();
    assert!(err.to_string().contains("empty data inside 2 file"));
    assert!(app.media_files().is_empty());
}

#[tokio::test]
async fn executable_is_rejected_next_to_valid_jpeg() {
    let app = TestApp::new().await;
    let files = vec![
        UploadedFile::from_bytes("evil", elf_bytes()),
        UploadedFile::from_bytes("ok.jpg", jpeg_bytes()),
    ];

    let results = app.services.posts.create(&files).await.unwrap();
    assert_eq!(results.len(), 2);

    let error = results[0].error().expect("executable should fail");
    assert!(error.starts_with("postsrv.create(evil): bad upload type "));
    assert!(results[1].is_created());

    assert_eq!(app.media_files().len(), 1);
    assert_eq!(app.post_records().len(), 1);
}

#[tokio::test]
async fn mismatched_extension_is_used_verbatim() {
    let app = TestApp::new().await;
    let files = vec![UploadedFile::from_bytes("photo.gif", png_bytes())];

    let results = app.services.posts.create(&files).await.unwrap();
    let post = results[0].post().unwrap();
    assert!(post.link.ends_with(".gif"));
    assert_eq!(app.media_files(), vec![format!("{}.gif", post.post_id)]);
}

#[tokio::test]
async fn ids_are_unique_across_calls() {
    let app = TestApp::new().await;
    let mut ids = HashSet::new();

    for _ in 0..5 {
        let files = vec![
            UploadedFile::from_bytes("x.png", png_bytes()),
            UploadedFile::from_bytes("y", jpeg_bytes()),
        ];
        for result in app.services.posts.create(&files).await.unwrap() {
            let post = result.post().unwrap();
            assert!(!post.post_id.is_empty());
            assert!(!post.link.is_empty());
            assert!(ids.insert(post.post_id.clone()));
        }
    }
    assert_eq!(ids.len(), 10);
}

#[tokio::test]
async fn stored_bytes_match_upload_beyond_sniff_prefix() {
    let app = TestApp::new().await;
    let data = large_jpeg_bytes(64 * 1024);
    let files = vec![UploadedFile::from_bytes("big.jpg", data.clone())];

    let results = app.services.posts.create(&files).await.unwrap();
    let post = results[0].post().unwrap();

    let stored = std::fs::read(app.config.fs_media_path.join(format!("{}.jpg", post.post_id)))
        .unwrap();
    assert_eq!(stored, data);
}

#[tokio::test]
async fn local_files_upload_from_disk() {
    let app = TestApp::new().await;
    let source = app.dir.path().join("upload.png");
    std::fs::write(&source, png_bytes()).unwrap();

    let file = UploadedFile::from_path(&source).await.unwrap();
    let results = app.services.posts.create(&[file]).await.unwrap();
    let post = results[0].post().unwrap();

    let fetched = app.services.posts.get(&post.post_id).await.unwrap();
    assert_eq!(&fetched, post);
}

#[tokio::test]
async fn concurrent_processing_preserves_order() {
    let app = TestApp::with_concurrency(4).await;
    let files: Vec<UploadedFile> = (0..12)
        .map(|i| match i % 3 {
            0 => UploadedFile::from_bytes(format!("bin{}", i), elf_bytes()),
            1 => UploadedFile::from_bytes(format!("img{}.png", i), png_bytes()),
            _ => UploadedFile::from_bytes(format!("img{}", i), large_jpeg_bytes(8 * 1024)),
        })
        .collect();

    let results = app.services.posts.create(&files).await.unwrap();
    assert_eq!(results.len(), files.len());

    for (i, result) in results.iter().enumerate() {
        match i % 3 {
            0 => assert!(result.error().unwrap().contains(&format!("(bin{})", i))),
            1 => assert!(result.post().unwrap().link.ends_with(".png")),
            _ => assert!(result.post().unwrap().link.ends_with(".jpg")),
        }
    }
    assert_eq!(app.post_records().len(), 8);
}

#[tokio::test]
async fn results_serialize_as_post_or_error() {
    let app = TestApp::new().await;
    let files = vec![
        UploadedFile::from_bytes("a.jpg", jpeg_bytes()),
        UploadedFile::from_bytes("notes", &b"hello there"[..]),
    ];

    let results = app.services.posts.create(&files).await.unwrap();
    let json = serde_json::to_value(&results).unwrap();

    let ok = &json[0];
    assert!(ok["post_id"].is_string());
    assert!(ok["create_time"].is_string());
    assert_eq!(ok["tags"], serde_json::json!([]));
    assert!(ok["link"].is_string());
    assert!(ok.get("error").is_none());

    assert_eq!(
        json[1],
        serde_json::json!({"error": "postsrv.create(notes): bad upload type text/plain; charset=utf-8"})
    );
}

#[tokio::test]
async fn dotfile_name_becomes_the_extension() {
    let app = TestApp::new().await;
    let files = vec![UploadedFile::from_bytes(".thumbnail", png_bytes())];

    let results = app.services.posts.create(&files).await.unwrap();
    let post = results[0].post().unwrap();
    assert_eq!(app.media_files(), vec![format!("{}.thumbnail", post.post_id)]);
}

#[tokio::test]
async fn stream_breaking_mid_upload_leaves_nothing_behind() {
    let app = TestApp::new().await;
    let broken = UploadedFile::new(
        "cut.jpg",
        4096,
        Arc::new(BrokenSource::new(jpeg_bytes())),
    );
    let files = vec![broken, UploadedFile::from_bytes("ok.png", png_bytes())];

    let results = app.services.posts.create(&files).await.unwrap();
    assert!(results[0]
        .error()
        .unwrap()
        .starts_with("postsrv.create(cut.jpg): upload: "));
    let ok = results[1].post().unwrap();

    assert_eq!(app.media_files(), vec![format!("{}.png", ok.post_id)]);
    assert_eq!(app.post_records(), vec![format!("{}.json", ok.post_id)]);
}
