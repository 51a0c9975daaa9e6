use crate::fetch::util::{self, MANIFEST, OVERLAY};
use std::io::{Cursor, Write};
use webpub_smil::Publication;
use webpub_smil::errors::FetchError;
use webpub_smil::fetch::{Fetcher, ZipFetcher};
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

fn package(entries: &[(&str, &[u8])]) -> Vec<u8> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default();

    for (name, data) in entries {
        zip.start_file(*name, options).unwrap();
        zip.write_all(data).unwrap();
    }
    zip.finish().unwrap().into_inner()
}

fn packaged_publication() -> Vec<u8> {
    package(&[
        ("manifest.json", MANIFEST.as_bytes()),
        ("MO/c1.json", OVERLAY.as_bytes()),
        ("MO/c1-utf16.json", util::utf16_le(OVERLAY).as_slice()),
    ])
}

#[tokio::test]
async fn test_fetch_text_contents() {
    let fetcher = ZipFetcher::read(Cursor::new(packaged_publication()), "/manifest.json").unwrap();

    assert_eq!("/manifest.json", fetcher.publication_base_url());
    assert_eq!(MANIFEST, fetcher.fetch_text_contents("/manifest.json").await.unwrap());
    assert_eq!(OVERLAY, fetcher.fetch_text_contents("MO/c1.json").await.unwrap());
    assert_eq!(OVERLAY, fetcher.fetch_text_contents("/MO/c1-utf16.json").await.unwrap());
    assert_eq!(OVERLAY, fetcher.fetch_text_contents("/MO/x/../c1.json").await.unwrap());
}

#[tokio::test]
async fn test_fetch_missing_entry() {
    let fetcher = ZipFetcher::read(Cursor::new(packaged_publication()), "/manifest.json").unwrap();

    for url in ["/MO/c2.json", "http://localhost/MO/c1.json"] {
        assert!(matches!(
            fetcher.fetch_text_contents(url).await,
            Err(FetchError::InvalidResource { .. })
        ));
    }
}

#[test]
fn test_unreadable_archive() {
    let result = ZipFetcher::read(Cursor::new(b"not a zip".to_vec()), "/manifest.json");
    assert!(matches!(
        result,
        Err(FetchError::UnreadableArchive { path: None, .. })
    ));

    let dir = tempfile::tempdir().unwrap();
    let result = ZipFetcher::open(dir.path().join("missing.webpub"), "/manifest.json");
    assert!(matches!(
        result,
        Err(FetchError::UnreadableArchive { path: Some(_), .. })
    ));
}

#[tokio::test]
async fn test_fill_media_overlays_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("moby-dick.webpub");
    std::fs::write(&path, packaged_publication()).unwrap();

    let fetcher = ZipFetcher::open(&path, "/manifest.json").unwrap();
    let mut publication = Publication::from_json(MANIFEST).unwrap();

    webpub_smil::fill_media_overlays(&mut publication, &fetcher).await;

    let models = publication.smil_models().unwrap();
    assert_eq!(vec!["cover", "c1"], models.iter().map(|m| m.spine_item_id()).collect::<Vec<_>>());
    assert_eq!(2, models[1].chapter().pars().len());
}
