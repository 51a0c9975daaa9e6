use crate::overlay::util::{self, ScriptedFetcher, mo_url, narrated_publication};
use webpub_smil::SpineItem;
use webpub_smil::errors::{FetchError, FragmentError, OverlayError};
use webpub_smil::overlay::{self, Aggregate, OverlaySettings};

#[tokio::test]
async fn test_aggregate_complete() {
    let fetcher = ScriptedFetcher::new()
        .respond(&mo_url(1), 10, util::overlay_json("Audio/c1.mp3", "Text/c1.xhtml", &["a"]))
        .respond(&mo_url(2), 0, util::overlay_json("Audio/c2.mp3", "Text/c2.xhtml", &["b"]));
    let publication = narrated_publication(2);

    let aggregate =
        overlay::aggregate(&publication.spine, &fetcher, &OverlaySettings::default()).await;

    assert!(!aggregate.is_failed());
    assert!(matches!(&aggregate, Aggregate::Complete(models) if models.len() == 2));
}

#[tokio::test]
async fn test_aggregate_counts_failures() {
    let fetcher = ScriptedFetcher::new()
        .fail(&mo_url(1), 10)
        .respond(&mo_url(2), 0, util::overlay_json("Audio/c2.mp3", "Text/c2.xhtml", &["b"]))
        .respond(&mo_url(3), 0, "[]");
    let publication = narrated_publication(3);

    let aggregate =
        overlay::aggregate(&publication.spine, &fetcher, &OverlaySettings::default()).await;

    assert_eq!(Aggregate::Failed { failures: 2 }, aggregate);
    assert!(aggregate.is_failed());
    assert!(aggregate.into_models().is_empty());
}

#[tokio::test]
async fn test_aggregate_empty_spine() {
    let fetcher = ScriptedFetcher::new();

    let aggregate = overlay::aggregate(&[], &fetcher, &OverlaySettings::default()).await;

    assert_eq!(Aggregate::Complete(Vec::new()), aggregate);
}

#[tokio::test]
async fn test_resolve_error_kinds() {
    let item = SpineItem::new("c1", "Text/c1.xhtml").with_media_overlay("MO/c1.json");
    let settings = OverlaySettings::default();

    let fetcher = ScriptedFetcher::new().fail(&mo_url(1), 0);
    let result = overlay::resolve_spine_item(&item, &fetcher, &settings).await;
    assert!(matches!(
        result,
        Err(OverlayError::Fetch(FetchError::InvalidResource { .. }))
    ));

    let fetcher = ScriptedFetcher::new().respond(&mo_url(1), 0, "<smil/>");
    let result = overlay::resolve_spine_item(&item, &fetcher, &settings).await;
    assert!(matches!(result, Err(OverlayError::Json { url, .. }) if url == mo_url(1)));

    let fetcher = ScriptedFetcher::new().respond(&mo_url(1), 0, r#"{"media-overlay": [{}]}"#);
    let result = overlay::resolve_spine_item(&item, &fetcher, &settings).await;
    assert!(matches!(result, Err(OverlayError::Structure(_))));

    let fetcher = ScriptedFetcher::new().respond(
        &mo_url(1),
        0,
        r#"{"media-overlay": [{"children": [{"children": [{"audio": "a.mp3#t=0,1", "text": "c1.xhtml"}]}]}]}"#,
    );
    let result = overlay::resolve_spine_item(&item, &fetcher, &settings).await;
    assert!(matches!(
        result,
        Err(OverlayError::Fragment {
            source: FragmentError::MissingFragment(_),
            ..
        })
    ));
}

#[tokio::test]
async fn test_resolve_placeholder_skips_fetcher() {
    let item = SpineItem::new("cover", "Text/cover.xhtml");
    let fetcher = ScriptedFetcher::new();

    let model = overlay::resolve_spine_item(&item, &fetcher, &OverlaySettings::default())
        .await
        .unwrap();

    assert_eq!(overlay::placeholder_smil_model(&item), model);
    assert!(fetcher.requested().is_empty());
}
