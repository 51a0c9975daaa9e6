use crate::errors::OverlayResult;
use crate::fetch::Fetcher;
use crate::overlay::OverlaySettings;
use crate::overlay::resolve;
use crate::publication::SpineItem;
use crate::smil::SmilModel;
use futures::StreamExt;
use futures::future::join_all;
use futures::stream;
use tracing::{info, warn};

/// Outcome of converting every spine item of a publication.
#[derive(Clone, Debug, PartialEq)]
pub enum Aggregate {
    /// Every spine item converted; trees are index-aligned with the spine.
    Complete(Vec<SmilModel>),
    /// At least one spine item failed; all trees are discarded.
    Failed {
        /// The number of spine items that failed.
        failures: usize,
    },
}

impl Aggregate {
    /// Returns `true` if at least one spine item failed.
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }

    /// The converted trees, or an empty list if any spine item failed.
    pub fn into_models(self) -> Vec<SmilModel> {
        match self {
            Self::Complete(models) => models,
            Self::Failed { .. } => Vec::new(),
        }
    }
}

/// Resolves every spine item concurrently and applies the all-or-nothing
/// policy.
///
/// All resolutions run to completion, even after one fails. Results are
/// ordered by spine position regardless of completion order. At most
/// [`OverlaySettings::max_concurrent_fetches`] items are in flight when set.
pub async fn aggregate<F: Fetcher + ?Sized>(
    spine: &[SpineItem],
    fetcher: &F,
    settings: &OverlaySettings,
) -> Aggregate {
    let tasks = spine.iter().map(|spine_item| async move {
        let result = resolve::resolve_spine_item(spine_item, fetcher, settings).await;

        if let Err(error) = &result {
            warn!(idref = %spine_item.idref, %error, "Media overlay conversion failed");
        }
        result
    });

    let results: Vec<OverlayResult<SmilModel>> = match settings.max_concurrent_fetches {
        Some(limit) => stream::iter(tasks).buffered(limit.max(1)).collect().await,
        None => join_all(tasks).await,
    };

    let mut models = Vec::with_capacity(results.len());
    let mut failures = 0;

    for result in results {
        match result {
            Ok(model) => models.push(model),
            Err(_) => failures += 1,
        }
    }

    info!(items = spine.len(), failures, "Media overlay aggregation finished");

    if failures == 0 {
        Aggregate::Complete(models)
    } else {
        Aggregate::Failed { failures }
    }
}
