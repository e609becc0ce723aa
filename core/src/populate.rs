//! Populate a descriptor registry from image data.
//!
//! Order: backgrounds, palette 0, then every category in file order, each
//! planned, verified and submitted before the next one starts.

use serde::Serialize;
use tracing::info;

use crate::config::{PagerConfig, SubmitConfig};
use crate::input::ImageData;
use crate::pager::plan_collection;
use crate::recovery::SubmissionJournal;
use crate::registry::DescriptorRegistry;
use crate::submit::{submit_plan, SubmissionReport};
use crate::telemetry::PlanSnapshot;
use crate::types::PagerError;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryReport {
    pub plan: PlanSnapshot,
    pub submission: SubmissionReport,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PopulateReport {
    pub backgrounds: usize,
    pub palette_bytes: usize,
    pub categories: Vec<CategoryReport>,
}

pub fn populate<G: DescriptorRegistry + ?Sized>(
    registry: &mut G,
    data: &ImageData,
    pager: &PagerConfig,
    submit: &SubmitConfig,
    mut journal: Option<&mut SubmissionJournal>,
) -> Result<PopulateReport, PagerError> {
    pager.validate()?;
    submit.validate()?;

    // Decode everything up front so bad input fails before any call.
    let collections = data.collections()?;
    let palette = data.palette_bytes()?;

    registry.add_backgrounds(&data.bgcolors)?;
    registry.set_palette(0, &palette)?;

    // A pinned base index names one collection's position; every
    // category here starts from its own registry count.
    let per_category = SubmitConfig { base_index: None, ..submit.clone() };

    let mut categories = Vec::with_capacity(collections.len());
    for collection in &collections {
        let plan = plan_collection(collection, pager)?;
        let submission = submit_plan(registry, &plan, &per_category, journal.as_deref_mut())?;
        categories.push(CategoryReport { plan: plan.snapshot(), submission });
    }

    info!(
        backgrounds = data.bgcolors.len(),
        palette_bytes = palette.len(),
        categories = categories.len(),
        "descriptor populated"
    );
    Ok(PopulateReport {
        backgrounds: data.bgcolors.len(),
        palette_bytes: palette.len(),
        categories,
    })
}
