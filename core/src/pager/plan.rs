use std::time::Instant;

use tracing::{debug, info};

use crate::collection::Collection;
use crate::config::PagerConfig;
use crate::page::{build_page, Page};
use crate::pager::types::{PlanError, PlannedPage, SubmissionPlan};
use crate::pager::verify::verify_plan;
use crate::telemetry::PagerCounters;

/// Split `records` into budget-respecting pages.
///
/// Greedy forward accumulation: each record is tentatively added to the
/// open page, the page is rebuilt and its compressed size measured. When
/// it no longer fits, the open page is closed and the record starts the
/// next one. A record that does not fit on a page by itself is fatal.
///
/// Compression ratio depends on content, so every decision is made on a
/// real build, never on an estimate from uncompressed size.
pub fn plan<R: AsRef<[u8]>>(
    category: &str,
    records: &[R],
    config: &PagerConfig,
) -> Result<SubmissionPlan, PlanError> {
    config.validate()?;
    let budget = config.budget()?;
    let options = config.page_options();
    let started = Instant::now();

    let mut counters = PagerCounters::default();
    let mut pages: Vec<PlannedPage> = Vec::new();

    let mut close = |page: Page, start: usize, end: usize, counters: &mut PagerCounters| {
        debug!(
            category,
            page_no = pages.len(),
            start,
            end,
            compressed = page.payload_len(),
            budget,
            "page closed"
        );
        counters.add_page(page.item_count, page.original_length, page.payload_len());
        pages.push(PlannedPage { page, start, end });
    };

    if records.is_empty() {
        let page = build_page(records, &options)?;
        counters.add_trial(page.payload_len() <= budget);
        if page.payload_len() > budget {
            return Err(PlanError::BudgetBelowEmptyPage { page_bytes: page.payload_len(), budget });
        }
        close(page, 0, 0, &mut counters);
    }

    let mut start = 0usize;
    let mut open: Option<Page> = None;
    let mut i = 0usize;

    while i < records.len() {
        let candidate = build_page(&records[start..=i], &options)?;
        let fits = candidate.payload_len() <= budget;
        counters.add_trial(fits);

        if fits {
            open = Some(candidate);
            i += 1;
            continue;
        }

        match open.take() {
            // `start == i`: the record is alone on its page.
            None => {
                return Err(PlanError::RecordTooLarge {
                    index: i,
                    page_bytes: candidate.payload_len(),
                    budget,
                });
            }
            // Retry record `i` as the first of a fresh page.
            Some(page) => {
                close(page, start, i, &mut counters);
                start = i;
            }
        }
    }

    if let Some(page) = open {
        close(page, start, records.len(), &mut counters);
    }

    let plan = SubmissionPlan {
        category: category.to_string(),
        options,
        budget,
        pages,
        counters,
        elapsed: started.elapsed(),
    };

    if config.verify {
        verify_plan(records, &plan)?;
    }

    info!(
        category,
        pages = plan.len(),
        records = plan.total_items(),
        bytes_compressed = plan.counters.bytes_compressed,
        trial_builds = plan.counters.trial_builds,
        "plan built"
    );
    Ok(plan)
}

/// `plan` over a named collection.
pub fn plan_collection(collection: &Collection, config: &PagerConfig) -> Result<SubmissionPlan, PlanError> {
    plan(&collection.category, &collection.records, config)
}
