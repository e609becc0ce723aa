use std::thread;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::SubmitConfig;
use crate::pager::{PlannedPage, SubmissionPlan};
use crate::recovery::{JournalEntry, SubmissionJournal};
use crate::registry::{DescriptorRegistry, SubmissionError};
use crate::submit::lock::SubmissionGuard;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionReport {
    pub category: String,
    /// Registry index of the plan's first record.
    pub base_index: u64,
    pub pages_submitted: usize,
    /// Pages found already applied (resume) and not resent.
    pub pages_skipped: usize,
    /// Failed calls that were resolved and retried.
    pub retries: u32,
    pub final_count: u64,
}

/// Where the registry stands relative to one page.
enum PageState {
    Pending,
    Landed,
}

fn classify(category: &str, count: u64, start: u64, end: u64) -> Result<PageState, SubmissionError> {
    if count == start && end > start {
        Ok(PageState::Pending)
    } else if count >= end {
        // Empty pages land here too: nothing to append.
        Ok(PageState::Landed)
    } else {
        Err(SubmissionError::IndexDivergence { category: category.to_string(), expected: start, found: count })
    }
}

/// Read-only, so retrying is always safe. Backs off between attempts.
fn query_count<G: DescriptorRegistry + ?Sized>(
    registry: &G,
    category: &str,
    config: &SubmitConfig,
) -> Result<u64, SubmissionError> {
    let mut attempt = 1;
    loop {
        match registry.current_index_count(category) {
            Ok(count) => return Ok(count),
            Err(e) if e.is_retryable() && attempt < config.max_attempts => {
                let delay = config.backoff(attempt);
                warn!(category, attempt, delay_ms = delay.as_millis() as u64, error = %e, "index count query failed, retrying");
                thread::sleep(delay);
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}

fn journal_page(
    journal: &mut Option<&mut SubmissionJournal>,
    category: &str,
    page_no: usize,
    planned: &PlannedPage,
    range: (u64, u64),
) -> Result<(), SubmissionError> {
    if let Some(j) = journal.as_deref_mut() {
        j.record(JournalEntry {
            category: category.to_string(),
            page_no,
            start: range.0,
            end: range.1,
            crc32: planned.page.checksum(),
        })?;
    }
    Ok(())
}

/// Submit `plan` to `registry`, one page at a time, in plan order.
///
/// Every acknowledgement must match the page's expected index range.
/// After a failed call the registry's index count is read back before
/// anything is resent: a page that already landed is counted as
/// acknowledged, a page that did not is resent, any other count is a
/// divergence and aborts. Attempts run out only while the page is still
/// pending. Pages already present when submission starts are skipped, so
/// rerunning a partially-applied plan resumes it; a registry already past
/// the plan's end is a divergence.
pub fn submit_plan<G: DescriptorRegistry + ?Sized>(
    registry: &mut G,
    plan: &SubmissionPlan,
    config: &SubmitConfig,
    mut journal: Option<&mut SubmissionJournal>,
) -> Result<SubmissionReport, SubmissionError> {
    config.validate()?;
    let category = plan.category.as_str();
    if journal.is_some() {
        SubmissionJournal::check_category(category)?;
    }
    let _guard = SubmissionGuard::acquire(&registry.target_id(), category)?;

    let mut count = query_count(registry, category, config)?;
    let base = config.base_index.unwrap_or(count);

    // More records than the plan accounts for: pages would all look
    // applied while the collection holds something else.
    let planned_end = base + plan.total_items() as u64;
    if count > planned_end {
        return Err(SubmissionError::IndexDivergence {
            category: category.to_string(),
            expected: planned_end,
            found: count,
        });
    }

    let mut report = SubmissionReport {
        category: category.to_string(),
        base_index: base,
        pages_submitted: 0,
        pages_skipped: 0,
        retries: 0,
        final_count: count,
    };

    for (page_no, planned) in plan.pages.iter().enumerate() {
        let (start, end) = planned.index_range(base);

        if let PageState::Landed = classify(category, count, start, end)? {
            debug!(category, page_no, start, end, "page already applied, skipping");
            report.pages_skipped += 1;
            continue;
        }

        let mut attempts = 0u32;
        loop {
            attempts += 1;
            let err = match registry.append_page(category, &planned.page) {
                Ok(ack) if ack == (start, end) => {
                    debug!(category, page_no, start, end, "page acknowledged");
                    count = end;
                    report.pages_submitted += 1;
                    journal_page(&mut journal, category, page_no, planned, (start, end))?;
                    break;
                }
                Ok(ack) => {
                    return Err(SubmissionError::UnexpectedAck {
                        category: category.to_string(),
                        expected: (start, end),
                        got: ack,
                    });
                }
                Err(e) if !e.is_retryable() => return Err(e),
                Err(e) => e,
            };

            warn!(category, page_no, attempts, error = %err, "append failed, re-reading index count");
            count = query_count(registry, category, config)?;
            match classify(category, count, start, end)? {
                PageState::Landed if count == end => {
                    info!(category, page_no, start, end, "page landed despite failed call");
                    report.pages_submitted += 1;
                    journal_page(&mut journal, category, page_no, planned, (start, end))?;
                    break;
                }
                PageState::Landed => {
                    // Past this page's end: someone else appended too.
                    return Err(SubmissionError::IndexDivergence {
                        category: category.to_string(),
                        expected: end,
                        found: count,
                    });
                }
                PageState::Pending if attempts >= config.max_attempts => {
                    return Err(SubmissionError::AttemptsExhausted {
                        category: category.to_string(),
                        page: page_no,
                        attempts,
                        last: Box::new(err),
                    });
                }
                PageState::Pending => report.retries += 1,
            }
        }
    }

    report.final_count = count;
    info!(
        category,
        submitted = report.pages_submitted,
        skipped = report.pages_skipped,
        retries = report.retries,
        final_count = report.final_count,
        "plan submitted"
    );
    Ok(report)
}
