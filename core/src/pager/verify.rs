use crate::page::decode_page;
use crate::pager::types::{PlanError, SubmissionPlan};

/// Decode every page the way the registry would and check the plan
/// against the collection it came from.
///
/// Checks, per page: within budget, range contiguous with the previous
/// page, `item_count` equal to the range length, decoded records equal to
/// the collection slice. Then: ranges cover the whole collection.
pub fn verify_plan<R: AsRef<[u8]>>(records: &[R], plan: &SubmissionPlan) -> Result<(), PlanError> {
    let inconsistent = |page: usize, reason: String| PlanError::Inconsistent { page, reason };

    if plan.pages.is_empty() {
        return Err(inconsistent(0, "plan has no pages".into()));
    }

    let mut cursor = 0usize;
    for (no, planned) in plan.pages.iter().enumerate() {
        let page = &planned.page;

        if page.payload_len() > plan.budget {
            return Err(inconsistent(no, format!("{} bytes over budget {}", page.payload_len(), plan.budget)));
        }
        if planned.start != cursor {
            return Err(inconsistent(no, format!("starts at {}, expected {}", planned.start, cursor)));
        }
        if planned.end < planned.start || planned.end > records.len() {
            return Err(inconsistent(no, format!("range {:?} outside collection of {}", planned.range(), records.len())));
        }
        if page.item_count != planned.end - planned.start {
            return Err(inconsistent(no, format!("item_count {} != range length {}", page.item_count, planned.end - planned.start)));
        }

        let decoded = decode_page(page, plan.options.layout)?;
        let expected = &records[planned.range()];
        if let Some(offset) = decoded
            .iter()
            .zip(expected.iter())
            .position(|(got, want)| got.as_slice() != want.as_ref())
        {
            return Err(inconsistent(no, format!("record {} differs after decode", planned.start + offset)));
        }

        cursor = planned.end;
    }

    if cursor != records.len() {
        return Err(inconsistent(plan.pages.len() - 1, format!("plan covers {} of {} records", cursor, records.len())));
    }
    Ok(())
}
