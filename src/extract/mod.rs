pub mod accessor;
pub mod filter;

use crate::archive::{self, Record};
use crate::error::Result;
use crate::report::Reporter;
use accessor::TextAccessor;
use filter::{classify, SkipReason, Verdict};

/// Classification of a single evaluated record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Accepted,
    Skipped(SkipReason),
}

/// Counters for one pass. `total` counts evaluated records only, so records
/// after an early stop at the cap appear nowhere; `records` is the archive length.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractionSummary {
    pub records: usize,
    pub total: usize,
    pub accepted: usize,
    pub malformed: usize,
    pub links: usize,
    pub retweets: usize,
    pub limit_reached: bool,
}

impl ExtractionSummary {
    fn tally(&mut self, outcome: Outcome) {
        self.total += 1;
        match outcome {
            Outcome::Accepted => self.accepted += 1,
            Outcome::Skipped(SkipReason::Malformed) => self.malformed += 1,
            Outcome::Skipped(SkipReason::Link) => self.links += 1,
            Outcome::Skipped(SkipReason::Retweet) => self.retweets += 1,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction {
    pub texts: Vec<String>,
    pub summary: ExtractionSummary,
}

/// Single forward pass over the records, keeping accepted texts in order.
/// Stops as soon as `max_count` texts are held.
pub fn extract<A, R>(
    records: &[Record],
    accessor: &A,
    max_count: Option<usize>,
    reporter: &mut R,
) -> Extraction
where
    A: TextAccessor + ?Sized,
    R: Reporter + ?Sized,
{
    let mut texts = Vec::new();
    let mut summary = ExtractionSummary {
        records: records.len(),
        ..ExtractionSummary::default()
    };
    let capped = |held: usize| max_count.is_some_and(|max| held >= max);

    reporter.begin(records.len());
    for (i, record) in records.iter().enumerate() {
        if capped(texts.len()) {
            break;
        }
        let outcome = match accessor.text(record).map(classify) {
            Some(Verdict::Accept(text)) => {
                texts.push(text.to_string());
                Outcome::Accepted
            }
            Some(Verdict::Skip(reason)) => Outcome::Skipped(reason),
            None => Outcome::Skipped(SkipReason::Malformed),
        };
        summary.tally(outcome);
        reporter.record(i + 1, outcome);
    }

    if let Some(max) = max_count {
        if texts.len() >= max {
            summary.limit_reached = true;
            reporter.limit_reached(max);
        }
    }
    reporter.finish(&summary);

    Extraction { texts, summary }
}

/// Strip the archive wrapper, parse, and extract in one step.
pub fn extract_blob<A, R>(
    blob: &str,
    accessor: &A,
    max_count: Option<usize>,
    reporter: &mut R,
) -> Result<Extraction>
where
    A: TextAccessor + ?Sized,
    R: Reporter + ?Sized,
{
    let records = archive::parse(blob)?;
    Ok(extract(&records, accessor, max_count, reporter))
}
