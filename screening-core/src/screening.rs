use crate::config::ScreeningConfig;
use crate::error::{Result, ScreeningError};
use crate::matcher::best_match_key;
use crate::normalize::normalize;
use crate::types::{MatchResult, ScreeningOutcome, ScreeningQuery, ScreeningSubject, TargetFilter};
use std::panic;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Cooperative cancellation flag checked before each subject is scored.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}

/// Screen `query` against `subjects` with a single sequential pass.
///
/// Returns hits at or above the threshold, ranked by descending score with
/// ties kept in input order.
pub fn screen<'a>(
    query: &ScreeningQuery,
    subjects: &'a [ScreeningSubject],
) -> Result<ScreeningOutcome<'a>> {
    let query_key = validate(query)?;
    let shard = scan_shard(query, &query_key, subjects, None);
    merge(vec![shard], subjects.len())
}

/// ScreeningEngine runs screenings with a configured worker count and
/// default threshold.
pub struct ScreeningEngine {
    config: ScreeningConfig,
}

impl ScreeningEngine {
    pub fn new(config: ScreeningConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScreeningConfig {
        &self.config
    }

    /// Build a query using the configured default threshold.
    pub fn query<I, S>(&self, query_text: &str, target_filter: TargetFilter, countries: I) -> ScreeningQuery
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        ScreeningQuery::new(query_text, target_filter, countries, self.config.default_threshold)
    }

    /// Screen subjects, sharding across workers for large inputs.
    pub fn screen<'a>(
        &self,
        query: &ScreeningQuery,
        subjects: &'a [ScreeningSubject],
    ) -> Result<ScreeningOutcome<'a>> {
        self.run(query, subjects, None)
    }

    /// Like [`ScreeningEngine::screen`], but stops with
    /// [`ScreeningError::ScanAborted`] once `token` is cancelled.
    pub fn screen_cancellable<'a>(
        &self,
        query: &ScreeningQuery,
        subjects: &'a [ScreeningSubject],
        token: &CancellationToken,
    ) -> Result<ScreeningOutcome<'a>> {
        self.run(query, subjects, Some(token))
    }

    #[instrument(skip_all, fields(threshold = query.threshold, subjects = subjects.len()))]
    fn run<'a>(
        &self,
        query: &ScreeningQuery,
        subjects: &'a [ScreeningSubject],
        cancel: Option<&CancellationToken>,
    ) -> Result<ScreeningOutcome<'a>> {
        let query_key = validate(query)?;

        let workers = self.config.workers.max(1);
        let shards = if workers > 1 && subjects.len() >= self.config.parallel_min_subjects {
            scan_parallel(query, &query_key, subjects, workers, cancel)
        } else {
            vec![scan_shard(query, &query_key, subjects, cancel)]
        };

        let outcome = merge(shards, subjects.len())?;
        info!(
            "Screening complete: {} scanned, {} hits, {} skipped",
            outcome.scanned,
            outcome.matches.len(),
            outcome.skipped
        );
        Ok(outcome)
    }
}

impl Default for ScreeningEngine {
    fn default() -> Self {
        Self::new(ScreeningConfig::default())
    }
}

/// Hits and counters from one contiguous slice of subjects.
#[derive(Debug, Default)]
struct ShardScan<'a> {
    hits: Vec<MatchResult<'a>>,
    visited: usize,
    scanned: usize,
    skipped: usize,
    aborted: bool,
}

/// Check the query and return its normalized key.
fn validate(query: &ScreeningQuery) -> Result<String> {
    if query.query_text.trim().is_empty() {
        return Err(ScreeningError::InvalidQuery("query text is empty".to_string()));
    }

    let query_key = normalize(&query.query_text);
    if query_key.is_empty() {
        return Err(ScreeningError::InvalidQuery(format!(
            "query '{}' has no letters or digits",
            query.query_text
        )));
    }

    if query.threshold > 100 {
        return Err(ScreeningError::InvalidThreshold(query.threshold));
    }

    if query.country_filter.is_empty() {
        return Err(ScreeningError::NoListsSelected);
    }

    Ok(query_key)
}

fn scan_shard<'a>(
    query: &ScreeningQuery,
    query_key: &str,
    shard: &'a [ScreeningSubject],
    cancel: Option<&CancellationToken>,
) -> ShardScan<'a> {
    let mut scan = ShardScan::default();

    for subject in shard {
        if cancel.map_or(false, CancellationToken::is_cancelled) {
            scan.aborted = true;
            break;
        }
        scan.visited += 1;

        if !query.selects(subject) {
            continue;
        }

        if subject.primary_name().trim().is_empty() {
            warn!("Skipping subject {} with empty primary name", subject.id());
            scan.skipped += 1;
            continue;
        }

        scan.scanned += 1;
        let best = best_match_key(query_key, subject.primary_name(), subject.aliases());
        if best.score >= query.threshold {
            debug!(
                "Screening hit: {} matches {} ({}%, {:?})",
                query.query_text,
                subject.id(),
                best.score,
                best.matched_on
            );
            scan.hits.push(MatchResult {
                subject,
                score: best.score,
                matched_on: best.matched_on,
            });
        }
    }

    scan
}

/// Fan out contiguous shards over scoped threads. Shards come back in input
/// order so the final stable sort sees hits in original list order.
fn scan_parallel<'a>(
    query: &ScreeningQuery,
    query_key: &str,
    subjects: &'a [ScreeningSubject],
    workers: usize,
    cancel: Option<&CancellationToken>,
) -> Vec<ShardScan<'a>> {
    if subjects.is_empty() {
        return vec![ShardScan::default()];
    }

    let shard_len = (subjects.len() + workers - 1) / workers;
    debug!("Sharding {} subjects into chunks of {}", subjects.len(), shard_len);

    let joined = crossbeam::thread::scope(|scope| {
        let handles: Vec<_> = subjects
            .chunks(shard_len)
            .map(|shard| scope.spawn(move |_| scan_shard(query, query_key, shard, cancel)))
            .collect();

        handles
            .into_iter()
            .map(|handle| handle.join().unwrap_or_else(|payload| panic::resume_unwind(payload)))
            .collect::<Vec<_>>()
    });

    joined.unwrap_or_else(|payload| panic::resume_unwind(payload))
}

fn merge<'a>(shards: Vec<ShardScan<'a>>, total: usize) -> Result<ScreeningOutcome<'a>> {
    let mut outcome = ScreeningOutcome::default();
    let mut visited = 0;
    let mut aborted = false;

    for shard in shards {
        visited += shard.visited;
        aborted |= shard.aborted;
        outcome.scanned += shard.scanned;
        outcome.skipped += shard.skipped;
        outcome.matches.extend(shard.hits);
    }

    if aborted {
        warn!("Screening aborted after {} of {} subjects", visited, total);
        return Err(ScreeningError::ScanAborted {
            scanned: visited,
            total,
        });
    }

    // Stable: equal scores keep input order.
    outcome.matches.sort_by(|a, b| b.score.cmp(&a.score));
    Ok(outcome)
}
