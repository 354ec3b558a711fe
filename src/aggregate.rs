use std::collections::HashMap;

use crate::types::{
    DeptActivity, ModeDistribution, OutcomeCount, SessionRecord, SummaryBundle, TimeSeriesPoint,
    TopTask,
};
use crate::utils::week_date_label;

/// Quality score assumed for a bucket when no session in it carries a
/// `quality_delta`. A delta of exactly 0.0 is a real measurement and is
/// averaged normally.
const DEFAULT_QUALITY: f64 = 0.7;

/// Number of buckets in the positional time series.
const SERIES_LEN: usize = 12;

/// Maximum number of entries in the top-task table.
const TOP_TASK_LIMIT: usize = 8;

#[derive(Default)]
struct QualityAcc {
    sum: f64,
    count: u64,
}

impl QualityAcc {
    fn push(&mut self, delta: Option<f64>) {
        if let Some(delta) = delta {
            self.sum += delta;
            self.count += 1;
        }
    }

    fn mean_or_default(&self) -> f64 {
        if self.count > 0 {
            self.sum / self.count as f64
        } else {
            DEFAULT_QUALITY
        }
    }
}

/// Accumulator keyed by string category that preserves first-encounter
/// order, matching the insertion-ordered tables the dashboard expects.
struct OrderedBuckets<T> {
    index: HashMap<String, usize>,
    entries: Vec<(String, T)>,
}

impl<T: Default> OrderedBuckets<T> {
    fn new() -> Self {
        Self {
            index: HashMap::new(),
            entries: Vec::new(),
        }
    }

    fn get_mut(&mut self, key: &str) -> &mut T {
        let i = match self.index.get(key) {
            Some(&i) => i,
            None => {
                let i = self.entries.len();
                self.index.insert(key.to_string(), i);
                self.entries.push((key.to_string(), T::default()));
                i
            }
        };
        &mut self.entries[i].1
    }
}

/// Transform a raw session sequence into the summary bundle the dashboard
/// renders. Pure and infallible: malformed fields were already defaulted at
/// the record boundary, so the only degenerate case is an empty input,
/// which yields `None`.
pub fn aggregate(sessions: &[SessionRecord]) -> Option<SummaryBundle> {
    if sessions.is_empty() {
        return None;
    }

    Some(SummaryBundle {
        time_series: build_time_series(sessions),
        prior_series: Vec::new(),
        dept_activity: build_dept_activity(sessions),
        mode_dist: build_mode_dist(sessions),
        top_tasks: build_top_tasks(sessions),
        outcome_data: build_outcome_data(sessions),
    })
}

#[derive(Default)]
struct DeptAcc {
    tasks: u64,
    time_saved: f64,
    quality: QualityAcc,
}

fn build_dept_activity(sessions: &[SessionRecord]) -> Vec<DeptActivity> {
    let mut buckets: OrderedBuckets<DeptAcc> = OrderedBuckets::new();

    for session in sessions {
        let acc = buckets.get_mut(session.domain());
        acc.tasks += 1;
        acc.time_saved += session.time_saved_minutes();
        acc.quality.push(session.quality_delta);
    }

    buckets
        .entries
        .into_iter()
        .map(|(dept, acc)| DeptActivity {
            dept,
            tasks: acc.tasks,
            time_saved: acc.time_saved,
            // Estimated active users; no user identifier exists in the
            // record, so this heuristic stands in for a distinct count.
            users: acc.tasks / 3 + 1,
            avg_quality: acc.quality.mean_or_default(),
        })
        .collect()
}

#[derive(Default)]
struct ModeAcc {
    count: u64,
    time_saved: f64,
}

fn build_mode_dist(sessions: &[SessionRecord]) -> Vec<ModeDistribution> {
    let mut buckets: OrderedBuckets<ModeAcc> = OrderedBuckets::new();

    for session in sessions {
        let acc = buckets.get_mut(session.assist_mode());
        acc.count += 1;
        acc.time_saved += session.time_saved_minutes();
    }

    buckets
        .entries
        .into_iter()
        .map(|(mode, acc)| ModeDistribution {
            mode,
            count: acc.count,
            time_saved: acc.time_saved,
        })
        .collect()
}

#[derive(Default)]
struct TaskAcc {
    count: u64,
    time_saved: f64,
    dept: String,
    quality: QualityAcc,
}

fn build_top_tasks(sessions: &[SessionRecord]) -> Vec<TopTask> {
    let mut buckets: OrderedBuckets<TaskAcc> = OrderedBuckets::new();

    for session in sessions {
        let Some(task) = session.usable_task() else {
            continue;
        };
        let acc = buckets.get_mut(task);
        acc.count += 1;
        acc.time_saved += session.time_saved_minutes();
        acc.dept = session.domain().to_string();
        acc.quality.push(session.quality_delta);
    }

    let mut tasks: Vec<TopTask> = buckets
        .entries
        .into_iter()
        .map(|(task, acc)| TopTask {
            task,
            dept: acc.dept,
            count: acc.count,
            avg_time: (acc.time_saved / acc.count as f64).round() as u64,
            quality: acc.quality.mean_or_default(),
        })
        .collect();

    // Stable sort keeps first-occurrence order for ties on count.
    tasks.sort_by(|a, b| b.count.cmp(&a.count));
    tasks.truncate(TOP_TASK_LIMIT);
    tasks
}

fn build_outcome_data(sessions: &[SessionRecord]) -> Vec<OutcomeCount> {
    let mut buckets: OrderedBuckets<u64> = OrderedBuckets::new();

    for session in sessions {
        *buckets.get_mut(session.outcome()) += 1;
    }

    buckets
        .entries
        .into_iter()
        .map(|(outcome, count)| OutcomeCount { outcome, count })
        .collect()
}

fn build_time_series(sessions: &[SessionRecord]) -> Vec<TimeSeriesPoint> {
    // Positional bucketing: the records carry no timestamp, so the input
    // sequence is divided into 12 contiguous index ranges. The last bucket
    // may be shorter (or empty for very small inputs).
    let chunk = sessions.len().div_ceil(SERIES_LEN);
    let mut time_saved = [0.0_f64; SERIES_LEN];
    let mut tasks = [0_u64; SERIES_LEN];

    for (idx, session) in sessions.iter().enumerate() {
        let bucket = (idx / chunk).min(SERIES_LEN - 1);
        time_saved[bucket] += session.time_saved_minutes();
        tasks[bucket] += 1;
    }

    let mut cumulative = 0.0;
    (0..SERIES_LEN)
        .map(|i| {
            cumulative += time_saved[i];
            TimeSeriesPoint {
                week: format!("Week {}", i + 1),
                date: week_date_label((SERIES_LEN - 1 - i) as i64),
                time_saved: time_saved[i],
                prior_time_saved: 0.0,
                cumulative,
                tasks: tasks[i],
                chatgpt_time: 0.0,
                copilot_time: 0.0,
                agent_time: 0.0,
            }
        })
        .collect()
}
