use serde::{Deserialize, Serialize};

/// One logged instance of AI-assistant usage, as found in an uploaded JSONL
/// line. Every field is optional; the source logs are loosely typed and
/// individual records routinely omit fields. Default substitution happens
/// through the accessor methods below so the defaulting policy lives in one
/// place.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SessionRecord {
    #[serde(default)]
    pub domain: Option<String>,
    #[serde(default)]
    pub time_saved_minutes: Option<f64>,
    #[serde(default)]
    pub quality_delta: Option<f64>,
    #[serde(default)]
    pub assist_mode: Option<String>,
    #[serde(default)]
    pub canonical_task: Option<String>,
    #[serde(default)]
    pub outcome: Option<String>,
}

impl SessionRecord {
    pub fn domain(&self) -> &str {
        self.domain.as_deref().unwrap_or("other")
    }

    pub fn time_saved_minutes(&self) -> f64 {
        self.time_saved_minutes.unwrap_or(0.0)
    }

    pub fn assist_mode(&self) -> &str {
        self.assist_mode.as_deref().unwrap_or("other")
    }

    pub fn outcome(&self) -> &str {
        self.outcome.as_deref().unwrap_or("unknown")
    }

    /// Task identifier usable for task-level aggregation. The literal
    /// strings "null" and "unknown" come from upstream normalization and
    /// mean "no task"; they are excluded along with absent values.
    pub fn usable_task(&self) -> Option<&str> {
        match self.canonical_task.as_deref() {
            None | Some("null") | Some("unknown") => None,
            Some(task) => Some(task),
        }
    }
}

/// Per-department activity summary.
///
/// `users` is an estimate (`tasks / 3 + 1`), not a distinct-user count; the
/// record shape carries no user identifier. Downstream display copy assumes
/// this exact formula, so don't change it without changing the copy.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DeptActivity {
    pub dept: String,
    pub tasks: u64,
    pub time_saved: f64,
    pub users: u64,
    pub avg_quality: f64,
}

/// Session counts and time savings per interaction mode.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ModeDistribution {
    pub mode: String,
    pub count: u64,
    pub time_saved: f64,
}

/// One of the highest-volume canonical tasks. `dept` is the last-seen
/// domain for the task across the input sequence.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TopTask {
    pub task: String,
    pub dept: String,
    pub count: u64,
    pub avg_time: u64,
    pub quality: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OutcomeCount {
    pub outcome: String,
    pub count: u64,
}

/// One bucket of the 12-point weekly series. Chronology is positional:
/// the record shape has no timestamp, so buckets are contiguous index
/// ranges over the input sequence and the week/date labels are synthetic.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TimeSeriesPoint {
    pub week: String,
    pub date: String,
    pub time_saved: f64,
    pub prior_time_saved: f64,
    pub cumulative: f64,
    pub tasks: u64,
    pub chatgpt_time: f64,
    pub copilot_time: f64,
    pub agent_time: f64,
}

/// The complete set of derived tables the dashboard renders. Produced once
/// per load (or once by the sample generator) and replaced wholesale by the
/// next successful load.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SummaryBundle {
    pub time_series: Vec<TimeSeriesPoint>,
    pub prior_series: Vec<TimeSeriesPoint>,
    pub dept_activity: Vec<DeptActivity>,
    pub mode_dist: Vec<ModeDistribution>,
    pub top_tasks: Vec<TopTask>,
    pub outcome_data: Vec<OutcomeCount>,
}

/// Contribution-channel filter for the time series. Uploaded data carries
/// no per-channel attribution, so its channel fields are zero and only
/// `All` shows anything; the sample generator populates all three.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    #[default]
    All,
    ChatGpt,
    Copilot,
    Agents,
}

// Prior-period totals are not broken down by channel; the fixed shares
// mirror the generator's prior-period split.
const PRIOR_CHATGPT_SHARE: f64 = 0.52;
const PRIOR_COPILOT_SHARE: f64 = 0.48;

impl Channel {
    pub fn value(&self, point: &TimeSeriesPoint) -> f64 {
        match self {
            Channel::All => point.time_saved,
            Channel::ChatGpt => point.chatgpt_time,
            Channel::Copilot => point.copilot_time,
            Channel::Agents => point.agent_time,
        }
    }

    pub fn prior_value(&self, point: &TimeSeriesPoint) -> f64 {
        match self {
            Channel::All => point.prior_time_saved,
            Channel::ChatGpt => point.prior_time_saved * PRIOR_CHATGPT_SHARE,
            Channel::Copilot => point.prior_time_saved * PRIOR_COPILOT_SHARE,
            Channel::Agents => 0.0,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Channel::All => "All Platforms",
            Channel::ChatGpt => "ChatGPT",
            Channel::Copilot => "Copilot",
            Channel::Agents => "Agents",
        }
    }

    pub fn next(self) -> Channel {
        match self {
            Channel::All => Channel::ChatGpt,
            Channel::ChatGpt => Channel::Copilot,
            Channel::Copilot => Channel::Agents,
            Channel::Agents => Channel::All,
        }
    }
}
