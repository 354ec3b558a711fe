//! Pure presentation helpers, kept free of terminal handles so they can be
//! unit tested.

use crate::types::{Channel, TimeSeriesPoint};

/// Bar chart input for the weekly series: one (label, minutes) pair per
/// point, restricted to the active channel.
pub fn bar_data(series: &[TimeSeriesPoint], channel: Channel) -> Vec<(String, u64)> {
    series
        .iter()
        .map(|point| {
            (
                point.date.clone(),
                channel.value(point).max(0.0).round() as u64,
            )
        })
        .collect()
}

/// Render a 0..=1 score as a fixed-width block bar, e.g. "███░░".
pub fn score_bar(score: f64, width: usize) -> String {
    let clamped = score.clamp(0.0, 1.0);
    let filled = (clamped * width as f64).round() as usize;
    let mut bar = String::with_capacity(width * 3);
    for _ in 0..filled {
        bar.push('█');
    }
    for _ in filled..width {
        bar.push('░');
    }
    bar
}

pub fn trend_arrow(pct: f64) -> &'static str {
    if pct > 0.0 {
        "▲"
    } else if pct < 0.0 {
        "▼"
    } else {
        "–"
    }
}

/// Shorten a snake_case task id for table display.
pub fn task_title(task: &str, max_len: usize) -> String {
    let mut title = String::new();
    for (i, word) in task.split('_').enumerate() {
        if i > 0 {
            title.push(' ');
        }
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            title.extend(first.to_uppercase());
            title.push_str(chars.as_str());
        }
    }
    if title.chars().count() > max_len {
        let truncated: String = title.chars().take(max_len.saturating_sub(1)).collect();
        format!("{truncated}…")
    } else {
        title
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(time_saved: f64, chatgpt: f64) -> TimeSeriesPoint {
        TimeSeriesPoint {
            week: "Week 1".to_string(),
            date: "Jan 1".to_string(),
            time_saved,
            prior_time_saved: 0.0,
            cumulative: time_saved,
            tasks: 1,
            chatgpt_time: chatgpt,
            copilot_time: 0.0,
            agent_time: 0.0,
        }
    }

    #[test]
    fn bar_data_uses_channel_values() {
        let series = vec![point(100.0, 60.0), point(50.5, 10.0)];

        let all = bar_data(&series, Channel::All);
        assert_eq!(all[0], ("Jan 1".to_string(), 100));
        assert_eq!(all[1].1, 51);

        let chatgpt = bar_data(&series, Channel::ChatGpt);
        assert_eq!(chatgpt[0].1, 60);
        assert_eq!(chatgpt[1].1, 10);
    }

    #[test]
    fn score_bar_clamps_and_fills() {
        assert_eq!(score_bar(0.0, 5), "░░░░░");
        assert_eq!(score_bar(1.0, 5), "█████");
        assert_eq!(score_bar(0.6, 5), "███░░");
        assert_eq!(score_bar(2.0, 4), "████");
        assert_eq!(score_bar(-1.0, 4), "░░░░");
    }

    #[test]
    fn trend_arrow_direction() {
        assert_eq!(trend_arrow(12.5), "▲");
        assert_eq!(trend_arrow(-3.0), "▼");
        assert_eq!(trend_arrow(0.0), "–");
    }

    #[test]
    fn task_title_formats_and_truncates() {
        assert_eq!(task_title("fix_bug_production", 40), "Fix Bug Production");
        assert_eq!(task_title("draft_customer_email", 10), "Draft Cus…");
    }
}
