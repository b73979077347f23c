use std::time::Duration;

use anyhow::Error;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::models::Category;
use crate::playback::PlaybackState;

/// Format a duration as `m:ss`, right-aligning minutes to two columns.
pub(crate) fn format_time(time: Duration) -> String {
    let total = time.as_secs();
    format!("{:2}:{:02}", total / 60, total % 60)
}

/// Progress through the track in `0.0..=1.0`; zero while the duration is
/// unknown.
pub(crate) fn progress_ratio(elapsed: Duration, duration: Duration) -> f64 {
    if duration.is_zero() {
        return 0.0;
    }
    (elapsed.as_secs_f64() / duration.as_secs_f64()).clamp(0.0, 1.0)
}

/// Short label plus color for the transport state line.
pub(crate) fn playback_label(state: &PlaybackState) -> (String, Style) {
    match state {
        PlaybackState::Stopped => ("Stopped".to_string(), Style::default().fg(Color::Gray)),
        PlaybackState::Setup(_) => ("Ready".to_string(), Style::default().fg(Color::Cyan)),
        PlaybackState::Playing(_) => (
            "Playing".to_string(),
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ),
        PlaybackState::Paused(_) => ("Paused".to_string(), Style::default().fg(Color::Yellow)),
        PlaybackState::Failed(err) => (err.to_string(), Style::default().fg(Color::Red)),
    }
}

/// Render category names as bracketed tags on one line.
pub(crate) fn category_tags(categories: &[Category]) -> Line<'static> {
    if categories.is_empty() {
        return Line::from(Span::styled(
            "No categories",
            Style::default().fg(Color::DarkGray),
        ));
    }

    let mut spans = Vec::with_capacity(categories.len() * 2);
    for (idx, category) in categories.iter().enumerate() {
        if idx > 0 {
            spans.push(Span::raw(" "));
        }
        spans.push(Span::styled(
            format!("[{}]", category.name),
            Style::default().fg(Color::Magenta),
        ));
    }
    Line::from(spans)
}

/// Produce a rectangle centered within `area` that spans the requested percent
/// of the width and height. Used for modal dialogs.
pub(crate) fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(area);

    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(horizontal[1]);

    vertical[1]
}

/// Extract the most relevant error message from a chained error.
pub(crate) fn surface_error(err: &Error) -> String {
    err.chain()
        .last()
        .map(|cause| cause.to_string())
        .unwrap_or_else(|| err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_minutes_and_padded_seconds() {
        assert_eq!(format_time(Duration::ZERO), " 0:00");
        assert_eq!(format_time(Duration::from_millis(65_900)), " 1:05");
        assert_eq!(format_time(Duration::from_secs(754)), "12:34");
    }

    #[test]
    fn progress_is_clamped_and_zero_without_duration() {
        assert_eq!(progress_ratio(Duration::from_secs(5), Duration::ZERO), 0.0);
        assert_eq!(
            progress_ratio(Duration::from_secs(90), Duration::from_secs(60)),
            1.0
        );
        assert_eq!(
            progress_ratio(Duration::from_secs(15), Duration::from_secs(60)),
            0.25
        );
    }

    #[test]
    fn surfaces_the_innermost_cause() {
        let err = anyhow::anyhow!("Song not found").context("failed to load song");
        assert_eq!(surface_error(&err), "Song not found");
    }
}
