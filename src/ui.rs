//! UI rendering helpers for the terminal user interface.
//!
//! This module contains functions to render the TUI using `ratatui`.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Modifier, Style, Stylize},
    widgets::{Block, Borders, Gauge, List, ListItem, Padding, Paragraph, Wrap},
};
use std::{collections::BTreeMap, sync::LazyLock};

use crate::app::App;
use crate::config::{ControlsSettings, UiSettings};
use crate::library::{Track, display_line};
use crate::player::{PlayerState, format_time};

static CONTROLS_MAP: LazyLock<BTreeMap<String, String>> = LazyLock::new(|| {
    let mut map: BTreeMap<String, String> = BTreeMap::new();
    map.insert("j/k".to_string(), "up/down".to_string());
    map.insert("gg/G".to_string(), "top/bottom".to_string());
    map.insert("enter".to_string(), "play selected song".to_string());
    map.insert("space/p".to_string(), "play/pause".to_string());
    map.insert("h/l".to_string(), "prev/next song".to_string());
    // H/L is filled dynamically from config.
    map.insert("+/-".to_string(), "volume".to_string());
    map.insert("m".to_string(), "mute".to_string());
    map.insert("s".to_string(), "shuffle".to_string());
    map.insert("r".to_string(), "repeat".to_string());
    map.insert("a".to_string(), "add songs".to_string());
    map.insert("A".to_string(), "add folder".to_string());
    map.insert("d".to_string(), "remove".to_string());
    map.insert("esc".to_string(), "dismiss notice".to_string());
    map.insert("q".to_string(), "quit".to_string());
    map
});

/// Render the controls help text, incorporating scrub seconds.
fn controls_text(scrub_seconds: u64) -> String {
    let order = [
        "j/k", "h/l", "H/L", "enter", "space/p", "gg/G", "+/-", "m", "s", "r", "a", "A", "d",
        "esc", "q",
    ];
    order
        .iter()
        .filter_map(|k| {
            if *k == "H/L" {
                Some(format!("[H/L] scrub -/+{}s", scrub_seconds))
            } else {
                CONTROLS_MAP.get(*k).map(|v| format!("[{}] {}", k, v))
            }
        })
        .collect::<Vec<String>>()
        .join(" | ")
}

/// `elapsed / total (-remaining)`, with `0:00` standing in for an unknown
/// length.
fn time_label(state: &PlayerState) -> String {
    let mut label = format!(
        "{} / {}",
        format_time(state.position),
        format_time(state.duration.unwrap_or(0.0))
    );
    if let Some(rem) = state.remaining() {
        label.push_str(&format!(" (-{})", format_time(rem)));
    }
    label
}

fn status_text(state: &PlayerState, app: &App) -> String {
    let mut parts: Vec<String> = Vec::new();

    parts.push(if app.follow_playback {
        " CURSOR: Follow".to_string()
    } else {
        " CURSOR: Free-roam".to_string()
    });

    let volume = (state.volume * 100.0).round() as u32;
    if state.muted {
        parts.push(format!("Volume: {volume}% (muted)"));
    } else {
        parts.push(format!("Volume: {volume}%"));
    }

    parts.push(format!(
        "Shuffle: {}",
        if state.shuffle { "ON" } else { "OFF" }
    ));
    parts.push(format!("Repeat: {}", if state.repeat { "ON" } else { "OFF" }));

    parts.join(" • ")
}

fn now_playing_text(current: Option<&Track>, state: &PlayerState, ui: &UiSettings) -> String {
    let Some(track) = current else {
        return "Nothing to play. Press [a] to add songs.".to_string();
    };

    let marker = if state.playing { "Playing" } else { "Paused" };
    let mut text = format!("{marker}: {}\nby {}", track.title, track.artist);
    if ui.show_artwork {
        if let Some(image) = &track.image {
            text.push_str(&format!("\nArtwork: {image}"));
        }
    }
    text
}

fn padded(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .title(title)
        .padding(Padding {
            left: 1,
            right: 0,
            top: 0,
            bottom: 0,
        })
}

/// Render the entire UI into the provided `frame`.
pub fn draw(
    frame: &mut Frame,
    playlist: &[Track],
    current: Option<&Track>,
    state: &PlayerState,
    app: &App,
    ui_settings: &UiSettings,
    controls_settings: &ControlsSettings,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(5),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(3),
            Constraint::Length(4),
        ])
        .split(frame.area());

    // Header
    let header = Paragraph::new(ui_settings.header_text.as_str())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" playdeck ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, chunks[0]);

    // Now playing
    let now = Paragraph::new(now_playing_text(current, state, ui_settings))
        .block(padded(" now playing "))
        .wrap(Wrap { trim: true });
    frame.render_widget(now, chunks[1]);

    // Progress
    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title(" progress "))
        .ratio(state.progress_fraction())
        .label(time_label(state));
    frame.render_widget(gauge, chunks[2]);

    // Status
    let status = Paragraph::new(status_text(state, app))
        .block(padded(" status "))
        .wrap(Wrap { trim: true });
    frame.render_widget(status, chunks[3]);

    // Playlist
    {
        // Center the selected item when possible by creating a visible window.
        let total = playlist.len();
        let list_height = chunks[4].height.saturating_sub(2) as usize;
        let sel_pos = app.selected.min(total.saturating_sub(1));
        let (start, end, selected_pos_in_visible) = if total <= list_height || list_height == 0 {
            (0, total, sel_pos)
        } else {
            let half = list_height / 2;
            let mut start = sel_pos.saturating_sub(half);
            if start + list_height > total {
                start = total - list_height;
            }
            (start, start + list_height, sel_pos - start)
        };

        let visible_items: Vec<ListItem> = (start..end)
            .map(|i| {
                let line = display_line(
                    &playlist[i],
                    &ui_settings.playlist_fields,
                    &ui_settings.playlist_separator,
                );
                if state.current == Some(i) {
                    ListItem::new(format!("♪ {line}")).bold()
                } else {
                    ListItem::new(format!("  {line}"))
                }
            })
            .collect();

        let list = List::new(visible_items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(format!(" playlist ({total}) ")),
            )
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol("> ");
        let mut list_state = ratatui::widgets::ListState::default();
        if total > 0 {
            list_state.select(Some(selected_pos_in_visible));
        }
        frame.render_stateful_widget(list, chunks[4], &mut list_state);
    }

    // Notification line
    let notice = app
        .notice
        .as_ref()
        .map(|n| format!("{}: {}", n.title, n.body))
        .unwrap_or_default();
    frame.render_widget(
        Paragraph::new(notice).block(padded(" notice ")),
        chunks[5],
    );

    let footer = Paragraph::new(controls_text(controls_settings.scrub_seconds))
        .block(padded(" controls "))
        .wrap(Wrap { trim: true });
    frame.render_widget(footer, chunks[6]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn time_label_uses_zero_for_unknown_length() {
        let state = PlayerState {
            position: 75.0,
            ..PlayerState::default()
        };
        assert_eq!(time_label(&state), "1:15 / 0:00");

        let state = PlayerState {
            position: 5.0,
            duration: Some(200.0),
            ..PlayerState::default()
        };
        assert_eq!(time_label(&state), "0:05 / 3:20 (-3:15)");
    }

    #[test]
    fn controls_text_reflects_scrub_seconds() {
        let text = controls_text(12);
        assert!(text.contains("[H/L] scrub -/+12s"));
        assert!(text.starts_with("[j/k] up/down"));
        assert!(text.ends_with("[q] quit"));
    }

    #[test]
    fn empty_playlist_prompts_to_add() {
        let text = now_playing_text(None, &PlayerState::default(), &UiSettings::default());
        assert!(text.contains("[a]"));
    }

    #[test]
    fn now_playing_shows_current_track_and_artwork() {
        let track = Track::named(
            "Jazz",
            "Unknown",
            "/u/music/jazz.mp3",
            Some("/u/images/j.png".into()),
        );
        let state = PlayerState {
            current: Some(0),
            playing: true,
            ..PlayerState::default()
        };

        let text = now_playing_text(Some(&track), &state, &UiSettings::default());
        assert!(text.starts_with("Playing: Jazz\nby Unknown"), "{text}");

        let ui = UiSettings {
            show_artwork: false,
            ..UiSettings::default()
        };
        let text = now_playing_text(Some(&track), &PlayerState::default(), &ui);
        assert_eq!(text, "Paused: Jazz\nby Unknown");
    }
}
