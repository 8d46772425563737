use super::*;
use crate::player::{NowPlaying, PlayerEvent};
use std::sync::mpsc;

fn now(index: usize, title: &str) -> NowPlaying {
    NowPlaying {
        index,
        title: title.into(),
        artist: "Silent Partner".into(),
        audio: format!("/m/{index}.mp3"),
        image: None,
    }
}

fn app() -> (App, mpsc::Sender<PlayerEvent>) {
    let (tx, rx) = mpsc::channel();
    (App::new(rx, true), tx)
}

#[test]
fn selection_wraps_both_ways() {
    let (mut app, _tx) = app();
    app.prev(3);
    assert_eq!(app.selected, 2);
    app.next(3);
    assert_eq!(app.selected, 0);
    app.next(0);
    assert_eq!(app.selected, 0);
}

#[test]
fn follows_track_changes_when_enabled() {
    let (mut app, tx) = app();
    tx.send(PlayerEvent::TrackChanged(Some(now(2, "Blue Skies"))))
        .unwrap();
    assert!(app.drain_events(3));
    assert_eq!(app.selected, 2);

    app.follow_playback = false;
    tx.send(PlayerEvent::TrackChanged(Some(now(0, "Jazz")))).unwrap();
    app.drain_events(3);
    assert_eq!(app.selected, 2);
}

#[test]
fn playing_posts_now_playing_notice() {
    let (mut app, tx) = app();
    tx.send(PlayerEvent::Playing(now(0, "Blue Skies"))).unwrap();
    app.drain_events(1);
    assert_eq!(
        app.notice,
        Some(Notice {
            title: "Now playing".into(),
            body: "Blue Skies - Silent Partner".into(),
        })
    );
    app.clear_notice();
    assert_eq!(app.notice, None);
}

#[test]
fn removed_track_is_reported_and_selection_clamped() {
    let (mut app, tx) = app();
    app.select_last(4);
    tx.send(PlayerEvent::PlaylistChanged { len: 2 }).unwrap();
    tx.send(PlayerEvent::TrackRemoved {
        title: "Crimson Fly".into(),
    })
    .unwrap();
    app.drain_events(2);

    assert_eq!(app.selected, 1);
    assert_eq!(app.notice.as_ref().unwrap().body, "Crimson Fly");
}

#[test]
fn cleared_playlist_resets_selection() {
    let (mut app, tx) = app();
    app.selected = 3;
    tx.send(PlayerEvent::TrackChanged(None)).unwrap();
    app.drain_events(0);
    assert_eq!(app.selected, 0);
}

#[test]
fn no_events_means_no_change() {
    let (mut app, _tx) = app();
    assert!(!app.drain_events(5));
}
