use super::*;
use std::sync::mpsc;

fn now_playing() -> NowPlaying {
    NowPlaying {
        index: 7,
        title: "Blue Skies".to_string(),
        artist: "Silent Partner".to_string(),
        audio: "/srv/music/blue-skies.mp3".to_string(),
        image: Some("https://example.com/cover.png".to_string()),
    }
}

fn iface(state: &Arc<Mutex<SharedState>>) -> PlayerIface {
    let (tx, _rx) = mpsc::channel::<ControlCmd>();
    PlayerIface {
        tx,
        state: state.clone(),
    }
}

#[test]
fn set_track_metadata_sets_and_clears_shared_state() {
    let state = Arc::new(Mutex::new(SharedState::default()));
    let handle = MprisHandle {
        state: state.clone(),
    };

    handle.set_track_metadata(Some(&now_playing()));
    {
        let s = state.lock().unwrap();
        assert_eq!(s.title.as_deref(), Some("Blue Skies"));
        assert_eq!(s.artist, vec!["Silent Partner".to_string()]);
        assert_eq!(s.url.as_deref(), Some("file:///srv/music/blue-skies.mp3"));
        assert_eq!(s.art_url.as_deref(), Some("https://example.com/cover.png"));
        assert_eq!(
            s.track_id.as_ref().map(|p| p.as_str()),
            Some("/org/mpris/MediaPlayer2/track/7")
        );
    }

    handle.set_track_metadata(None);
    let s = state.lock().unwrap();
    assert_eq!(s.title, None);
    assert!(s.artist.is_empty());
    assert_eq!(s.url, None);
    assert_eq!(s.art_url, None);
    assert!(s.track_id.is_none());
}

#[test]
fn playback_status_maps_controller_states() {
    let state = Arc::new(Mutex::new(SharedState::default()));
    let iface = iface(&state);
    let handle = MprisHandle {
        state: state.clone(),
    };

    assert_eq!(iface.playback_status(), "Stopped");
    assert!(!iface.can_play());

    handle.set_playback(PlaybackState::Playing);
    assert_eq!(iface.playback_status(), "Playing");
    assert!(iface.can_go_next());

    handle.set_playback(PlaybackState::Paused);
    assert_eq!(iface.playback_status(), "Paused");
}

#[test]
fn metadata_includes_expected_keys_when_present() {
    let state = Arc::new(Mutex::new(SharedState::default()));
    let iface = iface(&state);
    MprisHandle {
        state: state.clone(),
    }
    .set_track_metadata(Some(&now_playing()));

    let map = iface.metadata();
    for k in [
        "mpris:trackid",
        "xesam:title",
        "xesam:artist",
        "xesam:url",
        "mpris:artUrl",
    ] {
        assert!(map.contains_key(k), "missing key: {k}");
    }
}

#[test]
fn metadata_is_empty_without_a_track() {
    let state = Arc::new(Mutex::new(SharedState::default()));
    assert!(iface(&state).metadata().is_empty());
}

#[test]
fn remote_requests_become_commands() {
    let state = Arc::new(Mutex::new(SharedState::default()));
    let (tx, rx) = mpsc::channel::<ControlCmd>();
    let iface = PlayerIface { tx, state };

    iface.play_pause();
    iface.next();
    iface.previous();

    let got: Vec<_> = rx.try_iter().collect();
    assert_eq!(
        got,
        vec![ControlCmd::PlayPause, ControlCmd::Next, ControlCmd::Prev]
    );
}
