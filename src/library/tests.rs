use super::*;
use crate::config::TrackDisplayField;

fn track(title: &str, artist: &str, audio: &str) -> Track {
    Track::named(title, artist, audio, None)
}

#[test]
fn from_new_fills_title_from_stem_and_default_artist() {
    let t = Track::from_new(NewTrack::new("/u/music/Blue Skies.mp3"), None).unwrap();
    assert_eq!(t.title, "Blue Skies");
    assert_eq!(t.artist, UNKNOWN_ARTIST);
    assert_eq!(t.audio, "/u/music/Blue Skies.mp3");
    assert_eq!(t.image, None);
    assert_eq!(t.given, GivenNames::default());
}

#[test]
fn from_new_keeps_given_fields_and_trims_blank_ones() {
    let entry = NewTrack {
        audio: "/u/music/3.mp3".into(),
        image: Some("   ".into()),
        title: Some("Crimson Fly".into()),
        artist: Some("  ".into()),
    };
    let t = Track::from_new(entry, Some("https://example.com/default.png")).unwrap();
    assert_eq!(t.title, "Crimson Fly");
    assert_eq!(t.artist, UNKNOWN_ARTIST);
    assert_eq!(t.image.as_deref(), Some("https://example.com/default.png"));
    assert_eq!(t.given.title.as_deref(), Some("Crimson Fly"));
    assert_eq!(t.given.artist.as_deref(), Some("  "));
}

#[test]
fn from_new_prefers_own_artwork_over_default() {
    let entry = NewTrack {
        image: Some("/u/images/a.jpg".into()),
        ..NewTrack::new("/u/music/a.mp3")
    };
    let t = Track::from_new(entry, Some("/u/images/default.jpg")).unwrap();
    assert_eq!(t.image.as_deref(), Some("/u/images/a.jpg"));
}

#[test]
fn from_new_rejects_empty_audio_reference() {
    assert_eq!(Track::from_new(NewTrack::new(""), None), None);
    assert_eq!(Track::from_new(NewTrack::new("   "), None), None);
}

#[test]
fn display_line_joins_configured_fields() {
    let t = track("Jazz In Paris", "Media Right Productions", "/m/fake-mustache.mp3");
    assert_eq!(
        display_line(
            &t,
            &[TrackDisplayField::Artist, TrackDisplayField::Title],
            " - "
        ),
        "Media Right Productions - Jazz In Paris"
    );
    assert_eq!(
        display_line(&t, &[TrackDisplayField::Filename], " - "),
        "fake-mustache"
    );
}

#[test]
fn display_line_falls_back_to_title() {
    let t = track("Song", "  ", "/m/song.mp3");
    assert_eq!(display_line(&t, &[TrackDisplayField::Artist], " - "), "Song");
    assert_eq!(display_line(&t, &[], " - "), "Song");
}
