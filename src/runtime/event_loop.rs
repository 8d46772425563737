use std::sync::mpsc;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use log::debug;
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::App;
use crate::config;
use crate::dialog;
use crate::library::Importer;
use crate::mpris::{ControlCmd, MprisHandle};
use crate::player::{AudioOutput, PlayerController};
use crate::runtime::adding;
use crate::runtime::mpris_sync::MprisSync;
use crate::ui;

/// State tracked by the runtime event loop across iterations.
#[derive(Debug, Default)]
pub struct EventLoopState {
    /// Internal two-key prefix state used for `gg` handling.
    pub pending_gg: bool,
}

/// What a key press asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    Down,
    Up,
    Top,
    Bottom,
    PlaySelected,
    TogglePlay,
    Next,
    Prev,
    ScrubBack,
    ScrubForward,
    VolumeUp,
    VolumeDown,
    Mute,
    Shuffle,
    Repeat,
    AddSongs,
    AddFolder,
    RemoveSelected,
    DismissNotice,
}

/// Everything the loop drives, bundled to keep signatures short.
pub struct Session<'a, A: AudioOutput> {
    pub settings: &'a config::Settings,
    pub controller: &'a mut PlayerController<A>,
    pub app: &'a mut App,
    pub importer: &'a Importer,
}

/// Main terminal event loop: polls the audio output, draws, and dispatches
/// media-session commands and key presses. Returns `Ok(())` when shutdown
/// is requested.
pub fn run<A: AudioOutput>(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    session: &mut Session<'_, A>,
    mpris: &MprisHandle,
    mpris_sync: &MprisSync,
    control_rx: &mpsc::Receiver<ControlCmd>,
    state: &mut EventLoopState,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        session.controller.poll_audio();
        session
            .app
            .drain_events(session.controller.playlist().len());
        mpris_sync.sync(mpris, session.controller);

        let settings = session.settings;
        let (controller, app) = (&*session.controller, &*session.app);
        terminal.draw(|f| {
            ui::draw(
                f,
                controller.playlist(),
                controller.current_track(),
                controller.state(),
                app,
                &settings.ui,
                &settings.controls,
            )
        })?;

        while let Ok(cmd) = control_rx.try_recv() {
            if handle_control_cmd(cmd, session.controller) {
                return Ok(());
            }
        }

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                let Some(action) = action_for_key(key, &mut state.pending_gg) else {
                    continue;
                };
                if apply_action(action, session) {
                    break;
                }
            }
        }
    }

    Ok(())
}

/// Apply a media-session command. Returns `true` when the app should exit.
pub fn handle_control_cmd<A: AudioOutput>(
    cmd: ControlCmd,
    controller: &mut PlayerController<A>,
) -> bool {
    debug!("control command: {cmd:?}");
    match cmd {
        ControlCmd::Quit => return true,
        ControlCmd::Play => controller.play(),
        ControlCmd::Pause => controller.pause(),
        ControlCmd::PlayPause => controller.toggle_play(),
        ControlCmd::Stop => {
            controller.pause();
            controller.seek(0.0);
        }
        ControlCmd::Next => controller.next(),
        ControlCmd::Prev => controller.previous(),
    }
    false
}

/// Map a key press to an action. `g` arms `pending_gg`; any other key
/// disarms it.
pub fn action_for_key(key: KeyEvent, pending_gg: &mut bool) -> Option<Action> {
    let armed = std::mem::take(pending_gg);
    let action = match key.code {
        KeyCode::Char('g') => {
            if armed {
                Action::Top
            } else {
                *pending_gg = true;
                return None;
            }
        }
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Action::Quit,
        KeyCode::Char('q') => Action::Quit,
        KeyCode::Char('G') => Action::Bottom,
        KeyCode::Char('j') | KeyCode::Down => Action::Down,
        KeyCode::Char('k') | KeyCode::Up => Action::Up,
        KeyCode::Enter => Action::PlaySelected,
        KeyCode::Char(' ') | KeyCode::Char('p') => Action::TogglePlay,
        KeyCode::Char('l') | KeyCode::Right => Action::Next,
        KeyCode::Char('h') | KeyCode::Left => Action::Prev,
        KeyCode::Char('H') => Action::ScrubBack,
        KeyCode::Char('L') => Action::ScrubForward,
        KeyCode::Char('+') | KeyCode::Char('=') => Action::VolumeUp,
        KeyCode::Char('-') => Action::VolumeDown,
        KeyCode::Char('m') => Action::Mute,
        KeyCode::Char('s') => Action::Shuffle,
        KeyCode::Char('r') => Action::Repeat,
        KeyCode::Char('a') => Action::AddSongs,
        KeyCode::Char('A') => Action::AddFolder,
        KeyCode::Char('d') | KeyCode::Delete => Action::RemoveSelected,
        KeyCode::Esc => Action::DismissNotice,
        _ => return None,
    };
    Some(action)
}

/// Apply `action`. Returns `true` when the app should exit.
pub fn apply_action<A: AudioOutput>(action: Action, session: &mut Session<'_, A>) -> bool {
    let settings = session.settings;
    let controller = &mut *session.controller;
    let app = &mut *session.app;
    let len = controller.playlist().len();
    let scrub = settings.controls.scrub_seconds as f64;
    let step = settings.controls.volume_step;
    let autoplay = settings.playback.autoplay_on_add;

    match action {
        Action::Quit => return true,
        Action::Down => {
            app.follow_playback = false;
            app.next(len);
        }
        Action::Up => {
            app.follow_playback = false;
            app.prev(len);
        }
        Action::Top => app.select_first(),
        Action::Bottom => app.select_last(len),
        Action::PlaySelected => {
            app.follow_playback = settings.ui.follow_playback;
            controller.play_index(app.selected);
        }
        Action::TogglePlay => controller.toggle_play(),
        Action::Next => controller.next(),
        Action::Prev => controller.previous(),
        Action::ScrubBack => controller.scrub(-scrub),
        Action::ScrubForward => controller.scrub(scrub),
        Action::VolumeUp => controller.change_volume(step),
        Action::VolumeDown => controller.change_volume(-step),
        Action::Mute => controller.toggle_mute(),
        Action::Shuffle => controller.toggle_shuffle(),
        Action::Repeat => controller.toggle_repeat(),
        Action::AddSongs => {
            if let Some(files) = dialog::pick_audio_files(&settings.library.extensions) {
                let artwork = dialog::pick_artwork(&settings.library.image_extensions);
                let added = adding::add_files(
                    controller,
                    session.importer,
                    &files,
                    artwork.as_deref(),
                    autoplay,
                );
                app.notify("Add songs", added.summary());
            }
        }
        Action::AddFolder => {
            if let Some(dir) = dialog::pick_folder() {
                let added = adding::add_folder(
                    controller,
                    session.importer,
                    &dir,
                    &settings.library,
                    autoplay,
                );
                app.notify("Add folder", added.summary());
            }
        }
        Action::RemoveSelected => {
            if app.selected < len {
                controller.remove_track(app.selected);
            }
        }
        Action::DismissNotice => app.clear_notice(),
    }
    false
}
