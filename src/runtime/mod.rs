use std::sync::mpsc;

use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use log::info;
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::App;
use crate::audio::RodioOutput;
use crate::mpris::ControlCmd;
use crate::player::PlayerController;

mod adding;
mod event_loop;
mod logging;
mod mpris_sync;
mod settings;
mod startup;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    logging::init();
    let settings = settings::load_settings();

    startup::ensure_storage_dirs(&settings.storage)?;
    let store = startup::open_store(&settings.storage);
    let importer = startup::importer(&settings.storage);

    let output = RodioOutput::open()?;
    let mut controller = PlayerController::new(output, store, startup::player_options(&settings));
    info!("started with {} track(s)", controller.playlist().len());

    let mut app = App::new(controller.subscribe(), settings.ui.follow_playback);
    let mpris_sync = mpris_sync::MprisSync::new(controller.subscribe());

    let (control_tx, control_rx) = mpsc::channel::<ControlCmd>();
    let mpris = crate::mpris::spawn_mpris(control_tx);

    mpris_sync::update_mpris(&mpris, &controller);

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result: Result<(), Box<dyn std::error::Error>> = (|| {
        let mut state = event_loop::EventLoopState::default();
        let mut session = event_loop::Session {
            settings: &settings,
            controller: &mut controller,
            app: &mut app,
            importer: &importer,
        };

        event_loop::run(
            &mut terminal,
            &mut session,
            &mpris,
            &mpris_sync,
            &control_rx,
            &mut state,
        )
    })();

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    info!("shutting down");
    run_result
}
