pub mod action;
pub mod effects;
pub mod keys;
pub mod reducer;
pub mod reducers;
pub mod runtime;
pub mod state;
pub mod types;
pub mod view;

pub use action::Action;
pub use effects::{DataEffects, Effect};
pub use keys::key_to_action;
pub use reducer::reduce;
pub use runtime::Runtime;
pub use state::AppState;
pub use types::Tab;

use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::sync::Arc;
use std::time::Duration;

use crate::config::Config;
use crate::data_provider::StatsProvider;
use crate::session::Session;

/// Main entry point for TUI mode
pub async fn run(
    client: Arc<dyn StatsProvider>,
    config: Config,
    session: Session,
) -> Result<(), io::Error> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let refresh_interval = config.refresh_interval;
    let data_effects = Arc::new(DataEffects::new(client));
    let mut runtime = Runtime::new(AppState::new(config, session), data_effects);

    // Trigger initial data load
    runtime.dispatch(Action::RefreshData);

    // Periodic refresh; 0 disables it
    let refresh_task = (refresh_interval > 0).then(|| {
        let sender = runtime.action_sender();
        tokio::spawn(async move {
            let period = Duration::from_secs(u64::from(refresh_interval));
            let mut ticker = tokio::time::interval_at(tokio::time::Instant::now() + period, period);
            loop {
                ticker.tick().await;
                if sender.send(Action::RefreshData).is_err() {
                    break;
                }
            }
        })
    });

    let result = event_loop(&mut terminal, &mut runtime);

    if let Some(task) = refresh_task {
        task.abort();
    }

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    runtime: &mut Runtime,
) -> Result<(), io::Error> {
    loop {
        // Process any actions from effects FIRST (so data loads trigger re-render)
        let actions_processed = runtime.process_actions();
        if actions_processed > 0 {
            tracing::debug!("LOOP: Processed {} actions", actions_processed);
        }

        terminal.draw(|f| view::render(f, runtime.state()))?;

        // Poll for keyboard events
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if let Some(action) = key_to_action(key, runtime.state()) {
                    if action == Action::Quit {
                        tracing::debug!("ACTION: Quitting application");
                        return Ok(());
                    }
                    runtime.dispatch(action);
                }
            }
        }
    }
}
