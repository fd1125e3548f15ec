use crate::data::FeatureFlags;
use crate::ui::year_view::{run_app, App};
use crate::ui::{restore_terminal, setup_terminal};
use anyhow::Result;
use tracing::info;

pub fn run(flags: FeatureFlags, locale: &str) -> Result<()> {
    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = crossterm::terminal::disable_raw_mode();
        let _ = crossterm::execute!(
            std::io::stdout(),
            crossterm::terminal::LeaveAlternateScreen
        );
        original_hook(info);
    }));

    info!(locale, ?flags, "starting widget");
    let mut terminal = setup_terminal()?;
    let mut app = App::new(flags, locale);

    let result = run_app(&mut terminal, &mut app);

    restore_terminal(&mut terminal)?;
    result
}
