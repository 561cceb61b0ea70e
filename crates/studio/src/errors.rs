use std::{env, panic::PanicHookInfo, sync::OnceLock};

use color_eyre::{config::PanicHook, Result};
use tracing::error;

use crate::config::get_data_dir;

static INIT: OnceLock<()> = OnceLock::new();

/// `STUDIO_BACKTRACE=1` turns on span traces and location/env sections.
fn verbose_reports(value: Option<&str>) -> bool {
    matches!(value.map(str::trim), Some("1" | "full" | "true"))
}

fn crash_note() -> String {
    format!(
        "The studio hit a bug and had to close. Details were written to {}",
        get_data_dir().join("studio.log").display()
    )
}

/// Installs the eyre and panic hooks. Calling it twice is harmless.
pub fn init() -> Result<()> {
    if INIT.get().is_some() {
        return Ok(());
    }

    let verbose = verbose_reports(env::var("STUDIO_BACKTRACE").ok().as_deref());
    let (panic_hook, eyre_hook) = color_eyre::config::HookBuilder::default()
        .panic_section(crash_note())
        .capture_span_trace_by_default(verbose)
        .display_location_section(verbose)
        .display_env_section(verbose)
        .try_into_hooks()?;
    eyre_hook.install()?;

    std::panic::set_hook(Box::new(move |info| {
        restore_terminal();
        report(&panic_hook, info);
        std::process::exit(libc::EXIT_FAILURE);
    }));

    let _ = INIT.set(());
    Ok(())
}

/// Leaves raw mode and the alternate screen, otherwise the report is unreadable.
fn restore_terminal() {
    if let Ok(mut tui) = crate::tui::Tui::new() {
        if let Err(err) = tui.exit() {
            error!("could not restore the terminal: {err:?}");
        }
    }
}

fn report(panic_hook: &PanicHook, info: &PanicHookInfo<'_>) {
    let plain = strip_ansi_escapes::strip_str(panic_hook.panic_report(info).to_string());
    error!(report = %plain, "studio panicked");

    #[cfg(not(debug_assertions))]
    {
        let metadata = human_panic::metadata!();
        let dump = human_panic::handle_dump(&metadata, info);
        if human_panic::print_msg(dump, &metadata).is_err() {
            eprintln!("{plain}");
        }
    }

    #[cfg(debug_assertions)]
    better_panic::Settings::auto()
        .most_recent_first(false)
        .lineno_suffix(true)
        .verbosity(better_panic::Verbosity::Full)
        .create_panic_handler()(info);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backtrace_switch_values() {
        assert!(verbose_reports(Some("1")));
        assert!(verbose_reports(Some(" full ")));
        assert!(!verbose_reports(Some("0")));
        assert!(!verbose_reports(None));
    }

    #[test]
    fn crash_note_points_at_log() {
        assert!(crash_note().ends_with("studio.log"));
    }
}
