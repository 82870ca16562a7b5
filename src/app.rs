use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::{Duration, Instant};

use anyhow::{Result, anyhow};
use chrono::Local;
use crossterm::{
    cursor::{Hide, Show},
    event::{self, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use rand::rngs::OsRng;
use ratatui::{Terminal, backend::CrosstermBackend};
use tempfile::NamedTempFile;
use tui_textarea::{Input, TextArea};

use crate::prompts;
use crate::session::Session;
use crate::storage::{self, configured_entries_dir, resolve_journal_dir_under_home, save_config};
use crate::ui::{self, ViewState, copy_entry_to_clipboard};

const STATUS_MESSAGE_SECS: u64 = 3;
const ANIM_TICK_MILLIS: u64 = 150;
const JOURNAL_NAV_HINT: &str =
    "Ctrl+G prompt | Ctrl+Y copy | Ctrl+S save | Ctrl+E editor | Ctrl+L lantern | Esc quit";

pub fn run() -> Result<()> {
    let bin_name = executable_name();
    let mut args = std::env::args().skip(1);
    let mut text_path: Option<PathBuf> = None;
    let mut set_dir: Option<PathBuf> = None;
    let mut mode_generate = false;
    let mut self_check = false;
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--version" | "-V" => {
                println!("{bin_name} v{}", env!("CARGO_PKG_VERSION"));
                return Ok(());
            }
            "--help" | "-h" => {
                print_usage(&bin_name);
                return Ok(());
            }
            "-t" | "--text" => {
                if let Some(p) = args.next() {
                    text_path = Some(PathBuf::from(p));
                } else {
                    return Err(anyhow!("--text requires a path"));
                }
            }
            "-d" | "--dir" => {
                if let Some(p) = args.next() {
                    set_dir = Some(PathBuf::from(p));
                } else {
                    return Err(anyhow!("--dir requires a path"));
                }
            }
            "-g" | "--generate" => mode_generate = true,
            "--self-check" => self_check = true,
            _ => {}
        }
    }

    if self_check {
        #[cfg(debug_assertions)]
        {
            return run_self_check();
        }
        #[cfg(not(debug_assertions))]
        {
            return Err(anyhow!("--self-check is only available in development builds"));
        }
    }

    if mode_generate {
        let mut rng = OsRng;
        println!("{}", prompts::pick(&mut rng));
        return Ok(());
    }

    if let Some(raw) = set_dir {
        let home =
            dirs::home_dir().ok_or_else(|| anyhow!("Could not determine home directory"))?;
        let dir = resolve_journal_dir_under_home(&raw, &home)?;
        save_config(&dir)?;
        println!("Journal directory set to {}", dir.display());
        return Ok(());
    }

    init_logging();

    let initial_entry = match &text_path {
        Some(p) => fs::read_to_string(p)
            .map_err(|e| anyhow!("Failed to read {}: {e}", p.display()))?,
        None => String::new(),
    };

    let mut session = Session::new();
    run_tui_journal(&mut session, initial_entry)
}

// Log to ~/.northern-journal/njournal.log - tail with: tail -f <path>
// Set DEBUG=0-3 to control verbosity (0=off, 1=warn, 2=info, 3=debug)
fn init_logging() {
    let debug_level = std::env::var("DEBUG")
        .ok()
        .and_then(|v| v.parse::<u8>().ok())
        .unwrap_or(0);
    if debug_level == 0 {
        return;
    }
    let level = match debug_level {
        1 => tracing::Level::WARN,
        2 => tracing::Level::INFO,
        _ => tracing::Level::DEBUG,
    };
    let base_dir = match storage::default_base_dir() {
        Ok(dir) => dir,
        Err(_) => return,
    };
    if fs::create_dir_all(&base_dir).is_err() {
        return;
    }
    let file_appender = tracing_appender::rolling::never(base_dir, storage::LOG_FILE);
    tracing_subscriber::fmt()
        .with_writer(file_appender)
        .with_max_level(level)
        .with_ansi(false)
        .init();
}

fn run_tui_journal(session: &mut Session, initial_entry: String) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen, Hide)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut editor = new_editor(initial_entry);
    let mut status = JOURNAL_NAV_HINT.to_string();
    let mut status_until: Option<Instant> = None;
    let mut quit_overlay = false;
    let mut dirty = false;
    let mut anim_frame: usize = 0;
    let mut last_tick = Instant::now();
    let tick = Duration::from_millis(ANIM_TICK_MILLIS);

    let result = (|| -> Result<()> {
        loop {
            if let Some(until) = status_until {
                if Instant::now() >= until {
                    status = JOURNAL_NAV_HINT.to_string();
                    status_until = None;
                }
            }
            if session.lantern && last_tick.elapsed() >= tick {
                anim_frame = anim_frame.wrapping_add(1);
                last_tick = Instant::now();
            }

            terminal.draw(|f| {
                let quit_prompt = if quit_overlay {
                    Some(vec![
                        "Quit without saving?".to_string(),
                        "".to_string(),
                        "[y] Yes   [n] No".to_string(),
                    ])
                } else {
                    None
                };
                let view = ViewState {
                    session,
                    editor: &editor,
                    status: status.clone(),
                    quit_overlay: quit_prompt,
                    anim_frame,
                };
                ui::draw(f, &view);
            })?;

            if event::poll(Duration::from_millis(200))? {
                match event::read()? {
                    Event::Key(key_event) => {
                        let previous_status = status.clone();
                        let ctrl = key_event.modifiers.contains(KeyModifiers::CONTROL);
                        if quit_overlay {
                            match key_event.code {
                                KeyCode::Char('y') => break,
                                KeyCode::Char('n') | KeyCode::Esc => {
                                    quit_overlay = false;
                                    status = "Quit cancelled".into();
                                }
                                _ => {}
                            }
                        } else {
                            match key_event.code {
                                KeyCode::Esc => {
                                    if dirty && !entry_text(&editor).is_empty() {
                                        quit_overlay = true;
                                    } else {
                                        break;
                                    }
                                }
                                KeyCode::Char('g' | 'G') if ctrl => {
                                    let mut rng = OsRng;
                                    let picked = session.generate_prompt(&mut rng);
                                    tracing::debug!(prompt = picked, "prompt generated");
                                    status = "New prompt drawn".into();
                                }
                                KeyCode::Char('y' | 'Y') if ctrl => {
                                    let text = entry_text(&editor);
                                    let result = copy_entry_to_clipboard(&text);
                                    if let Err(e) = &result {
                                        tracing::warn!(error = %e, "clipboard write failed");
                                    }
                                    status = copy_status(result);
                                }
                                KeyCode::Char('s' | 'S') if ctrl => {
                                    let text = entry_text(&editor);
                                    match export_current_entry(&text) {
                                        Ok(path) => {
                                            dirty = false;
                                            status = format!("Saved to {}", path.display());
                                        }
                                        Err(e) => status = format!("Save failed: {e}"),
                                    }
                                }
                                KeyCode::Char('e' | 'E') if ctrl => {
                                    let text = entry_text(&editor);
                                    match edit_entry_with_editor(&text, &mut terminal)? {
                                        Some(updated) => {
                                            editor = new_editor(updated);
                                            dirty = true;
                                            status = "Entry updated from editor".into();
                                        }
                                        None => status = "Editor cancelled".into(),
                                    }
                                }
                                KeyCode::Char('l' | 'L') if ctrl => {
                                    status = if session.toggle_lantern() {
                                        "Lantern mode on".into()
                                    } else {
                                        "Lantern mode off".into()
                                    };
                                }
                                _ => {
                                    if editor.input(Input::from(key_event)) {
                                        dirty = true;
                                    }
                                }
                            }
                        }
                        if status != previous_status {
                            if status == JOURNAL_NAV_HINT {
                                status_until = None;
                            } else {
                                status_until =
                                    Some(Instant::now() + Duration::from_secs(STATUS_MESSAGE_SECS));
                            }
                        }
                    }
                    _ => {}
                }
            }
        }
        Ok(())
    })();

    teardown_terminal(&mut terminal);
    result
}

fn new_editor(initial: String) -> TextArea<'static> {
    let mut editor = if initial.is_empty() {
        TextArea::default()
    } else {
        TextArea::new(initial.lines().map(str::to_string).collect())
    };
    ui::configure_editor(&mut editor);
    editor
}

fn entry_text(editor: &TextArea<'_>) -> String {
    editor.lines().join("\n")
}

fn copy_status(result: Result<()>) -> String {
    match result {
        Ok(()) => "Copied entry to clipboard".to_string(),
        Err(e) => format!("Clipboard error: {e}"),
    }
}

fn export_current_entry(text: &str) -> Result<PathBuf> {
    let dir = configured_entries_dir()?;
    let now = Local::now();
    let path = storage::export_entry(&dir, text, &now)?;
    tracing::info!(path = %path.display(), bytes = text.len(), "entry exported");
    Ok(path)
}

fn edit_entry_with_editor(
    text: &str,
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
) -> Result<Option<String>> {
    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen, Show).ok();

    let mut file = NamedTempFile::new()?;
    file.write_all(text.as_bytes())?;
    file.flush()?;

    let editor = std::env::var("EDITOR").unwrap_or_else(|_| "nvim".to_string());
    let status = Command::new(editor)
        .arg(file.path())
        .status()
        .map_err(|e| anyhow!("Failed to launch editor: {e}"))?;

    execute!(terminal.backend_mut(), EnterAlternateScreen, Hide).ok();
    enable_raw_mode().ok();
    terminal.clear()?;

    if !status.success() {
        return Ok(None);
    }
    Ok(Some(fs::read_to_string(file.path())?))
}

fn teardown_terminal(terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>) {
    disable_raw_mode().ok();
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        crossterm::cursor::Show
    )
    .ok();
    terminal.show_cursor().ok();
}

#[cfg(debug_assertions)]
fn run_self_check() -> Result<()> {
    let home = dirs::home_dir().ok_or_else(|| anyhow!("Could not determine home directory"))?;
    let mut warnings = 0u32;
    let mut failures = 0u32;

    println!("Northern Journal self-check (development build)");
    println!("Home: {}", home.display());

    let entries_dir = match storage::load_config() {
        Ok(Some(cfg)) => {
            let raw = PathBuf::from(cfg.journal_dir);
            match resolve_journal_dir_under_home(&raw, &home) {
                Ok(dir) => {
                    println!("[PASS] Configured journal directory is valid: {}", dir.display());
                    dir
                }
                Err(e) => {
                    println!("[FAIL] Invalid configured journal directory: {e}");
                    failures += 1;
                    storage::default_entries_dir()?
                }
            }
        }
        Ok(None) => {
            let dir = storage::default_entries_dir()?;
            println!(
                "[WARN] No config found at {}; using default {}",
                storage::config_path()?.display(),
                dir.display()
            );
            warnings += 1;
            dir
        }
        Err(e) => {
            println!("[FAIL] Config is unreadable: {e}");
            failures += 1;
            storage::default_entries_dir()?
        }
    };

    if entries_dir.exists() {
        match NamedTempFile::new_in(&entries_dir) {
            Ok(_) => println!("[PASS] Journal directory is writable: {}", entries_dir.display()),
            Err(e) => {
                println!("[FAIL] Journal directory is not writable: {e}");
                failures += 1;
            }
        }

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = fs::metadata(&entries_dir)?.permissions().mode() & 0o777;
            if mode == 0o700 {
                println!("[PASS] Journal directory permissions are 0o700");
            } else {
                println!("[WARN] Journal directory permissions are {mode:o}, expected 700");
                warnings += 1;
            }
        }
    } else {
        println!(
            "[WARN] Journal directory does not exist yet (created on first save): {}",
            entries_dir.display()
        );
        warnings += 1;
    }

    match arboard::Clipboard::new() {
        Ok(_) => println!("[PASS] System clipboard is available"),
        Err(e) => {
            println!("[WARN] System clipboard is unavailable: {e}");
            warnings += 1;
        }
    }

    if prompts::PROMPTS.iter().all(|p| !p.trim().is_empty()) {
        println!("[PASS] Prompt pool holds {} prompts", prompts::PROMPTS.len());
    } else {
        println!("[FAIL] Prompt pool contains blank entries");
        failures += 1;
    }

    println!("Log file (DEBUG=1-3): {}", storage::log_path()?.display());

    println!("Self-check complete: {failures} failure(s), {warnings} warning(s).");
    if failures > 0 {
        Err(anyhow!("Self-check failed"))
    } else {
        Ok(())
    }
}

fn print_usage(bin_name: &str) {
    eprintln!("Usage: {bin_name} [OPTIONS]");
    eprintln!("  (no options)            Open the journal");
    eprintln!("  -g, --generate          Print a random journal prompt and exit");
    eprintln!("  -t, --text <PATH>       Preload the entry from a text file");
    eprintln!("  -d, --dir <PATH>        Set the journal export directory");
    #[cfg(debug_assertions)]
    eprintln!("      --self-check        Run environment checks");
    eprintln!("  -V, --version           Show version and exit");
    eprintln!("  -h, --help              Show this help");
}

fn executable_name() -> String {
    let fallback = "njournal".to_string();
    let arg0 = match std::env::args().next() {
        Some(v) => v,
        None => return fallback,
    };
    let path = Path::new(&arg0);
    match path.file_name().and_then(|name| name.to_str()) {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => fallback,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn editor_text_round_trips_lines() {
        let editor = new_editor("first line\n\nthird line".to_string());
        assert_eq!(entry_text(&editor), "first line\n\nthird line");
    }

    #[test]
    fn empty_editor_has_empty_text() {
        let editor = new_editor(String::new());
        assert_eq!(entry_text(&editor), "");
    }

    #[test]
    fn clipboard_failure_becomes_status_notice() {
        let message = copy_status(Err(anyhow!("permission denied")));
        assert!(message.starts_with("Clipboard error"));
        assert!(message.contains("permission denied"));
    }

    #[test]
    fn clipboard_success_confirms_copy() {
        assert_eq!(copy_status(Ok(())), "Copied entry to clipboard");
    }
}
