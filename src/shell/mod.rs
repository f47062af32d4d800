//! Shell Loop
//!
//! Ties together key decoding, the line editor, the renderer and command
//! dispatch. One line in, one dispatch out; the [`Disposition`] of the last
//! line decides whether the host keeps going, exits or warm-resets.
//!
//! Decoding is pure, so the loop is where decoded events with side effects
//! are acted upon: the overlay toggle, the character set toggle and the
//! software cursor erase before a line is submitted or shortened.

mod commands;
mod dispatch;
mod hints;

pub use commands::{CommandError, CommandResult, Session, COMMANDS, SELF_TEST};
pub use dispatch::{Action, Command, Dispatcher, Disposition, Handler};

use std::path::PathBuf;

use crate::app::Config;
use crate::editor::{EditAction, LineEditor, LineFlags, LineState};
use crate::input::{KeyEvent, KeySource, OverlayStart, PlatformProfile, Replay};
use crate::parser::Tokenizer;
use crate::renderer::{LineRenderer, RenderReport, StatusOverlay};
use crate::term::Console;

/// Result of reading one line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadLine {
    /// A submitted line
    Line(String),
    /// The line was abandoned with Break
    Interrupted,
    /// End of input: Delete on an empty line, or the key source closed
    Eof,
}

/// Interactive shell over a console
pub struct Shell<C: Console> {
    console: C,
    config: Config,
    profile: &'static PlatformProfile,
    session: Session,
    dispatcher: Dispatcher,
    editor: LineEditor,
    renderer: LineRenderer,
    overlay: StatusOverlay,
    tokenizer: Tokenizer,
    /// Alternate (upper/lower case) character set selected
    alternate_charset: bool,
    last_report: RenderReport,
}

impl<C: Console> Shell<C> {
    /// Create a shell working in the process's current directory
    pub fn new(console: C, config: Config) -> Self {
        let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("/"));
        Self::with_cwd(console, config, cwd)
    }

    /// Create a shell working in `cwd`
    pub fn with_cwd(console: C, config: Config, cwd: PathBuf) -> Self {
        let profile = PlatformProfile::get(config.platform);
        let mut session = Session::new(profile, cwd);
        session.palette = config.palette.clone();

        Self {
            renderer: LineRenderer::new(config.palette.clone(), profile.software_cursor),
            overlay: StatusOverlay::new(
                &config.palette,
                profile.background_color,
                profile.overlay == OverlayStart::Visible,
            ),
            editor: LineEditor::new(config.history_size),
            tokenizer: Tokenizer::new(config.argv_capacity),
            dispatcher: Dispatcher::default(),
            alternate_charset: false,
            last_report: RenderReport::default(),
            console,
            config,
            profile,
            session,
        }
    }

    /// Get a reference to the console
    pub fn console(&self) -> &C {
        &self.console
    }

    /// Get a mutable reference to the console
    pub fn console_mut(&mut self) -> &mut C {
        &mut self.console
    }

    /// Consume the shell, returning its console
    pub fn into_console(self) -> C {
        self.console
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn profile(&self) -> &'static PlatformProfile {
        self.profile
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    pub fn editor(&self) -> &LineEditor {
        &self.editor
    }

    pub fn overlay(&self) -> &StatusOverlay {
        &self.overlay
    }

    /// Whether the alternate character set is selected
    pub fn alternate_charset(&self) -> bool {
        self.alternate_charset
    }

    /// What the most recent refresh had to clip
    pub fn last_report(&self) -> RenderReport {
        self.last_report
    }

    /// Read and run lines until one exits or resets
    pub fn run<K: KeySource>(&mut self, keys: &mut Replay<K>) -> Disposition {
        tracing::info!(platform = %self.profile.platform, "Shell started");
        self.console.clear_screen();

        loop {
            let line = match self.read_line(keys) {
                ReadLine::Line(line) => line,
                ReadLine::Interrupted => continue,
                ReadLine::Eof => return Disposition::Exit,
            };

            let disposition = self.execute(&line);
            if let Some(script) = self.session.take_script() {
                keys.push(script);
            }
            self.console.flush();

            if disposition != Disposition::Continue {
                tracing::info!(?disposition, "Shell finished");
                return disposition;
            }
        }
    }

    /// Tokenize and dispatch one line
    pub fn execute(&mut self, line: &str) -> Disposition {
        let capacity = self.tokenizer.capacity();
        let argv = self.tokenizer.tokenize(line);
        if argv.is_truncated() {
            tracing::debug!(capacity, "Argument vector full, rest of line dropped");
        }
        self.dispatcher.dispatch(&mut self.session, &mut self.console, &argv)
    }

    /// Edit one line on the cursor's current row
    pub fn read_line<K: KeySource + ?Sized>(&mut self, keys: &mut K) -> ReadLine {
        let (cols, rows) = self.console.screen_size();
        let mut state = LineState::new(&self.config.prompt, cols, rows, self.config.line_flags());
        self.editor.begin();
        self.refresh(&mut state);

        loop {
            let Some(raw) = keys.read_key() else {
                self.finish(&mut state);
                return ReadLine::Eof;
            };
            let key = self.profile.decode(raw);

            match key {
                KeyEvent::OverlayToggle => {
                    state.key = key;
                    if !self.overlay.toggle() {
                        self.overlay.hide(&mut self.console, &state);
                    }
                    self.refresh(&mut state);
                    continue;
                }
                KeyEvent::CaseToggle => {
                    state.key = key;
                    if self.profile.alternate_charset {
                        self.alternate_charset = !self.alternate_charset;
                        tracing::debug!(alternate = self.alternate_charset, "Character set");
                    }
                    self.refresh(&mut state);
                    continue;
                }
                KeyEvent::Enter | KeyEvent::Backspace => {
                    self.renderer.erase_software_cursor(&mut self.console);
                }
                _ => {},
            }

            match self.editor.handle(&mut state, key, &self.dispatcher) {
                EditAction::Continue => self.refresh(&mut state),
                EditAction::Beep => {
                    self.console.beep();
                    self.refresh(&mut state);
                }
                EditAction::ClearScreen => {
                    self.console.clear_screen();
                    self.refresh(&mut state);
                }
                EditAction::Submit => {
                    self.finish(&mut state);
                    return ReadLine::Line(state.text().to_string());
                }
                EditAction::Cancel => {
                    self.finish(&mut state);
                    return ReadLine::Interrupted;
                }
                EditAction::EndOfInput => {
                    self.finish(&mut state);
                    return ReadLine::Eof;
                }
            }
        }
    }

    /// Fit the line to the columns the overlay leaves free, then redraw it
    fn refresh(&mut self, state: &mut LineState) {
        let row = self.console.cursor_row();
        state.set_width(self.overlay.right_edge(state.cols(), row));

        self.last_report = self.renderer.refresh(
            &mut self.console,
            state,
            &mut self.overlay,
            &self.dispatcher,
        );
        self.console.flush();
    }

    /// Final redraw without the hint, then move to a fresh line
    fn finish(&mut self, state: &mut LineState) {
        state.flags.remove(LineFlags::HINTS);
        state.key = KeyEvent::Enter;
        state.move_end();
        self.refresh(state);
        self.console.put_char(b'\n');
        self.console.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Screen;
    use crate::input::{Platform, ScriptSource};

    fn shell(platform: Platform) -> Shell<Screen> {
        let config = Config {
            platform,
            ..Config::default()
        };
        Shell::with_cwd(Screen::new(40, 25), config, std::env::temp_dir())
    }

    #[test]
    fn test_read_line_submits_typed_text() {
        let mut shell = shell(Platform::Posix);
        let mut keys = ScriptSource::new(b"echo hi\r".to_vec());
        assert_eq!(shell.read_line(&mut keys), ReadLine::Line("echo hi".to_string()));
        assert_eq!(shell.console().line_text(0), "$ echo hi");
        assert_eq!(shell.console().cursor_row(), 1);
    }

    #[test]
    fn test_read_line_eof() {
        let mut shell = shell(Platform::Posix);
        assert_eq!(shell.read_line(&mut ScriptSource::new(vec![4])), ReadLine::Eof);
        assert_eq!(shell.read_line(&mut ScriptSource::empty()), ReadLine::Eof);
    }

    #[test]
    fn test_read_line_break() {
        let mut shell = shell(Platform::Posix);
        let mut keys = ScriptSource::new(b"rm foo\x03".to_vec());
        assert_eq!(shell.read_line(&mut keys), ReadLine::Interrupted);
    }

    #[test]
    fn test_hint_removed_on_submit() {
        let mut shell = shell(Platform::Posix);
        let mut keys = ScriptSource::new(b"cd".to_vec());
        shell.read_line(&mut keys);
        assert_eq!(shell.console().line_text(0), "$ cd");
        assert!(!shell.last_report().hint_clipped);
    }

    #[test]
    fn test_hint_shown_while_typing() {
        let mut shell = shell(Platform::Posix);
        let mut state = LineState::new("$ ", 40, 25, LineFlags::HINTS);
        state.set_text("mv");
        shell.refresh(&mut state);
        assert_eq!(shell.console().line_text(0), "$ mv <old> <new>");
    }

    #[test]
    fn test_overlay_toggle_key() {
        let mut shell = shell(Platform::Posix);
        assert!(!shell.overlay().is_visible());

        let mut keys = ScriptSource::new(vec![15, b'x', b'\r']);
        shell.read_line(&mut keys);
        assert!(shell.overlay().is_visible());
        assert!(shell.console().line_text(1).ends_with(" k: 13"));

        let mut keys = ScriptSource::new(vec![15, b'\r']);
        shell.read_line(&mut keys);
        assert!(!shell.overlay().is_visible());
        assert_eq!(shell.console().line_text(1), "$");
        assert_eq!(shell.console().line_text(2), "");
    }

    #[test]
    fn test_case_toggle_only_on_profiles_with_charsets() {
        let mut posix = shell(Platform::Posix);
        posix.read_line(&mut ScriptSource::new(vec![18, b'\r']));
        assert!(!posix.alternate_charset());

        let mut c64 = shell(Platform::C64);
        c64.read_line(&mut ScriptSource::new(vec![18, b'\r']));
        assert!(c64.alternate_charset());
    }

    #[test]
    fn test_petscii_keys() {
        let mut shell = shell(Platform::C64);
        // Shifted letters fold, 20 is DEL, 157 is cursor left
        let mut keys = ScriptSource::new(vec![b'L', b'S', b'X', 20, 157, b'P', 13]);
        assert_eq!(shell.read_line(&mut keys), ReadLine::Line("LPS".to_string()));

        let mut keys = ScriptSource::new(vec![0xc5, 0xc3, 0xc8, 0xcf, 13]);
        assert_eq!(shell.read_line(&mut keys), ReadLine::Line("echo".to_string()));
    }

    #[test]
    fn test_zx_overlay_visible_at_start() {
        let mut shell = shell(Platform::Zx);
        assert!(shell.overlay().is_visible());
        shell.read_line(&mut ScriptSource::new(b"ls\r".to_vec()));
        assert!(shell.console().line_text(4).ends_with(" y:  0"));
    }

    #[test]
    fn test_long_line_scrolls_clear_of_overlay() {
        let config = Config {
            platform: Platform::Zx,
            ..Config::default()
        };
        let mut shell = Shell::with_cwd(Screen::new(32, 24), config, std::env::temp_dir());
        let mut keys = ScriptSource::new(b"echo abcdefghijklmnopqrstuvwxyz".to_vec());
        shell.read_line(&mut keys);

        // 25 columns left of the panel: the line end stays in view
        assert_eq!(shell.console().line_text(0), "$ efghijklmnopqrstuvwxyz");
        assert!(!shell.last_report().buffer_clipped);
    }

    #[test]
    fn test_execute_and_run() {
        let mut shell = shell(Platform::Posix);
        assert_eq!(shell.execute("echo one"), Disposition::Continue);
        assert_eq!(shell.execute("exit"), Disposition::Exit);

        let mut keys = Replay::new(ScriptSource::new(b"echo two\rreset\r".to_vec()));
        assert_eq!(shell.run(&mut keys), Disposition::Reset);
        assert_eq!(shell.console().line_text(1), "two");
    }

    #[test]
    fn test_run_ends_when_keys_run_out() {
        let mut shell = shell(Platform::Posix);
        let mut keys = Replay::new(ScriptSource::new(b"echo x\r".to_vec()));
        assert_eq!(shell.run(&mut keys), Disposition::Exit);
    }

    #[test]
    fn test_history_recall() {
        let mut shell = shell(Platform::Posix);
        shell.read_line(&mut ScriptSource::new(b"pwd\r".to_vec()));
        let mut keys = ScriptSource::new(vec![16, 13]);
        assert_eq!(shell.read_line(&mut keys), ReadLine::Line("pwd".to_string()));
    }
}
