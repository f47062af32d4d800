//! Built-in commands
//!
//! Handlers print through the console and report failures as
//! [`CommandError`]. Commands taking several operands report each failing
//! operand themselves and carry on with the next one.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::dispatch::Command;
use crate::app::Palette;
use crate::core::Color;
use crate::input::PlatformProfile;
use crate::parser::{path, Argv, OptFlags};
use crate::term::Console;

/// Keys replayed by `test`: a tour of the built-in commands ending in a
/// warm reset
pub const SELF_TEST: &[u8] = b"help\r\
sleep 2\r\
clear\r\
echo foo    bar     baz\r\
parse   this  is a    test for the    \" very fine \"  argc/argv  parser\r\
dirname /foo/bar/baz.txt\r\
basename /foo/bar/baz.txt\r\
realpath ./foo/../bar/../foobar/baz.txt\r\
ls\r\
mkdir foo\r\
cd foo\r\
ls\r\
mkdir bar\r\
ls\r\
rmdir bar\r\
ls\r\
cd ..\r\
rmdir foo\r\
version\r\
echo bye!\r\
sleep 5\r\
reset\r";

pub type CommandResult = Result<(), CommandError>;

/// Command failure
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("missing argument")]
    MissingArgument,
    #[error("not implemented")]
    NotImplemented,
    #[error("{0}: not a directory")]
    NotADirectory(String),
    #[error("{0}")]
    Io(#[from] io::Error),
}

/// State the commands share across lines
pub struct Session {
    /// Working directory for relative paths
    pub cwd: PathBuf,
    pub profile: &'static PlatformProfile,
    pub palette: Palette,
    /// Blocking pause used by `sleep`
    pub sleep: fn(Duration),
    /// Keys queued by `test`, picked up by the shell loop
    pending_script: Option<&'static [u8]>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("cwd", &self.cwd)
            .field("platform", &self.profile.platform)
            .field("pending_script", &self.pending_script.map(<[u8]>::len))
            .finish()
    }
}

impl Session {
    pub fn new(profile: &'static PlatformProfile, cwd: PathBuf) -> Self {
        Self {
            cwd,
            profile,
            palette: Palette::default(),
            sleep: std::thread::sleep,
            pending_script: None,
        }
    }

    /// Resolve a path argument against the working directory
    pub fn resolve(&self, arg: &str) -> PathBuf {
        self.cwd.join(arg)
    }

    /// Queue keys to be replayed before reading live input again
    pub fn queue_script(&mut self, script: &'static [u8]) {
        self.pending_script = Some(script);
    }

    /// Take the queued script, if any
    pub fn take_script(&mut self) -> Option<&'static [u8]> {
        self.pending_script.take()
    }
}

pub static COMMANDS: &[Command] = &[
    Command::run("help", None, cmd_help),
    Command::run("echo", Some("[<text1> <text2>] ..."), cmd_echo),
    Command::run("sleep", Some("<sec>"), cmd_sleep),
    Command::run("clear", None, cmd_clear),
    Command::reset("reset"),
    Command::run("version", None, cmd_version),
    Command::run("pwd", None, cmd_pwd),
    Command::run("mount", Some("[<dir>] [<dev>]"), cmd_mount),
    Command::run("cd", Some("<path>"), cmd_cd),
    Command::run("ls", None, cmd_ls),
    Command::run("mv", Some("<old> <new>"), cmd_mv),
    Command::run("rm", Some("<name>"), cmd_rm),
    Command::run("rmdir", Some("<dir>"), cmd_rmdir),
    Command::run("realpath", Some("<path>"), cmd_realpath),
    Command::run("basename", Some("<path>"), cmd_basename),
    Command::run("dirname", Some("<path>"), cmd_dirname),
    Command::run("mkdir", Some("<dir>"), cmd_mkdir),
    Command::run("parse", Some("[<arg1> <arg2> ...]"), cmd_parse),
    Command::run("test", None, cmd_test),
    Command::exit("logout"),
    Command::exit("exit"),
];

/// First operand or a missing-argument error
fn operand<'a>(argv: &Argv<'a>, index: usize) -> Result<&'a str, CommandError> {
    argv.get(index).ok_or(CommandError::MissingArgument)
}

fn cmd_help(session: &mut Session, console: &mut dyn Console, _: &Argv<'_>) -> CommandResult {
    console.print("available commands:\n");
    for row in COMMANDS.chunks(3) {
        let line: String = row
            .iter()
            .map(|command| format!("{:<10}", command.name))
            .collect();
        console.print(&format!(" {}\n", line.trim_end()));
    }
    console.print("\nline editor keys ([ctrl]+[x]):\n");
    console.print(session.profile.key_help);
    console.print("\n");
    Ok(())
}

fn cmd_echo(_: &mut Session, console: &mut dyn Console, argv: &Argv<'_>) -> CommandResult {
    let words: Vec<&str> = argv.iter().skip(1).collect();
    console.print(&words.join(" "));
    console.print("\n");
    Ok(())
}

fn cmd_parse(_: &mut Session, console: &mut dyn Console, argv: &Argv<'_>) -> CommandResult {
    for (i, arg) in argv.iter().enumerate() {
        console.print(&format!("argv[{}]='{}'\n", i, arg));
    }
    Ok(())
}

fn cmd_sleep(session: &mut Session, _: &mut dyn Console, argv: &Argv<'_>) -> CommandResult {
    let seconds = leading_number(operand(argv, 1)?);
    if seconds > 0 {
        (session.sleep)(Duration::from_secs(seconds));
    }
    Ok(())
}

/// Value of the leading decimal digits, 0 when there are none
fn leading_number(text: &str) -> u64 {
    text.trim_start()
        .bytes()
        .take_while(u8::is_ascii_digit)
        .fold(0u64, |n, digit| n.saturating_mul(10).saturating_add(u64::from(digit - b'0')))
}

fn cmd_clear(_: &mut Session, console: &mut dyn Console, _: &Argv<'_>) -> CommandResult {
    console.clear_screen();
    Ok(())
}

fn cmd_version(session: &mut Session, console: &mut dyn Console, _: &Argv<'_>) -> CommandResult {
    console.print(&format!(
        "push, version {} ({}-rust)\n",
        env!("CARGO_PKG_VERSION"),
        session.profile.platform
    ));
    Ok(())
}

fn cmd_pwd(session: &mut Session, console: &mut dyn Console, _: &Argv<'_>) -> CommandResult {
    console.print(&format!("{}\n", session.cwd.display()));
    Ok(())
}

fn cmd_mount(_: &mut Session, _: &mut dyn Console, _: &Argv<'_>) -> CommandResult {
    Err(CommandError::NotImplemented)
}

fn cmd_cd(session: &mut Session, _: &mut dyn Console, argv: &Argv<'_>) -> CommandResult {
    let arg = operand(argv, 1)?;
    let target = PathBuf::from(path::realpath(arg, &session.cwd.to_string_lossy()));
    if !fs::metadata(&target)?.is_dir() {
        return Err(CommandError::NotADirectory(arg.to_string()));
    }
    tracing::debug!(cwd = %target.display(), "Changed directory");
    session.cwd = target;
    Ok(())
}

fn cmd_ls(session: &mut Session, console: &mut dyn Console, _: &Argv<'_>) -> CommandResult {
    let mut entries = fs::read_dir(&session.cwd)?
        .filter_map(Result::ok)
        .map(|entry| {
            let is_dir = entry.file_type().is_ok_and(|kind| kind.is_dir());
            (entry.file_name().to_string_lossy().into_owned(), is_dir)
        })
        .collect::<Vec<_>>();
    entries.sort();

    for (i, (name, is_dir)) in entries.iter().enumerate() {
        let color = if *is_dir { session.palette.hint } else { Color::Default };
        console.set_foreground(color);
        console.print(&format!("{:<19}", name));
        if i % 2 == 1 {
            console.print("\n");
        }
    }
    console.set_foreground(Color::Default);
    if entries.len() % 2 == 1 {
        console.print("\n");
    }
    Ok(())
}

fn cmd_mv(session: &mut Session, _: &mut dyn Console, argv: &Argv<'_>) -> CommandResult {
    let from = operand(argv, 1)?;
    let to = operand(argv, 2)?;
    fs::rename(session.resolve(from), session.resolve(to))?;
    Ok(())
}

fn cmd_rm(session: &mut Session, console: &mut dyn Console, argv: &Argv<'_>) -> CommandResult {
    for_each_operand(session, console, argv, "removing", |path| {
        if fs::symlink_metadata(path)?.is_dir() {
            fs::remove_dir(path)
        } else {
            fs::remove_file(path)
        }
    })
}

fn cmd_mkdir(session: &mut Session, console: &mut dyn Console, argv: &Argv<'_>) -> CommandResult {
    for_each_operand(session, console, argv, "creating directory", |path| fs::create_dir(path))
}

fn cmd_rmdir(session: &mut Session, console: &mut dyn Console, argv: &Argv<'_>) -> CommandResult {
    for_each_operand(session, console, argv, "removing directory", |path| fs::remove_dir(path))
}

/// Shared `[-v] name...` driver for rm, mkdir and rmdir
fn for_each_operand(
    session: &mut Session,
    console: &mut dyn Console,
    argv: &Argv<'_>,
    verb: &str,
    op: impl Fn(&Path) -> io::Result<()>,
) -> CommandResult {
    let name = argv.command().unwrap_or_default();
    let flags = OptFlags::parse(argv, "?v");

    if flags.has('?') {
        console.print(&format!("usage: {} [-v] name\n", name));
        return Ok(());
    }

    let operands: Vec<&str> = argv.iter().skip(flags.optind).collect();
    if operands.is_empty() {
        return Err(CommandError::MissingArgument);
    }

    for operand in operands {
        if flags.has('v') {
            console.print(&format!("{}: {} '{}'\n", name, verb, operand));
        }
        if let Err(e) = op(&session.resolve(operand)) {
            console.print(&format!("{}: {}\n", name, e));
        }
    }
    Ok(())
}

fn cmd_realpath(
    session: &mut Session,
    console: &mut dyn Console,
    argv: &Argv<'_>,
) -> CommandResult {
    let arg = operand(argv, 1)?;
    console.print(&format!("{}\n", path::realpath(arg, &session.cwd.to_string_lossy())));
    Ok(())
}

fn cmd_basename(_: &mut Session, console: &mut dyn Console, argv: &Argv<'_>) -> CommandResult {
    console.print(&format!("{}\n", path::basename(operand(argv, 1)?)));
    Ok(())
}

fn cmd_dirname(_: &mut Session, console: &mut dyn Console, argv: &Argv<'_>) -> CommandResult {
    console.print(&format!("{}\n", path::dirname(operand(argv, 1)?)));
    Ok(())
}

fn cmd_test(session: &mut Session, _: &mut dyn Console, _: &Argv<'_>) -> CommandResult {
    session.queue_script(SELF_TEST);
    Ok(())
}
