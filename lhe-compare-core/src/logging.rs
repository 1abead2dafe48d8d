//! Logging helpers shared by the tool executors.
//!
//! The crate only logs through the `log` facade; the binary decides where the
//! records go.

use std::ffi::OsStr;
use std::process::Command;

use log::debug;

/// Renders a program and its arguments as a single, readable line.
///
/// Arguments containing whitespace or quotes are wrapped in single quotes so
/// the line can be pasted into a shell when reproducing a failure.
pub fn describe_command<I, S>(program: impl AsRef<OsStr>, args: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let mut parts = vec![quote(program.as_ref())];
    parts.extend(args.into_iter().map(|arg| quote(arg.as_ref())));
    parts.join(" ")
}

fn quote(part: &OsStr) -> String {
    let text = part.to_string_lossy();
    if text.is_empty() || text.contains(|c: char| c.is_whitespace() || "'\"$;&|".contains(c)) {
        format!("'{}'", text.replace('\'', r"'\''"))
    } else {
        text.into_owned()
    }
}

/// Logs a command at debug level before it is spawned.
pub fn log_command(cmd: &Command) {
    debug!("Running: {}", describe_command(cmd.get_program(), cmd.get_args()));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_plain_command() {
        let line = describe_command("ffprobe", ["-v", "error", "files/a.mp4"]);
        assert_eq!(line, "ffprobe -v error files/a.mp4");
    }

    #[test]
    fn test_describe_quotes_awkward_arguments() {
        let line = describe_command("python2", ["psnr.py", "my clip.yuv", "it's", ""]);
        assert_eq!(line, r"python2 psnr.py 'my clip.yuv' 'it'\''s' ''");
    }
}
