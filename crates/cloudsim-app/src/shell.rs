//! Line-mode presentation shell around a [`Session`].

use std::io::{BufRead, Write};

use cloudsim_terminal::{Session, parse};

/// Words that end the shell instead of reaching the interpreter.
const EXIT_WORDS: &[&str] = &["exit", "logout"];

/// ANSI: clear screen and home the cursor.
const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

fn write_prompt<W: Write>(session: &Session, out: &mut W) -> std::io::Result<()> {
    let config = session.config();
    write!(
        out,
        "{}@{}:{}$ ",
        config.user,
        config.hostname,
        session.prompt()
    )?;
    out.flush()
}

fn write_header<W: Write>(session: &Session, out: &mut W) -> std::io::Result<()> {
    writeln!(out, "{}", session.welcome())?;
    writeln!(out, "[{}]", session.summary())?;
    writeln!(out)
}

/// Read lines until EOF or an exit word, echoing each entry's output.
pub fn run<R: BufRead, W: Write>(
    session: &mut Session,
    input: R,
    mut out: W,
) -> std::io::Result<()> {
    write_header(session, &mut out)?;
    write_prompt(session, &mut out)?;

    for line in input.lines() {
        let line = line?;
        let is_blank = parse(&line).is_none();
        if EXIT_WORDS.contains(&line.trim()) {
            break;
        }

        let before = session.summary();
        match session.execute(&line) {
            Some(entry) if !entry.output.is_empty() => writeln!(out, "{}", entry.output)?,
            Some(_) => {},
            None if is_blank => {},
            None => {
                // Only `clear` yields no entry for a non-blank line.
                write!(out, "{CLEAR_SCREEN}")?;
                write_header(session, &mut out)?;
            },
        }
        let after = session.summary();
        if after != before {
            writeln!(out, "[{after}]")?;
        }
        write_prompt(session, &mut out)?;
    }
    writeln!(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cloudsim_terminal::FixedClock;
    use cloudsim_types::config::SimConfig;

    fn run_script(script: &str) -> (Session, String) {
        let mut session =
            Session::with_clock(SimConfig::default(), Box::new(FixedClock::new("00:00:00")));
        let mut out = Vec::new();
        run(&mut session, script.as_bytes(), &mut out).unwrap();
        (session, String::from_utf8(out).unwrap())
    }

    #[test]
    fn prints_banner_and_prompt() {
        let (_, out) = run_script("");
        assert!(out.starts_with("Welcome to Cloud Terminal Simulator v2.0"));
        assert!(out.contains("user@cloudsim:~$ "));
    }

    #[test]
    fn echoes_command_output() {
        let (session, out) = run_script("pwd\nfoobar\n");
        assert!(out.contains("~\n"));
        assert!(out.contains("command not found: foobar"));
        assert_eq!(session.log().len(), 2);
    }

    #[test]
    fn reports_summary_changes() {
        let (_, out) = run_script("create instance web1 compute\n");
        assert!(out.contains("[Compute: 1  DB: 0"));
    }

    #[test]
    fn exit_stops_reading() {
        let (session, _) = run_script("pwd\nexit\npwd\n");
        assert_eq!(session.log().len(), 1);
    }

    #[test]
    fn clear_redraws_header() {
        let (session, out) = run_script("pwd\nclear\n");
        assert!(session.log().is_empty());
        assert!(out.contains(CLEAR_SCREEN));
        assert_eq!(out.matches("Welcome to Cloud Terminal Simulator").count(), 2);
    }
}
