use anyhow::Context;
use std::io::{BufRead, Write};
use std::path::Path;
use todo_core::{config::Config, handler::handler, session::Session, types::CliState};

pub fn run(root: &Path) -> anyhow::Result<()> {
    let config = Config::load_or_default(root).context("failed to load config")?;
    let session = Session::new(config);
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    drive(session, stdin.lock(), stdout.lock())?;
    Ok(())
}

/// Read lines from `input` until the session exits or input ends. Errors from
/// a line are printed and the prompt is shown again.
pub fn drive<R: BufRead, W: Write>(
    mut session: Session,
    input: R,
    mut out: W,
) -> anyhow::Result<String> {
    writeln!(out, "{}", handler(CliState::MainMenu).prompt)?;
    write!(out, "{}", session.prompt())?;
    out.flush()?;

    for line in input.lines() {
        let line = line.context("failed to read input")?;
        match session.handle_line(&line) {
            Ok(reply) => {
                for text in &reply.lines {
                    writeln!(out, "{text}")?;
                }
            }
            Err(e) => {
                tracing::debug!(error = %e, "input rejected");
                writeln!(out, "error: {e}")?;
            }
        }
        if session.is_finished() {
            break;
        }
        write!(out, "{}", session.prompt())?;
        out.flush()?;
    }

    if !session.is_finished() {
        writeln!(out)?;
    }
    let summary = session.close();
    writeln!(out, "Session ended: {summary}")?;
    out.flush()?;
    Ok(summary)
}
