//! Interactive question loop.

use crate::cli::Output;
use crate::error::Result;
use crate::rag::Answerer;
use console::style;
use futures::StreamExt;
use std::io::{BufRead, Write};
use tracing::debug;

const PROMPT: &str = "Enter your question (or 'exit' to quit):";

/// Run the question loop until `exit` or end of input.
///
/// Answer fragments are written as they arrive. A failed answer is reported
/// and the loop keeps going; only I/O errors on `input`/`out` end it early.
pub async fn run<R, W>(answerer: &dyn Answerer, mut input: R, out: &mut W) -> Result<()>
where
    R: BufRead,
    W: Write,
{
    let mut asked = 0usize;

    loop {
        write!(out, "{} ", style(PROMPT).green().bold())?;
        out.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            writeln!(out)?;
            break;
        }

        let question = line.trim();
        if question.is_empty() {
            continue;
        }
        if question.eq_ignore_ascii_case("exit") {
            break;
        }

        asked += 1;
        if let Err(e) = stream_answer(answerer, question, out).await {
            writeln!(out)?;
            Output::error(&format!("Error: {}", e));
        }
    }

    debug!("Session ended after {} questions", asked);
    writeln!(out, "Exiting the Q&A session.")?;
    Ok(())
}

async fn stream_answer<W: Write>(answerer: &dyn Answerer, question: &str, out: &mut W) -> Result<()> {
    let mut fragments = answerer.answer(question).await?;

    while let Some(fragment) = fragments.next().await {
        write!(out, "{}", fragment?)?;
        out.flush()?;
    }
    writeln!(out, "\n")?;
    Ok(())
}
