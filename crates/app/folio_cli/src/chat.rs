//! Terminal front end for the chat widget.

use std::io::{BufRead, Write};

use folio_core::chat::transport::{ChatTransport, HttpTransport};
use folio_core::chat::widget::{ChatWidget, SendRejected};
use folio_core::chat::{ChatMessage, Role};
use log::{debug, warn};
use tokio::runtime::Runtime;

use crate::Result;

fn print_message(out: &mut impl Write, msg: &ChatMessage) -> Result<()> {
    let who = match msg.role {
        Role::User => "you",
        Role::Assistant => "ai",
    };
    writeln!(out, "{who}> {}", msg.content)?;
    Ok(())
}

/// Send a single message and print the reply.
pub fn ask(rt: &Runtime, greeting: &str, endpoint: &str, message: &str) -> Result<()> {
    let widget = ChatWidget::new(greeting, HttpTransport::new(endpoint)?);
    rt.block_on(widget.submit(message))?;

    if let Some(reply) = widget.last_message() {
        println!("{}", reply.content);
    }
    Ok(())
}

fn send<T>(
    rt: &Runtime,
    widget: &ChatWidget<T>,
    message: &str,
    out: &mut impl Write,
) -> Result<()>
where
    T: ChatTransport,
{
    match rt.block_on(widget.submit(message)) {
        Ok(()) => {
            if let Some(reply) = widget.last_message() {
                print_message(out, &reply)?;
            }
        }
        Err(SendRejected::Blank) => {}
        Err(e) => warn!("{e}"),
    }
    out.flush()?;
    Ok(())
}

/// Interactive loop: one submitted message per line, `\` at end of line
/// continues the message on the next line. A continued message still open
/// when input ends is sent as it stands.
pub fn repl(
    rt: &Runtime,
    greeting: &str,
    endpoint: &str,
    input: impl BufRead,
    out: &mut impl Write,
) -> Result<()> {
    let transport = HttpTransport::new(endpoint)?;
    debug!("chatting with {}", transport.url());
    let widget = ChatWidget::new(greeting, transport);

    if let Some(first) = widget.last_message() {
        print_message(out, &first)?;
    }

    let mut draft = String::new();
    for line in input.lines() {
        let line = line?;
        if let Some(continued) = line.strip_suffix('\\') {
            draft.push_str(continued);
            draft.push('\n');
            continue;
        }
        draft.push_str(&line);
        let message = std::mem::take(&mut draft);
        send(rt, &widget, &message, out)?;
    }

    if !draft.trim().is_empty() {
        debug!("input ended mid-message; sending the open draft");
        send(rt, &widget, draft.trim_end_matches('\n'), out)?;
    }
    Ok(())
}
