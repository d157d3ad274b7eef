//! Interactive chat loop over stdin.

use std::io::Write as _;

use tokio::io::{AsyncBufReadExt, BufReader};

use courtside_agent::{AgentClient, ChatSession};

use crate::views;

const HELP: &str = "commands: /metrics  /prompts  /trace <n>  /reset  /help  /quit";

/// Run the prompt/read/send cycle until `/quit` or end of input.
///
/// One turn at a time: each send completes (or fails) before the next
/// line is read. A failed call prints one error line and the exchange is
/// dropped.
pub async fn run(mut session: ChatSession, client: &dyn AgentClient) -> std::io::Result<()> {
    println!("Session {}", session.id());
    println!("{HELP}");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let line = line.trim();

        match line {
            "" => continue,
            "/quit" | "/exit" => break,
            "/help" => println!("{HELP}"),
            "/reset" => {
                session.reset();
                println!("Session reset ({})", session.id());
            }
            "/metrics" => print!("{}", views::session_panel(&session.metrics())),
            "/prompts" => print!("{}", views::prompt_panel(&session)),
            _ if line.starts_with("/trace") => match parse_trace_index(line) {
                Some(n) => println!("{}", views::raw_trace(&session, n)),
                None => println!("usage: /trace <exchange number>"),
            },
            _ if line.starts_with('/') => println!("unknown command; {HELP}"),
            prompt => match session.send(client, prompt).await {
                Ok(Some(turn)) => println!("{}", turn.content),
                Ok(None) => {}
                Err(e) => eprintln!("error: {e}"),
            },
        }
    }

    Ok(())
}

fn parse_trace_index(line: &str) -> Option<usize> {
    line.strip_prefix("/trace")?.trim().parse().ok()
}
