use gs_client::TerminalSession;
use tokio::io::{AsyncBufReadExt, BufReader};

/// Local inputs that end the session instead of being sent.
const EXIT_COMMANDS: [&str; 2] = ["exit", "quit"];

pub(crate) fn is_exit_command(input: &str) -> bool {
    EXIT_COMMANDS.contains(&input.trim())
}

/// Runs an interactive terminal: stdin lines go to the host, replies are
/// printed as they arrive. Ends on `exit`, EOF, Ctrl-C, or when the host
/// closes the connection.
///
/// # Errors
///
/// Returns an error if the connection cannot be opened or fails mid-session.
pub(crate) async fn run_terminal(url: &str) -> anyhow::Result<()> {
    let mut session = TerminalSession::connect(url).await?;
    println!("connected to {url}; type `exit` to leave");

    let mut input = BufReader::new(tokio::io::stdin()).lines();
    let shutdown = crate::shutdown_signal();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            () = &mut shutdown => break,
            line = input.next_line() => {
                let Some(line) = line? else { break };
                if is_exit_command(&line) {
                    break;
                }
                if let Some(echo) = session.send_command(&line).await? {
                    println!("{echo}");
                }
            }
            reply = session.next_line() => match reply? {
                Some(reply) => println!("{reply}"),
                None => {
                    println!("connection closed by host");
                    return Ok(());
                }
            },
        }
    }

    session.close().await?;
    Ok(())
}
