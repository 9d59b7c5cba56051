use anyhow::Result;
use meetyourmaker::commands::{Command, HELP_TEXT, parse_command};
use meetyourmaker::conversation::{ConversationEngine, RefreshOutcome, Role, SubmitOutcome};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

fn speaker(role: Role) -> &'static str {
    match role {
        Role::User => "you",
        Role::Assistant => "them",
    }
}

async fn print_history(engine: &ConversationEngine) {
    let mode = engine.mode().await;
    println!("── {} ──", mode.label());
    for message in engine.history(mode).await.messages() {
        println!("{:>5}: {}", speaker(message.role), message.content);
    }
}

fn report_refresh(outcome: &RefreshOutcome) {
    if let RefreshOutcome::Failed(error) = outcome {
        println!("! {error}");
    }
}

/// Interactive line loop over stdin. Returns on `/quit` or end of input.
pub async fn run_chat(engine: ConversationEngine) -> Result<()> {
    report_refresh(&engine.refresh().await);
    print_history(&engine).await;
    println!("(type /help for commands)");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    loop {
        let mode = engine.mode().await;
        stdout
            .write_all(format!("[{mode}] {} > ", mode.input_placeholder()).as_bytes())
            .await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            println!();
            break;
        };

        match parse_command(&line) {
            Some(Command::Quit) => break,
            Some(Command::Help) => println!("{HELP_TEXT}"),
            Some(Command::History) => print_history(&engine).await,
            Some(Command::Prompt) => println!("{}", engine.system_prompt().await?),
            Some(Command::Mode { mode: None }) => println!("mode: {}", engine.mode().await),
            Some(Command::Mode { mode: Some(mode) }) => {
                match engine.switch_mode(mode).await {
                    Some(handle) => {
                        report_refresh(&handle.await?);
                        print_history(&engine).await;
                    }
                    None => println!("already in {mode} mode"),
                }
            }
            Some(Command::Invalid { message }) => println!("! {message}"),
            None => match engine.submit(&line).await {
                SubmitOutcome::Replied(reply) => println!(" them: {reply}"),
                SubmitOutcome::EmptyReply => println!("(no reply)"),
                SubmitOutcome::Failed(error) => println!("! {error}"),
                SubmitOutcome::Ignored => {}
            },
        }
    }

    Ok(())
}
