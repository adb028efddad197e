use anyhow::Result;
use dialoguer::Input;
use evboard_core::assistant::Assistant;
use evboard_core::BoardConfig;
use owo_colors::OwoColorize;

pub async fn run(config: &BoardConfig, question: Option<String>) -> Result<()> {
    let assistant = Assistant::new(&config.gemini_api_key, &config.gemini_model);

    match question {
        Some(question) => {
            ask_once(&assistant, &question).await;
            Ok(())
        }
        None => interactive(&assistant).await,
    }
}

/// One question, one answer. Assistant failures are messages, not errors —
/// the command always exits cleanly.
async fn ask_once(assistant: &Assistant, question: &str) {
    match assistant.ask(question).await {
        Ok(reply) => println!("{}", reply),
        Err(e) => eprintln!("{}", e.to_string().red()),
    }
}

/// Prompt loop; an empty line ends the session. No history is carried
/// between questions.
async fn interactive(assistant: &Assistant) -> Result<()> {
    println!("{}", "Ask about the events (empty line to quit)".dimmed());

    loop {
        let question: String = Input::new()
            .with_prompt("  ?")
            .default(String::new())
            .show_default(false)
            .interact_text()?;

        if question.trim().is_empty() {
            return Ok(());
        }

        ask_once(assistant, &question).await;
        println!();
    }
}
