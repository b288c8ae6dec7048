use std::env;
use std::io::{self, BufRead, Write};
use std::process::ExitCode;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::thread;

use chat_api::{ChatApiClient, ChatApiConfig};
use chat_session::{ask, cancel_signal, options_from_env, CancelSignal, SessionError};
use streamdown::{platform, prewarm_highlighting, EnvConfig};

fn main() -> ExitCode {
    // Loading the syntax set takes long enough to be visible on the first
    // code block; warm it while the request is in flight.
    let _ = thread::Builder::new()
        .name("highlight-prewarm".to_string())
        .spawn(prewarm_highlighting);

    let cancel = cancel_signal();
    let _ = signal_hook::flag::register(signal_hook::consts::SIGINT, Arc::clone(&cancel));

    let env_config = EnvConfig::from_env();
    let client = match ChatApiClient::new(ChatApiConfig::from_env()) {
        Ok(client) => client,
        Err(error) => {
            eprintln!("sd: {error} (set SD_ACCESS_TOKEN)");
            return ExitCode::FAILURE;
        }
    };
    if env_config.debug {
        eprintln!("sd: endpoint {}", client.endpoint());
    }

    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(error) => {
            eprintln!("sd: failed to start runtime: {error}");
            return ExitCode::FAILURE;
        }
    };

    let args: Vec<String> = env::args().skip(1).collect();
    if args.is_empty() {
        return interactive_loop(&runtime, &client, &env_config, &cancel);
    }

    let question = args.join(" ");
    run_question(&runtime, &client, &env_config, &cancel, &question)
}

fn run_question(
    runtime: &tokio::runtime::Runtime,
    client: &ChatApiClient,
    env_config: &EnvConfig,
    cancel: &CancelSignal,
    question: &str,
) -> ExitCode {
    cancel.store(false, Ordering::SeqCst);
    let options = options_from_env(env_config, platform::stdout_is_tty());

    match runtime.block_on(ask(
        client,
        question,
        io::stdout(),
        options,
        Arc::clone(cancel),
    )) {
        Ok(_) => ExitCode::SUCCESS,
        Err(SessionError::Cancelled) => {
            eprintln!("sd: interrupted");
            ExitCode::FAILURE
        }
        Err(error) => {
            eprintln!("sd: {error}");
            ExitCode::FAILURE
        }
    }
}

fn interactive_loop(
    runtime: &tokio::runtime::Runtime,
    client: &ChatApiClient,
    env_config: &EnvConfig,
    cancel: &CancelSignal,
) -> ExitCode {
    println!("streamdown interactive mode");
    println!("Type your questions and press Enter. Type 'exit' or 'quit' to leave.");

    let stdin = io::stdin();
    loop {
        print!("\n> ");
        let _ = io::stdout().flush();

        let mut input = String::new();
        match stdin.lock().read_line(&mut input) {
            Ok(0) | Err(_) => break,
            Ok(_) => {}
        }

        let question = input.trim();
        if question.is_empty() {
            continue;
        }
        if question == "exit" || question == "quit" {
            println!("Bye.");
            break;
        }

        let _ = run_question(runtime, client, env_config, cancel, question);
    }

    ExitCode::SUCCESS
}
