use std::env;
use std::process;

use tracing_subscriber::EnvFilter;

use ikamand_client::{ApiError, Config, Ikamand};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = env::args().skip(1).collect();

    let mut config = Config::from_env();
    if let Some(host) = args.first() {
        config.host = host.clone();
    }
    let action = args.get(1).map(String::as_str).unwrap_or("status");

    eprintln!("Talking to iKamand at {}", config.host);
    let mut client = match Ikamand::from_config(&config) {
        Ok(client) => client,
        Err(err) => {
            eprintln!("Failed to build client: {}", err);
            process::exit(1);
        }
    };

    match action {
        "status" => {}
        "cook" => {
            let target_pit_temp = parse_arg(&args, 2, "target pit temp");
            let target_food_temp = args.get(3).and_then(|v| v.parse().ok()).unwrap_or(0);
            let food_probe = args.get(4).and_then(|v| v.parse().ok()).unwrap_or(0);
            report(
                "start cook",
                client.start_cook(target_pit_temp, target_food_temp, food_probe),
            );
        }
        "stop-cook" => report("stop cook", client.stop_cook()),
        "grill" => report("start grill", client.start_grill()),
        "stop-grill" => report("stop grill", client.stop_grill()),
        "networks" => {
            match client.fetch_known_networks() {
                Ok(networks) => println!("Known networks: {:?}", networks),
                Err(err) => {
                    eprintln!("Network list fetch failed: {}", err);
                    process::exit(3);
                }
            }
            return;
        }
        other => {
            eprintln!("Unknown action: {}", other);
            eprintln!(
                "Usage: ikamand-smoke <host> [status | cook <tpt> [tft] [probe] | stop-cook | grill | stop-grill | networks]"
            );
            process::exit(2);
        }
    }

    // Follow any command with a poll so the run always ends with a snapshot.
    match client.fetch_status() {
        Ok(state) => {
            println!("{}", serde_json::to_string_pretty(state).expect("state serializes"));
        }
        Err(err) => {
            eprintln!("Device unreachable: {}", err);
            process::exit(4);
        }
    }
}

fn report(what: &str, result: Result<(), ApiError>) {
    match result {
        Ok(()) => eprintln!("Sent {}", what),
        Err(err) => {
            eprintln!("Failed to send {}: {}", what, err);
            process::exit(3);
        }
    }
}

fn parse_arg(args: &[String], index: usize, what: &str) -> u16 {
    match args.get(index).map(|value| value.parse()) {
        Some(Ok(value)) => value,
        _ => {
            eprintln!("Missing or invalid {}", what);
            process::exit(2);
        }
    }
}
