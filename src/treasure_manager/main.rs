use treasure_manager::api::Outcome;
use treasure_manager::error::TreasureError;

mod args;
mod cli;

fn main() {
    match cli::run() {
        Ok(Outcome::Completed) => {}
        Ok(Outcome::Failed) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {}", e);
            let code = match e {
                TreasureError::Usage(_) => 2,
                _ => 1,
            };
            std::process::exit(code);
        }
    }
}
