use std::process::exit;

fn main() {
    if let Err(e) = zoocards::app::run_cli() {
        zoocards::utils::error(&e);
        exit(1);
    }
}
