// Calendar Layout command line
// Main entry point

fn main() {
    // Initialize logging
    env_logger::init();

    log::debug!("Starting calendar-layout");

    if let Err(err) = calendar_layout::cli::run_from_env() {
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}
