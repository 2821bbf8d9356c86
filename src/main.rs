use hotseat_chess::shell;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    log::info!("Hotseat chess - terminal");

    if let Err(e) = shell::run_interactive_terminal() {
        log::error!("session ended: {e}");
        std::process::exit(1);
    }
}
