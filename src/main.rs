use anyhow::Result;

fn main() -> Result<()> {
    env_logger::init();
    chat_history_browser::cli::run()
}
