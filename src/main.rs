use anyhow::Result;

fn main() -> Result<()> {
    terminal_journal::app::run()
}
